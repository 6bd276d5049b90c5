#![no_main]

use libfuzzer_sys::fuzz_target;

use mochimo_transactions::memo;

// The lenient and strict memo encoders must agree on every input.
fuzz_target!(|data: &[u8]| {
    let Ok(text) = std::str::from_utf8(data) else {
        return;
    };

    let lenient = memo::encode(text);
    match memo::encode_strict(text) {
        Ok(strict) => {
            assert!(memo::validate(text));
            assert_eq!(strict, lenient);
            assert_eq!(lenient[memo::MEMO_MAX_CHARS], 0, "terminator byte must be zero");
        }
        Err(_) => {
            assert!(!memo::validate(text));
            assert_eq!(lenient, [0u8; memo::MEMO_LEN]);
        }
    }
});
