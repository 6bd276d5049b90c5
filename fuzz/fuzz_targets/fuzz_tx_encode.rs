#![no_main]

use libfuzzer_sys::fuzz_target;

use mochimo_transactions::{encode_transaction, TransactionFields, TX_LEN};

// Arbitrary field text must either encode to a full record or fail cleanly.
fuzz_target!(|data: &[u8]| {
    if data.len() < 16 {
        return;
    }
    let amount = u64::from_le_bytes(data[0..8].try_into().unwrap());
    let fee = u64::from_le_bytes(data[8..16].try_into().unwrap());
    let text = String::from_utf8_lossy(&data[16..]);
    let mut parts = text.splitn(4, '|');

    let fields = TransactionFields {
        source_address: parts.next().unwrap_or(""),
        destination_tag: parts.next().unwrap_or(""),
        change_pk: parts.next().unwrap_or(""),
        amount,
        fee,
        block_to_live: (amount ^ fee) as u32,
        memo: parts.next(),
    };

    if let Ok(tx) = encode_transaction(&fields) {
        assert_eq!(tx.as_bytes().len(), TX_LEN);
        assert_eq!(tx.amount(), amount);
        assert_eq!(tx.fee(), fee);
    }
});
