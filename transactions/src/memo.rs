//! Memo validation and the 16-byte memo encoding.
//!
//! A memo is empty, or dash-separated groups of `A-Z` or `0-9`:
//! each group is homogeneous and adjacent groups alternate between letters
//! and digits (`AB-00-EF`, `12-XY`, `ZZZ`).

use crate::error::MemoError;

/// Size of the encoded memo field.
pub const MEMO_LEN: usize = 16;

/// Longest memo prefix copied into the field; the last byte is the terminator.
pub const MEMO_MAX_CHARS: usize = MEMO_LEN - 1;

#[derive(Clone, Copy, PartialEq, Eq)]
enum GroupKind {
    Letters,
    Digits,
}

/// Check `memo` against the grammar, reporting the first rule it breaks.
pub fn check(memo: &str) -> Result<(), MemoError> {
    if memo.is_empty() {
        return Ok(());
    }
    if let Some(c) = memo
        .chars()
        .find(|c| !(c.is_ascii_uppercase() || c.is_ascii_digit() || *c == '-'))
    {
        return Err(MemoError::InvalidCharacter(c));
    }
    if memo.starts_with('-') {
        return Err(MemoError::LeadingDash);
    }
    if memo.ends_with('-') {
        return Err(MemoError::TrailingDash);
    }

    let mut previous = None;
    for (position, group) in memo.split('-').enumerate() {
        if group.is_empty() {
            return Err(MemoError::EmptyGroup { position });
        }
        let kind = if group.bytes().all(|b| b.is_ascii_uppercase()) {
            GroupKind::Letters
        } else if group.bytes().all(|b| b.is_ascii_digit()) {
            GroupKind::Digits
        } else {
            return Err(MemoError::MixedGroup {
                group: group.to_string(),
            });
        };
        if previous == Some(kind) {
            return Err(MemoError::AdjacentGroups { position });
        }
        previous = Some(kind);
    }
    Ok(())
}

/// Whether `memo` is a valid memo.
pub fn validate(memo: &str) -> bool {
    check(memo).is_ok()
}

/// Encode `memo` into the 16-byte field, failing on invalid input.
pub fn encode_strict(memo: &str) -> Result<[u8; MEMO_LEN], MemoError> {
    check(memo)?;
    let mut out = [0u8; MEMO_LEN];
    let bytes = memo.as_bytes();
    let len = bytes.len().min(MEMO_MAX_CHARS);
    out[..len].copy_from_slice(&bytes[..len]);
    // out[len] stays zero: explicit terminator
    Ok(out)
}

/// Encode `memo` into the 16-byte field.
///
/// Invalid memos encode to all zeros. Callers that must reject them use
/// [`validate`] or [`encode_strict`] first.
pub fn encode(memo: &str) -> [u8; MEMO_LEN] {
    encode_strict(memo).unwrap_or([0u8; MEMO_LEN])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn grammar_examples() {
        assert!(validate(""));
        assert!(validate("AB-00-EF"));
        assert!(validate("ABC"));
        assert!(validate("123"));
        assert!(validate("12-XY-34"));
        assert!(!validate("AB-CD-EF"));
        assert!(!validate("-AB-12"));
        assert!(!validate("AB-12-"));
        assert!(!validate("AB--12"));
        assert!(!validate("12-34"));
        assert!(!validate("ab-12"));
        assert!(!validate("A1"));
        assert!(!validate("AB 12"));
        assert!(!validate("-"));
    }

    #[test]
    fn check_names_the_broken_rule() {
        assert_eq!(check("AB_12"), Err(MemoError::InvalidCharacter('_')));
        assert_eq!(check("-AB"), Err(MemoError::LeadingDash));
        assert_eq!(check("AB-"), Err(MemoError::TrailingDash));
        assert_eq!(check("AB--12"), Err(MemoError::EmptyGroup { position: 1 }));
        assert_eq!(
            check("AB-1C"),
            Err(MemoError::MixedGroup { group: "1C".into() })
        );
        assert_eq!(
            check("AB-CD-EF"),
            Err(MemoError::AdjacentGroups { position: 1 })
        );
    }

    #[test]
    fn encode_places_terminator_after_memo() {
        let out = encode("AB-12-CD");
        assert_eq!(&out[..8], b"AB-12-CD");
        assert_eq!(out[8], 0);
        assert!(out[9..].iter().all(|&b| b == 0));
    }

    #[test]
    fn encode_empty_and_invalid_are_zero() {
        assert_eq!(encode(""), [0u8; MEMO_LEN]);
        assert_eq!(encode("invalid-memo"), [0u8; MEMO_LEN]);
    }

    #[test]
    fn encode_truncates_to_fifteen_chars() {
        let out = encode("AB-12-CD-34-EF-56");
        assert_eq!(&out[..15], b"AB-12-CD-34-EF-");
        assert_eq!(out[15], 0);
    }

    #[test]
    fn strict_encode_rejects_invalid() {
        assert!(encode_strict("invalid-memo").is_err());
        assert_eq!(encode_strict("AB-00-EF").unwrap(), encode("AB-00-EF"));
    }
}
