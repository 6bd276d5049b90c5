//! Fixed-layout binary transaction record.
//!
//! All integers are little-endian. The record is always [`TX_LEN`] bytes; any
//! byte not written below is zero.
//!
//! | field            | offset | len  |
//! |------------------|--------|------|
//! | version (u32, 0) | 0      | 4    |
//! | source address   | 4      | 40   |
//! | change pk hash   | 44     | 40   |
//! | destination tag  | 84     | 40   |
//! | amount (u64)     | 124    | 8    |
//! | fee (u64)        | 132    | 8    |
//! | block-to-live    | 140    | 4    |
//! | memo (ASCII)     | 144    | 32   |
//! | unused           | 176    | 2128 |

use std::fmt;

use mochimo_types::strip_hex_prefix;

use crate::error::EncodeError;

pub const TX_LEN: usize = 2304;

pub const VERSION_OFFSET: usize = 0;
pub const SOURCE_OFFSET: usize = 4;
pub const CHANGE_OFFSET: usize = 44;
pub const DESTINATION_OFFSET: usize = 84;
pub const AMOUNT_OFFSET: usize = 124;
pub const FEE_OFFSET: usize = 132;
pub const BLOCK_TO_LIVE_OFFSET: usize = 140;
pub const MEMO_OFFSET: usize = 144;

/// Width of each hex-decoded slot (source, change, destination).
pub const HEX_SLOT_LEN: usize = 40;

/// Width of the raw memo slot.
pub const RAW_MEMO_LEN: usize = 32;

/// Inputs of one transfer record. Hex strings may carry a `0x` prefix.
#[derive(Clone, Debug, Default)]
pub struct TransactionFields<'a> {
    pub source_address: &'a str,
    pub destination_tag: &'a str,
    pub change_pk: &'a str,
    pub amount: u64,
    pub fee: u64,
    pub block_to_live: u32,
    pub memo: Option<&'a str>,
}

/// A finished 2304-byte transaction record. Immutable once built.
#[derive(Clone, PartialEq, Eq)]
pub struct RawTransaction(Box<[u8; TX_LEN]>);

impl RawTransaction {
    pub fn as_bytes(&self) -> &[u8; TX_LEN] {
        &self.0
    }

    pub fn to_hex(&self) -> String {
        hex::encode(&self.0[..])
    }

    pub fn amount(&self) -> u64 {
        self.read_u64(AMOUNT_OFFSET)
    }

    pub fn fee(&self) -> u64 {
        self.read_u64(FEE_OFFSET)
    }

    pub fn block_to_live(&self) -> u32 {
        let mut buf = [0u8; 4];
        buf.copy_from_slice(&self.0[BLOCK_TO_LIVE_OFFSET..BLOCK_TO_LIVE_OFFSET + 4]);
        u32::from_le_bytes(buf)
    }

    fn read_u64(&self, offset: usize) -> u64 {
        let mut buf = [0u8; 8];
        buf.copy_from_slice(&self.0[offset..offset + 8]);
        u64::from_le_bytes(buf)
    }
}

impl fmt::Debug for RawTransaction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "RawTransaction(amount={}, fee={}, btl={})",
            self.amount(),
            self.fee(),
            self.block_to_live()
        )
    }
}

/// Serialize a transfer into its binary record.
pub fn encode_transaction(fields: &TransactionFields<'_>) -> Result<RawTransaction, EncodeError> {
    let mut buf = Box::new([0u8; TX_LEN]);

    buf[VERSION_OFFSET..VERSION_OFFSET + 4].copy_from_slice(&0u32.to_le_bytes());
    write_hex(&mut buf[..], SOURCE_OFFSET, "source address", fields.source_address)?;
    write_hex(&mut buf[..], CHANGE_OFFSET, "change public key", fields.change_pk)?;
    write_hex(&mut buf[..], DESTINATION_OFFSET, "destination tag", fields.destination_tag)?;
    buf[AMOUNT_OFFSET..AMOUNT_OFFSET + 8].copy_from_slice(&fields.amount.to_le_bytes());
    buf[FEE_OFFSET..FEE_OFFSET + 8].copy_from_slice(&fields.fee.to_le_bytes());
    buf[BLOCK_TO_LIVE_OFFSET..BLOCK_TO_LIVE_OFFSET + 4]
        .copy_from_slice(&fields.block_to_live.to_le_bytes());

    if let Some(memo) = fields.memo {
        let bytes = memo.as_bytes();
        let len = bytes.len().min(RAW_MEMO_LEN);
        buf[MEMO_OFFSET..MEMO_OFFSET + len].copy_from_slice(&bytes[..len]);
    }

    Ok(RawTransaction(buf))
}

fn write_hex(
    buf: &mut [u8],
    offset: usize,
    field: &'static str,
    value: &str,
) -> Result<(), EncodeError> {
    let bytes = hex::decode(strip_hex_prefix(value)).map_err(|e| EncodeError::InvalidHex {
        field,
        reason: e.to_string(),
    })?;
    if bytes.len() > HEX_SLOT_LEN {
        return Err(EncodeError::FieldTooLong {
            field,
            len: bytes.len(),
            max: HEX_SLOT_LEN,
        });
    }
    buf[offset..offset + bytes.len()].copy_from_slice(&bytes);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> TransactionFields<'static> {
        TransactionFields {
            source_address: "0x0102030405",
            destination_tag: "aabbccddeeff",
            change_pk: "0x99",
            amount: 10_000,
            fee: 500,
            block_to_live: 7,
            memo: Some("AB-00-EF"),
        }
    }

    #[test]
    fn layout_matches_offsets() {
        let tx = encode_transaction(&sample()).unwrap();
        let bytes = tx.as_bytes();
        assert_eq!(bytes.len(), TX_LEN);
        assert_eq!(&bytes[0..4], &[0, 0, 0, 0]);
        assert_eq!(&bytes[4..9], &[1, 2, 3, 4, 5]);
        assert!(bytes[9..44].iter().all(|&b| b == 0));
        assert_eq!(bytes[44], 0x99);
        assert_eq!(&bytes[84..90], &[0xaa, 0xbb, 0xcc, 0xdd, 0xee, 0xff]);
        assert_eq!(&bytes[124..132], &10_000u64.to_le_bytes());
        assert_eq!(&bytes[132..140], &500u64.to_le_bytes());
        assert_eq!(&bytes[140..144], &7u32.to_le_bytes());
        assert_eq!(&bytes[144..152], b"AB-00-EF");
        assert!(bytes[152..].iter().all(|&b| b == 0));
    }

    #[test]
    fn read_back_accessors() {
        let tx = encode_transaction(&sample()).unwrap();
        assert_eq!(tx.amount(), 10_000);
        assert_eq!(tx.fee(), 500);
        assert_eq!(tx.block_to_live(), 7);
    }

    #[test]
    fn prefix_does_not_change_encoding() {
        let with = encode_transaction(&sample()).unwrap();
        let without = encode_transaction(&TransactionFields {
            source_address: "0102030405",
            destination_tag: "0xaabbccddeeff",
            change_pk: "99",
            ..sample()
        })
        .unwrap();
        assert_eq!(with, without);
    }

    #[test]
    fn memo_is_raw_and_truncated_to_32() {
        let memo = "not-a-valid-memo-but-raw-ascii-is-fine";
        let tx = encode_transaction(&TransactionFields {
            memo: Some(memo),
            ..sample()
        })
        .unwrap();
        assert_eq!(&tx.as_bytes()[144..176], &memo.as_bytes()[..32]);
        assert!(tx.as_bytes()[176..].iter().all(|&b| b == 0));
    }

    #[test]
    fn oversized_hex_is_rejected() {
        let long = "ab".repeat(HEX_SLOT_LEN + 1);
        let err = encode_transaction(&TransactionFields {
            destination_tag: &long,
            ..sample()
        })
        .unwrap_err();
        assert_eq!(
            err,
            EncodeError::FieldTooLong {
                field: "destination tag",
                len: 41,
                max: 40
            }
        );
    }

    #[test]
    fn full_width_hex_fits() {
        let full = "cd".repeat(HEX_SLOT_LEN);
        let tx = encode_transaction(&TransactionFields {
            source_address: &full,
            ..sample()
        })
        .unwrap();
        assert!(tx.as_bytes()[4..44].iter().all(|&b| b == 0xcd));
        assert_eq!(tx.as_bytes()[44], 0x99);
    }

    #[test]
    fn non_hex_is_rejected() {
        let err = encode_transaction(&TransactionFields {
            change_pk: "0xzz",
            ..sample()
        })
        .unwrap_err();
        assert!(matches!(
            err,
            EncodeError::InvalidHex {
                field: "change public key",
                ..
            }
        ));
    }
}
