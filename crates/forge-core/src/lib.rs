use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

pub mod constants;
pub mod error;
pub mod ledger;
pub mod pow;
pub mod resolve;
pub mod validate;

pub use error::LedgerError;
pub use ledger::Ledger;
pub use resolve::{resolve_conflicts, ChainSnapshot};
pub use validate::is_valid_chain;

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transaction {
    pub sender: String,
    pub recipient: String,
    pub amount: u64,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Block {
    pub index: u64,
    /// Milliseconds since the Unix epoch.
    pub timestamp: u64,
    pub transactions: Vec<Transaction>,
    pub proof: u64,
    pub previous_hash: String,
}

/// Canonical SHA-256 digest of a block, hex-encoded.
///
/// The block is rendered through `serde_json::Value`, whose object keys are
/// ordered, so logically identical blocks hash identically regardless of how
/// the in-memory value was assembled.
pub fn block_hash(block: &Block) -> String {
    let canonical = serde_json::to_value(block).unwrap().to_string();
    hex::encode(Sha256::digest(canonical.as_bytes()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::HASH_HEX_SIZE;

    fn sample_block() -> Block {
        Block {
            index: 1,
            timestamp: 1_600_000_000_000,
            transactions: vec![],
            proof: 100,
            previous_hash: "1".to_string(),
        }
    }

    #[test]
    fn canonical_encoding_sorts_keys() {
        let canonical = serde_json::to_value(sample_block()).unwrap().to_string();
        assert_eq!(
            canonical,
            r#"{"index":1,"previous_hash":"1","proof":100,"timestamp":1600000000000,"transactions":[]}"#
        );
    }

    #[test]
    fn block_hash_example() {
        let hash = block_hash(&sample_block());
        let expected_hex = "c71a712611c3abbf98e71caf0b900efcbbf507e2715b8ef9d3b878685fb03173";
        assert_eq!(hash, expected_hex);
        assert_eq!(hash.len(), HASH_HEX_SIZE);
    }

    #[test]
    fn block_hash_with_transactions_example() {
        let block = Block {
            index: 2,
            timestamp: 1_600_000_000_500,
            transactions: vec![
                Transaction {
                    sender: "alice".to_string(),
                    recipient: "bob".to_string(),
                    amount: 5,
                },
                Transaction {
                    sender: "0".to_string(),
                    recipient: "node-1".to_string(),
                    amount: 1,
                },
            ],
            proof: 35293,
            previous_hash: block_hash(&sample_block()),
        };
        let expected_hex = "d336f06c8b4448bf3f53422f206632f9f69827e5e391035c42d61087ea3303ea";
        assert_eq!(block_hash(&block), expected_hex);
    }

    #[test]
    fn block_hash_ignores_source_field_order() {
        let a: Block = serde_json::from_str(
            r#"{"index":1,"timestamp":1600000000000,"transactions":[],"proof":100,"previous_hash":"1"}"#,
        )
        .unwrap();
        let b: Block = serde_json::from_str(
            r#"{"previous_hash":"1","proof":100,"transactions":[],"timestamp":1600000000000,"index":1}"#,
        )
        .unwrap();
        assert_eq!(a, b);
        assert_eq!(block_hash(&a), block_hash(&b));
    }

    #[test]
    fn block_hash_is_stable() {
        let block = sample_block();
        assert_eq!(block_hash(&block), block_hash(&block));
    }

    #[test]
    fn block_hash_changes_with_proof() {
        let mut block = sample_block();
        let before = block_hash(&block);
        block.proof += 1;
        assert_ne!(before, block_hash(&block));
    }

    #[test]
    fn block_hash_changes_with_timestamp() {
        let mut block = sample_block();
        let before = block_hash(&block);
        block.timestamp += 1;
        assert_ne!(before, block_hash(&block));
    }

    #[test]
    fn block_hash_changes_with_previous_hash() {
        let mut block = sample_block();
        let before = block_hash(&block);
        block.previous_hash = "2".to_string();
        assert_ne!(before, block_hash(&block));
    }

    #[test]
    fn block_hash_changes_with_transactions() {
        let mut block = sample_block();
        let before = block_hash(&block);
        block.transactions.push(Transaction {
            sender: "alice".to_string(),
            recipient: "bob".to_string(),
            amount: 5,
        });
        assert_ne!(before, block_hash(&block));
    }

    #[test]
    fn transaction_serialization_example() {
        let tx = Transaction {
            sender: "alice".to_string(),
            recipient: "bob".to_string(),
            amount: 5,
        };
        let json = serde_json::to_string(&tx).unwrap();
        let expected_json = r#"{"sender":"alice","recipient":"bob","amount":5}"#;
        assert_eq!(json, expected_json);
        let deserialized: Transaction = serde_json::from_str(&json).unwrap();
        assert_eq!(tx, deserialized);
    }

    #[test]
    fn block_serialization_round_trip() {
        let block = Block {
            index: 2,
            timestamp: 1_600_000_000_500,
            transactions: vec![Transaction {
                sender: "alice".to_string(),
                recipient: "bob".to_string(),
                amount: 5,
            }],
            proof: 35293,
            previous_hash: block_hash(&sample_block()),
        };
        let json = serde_json::to_string(&block).unwrap();
        let deserialized: Block = serde_json::from_str(&json).unwrap();
        assert_eq!(block, deserialized);
        assert_eq!(block_hash(&block), block_hash(&deserialized));
    }
}
