//! Transaction structure
//!
//! Proof-of-stake transactions: Bitcoin layout plus a timestamp after the version.

use serde::{Deserialize, Serialize};

use super::{write_compact_size, write_var_bytes, Amount, Script};
use crate::crypto::{double_sha256, Hash};

/// Reference to a previous output
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct OutPoint {
    /// Hash of the transaction containing the output
    pub hash: Hash,
    /// Index of the output in that transaction
    pub index: u32,
}

impl OutPoint {
    /// The outpoint a coinbase input spends
    pub const fn null() -> Self {
        Self { hash: Hash::zero(), index: u32::MAX }
    }

    pub fn is_null(&self) -> bool {
        self.hash.is_zero() && self.index == u32::MAX
    }
}

/// A transaction input
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TxIn {
    pub prevout: OutPoint,
    /// Unlocking script
    pub script_sig: Script,
    pub sequence: u32,
}

impl TxIn {
    /// Input with a null prevout carrying an arbitrary script
    pub fn coinbase(script_sig: Script) -> Self {
        Self {
            prevout: OutPoint::null(),
            script_sig,
            sequence: u32::MAX,
        }
    }
}

/// A transaction output
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TxOut {
    /// Amount in base units
    pub value: Amount,
    /// Locking script (empty for an unspendable genesis output)
    pub script_pubkey: Script,
}

/// A complete transaction
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transaction {
    /// Transaction version
    pub version: i32,
    /// Proof-of-stake transaction timestamp
    pub time: u32,
    pub inputs: Vec<TxIn>,
    pub outputs: Vec<TxOut>,
    /// Lock time (block height or timestamp)
    pub lock_time: u32,
}

impl Transaction {
    /// Check if this is a coinbase transaction
    pub fn is_coinbase(&self) -> bool {
        self.inputs.len() == 1 && self.inputs[0].prevout.is_null()
    }

    /// Consensus serialization
    pub fn to_bytes(&self) -> Vec<u8> {
        let mut bytes = Vec::new();

        bytes.extend_from_slice(&self.version.to_le_bytes());
        bytes.extend_from_slice(&self.time.to_le_bytes());

        write_compact_size(&mut bytes, self.inputs.len() as u64);
        for input in &self.inputs {
            bytes.extend_from_slice(input.prevout.hash.as_bytes());
            bytes.extend_from_slice(&input.prevout.index.to_le_bytes());
            write_var_bytes(&mut bytes, input.script_sig.as_bytes());
            bytes.extend_from_slice(&input.sequence.to_le_bytes());
        }

        write_compact_size(&mut bytes, self.outputs.len() as u64);
        for output in &self.outputs {
            bytes.extend_from_slice(&output.value.to_sat().to_le_bytes());
            write_var_bytes(&mut bytes, output.script_pubkey.as_bytes());
        }

        bytes.extend_from_slice(&self.lock_time.to_le_bytes());
        bytes
    }

    /// Transaction id
    pub fn hash(&self) -> Hash {
        double_sha256(&self.to_bytes())
    }

    /// Calculate total output value
    pub fn total_output_value(&self) -> Amount {
        Amount(self.outputs.iter().map(|o| o.value.to_sat()).sum())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn coinbase(value: i64) -> Transaction {
        let mut script = Script::new();
        script.push_slice(b"coinbase").unwrap();
        Transaction {
            version: 1,
            time: 1_600_000_000,
            inputs: vec![TxIn::coinbase(script)],
            outputs: vec![TxOut { value: Amount(value), script_pubkey: Script::new() }],
            lock_time: 0,
        }
    }

    #[test]
    fn test_coinbase_detection() {
        assert!(coinbase(0).is_coinbase());

        let mut regular = coinbase(0);
        regular.inputs[0].prevout.index = 0;
        assert!(!regular.is_coinbase());
    }

    #[test]
    fn test_serialization_layout() {
        let bytes = coinbase(0).to_bytes();
        // version, time, 1 input (32 + 4 + 1 + 9 + 4), 1 output (8 + 1), lock_time
        assert_eq!(bytes.len(), 4 + 4 + 1 + 50 + 1 + 9 + 4);
        assert_eq!(&bytes[0..4], &1i32.to_le_bytes());
        assert_eq!(&bytes[4..8], &1_600_000_000u32.to_le_bytes());
    }

    #[test]
    fn test_hash_depends_on_value() {
        assert_eq!(coinbase(0).hash(), coinbase(0).hash());
        assert_ne!(coinbase(0).hash(), coinbase(1).hash());
    }

    #[test]
    fn test_output_value_calculation() {
        let mut tx = coinbase(100);
        tx.outputs.push(TxOut { value: Amount(200), script_pubkey: Script::new() });
        assert_eq!(tx.total_output_value(), Amount(300));
    }
}
