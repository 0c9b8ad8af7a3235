//! Genesis block generation for Amaza networks
//!
//! The genesis block is a pure function of its inputs. Nothing here reads the
//! clock, the environment or an RNG, so every node derives the same hash.

use serde::Serialize;
use tracing::debug;

use crate::constants::{GENESIS_OPCODE, GENESIS_OPCODE_BYTE};
use crate::consensus::{Block, BlockHeader};
use crate::crypto::Hash;
use crate::error::GenesisConstructionError;
use crate::validation::{Amount, Script, ScriptError, Transaction, TxIn, TxOut};

/// Provenance document pushed into the mainnet coinbase
pub const AMAZA_GENESIS_PAYLOAD: &[u8] = include_bytes!("../../assets/genesis_payload.asc");

/// The first block of a chain together with its hash
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GenesisBlock {
    block: Block,
    hash: Hash,
}

impl GenesisBlock {
    pub fn block(&self) -> &Block {
        &self.block
    }

    pub fn hash(&self) -> Hash {
        self.hash
    }

    pub fn header(&self) -> &BlockHeader {
        &self.block.header
    }

    /// The single coinbase transaction
    pub fn coinbase(&self) -> &Transaction {
        &self.block.transactions[0]
    }

    /// Full block serialization
    pub fn to_bytes(&self) -> Vec<u8> {
        self.block.to_bytes()
    }
}

/// Builds genesis blocks
pub struct GenesisBlockBuilder;

impl GenesisBlockBuilder {
    /// Build a genesis block.
    ///
    /// The coinbase input script is `OP_0`, opcode `0x01` carrying the byte 42,
    /// then a push of `payload`. The single output pays `reward` to an empty
    /// script. The PoS transaction time equals the block time.
    pub fn build(
        timestamp: u32,
        nonce: u32,
        bits: u32,
        version: i32,
        reward: Amount,
        payload: &[u8],
    ) -> Result<GenesisBlock, GenesisConstructionError> {
        if reward.is_negative() {
            return Err(GenesisConstructionError::NegativeReward(reward.to_sat()));
        }

        let script_sig = Self::coinbase_script(payload).map_err(|e| match e {
            ScriptError::TooLarge { size, max } => GenesisConstructionError::PayloadTooLarge {
                payload: payload.len(),
                script_size: size,
                max,
            },
        })?;

        let coinbase = Transaction {
            version: 1,
            time: timestamp,
            inputs: vec![TxIn::coinbase(script_sig)],
            outputs: vec![TxOut {
                value: reward,
                script_pubkey: Script::new(),
            }],
            lock_time: 0,
        };

        let header = BlockHeader::new(version, Hash::zero(), Hash::zero(), timestamp, bits, nonce);
        let mut block = Block::new(header, vec![coinbase]);
        block.update_merkle_root();

        let hash = block.hash();
        debug!(
            merkle_root = %block.header.merkle_root,
            hash = %hash,
            payload_len = payload.len(),
            "genesis block built"
        );

        Ok(GenesisBlock { block, hash })
    }

    fn coinbase_script(payload: &[u8]) -> Result<Script, ScriptError> {
        let mut script = Script::new();
        script
            .push_slice(&[])?
            .push_op_with_data(GENESIS_OPCODE, &[GENESIS_OPCODE_BYTE])?
            .push_slice(payload)?;
        Ok(script)
    }
}

/// Genesis block statistics
#[derive(Debug, Clone, Serialize)]
pub struct GenesisInfo {
    pub hash: Hash,
    pub merkle_root: Hash,
    pub timestamp: u32,
    pub bits: u32,
    pub nonce: u32,
    pub reward: Amount,
    pub size: usize,
}

impl GenesisInfo {
    pub fn new(genesis: &GenesisBlock) -> Self {
        Self {
            hash: genesis.hash(),
            merkle_root: genesis.header().merkle_root,
            timestamp: genesis.header().time,
            bits: genesis.header().bits,
            nonce: genesis.header().nonce,
            reward: genesis.coinbase().total_output_value(),
            size: genesis.to_bytes().len(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::MAX_SCRIPT_SIZE;
    use crate::consensus::HEADER_SIZE;

    fn build(payload: &[u8]) -> GenesisBlock {
        GenesisBlockBuilder::build(1632296362, 1, 0x1e0fffff, 1, Amount::ZERO, payload).unwrap()
    }

    #[test]
    fn test_genesis_is_deterministic() {
        let genesis1 = build(AMAZA_GENESIS_PAYLOAD);
        let genesis2 = build(AMAZA_GENESIS_PAYLOAD);

        assert_eq!(genesis1.to_bytes(), genesis2.to_bytes());
        assert_eq!(genesis1.hash(), genesis2.hash());
    }

    #[test]
    fn test_genesis_shape() {
        let genesis = build(b"payload");
        let coinbase = genesis.coinbase();

        assert_eq!(genesis.block().transactions.len(), 1);
        assert_eq!(coinbase.inputs.len(), 1);
        assert_eq!(coinbase.outputs.len(), 1);
        assert!(coinbase.is_coinbase());
        assert_eq!(coinbase.outputs[0].value, Amount::ZERO);
        assert!(coinbase.outputs[0].script_pubkey.is_empty());
        assert!(genesis.block().is_genesis());
        assert!(genesis.block().signature.is_empty());
    }

    #[test]
    fn test_genesis_bytes_layout() {
        let genesis = build(b"payload");
        let bytes = genesis.to_bytes();
        let coinbase = genesis.coinbase().to_bytes();

        assert_eq!(bytes.len(), HEADER_SIZE + 1 + coinbase.len() + 1);
        assert_eq!(&bytes[..HEADER_SIZE], genesis.header().to_bytes().as_slice());
        assert_eq!(bytes[HEADER_SIZE], 1);
        assert_eq!(&bytes[HEADER_SIZE + 1..bytes.len() - 1], coinbase.as_slice());
        assert_eq!(bytes.last(), Some(&0x00));
    }

    #[test]
    fn test_coinbase_script_layout() {
        let genesis = build(b"abc");
        let script = genesis.coinbase().inputs[0].script_sig.as_bytes();
        assert_eq!(script, &[0x00, 0x01, 42, 0x03, b'a', b'b', b'c']);
    }

    #[test]
    fn test_large_payload_uses_pushdata2() {
        let genesis = build(AMAZA_GENESIS_PAYLOAD);
        let script = genesis.coinbase().inputs[0].script_sig.as_bytes();
        let len = AMAZA_GENESIS_PAYLOAD.len() as u16;

        assert_eq!(&script[..3], &[0x00, 0x01, 42]);
        assert_eq!(script[3], 0x4d);
        assert_eq!(&script[4..6], &len.to_le_bytes());
        assert_eq!(&script[6..], AMAZA_GENESIS_PAYLOAD);
    }

    #[test]
    fn test_merkle_root_is_coinbase_hash() {
        let genesis = build(b"payload");
        assert_eq!(genesis.header().merkle_root, genesis.coinbase().hash());
        assert_eq!(genesis.header().prev_hash, Hash::zero());
    }

    #[test]
    fn test_reward_is_paid() {
        let genesis =
            GenesisBlockBuilder::build(1, 0, 0x1e0fffff, 1, Amount::coins(50), b"x").unwrap();
        assert_eq!(genesis.coinbase().outputs[0].value, Amount::coins(50));
    }

    #[test]
    fn test_inputs_change_hash() {
        let base = build(b"payload");
        let other_payload = build(b"payload!");
        let other_nonce =
            GenesisBlockBuilder::build(1632296362, 2, 0x1e0fffff, 1, Amount::ZERO, b"payload")
                .unwrap();

        assert_ne!(base.hash(), other_payload.hash());
        assert_ne!(base.hash(), other_nonce.hash());
        // nonce is header-only
        assert_eq!(base.header().merkle_root, other_nonce.header().merkle_root);
    }

    #[test]
    fn test_negative_reward_rejected() {
        let err = GenesisBlockBuilder::build(1, 0, 0x1e0fffff, 1, Amount(-1), b"x").unwrap_err();
        assert_eq!(err, GenesisConstructionError::NegativeReward(-1));
    }

    #[test]
    fn test_oversized_payload_rejected() {
        let payload = vec![0u8; MAX_SCRIPT_SIZE];
        let err = GenesisBlockBuilder::build(1, 0, 0x1e0fffff, 1, Amount::ZERO, &payload)
            .unwrap_err();
        assert!(matches!(err, GenesisConstructionError::PayloadTooLarge { .. }));
    }

    #[test]
    fn test_oversized_script_reports_payload_length() {
        // under the limit alone, over it once the push header and genesis opcode are added
        let payload = vec![0u8; MAX_SCRIPT_SIZE - 5];
        let err = GenesisBlockBuilder::build(1, 0, 0x1e0fffff, 1, Amount::ZERO, &payload)
            .unwrap_err();
        assert_eq!(
            err,
            GenesisConstructionError::PayloadTooLarge {
                payload: MAX_SCRIPT_SIZE - 5,
                script_size: MAX_SCRIPT_SIZE + 1,
                max: MAX_SCRIPT_SIZE,
            }
        );
    }

    #[test]
    fn test_genesis_info() {
        let genesis = build(AMAZA_GENESIS_PAYLOAD);
        let info = GenesisInfo::new(&genesis);
        assert_eq!(info.hash, genesis.hash());
        assert_eq!(info.timestamp, 1632296362);
        assert_eq!(info.reward, Amount::ZERO);
        assert_eq!(info.size, genesis.to_bytes().len());
    }
}
