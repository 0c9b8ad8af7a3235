//! Error types for network construction
//!
//! Every error here is fatal at startup. None of them is retried.

use thiserror::Error;

use crate::crypto::KeyError;

/// Inconsistent or missing network parameter
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigurationError {
    #[error("Missing parameter: {0}")]
    MissingField(&'static str),
    #[error("Network magic must be non-zero")]
    ZeroMagic,
    #[error("Port {port} is used for both {first} and {second}")]
    DuplicatePort {
        first: &'static str,
        second: &'static str,
        port: u16,
    },
    #[error("Fee {name} is negative: {amount}")]
    NegativeFee { name: &'static str, amount: i64 },
    #[error("Missing base58 prefix for {0}")]
    MissingBase58Prefix(&'static str),
    #[error("Invalid bech32 human-readable prefix: {0:?}")]
    InvalidBech32Prefix(String),
    #[error("Federation must contain at least one public key")]
    EmptyFederation,
    #[error("Duplicate federation key: {0}")]
    DuplicateFederationKey(String),
    #[error("Malformed public key: {0}")]
    InvalidPublicKey(#[from] KeyError),
    #[error("Checkpoint heights must be strictly increasing: {height} follows {previous}")]
    NonIncreasingCheckpoint { previous: u32, height: u32 },
    #[error("Consensus parameter {0} is out of range")]
    NonPositiveLimit(&'static str),
    #[error("Per-transaction sigop cost {tx} exceeds per-block cost {block}")]
    SigOpsBudget { tx: u32, block: u32 },
    #[error("Invalid seed node address: {0}")]
    InvalidSeedNode(String),
    #[error("Invalid 256-bit hash: {0}")]
    InvalidHash(String),
    #[error("Unknown network: {0}")]
    UnknownNetwork(String),
}

/// The genesis block could not be built from its inputs
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GenesisConstructionError {
    #[error("Genesis payload of {payload} bytes gives a {script_size}-byte coinbase script, over the limit of {max}")]
    PayloadTooLarge {
        payload: usize,
        script_size: usize,
        max: usize,
    },
    #[error("Genesis reward is negative: {0}")]
    NegativeReward(i64),
}

/// A rule list that breaks its declared execution order
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RuleOrderingViolation {
    #[error("Stage {stage} registered after {after}")]
    StageOutOfOrder { stage: String, after: String },
    #[error("Rule {rule} belongs to stage {expected} but was registered in {found}")]
    WrongStage {
        rule: String,
        expected: String,
        found: String,
    },
    #[error("Rule {0} registered more than once")]
    Duplicate(String),
    #[error("Rule {0} is missing")]
    MissingRule(String),
    #[error("Rule {before} must run before {after}")]
    OutOfOrder { before: String, after: String },
}

/// Any failure while building a network
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ChainParamsError {
    #[error("Configuration error: {0}")]
    Configuration(#[from] ConfigurationError),
    #[error("Genesis construction error: {0}")]
    Genesis(#[from] GenesisConstructionError),
}
