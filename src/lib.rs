//! Amaza (TIMES) Network Parameters
//!
//! Builds the immutable parameter set of an Amaza proof-of-stake network:
//! identity and policy constants, the deterministic genesis block, and the
//! ordered consensus and mempool rule pipelines handed to a node's rule engine.

pub mod consensus;
pub mod crypto;
pub mod error;
pub mod network;
pub mod node;
pub mod validation;

pub use error::{ChainParamsError, ConfigurationError, GenesisConstructionError, RuleOrderingViolation};
pub use network::{network_for, Network, NetworkType};

/// Protocol constants - HARD-CODED, NEVER CONFIGURABLE
pub mod constants {
    /// Base units per coin (8 decimal places)
    pub const COIN: i64 = 100_000_000;

    pub const CENT: i64 = 1_000_000;

    /// Mainnet genesis timestamp (Unix timestamp)
    pub const GENESIS_TIME: u32 = 1632296362; // 2021-09-22

    pub const GENESIS_NONCE: u32 = 1;

    /// Mainnet genesis difficulty bits; the mainnet genesis header carries zero
    pub const GENESIS_BITS: u32 = 0;

    /// Compact form of the proof-of-work limit
    pub const POW_LIMIT_BITS: u32 = 0x1e0fffff;

    pub const GENESIS_VERSION: i32 = 1;

    /// Opcode placed between the empty push and the payload in the genesis coinbase
    pub const GENESIS_OPCODE: u8 = 0x01;

    /// Literal byte carried by [`GENESIS_OPCODE`]
    pub const GENESIS_OPCODE_BYTE: u8 = 42;

    /// Largest script a push may grow to
    pub const MAX_SCRIPT_SIZE: usize = 10_000;

    /// Clock offset beyond which time syncing is switched off
    pub const MAX_TIME_OFFSET_SECONDS: u32 = 25 * 60;

    pub const DEFAULT_MAX_TIP_AGE_SECONDS: u32 = 24 * 60 * 60;

    pub const DEFAULT_BAN_TIME_SECONDS: u32 = 24 * 60 * 60;

    /// Data directory name
    pub const ROOT_FOLDER_NAME: &str = "amaza";

    pub const DEFAULT_CONFIG_FILENAME: &str = "amaza.conf";

    pub const COIN_TICKER: &str = "TIMES";
}
