//! Chain parameter set
//!
//! [`NetworkBuilder`] collects compiled-in constants, validates them, builds
//! the genesis block and assembles the rule pipelines. The resulting
//! [`Network`] is immutable and can be shared across threads without locking.

use serde::Serialize;
use std::fmt;
use std::str::FromStr;
use tracing::{debug, info};

use super::{
    Base58Prefixes, Base58Type, Bech32Prefixes, Bech32Type, Checkpoint, Checkpoints, DnsSeed,
    Federation, SeedNode,
};
use crate::consensus::{Consensus, ConsensusConstants};
use crate::crypto::{Hash, PubKey};
use crate::error::{ChainParamsError, ConfigurationError};
use crate::node::{GenesisBlock, GenesisBlockBuilder};
use crate::validation::Amount;

/// Network class
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum NetworkType {
    Mainnet,
    Testnet,
    Regtest,
}

impl NetworkType {
    pub const ALL: [NetworkType; 3] = [NetworkType::Mainnet, NetworkType::Testnet, NetworkType::Regtest];
}

impl fmt::Display for NetworkType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            NetworkType::Mainnet => "main",
            NetworkType::Testnet => "test",
            NetworkType::Regtest => "regtest",
        };
        f.write_str(name)
    }
}

impl FromStr for NetworkType {
    type Err = ConfigurationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "main" | "mainnet" => Ok(NetworkType::Mainnet),
            "test" | "testnet" => Ok(NetworkType::Testnet),
            "regtest" => Ok(NetworkType::Regtest),
            _ => Err(ConfigurationError::UnknownNetwork(s.to_string())),
        }
    }
}

/// Inputs to [`GenesisBlockBuilder::build`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenesisParams {
    pub time: u32,
    pub nonce: u32,
    pub bits: u32,
    pub version: i32,
    pub reward: Amount,
    pub payload: &'static [u8],
}

/// Immutable parameter set identifying one network
#[derive(Debug, Clone, Serialize)]
pub struct Network {
    name: String,
    network_type: NetworkType,
    magic: u32,
    default_port: u16,
    rpc_port: u16,
    api_port: u16,
    signalr_port: u16,
    max_outbound_connections: u32,
    max_inbound_connections: u32,
    max_tip_age: u32,
    max_time_offset_seconds: u32,
    min_tx_fee: Amount,
    fallback_fee: Amount,
    min_relay_tx_fee: Amount,
    root_folder_name: String,
    default_config_filename: String,
    coin_ticker: String,
    default_ban_time_seconds: u32,
    base58_prefixes: Base58Prefixes,
    bech32_prefixes: Bech32Prefixes,
    checkpoints: Checkpoints,
    federation: Federation,
    dns_seeds: Vec<DnsSeed>,
    seed_nodes: Vec<SeedNode>,
    genesis: GenesisBlock,
    consensus: Consensus,
}

impl Network {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn network_type(&self) -> NetworkType {
        self.network_type
    }

    pub fn magic(&self) -> u32 {
        self.magic
    }

    /// Magic as it appears on the wire
    pub fn magic_bytes(&self) -> [u8; 4] {
        self.magic.to_le_bytes()
    }

    /// P2P port
    pub fn default_port(&self) -> u16 {
        self.default_port
    }

    pub fn rpc_port(&self) -> u16 {
        self.rpc_port
    }

    pub fn api_port(&self) -> u16 {
        self.api_port
    }

    /// Auxiliary (SignalR) port
    pub fn signalr_port(&self) -> u16 {
        self.signalr_port
    }

    pub fn max_outbound_connections(&self) -> u32 {
        self.max_outbound_connections
    }

    pub fn max_inbound_connections(&self) -> u32 {
        self.max_inbound_connections
    }

    /// Seconds; an older tip means the node is still in initial block download
    pub fn max_tip_age(&self) -> u32 {
        self.max_tip_age
    }

    pub fn max_time_offset_seconds(&self) -> u32 {
        self.max_time_offset_seconds
    }

    pub fn min_tx_fee(&self) -> Amount {
        self.min_tx_fee
    }

    pub fn fallback_fee(&self) -> Amount {
        self.fallback_fee
    }

    pub fn min_relay_tx_fee(&self) -> Amount {
        self.min_relay_tx_fee
    }

    pub fn root_folder_name(&self) -> &str {
        &self.root_folder_name
    }

    pub fn default_config_filename(&self) -> &str {
        &self.default_config_filename
    }

    pub fn coin_ticker(&self) -> &str {
        &self.coin_ticker
    }

    pub fn default_ban_time_seconds(&self) -> u32 {
        self.default_ban_time_seconds
    }

    pub fn base58_prefixes(&self) -> &Base58Prefixes {
        &self.base58_prefixes
    }

    pub fn base58_prefix(&self, kind: Base58Type) -> &[u8] {
        self.base58_prefixes.get(kind)
    }

    pub fn bech32_prefixes(&self) -> &Bech32Prefixes {
        &self.bech32_prefixes
    }

    pub fn bech32_hrp(&self, kind: Bech32Type) -> &str {
        self.bech32_prefixes.get(kind)
    }

    pub fn checkpoints(&self) -> &Checkpoints {
        &self.checkpoints
    }

    pub fn federation(&self) -> &Federation {
        &self.federation
    }

    pub fn dns_seeds(&self) -> &[DnsSeed] {
        &self.dns_seeds
    }

    pub fn seed_nodes(&self) -> &[SeedNode] {
        &self.seed_nodes
    }

    pub fn genesis(&self) -> &GenesisBlock {
        &self.genesis
    }

    pub fn genesis_hash(&self) -> Hash {
        self.genesis.hash()
    }

    pub fn consensus(&self) -> &Consensus {
        &self.consensus
    }
}

/// Collects and validates the parameters of a [`Network`]
#[derive(Debug, Clone)]
pub struct NetworkBuilder {
    name: Option<String>,
    network_type: NetworkType,
    magic: u32,
    default_port: u16,
    rpc_port: u16,
    api_port: u16,
    signalr_port: u16,
    max_outbound_connections: u32,
    max_inbound_connections: u32,
    max_tip_age: u32,
    max_time_offset_seconds: u32,
    min_tx_fee: Amount,
    fallback_fee: Amount,
    min_relay_tx_fee: Amount,
    root_folder_name: String,
    default_config_filename: String,
    coin_ticker: String,
    default_ban_time_seconds: u32,
    base58_prefixes: Base58Prefixes,
    bech32_prefixes: Option<Bech32Prefixes>,
    checkpoints: Vec<Checkpoint>,
    federation: Vec<PubKey>,
    dns_seeds: Vec<DnsSeed>,
    seed_nodes: Vec<SeedNode>,
    genesis: Option<GenesisParams>,
    consensus: Option<ConsensusConstants>,
}

impl NetworkBuilder {
    pub fn new(network_type: NetworkType) -> Self {
        Self {
            name: None,
            network_type,
            magic: 0,
            default_port: 0,
            rpc_port: 0,
            api_port: 0,
            signalr_port: 0,
            max_outbound_connections: 16,
            max_inbound_connections: 100,
            max_tip_age: crate::constants::DEFAULT_MAX_TIP_AGE_SECONDS,
            max_time_offset_seconds: crate::constants::MAX_TIME_OFFSET_SECONDS,
            min_tx_fee: Amount::ZERO,
            fallback_fee: Amount::ZERO,
            min_relay_tx_fee: Amount::ZERO,
            root_folder_name: String::new(),
            default_config_filename: String::new(),
            coin_ticker: String::new(),
            default_ban_time_seconds: crate::constants::DEFAULT_BAN_TIME_SECONDS,
            base58_prefixes: Base58Prefixes::new(),
            bech32_prefixes: None,
            checkpoints: Vec::new(),
            federation: Vec::new(),
            dns_seeds: Vec::new(),
            seed_nodes: Vec::new(),
            genesis: None,
            consensus: None,
        }
    }

    pub fn name(mut self, name: &str) -> Self {
        self.name = Some(name.to_string());
        self
    }

    pub fn magic(mut self, magic: u32) -> Self {
        self.magic = magic;
        self
    }

    /// P2P, RPC, API and SignalR ports
    pub fn ports(mut self, p2p: u16, rpc: u16, api: u16, signalr: u16) -> Self {
        self.default_port = p2p;
        self.rpc_port = rpc;
        self.api_port = api;
        self.signalr_port = signalr;
        self
    }

    pub fn connections(mut self, max_outbound: u32, max_inbound: u32) -> Self {
        self.max_outbound_connections = max_outbound;
        self.max_inbound_connections = max_inbound;
        self
    }

    pub fn max_tip_age(mut self, seconds: u32) -> Self {
        self.max_tip_age = seconds;
        self
    }

    pub fn max_time_offset_seconds(mut self, seconds: u32) -> Self {
        self.max_time_offset_seconds = seconds;
        self
    }

    pub fn fees(mut self, min_tx_fee: Amount, fallback_fee: Amount, min_relay_tx_fee: Amount) -> Self {
        self.min_tx_fee = min_tx_fee;
        self.fallback_fee = fallback_fee;
        self.min_relay_tx_fee = min_relay_tx_fee;
        self
    }

    pub fn storage(mut self, root_folder_name: &str, default_config_filename: &str) -> Self {
        self.root_folder_name = root_folder_name.to_string();
        self.default_config_filename = default_config_filename.to_string();
        self
    }

    pub fn coin_ticker(mut self, ticker: &str) -> Self {
        self.coin_ticker = ticker.to_string();
        self
    }

    pub fn default_ban_time_seconds(mut self, seconds: u32) -> Self {
        self.default_ban_time_seconds = seconds;
        self
    }

    pub fn base58_prefixes(mut self, prefixes: Base58Prefixes) -> Self {
        self.base58_prefixes = prefixes;
        self
    }

    pub fn bech32_prefixes(mut self, prefixes: Bech32Prefixes) -> Self {
        self.bech32_prefixes = Some(prefixes);
        self
    }

    pub fn checkpoints(mut self, checkpoints: Vec<Checkpoint>) -> Self {
        self.checkpoints = checkpoints;
        self
    }

    pub fn federation(mut self, members: Vec<PubKey>) -> Self {
        self.federation = members;
        self
    }

    pub fn dns_seeds(mut self, seeds: Vec<DnsSeed>) -> Self {
        self.dns_seeds = seeds;
        self
    }

    pub fn seed_nodes(mut self, seeds: Vec<SeedNode>) -> Self {
        self.seed_nodes = seeds;
        self
    }

    pub fn genesis(mut self, genesis: GenesisParams) -> Self {
        self.genesis = Some(genesis);
        self
    }

    pub fn consensus(mut self, constants: ConsensusConstants) -> Self {
        self.consensus = Some(constants);
        self
    }

    /// Validate, build the genesis block and freeze the parameter set
    pub fn build(self) -> Result<Network, ChainParamsError> {
        let name = self.name.clone().ok_or(ConfigurationError::MissingField("name"))?;
        let genesis_params = self.genesis.clone().ok_or(ConfigurationError::MissingField("genesis"))?;
        let constants = self.consensus.clone().ok_or(ConfigurationError::MissingField("consensus"))?;
        let bech32_prefixes = self
            .bech32_prefixes
            .clone()
            .ok_or(ConfigurationError::MissingField("bech32_prefixes"))?;

        if self.magic == 0 {
            return Err(ConfigurationError::ZeroMagic.into());
        }
        self.validate_ports()?;
        self.validate_fees()?;
        self.base58_prefixes.validate()?;
        bech32_prefixes.validate()?;
        constants.options.validate()?;
        constants.validate()?;

        let federation = Federation::new(self.federation)?;
        let checkpoints = Checkpoints::new(self.checkpoints)?;
        debug!(network = %name, federation = federation.len(), checkpoints = checkpoints.entries().len(), "parameters validated");

        let genesis = GenesisBlockBuilder::build(
            genesis_params.time,
            genesis_params.nonce,
            genesis_params.bits,
            genesis_params.version,
            genesis_params.reward,
            genesis_params.payload,
        )?;
        let consensus = Consensus::new(constants, genesis.hash());

        info!(
            network = %name,
            magic = %format!("{:#010x}", self.magic),
            genesis = %genesis.hash(),
            "network parameters frozen"
        );

        Ok(Network {
            name,
            network_type: self.network_type,
            magic: self.magic,
            default_port: self.default_port,
            rpc_port: self.rpc_port,
            api_port: self.api_port,
            signalr_port: self.signalr_port,
            max_outbound_connections: self.max_outbound_connections,
            max_inbound_connections: self.max_inbound_connections,
            max_tip_age: self.max_tip_age,
            max_time_offset_seconds: self.max_time_offset_seconds,
            min_tx_fee: self.min_tx_fee,
            fallback_fee: self.fallback_fee,
            min_relay_tx_fee: self.min_relay_tx_fee,
            root_folder_name: self.root_folder_name,
            default_config_filename: self.default_config_filename,
            coin_ticker: self.coin_ticker,
            default_ban_time_seconds: self.default_ban_time_seconds,
            base58_prefixes: self.base58_prefixes,
            bech32_prefixes,
            checkpoints,
            federation,
            dns_seeds: self.dns_seeds,
            seed_nodes: self.seed_nodes,
            genesis,
            consensus,
        })
    }

    fn validate_ports(&self) -> Result<(), ConfigurationError> {
        let ports = [
            ("p2p", self.default_port),
            ("rpc", self.rpc_port),
            ("api", self.api_port),
            ("signalr", self.signalr_port),
        ];
        for (i, &(first, port)) in ports.iter().enumerate() {
            if port == 0 {
                return Err(ConfigurationError::MissingField(first));
            }
            if let Some(&(second, _)) = ports[i + 1..].iter().find(|(_, other)| *other == port) {
                return Err(ConfigurationError::DuplicatePort { first, second, port });
            }
        }
        Ok(())
    }

    fn validate_fees(&self) -> Result<(), ConfigurationError> {
        let fees = [
            ("min_tx_fee", self.min_tx_fee),
            ("fallback_fee", self.fallback_fee),
            ("min_relay_tx_fee", self.min_relay_tx_fee),
        ];
        match fees.into_iter().find(|(_, fee)| fee.is_negative()) {
            Some((name, fee)) => Err(ConfigurationError::NegativeFee { name, amount: fee.to_sat() }),
            None => Ok(()),
        }
    }
}
