//! Amaza mainnet, testnet and regtest definitions

use super::{
    parse_seed_nodes, Base58Prefixes, Base58Type, Bech32Prefixes, GenesisParams, Network,
    NetworkBuilder, NetworkType,
};
use crate::constants::*;
use crate::consensus::{
    Bip9Deployments, BuriedDeployments, ConsensusConstants, ConsensusOptions,
    DEFAULT_MAINNET_THRESHOLD, DEFAULT_REGTEST_THRESHOLD, DEFAULT_TESTNET_THRESHOLD,
};
use crate::crypto::{Hash, PubKey};
use crate::error::{ChainParamsError, ConfigurationError};
use crate::node::AMAZA_GENESIS_PAYLOAD;
use crate::validation::Amount;

/// Federation members shared by every Amaza network
pub const AMAZA_FEDERATION: [&str; 5] = [
    "020ddcbbd3f0c80d11cc9583ed9a936197f4ac0df40e564e34cd862b5f3e3b18d4",
    "03253d2c9fe2c79c655540dadff7c5d2ddd462b2714294b49757f9fe16112b8bde",
    "03f64315129a415dffb11e0c231cfb4a211456935a823f748948e0e2fdf4e2a88f",
    "0288845744df1b85836c19092599bc151ba4c0ea6e73224d47af0e47bbaa77a98f",
    "032837835af1f28e31c652576b184c49d512a751644755da4e6713976d137e7161",
];

const POW_LIMIT: &str = "00000fffffffffffffffffffffffffffffffffffffffffffffffffffffffffff";
const POS_LIMIT_V2: &str = "000000000000ffffffffffffffffffffffffffffffffffffffffffffffffffff";
const REGTEST_LIMIT: &str = "7fffffffffffffffffffffffffffffffffffffffffffffffffffffffffffffff";

/// Build the parameter set for `network_type`
pub fn network_for(network_type: NetworkType) -> Result<Network, ChainParamsError> {
    match network_type {
        NetworkType::Mainnet => amaza_main(),
        NetworkType::Testnet => amaza_test(),
        NetworkType::Regtest => amaza_regtest(),
    }
}

pub fn amaza_main() -> Result<Network, ChainParamsError> {
    let seeds = parse_seed_nodes(&["207.148.15.3:17105", "45.76.230.173:17105"])?;

    NetworkBuilder::new(NetworkType::Mainnet)
        .name("AmazaMain")
        .magic(0xD9B4BEF9)
        .ports(17105, 17104, 17103, 17102)
        .connections(16, 100)
        .max_tip_age(DEFAULT_MAX_TIP_AGE_SECONDS)
        .max_time_offset_seconds(MAX_TIME_OFFSET_SECONDS)
        .fees(Amount(10_000), Amount(10_000), Amount(10_000))
        .storage(ROOT_FOLDER_NAME, DEFAULT_CONFIG_FILENAME)
        .coin_ticker(COIN_TICKER)
        .default_ban_time_seconds(DEFAULT_BAN_TIME_SECONDS)
        .federation(federation_keys()?)
        .base58_prefixes(base58_prefixes(75, 140))
        .bech32_prefixes(Bech32Prefixes::uniform("amaza"))
        .checkpoints(Vec::new())
        .seed_nodes(seeds)
        .genesis(GenesisParams {
            time: GENESIS_TIME,
            nonce: GENESIS_NONCE,
            bits: GENESIS_BITS,
            version: GENESIS_VERSION,
            reward: Amount::ZERO,
            payload: AMAZA_GENESIS_PAYLOAD,
        })
        .consensus(mainnet_constants()?)
        .build()
}

pub fn amaza_test() -> Result<Network, ChainParamsError> {
    NetworkBuilder::new(NetworkType::Testnet)
        .name("AmazaTest")
        .magic(0x0B11_0907)
        .ports(27105, 27104, 27103, 27102)
        .connections(16, 100)
        .fees(Amount(10_000), Amount(10_000), Amount(10_000))
        .storage(ROOT_FOLDER_NAME, DEFAULT_CONFIG_FILENAME)
        .coin_ticker("TTIMES")
        .federation(federation_keys()?)
        .base58_prefixes(base58_prefixes(127, 196))
        .bech32_prefixes(Bech32Prefixes::uniform("tamaza"))
        .genesis(GenesisParams {
            time: GENESIS_TIME,
            nonce: 2,
            bits: POW_LIMIT_BITS,
            version: GENESIS_VERSION,
            reward: Amount::ZERO,
            payload: AMAZA_GENESIS_PAYLOAD,
        })
        .consensus(ConsensusConstants {
            bip9_deployments: Bip9Deployments::always_active(DEFAULT_TESTNET_THRESHOLD),
            coinbase_maturity: 10,
            max_reorg_length: 500,
            ..mainnet_constants()?
        })
        .build()
}

pub fn amaza_regtest() -> Result<Network, ChainParamsError> {
    NetworkBuilder::new(NetworkType::Regtest)
        .name("AmazaRegTest")
        .magic(0xDAB5_BFFA)
        .ports(37105, 37104, 37103, 37102)
        .connections(16, 100)
        .fees(Amount::ZERO, Amount(10_000), Amount::ZERO)
        .storage(ROOT_FOLDER_NAME, DEFAULT_CONFIG_FILENAME)
        .coin_ticker("TTIMES")
        .federation(federation_keys()?)
        .base58_prefixes(base58_prefixes(111, 196))
        .bech32_prefixes(Bech32Prefixes::uniform("ramaza"))
        .genesis(GenesisParams {
            time: GENESIS_TIME,
            nonce: 3,
            bits: 0x207fffff,
            version: GENESIS_VERSION,
            reward: Amount::ZERO,
            payload: AMAZA_GENESIS_PAYLOAD,
        })
        .consensus(ConsensusConstants {
            bip9_deployments: Bip9Deployments::always_active(DEFAULT_REGTEST_THRESHOLD),
            miner_confirmation_window: 144,
            coinbase_maturity: 5,
            pow_allow_min_difficulty_blocks: true,
            pos_no_retargeting: true,
            pow_no_retargeting: true,
            pow_limit: target(REGTEST_LIMIT)?,
            proof_of_stake_limit: target(REGTEST_LIMIT)?,
            proof_of_stake_limit_v2: target(REGTEST_LIMIT)?,
            ..mainnet_constants()?
        })
        .build()
}

/// Base58 table with the given address versions; the rest is common to all networks
fn base58_prefixes(pubkey: u8, script: u8) -> Base58Prefixes {
    Base58Prefixes::new()
        .with(Base58Type::PubkeyAddress, &[pubkey])
        .with(Base58Type::ScriptAddress, &[script])
        .with(Base58Type::SecretKey, &[pubkey.wrapping_add(128)])
        .with(Base58Type::EncryptedSecretKeyNoEc, &[0x01, 0x42])
        .with(Base58Type::EncryptedSecretKeyEc, &[0x01, 0x43])
        .with(Base58Type::ExtPublicKey, &[0x04, 0x88, 0xB2, 0x1E])
        .with(Base58Type::ExtSecretKey, &[0x04, 0x88, 0xAD, 0xE4])
        .with(Base58Type::PassphraseCode, &[0x2C, 0xE9, 0xB3, 0xE1, 0xFF, 0x39, 0xE2])
        .with(Base58Type::ConfirmationCode, &[0x64, 0x3B, 0xF6, 0xA8, 0x9A])
        .with(Base58Type::StealthAddress, &[0x2a])
        .with(Base58Type::AssetId, &[23])
        .with(Base58Type::ColoredAddress, &[0x13])
}

fn federation_keys() -> Result<Vec<PubKey>, ConfigurationError> {
    AMAZA_FEDERATION
        .iter()
        .map(|key| PubKey::from_hex(key).map_err(ConfigurationError::from))
        .collect()
}

fn target(hex: &str) -> Result<Hash, ConfigurationError> {
    Hash::from_hex(hex).map_err(|e| ConfigurationError::InvalidHash(format!("{hex}: {e}")))
}

/// Mainnet constants, the base the other networks override
fn mainnet_constants() -> Result<ConsensusConstants, ConfigurationError> {
    Ok(ConsensusConstants {
        options: ConsensusOptions::pos_defaults(),
        coin_type: 9001,
        subsidy_halving_interval: 2_500_000,
        majority_enforce_block_upgrade: 750,
        majority_reject_block_outdated: 950,
        majority_window: 1000,
        buried_deployments: BuriedDeployments::from_genesis(),
        bip9_deployments: Bip9Deployments::always_active(DEFAULT_MAINNET_THRESHOLD),
        bip34_hash: None,
        miner_confirmation_window: 1008,
        max_reorg_length: 750,
        default_assume_valid: None,
        max_money: Amount::coins(1_500_000_000),
        coinbase_maturity: 30,
        premine_height: 2,
        premine_reward: Amount::coins(1_000_000_000),
        proof_of_work_reward: Amount::coins(30),
        pow_target_timespan: 4 * 60 * 60,
        target_spacing: 30,
        pow_allow_min_difficulty_blocks: false,
        pos_no_retargeting: false,
        pow_no_retargeting: false,
        pow_limit: target(POW_LIMIT)?,
        minimum_chain_work: None,
        is_proof_of_stake: true,
        last_pow_block: 10_000_000,
        proof_of_stake_limit: target(POW_LIMIT)?,
        proof_of_stake_limit_v2: target(POS_LIMIT_V2)?,
        proof_of_stake_reward: Amount::coins(15),
        pos_empty_coinbase: false,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::network::Bech32Type;

    #[test]
    fn test_mainnet_identity() {
        let network = amaza_main().unwrap();
        assert_eq!(network.name(), "AmazaMain");
        assert_eq!(network.magic(), 0xD9B4BEF9);
        assert_eq!(network.magic_bytes(), [0xF9, 0xBE, 0xB4, 0xD9]);
        assert_eq!(network.default_port(), 17105);
        assert_eq!(network.rpc_port(), 17104);
        assert_eq!(network.api_port(), 17103);
        assert_eq!(network.signalr_port(), 17102);
        assert_eq!(network.coin_ticker(), "TIMES");
        assert_eq!(network.max_time_offset_seconds(), 25 * 60);
        assert_eq!(network.max_tip_age(), 86_400);
        assert_eq!(network.min_relay_tx_fee(), Amount(10_000));
    }

    #[test]
    fn test_mainnet_federation() {
        let network = amaza_main().unwrap();
        assert_eq!(network.federation().len(), 5);
        assert_eq!(network.federation().members()[0].to_hex(), AMAZA_FEDERATION[0]);
    }

    #[test]
    fn test_mainnet_prefixes() {
        let network = amaza_main().unwrap();
        assert_eq!(network.base58_prefix(Base58Type::PubkeyAddress), &[75]);
        assert_eq!(network.base58_prefix(Base58Type::SecretKey), &[75 + 128]);
        assert_eq!(network.bech32_hrp(Bech32Type::WitnessScriptAddress), "amaza");
        let address = network.base58_prefixes().encode(Base58Type::PubkeyAddress, &[0u8; 20]);
        assert!(address.starts_with('X'));
    }

    #[test]
    fn test_mainnet_genesis_inputs() {
        let network = amaza_main().unwrap();
        let header = network.genesis().header();
        assert_eq!(header.time, 1632296362);
        assert_eq!(header.nonce, 1);
        assert_eq!(header.version, 1);
        assert_eq!(header.bits, 0);
        assert_eq!(network.consensus().hash_genesis_block, network.genesis_hash());
    }

    #[test]
    fn test_mainnet_consensus_constants() {
        let network = amaza_main().unwrap();
        let constants = &network.consensus().constants;
        assert_eq!(constants.coin_type, 9001);
        assert_eq!(constants.max_money, Amount::coins(1_500_000_000));
        assert_eq!(constants.proof_of_stake_reward, Amount::coins(15));
        assert_eq!(constants.difficulty_adjustment_interval(), 480);
        assert_eq!(constants.pow_limit.to_hex(), POW_LIMIT);
        assert!(constants.is_proof_of_stake);
    }

    #[test]
    fn test_seed_nodes_use_p2p_port() {
        let network = amaza_main().unwrap();
        assert_eq!(network.seed_nodes().len(), 2);
        assert!(network.seed_nodes().iter().all(|s| s.port() == network.default_port()));
    }

    #[test]
    fn test_networks_are_distinct() {
        let networks: Vec<Network> = NetworkType::ALL
            .into_iter()
            .map(|t| network_for(t).unwrap())
            .collect();
        for (i, a) in networks.iter().enumerate() {
            for b in &networks[i + 1..] {
                assert_ne!(a.magic(), b.magic());
                assert_ne!(a.genesis_hash(), b.genesis_hash());
                assert_ne!(a.default_port(), b.default_port());
            }
        }
    }

    #[test]
    fn test_network_for_matches_type() {
        for network_type in NetworkType::ALL {
            assert_eq!(network_for(network_type).unwrap().network_type(), network_type);
        }
    }
}
