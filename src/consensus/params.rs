//! The consensus object a network hands to the rule engine

use serde::Serialize;

use super::{
    Bip9Deployments, BuriedDeployments, ConsensusOptions, ConsensusRuleAssembler,
    ConsensusRuleSet, MempoolRuleAssembler, MempoolRuleSet,
};
use crate::crypto::Hash;
use crate::error::ConfigurationError;
use crate::validation::Amount;

/// Compiled-in consensus constants of a network
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ConsensusConstants {
    pub options: ConsensusOptions,
    /// SLIP-0044 coin type
    pub coin_type: u32,
    pub subsidy_halving_interval: u32,
    pub majority_enforce_block_upgrade: u32,
    pub majority_reject_block_outdated: u32,
    pub majority_window: u32,
    pub buried_deployments: BuriedDeployments,
    pub bip9_deployments: Bip9Deployments,
    pub bip34_hash: Option<Hash>,
    pub miner_confirmation_window: u32,
    pub max_reorg_length: u32,
    pub default_assume_valid: Option<Hash>,
    pub max_money: Amount,
    pub coinbase_maturity: u32,
    pub premine_height: u32,
    pub premine_reward: Amount,
    pub proof_of_work_reward: Amount,
    /// Seconds
    pub pow_target_timespan: u64,
    /// Seconds between blocks
    pub target_spacing: u64,
    pub pow_allow_min_difficulty_blocks: bool,
    pub pos_no_retargeting: bool,
    pub pow_no_retargeting: bool,
    pub pow_limit: Hash,
    pub minimum_chain_work: Option<Hash>,
    pub is_proof_of_stake: bool,
    pub last_pow_block: u32,
    pub proof_of_stake_limit: Hash,
    pub proof_of_stake_limit_v2: Hash,
    pub proof_of_stake_reward: Amount,
    /// Whether PoS blocks may carry an empty coinbase
    pub pos_empty_coinbase: bool,
}

impl ConsensusConstants {
    /// Timing must be non-zero, money supply positive and rewards non-negative
    pub fn validate(&self) -> Result<(), ConfigurationError> {
        if self.target_spacing == 0 {
            return Err(ConfigurationError::NonPositiveLimit("target_spacing"));
        }
        if self.pow_target_timespan == 0 {
            return Err(ConfigurationError::NonPositiveLimit("pow_target_timespan"));
        }
        if self.max_money.to_sat() <= 0 {
            return Err(ConfigurationError::NonPositiveLimit("max_money"));
        }

        let rewards = [
            ("premine_reward", self.premine_reward),
            ("proof_of_work_reward", self.proof_of_work_reward),
            ("proof_of_stake_reward", self.proof_of_stake_reward),
        ];
        match rewards.into_iter().find(|(_, reward)| reward.is_negative()) {
            Some((name, _)) => Err(ConfigurationError::NonPositiveLimit(name)),
            None => Ok(()),
        }
    }

    /// Blocks between difficulty retargets
    pub fn difficulty_adjustment_interval(&self) -> u64 {
        self.pow_target_timespan / self.target_spacing
    }
}

/// Consensus constants plus the genesis hash and both rule pipelines
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Consensus {
    #[serde(flatten)]
    pub constants: ConsensusConstants,
    pub hash_genesis_block: Hash,
    pub consensus_rules: ConsensusRuleSet,
    pub mempool_rules: MempoolRuleSet,
}

impl Consensus {
    /// Fold the genesis hash into the constants and assemble both pipelines
    pub fn new(constants: ConsensusConstants, hash_genesis_block: Hash) -> Self {
        Self {
            constants,
            hash_genesis_block,
            consensus_rules: ConsensusRuleAssembler::assemble(),
            mempool_rules: MempoolRuleAssembler::assemble(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::network::amaza_regtest;

    fn constants() -> ConsensusConstants {
        amaza_regtest().unwrap().consensus().constants.clone()
    }

    #[test]
    fn test_network_constants_valid() {
        let constants = constants();
        assert!(constants.validate().is_ok());
        assert_eq!(constants.difficulty_adjustment_interval(), 480);
    }

    #[test]
    fn test_zero_timing_rejected() {
        let zero_spacing = ConsensusConstants { target_spacing: 0, ..constants() };
        assert_eq!(
            zero_spacing.validate(),
            Err(ConfigurationError::NonPositiveLimit("target_spacing"))
        );

        let zero_timespan = ConsensusConstants { pow_target_timespan: 0, ..constants() };
        assert_eq!(
            zero_timespan.validate(),
            Err(ConfigurationError::NonPositiveLimit("pow_target_timespan"))
        );
    }

    #[test]
    fn test_money_and_rewards_checked() {
        let no_money = ConsensusConstants { max_money: Amount::ZERO, ..constants() };
        assert_eq!(no_money.validate(), Err(ConfigurationError::NonPositiveLimit("max_money")));

        let negative_reward = ConsensusConstants { proof_of_stake_reward: Amount(-1), ..constants() };
        assert_eq!(
            negative_reward.validate(),
            Err(ConfigurationError::NonPositiveLimit("proof_of_stake_reward"))
        );

        let zero_reward = ConsensusConstants { premine_reward: Amount::ZERO, ..constants() };
        assert!(zero_reward.validate().is_ok());
    }
}
