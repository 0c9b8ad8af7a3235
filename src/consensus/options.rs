//! Consensus size and signature-operation limits

use serde::{Deserialize, Serialize};

use crate::error::ConfigurationError;

/// Numeric policy limits shared by block and mempool validation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConsensusOptions {
    /// Maximum serialized block size excluding witness data
    pub max_block_base_size: u32,
    /// Highest transaction version relayed as standard
    pub max_standard_version: u32,
    pub max_standard_tx_weight: u32,
    pub max_block_sigops_cost: u32,
    pub max_standard_tx_sigops_cost: u32,
    pub witness_scale_factor: u32,
}

impl ConsensusOptions {
    /// Proof-of-stake defaults used by every Amaza network
    pub const fn pos_defaults() -> Self {
        Self {
            max_block_base_size: 1_000_000,
            max_standard_version: 2,
            max_standard_tx_weight: 100_000,
            max_block_sigops_cost: 20_000,
            max_standard_tx_sigops_cost: 20_000 / 5,
            witness_scale_factor: 4,
        }
    }

    /// All limits strictly positive, per-transaction sigops within the block budget
    pub fn validate(&self) -> Result<(), ConfigurationError> {
        let limits = [
            ("max_block_base_size", self.max_block_base_size),
            ("max_standard_version", self.max_standard_version),
            ("max_standard_tx_weight", self.max_standard_tx_weight),
            ("max_block_sigops_cost", self.max_block_sigops_cost),
            ("max_standard_tx_sigops_cost", self.max_standard_tx_sigops_cost),
            ("witness_scale_factor", self.witness_scale_factor),
        ];
        if let Some((name, _)) = limits.into_iter().find(|(_, value)| *value == 0) {
            return Err(ConfigurationError::NonPositiveLimit(name));
        }

        if self.max_standard_tx_sigops_cost > self.max_block_sigops_cost {
            return Err(ConfigurationError::SigOpsBudget {
                tx: self.max_standard_tx_sigops_cost,
                block: self.max_block_sigops_cost,
            });
        }
        Ok(())
    }

    /// Block weight limit implied by the base size and witness discount
    pub fn max_block_weight(&self) -> u64 {
        u64::from(self.max_block_base_size) * u64::from(self.witness_scale_factor)
    }
}

impl Default for ConsensusOptions {
    fn default() -> Self {
        Self::pos_defaults()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        let options = ConsensusOptions::default();
        assert!(options.validate().is_ok());
        assert_eq!(options.max_standard_tx_sigops_cost, 4_000);
        assert_eq!(options.max_block_weight(), 4_000_000);
    }

    #[test]
    fn test_zero_limit_rejected() {
        let options = ConsensusOptions { witness_scale_factor: 0, ..ConsensusOptions::default() };
        assert_eq!(
            options.validate(),
            Err(ConfigurationError::NonPositiveLimit("witness_scale_factor"))
        );
    }

    #[test]
    fn test_tx_sigops_above_block_rejected() {
        let options = ConsensusOptions {
            max_standard_tx_sigops_cost: 30_000,
            ..ConsensusOptions::default()
        };
        assert!(matches!(options.validate(), Err(ConfigurationError::SigOpsBudget { .. })));
    }
}
