//! Known-good (height, hash) pairs

use serde::Serialize;

use crate::crypto::Hash;
use crate::error::ConfigurationError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Checkpoint {
    pub height: u32,
    pub hash: Hash,
    /// Stake modifier at this height, when the network pins one
    pub stake_modifier_v2: Option<Hash>,
}

impl Checkpoint {
    pub fn new(height: u32, hash: Hash) -> Self {
        Self { height, hash, stake_modifier_v2: None }
    }
}

/// Checkpoints ordered by strictly increasing height
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Checkpoints {
    entries: Vec<Checkpoint>,
}

impl Checkpoints {
    pub fn new(entries: Vec<Checkpoint>) -> Result<Self, ConfigurationError> {
        for pair in entries.windows(2) {
            if pair[1].height <= pair[0].height {
                return Err(ConfigurationError::NonIncreasingCheckpoint {
                    previous: pair[0].height,
                    height: pair[1].height,
                });
            }
        }
        Ok(Self { entries })
    }

    pub fn entries(&self) -> &[Checkpoint] {
        &self.entries
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get(&self, height: u32) -> Option<&Checkpoint> {
        self.entries
            .binary_search_by_key(&height, |c| c.height)
            .ok()
            .map(|i| &self.entries[i])
    }

    /// Height of the last checkpoint; alternate histories below it are pruned
    pub fn last_height(&self) -> Option<u32> {
        self.entries.last().map(|c| c.height)
    }

    /// False only when a checkpoint exists at `height` with a different hash
    pub fn check(&self, height: u32, hash: &Hash) -> bool {
        self.get(height).map_or(true, |c| c.hash == *hash)
    }
}
