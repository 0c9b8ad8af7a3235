//! Federation of keys authorized for federated operations

use serde::Serialize;

use crate::crypto::PubKey;
use crate::error::ConfigurationError;

/// Ordered, non-empty set of distinct public keys
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Federation {
    members: Vec<PubKey>,
}

impl Federation {
    pub fn new(members: Vec<PubKey>) -> Result<Self, ConfigurationError> {
        if members.is_empty() {
            return Err(ConfigurationError::EmptyFederation);
        }
        for (i, key) in members.iter().enumerate() {
            if members[..i].contains(key) {
                return Err(ConfigurationError::DuplicateFederationKey(key.to_hex()));
            }
        }
        Ok(Self { members })
    }

    /// Parse hex-encoded compressed keys, then validate as [`Federation::new`]
    pub fn from_hex(keys: &[&str]) -> Result<Self, ConfigurationError> {
        let members = keys
            .iter()
            .map(|key| PubKey::from_hex(key))
            .collect::<Result<Vec<_>, _>>()?;
        Self::new(members)
    }

    pub fn members(&self) -> &[PubKey] {
        &self.members
    }

    pub fn len(&self) -> usize {
        self.members.len()
    }

    /// Never true for a constructed federation
    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    pub fn contains(&self, key: &PubKey) -> bool {
        self.members.contains(key)
    }

    /// Default multisig quorum: half the members, rounded up
    pub fn signatures_required(&self) -> usize {
        (self.members.len() + 1) / 2
    }
}
