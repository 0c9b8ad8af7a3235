//! Federation public keys
//!
//! Compressed secp256k1 points, checked against the curve when parsed.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Length of a SEC1 compressed point
pub const COMPRESSED_PUBKEY_LEN: usize = 33;

/// Public key errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum KeyError {
    #[error("Invalid hex encoding: {0}")]
    InvalidHex(String),
    #[error("Invalid public key length: expected 33 bytes, got {0}")]
    InvalidLength(usize),
    #[error("Invalid public key: not a compressed secp256k1 point")]
    InvalidPoint,
}

/// 33-byte compressed secp256k1 public key
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PubKey([u8; COMPRESSED_PUBKEY_LEN]);

impl PubKey {
    /// Parse and validate a compressed key
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, KeyError> {
        if bytes.len() != COMPRESSED_PUBKEY_LEN {
            return Err(KeyError::InvalidLength(bytes.len()));
        }
        if bytes[0] != 0x02 && bytes[0] != 0x03 {
            return Err(KeyError::InvalidPoint);
        }
        k256::PublicKey::from_sec1_bytes(bytes).map_err(|_| KeyError::InvalidPoint)?;

        let mut arr = [0u8; COMPRESSED_PUBKEY_LEN];
        arr.copy_from_slice(bytes);
        Ok(PubKey(arr))
    }

    pub fn from_hex(hex: &str) -> Result<Self, KeyError> {
        let bytes = hex::decode(hex).map_err(|e| KeyError::InvalidHex(e.to_string()))?;
        Self::from_bytes(&bytes)
    }

    pub fn to_hex(&self) -> String {
        hex::encode(self.0)
    }

    pub fn as_bytes(&self) -> &[u8; COMPRESSED_PUBKEY_LEN] {
        &self.0
    }
}

impl FromStr for PubKey {
    type Err = KeyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_hex(s)
    }
}

impl fmt::Debug for PubKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "PubKey({})", self.to_hex())
    }
}

impl fmt::Display for PubKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

impl Serialize for PubKey {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_hex())
    }
}

impl<'de> Deserialize<'de> for PubKey {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let text = String::deserialize(deserializer)?;
        PubKey::from_hex(&text).map_err(serde::de::Error::custom)
    }
}
