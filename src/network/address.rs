//! Address encoding prefix tables
//!
//! One base58 version prefix per [`Base58Type`] and one bech32
//! human-readable part per [`Bech32Type`].

use serde::Serialize;

use crate::crypto::double_sha256;
use crate::error::ConfigurationError;

/// Kinds of base58-encoded data a network assigns a prefix to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Base58Type {
    PubkeyAddress,
    ScriptAddress,
    SecretKey,
    ExtPublicKey,
    ExtSecretKey,
    EncryptedSecretKeyEc,
    EncryptedSecretKeyNoEc,
    PassphraseCode,
    ConfirmationCode,
    StealthAddress,
    AssetId,
    ColoredAddress,
}

impl Base58Type {
    pub const COUNT: usize = 12;

    pub const ALL: [Base58Type; Base58Type::COUNT] = [
        Base58Type::PubkeyAddress,
        Base58Type::ScriptAddress,
        Base58Type::SecretKey,
        Base58Type::ExtPublicKey,
        Base58Type::ExtSecretKey,
        Base58Type::EncryptedSecretKeyEc,
        Base58Type::EncryptedSecretKeyNoEc,
        Base58Type::PassphraseCode,
        Base58Type::ConfirmationCode,
        Base58Type::StealthAddress,
        Base58Type::AssetId,
        Base58Type::ColoredAddress,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Base58Type::PubkeyAddress => "PUBKEY_ADDRESS",
            Base58Type::ScriptAddress => "SCRIPT_ADDRESS",
            Base58Type::SecretKey => "SECRET_KEY",
            Base58Type::ExtPublicKey => "EXT_PUBLIC_KEY",
            Base58Type::ExtSecretKey => "EXT_SECRET_KEY",
            Base58Type::EncryptedSecretKeyEc => "ENCRYPTED_SECRET_KEY_EC",
            Base58Type::EncryptedSecretKeyNoEc => "ENCRYPTED_SECRET_KEY_NO_EC",
            Base58Type::PassphraseCode => "PASSPHRASE_CODE",
            Base58Type::ConfirmationCode => "CONFIRMATION_CODE",
            Base58Type::StealthAddress => "STEALTH_ADDRESS",
            Base58Type::AssetId => "ASSET_ID",
            Base58Type::ColoredAddress => "COLORED_ADDRESS",
        }
    }
}

/// Base58 version prefix per [`Base58Type`]
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Base58Prefixes {
    prefixes: [Vec<u8>; Base58Type::COUNT],
}

impl Base58Prefixes {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, kind: Base58Type, prefix: &[u8]) -> Self {
        self.prefixes[kind as usize] = prefix.to_vec();
        self
    }

    /// Prefix for `kind`; empty if never set
    pub fn get(&self, kind: Base58Type) -> &[u8] {
        &self.prefixes[kind as usize]
    }

    /// Every kind must have a non-empty prefix
    pub fn validate(&self) -> Result<(), ConfigurationError> {
        match Base58Type::ALL.into_iter().find(|kind| self.get(*kind).is_empty()) {
            Some(kind) => Err(ConfigurationError::MissingBase58Prefix(kind.name())),
            None => Ok(()),
        }
    }

    /// Base58Check encoding of `payload` under the prefix for `kind`
    pub fn encode(&self, kind: Base58Type, payload: &[u8]) -> String {
        encode_base58check(self.get(kind), payload)
    }
}

/// Base58Check: prefix, payload, first four bytes of SHA-256d
pub fn encode_base58check(prefix: &[u8], payload: &[u8]) -> String {
    let mut data = Vec::with_capacity(prefix.len() + payload.len() + 4);
    data.extend_from_slice(prefix);
    data.extend_from_slice(payload);
    let checksum = double_sha256(&data);
    data.extend_from_slice(&checksum.0[0..4]);
    bs58::encode(data).into_string()
}

/// Segwit address kinds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Bech32Type {
    WitnessPubkeyAddress,
    WitnessScriptAddress,
}

impl Bech32Type {
    pub const ALL: [Bech32Type; 2] =
        [Bech32Type::WitnessPubkeyAddress, Bech32Type::WitnessScriptAddress];
}

/// Longest human-readable part allowed by BIP173
const MAX_HRP_LEN: usize = 83;

/// Bech32 human-readable part per [`Bech32Type`]
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Bech32Prefixes {
    hrps: [String; 2],
}

impl Bech32Prefixes {
    /// Same human-readable part for both witness kinds
    pub fn uniform(hrp: &str) -> Self {
        Self { hrps: [hrp.to_string(), hrp.to_string()] }
    }

    pub fn get(&self, kind: Bech32Type) -> &str {
        &self.hrps[kind as usize]
    }

    /// BIP173: 1 to 83 printable ASCII characters, lowercase only
    pub fn validate(&self) -> Result<(), ConfigurationError> {
        for hrp in &self.hrps {
            let valid = !hrp.is_empty()
                && hrp.len() <= MAX_HRP_LEN
                && hrp.bytes().all(|b| (33..=126).contains(&b) && !b.is_ascii_uppercase());
            if !valid {
                return Err(ConfigurationError::InvalidBech32Prefix(hrp.clone()));
            }
        }
        Ok(())
    }
}
