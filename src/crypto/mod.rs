//! Cryptography module - SHA-256d hashing, Merkle roots, federation keys

mod hash;
mod merkle;
mod pubkey;

pub use hash::*;
pub use merkle::*;
pub use pubkey::*;
