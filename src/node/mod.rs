//! Node bootstrap artifacts - the genesis block

mod genesis;

pub use genesis::*;
