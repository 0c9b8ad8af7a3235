//! Network module - Chain parameter sets and the Amaza network definitions

mod address;
mod checkpoints;
mod federation;
mod networks;
mod params;
mod seeds;

pub use address::*;
pub use checkpoints::*;
pub use federation::*;
pub use networks::*;
pub use params::*;
pub use seeds::*;
