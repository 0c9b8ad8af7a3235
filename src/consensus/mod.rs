//! Consensus module - Blocks, limits, deployments and rule pipelines

mod block;
mod deployments;
mod mempool;
mod options;
mod ordering;
mod params;
mod rules;

pub use block::*;
pub use deployments::*;
pub use mempool::*;
pub use options::*;
pub use ordering::*;
pub use params::*;
pub use rules::*;
