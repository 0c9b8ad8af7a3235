//! Transaction primitives - amounts, scripts, coinbase transactions and their encoding

mod amount;
mod encode;
mod script;
mod transaction;

pub use amount::*;
pub use encode::*;
pub use script::*;
pub use transaction::*;
