//! Monetary amounts in indivisible base units

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::constants::COIN;

/// Signed amount of base units, matching the i64 value field of a TxOut
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
pub struct Amount(pub i64);

impl Amount {
    pub const ZERO: Amount = Amount(0);

    pub const fn from_sat(sat: i64) -> Self {
        Amount(sat)
    }

    /// Whole coins; saturates instead of overflowing
    pub const fn coins(n: i64) -> Self {
        Amount(n.saturating_mul(COIN))
    }

    pub const fn to_sat(self) -> i64 {
        self.0
    }

    pub const fn is_negative(self) -> bool {
        self.0 < 0
    }
}

impl fmt::Display for Amount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        let abs = self.0.unsigned_abs();
        let coin = COIN as u64;
        write!(f, "{}{}.{:08}", sign, abs / coin, abs % coin)
    }
}
