//! Soft-fork deployment tables
//!
//! Buried deployments activate at a fixed height. BIP9 deployments are
//! signalled by version bits within a time window.

use serde::Serialize;

/// Deployments whose activation height is hard-coded
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub enum BuriedDeployment {
    Bip34,
    Bip65,
    Bip66,
}

impl BuriedDeployment {
    pub const ALL: [BuriedDeployment; 3] =
        [BuriedDeployment::Bip34, BuriedDeployment::Bip65, BuriedDeployment::Bip66];
}

/// Activation height per buried deployment
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct BuriedDeployments {
    heights: [u32; 3],
}

impl BuriedDeployments {
    pub const fn new(bip34: u32, bip65: u32, bip66: u32) -> Self {
        Self { heights: [bip34, bip65, bip66] }
    }

    /// All buried deployments active from the first block
    pub const fn from_genesis() -> Self {
        Self::new(0, 0, 0)
    }

    pub fn height(&self, deployment: BuriedDeployment) -> u32 {
        self.heights[deployment as usize]
    }

    pub fn is_active(&self, deployment: BuriedDeployment, height: u32) -> bool {
        height >= self.height(deployment)
    }
}

/// Version-bits deployments known to Amaza networks
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub enum Bip9Deployment {
    Csv,
    Segwit,
    ColdStaking,
}

impl Bip9Deployment {
    pub const ALL: [Bip9Deployment; 3] =
        [Bip9Deployment::Csv, Bip9Deployment::Segwit, Bip9Deployment::ColdStaking];
}

/// When a BIP9 deployment may start signalling
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum DeploymentStart {
    /// Active from genesis without signalling
    AlwaysActive,
    /// Median-time-past from which signalling counts
    At(u64),
}

/// Retarget-window threshold for mainnet (95% of 2016)
pub const DEFAULT_MAINNET_THRESHOLD: u32 = 1916;
/// Retarget-window threshold for testnet (75% of 2016)
pub const DEFAULT_TESTNET_THRESHOLD: u32 = 1512;
/// Retarget-window threshold for regtest (75% of 144)
pub const DEFAULT_REGTEST_THRESHOLD: u32 = 108;

/// Parameters of a single version-bits deployment
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Bip9Parameters {
    pub name: &'static str,
    pub bit: u8,
    pub start: DeploymentStart,
    pub timeout: u64,
    pub threshold: u32,
}

impl Bip9Parameters {
    /// Deployment that starts signalling at `start_time` (median-time-past)
    pub fn starting_at(
        name: &'static str,
        bit: u8,
        start_time: u64,
        timeout: u64,
        threshold: u32,
    ) -> Self {
        Self {
            name,
            bit,
            start: DeploymentStart::At(start_time),
            timeout,
            threshold,
        }
    }

    /// Whether signalling has begun at `median_time_past`
    pub fn is_started(&self, median_time_past: u64) -> bool {
        match self.start {
            DeploymentStart::AlwaysActive => true,
            DeploymentStart::At(start_time) => median_time_past >= start_time,
        }
    }

    pub fn always_active(name: &'static str, bit: u8, threshold: u32) -> Self {
        Self {
            name,
            bit,
            start: DeploymentStart::AlwaysActive,
            timeout: 999_999_999,
            threshold,
        }
    }
}

/// The CSV, Segwit and ColdStaking deployments, indexed by [`Bip9Deployment`]
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Bip9Deployments {
    deployments: [Bip9Parameters; 3],
}

impl Bip9Deployments {
    /// Every deployment active from genesis with the given threshold
    pub fn always_active(threshold: u32) -> Self {
        Self {
            deployments: [
                Bip9Parameters::always_active("CSV", 0, threshold),
                Bip9Parameters::always_active("Segwit", 1, threshold),
                Bip9Parameters::always_active("ColdStaking", 2, threshold),
            ],
        }
    }

    pub fn get(&self, deployment: Bip9Deployment) -> &Bip9Parameters {
        &self.deployments[deployment as usize]
    }

    pub fn iter(&self) -> impl Iterator<Item = (Bip9Deployment, &Bip9Parameters)> {
        Bip9Deployment::ALL.into_iter().zip(self.deployments.iter())
    }
}
