//! Settings shared by every command.

use std::path::{Path, PathBuf};

use dg_core::DirStore;
use rand::SeedableRng;
use rand::rngs::StdRng;

/// Directory used when none is given.
pub const DEFAULT_DATA_DIR: &str = ".demigod";

/// Resolved command-line configuration.
#[derive(Debug, Clone)]
pub struct CliConfig {
    /// Where sheets and histories are stored.
    pub data_dir: PathBuf,
    /// Seed for reproducible rolls; OS entropy when absent.
    pub seed: Option<u64>,
    /// Wait through reveal delays before printing results.
    pub dramatic: bool,
}

impl Default for CliConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from(DEFAULT_DATA_DIR),
            seed: None,
            dramatic: false,
        }
    }
}

impl CliConfig {
    /// Set the data directory.
    pub fn with_data_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.data_dir = dir.into();
        self
    }

    /// Set or clear the RNG seed.
    pub fn with_seed(mut self, seed: Option<u64>) -> Self {
        self.seed = seed;
        self
    }

    /// Turn reveal delays on or off.
    pub fn with_dramatic(mut self, dramatic: bool) -> Self {
        self.dramatic = dramatic;
        self
    }

    /// The data directory.
    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    /// A store rooted at the data directory.
    pub fn store(&self) -> DirStore {
        DirStore::new(self.data_dir())
    }

    /// The random source for this run.
    pub fn rng(&self) -> StdRng {
        match self.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        }
    }
}
