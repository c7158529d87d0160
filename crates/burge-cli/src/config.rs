use std::path::{Path, PathBuf};

use rand::SeedableRng;
use rand::rngs::StdRng;

/// Default directory for character files.
pub const DEFAULT_DATA_DIR: &str = "burge-data";

/// Default user id for a single-player setup.
pub const DEFAULT_USER: &str = "local";

/// Settings shared by every command.
#[derive(Debug, Clone)]
pub struct CliConfig {
    data_dir: PathBuf,
    user: String,
    seed: Option<u64>,
}

impl Default for CliConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from(DEFAULT_DATA_DIR),
            user: DEFAULT_USER.to_string(),
            seed: None,
        }
    }
}

impl CliConfig {
    /// Set the directory holding character files.
    pub fn with_data_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.data_dir = dir.into();
        self
    }

    /// Set the user whose character is used.
    pub fn with_user(mut self, user: impl Into<String>) -> Self {
        self.user = user.into();
        self
    }

    /// Fix the dice seed for reproducible rolls.
    pub fn with_seed(mut self, seed: Option<u64>) -> Self {
        self.seed = seed;
        self
    }

    /// Directory holding one JSON file per user.
    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    /// User id whose character commands operate on.
    pub fn user(&self) -> &str {
        &self.user
    }

    /// A dice source: seeded when a seed is configured, OS entropy otherwise.
    pub fn rng(&self) -> StdRng {
        match self.seed {
            Some(seed) => {
                tracing::debug!(seed, "seeded dice");
                StdRng::seed_from_u64(seed)
            }
            None => StdRng::from_os_rng(),
        }
    }
}
