use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

/// Looked up in the working directory at startup.
pub const CONFIG_FILE: &str = "dashboard.json";

// ---------------------------------------------------------------------------
// Dashboard configuration
// ---------------------------------------------------------------------------

/// Where the three datasets live.
///
/// ```json
/// { "data_dir": "data", "buildings_file": "MNBuilidng.csv" }
/// ```
/// Missing keys fall back to [`DashboardConfig::default`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DashboardConfig {
    pub data_dir: PathBuf,
    pub rides_file: String,
    pub buildings_file: String,
    pub stations_file: String,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from("."),
            rides_file: "citibikerides.csv".to_string(),
            buildings_file: "MNBuilidng.csv".to_string(),
            stations_file: "MNstation.csv".to_string(),
        }
    }
}

impl DashboardConfig {
    /// Parse a JSON config file.
    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("reading {}", path.display()))?;
        serde_json::from_str(&text).with_context(|| format!("parsing {}", path.display()))
    }

    /// Use `dashboard.json` from `dir` if there is one, defaults otherwise.
    pub fn discover(dir: &Path) -> Self {
        let path = dir.join(CONFIG_FILE);
        if !path.exists() {
            log::debug!("No {CONFIG_FILE} in {}, using defaults", dir.display());
            return Self::default();
        }
        match Self::load(&path) {
            Ok(config) => {
                log::info!("Using configuration from {}", path.display());
                config
            }
            Err(e) => {
                log::error!("Ignoring invalid configuration: {e:#}");
                Self::default()
            }
        }
    }

    pub fn rides_path(&self) -> PathBuf {
        self.data_dir.join(&self.rides_file)
    }

    pub fn buildings_path(&self) -> PathBuf {
        self.data_dir.join(&self.buildings_file)
    }

    pub fn stations_path(&self) -> PathBuf {
        self.data_dir.join(&self.stations_file)
    }

    /// Same file names, different directory.
    pub fn with_data_dir(&self, data_dir: PathBuf) -> Self {
        Self {
            data_dir,
            ..self.clone()
        }
    }
}
