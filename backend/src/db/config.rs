//! Dashboard configuration file support.
//!
//! Reads the store backend, data file locations and machine roster from a
//! TOML file:
//!
//! ```toml
//! [repository]
//! type = "csv"
//!
//! [data]
//! hours_file = "data/compressor_hours.csv"
//! log_file = "data/maintenance_log.csv"
//!
//! [[roster.machines]]
//! id = "Howden MK6D (5)"
//! kind = "compressor"
//! ```
//!
//! Every section is optional. Relative data paths are resolved against the
//! directory holding the configuration file.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use super::factory::RepositoryType;
use super::repository::{RepositoryError, RepositoryResult};
use crate::models::{Machine, MachineRoster};

/// Configuration file name searched by [`DashboardConfig::from_default_location`].
pub const CONFIG_FILE_NAME: &str = "maintenance.toml";

/// Dashboard configuration from file.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DashboardConfig {
    #[serde(default)]
    pub repository: RepositorySettings,
    #[serde(default)]
    pub data: DataSettings,
    #[serde(default)]
    pub roster: RosterSettings,
    /// Directory of the file this configuration was read from.
    #[serde(skip)]
    pub base_dir: Option<PathBuf>,
}

/// Repository type settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RepositorySettings {
    #[serde(rename = "type", default = "default_repo_type")]
    pub repo_type: String,
}

impl Default for RepositorySettings {
    fn default() -> Self {
        Self {
            repo_type: default_repo_type(),
        }
    }
}

/// Locations of the hours sheet and the maintenance log.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DataSettings {
    #[serde(default = "default_hours_file")]
    pub hours_file: PathBuf,
    #[serde(default = "default_log_file")]
    pub log_file: PathBuf,
}

impl Default for DataSettings {
    fn default() -> Self {
        Self {
            hours_file: default_hours_file(),
            log_file: default_log_file(),
        }
    }
}

/// Machine roster; empty means the plant's default roster.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RosterSettings {
    #[serde(default)]
    pub machines: Vec<Machine>,
}

fn default_repo_type() -> String {
    "csv".to_string()
}

fn default_hours_file() -> PathBuf {
    PathBuf::from("data/compressor_hours.csv")
}

fn default_log_file() -> PathBuf {
    PathBuf::from("data/maintenance_log.csv")
}

impl FromStr for DashboardConfig {
    type Err = RepositoryError;

    fn from_str(content: &str) -> Result<Self, Self::Err> {
        toml::from_str(content).map_err(|e| {
            RepositoryError::configuration(format!("Failed to parse config file: {}", e))
        })
    }
}

impl DashboardConfig {
    /// Load configuration from a TOML file.
    ///
    /// # Arguments
    /// * `path` - Path to the configuration file
    ///
    /// # Returns
    /// * `Ok(DashboardConfig)` if successful
    /// * `Err(RepositoryError)` if file cannot be read or parsed
    pub fn from_file<P: AsRef<Path>>(path: P) -> RepositoryResult<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|e| {
            RepositoryError::configuration(format!(
                "Failed to read config file {}: {}",
                path.display(),
                e
            ))
        })?;

        let mut config: DashboardConfig = content.parse()?;
        config.base_dir = path.parent().map(Path::to_path_buf);
        Ok(config)
    }

    /// Load configuration from the default location.
    ///
    /// Searches for `maintenance.toml` in:
    /// 1. Current directory
    /// 2. `backend/` directory
    /// 3. Parent directory
    pub fn from_default_location() -> RepositoryResult<Self> {
        let search_paths = [
            PathBuf::from(CONFIG_FILE_NAME),
            Path::new("backend").join(CONFIG_FILE_NAME),
            Path::new("..").join(CONFIG_FILE_NAME),
        ];

        for path in search_paths {
            if path.exists() {
                return Self::from_file(&path);
            }
        }

        Err(RepositoryError::configuration(format!(
            "No {} found in standard locations",
            CONFIG_FILE_NAME
        )))
    }

    /// Get the repository type from configuration.
    pub fn repository_type(&self) -> RepositoryResult<RepositoryType> {
        RepositoryType::from_str(&self.repository.repo_type).map_err(RepositoryError::configuration)
    }

    /// The configured roster, or the plant default when none is given.
    pub fn roster(&self) -> RepositoryResult<MachineRoster> {
        if self.roster.machines.is_empty() {
            return Ok(MachineRoster::plant_default());
        }
        Ok(MachineRoster::new(self.roster.machines.clone())?)
    }

    fn resolve(&self, path: &Path) -> PathBuf {
        match &self.base_dir {
            Some(base) if path.is_relative() => base.join(path),
            _ => path.to_path_buf(),
        }
    }

    pub fn hours_path(&self) -> PathBuf {
        self.resolve(&self.data.hours_file)
    }

    pub fn log_path(&self) -> PathBuf {
        self.resolve(&self.data.log_file)
    }
}
