//! Repository factory for dependency injection.
//!
//! Creates repository instances from runtime configuration.

use std::path::Path;
use std::str::FromStr;
use std::sync::Arc;

use log::info;

use super::config::DashboardConfig;
#[cfg(feature = "csv-repo")]
use super::repositories::CsvRepository;
use super::repositories::LocalRepository;
use super::repository::{FullRepository, RepositoryError, RepositoryResult};

/// Environment variable overriding the configured repository type.
pub const REPOSITORY_ENV: &str = "MAINT_REPOSITORY";

/// Repository type configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RepositoryType {
    /// CSV files on disk
    Csv,
    /// In-memory local repository
    Local,
}

impl FromStr for RepositoryType {
    type Err = String;

    /// Parse repository type from string ("csv", "local").
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "csv" | "file" => Ok(Self::Csv),
            "local" | "memory" => Ok(Self::Local),
            _ => Err(format!("Unknown repository type: {}", s)),
        }
    }
}

impl RepositoryType {
    /// Repository type from the `MAINT_REPOSITORY` environment variable, if set.
    pub fn from_env() -> Option<RepositoryResult<Self>> {
        std::env::var(REPOSITORY_ENV)
            .ok()
            .map(|val| val.parse().map_err(RepositoryError::configuration))
    }
}

/// Repository factory for creating repository instances.
///
/// # Example
/// ```
/// use plant_maint::db::config::DashboardConfig;
/// use plant_maint::db::factory::{RepositoryFactory, RepositoryType};
///
/// let config: DashboardConfig = "[repository]\ntype = \"local\"".parse().unwrap();
/// let repo = RepositoryFactory::create(RepositoryType::Local, &config).unwrap();
/// assert!(repo.hours_records().unwrap().is_empty());
/// ```
pub struct RepositoryFactory;

impl RepositoryFactory {
    /// Create a repository instance based on type.
    ///
    /// # Arguments
    /// * `repo_type` - Type of repository to create
    /// * `config` - Configuration holding the data file locations
    pub fn create(
        repo_type: RepositoryType,
        config: &DashboardConfig,
    ) -> RepositoryResult<Arc<dyn FullRepository>> {
        match repo_type {
            RepositoryType::Csv => {
                #[cfg(feature = "csv-repo")]
                {
                    let hours = config.hours_path();
                    let log = config.log_path();
                    info!(
                        "Using CSV repository (hours: {}, log: {})",
                        hours.display(),
                        log.display()
                    );
                    Ok(Arc::new(CsvRepository::new(hours, log)))
                }
                #[cfg(not(feature = "csv-repo"))]
                {
                    let _ = config;
                    Err(RepositoryError::configuration(
                        "CSV repository feature not enabled",
                    ))
                }
            }
            RepositoryType::Local => {
                info!("Using in-memory repository");
                Ok(Self::create_local())
            }
        }
    }

    /// Create an in-memory local repository.
    pub fn create_local() -> Arc<dyn FullRepository> {
        Arc::new(LocalRepository::new())
    }

    /// Create a repository from configuration. `MAINT_REPOSITORY` takes
    /// precedence over the configured type.
    pub fn from_config(config: &DashboardConfig) -> RepositoryResult<Arc<dyn FullRepository>> {
        let repo_type = match RepositoryType::from_env() {
            Some(from_env) => from_env?,
            None => config.repository_type()?,
        };
        Self::create(repo_type, config)
    }

    /// Create a repository from a TOML configuration file.
    pub fn from_config_file<P: AsRef<Path>>(
        config_path: P,
    ) -> RepositoryResult<Arc<dyn FullRepository>> {
        let config = DashboardConfig::from_file(config_path)?;
        Self::from_config(&config)
    }
}
