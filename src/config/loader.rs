//! Configuration loading functionality.
//!
//! This module provides the [`ConfigLoader`] type for loading engine
//! configuration from YAML files.

use std::fs;
use std::path::Path;

use crate::error::{EngineError, EngineResult};

use super::types::{DeductionsConfig, EngineConfig, ExchangeConfig, ServerConfig};

/// Loads and provides access to engine configuration.
///
/// # Directory Structure
///
/// ```text
/// config/default/
/// ├── deductions.yaml  # AM-bidrag, A-skat, feriepenge rates, ATP tiers, input policy
/// ├── exchange.yaml    # Exchange-rate provider
/// └── server.yaml      # HTTP bind address
/// ```
///
/// # Example
///
/// ```no_run
/// use dk_wage_engine::config::ConfigLoader;
///
/// let loader = ConfigLoader::load("./config/default")?;
/// println!("A-skat rate: {}", loader.config().rates().income_tax_rate);
/// # Ok::<(), dk_wage_engine::error::EngineError>(())
/// ```
#[derive(Debug, Clone)]
pub struct ConfigLoader {
    config: EngineConfig,
}

impl ConfigLoader {
    /// Loads configuration from the specified directory.
    ///
    /// # Returns
    ///
    /// Returns a `ConfigLoader` instance on success, or an error if:
    /// - Any required file is missing
    /// - Any file contains invalid YAML
    /// - The deduction rates fail validation
    pub fn load<P: AsRef<Path>>(path: P) -> EngineResult<Self> {
        let path = path.as_ref();

        let deductions = Self::load_yaml::<DeductionsConfig>(&path.join("deductions.yaml"))?;
        deductions.rates.validate()?;

        let exchange = Self::load_yaml::<ExchangeConfig>(&path.join("exchange.yaml"))?;
        let server = Self::load_yaml::<ServerConfig>(&path.join("server.yaml"))?;

        Ok(Self {
            config: EngineConfig::new(deductions, exchange, server),
        })
    }

    /// Loads and parses a YAML file.
    fn load_yaml<T: serde::de::DeserializeOwned>(path: &Path) -> EngineResult<T> {
        let path_str = path.display().to_string();

        let content = fs::read_to_string(path).map_err(|_| EngineError::ConfigNotFound {
            path: path_str.clone(),
        })?;

        serde_yaml::from_str(&content).map_err(|e| EngineError::ConfigParseError {
            path: path_str,
            message: e.to_string(),
        })
    }

    /// Returns the underlying engine configuration.
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Consumes the loader, returning the configuration.
    pub fn into_config(self) -> EngineConfig {
        self.config
    }
}
