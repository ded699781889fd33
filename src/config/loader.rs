//! Configuration loading functionality.
//!
//! This module provides the [`ConfigLoader`] type for loading allowance
//! scheme configurations from YAML files.

use std::fs;
use std::path::Path;

use crate::error::{EngineError, EngineResult};

use super::types::{RateTable, SchemeMetadata};

/// Loads and provides access to an allowance scheme configuration.
///
/// # Directory Structure
///
/// The configuration directory should have the following structure:
/// ```text
/// config/default/
/// ├── scheme.yaml   # Scheme metadata
/// └── rates.yaml    # Weekly rate table
/// ```
///
/// # Example
///
/// ```no_run
/// use care_allowance_engine::config::ConfigLoader;
/// use care_allowance_engine::models::AgeBracket;
///
/// let loader = ConfigLoader::load("./config/default").unwrap();
/// println!("Scheme: {}", loader.scheme().name);
///
/// let rate = loader.rate_table().base_rate(AgeBracket::Age0To4).unwrap();
/// println!("Weekly rate for 0-4: {}", rate);
/// ```
#[derive(Debug, Clone)]
pub struct ConfigLoader {
    scheme: SchemeMetadata,
    rate_table: RateTable,
}

impl Default for ConfigLoader {
    fn default() -> Self {
        Self::builtin()
    }
}

impl ConfigLoader {
    /// Loads configuration from the specified directory.
    ///
    /// # Returns
    ///
    /// Returns a `ConfigLoader` instance on success, or an error if:
    /// - Any required file is missing (`ConfigNotFound`)
    /// - Any file contains invalid YAML (`ConfigParseError`)
    /// - The rate table lacks a bracket or holds a negative amount (`InvalidRateTable`)
    pub fn load<P: AsRef<Path>>(path: P) -> EngineResult<Self> {
        let path = path.as_ref();

        let scheme = Self::load_yaml::<SchemeMetadata>(&path.join("scheme.yaml"))?;
        let rate_table = Self::load_yaml::<RateTable>(&path.join("rates.yaml"))?;

        Self::from_parts(scheme, rate_table)
    }

    /// Builds a loader from an in-memory scheme and rate table.
    ///
    /// The table must define every age bracket and hold no negative amount
    /// other than the experienced-carer modifier.
    pub fn from_parts(scheme: SchemeMetadata, rate_table: RateTable) -> EngineResult<Self> {
        rate_table.validate_complete()?;
        Ok(Self { scheme, rate_table })
    }

    /// A loader holding the built-in default scheme and rate table.
    pub fn builtin() -> Self {
        Self {
            scheme: SchemeMetadata::default(),
            rate_table: RateTable::default(),
        }
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

    /// Returns the scheme metadata.
    pub fn scheme(&self) -> &SchemeMetadata {
        &self.scheme
    }

    /// Returns the configured rate table.
    pub fn rate_table(&self) -> &RateTable {
        &self.rate_table
    }
}
