//! Configuration loading and management for the Care Allowance Engine.
//!
//! This module provides functionality to load scheme configurations from YAML
//! files, the [`RateTable`] consumed by the calculation engine, and the parse
//! step for the embeddable widget's JSON configuration.
//!
//! # Example
//!
//! ```no_run
//! use care_allowance_engine::config::ConfigLoader;
//!
//! let config = ConfigLoader::load("./config/default").unwrap();
//! println!("Loaded scheme: {}", config.scheme().name);
//! ```

mod loader;
mod types;
mod widget;

pub use loader::ConfigLoader;
pub use types::{DEFAULT_ALLOWANCE_SEEDS, RateTable, SchemeMetadata};
pub use widget::{DEFAULT_SUBMIT_URL, Theme, WidgetConfig};
