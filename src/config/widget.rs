//! Embeddable widget configuration.
//!
//! The calculator widget is configured through a JSON object passed by the
//! embedding page. This module parses that object into a strongly-typed
//! [`WidgetConfig`], filling in defaults for any key that is absent. Unknown
//! keys are ignored.

use std::collections::BTreeMap;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::warn;

use crate::error::{EngineError, EngineResult};

use super::types::{DEFAULT_ALLOWANCE_SEEDS, RateTable};

/// Where calculation results are posted when no URL is configured.
pub const DEFAULT_SUBMIT_URL: &str = "https://api.example.com/foster-allowance";

/// Colour scheme of the widget.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    /// Light background.
    #[default]
    Light,
    /// Dark background.
    Dark,
}

/// Configuration of an embedded calculator widget.
///
/// # Example
///
/// ```
/// use care_allowance_engine::config::{Theme, WidgetConfig};
///
/// let config = WidgetConfig::parse_or_default(r#"{ "theme": "dark", "unknown": 1 }"#);
/// assert_eq!(config.theme, Theme::Dark);
/// assert!(config.show_logo);
///
/// let fallback = WidgetConfig::parse_or_default("{not json");
/// assert_eq!(fallback, WidgetConfig::default());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct WidgetConfig {
    /// Destination for posting calculation results.
    pub submit_url: String,
    /// Seed values for the base weekly rates, youngest bracket first.
    pub allowances: Vec<Decimal>,
    /// Whether the logo is shown above the form.
    pub show_logo: bool,
    /// Colour scheme.
    pub theme: Theme,
    /// Optional heading text.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    /// Optional logo image URL.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub logo_url: Option<String>,
    /// CSS properties applied to the heading.
    pub title_style: BTreeMap<String, serde_json::Value>,
    /// Analytics snippet injected by the embedding page. Opaque to this crate.
    pub google_analytics: String,
}

impl Default for WidgetConfig {
    fn default() -> Self {
        Self {
            submit_url: DEFAULT_SUBMIT_URL.to_string(),
            allowances: DEFAULT_ALLOWANCE_SEEDS
                .iter()
                .copied()
                .map(Decimal::from)
                .collect(),
            show_logo: true,
            theme: Theme::Light,
            title: None,
            logo_url: None,
            title_style: BTreeMap::new(),
            google_analytics: String::new(),
        }
    }
}

impl WidgetConfig {
    /// Parses a widget configuration, merging the supplied keys over the defaults.
    ///
    /// # Errors
    ///
    /// Returns `ConfigParseError` if the input is not valid JSON or a known key
    /// holds a value of the wrong type.
    pub fn parse(json: &str) -> EngineResult<Self> {
        serde_json::from_str(json).map_err(|e| EngineError::ConfigParseError {
            path: "widget config".to_string(),
            message: e.to_string(),
        })
    }

    /// Parses a widget configuration, falling back to the defaults on error.
    ///
    /// Keys are merged over the defaults one at a time, so a key with a value
    /// of the wrong type keeps its default while the other keys still apply.
    /// Input that is not a JSON object yields the defaults.
    pub fn parse_or_default(json: &str) -> Self {
        let err = match Self::parse(json) {
            Ok(config) => return config,
            Err(err) => err,
        };

        let supplied = match serde_json::from_str::<Value>(json) {
            Ok(Value::Object(supplied)) => supplied,
            _ => {
                warn!(error = %err, "Falling back to default widget configuration");
                return Self::default();
            }
        };

        let mut merged = match serde_json::to_value(Self::default()) {
            Ok(Value::Object(defaults)) => defaults,
            _ => return Self::default(),
        };
        for (key, value) in supplied {
            let mut candidate = merged.clone();
            candidate.insert(key.clone(), value);
            if serde_json::from_value::<Self>(Value::Object(candidate.clone())).is_ok() {
                merged = candidate;
            } else {
                warn!(key = %key, "Ignoring invalid widget configuration key");
            }
        }

        serde_json::from_value(Value::Object(merged)).unwrap_or_default()
    }

    /// Builds the rate table described by the `allowances` seeds.
    ///
    /// # Errors
    ///
    /// Returns `InvalidRateTable` if the seeds are empty or negative.
    pub fn rate_table(&self) -> EngineResult<RateTable> {
        RateTable::from_seed_allowances(&self.allowances)
    }
}
