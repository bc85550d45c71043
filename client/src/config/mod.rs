//! Configuration management for the diabetes-risk client
//!
//! Configuration is loaded hierarchically:
//! 1. Default values (in code)
//! 2. TOML config files (config/development.toml or config/production.toml)
//! 3. Environment variables (prefix: DR__)

use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::env;
use std::path::PathBuf;
use std::time::Duration;

/// Client configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClientConfig {
    pub api: ApiConfig,
    #[serde(default)]
    pub wizard: WizardConfig,
    #[serde(default)]
    pub session: SessionConfig,
    #[serde(default)]
    pub history: HistoryConfig,
}

/// Prediction API endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    pub base_url: String,
    pub timeout_secs: u64,
}

/// Popup timings for the step-1 BMI popup
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct WizardConfig {
    pub popup_fade_in_ms: u64,
    /// Measured from the moment the popup is shown
    pub popup_hold_ms: u64,
    pub popup_fade_out_ms: u64,
}

/// Where the session (token and preferences) is persisted
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionConfig {
    pub path: PathBuf,
}

/// History view settings
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct HistoryConfig {
    pub page_size: usize,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: "http://127.0.0.1:5000".to_string(),
            timeout_secs: 30,
        }
    }
}

impl Default for WizardConfig {
    fn default() -> Self {
        Self {
            popup_fade_in_ms: 100,
            popup_hold_ms: 3000,
            popup_fade_out_ms: 300,
        }
    }
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            path: PathBuf::from(".diabetes-risk/session.json"),
        }
    }
}

impl Default for HistoryConfig {
    fn default() -> Self {
        Self {
            page_size: diabetes_risk_shared::pagination::DEFAULT_PAGE_SIZE,
        }
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api: ApiConfig::default(),
            wizard: WizardConfig::default(),
            session: SessionConfig::default(),
            history: HistoryConfig::default(),
        }
    }
}

impl ApiConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

impl WizardConfig {
    pub fn fade_in(&self) -> Duration {
        Duration::from_millis(self.popup_fade_in_ms)
    }

    pub fn hold(&self) -> Duration {
        Duration::from_millis(self.popup_hold_ms)
    }

    pub fn fade_out(&self) -> Duration {
        Duration::from_millis(self.popup_fade_out_ms)
    }
}

impl ClientConfig {
    /// Load configuration from files and environment
    ///
    /// Loading order (later sources override earlier):
    /// 1. Default values
    /// 2. Config file based on RUST_ENV (development.toml or production.toml)
    /// 3. Environment variables with DR__ prefix
    pub fn load() -> Result<Self> {
        let env = env::var("RUST_ENV").unwrap_or_else(|_| "development".to_string());
        let config_file = format!("config/{}.toml", env);

        let config = config::Config::builder()
            .add_source(config::Config::try_from(&ClientConfig::default())?)
            .add_source(config::File::with_name(&config_file).required(false))
            // e.g., DR__API__BASE_URL=https://predict.example.org sets api.base_url
            .add_source(config::Environment::with_prefix("DR").separator("__"))
            .build()?;

        Ok(config.try_deserialize()?)
    }

    /// Check if running in production mode
    pub fn is_production() -> bool {
        env::var("RUST_ENV")
            .map(|v| v == "production")
            .unwrap_or(false)
    }
}
