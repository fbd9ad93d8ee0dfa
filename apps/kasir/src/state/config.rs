//! # Configuration State
//!
//! Shop settings, loaded once at startup and read-only afterwards.
//!
//! ## Load Order (later overrides earlier)
//! ```text
//! 1. Defaults            Toko Beras, WIB, step 0.5, Rp 5.000 .. Rp 100.000
//! 2. kasir.toml          <config dir>/kasir.toml or an explicit path
//! 3. KASIR_* variables   KASIR_STORE_NAME, KASIR_UTC_OFFSET, KASIR_DB_PATH, ...
//! 4. validate()
//! ```
//!
//! ## Example kasir.toml
//! ```toml
//! store_name = "Toko Beras Sumber Rejeki"
//! store_address = ["Jl. Pasar Baru No. 12", "Klaten"]
//! utc_offset_secs = 25200
//! cart_step = "0.5"
//! quick_amounts = [5000, 10000, 20000, 50000, 100000]
//! ```

use std::path::PathBuf;

use beras_core::payment::QUICK_AMOUNTS;
use beras_core::validation::validate_cart_step;
use beras_core::{Money, Quantity, CART_STEP, LOW_STOCK_THRESHOLD, WIB_OFFSET_SECS};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, info, warn};

const CONFIG_FILE: &str = "kasir.toml";
const DATABASE_FILE: &str = "kasir.db";

/// Widest real-world UTC offset, in seconds.
const MAX_UTC_OFFSET_SECS: i32 = 14 * 3600;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Failed to write config: {0}")]
    Serialize(#[from] toml::ser::Error),

    #[error("Invalid config: {0}")]
    Invalid(String),

    #[error("No config directory available on this platform")]
    NoConfigDir,
}

/// Application configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConfigState {
    /// Shown on the success screen.
    pub store_name: String,

    /// Address lines under the store name.
    pub store_address: Vec<String>,

    pub currency_symbol: String,

    /// Shop clock, seconds east of UTC. Default: WIB (UTC+7)
    pub utc_offset_secs: i32,

    /// Quantity added per product tap and per stepper press.
    pub cart_step: Quantity,

    /// Quick-amount buttons on the cash panel.
    pub quick_amounts: Vec<Money>,

    /// Database file. `None` uses the platform data directory.
    pub database_path: Option<PathBuf>,

    /// Stock at or below this shows on the low-stock list.
    pub low_stock_threshold: Quantity,
}

impl Default for ConfigState {
    fn default() -> Self {
        ConfigState {
            store_name: "Toko Beras".to_string(),
            store_address: Vec::new(),
            currency_symbol: "Rp".to_string(),
            utc_offset_secs: WIB_OFFSET_SECS,
            cart_step: CART_STEP,
            quick_amounts: QUICK_AMOUNTS.to_vec(),
            database_path: None,
            low_stock_threshold: Decimal::from(LOW_STOCK_THRESHOLD),
        }
    }
}

impl ConfigState {
    /// Loads defaults, then the config file, then `KASIR_*` variables.
    pub fn load(config_path: Option<PathBuf>) -> Result<Self, ConfigError> {
        Self::load_with_env(config_path, |key| std::env::var(key).ok())
    }

    /// Same as [`ConfigState::load`] with a custom variable source.
    pub fn load_with_env<F>(config_path: Option<PathBuf>, lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(path) = config_path.or_else(Self::default_config_path) {
            if path.exists() {
                info!(?path, "Loading config from file");
                let contents = std::fs::read_to_string(&path)?;
                config = toml::from_str(&contents)?;
            } else {
                debug!(?path, "Config file not found, using defaults");
            }
        }

        config.apply_env_overrides(lookup);
        config.validate()?;

        Ok(config)
    }

    /// Loads config or falls back to defaults.
    pub fn load_or_default(config_path: Option<PathBuf>) -> Self {
        Self::load(config_path).unwrap_or_else(|e| {
            warn!(error = %e, "Failed to load config, using defaults");
            Self::default()
        })
    }

    pub fn save(&self, config_path: Option<PathBuf>) -> Result<(), ConfigError> {
        let path = config_path
            .or_else(Self::default_config_path)
            .ok_or(ConfigError::NoConfigDir)?;

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        std::fs::write(&path, toml::to_string_pretty(self)?)?;

        info!(?path, "Config saved");
        Ok(())
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.store_name.trim().is_empty() {
            return Err(ConfigError::Invalid("store_name must not be empty".into()));
        }

        if self.utc_offset_secs.abs() > MAX_UTC_OFFSET_SECS {
            return Err(ConfigError::Invalid(format!(
                "utc_offset_secs must be within ±{}, got {}",
                MAX_UTC_OFFSET_SECS, self.utc_offset_secs
            )));
        }

        validate_cart_step(self.cart_step).map_err(|e| ConfigError::Invalid(e.to_string()))?;

        if self.quick_amounts.is_empty() || self.quick_amounts.iter().any(|m| !m.is_positive()) {
            return Err(ConfigError::Invalid(
                "quick_amounts must be a non-empty list of positive amounts".into(),
            ));
        }

        if self.low_stock_threshold.is_sign_negative() {
            return Err(ConfigError::Invalid(
                "low_stock_threshold must not be negative".into(),
            ));
        }

        Ok(())
    }

    fn apply_env_overrides<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(name) = lookup("KASIR_STORE_NAME") {
            debug!(store_name = %name, "Overriding store name from environment");
            self.store_name = name;
        }

        if let Some(symbol) = lookup("KASIR_CURRENCY_SYMBOL") {
            self.currency_symbol = symbol;
        }

        // Whole hours, e.g. "7" for WIB or "8" for WITA
        if let Some(offset) = lookup("KASIR_UTC_OFFSET") {
            match offset.trim().parse::<i32>() {
                Ok(hours) => self.utc_offset_secs = hours.saturating_mul(3600),
                Err(_) => warn!(value = %offset, "Ignoring invalid KASIR_UTC_OFFSET"),
            }
        }

        if let Some(step) = lookup("KASIR_CART_STEP") {
            match step.trim().parse::<Decimal>() {
                Ok(step) => self.cart_step = step,
                Err(_) => warn!(value = %step, "Ignoring invalid KASIR_CART_STEP"),
            }
        }

        // Comma separated, e.g. "10000,20000,50000"
        if let Some(amounts) = lookup("KASIR_QUICK_AMOUNTS") {
            let parsed: Result<Vec<Money>, _> = amounts
                .split(',')
                .map(|a| a.trim().parse::<i64>().map(Money::from_rupiah))
                .collect();
            match parsed {
                Ok(list) => self.quick_amounts = list,
                Err(_) => warn!(value = %amounts, "Ignoring invalid KASIR_QUICK_AMOUNTS"),
            }
        }

        if let Some(path) = lookup("KASIR_DB_PATH") {
            debug!(path = %path, "Overriding database path from environment");
            self.database_path = Some(PathBuf::from(path));
        }

        if let Some(threshold) = lookup("KASIR_LOW_STOCK_THRESHOLD") {
            match threshold.trim().parse::<Decimal>() {
                Ok(value) => self.low_stock_threshold = value,
                Err(_) => warn!(value = %threshold, "Ignoring invalid KASIR_LOW_STOCK_THRESHOLD"),
            }
        }
    }

    fn project_dirs() -> Option<directories::ProjectDirs> {
        directories::ProjectDirs::from("id", "kasir-beras", "kasir")
    }

    fn default_config_path() -> Option<PathBuf> {
        Self::project_dirs().map(|dirs| dirs.config_dir().join(CONFIG_FILE))
    }

    /// Database file to open: the configured path, else the data directory.
    pub fn resolve_database_path(&self) -> Option<PathBuf> {
        self.database_path.clone().or_else(|| {
            Self::project_dirs().map(|dirs| dirs.data_dir().join(DATABASE_FILE))
        })
    }

    /// Formats an amount with the configured symbol: `Rp 15.000`.
    pub fn format_money(&self, amount: Money) -> String {
        let sign = if amount.is_negative() { "-" } else { "" };
        format!("{}{} {}", sign, self.currency_symbol, amount.grouped_digits())
    }
}
