//! Storefront configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! All optional:
//! - `ATELIER_STORAGE_DIR` - Directory holding persisted slots (default: .atelier)
//! - `ATELIER_CART_STORAGE_KEY` - Slot name for the cart (default: cart-storage)
//! - `ATELIER_FLAT_SHIPPING` - Flat shipping fee (default: 9.99)
//! - `ATELIER_TAX_RATE` - Tax rate as a fraction (default: 0.08)

use std::path::PathBuf;
use std::str::FromStr;

use rust_decimal::Decimal;
use thiserror::Error;

use crate::checkout::{DEFAULT_FLAT_SHIPPING, DEFAULT_TAX_RATE, PricingPolicy};
use crate::persist::DEFAULT_STORAGE_KEY;
use crate::storage::validate_key;

const DEFAULT_STORAGE_DIR: &str = ".atelier";

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Storefront configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AtelierConfig {
    /// Directory for the file storage backend
    pub storage_dir: PathBuf,
    /// Slot name the cart is persisted under
    pub cart_storage_key: String,
    /// Shipping and tax rules for checkout summaries
    pub pricing: PricingPolicy,
}

impl Default for AtelierConfig {
    fn default() -> Self {
        Self {
            storage_dir: PathBuf::from(DEFAULT_STORAGE_DIR),
            cart_storage_key: DEFAULT_STORAGE_KEY.to_string(),
            pricing: PricingPolicy::default(),
        }
    }
}

impl AtelierConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a variable is set to an invalid value.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build configuration from an arbitrary variable source.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a variable is set to an invalid value.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let storage_dir = PathBuf::from(get_env_or_default(
            &lookup,
            "ATELIER_STORAGE_DIR",
            DEFAULT_STORAGE_DIR,
        ));

        let cart_storage_key =
            get_env_or_default(&lookup, "ATELIER_CART_STORAGE_KEY", DEFAULT_STORAGE_KEY);
        validate_key(&cart_storage_key).map_err(|e| {
            ConfigError::InvalidEnvVar("ATELIER_CART_STORAGE_KEY".to_string(), e.to_string())
        })?;

        let flat_shipping =
            get_decimal_or_default(&lookup, "ATELIER_FLAT_SHIPPING", DEFAULT_FLAT_SHIPPING)?;
        if flat_shipping.is_sign_negative() && !flat_shipping.is_zero() {
            return Err(ConfigError::InvalidEnvVar(
                "ATELIER_FLAT_SHIPPING".to_string(),
                "must not be negative".to_string(),
            ));
        }

        let tax_rate = get_decimal_or_default(&lookup, "ATELIER_TAX_RATE", DEFAULT_TAX_RATE)?;
        if tax_rate < Decimal::ZERO || tax_rate > Decimal::ONE {
            return Err(ConfigError::InvalidEnvVar(
                "ATELIER_TAX_RATE".to_string(),
                "must be between 0 and 1".to_string(),
            ));
        }

        Ok(Self {
            storage_dir,
            cart_storage_key,
            pricing: PricingPolicy {
                flat_shipping,
                tax_rate,
                ..PricingPolicy::default()
            },
        })
    }
}

// =============================================================================
// Helper Functions
// =============================================================================

/// Get a variable with a default value.
fn get_env_or_default<F>(lookup: &F, key: &str, default: &str) -> String
where
    F: Fn(&str) -> Option<String>,
{
    lookup(key).unwrap_or_else(|| default.to_string())
}

/// Get a decimal variable, falling back to `default` when unset.
fn get_decimal_or_default<F>(lookup: &F, key: &str, default: Decimal) -> Result<Decimal, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    lookup(key).map_or(Ok(default), |raw| {
        Decimal::from_str(raw.trim())
            .map_err(|e| ConfigError::InvalidEnvVar(key.to_string(), e.to_string()))
    })
}
