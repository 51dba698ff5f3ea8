//! Unified error type for callers composing the storefront pieces.
//!
//! Cart operations themselves never fail; these errors come from the edges:
//! configuration, the storage medium and explicit saves.

use thiserror::Error;

use crate::config::ConfigError;
use crate::persist::PersistError;
use crate::storage::StorageError;

/// Application-level error type for the storefront.
#[derive(Debug, Error)]
pub enum AppError {
    /// Configuration could not be loaded.
    #[error("Config error: {0}")]
    Config(#[from] ConfigError),

    /// Storage medium operation failed.
    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    /// Saving the cart failed.
    #[error("Persist error: {0}")]
    Persist(#[from] PersistError),

    /// Serializing output failed.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Bad input from the caller.
    #[error("Bad request: {0}")]
    BadRequest(String),
}

impl AppError {
    /// Whether the error was caused by caller input rather than the environment.
    #[must_use]
    pub const fn is_client_error(&self) -> bool {
        matches!(self, Self::BadRequest(_) | Self::Config(_))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_client_errors() {
        assert!(AppError::BadRequest("quantity".into()).is_client_error());
        assert!(
            AppError::Config(ConfigError::InvalidEnvVar("X".into(), "bad".into()))
                .is_client_error()
        );
        assert!(!AppError::Storage(StorageError::InvalidKey("..".into())).is_client_error());

        let json = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        assert!(!AppError::from(json).is_client_error());
    }

    #[test]
    fn test_display_includes_source() {
        let err = AppError::from(StorageError::InvalidKey("a/b".into()));
        assert_eq!(err.to_string(), "Storage error: invalid storage key: \"a/b\"");
    }
}
