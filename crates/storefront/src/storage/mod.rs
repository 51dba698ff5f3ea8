//! Client-local key-value storage.
//!
//! The cart's persisted slot lives in a [`KeyValueStorage`]: a flat map of
//! string keys to string values, in the spirit of a browser's local storage.
//! Encoding is the caller's concern; backends only move strings.
//!
//! # Backends
//!
//! - [`MemoryStorage`] - in-process map, shared between clones
//! - [`FileStorage`] - one file per key inside a directory

mod file;
mod memory;

use thiserror::Error;

pub use file::FileStorage;
pub use memory::MemoryStorage;

/// Errors that can occur when reading or writing a storage slot.
#[derive(Debug, Error)]
pub enum StorageError {
    /// The key cannot be used as a slot name.
    #[error("invalid storage key: {0:?}")]
    InvalidKey(String),

    /// Underlying I/O failed.
    #[error("storage I/O error for key {key}: {source}")]
    Io {
        key: String,
        #[source]
        source: std::io::Error,
    },
}

/// A string-to-string storage medium.
pub trait KeyValueStorage {
    /// Read the value stored under `key`, `None` if the slot is empty.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError`] if the key is invalid or the backend fails.
    fn get_item(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// Replace the value stored under `key`.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError`] if the key is invalid or the backend fails.
    fn set_item(&mut self, key: &str, value: &str) -> Result<(), StorageError>;

    /// Empty the slot. Removing a missing key succeeds.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError`] if the key is invalid or the backend fails.
    fn remove_item(&mut self, key: &str) -> Result<(), StorageError>;
}

impl<S: KeyValueStorage + ?Sized> KeyValueStorage for Box<S> {
    fn get_item(&self, key: &str) -> Result<Option<String>, StorageError> {
        (**self).get_item(key)
    }

    fn set_item(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        (**self).set_item(key, value)
    }

    fn remove_item(&mut self, key: &str) -> Result<(), StorageError> {
        (**self).remove_item(key)
    }
}

/// Check that `key` is usable as a slot name on every backend.
///
/// Allowed: ASCII alphanumerics, `-`, `_` and `.`, not starting with `.`.
///
/// # Errors
///
/// Returns [`StorageError::InvalidKey`] otherwise.
pub fn validate_key(key: &str) -> Result<(), StorageError> {
    let valid = !key.is_empty()
        && !key.starts_with('.')
        && key
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.'));

    if valid {
        Ok(())
    } else {
        Err(StorageError::InvalidKey(key.to_owned()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_key_accepts_slot_names() {
        assert!(validate_key("cart-storage").is_ok());
        assert!(validate_key("cart_storage.v2").is_ok());
    }

    #[test]
    fn test_validate_key_rejects_paths() {
        for key in ["", ".hidden", "../cart", "a/b", "a\\b", "cart storage"] {
            assert!(
                matches!(validate_key(key), Err(StorageError::InvalidKey(_))),
                "{key:?} should be rejected"
            );
        }
    }
}
