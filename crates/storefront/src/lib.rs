//! Atelier Storefront library.
//!
//! Everything around the cart that touches the outside world: the storage
//! medium, the persisted cart slot, checkout pricing and configuration.
//!
//! # Modules
//!
//! - [`storage`] - Key-value storage backends (memory, directory of files)
//! - [`persist`] - Cart slot encoding and the persisting observer
//! - [`checkout`] - Subtotal, shipping, tax and total
//! - [`config`] - Environment-driven settings
//! - [`error`] - Error type for composing the above

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod checkout;
pub mod config;
pub mod error;
pub mod persist;
pub mod storage;

pub use checkout::{CheckoutSummary, PricingPolicy};
pub use config::{AtelierConfig, ConfigError};
pub use error::AppError;
pub use persist::{CartPersistence, DEFAULT_STORAGE_KEY, PersistError};
pub use storage::{FileStorage, KeyValueStorage, MemoryStorage, StorageError};
