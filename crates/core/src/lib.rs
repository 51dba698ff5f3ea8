//! Atelier Core - cart aggregate and shared types.
//!
//! This crate provides the domain types used across all Atelier components:
//! - `storefront` - Persisted cart slot, storage backends, checkout summary
//! - `cli` - Command-line front end that owns the cart store
//!
//! # Architecture
//!
//! The core crate contains only types, traits and pure state logic - no file
//! access, no serialization side effects. The [`CartStore`] announces every
//! change through [`CartObserver`]s; anything that wants to persist the cart
//! subscribes one.
//!
//! # Modules
//!
//! - [`types`] - Newtype wrappers for product IDs, prices and product snapshots
//! - [`cart`] - The cart aggregate, its items, change events and observers

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod cart;
pub mod types;

pub use cart::{Cart, CartEvent, CartItem, CartObserver, CartStore, Quantity, SubscriptionId};
pub use types::*;
