//! Integration tests for the persisted cart slot.
//!
//! Each test builds a store the way the CLI does (persistence first, then
//! `into_store`), mutates it, and then reinitializes a second store from the
//! same slot.

#![allow(clippy::unwrap_used, clippy::indexing_slicing)]

use std::fs;

use atelier_core::CartStore;
use atelier_integration_tests::{product, scratch_dir};
use atelier_storefront::{
    CartPersistence, DEFAULT_STORAGE_KEY, FileStorage, KeyValueStorage, MemoryStorage,
};
use rust_decimal::Decimal;

fn snapshot(store: &CartStore) -> Vec<(String, i64)> {
    store
        .items()
        .iter()
        .map(|item| (item.product.id.to_string(), item.quantity))
        .collect()
}

// =============================================================================
// Round Trips
// =============================================================================

#[test]
fn test_memory_round_trip_preserves_order_and_quantities() {
    let storage = MemoryStorage::new();

    let mut store = CartPersistence::with_default_key(storage.clone()).into_store();
    store.add_item(product("A", 10), 2);
    store.add_item(product("B", 5), 1);
    store.add_item(product("A", 10), 3);
    store.update_quantity("B", 0);
    let before = store.cart().clone();
    drop(store);

    let restored = CartPersistence::with_default_key(storage).into_store();
    assert_eq!(restored.cart(), &before);
    assert_eq!(
        snapshot(&restored),
        vec![("A".to_string(), 5), ("B".to_string(), 0)]
    );
    assert_eq!(restored.total_price(), Decimal::new(50, 0));
}

#[test]
fn test_file_round_trip_across_reinitialization() {
    let dir = scratch_dir("round-trip");

    {
        let mut store =
            CartPersistence::new(FileStorage::new(&dir), DEFAULT_STORAGE_KEY).into_store();
        store.add_item(product("canvas", 60), 2);
        store.add_item(product("brushes", 30), 3);
    }

    let restored = CartPersistence::new(FileStorage::new(&dir), DEFAULT_STORAGE_KEY).into_store();
    assert_eq!(
        snapshot(&restored),
        vec![("canvas".to_string(), 2), ("brushes".to_string(), 3)]
    );
    let canvas = &restored.items()[0].product;
    assert_eq!(canvas.category, "Prints");
    assert_eq!(canvas.images.len(), 1);

    fs::remove_dir_all(&dir).unwrap();
}

#[test]
fn test_restored_store_keeps_persisting() {
    let storage = MemoryStorage::new();
    CartPersistence::with_default_key(storage.clone())
        .into_store()
        .add_item(product("A", 10), 1);

    let mut second = CartPersistence::with_default_key(storage.clone()).into_store();
    second.add_item(product("A", 10), 1);
    second.remove_item("missing");

    let third = CartPersistence::with_default_key(storage).into_store();
    assert_eq!(snapshot(&third), vec![("A".to_string(), 2)]);
}

#[test]
fn test_clear_is_persisted() {
    let storage = MemoryStorage::new();
    let mut store = CartPersistence::with_default_key(storage.clone()).into_store();
    store.add_item(product("A", 10), 1);
    store.clear();

    let raw = storage.get_item(DEFAULT_STORAGE_KEY).unwrap().unwrap();
    let value: serde_json::Value = serde_json::from_str(&raw).unwrap();
    assert_eq!(value["state"]["items"], serde_json::json!([]));

    let restored = CartPersistence::with_default_key(storage).into_store();
    assert_eq!(restored.total_items(), 0);
}

#[test]
fn test_separate_keys_are_independent() {
    let storage = MemoryStorage::new();
    let mut guest = CartPersistence::new(storage.clone(), "guest-cart").into_store();
    guest.add_item(product("A", 10), 1);

    let other = CartPersistence::new(storage, "member-cart").into_store();
    assert!(other.items().is_empty());
}

// =============================================================================
// Recovery From Bad Slot Contents
// =============================================================================

#[test]
fn test_corrupt_file_starts_empty_and_is_overwritten() {
    let dir = scratch_dir("corrupt");
    fs::create_dir_all(&dir).unwrap();
    fs::write(dir.join("cart-storage.json"), "{ this is not json").unwrap();

    let mut store = CartPersistence::new(FileStorage::new(&dir), DEFAULT_STORAGE_KEY).into_store();
    assert!(store.items().is_empty());

    store.add_item(product("A", 10), 1);
    let restored = CartPersistence::new(FileStorage::new(&dir), DEFAULT_STORAGE_KEY).into_store();
    assert_eq!(snapshot(&restored), vec![("A".to_string(), 1)]);

    fs::remove_dir_all(&dir).unwrap();
}

#[test]
fn test_partially_bad_slot_keeps_valid_items() {
    let mut storage = MemoryStorage::new();
    storage
        .set_item(
            DEFAULT_STORAGE_KEY,
            r#"{"state":{"items":[
                {"product":{"id":"A","name":"A","description":"","price":10,"images":[],"category":""},"quantity":5},
                {"product":null,"quantity":1},
                {"product":{"id":"B","name":"B","price":"5"},"quantity":1}
            ]},"version":0}"#,
        )
        .unwrap();

    let store = CartPersistence::with_default_key(storage).into_store();
    assert_eq!(
        snapshot(&store),
        vec![("A".to_string(), 5), ("B".to_string(), 1)]
    );
    assert_eq!(store.total_price(), Decimal::new(55, 0));
}

#[test]
fn test_slot_from_other_version_is_ignored() {
    let mut storage = MemoryStorage::new();
    storage
        .set_item(
            DEFAULT_STORAGE_KEY,
            r#"{"state":{"items":[{"product":{"id":"A","name":"A","price":"1"},"quantity":1}]},"version":1}"#,
        )
        .unwrap();

    let store = CartPersistence::with_default_key(storage).into_store();
    assert!(store.items().is_empty());
}
