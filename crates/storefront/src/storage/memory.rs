use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use super::{KeyValueStorage, StorageError, validate_key};

/// In-process storage.
///
/// Clones share the same map, so a test can hand one clone to the cart's
/// persistence observer and inspect the slot through another.
#[derive(Debug, Clone, Default)]
pub struct MemoryStorage {
    slots: Rc<RefCell<HashMap<String, String>>>,
}

impl MemoryStorage {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of occupied slots.
    #[must_use]
    pub fn len(&self) -> usize {
        self.slots.borrow().len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.slots.borrow().is_empty()
    }
}

impl KeyValueStorage for MemoryStorage {
    fn get_item(&self, key: &str) -> Result<Option<String>, StorageError> {
        validate_key(key)?;
        Ok(self.slots.borrow().get(key).cloned())
    }

    fn set_item(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        validate_key(key)?;
        self.slots
            .borrow_mut()
            .insert(key.to_owned(), value.to_owned());
        Ok(())
    }

    fn remove_item(&mut self, key: &str) -> Result<(), StorageError> {
        validate_key(key)?;
        self.slots.borrow_mut().remove(key);
        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_set_get_remove() {
        let mut storage = MemoryStorage::new();
        assert_eq!(storage.get_item("cart-storage").unwrap(), None);

        storage.set_item("cart-storage", "{}").unwrap();
        assert_eq!(
            storage.get_item("cart-storage").unwrap().as_deref(),
            Some("{}")
        );

        storage.remove_item("cart-storage").unwrap();
        storage.remove_item("cart-storage").unwrap();
        assert!(storage.is_empty());
    }

    #[test]
    fn test_clones_share_slots() {
        let storage = MemoryStorage::new();
        let mut writer = storage.clone();
        writer.set_item("k", "v").unwrap();

        assert_eq!(storage.get_item("k").unwrap().as_deref(), Some("v"));
        assert_eq!(storage.len(), 1);
    }
}
