//! Process-local storage adapter.

use super::{KeyValueStore, StorageResult};
use std::cell::RefCell;
use std::collections::BTreeMap;

/// In-memory key-value store; contents live as long as the value.
///
/// Borrow it (`&MemoryKeyValueStore`) to share one backing map across
/// preference store instances, e.g. to simulate a restart.
#[derive(Debug, Default)]
pub struct MemoryKeyValueStore {
    entries: RefCell<BTreeMap<String, String>>,
}

impl MemoryKeyValueStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.borrow().is_empty()
    }
}

impl KeyValueStore for MemoryKeyValueStore {
    fn get(&self, key: &str) -> StorageResult<Option<String>> {
        Ok(self.entries.borrow().get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> StorageResult<()> {
        self.entries
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> StorageResult<()> {
        self.entries.borrow_mut().remove(key);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::MemoryKeyValueStore;
    use crate::storage::KeyValueStore;

    #[test]
    fn set_get_remove_roundtrip() {
        let store = MemoryKeyValueStore::new();
        assert_eq!(store.get("k").unwrap(), None);

        store.set("k", "v1").unwrap();
        store.set("k", "v2").unwrap();
        assert_eq!(store.get("k").unwrap().as_deref(), Some("v2"));
        assert_eq!(store.len(), 1);

        store.remove("k").unwrap();
        assert!(store.is_empty());
        store.remove("k").expect("removing a missing key is a no-op");
    }
}
