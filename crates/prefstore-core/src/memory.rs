//! In-memory raw store.

use std::collections::BTreeMap;
use std::sync::{Arc, OnceLock, PoisonError, RwLock};

use crate::error::{Result, StoreError};
use crate::raw::{RawStore, SharedStore};

/// An ordered in-memory map implementing [`RawStore`].
///
/// Optionally enforces a byte quota the way browser storage does: the quota
/// counts the UTF-8 length of every key and value. A write that would exceed
/// it fails with [`StoreError::QuotaExceeded`] and leaves the store unchanged.
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: RwLock<BTreeMap<String, String>>,
    quota: Option<usize>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// A store that rejects writes once `limit` bytes are in use.
    pub fn with_quota(limit: usize) -> Self {
        Self {
            entries: RwLock::default(),
            quota: Some(limit),
        }
    }

    /// Wrap in an `Arc` so several chains can share it.
    pub fn shared() -> Arc<Self> {
        Arc::new(Self::new())
    }

    pub fn len(&self) -> usize {
        self.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.read().is_empty()
    }

    /// Bytes in use, as counted against the quota.
    pub fn used_bytes(&self) -> usize {
        self.read().iter().map(|(k, v)| k.len() + v.len()).sum()
    }

    pub fn clear(&self) {
        self.write().clear();
    }

    // A poisoned lock only means another caller panicked mid-call; the map
    // itself is never left half-updated, so keep using it.
    fn read(&self) -> std::sync::RwLockReadGuard<'_, BTreeMap<String, String>> {
        self.entries.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> std::sync::RwLockWriteGuard<'_, BTreeMap<String, String>> {
        self.entries.write().unwrap_or_else(PoisonError::into_inner)
    }
}

impl RawStore for MemoryStore {
    fn get_item(&self, key: &str) -> Result<Option<String>> {
        Ok(self.read().get(key).cloned())
    }

    fn set_item(&self, key: &str, value: &str) -> Result<()> {
        let mut entries = self.write();
        if let Some(limit) = self.quota {
            let used: usize = entries
                .iter()
                .filter(|(k, _)| k.as_str() != key)
                .map(|(k, v)| k.len() + v.len())
                .sum();
            if used + key.len() + value.len() > limit {
                return Err(StoreError::QuotaExceeded {
                    key: key.to_string(),
                    limit,
                });
            }
        }
        entries.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove_item(&self, key: &str) -> Result<()> {
        self.write().remove(key);
        Ok(())
    }

    fn keys(&self) -> Result<Vec<String>> {
        Ok(self.read().keys().cloned().collect())
    }
}

/// The process-wide store used when a configuration names no storage.
///
/// Every call returns a handle to the same map, so values written through one
/// chain are visible to every other chain built without explicit storage for
/// the rest of the process.
pub fn default_store() -> SharedStore {
    static STORE: OnceLock<Arc<MemoryStore>> = OnceLock::new();
    STORE.get_or_init(MemoryStore::shared).clone()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_key_is_none() {
        let store = MemoryStore::new();
        assert_eq!(store.get_item("nope").unwrap(), None);
    }

    #[test]
    fn set_get_remove() {
        let store = MemoryStore::new();
        store.set_item("a", "1").unwrap();
        assert_eq!(store.get_item("a").unwrap().as_deref(), Some("1"));
        store.set_item("a", "2").unwrap();
        assert_eq!(store.get_item("a").unwrap().as_deref(), Some("2"));
        store.remove_item("a").unwrap();
        assert_eq!(store.get_item("a").unwrap(), None);
        // Removing again is fine.
        store.remove_item("a").unwrap();
    }

    #[test]
    fn keys_are_sorted() {
        let store = MemoryStore::new();
        store.set_item("b", "").unwrap();
        store.set_item("a", "").unwrap();
        store.set_item("c", "").unwrap();
        assert_eq!(store.keys().unwrap(), ["a", "b", "c"]);
    }

    #[test]
    fn quota_rejects_oversized_write() {
        let store = MemoryStore::with_quota(8);
        store.set_item("ab", "cdef").unwrap(); // 6 bytes
        let err = store.set_item("x", "yz").unwrap_err(); // would be 9
        assert!(matches!(err, StoreError::QuotaExceeded { limit: 8, ref key } if key == "x"));
        assert_eq!(store.get_item("x").unwrap(), None);
        assert_eq!(store.used_bytes(), 6);
    }

    #[test]
    fn quota_counts_replacement_not_addition() {
        let store = MemoryStore::with_quota(8);
        store.set_item("ab", "cdef").unwrap();
        // Replacing the same key frees its old bytes first.
        store.set_item("ab", "cdefgh").unwrap();
        assert_eq!(store.used_bytes(), 8);
    }

    #[test]
    fn len_and_clear() {
        let store = MemoryStore::with_quota(8);
        store.set_item("a", "1").unwrap();
        store.set_item("b", "2").unwrap();
        assert_eq!(store.len(), 2);

        store.clear();
        assert_eq!(store.len(), 0);
        assert!(store.is_empty());
        // Cleared bytes are available to the quota again.
        store.set_item("abc", "defgh").unwrap();
        assert_eq!(store.used_bytes(), 8);
    }

    #[test]
    fn default_store_is_shared() {
        let a = default_store();
        let b = default_store();
        a.set_item("memory::default_store_is_shared", "v").unwrap();
        assert_eq!(
            b.get_item("memory::default_store_is_shared").unwrap().as_deref(),
            Some("v")
        );
    }
}
