//! The raw key-value store contract.

use std::sync::Arc;

use crate::error::Result;

/// Raw string storage: the localStorage-shaped surface every backend exposes.
///
/// The contract stores plain strings. Serialization, namespacing and defaults
/// are layered on top by the storage chain, never by the backend.
///
/// Implementations: in-memory map, JSON file on disk, browser localStorage.
pub trait RawStore {
    /// Read the string stored under `key`. Returns `None` if not found.
    fn get_item(&self, key: &str) -> Result<Option<String>>;

    /// Write `value` under `key`, replacing any previous value.
    fn set_item(&self, key: &str, value: &str) -> Result<()>;

    /// Remove `key`. Removing a missing key is not an error.
    fn remove_item(&self, key: &str) -> Result<()>;

    /// All physical keys currently stored, sorted.
    fn keys(&self) -> Result<Vec<String>>;
}

/// A raw store shared between every chain built on top of it.
pub type SharedStore = Arc<dyn RawStore>;

impl<R: RawStore + ?Sized> RawStore for Arc<R> {
    fn get_item(&self, key: &str) -> Result<Option<String>> {
        (**self).get_item(key)
    }

    fn set_item(&self, key: &str, value: &str) -> Result<()> {
        (**self).set_item(key, value)
    }

    fn remove_item(&self, key: &str) -> Result<()> {
        (**self).remove_item(key)
    }

    fn keys(&self) -> Result<Vec<String>> {
        (**self).keys()
    }
}

impl<R: RawStore + ?Sized> RawStore for &R {
    fn get_item(&self, key: &str) -> Result<Option<String>> {
        (**self).get_item(key)
    }

    fn set_item(&self, key: &str, value: &str) -> Result<()> {
        (**self).set_item(key, value)
    }

    fn remove_item(&self, key: &str) -> Result<()> {
        (**self).remove_item(key)
    }

    fn keys(&self) -> Result<Vec<String>> {
        (**self).keys()
    }
}
