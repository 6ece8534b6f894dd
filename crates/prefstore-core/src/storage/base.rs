use tracing::debug;

use super::{KeyValueStore, Layer};
use crate::error::Result;
use crate::raw::{RawStore, SharedStore};

/// The innermost layer: passes string keys and values straight to a raw store.
///
/// No transformation happens here. Errors raised by the raw store (quota,
/// I/O, browser exceptions) propagate untouched.
pub struct BaseStorage<R = SharedStore> {
    underlying_storage: R,
}

impl<R: RawStore> BaseStorage<R> {
    pub fn new(underlying_storage: R) -> Self {
        Self { underlying_storage }
    }

    pub fn underlying_storage(&self) -> &R {
        &self.underlying_storage
    }
}

impl<R: RawStore> KeyValueStore<String> for BaseStorage<R> {
    fn get(&self, key: &str) -> Result<Option<String>> {
        let value = self.underlying_storage.get_item(key)?;
        debug!(key, found = value.is_some(), "storage read");
        Ok(value)
    }

    fn set(&self, key: &str, value: &String) -> Result<()> {
        debug!(key, bytes = value.len(), "storage write");
        self.underlying_storage.set_item(key, value)
    }

    fn remove(&self, key: &str) -> Result<()> {
        debug!(key, "storage remove");
        self.underlying_storage.remove_item(key)
    }

    fn layers(&self) -> Vec<Layer> {
        vec![Layer::Base]
    }
}
