use super::{stacked, KeyValueStore, Layer};
use crate::error::Result;

/// Answers reads of absent keys with a fixed default value.
///
/// The default is returned, never stored: after any number of reads the key
/// is still absent underneath until an explicit `set`. Only absence is
/// defaulted; errors from below (including decode errors) pass through.
pub struct DefaultableStorage<T, S> {
    underlying_storage: S,
    default_value: T,
}

impl<T, S> DefaultableStorage<T, S> {
    pub fn new(underlying_storage: S, default_value: T) -> Self {
        Self {
            underlying_storage,
            default_value,
        }
    }

    pub fn default_value(&self) -> &T {
        &self.default_value
    }

    pub fn underlying_storage(&self) -> &S {
        &self.underlying_storage
    }
}

impl<T: Clone, S: KeyValueStore<T>> KeyValueStore<T> for DefaultableStorage<T, S> {
    fn get(&self, key: &str) -> Result<Option<T>> {
        Ok(Some(
            self.underlying_storage
                .get(key)?
                .unwrap_or_else(|| self.default_value.clone()),
        ))
    }

    fn set(&self, key: &str, value: &T) -> Result<()> {
        self.underlying_storage.set(key, value)
    }

    fn remove(&self, key: &str) -> Result<()> {
        self.underlying_storage.remove(key)
    }

    fn layers(&self) -> Vec<Layer> {
        stacked(Layer::Defaulted, &self.underlying_storage)
    }

    fn default_value(&self) -> Option<&T> {
        Some(&self.default_value)
    }
}
