use super::{stacked, KeyValueStore, Layer};
use crate::error::Result;

/// Separator between key segments: `<namespace>:<prefix>:<name>`.
pub const KEY_SEPARATOR: char = ':';

/// Prefixes every key with a fixed namespace segment before delegating.
///
/// Only keys change; values pass through untouched, so this layer can sit
/// above or below serialization with the same physical result.
pub struct NamespaceableStorage<S> {
    underlying_storage: S,
    namespace: String,
}

impl<S> NamespaceableStorage<S> {
    pub fn new(underlying_storage: S, namespace: impl Into<String>) -> Self {
        Self {
            underlying_storage,
            namespace: namespace.into(),
        }
    }

    pub fn namespace(&self) -> &str {
        &self.namespace
    }

    pub fn underlying_storage(&self) -> &S {
        &self.underlying_storage
    }

    /// The key handed to the layer beneath for a logical `key`.
    pub fn namespaced_key(&self, key: &str) -> String {
        format!("{}{KEY_SEPARATOR}{key}", self.namespace)
    }
}

impl<V, S: KeyValueStore<V>> KeyValueStore<V> for NamespaceableStorage<S> {
    fn get(&self, key: &str) -> Result<Option<V>> {
        self.underlying_storage.get(&self.namespaced_key(key))
    }

    fn set(&self, key: &str, value: &V) -> Result<()> {
        self.underlying_storage.set(&self.namespaced_key(key), value)
    }

    fn remove(&self, key: &str) -> Result<()> {
        self.underlying_storage.remove(&self.namespaced_key(key))
    }

    fn layers(&self) -> Vec<Layer> {
        stacked(
            Layer::Namespaced {
                namespace: self.namespace.clone(),
            },
            &self.underlying_storage,
        )
    }

    fn default_value(&self) -> Option<&V> {
        self.underlying_storage.default_value()
    }
}
