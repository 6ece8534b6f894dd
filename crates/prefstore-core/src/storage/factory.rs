use serde::de::DeserializeOwned;
use serde::Serialize;

use super::{
    BaseStorage, DefaultableStorage, KeyValueStore, NamespaceableStorage, SerializableStorage,
};
use crate::codec::{json_deserializer, json_serializer, Deserializer, Serializer};
use crate::memory::default_store;
use crate::raw::SharedStore;

/// Which layers to compose, and how to configure them.
///
/// Every field is optional. A missing field never errors; it selects the
/// fallback instead:
///
/// | field          | fallback                                 |
/// |----------------|------------------------------------------|
/// | `storage`      | [`default_store`], shared process-wide   |
/// | `namespace`    | no namespace layer                       |
/// | `serializer`   | JSON                                     |
/// | `deserializer` | JSON                                     |
/// | `default`      | no default layer                         |
pub struct StorageConfig<T> {
    pub storage: Option<SharedStore>,
    pub namespace: Option<String>,
    pub serializer: Option<Serializer<T>>,
    pub deserializer: Option<Deserializer<T>>,
    /// A default returned for absent keys. Any `Some` counts, including
    /// `0`, `false`, `""` or JSON `null`; only `None` means "no default".
    pub default: Option<T>,
}

impl<T> Default for StorageConfig<T> {
    fn default() -> Self {
        Self {
            storage: None,
            namespace: None,
            serializer: None,
            deserializer: None,
            default: None,
        }
    }
}

impl<T> StorageConfig<T> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_storage(mut self, storage: SharedStore) -> Self {
        self.storage = Some(storage);
        self
    }

    pub fn with_namespace(mut self, namespace: impl Into<String>) -> Self {
        self.namespace = Some(namespace.into());
        self
    }

    pub fn with_serializer(mut self, serializer: Serializer<T>) -> Self {
        self.serializer = Some(serializer);
        self
    }

    pub fn with_deserializer(mut self, deserializer: Deserializer<T>) -> Self {
        self.deserializer = Some(deserializer);
        self
    }

    pub fn with_default(mut self, default: T) -> Self {
        self.default = Some(default);
        self
    }
}

/// Composes storage chains from a [`StorageConfig`].
pub struct StorageFactory;

impl StorageFactory {
    /// Build a chain and return its outermost layer.
    ///
    /// Layers, innermost first:
    ///
    /// 1. [`BaseStorage`] over `storage`, or the process-wide default store.
    /// 2. [`SerializableStorage`], always. Missing codec halves fall back to
    ///    JSON independently, so a custom serializer can pair with the JSON
    ///    deserializer and vice versa.
    /// 3. [`NamespaceableStorage`] when `namespace` is set.
    /// 4. [`DefaultableStorage`] when `default` is set.
    pub fn build<T>(config: StorageConfig<T>) -> Box<dyn KeyValueStore<T>>
    where
        T: Serialize + DeserializeOwned + Clone + 'static,
    {
        let StorageConfig {
            storage,
            namespace,
            serializer,
            deserializer,
            default,
        } = config;

        let base = BaseStorage::new(storage.unwrap_or_else(default_store));
        let mut storage: Box<dyn KeyValueStore<T>> = Box::new(SerializableStorage::new(
            base,
            serializer.unwrap_or_else(json_serializer),
            deserializer.unwrap_or_else(json_deserializer),
        ));

        if let Some(namespace) = namespace {
            storage = Box::new(NamespaceableStorage::new(storage, namespace));
        }

        if let Some(default) = default {
            storage = Box::new(DefaultableStorage::new(storage, default));
        }

        storage
    }
}
