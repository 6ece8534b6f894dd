//! Single-key preference handles.

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::codec::{Deserializer, Serializer};
use crate::error::Result;
use crate::raw::SharedStore;
use crate::storage::{KeyValueStore, Layer, StorageConfig, StorageFactory, KEY_SEPARATOR};

/// Prefix segment shared by every key written through [`preference`].
pub const DEFAULT_STORAGE_PREFIX: &str = "prefstore";

/// Options accepted by [`preference`]. All optional.
pub struct PreferenceOptions<T> {
    pub default_value: Option<T>,
    pub namespace: Option<String>,
    pub storage: Option<SharedStore>,
    pub serializer: Option<Serializer<T>>,
    pub deserializer: Option<Deserializer<T>>,
}

impl<T> Default for PreferenceOptions<T> {
    fn default() -> Self {
        Self {
            default_value: None,
            namespace: None,
            storage: None,
            serializer: None,
            deserializer: None,
        }
    }
}

impl<T> PreferenceOptions<T> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_default_value(mut self, default_value: T) -> Self {
        self.default_value = Some(default_value);
        self
    }

    pub fn with_namespace(mut self, namespace: impl Into<String>) -> Self {
        self.namespace = Some(namespace.into());
        self
    }

    pub fn with_storage(mut self, storage: SharedStore) -> Self {
        self.storage = Some(storage);
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
}

impl<T> From<PreferenceOptions<T>> for StorageConfig<T> {
    fn from(options: PreferenceOptions<T>) -> Self {
        StorageConfig {
            storage: options.storage,
            namespace: options.namespace,
            serializer: options.serializer,
            deserializer: options.deserializer,
            default: options.default_value,
        }
    }
}

/// A handle to one stored value.
///
/// The handle holds no value of its own; every `get` reads through the chain
/// to the raw store.
pub struct Preference<T> {
    key: String,
    storage: Box<dyn KeyValueStore<T>>,
}

impl<T> Preference<T> {
    pub fn get(&self) -> Result<Option<T>> {
        self.storage.get(&self.key)
    }

    pub fn set(&self, value: &T) -> Result<()> {
        self.storage.set(&self.key, value)
    }

    /// Delete the stored value. A configured default applies again afterwards.
    pub fn remove(&self) -> Result<()> {
        self.storage.remove(&self.key)
    }

    /// The logical key handed to the chain: `<prefix>:<name>`.
    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn layers(&self) -> Vec<Layer> {
        self.storage.layers()
    }

    /// The configured default, if any.
    pub fn default_value(&self) -> Option<&T> {
        self.storage.default_value()
    }
}

/// Build a handle for the preference called `name`.
///
/// The physical key is `[<namespace>:]<DEFAULT_STORAGE_PREFIX>:<name>`, so one
/// preference always maps to exactly one raw-store entry.
pub fn preference<T>(name: &str, options: PreferenceOptions<T>) -> Preference<T>
where
    T: Serialize + DeserializeOwned + Clone + 'static,
{
    Preference {
        key: format!("{DEFAULT_STORAGE_PREFIX}{KEY_SEPARATOR}{name}"),
        storage: StorageFactory::build(options.into()),
    }
}

#[cfg(test)]
mod tests {
    use serde_json::{json, Value};

    use super::*;
    use crate::memory::MemoryStore;
    use crate::raw::RawStore;

    #[test]
    fn key_combines_prefix_and_name() {
        let pref = preference::<Value>(
            "firstName",
            PreferenceOptions::new().with_storage(MemoryStore::shared()),
        );
        assert_eq!(pref.key(), "prefstore:firstName");
    }

    #[test]
    fn namespace_is_outermost_segment() {
        let raw = MemoryStore::shared();
        let pref = preference(
            "theme",
            PreferenceOptions::new()
                .with_storage(raw.clone())
                .with_namespace("settings"),
        );
        pref.set(&json!("dark")).unwrap();
        assert_eq!(raw.keys().unwrap(), ["settings:prefstore:theme"]);
    }

    #[test]
    fn handle_reports_chain_and_default() {
        let bare = preference::<Value>(
            "plain",
            PreferenceOptions::new().with_storage(MemoryStore::shared()),
        );
        assert_eq!(bare.layers(), [Layer::Serialized, Layer::Base]);
        assert_eq!(bare.default_value(), None);

        let full = preference(
            "volume",
            PreferenceOptions::new()
                .with_storage(MemoryStore::shared())
                .with_namespace("audio")
                .with_default_value(json!(0)),
        );
        assert_eq!(
            full.layers(),
            [
                Layer::Defaulted,
                Layer::Namespaced { namespace: "audio".into() },
                Layer::Serialized,
                Layer::Base,
            ]
        );
        assert_eq!(full.default_value(), Some(&json!(0)));
    }

    #[test]
    fn options_map_onto_storage_config() {
        let config: StorageConfig<Value> = PreferenceOptions::new()
            .with_default_value(json!(1))
            .with_namespace("ns")
            .into();
        assert_eq!(config.default, Some(json!(1)));
        assert_eq!(config.namespace.as_deref(), Some("ns"));
        assert!(config.storage.is_none());
    }
}
