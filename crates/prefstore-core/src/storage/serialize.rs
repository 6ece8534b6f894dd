use serde::de::DeserializeOwned;
use serde::Serialize;

use super::{stacked, KeyValueStore, Layer};
use crate::codec::{json_deserializer, json_serializer, Deserializer, Serializer};
use crate::error::{Result, StoreError};

/// Converts between values of `T` and the strings stored beneath.
///
/// Writes run the serializer and store its output. Reads run the
/// deserializer only on present values; an absent key stays `None` without
/// touching the codec. Decode failures are returned to the caller, never
/// treated as absence.
pub struct SerializableStorage<T, S> {
    underlying_storage: S,
    serializer: Serializer<T>,
    deserializer: Deserializer<T>,
}

impl<T, S: KeyValueStore<String>> SerializableStorage<T, S> {
    pub fn new(
        underlying_storage: S,
        serializer: Serializer<T>,
        deserializer: Deserializer<T>,
    ) -> Self {
        Self {
            underlying_storage,
            serializer,
            deserializer,
        }
    }

    /// A layer using the JSON codec.
    pub fn json(underlying_storage: S) -> Self
    where
        T: Serialize + DeserializeOwned + 'static,
    {
        Self::new(underlying_storage, json_serializer(), json_deserializer())
    }

    pub fn serializer(&self) -> &Serializer<T> {
        &self.serializer
    }

    pub fn deserializer(&self) -> &Deserializer<T> {
        &self.deserializer
    }

    pub fn underlying_storage(&self) -> &S {
        &self.underlying_storage
    }
}

impl<T, S: KeyValueStore<String>> KeyValueStore<T> for SerializableStorage<T, S> {
    fn get(&self, key: &str) -> Result<Option<T>> {
        let Some(raw) = self.underlying_storage.get(key)? else {
            return Ok(None);
        };
        (self.deserializer)(&raw)
            .map(Some)
            .map_err(|source| StoreError::Decode {
                key: key.to_string(),
                source,
            })
    }

    fn set(&self, key: &str, value: &T) -> Result<()> {
        let raw = (self.serializer)(value).map_err(|source| StoreError::Encode {
            key: key.to_string(),
            source,
        })?;
        self.underlying_storage.set(key, &raw)
    }

    fn remove(&self, key: &str) -> Result<()> {
        self.underlying_storage.remove(key)
    }

    fn layers(&self) -> Vec<Layer> {
        stacked(Layer::Serialized, &self.underlying_storage)
    }
}
