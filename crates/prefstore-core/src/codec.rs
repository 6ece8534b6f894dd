//! Serializer/deserializer pairs.

use std::sync::Arc;

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::error::CodecError;

/// Encodes an in-memory value into its stored string form.
pub type Serializer<T> = Arc<dyn Fn(&T) -> Result<String, CodecError>>;

/// Decodes a stored string back into a value.
pub type Deserializer<T> = Arc<dyn Fn(&str) -> Result<T, CodecError>>;

/// Wrap a closure as a [`Serializer`].
pub fn serializer<T: 'static, F>(f: F) -> Serializer<T>
where
    F: Fn(&T) -> Result<String, CodecError> + 'static,
{
    Arc::new(f)
}

/// Wrap a closure as a [`Deserializer`].
pub fn deserializer<T: 'static, F>(f: F) -> Deserializer<T>
where
    F: Fn(&str) -> Result<T, CodecError> + 'static,
{
    Arc::new(f)
}

/// JSON encoding via `serde_json`, the default serializer.
pub fn json_serializer<T: Serialize + 'static>() -> Serializer<T> {
    Arc::new(|value: &T| serde_json::to_string(value).map_err(CodecError::from))
}

/// JSON decoding via `serde_json`, the default deserializer.
pub fn json_deserializer<T: DeserializeOwned + 'static>() -> Deserializer<T> {
    Arc::new(|raw: &str| serde_json::from_str::<T>(raw).map_err(CodecError::from))
}
