//! The layered storage chain.
//!
//! A chain starts with a [`BaseStorage`] over a raw store and is wrapped by
//! optional decorators, each owning the layer beneath it:
//!
//! ```text
//! DefaultableStorage     absent -> default, no write-back
//!   NamespaceableStorage   key -> "<namespace>:<key>"
//!     SerializableStorage    T <-> String via the codec
//!       BaseStorage            RawStore::get_item / set_item
//! ```
//!
//! [`StorageFactory::build`] composes a chain from a [`StorageConfig`].

mod base;
mod default;
mod factory;
mod namespace;
mod serialize;

pub use base::BaseStorage;
pub use default::DefaultableStorage;
pub use factory::{StorageConfig, StorageFactory};
pub use namespace::{NamespaceableStorage, KEY_SEPARATOR};
pub use serialize::SerializableStorage;

use crate::error::Result;

/// One decorator in a composed chain, as reported by [`KeyValueStore::layers`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Layer {
    Base,
    Namespaced { namespace: String },
    Serialized,
    Defaulted,
}

/// Key-value access shared by every layer of the chain.
///
/// `V` is the value type a layer hands to its caller: raw `String`s at the
/// base, the decoded `T` above serialization.
pub trait KeyValueStore<V> {
    /// Read the value under `key`. `None` means absent.
    fn get(&self, key: &str) -> Result<Option<V>>;

    /// Write `value` under `key`.
    fn set(&self, key: &str, value: &V) -> Result<()>;

    /// Delete `key`. Deleting an absent key is not an error.
    fn remove(&self, key: &str) -> Result<()>;

    /// The layers of this chain, outermost first.
    fn layers(&self) -> Vec<Layer>;

    /// The value returned for absent keys, if a default layer is on top.
    fn default_value(&self) -> Option<&V> {
        None
    }
}

impl<V, S: KeyValueStore<V> + ?Sized> KeyValueStore<V> for Box<S> {
    fn get(&self, key: &str) -> Result<Option<V>> {
        (**self).get(key)
    }

    fn set(&self, key: &str, value: &V) -> Result<()> {
        (**self).set(key, value)
    }

    fn remove(&self, key: &str) -> Result<()> {
        (**self).remove(key)
    }

    fn layers(&self) -> Vec<Layer> {
        (**self).layers()
    }

    fn default_value(&self) -> Option<&V> {
        (**self).default_value()
    }
}

/// Prepend `outer` to the layers reported by `inner`.
fn stacked<V>(outer: Layer, inner: &impl KeyValueStore<V>) -> Vec<Layer> {
    let mut layers = vec![outer];
    layers.extend(inner.layers());
    layers
}
