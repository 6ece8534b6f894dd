//! Layered preference storage over a localStorage-like key-value store.
//!
//! A raw store keeps strings under string keys. On top of it sits a chain of
//! decorators for namespacing, serialization and defaults, composed by
//! [`StorageFactory`]. [`preference`] wraps a chain around a single key.
//!
//! ```
//! use prefstore_core::{preference, MemoryStore, PreferenceOptions, RawStore};
//!
//! let store = MemoryStore::shared();
//! let name = preference(
//!     "firstName",
//!     PreferenceOptions::new()
//!         .with_storage(store.clone())
//!         .with_default_value("guest".to_string()),
//! );
//!
//! assert_eq!(name.get().unwrap().as_deref(), Some("guest"));
//! name.set(&"Alice".to_string()).unwrap();
//! assert_eq!(store.get_item("prefstore:firstName").unwrap().as_deref(), Some("\"Alice\""));
//! ```

pub mod codec;
pub mod error;
pub mod memory;
pub mod preference;
pub mod raw;
pub mod storage;

pub use codec::{Deserializer, Serializer};
pub use error::{CodecError, Result, StoreError};
pub use memory::{default_store, MemoryStore};
pub use preference::{preference, Preference, PreferenceOptions, DEFAULT_STORAGE_PREFIX};
pub use raw::{RawStore, SharedStore};
pub use storage::{
    BaseStorage, DefaultableStorage, KeyValueStore, Layer, NamespaceableStorage,
    SerializableStorage, StorageConfig, StorageFactory, KEY_SEPARATOR,
};
