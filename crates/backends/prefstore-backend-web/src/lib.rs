//! Browser `window.localStorage` as a prefstore raw store.
//!
//! Only functional on `wasm32`. On other targets the crate builds empty so
//! the workspace still compiles natively.

#[cfg(target_arch = "wasm32")]
mod local_storage;

#[cfg(target_arch = "wasm32")]
pub use local_storage::{default_store, LocalStorage};
