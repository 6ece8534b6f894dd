use std::sync::Arc;

use prefstore_core::{RawStore, Result, SharedStore, StoreError};
use tracing::warn;
use wasm_bindgen::JsValue;

/// The page's `localStorage`.
///
/// The storage object is looked up on every call rather than held, so the
/// handle stays valid across navigation and can be built before `window`
/// exists. A missing window, a disabled storage (private browsing) and any
/// exception thrown by the browser, such as `QuotaExceededError`, surface as
/// [`StoreError::Backend`].
#[derive(Debug, Default, Clone, Copy)]
pub struct LocalStorage;

impl LocalStorage {
    pub fn new() -> Self {
        Self
    }

    fn storage(&self) -> Result<web_sys::Storage> {
        let window = web_sys::window().ok_or_else(|| StoreError::backend("no window object"))?;
        window
            .local_storage()
            .map_err(js_error)?
            .ok_or_else(|| StoreError::backend("localStorage is unavailable"))
    }
}

impl RawStore for LocalStorage {
    fn get_item(&self, key: &str) -> Result<Option<String>> {
        self.storage()?.get_item(key).map_err(js_error)
    }

    fn set_item(&self, key: &str, value: &str) -> Result<()> {
        self.storage()?.set_item(key, value).map_err(|e| {
            let err = js_error(e);
            warn!(key, error = %err, "localStorage write rejected");
            err
        })
    }

    fn remove_item(&self, key: &str) -> Result<()> {
        self.storage()?.remove_item(key).map_err(js_error)
    }

    fn keys(&self) -> Result<Vec<String>> {
        let storage = self.storage()?;
        let len = storage.length().map_err(js_error)?;
        let mut keys = Vec::with_capacity(len as usize);
        for index in 0..len {
            if let Some(key) = storage.key(index).map_err(js_error)? {
                keys.push(key);
            }
        }
        keys.sort();
        Ok(keys)
    }
}

/// The page's `localStorage`, shared for use in a storage configuration.
pub fn default_store() -> SharedStore {
    Arc::new(LocalStorage::new())
}

fn js_error(value: JsValue) -> StoreError {
    let message = value
        .as_string()
        .or_else(|| {
            js_sys::Reflect::get(&value, &JsValue::from_str("message"))
                .ok()
                .and_then(|m| m.as_string())
        })
        .unwrap_or_else(|| format!("{value:?}"));
    StoreError::backend(message)
}

#[cfg(test)]
mod tests {
    use prefstore_core::{preference, PreferenceOptions};
    use serde_json::json;
    use wasm_bindgen_test::*;

    use super::*;

    wasm_bindgen_test_configure!(run_in_browser);

    // The page's storage is shared by every test; give each one its own keys.
    fn clear(prefix: &str) {
        let store = LocalStorage::new();
        for key in store.keys().unwrap() {
            if key.starts_with(prefix) {
                store.remove_item(&key).unwrap();
            }
        }
    }

    fn keys_under(prefix: &str) -> Vec<String> {
        LocalStorage::new()
            .keys()
            .unwrap()
            .into_iter()
            .filter(|key| key.starts_with(prefix))
            .collect()
    }

    #[wasm_bindgen_test]
    fn set_get_round_trip() {
        clear("rt:");
        let store = LocalStorage::new();
        assert_eq!(store.get_item("rt:name").unwrap(), None);
        store.set_item("rt:name", "\"Alice\"").unwrap();
        assert_eq!(store.get_item("rt:name").unwrap().as_deref(), Some("\"Alice\""));
        clear("rt:");
    }

    #[wasm_bindgen_test]
    fn remove_deletes_and_tolerates_absent_keys() {
        clear("rm:");
        let store = LocalStorage::new();
        store.set_item("rm:k", "1").unwrap();
        store.remove_item("rm:k").unwrap();
        store.remove_item("rm:k").unwrap();
        assert_eq!(store.get_item("rm:k").unwrap(), None);
    }

    #[wasm_bindgen_test]
    fn keys_are_sorted() {
        clear("keys:");
        let store = LocalStorage::new();
        for key in ["keys:c", "keys:a", "keys:b"] {
            store.set_item(key, "").unwrap();
        }
        assert_eq!(keys_under("keys:"), ["keys:a", "keys:b", "keys:c"]);
        clear("keys:");
    }

    #[wasm_bindgen_test]
    fn preference_over_default_store() {
        clear("web:");
        let pref = preference(
            "theme",
            PreferenceOptions::new()
                .with_storage(default_store())
                .with_namespace("web")
                .with_default_value(json!("light")),
        );
        assert_eq!(pref.get().unwrap(), Some(json!("light")));
        assert!(keys_under("web:").is_empty());

        pref.set(&json!("dark")).unwrap();
        assert_eq!(
            LocalStorage::new().get_item("web:prefstore:theme").unwrap().as_deref(),
            Some("\"dark\"")
        );
        pref.remove().unwrap();
        assert_eq!(pref.get().unwrap(), Some(json!("light")));
    }

    #[wasm_bindgen_test]
    fn js_error_extracts_message() {
        let thrown: JsValue = js_sys::Error::new("QuotaExceededError").into();
        assert!(matches!(
            js_error(thrown),
            StoreError::Backend(ref m) if m == "QuotaExceededError"
        ));

        let plain = JsValue::from_str("plain text");
        assert!(matches!(js_error(plain), StoreError::Backend(ref m) if m == "plain text"));
    }
}
