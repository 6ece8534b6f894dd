use anyhow::{Context, Result};
use prefstore_core::{preference, PreferenceOptions, SharedStore};
use serde_json::Value;

use crate::Command;

/// Execute `command` against `store`, returning the lines to print.
pub(crate) fn run(
    command: &Command,
    namespace: Option<&str>,
    store: SharedStore,
) -> Result<Vec<String>> {
    match command {
        Command::Get { name, default } => {
            let mut opts = options(namespace, store);
            if let Some(default) = default {
                opts = opts.with_default_value(parse_value(default));
            }
            let value = preference(name, opts)
                .get()
                .with_context(|| format!("failed to read preference {name:?}"))?;
            Ok(value.map(|v| v.to_string()).into_iter().collect())
        }
        Command::Set { name, value } => {
            preference(name, options(namespace, store))
                .set(&parse_value(value))
                .with_context(|| format!("failed to write preference {name:?}"))?;
            Ok(Vec::new())
        }
        Command::Remove { name } => {
            preference::<Value>(name, options(namespace, store))
                .remove()
                .with_context(|| format!("failed to remove preference {name:?}"))?;
            Ok(Vec::new())
        }
        Command::List => store.keys().context("failed to list keys"),
    }
}

fn options(namespace: Option<&str>, store: SharedStore) -> PreferenceOptions<Value> {
    let options = PreferenceOptions::new().with_storage(store);
    match namespace {
        Some(ns) => options.with_namespace(ns),
        None => options,
    }
}

/// Parse a command-line value as JSON. Anything that is not valid JSON is
/// taken as a plain string, so `set name Alice` stores `"Alice"`.
fn parse_value(raw: &str) -> Value {
    serde_json::from_str(raw).unwrap_or_else(|_| Value::String(raw.to_string()))
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use prefstore_core::{MemoryStore, RawStore};
    use serde_json::json;

    use super::*;

    fn set(name: &str, value: &str) -> Command {
        Command::Set { name: name.into(), value: value.into() }
    }

    fn get(name: &str, default: Option<&str>) -> Command {
        Command::Get { name: name.into(), default: default.map(Into::into) }
    }

    #[test]
    fn parse_value_accepts_json_or_string() {
        assert_eq!(parse_value("42"), json!(42));
        assert_eq!(parse_value("[1,2]"), json!([1, 2]));
        assert_eq!(parse_value("\"quoted\""), json!("quoted"));
        assert_eq!(parse_value("Alice"), json!("Alice"));
        assert_eq!(parse_value("{broken"), json!("{broken"));
    }

    #[test]
    fn set_then_get() {
        let store = MemoryStore::shared();
        run(&set("firstName", "Alice"), None, store.clone()).unwrap();
        assert_eq!(
            store.get_item("prefstore:firstName").unwrap().as_deref(),
            Some("\"Alice\"")
        );
        let out = run(&get("firstName", None), None, store.clone()).unwrap();
        assert_eq!(out, ["\"Alice\""]);
    }

    #[test]
    fn get_unset_prints_nothing_or_default() {
        let store = MemoryStore::shared();
        assert!(run(&get("volume", None), None, store.clone()).unwrap().is_empty());
        let out = run(&get("volume", Some("11")), None, store.clone()).unwrap();
        assert_eq!(out, ["11"]);
        // The default was not written.
        assert!(store.is_empty());
    }

    #[test]
    fn namespace_and_list() {
        let store = MemoryStore::shared();
        run(&set("theme", "dark"), Some("user"), store.clone()).unwrap();
        run(&set("theme", "light"), None, store.clone()).unwrap();
        let keys = run(&Command::List, None, store.clone()).unwrap();
        assert_eq!(keys, ["prefstore:theme", "user:prefstore:theme"]);
    }

    #[test]
    fn remove_deletes_entry() {
        let store = MemoryStore::shared();
        run(&set("theme", "dark"), None, store.clone()).unwrap();
        run(&Command::Remove { name: "theme".into() }, None, store.clone()).unwrap();
        assert!(store.is_empty());
    }

    #[test]
    fn corrupt_value_reports_context() {
        let store = MemoryStore::shared();
        store.set_item("prefstore:theme", "dark").unwrap();
        let err = run(&get("theme", Some("\"light\"")), None, store).unwrap_err();
        assert!(err.to_string().contains("failed to read preference \"theme\""));
    }

    #[test]
    fn store_errors_surface() {
        let store = Arc::new(MemoryStore::with_quota(4));
        let err = run(&set("theme", "dark"), None, store).unwrap_err();
        assert!(format!("{err:#}").contains("quota exceeded"));
    }
}
