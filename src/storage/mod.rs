use serde::Serialize;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

/// The whole document lives under this one key.
pub(crate) const DB_KEY: &str = "notekeeper_db";
pub(crate) const THEME_KEY: &str = "notekeeper_theme";

/// Key-value storage handle used by the store and the theme setting.
///
/// `Local` talks to browser localStorage with best-effort writes (a full or
/// disabled storage never fails a user action). `Memory` backs native unit
/// tests and sessions where localStorage is inaccessible.
#[derive(Clone)]
pub(crate) enum StorageBackend {
    Local,
    Memory(Arc<Mutex<HashMap<String, String>>>),
}

impl StorageBackend {
    /// Picks localStorage when the browser exposes it, otherwise degrades to
    /// an in-memory session.
    pub fn for_session() -> Self {
        let available = web_sys::window()
            .and_then(|w| w.local_storage().ok().flatten())
            .is_some();
        if available {
            Self::Local
        } else {
            Self::memory()
        }
    }

    pub fn memory() -> Self {
        Self::Memory(Arc::new(Mutex::new(HashMap::new())))
    }

    pub fn read(&self, key: &str) -> Option<String> {
        match self {
            Self::Local => web_sys::window()
                .and_then(|w| w.local_storage().ok().flatten())
                .and_then(|s| s.get_item(key).ok().flatten()),
            Self::Memory(map) => map.lock().ok().and_then(|m| m.get(key).cloned()),
        }
    }

    pub fn write(&self, key: &str, value: &str) {
        match self {
            Self::Local => {
                if let Some(storage) =
                    web_sys::window().and_then(|w| w.local_storage().ok().flatten())
                {
                    let _ = storage.set_item(key, value);
                }
            }
            Self::Memory(map) => {
                if let Ok(mut m) = map.lock() {
                    m.insert(key.to_string(), value.to_string());
                }
            }
        }
    }

    pub fn save_json<T: Serialize>(&self, key: &str, value: &T) {
        if let Ok(json) = serde_json::to_string(value) {
            self.write(key, &json);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_backend_roundtrip() {
        let backend = StorageBackend::memory();
        assert!(backend.read("k").is_none());

        backend.write("k", "v1");
        assert_eq!(backend.read("k").as_deref(), Some("v1"));

        backend.write("k", "v2");
        assert_eq!(backend.read("k").as_deref(), Some("v2"));
    }

    #[test]
    fn test_save_json_writes_parseable_payloads() {
        let backend = StorageBackend::memory();
        backend.save_json("k", &vec!["a".to_string()]);

        let raw = backend.read("k").expect("payload written");
        let back: Vec<String> = serde_json::from_str(&raw).expect("valid json");
        assert_eq!(back, vec!["a".to_string()]);
    }

    #[test]
    fn test_memory_backends_share_state_across_clones() {
        let backend = StorageBackend::memory();
        let clone = backend.clone();
        backend.write("k", "v");
        assert_eq!(clone.read("k").as_deref(), Some("v"));
    }
}

// WASM-only tests (run with `cargo test --target wasm32-unknown-unknown` + wasm-bindgen-test-runner)
#[cfg(all(test, target_arch = "wasm32"))]
mod wasm_tests {
    use super::*;
    use wasm_bindgen_test::*;

    wasm_bindgen_test_configure!(run_in_browser);

    #[wasm_bindgen_test]
    fn test_local_backend_roundtrip() {
        let backend = StorageBackend::Local;

        backend.write("notekeeper_test_key", "v1");
        assert_eq!(backend.read("notekeeper_test_key").as_deref(), Some("v1"));

        backend.write("notekeeper_test_key", "v2");
        assert_eq!(backend.read("notekeeper_test_key").as_deref(), Some("v2"));
    }

    #[wasm_bindgen_test]
    fn test_for_session_prefers_local_storage() {
        assert!(matches!(StorageBackend::for_session(), StorageBackend::Local));
    }
}
