//! `KeyValueStore` over `window.localStorage`

use flow_core::{FlowError, KeyValueStore, Result};
use wasm_bindgen::JsValue;
use web_sys::Storage;

/// Browser local storage
#[derive(Clone)]
pub struct LocalStorageStore {
    storage: Storage,
}

impl LocalStorageStore {
    /// The current window's `localStorage`
    pub fn from_window() -> Result<Self> {
        let window = web_sys::window().ok_or_else(|| FlowError::storage("no window"))?;
        let storage = window
            .local_storage()
            .map_err(js_error)?
            .ok_or_else(|| FlowError::storage("localStorage unavailable"))?;

        Ok(Self { storage })
    }

    pub fn new(storage: Storage) -> Self {
        Self { storage }
    }
}

impl KeyValueStore for LocalStorageStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        self.storage.get_item(key).map_err(js_error)
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        self.storage.set_item(key, value).map_err(js_error)
    }
}

fn js_error(value: JsValue) -> FlowError {
    FlowError::storage(value.as_string().unwrap_or_else(|| format!("{:?}", value)))
}
