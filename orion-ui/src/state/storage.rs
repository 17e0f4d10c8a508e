//! `window.localStorage` behind the shared key-value trait

use orion::store::{KeyValueStore, Result, StoreError};
use web_sys::Storage;

/// Stateless handle; every call looks up the window's storage
#[derive(Debug, Clone, Copy, Default)]
pub struct BrowserStore;

fn local_storage() -> Result<Storage> {
    web_sys::window()
        .and_then(|w| w.local_storage().ok().flatten())
        .ok_or_else(|| StoreError::Unavailable("localStorage".to_string()))
}

fn js_error(value: wasm_bindgen::JsValue) -> StoreError {
    StoreError::Unavailable(format!("{:?}", value))
}

impl KeyValueStore for BrowserStore {
    fn get(&self, key: &str) -> Option<String> {
        local_storage().ok()?.get_item(key).ok().flatten()
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        local_storage()?.set_item(key, value).map_err(js_error)
    }

    fn remove(&self, key: &str) -> Result<()> {
        local_storage()?.remove_item(key).map_err(js_error)
    }
}
