/* src/client/wasm/src/storage.rs */

use gig_locale::{KeyValueStore, StorageError};
use wasm_bindgen::JsValue;
use web_sys::Storage;

/// `window.localStorage` behind [`KeyValueStore`]. When storage is disabled
/// (private mode, sandboxed iframe) reads return `None` and writes report
/// `Unavailable`.
#[derive(Debug, Clone)]
pub struct BrowserStorage {
  storage: Option<Storage>,
}

impl BrowserStorage {
  pub fn local() -> Self {
    let storage = web_sys::window().and_then(|w| w.local_storage().ok().flatten());
    if storage.is_none() {
      tracing::warn!("localStorage unavailable; preferences last for this page only");
    }
    Self { storage }
  }

  fn backend(&self) -> Result<&Storage, StorageError> {
    self.storage.as_ref().ok_or_else(|| StorageError::Unavailable("localStorage".into()))
  }
}

impl KeyValueStore for BrowserStorage {
  fn get(&self, key: &str) -> Option<String> {
    self.storage.as_ref()?.get_item(key).ok().flatten()
  }

  fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
    self.backend()?.set_item(key, value).map_err(|e| StorageError::Io(js_message(&e)))
  }

  fn remove(&mut self, key: &str) -> Result<(), StorageError> {
    self.backend()?.remove_item(key).map_err(|e| StorageError::Io(js_message(&e)))
  }
}

pub(crate) fn js_message(value: &JsValue) -> String {
  value.as_string().unwrap_or_else(|| format!("{value:?}"))
}
