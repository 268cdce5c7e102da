//! `localStorage` preference backend

use wasm_bindgen::JsValue;
use web_sys::{Storage, Window};

use crate::error::{Error, Result};
use crate::storage::PreferenceStore;

pub struct LocalStorage {
    storage: Storage,
}

fn storage_error(context: &str, value: JsValue) -> Error {
    Error::Storage {
        message: format!("{context}: {value:?}"),
    }
}

impl LocalStorage {
    /// The window's `localStorage`; fails when storage is disabled
    pub fn open(window: &Window) -> Result<Self> {
        let storage = window
            .local_storage()
            .map_err(|e| storage_error("localStorage unavailable", e))?
            .ok_or_else(|| Error::Storage {
                message: "localStorage unavailable".to_string(),
            })?;
        Ok(Self { storage })
    }
}

impl PreferenceStore for LocalStorage {
    fn get(&self, key: &str) -> Result<Option<String>> {
        self.storage
            .get_item(key)
            .map_err(|e| storage_error("read failed", e))
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        self.storage
            .set_item(key, value)
            .map_err(|e| storage_error("write failed", e))
    }
}
