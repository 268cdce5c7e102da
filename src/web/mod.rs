//! Web - Browser Bindings
//!
//! `web-sys` implementations of the page, the preference store and the
//! host, plus the `boot` entry point exported to JavaScript.

mod dom;
mod host;
mod storage;

pub use dom::WebDom;
pub use host::BrowserHost;
pub use storage::LocalStorage;

use std::cell::RefCell;

use tracing::warn;
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;

use crate::app::Site;
use crate::domain::config::SiteConfig;
use crate::storage::{MemoryStore, PreferenceStore};

thread_local! {
    static HOST: RefCell<Option<BrowserHost>> = const { RefCell::new(None) };
}

/// Inject styles now and mount the behaviors once the document's content
/// has loaded
#[wasm_bindgen]
pub fn boot() -> Result<(), JsValue> {
    let window = web_sys::window().ok_or_else(|| JsValue::from_str("no window"))?;
    let document = window
        .document()
        .ok_or_else(|| JsValue::from_str("no document"))?;

    let store: Box<dyn PreferenceStore> = match LocalStorage::open(&window) {
        Ok(store) => Box::new(store),
        Err(e) => {
            warn!(error = %e, "Falling back to in-memory locale preference");
            Box::new(MemoryStore::new())
        }
    };

    let site = Site::new(WebDom::new(window, document.clone()), SiteConfig::default(), store);
    let host = BrowserHost::install(site)?;

    if document.ready_state() == "loading" {
        let on_loaded = Closure::<dyn FnMut()>::new(|| {
            HOST.with(|host| {
                if let Some(host) = host.borrow().as_ref() {
                    host.load();
                }
            });
        });
        document.add_event_listener_with_callback(
            "DOMContentLoaded",
            on_loaded.as_ref().unchecked_ref(),
        )?;
        on_loaded.forget();
    } else {
        host.load();
    }

    HOST.with(|slot| *slot.borrow_mut() = Some(host));
    Ok(())
}
