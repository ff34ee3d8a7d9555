//! Browser implementations of the storage and clipboard capabilities.

use wasm_bindgen::JsValue;
use wasm_bindgen_futures::JsFuture;
use web_sys::{Storage, Window};

use super::describe;
use crate::error::PortError;
use crate::ports::{Clipboard, ClipboardDone, KeyValueStore, MemoryStore};

pub struct LocalStore {
    storage: Storage,
}

impl LocalStore {
    pub fn open(window: &Window) -> Option<Self> {
        window
            .local_storage()
            .ok()
            .flatten()
            .map(|storage| Self { storage })
    }
}

impl KeyValueStore for LocalStore {
    fn get(&self, key: &str) -> Result<Option<String>, PortError> {
        self.storage
            .get_item(key)
            .map_err(|e| PortError::Rejected(describe(&e)))
    }

    fn set(&self, key: &str, value: &str) -> Result<(), PortError> {
        self.storage
            .set_item(key, value)
            .map_err(|e| PortError::Rejected(describe(&e)))
    }
}

/// `localStorage`, or an in-memory store when the browser denies it.
pub fn browser_store(window: &Window) -> Box<dyn KeyValueStore> {
    match LocalStore::open(window) {
        Some(store) => Box::new(store),
        None => {
            log::warn!("localStorage unavailable, typography settings will not survive a reload");
            Box::new(MemoryStore::new())
        }
    }
}

pub struct NavigatorClipboard {
    window: Window,
}

impl NavigatorClipboard {
    pub fn new(window: Window) -> Self {
        Self { window }
    }
}

impl Clipboard for NavigatorClipboard {
    fn write_text(&self, text: String, done: ClipboardDone) {
        let navigator = self.window.navigator();
        // Missing outside secure contexts.
        let present = js_sys::Reflect::get(&navigator, &JsValue::from_str("clipboard"))
            .map(|v| !v.is_undefined() && !v.is_null())
            .unwrap_or(false);
        if !present {
            done(Err(PortError::Unavailable("clipboard")));
            return;
        }
        let promise = navigator.clipboard().write_text(&text);
        wasm_bindgen_futures::spawn_local(async move {
            let outcome = JsFuture::from(promise)
                .await
                .map(|_| ())
                .map_err(|e| PortError::Rejected(describe(&e)));
            done(outcome);
        });
    }
}
