//! Capabilities the settings panel needs from its environment.

use std::cell::RefCell;
use std::collections::HashMap;

use crate::error::PortError;

pub trait KeyValueStore {
    fn get(&self, key: &str) -> Result<Option<String>, PortError>;
    fn set(&self, key: &str, value: &str) -> Result<(), PortError>;
}

/// Completion callback of a clipboard write.
pub type ClipboardDone = Box<dyn FnOnce(Result<(), PortError>)>;

pub trait Clipboard {
    /// Starts writing `text`; `done` runs exactly once with the outcome,
    /// either before returning or later from the event loop.
    fn write_text(&self, text: String, done: ClipboardDone);
}

pub trait Notifier {
    fn notify(&self, notice: Notice);
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeKind {
    Success,
    Error,
}

/// A transient message shown to the visitor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub kind: NoticeKind,
    pub title: String,
    pub detail: Option<String>,
}

impl Notice {
    pub fn success(title: impl Into<String>, detail: impl Into<String>) -> Self {
        Self {
            kind: NoticeKind::Success,
            title: title.into(),
            detail: Some(detail.into()),
        }
    }

    pub fn error(title: impl Into<String>, detail: impl Into<String>) -> Self {
        Self {
            kind: NoticeKind::Error,
            title: title.into(),
            detail: Some(detail.into()),
        }
    }
}

/// Process-local store, lost on reload.
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: RefCell<HashMap<String, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, PortError> {
        Ok(self.entries.borrow().get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<(), PortError> {
        self.entries.borrow_mut().insert(key.to_owned(), value.to_owned());
        Ok(())
    }
}

impl<T: KeyValueStore + ?Sized> KeyValueStore for std::rc::Rc<T> {
    fn get(&self, key: &str) -> Result<Option<String>, PortError> {
        (**self).get(key)
    }

    fn set(&self, key: &str, value: &str) -> Result<(), PortError> {
        (**self).set(key, value)
    }
}

impl<T: KeyValueStore + ?Sized> KeyValueStore for Box<T> {
    fn get(&self, key: &str) -> Result<Option<String>, PortError> {
        (**self).get(key)
    }

    fn set(&self, key: &str, value: &str) -> Result<(), PortError> {
        (**self).set(key, value)
    }
}
