use std::cell::{Cell, RefCell};
use std::rc::Rc;

use folio_wasm::error::{PortError, SettingsError};
use folio_wasm::fonts::{FontWeight, TextTransform};
use folio_wasm::ports::{Clipboard, ClipboardDone, KeyValueStore, MemoryStore, Notice, NoticeKind, Notifier};
use folio_wasm::{SettingsPanel, TypographySettings};

const KEY: &str = "typography-settings";

#[derive(Clone, Default)]
struct Notices(Rc<RefCell<Vec<Notice>>>);

impl Notifier for Notices {
    fn notify(&self, notice: Notice) {
        self.0.borrow_mut().push(notice);
    }
}

impl Notices {
    fn kinds(&self) -> Vec<NoticeKind> {
        self.0.borrow().iter().map(|n| n.kind).collect()
    }
}

#[derive(Clone, Default)]
struct RecordingClipboard {
    written: Rc<RefCell<Vec<String>>>,
    reject: bool,
}

impl Clipboard for RecordingClipboard {
    fn write_text(&self, text: String, done: ClipboardDone) {
        if self.reject {
            done(Err(PortError::Rejected("permission denied".into())));
        } else {
            self.written.borrow_mut().push(text);
            done(Ok(()));
        }
    }
}

/// Store whose writes can be switched off.
#[derive(Default)]
struct FlakyStore {
    inner: MemoryStore,
    failing: Cell<bool>,
}

impl KeyValueStore for FlakyStore {
    fn get(&self, key: &str) -> Result<Option<String>, PortError> {
        self.inner.get(key)
    }

    fn set(&self, key: &str, value: &str) -> Result<(), PortError> {
        if self.failing.get() {
            return Err(PortError::Rejected("QuotaExceededError".into()));
        }
        self.inner.set(key, value)
    }
}

struct Harness<S: KeyValueStore> {
    panel: SettingsPanel<Rc<S>, RecordingClipboard, Notices>,
    store: Rc<S>,
    clipboard: RecordingClipboard,
    notices: Notices,
    published: Rc<RefCell<Vec<TypographySettings>>>,
}

fn mount_with<S: KeyValueStore + 'static>(store: S, clipboard: RecordingClipboard) -> Harness<S> {
    let store = Rc::new(store);
    let notices = Notices::default();
    let published = Rc::new(RefCell::new(Vec::new()));
    let sink = published.clone();
    let panel = SettingsPanel::mount(KEY, store.clone(), clipboard.clone(), notices.clone(), move |s: &TypographySettings| {
        sink.borrow_mut().push(s.clone())
    });
    Harness { panel, store, clipboard, notices, published }
}

fn mount(store: MemoryStore) -> Harness<MemoryStore> {
    mount_with(store, RecordingClipboard::default())
}

fn stored<S: KeyValueStore>(store: &S) -> TypographySettings {
    let raw = store.get(KEY).expect("readable").expect("persisted");
    serde_json::from_str(&raw).expect("valid json")
}

fn store_with(raw: &str) -> MemoryStore {
    let store = MemoryStore::new();
    store.set(KEY, raw).expect("memory store");
    store
}

#[test]
fn default_record_matches_the_stock_typography() {
    let d = TypographySettings::default();
    assert_eq!(d.font_family, "Syne");
    assert_eq!(d.font_class, "font-syne");
    assert_eq!(d.font_weight, FontWeight::Regular);
    assert_eq!(d.font_size, 100);
    assert_eq!(d.letter_spacing, 0.0);
    assert_eq!(d.line_height, 1.5);
    assert_eq!(d.text_transform, TextTransform::None);
}

#[test]
fn empty_storage_publishes_defaults_once() {
    let h = mount(MemoryStore::new());
    assert_eq!(*h.published.borrow(), vec![TypographySettings::default()]);
    assert_eq!(h.panel.settings(), &TypographySettings::default());
    assert_eq!(stored(&*h.store), TypographySettings::default());
}

#[test]
fn selecting_a_weight_changes_only_the_weight() {
    let mut h = mount(MemoryStore::new());
    h.panel.set_font_weight(FontWeight::Bold);

    let expected = TypographySettings {
        font_weight: FontWeight::Bold,
        ..TypographySettings::default()
    };
    assert_eq!(h.panel.settings(), &expected);
    assert_eq!(h.published.borrow().last(), Some(&expected));
    assert_eq!(stored(&*h.store), expected);
}

#[test]
fn every_mutation_publishes_and_persists() {
    let mut h = mount(MemoryStore::new());
    h.panel.select_font("Playfair Display").expect("catalog font");
    h.panel.set_font_size(120);
    h.panel.set_letter_spacing(0.05);
    h.panel.set_line_height(1.75);
    h.panel.set_text_transform(TextTransform::Uppercase);

    assert_eq!(h.published.borrow().len(), 6);
    let s = h.panel.settings().clone();
    assert_eq!(s.font_family, "Playfair Display");
    assert_eq!(s.font_class, "font-playfair");
    assert_eq!(s.font_size, 120);
    assert_eq!(s.letter_spacing, 0.05);
    assert_eq!(s.line_height, 1.75);
    assert_eq!(s.text_transform, TextTransform::Uppercase);
    assert_eq!(stored(&*h.store), s);
}

#[test]
fn unknown_font_is_rejected_without_publishing() {
    let mut h = mount(MemoryStore::new());
    let err = h.panel.select_font("Comic Sans MS").unwrap_err();
    assert!(matches!(err, SettingsError::UnknownFont(name) if name == "Comic Sans MS"));
    assert_eq!(h.published.borrow().len(), 1);
    assert_eq!(h.panel.settings(), &TypographySettings::default());
}

#[test]
fn persisted_fields_win_over_defaults() {
    let h = mount(store_with(r#"{"fontFamily":"Inter","fontWeight":600,"futureField":true}"#));
    let expected = TypographySettings {
        font_family: "Inter".into(),
        font_class: "font-inter".into(),
        font_weight: FontWeight::Semibold,
        ..TypographySettings::default()
    };
    assert_eq!(h.panel.settings(), &expected);
    assert_eq!(*h.published.borrow(), vec![expected]);
}

#[test]
fn stale_font_class_is_rebound_from_the_catalog() {
    let h = mount(store_with(r#"{"fontFamily":"Poppins","fontClass":"font-gone"}"#));
    assert_eq!(h.panel.settings().font_class, "font-poppins");
}

#[test]
fn malformed_storage_yields_defaults_and_is_overwritten() {
    for raw in ["{not json", "null", "[1,2]", r#"{"fontWeight":450}"#] {
        let h = mount(store_with(raw));
        assert_eq!(h.panel.settings(), &TypographySettings::default(), "input {raw:?}");
        assert_eq!(stored(&*h.store), TypographySettings::default(), "input {raw:?}");
        assert!(h.notices.0.borrow().is_empty(), "malformed storage is not surfaced");
    }
}

#[test]
fn unknown_family_falls_back_alone() {
    let h = mount(store_with(r#"{"fontFamily":"Papyrus","fontClass":"font-papyrus","fontWeight":700,"fontSize":120}"#));
    let expected = TypographySettings {
        font_weight: FontWeight::Bold,
        font_size: 120,
        ..TypographySettings::default()
    };
    assert_eq!(h.panel.settings(), &expected);
    assert_eq!(stored(&*h.store), expected);
}

#[test]
fn reset_is_idempotent() {
    let mut h = mount(MemoryStore::new());
    h.panel.set_font_size(80);
    h.panel.set_text_transform(TextTransform::Lowercase);

    h.panel.reset();
    let once = h.panel.settings().clone();
    h.panel.reset();

    assert_eq!(once, TypographySettings::default());
    assert_eq!(h.panel.settings(), &once);
    assert_eq!(stored(&*h.store), once);
    assert_eq!(h.notices.kinds(), vec![NoticeKind::Success, NoticeKind::Success]);
}

#[test]
fn copy_exports_unit_suffixed_values() {
    let mut h = mount(MemoryStore::new());
    h.panel.set_font_size(120);
    h.panel.set_letter_spacing(0.05);
    h.panel.copy_settings();

    let written = h.clipboard.written.borrow();
    assert_eq!(written.len(), 1);
    let payload = &written[0];
    assert!(payload.contains(r#""fontSize": "120%""#), "{payload}");
    assert!(payload.contains(r#""letterSpacing": "0.05em""#), "{payload}");
    assert_eq!(h.notices.kinds(), vec![NoticeKind::Success]);
}

#[test]
fn copy_has_a_stable_layout() {
    let h = mount(MemoryStore::new());
    h.panel.copy_settings();
    let expected = r#"{
  "fontFamily": "Syne",
  "fontWeight": 400,
  "fontSize": "100%",
  "letterSpacing": "0.00em",
  "lineHeight": 1.5,
  "textTransform": "none"
}"#;
    assert_eq!(h.clipboard.written.borrow()[0], expected);
}

#[test]
fn rejected_clipboard_write_is_reported() {
    let clipboard = RecordingClipboard { reject: true, ..Default::default() };
    let h = mount_with(MemoryStore::new(), clipboard);
    h.panel.copy_settings();

    let notices = h.notices.0.borrow();
    assert_eq!(notices.len(), 1);
    assert_eq!(notices[0].kind, NoticeKind::Error);
    assert_eq!(notices[0].detail.as_deref(), Some("permission denied"));
}

#[test]
fn storage_failures_are_reported_once_per_outage() {
    let mut h = mount_with(FlakyStore::default(), RecordingClipboard::default());
    h.store.failing.set(true);
    h.panel.set_font_size(90);
    h.panel.set_font_size(95);
    assert_eq!(h.notices.kinds(), vec![NoticeKind::Error]);
    assert_eq!(h.panel.settings().font_size, 95, "change still applies");
    assert_eq!(h.published.borrow().last().map(|s| s.font_size), Some(95));

    h.store.failing.set(false);
    h.panel.set_font_size(100);
    assert_eq!(stored(&*h.store).font_size, 100);

    h.store.failing.set(true);
    h.panel.set_font_size(105);
    assert_eq!(h.notices.kinds(), vec![NoticeKind::Error, NoticeKind::Error]);
}

#[test]
fn sidebar_toggles() {
    let mut h = mount(MemoryStore::new());
    assert!(h.panel.is_open());
    assert!(!h.panel.toggle());
    assert!(!h.panel.is_open());
    h.panel.set_open(true);
    assert!(h.panel.is_open());
    assert_eq!(h.published.borrow().len(), 1, "visibility is not part of the record");
}
