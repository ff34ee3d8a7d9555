//! Typography sidebar state.
//!
//! The panel owns one [`TypographySettings`] record. Every mutation replaces
//! the whole record, writes it to the store and hands it to the owner's
//! change callback before returning.

use crate::error::SettingsError;
use crate::fonts::{self, FontWeight, TextTransform};
use crate::ports::{Clipboard, KeyValueStore, Notice, Notifier};
use crate::settings::TypographySettings;

type ChangeFn = Box<dyn FnMut(&TypographySettings)>;

pub struct SettingsPanel<S, C, N> {
    settings: TypographySettings,
    storage_key: String,
    store: S,
    clipboard: C,
    notifier: N,
    on_change: ChangeFn,
    open: bool,
    /// Set after a failed write has been reported, cleared by the next good one.
    save_failure_reported: bool,
}

impl<S, C, N> SettingsPanel<S, C, N>
where
    S: KeyValueStore,
    C: Clipboard,
    N: Notifier + Clone + 'static,
{
    /// Rehydrates from `store` and publishes the result to `on_change`.
    pub fn mount(
        storage_key: impl Into<String>,
        store: S,
        clipboard: C,
        notifier: N,
        on_change: impl FnMut(&TypographySettings) + 'static,
    ) -> Self {
        let storage_key = storage_key.into();
        let initial = load(&store, &storage_key);
        let mut panel = Self {
            settings: initial.clone(),
            storage_key,
            store,
            clipboard,
            notifier,
            on_change: Box::new(on_change),
            open: true,
            save_failure_reported: false,
        };
        panel.publish(initial);
        panel
    }

    pub fn settings(&self) -> &TypographySettings {
        &self.settings
    }

    pub fn select_font(&mut self, name: &str) -> Result<(), SettingsError> {
        let font = fonts::find(name).ok_or_else(|| SettingsError::UnknownFont(name.to_owned()))?;
        let next = self.settings.with_font(font);
        self.publish(next);
        Ok(())
    }

    pub fn set_font_weight(&mut self, font_weight: FontWeight) {
        let next = TypographySettings { font_weight, ..self.settings.clone() };
        self.publish(next);
    }

    pub fn set_font_size(&mut self, font_size: u16) {
        let next = TypographySettings { font_size, ..self.settings.clone() };
        self.publish(next);
    }

    pub fn set_letter_spacing(&mut self, letter_spacing: f64) {
        let next = TypographySettings { letter_spacing, ..self.settings.clone() };
        self.publish(next);
    }

    pub fn set_line_height(&mut self, line_height: f64) {
        let next = TypographySettings { line_height, ..self.settings.clone() };
        self.publish(next);
    }

    pub fn set_text_transform(&mut self, text_transform: TextTransform) {
        let next = TypographySettings { text_transform, ..self.settings.clone() };
        self.publish(next);
    }

    /// Puts the export projection on the clipboard and reports the outcome.
    pub fn copy_settings(&self) {
        let payload = match self.settings.to_clipboard_json() {
            Ok(payload) => payload,
            Err(err) => {
                log::error!("could not serialize settings for export: {err}");
                self.notifier.notify(Notice::error("Copy failed", err.to_string()));
                return;
            }
        };
        let notifier = self.notifier.clone();
        self.clipboard.write_text(
            payload,
            Box::new(move |outcome| match outcome {
                Ok(()) => notifier.notify(Notice::success(
                    "Settings copied",
                    "Typography settings are on your clipboard.",
                )),
                Err(err) => {
                    log::warn!("clipboard write failed: {err}");
                    notifier.notify(Notice::error("Copy failed", err.to_string()));
                }
            }),
        );
    }

    pub fn reset(&mut self) {
        self.publish(TypographySettings::default());
        self.notifier.notify(Notice::success(
            "Settings reset",
            "Typography is back to the defaults.",
        ));
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    pub fn set_open(&mut self, open: bool) {
        self.open = open;
    }

    /// Flips the sidebar and returns the new state.
    pub fn toggle(&mut self) -> bool {
        self.open = !self.open;
        self.open
    }

    fn publish(&mut self, next: TypographySettings) {
        self.settings = next;
        self.persist();
        (self.on_change)(&self.settings);
    }

    fn persist(&mut self) {
        let written = self
            .settings
            .to_storage_json()
            .map_err(|err| err.to_string())
            .and_then(|raw| {
                self.store
                    .set(&self.storage_key, &raw)
                    .map_err(|err| err.to_string())
            });
        match written {
            Ok(()) => self.save_failure_reported = false,
            Err(err) => {
                log::warn!("could not persist typography settings: {err}");
                if !self.save_failure_reported {
                    self.save_failure_reported = true;
                    self.notifier.notify(Notice::error(
                        "Settings not saved",
                        "Changes apply now but will be lost on reload.",
                    ));
                }
            }
        }
    }
}

fn load<S: KeyValueStore>(store: &S, key: &str) -> TypographySettings {
    match store.get(key) {
        Ok(Some(raw)) => TypographySettings::rehydrate(&raw).unwrap_or_else(|err| {
            log::warn!("discarding persisted typography settings: {err}");
            TypographySettings::default()
        }),
        Ok(None) => {
            log::debug!("no persisted typography settings under {key:?}");
            TypographySettings::default()
        }
        Err(err) => {
            log::warn!("could not read typography settings: {err}");
            TypographySettings::default()
        }
    }
}
