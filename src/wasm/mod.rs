//! Browser glue: entry point, page mount/unmount and the web-sys backed
//! implementations of the renderer host and the panel's capabilities.

use std::cell::RefCell;
use std::rc::{Rc, Weak};

use wasm_bindgen::prelude::*;
use web_sys::{Document, HtmlCanvasElement, Window};

use crate::background::Background;
use crate::config::AppConfig;
use crate::error::{ConfigError, RenderError};

pub mod fallback;
pub mod hero;
pub mod host;
pub mod render;
pub mod sidebar;
pub mod storage;
pub mod toast;

use host::BrowserHost;
use sidebar::Sidebar;

pub const CANVAS_ID: &str = "bg";
pub const CONFIG_ID: &str = "folio-config";

type BackgroundCell = RefCell<Option<Background<BrowserHost>>>;

/// Best-effort text for a thrown JS value.
pub(crate) fn describe(value: &JsValue) -> String {
    if let Some(s) = value.as_string() {
        return s;
    }
    if let Some(err) = value.dyn_ref::<js_sys::Error>() {
        return String::from(err.message());
    }
    format!("{value:?}")
}

/// Everything a mounted page owns. Dropping it unmounts.
pub struct Page {
    background: Option<Rc<BackgroundCell>>,
    _sidebar: Sidebar,
}

impl Page {
    pub fn mount(window: &Window, document: &Document, config: &AppConfig) -> Result<Self, JsValue> {
        let background = match mount_background(window, document, config) {
            Ok(cell) => Some(cell),
            Err(err) => {
                log::error!("background disabled: {err}");
                None
            }
        };
        let sidebar = Sidebar::mount(window, document, config)?;
        log::info!("page mounted");
        Ok(Self { background, _sidebar: sidebar })
    }

    pub fn background_phase(&self) -> Option<crate::background::Phase> {
        let cell = self.background.as_ref()?;
        let slot = cell.try_borrow().ok()?;
        slot.as_ref().map(Background::phase)
    }
}

impl Drop for Page {
    fn drop(&mut self) {
        if let Some(cell) = self.background.take() {
            // Take first so the background is dropped outside the borrow.
            let background = cell.borrow_mut().take();
            drop(background);
        }
        log::info!("page unmounted");
    }
}

fn with_background(cell: &Weak<BackgroundCell>, f: impl FnOnce(&mut Background<BrowserHost>)) {
    let Some(cell) = cell.upgrade() else {
        return;
    };
    let Ok(mut slot) = cell.try_borrow_mut() else {
        return;
    };
    if let Some(background) = slot.as_mut() {
        f(background);
    }
}

fn mount_background(
    window: &Window,
    document: &Document,
    config: &AppConfig,
) -> Result<Rc<BackgroundCell>, RenderError> {
    let canvas = document
        .get_element_by_id(CANVAS_ID)
        .ok_or(RenderError::Host(format!("#{CANVAS_ID} not found")))?
        .dyn_into::<HtmlCanvasElement>()
        .map_err(|_| RenderError::Host(format!("#{CANVAS_ID} is not a canvas")))?;

    let cell: Rc<BackgroundCell> = Rc::new(RefCell::new(None));
    let on_frame = {
        let weak = Rc::downgrade(&cell);
        Closure::wrap(Box::new(move || with_background(&weak, Background::on_frame)) as Box<dyn FnMut()>)
    };
    let on_resize = {
        let weak = Rc::downgrade(&cell);
        Closure::wrap(Box::new(move || with_background(&weak, Background::on_resize)) as Box<dyn FnMut()>)
    };

    let host = BrowserHost::new(
        window.clone(),
        document.clone(),
        canvas,
        config.background.glow_spread,
        on_frame,
        on_resize,
    );
    let background = Background::activate(host, &config.background)?;
    log::info!("background running: {:?}", background.phase());
    *cell.borrow_mut() = Some(background);
    Ok(cell)
}

/// Reads the optional JSON config block.
pub fn read_config(document: &Document) -> Result<AppConfig, ConfigError> {
    match document.get_element_by_id(CONFIG_ID).and_then(|el| el.text_content()) {
        Some(raw) if !raw.trim().is_empty() => AppConfig::from_json(&raw),
        _ => Ok(AppConfig::default()),
    }
}

thread_local! {
    static PAGE: RefCell<Option<Page>> = const { RefCell::new(None) };
}

fn mount() -> Result<(), JsValue> {
    let window = web_sys::window().ok_or("no window")?;
    let document = window.document().ok_or("no document")?;
    let config = read_config(&document).unwrap_or_else(|err| {
        log::warn!("{err}; using defaults");
        AppConfig::default()
    });
    let page = Page::mount(&window, &document, &config)?;
    PAGE.with(|slot| slot.replace(Some(page)));
    Ok(())
}

#[wasm_bindgen(start)]
pub fn main() -> Result<(), JsValue> {
    console_error_panic_hook::set_once();
    let level = web_sys::window()
        .and_then(|w| w.document())
        .and_then(|d| read_config(&d).ok())
        .map(|c| c.log_level)
        .unwrap_or(log::Level::Info);
    console_log::init_with_level(level).ok();
    mount()
}

/// Tears the page down: stops the frame loop, detaches listeners, frees GPU resources.
#[wasm_bindgen]
pub fn unmount() {
    let page = PAGE.with(|slot| slot.borrow_mut().take());
    drop(page);
}

#[wasm_bindgen]
pub fn remount() -> Result<(), JsValue> {
    unmount();
    mount()
}
