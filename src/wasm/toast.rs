use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys::{Document, Element, Window};

use super::describe;
use crate::ports::{Notice, NoticeKind, Notifier};

const TOAST_MS: i32 = 2500;

/// Renders notices into a fixed container and drops them after a delay.
#[derive(Clone)]
pub struct Toaster {
    window: Window,
    document: Document,
    container: Element,
}

impl Toaster {
    pub fn new(window: Window, document: Document, container: Element) -> Self {
        Self { window, document, container }
    }

    fn render(&self, notice: &Notice) -> Result<Element, wasm_bindgen::JsValue> {
        let toast = self.document.create_element("div")?;
        let kind = match notice.kind {
            NoticeKind::Success => "toast toast--success",
            NoticeKind::Error => "toast toast--error",
        };
        toast.set_class_name(kind);
        toast.set_attribute("role", "status")?;

        let title = self.document.create_element("strong")?;
        title.set_text_content(Some(&notice.title));
        toast.append_child(&title)?;
        if let Some(detail) = &notice.detail {
            let body = self.document.create_element("span")?;
            body.set_text_content(Some(detail));
            toast.append_child(&body)?;
        }
        self.container.append_child(&toast)?;
        Ok(toast)
    }
}

impl Notifier for Toaster {
    fn notify(&self, notice: Notice) {
        let toast = match self.render(&notice) {
            Ok(toast) => toast,
            Err(e) => {
                log::warn!("could not show notice {:?}: {}", notice.title, describe(&e));
                return;
            }
        };
        let dismiss = Closure::once_into_js(move || toast.remove());
        if let Err(e) = self
            .window
            .set_timeout_with_callback_and_timeout_and_arguments_0(dismiss.unchecked_ref(), TOAST_MS)
        {
            log::warn!("could not schedule notice dismissal: {}", describe(&e));
        }
    }
}
