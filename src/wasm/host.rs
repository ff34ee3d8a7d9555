use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys::{Document, HtmlCanvasElement, WebglLoseContext, Window};

use super::describe;
use super::fallback::CanvasFallback;
use super::render::GlRenderer;
use crate::background::GraphicsHost;
use crate::error::RenderError;
use crate::shader::{Uniforms, Viewport};

/// Records which context kind a canvas has given out.
pub const CONTEXT_ATTR: &str = "data-context";

/// Browser window plus the canvas the background paints into.
pub struct BrowserHost {
    window: Window,
    document: Document,
    canvas: HtmlCanvasElement,
    glow_spread: u32,
    on_frame: Closure<dyn FnMut()>,
    on_resize: Closure<dyn FnMut()>,
    frame: Option<i32>,
    watching: bool,
}

impl BrowserHost {
    pub fn new(
        window: Window,
        document: Document,
        canvas: HtmlCanvasElement,
        glow_spread: u32,
        on_frame: Closure<dyn FnMut()>,
        on_resize: Closure<dyn FnMut()>,
    ) -> Self {
        Self {
            window,
            document,
            canvas,
            glow_spread,
            on_frame,
            on_resize,
            frame: None,
            watching: false,
        }
    }

    fn create_canvas(&self) -> Result<HtmlCanvasElement, RenderError> {
        self.document
            .create_element("canvas")
            .map_err(|e| RenderError::Host(describe(&e)))?
            .dyn_into::<HtmlCanvasElement>()
            .map_err(|_| RenderError::Resource("canvas element"))
    }

    /// Swaps in a blank canvas with the same id and classes.
    fn replace_canvas(&mut self) -> Result<(), RenderError> {
        let fresh = self.create_canvas()?;
        fresh.set_id(&self.canvas.id());
        fresh.set_class_name(&self.canvas.class_name());
        self.canvas
            .replace_with_with_node_1(&fresh)
            .map_err(|e| RenderError::Host(describe(&e)))?;
        self.canvas = fresh;
        Ok(())
    }

    /// Makes sure `canvas` can hand out a `kind` context, replacing it when an
    /// earlier mount already bound it to the other kind. The binding is kept
    /// on the element so it survives remounts.
    fn claim_canvas(&mut self, kind: &str) -> Result<(), RenderError> {
        match self.canvas.get_attribute(CONTEXT_ATTR) {
            Some(held) if held != kind => self.replace_canvas()?,
            _ => {}
        }
        self.canvas
            .set_attribute(CONTEXT_ATTR, kind)
            .map_err(|e| RenderError::Host(describe(&e)))
    }

    /// The canvas the background currently paints into.
    pub fn canvas(&self) -> &HtmlCanvasElement {
        &self.canvas
    }

    pub fn frame_pending(&self) -> bool {
        self.frame.is_some()
    }

    pub fn is_watching_resize(&self) -> bool {
        self.watching
    }
}


impl GraphicsHost for BrowserHost {
    type Accelerated = GlRenderer;
    type Fallback = CanvasFallback;

    fn probe(&mut self) -> bool {
        let Ok(probe) = self.create_canvas() else {
            return false;
        };
        match probe.get_context("webgl2") {
            Ok(Some(ctx)) => {
                if let Ok(Some(ext)) = ctx
                    .unchecked_ref::<web_sys::WebGl2RenderingContext>()
                    .get_extension("WEBGL_lose_context")
                {
                    ext.unchecked_into::<WebglLoseContext>().lose_context();
                }
                true
            }
            _ => false,
        }
    }

    fn create_accelerated(&mut self, _uniforms: &Uniforms) -> Result<GlRenderer, RenderError> {
        self.claim_canvas("webgl2")?;
        GlRenderer::open(&self.canvas)
    }

    fn create_fallback(&mut self) -> Result<CanvasFallback, RenderError> {
        self.claim_canvas("2d")?;
        CanvasFallback::open(&self.canvas, self.glow_spread)
    }

    fn viewport(&self) -> Viewport {
        let dimension = |v: Result<wasm_bindgen::JsValue, wasm_bindgen::JsValue>| {
            v.ok().and_then(|v| v.as_f64()).unwrap_or(1.0)
        };
        Viewport {
            width: dimension(self.window.inner_width()),
            height: dimension(self.window.inner_height()),
            pixel_ratio: self.window.device_pixel_ratio(),
        }
    }

    fn watch_resize(&mut self) -> Result<(), RenderError> {
        if self.watching {
            return Ok(());
        }
        self.window
            .add_event_listener_with_callback("resize", self.on_resize.as_ref().unchecked_ref())
            .map_err(|e| RenderError::Host(describe(&e)))?;
        self.watching = true;
        Ok(())
    }

    fn unwatch_resize(&mut self) {
        if !self.watching {
            return;
        }
        if let Err(e) = self
            .window
            .remove_event_listener_with_callback("resize", self.on_resize.as_ref().unchecked_ref())
        {
            log::warn!("could not remove resize listener: {}", describe(&e));
        }
        self.watching = false;
    }

    fn schedule_frame(&mut self) -> Result<(), RenderError> {
        let id = self
            .window
            .request_animation_frame(self.on_frame.as_ref().unchecked_ref())
            .map_err(|e| RenderError::Host(describe(&e)))?;
        self.frame = Some(id);
        Ok(())
    }

    fn cancel_frame(&mut self) {
        if let Some(id) = self.frame.take() {
            if let Err(e) = self.window.cancel_animation_frame(id) {
                log::warn!("could not cancel animation frame: {}", describe(&e));
            }
        }
    }
}
