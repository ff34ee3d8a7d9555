use wasm_bindgen::{JsCast, JsValue};
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement};

use super::describe;
use crate::background::Renderer;
use crate::error::RenderError;
use crate::shader::{Uniforms, Viewport};
use crate::wave::{self, glow_layers, Column, TRACES};

/// Canvas2D redraw of the wave, one column at a time.
pub struct CanvasFallback {
    canvas: HtmlCanvasElement,
    ctx: CanvasRenderingContext2d,
    /// Per trace: (half-height, fill style) from widest band to narrowest.
    bands: Vec<Vec<(f64, JsValue)>>,
    size: (u32, u32),
}

impl CanvasFallback {
    pub fn open(canvas: &HtmlCanvasElement, glow_spread: u32) -> Result<Self, RenderError> {
        let ctx: CanvasRenderingContext2d = canvas
            .get_context("2d")
            .map_err(|e| RenderError::Host(describe(&e)))?
            .ok_or(RenderError::ContextUnavailable("2d"))?
            .dyn_into()
            .map_err(|_| RenderError::ContextUnavailable("2d"))?;

        let bands: Vec<Vec<(f64, JsValue)>> = TRACES
            .iter()
            .map(|trace| {
                glow_layers(trace.intensity, glow_spread)
                    .map(|layer| {
                        let style = JsValue::from_str(&wave::rgba(trace.rgb, layer.alpha));
                        (f64::from(layer.spread), style)
                    })
                    .collect()
            })
            .collect();

        Ok(Self {
            canvas: canvas.clone(),
            ctx,
            bands,
            size: (canvas.width(), canvas.height()),
        })
    }
}

impl Renderer for CanvasFallback {
    fn resize(&mut self, viewport: Viewport, _uniforms: &Uniforms) {
        // CSS pixels: the redraw cost is per column.
        let w = viewport.width.max(1.0) as u32;
        let h = viewport.height.max(1.0) as u32;
        self.canvas.set_width(w);
        self.canvas.set_height(h);
        self.size = (w, h);
    }

    #[allow(deprecated)]
    fn draw(&mut self, uniforms: &Uniforms) {
        let (w, h) = self.size;
        let ctx = &self.ctx;
        ctx.set_fill_style(&JsValue::from_str("#000000"));
        ctx.fill_rect(0.0, 0.0, f64::from(w), f64::from(h));

        for x in 0..w {
            let column = Column::at(x, w, h, uniforms);
            for (y, bands) in column.y.iter().zip(&self.bands) {
                for (spread, style) in bands {
                    ctx.set_fill_style(style);
                    ctx.fill_rect(f64::from(x), y - spread, 1.0, spread * 2.0);
                }
            }
        }
    }

    fn release(&mut self) {
        self.bands.clear();
        self.canvas.set_width(0);
        self.canvas.set_height(0);
        self.size = (0, 0);
    }
}
