//! Lifecycle of the animated background.
//!
//! Activation probes the host for accelerated rendering, builds either the
//! shader renderer or the fallback, and starts the frame loop. Deactivation
//! (explicit or on drop) cancels the pending frame, stops watching resizes
//! and releases the renderer.

use crate::config::BackgroundConfig;
use crate::error::RenderError;
use crate::shader::{Uniforms, Viewport};

/// Something that can paint the wave each frame.
pub trait Renderer {
    fn resize(&mut self, viewport: Viewport, uniforms: &Uniforms);
    fn draw(&mut self, uniforms: &Uniforms);
    /// Frees every graphics resource. Called exactly once.
    fn release(&mut self);
}

/// The environment the background runs in.
pub trait GraphicsHost {
    type Accelerated: Renderer;
    type Fallback: Renderer;

    /// Whether an accelerated context can be created. Must not keep the
    /// context it created to find out.
    fn probe(&mut self) -> bool;
    fn create_accelerated(&mut self, uniforms: &Uniforms) -> Result<Self::Accelerated, RenderError>;
    fn create_fallback(&mut self) -> Result<Self::Fallback, RenderError>;
    fn viewport(&self) -> Viewport;
    fn watch_resize(&mut self) -> Result<(), RenderError>;
    fn unwatch_resize(&mut self);
    /// Asks for one `on_frame` call at the next display refresh.
    fn schedule_frame(&mut self) -> Result<(), RenderError>;
    fn cancel_frame(&mut self);
}

/// Outcome of capability detection.
#[derive(Debug)]
pub enum Strategy<A> {
    Accelerated(A),
    Unsupported,
    InitFailed(RenderError),
}

/// Probes the host and, when accelerated rendering is there, tries to build it.
pub fn detect<H: GraphicsHost>(host: &mut H, uniforms: &Uniforms) -> Strategy<H::Accelerated> {
    if !host.probe() {
        return Strategy::Unsupported;
    }
    match host.create_accelerated(uniforms) {
        Ok(renderer) => Strategy::Accelerated(renderer),
        Err(err) => Strategy::InitFailed(err),
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Accelerated,
    Fallback,
    TornDown,
}

enum Active<A, F> {
    Accelerated(A),
    Fallback(F),
}

impl<A: Renderer, F: Renderer> Active<A, F> {
    fn renderer(&mut self) -> &mut dyn Renderer {
        match self {
            Active::Accelerated(r) => r,
            Active::Fallback(r) => r,
        }
    }
}

pub struct Background<H: GraphicsHost> {
    host: H,
    active: Option<Active<H::Accelerated, H::Fallback>>,
    uniforms: Uniforms,
    time_step: f32,
}

impl<H: GraphicsHost> Background<H> {
    /// Brings the background up. Accelerated failures fall back silently;
    /// only a fallback that cannot start either is an error.
    pub fn activate(mut host: H, config: &BackgroundConfig) -> Result<Self, RenderError> {
        let uniforms = Uniforms::new(config, host.viewport());
        let active = match detect(&mut host, &uniforms) {
            Strategy::Accelerated(renderer) => Active::Accelerated(renderer),
            Strategy::Unsupported => {
                log::warn!("accelerated rendering unsupported, using fallback background");
                Active::Fallback(host.create_fallback()?)
            }
            Strategy::InitFailed(err) => {
                log::warn!("accelerated rendering failed ({err}), using fallback background");
                Active::Fallback(host.create_fallback()?)
            }
        };
        let mut background = Self {
            host,
            active: Some(active),
            uniforms,
            time_step: config.time_step,
        };
        background.on_resize();
        background.host.watch_resize()?;
        background.host.schedule_frame()?;
        Ok(background)
    }

    pub fn phase(&self) -> Phase {
        match self.active {
            Some(Active::Accelerated(_)) => Phase::Accelerated,
            Some(Active::Fallback(_)) => Phase::Fallback,
            None => Phase::TornDown,
        }
    }

    pub fn uniforms(&self) -> &Uniforms {
        &self.uniforms
    }

    pub fn host(&self) -> &H {
        &self.host
    }

    /// Advances time, draws, and schedules the next frame.
    pub fn on_frame(&mut self) {
        let Some(active) = self.active.as_mut() else {
            return;
        };
        self.uniforms.advance(self.time_step);
        active.renderer().draw(&self.uniforms);
        if let Err(err) = self.host.schedule_frame() {
            log::error!("could not schedule next background frame: {err}");
        }
    }

    pub fn on_resize(&mut self) {
        let Some(active) = self.active.as_mut() else {
            return;
        };
        let viewport = self.host.viewport();
        self.uniforms.set_viewport(viewport);
        active.renderer().resize(viewport, &self.uniforms);
    }

    /// Idempotent.
    pub fn deactivate(&mut self) {
        let Some(mut active) = self.active.take() else {
            return;
        };
        self.host.cancel_frame();
        self.host.unwatch_resize();
        active.renderer().release();
    }
}

impl<H: GraphicsHost> Drop for Background<H> {
    fn drop(&mut self) {
        self.deactivate();
    }
}
