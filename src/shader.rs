//! Chromatic wave shader: GLSL sources, uniform block and a CPU mirror of
//! the fragment math.

use crate::config::BackgroundConfig;

pub const VERTEX_SHADER: &str = r#"#version 300 es
in vec2 position;

void main() {
    gl_Position = vec4(position, 0.0, 1.0);
}
"#;

pub const FRAGMENT_SHADER: &str = r#"#version 300 es
precision highp float;

uniform vec2 resolution;
uniform float time;
uniform float xScale;
uniform float yScale;
uniform float distortion;

out vec4 fragColor;

void main() {
    vec2 p = (gl_FragCoord.xy * 2.0 - resolution) / min(resolution.x, resolution.y);

    float d = length(p) * distortion;

    float rx = p.x * (1.0 + d);
    float gx = p.x;
    float bx = p.x * (1.0 - d);

    float r = 0.05 / abs(p.y + sin((rx + time) * xScale) * yScale);
    float g = 0.05 / abs(p.y + sin((gx + time) * xScale) * yScale);
    float b = 0.05 / abs(p.y + sin((bx + time) * xScale) * yScale);

    fragColor = vec4(r, g, b, 1.0);
}
"#;

/// Two triangles covering clip space.
pub const QUAD: [f32; 12] = [
    -1.0, -1.0, //
    1.0, -1.0, //
    -1.0, 1.0, //
    1.0, -1.0, //
    -1.0, 1.0, //
    1.0, 1.0, //
];

/// Uniform names as declared in [`FRAGMENT_SHADER`].
pub const UNIFORM_NAMES: [&str; 5] = ["resolution", "time", "xScale", "yScale", "distortion"];

/// The visible area in CSS pixels plus the device pixel ratio.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub width: f64,
    pub height: f64,
    pub pixel_ratio: f64,
}

impl Viewport {
    /// Size of the drawing buffer backing a full-viewport canvas.
    pub fn drawing_size(&self) -> (u32, u32) {
        let ratio = if self.pixel_ratio > 0.0 { self.pixel_ratio } else { 1.0 };
        (
            (self.width * ratio).round().max(1.0) as u32,
            (self.height * ratio).round().max(1.0) as u32,
        )
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Uniforms {
    pub resolution: [f32; 2],
    pub time: f32,
    pub x_scale: f32,
    pub y_scale: f32,
    pub distortion: f32,
}

impl Uniforms {
    pub fn new(config: &BackgroundConfig, viewport: Viewport) -> Self {
        let mut uniforms = Self {
            resolution: [1.0, 1.0],
            time: 0.0,
            x_scale: config.x_scale,
            y_scale: config.y_scale,
            distortion: config.distortion,
        };
        uniforms.set_viewport(viewport);
        uniforms
    }

    pub fn advance(&mut self, step: f32) {
        self.time += step;
    }

    pub fn set_viewport(&mut self, viewport: Viewport) {
        let (w, h) = viewport.drawing_size();
        self.resolution = [w as f32, h as f32];
    }
}

/// Maps a fragment coordinate to the aspect-corrected plane the shader works in:
/// the shorter axis spans [-1, 1].
pub fn frag_to_p(frag: (f32, f32), resolution: [f32; 2]) -> (f32, f32) {
    let [w, h] = resolution;
    let m = w.min(h);
    ((frag.0 * 2.0 - w) / m, (frag.1 * 2.0 - h) / m)
}

/// RGB intensity the fragment shader produces at plane point `p`, unclamped.
pub fn shade(p: (f32, f32), u: &Uniforms) -> [f32; 3] {
    let (x, y) = p;
    let d = (x * x + y * y).sqrt() * u.distortion;
    let channel = |cx: f32| 0.05 / (y + ((cx + u.time) * u.x_scale).sin() * u.y_scale).abs();
    [channel(x * (1.0 + d)), channel(x), channel(x * (1.0 - d))]
}
