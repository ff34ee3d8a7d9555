//! Per-column waveform for the Canvas2D fallback.
//!
//! Each column gets three glowing traces (red, white, blue); the outer two
//! stretch away from the centre to fake the shader's chromatic split.

use crate::shader::Uniforms;

/// Fraction of the canvas height a trace swings either side of centre.
const AMPLITUDE: f64 = 0.3;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Trace {
    pub rgb: [u8; 3],
    pub intensity: f64,
}

pub const TRACES: [Trace; 3] = [
    Trace { rgb: [255, 50, 50], intensity: 1.0 },
    Trace { rgb: [255, 255, 255], intensity: 1.2 },
    Trace { rgb: [50, 50, 255], intensity: 1.0 },
];

/// Vertical centres of the red, white and blue traces in one column.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Column {
    pub y: [f64; 3],
}

impl Column {
    pub fn at(x: u32, width: u32, height: u32, uniforms: &Uniforms) -> Self {
        let width = f64::from(width.max(1));
        let height = f64::from(height);
        let nx = (f64::from(x) / width) * 2.0 - 1.0;
        let d = f64::from(uniforms.distortion) * nx.abs();
        let t = f64::from(uniforms.time);
        let centre = height / 2.0;
        let wave = |sx: f64| centre + (sx + t).sin() * 0.5 * height * AMPLITUDE;
        Self {
            y: [wave(nx * (1.0 + d)), wave(nx), wave(nx * (1.0 - d))],
        }
    }
}

/// One band of a glow: a 1px wide rect `spread` pixels either side of the trace.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GlowLayer {
    pub spread: u32,
    pub alpha: f64,
}

/// Bands from widest to narrowest; alpha grows toward the centre.
pub fn glow_layers(intensity: f64, max_spread: u32) -> impl Iterator<Item = GlowLayer> {
    (1..=max_spread).rev().map(move |spread| GlowLayer {
        spread,
        alpha: (intensity / f64::from(spread)) * 0.8,
    })
}

/// CSS colour string for a trace at a given alpha.
pub fn rgba(rgb: [u8; 3], alpha: f64) -> String {
    format!("rgba({}, {}, {}, {})", rgb[0], rgb[1], rgb[2], alpha.min(1.0))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::BackgroundConfig;
    use crate::shader::Viewport;

    fn uniforms(time: f32) -> Uniforms {
        let viewport = Viewport { width: 200.0, height: 100.0, pixel_ratio: 1.0 };
        let mut u = Uniforms::new(&BackgroundConfig::default(), viewport);
        u.time = time;
        u
    }

    #[test]
    fn centre_column_sits_on_the_midline_at_rest() {
        let column = Column::at(100, 200, 100, &uniforms(0.0));
        for y in column.y {
            assert!((y - 50.0).abs() < 1e-9, "y={y}");
        }
    }

    #[test]
    fn outer_traces_split_toward_the_edges() {
        let u = uniforms(0.3);
        let centre = Column::at(100, 200, 100, &u);
        let edge = Column::at(10, 200, 100, &u);
        let spread = |c: Column| (c.y[0] - c.y[2]).abs();
        assert!(spread(edge) > spread(centre));
    }

    #[test]
    fn glow_brightens_toward_the_trace() {
        let layers: Vec<_> = glow_layers(1.0, 30).collect();
        assert_eq!(layers.len(), 30);
        assert_eq!(layers[0].spread, 30);
        assert_eq!(layers[29].spread, 1);
        assert!(layers.windows(2).all(|w| w[0].alpha < w[1].alpha));
        assert!((layers[29].alpha - 0.8).abs() < 1e-12);
    }
}
