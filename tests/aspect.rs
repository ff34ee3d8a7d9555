use folio_wasm::config::BackgroundConfig;
use folio_wasm::shader::{frag_to_p, shade, Uniforms, Viewport};

fn approx_eq2(a: (f32, f32), b: (f32, f32), eps: f32) -> bool {
    (a.0 - b.0).abs() < eps && (a.1 - b.1).abs() < eps
}

/// Fragment coordinate of a point given in the canonical square space.
fn frag_from_sq(p: (f32, f32), res: [f32; 2]) -> (f32, f32) {
    let [w, h] = res;
    let m = w.min(h);
    (w / 2.0 + p.0 * m / 2.0, h / 2.0 + p.1 * m / 2.0)
}

fn uniforms_at(time: f32) -> Uniforms {
    let viewport = Viewport { width: 1920.0, height: 1080.0, pixel_ratio: 1.0 };
    let mut u = Uniforms::new(&BackgroundConfig::default(), viewport);
    u.time = time;
    u
}

#[test]
fn aspect_invariant_plane_mapping() {
    let wide = [1920.0, 1080.0];
    let tall = [1080.0, 1920.0];
    let samples = [(0.0, 0.0), (0.2, 0.0), (0.0, 0.2), (-0.6, 0.8), (0.8, -0.6)];

    for &p in &samples {
        let p1 = frag_to_p(frag_from_sq(p, wide), wide);
        let p2 = frag_to_p(frag_from_sq(p, tall), tall);
        assert!(approx_eq2(p1, p, 1e-5), "wide: p1={:?} p={:?}", p1, p);
        assert!(approx_eq2(p1, p2, 1e-5), "p1={:?} p2={:?}", p1, p2);
    }
}

#[test]
fn shorter_axis_spans_unit_range() {
    let res = [1600.0, 900.0];
    let bottom = frag_to_p((800.0, 0.0), res);
    let top = frag_to_p((800.0, 900.0), res);
    assert!(approx_eq2(bottom, (0.0, -1.0), 1e-6));
    assert!(approx_eq2(top, (0.0, 1.0), 1e-6));
}

#[test]
fn channels_coincide_on_the_vertical_axis() {
    let u = uniforms_at(0.7);
    let [r, g, b] = shade((0.0, 0.3), &u);
    assert!((r - g).abs() < 1e-6 && (g - b).abs() < 1e-6, "rgb=({r}, {g}, {b})");
}

#[test]
fn channels_split_away_from_the_centre() {
    let u = uniforms_at(0.0);
    let [r, g, b] = shade((0.9, 0.1), &u);
    assert!((r - g).abs() > 1e-4, "red should be offset: r={r} g={g}");
    assert!((b - g).abs() > 1e-4, "blue should be offset: b={b} g={g}");
}

#[test]
fn brightest_on_the_green_trace() {
    let u = uniforms_at(0.25);
    let x = 0.4;
    let on_trace = -((x + u.time) * u.x_scale).sin() * u.y_scale;
    let near = shade((x, on_trace + 0.001), &u)[1];
    let far = shade((x, on_trace + 0.5), &u)[1];
    assert!(near > 10.0 * far, "near={near} far={far}");
}
