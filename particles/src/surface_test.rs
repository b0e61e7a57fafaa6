use super::*;

#[test]
fn viewport_device_size_scales_by_dpr() {
    let vp = Viewport::new(800.0, 600.0, 2.0);
    assert_eq!(vp.device_width(), 1600);
    assert_eq!(vp.device_height(), 1200);
}

#[test]
fn viewport_rejects_non_positive_dpr_and_negative_size() {
    let vp = Viewport::new(-10.0, 20.0, 0.0);
    assert_eq!(vp.width, 0.0);
    assert_eq!(vp.height, 20.0);
    assert_eq!(vp.dpr, 1.0);
}

#[test]
fn viewport_rejects_non_finite_values() {
    let vp = Viewport::new(f64::INFINITY, f64::NAN, f64::INFINITY);
    assert_eq!(vp.width, 0.0);
    assert_eq!(vp.height, 0.0);
    assert_eq!(vp.dpr, 1.0);
    assert_eq!(vp.device_width(), 0);

    let vp = Viewport::new(f64::NEG_INFINITY, 50.0, f64::NAN);
    assert_eq!(vp.width, 0.0);
    assert_eq!(vp.dpr, 1.0);
}

#[test]
fn viewport_device_size_rounds() {
    let vp = Viewport::new(333.0, 100.0, 1.5);
    assert_eq!(vp.device_width(), 500);
    assert_eq!(vp.device_height(), 150);
}

#[test]
fn paint_css_formats_rgba() {
    assert_eq!(Paint::rgba(255, 250, 240, 0.5).css(), "rgba(255, 250, 240, 0.500)");
}

#[test]
fn paint_with_alpha_clamps() {
    let p = Paint::rgba(1, 2, 3, 0.4);
    assert_eq!(p.with_alpha(2.0).a, 1.0);
    assert_eq!(p.with_alpha(-1.0).a, 0.0);
    assert_eq!(p.with_alpha(0.2).r, 1);
}

#[test]
fn recorder_clear_drops_calls_but_keeps_totals() {
    let mut rec = Recorder::new();
    rec.fill_circle((1.0, 1.0), 2.0, Paint::rgba(255, 255, 255, 0.8)).unwrap();
    rec.stroke_line((0.0, 0.0), (1.0, 1.0), 1.0, Paint::rgba(255, 255, 255, 0.3)).unwrap();
    assert_eq!(rec.calls().len(), 2);
    assert!(!rec.is_blank());

    rec.clear().unwrap();
    assert!(rec.is_blank());
    assert_eq!(rec.clears(), 1);
    assert_eq!(rec.total_calls(), 2);
}

#[test]
fn recorder_tracks_visibility_and_viewport() {
    let mut rec = Recorder::new();
    assert!(!rec.is_visible());
    rec.set_visible(true).unwrap();
    rec.resize(Viewport::new(10.0, 20.0, 3.0)).unwrap();
    assert!(rec.is_visible());
    assert_eq!(rec.viewport(), Viewport::new(10.0, 20.0, 3.0));
}

#[test]
fn draw_call_primitive_names() {
    let paint = Paint::rgba(255, 255, 255, 0.1);
    let calls = [
        DrawCall::Line { from: (0.0, 0.0), to: (1.0, 1.0), width: 1.0, paint },
        DrawCall::Circle { center: (0.0, 0.0), radius: 1.0, paint },
        DrawCall::Ellipse { center: (0.0, 0.0), radii: (1.0, 0.5), rotation: 0.0, paint },
        DrawCall::Radial { center: (0.0, 0.0), radius: 1.0, paint },
    ];
    let names: Vec<_> = calls.iter().map(DrawCall::primitive).collect();
    assert_eq!(names, ["line", "circle", "ellipse", "radial"]);
}
