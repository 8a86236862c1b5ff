#![allow(clippy::float_cmp)]

use super::*;

const EPSILON: f64 = 1e-10;

fn approx_eq(a: f64, b: f64) -> bool {
    (a - b).abs() < EPSILON
}

fn point_approx_eq(a: Point, b: Point) -> bool {
    approx_eq(a.x, b.x) && approx_eq(a.y, b.y)
}

fn transform() -> ViewportTransform {
    ViewportTransform::new(0.5, 1.7, Size::new(1000.0, 800.0))
}

// --- Point / Size ---

#[test]
fn point_offset_adds_components() {
    let p = Point::new(3.0, 4.0).offset(-1.0, 2.5);
    assert_eq!(p, Point::new(2.0, 6.5));
}

#[test]
fn size_scaled_multiplies_both_sides() {
    assert_eq!(Size::new(280.0, 400.0).scaled(0.5), Size::new(140.0, 200.0));
}

#[test]
fn size_has_area_rejects_degenerate() {
    assert!(Size::new(1.0, 1.0).has_area());
    assert!(!Size::new(0.0, 10.0).has_area());
    assert!(!Size::new(10.0, -1.0).has_area());
    assert!(!Size::new(f64::INFINITY, 10.0).has_area());
    assert!(!Size::new(f64::NAN, 10.0).has_area());
}

// --- rescale_about ---

#[test]
fn rescale_about_keeps_focal_fixed() {
    assert!(approx_eq(rescale_about(100.0, 100.0, 1.0, 1.7), 100.0));
}

#[test]
fn rescale_about_scales_distance() {
    // 50 px right of the focal point at 1.0 becomes 75 px at 1.5.
    assert!(approx_eq(rescale_about(150.0, 100.0, 1.0, 1.5), 175.0));
    assert!(approx_eq(rescale_about(50.0, 100.0, 1.0, 1.5), 25.0));
}

#[test]
fn rescale_about_round_trips() {
    let there = rescale_about(-320.0, 40.0, 0.8, 1.3);
    let back = rescale_about(there, 40.0, 1.3, 0.8);
    assert!(approx_eq(back, -320.0));
}

// --- quantize_scale ---

#[test]
fn quantize_scale_removes_float_noise() {
    assert_eq!(quantize_scale(1.0 + 0.1 + 0.1 + 0.1), 1.3);
    assert_eq!(quantize_scale(0.7000000000000001), 0.7);
}

// --- set_scale ---

#[test]
fn new_transform_starts_at_unit_scale() {
    let t = transform();
    assert_eq!(t.scale, 1.0);
    assert_eq!(t.previous_scale, 1.0);
    assert_eq!(t.origin, Point::default());
}

#[test]
fn new_transform_clamps_initial_scale_into_bounds() {
    let t = ViewportTransform::new(1.2, 2.0, Size::new(10.0, 10.0));
    assert_eq!(t.scale, 1.2);
}

#[test]
fn set_scale_in_range_is_not_clamped() {
    let mut t = transform();
    assert!(!t.set_scale(1.3));
    assert_eq!(t.scale, 1.3);
}

#[test]
fn set_scale_above_max_clamps() {
    let mut t = transform();
    assert!(t.set_scale(2.4));
    assert_eq!(t.scale, 1.7);
}

#[test]
fn set_scale_below_min_clamps() {
    let mut t = transform();
    assert!(t.set_scale(0.1));
    assert_eq!(t.scale, 0.5);
}

#[test]
fn set_scale_at_bound_is_not_clamped() {
    let mut t = transform();
    assert!(!t.set_scale(1.7));
    assert!(!t.set_scale(0.5));
}

#[test]
fn set_scale_nan_keeps_previous_value() {
    let mut t = transform();
    t.set_scale(1.2);
    assert!(t.set_scale(f64::NAN));
    assert_eq!(t.scale, 1.2);
}

// --- conversions ---

#[test]
fn identity_conversion() {
    let t = transform();
    let p = Point::new(50.0, 75.0);
    assert!(point_approx_eq(t.world_to_screen(p), p));
    assert!(point_approx_eq(t.screen_to_world(p), p));
}

#[test]
fn conversions_with_origin_and_scale() {
    let mut t = transform();
    t.origin = Point::new(20.0, 10.0);
    t.scale = 1.5;
    let screen = t.world_to_screen(Point::new(100.0, 40.0));
    assert!(point_approx_eq(screen, Point::new(170.0, 70.0)));
    assert!(point_approx_eq(t.screen_to_world(screen), Point::new(100.0, 40.0)));
}

#[test]
fn viewport_center_is_half_size() {
    assert_eq!(transform().viewport_center(), Point::new(500.0, 400.0));
}
