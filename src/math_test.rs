#![allow(clippy::float_cmp)]

use super::*;

const EPSILON: f64 = 1e-9;

fn approx_eq(a: f64, b: f64) -> bool {
    (a - b).abs() < EPSILON
}

#[test]
fn up_is_minus_half_pi() {
    assert!(approx_eq(deg_to_internal(0.0), -PI / 2.0));
}

#[test]
fn right_is_zero_radians() {
    assert!(approx_eq(deg_to_internal(90.0), 0.0));
}

#[test]
fn down_is_half_pi() {
    assert!(approx_eq(deg_to_internal(180.0), PI / 2.0));
}

#[test]
fn offset_conversion_inverts() {
    for deg in [0.0, 45.0, 90.0, 135.0, 270.0, -30.0] {
        assert!(approx_eq(internal_to_deg(deg_to_internal(deg)), deg));
    }
}

#[test]
fn delta_has_no_offset() {
    assert!(approx_eq(delta_to_rad(180.0), PI));
    assert!(approx_eq(delta_to_rad(0.0), 0.0));
}

#[test]
fn vector_length_and_distance() {
    let a = Vector2::new(3.0, 4.0);
    assert_eq!(a.length(), 5.0);
    let b = Vector2::new(0.0, 0.0);
    assert_eq!(a.distance_to(&b), 5.0);
}
