use std::f64::consts::PI;

use wasm_bindgen::prelude::*;

#[cfg(test)]
#[path = "math_test.rs"]
mod math_test;

#[wasm_bindgen]
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Vector2 {
    pub x: f64,
    pub y: f64,
}

#[wasm_bindgen]
impl Vector2 {
    #[wasm_bindgen(constructor)]
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn length(&self) -> f64 {
        (self.x * self.x + self.y * self.y).sqrt()
    }

    pub fn distance_to(&self, other: &Vector2) -> f64 {
        Vector2::new(self.x - other.x, self.y - other.y).length()
    }
}

/// Degrees as users see them (0 = up, 90 = right) to radians as the canvas
/// sees them (0 = right).
pub fn deg_to_internal(degrees: f64) -> f64 {
    (degrees - 90.0) * PI / 180.0
}

/// Inverse of [`deg_to_internal`].
pub fn internal_to_deg(radians: f64) -> f64 {
    radians * 180.0 / PI + 90.0
}

/// Plain degree delta to radians, no offset.
pub fn delta_to_rad(degrees: f64) -> f64 {
    degrees * PI / 180.0
}
