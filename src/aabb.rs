use crate::math::Vector2;

#[cfg(test)]
#[path = "aabb_test.rs"]
mod aabb_test;

/// Axis-aligned box kept as a center and half extents, the way sprites
/// describe themselves.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AABB {
    center: Vector2,
    half_width: f64,
    half_height: f64,
}

impl AABB {
    pub fn new(min_x: f64, min_y: f64, max_x: f64, max_y: f64) -> Self {
        Self::from_center(
            (min_x + max_x) / 2.0,
            (min_y + max_y) / 2.0,
            max_x - min_x,
            max_y - min_y,
        )
    }

    /// Box of size `width` x `height` centered on `(x, y)`.
    pub fn from_center(x: f64, y: f64, width: f64, height: f64) -> Self {
        AABB {
            center: Vector2::new(x, y),
            half_width: width / 2.0,
            half_height: height / 2.0,
        }
    }

    pub fn center(&self) -> Vector2 { self.center }
    pub fn width(&self) -> f64 { self.half_width * 2.0 }
    pub fn height(&self) -> f64 { self.half_height * 2.0 }
    pub fn min_x(&self) -> f64 { self.center.x - self.half_width }
    pub fn min_y(&self) -> f64 { self.center.y - self.half_height }
    pub fn max_x(&self) -> f64 { self.center.x + self.half_width }
    pub fn max_y(&self) -> f64 { self.center.y + self.half_height }

    /// Points on the edge are inside.
    pub fn contains_point(&self, x: f64, y: f64) -> bool {
        (x - self.center.x).abs() <= self.half_width
            && (y - self.center.y).abs() <= self.half_height
    }

    /// Touching edges count as an intersection.
    pub fn intersects(&self, other: &AABB) -> bool {
        (self.center.x - other.center.x).abs() <= self.half_width + other.half_width
            && (self.center.y - other.center.y).abs() <= self.half_height + other.half_height
    }
}
