//! Scrolling camera for tile maps.
//!
//! The camera is an offset into world space: world point `(x, y)` is drawn at
//! `(x - offset_x, y - offset_y)`. When following a target it keeps the
//! target inside a wait box around the view center and re-centers once the
//! target leaves it.

use std::cell::RefCell;
use std::rc::Rc;

use crate::math::Vector2;

#[cfg(test)]
#[path = "camera_test.rs"]
mod camera_test;

/// Shared handle so sprites and the tile map see the same offset.
pub type CameraHandle = Rc<RefCell<Camera>>;

#[derive(Debug, Clone, PartialEq)]
pub struct Camera {
    canvas_width: f64,
    canvas_height: f64,
    pub offset_x: f64,
    pub offset_y: f64,
    following: bool,
    wait_x: f64,
    wait_y: f64,
}

impl Camera {
    pub fn new(canvas_width: f64, canvas_height: f64) -> Self {
        Camera {
            canvas_width,
            canvas_height,
            offset_x: 0.0,
            offset_y: 0.0,
            following: false,
            wait_x: 0.0,
            wait_y: 0.0,
        }
    }

    pub fn into_handle(self) -> CameraHandle {
        Rc::new(RefCell::new(self))
    }

    pub fn move_camera(&mut self, dx: f64, dy: f64) {
        self.offset_x += dx;
        self.offset_y += dy;
    }

    /// Start following. The target may drift `wait_x`/`wait_y` pixels from
    /// the view center before the camera moves.
    pub fn follow(&mut self, wait_x: f64, wait_y: f64) {
        self.following = true;
        self.wait_x = wait_x.max(0.0);
        self.wait_y = wait_y.max(0.0);
    }

    pub fn unfollow(&mut self) {
        self.following = false;
    }

    pub fn is_following(&self) -> bool {
        self.following
    }

    pub fn focal_point(&self) -> Vector2 {
        Vector2::new(
            self.offset_x + self.canvas_width / 2.0,
            self.offset_y + self.canvas_height / 2.0,
        )
    }

    /// Whether `target` is still inside the wait box.
    pub fn check_focus_bounds(&self, target: Vector2) -> bool {
        let focus = self.focal_point();
        (focus.x - target.x).abs() < self.wait_x && (focus.y - target.y).abs() < self.wait_y
    }

    /// Re-center on `target` (a world-space center point) if following and
    /// the target has left the wait box.
    pub fn update(&mut self, target: Option<Vector2>) {
        let Some(target) = target else { return };
        if !self.following || self.check_focus_bounds(target) {
            return;
        }
        self.offset_x = target.x - self.canvas_width / 2.0;
        self.offset_y = target.y - self.canvas_height / 2.0;
    }

    pub fn world_to_screen(&self, world: Vector2) -> Vector2 {
        Vector2::new(world.x - self.offset_x, world.y - self.offset_y)
    }

    pub fn screen_to_world(&self, screen: Vector2) -> Vector2 {
        Vector2::new(screen.x + self.offset_x, screen.y + self.offset_y)
    }

    pub fn view_size(&self) -> (f64, f64) {
        (self.canvas_width, self.canvas_height)
    }
}
