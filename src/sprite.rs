//! Sprites: images that move, turn, bounce off walls and animate.
//!
//! Position is the center of the sprite. Motion is kept both as a vector
//! (`dx`, `dy`) and as a speed plus heading; whichever one is changed, the
//! other is recomputed. User-facing angles are degrees where 0 is up and 90
//! is right.

use std::fmt;
use std::rc::Rc;

use web_sys::{CanvasRenderingContext2d, HtmlImageElement};

use crate::aabb::AABB;
use crate::animation::{Animation, CycleLayout, PlayMode};
use crate::camera::CameraHandle;
use crate::error::{GameError, Result};
use crate::input::InputState;
use crate::math::{delta_to_rad, deg_to_internal, internal_to_deg, Vector2};
use crate::scene::Scene;
use crate::timer::{system_clock, Clock};

#[cfg(test)]
#[path = "sprite_test.rs"]
mod sprite_test;

/// What a sprite does when its center leaves the visible area.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BoundAction {
    /// Reappear on the opposite edge.
    #[default]
    Wrap = 0,
    /// Reverse the component of motion that crossed the edge.
    Bounce = 1,
    /// Stop moving.
    Stop = 3,
    /// Stop and disappear.
    Die = 4,
    /// Keep going.
    Continue = 5,
}

pub struct Sprite {
    context: Option<CanvasRenderingContext2d>,
    image: Option<HtmlImageElement>,
    animation: Option<Animation>,
    camera: Option<CameraHandle>,
    canvas_width: f64,
    canvas_height: f64,
    pub width: f64,
    pub height: f64,
    pub x: f64,
    pub y: f64,
    pub dx: f64,
    pub dy: f64,
    speed: f64,
    /// Radians, 0 = right.
    move_angle: f64,
    /// Radians, 0 = right.
    img_angle: f64,
    visible: bool,
    bound_action: BoundAction,
}

impl fmt::Debug for Sprite {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Sprite")
            .field("x", &self.x)
            .field("y", &self.y)
            .field("dx", &self.dx)
            .field("dy", &self.dy)
            .field("speed", &self.speed)
            .field("move_angle", &self.move_angle)
            .field("visible", &self.visible)
            .field("bound_action", &self.bound_action)
            .finish_non_exhaustive()
    }
}

impl Sprite {
    /// Sprite drawn on `scene`'s canvas from `image_file`, `width` x `height`
    /// pixels.
    pub fn new(scene: &Scene, image_file: &str, width: f64, height: f64) -> Result<Sprite> {
        let image = HtmlImageElement::new()?;
        image.set_src(image_file);
        let mut sprite = Sprite::detached(scene.width(), scene.height(), width, height);
        sprite.context = Some(scene.context().clone());
        sprite.image = Some(image);
        Ok(sprite)
    }

    /// Sprite with no canvas or image attached. It moves and collides like
    /// any other sprite but draws nothing.
    pub fn detached(canvas_width: f64, canvas_height: f64, width: f64, height: f64) -> Sprite {
        Sprite {
            context: None,
            image: None,
            animation: None,
            camera: None,
            canvas_width,
            canvas_height,
            width,
            height,
            x: 200.0,
            y: 200.0,
            dx: 10.0,
            dy: 0.0,
            speed: 10.0,
            move_angle: 0.0,
            img_angle: 0.0,
            visible: true,
            bound_action: BoundAction::Wrap,
        }
    }

    pub fn set_image(&mut self, image_file: &str) -> Result<()> {
        match &self.image {
            Some(image) => image.set_src(image_file),
            None => {
                let image = HtmlImageElement::new()?;
                image.set_src(image_file);
                self.image = Some(image);
            }
        }
        Ok(())
    }

    pub fn change_image(&mut self, image_file: &str) -> Result<()> {
        self.set_image(image_file)
    }

    // --- position ---

    pub fn set_position(&mut self, x: f64, y: f64) {
        self.x = x;
        self.y = y;
    }

    pub fn position(&self) -> Vector2 {
        Vector2::new(self.x, self.y)
    }

    pub fn set_x(&mut self, x: f64) { self.x = x; }
    pub fn set_y(&mut self, y: f64) { self.y = y; }
    pub fn set_dx(&mut self, dx: f64) { self.dx = dx; }
    pub fn set_dy(&mut self, dy: f64) { self.dy = dy; }
    pub fn change_x_by(&mut self, dx: f64) { self.x += dx; }
    pub fn change_y_by(&mut self, dy: f64) { self.y += dy; }

    pub fn hide(&mut self) { self.visible = false; }
    pub fn show(&mut self) { self.visible = true; }
    pub fn is_visible(&self) -> bool { self.visible }

    pub fn bounds(&self) -> AABB {
        AABB::from_center(self.x, self.y, self.width, self.height)
    }

    // --- per-frame ---

    /// Draw at the current position and image angle. Does nothing for a
    /// detached sprite.
    pub fn draw(&mut self) -> Result<()> {
        let Some(ctx) = self.context.clone() else {
            return Ok(());
        };
        let (cam_x, cam_y) = self.camera_offset();

        ctx.save();
        let drawn = self.draw_transformed(&ctx, self.x - cam_x, self.y - cam_y);
        ctx.restore();
        drawn
    }

    fn draw_transformed(&mut self, ctx: &CanvasRenderingContext2d, x: f64, y: f64) -> Result<()> {
        ctx.translate(x, y)?;
        ctx.rotate(self.img_angle)?;

        if let Some(animation) = self.animation.as_mut() {
            return animation.draw_frame(ctx);
        }
        if let Some(image) = &self.image {
            ctx.draw_image_with_html_image_element_and_dw_and_dh(
                image,
                -self.width / 2.0,
                -self.height / 2.0,
                self.width,
                self.height,
            )?;
        }
        Ok(())
    }

    /// Move one step and apply the bound action, without drawing.
    pub fn step(&mut self) {
        self.x += self.dx;
        self.y += self.dy;
        self.check_bounds();
    }

    /// Move, handle the edges, and draw if visible. Call once per frame.
    pub fn update(&mut self) -> Result<()> {
        self.step();
        if self.visible {
            self.draw()?;
        }
        Ok(())
    }

    pub fn set_bound_action(&mut self, action: BoundAction) {
        self.bound_action = action;
    }

    pub fn bound_action(&self) -> BoundAction {
        self.bound_action
    }

    fn camera_offset(&self) -> (f64, f64) {
        self.camera
            .as_ref()
            .map(|cam| {
                let cam = cam.borrow();
                (cam.offset_x, cam.offset_y)
            })
            .unwrap_or((0.0, 0.0))
    }

    pub fn check_bounds(&mut self) {
        let (cam_x, cam_y) = self.camera_offset();
        let left = cam_x;
        let right = self.canvas_width + cam_x;
        let top = cam_y;
        let bottom = self.canvas_height + cam_y;

        let off_right = self.x > right;
        let off_left = self.x < left;
        let off_bottom = self.y > bottom;
        let off_top = self.y < top;
        let off_any = off_right || off_left || off_bottom || off_top;

        match self.bound_action {
            BoundAction::Wrap => {
                if off_right {
                    self.x = left;
                }
                if off_bottom {
                    self.y = top;
                }
                if off_left {
                    self.x = right;
                }
                if off_top {
                    self.y = bottom;
                }
            }
            BoundAction::Bounce => {
                if off_top || off_bottom {
                    self.dy = -self.dy;
                    self.calc_speed_angle();
                    self.img_angle = self.move_angle;
                }
                if off_left || off_right {
                    self.dx = -self.dx;
                    self.calc_speed_angle();
                    self.img_angle = self.move_angle;
                }
            }
            BoundAction::Stop if off_any => self.set_speed(0.0),
            BoundAction::Die if off_any => {
                self.hide();
                self.set_speed(0.0);
            }
            BoundAction::Stop | BoundAction::Die | BoundAction::Continue => {}
        }
    }

    // --- speed and direction ---

    /// Recompute `dx`/`dy` from speed and heading.
    pub fn calc_vector(&mut self) {
        self.dx = self.speed * self.move_angle.cos();
        self.dy = self.speed * self.move_angle.sin();
    }

    /// Recompute speed and heading from `dx`/`dy`.
    pub fn calc_speed_angle(&mut self) {
        self.speed = self.dx.hypot(self.dy);
        self.move_angle = self.dy.atan2(self.dx);
    }

    pub fn set_speed(&mut self, speed: f64) {
        self.speed = speed;
        self.calc_vector();
    }

    /// Speed derived from the current motion vector.
    pub fn speed(&self) -> f64 {
        self.dx.hypot(self.dy)
    }

    pub fn change_speed_by(&mut self, diff: f64) {
        self.speed += diff;
        self.calc_vector();
    }

    pub fn set_img_angle(&mut self, degrees: f64) {
        self.img_angle = deg_to_internal(degrees);
    }

    pub fn img_angle(&self) -> f64 {
        internal_to_deg(self.img_angle)
    }

    pub fn change_img_angle_by(&mut self, degrees: f64) {
        self.img_angle += delta_to_rad(degrees);
    }

    pub fn set_move_angle(&mut self, degrees: f64) {
        self.move_angle = deg_to_internal(degrees);
        self.calc_vector();
    }

    pub fn change_move_angle_by(&mut self, degrees: f64) {
        self.move_angle += delta_to_rad(degrees);
        self.calc_vector();
    }

    pub fn move_angle(&self) -> f64 {
        internal_to_deg(self.move_angle)
    }

    /// Point both the image and the motion in `degrees`.
    pub fn set_angle(&mut self, degrees: f64) {
        self.set_move_angle(degrees);
        self.set_img_angle(degrees);
    }

    pub fn change_angle_by(&mut self, degrees: f64) {
        self.change_move_angle_by(degrees);
        self.change_img_angle_by(degrees);
    }

    pub fn turn_by(&mut self, degrees: f64) {
        self.change_angle_by(degrees);
    }

    /// Push the sprite with `thrust` in direction `degrees`, on top of its
    /// current motion.
    pub fn add_vector(&mut self, degrees: f64, thrust: f64) {
        let angle = deg_to_internal(degrees);
        self.dx += thrust * angle.cos();
        self.dy += thrust * angle.sin();
        self.calc_speed_angle();
    }

    // --- queries ---

    /// Bounding-box overlap. Hidden sprites never collide.
    pub fn collides_with(&self, other: &Sprite) -> bool {
        self.visible && other.visible && self.bounds().intersects(&other.bounds())
    }

    pub fn distance_to(&self, other: &Sprite) -> f64 {
        self.position().distance_to(&other.position())
    }

    /// Direction, in degrees, of the line from `other` to this sprite. A
    /// target straight above reads 180. Use [`Sprite::heading_to`] to aim at
    /// `other`.
    pub fn angle_to(&self, other: &Sprite) -> f64 {
        let diff_x = self.x - other.x;
        let diff_y = self.y - other.y;
        internal_to_deg(diff_y.atan2(diff_x))
    }

    /// Heading, in degrees, that would move this sprite toward `other`.
    pub fn heading_to(&self, other: &Sprite) -> f64 {
        internal_to_deg((other.y - self.y).atan2(other.x - self.x))
    }

    /// True while the pointer is pressed over the sprite. On touch screens
    /// a touch inside the sprite counts.
    pub fn is_mouse_down(&self, input: &InputState) -> bool {
        let inside = self.bounds().contains_point(input.mouse_x(), input.mouse_y());
        inside && (input.is_touchable() || input.mouse_clicked())
    }

    pub fn is_clicked(&self, input: &InputState) -> bool {
        self.is_mouse_down(input)
    }

    /// Measure bounds relative to `camera` and draw offset by it.
    pub fn set_camera_relative(&mut self, camera: CameraHandle) {
        self.camera = Some(camera);
    }

    pub fn report(&self) {
        log::info!(
            "x: {}, y: {}, dx: {}, dy: {}, speed: {}, angle: {}",
            self.x,
            self.y,
            self.dx,
            self.dy,
            self.speed,
            self.move_angle
        );
    }

    // --- animation ---

    /// Treat the sprite's image as an `img_width` x `img_height` sheet of
    /// `cell_width` x `cell_height` cells.
    pub fn load_animation(
        &mut self,
        img_width: f64,
        img_height: f64,
        cell_width: f64,
        cell_height: f64,
    ) -> Result<()> {
        self.load_animation_with_clock(img_width, img_height, cell_width, cell_height, system_clock())
    }

    pub fn load_animation_with_clock(
        &mut self,
        img_width: f64,
        img_height: f64,
        cell_width: f64,
        cell_height: f64,
        clock: Rc<dyn Clock>,
    ) -> Result<()> {
        let animation = Animation::new(
            self.image.clone(),
            img_width,
            img_height,
            cell_width,
            cell_height,
            clock,
        )?;
        self.animation = Some(animation);
        Ok(())
    }

    pub fn animation(&self) -> Option<&Animation> {
        self.animation.as_ref()
    }

    fn animation_mut(&mut self) -> Result<&mut Animation> {
        self.animation.as_mut().ok_or(GameError::NoAnimation)
    }

    pub fn generate_animation_cycles(&mut self, layout: CycleLayout) -> Result<()> {
        self.animation_mut()?.generate_cycles(layout)
    }

    pub fn rename_cycles<S: AsRef<str>>(&mut self, names: &[S]) -> Result<()> {
        self.animation_mut()?.rename_cycles(names);
        Ok(())
    }

    pub fn specify_cycle(&mut self, name: &str, starting_cell: u32, frames: u32) -> Result<()> {
        self.animation_mut()?.add_cycle(name, starting_cell, frames)
    }

    /// A one-frame cycle, for still poses picked from the sheet.
    pub fn specify_state(&mut self, name: &str, cell: u32) -> Result<()> {
        self.animation_mut()?.add_cycle(name, cell, 1)
    }

    pub fn set_current_cycle(&mut self, name: &str) -> Result<()> {
        self.animation_mut()?.set_cycle(name)
    }

    pub fn set_cycle_play_mode(&mut self, name: &str, mode: PlayMode) -> Result<()> {
        self.animation_mut()?.set_cycle_play_mode(name, mode)
    }

    pub fn pause_animation(&mut self) -> Result<()> {
        self.animation_mut()?.pause();
        Ok(())
    }

    pub fn play_animation(&mut self) -> Result<()> {
        self.animation_mut()?.play();
        Ok(())
    }

    pub fn reset_animation(&mut self) -> Result<()> {
        self.animation_mut()?.reset();
        Ok(())
    }

    /// Milliseconds for one pass through a cycle.
    pub fn set_animation_speed(&mut self, length_ms: f64) -> Result<()> {
        self.animation_mut()?.set_speed(length_ms);
        Ok(())
    }
}
