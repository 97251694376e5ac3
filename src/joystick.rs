//! Virtual joystick for touch screens.
//!
//! A touch is read as the mouse position, and dragging away from where the
//! touch started is read as a joystick deflection (`diff_x`, `diff_y`). With
//! virtual keys enabled the deflection also presses the arrow keys, so games
//! written for the keyboard work on a tablet unchanged.

use std::cell::RefCell;
use std::rc::Rc;

use web_sys::{HtmlCanvasElement, TouchEvent};

use crate::error::Result;
use crate::input::{listen, listen_active, InputState};
use crate::scene::{self, Scene};

pub struct Joystick {
    input: Rc<RefCell<InputState>>,
}

impl Joystick {
    pub fn new(scene: &Scene, virtual_keys: bool) -> Result<Joystick> {
        let input = scene.shared_input();
        input.borrow_mut().set_virtual_keys(virtual_keys);

        if !scene.is_touchable() {
            log::info!("no touch screen detected; joystick will stay centered");
            return Ok(Joystick { input });
        }

        let document = scene::document()?;
        {
            let input = Rc::clone(&input);
            let canvas = scene.canvas().clone();
            listen(&document, "touchstart", move |event: TouchEvent| {
                if let Some((x, y)) = first_touch(&event, &canvas) {
                    input.borrow_mut().touch_start(x, y);
                }
            })?;
        }
        {
            let input = Rc::clone(&input);
            let canvas = scene.canvas().clone();
            listen_active(&document, "touchmove", move |event: TouchEvent| {
                event.prevent_default();
                if let Some((x, y)) = first_touch(&event, &canvas) {
                    input.borrow_mut().touch_move(x, y);
                }
            })?;
        }
        {
            let input = Rc::clone(&input);
            listen(&document, "touchend", move |_: TouchEvent| {
                input.borrow_mut().touch_end();
            })?;
        }

        log::debug!("joystick attached (virtual keys: {virtual_keys})");
        Ok(Joystick { input })
    }

    pub fn diff_x(&self) -> f64 { self.input.borrow().diff_x() }
    pub fn diff_y(&self) -> f64 { self.input.borrow().diff_y() }
    pub fn mouse_x(&self) -> f64 { self.input.borrow().mouse_x() }
    pub fn mouse_y(&self) -> f64 { self.input.borrow().mouse_y() }

    pub fn set_virtual_keys(&self, enabled: bool) {
        self.input.borrow_mut().set_virtual_keys(enabled);
    }
}

/// First touch point, relative to the canvas.
fn first_touch(event: &TouchEvent, canvas: &HtmlCanvasElement) -> Option<(f64, f64)> {
    let touch = event.touches().get(0)?;
    let rect = canvas.get_bounding_client_rect();
    Some((
        f64::from(touch.client_x()) - rect.left(),
        f64::from(touch.client_y()) - rect.top(),
    ))
}
