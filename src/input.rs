use std::cell::{Ref, RefCell};
use std::rc::Rc;

use wasm_bindgen::convert::FromWasmAbi;
use wasm_bindgen::prelude::*;
use web_sys::{AddEventListenerOptions, EventTarget, HtmlCanvasElement, KeyboardEvent, MouseEvent};

use crate::error::{GameError, Result};
use crate::keys::{KEY_COUNT, K_DOWN, K_LEFT, K_RIGHT, K_UP};
use crate::math::Vector2;

#[cfg(test)]
#[path = "input_test.rs"]
mod input_test;

/// Joystick drag, in pixels, before a virtual arrow key goes down.
pub const VIRTUAL_KEY_THRESHOLD: f64 = 10.0;

/// Everything the DOM listeners have recorded so far.
#[derive(Debug, Clone)]
pub struct InputState {
    keys_down: [bool; KEY_COUNT],
    current_key: Option<u32>,
    mouse: Vector2,
    mouse_down: bool,
    mouse_clicked: bool,
    touchable: bool,
    virtual_keys: bool,
    touch_origin: Option<Vector2>,
    diff: Vector2,
}

impl Default for InputState {
    fn default() -> Self {
        InputState {
            keys_down: [false; KEY_COUNT],
            current_key: None,
            mouse: Vector2::default(),
            mouse_down: false,
            mouse_clicked: false,
            touchable: false,
            virtual_keys: false,
            touch_origin: None,
            diff: Vector2::default(),
        }
    }
}

impl InputState {
    pub fn new(touchable: bool) -> Self {
        InputState { touchable, ..Self::default() }
    }

    pub fn is_touchable(&self) -> bool { self.touchable }
    pub fn current_key(&self) -> Option<u32> { self.current_key }
    pub fn mouse_position(&self) -> Vector2 { self.mouse }
    pub fn mouse_x(&self) -> f64 { self.mouse.x }
    pub fn mouse_y(&self) -> f64 { self.mouse.y }
    pub fn is_mouse_down(&self) -> bool { self.mouse_down }
    pub fn mouse_clicked(&self) -> bool { self.mouse_clicked }
    pub fn diff_x(&self) -> f64 { self.diff.x }
    pub fn diff_y(&self) -> f64 { self.diff.y }

    pub fn key_down(&self, code: u32) -> bool {
        self.keys_down.get(code as usize).copied().unwrap_or(false)
    }

    pub fn press_key(&mut self, code: u32) {
        self.current_key = Some(code);
        self.set_key(code, true);
    }

    pub fn release_key(&mut self, code: u32) {
        self.current_key = None;
        self.set_key(code, false);
    }

    fn set_key(&mut self, code: u32, down: bool) {
        if let Some(slot) = self.keys_down.get_mut(code as usize) {
            *slot = down;
        }
    }

    pub fn clear_keys(&mut self) {
        self.keys_down = [false; KEY_COUNT];
        self.current_key = None;
    }

    pub fn mouse_moved(&mut self, x: f64, y: f64) {
        self.mouse = Vector2::new(x, y);
    }

    pub fn mouse_pressed(&mut self) {
        self.mouse_down = true;
        self.mouse_clicked = true;
    }

    pub fn mouse_released(&mut self) {
        self.mouse_down = false;
        self.mouse_clicked = false;
    }

    /// Map joystick drags onto the arrow keys.
    pub fn set_virtual_keys(&mut self, enabled: bool) {
        self.virtual_keys = enabled;
    }

    pub fn virtual_keys(&self) -> bool {
        self.virtual_keys
    }

    pub fn touch_start(&mut self, x: f64, y: f64) {
        self.touch_origin = Some(Vector2::new(x, y));
        self.mouse_moved(x, y);
    }

    pub fn touch_move(&mut self, x: f64, y: f64) {
        self.mouse_moved(x, y);
        let origin = *self.touch_origin.get_or_insert(Vector2::new(x, y));
        self.diff = Vector2::new(x - origin.x, y - origin.y);

        if self.virtual_keys {
            let (dx, dy) = (self.diff.x, self.diff.y);
            self.set_key(K_RIGHT, dx > VIRTUAL_KEY_THRESHOLD);
            self.set_key(K_LEFT, dx < -VIRTUAL_KEY_THRESHOLD);
            self.set_key(K_DOWN, dy > VIRTUAL_KEY_THRESHOLD);
            self.set_key(K_UP, dy < -VIRTUAL_KEY_THRESHOLD);
        }
    }

    pub fn touch_end(&mut self) {
        self.touch_origin = None;
        self.diff = Vector2::default();
        if self.virtual_keys {
            for code in [K_LEFT, K_RIGHT, K_UP, K_DOWN] {
                self.set_key(code, false);
            }
        }
    }
}

/// Attach `callback` to `target` for the lifetime of the page.
pub(crate) fn listen<E>(
    target: &EventTarget,
    event: &str,
    callback: impl FnMut(E) + 'static,
) -> Result<()>
where
    E: FromWasmAbi + 'static,
{
    let closure = Closure::wrap(Box::new(callback) as Box<dyn FnMut(E)>);
    target.add_event_listener_with_callback(event, closure.as_ref().unchecked_ref())?;
    closure.forget();
    Ok(())
}

/// Like [`listen`], but non-passive so the callback may call
/// `prevent_default` (needed to stop touch drags from scrolling the page).
pub(crate) fn listen_active<E>(
    target: &EventTarget,
    event: &str,
    callback: impl FnMut(E) + 'static,
) -> Result<()>
where
    E: FromWasmAbi + 'static,
{
    let options = AddEventListenerOptions::new();
    options.set_passive(false);
    let closure = Closure::wrap(Box::new(callback) as Box<dyn FnMut(E)>);
    target.add_event_listener_with_callback_and_add_event_listener_options(
        event,
        closure.as_ref().unchecked_ref(),
        &options,
    )?;
    closure.forget();
    Ok(())
}

/// Wires mouse and keyboard listeners into a shared [`InputState`].
pub struct InputHandler {
    state: Rc<RefCell<InputState>>,
}

impl InputHandler {
    pub fn new(canvas: &HtmlCanvasElement, touchable: bool) -> Result<Self> {
        let state = Rc::new(RefCell::new(InputState::new(touchable)));

        {
            let state = Rc::clone(&state);
            let canvas_el = canvas.clone();
            listen(canvas, "mousemove", move |event: MouseEvent| {
                let rect = canvas_el.get_bounding_client_rect();
                let x = f64::from(event.client_x()) - rect.left();
                let y = f64::from(event.client_y()) - rect.top();
                state.borrow_mut().mouse_moved(x, y);
            })?;
        }
        {
            let state = Rc::clone(&state);
            listen(canvas, "mousedown", move |_: MouseEvent| {
                state.borrow_mut().mouse_pressed();
            })?;
        }

        // A press can start on the canvas and end anywhere on the page.
        let document = web_sys::window()
            .ok_or(GameError::NoWindow)?
            .document()
            .ok_or(GameError::NoDocument)?;
        {
            let state = Rc::clone(&state);
            listen(&document, "mouseup", move |_: MouseEvent| {
                state.borrow_mut().mouse_released();
            })?;
        }

        if !touchable {
            {
                let state = Rc::clone(&state);
                listen(&document, "keydown", move |event: KeyboardEvent| {
                    state.borrow_mut().press_key(event.key_code());
                })?;
            }
            {
                let state = Rc::clone(&state);
                listen(&document, "keyup", move |event: KeyboardEvent| {
                    state.borrow_mut().release_key(event.key_code());
                })?;
            }
        }

        Ok(InputHandler { state })
    }

    pub fn state(&self) -> Ref<'_, InputState> {
        self.state.borrow()
    }

    pub(crate) fn shared(&self) -> Rc<RefCell<InputState>> {
        Rc::clone(&self.state)
    }
}
