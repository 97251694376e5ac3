use std::cell::RefCell;
use std::rc::Rc;

use wasm_bindgen::prelude::*;
use web_sys::DeviceMotionEvent;

use crate::error::{GameError, Result};
use crate::input::listen;

#[cfg(test)]
#[path = "accelerometer_test.rs"]
mod accelerometer_test;

/// Latest `devicemotion` reading. Everything reads 0 until the first event.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Motion {
    pub ax: f64,
    pub ay: f64,
    pub az: f64,
    pub rot_x: f64,
    pub rot_y: f64,
    pub rot_z: f64,
}

impl Motion {
    /// Store acceleration including gravity, and rotation rates rounded to
    /// whole degrees per second. A missing rotation keeps the last one.
    pub fn record(&mut self, accel: (f64, f64, f64), rotation: Option<(f64, f64, f64)>) {
        (self.ax, self.ay, self.az) = accel;
        if let Some((alpha, beta, gamma)) = rotation {
            self.rot_x = alpha.round();
            self.rot_y = beta.round();
            self.rot_z = gamma.round();
        }
    }
}

#[wasm_bindgen]
pub struct Accelerometer {
    motion: Rc<RefCell<Motion>>,
}

#[wasm_bindgen]
impl Accelerometer {
    #[wasm_bindgen(constructor)]
    pub fn new() -> std::result::Result<Accelerometer, JsValue> {
        Ok(Self::attach()?)
    }

    pub fn ax(&self) -> f64 { self.motion.borrow().ax }
    pub fn ay(&self) -> f64 { self.motion.borrow().ay }
    pub fn az(&self) -> f64 { self.motion.borrow().az }
    pub fn rot_x(&self) -> f64 { self.motion.borrow().rot_x }
    pub fn rot_y(&self) -> f64 { self.motion.borrow().rot_y }
    pub fn rot_z(&self) -> f64 { self.motion.borrow().rot_z }
}

impl Accelerometer {
    fn attach() -> Result<Accelerometer> {
        let window = web_sys::window().ok_or(GameError::NoWindow)?;
        let motion = Rc::new(RefCell::new(Motion::default()));

        if !js_sys::Reflect::has(&window, &JsValue::from_str("DeviceMotionEvent"))? {
            log::warn!("this program requires an accelerometer");
            return Ok(Accelerometer { motion });
        }

        let state = Rc::clone(&motion);
        listen(&window, "devicemotion", move |event: DeviceMotionEvent| {
            let accel = event
                .acceleration_including_gravity()
                .map(|a| {
                    (
                        a.x().unwrap_or(0.0),
                        a.y().unwrap_or(0.0),
                        a.z().unwrap_or(0.0),
                    )
                })
                .unwrap_or_default();
            let rotation = event.rotation_rate().map(|r| {
                (
                    r.alpha().unwrap_or(0.0),
                    r.beta().unwrap_or(0.0),
                    r.gamma().unwrap_or(0.0),
                )
            });
            state.borrow_mut().record(accel, rotation);
        })?;

        Ok(Accelerometer { motion })
    }

    pub fn motion(&self) -> Motion {
        *self.motion.borrow()
    }
}
