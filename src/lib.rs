pub mod aabb;
pub mod accelerometer;
pub mod animation;
mod animation_frame;
pub mod button;
pub mod camera;
pub mod error;
pub mod input;
pub mod joystick;
pub mod keys;
pub mod math;
pub mod scene;
pub mod sound;
pub mod sprite;
pub mod tilemap;
pub mod timer;

#[cfg(test)]
mod test_support;

use wasm_bindgen::prelude::*;

pub use accelerometer::Accelerometer;
pub use animation::{Animation, CycleLayout, PlayMode};
pub use button::GameButton;
pub use camera::{Camera, CameraHandle};
pub use error::{GameError, Result};
pub use input::InputState;
pub use joystick::Joystick;
pub use math::Vector2;
pub use scene::{LoopMode, Scene, SceneConfig};
pub use sound::Sound;
pub use sprite::{BoundAction, Sprite};
pub use tilemap::{Tile, TileMap, TileSelector};
pub use timer::Timer;

#[wasm_bindgen(start)]
pub fn start() -> std::result::Result<(), JsValue> {
    #[cfg(debug_assertions)]
    console_error_panic_hook::set_once();

    let level = if cfg!(debug_assertions) {
        log::Level::Debug
    } else {
        log::Level::Info
    };
    if let Err(err) = console_log::init_with_level(level) {
        log::debug!("console logger already installed: {err}");
    }
    Ok(())
}
