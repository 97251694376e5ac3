//! The scene owns the canvas, its 2D context, the input listeners, and the
//! timer that drives the user's update function.

use std::cell::{Cell, Ref, RefCell};
use std::rc::Rc;

use gloo_timers::callback::Interval;
use serde::Deserialize;
use wasm_bindgen::prelude::*;
use web_sys::{CanvasRenderingContext2d, Document, HtmlCanvasElement, Window};

use crate::animation_frame;
use crate::error::{GameError, Result};
use crate::input::{InputHandler, InputState};

#[cfg(test)]
#[path = "scene_test.rs"]
mod scene_test;

/// How [`Scene::start`] schedules the update function.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum LoopMode {
    /// Fixed `setInterval` tick of `frame_interval_ms`.
    #[default]
    Interval,
    /// Once per browser repaint.
    AnimationFrame,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SceneConfig {
    pub width: u32,
    pub height: u32,
    /// Offset of the canvas from the page origin, in CSS pixels.
    pub left: f64,
    pub top: f64,
    pub background: String,
    pub frame_interval_ms: u32,
    pub loop_mode: LoopMode,
}

impl Default for SceneConfig {
    fn default() -> Self {
        SceneConfig {
            width: 800,
            height: 600,
            left: 10.0,
            top: 10.0,
            background: "lightgray".to_string(),
            frame_interval_ms: 50,
            loop_mode: LoopMode::Interval,
        }
    }
}

impl SceneConfig {
    /// Decode a plain JS object such as `{ width: 640, loopMode: "animationFrame" }`.
    /// Missing fields keep their defaults.
    pub fn from_js(value: JsValue) -> Result<Self> {
        let config: SceneConfig = serde_wasm_bindgen::from_value(value)
            .map_err(|e| GameError::InvalidConfig(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.width == 0 || self.height == 0 {
            return Err(GameError::InvalidConfig(format!(
                "canvas size {}x{} must be non-zero",
                self.width, self.height
            )));
        }
        if self.loop_mode == LoopMode::Interval && self.frame_interval_ms == 0 {
            return Err(GameError::InvalidConfig("frame interval must be non-zero".into()));
        }
        Ok(())
    }
}

enum LoopHandle {
    Interval(Interval),
    AnimationFrame(Rc<Cell<bool>>),
}

impl LoopHandle {
    /// Dropping an `Interval` cancels it.
    fn cancel(self) {
        match self {
            LoopHandle::Interval(interval) => drop(interval),
            LoopHandle::AnimationFrame(running) => running.set(false),
        }
    }
}

pub struct Scene {
    window: Rc<Window>,
    canvas: HtmlCanvasElement,
    context: CanvasRenderingContext2d,
    input: InputHandler,
    config: SceneConfig,
    running: Option<LoopHandle>,
}

impl Scene {
    pub fn new() -> Result<Scene> {
        Self::with_config(SceneConfig::default())
    }

    pub fn with_config(config: SceneConfig) -> Result<Scene> {
        config.validate()?;

        let window = web_sys::window().ok_or(GameError::NoWindow)?;
        let document = window.document().ok_or(GameError::NoDocument)?;
        let canvas = document
            .create_element("canvas")?
            .dyn_into::<HtmlCanvasElement>()
            .map_err(|_| GameError::Cast("HtmlCanvasElement"))?;
        body(&document)?.append_child(&canvas)?;

        let context = canvas
            .get_context("2d")?
            .ok_or(GameError::NoContext)?
            .dyn_into::<CanvasRenderingContext2d>()
            .map_err(|_| GameError::Cast("CanvasRenderingContext2d"))?;

        let touchable = js_sys::Reflect::has(&window, &JsValue::from_str("ontouchstart"))?;
        let input = InputHandler::new(&canvas, touchable)?;

        let mut scene = Scene {
            window: Rc::new(window),
            canvas,
            context,
            input,
            config: config.clone(),
            running: None,
        };
        scene.set_size(config.width, config.height);
        scene.set_pos(config.left, config.top)?;
        scene.set_bg(&config.background)?;

        log::info!(
            "scene created: {}x{} canvas, touchable = {}",
            config.width,
            config.height,
            touchable
        );
        Ok(scene)
    }

    pub fn canvas(&self) -> &HtmlCanvasElement { &self.canvas }
    pub fn context(&self) -> &CanvasRenderingContext2d { &self.context }
    pub fn config(&self) -> &SceneConfig { &self.config }
    pub fn width(&self) -> f64 { f64::from(self.config.width) }
    pub fn height(&self) -> f64 { f64::from(self.config.height) }
    pub fn is_touchable(&self) -> bool { self.input.state().is_touchable() }
    pub fn is_running(&self) -> bool { self.running.is_some() }

    pub fn clear(&self) {
        self.context.clear_rect(0.0, 0.0, self.width(), self.height());
    }

    /// Run `update` on every tick until [`Scene::stop`] is called. Starting
    /// an already running scene replaces its update function.
    pub fn start<F>(&mut self, update: F) -> Result<()>
    where
        F: FnMut() + 'static,
    {
        self.stop();
        let handle = match self.config.loop_mode {
            LoopMode::Interval => {
                LoopHandle::Interval(Interval::new(self.config.frame_interval_ms, update))
            }
            LoopMode::AnimationFrame => {
                let running = Rc::new(Cell::new(true));
                let callback: Rc<RefCell<dyn FnMut()>> = Rc::new(RefCell::new(update));
                animation_frame::request_recursive(
                    Rc::clone(&self.window),
                    callback,
                    Rc::clone(&running),
                )?;
                LoopHandle::AnimationFrame(running)
            }
        };
        log::debug!("scene started ({:?})", self.config.loop_mode);
        self.running = Some(handle);
        Ok(())
    }

    pub fn stop(&mut self) {
        if let Some(handle) = self.running.take() {
            handle.cancel();
            log::debug!("scene stopped");
        }
    }

    pub fn set_size(&mut self, width: u32, height: u32) {
        self.config.width = width;
        self.config.height = height;
        self.canvas.set_width(width);
        self.canvas.set_height(height);
    }

    /// Offset the canvas from the top-left of the page.
    pub fn set_pos(&mut self, left: f64, top: f64) -> Result<()> {
        self.config.left = left;
        self.config.top = top;
        self.canvas
            .style()
            .set_property("transform", &format!("translate({left}px, {top}px)"))?;
        Ok(())
    }

    pub fn set_size_pos(&mut self, width: u32, height: u32, left: f64, top: f64) -> Result<()> {
        self.set_size(width, height);
        self.set_pos(left, top)
    }

    pub fn set_bg(&mut self, color: &str) -> Result<()> {
        self.config.background = color.to_string();
        self.canvas.style().set_property("background-color", color)?;
        Ok(())
    }

    pub fn hide_cursor(&self) -> Result<()> {
        self.canvas.style().set_property("cursor", "none")?;
        Ok(())
    }

    pub fn show_cursor(&self) -> Result<()> {
        self.canvas.style().set_property("cursor", "default")?;
        Ok(())
    }

    pub fn hide(&self) -> Result<()> {
        self.canvas.style().set_property("display", "none")?;
        Ok(())
    }

    pub fn show(&self) -> Result<()> {
        self.canvas.style().set_property("display", "block")?;
        Ok(())
    }

    /// Snapshot of keyboard, mouse and touch state.
    pub fn input(&self) -> Ref<'_, InputState> {
        self.input.state()
    }

    pub(crate) fn shared_input(&self) -> Rc<RefCell<InputState>> {
        self.input.shared()
    }

    /// Mouse position relative to the canvas.
    pub fn mouse_x(&self) -> f64 { self.input().mouse_x() }
    pub fn mouse_y(&self) -> f64 { self.input().mouse_y() }
    pub fn mouse_clicked(&self) -> bool { self.input().mouse_clicked() }
    pub fn key_down(&self, code: u32) -> bool { self.input().key_down(code) }
    pub fn current_key(&self) -> Option<u32> { self.input().current_key() }
}

impl Drop for Scene {
    fn drop(&mut self) {
        self.stop();
    }
}

pub(crate) fn document() -> Result<Document> {
    web_sys::window()
        .ok_or(GameError::NoWindow)?
        .document()
        .ok_or(GameError::NoDocument)
}

pub(crate) fn body(document: &Document) -> Result<web_sys::HtmlElement> {
    document.body().ok_or(GameError::NoBody)
}
