use std::cell::Cell;
use std::rc::Rc;

use wasm_bindgen::prelude::*;
use web_sys::{Event, HtmlButtonElement};

use crate::error::{GameError, Result};
use crate::input::listen;
use crate::scene;

/// An on-page button that reports whether it is held down. The label may be
/// any HTML, including an `<img>` tag. Responds to touch as well as mouse.
#[wasm_bindgen]
pub struct GameButton {
    button: HtmlButtonElement,
    pressed: Rc<Cell<bool>>,
}

#[wasm_bindgen]
impl GameButton {
    #[wasm_bindgen(constructor)]
    pub fn new(label: &str) -> std::result::Result<GameButton, JsValue> {
        Ok(Self::create(label)?)
    }

    pub fn is_clicked(&self) -> bool {
        self.pressed.get()
    }

    pub fn set_pos(&self, left: f64, top: f64) -> std::result::Result<(), JsValue> {
        let style = self.button.style();
        style.set_property("left", &format!("{left}px"))?;
        style.set_property("top", &format!("{top}px"))
    }

    pub fn set_position(&self, left: f64, top: f64) -> std::result::Result<(), JsValue> {
        self.set_pos(left, top)
    }

    pub fn set_size(&self, width: f64, height: f64) -> std::result::Result<(), JsValue> {
        let style = self.button.style();
        style.set_property("width", &format!("{width}px"))?;
        style.set_property("height", &format!("{height}px"))
    }
}

impl GameButton {
    fn create(label: &str) -> Result<GameButton> {
        let document = scene::document()?;
        let button = document
            .create_element("button")?
            .dyn_into::<HtmlButtonElement>()
            .map_err(|_| GameError::Cast("HtmlButtonElement"))?;
        button.set_type("button");
        button.set_inner_html(label);

        let style = button.style();
        style.set_property("position", "absolute")?;
        style.set_property("left", "0px")?;
        style.set_property("top", "0px")?;

        let pressed = Rc::new(Cell::new(false));
        for (event, down) in [
            ("mousedown", true),
            ("touchstart", true),
            ("mouseup", false),
            ("mouseleave", false),
            ("touchend", false),
        ] {
            let pressed = Rc::clone(&pressed);
            listen(&button, event, move |_: Event| pressed.set(down))?;
        }

        scene::body(&document)?.append_child(&button)?;
        Ok(GameButton { button, pressed })
    }
}
