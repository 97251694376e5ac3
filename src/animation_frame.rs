use std::{cell::{Cell, RefCell}, rc::Rc};
use wasm_bindgen::{prelude::*, JsCast};
use web_sys::Window;

/// Call `callback` once per `requestAnimationFrame` until `running` is
/// cleared.
pub fn request_recursive(
    window: Rc<Window>,
    callback: Rc<RefCell<dyn FnMut()>>,
    running: Rc<Cell<bool>>,
) -> Result<(), JsValue> {
    fn request_frame(
        window: &Rc<Window>,
        callback: &Rc<RefCell<dyn FnMut()>>,
        running: &Rc<Cell<bool>>,
    ) -> Result<(), JsValue> {
        let window_clone = Rc::clone(window);
        let callback_clone = Rc::clone(callback);
        let running_clone = Rc::clone(running);

        let closure = Closure::once_into_js(Box::new(move || {
            if !running_clone.get() {
                return;
            }
            (callback_clone.borrow_mut())();

            // Schedule the next frame
            if let Err(err) = request_frame(&window_clone, &callback_clone, &running_clone) {
                log::error!("failed to schedule animation frame: {:?}", err);
                running_clone.set(false);
            }
        }) as Box<dyn FnOnce()>);

        window.request_animation_frame(closure.unchecked_ref())?;

        Ok(())
    }

    // Start the recursive loop
    running.set(true);
    request_frame(&window, &callback, &running)
}
