use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::{spawn_local, JsFuture};
use web_sys::HtmlAudioElement;

use crate::error::Result;
use crate::scene;

/// A sound effect loaded from a URL. Browsers differ in the formats they
/// play, so ship `.ogg` and `.mp3` where possible.
#[wasm_bindgen]
pub struct Sound {
    audio: HtmlAudioElement,
}

#[wasm_bindgen]
impl Sound {
    #[wasm_bindgen(constructor)]
    pub fn new(src: &str) -> std::result::Result<Sound, JsValue> {
        Ok(Self::load(src)?)
    }

    /// Start playback. A rejected play (autoplay policy, missing file) is
    /// logged and otherwise ignored.
    pub fn play(&self) {
        let promise = match self.audio.play() {
            Ok(promise) => promise,
            Err(err) => {
                log::warn!("could not play {}: {:?}", self.audio.src(), err);
                return;
            }
        };
        let src = self.audio.src();
        spawn_local(async move {
            if let Err(err) = JsFuture::from(promise).await {
                log::warn!("playback of {} was rejected: {:?}", src, err);
            }
        });
    }

    pub fn pause(&self) -> std::result::Result<(), JsValue> {
        self.audio.pause()
    }

    /// Show the browser's audio controls. Some mobile browsers only allow
    /// playback that starts from a user gesture on the element itself.
    pub fn show_controls(&self) -> std::result::Result<(), JsValue> {
        self.audio.set_controls(true);
        self.audio.style().set_property("display", "block")
    }
}

impl Sound {
    fn load(src: &str) -> Result<Sound> {
        let audio = HtmlAudioElement::new_with_src(src)?;
        audio.set_preload("auto");
        audio.set_controls(false);
        audio.style().set_property("display", "none")?;

        let document = scene::document()?;
        scene::body(&document)?.append_child(&audio)?;
        log::debug!("loaded sound {}", src);
        Ok(Sound { audio })
    }
}
