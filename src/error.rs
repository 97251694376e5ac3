use thiserror::Error;
use wasm_bindgen::JsValue;

#[derive(Debug, Error)]
pub enum GameError {
    #[error("no global `window`")]
    NoWindow,
    #[error("no `document`")]
    NoDocument,
    #[error("document has no <body>")]
    NoBody,
    #[error("failed to get 2d context")]
    NoContext,
    #[error("could not cast element to {0}")]
    Cast(&'static str),
    #[error("DOM call failed: {0}")]
    Dom(String),
    #[error("sprite has no animation loaded")]
    NoAnimation,
    #[error("unknown animation cycle `{0}`")]
    UnknownCycle(String),
    #[error("invalid animation geometry: {0}")]
    InvalidAnimation(String),
    #[error("unknown tile symbol `{0}`")]
    UnknownTileSymbol(String),
    #[error("tile ({row}, {col}) is outside the map")]
    TileOutOfRange { row: usize, col: usize },
    #[error("invalid scene config: {0}")]
    InvalidConfig(String),
}

pub type Result<T> = std::result::Result<T, GameError>;

impl From<JsValue> for GameError {
    fn from(value: JsValue) -> Self {
        let msg = value
            .as_string()
            .unwrap_or_else(|| format!("{:?}", value));
        GameError::Dom(msg)
    }
}

impl From<GameError> for JsValue {
    fn from(err: GameError) -> Self {
        js_sys::Error::new(&err.to_string()).into()
    }
}
