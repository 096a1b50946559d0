use thiserror::Error;
use wasm_bindgen::JsValue;

/// Failures while wiring an animation to the page.
///
/// None of these are fatal to the page: the affected subsystem logs the error
/// and stays off.
#[derive(Debug, Error)]
pub enum Error {
    #[error("no global window")]
    NoWindow,
    #[error("window has no document")]
    NoDocument,
    #[error("render surface #{0} not found")]
    MissingSurface(String),
    #[error("element #{0} is not a canvas")]
    NotACanvas(String),
    #[error("{0} context unavailable")]
    ContextUnavailable(&'static str),
    #[error("javascript error: {0}")]
    Js(String),
}

pub type Result<T> = std::result::Result<T, Error>;

impl From<JsValue> for Error {
    fn from(value: JsValue) -> Self {
        let msg = value
            .as_string()
            .unwrap_or_else(|| format!("{value:?}"));
        Error::Js(msg)
    }
}

impl From<Error> for JsValue {
    fn from(err: Error) -> Self {
        JsValue::from_str(&err.to_string())
    }
}
