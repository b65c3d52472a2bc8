//! Canvas element lookup and geometry capture.

use bokashi_editor::{Dimensions, ViewRect};
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{CanvasRenderingContext2d, Document, HtmlCanvasElement};

/// Errors that can occur while reaching into the document.
#[derive(Debug, thiserror::Error)]
pub enum DomError {
    /// No global `window` (non-browser environment).
    #[error("no global window")]
    NoWindow,

    /// No `document` on the window.
    #[error("no document")]
    NoDocument,

    /// The requested element id is absent.
    #[error("missing element #{0}")]
    MissingElement(String),

    /// The element exists but is not a `<canvas>`.
    #[error("element #{0} is not a canvas")]
    NotACanvas(String),

    /// The canvas would not hand out a 2d context.
    #[error("2d context unavailable")]
    NoContext,

    /// A browser API call returned an error.
    #[error("browser API error: {0}")]
    JsError(String),
}

impl From<JsValue> for DomError {
    fn from(value: JsValue) -> Self {
        Self::JsError(format!("{value:?}"))
    }
}

/// The global document.
///
/// # Errors
///
/// Returns [`DomError::NoWindow`]/[`DomError::NoDocument`] outside a
/// browser environment.
pub fn document() -> Result<Document, DomError> {
    web_sys::window()
        .ok_or(DomError::NoWindow)?
        .document()
        .ok_or(DomError::NoDocument)
}

/// Look up a `<canvas>` element by id.
///
/// # Errors
///
/// Returns [`DomError::MissingElement`] when the id is absent and
/// [`DomError::NotACanvas`] when it names some other element.
pub fn canvas_by_id(id: &str) -> Result<HtmlCanvasElement, DomError> {
    document()?
        .get_element_by_id(id)
        .ok_or_else(|| DomError::MissingElement(id.to_owned()))?
        .dyn_into::<HtmlCanvasElement>()
        .map_err(|_| DomError::NotACanvas(id.to_owned()))
}

/// Acquire the canvas's 2d rendering context.
///
/// # Errors
///
/// Returns [`DomError::NoContext`] when the context is unavailable.
pub fn context_2d(canvas: &HtmlCanvasElement) -> Result<CanvasRenderingContext2d, DomError> {
    canvas
        .get_context("2d")?
        .ok_or(DomError::NoContext)?
        .dyn_into::<CanvasRenderingContext2d>()
        .map_err(|_| DomError::NoContext)
}

/// The canvas's on-screen bounding box in CSS pixels.
#[must_use]
pub fn view_rect(canvas: &HtmlCanvasElement) -> ViewRect {
    let rect = canvas.get_bounding_client_rect();
    ViewRect::new(rect.left(), rect.top(), rect.width(), rect.height())
}

/// The canvas's intrinsic (drawing buffer) resolution.
#[must_use]
pub fn intrinsic_size(canvas: &HtmlCanvasElement) -> Dimensions {
    Dimensions::new(canvas.width(), canvas.height())
}
