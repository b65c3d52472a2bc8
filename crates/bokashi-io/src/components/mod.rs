//! Dioxus components for the mask editor UI.

pub mod controls;
pub mod editor_canvas;

pub use controls::{ControlPanel, SaveStatus};
pub use editor_canvas::MaskCanvas;
