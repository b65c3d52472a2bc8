//! bokashi-io: Browser I/O and Dioxus component library.
//!
//! Everything that touches the browser lives here: DOM/canvas access,
//! the HTTP sync channel, the preview frame feed, the repaint loop, and
//! the UI components. The interaction semantics themselves are pure and
//! live in `bokashi-editor`.

pub mod components;
pub mod dom;
pub mod endpoints;
pub mod http;
pub mod preview;
pub mod render;
pub mod sync_channel;

pub use components::{ControlPanel, MaskCanvas, SaveStatus};
pub use endpoints::Endpoints;
pub use preview::PreviewFeed;
pub use render::RenderLoop;
pub use sync_channel::SyncChannel;
