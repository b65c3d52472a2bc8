//! bokashi-editor: Pure mask-editing interaction core (sans-IO).
//!
//! Everything with non-trivial state or timing policy lives here, free
//! of browser and network dependencies: coordinate transforms between
//! client/canvas/normalized space, the ordered mask store, hit testing,
//! the draw/drag interaction state machine, the repaint scene builder,
//! the mask-sync debounce policy, and the backend wire types. All
//! browser interaction lives in `bokashi-io`.

pub mod hit;
pub mod masks;
pub mod protocol;
pub mod scene;
pub mod session;
pub mod sync;
pub mod transform;
pub mod types;

pub use masks::MaskList;
pub use protocol::{BlurParams, SaveResponse, SetMasksRequest, TogglePauseRequest};
pub use scene::{Scene, build_scene};
pub use session::EditorSession;
pub use sync::{MASK_SYNC_DEBOUNCE_MS, SyncDebouncer};
pub use types::{
    CanvasPoint, ClientInput, ClientPoint, Dimensions, NormPoint, NormRect, PxRect, ViewRect,
};
