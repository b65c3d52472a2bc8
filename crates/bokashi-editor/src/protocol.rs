//! Wire payloads for the processing backend.
//!
//! The backend is a thin HTTP collaborator: masks and parameters are
//! pushed to it (never read back), pause is toggled, and the save call
//! returns a small JSON status. Field names follow the backend's
//! camelCase convention; the save response additionally accepts the
//! snake_case spelling some deployments emit.

use serde::{Deserialize, Serialize};

use crate::types::NormRect;

/// Lowest blur strength the backend accepts.
pub const BLUR_STRENGTH_MIN: f64 = 0.4;

/// Highest blur strength the backend accepts.
pub const BLUR_STRENGTH_MAX: f64 = 6.0;

/// Body of a `set_masks` push: the entire current mask list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SetMasksRequest {
    /// All committed masks, in draw order, normalized.
    pub masks: Vec<NormRect>,
}

/// The full processing parameter set.
///
/// Always pushed whole (never as a delta): the backend has no other
/// writer, so the latest push is authoritative.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BlurParams {
    /// Gaussian blur strength multiplier, within
    /// [`BLUR_STRENGTH_MIN`]..=[`BLUR_STRENGTH_MAX`].
    pub blur_strength: f64,
    /// Whether the backend also blurs automatically detected faces.
    pub auto_face: bool,
}

impl Default for BlurParams {
    fn default() -> Self {
        Self {
            blur_strength: 1.0,
            auto_face: true,
        }
    }
}

/// Body of a `toggle_pause` push.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TogglePauseRequest {
    /// `true` freezes the preview on the current frame.
    pub paused: bool,
}

/// Response from the save-video call.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct SaveResponse {
    /// Whether processing succeeded.
    #[serde(default)]
    pub ok: bool,
    /// Where the processed file can be downloaded from. Present only on
    /// success; both `downloadUrl` and `download_url` are accepted.
    #[serde(rename = "downloadUrl", alias = "download_url", default)]
    pub download_url: Option<String>,
}
