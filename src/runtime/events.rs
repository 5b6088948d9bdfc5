//! Runtime event stream payloads.

use crate::frame::Frame;

/// Events emitted from the rotation loop.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CollageEvent {
    /// The timer (or an explicit request) rotated the grid.
    Rotated {
        /// Newly visible frame.
        frame: Frame,
    },
    /// Manifest or column count changed and all state was rebuilt.
    Rebuilt {
        /// First frame of the rebuilt state.
        frame: Frame,
    },
    /// A manifest reload succeeded.
    ManifestLoaded {
        /// Images in the new manifest.
        images: usize,
    },
    /// A manifest reload failed; the grid is now empty.
    ManifestFailed,
}
