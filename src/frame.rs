//! Published rotation snapshot consumed by the render layer.

use serde::{Deserialize, Serialize};

use crate::{image::ImageDescriptor, types::RotationCount};

/// Images visible in every column after one rotation step.
///
/// A frame is always built in full before it replaces the previous one, so
/// readers never observe a partially rotated grid.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Frame {
    /// Rotation that produced this frame.
    pub rotation: RotationCount,
    /// Visible images, one list per column, top to bottom.
    pub columns: Vec<Vec<ImageDescriptor>>,
    /// True when a duplicate had to be accepted to fill a slot.
    pub used_fallback: bool,
}

impl Frame {
    /// Returns true when no column shows an image.
    pub fn is_empty(&self) -> bool {
        self.columns.iter().all(Vec::is_empty)
    }

    /// Images in `index`, or `None` past the last column.
    pub fn column(&self, index: usize) -> Option<&[ImageDescriptor]> {
        self.columns.get(index).map(Vec::as_slice)
    }

    /// Keys per column, in display order.
    pub fn keys(&self) -> Vec<Vec<&str>> {
        self.columns
            .iter()
            .map(|col| col.iter().map(|img| img.key.as_str()).collect())
            .collect()
    }

    /// Total number of visible images.
    pub fn image_count(&self) -> usize {
        self.columns.iter().map(Vec::len).sum()
    }
}
