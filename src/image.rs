//! Image descriptor record carried from the manifest to the render layer.

use serde::{Deserialize, Serialize};

use crate::{
    key::{self, KeyError},
    types::Orientation,
};

/// One selectable collage image.
///
/// Only `key` and `orientation` drive sequencing; the remaining fields are
/// passed through untouched.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImageDescriptor {
    /// Object key, unique within one manifest snapshot.
    pub key: String,
    /// Orientation bucket.
    pub orientation: Orientation,
    /// MIME type reported by the object store.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content_type: Option<String>,
    /// Object size in bytes.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub size: Option<u64>,
    /// Last-modified timestamp as reported by the object store.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated: Option<String>,
}

impl ImageDescriptor {
    /// Descriptor with no metadata.
    pub fn new(key: impl Into<String>, orientation: Orientation) -> Self {
        Self {
            key: key.into(),
            orientation,
            content_type: None,
            size: None,
            updated: None,
        }
    }

    /// Shorthand for a landscape descriptor.
    pub fn landscape(key: impl Into<String>) -> Self {
        Self::new(key, Orientation::Landscape)
    }

    /// Shorthand for a portrait descriptor.
    pub fn portrait(key: impl Into<String>) -> Self {
        Self::new(key, Orientation::Portrait)
    }

    /// Returns true for landscape images.
    pub fn is_landscape(&self) -> bool {
        self.orientation == Orientation::Landscape
    }

    /// Request locator for this image on the default image endpoint.
    pub fn locator(&self) -> Result<String, KeyError> {
        key::image_locator(key::DEFAULT_IMAGE_ENDPOINT, &self.key)
    }
}
