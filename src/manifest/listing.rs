//! Turns an object-store listing into a manifest.
//!
//! Orientation comes from, in order: explicit `orientation` metadata,
//! numeric `width`/`height` metadata, then folder and file-name hints.
//! Anything undecided is treated as landscape.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::{image::ImageDescriptor, types::Orientation};

use super::Manifest;

/// Upper bound on objects considered from one listing.
pub const MAX_LISTING: usize = 1000;

/// Default object prefix holding collage images.
pub const DEFAULT_PREFIX: &str = "collage/";

/// One object as reported by the store's list call.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ObjectEntry {
    /// Full object name, prefix included.
    pub name: String,
    /// MIME type, if the store reports one.
    #[serde(default)]
    pub content_type: Option<String>,
    /// Size in bytes.
    #[serde(default)]
    pub size: Option<u64>,
    /// Last-modified timestamp.
    #[serde(default)]
    pub updated: Option<String>,
    /// Custom object metadata.
    #[serde(default)]
    pub metadata: BTreeMap<String, String>,
}

impl ObjectEntry {
    /// Entry with no metadata.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    /// Adds one custom metadata pair.
    pub fn with_metadata(mut self, key: &str, value: &str) -> Self {
        self.metadata.insert(key.to_string(), value.to_string());
        self
    }

    fn is_directory(&self) -> bool {
        self.name.ends_with('/')
    }
}

/// Builds a manifest from the first [`MAX_LISTING`] objects of a listing.
pub fn ingest_listing(prefix: &str, entries: impl IntoIterator<Item = ObjectEntry>) -> Manifest {
    let images: Vec<ImageDescriptor> = entries
        .into_iter()
        .take(MAX_LISTING)
        .filter(|entry| !entry.is_directory())
        .map(|entry| describe(prefix, entry))
        .collect();
    debug!(prefix, images = images.len(), "ingested listing");
    Manifest::new(images)
}

/// Key of `name` relative to `prefix`, without a leading slash.
pub fn relative_key<'a>(prefix: &str, name: &'a str) -> &'a str {
    let key = name.strip_prefix(prefix).unwrap_or(name);
    key.strip_prefix('/').unwrap_or(key)
}

/// Orientation of an object named `name` stored under `key`.
pub fn infer_orientation(name: &str, key: &str, metadata: &BTreeMap<String, String>) -> Orientation {
    if let Some(explicit) = metadata.get("orientation").and_then(|v| v.parse::<Orientation>().ok()) {
        return explicit;
    }

    let dimension = |field: &str| metadata.get(field).filter(|v| !v.is_empty());
    if let (Some(width), Some(height)) = (dimension("width"), dimension("height")) {
        // Unparseable sides never compare greater, so they land on portrait.
        return match (leading_int(width), leading_int(height)) {
            (Some(w), Some(h)) if w > h => Orientation::Landscape,
            _ => Orientation::Portrait,
        };
    }

    let key = key.to_ascii_lowercase();
    if key.contains("/vertical/") || key.contains("/vert/") || key.starts_with("vertical/") {
        return Orientation::Portrait;
    }
    if key.contains("/landscape/") || key.contains("/land/") || key.starts_with("landscape/") {
        return Orientation::Landscape;
    }

    let name = name.to_ascii_lowercase();
    // "port" also covers "portrait".
    if name.contains("vert") || name.contains("port") {
        Orientation::Portrait
    } else {
        Orientation::Landscape
    }
}

/// Integer formed by the leading digits of `raw`, so `"4000px"` reads as 4000.
fn leading_int(raw: &str) -> Option<i64> {
    let raw = raw.trim_start();
    let (negative, digits) = match raw.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, raw.strip_prefix('+').unwrap_or(raw)),
    };
    let end = digits
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(digits.len());
    let value: i64 = digits[..end].parse().ok()?;
    Some(if negative { -value } else { value })
}

fn describe(prefix: &str, entry: ObjectEntry) -> ImageDescriptor {
    let key = relative_key(prefix, &entry.name).to_string();
    let orientation = infer_orientation(&entry.name, &key, &entry.metadata);
    ImageDescriptor {
        key,
        orientation,
        content_type: entry.content_type,
        size: entry.size,
        updated: entry.updated,
    }
}
