//! Manifest decoding and the source abstraction feeding the sequencer.

pub mod file;
pub mod listing;

use hashbrown::HashSet;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::{
    image::ImageDescriptor,
    key::{self, KeyError},
};

/// Error body returned by the manifest endpoint instead of a list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RemoteError {
    /// Short error summary.
    pub error: String,
    /// Optional detail.
    #[serde(default)]
    pub message: Option<String>,
}

/// Why a manifest could not be produced.
#[derive(Debug)]
pub enum ManifestError {
    /// Reading the source failed.
    Io(std::io::Error),
    /// The body is not a descriptor list or error object.
    Serde(serde_json::Error),
    /// The endpoint answered with an error body.
    Remote(RemoteError),
}

impl From<std::io::Error> for ManifestError {
    fn from(value: std::io::Error) -> Self {
        Self::Io(value)
    }
}

impl From<serde_json::Error> for ManifestError {
    fn from(value: serde_json::Error) -> Self {
        Self::Serde(value)
    }
}

impl From<RemoteError> for ManifestError {
    fn from(value: RemoteError) -> Self {
        Self::Remote(value)
    }
}

/// Result alias for manifest operations.
pub type ManifestResult<T> = Result<T, ManifestError>;

/// One snapshot of selectable images with unique keys.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
#[serde(transparent)]
pub struct Manifest {
    images: Vec<ImageDescriptor>,
}

impl Manifest {
    /// Builds a manifest, keeping only the first descriptor for each key.
    pub fn new(images: impl IntoIterator<Item = ImageDescriptor>) -> Self {
        let mut seen = HashSet::new();
        let mut out = Vec::new();
        for img in images {
            if seen.insert(img.key.clone()) {
                out.push(img);
            } else {
                debug!(key = %img.key, "dropping duplicate manifest key");
            }
        }
        Self { images: out }
    }

    /// Descriptors in manifest order.
    pub fn images(&self) -> &[ImageDescriptor] {
        &self.images
    }

    /// Number of descriptors.
    pub fn len(&self) -> usize {
        self.images.len()
    }

    /// Returns true when there are no descriptors.
    pub fn is_empty(&self) -> bool {
        self.images.is_empty()
    }

    /// Returns true when some descriptor has exactly `key`.
    pub fn contains(&self, key: &str) -> bool {
        self.images.iter().any(|img| img.key == key)
    }

    /// Admits `key` for streaming: well formed and listed in this manifest.
    pub fn authorize(&self, key: &str) -> Result<(), KeyError> {
        key::validate_key(key)?;
        if self.contains(key) {
            Ok(())
        } else {
            Err(KeyError::NotInManifest)
        }
    }

    /// Decodes a response body, treating every failure as "no images".
    pub fn from_response_or_empty(body: &[u8]) -> Self {
        match decode_manifest(body) {
            Ok(manifest) => manifest,
            Err(err) => {
                warn!(?err, "manifest unavailable, continuing without images");
                Self::default()
            }
        }
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum ManifestResponse {
    Images(Vec<serde_json::Value>),
    Error(RemoteError),
}

/// Decodes a manifest endpoint body.
///
/// Records that do not decode as descriptors are skipped, so a partly
/// malformed list still yields the usable entries.
pub fn decode_manifest(body: &[u8]) -> ManifestResult<Manifest> {
    match serde_json::from_slice::<ManifestResponse>(body)? {
        ManifestResponse::Images(records) => {
            let total = records.len();
            let images: Vec<ImageDescriptor> = records
                .into_iter()
                .filter_map(|record| match serde_json::from_value(record) {
                    Ok(img) => Some(img),
                    Err(err) => {
                        warn!(%err, "skipping malformed manifest record");
                        None
                    }
                })
                .collect();
            debug!(total, decoded = images.len(), "decoded manifest");
            Ok(Manifest::new(images))
        }
        ManifestResponse::Error(remote) => Err(remote.into()),
    }
}

/// Where manifests come from.
pub trait ManifestSource: Send {
    /// Produces the current manifest snapshot.
    fn fetch(&mut self) -> ManifestResult<Manifest>;
}

/// Source that always returns the same manifest.
#[derive(Debug, Clone, Default)]
pub struct StaticSource {
    manifest: Manifest,
}

impl StaticSource {
    /// Source returning `manifest` on every fetch.
    pub fn new(manifest: Manifest) -> Self {
        Self { manifest }
    }
}

impl ManifestSource for StaticSource {
    fn fetch(&mut self) -> ManifestResult<Manifest> {
        Ok(self.manifest.clone())
    }
}
