//! Shared primitive aliases and the image orientation enum.

use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

/// Zero-based visual column index.
pub type ColumnIndex = usize;
/// Number of rotations performed since the last rebuild.
pub type RotationCount = u64;
/// Input to the seeded shuffle.
pub type Seed = u64;

/// Orientation bucket of a collage image.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Orientation {
    /// Wider than tall.
    Landscape,
    /// Taller than wide, or square.
    Portrait,
}

impl Orientation {
    /// Wire name used by the manifest endpoint.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Landscape => "landscape",
            Self::Portrait => "portrait",
        }
    }

    /// The other orientation.
    pub fn flipped(self) -> Self {
        match self {
            Self::Landscape => Self::Portrait,
            Self::Portrait => Self::Landscape,
        }
    }
}

impl fmt::Display for Orientation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Orientation {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "landscape" => Ok(Self::Landscape),
            "portrait" => Ok(Self::Portrait),
            other => Err(format!("unknown orientation: {other}")),
        }
    }
}
