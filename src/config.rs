//! Environment configuration for the preview binary.

use std::{env, fmt::Display, path::PathBuf, str::FromStr};

use tracing::{info, warn};

use crate::{core::traits::SequencerConfig, runtime::handle::RuntimeConfig};

/// Which rotation strategy to run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RotationMode {
    /// Per-column queues advanced by one slot per tick.
    #[default]
    Columnar,
    /// Shared pools reselected each tick without duplicates.
    Pool,
}

impl FromStr for RotationMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "columnar" | "column" => Ok(Self::Columnar),
            "pool" | "global" => Ok(Self::Pool),
            other => Err(format!("unknown rotation mode: {other}")),
        }
    }
}

/// Settings for the `collage-preview` binary.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PreviewConfig {
    /// Saved manifest response; `None` runs with an empty grid.
    pub manifest_path: Option<PathBuf>,
    /// Rotation strategy.
    pub mode: RotationMode,
    /// Grid shape.
    pub sequencer: SequencerConfig,
    /// Timer period in milliseconds.
    pub rotation_period_ms: u64,
    /// Rotations to print before exiting.
    pub ticks: usize,
}

impl PreviewConfig {
    /// Reads `COLLAGE_*` variables from the process environment.
    pub fn load() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds the config from an arbitrary variable lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = SequencerConfig::default();
        Self {
            manifest_path: lookup("COLLAGE_MANIFEST").map(PathBuf::from),
            mode: try_load(&lookup, "COLLAGE_MODE", RotationMode::default()),
            sequencer: SequencerConfig {
                columns: try_load(&lookup, "COLLAGE_COLUMNS", defaults.columns),
                images_per_column: try_load(&lookup, "COLLAGE_IMAGES_PER_COLUMN", defaults.images_per_column),
                queue_len: try_load(&lookup, "COLLAGE_QUEUE_LEN", defaults.queue_len),
            },
            rotation_period_ms: try_load(
                &lookup,
                "COLLAGE_ROTATION_MS",
                RuntimeConfig::default().rotation_period_ms,
            ),
            ticks: try_load(&lookup, "COLLAGE_TICKS", 5),
        }
    }

    /// Runtime settings derived from this config.
    pub fn runtime(&self) -> RuntimeConfig {
        RuntimeConfig {
            rotation_period_ms: self.rotation_period_ms,
            ..RuntimeConfig::default()
        }
    }
}

fn try_load<T, F>(lookup: &F, key: &str, default: T) -> T
where
    T: FromStr + std::fmt::Debug,
    T::Err: Display,
    F: Fn(&str) -> Option<String>,
{
    let Some(raw) = lookup(key) else {
        info!("{key} not set, using default: {default:?}");
        return default;
    };

    raw.parse().unwrap_or_else(|e| {
        warn!("Invalid {key} value {raw:?}: {e}, using default: {default:?}");
        default
    })
}
