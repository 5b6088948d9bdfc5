//! Global-pool rotation: every tick reselects all columns from two shared
//! shuffled pools so no image shows twice within one rotation.

use hashbrown::HashSet;

use crate::{
    frame::Frame,
    image::ImageDescriptor,
    manifest::Manifest,
    types::{ColumnIndex, Orientation, RotationCount, Seed},
};

use super::{
    queue::{PATTERN, Pools, partition},
    shuffle::{Lcg, seeded_shuffle},
    traits::{Sequencer, SequencerConfig},
};

/// Seeds for the one-time pool shuffle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PoolSeeds {
    /// Seed for the landscape pool.
    pub landscape: Seed,
    /// Seed for the portrait pool.
    pub portrait: Seed,
}

/// Monotonic read positions into the shuffled pools.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PoolCursors {
    /// Next landscape pull.
    pub landscape: usize,
    /// Next portrait pull.
    pub portrait: usize,
}

impl PoolCursors {
    fn get_mut(&mut self, orientation: Orientation) -> &mut usize {
        match orientation {
            Orientation::Landscape => &mut self.landscape,
            Orientation::Portrait => &mut self.portrait,
        }
    }
}

/// Seed of the slot permutation for `column` during `rotation`.
pub fn pattern_seed(column: ColumnIndex, rotation: RotationCount) -> Seed {
    rotation.wrapping_mul(7_919).wrapping_add(column as Seed * 1_009)
}

/// Three-to-one pattern with the portrait moved to a pseudo-random slot.
pub fn column_pattern(column: ColumnIndex, rotation: RotationCount) -> [Orientation; 4] {
    let mut pattern = [Orientation::Landscape; PATTERN.len()];
    let mut rng = Lcg::new(pattern_seed(column, rotation));
    // The first draw barely moves between neighbouring seeds.
    rng.next_raw();
    let slot = rng.next_below(PATTERN.len());
    pattern[slot] = Orientation::Portrait;
    pattern
}

/// Sequencer that draws each rotation from shared pools.
#[derive(Debug, Clone, Default)]
pub struct PoolSequencer {
    config: SequencerConfig,
    seeds: PoolSeeds,
    pools: Pools,
    cursors: PoolCursors,
    rotation: RotationCount,
    current: Frame,
}

impl PoolSequencer {
    /// Sequencer with default seeds and no images.
    pub fn new(config: SequencerConfig) -> Self {
        Self::with_seeds(config, PoolSeeds::default())
    }

    /// Sequencer shuffling its pools with `seeds`.
    pub fn with_seeds(config: SequencerConfig, seeds: PoolSeeds) -> Self {
        let mut seq = Self {
            config,
            seeds,
            ..Self::default()
        };
        seq.rebuild();
        seq
    }

    /// Sequencer already loaded with `manifest`.
    pub fn with_manifest(config: SequencerConfig, manifest: &Manifest) -> Self {
        let mut seq = Self::new(config);
        seq.set_manifest(manifest);
        seq
    }

    /// Shuffled pools in draw order.
    pub fn pools(&self) -> &Pools {
        &self.pools
    }

    /// Cursor positions after the last committed rotation.
    pub fn cursors(&self) -> PoolCursors {
        self.cursors
    }

    /// Rotations selected since the last rebuild.
    pub fn rotation(&self) -> RotationCount {
        self.rotation
    }

    fn rebuild(&mut self) {
        self.cursors = PoolCursors::default();
        self.rotation = 0;
        self.commit_next();
    }

    fn commit_next(&mut self) -> Frame {
        let (frame, cursors) = self.select(self.rotation);
        self.cursors = cursors;
        self.rotation += 1;
        self.current = frame.clone();
        frame
    }

    /// Computes the selection for `rotation` without touching `self`.
    fn select(&self, rotation: RotationCount) -> (Frame, PoolCursors) {
        let mut cursors = self.cursors;
        let mut used: HashSet<&str> = HashSet::new();
        let mut used_fallback = false;
        let max_attempts = 2 * self.pools.larger_len();

        let mut columns = Vec::with_capacity(self.config.columns);
        for column in 0..self.config.columns {
            let pattern = column_pattern(column, rotation);
            let mut images = Vec::with_capacity(self.config.images_per_column);

            for slot in 0..self.config.images_per_column {
                let Some(orientation) = self.resolve(pattern[slot % pattern.len()]) else {
                    break;
                };
                let pool = self.pools.get(orientation);
                let cursor = cursors.get_mut(orientation);
                let (img, fell_back) = pull(pool, cursor, &used, max_attempts);
                used_fallback |= fell_back;
                used.insert(img.key.as_str());
                images.push(img.clone());
            }
            columns.push(images);
        }

        let frame = Frame {
            rotation,
            columns,
            used_fallback,
        };
        (frame, cursors)
    }

    /// Pool to draw from when `wanted` is requested, honouring empty pools.
    fn resolve(&self, wanted: Orientation) -> Option<Orientation> {
        if !self.pools.get(wanted).is_empty() {
            Some(wanted)
        } else if !self.pools.get(wanted.flipped()).is_empty() {
            Some(wanted.flipped())
        } else {
            None
        }
    }
}

/// Takes the next unused element of a non-empty `pool`.
///
/// Every pull advances `cursor`, skipped candidates included. After
/// `max_attempts` misses the next element is taken even if already used,
/// and the second return value is true.
fn pull<'a>(
    pool: &'a [ImageDescriptor],
    cursor: &mut usize,
    used: &HashSet<&str>,
    max_attempts: usize,
) -> (&'a ImageDescriptor, bool) {
    for _ in 0..max_attempts {
        let candidate = &pool[*cursor % pool.len()];
        *cursor += 1;
        if !used.contains(candidate.key.as_str()) {
            return (candidate, false);
        }
    }

    let candidate = &pool[*cursor % pool.len()];
    *cursor += 1;
    (candidate, true)
}

impl Sequencer for PoolSequencer {
    fn config(&self) -> &SequencerConfig {
        &self.config
    }

    fn set_manifest(&mut self, manifest: &Manifest) {
        let pools = partition(manifest.images());
        self.pools = Pools {
            landscapes: seeded_shuffle(&pools.landscapes, self.seeds.landscape),
            portraits: seeded_shuffle(&pools.portraits, self.seeds.portrait),
        };
        self.rebuild();
    }

    fn set_columns(&mut self, columns: usize) {
        if columns == self.config.columns {
            return;
        }
        self.config.columns = columns;
        self.rebuild();
    }

    fn advance(&mut self) -> Frame {
        self.commit_next()
    }

    fn frame(&self) -> Frame {
        self.current.clone()
    }
}
