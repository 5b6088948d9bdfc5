//! Orientation pools and per-column queue construction.

use crate::{
    image::ImageDescriptor,
    types::{ColumnIndex, Orientation, Seed},
};

use super::shuffle::seeded_shuffle;

/// Composition template: three landscapes followed by one portrait.
pub const PATTERN: [Orientation; 4] = [
    Orientation::Landscape,
    Orientation::Landscape,
    Orientation::Landscape,
    Orientation::Portrait,
];

/// Manifest split by orientation, each side in manifest order.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Pools {
    /// Landscape descriptors.
    pub landscapes: Vec<ImageDescriptor>,
    /// Portrait descriptors.
    pub portraits: Vec<ImageDescriptor>,
}

impl Pools {
    /// Images across both pools.
    pub fn len(&self) -> usize {
        self.landscapes.len() + self.portraits.len()
    }

    /// Returns true when both pools are empty.
    pub fn is_empty(&self) -> bool {
        self.landscapes.is_empty() && self.portraits.is_empty()
    }

    /// Pool holding `orientation`.
    pub fn get(&self, orientation: Orientation) -> &[ImageDescriptor] {
        match orientation {
            Orientation::Landscape => &self.landscapes,
            Orientation::Portrait => &self.portraits,
        }
    }

    /// Size of the larger pool.
    pub fn larger_len(&self) -> usize {
        self.landscapes.len().max(self.portraits.len())
    }
}

/// Splits `images` by orientation without dropping or reordering anything.
pub fn partition(images: &[ImageDescriptor]) -> Pools {
    let mut pools = Pools::default();
    for img in images {
        match img.orientation {
            Orientation::Landscape => pools.landscapes.push(img.clone()),
            Orientation::Portrait => pools.portraits.push(img.clone()),
        }
    }
    pools
}

/// Shuffle seeds used for one column.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColumnSeeds {
    /// Seed for the landscape pool.
    pub landscape: Seed,
    /// Seed for the portrait pool.
    pub portrait: Seed,
}

impl ColumnSeeds {
    /// Seeds `column * 1000` and `column * 2000`.
    pub fn for_column(column: ColumnIndex) -> Self {
        let column = column as Seed;
        Self {
            landscape: column * 1000,
            portrait: column * 2000,
        }
    }
}

/// Ordered images assigned to one column.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ColumnQueue {
    column: ColumnIndex,
    entries: Vec<ImageDescriptor>,
}

impl ColumnQueue {
    /// Column this queue was built for.
    pub fn column(&self) -> ColumnIndex {
        self.column
    }

    /// Queue entries in display order.
    pub fn entries(&self) -> &[ImageDescriptor] {
        &self.entries
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true when the queue holds nothing.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Up to `count` consecutive entries starting at `offset`, wrapping at the end.
    ///
    /// The window never repeats an entry, so it is capped at the queue length.
    pub fn window(&self, offset: usize, count: usize) -> Vec<ImageDescriptor> {
        let len = self.entries.len();
        if len == 0 {
            return Vec::new();
        }
        (0..count.min(len))
            .map(|i| self.entries[(offset + i) % len].clone())
            .collect()
    }
}

/// Builds the queue for `column` with [`ColumnSeeds::for_column`].
pub fn build_column_queue(pools: &Pools, column: ColumnIndex, queue_len: usize) -> ColumnQueue {
    build_column_queue_with_seeds(pools, column, ColumnSeeds::for_column(column), queue_len)
}

/// Builds a queue of `queue_len` entries following [`PATTERN`].
///
/// Pools shorter than the demand wrap around. If one pool is empty the
/// queue is filled from the other one alone; if both are empty the queue is
/// empty.
pub fn build_column_queue_with_seeds(
    pools: &Pools,
    column: ColumnIndex,
    seeds: ColumnSeeds,
    queue_len: usize,
) -> ColumnQueue {
    let landscapes = seeded_shuffle(&pools.landscapes, seeds.landscape);
    let portraits = seeded_shuffle(&pools.portraits, seeds.portrait);

    let entries = match (landscapes.is_empty(), portraits.is_empty()) {
        (true, true) => Vec::new(),
        (false, true) => cycle(&landscapes, queue_len),
        (true, false) => cycle(&portraits, queue_len),
        (false, false) => {
            let mut out = Vec::with_capacity(queue_len);
            let mut next_landscape = 0usize;
            let mut next_portrait = 0usize;
            for slot in 0..queue_len {
                let img = match PATTERN[slot % PATTERN.len()] {
                    Orientation::Landscape => {
                        let img = &landscapes[next_landscape % landscapes.len()];
                        next_landscape += 1;
                        img
                    }
                    Orientation::Portrait => {
                        let img = &portraits[next_portrait % portraits.len()];
                        next_portrait += 1;
                        img
                    }
                };
                out.push(img.clone());
            }
            out
        }
    };

    ColumnQueue { column, entries }
}

fn cycle(pool: &[ImageDescriptor], len: usize) -> Vec<ImageDescriptor> {
    pool.iter().cycle().take(len).cloned().collect()
}
