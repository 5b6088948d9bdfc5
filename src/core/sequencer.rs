//! Columnar rotation: one precomputed queue per column, advanced by offset.

use crate::{
    frame::Frame,
    image::ImageDescriptor,
    manifest::Manifest,
    types::{ColumnIndex, RotationCount},
};

use super::{
    queue::{ColumnQueue, Pools, build_column_queue, partition},
    traits::{Sequencer, SequencerConfig},
};

/// Sliding-window sequencer over per-column queues.
#[derive(Debug, Clone, Default)]
pub struct ColumnarSequencer {
    config: SequencerConfig,
    pools: Pools,
    queues: Vec<ColumnQueue>,
    offsets: Vec<usize>,
    rotation: RotationCount,
}

impl ColumnarSequencer {
    /// Sequencer with an empty working set.
    pub fn new(config: SequencerConfig) -> Self {
        let mut seq = Self {
            config,
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

    /// Per-column queues, indexed by column.
    pub fn queues(&self) -> &[ColumnQueue] {
        &self.queues
    }

    /// Current window start of each column.
    pub fn offsets(&self) -> &[usize] {
        &self.offsets
    }

    /// Orientation pools of the current manifest.
    pub fn pools(&self) -> &Pools {
        &self.pools
    }

    /// Images currently visible in `column`.
    pub fn visible(&self, column: ColumnIndex) -> Vec<ImageDescriptor> {
        match (self.queues.get(column), self.offsets.get(column)) {
            (Some(queue), Some(offset)) => queue.window(*offset, self.config.images_per_column),
            _ => Vec::new(),
        }
    }

    fn rebuild(&mut self) {
        let columns = self.config.columns;
        self.queues = (0..columns)
            .map(|c| build_column_queue(&self.pools, c, self.config.queue_len))
            .collect();
        self.offsets = vec![0; columns];
        self.rotation = 0;
    }
}

impl Sequencer for ColumnarSequencer {
    fn config(&self) -> &SequencerConfig {
        &self.config
    }

    fn set_manifest(&mut self, manifest: &Manifest) {
        self.pools = partition(manifest.images());
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
        let offsets: Vec<usize> = self
            .queues
            .iter()
            .zip(&self.offsets)
            .map(|(queue, offset)| {
                if queue.is_empty() {
                    0
                } else {
                    (offset + 1) % queue.len()
                }
            })
            .collect();

        self.offsets = offsets;
        self.rotation += 1;
        self.frame()
    }

    fn frame(&self) -> Frame {
        Frame {
            rotation: self.rotation,
            columns: (0..self.queues.len()).map(|c| self.visible(c)).collect(),
            used_fallback: false,
        }
    }
}
