//! Sequencer trait and the grid shape it is configured with.

use crate::{frame::Frame, manifest::Manifest};

/// Grid shape shared by every sequencer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SequencerConfig {
    /// Number of visual columns.
    pub columns: usize,
    /// Images shown per column at once.
    pub images_per_column: usize,
    /// Entries precomputed per column queue.
    pub queue_len: usize,
}

impl Default for SequencerConfig {
    fn default() -> Self {
        Self {
            columns: 4,
            images_per_column: 3,
            queue_len: 20,
        }
    }
}

/// Rotation state machine driven by the host's timer.
///
/// Implementations never fail: empty or partial input degrades to empty or
/// shorter columns.
pub trait Sequencer: Send + 'static {
    /// Grid shape in effect.
    fn config(&self) -> &SequencerConfig;

    /// Replaces the working set and rebuilds all derived state.
    fn set_manifest(&mut self, manifest: &Manifest);

    /// Changes the column count; a no-op when unchanged.
    fn set_columns(&mut self, columns: usize);

    /// Performs one rotation and returns the new frame.
    fn advance(&mut self) -> Frame;

    /// Frame currently on display.
    fn frame(&self) -> Frame;
}
