//! Sequencing algorithms: seeded shuffle, column queues and both rotation
//! strategies.

/// Global-pool rotation without duplicates per tick.
pub mod pool;
/// Orientation pools and per-column queue construction.
pub mod queue;
/// Columnar sliding-window rotation.
pub mod sequencer;
/// Seeded pseudo-random shuffle.
pub mod shuffle;
/// Sequencer trait and shared configuration.
pub mod traits;
