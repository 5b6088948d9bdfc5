//! Timer-driven async host for a sequencer.

/// Event stream types emitted by the runtime.
pub mod events;
/// Handle and rotation loop implementation.
pub mod handle;
