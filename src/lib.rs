//! Deterministic, orientation-aware sequencing for a rotating photo collage.
//!
//! # Examples
//!
//! Columnar rotation over a small manifest:
//! ```
//! use collage::{
//!     core::{sequencer::ColumnarSequencer, traits::{Sequencer, SequencerConfig}},
//!     image::ImageDescriptor,
//!     manifest::Manifest,
//! };
//!
//! let manifest = Manifest::new([
//!     ImageDescriptor::landscape("land/a.jpg"),
//!     ImageDescriptor::landscape("land/b.jpg"),
//!     ImageDescriptor::landscape("land/c.jpg"),
//!     ImageDescriptor::portrait("vertical/d.jpg"),
//! ]);
//! let cfg = SequencerConfig { columns: 2, images_per_column: 3, queue_len: 8 };
//! let mut seq = ColumnarSequencer::with_manifest(cfg, &manifest);
//! let before = seq.frame();
//! let after = seq.advance();
//! assert_eq!(after.columns[0][0], before.columns[0][1]);
//! ```
//!
//! Timer-driven rotation on a tokio runtime:
//! ```no_run
//! use collage::{
//!     core::{pool::PoolSequencer, traits::SequencerConfig},
//!     manifest::{ManifestSource, file::JsonFileSource},
//!     runtime::handle::{spawn_collage, RuntimeConfig},
//! };
//!
//! # #[tokio::main]
//! # async fn main() {
//! let source: Box<dyn ManifestSource> = Box::new(JsonFileSource::new("manifest.json"));
//! let handle = spawn_collage(
//!     PoolSequencer::new(SequencerConfig::default()),
//!     Some(source),
//!     RuntimeConfig::default(),
//! );
//! let mut events = handle.subscribe();
//! let _next = events.recv().await;
//! handle.shutdown().await.expect("shutdown");
//! # }
//! ```
#![deny(missing_docs)]

/// Environment configuration for the preview binary.
pub mod config;
/// Sequencing algorithms and state machines.
pub mod core;
/// Published rotation snapshots.
pub mod frame;
/// Image descriptor records.
pub mod image;
/// Object-key validation and request locators.
pub mod key;
/// Manifest decoding and sources.
pub mod manifest;
/// Timer-driven async host.
pub mod runtime;
/// Shared primitive types and enums.
pub mod types;
