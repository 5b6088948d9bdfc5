//! Prints rotating collage frames for a saved manifest.
//!
//! ```sh
//! COLLAGE_MANIFEST=manifest.json COLLAGE_ROTATION_MS=500 RUST_LOG=info collage-preview
//! ```

use collage::{
    config::{PreviewConfig, RotationMode},
    core::{pool::PoolSequencer, sequencer::ColumnarSequencer, traits::Sequencer},
    manifest::{ManifestSource, file::JsonFileSource},
    runtime::{events::CollageEvent, handle::spawn_collage},
};
use tokio::{signal::ctrl_c, sync::broadcast::error::RecvError};
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt};

#[tokio::main]
async fn main() {
    fmt().with_env_filter(EnvFilter::from_default_env()).init();

    let config = PreviewConfig::load();
    info!(?config, "starting collage preview");

    match config.mode {
        RotationMode::Columnar => run(ColumnarSequencer::new(config.sequencer.clone()), &config).await,
        RotationMode::Pool => run(PoolSequencer::new(config.sequencer.clone()), &config).await,
    }
}

async fn run<S: Sequencer>(sequencer: S, config: &PreviewConfig) {
    let source = config
        .manifest_path
        .as_ref()
        .map(|path| Box::new(JsonFileSource::new(path)) as Box<dyn ManifestSource>);
    if source.is_none() {
        warn!("COLLAGE_MANIFEST not set, the grid will stay empty");
    }

    let handle = spawn_collage(sequencer, source, config.runtime());
    let mut events = handle.subscribe();

    match handle.current().await {
        Ok(frame) => print_frame("initial", &frame),
        Err(err) => warn!(?err, "runtime unavailable"),
    }

    let mut printed = 0usize;
    while printed < config.ticks {
        tokio::select! {
            evt = events.recv() => match evt {
                Ok(CollageEvent::Rotated { frame }) => {
                    print_frame("rotated", &frame);
                    printed += 1;
                }
                Ok(_) => {}
                Err(RecvError::Lagged(skipped)) => warn!(skipped, "event stream lagged"),
                Err(RecvError::Closed) => break,
            },
            _ = ctrl_c() => {
                info!("Received Ctrl+C, shutting down");
                break;
            }
        }
    }

    if let Err(err) = handle.shutdown().await {
        warn!(?err, "shutdown failed");
    }
}

fn print_frame(label: &str, frame: &collage::frame::Frame) {
    match serde_json::to_string(&frame.keys()) {
        Ok(keys) => println!("{label} #{}: {keys}", frame.rotation),
        Err(err) => warn!(%err, "failed to encode frame"),
    }
}
