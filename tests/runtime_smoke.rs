use std::time::Duration;

use collage::{
    core::{
        pool::PoolSequencer,
        sequencer::ColumnarSequencer,
        traits::SequencerConfig,
    },
    image::ImageDescriptor,
    manifest::{Manifest, ManifestError, ManifestResult, ManifestSource, RemoteError, StaticSource},
    runtime::{
        events::CollageEvent,
        handle::{RuntimeConfig, RuntimeError, spawn_collage},
    },
};

fn manifest(landscapes: usize, portraits: usize) -> Manifest {
    Manifest::new(
        (0..landscapes)
            .map(|i| ImageDescriptor::landscape(format!("L{i}")))
            .chain((0..portraits).map(|i| ImageDescriptor::portrait(format!("P{i}")))),
    )
}

fn slow_timer() -> RuntimeConfig {
    RuntimeConfig {
        rotation_period_ms: 60_000,
        ..RuntimeConfig::default()
    }
}

struct FailingSource;

impl ManifestSource for FailingSource {
    fn fetch(&mut self) -> ManifestResult<Manifest> {
        Err(ManifestError::Remote(RemoteError {
            error: "Failed to fetch collage manifest".to_string(),
            message: None,
        }))
    }
}

struct PanickingSource;

impl ManifestSource for PanickingSource {
    fn fetch(&mut self) -> ManifestResult<Manifest> {
        panic!("source exploded");
    }
}

#[tokio::test]
async fn timer_publishes_rotations() {
    let source: Box<dyn ManifestSource> = Box::new(StaticSource::new(manifest(12, 4)));
    let cfg = RuntimeConfig {
        rotation_period_ms: 25,
        ..RuntimeConfig::default()
    };
    let handle = spawn_collage(ColumnarSequencer::new(SequencerConfig::default()), Some(source), cfg);
    let mut sub = handle.subscribe();

    let initial = handle.current().await.expect("current");
    assert_eq!(initial.image_count(), 12);

    let mut rotations = Vec::new();
    while rotations.len() < 2 {
        let evt = tokio::time::timeout(Duration::from_secs(2), sub.recv())
            .await
            .expect("event")
            .expect("recv");
        if let CollageEvent::Rotated { frame } = evt {
            rotations.push(frame.rotation);
        }
    }
    assert!(rotations[1] > rotations[0]);

    handle.shutdown().await.expect("shutdown");
}

#[tokio::test]
async fn commands_rebuild_and_rotate() {
    let handle = spawn_collage(PoolSequencer::new(SequencerConfig::default()), None, slow_timer());
    let mut sub = handle.subscribe();

    assert!(handle.current().await.expect("current").is_empty());

    let rebuilt = handle.set_manifest(manifest(12, 4)).await.expect("set manifest");
    assert_eq!(rebuilt.rotation, 0);
    assert_eq!(rebuilt.image_count(), 12);

    let rotated = handle.rotate_now().await.expect("rotate");
    assert_eq!(rotated.rotation, 1);
    assert_eq!(handle.current().await.expect("current"), rotated);

    let narrow = handle.set_columns(2).await.expect("columns");
    assert_eq!(narrow.columns.len(), 2);
    assert_eq!(narrow.rotation, 0);

    let unchanged = handle.set_columns(2).await.expect("columns");
    assert_eq!(unchanged, narrow);

    let mut kinds = Vec::new();
    for _ in 0..3 {
        let evt = tokio::time::timeout(Duration::from_secs(1), sub.recv())
            .await
            .expect("event")
            .expect("recv");
        kinds.push(evt);
    }
    assert!(matches!(kinds[0], CollageEvent::Rebuilt { .. }));
    assert!(matches!(kinds[1], CollageEvent::Rotated { .. }));
    assert!(matches!(kinds[2], CollageEvent::Rebuilt { .. }));

    assert!(matches!(handle.reload().await, Err(RuntimeError::NoSource)));

    handle.shutdown().await.expect("shutdown");
}

#[tokio::test]
async fn failed_reload_clears_the_grid() {
    let handle = spawn_collage(
        ColumnarSequencer::new(SequencerConfig::default()),
        Some(Box::new(FailingSource)),
        slow_timer(),
    );
    let mut sub = handle.subscribe();

    handle.set_manifest(manifest(4, 1)).await.expect("set manifest");
    assert!(!handle.current().await.expect("current").is_empty());

    let res = handle.reload().await;
    assert!(matches!(res, Err(RuntimeError::Manifest(ManifestError::Remote(_)))));
    assert!(handle.current().await.expect("current").is_empty());

    let mut failed_seen = false;
    for _ in 0..4 {
        let evt = tokio::time::timeout(Duration::from_secs(1), sub.recv())
            .await
            .expect("event")
            .expect("recv");
        if evt == CollageEvent::ManifestFailed {
            failed_seen = true;
            break;
        }
    }
    assert!(failed_seen, "expected ManifestFailed event");

    handle.shutdown().await.expect("shutdown");
}

#[tokio::test]
async fn panicking_source_is_reported_as_aborted_fetch() {
    let handle = spawn_collage(
        ColumnarSequencer::new(SequencerConfig::default()),
        Some(Box::new(PanickingSource)),
        slow_timer(),
    );

    handle.set_manifest(manifest(4, 1)).await.expect("set manifest");
    assert!(matches!(handle.reload().await, Err(RuntimeError::FetchAborted)));
    assert!(handle.current().await.expect("current").is_empty());

    handle.shutdown().await.expect("shutdown");
}

#[tokio::test]
async fn shutdown_closes_the_handle() {
    let handle = spawn_collage(ColumnarSequencer::new(SequencerConfig::default()), None, slow_timer());
    handle.shutdown().await.expect("shutdown");

    let mut closed = false;
    for _ in 0..20 {
        if matches!(handle.current().await, Err(RuntimeError::ChannelClosed)) {
            closed = true;
            break;
        }
        tokio::time::sleep(Duration::from_millis(10)).await;
    }
    assert!(closed);
}
