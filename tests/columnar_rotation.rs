use collage::{
    core::{
        sequencer::ColumnarSequencer,
        traits::{Sequencer, SequencerConfig},
    },
    image::ImageDescriptor,
    manifest::Manifest,
};

fn manifest(landscapes: usize, portraits: usize) -> Manifest {
    Manifest::new(
        (0..landscapes)
            .map(|i| ImageDescriptor::landscape(format!("L{i}")))
            .chain((0..portraits).map(|i| ImageDescriptor::portrait(format!("P{i}")))),
    )
}

fn config(columns: usize) -> SequencerConfig {
    SequencerConfig {
        columns,
        images_per_column: 3,
        queue_len: 20,
    }
}

#[test]
fn initial_frame_shows_queue_heads() {
    let seq = ColumnarSequencer::with_manifest(config(4), &manifest(12, 4));
    let frame = seq.frame();

    assert_eq!(frame.rotation, 0);
    assert_eq!(frame.columns.len(), 4);
    assert_eq!(frame.keys()[0], vec!["L9", "L10", "L1"]);
    for (col, queue) in frame.columns.iter().zip(seq.queues()) {
        assert_eq!(col.as_slice(), &queue.entries()[..3]);
    }
}

#[test]
fn tick_slides_every_window_by_one() {
    let mut seq = ColumnarSequencer::with_manifest(config(4), &manifest(12, 4));
    let before = seq.frame();
    let after = seq.advance();

    assert_eq!(after.rotation, 1);
    assert_eq!(seq.offsets(), &[1, 1, 1, 1]);
    for (column, queue) in seq.queues().iter().enumerate() {
        assert_eq!(after.columns[column][..2], before.columns[column][1..]);
        assert_eq!(after.columns[column][2], queue.entries()[3]);
    }
}

#[test]
fn offsets_wrap_after_a_full_cycle() {
    let mut seq = ColumnarSequencer::with_manifest(config(2), &manifest(12, 4));
    let start = seq.frame();

    for _ in 0..19 {
        seq.advance();
    }
    let last = seq.frame();
    let queue = &seq.queues()[0];
    assert_eq!(last.columns[0][0], queue.entries()[19]);
    assert_eq!(last.columns[0][1], queue.entries()[0]);

    let wrapped = seq.advance();
    assert_eq!(seq.offsets(), &[0, 0]);
    assert_eq!(wrapped.columns, start.columns);
    assert_eq!(wrapped.rotation, 20);
}

#[test]
fn column_change_rebuilds_and_resets() {
    let mut seq = ColumnarSequencer::with_manifest(config(4), &manifest(12, 4));
    seq.advance();
    seq.advance();

    seq.set_columns(4);
    assert_eq!(seq.offsets(), &[2, 2, 2, 2]);

    seq.set_columns(2);
    assert_eq!(seq.config().columns, 2);
    assert_eq!(seq.queues().len(), 2);
    assert_eq!(seq.offsets(), &[0, 0]);
    assert_eq!(seq.frame().rotation, 0);
}

#[test]
fn manifest_change_rebuilds_pools_and_queues() {
    let mut seq = ColumnarSequencer::with_manifest(config(3), &manifest(12, 4));
    seq.advance();

    seq.set_manifest(&manifest(3, 0));
    assert_eq!(seq.pools().portraits.len(), 0);
    assert_eq!(seq.offsets(), &[0, 0, 0]);
    assert!(
        seq.frame()
            .columns
            .iter()
            .flatten()
            .all(|img| img.is_landscape())
    );
}

#[test]
fn empty_manifest_yields_empty_columns() {
    let mut seq = ColumnarSequencer::with_manifest(config(4), &Manifest::default());

    let frame = seq.advance();
    assert_eq!(frame.columns.len(), 4);
    assert!(frame.is_empty());
    assert_eq!(seq.offsets(), &[0, 0, 0, 0]);
}

#[test]
fn zero_columns_is_not_an_error() {
    let mut seq = ColumnarSequencer::with_manifest(config(0), &manifest(4, 1));

    assert!(seq.frame().columns.is_empty());
    assert!(seq.advance().columns.is_empty());
    assert!(seq.visible(0).is_empty());
}
