use std::collections::HashSet;

use proptest::prelude::*;

use collage::{
    core::{
        pool::PoolSequencer,
        queue::{PATTERN, build_column_queue, partition},
        sequencer::ColumnarSequencer,
        shuffle::seeded_shuffle,
        traits::{Sequencer, SequencerConfig},
    },
    image::ImageDescriptor,
    manifest::Manifest,
    types::Orientation,
};

fn images(landscapes: usize, portraits: usize) -> Vec<ImageDescriptor> {
    (0..landscapes)
        .map(|i| ImageDescriptor::landscape(format!("land/{i}.jpg")))
        .chain((0..portraits).map(|i| ImageDescriptor::portrait(format!("vertical/{i}.jpg"))))
        .collect()
}

proptest! {
    #[test]
    fn shuffle_is_a_deterministic_permutation(items in prop::collection::vec(any::<u32>(), 0..64), seed in any::<u64>()) {
        let a = seeded_shuffle(&items, seed);
        let b = seeded_shuffle(&items, seed);
        prop_assert_eq!(&a, &b);

        let mut sorted_in = items.clone();
        let mut sorted_out = a;
        sorted_in.sort_unstable();
        sorted_out.sort_unstable();
        prop_assert_eq!(sorted_in, sorted_out);
    }

    #[test]
    fn mixed_pools_follow_the_pattern(landscapes in 1usize..20, portraits in 1usize..8, column in 0usize..8, queue_len in 0usize..64) {
        let pools = partition(&images(landscapes, portraits));
        let queue = build_column_queue(&pools, column, queue_len);
        prop_assert_eq!(queue.len(), queue_len);

        for (i, img) in queue.entries().iter().enumerate() {
            prop_assert_eq!(img.orientation, PATTERN[i % PATTERN.len()]);
        }
    }

    #[test]
    fn queue_build_is_repeatable(landscapes in 0usize..20, portraits in 0usize..8, column in 0usize..8) {
        let pools = partition(&images(landscapes, portraits));
        prop_assert_eq!(
            build_column_queue(&pools, column, 20),
            build_column_queue(&pools, column, 20)
        );
    }

    #[test]
    fn single_orientation_pools_fill_to_length(count in 1usize..12, portrait in any::<bool>(), queue_len in 0usize..40) {
        let (l, p) = if portrait { (0, count) } else { (count, 0) };
        let pools = partition(&images(l, p));
        let queue = build_column_queue(&pools, 1, queue_len);

        let expected = if portrait { Orientation::Portrait } else { Orientation::Landscape };
        prop_assert_eq!(queue.len(), queue_len);
        prop_assert!(queue.entries().iter().all(|img| img.orientation == expected));
    }

    #[test]
    fn columnar_tick_advances_window_by_one(
        landscapes in 0usize..16,
        portraits in 0usize..6,
        columns in 1usize..6,
        per_column in 1usize..5,
        ticks in 0usize..50,
    ) {
        let cfg = SequencerConfig { columns, images_per_column: per_column, queue_len: 20 };
        let mut seq = ColumnarSequencer::with_manifest(cfg, &Manifest::new(images(landscapes, portraits)));
        for _ in 0..ticks {
            seq.advance();
        }

        let before = seq.frame();
        let after = seq.advance();
        for (column, queue) in seq.queues().iter().enumerate() {
            if queue.is_empty() {
                prop_assert!(after.columns[column].is_empty());
                continue;
            }
            let expected_offset = (ticks + 1) % queue.len();
            prop_assert_eq!(seq.offsets()[column], expected_offset);
            prop_assert_eq!(&after.columns[column][0], &queue.entries()[expected_offset]);
            if before.columns[column].len() > 1 {
                prop_assert_eq!(&after.columns[column][0], &before.columns[column][1]);
            }
        }
    }

    #[test]
    fn pool_rotation_never_repeats_without_fallback(
        landscapes in 0usize..16,
        portraits in 0usize..6,
        columns in 1usize..6,
        per_column in 1usize..5,
        rotations in 1usize..20,
    ) {
        let cfg = SequencerConfig { columns, images_per_column: per_column, queue_len: 20 };
        let mut seq = PoolSequencer::with_manifest(cfg, &Manifest::new(images(landscapes, portraits)));

        for _ in 0..rotations {
            let frame = seq.advance();
            let keys: Vec<&str> = frame.columns.iter().flatten().map(|img| img.key.as_str()).collect();
            let unique: HashSet<&str> = keys.iter().copied().collect();

            if landscapes + portraits == 0 {
                prop_assert!(keys.is_empty());
            } else {
                prop_assert_eq!(keys.len(), columns * per_column);
            }
            if !frame.used_fallback {
                prop_assert_eq!(unique.len(), keys.len());
            }
            if keys.len() <= landscapes.min(portraits) {
                prop_assert!(!frame.used_fallback);
            }
        }
    }
}
