// Property tests for the grid arithmetic, the store invariant, and the
// overlap layout.
use proptest::prelude::*;

use timeblocks::models::block::BlockAnchor;
use timeblocks::models::grid::TimeGrid;
use timeblocks::models::payload::{DragPayload, PayloadOrigin};
use timeblocks::services::store::BlockStore;
use timeblocks::ui::layout::{compute_column_layout, overlap_slots, ColumnEntry};

fn payload(name: &str, minutes: i64) -> DragPayload {
    DragPayload {
        id: String::new(),
        name: name.into(),
        color: "#6366F1".into(),
        duration_minutes: minutes,
        origin: PayloadOrigin::Template,
    }
}

prop_compose! {
    fn arb_entry(max_slot: usize)(
        start in 0..max_slot,
        span in 1usize..12,
        tag in 0u32..1000,
    ) -> ColumnEntry {
        ColumnEntry::new(format!("b{}", tag), start, span)
    }
}

proptest! {
    #[test]
    fn resolved_drop_always_fits(
        offset_y in -500.0f32..5000.0,
        surface_height in 1.0f32..4000.0,
        minutes in 1i64..=1080,
    ) {
        let grid = TimeGrid::default();
        let span = grid.duration_slots(minutes);
        let slot = grid.resolve_drop_slot(offset_y, surface_height, span);
        prop_assert!(slot <= grid.max_start(span));
        prop_assert!(slot + span <= grid.total_slots());
    }

    #[test]
    fn degenerate_surface_resolves_to_top(
        offset_y in -500.0f32..5000.0,
        surface_height in -10.0f32..=0.0,
    ) {
        let grid = TimeGrid::default();
        prop_assert_eq!(grid.resolve_drop_slot(offset_y, surface_height, 2), 0);
    }

    #[test]
    fn store_invariant_survives_arbitrary_writes(
        ops in prop::collection::vec(
            (0usize..7, 0usize..100, 1i64..=1080, any::<bool>()),
            1..40,
        ),
    ) {
        let mut store = BlockStore::new(TimeGrid::default());
        let grid = *store.grid();

        for (day, slot, minutes, move_last) in ops {
            let anchor = BlockAnchor { day_index: day, date: None, start_slot: slot };
            if move_last && !store.is_empty() {
                let id = store.blocks().last().unwrap().id.clone();
                store.move_block(&id, anchor);
            } else {
                store.place(&payload("Deep Work", minutes), anchor).unwrap();
            }
        }

        for block in store.blocks() {
            let span = block.duration_slots(&grid);
            prop_assert!(block.start_slot + span <= grid.total_slots());
        }
    }

    #[test]
    fn overlap_is_symmetric_and_bounded(
        a in arb_entry(36),
        b in arb_entry(36),
    ) {
        let ab = overlap_slots(&a, &b);
        prop_assert_eq!(ab, overlap_slots(&b, &a));
        prop_assert!(ab <= a.span.min(b.span));
    }

    #[test]
    fn layout_is_deterministic_and_z_is_a_permutation(
        entries in prop::collection::vec(arb_entry(36), 0..10),
    ) {
        let first = compute_column_layout(&entries, 22.0);
        let second = compute_column_layout(&entries, 22.0);
        prop_assert_eq!(&first, &second);

        let mut zs: Vec<usize> = first.iter().map(|l| l.z).collect();
        zs.sort_unstable();
        let expected: Vec<usize> = (0..entries.len()).collect();
        prop_assert_eq!(zs, expected);
    }

    #[test]
    fn translucent_blocks_are_always_aligned(
        entries in prop::collection::vec(arb_entry(36), 0..10),
    ) {
        for layout in compute_column_layout(&entries, 22.0) {
            if layout.translucent {
                prop_assert!(layout.aligned);
            }
        }
    }

    #[test]
    fn wire_round_trip_preserves_payload(
        name in "[A-Za-z][A-Za-z ]{0,20}",
        minutes in 1i64..=1440,
        origin in prop::sample::select(vec![
            PayloadOrigin::Template,
            PayloadOrigin::Saved,
            PayloadOrigin::Scheduled,
        ]),
    ) {
        let payload = DragPayload {
            id: "block-1".into(),
            name,
            color: "#F59E0B".into(),
            duration_minutes: minutes,
            origin,
        };
        let parsed = DragPayload::from_wire(&payload.to_wire());
        prop_assert_eq!(parsed, Some(payload));
    }
}
