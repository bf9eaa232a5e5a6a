//! Property tests for the layout engine.
//!
//! 1. Compaction is idempotent.
//! 2. Compaction leaves no grid overlaps and no negative coordinates.
//! 3. Displacement after a move leaves no grid overlaps.
//! 4. Collision is symmetric and touching edges do not collide.
//! 5. Cell positions survive a trip through pixel space.
//! 6. Normalized items respect their minimum size.

use drag_layout::{
    Item, ItemInput, ItemType, collides, compact, grid_position_to_pixel, move_element, normalize,
    pixel_to_grid,
};
use proptest::prelude::*;

// ── Helpers ─────────────────────────────────────────────────────────────

fn grid_layout(max_len: usize) -> impl Strategy<Value = Vec<Item>> {
    prop::collection::vec((0u8..4, 0u8..8, 1u8..=3, 1u8..=3), 1..=max_len).prop_map(|cells| {
        cells
            .into_iter()
            .enumerate()
            .map(|(idx, (x, y, w, h))| {
                Item::grid(
                    format!("item-{idx}"),
                    f64::from(x),
                    f64::from(y),
                    f64::from(w),
                    f64::from(h),
                )
            })
            .collect()
    })
}

fn assert_no_overlap(layout: &[Item]) -> Result<(), TestCaseError> {
    for (idx, a) in layout.iter().enumerate() {
        for b in &layout[idx + 1..] {
            if a.is_grid() && b.is_grid() {
                prop_assert!(!collides(a, b), "{} overlaps {}", a.i, b.i);
            }
        }
    }
    Ok(())
}

// ── Compaction ──────────────────────────────────────────────────────────

proptest! {
    #[test]
    fn compaction_is_idempotent(layout in grid_layout(10)) {
        let once = compact(layout);
        let twice = compact(once.clone());
        prop_assert_eq!(once, twice);
    }

    #[test]
    fn compaction_resolves_every_overlap(layout in grid_layout(10)) {
        let len = layout.len();
        let compacted = compact(layout);
        prop_assert_eq!(compacted.len(), len);
        assert_no_overlap(&compacted)?;
        for item in &compacted {
            prop_assert!(item.x >= 0.0 && item.y >= 0.0);
            prop_assert!(!item.moved);
        }
    }
}

// ── Displacement ────────────────────────────────────────────────────────

proptest! {
    #[test]
    fn moving_an_item_never_leaves_overlaps(
        layout in grid_layout(8),
        pick in any::<prop::sample::Index>(),
        x in 0u8..4,
        y in 0u8..10,
        is_user_action in any::<bool>(),
    ) {
        let settled = compact(layout);
        let target = settled[pick.index(settled.len())].i.clone();

        let moved = move_element(settled.clone(), &target, f64::from(x), f64::from(y), is_user_action);
        prop_assert_eq!(moved.len(), settled.len());
        let mover = moved.iter().find(|item| item.i == target).unwrap();
        prop_assert_eq!((mover.x, mover.y), (f64::from(x), f64::from(y)));
        assert_no_overlap(&moved)?;

        let recompacted = compact(moved);
        assert_no_overlap(&recompacted)?;
    }
}

// ── Collision ───────────────────────────────────────────────────────────

proptest! {
    #[test]
    fn collision_is_symmetric(pair in grid_layout(2).prop_filter("two items", |l| l.len() == 2)) {
        prop_assert_eq!(collides(&pair[0], &pair[1]), collides(&pair[1], &pair[0]));
    }

    #[test]
    fn touching_edges_do_not_collide(
        x in -50.0f64..50.0,
        y in -50.0f64..50.0,
        w in 1.0f64..20.0,
        h in 1.0f64..20.0,
    ) {
        let a = Item::grid("a", x, y, w, h);
        let right = Item::grid("right", x + w, y, w, h);
        let below = Item::grid("below", x, y + h, w, h);
        prop_assert!(!collides(&a, &right));
        prop_assert!(!collides(&a, &below));
        prop_assert!(!collides(&a, &a.clone()));
    }
}

// ── Transform ───────────────────────────────────────────────────────────

proptest! {
    #[test]
    fn cells_survive_pixel_space(
        cells in 0u32..40,
        cell_size in 10u32..200,
        margin in 0u32..20,
        padding in 0u32..50,
    ) {
        let (cells, cell_size, margin, padding) =
            (f64::from(cells), f64::from(cell_size), f64::from(margin), f64::from(padding));
        let pixel = grid_position_to_pixel(cells, cell_size, margin, padding);
        let back = pixel_to_grid(pixel, cell_size, margin, padding, 0.0, f64::INFINITY);
        prop_assert_eq!(back, cells);
    }

    #[test]
    fn pixel_to_grid_stays_in_range(
        pixel in -5000.0f64..5000.0,
        cell_size in 1.0f64..200.0,
        max_cells in 0.0f64..24.0,
    ) {
        let cells = pixel_to_grid(pixel, cell_size, 0.0, 0.0, 0.0, max_cells);
        prop_assert!((0.0..=max_cells).contains(&cells));
    }
}

// ── Normalizer ──────────────────────────────────────────────────────────

proptest! {
    #[test]
    fn normalized_size_respects_minimum(
        w in 0.0f64..50.0,
        h in 0.0f64..50.0,
        min_w in prop::option::of(1.0f64..30.0),
        grid in any::<bool>(),
    ) {
        let item_type = if grid { ItemType::Grid } else { ItemType::Drag };
        let mut input = ItemInput::new("a", 0.0, 0.0, w, h).with_type(item_type);
        input.min_w = min_w;
        let item = normalize(&input, "root");

        prop_assert!(item.w >= item.min_width());
        prop_assert!(item.h >= item.min_height());
        prop_assert!(item.w >= w && item.h >= h);
        prop_assert!(!item.is_dragging && !item.moved);
    }
}
