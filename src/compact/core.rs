use std::cmp::Ordering;

use crate::collision::{collides, first_collision};
use crate::item::Item;

/// Reading order: top to bottom, then left to right.
pub(crate) fn reading_order(a: &Item, b: &Item) -> Ordering {
    a.y.total_cmp(&b.y).then_with(|| a.x.total_cmp(&b.x))
}

/// Grid items of `layout` in reading order. The sort is stable, so items on
/// the same cell keep their relative input order.
pub fn sort_grid_items(layout: &[Item]) -> Vec<Item> {
    let mut sorted: Vec<Item> = layout.iter().filter(|item| item.is_grid()).cloned().collect();
    sorted.sort_by(reading_order);
    sorted
}

/// Lowest edge of `layout`, `0` when empty.
pub fn bottom(layout: &[Item]) -> f64 {
    layout.iter().map(Item::bottom).fold(0.0, f64::max)
}

/// Gravity-compact the grid items of `items`.
///
/// Grid items are processed in reading order and each one is pulled up as far
/// as the already placed items allow, pushing later items down when it has to
/// move below a collision. The result holds the grid items in their final
/// reading order followed by the drag items exactly as they came in.
pub fn compact(items: Vec<Item>) -> Vec<Item> {
    let (grid, floating): (Vec<Item>, Vec<Item>) = items.into_iter().partition(Item::is_grid);

    let mut sorted = grid;
    sorted.sort_by(reading_order);

    for idx in 0..sorted.len() {
        sorted[idx].moved = false;
        compact_item(&mut sorted, idx);
    }

    sorted.sort_by(reading_order);
    sorted.extend(floating);
    sorted
}

/// Settle `sorted[idx]` against the placed prefix `sorted[..idx]`.
fn compact_item(sorted: &mut [Item], idx: usize) {
    let ceiling = bottom(&sorted[..idx]);
    sorted[idx].y = sorted[idx].y.min(ceiling);

    while sorted[idx].y > 0.0 {
        if first_collision(&sorted[..idx], &sorted[idx]).is_some() {
            break;
        }
        sorted[idx].y -= 1.0;
    }

    while let Some(move_to) = first_collision(&sorted[..idx], &sorted[idx]).map(Item::bottom) {
        // Malformed geometry can make an item collide with everything.
        if !(move_to > sorted[idx].y) {
            break;
        }
        resolve_compaction_collision(sorted, idx, move_to);
    }

    sorted[idx].y = sorted[idx].y.max(0.0);
    sorted[idx].x = sorted[idx].x.max(0.0);
}

/// Move `sorted[idx]` to row `move_to`, first pushing every later item that
/// it would overlap one row further down below it.
fn resolve_compaction_collision(sorted: &mut [Item], idx: usize, move_to: f64) {
    sorted[idx].y += 1.0;

    for next in idx + 1..sorted.len() {
        if sorted[next].y > sorted[idx].bottom() {
            break;
        }
        if collides(&sorted[idx], &sorted[next]) {
            let below = move_to + sorted[idx].h;
            resolve_compaction_collision(sorted, next, below);
        }
    }

    sorted[idx].y = move_to;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::collision::collides;

    fn find<'a>(layout: &'a [Item], id: &str) -> &'a Item {
        layout.iter().find(|item| item.i == id).unwrap()
    }

    #[test]
    fn bottom_of_empty_layout_is_zero() {
        assert_eq!(bottom(&[]), 0.0);
        let layout = vec![
            Item::grid("a", 0.0, 1.0, 1.0, 2.0),
            Item::grid("b", 0.0, 0.0, 1.0, 1.0),
        ];
        assert_eq!(bottom(&layout), 3.0);
    }

    #[test]
    fn unsorted_column_stacks_in_reading_order() {
        let layout = vec![
            Item::grid("a", 0.0, 2.0, 1.0, 1.0),
            Item::grid("b", 0.0, 0.0, 1.0, 1.0),
            Item::grid("c", 0.0, 1.0, 1.0, 1.0),
        ];
        let compacted = compact(layout);
        let order: Vec<_> = compacted.iter().map(|i| (i.i.as_str(), i.y)).collect();
        assert_eq!(order, vec![("b", 0.0), ("c", 1.0), ("a", 2.0)]);
    }

    #[test]
    fn gaps_are_closed() {
        let layout = vec![
            Item::grid("a", 0.0, 5.0, 2.0, 1.0),
            Item::grid("b", 0.0, 9.0, 1.0, 3.0),
        ];
        let compacted = compact(layout);
        assert_eq!(find(&compacted, "a").y, 0.0);
        assert_eq!(find(&compacted, "b").y, 1.0);
    }

    #[test]
    fn overlapping_items_are_separated() {
        let layout = vec![
            Item::grid("a", 0.0, 0.0, 2.0, 2.0),
            Item::grid("b", 1.0, 0.0, 2.0, 2.0),
            Item::grid("c", 0.0, 1.0, 1.0, 1.0),
        ];
        let compacted = compact(layout);
        for a in &compacted {
            for b in &compacted {
                assert!(!collides(a, b), "{} overlaps {}", a.i, b.i);
            }
        }
        assert_eq!(find(&compacted, "a").y, 0.0);
    }

    #[test]
    fn negative_coordinates_are_floored() {
        let layout = vec![Item::grid("a", -3.0, -2.0, 1.0, 1.0)];
        let compacted = compact(layout);
        assert_eq!((compacted[0].x, compacted[0].y), (0.0, 0.0));
    }

    #[test]
    fn drag_items_are_untouched() {
        let mut floating = Item::drag("f", 37.6, 12.4, 100.0, 80.0);
        floating.moved = true;
        let layout = vec![floating.clone(), Item::grid("g", 0.0, 3.0, 1.0, 1.0)];

        let compacted = compact(layout);
        assert_eq!(compacted.len(), 2);
        assert_eq!(compacted[0].i, "g");
        assert_eq!(compacted[1], floating);
    }

    #[test]
    fn moved_flags_are_reset() {
        let mut item = Item::grid("a", 0.0, 0.0, 1.0, 1.0);
        item.moved = true;
        let compacted = compact(vec![item]);
        assert!(!compacted[0].moved);
    }

    #[test]
    fn compaction_is_idempotent() {
        let layout = vec![
            Item::grid("a", 1.0, 4.0, 2.0, 1.0),
            Item::grid("b", 0.0, 2.0, 1.0, 3.0),
            Item::grid("c", 2.0, 0.0, 1.0, 2.0),
            Item::grid("d", 0.0, 0.0, 3.0, 1.0),
        ];
        let once = compact(layout);
        let twice = compact(once.clone());
        assert_eq!(once, twice);
    }

    #[test]
    fn sort_grid_items_skips_drag_items() {
        let layout = vec![
            Item::grid("b", 1.0, 0.0, 1.0, 1.0),
            Item::drag("f", 0.0, 0.0, 10.0, 10.0),
            Item::grid("a", 0.0, 0.0, 1.0, 1.0),
        ];
        let ids: Vec<_> = sort_grid_items(&layout).into_iter().map(|i| i.i).collect();
        assert_eq!(ids, vec!["a", "b"]);
    }
}
