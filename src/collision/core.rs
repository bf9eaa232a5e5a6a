use crate::geometry::Pos;
use crate::item::Item;

/// Axis-aligned overlap test. Items sharing an id never collide and
/// touching edges do not count as overlap.
pub fn collides(a: &Item, b: &Item) -> bool {
    if a.i == b.i {
        return false;
    }
    overlaps(&a.pos(), &b.pos())
}

/// Overlap test on bare boxes, without the identity check.
pub fn overlaps(a: &Pos, b: &Pos) -> bool {
    if a.x + a.w <= b.x {
        return false;
    }
    if a.x >= b.x + b.w {
        return false;
    }
    if a.y + a.h <= b.y {
        return false;
    }
    if a.y >= b.y + b.h {
        return false;
    }
    true
}

/// First item of `layout`, in array order, that overlaps `item`.
pub fn first_collision<'a>(layout: &'a [Item], item: &Item) -> Option<&'a Item> {
    layout.iter().find(|other| collides(other, item))
}

/// Every item of `sorted` that overlaps `item`, in the order given.
pub fn all_collisions<'a>(sorted: &'a [Item], item: &Item) -> Vec<&'a Item> {
    sorted.iter().filter(|other| collides(other, item)).collect()
}
