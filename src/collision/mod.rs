//! Overlap queries between layout items.

mod core;

pub use core::{all_collisions, collides, first_collision, overlaps};
