//! Gravity compaction for grid canvases.

mod core;

pub(crate) use core::reading_order;
pub use core::{bottom, compact, sort_grid_items};
