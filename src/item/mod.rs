//! Item model and the normalizer that turns host records into items.
//!
//! Hosts hand in [`ItemInput`] records, the engine works on [`Item`]s and
//! reports [`ItemOutput`]s back.

mod core;

pub use core::{
    DRAG_MIN_SIZE, GRID_MIN_SIZE, Item, ItemId, ItemInput, ItemOutput, ItemType, format_output,
    merge_by_id, normalize,
};
