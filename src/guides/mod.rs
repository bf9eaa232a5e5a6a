//! Ruler guide lines and the helpers rulers are drawn with.

mod core;

pub use core::{
    Direction, GuideLine, GuideLines, MIN_DRAG_LENGTH, RULER_GAP, SNAP_STEP, TOP_RULER_LEFT_MARGIN,
    WRAPPER_PADDING, centered_offset, ruler_marks, snap_to_multiple,
};
