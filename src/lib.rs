//! Grid and free-form drag layout engine.
//!
//! The pure core converts between pixel and cell space, detects overlaps,
//! compacts grid layouts and resolves the displacement a single move causes.
//! [`LayoutCanvas`] drives that core from pointer gestures for one layout
//! instance; [`LayoutRegistry`] tracks the items of every layout on a page.

pub mod canvas;
pub mod collision;
pub mod compact;
pub mod config;
pub mod displace;
pub mod error;
pub mod geometry;
pub mod guides;
pub mod item;
pub mod logging;
pub mod metrics;
pub mod registry;
pub mod transform;

pub use canvas::{DroppingItem, LayoutCanvas, LayoutListener, NUDGE_STEP, Nudge};
pub use collision::{all_collisions, collides, first_collision, overlaps};
pub use compact::{bottom, compact, sort_grid_items};
pub use config::{CanvasConfig, CanvasOptions, LayoutMode, LayoutType};
pub use displace::{Arena, move_element};
pub use error::{LayoutError, Result};
pub use geometry::{Bound, Padding, PartialBound, Point, Pos, clamp, round_half_up};
pub use guides::{Direction, GuideLine, GuideLines};
pub use item::{
    DRAG_MIN_SIZE, GRID_MIN_SIZE, Item, ItemId, ItemInput, ItemOutput, ItemType, format_output,
    merge_by_id, normalize,
};
pub use logging::{
    FileSink, LogEvent, LogFields, LogLevel, LogSink, Logger, LoggingError, LoggingResult,
    MemorySink,
};
pub use metrics::{LayoutMetrics, MetricSnapshot};
pub use registry::{ItemDescriptor, LayoutRegistry};
pub use transform::{
    GridMetrics, grid_position_to_pixel, grid_to_pixel, item_rect, pixel_size_to_grid,
    pixel_to_grid,
};
