//! Pixel and grid coordinate conversions.

mod core;

pub use core::{
    GridMetrics, grid_position_to_pixel, grid_to_pixel, item_rect, pixel_size_to_grid,
    pixel_to_grid,
};
