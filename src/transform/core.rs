use crate::config::CanvasConfig;
use crate::geometry::{Padding, Pos, clamp, round_half_up};
use crate::item::{Item, ItemType};

/// Convert a pixel offset along one axis into a cell index.
///
/// `round((pixel - padding) / (cell + margin))`, clamped to
/// `[min_cells, max_cells]`. Non-finite input is returned as is.
pub fn pixel_to_grid(
    pixel: f64,
    cell_size: f64,
    margin_px: f64,
    padding_px: f64,
    min_cells: f64,
    max_cells: f64,
) -> f64 {
    if !pixel.is_finite() {
        return pixel;
    }
    let cells = round_half_up((pixel - padding_px) / (cell_size + margin_px));
    clamp(cells, min_cells, max_cells)
}

/// Convert a pixel extent into a cell span.
///
/// One trailing margin is added back before dividing since a span of `n`
/// cells only contains `n - 1` gutters.
pub fn pixel_size_to_grid(
    pixel: f64,
    cell_size: f64,
    margin_px: f64,
    min_cells: f64,
    max_cells: f64,
) -> f64 {
    if !pixel.is_finite() {
        return pixel;
    }
    let cells = round_half_up((pixel + margin_px) / (cell_size + margin_px));
    clamp(cells, min_cells, max_cells)
}

/// Pixel extent of a span of `cells` cells.
pub fn grid_to_pixel(cells: f64, cell_size: f64, margin_px: f64) -> f64 {
    if !cells.is_finite() {
        return cells;
    }
    round_half_up(cell_size * cells + (cells - 1.0).max(0.0) * margin_px)
}

/// Pixel offset of cell index `cells`, including the leading padding.
pub fn grid_position_to_pixel(cells: f64, cell_size: f64, margin_px: f64, padding_px: f64) -> f64 {
    if !cells.is_finite() {
        return cells;
    }
    round_half_up((cell_size + margin_px) * cells + padding_px)
}

/// Cell dimensions of one grid canvas.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GridMetrics {
    pub cols: u32,
    pub col_width: f64,
    pub row_height: f64,
    pub margin_x: f64,
    pub margin_y: f64,
    pub padding: Padding,
}

impl GridMetrics {
    /// Derive the column width from the container's inner width.
    pub fn from_config(config: &CanvasConfig) -> Self {
        let cols = config.cols.max(1);
        let [margin_x, margin_y] = config.item_margin;
        let padding = config.container_padding;
        let gutters = margin_x * f64::from(cols - 1);
        let col_width = ((config.width - padding.horizontal() - gutters) / f64::from(cols)).max(0.0);

        Self {
            cols,
            col_width,
            row_height: config.row_height,
            margin_x,
            margin_y,
            padding,
        }
    }

    /// Pointer x in pixels to a column index that keeps a `w`-wide item inside the grid.
    pub fn column_at(&self, pixel_x: f64, w: f64) -> f64 {
        let max = (f64::from(self.cols) - w).max(0.0);
        pixel_to_grid(pixel_x, self.col_width, self.margin_x, self.padding.left, 0.0, max)
    }

    /// Pointer y in pixels to a row index. Rows are unbounded downward.
    pub fn row_at(&self, pixel_y: f64) -> f64 {
        pixel_to_grid(
            pixel_y,
            self.row_height,
            self.margin_y,
            self.padding.top,
            0.0,
            f64::INFINITY,
        )
    }

    pub fn width_in_cols(&self, pixel_w: f64, min: f64, max: f64) -> f64 {
        pixel_size_to_grid(pixel_w, self.col_width, self.margin_x, min, max)
    }

    pub fn height_in_rows(&self, pixel_h: f64, min: f64, max: f64) -> f64 {
        pixel_size_to_grid(pixel_h, self.row_height, self.margin_y, min, max)
    }

    /// Pixel height of the content area needed to show rows `0..rows`.
    pub fn content_height(&self, rows: f64) -> f64 {
        grid_to_pixel(rows, self.row_height, self.margin_y) + self.padding.vertical()
    }
}

/// Pixel box an item should be rendered at.
///
/// Free-floating items and items under an active gesture keep their raw
/// pixel coordinates (rounded); snapping them mid-gesture makes them jitter.
/// Everything else goes through the grid formulas.
pub fn item_rect(item: &Item, metrics: &GridMetrics) -> Pos {
    let raw = item.item_type == ItemType::Drag;

    let (w, h) = if raw || item.is_resizing {
        (round_half_up(item.w), round_half_up(item.h))
    } else {
        (
            grid_to_pixel(item.w, metrics.col_width, metrics.margin_x),
            grid_to_pixel(item.h, metrics.row_height, metrics.margin_y),
        )
    };

    let (x, y) = if raw || item.in_gesture() {
        (round_half_up(item.x), round_half_up(item.y))
    } else {
        (
            grid_position_to_pixel(
                item.x,
                metrics.col_width,
                metrics.margin_x,
                metrics.padding.left,
            ),
            grid_position_to_pixel(
                item.y,
                metrics.row_height,
                metrics.margin_y,
                metrics.padding.top,
            ),
        )
    };

    Pos::new(x, y, w, h)
}
