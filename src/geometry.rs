use serde::{Deserialize, Serialize};

use crate::error::{LayoutError, Result};

/// Clamp `value` into `[min, max]`, applying the lower bound first.
///
/// Unlike `f64::clamp` this never panics when `min > max`; the upper bound
/// wins, which is what pointer clamping against a too-small region wants.
pub fn clamp(value: f64, min: f64, max: f64) -> f64 {
    value.max(min).min(max)
}

/// Round half toward positive infinity, matching the browser's `Math.round`.
///
/// `f64::round` rounds halves away from zero, which disagrees for negative
/// pointer deltas (`-1.5` must become `-1`).
pub fn round_half_up(value: f64) -> f64 {
    let floor = value.floor();
    if value - floor >= 0.5 {
        floor + 1.0
    } else {
        floor
    }
}

/// A point in canvas pixels.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Position and size of a box, in grid cells or pixels depending on context.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Pos {
    pub x: f64,
    pub y: f64,
    pub w: f64,
    pub h: f64,
}

impl Pos {
    pub const fn new(x: f64, y: f64, w: f64, h: f64) -> Self {
        Self { x, y, w, h }
    }

    pub fn right(&self) -> f64 {
        self.x + self.w
    }

    pub fn bottom(&self) -> f64 {
        self.y + self.h
    }

    /// Whether `point` lies inside the box. The far edges are exclusive.
    pub fn contains(&self, point: Point) -> bool {
        point.x >= self.x && point.x < self.right() && point.y >= self.y && point.y < self.bottom()
    }
}

/// Clamp region for drag and resize deltas.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bound {
    pub min_x: f64,
    pub max_x: f64,
    pub min_y: f64,
    pub max_y: f64,
}

impl Default for Bound {
    fn default() -> Self {
        Self::UNBOUNDED
    }
}

/// A bound where any side may be left open.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct PartialBound {
    #[serde(default)]
    pub min_x: Option<f64>,
    #[serde(default)]
    pub max_x: Option<f64>,
    #[serde(default)]
    pub min_y: Option<f64>,
    #[serde(default)]
    pub max_y: Option<f64>,
}

impl Bound {
    pub const UNBOUNDED: Bound = Bound {
        min_x: f64::NEG_INFINITY,
        max_x: f64::INFINITY,
        min_y: f64::NEG_INFINITY,
        max_y: f64::INFINITY,
    };

    pub const fn new(min_x: f64, max_x: f64, min_y: f64, max_y: f64) -> Self {
        Self {
            min_x,
            max_x,
            min_y,
            max_y,
        }
    }

    /// Fill missing sides with infinities.
    pub fn from_partial(partial: PartialBound) -> Self {
        Self {
            min_x: partial.min_x.unwrap_or(f64::NEG_INFINITY),
            max_x: partial.max_x.unwrap_or(f64::INFINITY),
            min_y: partial.min_y.unwrap_or(f64::NEG_INFINITY),
            max_y: partial.max_y.unwrap_or(f64::INFINITY),
        }
    }

    /// Bound for the top-left corner of a `w` x `h` box that must stay inside `self`.
    pub fn for_item(&self, w: f64, h: f64) -> Self {
        Self {
            min_x: self.min_x,
            max_x: self.max_x - w,
            min_y: self.min_y,
            max_y: self.max_y - h,
        }
    }

    pub fn clamp_point(&self, point: Point) -> Point {
        Point::new(
            clamp(point.x, self.min_x, self.max_x),
            clamp(point.y, self.min_y, self.max_y),
        )
    }

    pub fn is_unbounded(&self) -> bool {
        *self == Self::UNBOUNDED
    }
}

/// Container padding resolved to four sides.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(try_from = "Vec<f64>", into = "Vec<f64>")]
pub struct Padding {
    pub top: f64,
    pub right: f64,
    pub bottom: f64,
    pub left: f64,
}

impl Padding {
    pub const fn uniform(value: f64) -> Self {
        Self {
            top: value,
            right: value,
            bottom: value,
            left: value,
        }
    }

    /// Expand CSS shorthand: `[all]`, `[vertical, horizontal]`,
    /// `[top, horizontal, bottom]` or `[top, right, bottom, left]`.
    pub fn from_shorthand(values: &[f64]) -> Result<Self> {
        match *values {
            [all] => Ok(Self::uniform(all)),
            [vertical, horizontal] => Ok(Self {
                top: vertical,
                right: horizontal,
                bottom: vertical,
                left: horizontal,
            }),
            [top, horizontal, bottom] => Ok(Self {
                top,
                right: horizontal,
                bottom,
                left: horizontal,
            }),
            [top, right, bottom, left] => Ok(Self {
                top,
                right,
                bottom,
                left,
            }),
            _ => Err(LayoutError::InvalidPadding(values.len())),
        }
    }

    pub fn horizontal(&self) -> f64 {
        self.left + self.right
    }

    pub fn vertical(&self) -> f64 {
        self.top + self.bottom
    }
}

impl TryFrom<Vec<f64>> for Padding {
    type Error = LayoutError;

    fn try_from(values: Vec<f64>) -> Result<Self> {
        Self::from_shorthand(&values)
    }
}

impl From<Padding> for Vec<f64> {
    fn from(padding: Padding) -> Self {
        vec![padding.top, padding.right, padding.bottom, padding.left]
    }
}
