use serde::{Deserialize, Serialize};

use crate::geometry::round_half_up;

/// Pixels between two labelled ruler marks.
pub const RULER_GAP: f64 = 100.0;
pub const TOP_RULER_LEFT_MARGIN: f64 = 15.0;
/// Space kept around the canvas inside its scroll wrapper.
pub const WRAPPER_PADDING: f64 = 200.0;
/// Smallest size a free-floating item can be resized to without its own minimum.
pub const MIN_DRAG_LENGTH: f64 = 10.0;
/// Default granularity for snapping ruler positions.
pub const SNAP_STEP: f64 = 5.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Horizontal,
    Vertical,
}

/// An alignment line dropped from a ruler. Horizontal lines use `y`,
/// vertical lines use `x`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GuideLine {
    pub x: f64,
    pub y: f64,
    pub direction: Direction,
}

impl GuideLine {
    pub fn horizontal(y: f64) -> Self {
        Self {
            x: 0.0,
            y,
            direction: Direction::Horizontal,
        }
    }

    pub fn vertical(x: f64) -> Self {
        Self {
            x,
            y: 0.0,
            direction: Direction::Vertical,
        }
    }

    /// Coordinate the line sits on along its own axis.
    pub fn offset(&self) -> f64 {
        match self.direction {
            Direction::Horizontal => self.y,
            Direction::Vertical => self.x,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct GuideLines {
    lines: Vec<GuideLine>,
}

impl GuideLines {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns `false` when an identical line is already present.
    pub fn add(&mut self, line: GuideLine) -> bool {
        if self.lines.contains(&line) {
            return false;
        }
        self.lines.push(line);
        true
    }

    pub fn remove(&mut self, line: &GuideLine) -> bool {
        let before = self.lines.len();
        self.lines.retain(|existing| existing != line);
        self.lines.len() != before
    }

    pub fn iter(&self) -> impl Iterator<Item = &GuideLine> {
        self.lines.iter()
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    pub fn clear(&mut self) {
        self.lines.clear();
    }

    /// Closest line of `direction` within `tolerance` pixels of `value`.
    pub fn nearest(&self, value: f64, direction: Direction, tolerance: f64) -> Option<&GuideLine> {
        self.lines
            .iter()
            .filter(|line| line.direction == direction)
            .map(|line| (line, (line.offset() - value).abs()))
            .filter(|(_, distance)| *distance <= tolerance)
            .min_by(|a, b| a.1.total_cmp(&b.1))
            .map(|(line, _)| line)
    }
}

/// Ruler mark indices from `-before` to `after`, inclusive.
pub fn ruler_marks(before: u32, after: u32) -> Vec<i64> {
    (-i64::from(before)..=i64::from(after)).collect()
}

/// Round `value` to the nearest multiple of `step`, halves going up. A
/// non-positive step leaves the value alone.
pub fn snap_to_multiple(value: f64, step: f64) -> f64 {
    if !(step > 0.0) {
        return value;
    }
    round_half_up(value / step) * step
}

/// Offset that centres `content` inside `client`, or 0 when it does not fit.
pub fn centered_offset(client: f64, content: f64) -> f64 {
    if client > content {
        (client - content) / 2.0
    } else {
        0.0
    }
}
