//! Canvas configuration as supplied by a host, plus engine-side options.

use std::sync::{Arc, Mutex};

use serde::Deserialize;

use crate::error::{LayoutError, Result};
use crate::geometry::{Bound, Padding, PartialBound};
use crate::logging::{Logger, METRICS_TARGET};
use crate::metrics::LayoutMetrics;

/// Whether a canvas snaps items to a grid or places them freely.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LayoutType {
    Grid,
    #[default]
    Drag,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LayoutMode {
    #[default]
    Edit,
    View,
}

/// Geometry of one canvas. Every field has a default so hosts only spell out
/// what they change.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct CanvasConfig {
    pub layout_type: LayoutType,
    pub mode: LayoutMode,
    pub cols: u32,
    pub row_height: f64,
    pub width: f64,
    pub height: f64,
    /// Horizontal and vertical gutter between cells, in pixels.
    pub item_margin: [f64; 2],
    pub container_padding: Padding,
    pub scale: f64,
    pub bound: Option<PartialBound>,
}

impl Default for CanvasConfig {
    fn default() -> Self {
        Self {
            layout_type: LayoutType::default(),
            mode: LayoutMode::default(),
            cols: 12,
            row_height: 30.0,
            width: 800.0,
            height: 400.0,
            item_margin: [0.0, 0.0],
            container_padding: Padding::uniform(0.0),
            scale: 1.0,
            bound: None,
        }
    }
}

impl CanvasConfig {
    /// Parse and validate a JSON configuration object.
    pub fn from_json_str(source: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(source)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.cols == 0 {
            return Err(LayoutError::InvalidConfig("cols must be at least 1".into()));
        }
        if !(self.row_height.is_finite() && self.row_height > 0.0) {
            return Err(LayoutError::InvalidConfig(format!(
                "row_height must be positive, got {}",
                self.row_height
            )));
        }
        if !(self.scale.is_finite() && self.scale > 0.0) {
            return Err(LayoutError::InvalidConfig(format!(
                "scale must be positive, got {}",
                self.scale
            )));
        }
        if !(self.width.is_finite() && self.width >= 0.0) || !(self.height.is_finite() && self.height >= 0.0) {
            return Err(LayoutError::InvalidConfig(format!(
                "canvas size must be non-negative, got {}x{}",
                self.width, self.height
            )));
        }
        if self.item_margin.iter().any(|m| !m.is_finite() || *m < 0.0) {
            return Err(LayoutError::InvalidConfig("item_margin must be non-negative".into()));
        }
        Ok(())
    }

    pub fn is_grid(&self) -> bool {
        self.layout_type == LayoutType::Grid
    }

    /// Clamp region for free-floating items, open on every side the host left out.
    pub fn resolved_bound(&self) -> Bound {
        self.bound.map(Bound::from_partial).unwrap_or_default()
    }
}

/// Knobs that belong to the embedding program rather than the layout data.
#[derive(Debug, Clone)]
pub struct CanvasOptions {
    /// Structured logger; `None` keeps the canvas silent.
    pub logger: Option<Logger>,
    /// Shared counters, usually one handle per page.
    pub metrics: Option<Arc<Mutex<LayoutMetrics>>>,
    /// Log a metrics snapshot after every committed change.
    pub emit_metrics: bool,
    pub metrics_target: String,
}

impl Default for CanvasOptions {
    fn default() -> Self {
        Self {
            logger: None,
            metrics: None,
            emit_metrics: false,
            metrics_target: METRICS_TARGET.to_string(),
        }
    }
}

impl CanvasOptions {
    pub fn enable_metrics(&mut self) {
        if self.metrics.is_none() {
            self.metrics = Some(Arc::new(Mutex::new(LayoutMetrics::new())));
        }
    }

    pub fn metrics_handle(&self) -> Option<Arc<Mutex<LayoutMetrics>>> {
        self.metrics.as_ref().map(Arc::clone)
    }
}
