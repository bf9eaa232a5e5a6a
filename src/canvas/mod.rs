//! Canvas controller: one layout instance and the gestures applied to it.
//!
//! The controller owns the items of a single layout and turns pointer input
//! into calls on the pure engine (`transform`, `displace`, `compact`). Hosts
//! feed it pointer positions in screen pixels and receive formatted layouts
//! through the return values and an optional [`LayoutListener`].

mod listener;

pub use listener::{DroppingItem, LayoutListener, NUDGE_STEP, Nudge};

use std::collections::HashSet;

use serde_json::Value;

use crate::compact::compact;
use crate::config::{CanvasConfig, CanvasOptions, LayoutMode};
use crate::displace::Arena;
use crate::error::Result;
use crate::geometry::{Bound, Point, Pos};
use crate::guides::{Direction, GuideLine, GuideLines, MIN_DRAG_LENGTH};
use crate::item::{
    Item, ItemId, ItemInput, ItemOutput, ItemType, format_output, merge_by_id, normalize,
};
use crate::logging::{CANVAS_TARGET, LogLevel, event_with_fields, json_kv};
use crate::metrics::LayoutMetrics;
use crate::registry::{ItemDescriptor, LayoutRegistry};
use crate::transform::{GridMetrics, item_rect};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum GestureKind {
    Drag,
    Resize,
}

/// The gesture in flight. `pixel` is where the item is drawn while the
/// pointer owns it; `cell` is the last grid target a move was resolved for.
#[derive(Debug, Clone, PartialEq)]
struct Gesture {
    id: ItemId,
    kind: GestureKind,
    pixel: Pos,
    cell: Option<(f64, f64)>,
}

pub struct LayoutCanvas {
    layout_id: String,
    config: CanvasConfig,
    grid: GridMetrics,
    bound: Bound,
    items: Vec<Item>,
    guides: GuideLines,
    gesture: Option<Gesture>,
    listener: Option<Box<dyn LayoutListener>>,
    options: CanvasOptions,
}

impl LayoutCanvas {
    pub fn new(layout_id: impl Into<String>, config: CanvasConfig, options: CanvasOptions) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            layout_id: layout_id.into(),
            grid: GridMetrics::from_config(&config),
            bound: config.resolved_bound(),
            config,
            items: Vec::new(),
            guides: GuideLines::new(),
            gesture: None,
            listener: None,
            options,
        })
    }

    pub fn with_listener<L>(mut self, listener: L) -> Self
    where
        L: LayoutListener + 'static,
    {
        self.listener = Some(Box::new(listener));
        self
    }

    pub fn set_listener(&mut self, listener: Option<Box<dyn LayoutListener>>) {
        self.listener = listener;
    }

    pub fn layout_id(&self) -> &str {
        &self.layout_id
    }

    pub fn config(&self) -> &CanvasConfig {
        &self.config
    }

    pub fn grid_metrics(&self) -> &GridMetrics {
        &self.grid
    }

    pub fn items(&self) -> &[Item] {
        &self.items
    }

    pub fn output(&self) -> Vec<ItemOutput> {
        format_output(&self.items)
    }

    /// Swap the geometry, e.g. after the container was resized. Grid
    /// canvases are compacted again against the new metrics.
    pub fn set_config(&mut self, config: CanvasConfig) -> Result<()> {
        config.validate()?;
        self.grid = GridMetrics::from_config(&config);
        self.bound = config.resolved_bound();
        self.config = config;
        if self.config.is_grid() {
            self.compact_in_place();
        }
        Ok(())
    }

    /// Replace the items with normalized copies of `inputs`.
    ///
    /// Later duplicates of an id are dropped. Grid canvases are compacted;
    /// the returned layout keeps the host's order either way.
    pub fn set_items(&mut self, inputs: &[ItemInput]) -> Vec<ItemOutput> {
        let mut seen = HashSet::new();
        let mut items = Vec::with_capacity(inputs.len());
        for input in inputs {
            if !seen.insert(input.i.as_str()) {
                self.log(LogLevel::Warn, "duplicate_item", [json_kv("item", input.i.as_str())]);
                continue;
            }
            items.push(normalize(input, &self.layout_id));
        }

        self.items = items;
        self.gesture = None;
        if self.config.is_grid() {
            self.compact_in_place();
        }
        self.log(LogLevel::Debug, "set_items", [json_kv("count", self.items.len())]);
        self.output()
    }

    pub fn drag_start(&mut self, id: &str) -> Option<ItemOutput> {
        let idx = self.editable_index(id)?;
        if !self.items[idx].is_draggable {
            return None;
        }
        self.begin_gesture(idx, GestureKind::Drag);
        self.items[idx].is_dragging = true;
        self.log(LogLevel::Debug, "drag_start", [json_kv("item", id)]);
        Some(ItemOutput::from(&self.items[idx]))
    }

    /// Follow the pointer. `point` is the item's top-left corner in screen pixels.
    pub fn drag(&mut self, id: &str, point: Point) -> Option<Vec<ItemOutput>> {
        let idx = self.gesture_index(id, GestureKind::Drag)?;
        self.apply_drag(idx, point);

        let layout = self.output();
        if let Some(listener) = self.listener.as_mut() {
            listener.on_drag(&layout);
        }
        Some(layout)
    }

    pub fn drag_stop(&mut self, id: &str, point: Point) -> Option<Vec<ItemOutput>> {
        let idx = self.gesture_index(id, GestureKind::Drag)?;
        self.apply_drag(idx, point);
        self.items[idx].is_dragging = false;
        self.gesture = None;
        self.settle();

        let item = &self.items[idx];
        self.log(
            LogLevel::Info,
            "drag_stop",
            [json_kv("item", id), json_kv("x", item.x), json_kv("y", item.y)],
        );
        self.record(LayoutMetrics::record_gesture);
        self.emit_metrics();

        let layout = self.output();
        if let Some(listener) = self.listener.as_mut() {
            listener.on_drag_stop(&layout);
        }
        Some(layout)
    }

    pub fn resize_start(&mut self, id: &str) -> Option<ItemOutput> {
        let idx = self.editable_index(id)?;
        if !self.items[idx].is_resizable {
            return None;
        }
        self.begin_gesture(idx, GestureKind::Resize);
        self.items[idx].is_resizing = true;
        self.log(LogLevel::Debug, "resize_start", [json_kv("item", id)]);
        Some(ItemOutput::from(&self.items[idx]))
    }

    /// Follow a resize handle. `rect` is the item's box in screen pixels.
    pub fn resize(&mut self, id: &str, rect: Pos) -> Option<Vec<ItemOutput>> {
        let idx = self.gesture_index(id, GestureKind::Resize)?;
        self.apply_resize(idx, rect);

        let layout = self.output();
        if let Some(listener) = self.listener.as_mut() {
            listener.on_resize(&layout);
        }
        Some(layout)
    }

    pub fn resize_stop(&mut self, id: &str, rect: Pos) -> Option<Vec<ItemOutput>> {
        let idx = self.gesture_index(id, GestureKind::Resize)?;
        self.apply_resize(idx, rect);
        self.items[idx].is_resizing = false;
        self.gesture = None;
        self.settle();

        let item = &self.items[idx];
        self.log(
            LogLevel::Info,
            "resize_stop",
            [json_kv("item", id), json_kv("w", item.w), json_kv("h", item.h)],
        );
        self.record(LayoutMetrics::record_gesture);
        self.emit_metrics();

        let layout = self.output();
        if let Some(listener) = self.listener.as_mut() {
            listener.on_resize_stop(&layout);
        }
        Some(layout)
    }

    /// Add an item dragged in from outside at the pointer. Returns the new
    /// item as placed, or `None` when the id is already taken.
    pub fn drop(&mut self, point: Point, dropping: DroppingItem) -> Option<ItemOutput> {
        if !self.editable() {
            return None;
        }
        if self.index_of(&dropping.i).is_some() {
            self.log(LogLevel::Warn, "duplicate_drop", [json_kv("item", dropping.i.as_str())]);
            return None;
        }

        let item_type = dropping.item_type.unwrap_or(if self.config.is_grid() {
            ItemType::Grid
        } else {
            ItemType::Drag
        });
        let input = ItemInput::new(dropping.i, 0.0, 0.0, dropping.w, dropping.h)
            .with_type(item_type)
            .draggable(dropping.is_draggable)
            .resizable(dropping.is_resizable);
        let mut item = normalize(&input, &self.layout_id);

        let point = self.to_canvas(point);
        let (x, y) = if item.is_grid() {
            (self.grid.column_at(point.x, item.w), self.grid.row_at(point.y))
        } else {
            let clamped = self.bound.for_item(item.w, item.h).clamp_point(point);
            (clamped.x, clamped.y)
        };
        item.x = x;
        item.y = y;

        self.items.push(item);
        let idx = self.items.len() - 1;
        self.move_item(idx, x, y);
        self.settle();

        let placed = ItemOutput::from(&self.items[idx]);
        self.log(
            LogLevel::Info,
            "drop",
            [json_kv("item", placed.i.as_str()), json_kv("x", placed.x), json_kv("y", placed.y)],
        );
        self.record(LayoutMetrics::record_drop);
        self.emit_metrics();

        let layout = self.output();
        if let Some(listener) = self.listener.as_mut() {
            listener.on_drop(&layout, &placed);
        }
        Some(placed)
    }

    pub fn remove(&mut self, id: &str) -> Option<ItemOutput> {
        let idx = self.index_of(id)?;
        let removed = ItemOutput::from(&self.items.remove(idx));
        if self.gesture.as_ref().is_some_and(|gesture| gesture.id == id) {
            self.gesture = None;
        }
        self.settle();

        self.log(LogLevel::Info, "remove", [json_kv("item", id)]);
        self.record(LayoutMetrics::record_removal);
        self.emit_metrics();

        let layout = self.output();
        if let Some(listener) = self.listener.as_mut() {
            listener.on_remove(&layout, &removed);
        }
        Some(removed)
    }

    /// Keyboard movement of a free-floating item by [`NUDGE_STEP`] pixels.
    pub fn nudge(&mut self, id: &str, direction: Nudge) -> Option<ItemOutput> {
        let idx = self.editable_index(id)?;
        let item = &self.items[idx];
        if item.is_grid() {
            return None;
        }

        let (dx, dy) = direction.delta();
        let target = self
            .bound
            .for_item(item.w, item.h)
            .clamp_point(Point::new(item.x + dx, item.y + dy));
        self.items[idx].x = target.x;
        self.items[idx].y = target.y;

        let moved = ItemOutput::from(&self.items[idx]);
        if let Some(listener) = self.listener.as_mut() {
            listener.on_position_change(&moved);
        }
        Some(moved)
    }

    pub fn guides(&self) -> &GuideLines {
        &self.guides
    }

    pub fn add_guide(&mut self, line: GuideLine) -> bool {
        self.guides.add(line)
    }

    pub fn remove_guide(&mut self, line: &GuideLine) -> bool {
        self.guides.remove(line)
    }

    /// Offset of the guide line closest to `value`, if one is within `tolerance`.
    pub fn snap_to_guide(&self, value: f64, direction: Direction, tolerance: f64) -> Option<f64> {
        self.guides
            .nearest(value, direction, tolerance)
            .map(GuideLine::offset)
    }

    /// Where each item is drawn, in canvas pixels. The item under a gesture
    /// follows the pointer rather than its cells.
    pub fn rects(&self) -> Vec<(ItemId, Pos)> {
        self.items
            .iter()
            .map(|item| (item.i.clone(), self.rect_of(item)))
            .collect()
    }

    /// Cells a grid item under a gesture will settle into.
    pub fn placeholder(&self) -> Option<Pos> {
        let gesture = self.gesture.as_ref()?;
        let item = self.items.iter().find(|item| item.i == gesture.id)?;
        if !item.is_grid() {
            return None;
        }
        let mut settled = item.clone();
        settled.is_dragging = false;
        settled.is_resizing = false;
        settled.is_dropping = false;
        Some(item_rect(&settled, &self.grid))
    }

    /// Pixel height the canvas needs to show every item.
    pub fn content_height(&self) -> f64 {
        if self.config.is_grid() {
            let rows = self
                .items
                .iter()
                .filter(|item| item.is_grid())
                .map(Item::bottom)
                .fold(0.0, f64::max);
            self.grid.content_height(rows)
        } else {
            self.config.height
        }
    }

    /// Mirror this layout's items into a page-wide registry.
    pub fn publish(&self, registry: &mut LayoutRegistry) {
        let descriptors = self
            .items
            .iter()
            .map(|item| ItemDescriptor::new(item, self.rect_of(item)))
            .collect();
        registry.sync_layout(&self.layout_id, descriptors);
    }

    fn rect_of(&self, item: &Item) -> Pos {
        match &self.gesture {
            Some(gesture) if gesture.id == item.i => {
                let mut drawn = item.clone();
                drawn.set_pos(gesture.pixel);
                item_rect(&drawn, &self.grid)
            }
            _ => item_rect(item, &self.grid),
        }
    }

    fn editable(&self) -> bool {
        self.config.mode == LayoutMode::Edit
    }

    fn index_of(&self, id: &str) -> Option<usize> {
        self.items.iter().position(|item| item.i == id)
    }

    fn editable_index(&self, id: &str) -> Option<usize> {
        if !self.editable() {
            return None;
        }
        self.index_of(id)
    }

    fn gesture_index(&self, id: &str, kind: GestureKind) -> Option<usize> {
        let gesture = self.gesture.as_ref()?;
        if gesture.id != id || gesture.kind != kind {
            return None;
        }
        self.editable_index(id)
    }

    fn begin_gesture(&mut self, idx: usize, kind: GestureKind) {
        if let Some(previous) = self.gesture.take() {
            if let Some(other) = self.items.iter_mut().find(|item| item.i == previous.id) {
                other.is_dragging = false;
                other.is_resizing = false;
            }
        }
        let item = &self.items[idx];
        self.gesture = Some(Gesture {
            id: item.i.clone(),
            kind,
            pixel: item_rect(item, &self.grid),
            cell: None,
        });
    }

    fn to_canvas(&self, point: Point) -> Point {
        Point::new(point.x / self.config.scale, point.y / self.config.scale)
    }

    fn apply_drag(&mut self, idx: usize, point: Point) {
        let point = self.to_canvas(point);
        let Item { x, y, w, h, .. } = self.items[idx];

        if !self.items[idx].is_grid() {
            let clamped = self.bound.for_item(w, h).clamp_point(point);
            self.items[idx].x = clamped.x;
            self.items[idx].y = clamped.y;
            self.track_gesture(Pos::new(clamped.x, clamped.y, w, h), None);
            return;
        }

        let target = (self.grid.column_at(point.x, w), self.grid.row_at(point.y));
        let current = (x, y);
        let drawn = self.gesture_pixel();
        let pixel = Pos::new(point.x, point.y, drawn.w, drawn.h);
        let last = self.gesture.as_ref().and_then(|gesture| gesture.cell);
        self.track_gesture(pixel, Some(target));

        if target != current && Some(target) != last {
            self.move_item(idx, target.0, target.1);
            self.settle();
        }
    }

    fn apply_resize(&mut self, idx: usize, rect: Pos) {
        let rect = Pos::new(
            rect.x / self.config.scale,
            rect.y / self.config.scale,
            rect.w / self.config.scale,
            rect.h / self.config.scale,
        );
        let item = &self.items[idx];

        if !item.is_grid() {
            let mut w = rect.w.max(item.min_w.unwrap_or(MIN_DRAG_LENGTH));
            let mut h = rect.h.max(item.min_h.unwrap_or(MIN_DRAG_LENGTH));
            if let Some(max_w) = item.max_w {
                w = w.min(max_w);
            }
            if let Some(max_h) = item.max_h {
                h = h.min(max_h);
            }
            let origin = self
                .bound
                .for_item(w, h)
                .clamp_point(Point::new(rect.x, rect.y));
            let placed = Pos::new(origin.x, origin.y, w, h);
            self.items[idx].set_pos(placed);
            self.track_gesture(placed, None);
            return;
        }

        let room = (f64::from(self.grid.cols) - item.x).max(0.0);
        let max_w = item.max_w.map_or(room, |max_w| max_w.min(room));
        let max_h = item.max_h.unwrap_or(f64::INFINITY);
        let w = self.grid.width_in_cols(rect.w, item.min_width(), max_w);
        let h = self.grid.height_in_rows(rect.h, item.min_height(), max_h);
        let (x, y) = (item.x, item.y);
        let changed = (w, h) != (item.w, item.h);

        let origin = self.gesture_pixel();
        self.track_gesture(Pos::new(origin.x, origin.y, rect.w, rect.h), None);

        if changed {
            self.items[idx].w = w;
            self.items[idx].h = h;
            self.move_item(idx, x, y);
            self.settle();
        }
    }

    fn gesture_pixel(&self) -> Pos {
        self.gesture
            .as_ref()
            .map(|gesture| gesture.pixel)
            .unwrap_or_default()
    }

    fn track_gesture(&mut self, pixel: Pos, cell: Option<(f64, f64)>) {
        if let Some(gesture) = self.gesture.as_mut() {
            gesture.pixel = pixel;
            if cell.is_some() {
                gesture.cell = cell;
            }
        }
    }

    /// Place `items[idx]` and push its neighbours away as a user gesture.
    fn move_item(&mut self, idx: usize, x: f64, y: f64) {
        let mut arena = Arena::new(std::mem::take(&mut self.items));
        arena.move_element(idx, x, y, true);
        let displaced = arena.displaced();
        self.items = arena.into_items();
        for item in &mut self.items {
            item.moved = false;
        }
        self.record(|metrics| metrics.record_move(displaced));
    }

    /// Compact grid canvases; free canvases keep items where they were put.
    fn settle(&mut self) {
        if self.config.is_grid() {
            self.compact_in_place();
        }
    }

    fn compact_in_place(&mut self) {
        let compacted = compact(self.items.clone());
        self.items = merge_by_id(std::mem::take(&mut self.items), compacted);
        self.record(LayoutMetrics::record_compaction);
    }

    fn log<I>(&self, level: LogLevel, message: &str, fields: I)
    where
        I: IntoIterator<Item = (String, Value)>,
    {
        let Some(logger) = &self.options.logger else {
            return;
        };
        if !logger.enabled(level) {
            return;
        }
        let fields = std::iter::once(json_kv("layout", self.layout_id.as_str())).chain(fields);
        let _ = logger.log_event(event_with_fields(level, CANVAS_TARGET, message, fields));
    }

    fn record<F>(&self, update: F)
    where
        F: FnOnce(&mut LayoutMetrics),
    {
        if let Some(handle) = &self.options.metrics {
            if let Ok(mut metrics) = handle.lock() {
                update(&mut metrics);
            }
        }
    }

    /// Log a metrics snapshot once a change is committed, when enabled.
    fn emit_metrics(&self) {
        if !self.options.emit_metrics {
            return;
        }
        let (Some(logger), Some(handle)) = (&self.options.logger, &self.options.metrics) else {
            return;
        };
        let Ok(snapshot) = handle.lock().map(|metrics| metrics.snapshot()) else {
            return;
        };
        let _ = logger.log_event(snapshot.to_log_event(&self.options.metrics_target));
    }
}
