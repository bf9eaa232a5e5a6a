use serde::{Deserialize, Serialize};

use crate::geometry::Pos;

/// Item identifier, unique within one layout.
pub type ItemId = String;

/// Smallest size a free-floating item may shrink to, in pixels, when it
/// declares no minimum of its own.
pub const DRAG_MIN_SIZE: f64 = 5.0;

/// Smallest span a grid item may shrink to, in cells.
pub const GRID_MIN_SIZE: f64 = 1.0;

/// Placement mode of an item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ItemType {
    /// Snapped to cells, compacted and displaced.
    Grid,
    /// Absolute pixel placement, ignored by compaction and displacement.
    #[default]
    Drag,
}

impl ItemType {
    pub fn default_min_size(self) -> f64 {
        match self {
            ItemType::Grid => GRID_MIN_SIZE,
            ItemType::Drag => DRAG_MIN_SIZE,
        }
    }
}

/// A fully constructed layout item.
#[derive(Debug, Clone, PartialEq)]
pub struct Item {
    pub i: ItemId,
    pub x: f64,
    pub y: f64,
    pub w: f64,
    pub h: f64,
    pub item_type: ItemType,
    pub min_w: Option<f64>,
    pub min_h: Option<f64>,
    pub max_w: Option<f64>,
    pub max_h: Option<f64>,
    pub is_draggable: bool,
    pub is_resizable: bool,
    pub is_droppable: bool,
    pub is_nested: bool,
    pub need_border_draggable_handler: bool,
    pub is_dragging: bool,
    pub is_resizing: bool,
    pub is_dropping: bool,
    pub moved: bool,
    pub layout_id: String,
}

impl Item {
    /// A grid item with every flag off, mostly useful for tests and callers
    /// assembling layouts by hand.
    pub fn grid(i: impl Into<ItemId>, x: f64, y: f64, w: f64, h: f64) -> Self {
        Self::with_type(i, ItemType::Grid, Pos::new(x, y, w, h))
    }

    /// A free-floating item positioned in pixels.
    pub fn drag(i: impl Into<ItemId>, x: f64, y: f64, w: f64, h: f64) -> Self {
        Self::with_type(i, ItemType::Drag, Pos::new(x, y, w, h))
    }

    fn with_type(i: impl Into<ItemId>, item_type: ItemType, pos: Pos) -> Self {
        Self {
            i: i.into(),
            x: pos.x,
            y: pos.y,
            w: pos.w,
            h: pos.h,
            item_type,
            min_w: None,
            min_h: None,
            max_w: None,
            max_h: None,
            is_draggable: false,
            is_resizable: false,
            is_droppable: false,
            is_nested: false,
            need_border_draggable_handler: false,
            is_dragging: false,
            is_resizing: false,
            is_dropping: false,
            moved: false,
            layout_id: String::new(),
        }
    }

    pub fn is_grid(&self) -> bool {
        self.item_type == ItemType::Grid
    }

    pub fn pos(&self) -> Pos {
        Pos::new(self.x, self.y, self.w, self.h)
    }

    pub fn set_pos(&mut self, pos: Pos) {
        self.x = pos.x;
        self.y = pos.y;
        self.w = pos.w;
        self.h = pos.h;
    }

    pub fn bottom(&self) -> f64 {
        self.y + self.h
    }

    /// Effective minimum width, falling back to the per-type default.
    pub fn min_width(&self) -> f64 {
        self.min_w.unwrap_or_else(|| self.item_type.default_min_size())
    }

    pub fn min_height(&self) -> f64 {
        self.min_h.unwrap_or_else(|| self.item_type.default_min_size())
    }

    /// Whether a gesture currently owns this item's coordinates.
    pub fn in_gesture(&self) -> bool {
        self.is_dragging || self.is_resizing || self.is_dropping
    }
}

/// Partial item record as supplied by a host.
///
/// Every field other than the identifier and geometry is optional; the
/// normalizer decides what a missing value means.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ItemInput {
    pub i: ItemId,
    pub x: f64,
    pub y: f64,
    pub w: f64,
    pub h: f64,
    #[serde(default, rename = "type")]
    pub item_type: Option<ItemType>,
    #[serde(default)]
    pub min_w: Option<f64>,
    #[serde(default)]
    pub min_h: Option<f64>,
    #[serde(default)]
    pub max_w: Option<f64>,
    #[serde(default)]
    pub max_h: Option<f64>,
    #[serde(default)]
    pub is_draggable: Option<bool>,
    #[serde(default)]
    pub is_resizable: Option<bool>,
    #[serde(default)]
    pub is_droppable: Option<bool>,
    #[serde(default)]
    pub is_nested: Option<bool>,
    #[serde(default)]
    pub need_border_draggable_handler: Option<bool>,
}

impl ItemInput {
    pub fn new(i: impl Into<ItemId>, x: f64, y: f64, w: f64, h: f64) -> Self {
        Self {
            i: i.into(),
            x,
            y,
            w,
            h,
            ..Self::default()
        }
    }

    pub fn with_type(mut self, item_type: ItemType) -> Self {
        self.item_type = Some(item_type);
        self
    }

    pub fn with_min(mut self, min_w: f64, min_h: f64) -> Self {
        self.min_w = Some(min_w);
        self.min_h = Some(min_h);
        self
    }

    pub fn draggable(mut self, enabled: bool) -> Self {
        self.is_draggable = Some(enabled);
        self
    }

    pub fn resizable(mut self, enabled: bool) -> Self {
        self.is_resizable = Some(enabled);
        self
    }
}

/// Build a complete [`Item`] from host input.
///
/// Missing type means a free-floating drag item; interaction flags default
/// to off; `w`/`h` are raised to the item's minimum; transient gesture flags
/// start cleared. The input is left untouched.
pub fn normalize(input: &ItemInput, layout_id: &str) -> Item {
    let item_type = input.item_type.unwrap_or_default();
    let default_min = item_type.default_min_size();

    Item {
        i: input.i.clone(),
        x: input.x,
        y: input.y,
        w: input.w.max(input.min_w.unwrap_or(default_min)),
        h: input.h.max(input.min_h.unwrap_or(default_min)),
        item_type,
        min_w: input.min_w,
        min_h: input.min_h,
        max_w: input.max_w,
        max_h: input.max_h,
        is_draggable: input.is_draggable.unwrap_or(false),
        is_resizable: input.is_resizable.unwrap_or(false),
        is_droppable: input.is_droppable.unwrap_or(false),
        is_nested: input.is_nested.unwrap_or(false),
        need_border_draggable_handler: input.need_border_draggable_handler.unwrap_or(false),
        is_dragging: false,
        is_resizing: false,
        is_dropping: false,
        moved: false,
        layout_id: layout_id.to_string(),
    }
}

/// Consumer-visible view of an item. Internal bookkeeping (`is_dragging`,
/// `moved`) never appears here.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ItemOutput {
    pub i: ItemId,
    pub x: f64,
    pub y: f64,
    pub w: f64,
    pub h: f64,
    #[serde(rename = "type")]
    pub item_type: ItemType,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min_w: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min_h: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_w: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_h: Option<f64>,
    pub is_draggable: bool,
    pub is_resizable: bool,
    pub is_droppable: bool,
    pub is_nested: bool,
    pub need_border_draggable_handler: bool,
    pub is_resizing: bool,
    pub is_dropping: bool,
    pub layout_id: String,
}

impl From<&Item> for ItemOutput {
    fn from(item: &Item) -> Self {
        Self {
            i: item.i.clone(),
            x: item.x,
            y: item.y,
            w: item.w,
            h: item.h,
            item_type: item.item_type,
            min_w: item.min_w,
            min_h: item.min_h,
            max_w: item.max_w,
            max_h: item.max_h,
            is_draggable: item.is_draggable,
            is_resizable: item.is_resizable,
            is_droppable: item.is_droppable,
            is_nested: item.is_nested,
            need_border_draggable_handler: item.need_border_draggable_handler,
            is_resizing: item.is_resizing,
            is_dropping: item.is_dropping,
            layout_id: item.layout_id.clone(),
        }
    }
}

/// Prepare a layout for a host callback.
pub fn format_output(items: &[Item]) -> Vec<ItemOutput> {
    items.iter().map(ItemOutput::from).collect()
}

/// Replace entries of `layout` with same-id entries from `updates`, keeping
/// `layout`'s order. Items absent from `updates` are kept as they are.
pub fn merge_by_id(layout: Vec<Item>, updates: Vec<Item>) -> Vec<Item> {
    let mut updates: std::collections::HashMap<ItemId, Item> =
        updates.into_iter().map(|item| (item.i.clone(), item)).collect();
    layout
        .into_iter()
        .map(|item| updates.remove(&item.i).unwrap_or(item))
        .collect()
}
