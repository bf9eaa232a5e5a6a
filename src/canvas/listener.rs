use crate::item::{ItemId, ItemOutput, ItemType};

/// Host callbacks fired by a [`LayoutCanvas`](super::LayoutCanvas).
///
/// Every method has a no-op default so hosts only implement what they use.
/// Layout arguments are the full formatted layout after the change.
pub trait LayoutListener: Send {
    fn on_drag(&mut self, _layout: &[ItemOutput]) {}

    fn on_drag_stop(&mut self, _layout: &[ItemOutput]) {}

    fn on_resize(&mut self, _layout: &[ItemOutput]) {}

    fn on_resize_stop(&mut self, _layout: &[ItemOutput]) {}

    /// A free-floating item was moved by keyboard.
    fn on_position_change(&mut self, _item: &ItemOutput) {}

    fn on_drop(&mut self, _layout: &[ItemOutput], _item: &ItemOutput) {}

    fn on_remove(&mut self, _layout: &[ItemOutput], _item: &ItemOutput) {}
}

/// An item being dragged in from outside the canvas.
#[derive(Debug, Clone, PartialEq)]
pub struct DroppingItem {
    pub i: ItemId,
    pub w: f64,
    pub h: f64,
    /// Falls back to the canvas kind when unset.
    pub item_type: Option<ItemType>,
    pub is_draggable: bool,
    pub is_resizable: bool,
}

impl DroppingItem {
    pub fn new(i: impl Into<ItemId>, w: f64, h: f64) -> Self {
        Self {
            i: i.into(),
            w,
            h,
            item_type: None,
            is_draggable: true,
            is_resizable: true,
        }
    }

    pub fn with_type(mut self, item_type: ItemType) -> Self {
        self.item_type = Some(item_type);
        self
    }
}

/// Pixels a free-floating item moves per arrow key press.
pub const NUDGE_STEP: f64 = 3.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Nudge {
    Left,
    Up,
    Right,
    Down,
}

impl Nudge {
    pub fn delta(self) -> (f64, f64) {
        match self {
            Nudge::Left => (-NUDGE_STEP, 0.0),
            Nudge::Up => (0.0, -NUDGE_STEP),
            Nudge::Right => (NUDGE_STEP, 0.0),
            Nudge::Down => (0.0, NUDGE_STEP),
        }
    }
}
