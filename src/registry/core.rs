use std::collections::{HashMap, HashSet};

use blake3::Hash;

use crate::error::{LayoutError, Result};
use crate::geometry::{Point, Pos};
use crate::item::{Item, ItemId, ItemType};

/// What the registry knows about one item: where it is rendered, in canvas
/// pixels, and how it may be interacted with.
#[derive(Debug, Clone, PartialEq)]
pub struct ItemDescriptor {
    pub id: ItemId,
    pub layout_id: String,
    pub is_ready: bool,
    pub rect: Pos,
    pub item_type: ItemType,
    pub has_inner_layout: bool,
    pub is_draggable: bool,
    pub is_resizable: bool,
}

impl ItemDescriptor {
    pub fn new(item: &Item, rect: Pos) -> Self {
        Self {
            id: item.i.clone(),
            layout_id: item.layout_id.clone(),
            is_ready: true,
            rect,
            item_type: item.item_type,
            has_inner_layout: item.is_nested,
            is_draggable: item.is_draggable,
            is_resizable: item.is_resizable,
        }
    }

    fn fingerprint(&self) -> Hash {
        let mut hasher = blake3::Hasher::new();
        hasher.update(self.id.as_bytes());
        hasher.update(&[0]);
        hasher.update(self.layout_id.as_bytes());
        hasher.update(&[0]);
        for value in [self.rect.x, self.rect.y, self.rect.w, self.rect.h] {
            hasher.update(&value.to_le_bytes());
        }
        hasher.update(&[
            self.is_ready as u8,
            matches!(self.item_type, ItemType::Grid) as u8,
            self.has_inner_layout as u8,
            self.is_draggable as u8,
            self.is_resizable as u8,
        ]);
        hasher.finalize()
    }
}

#[derive(Debug, Clone)]
struct Entry {
    descriptor: ItemDescriptor,
    hash: Hash,
}

impl Entry {
    fn new(descriptor: ItemDescriptor) -> Self {
        let hash = descriptor.fingerprint();
        Self { descriptor, hash }
    }

    /// Swap in `descriptor`, reporting whether anything observable changed.
    fn replace(&mut self, descriptor: ItemDescriptor) -> (ItemDescriptor, bool) {
        let hash = descriptor.fingerprint();
        let changed = hash != self.hash;
        self.hash = hash;
        let previous = std::mem::replace(&mut self.descriptor, descriptor);
        (previous, changed)
    }
}

/// Items are unique only within their own layout, so entries are addressed by
/// the owning layout and the item id together.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
struct ItemKey {
    layout_id: String,
    id: ItemId,
}

impl ItemKey {
    fn new(layout_id: &str, id: &str) -> Self {
        Self {
            layout_id: layout_id.to_string(),
            id: id.to_string(),
        }
    }

    fn of(descriptor: &ItemDescriptor) -> Self {
        Self::new(&descriptor.layout_id, &descriptor.id)
    }
}

/// Explicit map from `(layout, item)` to descriptor, shared by every layout on
/// a page.
///
/// Layouts register their items here instead of discovering siblings through
/// the render tree; nested layouts are found by asking which descriptors host
/// an inner layout.
#[derive(Debug, Default)]
pub struct LayoutRegistry {
    entries: HashMap<ItemKey, Entry>,
    order: Vec<ItemKey>,
    dirty: HashSet<ItemKey>,
}

impl LayoutRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Fails when the descriptor's layout already holds an item with that id.
    pub fn register(&mut self, descriptor: ItemDescriptor) -> Result<()> {
        let key = ItemKey::of(&descriptor);
        if self.entries.contains_key(&key) {
            return Err(LayoutError::DuplicateItem(descriptor.id));
        }
        self.insert(key, descriptor);
        Ok(())
    }

    /// Replace a registered descriptor, returning the previous one. Unknown
    /// items are left unregistered and yield `None`.
    pub fn update(&mut self, descriptor: ItemDescriptor) -> Option<ItemDescriptor> {
        let key = ItemKey::of(&descriptor);
        let entry = self.entries.get_mut(&key)?;
        let (previous, changed) = entry.replace(descriptor);
        if changed {
            self.dirty.insert(key);
        }
        Some(previous)
    }

    pub fn unregister(&mut self, layout_id: &str, id: &str) -> Option<ItemDescriptor> {
        let key = ItemKey::new(layout_id, id);
        let entry = self.entries.remove(&key)?;
        self.order.retain(|existing| *existing != key);
        self.dirty.remove(&key);
        Some(entry.descriptor)
    }

    pub fn set_ready(&mut self, layout_id: &str, id: &str, is_ready: bool) -> Result<()> {
        let entry = self
            .entries
            .get(&ItemKey::new(layout_id, id))
            .ok_or_else(|| LayoutError::ItemNotFound(id.to_string()))?;
        let descriptor = ItemDescriptor {
            is_ready,
            ..entry.descriptor.clone()
        };
        self.update(descriptor);
        Ok(())
    }

    pub fn get(&self, layout_id: &str, id: &str) -> Option<&ItemDescriptor> {
        self.entries
            .get(&ItemKey::new(layout_id, id))
            .map(|entry| &entry.descriptor)
    }

    /// Descriptors owned by `layout_id`, in registration order.
    pub fn items_in(&self, layout_id: &str) -> Vec<&ItemDescriptor> {
        self.ordered()
            .filter(|descriptor| descriptor.layout_id == layout_id)
            .collect()
    }

    /// Descriptors whose item hosts a child layout.
    pub fn nested_layouts(&self) -> Vec<&ItemDescriptor> {
        self.ordered()
            .filter(|descriptor| descriptor.has_inner_layout)
            .collect()
    }

    /// Topmost ready item of `layout_id` under `point`. Free-floating items sit
    /// above grid items; within a kind the most recently registered wins.
    pub fn hit_test(&self, layout_id: &str, point: Point) -> Option<&ItemDescriptor> {
        let hits: Vec<&ItemDescriptor> = self
            .ordered()
            .filter(|d| d.layout_id == layout_id && d.is_ready && d.rect.contains(point))
            .collect();
        hits.iter()
            .rev()
            .find(|d| d.item_type == ItemType::Drag)
            .or_else(|| hits.last())
            .copied()
    }

    /// Bring the descriptors of `layout_id` in line with `descriptors`:
    /// new ones are registered, changed ones updated and missing ones dropped.
    /// Other layouts are left alone, even where they reuse the same ids.
    pub fn sync_layout(&mut self, layout_id: &str, descriptors: Vec<ItemDescriptor>) {
        let keep: HashSet<ItemKey> = descriptors.iter().map(ItemKey::of).collect();
        let stale: Vec<ItemKey> = self
            .order
            .iter()
            .filter(|key| key.layout_id == layout_id && !keep.contains(*key))
            .cloned()
            .collect();
        for key in stale {
            self.unregister(&key.layout_id, &key.id);
        }

        for descriptor in descriptors {
            let key = ItemKey::of(&descriptor);
            if self.entries.contains_key(&key) {
                self.update(descriptor);
            } else {
                self.insert(key, descriptor);
            }
        }
    }

    /// Drain descriptors registered or changed since the last call.
    pub fn take_dirty(&mut self) -> Vec<ItemDescriptor> {
        let dirty = std::mem::take(&mut self.dirty);
        self.order
            .iter()
            .filter(|key| dirty.contains(*key))
            .filter_map(|key| self.entries.get(key))
            .map(|entry| entry.descriptor.clone())
            .collect()
    }

    pub fn has_dirty(&self) -> bool {
        !self.dirty.is_empty()
    }

    fn insert(&mut self, key: ItemKey, descriptor: ItemDescriptor) {
        self.entries.insert(key.clone(), Entry::new(descriptor));
        self.order.push(key.clone());
        self.dirty.insert(key);
    }

    fn ordered(&self) -> impl Iterator<Item = &ItemDescriptor> {
        self.order
            .iter()
            .filter_map(|key| self.entries.get(key))
            .map(|entry| &entry.descriptor)
    }
}
