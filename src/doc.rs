//! Board items and the item store contract.
//!
//! `BoardItem` is the authoritative record of an item: its kind, its content,
//! and its world position. The store that owns these records lives outside
//! the engine (persistence, sync); the engine reaches it only through the
//! narrow [`ItemStore`] trait: list once on open, add on request, and write a
//! world position back when a drag completes. [`MemoryItemStore`] is the
//! in-process implementation used by headless hosts and tests.

#[cfg(test)]
#[path = "doc_test.rs"]
mod doc_test;

use std::cell::RefCell;
use std::collections::{BTreeSet, HashMap};
use std::rc::Rc;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::consts::{IMAGE_FALLBACK_SIZE, IMAGE_MAX_SIDE, IMAGE_PADDING, NOTE_SIZE, PAGE_SIZE};
use crate::transform::{Point, Size};

/// Unique identifier for a board item.
pub type ItemId = Uuid;

/// Unique identifier for a board.
pub type BoardId = Uuid;

/// What an item is, with the content that kind carries.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum ItemKind {
    /// Coloured sticky note.
    Note { title: String, content: String, colour: String },
    /// Taller white page of text.
    Page { title: String, content: String, colour: String },
    /// Embedded picture. Pixel size is `0 x 0` when unknown.
    Image { title: String, pixel_width: f64, pixel_height: f64 },
}

impl ItemKind {
    /// Size of the item at scale 1.0.
    #[must_use]
    pub fn base_size(&self) -> Size {
        match self {
            Self::Note { .. } => Size::new(NOTE_SIZE.0, NOTE_SIZE.1),
            Self::Page { .. } => Size::new(PAGE_SIZE.0, PAGE_SIZE.1),
            Self::Image { pixel_width, pixel_height, .. } => image_base_size(*pixel_width, *pixel_height),
        }
    }

    /// Lowercase kind name, matching the serialized tag.
    #[must_use]
    pub fn label(&self) -> &'static str {
        match self {
            Self::Note { .. } => "note",
            Self::Page { .. } => "page",
            Self::Image { .. } => "image",
        }
    }
}

/// Embedded images are shrunk to fit `IMAGE_MAX_SIDE` (never enlarged) and
/// padded on each axis.
fn image_base_size(pixel_width: f64, pixel_height: f64) -> Size {
    let pixels = Size::new(pixel_width, pixel_height);
    if !pixels.has_area() {
        return Size::new(IMAGE_FALLBACK_SIZE.0, IMAGE_FALLBACK_SIZE.1);
    }
    let longest = pixel_width.max(pixel_height);
    let shrink = if longest > IMAGE_MAX_SIDE { IMAGE_MAX_SIDE / longest } else { 1.0 };
    let fitted = pixels.scaled(shrink);
    Size::new(fitted.width + IMAGE_PADDING, fitted.height + IMAGE_PADDING)
}

/// A board item as stored and exchanged with the host.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BoardItem {
    pub id: ItemId,
    pub board_id: BoardId,
    #[serde(flatten)]
    pub kind: ItemKind,
    /// Left edge in world coordinates.
    pub x: f64,
    /// Top edge in world coordinates.
    pub y: f64,
    #[serde(default)]
    pub tags: BTreeSet<String>,
}

impl BoardItem {
    /// A new item with a fresh id.
    #[must_use]
    pub fn new(board_id: BoardId, kind: ItemKind, x: f64, y: f64) -> Self {
        Self { id: Uuid::new_v4(), board_id, kind, x, y, tags: BTreeSet::new() }
    }

    #[must_use]
    pub fn world_position(&self) -> Point {
        Point::new(self.x, self.y)
    }

    #[must_use]
    pub fn base_size(&self) -> Size {
        self.kind.base_size()
    }
}

// =============================================================================
// STORE
// =============================================================================

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("item not found: {0}")]
    UnknownItem(ItemId),
    #[error("item store unavailable: {0}")]
    Unavailable(String),
}

/// Owner of the item records for one or more boards.
pub trait ItemStore {
    /// All items on `board_id`.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Unavailable`] if the store cannot be read.
    fn list_items(&self, board_id: BoardId) -> Result<Vec<BoardItem>, StoreError>;

    /// Record a new world position for an item.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::UnknownItem`] if no such item exists.
    fn update_item_position(&mut self, item_id: ItemId, world_x: f64, world_y: f64) -> Result<(), StoreError>;

    /// Insert a new item and return its id.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Unavailable`] if the store cannot be written.
    fn add_item(&mut self, item: BoardItem) -> Result<ItemId, StoreError>;
}

/// Shared handle, so the host can keep reading the store the engine writes to.
impl<T: ItemStore + ?Sized> ItemStore for Rc<RefCell<T>> {
    fn list_items(&self, board_id: BoardId) -> Result<Vec<BoardItem>, StoreError> {
        let store = self
            .try_borrow()
            .map_err(|_| StoreError::Unavailable("store is mutably borrowed".into()))?;
        store.list_items(board_id)
    }

    fn update_item_position(&mut self, item_id: ItemId, world_x: f64, world_y: f64) -> Result<(), StoreError> {
        let mut store = self
            .try_borrow_mut()
            .map_err(|_| StoreError::Unavailable("store is borrowed".into()))?;
        store.update_item_position(item_id, world_x, world_y)
    }

    fn add_item(&mut self, item: BoardItem) -> Result<ItemId, StoreError> {
        let mut store = self
            .try_borrow_mut()
            .map_err(|_| StoreError::Unavailable("store is borrowed".into()))?;
        store.add_item(item)
    }
}

/// In-memory item store.
#[derive(Debug, Clone, Default)]
pub struct MemoryItemStore {
    items: HashMap<ItemId, BoardItem>,
}

impl MemoryItemStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// A store pre-populated with `items`.
    #[must_use]
    pub fn with_items(items: impl IntoIterator<Item = BoardItem>) -> Self {
        Self { items: items.into_iter().map(|item| (item.id, item)).collect() }
    }

    #[must_use]
    pub fn get(&self, id: &ItemId) -> Option<&BoardItem> {
        self.items.get(id)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

impl ItemStore for MemoryItemStore {
    fn list_items(&self, board_id: BoardId) -> Result<Vec<BoardItem>, StoreError> {
        let mut items: Vec<BoardItem> = self
            .items
            .values()
            .filter(|item| item.board_id == board_id)
            .cloned()
            .collect();
        items.sort_by(|a, b| a.id.cmp(&b.id));
        Ok(items)
    }

    fn update_item_position(&mut self, item_id: ItemId, world_x: f64, world_y: f64) -> Result<(), StoreError> {
        let item = self
            .items
            .get_mut(&item_id)
            .ok_or(StoreError::UnknownItem(item_id))?;
        item.x = world_x;
        item.y = world_y;
        Ok(())
    }

    fn add_item(&mut self, item: BoardItem) -> Result<ItemId, StoreError> {
        let id = item.id;
        self.items.insert(id, item);
        Ok(id)
    }
}
