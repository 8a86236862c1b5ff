//! Item projection: where each board item appears on screen.
//!
//! Items keep their world position as the only truth. A zoom step rescales
//! every item about the focal point: the item's center moves to
//! `F + (center - F) * new/old`, its size becomes `base * new`, and the
//! boundary correction is added on top. Because all items share the same
//! affine map, that per-item rule is applied once, to the screen position of
//! world `(0, 0)` ([`zoom_origin`]), and every projection is then re-derived
//! from `world * scale + origin`. Nothing accumulates per item, so repeated
//! zooms cannot drift an item away from its world position.

#[cfg(test)]
#[path = "projector_test.rs"]
mod projector_test;

use std::collections::HashMap;

use crate::boundary::Adjustment;
use crate::consts::{IMAGE_PADDING, TEXT_BASE_PX, TEXT_MIN_PX, TITLE_EXTRA_PX};
use crate::doc::{BoardItem, ItemId, ItemKind};
use crate::error::ViewportError;
use crate::transform::{Point, Size, ViewportTransform, rescale_about};

/// Kind-specific sizing of an item's content at the current scale.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ContentScale {
    /// Font sizes for notes and pages.
    Text { title_px: f64, body_px: f64 },
    /// Size of the picture inside an image item's frame.
    Image { width: f64, height: f64 },
}

/// An item's derived screen geometry. Never persisted.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ItemProjection {
    pub id: ItemId,
    /// Top-left corner in screen coordinates.
    pub screen_position: Point,
    pub scaled_size: Size,
    pub scale: f64,
    pub content: ContentScale,
}

impl ItemProjection {
    /// Whether `point` lies inside the projected rectangle (edges inclusive).
    #[must_use]
    pub fn contains(&self, point: Point) -> bool {
        point.x >= self.screen_position.x
            && point.x <= self.screen_position.x + self.scaled_size.width
            && point.y >= self.screen_position.y
            && point.y <= self.screen_position.y + self.scaled_size.height
    }
}

/// Project one item through `transform`.
#[must_use]
pub fn project(item: &BoardItem, transform: &ViewportTransform) -> ItemProjection {
    let scale = transform.scale;
    let base = item.base_size();
    let content = match &item.kind {
        ItemKind::Note { .. } | ItemKind::Page { .. } => text_scale(scale),
        ItemKind::Image { .. } => image_scale(base, scale),
    };
    ItemProjection {
        id: item.id,
        screen_position: transform.world_to_screen(item.world_position()),
        scaled_size: base.scaled(scale),
        scale,
        content,
    }
}

fn text_scale(scale: f64) -> ContentScale {
    let body_px = (TEXT_BASE_PX * scale).floor() + TEXT_MIN_PX;
    ContentScale::Text { title_px: body_px + TITLE_EXTRA_PX, body_px }
}

fn image_scale(base: Size, scale: f64) -> ContentScale {
    ContentScale::Image {
        width: (base.width - IMAGE_PADDING).max(0.0) * scale,
        height: (base.height - IMAGE_PADDING).max(0.0) * scale,
    }
}

/// New screen position of world `(0, 0)` after zooming about `focal` from
/// `from_scale` to `to_scale` and applying the boundary correction.
#[must_use]
pub fn zoom_origin(origin: Point, focal: Point, from_scale: f64, to_scale: f64, adj: Adjustment) -> Point {
    Point::new(
        rescale_about(origin.x, focal.x, from_scale, to_scale) + adj.x,
        rescale_about(origin.y, focal.y, from_scale, to_scale) + adj.y,
    )
}

/// The engine's working copy of the board's items and their projections.
#[derive(Debug, Clone, Default)]
pub struct Projector {
    items: HashMap<ItemId, BoardItem>,
    projections: HashMap<ItemId, ItemProjection>,
}

impl Projector {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the working set with `items` and project them all.
    pub fn load(&mut self, items: Vec<BoardItem>, transform: &ViewportTransform) {
        self.items.clear();
        self.projections.clear();
        for item in items {
            self.insert(item, transform);
        }
    }

    /// Add or replace one item and return its projection.
    pub fn insert(&mut self, item: BoardItem, transform: &ViewportTransform) -> ItemProjection {
        let projection = project(&item, transform);
        self.projections.insert(item.id, projection);
        self.items.insert(item.id, item);
        projection
    }

    /// Drop an item. Returns `false` if it was not present.
    pub fn remove(&mut self, id: &ItemId) -> bool {
        self.projections.remove(id);
        self.items.remove(id).is_some()
    }

    /// Re-derive every projection after a transform change.
    pub fn reproject_all(&mut self, transform: &ViewportTransform) {
        for (id, item) in &self.items {
            self.projections.insert(*id, project(item, transform));
        }
    }

    /// Move an item by a screen-space delta, updating its world position.
    ///
    /// # Errors
    ///
    /// Returns [`ViewportError::InvalidItemReference`] if the item is not loaded.
    pub fn translate(
        &mut self,
        id: &ItemId,
        screen_dx: f64,
        screen_dy: f64,
        transform: &ViewportTransform,
    ) -> Result<ItemProjection, ViewportError> {
        let item = self
            .items
            .get_mut(id)
            .ok_or(ViewportError::InvalidItemReference(*id))?;
        item.x += screen_dx / transform.scale;
        item.y += screen_dy / transform.scale;
        let projection = project(item, transform);
        self.projections.insert(*id, projection);
        Ok(projection)
    }

    /// Put an item back at a known world position.
    ///
    /// # Errors
    ///
    /// Returns [`ViewportError::InvalidItemReference`] if the item is not loaded.
    pub fn place(&mut self, id: &ItemId, world: Point, transform: &ViewportTransform) -> Result<ItemProjection, ViewportError> {
        let item = self
            .items
            .get_mut(id)
            .ok_or(ViewportError::InvalidItemReference(*id))?;
        item.x = world.x;
        item.y = world.y;
        let projection = project(item, transform);
        self.projections.insert(*id, projection);
        Ok(projection)
    }

    #[must_use]
    pub fn projection(&self, id: &ItemId) -> Option<&ItemProjection> {
        self.projections.get(id)
    }

    #[must_use]
    pub fn item(&self, id: &ItemId) -> Option<&BoardItem> {
        self.items.get(id)
    }

    /// All projections, in no particular order.
    pub fn projections(&self) -> impl Iterator<Item = &ItemProjection> {
        self.projections.values()
    }

    /// Drop every item and projection.
    pub fn clear(&mut self) {
        self.items.clear();
        self.projections.clear();
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
