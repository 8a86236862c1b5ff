//! Grid phase: where the background tile boundaries fall on screen.
//!
//! The background is a repeating tile. Rather than tracking an absolute grid
//! position, the view keeps the *phase* of the grid relative to the focal
//! point (the local offset: distance from the focal point to the tile
//! boundary above/left of it). Each zoom step re-derives that phase at the old
//! scale and rescales it into the new one, so the tile under the focal point
//! before the step is the same tile, scaled, after it.

#[cfg(test)]
#[path = "grid_test.rs"]
mod grid_test;

use crate::boundary::Adjustment;
use crate::transform::{Point, Size};

/// Screen rectangle of the reference tile that the tile walk starts from.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Borders {
    pub top: f64,
    pub left: f64,
    pub bottom: f64,
    pub right: f64,
}

impl Borders {
    /// Reference tile whose top-left corner sits `local_offset` above/left of `focal`.
    #[must_use]
    pub fn at_phase(focal: Point, local_offset: Point, tile: Size) -> Self {
        let left = focal.x - local_offset.x;
        let top = focal.y - local_offset.y;
        Self { top, left, bottom: top + tile.height, right: left + tile.width }
    }
}

/// Result of one grid phase step.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GridStep {
    /// New local offset, in new-scale screen units.
    pub local_offset: Point,
    /// Reference tile at the new scale, including the boundary correction.
    pub borders: Borders,
}

/// Inputs to a grid phase step.
#[derive(Debug, Clone, Copy)]
pub struct PhaseInput {
    pub previous_focal: Point,
    pub focal: Point,
    pub local_offset: Point,
    /// Tile size at scale 1.0.
    pub cell: Size,
    pub previous_scale: f64,
    pub scale: f64,
    pub adjustment: Adjustment,
}

/// Compute the new local offset and borders for a zoom step.
///
/// When `focal == previous_focal` and the scale is unchanged the offset is
/// returned as-is, so the very first paint (both focal points at the same
/// spot) does not shift the grid.
#[must_use]
pub fn step(input: PhaseInput) -> GridStep {
    let lx = axis_phase(
        input.previous_focal.x,
        input.focal.x,
        input.local_offset.x,
        input.cell.width,
        input.previous_scale,
        input.scale,
    );
    let ly = axis_phase(
        input.previous_focal.y,
        input.focal.y,
        input.local_offset.y,
        input.cell.height,
        input.previous_scale,
        input.scale,
    );
    let local_offset = Point::new(lx, ly);
    let anchor = input.focal.offset(input.adjustment.x, input.adjustment.y);
    let borders = Borders::at_phase(anchor, local_offset, input.cell.scaled(input.scale));
    GridStep { local_offset, borders }
}

/// Phase along one axis.
///
/// `cw` is the tile extent at the previous scale. The nearest boundary at or
/// before `focal` is found by stepping whole tiles from the previous
/// boundary (`previous_focal - old_offset`); the distance from it is then
/// rescaled into new-scale units.
fn axis_phase(previous_focal: f64, focal: f64, old_offset: f64, cell: f64, previous_scale: f64, scale: f64) -> f64 {
    let cw = cell * previous_scale;
    let previous_boundary = previous_focal - old_offset;
    let dx = focal - previous_boundary;
    let nearest = previous_boundary + (dx / cw).floor() * cw;
    let mut phase = (focal - nearest + cw).rem_euclid(cw);
    if phase >= cw {
        phase = 0.0;
    }
    phase / previous_scale * scale
}
