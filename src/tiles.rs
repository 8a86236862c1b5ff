//! Tile paging: which background tiles to paint for the current transform.
//!
//! Each repaint clears every tile from the previous frame and draws the full
//! set again. Starting from the reference tile produced by the grid phase,
//! the walk steps left/up from its near edges and right/down from its far
//! edges until one tile past the viewport on every side. That one-tile
//! overscan keeps a small pan from exposing a gap before the next repaint.
//! At the default tile size a 1080p viewport needs well under fifty tiles,
//! so no diffing against the previous frame is attempted.

#[cfg(test)]
#[path = "tiles_test.rs"]
mod tiles_test;

use tracing::debug;

use crate::consts::SEAM_OVERLAP_PX;
use crate::grid::Borders;
use crate::surface::TileSurface;
use crate::transform::Size;

/// One background tile draw, positioned by its top-left corner.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Tile {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Tile {
    #[must_use]
    pub fn right(&self) -> f64 {
        self.x + self.width
    }

    #[must_use]
    pub fn bottom(&self) -> f64 {
        self.y + self.height
    }
}

/// Compute the tiles covering `viewport` plus one tile of overscan.
///
/// The reference tile is first moved by whole tiles so its near edge lies in
/// `[0, tile)`. This keeps the grid phase and bounds the walk even when the
/// focal point has been panned far off screen.
#[must_use]
pub fn plan_tiles(borders: Borders, viewport: Size, tile: Size) -> Vec<Tile> {
    if !tile.has_area() || !viewport.has_area() {
        return Vec::new();
    }
    let columns = walk_axis(fold_into_first_tile(borders.left, tile.width), tile.width, viewport.width);
    let rows = walk_axis(fold_into_first_tile(borders.top, tile.height), tile.height, viewport.height);

    let mut tiles = Vec::with_capacity(columns.len() * rows.len());
    for &x in &columns {
        for &y in &rows {
            tiles.push(Tile { x, y, width: tile.width, height: tile.height });
        }
    }
    tiles
}

/// Clear the surface and paint the tiles for the given transform.
///
/// Returns the number of tiles drawn.
pub fn repaint<S>(surface: &mut S, borders: Borders, viewport: Size, tile: Size) -> usize
where
    S: TileSurface + ?Sized,
{
    surface.clear_tiles();
    let tiles = plan_tiles(borders, viewport, tile);
    let count = tiles.len();
    for t in tiles {
        surface.draw_tile(t);
    }
    debug!(count, tile_w = tile.width, tile_h = tile.height, "tiles repainted");
    count
}

fn fold_into_first_tile(edge: f64, step: f64) -> f64 {
    edge - (edge / step).floor() * step
}

/// Tile origins along one axis: the near walk from `start` back past zero,
/// then the far walk from the next tile (less the seam overlap) out past `extent`.
fn walk_axis(start: f64, step: f64, extent: f64) -> Vec<f64> {
    let mut origins = Vec::new();

    let mut pos = start;
    while pos > -step {
        origins.push(pos);
        pos -= step;
    }

    let mut pos = start + step - SEAM_OVERLAP_PX;
    while pos < extent + step {
        origins.push(pos);
        pos += step;
    }

    origins
}
