#![allow(clippy::float_cmp)]

use super::*;
use crate::boundary::Adjustment;
use crate::grid::{self, PhaseInput};
use crate::surface::HeadlessSurface;
use crate::transform::Point;

const CELL: Size = Size { width: 800.0, height: 600.0 };

fn borders_for(focal: Point, offset: Point, scale: f64) -> Borders {
    Borders::at_phase(focal, offset, CELL.scaled(scale))
}

/// Every integer pixel column in `[0, extent]` lies inside at least one span.
fn spans_cover(spans: &[(f64, f64)], extent: f64) -> bool {
    let mut px = 0.0;
    while px <= extent {
        if !spans.iter().any(|&(a, b)| a <= px && px <= b) {
            return false;
        }
        px += 1.0;
    }
    true
}

fn covers_viewport(tiles: &[Tile], viewport: Size) -> bool {
    let xs: Vec<(f64, f64)> = tiles.iter().map(|t| (t.x, t.right())).collect();
    let ys: Vec<(f64, f64)> = tiles.iter().map(|t| (t.y, t.bottom())).collect();
    if !spans_cover(&xs, viewport.width) || !spans_cover(&ys, viewport.height) {
        return false;
    }
    // Spot-check the 2D union on a coarse lattice including the corners.
    let mut y = 0.0;
    while y <= viewport.height {
        let mut x = 0.0;
        while x <= viewport.width {
            if !tiles.iter().any(|t| t.x <= x && x <= t.right() && t.y <= y && y <= t.bottom()) {
                return false;
            }
            x += 40.0;
        }
        y += 40.0;
    }
    true
}

// --- coverage ---

#[test]
fn tiles_cover_viewport_across_zoom_range() {
    let viewport = Size::new(1280.0, 720.0);
    let focal = Point::new(640.0, 360.0);
    let mut offset = Point::new(0.0, 0.0);
    let mut previous_scale = 1.0;
    for step in 5..=17 {
        let scale = f64::from(step) / 10.0;
        let out = grid::step(PhaseInput {
            previous_focal: focal,
            focal,
            local_offset: offset,
            cell: CELL,
            previous_scale,
            scale,
            adjustment: Adjustment::default(),
        });
        let tiles = plan_tiles(out.borders, viewport, CELL.scaled(scale));
        assert!(covers_viewport(&tiles, viewport), "gap at scale {scale}");
        offset = out.local_offset;
        previous_scale = scale;
    }
}

#[test]
fn tiles_cover_viewport_for_arbitrary_phase() {
    let viewport = Size::new(1280.0, 720.0);
    for (lx, ly) in [(0.0, 0.0), (1.0, 599.0), (400.0, 300.0), (799.5, 12.25)] {
        let borders = borders_for(Point::new(640.0, 360.0), Point::new(lx, ly), 1.0);
        let tiles = plan_tiles(borders, viewport, CELL);
        assert!(covers_viewport(&tiles, viewport), "gap at phase ({lx}, {ly})");
    }
}

#[test]
fn far_off_focal_still_covers_with_bounded_count() {
    let viewport = Size::new(1280.0, 720.0);
    let borders = borders_for(Point::new(-25_000.0, 40_000.0), Point::new(120.0, 80.0), 0.5);
    let tiles = plan_tiles(borders, viewport, CELL.scaled(0.5));
    assert!(covers_viewport(&tiles, viewport));
    assert!(tiles.len() <= 8 * 6, "walked {} tiles", tiles.len());
}

// --- overscan ---

#[test]
fn overscan_is_at_most_one_tile_each_side() {
    let viewport = Size::new(1280.0, 720.0);
    let tile = CELL.scaled(0.7);
    let tiles = plan_tiles(borders_for(Point::new(300.0, 200.0), Point::new(50.0, 70.0), 0.7), viewport, tile);
    for t in &tiles {
        assert!(t.x > -tile.width * 2.0 && t.x < viewport.width + tile.width);
        assert!(t.y > -tile.height * 2.0 && t.y < viewport.height + tile.height);
    }
    let min_x = tiles.iter().map(|t| t.x).fold(f64::INFINITY, f64::min);
    let max_right = tiles.iter().map(Tile::right).fold(f64::NEG_INFINITY, f64::max);
    assert!(min_x > -tile.width);
    assert!(max_right >= viewport.width + tile.width - SEAM_OVERLAP_PX);
}

#[test]
fn default_viewport_needs_under_forty_tiles_at_unit_scale() {
    let tiles = plan_tiles(borders_for(Point::new(500.0, 400.0), Point::new(0.0, 0.0), 1.0), Size::new(1000.0, 800.0), CELL);
    assert!(!tiles.is_empty());
    assert!(tiles.len() < 40);
}

#[test]
fn far_walk_overlaps_reference_tile_by_seam() {
    let borders = borders_for(Point::new(100.0, 100.0), Point::new(100.0, 100.0), 1.0);
    let tiles = plan_tiles(borders, Size::new(1000.0, 800.0), CELL);
    assert!(tiles.iter().any(|t| t.x == 0.0));
    assert!(tiles.iter().any(|t| t.x == 800.0 - SEAM_OVERLAP_PX));
    assert!(tiles.iter().any(|t| t.y == 600.0 - SEAM_OVERLAP_PX));
}

#[test]
fn tiles_form_a_full_grid() {
    let tiles = plan_tiles(borders_for(Point::new(10.0, 10.0), Point::new(5.0, 5.0), 1.0), Size::new(1000.0, 800.0), CELL);
    let mut xs: Vec<f64> = tiles.iter().map(|t| t.x).collect();
    let mut ys: Vec<f64> = tiles.iter().map(|t| t.y).collect();
    xs.sort_by(f64::total_cmp);
    xs.dedup();
    ys.sort_by(f64::total_cmp);
    ys.dedup();
    assert_eq!(tiles.len(), xs.len() * ys.len());
}

// --- degenerate input ---

#[test]
fn empty_viewport_plans_nothing() {
    let borders = borders_for(Point::new(0.0, 0.0), Point::new(0.0, 0.0), 1.0);
    assert!(plan_tiles(borders, Size::new(0.0, 720.0), CELL).is_empty());
}

#[test]
fn zero_tile_plans_nothing() {
    let borders = borders_for(Point::new(0.0, 0.0), Point::new(0.0, 0.0), 1.0);
    assert!(plan_tiles(borders, Size::new(1280.0, 720.0), Size::new(0.0, 600.0)).is_empty());
}

// --- repaint ---

#[test]
fn repaint_clears_before_drawing() {
    let mut surface = HeadlessSurface::new(Size::new(1000.0, 800.0), None);
    let borders = borders_for(Point::new(0.0, 0.0), Point::new(0.0, 0.0), 1.0);
    let first = repaint(&mut surface, borders, Size::new(1000.0, 800.0), CELL);
    let second = repaint(&mut surface, borders, Size::new(1000.0, 800.0), CELL);
    assert_eq!(first, second);
    assert_eq!(surface.tiles().len(), second);
    assert_eq!(surface.clear_count(), 2);
}

#[test]
fn tile_edges() {
    let t = Tile { x: 10.0, y: 20.0, width: 30.0, height: 40.0 };
    assert_eq!(t.right(), 40.0);
    assert_eq!(t.bottom(), 60.0);
}
