#![allow(clippy::float_cmp)]

use super::*;

// --- TileImage::fit ---

#[test]
fn fit_landscape_pins_width() {
    let size = TileImage::new(1600.0, 1200.0).fit("bg.png", 800.0).unwrap();
    assert_eq!(size, Size::new(800.0, 600.0));
}

#[test]
fn fit_portrait_pins_height() {
    let size = TileImage::new(500.0, 1000.0).fit("bg.png", 800.0).unwrap();
    assert_eq!(size, Size::new(400.0, 800.0));
}

#[test]
fn fit_square_uses_max_side_on_both_axes() {
    let size = TileImage::new(64.0, 64.0).fit("bg.png", 800.0).unwrap();
    assert_eq!(size, Size::new(800.0, 800.0));
}

#[test]
fn fit_zero_sized_image_is_asset_failure() {
    let err = TileImage::new(0.0, 600.0).fit("bg.png", 800.0).unwrap_err();
    assert!(matches!(err, ViewportError::AssetLoadFailure { ref path, .. } if path == "bg.png"));
}

// --- HeadlessSurface ---

#[test]
fn headless_reports_viewport() {
    let mut surface = HeadlessSurface::new(Size::new(1280.0, 720.0), None);
    assert_eq!(surface.viewport_size(), Size::new(1280.0, 720.0));
    surface.set_viewport(Size::new(640.0, 480.0));
    assert_eq!(surface.viewport_size(), Size::new(640.0, 480.0));
}

#[test]
fn headless_missing_asset_fails_to_load() {
    let mut surface = HeadlessSurface::new(Size::new(10.0, 10.0), None);
    let err = surface.load_tile_image("missing.png").unwrap_err();
    assert_eq!(err.error_code(), "E_ASSET_LOAD");
}

#[test]
fn headless_loads_configured_image() {
    let mut surface = HeadlessSurface::new(Size::new(10.0, 10.0), Some(TileImage::new(800.0, 600.0)));
    assert_eq!(surface.load_tile_image("bg.png").unwrap(), TileImage::new(800.0, 600.0));
}

#[test]
fn headless_records_and_clears_tiles() {
    let mut surface = HeadlessSurface::default();
    surface.draw_tile(Tile { x: 0.0, y: 0.0, width: 10.0, height: 10.0 });
    surface.draw_tile(Tile { x: 10.0, y: 0.0, width: 10.0, height: 10.0 });
    assert_eq!(surface.tiles().len(), 2);
    surface.clear_tiles();
    assert!(surface.tiles().is_empty());
    assert_eq!(surface.clear_count(), 1);
}

#[test]
fn headless_counts_bitmap_regeneration() {
    let mut surface = HeadlessSurface::default();
    surface.set_tile_size(Size::new(880.0, 660.0));
    surface.set_tile_size(Size::new(960.0, 720.0));
    assert_eq!(surface.bitmap_generation(), 2);
    assert_eq!(surface.tile_size(), Size::new(960.0, 720.0));
}
