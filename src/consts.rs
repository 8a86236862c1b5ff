//! Shared numeric constants for the pinboard crate.

// ── Zoom ────────────────────────────────────────────────────────

/// Smallest zoom factor a board can be viewed at.
pub const MIN_SCALE: f64 = 0.5;

/// Largest zoom factor a board can be viewed at.
pub const MAX_SCALE: f64 = 1.7;

/// Scale change applied per wheel notch.
pub const SCALE_STEP: f64 = 0.1;

/// Raw wheel delta reported for one notch of a mouse wheel.
pub const WHEEL_NOTCH: f64 = 120.0;

/// Zoom factors are quantized to this many steps per unit (two decimals).
pub const SCALE_QUANTUM: f64 = 100.0;

// ── Background tiles ────────────────────────────────────────────

/// Longer side of one background tile at scale 1.0, in screen pixels.
pub const TILE_WIDTH: f64 = 800.0;

/// Overlap between neighbouring tile rows/columns, in screen pixels.
pub const SEAM_OVERLAP_PX: f64 = 1.0;

/// Default asset path of the background texture.
pub const TILE_ASSET_PATH: &str = "assets/images/pinboard_background.png";

// ── Panning ─────────────────────────────────────────────────────

/// Minimum time between committed pan steps, in milliseconds.
pub const PAN_INTERVAL_MS: f64 = 16.0;

/// Slack kept between the top/left anchors and the viewport edge at open time.
pub const ANCHOR_MARGIN: f64 = 100.0;

// ── Items ───────────────────────────────────────────────────────

/// Base size of a note.
pub const NOTE_SIZE: (f64, f64) = (280.0, 280.0);

/// Base size of a page.
pub const PAGE_SIZE: (f64, f64) = (280.0, 400.0);

/// Base size of an image item whose pixel size is unknown.
pub const IMAGE_FALLBACK_SIZE: (f64, f64) = (400.0, 300.0);

/// Longest side an embedded image is shown at, before zoom.
pub const IMAGE_MAX_SIDE: f64 = 800.0;

/// Padding added around an embedded image on each axis.
pub const IMAGE_PADDING: f64 = 20.0;

/// Body font size at scale 1.0 is `TEXT_BASE_PX * scale + TEXT_MIN_PX`.
pub const TEXT_BASE_PX: f64 = 10.0;

/// Smallest body font size, in pixels.
pub const TEXT_MIN_PX: f64 = 2.0;

/// Titles render this many pixels larger than body text.
pub const TITLE_EXTRA_PX: f64 = 3.0;
