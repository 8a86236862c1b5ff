//! Viewport engine for the infinite pinboard.
//!
//! This crate owns the pan/zoom transform of a board view: it keeps a tiled
//! background aligned to a stable world grid, bounds how far the board can be
//! dragged, and re-projects every board item from its authoritative world
//! position into screen space whenever the transform changes. It compiles to
//! WebAssembly for the browser host and to native code for headless use and
//! tests. The host wires DOM events to the `handle_*` entry points of
//! [`engine::ViewportController`] and positions item overlays from the
//! projections it exposes.
//!
//! ## Module layout
//!
//! | Module | Role |
//! |--------|------|
//! | [`engine`] | Viewport controller: lifecycle, zoom, pan, drag, queries |
//! | [`transform`] | Transform state and screen/world conversions |
//! | [`boundary`] | Anchor lines that keep the board backed by background |
//! | [`grid`] | Tile-grid phase and border computation |
//! | [`tiles`] | Tile paging: which background tiles to draw each frame |
//! | [`projector`] | Item projection into screen space |
//! | [`surface`] | Drawing surface abstraction and tile image fitting |
//! | [`doc`] | Board item model and the item store contract |
//! | [`input`] | Gesture state machine and pan debounce |
//! | [`config`] | Typed viewport configuration |
//! | [`error`] | Error taxonomy |
//! | [`web`] | `web_sys` canvas surface for the browser host |
//! | [`consts`] | Shared numeric defaults |

pub mod boundary;
pub mod config;
pub mod consts;
pub mod doc;
pub mod engine;
pub mod error;
pub mod grid;
pub mod input;
pub mod projector;
pub mod surface;
pub mod tiles;
pub mod transform;
pub mod web;
