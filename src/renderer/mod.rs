//! Dungeon tile rasterizer.
//!
//! *Callers never touch frame bytes directly.* They hand a tile shape, its
//! frame, a [`MaskType`](crate::world::MaskType) and a
//! [`LightLevel`](crate::world::LightLevel) to [`render_tile_frame`] (or go
//! through [`TileRenderer`] with a level block and light index).
//!
//! Layers, leaf first:
//! * [`line`]   – span compositor, generic over the lighting regime.
//! * [`mask`]   – opaque/blended/skipped split per row.
//! * [`clip`]   – footprint vs. surface, clip regime, row-skip formulas.
//! * `shapes`   – six row walkers × four clip regimes.
//! * [`dun`]    – dispatch and the public entry points.
//!
//! [`render_single_color_tile`] draws the flat highlight diamond.

pub mod clip;
pub mod dun;
pub mod line;
pub mod mask;
mod raster;
mod shapes;
pub mod single_color;
pub mod stats;
mod surface;

pub use clip::{Clip, ClipRegime, DiamondClipY};
pub use dun::{RenderError, TileRenderer, render_tile_frame};
pub use line::{render_blended_span, render_opaque_span, render_split_span};
pub use single_color::render_single_color_tile;
pub use surface::{Surface, SurfaceError};
