//! Per-shape row walkers.
//!
//! Each shape exposes `render::<L, M>(raster, regime, clip)` with one loop
//! family per [`ClipRegime`](super::clip::ClipRegime). The raster's
//! destination cursor starts on the bottom-left *visible* pixel; its
//! source cursor on the first byte of the frame.

pub mod left_triangle;
pub mod right_triangle;
pub mod square;
pub mod transparent_square;
pub mod trapezoid;
