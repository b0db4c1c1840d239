//! Isometric dungeon tile rasterizer.
//!
//! * [`world`]    – tile shapes, masks, light and transparency tables.
//! * [`archive`]  – frame storage, encoders and frame validation.
//! * [`renderer`] – clip math, line compositor and the shape rasterizers.

pub mod archive;
pub mod renderer;
pub mod world;
