mod light;
mod palette;
mod tile;

pub use light::{LIGHT_TABLE_SIZE, LightLevel, LightTables, TableError};

pub use palette::{Palette, PaletteTransparency};

pub use tile::{
    DIAMOND_WIDTH, LOWER_HEIGHT, LevelCelBlock, MaskType, TILE_HEIGHT, TILE_WIDTH,
    TRAPEZOID_UPPER_HEIGHT, TRIANGLE_HEIGHT, TRIANGLE_UPPER_HEIGHT, TileType, XSTEP,
};
