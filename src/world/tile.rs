//! Tile shapes, mask selectors and the packed level cel block.
//!
//! Everything here is plain data: the renderer decides *how* to draw, these
//! types only say *what* is drawn.

use std::fmt;

/*──────────────────────────── Footprint ───────────────────────────*/

pub const TILE_WIDTH: i32 = 32;
pub const TILE_HEIGHT: i32 = 32;
/// Rows of the widening lower half of triangles and trapezoids.
pub const LOWER_HEIGHT: i32 = 16;
pub const TRIANGLE_UPPER_HEIGHT: i32 = 15;
pub const TRAPEZOID_UPPER_HEIGHT: i32 = 16;
pub const TRIANGLE_HEIGHT: i32 = LOWER_HEIGHT + TRIANGLE_UPPER_HEIGHT;
/// Width change per triangle row.
pub const XSTEP: i32 = 2;
/// Width of the flat-fill highlight diamond.
pub const DIAMOND_WIDTH: i32 = 64;

/// Geometric footprint of one dungeon tile frame.
///
/// The discriminants are the 3-bit type codes stored in a [`LevelCelBlock`].
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[repr(u8)]
pub enum TileType {
    Square = 0,
    TransparentSquare = 1,
    LeftTriangle = 2,
    RightTriangle = 3,
    LeftTrapezoid = 4,
    RightTrapezoid = 5,
}

impl TileType {
    pub const ALL: [TileType; 6] = [
        TileType::Square,
        TileType::TransparentSquare,
        TileType::LeftTriangle,
        TileType::RightTriangle,
        TileType::LeftTrapezoid,
        TileType::RightTrapezoid,
    ];

    /// Decode the 3-bit type code of a level cel block.
    pub fn from_code(code: u8) -> Option<Self> {
        Self::ALL.get(code as usize).copied()
    }

    /// Screen width in pixels. Every shape is 32 wide.
    pub const fn width(self) -> i32 {
        32
    }

    /// Screen height in pixels: 31 for triangles, 32 otherwise.
    pub const fn height(self) -> i32 {
        match self {
            TileType::LeftTriangle | TileType::RightTriangle => 31,
            _ => 32,
        }
    }

    /// Byte length of a frame with a fixed layout. `None` for the RLE shape.
    pub const fn frame_len(self) -> Option<usize> {
        match self {
            TileType::Square => Some(32 * 32),
            TileType::TransparentSquare => None,
            // 16 widening rows (2..=32 px, 8 padded) + 15 narrowing rows.
            TileType::LeftTriangle | TileType::RightTriangle => Some(288 + 256),
            // Triangle lower half + 16 full rows.
            TileType::LeftTrapezoid | TileType::RightTrapezoid => Some(288 + 16 * 32),
        }
    }

    /// Does the shape draw tile-local column `x`, row `y` (0 = bottom row)?
    /// Transparent pixels of an RLE frame still count as covered.
    pub const fn covers(self, x: i32, y: i32) -> bool {
        if x < 0 || x >= TILE_WIDTH || y < 0 || y >= self.height() {
            return false;
        }
        let lower = y < LOWER_HEIGHT;
        match self {
            TileType::Square | TileType::TransparentSquare => true,
            TileType::LeftTriangle if lower => x >= TILE_WIDTH - XSTEP * (y + 1),
            TileType::LeftTriangle => x >= XSTEP * (y - LOWER_HEIGHT + 1),
            TileType::RightTriangle if lower => x < XSTEP * (y + 1),
            TileType::RightTriangle => x < TILE_WIDTH - XSTEP * (y - LOWER_HEIGHT + 1),
            TileType::LeftTrapezoid if lower => x >= TILE_WIDTH - XSTEP * (y + 1),
            TileType::RightTrapezoid if lower => x < XSTEP * (y + 1),
            TileType::LeftTrapezoid | TileType::RightTrapezoid => true,
        }
    }

    /// Mask selectors this shape can be drawn with.
    pub const fn supports_mask(self, mask: MaskType) -> bool {
        use MaskType as M;
        match self {
            TileType::TransparentSquare => true,
            TileType::Square | TileType::LeftTriangle | TileType::RightTriangle => {
                matches!(mask, M::Solid | M::Transparent)
            }
            TileType::LeftTrapezoid => matches!(mask, M::Solid | M::Transparent | M::Left),
            TileType::RightTrapezoid => matches!(mask, M::Solid | M::Transparent | M::Right),
        }
    }
}

impl fmt::Display for TileType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self, f)
    }
}

/// Which pixels of a tile are drawn opaque, blended or skipped.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum MaskType {
    /// The shape's own opacity.
    Solid,
    /// Every pixel blended through the transparency table.
    Transparent,
    /// Diagonal split: blended on the upper right, opaque elsewhere.
    Left,
    /// Diagonal split: blended on the upper left, opaque elsewhere.
    Right,
    /// Like `Left`, but masked pixels are not drawn at all.
    LeftFoliage,
    /// Like `Right`, but masked pixels are not drawn at all.
    RightFoliage,
}

impl MaskType {
    pub const ALL: [MaskType; 6] = [
        MaskType::Solid,
        MaskType::Transparent,
        MaskType::Left,
        MaskType::Right,
        MaskType::LeftFoliage,
        MaskType::RightFoliage,
    ];
}

impl fmt::Display for MaskType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self, f)
    }
}

/// One entry of a level's block table: frame number in bits 0‥11 and the
/// [`TileType`] code in bits 12‥14.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct LevelCelBlock(pub u16);

impl LevelCelBlock {
    const FRAME_MASK: u16 = 0x0FFF;
    const TYPE_MASK: u16 = 0x7000;

    /// Pack a 1-based frame number (truncated to 12 bits) with a shape.
    pub const fn new(frame: u16, tile: TileType) -> Self {
        LevelCelBlock((frame & Self::FRAME_MASK) | ((tile as u16) << 12))
    }

    /// A zero frame means "nothing here".
    pub const fn has_value(self) -> bool {
        self.frame() != 0
    }

    pub const fn frame(self) -> u16 {
        self.0 & Self::FRAME_MASK
    }

    /// `None` for the reserved codes 6 and 7.
    pub fn tile_type(self) -> Option<TileType> {
        TileType::from_code(((self.0 & Self::TYPE_MASK) >> 12) as u8)
    }
}

/*======================================================================*/
/*                               Tests                                  */
/*======================================================================*/
