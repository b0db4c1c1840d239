//! Mask selectors as zero-sized types.
//!
//! A mask is the pair (opaque prefix?, prefix increment). The prefix of
//! row `y` (from the bottom) starts at `-32` or `64` and moves by the
//! increment each row; pixels left of it are the *prefix*.

use crate::world::{MaskType, TILE_WIDTH};

pub trait Mask {
    const TYPE: MaskType;
    /// Prefix pixels are opaque (suffix blended) when true; reversed when false.
    const OPAQUE_PREFIX: bool;
    /// Boundary shift per row: −2, 0 or +2.
    const PREFIX_INCREMENT: i32;

    /// Blended pixels are not drawn at all.
    const SKIP_TRANSPARENT: bool =
        Self::PREFIX_INCREMENT != 0 && (Self::OPAQUE_PREFIX == (Self::PREFIX_INCREMENT > 0));

    /// The widening lower half of triangles and trapezoids is drawn blended.
    const LOWER_HALF_BLENDED: bool = Self::OPAQUE_PREFIX == (Self::PREFIX_INCREMENT >= 0);

    /// Prefix of tile row `y`, measured from tile column 0.
    #[inline]
    fn initial_prefix(y: i32) -> i32 {
        let start = if Self::PREFIX_INCREMENT >= 0 {
            -TILE_WIDTH
        } else {
            2 * TILE_WIDTH
        };
        start + Self::PREFIX_INCREMENT * y
    }
}

macro_rules! masks {
    ($($name:ident: $op:expr, $inc:expr;)+) => {
        $(
            #[derive(Copy, Clone, Debug)]
            pub struct $name;

            impl Mask for $name {
                const TYPE: MaskType = MaskType::$name;
                const OPAQUE_PREFIX: bool = $op;
                const PREFIX_INCREMENT: i32 = $inc;
            }
        )+
    };
}

masks! {
    Solid:        false,  0;
    Transparent:  true,   0;
    Left:         false,  2;
    Right:        true,  -2;
    LeftFoliage:  true,   2;
    RightFoliage: false, -2;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn derived_flags() {
        assert!(!Solid::SKIP_TRANSPARENT && !Solid::LOWER_HALF_BLENDED);
        assert!(!Transparent::SKIP_TRANSPARENT && Transparent::LOWER_HALF_BLENDED);
        assert!(!Left::SKIP_TRANSPARENT && !Left::LOWER_HALF_BLENDED);
        assert!(!Right::SKIP_TRANSPARENT && !Right::LOWER_HALF_BLENDED);
        assert!(LeftFoliage::SKIP_TRANSPARENT);
        assert!(RightFoliage::SKIP_TRANSPARENT);
        assert_eq!(RightFoliage::TYPE, MaskType::RightFoliage);
    }

    #[test]
    fn prefixes_cross_the_tile_in_the_upper_half() {
        // Left: nothing blended until row 16, 30 px blended on the top row
        assert_eq!(Left::initial_prefix(0), -32);
        assert_eq!(Left::initial_prefix(16), 0);
        assert_eq!(Left::initial_prefix(31), 30);
        // Right: whole row opaque up to row 16, 2 px on the top row
        assert_eq!(Right::initial_prefix(16), 32);
        assert_eq!(Right::initial_prefix(31), 2);
    }
}
