//! Clip math shared by every shape.
//!
//! A tile is positioned by its **bottom-left** pixel. The clip holds how
//! many rows/columns of the footprint fall outside the surface on each
//! side; rows are drawn bottom-up so `bottom` rows are skipped first.

use glam::IVec2;

use crate::world::{LOWER_HEIGHT, TILE_WIDTH, XSTEP};

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct Clip {
    pub top: i32,
    pub bottom: i32,
    pub left: i32,
    pub right: i32,
    /// Visible columns, never negative.
    pub width: i32,
    /// Visible rows, never negative.
    pub height: i32,
}

/// Which loop family a clipped tile is drawn with.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum ClipRegime {
    Full,
    Vertical,
    LeftAndVertical,
    RightAndVertical,
}

impl Clip {
    /// Clip a `w`×`h` footprint at `position` against an `out_w`×`out_h`
    /// surface.
    ///
    /// Margins are worked out in `i64` and capped at the footprint, so any
    /// position, however far off the surface, gives an empty clip.
    pub fn calculate(position: IVec2, w: i32, h: i32, out_w: i32, out_h: i32) -> Self {
        let (x, y) = (position.x as i64, position.y as i64);
        let margin = |m: i64, size: i32| m.clamp(0, size as i64) as i32;
        let top = margin(h as i64 - (y + 1), h);
        let bottom = margin(y + 1 - out_h as i64, h);
        let left = margin(-x, w);
        let right = margin(x + w as i64 - out_w as i64, w);
        Self {
            top,
            bottom,
            left,
            right,
            width: (w - left - right).max(0),
            height: (h - top - bottom).max(0),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    /// `None` when both sides are clipped: the surface is narrower than
    /// the footprint.
    pub fn regime(&self) -> Option<ClipRegime> {
        match (self.left, self.right) {
            (0, 0) if self.top == 0 && self.bottom == 0 => Some(ClipRegime::Full),
            (0, 0) => Some(ClipRegime::Vertical),
            (_, 0) => Some(ClipRegime::LeftAndVertical),
            (0, _) => Some(ClipRegime::RightAndVertical),
            _ => None,
        }
    }
}

/// Hidden rows of the two stacked halves of a triangle, trapezoid or
/// diamond: a widening lower half of [`LOWER_HEIGHT`] rows and an upper
/// half of `upper_height` rows.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct DiamondClipY {
    pub lower_bottom: i32,
    pub lower_top: i32,
    pub upper_bottom: i32,
    pub upper_top: i32,
}

impl DiamondClipY {
    pub fn new(clip: &Clip, upper_height: i32) -> Self {
        Self {
            lower_bottom: clip.bottom.min(LOWER_HEIGHT),
            lower_top: (clip.top - upper_height).max(0),
            upper_bottom: (clip.bottom - LOWER_HEIGHT).max(0),
            upper_top: clip.top.min(upper_height),
        }
    }

    /// 1-based lower-half rows left to draw.
    pub fn lower_rows(&self) -> std::ops::RangeInclusive<i32> {
        self.lower_bottom + 1..=LOWER_HEIGHT - self.lower_top
    }

    /// 1-based upper-half rows left to draw.
    pub fn upper_rows(&self, upper_height: i32) -> std::ops::RangeInclusive<i32> {
        self.upper_bottom + 1..=upper_height - self.upper_top
    }
}

/*──────────────────────── Source skipping ───────────────────────*/

/// Parity padding (2 bytes on every odd row) in the first `n` rows.
#[inline]
const fn padding(n: i32) -> i32 {
    2 * ((n + 1) / 2)
}

/// Frame bytes taken by the first `n` rows of a triangle's lower half.
#[inline]
pub const fn triangle_lower_skip(n: i32) -> usize {
    (XSTEP * n * (n + 1) / 2 + padding(n)) as usize
}

/// Frame bytes taken by the first `n` rows of a triangle's upper half.
#[inline]
pub const fn triangle_upper_skip(n: i32) -> usize {
    ((TILE_WIDTH - XSTEP) * n - n * (n - 1) + padding(n)) as usize
}

/// Frame bytes taken by the first `n` rows of a trapezoid's upper half.
#[inline]
pub const fn trapezoid_upper_skip(n: i32) -> usize {
    (TILE_WIDTH * n) as usize
}

/*======================================================================*/
/*                               Tests                                  */
/*======================================================================*/
