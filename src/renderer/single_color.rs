//! Flat-fill diamond used for highlight overlays.
//!
//! 64 px wide, 31 rows: lower row i (1..=16) is `4i` px at column
//! `32 - 2i`, upper row i (1..=15) is `64 - 4i` px at column `2i`.
//! No source, no light, no mask.

use glam::IVec2;
use log::trace;

use super::{
    clip::{Clip, ClipRegime, DiamondClipY},
    raster::DstCursor,
    surface::Surface,
};
use crate::world::{DIAMOND_WIDTH, LOWER_HEIGHT, TRIANGLE_HEIGHT, TRIANGLE_UPPER_HEIGHT, XSTEP};

/// Fill the diamond whose bottom-left corner is `position` with `color`.
///
/// Unlike tile frames, a diamond wider than the surface on both sides is
/// simply not drawn.
pub fn render_single_color_tile(out: &mut Surface<'_>, position: IVec2, color: u8) {
    let clip = Clip::calculate(
        position,
        DIAMOND_WIDTH,
        TRIANGLE_HEIGHT,
        out.width() as i32,
        out.height() as i32,
    );
    if clip.is_empty() {
        return;
    }
    let Some(regime) = clip.regime() else {
        trace!("diamond at {position} wider than the {}px surface", out.width());
        return;
    };
    let mut dst = DstCursor::new(
        out,
        (position.x + clip.left) as usize,
        (position.y - clip.bottom) as usize,
    );
    let dc = DiamondClipY::new(&clip, TRIANGLE_UPPER_HEIGHT);
    match regime {
        ClipRegime::Full => full(&mut dst, color),
        ClipRegime::Vertical => vertical(&mut dst, &dc, color),
        ClipRegime::LeftAndVertical => clip_left(&mut dst, &dc, clip.left, color),
        ClipRegime::RightAndVertical => clip_right(&mut dst, &dc, clip.right, color),
    }
}

/// (column, width) of lower row `i`.
#[inline]
const fn lower_row(i: i32) -> (i32, i32) {
    (DIAMOND_WIDTH / 2 - XSTEP * i, 2 * XSTEP * i)
}

/// (column, width) of upper row `i`.
#[inline]
const fn upper_row(i: i32) -> (i32, i32) {
    (XSTEP * i, DIAMOND_WIDTH - 2 * XSTEP * i)
}

fn full(dst: &mut DstCursor<'_>, color: u8) {
    for i in 1..=LOWER_HEIGHT {
        let (x, w) = lower_row(i);
        dst.fill(x as usize, w as usize, color);
        dst.up();
    }
    for i in 1..=TRIANGLE_UPPER_HEIGHT {
        let (x, w) = upper_row(i);
        dst.fill(x as usize, w as usize, color);
        dst.up();
    }
}

fn vertical(dst: &mut DstCursor<'_>, dc: &DiamondClipY, color: u8) {
    for i in dc.lower_rows() {
        let (x, w) = lower_row(i);
        dst.fill(x as usize, w as usize, color);
        dst.up();
    }
    if dc.lower_top > 0 {
        return;
    }
    for i in dc.upper_rows(TRIANGLE_UPPER_HEIGHT) {
        let (x, w) = upper_row(i);
        dst.fill(x as usize, w as usize, color);
        dst.up();
    }
}

fn clip_left(dst: &mut DstCursor<'_>, dc: &DiamondClipY, left: i32, color: u8) {
    let mut row = |(x, w): (i32, i32)| {
        let start = x.max(left);
        let end = x + w;
        if end > start {
            dst.fill((start - left) as usize, (end - start) as usize, color);
        }
        dst.up();
    };
    for i in dc.lower_rows() {
        row(lower_row(i));
    }
    if dc.lower_top > 0 {
        return;
    }
    for i in dc.upper_rows(TRIANGLE_UPPER_HEIGHT) {
        let (x, w) = upper_row(i);
        if x + w <= left {
            break;
        }
        row((x, w));
    }
}

fn clip_right(dst: &mut DstCursor<'_>, dc: &DiamondClipY, right: i32, color: u8) {
    let visible = DIAMOND_WIDTH - right;
    let mut row = |(x, w): (i32, i32)| {
        let end = (x + w).min(visible);
        if end > x {
            dst.fill(x as usize, (end - x) as usize, color);
        }
        dst.up();
    };
    for i in dc.lower_rows() {
        row(lower_row(i));
    }
    if dc.lower_top > 0 {
        return;
    }
    for i in dc.upper_rows(TRIANGLE_UPPER_HEIGHT) {
        let (x, w) = upper_row(i);
        if x >= visible {
            break;
        }
        row((x, w));
    }
}

/*======================================================================*/
/*                               Tests                                  */
/*======================================================================*/
