// Left/RightTrapezoid: a triangle's lower half topped by 16 full rows.
//
// The lower half is drawn uniformly (opaque or blended per mask); the upper
// rows carry the diagonal mask boundary.

use super::{left_triangle, right_triangle};
use crate::{
    renderer::{
        clip::{Clip, ClipRegime, DiamondClipY, trapezoid_upper_skip},
        line::Light,
        mask::Mask,
        raster::Raster,
    },
    world::{LOWER_HEIGHT, TILE_WIDTH, TRAPEZOID_UPPER_HEIGHT},
};

const ROW: usize = TILE_WIDTH as usize;

pub fn render_left<L: Light, M: Mask>(r: &mut Raster<'_, L>, regime: ClipRegime, clip: &Clip) {
    let blend = M::LOWER_HALF_BLENDED;
    let dc = DiamondClipY::new(clip, TRAPEZOID_UPPER_HEIGHT);
    let upper_visible = match regime {
        ClipRegime::Full => {
            left_triangle::lower_full(r, blend);
            true
        }
        ClipRegime::Vertical => left_triangle::lower_vertical(r, blend, &dc),
        ClipRegime::LeftAndVertical => left_triangle::lower_clip_left(r, blend, &dc, clip.left),
        ClipRegime::RightAndVertical => left_triangle::lower_clip_right(r, blend, &dc, clip.right),
    };
    if upper_visible {
        upper::<L, M>(r, regime, clip, &dc);
    }
}

pub fn render_right<L: Light, M: Mask>(r: &mut Raster<'_, L>, regime: ClipRegime, clip: &Clip) {
    let blend = M::LOWER_HALF_BLENDED;
    let dc = DiamondClipY::new(clip, TRAPEZOID_UPPER_HEIGHT);
    let upper_visible = match regime {
        ClipRegime::Full => {
            right_triangle::lower_full(r, blend);
            true
        }
        ClipRegime::Vertical => right_triangle::lower_vertical(r, blend, &dc),
        ClipRegime::LeftAndVertical => right_triangle::lower_clip_left(r, blend, &dc, clip.left),
        ClipRegime::RightAndVertical => {
            right_triangle::lower_clip_right(r, blend, &dc, clip.right)
        }
    };
    if upper_visible {
        upper::<L, M>(r, regime, clip, &dc);
    }
}

/*──────────────────── Upper half: full-width rows ───────────────────*/

fn upper<L: Light, M: Mask>(r: &mut Raster<'_, L>, regime: ClipRegime, clip: &Clip, dc: &DiamondClipY) {
    match regime {
        ClipRegime::Full => upper_full::<L, M>(r),
        ClipRegime::Vertical => upper_vertical::<L, M>(r, dc),
        ClipRegime::LeftAndVertical => upper_clip_left::<L, M>(r, dc, clip.left),
        ClipRegime::RightAndVertical => upper_clip_right::<L, M>(r, dc, clip.right),
    }
}

fn upper_full<L: Light, M: Mask>(r: &mut Raster<'_, L>) {
    let mut prefix = M::initial_prefix(LOWER_HEIGHT);
    for _ in 0..TRAPEZOID_UPPER_HEIGHT {
        r.line::<M>(0, 0, ROW, prefix);
        r.next_row(ROW);
        prefix += M::PREFIX_INCREMENT;
    }
}

fn upper_vertical<L: Light, M: Mask>(r: &mut Raster<'_, L>, dc: &DiamondClipY) {
    r.src.skip(trapezoid_upper_skip(dc.upper_bottom));
    let mut prefix = M::initial_prefix(LOWER_HEIGHT + dc.upper_bottom);
    for _ in dc.upper_rows(TRAPEZOID_UPPER_HEIGHT) {
        r.line::<M>(0, 0, ROW, prefix);
        r.next_row(ROW);
        prefix += M::PREFIX_INCREMENT;
    }
}

fn upper_clip_left<L: Light, M: Mask>(r: &mut Raster<'_, L>, dc: &DiamondClipY, left: i32) {
    r.src.skip(trapezoid_upper_skip(dc.upper_bottom));
    let width = (TILE_WIDTH - left) as usize;
    let mut prefix = M::initial_prefix(LOWER_HEIGHT + dc.upper_bottom) - left;
    for _ in dc.upper_rows(TRAPEZOID_UPPER_HEIGHT) {
        r.line::<M>(0, left as usize, width, prefix);
        r.next_row(ROW);
        prefix += M::PREFIX_INCREMENT;
    }
}

fn upper_clip_right<L: Light, M: Mask>(r: &mut Raster<'_, L>, dc: &DiamondClipY, right: i32) {
    r.src.skip(trapezoid_upper_skip(dc.upper_bottom));
    let width = (TILE_WIDTH - right) as usize;
    let mut prefix = M::initial_prefix(LOWER_HEIGHT + dc.upper_bottom);
    for _ in dc.upper_rows(TRAPEZOID_UPPER_HEIGHT) {
        r.line::<M>(0, 0, width, prefix);
        r.next_row(ROW);
        prefix += M::PREFIX_INCREMENT;
    }
}
