// RightTriangle: the right half of a floor diamond, left-aligned.
//
//   lower row i (1..=16): 2i px at column 0
//   upper row i (1..=15): 32 - 2i px at column 0
//
// Odd rows of each half end with 2 bytes of padding.

use crate::{
    renderer::{
        clip::{Clip, ClipRegime, DiamondClipY, triangle_lower_skip, triangle_upper_skip},
        line::Light,
        mask::Mask,
        raster::Raster,
    },
    world::{LOWER_HEIGHT, TILE_WIDTH, TRIANGLE_UPPER_HEIGHT, XSTEP},
};

#[inline]
const fn pad(i: i32) -> usize {
    if i % 2 == 1 { 2 } else { 0 }
}

pub fn render<L: Light, M: Mask>(r: &mut Raster<'_, L>, regime: ClipRegime, clip: &Clip) {
    let blend = M::LOWER_HALF_BLENDED;
    match regime {
        ClipRegime::Full => {
            lower_full(r, blend);
            upper_full::<L, M>(r);
        }
        ClipRegime::Vertical => {
            let dc = DiamondClipY::new(clip, TRIANGLE_UPPER_HEIGHT);
            if lower_vertical(r, blend, &dc) {
                upper_vertical::<L, M>(r, &dc);
            }
        }
        ClipRegime::LeftAndVertical => {
            let dc = DiamondClipY::new(clip, TRIANGLE_UPPER_HEIGHT);
            if lower_clip_left(r, blend, &dc, clip.left) {
                upper_clip_left::<L, M>(r, &dc, clip.left);
            }
        }
        ClipRegime::RightAndVertical => {
            let dc = DiamondClipY::new(clip, TRIANGLE_UPPER_HEIGHT);
            if lower_clip_right(r, blend, &dc, clip.right) {
                upper_clip_right::<L, M>(r, &dc, clip.right);
            }
        }
    }
}

/*──────────────────── Lower half (shared with trapezoid) ───────────────────*/

pub(super) fn lower_full<L: Light>(r: &mut Raster<'_, L>, blend: bool) {
    for i in 1..=LOWER_HEIGHT {
        let w = (XSTEP * i) as usize;
        r.uniform(blend, 0, 0, w);
        r.next_row(w + pad(i));
    }
}

/// Returns whether the upper half is (partly) visible.
pub(super) fn lower_vertical<L: Light>(r: &mut Raster<'_, L>, blend: bool, dc: &DiamondClipY) -> bool {
    r.src.skip(triangle_lower_skip(dc.lower_bottom));
    for i in dc.lower_rows() {
        let w = (XSTEP * i) as usize;
        r.uniform(blend, 0, 0, w);
        r.next_row(w + pad(i));
    }
    dc.lower_top == 0
}

pub(super) fn lower_clip_left<L: Light>(
    r: &mut Raster<'_, L>,
    blend: bool,
    dc: &DiamondClipY,
    left: i32,
) -> bool {
    r.src.skip(triangle_lower_skip(dc.lower_bottom));
    for i in dc.lower_rows() {
        let w = XSTEP * i;
        if w > left {
            r.uniform(blend, 0, left as usize, (w - left) as usize);
        }
        r.next_row(w as usize + pad(i));
    }
    dc.lower_top == 0
}

pub(super) fn lower_clip_right<L: Light>(
    r: &mut Raster<'_, L>,
    blend: bool,
    dc: &DiamondClipY,
    right: i32,
) -> bool {
    r.src.skip(triangle_lower_skip(dc.lower_bottom));
    for i in dc.lower_rows() {
        let w = XSTEP * i;
        let skip = (right - (TILE_WIDTH - w)).max(0);
        r.uniform(blend, 0, 0, (w - skip) as usize);
        r.next_row(w as usize + pad(i));
    }
    dc.lower_top == 0
}

/*──────────────────────────── Upper half ───────────────────────────*/

fn upper_full<L: Light, M: Mask>(r: &mut Raster<'_, L>) {
    for i in 1..=TRIANGLE_UPPER_HEIGHT {
        let w = TILE_WIDTH - XSTEP * i;
        r.line::<M>(0, 0, w as usize, M::initial_prefix(LOWER_HEIGHT + i - 1));
        r.next_row(w as usize + pad(i));
    }
}

fn upper_vertical<L: Light, M: Mask>(r: &mut Raster<'_, L>, dc: &DiamondClipY) {
    r.src.skip(triangle_upper_skip(dc.upper_bottom));
    for i in dc.upper_rows(TRIANGLE_UPPER_HEIGHT) {
        let w = TILE_WIDTH - XSTEP * i;
        r.line::<M>(0, 0, w as usize, M::initial_prefix(LOWER_HEIGHT + i - 1));
        r.next_row(w as usize + pad(i));
    }
}

fn upper_clip_left<L: Light, M: Mask>(r: &mut Raster<'_, L>, dc: &DiamondClipY, left: i32) {
    r.src.skip(triangle_upper_skip(dc.upper_bottom));
    for i in dc.upper_rows(TRIANGLE_UPPER_HEIGHT) {
        let w = TILE_WIDTH - XSTEP * i;
        if w <= left {
            break;
        }
        let prefix = M::initial_prefix(LOWER_HEIGHT + i - 1) - left;
        r.line::<M>(0, left as usize, (w - left) as usize, prefix);
        r.next_row(w as usize + pad(i));
    }
}

fn upper_clip_right<L: Light, M: Mask>(r: &mut Raster<'_, L>, dc: &DiamondClipY, right: i32) {
    r.src.skip(triangle_upper_skip(dc.upper_bottom));
    for i in dc.upper_rows(TRIANGLE_UPPER_HEIGHT) {
        let w = TILE_WIDTH - XSTEP * i;
        let skip = (right - (TILE_WIDTH - w)).max(0);
        r.line::<M>(
            0,
            0,
            (w - skip) as usize,
            M::initial_prefix(LOWER_HEIGHT + i - 1),
        );
        r.next_row(w as usize + pad(i));
    }
}
