// TransparentSquare: 32 RLE rows. A control byte `v > 0` is followed by
// `v` literal pixels, `v <= 0` leaves `-v` destination pixels alone.
// Hidden rows cannot be skipped by arithmetic; they are scanned.

use crate::{
    renderer::{
        clip::{Clip, ClipRegime},
        line::Light,
        mask::Mask,
        raster::Raster,
    },
    world::{TILE_HEIGHT, TILE_WIDTH},
};

pub fn render<L: Light, M: Mask>(r: &mut Raster<'_, L>, regime: ClipRegime, clip: &Clip) {
    match regime {
        ClipRegime::Full => full::<L, M>(r),
        ClipRegime::Vertical => vertical::<L, M>(r, clip),
        ClipRegime::LeftAndVertical => clip_left::<L, M>(r, clip),
        ClipRegime::RightAndVertical => clip_right::<L, M>(r, clip),
    }
}

/// Decode and draw one whole row.
#[inline]
fn row<L: Light, M: Mask>(r: &mut Raster<'_, L>, prefix: i32) {
    let mut x = 0;
    while x < TILE_WIDTH {
        let v = r.src.control();
        if v > 0 {
            let n = v as usize;
            r.line::<M>(x as usize, 0, n, prefix - x);
            r.src.skip(n);
            x += v as i32;
        } else {
            x -= v as i32;
        }
    }
}

fn full<L: Light, M: Mask>(r: &mut Raster<'_, L>) {
    for y in 0..TILE_HEIGHT {
        row::<L, M>(r, M::initial_prefix(y));
        r.next_row(0);
    }
}

fn vertical<L: Light, M: Mask>(r: &mut Raster<'_, L>, clip: &Clip) {
    for _ in 0..clip.bottom {
        r.skip_rle_row(TILE_WIDTH);
    }
    for y in clip.bottom..TILE_HEIGHT - clip.top {
        row::<L, M>(r, M::initial_prefix(y));
        r.next_row(0);
    }
}

fn clip_left<L: Light, M: Mask>(r: &mut Raster<'_, L>, clip: &Clip) {
    for _ in 0..clip.bottom {
        r.skip_rle_row(TILE_WIDTH);
    }
    // `end` is below TILE_WIDTH only when the surface is narrower than the
    // tile and both sides are clipped.
    let (left, end) = (clip.left, TILE_WIDTH - clip.right);
    for y in clip.bottom..TILE_HEIGHT - clip.top {
        let prefix = M::initial_prefix(y);
        let mut x = 0;
        while x < TILE_WIDTH {
            let v = r.src.control();
            if v > 0 {
                let n = v as i32;
                // a run crossing either edge is cut to the visible columns
                let (from, to) = (x.max(left), (x + n).min(end));
                if to > from {
                    r.line::<M>(
                        (from - left) as usize,
                        (from - x) as usize,
                        (to - from) as usize,
                        prefix - from,
                    );
                }
                r.src.skip(n as usize);
                x += n;
            } else {
                x -= v as i32;
            }
        }
        r.next_row(0);
    }
}

fn clip_right<L: Light, M: Mask>(r: &mut Raster<'_, L>, clip: &Clip) {
    for _ in 0..clip.bottom {
        r.skip_rle_row(TILE_WIDTH);
    }
    let width = clip.width;
    for y in clip.bottom..TILE_HEIGHT - clip.top {
        let prefix = M::initial_prefix(y);
        let mut x = 0;
        while x < width {
            let v = r.src.control();
            if v > 0 {
                let n = v as i32;
                r.line::<M>(x as usize, 0, n.min(width - x) as usize, prefix - x);
                r.src.skip(n as usize);
                x += n;
            } else {
                x -= v as i32;
            }
        }
        // Scan the rest of the row so the next one starts on a control byte.
        while x < TILE_WIDTH {
            let v = r.src.control();
            if v > 0 {
                r.src.skip(v as usize);
                x += v as i32;
            } else {
                x -= v as i32;
            }
        }
        r.next_row(0);
    }
}
