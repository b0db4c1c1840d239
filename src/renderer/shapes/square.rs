// Square: 32 rows of 32 literal pixels, no padding.

use crate::{
    renderer::{
        clip::{Clip, ClipRegime},
        line::Light,
        mask::Mask,
        raster::Raster,
    },
    world::{TILE_HEIGHT, TILE_WIDTH},
};

const ROW: usize = TILE_WIDTH as usize;

pub fn render<L: Light, M: Mask>(r: &mut Raster<'_, L>, regime: ClipRegime, clip: &Clip) {
    match regime {
        ClipRegime::Full => full::<L, M>(r),
        ClipRegime::Vertical => vertical::<L, M>(r, clip),
        ClipRegime::LeftAndVertical => clip_left::<L, M>(r, clip),
        ClipRegime::RightAndVertical => clip_right::<L, M>(r, clip),
    }
}

fn full<L: Light, M: Mask>(r: &mut Raster<'_, L>) {
    for y in 0..TILE_HEIGHT {
        r.line::<M>(0, 0, ROW, M::initial_prefix(y));
        r.next_row(ROW);
    }
}

fn vertical<L: Light, M: Mask>(r: &mut Raster<'_, L>, clip: &Clip) {
    r.src.skip(ROW * clip.bottom as usize);
    for y in clip.bottom..TILE_HEIGHT - clip.top {
        r.line::<M>(0, 0, ROW, M::initial_prefix(y));
        r.next_row(ROW);
    }
}

fn clip_left<L: Light, M: Mask>(r: &mut Raster<'_, L>, clip: &Clip) {
    let left = clip.left as usize;
    let width = clip.width as usize;
    r.src.skip(ROW * clip.bottom as usize);
    for y in clip.bottom..TILE_HEIGHT - clip.top {
        r.line::<M>(0, left, width, M::initial_prefix(y) - clip.left);
        r.next_row(ROW);
    }
}

fn clip_right<L: Light, M: Mask>(r: &mut Raster<'_, L>, clip: &Clip) {
    let width = clip.width as usize;
    r.src.skip(ROW * clip.bottom as usize);
    for y in clip.bottom..TILE_HEIGHT - clip.top {
        r.line::<M>(0, 0, width, M::initial_prefix(y));
        r.next_row(ROW);
    }
}
