//! Shared fixtures: deterministic images, colour tables and a per-pixel
//! reference of what a tile draw must produce.
#![allow(dead_code)]

use glam::IVec2;
use isotile_rs::{
    archive::encode::{self, TileImage},
    renderer::{Surface, render_tile_frame},
    world::{LightLevel, LightTables, MaskType, PaletteTransparency, TileType},
};

pub const LIGHT_LEVELS: usize = 8;

pub fn tables() -> (LightTables, PaletteTransparency) {
    let lights = LightTables::from_fn(LIGHT_LEVELS, |l, c| c.wrapping_mul(l as u8 + 1) ^ l as u8)
        .expect("light tables");
    let trn = PaletteTransparency::from_fn(|a, b| a.wrapping_mul(31) ^ b.rotate_left(3));
    (lights, trn)
}

/// Pseudo-random image; roughly a quarter of the pixels are the colour key 0.
pub fn image(seed: u32) -> TileImage {
    let mut state = seed.wrapping_mul(2_654_435_761).wrapping_add(0x9E37_79B9) | 1;
    let mut img = [[0u8; 32]; 32];
    for (y, row) in img.iter_mut().enumerate() {
        let stripe = (seed as usize + y) % 7;
        for (x, px) in row.iter_mut().enumerate() {
            state ^= state << 13;
            state ^= state >> 17;
            state ^= state << 5;
            let key = (state >> 8) % 4 == 0 || (x + stripe) % 11 < 3;
            *px = if key { 0 } else { 1 + (state % 255) as u8 };
        }
    }
    img
}

pub fn frame(tile: TileType, seed: u32) -> Vec<u8> {
    encode::encode(tile, &image(seed), 0)
}

/// Background pixel at surface position (`x`, `y`).
pub fn background(x: i32, y: i32) -> u8 {
    (x.wrapping_mul(13) ^ y.wrapping_mul(7).wrapping_add(x >> 2)) as u8
}

pub fn valid_masks(tile: TileType) -> Vec<MaskType> {
    MaskType::ALL
        .into_iter()
        .filter(|&m| tile.supports_mask(m))
        .collect()
}

/// (opaque prefix, prefix increment)
fn mask_pair(mask: MaskType) -> (bool, i32) {
    match mask {
        MaskType::Solid => (false, 0),
        MaskType::Transparent => (true, 0),
        MaskType::Left => (false, 2),
        MaskType::Right => (true, -2),
        MaskType::LeftFoliage => (true, 2),
        MaskType::RightFoliage => (false, -2),
    }
}

enum Pixel {
    Keep,
    Opaque,
    Blend,
}

/// What happens to tile-local pixel (`x`, `y`), `y` counted from the bottom.
fn classify(tile: TileType, mask: MaskType, img: &TileImage, x: i32, y: i32) -> Pixel {
    if !tile.covers(x, y) {
        return Pixel::Keep;
    }
    if tile == TileType::TransparentSquare && img[(31 - y) as usize][x as usize] == 0 {
        return Pixel::Keep;
    }
    let (op, inc) = mask_pair(mask);
    let trapezoid = matches!(tile, TileType::LeftTrapezoid | TileType::RightTrapezoid);
    if inc == 0 || (trapezoid && y < 16) {
        let blended = op == (inc >= 0);
        return if blended { Pixel::Blend } else { Pixel::Opaque };
    }
    let prefix = (if inc >= 0 { -32 } else { 64 }) + inc * y;
    let in_prefix = x < prefix;
    let skip = op == (inc > 0);
    match (in_prefix == op, skip) {
        (true, _) => Pixel::Opaque,
        (false, true) => Pixel::Keep,
        (false, false) => Pixel::Blend,
    }
}

/// Expected surface contents after drawing `tile` at `pos` over
/// `background`.
pub fn reference(
    w: usize,
    h: usize,
    pos: IVec2,
    tile: TileType,
    mask: MaskType,
    light: LightLevel<'_>,
    trn: &PaletteTransparency,
    img: &TileImage,
) -> Vec<u8> {
    let mut out = vec![0u8; w * h];
    for sy in 0..h as i32 {
        for sx in 0..w as i32 {
            let bg = background(sx, sy);
            let (x, y) = (sx - pos.x, pos.y - sy);
            let src = || {
                let s = img[(31 - y) as usize][x as usize];
                match light {
                    LightLevel::FullyLit => s,
                    LightLevel::Partial(t) => t[s as usize],
                    LightLevel::FullyDark => 0,
                }
            };
            out[sy as usize * w + sx as usize] = match classify(tile, mask, img, x, y) {
                Pixel::Keep => bg,
                Pixel::Opaque => src(),
                Pixel::Blend => match light {
                    LightLevel::FullyDark => trn.get(0, bg),
                    _ => trn.get(bg, src()),
                },
            };
        }
    }
    out
}

/// Draw onto a `w`×`h` surface pre-filled with `background`.
pub fn draw(
    w: usize,
    h: usize,
    pos: IVec2,
    tile: TileType,
    frame: &[u8],
    mask: MaskType,
    light: LightLevel<'_>,
    trn: &PaletteTransparency,
) -> Vec<u8> {
    draw_shifted(w, h, IVec2::ZERO, pos, tile, frame, mask, light, trn)
}

/// Like [`draw`], with the background pattern moved so that its origin
/// sits at surface pixel `shift`.
pub fn draw_shifted(
    w: usize,
    h: usize,
    shift: IVec2,
    pos: IVec2,
    tile: TileType,
    frame: &[u8],
    mask: MaskType,
    light: LightLevel<'_>,
    trn: &PaletteTransparency,
) -> Vec<u8> {
    let mut buf: Vec<u8> = (0..w * h)
        .map(|i| background((i % w) as i32 - shift.x, (i / w) as i32 - shift.y))
        .collect();
    let mut surface = Surface::packed(&mut buf, w, h).expect("surface");
    render_tile_frame(&mut surface, pos, tile, frame, mask, light, trn).expect("draw");
    buf
}
