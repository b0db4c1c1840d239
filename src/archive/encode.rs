//! Frame encoders.
//!
//! Turn a 32×32 indexed image (row 0 at the top) into the byte layout the
//! renderer reads. Rows are emitted bottom-up. Triangle and trapezoid rows
//! with an odd 1-based index inside their half carry two zero bytes of
//! padding: before the pixels for left shapes, after them for right shapes.

use crate::world::{
    LOWER_HEIGHT, TILE_HEIGHT, TILE_WIDTH, TRIANGLE_UPPER_HEIGHT, TileType, TRAPEZOID_UPPER_HEIGHT,
    XSTEP,
};

/// Indexed 32×32 source image, top row first.
pub type TileImage = [[u8; TILE_WIDTH as usize]; TILE_HEIGHT as usize];

const PAD: [u8; 2] = [0, 0];

/// Encode `img` in the layout of `tile`. `transparent` is only used by the
/// RLE shape.
pub fn encode(tile: TileType, img: &TileImage, transparent: u8) -> Vec<u8> {
    match tile {
        TileType::Square => encode_square(img),
        TileType::TransparentSquare => encode_transparent_square(img, transparent),
        TileType::LeftTriangle => encode_left_triangle(img),
        TileType::RightTriangle => encode_right_triangle(img),
        TileType::LeftTrapezoid => encode_left_trapezoid(img),
        TileType::RightTrapezoid => encode_right_trapezoid(img),
    }
}

/// Image row holding tile row `y` counted from the bottom.
fn row(img: &TileImage, y: i32) -> &[u8; TILE_WIDTH as usize] {
    &img[(TILE_HEIGHT - 1 - y) as usize]
}

pub fn encode_square(img: &TileImage) -> Vec<u8> {
    let mut out = Vec::with_capacity(32 * 32);
    for y in 0..TILE_HEIGHT {
        out.extend_from_slice(row(img, y));
    }
    out
}

/// RLE with `transparent` as the colour key.
pub fn encode_transparent_square(img: &TileImage, transparent: u8) -> Vec<u8> {
    let mut out = Vec::new();
    for y in 0..TILE_HEIGHT {
        encode_rle_row(row(img, y), transparent, &mut out);
    }
    out
}

/// One RLE row: `-n` for `n` transparent pixels, `n` plus the pixels for
/// an opaque run. Never emits a zero control byte.
pub fn encode_rle_row(pixels: &[u8], transparent: u8, out: &mut Vec<u8>) {
    let mut x = 0;
    while x < pixels.len() {
        let opaque = pixels[x] != transparent;
        let run = pixels[x..]
            .iter()
            .take(i8::MAX as usize)
            .take_while(|&&p| (p != transparent) == opaque)
            .count();
        if opaque {
            out.push(run as u8);
            out.extend_from_slice(&pixels[x..x + run]);
        } else {
            out.push((-(run as i8)) as u8);
        }
        x += run;
    }
}

/*──────────────────────── Triangle halves ───────────────────────*/

fn left_lower_half(img: &TileImage, out: &mut Vec<u8>) {
    for i in 1..=LOWER_HEIGHT {
        let width = XSTEP * i;
        if i % 2 == 1 {
            out.extend_from_slice(&PAD);
        }
        out.extend_from_slice(&row(img, i - 1)[(TILE_WIDTH - width) as usize..]);
    }
}

fn right_lower_half(img: &TileImage, out: &mut Vec<u8>) {
    for i in 1..=LOWER_HEIGHT {
        let width = XSTEP * i;
        out.extend_from_slice(&row(img, i - 1)[..width as usize]);
        if i % 2 == 1 {
            out.extend_from_slice(&PAD);
        }
    }
}

pub fn encode_left_triangle(img: &TileImage) -> Vec<u8> {
    let mut out = Vec::with_capacity(544);
    left_lower_half(img, &mut out);
    for i in 1..=TRIANGLE_UPPER_HEIGHT {
        if i % 2 == 1 {
            out.extend_from_slice(&PAD);
        }
        out.extend_from_slice(&row(img, LOWER_HEIGHT + i - 1)[(XSTEP * i) as usize..]);
    }
    out
}

pub fn encode_right_triangle(img: &TileImage) -> Vec<u8> {
    let mut out = Vec::with_capacity(544);
    right_lower_half(img, &mut out);
    for i in 1..=TRIANGLE_UPPER_HEIGHT {
        let width = TILE_WIDTH - XSTEP * i;
        out.extend_from_slice(&row(img, LOWER_HEIGHT + i - 1)[..width as usize]);
        if i % 2 == 1 {
            out.extend_from_slice(&PAD);
        }
    }
    out
}

fn square_upper_half(img: &TileImage, out: &mut Vec<u8>) {
    for y in LOWER_HEIGHT..LOWER_HEIGHT + TRAPEZOID_UPPER_HEIGHT {
        out.extend_from_slice(row(img, y));
    }
}

pub fn encode_left_trapezoid(img: &TileImage) -> Vec<u8> {
    let mut out = Vec::with_capacity(800);
    left_lower_half(img, &mut out);
    square_upper_half(img, &mut out);
    out
}

pub fn encode_right_trapezoid(img: &TileImage) -> Vec<u8> {
    let mut out = Vec::with_capacity(800);
    right_lower_half(img, &mut out);
    square_upper_half(img, &mut out);
    out
}

/*======================================================================*/
/*                               Tests                                  */
/*======================================================================*/
