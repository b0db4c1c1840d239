//! End-to-end tile draws checked pixel by pixel.

mod common;

use glam::{IVec2, ivec2};
use isotile_rs::{
    archive::encode,
    renderer::{RenderError, Surface, render_tile_frame},
    world::{LightLevel, MaskType, PaletteTransparency, TileType},
};

/*──────────────────────────── Scenario A ───────────────────────────*/

#[test]
fn solid_square_at_origin_with_wide_pitch() {
    let (_, trn) = common::tables();
    let frame = encode::encode_square(&[[5u8; 32]; 32]);
    let mut buf = vec![0xEEu8; 64 * 32];
    let mut s = Surface::new(&mut buf, 32, 32, 64).unwrap();
    render_tile_frame(
        &mut s,
        ivec2(0, 31),
        TileType::Square,
        &frame,
        MaskType::Solid,
        LightLevel::FullyLit,
        &trn,
    )
    .unwrap();

    for row in buf.chunks_exact(64) {
        assert!(row[..32].iter().all(|&p| p == 5));
        assert!(row[32..].iter().all(|&p| p == 0xEE));
    }
}

/*──────────────────────────── Scenario B ───────────────────────────*/

#[test]
fn transparent_square_blends_every_pixel() {
    let trn = PaletteTransparency::from_fn(|a, b| a.wrapping_add(b).wrapping_mul(3));
    let frame = encode::encode_square(&[[5u8; 32]; 32]);
    let orig: Vec<u8> = (0..64 * 32).map(|i| (i * 7 % 251) as u8).collect();
    let mut buf = orig.clone();
    let mut s = Surface::new(&mut buf, 32, 32, 64).unwrap();
    render_tile_frame(
        &mut s,
        ivec2(0, 31),
        TileType::Square,
        &frame,
        MaskType::Transparent,
        LightLevel::FullyLit,
        &trn,
    )
    .unwrap();

    for (i, (&got, &was)) in buf.iter().zip(&orig).enumerate() {
        if i % 64 < 32 {
            assert_eq!(got, trn.get(was, 5), "pixel {i}");
        } else {
            assert_eq!(got, was, "pixel {i} outside the tile");
        }
    }
}

/*──────────────────────────── Scenario C ───────────────────────────*/

#[test]
fn left_triangle_through_black_light_table() {
    let (_, trn) = common::tables();
    let black = [0u8; 256];
    let frame = encode::encode_left_triangle(&[[9u8; 32]; 32]);
    let (w, h) = (48, 40);
    let pos = ivec2(8, 35);
    let mut buf = vec![0xAAu8; w * h];
    let mut s = Surface::packed(&mut buf, w, h).unwrap();
    render_tile_frame(
        &mut s,
        pos,
        TileType::LeftTriangle,
        &frame,
        MaskType::Solid,
        LightLevel::Partial(&black),
        &trn,
    )
    .unwrap();

    for sy in 0..h as i32 {
        for sx in 0..w as i32 {
            let inside = TileType::LeftTriangle.covers(sx - pos.x, pos.y - sy);
            let want = if inside { 0 } else { 0xAA };
            assert_eq!(buf[sy as usize * w + sx as usize], want, "({sx}, {sy})");
        }
    }
}

/*──────────────────────────── Scenario D ───────────────────────────*/

#[test]
fn left_clip_hides_first_ten_columns() {
    let (_, trn) = common::tables();
    let img = common::image(4);
    let frame = encode::encode_square(&img);
    let (w, h) = (40, 32);
    let mut buf = vec![0xEEu8; w * h];
    let mut s = Surface::packed(&mut buf, w, h).unwrap();
    render_tile_frame(
        &mut s,
        ivec2(-10, 31),
        TileType::Square,
        &frame,
        MaskType::Solid,
        LightLevel::FullyLit,
        &trn,
    )
    .unwrap();

    for (y, row) in buf.chunks_exact(w).enumerate() {
        // tile columns 10..32 land on surface columns 0..22
        assert_eq!(&row[..22], &img[y][10..], "row {y}");
        assert!(row[22..].iter().all(|&p| p == 0xEE), "row {y}");
    }
}

/*──────────────────────── Every shape, mask, light, regime ─────────────────*/

const XS: [i32; 10] = [-31, -17, -10, -1, 0, 5, 16, 17, 30, 47];
const YS: [i32; 12] = [0, 5, 15, 16, 17, 30, 31, 40, 47, 50, 62, 78];

#[test]
fn every_combination_matches_reference() {
    let (lights, trn) = common::tables();
    let (w, h) = (48, 48);
    for (seed, tile) in TileType::ALL.into_iter().enumerate() {
        let img = common::image(seed as u32 * 17 + 3);
        let frame = encode::encode(tile, &img, 0);
        for mask in common::valid_masks(tile) {
            for light in [0, 3, common::LIGHT_LEVELS - 1] {
                let light = lights.level(light);
                for &x in &XS {
                    for &y in &YS {
                        let pos = ivec2(x, y);
                        let got = common::draw(w, h, pos, tile, &frame, mask, light, &trn);
                        let want = common::reference(w, h, pos, tile, mask, light, &trn, &img);
                        if let Some(i) = (0..got.len()).find(|&i| got[i] != want[i]) {
                            panic!(
                                "{tile}/{mask}/{light:?} at {pos}: first diff at ({}, {}): got {} want {}",
                                i % w,
                                i / w,
                                got[i],
                                want[i]
                            );
                        }
                    }
                }
            }
        }
    }
}

#[test]
fn partially_visible_top_and_bottom_rows() {
    // 16-row surface: a 32-row tile is clipped on both top and bottom.
    let (lights, trn) = common::tables();
    let img = common::image(77);
    for tile in TileType::ALL {
        let frame = encode::encode(tile, &img, 0);
        for mask in common::valid_masks(tile) {
            for y in [20, 24, 31, 36] {
                let pos = IVec2::new(3, y);
                let light = lights.level(2);
                let got = common::draw(40, 16, pos, tile, &frame, mask, light, &trn);
                let want = common::reference(40, 16, pos, tile, mask, light, &trn, &img);
                assert_eq!(got, want, "{tile}/{mask} at {pos}");
            }
        }
    }
}

#[test]
fn squares_clipped_on_both_sides_match_reference() {
    let (lights, trn) = common::tables();
    for tile in [TileType::Square, TileType::TransparentSquare] {
        let img = common::image(tile as u32 + 40);
        let frame = encode::encode(tile, &img, 0);
        for mask in common::valid_masks(tile) {
            for x in -12..=-1 {
                for y in [10, 31, 44] {
                    let pos = ivec2(x, y);
                    let light = lights.level(x.unsigned_abs() as usize % common::LIGHT_LEVELS);
                    let got = common::draw(20, 40, pos, tile, &frame, mask, light, &trn);
                    let want = common::reference(20, 40, pos, tile, mask, light, &trn, &img);
                    assert_eq!(got, want, "{tile}/{mask} at {pos}");
                }
            }
        }
    }
}

/*──────────────────────────── Contract ───────────────────────────*/

#[test]
fn left_mask_on_square_is_rejected() {
    let (_, trn) = common::tables();
    let frame = common::frame(TileType::Square, 1);
    let mut buf = vec![1u8; 64 * 64];
    let mut s = Surface::packed(&mut buf, 64, 64).unwrap();
    let err = render_tile_frame(
        &mut s,
        ivec2(0, 40),
        TileType::Square,
        &frame,
        MaskType::Left,
        LightLevel::FullyLit,
        &trn,
    )
    .unwrap_err();
    assert!(matches!(
        err,
        RenderError::InvalidMask {
            tile: TileType::Square,
            mask: MaskType::Left
        }
    ));
    assert_eq!(err.to_string(), "Square tiles cannot be drawn with the Left mask");
    assert!(buf.iter().all(|&p| p == 1));
}
