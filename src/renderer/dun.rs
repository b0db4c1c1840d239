//! Dungeon tile entry points.
//!
//! `render_tile_frame` resolves everything that does not change per pixel:
//! clip → regime, runtime light → [`Light`] type, runtime mask → [`Mask`](mask::Mask)
//! type, shape → row walker. Invalid requests are rejected before a single
//! pixel is written.

use glam::IVec2;
use log::trace;
use thiserror::Error;

use super::{
    clip::{Clip, ClipRegime},
    line::{Blit, Dark, Light, Lit, Shaded, with_light},
    mask,
    raster::{DstCursor, Raster},
    shapes::{left_triangle, right_triangle, square, transparent_square, trapezoid},
    stats,
    surface::Surface,
};
use crate::{
    archive::{ArchiveError, FrameError, TileArchive, validate_frame},
    world::{
        LevelCelBlock, LightLevel, LightTables, MaskType, PaletteTransparency, TILE_WIDTH, TileType,
    },
};

/*──────────────────────────── Error type ───────────────────────────*/

#[derive(Error, Debug)]
pub enum RenderError {
    #[error("{tile} tiles cannot be drawn with the {mask} mask")]
    InvalidMask { tile: TileType, mask: MaskType },

    #[error("{tile} tile at {position} is clipped on both sides of a {width}px surface")]
    SurfaceTooNarrow {
        tile: TileType,
        position: IVec2,
        width: usize,
    },

    #[error(transparent)]
    Frame(#[from] FrameError),

    #[error(transparent)]
    Archive(#[from] ArchiveError),
}

/*====================================================================*/
/*                       Public API                                   */
/*====================================================================*/

/// Draw one tile frame with its bottom-left pixel at `position`.
///
/// A tile entirely outside `out` is not an error and touches nothing.
pub fn render_tile_frame(
    out: &mut Surface<'_>,
    position: IVec2,
    tile: TileType,
    frame: &[u8],
    mask: MaskType,
    light: LightLevel<'_>,
    trn: &PaletteTransparency,
) -> Result<(), RenderError> {
    /*----- 1. Contract checks (nothing written yet) ----------------------*/
    if !tile.supports_mask(mask) {
        return Err(RenderError::InvalidMask { tile, mask });
    }

    let clip = Clip::calculate(
        position,
        TILE_WIDTH,
        tile.height(),
        out.width() as i32,
        out.height() as i32,
    );
    if clip.is_empty() {
        trace!("{tile} at {position} fully clipped");
        return Ok(());
    }
    let regime = match clip.regime() {
        Some(regime) => regime,
        // Square rows are plain column ranges; their left-clip walkers
        // also stop at `clip.right`.
        None if matches!(tile, TileType::Square | TileType::TransparentSquare) => {
            ClipRegime::LeftAndVertical
        }
        None => {
            return Err(RenderError::SurfaceTooNarrow {
                tile,
                position,
                width: out.width(),
            });
        }
    };

    validate_frame(tile, frame)?;

    /*----- 2. Dispatch ---------------------------------------------------*/
    let dst = DstCursor::new(
        out,
        (position.x + clip.left) as usize,
        (position.y - clip.bottom) as usize,
    );
    with_light!(light, |l| draw(
        Raster::new(dst, frame, Blit::new(l, trn)),
        tile,
        mask,
        regime,
        &clip
    ))?;

    stats::record(tile, mask);
    Ok(())
}

/// Hoist the mask and shape out of the row loops.
fn draw<L: Light>(
    mut r: Raster<'_, L>,
    tile: TileType,
    mask: MaskType,
    regime: ClipRegime,
    clip: &Clip,
) -> Result<(), RenderError> {
    macro_rules! shape {
        ($module:ident :: $render:ident: $($m:ident),+) => {
            match mask {
                $(MaskType::$m => $module::$render::<L, mask::$m>(&mut r, regime, clip),)+
                #[allow(unreachable_patterns)]
                _ => return Err(RenderError::InvalidMask { tile, mask }),
            }
        };
    }

    match tile {
        TileType::Square => shape!(square::render: Solid, Transparent),
        TileType::TransparentSquare => shape!(
            transparent_square::render: Solid, Transparent, Left, Right, LeftFoliage, RightFoliage
        ),
        TileType::LeftTriangle => shape!(left_triangle::render: Solid, Transparent),
        TileType::RightTriangle => shape!(right_triangle::render: Solid, Transparent),
        TileType::LeftTrapezoid => shape!(trapezoid::render_left: Solid, Transparent, Left),
        TileType::RightTrapezoid => shape!(trapezoid::render_right: Solid, Transparent, Right),
    }
    Ok(())
}

/*──────────────────────────── Facade ───────────────────────────*/

/// Archive plus colour tables: draws level blocks by light index.
#[derive(Clone, Copy)]
pub struct TileRenderer<'a> {
    archive: &'a TileArchive,
    lights: &'a LightTables,
    trn: &'a PaletteTransparency,
}

impl<'a> TileRenderer<'a> {
    pub fn new(
        archive: &'a TileArchive,
        lights: &'a LightTables,
        trn: &'a PaletteTransparency,
    ) -> Self {
        Self {
            archive,
            lights,
            trn,
        }
    }

    /// Draw `block`; empty blocks (frame 0) are skipped.
    pub fn render_tile(
        &self,
        out: &mut Surface<'_>,
        position: IVec2,
        block: LevelCelBlock,
        mask: MaskType,
        light_index: usize,
    ) -> Result<(), RenderError> {
        if !block.has_value() {
            return Ok(());
        }
        let tile = block
            .tile_type()
            .ok_or(FrameError::UnknownTileType((block.0 >> 12 & 0x7) as u8))?;
        let frame = self.archive.frame(block.frame() as usize)?;
        render_tile_frame(
            out,
            position,
            tile,
            frame,
            mask,
            self.lights.level(light_index),
            self.trn,
        )
    }

    /// Draw with the shape's own opacity.
    pub fn render_opaque_tile(
        &self,
        out: &mut Surface<'_>,
        position: IVec2,
        block: LevelCelBlock,
        light_index: usize,
    ) -> Result<(), RenderError> {
        self.render_tile(out, position, block, MaskType::Solid, light_index)
    }

    /// Draw every pixel blended.
    pub fn render_transparent_tile(
        &self,
        out: &mut Surface<'_>,
        position: IVec2,
        block: LevelCelBlock,
        light_index: usize,
    ) -> Result<(), RenderError> {
        self.render_tile(out, position, block, MaskType::Transparent, light_index)
    }

    pub fn light_tables(&self) -> &'a LightTables {
        self.lights
    }
}

/*──────────────────────────────── Tests ───────────────────────────────*/
#[cfg(test)]
mod tests {
    use super::*;
    use crate::archive::{ArchiveBuilder, encode};
    use glam::ivec2;

    fn tables() -> (LightTables, PaletteTransparency) {
        (
            LightTables::from_fn(4, |l, c| c / (l as u8 + 1)).unwrap(),
            PaletteTransparency::from_fn(|a, b| a ^ b),
        )
    }

    fn frame_for(tile: TileType) -> Vec<u8> {
        encode::encode(tile, &[[7u8; 32]; 32], 0)
    }

    #[test]
    fn invalid_masks_write_nothing() {
        let (_, trn) = tables();
        for tile in TileType::ALL {
            let frame = frame_for(tile);
            for mask in MaskType::ALL {
                if tile.supports_mask(mask) {
                    continue;
                }
                let mut buf = vec![3u8; 64 * 64];
                let mut s = Surface::packed(&mut buf, 64, 64).unwrap();
                let err = render_tile_frame(
                    &mut s,
                    ivec2(8, 40),
                    tile,
                    &frame,
                    mask,
                    LightLevel::FullyLit,
                    &trn,
                )
                .unwrap_err();
                assert!(matches!(err, RenderError::InvalidMask { .. }), "{tile}/{mask}");
                assert!(buf.iter().all(|&p| p == 3), "{tile}/{mask} wrote pixels");
            }
        }
    }

    #[test]
    fn zero_area_is_a_no_op() {
        let (_, trn) = tables();
        let mut buf = vec![3u8; 64 * 64];
        let mut s = Surface::packed(&mut buf, 64, 64).unwrap();
        for pos in [ivec2(-32, 40), ivec2(64, 40), ivec2(0, -1), ivec2(0, 95)] {
            // even a garbage frame is fine: it is never looked at
            render_tile_frame(&mut s, pos, TileType::Square, &[], MaskType::Solid, LightLevel::FullyLit, &trn)
                .unwrap();
        }
        assert!(buf.iter().all(|&p| p == 3));
    }

    #[test]
    fn short_frame_rejected_before_drawing() {
        let (_, trn) = tables();
        let mut buf = vec![3u8; 64 * 64];
        let mut s = Surface::packed(&mut buf, 64, 64).unwrap();
        let err = render_tile_frame(
            &mut s,
            ivec2(0, 40),
            TileType::RightTrapezoid,
            &[1u8; 700],
            MaskType::Right,
            LightLevel::FullyLit,
            &trn,
        )
        .unwrap_err();
        assert!(matches!(err, RenderError::Frame(FrameError::Truncated { .. })));
        assert!(buf.iter().all(|&p| p == 3));
    }

    #[test]
    fn narrow_surface_rejected() {
        let (_, trn) = tables();
        let mut buf = vec![0u8; 20 * 40];
        let mut s = Surface::packed(&mut buf, 20, 40).unwrap();
        for tile in [TileType::LeftTriangle, TileType::RightTrapezoid] {
            let err = render_tile_frame(
                &mut s,
                ivec2(-2, 35),
                tile,
                &frame_for(tile),
                MaskType::Solid,
                LightLevel::FullyLit,
                &trn,
            )
            .unwrap_err();
            assert!(matches!(err, RenderError::SurfaceTooNarrow { width: 20, .. }));
        }
    }

    #[test]
    fn squares_fit_a_narrow_surface() {
        let (_, trn) = tables();
        let mut img = [[7u8; 32]; 32];
        for row in img.iter_mut() {
            // opaque runs cross both edges of the 20px window
            row[10..18].fill(0);
        }
        for tile in [TileType::Square, TileType::TransparentSquare] {
            let mut buf = vec![1u8; 20 * 40];
            let mut s = Surface::packed(&mut buf, 20, 40).unwrap();
            render_tile_frame(
                &mut s,
                ivec2(-4, 35),
                tile,
                &encode::encode(tile, &img, 0),
                MaskType::Solid,
                LightLevel::FullyLit,
                &trn,
            )
            .unwrap();
            for (y, row) in buf.chunks_exact(20).enumerate() {
                let want: Vec<u8> = if (4..36).contains(&y) {
                    // surface column c shows tile column c + 4
                    (4..24)
                        .map(|x| match (tile, img[0][x]) {
                            (TileType::TransparentSquare, 0) => 1,
                            (_, p) => p,
                        })
                        .collect()
                } else {
                    vec![1; 20]
                };
                assert_eq!(row, want.as_slice(), "{tile} row {y}");
            }
        }
    }

    #[test]
    fn far_off_screen_is_a_no_op() {
        let (_, trn) = tables();
        let frame = frame_for(TileType::Square);
        let mut buf = vec![3u8; 64 * 64];
        let mut s = Surface::packed(&mut buf, 64, 64).unwrap();
        let far = [
            ivec2(i32::MAX - 5, 10),
            ivec2(10, i32::MAX),
            ivec2(i32::MIN, 10),
            ivec2(10, i32::MIN + 3),
        ];
        for pos in far {
            render_tile_frame(
                &mut s,
                pos,
                TileType::Square,
                &frame,
                MaskType::Solid,
                LightLevel::FullyLit,
                &trn,
            )
            .unwrap();
            crate::renderer::render_single_color_tile(&mut s, pos, 9);
        }
        assert!(buf.iter().all(|&p| p == 3));
    }

    #[test]
    fn facade_resolves_blocks_and_lights() {
        let (lights, trn) = tables();
        let mut builder = ArchiveBuilder::new();
        let f = builder.push(frame_for(TileType::LeftTrapezoid));
        let archive = builder.finish().unwrap();
        let renderer = TileRenderer::new(&archive, &lights, &trn);
        let block = LevelCelBlock::new(f as u16, TileType::LeftTrapezoid);

        let mut buf = vec![1u8; 32 * 32];
        let mut s = Surface::packed(&mut buf, 32, 32).unwrap();
        renderer.render_opaque_tile(&mut s, ivec2(0, 31), block, 0).unwrap();
        // top row is full width, bottom row only the rightmost 2 px
        assert!(buf[..32].iter().all(|&p| p == 7));
        assert_eq!(&buf[31 * 32 + 29..], &[1, 7, 7]);

        let mut s = Surface::packed(&mut buf, 32, 32).unwrap();
        renderer.render_opaque_tile(&mut s, ivec2(0, 31), block, 1).unwrap();
        assert_eq!(buf[0], 7 / 2);

        let mut s = Surface::packed(&mut buf, 32, 32).unwrap();
        renderer.render_opaque_tile(&mut s, ivec2(0, 31), block, 3).unwrap();
        assert_eq!(buf[0], 0);

        // empty block is skipped, unknown frame reported
        let mut s = Surface::packed(&mut buf, 32, 32).unwrap();
        renderer
            .render_tile(&mut s, ivec2(0, 31), LevelCelBlock(0), MaskType::Solid, 0)
            .unwrap();
        let err = renderer
            .render_transparent_tile(&mut s, ivec2(0, 31), LevelCelBlock::new(9, TileType::Square), 0)
            .unwrap_err();
        assert!(matches!(err, RenderError::Archive(ArchiveError::FrameOutOfRange { .. })));
        let err = renderer
            .render_opaque_tile(&mut s, ivec2(0, 31), LevelCelBlock(0x6001), 0)
            .unwrap_err();
        assert!(matches!(err, RenderError::Frame(FrameError::UnknownTileType(6))));
    }
}
