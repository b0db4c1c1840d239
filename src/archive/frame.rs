// Frame-level checks and rewrites that need to know each shape's layout.
//
// Fixed layouts are checked by length only. RLE frames (TransparentSquare)
// are walked control byte by control byte: `v > 0` is followed by `v`
// literal pixels, `v <= 0` skips `-v` pixels, and each row covers exactly
// `TILE_WIDTH` pixels.

use thiserror::Error;

use crate::world::{TILE_HEIGHT, TILE_WIDTH, TileType};

#[derive(Error, Debug, PartialEq, Eq)]
pub enum FrameError {
    #[error("{tile} frame is {got} bytes, needs {expected}")]
    Truncated {
        tile: TileType,
        expected: usize,
        got: usize,
    },

    #[error("RLE row {row} covers {width} pixels at byte {offset}")]
    RowOverflow {
        row: usize,
        width: i32,
        offset: usize,
    },

    #[error("RLE data ends inside row {row}")]
    UnexpectedEnd { row: usize },

    #[error("unknown tile type code {0}")]
    UnknownTileType(u8),
}

/// Byte offsets of each RLE row start, plus the end of the last row
/// (`TILE_HEIGHT + 1` entries). Rows are listed bottom-up, as stored.
pub fn rle_row_offsets(frame: &[u8]) -> Result<Vec<usize>, FrameError> {
    let mut offsets = Vec::with_capacity(TILE_HEIGHT as usize + 1);
    let mut pos = 0usize;
    offsets.push(pos);
    for row in 0..TILE_HEIGHT as usize {
        pos = scan_rle_row(frame, pos, row, |_| {})?;
        offsets.push(pos);
    }
    Ok(offsets)
}

/// Check `frame` against the layout of `tile` and return how many bytes
/// the renderer will consume.
pub fn validate_frame(tile: TileType, frame: &[u8]) -> Result<usize, FrameError> {
    match tile.frame_len() {
        Some(expected) if frame.len() < expected => Err(FrameError::Truncated {
            tile,
            expected,
            got: frame.len(),
        }),
        Some(expected) => Ok(expected),
        None => rle_row_offsets(frame).map(|rows| rows[TILE_HEIGHT as usize]),
    }
}

/// Map every pixel byte of `frame` through `table`. RLE control bytes are
/// left alone, so a translated frame decodes to the same runs.
pub fn translate_frame(
    tile: TileType,
    frame: &mut [u8],
    table: &[u8; 256],
) -> Result<(), FrameError> {
    let len = validate_frame(tile, frame)?;
    if tile != TileType::TransparentSquare {
        for px in &mut frame[..len] {
            *px = table[*px as usize];
        }
        return Ok(());
    }

    // Collect literal ranges first; the scan only needs shared access.
    let mut literals = Vec::new();
    let mut pos = 0usize;
    for row in 0..TILE_HEIGHT as usize {
        pos = scan_rle_row(frame, pos, row, |range| literals.push(range))?;
    }
    for range in literals {
        for px in &mut frame[range] {
            *px = table[*px as usize];
        }
    }
    Ok(())
}

/// Walk one RLE row starting at `pos`; `on_literal` gets the byte range of
/// every literal run. Returns the start of the next row.
fn scan_rle_row(
    frame: &[u8],
    mut pos: usize,
    row: usize,
    mut on_literal: impl FnMut(std::ops::Range<usize>),
) -> Result<usize, FrameError> {
    let mut width = 0i32;
    while width < TILE_WIDTH {
        let control = *frame.get(pos).ok_or(FrameError::UnexpectedEnd { row })? as i8;
        let at = pos;
        pos += 1;
        if control > 0 {
            let n = control as usize;
            if pos + n > frame.len() {
                return Err(FrameError::UnexpectedEnd { row });
            }
            on_literal(pos..pos + n);
            pos += n;
            width += control as i32;
        } else {
            width -= control as i32;
        }
        if width > TILE_WIDTH {
            return Err(FrameError::RowOverflow {
                row,
                width,
                offset: at,
            });
        }
    }
    Ok(pos)
}

/*──────────────────────────────── Tests ───────────────────────────────*/
#[cfg(test)]
mod tests {
    use super::*;

    /// 32 rows of: 4 literal, skip 20, 8 literal.
    fn striped_rle() -> Vec<u8> {
        let mut out = Vec::new();
        for r in 0..32u8 {
            out.push(4);
            out.extend_from_slice(&[r; 4]);
            out.push((-20i8) as u8);
            out.push(8);
            out.extend_from_slice(&[r + 100; 8]);
        }
        out
    }

    #[test]
    fn row_offsets_follow_runs() {
        let rle = striped_rle();
        let rows = rle_row_offsets(&rle).unwrap();
        assert_eq!(rows.len(), 33);
        assert_eq!(rows[1], 15);
        assert_eq!(rows[32], rle.len());
        assert_eq!(
            validate_frame(TileType::TransparentSquare, &rle),
            Ok(rle.len())
        );
    }

    #[test]
    fn overflowing_row_rejected() {
        let mut rle = striped_rle();
        rle[5] = (-29i8) as u8;
        assert_eq!(
            rle_row_offsets(&rle),
            Err(FrameError::RowOverflow {
                row: 0,
                width: 33,
                offset: 5
            })
        );
        // -128 as a skip is never a valid row
        let bad = vec![0x80u8; 4];
        assert!(matches!(
            validate_frame(TileType::TransparentSquare, &bad),
            Err(FrameError::RowOverflow { row: 0, .. })
        ));
    }

    #[test]
    fn truncated_frames_rejected() {
        let rle = striped_rle();
        assert_eq!(
            validate_frame(TileType::TransparentSquare, &rle[..rle.len() - 3]),
            Err(FrameError::UnexpectedEnd { row: 31 })
        );
        assert_eq!(
            validate_frame(TileType::LeftTriangle, &[0u8; 543]),
            Err(FrameError::Truncated {
                tile: TileType::LeftTriangle,
                expected: 544,
                got: 543
            })
        );
        assert_eq!(validate_frame(TileType::Square, &[0u8; 1030]), Ok(1024));
    }

    #[test]
    fn translate_skips_control_bytes() {
        let mut rle = striped_rle();
        let mut table = [0u8; 256];
        for (i, t) in table.iter_mut().enumerate() {
            *t = (i as u8).wrapping_add(1);
        }
        let orig = rle.clone();
        translate_frame(TileType::TransparentSquare, &mut rle, &table).unwrap();
        assert_eq!(rle_row_offsets(&rle), rle_row_offsets(&orig));
        // row 3: control, 4 × (3+1), skip, control, 8 × (103+1)
        let row = &rle[45..60];
        assert_eq!(row[0], 4);
        assert_eq!(&row[1..5], &[4; 4]);
        assert_eq!(row[5], (-20i8) as u8);
        assert_eq!(row[6], 8);
        assert_eq!(&row[7..15], &[104; 8]);

        let mut square = vec![7u8; 1024];
        translate_frame(TileType::Square, &mut square, &table).unwrap();
        assert!(square.iter().all(|&p| p == 8));
    }
}
