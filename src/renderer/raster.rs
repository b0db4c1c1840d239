// Cursors the shape loops walk with.
//
// The destination is an index into the surface plus a signed pitch; rows
// are visited bottom-up so `up()` subtracts the pitch. Spans are addressed
// by a column offset from the cursor's column, so a row never has to be
// "rewound". The source is a byte slice and a read position.

use super::{
    line::{Blit, Light},
    mask::Mask,
    surface::Surface,
};

pub struct DstCursor<'a> {
    buf: &'a mut [u8],
    row: isize,
    pitch: isize,
}

impl<'a> DstCursor<'a> {
    /// Cursor on pixel (`x`, `y`) of `surface`.
    pub fn new(surface: &'a mut Surface<'_>, x: usize, y: usize) -> Self {
        let row = surface.offset(x, y) as isize;
        let pitch = surface.pitch() as isize;
        Self {
            buf: surface.pixels_mut(),
            row,
            pitch,
        }
    }

    /// `n` pixels starting `dx` columns right of the cursor.
    #[inline]
    pub fn span(&mut self, dx: usize, n: usize) -> &mut [u8] {
        let start = self.row as usize + dx;
        &mut self.buf[start..start + n]
    }

    #[inline]
    pub fn fill(&mut self, dx: usize, n: usize, color: u8) {
        self.span(dx, n).fill(color);
    }

    /// Move one row towards the top of the surface.
    #[inline]
    pub fn up(&mut self) {
        self.row -= self.pitch;
    }
}

pub struct SrcCursor<'a> {
    data: &'a [u8],
    pos: usize,
}

impl<'a> SrcCursor<'a> {
    pub fn new(data: &'a [u8]) -> Self {
        Self { data, pos: 0 }
    }

    #[inline]
    pub fn ahead(&self, offset: usize, n: usize) -> &'a [u8] {
        let start = self.pos + offset;
        &self.data[start..start + n]
    }

    #[inline]
    pub fn skip(&mut self, n: usize) {
        self.pos += n;
    }

    /// Read an RLE control byte.
    #[inline]
    pub fn control(&mut self) -> i8 {
        let v = self.data[self.pos] as i8;
        self.pos += 1;
        v
    }

    #[cfg(test)]
    pub fn position(&self) -> usize {
        self.pos
    }
}

/// Everything one tile draw needs: where to write, what to read, how to
/// light and blend.
pub struct Raster<'a, L> {
    pub dst: DstCursor<'a>,
    pub src: SrcCursor<'a>,
    blit: Blit<'a, L>,
}

impl<'a, L: Light> Raster<'a, L> {
    pub fn new(dst: DstCursor<'a>, src: &'a [u8], blit: Blit<'a, L>) -> Self {
        Self {
            dst,
            src: SrcCursor::new(src),
            blit,
        }
    }

    /// Copy `n` source pixels at `sx` to column `dx`, all opaque or all
    /// blended. The source position does not move.
    #[inline]
    pub fn uniform(&mut self, blend: bool, dx: usize, sx: usize, n: usize) {
        if n == 0 {
            return;
        }
        let src = self.src.ahead(sx, n);
        self.blit.uniform(blend, self.dst.span(dx, n), src);
    }

    /// Like [`uniform`](Self::uniform) under mask `M`, with `prefix`
    /// relative to the span's first pixel.
    #[inline]
    pub fn line<M: Mask>(&mut self, dx: usize, sx: usize, n: usize, prefix: i32) {
        if n == 0 {
            return;
        }
        let src = self.src.ahead(sx, n);
        self.blit.line::<M>(self.dst.span(dx, n), src, prefix);
    }

    /// Finish a row: advance the source by `consumed` and the destination
    /// by one row.
    #[inline]
    pub fn next_row(&mut self, consumed: usize) {
        self.src.skip(consumed);
        self.dst.up();
    }

    /// Consume one RLE row without drawing it.
    pub fn skip_rle_row(&mut self, width: i32) {
        let mut x = 0;
        while x < width {
            let v = self.src.control();
            if v > 0 {
                self.src.skip(v as usize);
                x += v as i32;
            } else {
                x -= v as i32;
            }
        }
    }
}
