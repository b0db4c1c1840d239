// 8-bit destination buffer borrowed for the duration of a draw.

use thiserror::Error;

#[derive(Error, Debug, PartialEq, Eq)]
pub enum SurfaceError {
    #[error("pitch {pitch} is smaller than width {width}")]
    PitchTooSmall { width: usize, pitch: usize },

    #[error("buffer of {got} bytes too small for {width}x{height} at pitch {pitch}")]
    BufferTooSmall {
        width: usize,
        height: usize,
        pitch: usize,
        got: usize,
    },
}

/// Indexed-colour pixels, row-major with `pitch` bytes between rows.
///
/// The buffer is checked once in [`Surface::new`]; every offset the
/// rasterizer produces after clipping stays inside it.
pub struct Surface<'a> {
    pixels: &'a mut [u8],
    width: usize,
    height: usize,
    pitch: usize,
}

impl<'a> Surface<'a> {
    pub fn new(
        pixels: &'a mut [u8],
        width: usize,
        height: usize,
        pitch: usize,
    ) -> Result<Self, SurfaceError> {
        if pitch < width {
            return Err(SurfaceError::PitchTooSmall { width, pitch });
        }
        let needed = if height == 0 {
            0
        } else {
            pitch * (height - 1) + width
        };
        if pixels.len() < needed {
            return Err(SurfaceError::BufferTooSmall {
                width,
                height,
                pitch,
                got: pixels.len(),
            });
        }
        Ok(Self {
            pixels,
            width,
            height,
            pitch,
        })
    }

    /// Tightly packed surface (`pitch == width`).
    pub fn packed(pixels: &'a mut [u8], width: usize, height: usize) -> Result<Self, SurfaceError> {
        Self::new(pixels, width, height, width)
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn pitch(&self) -> usize {
        self.pitch
    }

    /// Byte offset of pixel (`x`, `y`). The caller keeps both in bounds.
    #[inline]
    pub fn offset(&self, x: usize, y: usize) -> usize {
        y * self.pitch + x
    }

    pub fn pixels(&self) -> &[u8] {
        &*self.pixels
    }

    pub fn pixels_mut(&mut self) -> &mut [u8] {
        &mut *self.pixels
    }

    pub fn fill(&mut self, color: u8) {
        self.pixels.fill(color);
    }
}
