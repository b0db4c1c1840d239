// Display palette and the 256×256 transparency matrix.
// Both are produced outside the renderer; this module only stores them.

use std::ops::{Index, IndexMut};

use super::light::TableError;

/// 256 colours, 0x00RRGGBB.
pub struct Palette(pub [u32; 256]);

impl Default for Palette {
    fn default() -> Self {
        Palette([0u32; 256])
    }
}

impl Palette {
    /// Decode 768 bytes of packed RGB triples.
    pub fn from_rgb(bytes: &[u8]) -> Result<Self, TableError> {
        if bytes.len() != 256 * 3 {
            return Err(TableError::BadLength {
                what: "palette",
                expected: 256 * 3,
                got: bytes.len(),
            });
        }
        let mut pal = Palette::default();
        for (i, rgb) in bytes.chunks_exact(3).enumerate() {
            pal[i] = (rgb[0] as u32) << 16 | (rgb[1] as u32) << 8 | rgb[2] as u32;
        }
        Ok(pal)
    }
}

impl Index<usize> for Palette {
    type Output = u32;
    fn index(&self, idx: usize) -> &u32 {
        &self.0[idx]
    }
}
impl IndexMut<usize> for Palette {
    fn index_mut(&mut self, idx: usize) -> &mut u32 {
        &mut self.0[idx]
    }
}

/// `get(dst, src)` is the colour shown when `src` is drawn half-transparent
/// over `dst`.
#[derive(Clone)]
pub struct PaletteTransparency {
    rows: Vec<[u8; 256]>,
}

impl PaletteTransparency {
    pub fn from_fn(mut f: impl FnMut(u8, u8) -> u8) -> Self {
        let rows = (0..=255u8)
            .map(|a| {
                let mut row = [0u8; 256];
                for (b, out) in row.iter_mut().enumerate() {
                    *out = f(a, b as u8);
                }
                row
            })
            .collect();
        Self { rows }
    }

    /// 65536 bytes, row-major on the first operand.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, TableError> {
        if bytes.len() != 256 * 256 {
            return Err(TableError::BadLength {
                what: "transparency table",
                expected: 256 * 256,
                got: bytes.len(),
            });
        }
        Ok(Self::from_fn(|a, b| bytes[a as usize * 256 + b as usize]))
    }

    /// Colour of `b` drawn half-transparent over `a`.
    #[inline]
    pub fn get(&self, a: u8, b: u8) -> u8 {
        self.rows[a as usize][b as usize]
    }

    #[inline]
    pub fn row(&self, a: u8) -> &[u8; 256] {
        &self.rows[a as usize]
    }
}

impl std::fmt::Debug for PaletteTransparency {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("PaletteTransparency(256x256)")
    }
}
