//! # Tile archive
//!
//! In-memory blob of dungeon tile frames addressed through a little-endian
//! offset table:
//!
//! ```text
//! u32 count
//! u32 offset[1 ..= count + 1]     // absolute, frame f = offset[f] .. offset[f+1]
//! frame data …
//! ```
//!
//! Frame numbers are 1-based, matching [`LevelCelBlock::frame`].
//!
//! [`LevelCelBlock::frame`]: crate::world::LevelCelBlock::frame

pub mod encode;
mod frame;

pub use frame::{FrameError, rle_row_offsets, translate_frame, validate_frame};

use byteorder::{LittleEndian as LE, ReadBytesExt, WriteBytesExt};
use log::debug;
use std::{
    fs::File,
    io::{self, Read, Write},
    path::Path,
};
use thiserror::Error;

/// Loader / lookup errors.
#[derive(Error, Debug)]
pub enum ArchiveError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("archive of {size} bytes too short for a {count}-frame offset table")]
    TooShort { size: usize, count: u32 },

    #[error("frame {frame} out of range (archive holds {count})")]
    FrameOutOfRange { frame: usize, count: usize },

    #[error("frame {frame} spans {start}..{end} outside the {size}-byte archive")]
    BadOffset {
        frame: usize,
        start: u32,
        end: u32,
        size: usize,
    },
}

/// Entire tile archive in memory (raw bytes + parsed offset table).
#[derive(Debug, Clone)]
pub struct TileArchive {
    bytes: Vec<u8>,
    offsets: Vec<u32>,
}

impl TileArchive {
    // ------------------------------------------------------------------ //
    // Loading
    // ------------------------------------------------------------------ //

    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ArchiveError> {
        let mut bytes = Vec::new();
        File::open(path.as_ref())?.read_to_end(&mut bytes)?;
        debug!("tile archive {}: {} bytes", path.as_ref().display(), bytes.len());
        Self::from_bytes(bytes)
    }

    /// Parse and validate the offset table. Every frame range is checked
    /// here so [`frame`](Self::frame) never fails on a bad offset later.
    pub fn from_bytes(bytes: Vec<u8>) -> Result<Self, ArchiveError> {
        let mut cur = bytes.as_slice();
        let count = cur.read_u32::<LE>().map_err(|_| ArchiveError::TooShort {
            size: bytes.len(),
            count: 0,
        })?;

        let table_len = (count as usize + 2).saturating_mul(4);
        if table_len > bytes.len() {
            return Err(ArchiveError::TooShort {
                size: bytes.len(),
                count,
            });
        }

        let mut offsets = Vec::with_capacity(count as usize + 1);
        for _ in 0..=count {
            offsets.push(cur.read_u32::<LE>()?);
        }

        for (i, pair) in offsets.windows(2).enumerate() {
            let (start, end) = (pair[0], pair[1]);
            if start > end || (start as usize) < table_len || end as usize > bytes.len() {
                return Err(ArchiveError::BadOffset {
                    frame: i + 1,
                    start,
                    end,
                    size: bytes.len(),
                });
            }
        }

        debug!("tile archive: {count} frames");
        Ok(Self { bytes, offsets })
    }

    // ------------------------------------------------------------------ //
    // Queries
    // ------------------------------------------------------------------ //

    pub fn frame_count(&self) -> usize {
        self.offsets.len() - 1
    }

    /// Bytes of 1-based frame `frame`.
    pub fn frame(&self, frame: usize) -> Result<&[u8], ArchiveError> {
        if frame == 0 || frame > self.frame_count() {
            return Err(ArchiveError::FrameOutOfRange {
                frame,
                count: self.frame_count(),
            });
        }
        let start = self.offsets[frame - 1] as usize;
        let end = self.offsets[frame] as usize;
        Ok(&self.bytes[start..end])
    }

    /// The whole blob, header included.
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }
}

/*──────────────────────────── Writing ───────────────────────────*/

/// Collects encoded frames and lays them out behind an offset table.
#[derive(Debug, Default, Clone)]
pub struct ArchiveBuilder {
    frames: Vec<Vec<u8>>,
}

impl ArchiveBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a frame and return its 1-based number.
    pub fn push(&mut self, frame: Vec<u8>) -> usize {
        self.frames.push(frame);
        self.frames.len()
    }

    pub fn len(&self) -> usize {
        self.frames.len()
    }

    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    /// Serialise into the on-disk layout.
    pub fn to_bytes(&self) -> Vec<u8> {
        let table_len = (self.frames.len() + 2) * 4;
        let data_len: usize = self.frames.iter().map(Vec::len).sum();
        let mut out = Vec::with_capacity(table_len + data_len);

        // Writes into a Vec cannot fail.
        let _ = out.write_u32::<LE>(self.frames.len() as u32);
        let mut offset = table_len as u32;
        let _ = out.write_u32::<LE>(offset);
        for frame in &self.frames {
            offset += frame.len() as u32;
            let _ = out.write_u32::<LE>(offset);
        }
        for frame in &self.frames {
            out.extend_from_slice(frame);
        }
        out
    }

    pub fn write_to<W: Write>(&self, mut w: W) -> io::Result<()> {
        w.write_all(&self.to_bytes())
    }

    pub fn finish(self) -> Result<TileArchive, ArchiveError> {
        TileArchive::from_bytes(self.to_bytes())
    }
}

// ==========================================================================
// Unit tests
// ==========================================================================
