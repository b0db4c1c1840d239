//! Light ramps.
//!
//! A light table maps a palette index to a darker palette index. Table 0 is
//! the identity (full light), the last table maps everything to black.
//! The renderer never looks at table *contents* to decide the regime: the
//! caller resolves an index to a [`LightLevel`] once per draw.

use std::ops::Index;

use thiserror::Error;

/// Bytes per light table.
pub const LIGHT_TABLE_SIZE: usize = 256;

/// Lighting regime for one tile draw.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum LightLevel<'a> {
    /// Opaque pixels become colour 0.
    FullyDark,
    /// Source pixels are used as-is.
    FullyLit,
    /// Source pixels go through the table first.
    Partial(&'a [u8; LIGHT_TABLE_SIZE]),
}

/// Errors raised when building colour tables from raw bytes.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum TableError {
    #[error("{what}: expected {expected} bytes, got {got}")]
    BadLength {
        what: &'static str,
        expected: usize,
        got: usize,
    },

    #[error("at least two light tables are required, got {0}")]
    TooFewLevels(usize),
}

/// `N` consecutive 256-byte light ramps.
#[derive(Clone, Debug)]
pub struct LightTables {
    tables: Vec<[u8; LIGHT_TABLE_SIZE]>,
}

impl LightTables {
    /// Split a blob of `N * 256` bytes into tables.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, TableError> {
        if bytes.is_empty() || bytes.len() % LIGHT_TABLE_SIZE != 0 {
            return Err(TableError::BadLength {
                what: "light tables",
                expected: bytes.len().div_ceil(LIGHT_TABLE_SIZE).max(2) * LIGHT_TABLE_SIZE,
                got: bytes.len(),
            });
        }
        let mut tables = Vec::with_capacity(bytes.len() / LIGHT_TABLE_SIZE);
        for chunk in bytes.chunks_exact(LIGHT_TABLE_SIZE) {
            let mut table = [0u8; LIGHT_TABLE_SIZE];
            table.copy_from_slice(chunk);
            tables.push(table);
        }
        Self::from_tables(tables)
    }

    /// Build `count` tables from `f(level, colour)`.
    pub fn from_fn(count: usize, mut f: impl FnMut(usize, u8) -> u8) -> Result<Self, TableError> {
        let tables = (0..count)
            .map(|level| {
                let mut table = [0u8; LIGHT_TABLE_SIZE];
                for (c, out) in table.iter_mut().enumerate() {
                    *out = f(level, c as u8);
                }
                table
            })
            .collect();
        Self::from_tables(tables)
    }

    fn from_tables(tables: Vec<[u8; LIGHT_TABLE_SIZE]>) -> Result<Self, TableError> {
        if tables.len() < 2 {
            return Err(TableError::TooFewLevels(tables.len()));
        }
        Ok(Self { tables })
    }

    /// Number of tables, including the lit and dark ends.
    pub fn len(&self) -> usize {
        self.tables.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tables.is_empty()
    }

    /// Index of the fully dark table.
    pub fn darkest(&self) -> usize {
        self.tables.len() - 1
    }

    /// Resolve a light index to a regime. Indices past the end are dark.
    pub fn level(&self, index: usize) -> LightLevel<'_> {
        match index {
            0 => LightLevel::FullyLit,
            i if i >= self.darkest() => LightLevel::FullyDark,
            i => LightLevel::Partial(&self.tables[i]),
        }
    }
}

impl Index<usize> for LightTables {
    type Output = [u8; LIGHT_TABLE_SIZE];
    fn index(&self, idx: usize) -> &Self::Output {
        &self.tables[idx]
    }
}

/*======================================================================*/
/*                               Tests                                  */
/*======================================================================*/
