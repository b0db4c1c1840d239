//! Per-(tile, mask) draw counters, compiled in with `dun-render-stats`.
//!
//! Without the feature [`record`] is an empty inline function and
//! [`snapshot`] always returns an empty list.

use crate::world::{MaskType, TileType};

#[cfg(feature = "dun-render-stats")]
mod counters {
    use super::*;
    use once_cell::sync::Lazy;
    use std::{collections::HashMap, sync::Mutex};

    static COUNTS: Lazy<Mutex<HashMap<(TileType, MaskType), usize>>> =
        Lazy::new(|| Mutex::new(HashMap::new()));

    pub fn record(tile: TileType, mask: MaskType) {
        if let Ok(mut counts) = COUNTS.lock() {
            *counts.entry((tile, mask)).or_default() += 1;
        }
    }

    pub fn snapshot() -> Vec<((TileType, MaskType), usize)> {
        let mut out: Vec<_> = match COUNTS.lock() {
            Ok(counts) => counts.iter().map(|(&k, &v)| (k, v)).collect(),
            Err(_) => Vec::new(),
        };
        out.sort();
        out
    }

    pub fn reset() {
        if let Ok(mut counts) = COUNTS.lock() {
            counts.clear();
        }
    }
}

#[cfg(feature = "dun-render-stats")]
pub use counters::{record, reset, snapshot};

#[cfg(not(feature = "dun-render-stats"))]
#[inline(always)]
pub fn record(_tile: TileType, _mask: MaskType) {}

#[cfg(not(feature = "dun-render-stats"))]
pub fn snapshot() -> Vec<((TileType, MaskType), usize)> {
    Vec::new()
}

#[cfg(not(feature = "dun-render-stats"))]
pub fn reset() {}
