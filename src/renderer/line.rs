//! Line compositor: writes one span of destination pixels.
//!
//! Lighting is a type parameter ([`Dark`], [`Lit`], [`Shaded`]) so every
//! span loop is monomorphised; the runtime [`LightLevel`] is matched once
//! per tile in `renderer::dun`.
//!
//! * opaque  : Dark → 0,              Lit → src,             Shaded → tbl[src]
//! * blended : Dark → trn[0][dst],    Lit → trn[dst][src],   Shaded → trn[dst][tbl[src]]

use super::mask::Mask;
use crate::world::{LightLevel, PaletteTransparency};

/// One lighting regime.
pub trait Light: Copy {
    fn opaque(self, dst: &mut [u8], src: &[u8]);
    fn blend(self, dst: &mut [u8], src: &[u8], trn: &PaletteTransparency);
}

#[derive(Copy, Clone, Debug)]
pub struct Dark;

#[derive(Copy, Clone, Debug)]
pub struct Lit;

#[derive(Copy, Clone, Debug)]
pub struct Shaded<'a>(pub &'a [u8; 256]);

impl Light for Dark {
    #[inline]
    fn opaque(self, dst: &mut [u8], _src: &[u8]) {
        dst.fill(0);
    }

    #[inline]
    fn blend(self, dst: &mut [u8], _src: &[u8], trn: &PaletteTransparency) {
        let row = trn.row(0);
        for d in dst {
            *d = row[*d as usize];
        }
    }
}

impl Light for Lit {
    #[inline]
    fn opaque(self, dst: &mut [u8], src: &[u8]) {
        dst.copy_from_slice(src);
    }

    #[inline]
    fn blend(self, dst: &mut [u8], src: &[u8], trn: &PaletteTransparency) {
        for (d, &s) in dst.iter_mut().zip(src) {
            *d = trn.get(*d, s);
        }
    }
}

impl Light for Shaded<'_> {
    #[inline]
    fn opaque(self, dst: &mut [u8], src: &[u8]) {
        for (d, &s) in dst.iter_mut().zip(src) {
            *d = self.0[s as usize];
        }
    }

    #[inline]
    fn blend(self, dst: &mut [u8], src: &[u8], trn: &PaletteTransparency) {
        for (d, &s) in dst.iter_mut().zip(src) {
            *d = trn.get(*d, self.0[s as usize]);
        }
    }
}

/*──────────────────────────── Blitter ───────────────────────────*/

/// Light regime plus the transparency table, carried through a tile draw.
#[derive(Copy, Clone)]
pub struct Blit<'a, L> {
    light: L,
    trn: &'a PaletteTransparency,
}

impl<'a, L: Light> Blit<'a, L> {
    pub fn new(light: L, trn: &'a PaletteTransparency) -> Self {
        Self { light, trn }
    }

    /// Whole span opaque or whole span blended.
    #[inline]
    pub fn uniform(&self, blend: bool, dst: &mut [u8], src: &[u8]) {
        if blend {
            self.light.blend(dst, src, self.trn);
        } else {
            self.light.opaque(dst, src);
        }
    }

    /// Split the span at `prefix` (clamped to the span). With an opaque
    /// prefix the suffix is blended, otherwise the prefix is blended and
    /// the suffix opaque. `skip_blended` drops the blended part entirely.
    #[inline]
    pub fn split(
        &self,
        opaque_prefix: bool,
        skip_blended: bool,
        prefix: i32,
        dst: &mut [u8],
        src: &[u8],
    ) {
        let p = prefix.clamp(0, dst.len() as i32) as usize;
        let (dst_head, dst_tail) = dst.split_at_mut(p);
        let (src_head, src_tail) = src.split_at(p);
        if opaque_prefix {
            self.light.opaque(dst_head, src_head);
            if !skip_blended {
                self.light.blend(dst_tail, src_tail, self.trn);
            }
        } else {
            if !skip_blended {
                self.light.blend(dst_head, src_head, self.trn);
            }
            self.light.opaque(dst_tail, src_tail);
        }
    }

    /// One span under mask `M`. `prefix` is the mask boundary measured
    /// from the first pixel of this span.
    #[inline]
    pub fn line<M: Mask>(&self, dst: &mut [u8], src: &[u8], prefix: i32) {
        if M::PREFIX_INCREMENT == 0 {
            self.uniform(M::OPAQUE_PREFIX, dst, src);
        } else {
            self.split(M::OPAQUE_PREFIX, M::SKIP_TRANSPARENT, prefix, dst, src);
        }
    }
}

/*──────────────────── Runtime-dispatched spans ───────────────────*/

macro_rules! with_light {
    ($light:expr, |$l:ident| $body:expr) => {
        match $light {
            LightLevel::FullyDark => {
                let $l = Dark;
                $body
            }
            LightLevel::FullyLit => {
                let $l = Lit;
                $body
            }
            LightLevel::Partial(table) => {
                let $l = Shaded(table);
                $body
            }
        }
    };
}
pub(crate) use with_light;

/// Write `dst.len()` opaque pixels from `src`.
pub fn render_opaque_span(dst: &mut [u8], src: &[u8], light: LightLevel) {
    let n = dst.len();
    with_light!(light, |l| l.opaque(dst, &src[..n]))
}

/// Blend `src` over `dst` through `trn`.
pub fn render_blended_span(
    dst: &mut [u8],
    src: &[u8],
    light: LightLevel,
    trn: &PaletteTransparency,
) {
    let n = dst.len();
    with_light!(light, |l| l.blend(dst, &src[..n], trn))
}

/// Opaque/blended split of one span; see [`Blit::split`].
pub fn render_split_span(
    dst: &mut [u8],
    src: &[u8],
    light: LightLevel,
    trn: &PaletteTransparency,
    opaque_prefix: bool,
    skip_blended: bool,
    prefix: i32,
) {
    let n = dst.len();
    with_light!(light, |l| Blit::new(l, trn).split(
        opaque_prefix,
        skip_blended,
        prefix,
        dst,
        &src[..n]
    ))
}

/*======================================================================*/
/*                               Tests                                  */
/*======================================================================*/
