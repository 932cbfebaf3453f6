//! SIMD-accelerated kernel using the `wide` crate.
//!
//! Needle rows are contiguous RGB bytes, so each row is processed as a byte
//! slice 16 lanes at a time. `max - min` gives the absolute difference of
//! unsigned lanes without widening.

use crate::image::{ImageView, Rgb};
use crate::kernel::scalar::bytes_sad;
use crate::kernel::Kernel;
use wide::u8x16;

const LANES: usize = 16;

#[inline]
fn load_u8x16(slice: &[u8]) -> u8x16 {
    let mut buf = [0u8; LANES];
    buf.copy_from_slice(&slice[..LANES]);
    u8x16::from(buf)
}

/// Horizontal sum of u8x16.
#[inline]
fn hsum(v: u8x16) -> u64 {
    v.to_array().iter().map(|&b| u64::from(b)).sum()
}

#[inline]
fn bytes_sad_simd(a: &[u8], b: &[u8]) -> u64 {
    let len = a.len().min(b.len());
    let simd_end = len / LANES * LANES;
    let mut sum = 0u64;
    let mut i = 0;
    while i < simd_end {
        let va = load_u8x16(&a[i..]);
        let vb = load_u8x16(&b[i..]);
        sum += hsum(va.max(vb) - va.min(vb));
        i += LANES;
    }
    sum + bytes_sad(&a[simd_end..len], &b[simd_end..len])
}

/// SIMD sum-of-absolute-differences kernel.
pub struct SadSimd;

impl Kernel for SadSimd {
    fn patch_dissimilarity(
        haystack: ImageView<'_, Rgb>,
        x: usize,
        y: usize,
        needle: ImageView<'_, Rgb>,
    ) -> u64 {
        let nw = needle.width();
        let mut sum = 0u64;
        for ny in 0..needle.height() {
            let (Some(hay_row), Some(needle_row)) = (haystack.row(y + ny), needle.row(ny)) else {
                return u64::MAX;
            };
            let Some(patch) = hay_row.get(x..x + nw) else {
                return u64::MAX;
            };
            sum += bytes_sad_simd(patch.as_flattened(), needle_row.as_flattened());
        }
        sum
    }
}
