//! Patch dissimilarity kernels.
//!
//! A kernel sums absolute RGB channel differences between a needle and the
//! haystack patch at one offset. Sums are integer-only, so every kernel and
//! every partitioning of a scan produce the same value for the same offset.

use crate::image::{ImageView, Rgb};

/// Kernel trait for patch scoring.
pub trait Kernel {
    /// Sum of `|dR| + |dG| + |dB|` over the needle placed at `(x, y)`.
    ///
    /// Returns `u64::MAX` if the needle does not fit at that offset.
    fn patch_dissimilarity(
        haystack: ImageView<'_, Rgb>,
        x: usize,
        y: usize,
        needle: ImageView<'_, Rgb>,
    ) -> u64;
}

pub mod scalar;

#[cfg(feature = "simd")]
pub mod simd;

#[cfg(not(feature = "simd"))]
pub(crate) use scalar::SadScalar as SadKernel;
#[cfg(feature = "simd")]
pub(crate) use simd::SadSimd as SadKernel;

/// Dissimilarity at one offset using the active kernel.
pub fn patch_dissimilarity(
    haystack: ImageView<'_, Rgb>,
    x: usize,
    y: usize,
    needle: ImageView<'_, Rgb>,
) -> u64 {
    <SadKernel as Kernel>::patch_dissimilarity(haystack, x, y, needle)
}

/// Maps a raw dissimilarity to a similarity score; 1.0 is a perfect match.
pub fn normalize_score(sad: u64, needle_width: usize, needle_height: usize) -> f64 {
    let max_sad = (needle_width * needle_height) as f64 * 255.0 * 3.0;
    1.0 - sad as f64 / max_sad
}
