//! Scalar reference kernel.

use crate::image::{ImageView, Rgb};
use crate::kernel::Kernel;

/// Scalar sum-of-absolute-differences kernel.
pub struct SadScalar;

/// Sum of absolute byte differences between two equal-length slices.
#[inline]
pub(crate) fn bytes_sad(a: &[u8], b: &[u8]) -> u64 {
    a.iter()
        .zip(b)
        .map(|(&p, &q)| u64::from(p.abs_diff(q)))
        .sum()
}

impl Kernel for SadScalar {
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
            sum += bytes_sad(patch.as_flattened(), needle_row.as_flattened());
        }
        sum
    }
}
