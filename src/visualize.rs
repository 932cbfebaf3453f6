//! Diagnostic images for a search.
//!
//! `similarity_map` renders the raw scan of one needle over one haystack as a
//! grayscale image (bright = similar). `overlay_matches` dims the haystack and
//! paints each match rectangle, greener for better scores.

use crate::image::{ImageView, Raster, Rgb};
use crate::kernel::patch_dissimilarity;
use crate::search::Match;
use crate::util::{FindImgError, FindImgResult};
use image::GrayImage;

/// Brightness kept from the haystack under the overlay.
const BACKGROUND_ALPHA: u32 = 20;

/// Renders `255 - sad / (3 * needle_area)` for every valid offset.
///
/// The map has the haystack's size; offsets where the needle does not fit
/// stay black.
pub fn similarity_map(haystack: &Raster, needle: &Raster) -> FindImgResult<GrayImage> {
    let (width, height) = (haystack.width(), haystack.height());
    let mut data = vec![0u8; width * height];
    if haystack.width() > needle.width() && haystack.height() > needle.height() {
        let region_w = width - needle.width();
        let region_h = height - needle.height();
        let norm = 3 * (needle.width() * needle.height()) as u64;
        let rows = &mut data[..region_h * width];
        fill_rows(rows, width, haystack.view(), needle.view(), region_w, norm);
    }
    GrayImage::from_raw(width as u32, height as u32, data)
        .ok_or(FindImgError::InvalidDimensions { width, height })
}

fn fill_row(
    y: usize,
    row: &mut [u8],
    haystack: ImageView<'_, Rgb>,
    needle: ImageView<'_, Rgb>,
    region_w: usize,
    norm: u64,
) {
    for (x, out) in row.iter_mut().take(region_w).enumerate() {
        let sad = patch_dissimilarity(haystack, x, y, needle);
        *out = 255 - (sad / norm).min(255) as u8;
    }
}

#[cfg(feature = "rayon")]
fn fill_rows(
    rows: &mut [u8],
    width: usize,
    haystack: ImageView<'_, Rgb>,
    needle: ImageView<'_, Rgb>,
    region_w: usize,
    norm: u64,
) {
    use rayon::prelude::*;

    rows.par_chunks_mut(width)
        .enumerate()
        .for_each(|(y, row)| fill_row(y, row, haystack, needle, region_w, norm));
}

#[cfg(not(feature = "rayon"))]
fn fill_rows(
    rows: &mut [u8],
    width: usize,
    haystack: ImageView<'_, Rgb>,
    needle: ImageView<'_, Rgb>,
    region_w: usize,
    norm: u64,
) {
    for (y, row) in rows.chunks_mut(width).enumerate() {
        fill_row(y, row, haystack, needle, region_w, norm);
    }
}

/// Overlay color for a score: white-ish below 0.9, pure green at 1.0.
pub fn match_color(score: f64) -> Rgb {
    let v = 1.0 - ((1.0 - score) * 10.0).min(1.0);
    let fade = (255.0 * (1.0 - v)) as u8;
    [fade, 255, fade]
}

/// Dims `haystack` and fills every match rectangle with [`match_color`].
///
/// Matches are painted worst first so the best one ends up on top.
/// Rectangles are clipped to the raster.
pub fn overlay_matches(haystack: &Raster, matches: &[Match]) -> FindImgResult<Raster> {
    let width = haystack.width();
    let mut data: Vec<Rgb> = haystack
        .pixels()
        .iter()
        .map(|px| px.map(|c| (u32::from(c) * BACKGROUND_ALPHA / 255) as u8))
        .collect();

    for m in matches.iter().rev() {
        let rect = m.bounds.intersect(&haystack.bounds());
        let color = match_color(m.score);
        for y in rect.min_y..rect.max_y {
            let start = y * width;
            data[start + rect.min_x..start + rect.max_x].fill(color);
        }
    }

    Raster::from_pixels(data, width, haystack.height())
}
