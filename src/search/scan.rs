//! Per-scale exhaustive scan.
//!
//! The valid offset region `[0, hw - nw) x [0, hh - nh)` is cut into
//! horizontal row slices. Each slice keeps its own bounded Top-K list, so
//! slices share nothing but read-only image views. The slice lists are merged
//! in a single fan-in step ordered by dissimilarity and then row-major offset,
//! which makes the result independent of how slices were scheduled.

use crate::candidate::topk::{merge_topk, Candidate, TopK};
use crate::geometry::Rect;
use crate::image::{ImageView, Raster, Rgb};
use crate::kernel::{normalize_score, patch_dissimilarity};
use crate::search::Match;
use std::ops::Range;
use std::thread;

/// Best `k` placements of `needle` in `haystack`, best first.
///
/// Uses the default partitioning (twice the available cores) and runs slices
/// in parallel when the `rayon` feature is enabled.
pub fn top_k_matches(haystack: &Raster, needle: &Raster, k: usize) -> Vec<Match> {
    top_k_matches_with(haystack, needle, k, true, 0)
}

/// Best `k` placements with explicit scheduling.
///
/// `workers == 0` selects twice the available cores. Results depend only on
/// `workers`, never on `parallel`.
pub fn top_k_matches_with(
    haystack: &Raster,
    needle: &Raster,
    k: usize,
    parallel: bool,
    workers: usize,
) -> Vec<Match> {
    scan_top_k(haystack.view(), needle.view(), k, parallel, workers)
}

pub(crate) fn scan_top_k(
    haystack: ImageView<'_, Rgb>,
    needle: ImageView<'_, Rgb>,
    k: usize,
    parallel: bool,
    workers: usize,
) -> Vec<Match> {
    let k = k.max(1);
    let (nw, nh) = (needle.width(), needle.height());
    if haystack.width() <= nw || haystack.height() <= nh {
        return Vec::new();
    }
    let region_w = haystack.width() - nw;
    let region_h = haystack.height() - nh;

    let slices = partition_rows(region_h, resolve_workers(workers));
    let lists = scan_slices(haystack, needle, region_w, slices, k, parallel);

    merge_topk(lists, k)
        .into_iter()
        .map(|c| Match {
            bounds: Rect::from_size(c.x, c.y, nw, nh),
            score: normalize_score(c.sad, nw, nh),
        })
        .collect()
}

fn resolve_workers(workers: usize) -> usize {
    if workers > 0 {
        return workers;
    }
    thread::available_parallelism()
        .map(|n| n.get())
        .unwrap_or(1)
        * 2
}

/// Splits `0..region_h` into at most `workers` row ranges of equal height;
/// the last range absorbs the remainder. No range is empty.
pub(crate) fn partition_rows(region_h: usize, workers: usize) -> Vec<Range<usize>> {
    if region_h == 0 {
        return Vec::new();
    }
    let workers = workers.clamp(1, region_h);
    let slice_h = region_h / workers;
    (0..workers)
        .map(|i| {
            let start = i * slice_h;
            let end = if i + 1 == workers {
                region_h
            } else {
                start + slice_h
            };
            start..end
        })
        .collect()
}

fn scan_slice(
    haystack: ImageView<'_, Rgb>,
    needle: ImageView<'_, Rgb>,
    region_w: usize,
    rows: Range<usize>,
    k: usize,
) -> Vec<Candidate> {
    let mut topk = TopK::new(k);
    for y in rows {
        for x in 0..region_w {
            let sad = patch_dissimilarity(haystack, x, y, needle);
            topk.push(Candidate { x, y, sad });
        }
    }
    topk.into_sorted()
}

fn scan_slices_seq(
    haystack: ImageView<'_, Rgb>,
    needle: ImageView<'_, Rgb>,
    region_w: usize,
    slices: Vec<Range<usize>>,
    k: usize,
) -> Vec<Vec<Candidate>> {
    slices
        .into_iter()
        .map(|rows| scan_slice(haystack, needle, region_w, rows, k))
        .collect()
}

#[cfg(feature = "rayon")]
fn scan_slices(
    haystack: ImageView<'_, Rgb>,
    needle: ImageView<'_, Rgb>,
    region_w: usize,
    slices: Vec<Range<usize>>,
    k: usize,
    parallel: bool,
) -> Vec<Vec<Candidate>> {
    use rayon::prelude::*;

    if !parallel {
        return scan_slices_seq(haystack, needle, region_w, slices, k);
    }
    slices
        .into_par_iter()
        .map(|rows| scan_slice(haystack, needle, region_w, rows, k))
        .collect()
}

#[cfg(not(feature = "rayon"))]
fn scan_slices(
    haystack: ImageView<'_, Rgb>,
    needle: ImageView<'_, Rgb>,
    region_w: usize,
    slices: Vec<Range<usize>>,
    k: usize,
    _parallel: bool,
) -> Vec<Vec<Candidate>> {
    scan_slices_seq(haystack, needle, region_w, slices, k)
}

#[cfg(test)]
mod tests {
    use super::{partition_rows, top_k_matches, top_k_matches_with};
    use crate::geometry::Rect;
    use crate::image::Raster;

    fn gradient(width: usize, height: usize) -> Raster {
        Raster::from_fn(width, height, |x, y| {
            [(x * 7 % 256) as u8, (y * 13 % 256) as u8, ((x ^ y) * 5 % 256) as u8]
        })
        .unwrap()
    }

    #[test]
    fn partition_covers_region_without_gaps() {
        let slices = partition_rows(10, 4);
        assert_eq!(slices, vec![0..2, 2..4, 4..6, 6..10]);
        assert_eq!(partition_rows(3, 8), vec![0..1, 1..2, 2..3]);
        assert!(partition_rows(0, 4).is_empty());
    }

    #[test]
    fn finds_exact_crop_with_perfect_score() {
        let hay = gradient(40, 30);
        let rect = Rect::from_size(11, 6, 9, 7);
        let needle = hay.crop(rect).unwrap();
        let matches = top_k_matches(&hay, &needle, 3);
        assert_eq!(matches[0].bounds, rect);
        assert_eq!(matches[0].score, 1.0);
    }

    #[test]
    fn never_exceeds_k_or_leaves_region() {
        let hay = gradient(25, 19);
        let needle = gradient(6, 4);
        for k in [1usize, 4, 9] {
            let matches = top_k_matches_with(&hay, &needle, k, false, 3);
            assert!(matches.len() <= k);
            for m in &matches {
                assert!(m.bounds.min_x < 25 - 6);
                assert!(m.bounds.min_y < 19 - 4);
                assert!(m.score <= 1.0);
            }
        }
    }

    #[test]
    fn results_are_sorted_best_first() {
        let hay = gradient(30, 30);
        let needle = gradient(5, 5);
        let matches = top_k_matches(&hay, &needle, 8);
        assert_eq!(matches.len(), 8);
        assert!(matches.windows(2).all(|w| w[0].score >= w[1].score));
    }

    #[test]
    fn needle_that_does_not_fit_yields_nothing() {
        let hay = gradient(10, 10);
        assert!(top_k_matches(&hay, &gradient(10, 3), 3).is_empty());
        assert!(top_k_matches(&hay, &gradient(3, 12), 3).is_empty());
    }

    #[test]
    fn zero_k_returns_single_match() {
        let hay = gradient(12, 12);
        let needle = gradient(3, 3);
        assert_eq!(top_k_matches(&hay, &needle, 0).len(), 1);
    }

    #[test]
    fn scheduling_does_not_change_results() {
        let hay = gradient(48, 36);
        let needle = hay.crop(Rect::from_size(20, 9, 8, 6)).unwrap();
        let seq = top_k_matches_with(&hay, &needle, 6, false, 5);
        let par = top_k_matches_with(&hay, &needle, 6, true, 5);
        assert_eq!(seq, par);
    }
}
