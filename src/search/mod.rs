//! Multiscale needle search.
//!
//! The search walks a scale pyramid: the haystack is resampled to widths that
//! double from `img_min_width` up to `img_max_width`, and at each width the
//! needle is resampled to its expected size divided by 1, 2, 4, ... up to
//! `sub_max_div`. Every (width, divisor) pair is scanned exhaustively by the
//! per-scale matcher in `scan`. Within one haystack width the search stops as
//! soon as the best score drops compared to the previous divisor, and the
//! previous divisor's matches become the answer.

use crate::geometry::Rect;
use crate::image::Raster;
use crate::util::{FindImgError, FindImgResult};

pub(crate) mod pyramid;
pub(crate) mod scan;

pub use pyramid::{LevelTrace, SearchOutcome, SearchTrace, SkipReason, StepOutcome, StepTrace};
pub use scan::{top_k_matches, top_k_matches_with};

/// A located needle: its bounds in haystack pixels and a similarity score.
///
/// The score is `1 - sad / (w * h * 255 * 3)`, so 1.0 means identical pixels.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(into = "crate::report::MatchRecord", from = "crate::report::MatchRecord")
)]
pub struct Match {
    /// Bounds of the matched patch.
    pub bounds: Rect,
    /// Similarity score, at most 1.0.
    pub score: f64,
}

impl Match {
    /// Scales the bounds by `factor`; the score is unchanged.
    pub fn scale(&self, factor: f64) -> Match {
        Match {
            bounds: self.bounds.scale(factor),
            score: self.score,
        }
    }
}

/// Search configuration.
///
/// Zero-valued numeric fields fall back to the defaults below, so a config
/// built from unset command-line options behaves like `SearchConfig::default()`.
#[derive(Clone, Debug, PartialEq)]
pub struct SearchConfig {
    /// Smallest haystack width of the pyramid.
    pub img_min_width: usize,
    /// Largest haystack width; clamped to the haystack's own width.
    pub img_max_width: usize,
    /// Smallest needle area (pixels) worth scanning.
    pub sub_min_area: usize,
    /// Largest needle divisor.
    pub sub_max_div: usize,
    /// Matches kept per scan.
    pub k: usize,
    /// Scan row slices on the rayon pool (needs the `rayon` feature).
    pub parallel: bool,
    /// Row slices per scan; 0 means twice the available cores.
    pub workers: usize,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            img_min_width: 8,
            img_max_width: 256,
            sub_min_area: 25,
            sub_max_div: 64,
            k: 6,
            parallel: true,
            workers: 0,
        }
    }
}

impl SearchConfig {
    /// Replaces zero fields with defaults and clamps the maximum width to the
    /// haystack width.
    pub fn resolved(&self, haystack_width: usize) -> SearchConfig {
        let defaults = SearchConfig::default();
        let or_default = |value: usize, default: usize| if value == 0 { default } else { value };
        SearchConfig {
            img_min_width: or_default(self.img_min_width, defaults.img_min_width),
            img_max_width: or_default(self.img_max_width, defaults.img_max_width)
                .min(haystack_width),
            sub_min_area: or_default(self.sub_min_area, defaults.sub_min_area),
            sub_max_div: or_default(self.sub_max_div, defaults.sub_max_div),
            k: or_default(self.k, defaults.k),
            parallel: self.parallel,
            workers: self.workers,
        }
    }
}

/// Multiscale needle finder.
#[derive(Clone, Debug, Default)]
pub struct Searcher {
    cfg: SearchConfig,
}

impl Searcher {
    /// Creates a searcher with the default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the configuration.
    pub fn with_config(mut self, cfg: SearchConfig) -> Self {
        self.cfg = cfg;
        self
    }

    /// Returns the configuration as given (before defaulting).
    pub fn config(&self) -> &SearchConfig {
        &self.cfg
    }

    /// Returns the matches of the selected pyramid step, best first, in
    /// haystack pixel coordinates. An empty vector means the needle did not
    /// fit at any scale.
    pub fn search(&self, haystack: &Raster, needle: &Raster) -> FindImgResult<Vec<Match>> {
        Ok(self.search_traced(haystack, needle)?.matches)
    }

    /// Like [`Searcher::search`], also returning a record of every pyramid
    /// step that was evaluated.
    pub fn search_traced(&self, haystack: &Raster, needle: &Raster) -> FindImgResult<SearchOutcome> {
        for raster in [haystack, needle] {
            if raster.width() == 0 || raster.height() == 0 {
                return Err(FindImgError::InvalidDimensions {
                    width: raster.width(),
                    height: raster.height(),
                });
            }
        }
        let cfg = self.cfg.resolved(haystack.width());
        pyramid::run(haystack, needle, &cfg)
    }
}

/// Searches `haystack` for `needle` with `config`.
pub fn search(haystack: &Raster, needle: &Raster, config: &SearchConfig) -> FindImgResult<Vec<Match>> {
    Searcher::new()
        .with_config(config.clone())
        .search(haystack, needle)
}
