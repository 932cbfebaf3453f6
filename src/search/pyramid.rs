//! Scale-pyramid controller and its trace records.

use crate::image::resize::resize;
use crate::image::Raster;
use crate::search::scan::scan_top_k;
use crate::search::{Match, SearchConfig};
use crate::trace::{trace_event, trace_span};
use crate::util::FindImgResult;
use std::iter::successors;

/// Why a pyramid step was not scanned.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SkipReason {
    /// The needle area dropped below `sub_min_area`.
    NeedleTooSmall,
    /// The needle is as wide or as tall as the resized haystack.
    NeedleTooLarge,
    /// The scan returned no candidates.
    NoMatches,
}

impl SkipReason {
    pub fn as_str(&self) -> &'static str {
        match self {
            SkipReason::NeedleTooSmall => "needle too small",
            SkipReason::NeedleTooLarge => "needle too large",
            SkipReason::NoMatches => "no matches",
        }
    }
}

/// Result of one (haystack width, divisor) step.
#[derive(Clone, Debug, PartialEq)]
pub enum StepOutcome {
    /// The step was scanned; `matches` are in original haystack coordinates.
    Scored { top_score: f64, matches: Vec<Match> },
    /// The step ended the inner loop without a scan result.
    Skipped(SkipReason),
}

/// One needle divisor evaluated at one haystack width.
#[derive(Clone, Debug, PartialEq)]
pub struct StepTrace {
    pub divisor: usize,
    pub needle_width: usize,
    pub needle_height: usize,
    pub outcome: StepOutcome,
}

/// All steps evaluated at one haystack width.
#[derive(Clone, Debug, PartialEq)]
pub struct LevelTrace {
    /// Resized haystack width.
    pub width: usize,
    /// Resized haystack height.
    pub height: usize,
    /// `width / original_width`.
    pub scale: f64,
    pub steps: Vec<StepTrace>,
    /// Index into `steps` of the step chosen by the early stop, if it fired
    /// at this level.
    pub selected: Option<usize>,
}

/// Record of a whole search.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct SearchTrace {
    pub levels: Vec<LevelTrace>,
    /// True if the search ended on a score drop rather than by exhausting
    /// the pyramid.
    pub stopped_early: bool,
}

/// Final matches together with the trace that produced them.
#[derive(Clone, Debug, PartialEq)]
pub struct SearchOutcome {
    pub matches: Vec<Match>,
    pub trace: SearchTrace,
}

/// Needle size at `divisor` for a haystack resized by `img_scale`.
fn needle_size(needle: &Raster, divisor: usize, img_scale: f64) -> (usize, usize) {
    let div_scale = 1.0 / divisor as f64;
    let w = (needle.width() as f64 * div_scale * img_scale) as usize;
    let h = (needle.height() as f64 * div_scale * img_scale) as usize;
    (w, h)
}

/// Runs the pyramid with an already resolved config.
pub(crate) fn run(
    haystack: &Raster,
    needle: &Raster,
    cfg: &SearchConfig,
) -> FindImgResult<SearchOutcome> {
    let _span = trace_span!(
        "search",
        haystack_width = haystack.width(),
        haystack_height = haystack.height(),
        needle_width = needle.width(),
        needle_height = needle.height()
    )
    .entered();

    let mut trace = SearchTrace::default();
    let mut matches: Vec<Match> = Vec::new();

    let widths = successors(Some(cfg.img_min_width), |w| w.checked_mul(2))
        .take_while(|&w| w <= cfg.img_max_width);

    'levels: for width in widths {
        let img = resize(haystack, width, 0)?;
        let height = img.height();
        let img_scale = width as f64 / haystack.width() as f64;
        let _level_span = trace_span!("pyramid_level", width = width, height = height).entered();

        let mut level = LevelTrace {
            width,
            height,
            scale: img_scale,
            steps: Vec::new(),
            selected: None,
        };
        let mut last_top_score = 0.0f64;

        let divisors =
            successors(Some(1usize), |d| d.checked_mul(2)).take_while(|&d| d <= cfg.sub_max_div);
        for divisor in divisors {
            let (sw, sh) = needle_size(needle, divisor, img_scale);
            let step = |outcome| StepTrace {
                divisor,
                needle_width: sw,
                needle_height: sh,
                outcome,
            };

            let skip = if sw * sh < cfg.sub_min_area {
                Some(SkipReason::NeedleTooSmall)
            } else if sw >= width || sh >= height {
                Some(SkipReason::NeedleTooLarge)
            } else {
                None
            };
            if let Some(reason) = skip {
                trace_event!(
                    "step_skipped",
                    divisor = divisor,
                    needle_width = sw,
                    needle_height = sh,
                    reason = reason.as_str()
                );
                level.steps.push(step(StepOutcome::Skipped(reason)));
                break;
            }

            let sub = resize(needle, sw, sh)?;
            let div_matches = scan_top_k(img.view(), sub.view(), cfg.k, cfg.parallel, cfg.workers);
            let Some(top_score) = div_matches.first().map(|m| m.score) else {
                trace_event!("step_skipped", divisor = divisor, reason = "no matches");
                level.steps.push(step(StepOutcome::Skipped(SkipReason::NoMatches)));
                break;
            };
            trace_event!(
                "step_scored",
                divisor = divisor,
                needle_width = sw,
                needle_height = sh,
                top_score = top_score
            );

            let scaled: Vec<Match> = div_matches.iter().map(|m| m.scale(1.0 / img_scale)).collect();
            level.steps.push(step(StepOutcome::Scored {
                top_score,
                matches: scaled.clone(),
            }));

            if top_score < last_top_score {
                level.selected = level.steps.len().checked_sub(2);
                trace_event!(
                    "early_stop",
                    width = width,
                    divisor = divisor,
                    top_score = top_score,
                    previous_score = last_top_score
                );
                trace.levels.push(level);
                trace.stopped_early = true;
                break 'levels;
            }
            last_top_score = top_score;
            matches = scaled;
        }

        trace.levels.push(level);
    }

    trace_event!("search_done", matches = matches.len(), levels = trace.levels.len());
    Ok(SearchOutcome { matches, trace })
}
