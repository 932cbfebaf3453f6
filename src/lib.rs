//! findimg locates a small reference image (the needle) inside a larger one
//! (the haystack) without rotation.
//!
//! The search is approximate: both images are resampled over a scale pyramid
//! and every placement is scored by the sum of absolute RGB differences. The
//! best `k` placements of the selected pyramid step are returned in original
//! haystack coordinates, ranked by a similarity score where 1.0 means an
//! identical patch. Scans run on rayon by default (`rayon` feature).

mod candidate;
pub mod geometry;
pub mod image;
pub mod kernel;
pub mod report;
pub mod search;
mod trace;
pub mod util;
pub mod visualize;

#[cfg(feature = "image-io")]
pub use crate::image::io;

pub use crate::image::resize::resize;
pub use crate::image::{ImageView, Raster, Rgb};
pub use candidate::topk::{Candidate, TopK};
pub use geometry::Rect;
pub use kernel::{normalize_score, patch_dissimilarity, Kernel};
pub use report::{to_text, write_text};
#[cfg(feature = "serde")]
pub use report::{BoundsRecord, MatchRecord};
pub use search::{
    search, top_k_matches, top_k_matches_with, LevelTrace, Match, SearchConfig, SearchOutcome,
    SearchTrace, Searcher, SkipReason, StepOutcome, StepTrace,
};
pub use util::{FindImgError, FindImgResult};
