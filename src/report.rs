//! Match serialization.
//!
//! Text output is one match per line: `score x y width height`, with the
//! score printed to six decimals. The structured form (feature `serde`)
//! serializes each match as `{"bounds": {"x", "y", "w", "h"}, "match": score}`.

use crate::search::Match;
use std::fmt;
use std::io::{self, Write};

impl fmt::Display for Match {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:.6} {:4} {:4} {:4} {:4}",
            self.score,
            self.bounds.min_x,
            self.bounds.min_y,
            self.bounds.width(),
            self.bounds.height()
        )
    }
}

/// Writes matches as text lines.
pub fn write_text<W: Write>(mut out: W, matches: &[Match]) -> io::Result<()> {
    for m in matches {
        writeln!(out, "{m}")?;
    }
    Ok(())
}

/// Formats matches as text lines.
pub fn to_text(matches: &[Match]) -> String {
    matches.iter().map(|m| format!("{m}\n")).collect()
}

#[cfg(feature = "serde")]
pub use record::{BoundsRecord, MatchRecord};

#[cfg(feature = "serde")]
mod record {
    use crate::geometry::Rect;
    use crate::search::Match;
    use serde::{Deserialize, Serialize};

    /// Position and size of a match.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
    pub struct BoundsRecord {
        pub x: usize,
        pub y: usize,
        pub w: usize,
        pub h: usize,
    }

    /// Structured form of a [`Match`].
    #[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
    pub struct MatchRecord {
        pub bounds: BoundsRecord,
        #[serde(rename = "match")]
        pub score: f64,
    }

    impl From<Match> for MatchRecord {
        fn from(value: Match) -> Self {
            Self {
                bounds: BoundsRecord {
                    x: value.bounds.min_x,
                    y: value.bounds.min_y,
                    w: value.bounds.width(),
                    h: value.bounds.height(),
                },
                score: value.score,
            }
        }
    }

    impl From<MatchRecord> for Match {
        fn from(value: MatchRecord) -> Self {
            let b = value.bounds;
            Match {
                bounds: Rect::from_size(b.x, b.y, b.w, b.h),
                score: value.score,
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{to_text, write_text};
    use crate::geometry::Rect;
    use crate::search::Match;

    fn sample() -> Vec<Match> {
        vec![
            Match {
                bounds: Rect::new(66, 287, 121, 327),
                score: 0.9876543,
            },
            Match {
                bounds: Rect::from_size(1, 2, 3, 4),
                score: 0.5,
            },
        ]
    }

    #[test]
    fn text_lines_use_width_and_height() {
        assert_eq!(
            to_text(&sample()),
            "0.987654   66  287   55   40\n0.500000    1    2    3    4\n"
        );
    }

    #[test]
    fn write_text_matches_to_text() {
        let mut buf = Vec::new();
        write_text(&mut buf, &sample()).unwrap();
        assert_eq!(String::from_utf8(buf).unwrap(), to_text(&sample()));
    }
}
