use midline_imgproc::hough::{LineCandidate, LineSegment};

use crate::error::MidlineError;

/// Number of candidates averaged into the midline.
const NUM_AVERAGED: usize = 2;

/// A line segment with continuous endpoints.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Midline {
    /// x-coordinate of the first endpoint.
    pub x1: f64,
    /// y-coordinate of the first endpoint.
    pub y1: f64,
    /// x-coordinate of the second endpoint.
    pub x2: f64,
    /// y-coordinate of the second endpoint.
    pub y2: f64,
}

impl Midline {
    /// Round the endpoints to pixel coordinates, halves away from zero.
    ///
    /// # Example
    ///
    /// ```
    /// use midline::Midline;
    ///
    /// let m = Midline { x1: 2.5, y1: -2.5, x2: 7.4, y2: 7.6 };
    /// let p = m.to_pixels();
    /// assert_eq!((p.x1, p.y1, p.x2, p.y2), (3, -3, 7, 8));
    /// ```
    pub fn to_pixels(&self) -> LineSegment {
        LineSegment::new(
            self.x1.round() as i32,
            self.y1.round() as i32,
            self.x2.round() as i32,
            self.y2.round() as i32,
        )
    }
}

impl std::fmt::Display for Midline {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(
            f,
            "({}, {}) -> ({}, {})",
            self.x1, self.y1, self.x2, self.y2
        )
    }
}

/// Average the two highest ranked candidates into a midline.
///
/// The candidates are taken by position, so `candidates` must already be ranked. Each
/// endpoint coordinate is averaged independently; entries after the second are ignored.
///
/// # Errors
///
/// Returns [`MidlineError::NoLinesDetected`] for an empty list and
/// [`MidlineError::InsufficientCandidates`] when only one candidate is available.
pub fn estimate_midline(candidates: &[LineCandidate]) -> Result<Midline, MidlineError> {
    let top = match candidates {
        [] => return Err(MidlineError::NoLinesDetected),
        [_] => {
            return Err(MidlineError::InsufficientCandidates {
                found: 1,
                required: NUM_AVERAGED,
            })
        }
        [a, b, ..] => [a.segment, b.segment],
    };

    let n = NUM_AVERAGED as f64;
    let mean = |f: fn(&LineSegment) -> i32| top.iter().map(|s| f(s) as f64).sum::<f64>() / n;

    let midline = Midline {
        x1: mean(|s| s.x1),
        y1: mean(|s| s.y1),
        x2: mean(|s| s.x2),
        y2: mean(|s| s.y2),
    };

    log::debug!("midline estimated from {} candidates: {midline}", candidates.len());

    Ok(midline)
}
