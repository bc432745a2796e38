use midline_image::{Image, ImageError};
use midline_imgproc::hough::{self, LineCandidate};

use crate::config::MidlineConfig;

/// Detect the line segments of a binary image.
///
/// Runs the probabilistic hough transform with the parameters of `config`. When no
/// minimum line length is configured, half of the smaller image side is used.
///
/// # Returns
///
/// The candidates ranked by accumulator votes, highest first.
pub fn detect_lines(
    binary: &Image<u8, 1>,
    config: &MidlineConfig,
) -> Result<Vec<LineCandidate>, ImageError> {
    let params = config.hough_params(binary.size());
    let candidates = hough::hough_lines_probabilistic(binary, &params)?;

    log::debug!(
        "detected {} line candidates (min length {})",
        candidates.len(),
        params.min_line_length
    );

    Ok(candidates)
}
