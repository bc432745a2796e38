use midline_image::ImageError;
use midline_io::IoError;

/// An error type for the midline pipeline.
#[derive(thiserror::Error, Debug)]
pub enum MidlineError {
    /// The input image could not be read or decoded.
    #[error("Failed to load the input image. {0}")]
    ImageLoadFailed(#[source] IoError),

    /// The detector did not report any line.
    #[error("No lines were detected in the image")]
    NoLinesDetected,

    /// The detector reported fewer lines than the estimator needs.
    #[error("Not enough line candidates: found {found}, required {required}")]
    InsufficientCandidates {
        /// Number of candidates reported by the detector.
        found: usize,
        /// Number of candidates needed to estimate the midline.
        required: usize,
    },

    /// The output image could not be encoded or written.
    #[error("Failed to write the output image. {0}")]
    ImageWriteFailed(#[source] IoError),

    /// An image processing stage failed.
    #[error(transparent)]
    Image(#[from] ImageError),
}
