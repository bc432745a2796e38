/// An error type for the image module.
#[derive(thiserror::Error, Debug, PartialEq)]
pub enum ImageError {
    /// Error when channel and shape are not valid.
    #[error("Data length ({0}) does not match the image size ({1})")]
    InvalidChannelShape(usize, usize),

    /// Error when two images that must match in size do not.
    #[error("Image size ({0}x{1}) does not match the expected size ({2}x{3})")]
    InvalidImageSize(usize, usize, usize, usize),

    /// Error when the pixel coordinates are out of bounds.
    #[error("Pixel ({0}, {1}) is out of bounds for an image of size {2}x{3}")]
    PixelIndexOutOfBounds(usize, usize, usize, usize),

    /// Error when the channel index is out of bounds.
    #[error("Channel index {0} is out of bounds for an image with {1} channels")]
    ChannelIndexOutOfBounds(usize, usize),

    /// Error when a pixel value cannot be cast.
    #[error("Failed to cast pixel data to {0}")]
    CastError(String),

    /// Error when the image holds no pixels.
    #[error("Image has no pixels")]
    EmptyImage,

    /// Error when the number of histogram bins is invalid.
    #[error("Invalid number of histogram bins: {0}")]
    InvalidHistogramBins(usize),

    /// Error when a filter kernel size is invalid.
    #[error("Invalid kernel size {0}, expected an odd number greater than zero")]
    InvalidKernelSize(usize),

    /// Error when a line detector parameter is out of range.
    #[error("Invalid hough parameter `{0}`: {1}")]
    InvalidHoughParameter(&'static str, String),
}
