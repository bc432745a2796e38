use midline_image::{Image, ImageError};
use midline_imgproc::{color, filter, threshold};

use crate::config::MidlineConfig;

/// Binarize an RGB image for line detection.
///
/// The image is converted to grayscale, smoothed with a gaussian kernel and split with
/// Otsu's threshold. Foreground pixels take `config.binary_max_value`, the rest are 0.
///
/// # Arguments
///
/// * `src` - The input RGB image.
/// * `config` - The pipeline configuration.
///
/// # Returns
///
/// The binary image, with the same size as `src`.
///
/// # Errors
///
/// Returns an error if the image is empty or the blur kernel size is not odd.
pub fn binarize(src: &Image<u8, 3>, config: &MidlineConfig) -> Result<Image<u8, 1>, ImageError> {
    let mut gray = Image::<u8, 1>::from_size_val(src.size(), 0)?;
    color::gray_from_rgb_u8(src, &mut gray)?;

    let mut blurred = Image::<u8, 1>::from_size_val(src.size(), 0)?;
    let k = config.blur_kernel_size;
    filter::gaussian_blur_u8(
        &gray,
        &mut blurred,
        (k, k),
        (config.blur_sigma, config.blur_sigma),
    )?;

    let mut binary = Image::<u8, 1>::from_size_val(src.size(), 0)?;
    let level = threshold::otsu_threshold(&blurred, &mut binary, config.binary_max_value)?;

    log::debug!("otsu threshold: {level}");

    Ok(binary)
}
