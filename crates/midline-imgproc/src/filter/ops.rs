use midline_image::{Image, ImageError};

use super::{kernels, separable_filter};

/// Blur an image using a gaussian blur filter
///
/// # Arguments
///
/// * `src` - The source image with shape (H, W, C).
/// * `dst` - The destination image with shape (H, W, C).
/// * `kernel_size` - The size of the kernel (kernel_x, kernel_y).
/// * `sigma` - The sigma of the gaussian kernel, `<= 0` to derive it from the kernel size.
///
/// PRECONDITION: `src` and `dst` must have the same shape.
pub fn gaussian_blur<const C: usize>(
    src: &Image<f32, C>,
    dst: &mut Image<f32, C>,
    kernel_size: (usize, usize),
    sigma: (f32, f32),
) -> Result<(), ImageError> {
    let kernel_x = kernels::gaussian_kernel_1d(kernel_size.0, sigma.0)?;
    let kernel_y = kernels::gaussian_kernel_1d(kernel_size.1, sigma.1)?;
    separable_filter(src, dst, &kernel_x, &kernel_y)?;
    Ok(())
}

/// Blur an 8-bit image using a gaussian blur filter.
///
/// The filter runs in floating point and the result is rounded and saturated back to
/// `u8`.
///
/// # Arguments
///
/// * `src` - The source image with shape (H, W, C).
/// * `dst` - The destination image with shape (H, W, C).
/// * `kernel_size` - The size of the kernel (kernel_x, kernel_y).
/// * `sigma` - The sigma of the gaussian kernel, `<= 0` to derive it from the kernel size.
///
/// # Example
///
/// ```
/// use midline_image::{Image, ImageSize};
/// use midline_imgproc::filter::gaussian_blur_u8;
///
/// let image = Image::<u8, 1>::from_size_val(ImageSize { width: 8, height: 8 }, 100).unwrap();
/// let mut blurred = Image::<u8, 1>::from_size_val(image.size(), 0).unwrap();
///
/// gaussian_blur_u8(&image, &mut blurred, (5, 5), (0.0, 0.0)).unwrap();
/// assert!(blurred.as_slice().iter().all(|&v| v == 100));
/// ```
pub fn gaussian_blur_u8<const C: usize>(
    src: &Image<u8, C>,
    dst: &mut Image<u8, C>,
    kernel_size: (usize, usize),
    sigma: (f32, f32),
) -> Result<(), ImageError> {
    if src.size() != dst.size() {
        return Err(ImageError::InvalidImageSize(
            src.cols(),
            src.rows(),
            dst.cols(),
            dst.rows(),
        ));
    }

    let src_f32 = src.cast_and_scale::<f32>(1.0)?;
    let mut dst_f32 = Image::<f32, C>::from_size_val(src.size(), 0.0)?;
    gaussian_blur(&src_f32, &mut dst_f32, kernel_size, sigma)?;

    dst.as_slice_mut()
        .iter_mut()
        .zip(dst_f32.as_slice())
        .for_each(|(out, &v)| *out = v.round().clamp(0.0, 255.0) as u8);

    Ok(())
}
