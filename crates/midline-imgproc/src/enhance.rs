use midline_image::{Image, ImageError};

use crate::parallel;

fn check_sizes<T1, T2, T3, const C: usize>(
    src1: &Image<T1, C>,
    src2: &Image<T2, C>,
    dst: &Image<T3, C>,
) -> Result<(), ImageError> {
    if src1.size() != src2.size() {
        return Err(ImageError::InvalidImageSize(
            src1.cols(),
            src1.rows(),
            src2.cols(),
            src2.rows(),
        ));
    }

    if src1.size() != dst.size() {
        return Err(ImageError::InvalidImageSize(
            src1.width(),
            src1.height(),
            dst.width(),
            dst.height(),
        ));
    }

    Ok(())
}

/// Weighted addition of two 8-bit images.
///
/// dst(x,y,c) = saturate(round(src1(x,y,c) * alpha + src2(x,y,c) * beta + gamma))
///
/// The sum is computed in `f64`, rounded half away from zero and clamped to `[0, 255]`.
///
/// # Errors
///
/// Returns an error if the sizes of `src1`, `src2` and `dst` do not match.
///
/// # Example
///
/// ```
/// use midline_image::{Image, ImageSize};
/// use midline_imgproc::enhance::add_weighted_u8;
///
/// let size = ImageSize { width: 2, height: 1 };
/// let src = Image::<u8, 1>::new(size, vec![100, 250]).unwrap();
/// let overlay = Image::<u8, 1>::new(size, vec![0, 255]).unwrap();
/// let mut dst = Image::<u8, 1>::from_size_val(size, 0).unwrap();
///
/// add_weighted_u8(&src, 0.8, &overlay, 1.0, 0.0, &mut dst).unwrap();
/// assert_eq!(dst.as_slice(), &[80, 255]);
/// ```
pub fn add_weighted_u8<const C: usize>(
    src1: &Image<u8, C>,
    alpha: f64,
    src2: &Image<u8, C>,
    beta: f64,
    gamma: f64,
    dst: &mut Image<u8, C>,
) -> Result<(), ImageError> {
    check_sizes(src1, src2, dst)?;

    parallel::par_iter_rows_val_two(src1, src2, dst, |&src1_pixel, &src2_pixel, dst_pixel| {
        let v = src1_pixel as f64 * alpha + src2_pixel as f64 * beta + gamma;
        *dst_pixel = v.round().clamp(0.0, 255.0) as u8;
    });

    Ok(())
}
