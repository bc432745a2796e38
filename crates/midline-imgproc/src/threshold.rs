use num_traits::Zero;
use std::cmp::PartialOrd;

use midline_image::{Image, ImageError};

use crate::{histogram, parallel};

/// Apply a binary threshold to an image.
///
/// # Arguments
///
/// * `src` - The input image of an arbitrary number of channels and type.
/// * `dst` - The output image of an arbitrary number of channels and type.
/// * `threshold` - The threshold value. Must be the same type as the image.
/// * `max_value` - The maximum value to use when the input value is greater than the threshold.
///
/// # Examples
///
/// ```
/// use midline_image::{Image, ImageSize};
/// use midline_imgproc::threshold::threshold_binary;
///
/// let data = vec![100u8, 200, 50, 150, 200, 250];
/// let image = Image::<_, 1>::new(ImageSize { width: 2, height: 3 }, data).unwrap();
///
/// let mut thresholded = Image::<_, 1>::from_size_val(image.size(), 0).unwrap();
///
/// threshold_binary(&image, &mut thresholded, 100, 255).unwrap();
/// assert_eq!(thresholded.as_slice(), &[0, 255, 0, 255, 255, 255]);
/// ```
pub fn threshold_binary<T, const C: usize>(
    src: &Image<T, C>,
    dst: &mut Image<T, C>,
    threshold: T,
    max_value: T,
) -> Result<(), ImageError>
where
    T: Copy + Send + Sync + PartialOrd + Zero,
{
    if src.size() != dst.size() {
        return Err(ImageError::InvalidImageSize(
            src.cols(),
            src.rows(),
            dst.cols(),
            dst.rows(),
        ));
    }

    // run the thresholding operation in parallel
    parallel::par_iter_rows_val(src, dst, |src_pixel, dst_pixel| {
        *dst_pixel = if *src_pixel > threshold {
            max_value
        } else {
            T::zero()
        };
    });

    Ok(())
}

/// Select the global threshold that maximises the between-class variance of the
/// intensity histogram (Otsu's method).
///
/// Pixels `<= threshold` form the background class. Ties keep the lowest threshold.
///
/// # Errors
///
/// Returns an error if the image is empty.
pub fn otsu_level(src: &Image<u8, 1>) -> Result<u8, ImageError> {
    if src.is_empty() {
        return Err(ImageError::EmptyImage);
    }

    const BINS: usize = 256;
    let mut hist = vec![0usize; BINS];
    histogram::compute_histogram(src, &mut hist, BINS)?;

    let total_pixels = src.as_slice().len() as f64;
    let sum_total = hist
        .iter()
        .enumerate()
        .map(|(i, &count)| i as f64 * count as f64)
        .sum::<f64>();

    let mut best_variance = 0.0;
    let mut best_threshold = 0u8;

    let mut weight_back = 0.0;
    let mut sum_back = 0.0;

    for (current_threshold, &hist_count) in hist.iter().enumerate() {
        weight_back += hist_count as f64;
        sum_back += current_threshold as f64 * hist_count as f64;

        // skip empty classes
        if weight_back == 0.0 || weight_back == total_pixels {
            continue;
        }

        let weight_fore = total_pixels - weight_back;
        let mean_back = sum_back / weight_back;
        let mean_fore = (sum_total - sum_back) / weight_fore;

        let variance = weight_back * weight_fore * (mean_back - mean_fore).powi(2);

        if variance > best_variance {
            best_variance = variance;
            best_threshold = current_threshold as u8;
        }
    }

    Ok(best_threshold)
}

/// Apply Otsu's thresholding to an image.
///
/// Pixels above the selected level take `max_value`, the rest are set to 0.
///
/// # Arguments
///
/// * `src` - The input grayscale image.
/// * `dst` - The output grayscale image.
/// * `max_value` - The value assigned to the pixels above the threshold.
///
/// # Returns
///
/// The threshold selected for the image.
///
/// # Examples
///
/// ```
/// use midline_image::{Image, ImageSize};
/// use midline_imgproc::threshold::otsu_threshold;
///
/// let data = vec![100u8, 200, 50, 150, 200, 250];
/// let image = Image::<_, 1>::new(ImageSize { width: 2, height: 3 }, data).unwrap();
///
/// let mut thresholded = Image::<_, 1>::from_size_val(image.size(), 0).unwrap();
///
/// let level = otsu_threshold(&image, &mut thresholded, 255).unwrap();
///
/// assert_eq!(level, 100);
/// assert_eq!(thresholded.as_slice(), [0, 255, 0, 255, 255, 255]);
/// ```
pub fn otsu_threshold(
    src: &Image<u8, 1>,
    dst: &mut Image<u8, 1>,
    max_value: u8,
) -> Result<u8, ImageError> {
    if src.size() != dst.size() {
        return Err(ImageError::InvalidImageSize(
            src.cols(),
            src.rows(),
            dst.cols(),
            dst.rows(),
        ));
    }

    let level = otsu_level(src)?;

    threshold_binary(src, dst, level, max_value)?;

    Ok(level)
}

#[cfg(test)]
mod tests {
    use midline_image::{Image, ImageError, ImageSize};

    #[test]
    fn threshold_binary() -> Result<(), ImageError> {
        let data = vec![100u8, 200, 50, 150, 200, 250];
        let data_expected = [0u8, 255, 0, 255, 255, 255];
        let image = Image::<_, 1>::new(
            ImageSize {
                width: 2,
                height: 3,
            },
            data,
        )?;

        let mut thresholded = Image::<_, 1>::from_size_val(image.size(), 0)?;

        super::threshold_binary(&image, &mut thresholded, 100, 255)?;

        assert_eq!(thresholded.num_channels(), 1);
        assert_eq!(thresholded.size().width, 2);
        assert_eq!(thresholded.size().height, 3);

        assert_eq!(thresholded.as_slice(), data_expected);

        Ok(())
    }

    #[test]
    fn test_otsu_threshold() -> Result<(), ImageError> {
        let data = vec![100u8, 200, 50, 150, 200, 250];
        let data_expected = [0u8, 255, 0, 255, 255, 255];
        let image = Image::<_, 1>::new(
            ImageSize {
                width: 2,
                height: 3,
            },
            data,
        )?;

        let mut thresholded = Image::<_, 1>::from_size_val(image.size(), 0)?;

        let level =
            super::otsu_threshold(&image, &mut thresholded, 255)?;

        assert_eq!(level, 100);
        assert_eq!(thresholded.as_slice(), data_expected);
        Ok(())
    }

    #[test]
    fn test_otsu_threshold_two_levels() -> Result<(), ImageError> {
        // bimodal: dark background with a bright band
        let mut data = vec![20u8; 10 * 10];
        data.iter_mut().skip(40).take(20).for_each(|v| *v = 220);
        let image = Image::<_, 1>::new(
            ImageSize {
                width: 10,
                height: 10,
            },
            data,
        )?;

        let mut thresholded = Image::<_, 1>::from_size_val(image.size(), 0)?;
        let level =
            super::otsu_threshold(&image, &mut thresholded, 192)?;

        assert!((20..220).contains(&level));
        assert!(thresholded.as_slice().iter().all(|&v| v == 0 || v == 192));
        assert_eq!(thresholded.as_slice().iter().filter(|&&v| v == 192).count(), 20);
        Ok(())
    }

    #[test]
    fn test_otsu_threshold_empty() -> Result<(), ImageError> {
        let image = Image::<u8, 1>::new(
            ImageSize {
                width: 0,
                height: 0,
            },
            vec![],
        )?;
        let mut thresholded = image.clone();
        assert_eq!(
            super::otsu_threshold(&image, &mut thresholded, 255),
            Err(ImageError::EmptyImage)
        );
        Ok(())
    }
}
