use midline_image::ImageError;

/// Derive the gaussian sigma from the kernel size.
///
/// Uses `0.3 * ((kernel_size - 1) * 0.5 - 1) + 0.8`, which gives `1.1` for a 5-tap
/// kernel.
///
/// # Arguments
///
/// * `kernel_size` - The size of the kernel.
pub fn sigma_from_kernel_size(kernel_size: usize) -> f32 {
    0.3 * ((kernel_size as f32 - 1.0) * 0.5 - 1.0) + 0.8
}

/// Create a gaussian blur kernel.
///
/// # Arguments
///
/// * `kernel_size` - The size of the kernel. Must be odd.
/// * `sigma` - The sigma of the gaussian kernel. Values `<= 0` derive it from the kernel
///   size with [`sigma_from_kernel_size`].
///
/// # Returns
///
/// A normalized vector of the kernel.
///
/// # Errors
///
/// Returns an error if the kernel size is zero or even.
pub fn gaussian_kernel_1d(kernel_size: usize, sigma: f32) -> Result<Vec<f32>, ImageError> {
    if kernel_size == 0 || kernel_size % 2 == 0 {
        return Err(ImageError::InvalidKernelSize(kernel_size));
    }

    let sigma = if sigma > 0.0 {
        sigma
    } else {
        sigma_from_kernel_size(kernel_size)
    };

    let mean = (kernel_size - 1) as f32 / 2.0;
    let sigma_sq = sigma * sigma;

    // compute the kernel
    let mut kernel = (0..kernel_size)
        .map(|i| {
            let x = i as f32 - mean;
            (-(x * x) / (2.0 * sigma_sq)).exp()
        })
        .collect::<Vec<_>>();

    // normalize the kernel
    let norm = kernel.iter().sum::<f32>();
    kernel.iter_mut().for_each(|k| *k /= norm);

    Ok(kernel)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sigma_from_kernel_size() {
        approx::assert_relative_eq!(sigma_from_kernel_size(5), 1.1, epsilon = 1e-6);
        approx::assert_relative_eq!(sigma_from_kernel_size(3), 0.8, epsilon = 1e-6);
    }

    #[test]
    fn test_gaussian_kernel_1d() -> Result<(), ImageError> {
        let kernel = gaussian_kernel_1d(5, 0.5)?;

        let expected = [
            0.00026386508,
            0.10645077,
            0.78657067,
            0.10645077,
            0.00026386508,
        ];

        for (k, e) in kernel.iter().zip(expected.iter()) {
            approx::assert_relative_eq!(k, e, epsilon = 1e-6);
        }

        Ok(())
    }

    #[test]
    fn test_gaussian_kernel_1d_symmetric_and_normalized() -> Result<(), ImageError> {
        let kernel = gaussian_kernel_1d(5, 0.0)?;
        approx::assert_relative_eq!(kernel.iter().sum::<f32>(), 1.0, epsilon = 1e-6);
        approx::assert_relative_eq!(kernel[0], kernel[4]);
        approx::assert_relative_eq!(kernel[1], kernel[3]);
        assert!(kernel[2] > kernel[1]);
        Ok(())
    }

    #[test]
    fn test_gaussian_kernel_1d_even_size() {
        assert_eq!(
            gaussian_kernel_1d(4, 1.0),
            Err(ImageError::InvalidKernelSize(4))
        );
        assert_eq!(
            gaussian_kernel_1d(0, 1.0),
            Err(ImageError::InvalidKernelSize(0))
        );
    }
}
