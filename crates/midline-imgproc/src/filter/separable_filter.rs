use midline_image::{Image, ImageError};

/// Map an index outside `[0, len)` back into range by mirroring around the border
/// pixel without repeating it (`gfedcb|abcdefgh|gfedcba`).
#[inline]
fn reflect_101(idx: isize, len: usize) -> usize {
    let len = len as isize;
    if len == 1 {
        return 0;
    }

    let mut i = idx;
    while i < 0 || i >= len {
        if i < 0 {
            i = -i;
        }
        if i >= len {
            i = 2 * len - 2 - i;
        }
    }
    i as usize
}

/// Apply a separable filter to an image.
///
/// The horizontal kernel is applied first into a temporary buffer and the vertical kernel
/// second. Out of bounds taps are resolved with a reflect-101 border.
///
/// # Arguments
///
/// * `src` - The source image with shape (H, W, C).
/// * `dst` - The destination image with shape (H, W, C).
/// * `kernel_x` - The horizontal kernel.
/// * `kernel_y` - The vertical kernel.
///
/// PRECONDITION: `src` and `dst` must have the same shape.
pub fn separable_filter<const C: usize>(
    src: &Image<f32, C>,
    dst: &mut Image<f32, C>,
    kernel_x: &[f32],
    kernel_y: &[f32],
) -> Result<(), ImageError> {
    if src.size() != dst.size() {
        return Err(ImageError::InvalidImageSize(
            src.cols(),
            src.rows(),
            dst.cols(),
            dst.rows(),
        ));
    }

    if src.is_empty() {
        return Ok(());
    }

    let rows = src.rows();
    let cols = src.cols();
    let half_x = (kernel_x.len() / 2) as isize;
    let half_y = (kernel_y.len() / 2) as isize;

    let src_data = src.as_slice();
    let mut temp = vec![0.0f32; src_data.len()];

    // horizontal pass
    for r in 0..rows {
        let row_offset = r * cols * C;
        for c in 0..cols {
            let mut acc = [0.0f32; C];
            for (i, &k) in kernel_x.iter().enumerate() {
                let x = reflect_101(c as isize + i as isize - half_x, cols);
                let idx = row_offset + x * C;
                for (ch, acc_val) in acc.iter_mut().enumerate() {
                    *acc_val += src_data[idx + ch] * k;
                }
            }
            let out_idx = row_offset + c * C;
            temp[out_idx..out_idx + C].copy_from_slice(&acc);
        }
    }

    // vertical pass
    let dst_data = dst.as_slice_mut();
    for r in 0..rows {
        for c in 0..cols {
            let mut acc = [0.0f32; C];
            for (i, &k) in kernel_y.iter().enumerate() {
                let y = reflect_101(r as isize + i as isize - half_y, rows);
                let idx = (y * cols + c) * C;
                for (ch, acc_val) in acc.iter_mut().enumerate() {
                    *acc_val += temp[idx + ch] * k;
                }
            }
            let out_idx = (r * cols + c) * C;
            dst_data[out_idx..out_idx + C].copy_from_slice(&acc);
        }
    }

    Ok(())
}
