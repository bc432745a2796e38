use midline_image::Image;

/// Set a pixel's color, ignoring coordinates outside the image.
#[inline]
fn set_pixel<const C: usize>(img: &mut Image<u8, C>, x: i64, y: i64, color: [u8; C]) {
    if x >= 0 && x < img.cols() as i64 && y >= 0 && y < img.rows() as i64 {
        let start = (y as usize * img.cols() + x as usize) * C;
        img.as_slice_mut()[start..start + C].copy_from_slice(&color);
    }
}

/// Fill a disc of the given radius centered at `(cx, cy)`.
fn fill_disc<const C: usize>(img: &mut Image<u8, C>, cx: i64, cy: i64, radius: i64, color: [u8; C]) {
    let r2 = radius * radius;
    for dy in -radius..=radius {
        for dx in -radius..=radius {
            if dx * dx + dy * dy <= r2 {
                set_pixel(img, cx + dx, cy + dy, color);
            }
        }
    }
}

/// Draws a line on an image inplace using Bresenham's line algorithm.
///
/// Lines thicker than one pixel are drawn with round caps: a disc of diameter
/// `thickness` is stamped at every point of the line. Pixels outside the image are
/// clipped.
///
/// # Arguments
///
/// * `img` - The image to draw on.
/// * `p0` - The start point of the line as a tuple of (x, y).
/// * `p1` - The end point of the line as a tuple of (x, y).
/// * `color` - The color of the line as an array of `C` elements.
/// * `thickness` - The thickness of the line in pixels. Zero draws nothing.
///
/// # Example
///
/// ```
/// use midline_image::{Image, ImageSize};
/// use midline_imgproc::draw::draw_line;
///
/// let mut img = Image::<u8, 3>::from_size_val(ImageSize { width: 9, height: 9 }, 0).unwrap();
/// draw_line(&mut img, (0, 4), (8, 4), [255, 0, 0], 3);
///
/// assert_eq!(img.get_pixel(4, 3, 0).unwrap(), &255);
/// assert_eq!(img.get_pixel(4, 0, 0).unwrap(), &0);
/// ```
pub fn draw_line<const C: usize>(
    img: &mut Image<u8, C>,
    p0: (i64, i64),
    p1: (i64, i64),
    color: [u8; C],
    thickness: usize,
) {
    if thickness == 0 {
        return;
    }

    let (mut x0, mut y0) = p0;
    let (x1, y1) = p1;

    let dx = (x1 - x0).abs();
    let dy = (y1 - y0).abs();
    let sx = if x0 < x1 { 1 } else { -1 };
    let sy = if y0 < y1 { 1 } else { -1 };

    let mut err = dx - dy;
    let radius = thickness as i64 / 2;

    loop {
        if thickness == 1 {
            set_pixel(img, x0, y0, color);
        } else {
            fill_disc(img, x0, y0, radius, color);
        }

        if x0 == x1 && y0 == y1 {
            break;
        }

        let e2 = 2 * err;

        if e2 > -dy {
            err -= dy;
            x0 += sx;
        }
        if e2 < dx {
            err += dx;
            y0 += sy;
        }
    }
}
