use midline_image::{Image, ImageError};
use midline_imgproc::{draw, enhance};

use crate::config::MidlineConfig;
use crate::estimate::Midline;

/// Draw the midline over a dimmed copy of the source image.
///
/// The midline is rasterized on a black overlay with the configured color and
/// thickness, then blended as
/// `saturate(round(image_weight * src + overlay_weight * overlay))`.
///
/// # Arguments
///
/// * `src` - The source RGB image. It is not modified.
/// * `midline` - The line to draw.
/// * `config` - The pipeline configuration.
///
/// # Returns
///
/// A new image with the same size as `src`.
pub fn render_midline(
    src: &Image<u8, 3>,
    midline: &Midline,
    config: &MidlineConfig,
) -> Result<Image<u8, 3>, ImageError> {
    let seg = midline.to_pixels();

    let mut overlay = Image::<u8, 3>::from_size_val(src.size(), 0)?;
    draw::draw_line(
        &mut overlay,
        (seg.x1 as i64, seg.y1 as i64),
        (seg.x2 as i64, seg.y2 as i64),
        config.line_color,
        config.line_thickness,
    );

    let mut dst = Image::<u8, 3>::from_size_val(src.size(), 0)?;
    enhance::add_weighted_u8(
        src,
        config.image_weight,
        &overlay,
        config.overlay_weight,
        0.0,
        &mut dst,
    )?;

    Ok(dst)
}
