use midline_image::ImageSize;
use midline_imgproc::hough::HoughParams;

/// Tuning constants of the midline pipeline.
///
/// The defaults are tuned for the sample imagery the detector was built for and are the
/// values the `midline` binary runs with.
#[derive(Clone, Debug, PartialEq)]
pub struct MidlineConfig {
    /// Size of the square gaussian kernel. Must be odd.
    pub blur_kernel_size: usize,
    /// Sigma of the gaussian kernel, `<= 0` to derive it from the kernel size.
    pub blur_sigma: f32,
    /// Value written to the foreground pixels of the binary image.
    pub binary_max_value: u8,
    /// Distance resolution of the hough accumulator in pixels.
    pub hough_rho: f32,
    /// Angle resolution of the hough accumulator in radians.
    pub hough_theta: f32,
    /// Minimum accumulator votes for a line to be reported.
    pub hough_threshold: u32,
    /// Minimum extent of a line along x or y. `None` uses half the smaller image side.
    pub min_line_length: Option<usize>,
    /// Maximum gap bridged inside a line, in pixels.
    pub max_line_gap: usize,
    /// Seed of the point visiting order of the detector.
    pub seed: u64,
    /// RGB color of the drawn midline.
    pub line_color: [u8; 3],
    /// Thickness of the drawn midline in pixels.
    pub line_thickness: usize,
    /// Weight of the source image in the final blend.
    pub image_weight: f64,
    /// Weight of the overlay in the final blend.
    pub overlay_weight: f64,
}

impl Default for MidlineConfig {
    fn default() -> Self {
        let hough = HoughParams::default();
        Self {
            blur_kernel_size: 5,
            blur_sigma: 0.0,
            binary_max_value: 192,
            hough_rho: hough.rho,
            hough_theta: hough.theta,
            hough_threshold: hough.threshold,
            min_line_length: None,
            max_line_gap: hough.max_line_gap,
            seed: hough.seed,
            line_color: [255, 0, 0],
            line_thickness: 15,
            image_weight: 0.8,
            overlay_weight: 1.0,
        }
    }
}

impl MidlineConfig {
    /// The detector parameters for an image of the given size.
    pub fn hough_params(&self, size: ImageSize) -> HoughParams {
        HoughParams {
            rho: self.hough_rho,
            theta: self.hough_theta,
            threshold: self.hough_threshold,
            min_line_length: self.min_line_length.unwrap_or(size.min_side() / 2),
            max_line_gap: self.max_line_gap,
            seed: self.seed,
            ..Default::default()
        }
    }
}
