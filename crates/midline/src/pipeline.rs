use std::path::Path;

use midline_image::Image;
use midline_imgproc::hough::LineCandidate;
use midline_io::functional as F;

use crate::config::MidlineConfig;
use crate::error::MidlineError;
use crate::estimate::{estimate_midline, Midline};
use crate::{detect, preprocess, render};

/// Image read by the `midline` binary, relative to the working directory.
pub const INPUT_FILEPATH: &str = "sample_2.jpg";

/// Image written by the `midline` binary, relative to the working directory.
pub const OUTPUT_FILEPATH: &str = "output_2.png";

/// The intermediate and final products of one pipeline run.
#[derive(Clone, Debug)]
pub struct MidlineResult {
    /// The binarized image fed to the detector.
    pub binary: Image<u8, 1>,
    /// The detected line candidates, ranked highest first.
    pub candidates: Vec<LineCandidate>,
    /// The estimated midline.
    pub midline: Midline,
    /// The source image with the midline drawn over it.
    pub rendered: Image<u8, 3>,
}

/// Runs the detection stages in order: binarize, detect, estimate and render.
///
/// The pipeline holds only its configuration, so one instance can process any number of
/// images.
///
/// # Example
///
/// ```no_run
/// use midline::pipeline::{MidlinePipeline, INPUT_FILEPATH, OUTPUT_FILEPATH};
///
/// let pipeline = MidlinePipeline::default();
/// let midline = pipeline.run_file(INPUT_FILEPATH, OUTPUT_FILEPATH).unwrap();
/// println!("{midline}");
/// ```
#[derive(Clone, Debug, Default)]
pub struct MidlinePipeline {
    config: MidlineConfig,
}

impl MidlinePipeline {
    /// Create a pipeline with the given configuration.
    pub fn new(config: MidlineConfig) -> Self {
        Self { config }
    }

    /// The configuration of the pipeline.
    pub fn config(&self) -> &MidlineConfig {
        &self.config
    }

    /// Run the pipeline on an in-memory RGB image.
    ///
    /// # Errors
    ///
    /// Returns [`MidlineError::NoLinesDetected`] or
    /// [`MidlineError::InsufficientCandidates`] when fewer than two lines are found, and
    /// [`MidlineError::Image`] if a processing stage fails.
    pub fn run(&self, image: &Image<u8, 3>) -> Result<MidlineResult, MidlineError> {
        let binary = preprocess::binarize(image, &self.config)?;
        let candidates = detect::detect_lines(&binary, &self.config)?;
        let midline = estimate_midline(&candidates)?;
        let rendered = render::render_midline(image, &midline, &self.config)?;

        Ok(MidlineResult {
            binary,
            candidates,
            midline,
            rendered,
        })
    }

    /// Read an image, run the pipeline and write the rendered result.
    ///
    /// The output format is implied by the extension of `output`.
    ///
    /// # Returns
    ///
    /// The estimated midline.
    pub fn run_file(
        &self,
        input: impl AsRef<Path>,
        output: impl AsRef<Path>,
    ) -> Result<Midline, MidlineError> {
        let (input, output) = (input.as_ref(), output.as_ref());

        let image = F::read_image_any_rgb8(input).map_err(MidlineError::ImageLoadFailed)?;
        log::info!("loaded {} ({})", input.display(), image.size());

        let result = self.run(&image)?;
        log::info!("midline: {}", result.midline);

        F::write_image_rgb8(output, &result.rendered).map_err(MidlineError::ImageWriteFailed)?;
        log::info!("wrote {}", output.display());

        Ok(result.midline)
    }
}
