#![deny(missing_docs)]
#![doc = env!("CARGO_PKG_DESCRIPTION")]

/// pipeline configuration.
pub mod config;

/// line detection stage.
pub mod detect;

/// error types of the pipeline.
pub mod error;

/// midline estimation stage.
pub mod estimate;

/// the full detection pipeline.
pub mod pipeline;

/// binarization stage.
pub mod preprocess;

/// midline rendering stage.
pub mod render;

pub use config::MidlineConfig;
pub use error::MidlineError;
pub use estimate::{estimate_midline, Midline};
pub use pipeline::{MidlinePipeline, MidlineResult};
pub use render::render_midline;

#[doc(inline)]
pub use midline_image as image;

#[doc(inline)]
pub use midline_imgproc as imgproc;

#[doc(inline)]
pub use midline_io as io;
