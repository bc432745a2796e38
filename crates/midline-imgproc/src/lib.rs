#![deny(missing_docs)]
#![doc = env!("CARGO_PKG_DESCRIPTION")]

/// color transformations module.
pub mod color;

/// utilities to draw on images.
pub mod draw;

/// image enhancement module.
pub mod enhance;

/// image filtering module.
pub mod filter;

/// compute image histogram module.
pub mod histogram;

/// line segment detection with the hough transform.
pub mod hough;

/// module containing parallization utilities.
pub mod parallel;

/// operations to threshold images.
pub mod threshold;
