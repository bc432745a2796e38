use std::path::Path;

use midline_image::{Image, ImageSize};

use crate::error::IoError;

/// Reads an image from the given file path as 8-bit RGB.
///
/// The format is guessed from the file content and any format supported by the image
/// crate features of this workspace can be read. Grayscale and alpha images are
/// converted to RGB.
///
/// # Arguments
///
/// * `file_path` - The path to a valid image file.
///
/// # Returns
///
/// An RGB image with the decoded pixels.
///
/// # Errors
///
/// Returns an error if the file does not exist or cannot be decoded.
pub fn read_image_any_rgb8(file_path: impl AsRef<Path>) -> Result<Image<u8, 3>, IoError> {
    let file_path = file_path.as_ref().to_owned();

    // verify the file exists
    if !file_path.exists() {
        return Err(IoError::FileDoesNotExist(file_path));
    }

    let bytes = std::fs::read(&file_path)?;

    let img = image::load_from_memory(&bytes).map_err(IoError::ImageDecodeError)?;

    let size = ImageSize {
        width: img.width() as usize,
        height: img.height() as usize,
    };

    log::debug!(
        "decoded {} as {:?} with {}",
        file_path.display(),
        img.color(),
        size
    );

    let image = Image::<u8, 3>::new(size, img.into_rgb8().into_raw())?;

    Ok(image)
}

/// Writes an 8-bit RGB image to the given file path.
///
/// The output format is implied by the file extension (`png`, `jpg`, `bmp`, `tiff` or
/// `webp`).
///
/// # Arguments
///
/// * `file_path` - The destination path.
/// * `image` - The image to write.
///
/// # Errors
///
/// Returns an error if the extension is not a known image format or if encoding or
/// writing fails.
pub fn write_image_rgb8(file_path: impl AsRef<Path>, image: &Image<u8, 3>) -> Result<(), IoError> {
    let file_path = file_path.as_ref();

    let format = image::ImageFormat::from_path(file_path)
        .map_err(|_| IoError::InvalidFileExtension(file_path.to_path_buf()))?;

    image::save_buffer_with_format(
        file_path,
        image.as_slice(),
        image.width() as u32,
        image.height() as u32,
        image::ColorType::Rgb8,
        format,
    )
    .map_err(|e| match e {
        image::ImageError::IoError(io) => IoError::FileError(io),
        e => IoError::ImageEncodeError(e),
    })?;

    Ok(())
}
