//! Picking a floor plan image from the local file system.

use crate::state::ImageRef;
use std::path::{Path, PathBuf};
use thiserror::Error;

pub const IMAGE_EXTENSIONS: &[&str] = &["png", "jpg", "jpeg", "bmp", "gif", "webp", "svg"];

#[derive(Debug, Error, PartialEq)]
pub enum UploadError {
    #[error("no such file: {}", .0.display())]
    NotFound(PathBuf),
    #[error("not an image file: {}", .0.display())]
    NotAnImage(PathBuf),
    #[error("could not decode image: {}", .0.display())]
    Undecodable(PathBuf),
}

/// Show the native file dialog filtered to image files.
pub fn pick_image() -> Option<PathBuf> {
    rfd::FileDialog::new()
        .add_filter("Images", IMAGE_EXTENSIONS)
        .set_title("Choose Floor Plan Image")
        .pick_file()
}

fn has_image_extension(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| IMAGE_EXTENSIONS.contains(&ext.to_lowercase().as_str()))
}

/// Accept `path` as an upload if it is an existing file with an image
/// extension. Decoding is checked separately when the image is loaded.
pub fn check_image_path(path: &Path) -> Result<ImageRef, UploadError> {
    if !path.is_file() {
        return Err(UploadError::NotFound(path.to_path_buf()));
    }
    if !has_image_extension(path) {
        return Err(UploadError::NotAnImage(path.to_path_buf()));
    }
    Ok(ImageRef::new(path))
}
