//! Image loading helpers shared by the viewer and the record list.

use crate::state::ImageRef;
use crate::upload::UploadError;
use slint::SharedPixelBuffer;
use std::collections::HashMap;

/// Checkerboard shown in place of an image that can no longer be loaded.
pub fn placeholder_image() -> slint::Image {
    let size = 64u32;
    let mut buffer = SharedPixelBuffer::new(size, size);
    let data = buffer.make_mut_bytes();
    for y in 0..size {
        for x in 0..size {
            let v = if (x / 8 + y / 8) % 2 == 0 { 200 } else { 235 };
            let i = ((y * size + x) * 3) as usize;
            data[i..i + 3].fill(v);
        }
    }
    slint::Image::from_rgb8(buffer)
}

/// Decoded images keyed by their reference, so record switches and
/// thumbnails do not decode the same file twice. Files that failed to
/// decode are remembered with their placeholder until a later `load`
/// succeeds.
#[derive(Default)]
pub struct ImageCache {
    images: HashMap<ImageRef, slint::Image>,
    failed: HashMap<ImageRef, slint::Image>,
}

impl ImageCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn load(&mut self, image: &ImageRef) -> Result<slint::Image, UploadError> {
        if let Some(cached) = self.images.get(image) {
            return Ok(cached.clone());
        }
        let loaded = slint::Image::load_from_path(image.path())
            .map_err(|_| UploadError::Undecodable(image.path().to_path_buf()))?;
        self.failed.remove(image);
        self.images.insert(image.clone(), loaded.clone());
        Ok(loaded)
    }

    /// Like [`ImageCache::load`], substituting the placeholder on failure.
    /// A failure is logged once per reference.
    pub fn load_or_placeholder(&mut self, image: &ImageRef) -> slint::Image {
        if let Some(cached) = self.images.get(image).or_else(|| self.failed.get(image)) {
            return cached.clone();
        }
        self.load(image).unwrap_or_else(|e| {
            tracing::warn!("{e}");
            let placeholder = placeholder_image();
            self.failed.insert(image.clone(), placeholder.clone());
            placeholder
        })
    }
}

/// Natural pixel size of a decoded image.
pub fn image_size(image: &slint::Image) -> (f32, f32) {
    let size = image.size();
    (size.width as f32, size.height as f32)
}
