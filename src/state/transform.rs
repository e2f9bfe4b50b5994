//! The image transform value exchanged between the record store and the viewer.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};
use thiserror::Error;

pub const DEFAULT_MIN_ZOOM: f32 = 0.1;
pub const DEFAULT_MAX_ZOOM: f32 = 5.0;
pub const DEFAULT_ZOOM_STEP: f32 = 0.1;
pub const DEFAULT_ROTATION_STEP: i32 = 45;

/// Locally displayable reference to a picked image file.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ImageRef(PathBuf);

impl ImageRef {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self(path.into())
    }

    pub fn path(&self) -> &Path {
        &self.0
    }
}

impl fmt::Display for ImageRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.display())
    }
}

/// Pan distance from the viewport centre, in pixels.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Translation {
    pub x: f32,
    pub y: f32,
}

impl Translation {
    pub const ZERO: Self = Self { x: 0.0, y: 0.0 };

    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    pub fn offset_by(self, dx: f32, dy: f32) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
        }
    }

    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}

/// Pan, zoom and rotation applied to a floor plan image.
///
/// `image == None` means no image has been picked yet. The remaining fields
/// are kept as-is in that case so a later upload starts from them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImageTransform {
    pub image: Option<ImageRef>,
    pub zoom: f32,
    /// Degrees. May be negative until normalized with [`normalize_rotation`].
    pub rotation: i32,
    pub translation: Translation,
}

impl Default for ImageTransform {
    fn default() -> Self {
        Self {
            image: None,
            zoom: 1.0,
            rotation: 0,
            translation: Translation::ZERO,
        }
    }
}

impl ImageTransform {
    pub fn has_image(&self) -> bool {
        self.image.is_some()
    }

    /// Same image, with zoom, rotation and translation back at their defaults.
    pub fn reset(&self) -> Self {
        Self {
            image: self.image.clone(),
            ..Self::default()
        }
    }

    pub fn is_valid(&self, bounds: &ZoomBounds) -> bool {
        self.zoom.is_finite() && bounds.contains(self.zoom) && self.translation.is_finite()
    }
}

/// Canonical representative of `degrees` in `[0, 360)`.
pub fn normalize_rotation(degrees: i32) -> i32 {
    degrees.rem_euclid(360)
}

#[derive(Debug, Error, PartialEq)]
pub enum BoundsError {
    #[error("zoom bounds must be finite (min {min}, max {max}, step {step})")]
    NotFinite { min: f32, max: f32, step: f32 },
    #[error("zoom step must be positive, got {0}")]
    NonPositiveStep(f32),
    #[error("minimum zoom {min} must be positive and below max - step ({limit})")]
    EmptyRange { min: f32, limit: f32 },
    #[error("zoom 1 must lie between min {min} and max - step ({limit})")]
    ExcludesUnitZoom { min: f32, limit: f32 },
}

/// Allowed zoom range and the step used by the buttons, wheel and slider.
///
/// Always contains zoom 1, the value a fresh or reset transform starts at.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ZoomBounds {
    min: f32,
    max: f32,
    step: f32,
}

impl Default for ZoomBounds {
    fn default() -> Self {
        Self {
            min: DEFAULT_MIN_ZOOM,
            max: DEFAULT_MAX_ZOOM,
            step: DEFAULT_ZOOM_STEP,
        }
    }
}

impl ZoomBounds {
    pub fn new(min: f32, max: f32, step: f32) -> Result<Self, BoundsError> {
        if !(min.is_finite() && max.is_finite() && step.is_finite()) {
            return Err(BoundsError::NotFinite { min, max, step });
        }
        if step <= 0.0 {
            return Err(BoundsError::NonPositiveStep(step));
        }
        if min <= 0.0 || min >= max - step {
            return Err(BoundsError::EmptyRange {
                min,
                limit: max - step,
            });
        }
        if min > 1.0 || 1.0 > max - step {
            return Err(BoundsError::ExcludesUnitZoom {
                min,
                limit: max - step,
            });
        }
        Ok(Self { min, max, step })
    }

    pub fn min(&self) -> f32 {
        self.min
    }

    pub fn max(&self) -> f32 {
        self.max
    }

    pub fn step(&self) -> f32 {
        self.step
    }

    pub fn contains(&self, zoom: f32) -> bool {
        zoom >= self.min && zoom <= self.max
    }

    /// One step down, never below `min`.
    pub fn decrement(&self, zoom: f32) -> f32 {
        (zoom - self.step).max(self.min)
    }

    /// One step up, capped one step short of `max`.
    pub fn increment(&self, zoom: f32) -> f32 {
        (zoom + self.step).min(self.max - self.step)
    }

    /// A slider position: clamped to `[min, max]` and snapped to the step grid.
    pub fn slider(&self, value: f32) -> f32 {
        if !value.is_finite() {
            return self.min;
        }
        let steps = ((value - self.min) / self.step).round();
        (self.min + steps * self.step).clamp(self.min, self.max)
    }
}
