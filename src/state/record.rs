//! Floor plan records and the form contents they are built from.

use crate::state::transform::ImageTransform;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// A closed set of named options shown in a form drop-down.
pub trait Choice: Copy + Sized + 'static {
    const ALL: &'static [Self];

    fn label(&self) -> &'static str;

    /// Position in a drop-down whose first row is a "Select" placeholder.
    fn option_index(choice: Option<Self>) -> i32
    where
        Self: PartialEq,
    {
        choice
            .and_then(|c| Self::ALL.iter().position(|other| *other == c))
            .map_or(0, |pos| pos as i32 + 1)
    }

    /// Inverse of [`Choice::option_index`]; the placeholder row maps to `None`.
    fn from_option_index(index: i32) -> Option<Self> {
        let pos = usize::try_from(index).ok()?.checked_sub(1)?;
        Self::ALL.get(pos).copied()
    }

    /// Drop-down rows, placeholder first.
    fn option_labels() -> Vec<&'static str> {
        std::iter::once(PLACEHOLDER)
            .chain(Self::ALL.iter().map(Choice::label))
            .collect()
    }
}

pub const PLACEHOLDER: &str = "Select";

#[derive(Debug, Error, PartialEq)]
#[error("unknown {kind} '{value}'")]
pub struct ParseChoiceError {
    kind: &'static str,
    value: String,
}

macro_rules! choice_enum {
    ($name:ident, $kind:literal, { $($variant:ident => $label:literal),+ $(,)? }) => {
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        pub enum $name {
            $($variant),+
        }

        impl Choice for $name {
            const ALL: &'static [Self] = &[$(Self::$variant),+];

            fn label(&self) -> &'static str {
                match self {
                    $(Self::$variant => $label),+
                }
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.label())
            }
        }

        impl FromStr for $name {
            type Err = ParseChoiceError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                Self::ALL
                    .iter()
                    .copied()
                    .find(|c| c.label().eq_ignore_ascii_case(s.trim()))
                    .ok_or_else(|| ParseChoiceError {
                        kind: $kind,
                        value: s.to_string(),
                    })
            }
        }
    };
}

choice_enum!(ExteriorType, "exterior type", {
    Balcony => "Balcony",
    Terrace => "Terrace",
    Juliette => "Juliette",
    Flex => "Flex",
    Den => "Den",
    Patio => "Patio",
});

choice_enum!(FacingDirection, "facing direction", {
    North => "North",
    East => "East",
    South => "South",
    West => "West",
});

choice_enum!(FloorType, "floor type", {
    Studio => "Studio",
    OneBedOneBath => "One Bed One Bath",
    TwoBedOneBath => "Two Bed One Bath",
    ThreeBedTwoBath => "Three Bed Two Bath",
});

/// Validated form fields of a floor plan.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecordFields {
    pub name: String,
    pub interior_size: String,
    pub exterior_size: String,
    pub exterior_type: ExteriorType,
    pub facing: FacingDirection,
    pub floor_type: FloorType,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FloorPlanRecord {
    pub fields: RecordFields,
    pub transform: ImageTransform,
}

#[derive(Debug, Error, PartialEq)]
pub enum FormError {
    #[error("{0} is required")]
    MissingText(&'static str),
    #[error("select a {0}")]
    MissingChoice(&'static str),
    #[error("upload a floor plan image before saving")]
    MissingImage,
}

/// Raw contents of the edit form.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RecordDraft {
    pub name: String,
    pub interior_size: String,
    pub exterior_size: String,
    pub exterior_type: Option<ExteriorType>,
    pub facing: Option<FacingDirection>,
    pub floor_type: Option<FloorType>,
}

impl From<&RecordFields> for RecordDraft {
    fn from(fields: &RecordFields) -> Self {
        Self {
            name: fields.name.clone(),
            interior_size: fields.interior_size.clone(),
            exterior_size: fields.exterior_size.clone(),
            exterior_type: Some(fields.exterior_type),
            facing: Some(fields.facing),
            floor_type: Some(fields.floor_type),
        }
    }
}

fn required(value: &str, field: &'static str) -> Result<String, FormError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(FormError::MissingText(field));
    }
    Ok(trimmed.to_string())
}

impl RecordDraft {
    /// Checks every required field; the first missing one is reported.
    pub fn validate(&self, transform: &ImageTransform) -> Result<RecordFields, FormError> {
        let fields = RecordFields {
            name: required(&self.name, "floor name")?,
            interior_size: required(&self.interior_size, "interior size")?,
            exterior_size: required(&self.exterior_size, "exterior size")?,
            exterior_type: self
                .exterior_type
                .ok_or(FormError::MissingChoice("exterior type"))?,
            facing: self
                .facing
                .ok_or(FormError::MissingChoice("facing direction"))?,
            floor_type: self
                .floor_type
                .ok_or(FormError::MissingChoice("floor type"))?,
        };
        if !transform.has_image() {
            return Err(FormError::MissingImage);
        }
        Ok(fields)
    }
}
