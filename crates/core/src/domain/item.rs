use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::errors::ValidationError;

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct ItemId(pub u64);

impl fmt::Display for ItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Opaque handle returned by an image uploader. The core never sees image bytes.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ImageRef(pub String);

impl ImageRef {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ClothingType {
    Top,
    Bottom,
    Outer,
}

impl ClothingType {
    pub const ALL: [ClothingType; 3] = [Self::Top, Self::Bottom, Self::Outer];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Top => "top",
            Self::Bottom => "bottom",
            Self::Outer => "outer",
        }
    }

    /// Display label used by the closet grid.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Top => "Tops",
            Self::Bottom => "Bottoms",
            Self::Outer => "Outerwear",
        }
    }

    fn requires_thickness(&self) -> bool {
        !matches!(self, Self::Outer)
    }
}

impl fmt::Display for ClothingType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ClothingType {
    type Err = ValidationError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "top" => Ok(Self::Top),
            "bottom" => Ok(Self::Bottom),
            "outer" => Ok(Self::Outer),
            _ => Err(ValidationError::UnknownClothingType(value.to_string())),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Thickness {
    Thin,
    Medium,
    Thick,
}

impl Thickness {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Thin => "thin",
            Self::Medium => "medium",
            Self::Thick => "thick",
        }
    }
}

impl fmt::Display for Thickness {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Thickness {
    type Err = ValidationError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "thin" => Ok(Self::Thin),
            "medium" => Ok(Self::Medium),
            "thick" => Ok(Self::Thick),
            _ => Err(ValidationError::UnknownThickness(value.to_string())),
        }
    }
}

/// Unvalidated item fields as they arrive from a form or a closet file.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClothingItemInput {
    pub name: String,
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default)]
    pub thickness: Option<String>,
    #[serde(default)]
    pub image_ref: Option<ImageRef>,
}

impl ClothingItemInput {
    pub fn new(name: impl Into<String>, kind: impl Into<String>) -> Self {
        Self { name: name.into(), kind: kind.into(), thickness: None, image_ref: None }
    }

    pub fn with_thickness(mut self, thickness: impl Into<String>) -> Self {
        self.thickness = Some(thickness.into());
        self
    }

    pub fn with_image(mut self, image_ref: ImageRef) -> Self {
        self.image_ref = Some(image_ref);
        self
    }

    pub(crate) fn validate(&self) -> Result<ValidatedItem, ValidationError> {
        let name = self.name.trim();
        if name.is_empty() {
            return Err(ValidationError::MissingName);
        }

        let kind = self.kind.parse::<ClothingType>()?;
        let thickness = match self.thickness.as_deref().filter(|value| !value.trim().is_empty()) {
            Some(raw) => Some(raw.parse::<Thickness>()?),
            None if kind.requires_thickness() => {
                return Err(ValidationError::MissingThickness { kind });
            }
            None => None,
        };

        Ok(ValidatedItem { name: name.to_string(), kind, thickness })
    }
}

pub(crate) struct ValidatedItem {
    pub name: String,
    pub kind: ClothingType,
    pub thickness: Option<Thickness>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClothingItem {
    pub id: ItemId,
    pub name: String,
    #[serde(rename = "type")]
    pub kind: ClothingType,
    pub thickness: Option<Thickness>,
    pub image_ref: Option<ImageRef>,
    pub added_at: DateTime<Utc>,
}

impl ClothingItem {
    pub fn is(&self, kind: ClothingType, thickness: Thickness) -> bool {
        self.kind == kind && self.thickness == Some(thickness)
    }
}
