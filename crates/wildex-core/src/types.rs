//! Core types for annotation shortlisting

use crate::error::ValidationError;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;
use std::sync::LazyLock;

/// Identity (and folder name) for annotations without an individual
pub const UNIDENTIFIED_ANNOTATIONS: &str = "Unidentified_annotations";

static NUMBER_TOKEN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\d+").expect("valid number token regex"));

/// Camera angle relative to the animal
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Viewpoint {
    Back,
    BackLeft,
    BackRight,
    Down,
    DownBack,
    DownBackLeft,
    DownBackRight,
    DownFront,
    DownFrontLeft,
    DownFrontRight,
    DownLeft,
    DownRight,
    Front,
    FrontLeft,
    FrontRight,
    Left,
    Right,
    Up,
    UpBack,
    UpBackLeft,
    UpBackRight,
    UpFront,
    UpFrontLeft,
    UpFrontRight,
    UpLeft,
    UpRight,
}

impl Viewpoint {
    pub const ALL: [Viewpoint; 26] = [
        Viewpoint::Back,
        Viewpoint::BackLeft,
        Viewpoint::BackRight,
        Viewpoint::Down,
        Viewpoint::DownBack,
        Viewpoint::DownBackLeft,
        Viewpoint::DownBackRight,
        Viewpoint::DownFront,
        Viewpoint::DownFrontLeft,
        Viewpoint::DownFrontRight,
        Viewpoint::DownLeft,
        Viewpoint::DownRight,
        Viewpoint::Front,
        Viewpoint::FrontLeft,
        Viewpoint::FrontRight,
        Viewpoint::Left,
        Viewpoint::Right,
        Viewpoint::Up,
        Viewpoint::UpBack,
        Viewpoint::UpBackLeft,
        Viewpoint::UpBackRight,
        Viewpoint::UpFront,
        Viewpoint::UpFrontLeft,
        Viewpoint::UpFrontRight,
        Viewpoint::UpLeft,
        Viewpoint::UpRight,
    ];

    /// Tag as it appears in exports
    pub fn as_str(&self) -> &'static str {
        match self {
            Viewpoint::Back => "back",
            Viewpoint::BackLeft => "backleft",
            Viewpoint::BackRight => "backright",
            Viewpoint::Down => "down",
            Viewpoint::DownBack => "downback",
            Viewpoint::DownBackLeft => "downbackleft",
            Viewpoint::DownBackRight => "downbackright",
            Viewpoint::DownFront => "downfront",
            Viewpoint::DownFrontLeft => "downfrontleft",
            Viewpoint::DownFrontRight => "downfrontright",
            Viewpoint::DownLeft => "downleft",
            Viewpoint::DownRight => "downright",
            Viewpoint::Front => "front",
            Viewpoint::FrontLeft => "frontleft",
            Viewpoint::FrontRight => "frontright",
            Viewpoint::Left => "left",
            Viewpoint::Right => "right",
            Viewpoint::Up => "up",
            Viewpoint::UpBack => "upback",
            Viewpoint::UpBackLeft => "upbackleft",
            Viewpoint::UpBackRight => "upbackright",
            Viewpoint::UpFront => "upfront",
            Viewpoint::UpFrontLeft => "upfrontleft",
            Viewpoint::UpFrontRight => "upfrontright",
            Viewpoint::UpLeft => "upleft",
            Viewpoint::UpRight => "upright",
        }
    }
}

impl fmt::Display for Viewpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Crop rectangle in pixels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BoundingBox {
    pub left: u32,
    pub top: u32,
    pub width: u32,
    pub height: u32,
}

impl BoundingBox {
    /// Extract the first four digit runs of free-form bbox text
    pub fn parse(text: &str) -> Result<Self, ValidationError> {
        let malformed = || ValidationError::MalformedBoundingBox(text.to_string());
        let numbers = NUMBER_TOKEN
            .find_iter(text)
            .take(4)
            .map(|m| m.as_str().parse::<u32>().map_err(|_| malformed()))
            .collect::<Result<Vec<_>, _>>()?;

        match numbers[..] {
            [left, top, width, height] => Ok(Self {
                left,
                top,
                width,
                height,
            }),
            _ => Err(malformed()),
        }
    }
}

/// One annotation of one encounter, flattened out of an export row
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnnotationRecord {
    pub identity: String,
    pub media_asset_id: String,
    pub image_url: String,
    /// Raw bbox text; parsed when the crop is saved
    pub bbox: String,
    pub viewpoint: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error_message: Option<String>,
}

impl AnnotationRecord {
    pub fn bounding_box(&self) -> Result<BoundingBox, ValidationError> {
        BoundingBox::parse(&self.bbox)
    }

    /// Copy of this record carrying a save error
    pub fn with_error(&self, message: impl Into<String>) -> Self {
        Self {
            error_message: Some(message.into()),
            ..self.clone()
        }
    }

    /// Media asset id followed by its own extension (`a.jpg` -> `a.jpg.jpg`)
    pub fn output_file_name(&self) -> String {
        match Path::new(&self.media_asset_id).extension() {
            Some(ext) => format!("{}.{}", self.media_asset_id, ext.to_string_lossy()),
            None => self.media_asset_id.clone(),
        }
    }
}
