//! Submission parameters for a download run

use crate::error::ValidationError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::num::NonZeroUsize;
use std::path::PathBuf;
use std::str::FromStr;

/// Annotations per individual when none is requested explicitly
pub const DEFAULT_ANNOTATIONS_PER_ID: &str = "4";

/// How many annotations to keep per individual
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum AnnotationCount {
    All,
    Count(NonZeroUsize),
}

impl AnnotationCount {
    /// Whether a group of `len` records passes through unchanged
    pub fn keeps_all_of(&self, len: usize) -> bool {
        match self {
            AnnotationCount::All => true,
            AnnotationCount::Count(n) => n.get() >= len,
        }
    }
}

impl Default for AnnotationCount {
    fn default() -> Self {
        AnnotationCount::Count(NonZeroUsize::new(4).unwrap_or(NonZeroUsize::MIN))
    }
}

impl FromStr for AnnotationCount {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if trimmed.eq_ignore_ascii_case("all") {
            return Ok(AnnotationCount::All);
        }
        trimmed
            .parse::<NonZeroUsize>()
            .map(AnnotationCount::Count)
            .map_err(|_| ValidationError::InvalidCount(s.to_string()))
    }
}

impl fmt::Display for AnnotationCount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AnnotationCount::All => f.write_str("all"),
            AnnotationCount::Count(n) => write!(f, "{}", n),
        }
    }
}

impl TryFrom<String> for AnnotationCount {
    type Error = ValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<AnnotationCount> for String {
    fn from(count: AnnotationCount) -> Self {
        count.to_string()
    }
}

/// Parameters of one download run, also persisted in resume files
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmitData {
    /// Folder the run folder is created in
    pub download_root: PathBuf,

    /// Export (or resume file) to read annotations from
    pub input_xlsx: PathBuf,

    /// Keep annotations without an individual identity
    pub unidentified_encounters: bool,

    /// Annotations kept per individual
    pub num_annotations_per_id: AnnotationCount,
}

impl SubmitData {
    pub fn new(download_root: impl Into<PathBuf>, input_xlsx: impl Into<PathBuf>) -> Self {
        Self {
            download_root: download_root.into(),
            input_xlsx: input_xlsx.into(),
            unidentified_encounters: false,
            num_annotations_per_id: AnnotationCount::default(),
        }
    }
}

/// Parse a boolean cell written by a spreadsheet or by us
pub fn parse_bool(value: &str) -> Result<bool, ValidationError> {
    match value.trim().to_ascii_lowercase().as_str() {
        "true" | "1" => Ok(true),
        "false" | "0" | "" => Ok(false),
        _ => Err(ValidationError::InvalidBool(value.to_string())),
    }
}
