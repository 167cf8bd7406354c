//! Resume file detection and parsing

use crate::workbook::RowSource;
use std::path::{Path, PathBuf};
use wildex_core::{columns, parse_bool, AnnotationCount, RawRow, SubmitData};

/// Marker segment in resume file names: `<stem>.resume.<ext>`
pub const RESUME_FILE_EXTENSION_PREFIX: &str = "resume";

/// Sheet index of the resume descriptor
const RESUME_INFORMATION_SHEET_INDEX: usize = 1;

/// A resume file that cannot be used; the message is shown to users as-is
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Invalid resume file")]
pub struct InvalidResumeFile {
    /// What was wrong, for logs
    pub reason: String,
}

impl InvalidResumeFile {
    fn new(reason: impl Into<String>) -> Self {
        Self {
            reason: reason.into(),
        }
    }
}

/// Whether the file name carries the resume marker before its extension
pub fn is_resume_file(path: &Path) -> bool {
    let Some(name) = path.file_name().map(|n| n.to_string_lossy()) else {
        return false;
    };
    let segments: Vec<&str> = name.split('.').collect();
    segments.len() >= 2 && segments[segments.len() - 2] == RESUME_FILE_EXTENSION_PREFIX
}

fn required<'a>(row: &'a RawRow, column: &str) -> Result<&'a str, InvalidResumeFile> {
    row.get(column)
        .map(|v| v.trim())
        .filter(|v| !v.is_empty())
        .ok_or_else(|| InvalidResumeFile::new(format!("missing {}", column)))
}

fn descriptor_from_row(row: &RawRow) -> Result<SubmitData, InvalidResumeFile> {
    let num_annotations_per_id: AnnotationCount = required(row, columns::NUM_ANNOTATIONS_PER_ID)?
        .parse()
        .map_err(|e: wildex_core::ValidationError| InvalidResumeFile::new(e.to_string()))?;
    let unidentified_encounters = parse_bool(
        row.get(columns::UNIDENTIFIED_ENCOUNTERS)
            .map(String::as_str)
            .unwrap_or(""),
    )
    .map_err(|e| InvalidResumeFile::new(e.to_string()))?;

    Ok(SubmitData {
        download_root: PathBuf::from(required(row, columns::DOWNLOAD_ROOT)?),
        input_xlsx: PathBuf::from(required(row, columns::INPUT_XLSX)?),
        unidentified_encounters,
        num_annotations_per_id,
    })
}

/// Read the submission parameters stored in a resume file
pub fn read_resume_descriptor<S: RowSource + ?Sized>(
    source: &S,
    path: &Path,
) -> Result<SubmitData, InvalidResumeFile> {
    let rows = source
        .read_sheet(path, RESUME_INFORMATION_SHEET_INDEX)
        .map_err(|e| InvalidResumeFile::new(e.to_string()))?;
    let row = rows
        .first()
        .ok_or_else(|| InvalidResumeFile::new("resume information sheet is empty"))?;

    descriptor_from_row(row).inspect_err(|e| {
        tracing::warn!(path = %path.display(), reason = %e.reason, "Rejected resume file");
    })
}

/// Submission for re-running the failures listed in a resume file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResumePlan {
    /// Parameters of the original run, reading annotations from the resume file
    pub submit: SubmitData,
    /// Export the original run was started from
    pub original_xlsx: PathBuf,
}

impl ResumePlan {
    pub fn from_resume_file<S: RowSource + ?Sized>(
        source: &S,
        resume_file: &Path,
    ) -> Result<Self, InvalidResumeFile> {
        let descriptor = read_resume_descriptor(source, resume_file)?;
        let original_xlsx = descriptor.input_xlsx.clone();

        Ok(Self {
            submit: SubmitData {
                input_xlsx: resume_file.to_path_buf(),
                ..descriptor
            },
            original_xlsx,
        })
    }
}
