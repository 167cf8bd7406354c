use serde::{Deserialize, Serialize};
use std::path::PathBuf;

pub const ALL_DOWNLOADED: &str = "All annotations downloaded successfully.";

/// Summary of one download run
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BatchResult {
    pub success: bool,
    pub message: String,
    /// Resume file listing the failed annotations
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub errors_excel_file_path: Option<PathBuf>,
}

impl BatchResult {
    pub fn completed() -> Self {
        Self {
            success: true,
            message: ALL_DOWNLOADED.to_string(),
            errors_excel_file_path: None,
        }
    }

    pub fn failed(message: impl Into<String>) -> Self {
        Self {
            success: false,
            message: message.into(),
            errors_excel_file_path: None,
        }
    }

    pub fn with_errors(count: usize, resume_file: PathBuf) -> Self {
        Self {
            success: false,
            message: format!(
                "{} annotations couldn't be downloaded, retry with {} after fixing it to resume.",
                count,
                resume_file.display()
            ),
            errors_excel_file_path: Some(resume_file),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RunState {
    #[default]
    Idle,
    Running,
    Completed,
    Cancelled,
}
