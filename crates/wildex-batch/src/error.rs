use std::path::PathBuf;
use wildex_core::ValidationError;
use wildex_fetch::FetchError;
use wildex_sheets::SheetError;

/// Run-level failures; each ends the run with `success: false`
#[derive(Debug, thiserror::Error)]
pub enum BatchError {
    #[error("Couldn't create folder: {}.", .path.display())]
    CreateFolder {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Malformed excel file: {}.", .path.display())]
    MalformedInput {
        path: PathBuf,
        #[source]
        source: SheetError,
    },

    #[error("Couldn't write resume file {}: {source}", .path.display())]
    Artifact {
        path: PathBuf,
        #[source]
        source: SheetError,
    },
}

/// Why a single annotation was not saved; the text lands in the resume file
#[derive(Debug, thiserror::Error)]
pub enum RecordError {
    #[error("Canceled by user")]
    Cancelled,

    #[error(transparent)]
    BoundingBox(#[from] ValidationError),

    #[error(transparent)]
    Fetch(#[from] FetchError),
}
