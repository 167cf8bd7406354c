//! Spreadsheet input, resume files and run folder layout

mod io;
mod paths;
mod resume;
mod workbook;

pub use io::{atomic_write, remove_if_exists};
pub use paths::{default_download_root, RunPaths};
pub use resume::{
    is_resume_file, read_resume_descriptor, InvalidResumeFile, ResumePlan,
    RESUME_FILE_EXTENSION_PREFIX,
};
pub use workbook::{ArtifactSink, RowSource, SheetError, XlsxWorkbook};
