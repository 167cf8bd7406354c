//! Resumable batch saving of shortlisted annotations

mod cancel;
mod error;
mod outcome;
mod saver;

pub use cancel::CancelSwitch;
pub use error::{BatchError, RecordError};
pub use outcome::{BatchResult, RunState, ALL_DOWNLOADED};
pub use saver::BatchSaver;
