//! Batch save orchestration: folders, crops and the resume file

use crate::cancel::CancelSwitch;
use crate::error::{BatchError, RecordError};
use crate::outcome::{BatchResult, RunState};
use indexmap::IndexMap;
use std::path::Path;
use std::sync::{Mutex, PoisonError};
use tokio_util::sync::CancellationToken;
use wildex_core::{prepare_groups, AnnotationRecord, Group, SubmitData};
use wildex_fetch::ImageSaver;
use wildex_sheets::{remove_if_exists, ArtifactSink, RowSource, RunPaths};

/// Failed records per identity, in order of first failure
type ErrorMap = IndexMap<String, Vec<AnnotationRecord>>;

fn create_folder(path: &Path) -> Result<(), BatchError> {
    std::fs::create_dir_all(path).map_err(|source| BatchError::CreateFolder {
        path: path.to_path_buf(),
        source,
    })
}

/// Runs download batches one at a time against a workbook and an image saver
pub struct BatchSaver<B, I> {
    book: B,
    images: I,
    cancel: CancelSwitch,
    state: Mutex<RunState>,
}

impl<B, I> BatchSaver<B, I>
where
    B: RowSource + ArtifactSink,
    I: ImageSaver,
{
    pub fn new(book: B, images: I) -> Self {
        Self {
            book,
            images,
            cancel: CancelSwitch::new(),
            state: Mutex::new(RunState::Idle),
        }
    }

    pub fn with_cancel_switch(mut self, cancel: CancelSwitch) -> Self {
        self.cancel = cancel;
        self
    }

    /// Handle for cancelling runs from another task
    pub fn cancel_switch(&self) -> CancelSwitch {
        self.cancel.clone()
    }

    pub fn state(&self) -> RunState {
        *self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn set_state(&self, state: RunState) {
        *self.state.lock().unwrap_or_else(PoisonError::into_inner) = state;
    }

    /// Download every shortlisted annotation of `submit.input_xlsx`.
    ///
    /// `original_xlsx` names the export a resume run descends from; the run
    /// folder and resume file are named after it instead of the input.
    pub async fn perform_final_save(
        &self,
        submit: &SubmitData,
        original_xlsx: Option<&Path>,
    ) -> BatchResult {
        let token = self.cancel.begin_run();
        self.set_state(RunState::Running);

        let result = self.run(submit, original_xlsx, &token).await;

        // save_groups marks the run Cancelled when a record was cut short
        if self.state() == RunState::Running {
            self.set_state(RunState::Completed);
        }

        match result {
            Ok(result) => result,
            Err(e) => {
                tracing::error!(error = %e, "Batch save failed");
                BatchResult::failed(e.to_string())
            }
        }
    }

    async fn run(
        &self,
        submit: &SubmitData,
        original_xlsx: Option<&Path>,
        token: &CancellationToken,
    ) -> Result<BatchResult, BatchError> {
        let source_file = original_xlsx
            .filter(|p| !p.as_os_str().is_empty())
            .unwrap_or(submit.input_xlsx.as_path());
        let paths = RunPaths::new(&submit.download_root, source_file);
        let run_root = paths.run_root();

        create_folder(&run_root)?;

        let rows = self.book.read_sheet(&submit.input_xlsx, 0).map_err(|source| {
            BatchError::MalformedInput {
                path: submit.input_xlsx.clone(),
                source,
            }
        })?;
        let groups = prepare_groups(
            &rows,
            submit.unidentified_encounters,
            submit.num_annotations_per_id,
        );
        tracing::info!(
            input = %submit.input_xlsx.display(),
            run_root = %run_root.display(),
            rows = rows.len(),
            groups = groups.len(),
            "Starting batch save"
        );

        let failed = self.save_groups(&groups, &paths, token).await;

        let resume_file = paths.resume_file();
        match remove_if_exists(&resume_file) {
            Ok(true) => {
                tracing::info!(path = %resume_file.display(), "Removed previous resume file")
            }
            Ok(false) => {}
            Err(e) => tracing::warn!(
                path = %resume_file.display(),
                error = %e,
                "Failed to remove previous resume file"
            ),
        }

        if failed.is_empty() {
            tracing::info!("All annotations downloaded");
            return Ok(BatchResult::completed());
        }

        let descriptor = SubmitData {
            input_xlsx: source_file.to_path_buf(),
            ..submit.clone()
        };
        self.book
            .write_error_artifact(&resume_file, &failed, &descriptor)
            .map_err(|source| BatchError::Artifact {
                path: resume_file.clone(),
                source,
            })?;

        tracing::warn!(
            failed = failed.len(),
            resume_file = %resume_file.display(),
            "Batch finished with failures"
        );
        Ok(BatchResult::with_errors(failed.len(), resume_file))
    }

    /// Save every record of `groups` under `<run_root>/<identity>/`.
    ///
    /// Returns the records that were not saved, each carrying its error.
    /// The run state becomes `Cancelled` if any record was skipped because
    /// of a cancel request.
    pub async fn save_groups(
        &self,
        groups: &[Group],
        paths: &RunPaths,
        token: &CancellationToken,
    ) -> Vec<AnnotationRecord> {
        let mut errors = ErrorMap::new();
        let mut cancelled = 0usize;

        for group in groups {
            let folder = paths.identity_folder(&group.identity);

            if !token.is_cancelled() {
                if let Err(e) = create_folder(&folder) {
                    tracing::warn!(identity = %group.identity, error = %e, "Skipping group");
                    let message = e.to_string();
                    errors.entry(group.identity.clone()).or_default().extend(
                        group
                            .records
                            .iter()
                            .map(|record| record.with_error(message.clone())),
                    );
                    continue;
                }
            }

            tracing::info!(identity = %group.identity, records = group.len(), "Saving group");
            for record in &group.records {
                if let Err(e) = self.save_record(record, paths, token).await {
                    if matches!(e, RecordError::Cancelled) {
                        cancelled += 1;
                    } else {
                        tracing::warn!(
                            identity = %record.identity,
                            media_asset = %record.media_asset_id,
                            error = %e,
                            "Annotation not saved"
                        );
                    }
                    errors
                        .entry(record.identity.clone())
                        .or_default()
                        .push(record.with_error(e.to_string()));
                }
            }
        }

        if cancelled > 0 {
            tracing::warn!(cancelled, "Batch cancelled");
            self.set_state(RunState::Cancelled);
        }
        errors.into_values().flatten().collect()
    }

    async fn save_record(
        &self,
        record: &AnnotationRecord,
        paths: &RunPaths,
        token: &CancellationToken,
    ) -> Result<(), RecordError> {
        if token.is_cancelled() {
            return Err(RecordError::Cancelled);
        }

        let bbox = record.bounding_box()?;
        let dest = paths.annotation_file(&record.identity, &record.output_file_name());
        self.images.save_crop(&record.image_url, bbox, &dest).await?;
        tracing::debug!(dest = %dest.display(), "Saved annotation");
        Ok(())
    }
}
