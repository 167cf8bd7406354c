#![allow(dead_code)]

use async_trait::async_trait;
use std::collections::{HashMap, HashSet};
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};
use wildex_batch::CancelSwitch;
use wildex_core::{columns, AnnotationRecord, BoundingBox, RawRow, SubmitData};
use wildex_fetch::{FetchError, ImageSaver};
use wildex_sheets::{ArtifactSink, RowSource, SheetError, XlsxWorkbook};

pub const IMAGE_HOST: &str = "https://img.test/";

/// One export row; each slot is `(media asset, viewpoint)`
pub fn export_row(identity: Option<&str>, slots: &[(&str, &str)]) -> RawRow {
    let mut row = RawRow::new();
    if let Some(identity) = identity {
        row.insert(columns::IDENTITY.to_string(), identity.to_string());
    }
    for (i, (media, viewpoint)) in slots.iter().enumerate() {
        row.insert(columns::match_against(i), "true".to_string());
        row.insert(columns::viewpoint(i), viewpoint.to_string());
        row.insert(columns::bbox(i), "[0, 0, 10, 10]".to_string());
        row.insert(columns::media_asset(i), media.to_string());
        row.insert(columns::image_url(i), format!("{}{}", IMAGE_HOST, media));
    }
    row
}

/// Exports served from memory; everything else (resume files) on disk
#[derive(Debug, Clone, Default)]
pub struct TestBook {
    exports: HashMap<PathBuf, Vec<RawRow>>,
    disk: XlsxWorkbook,
}

impl TestBook {
    pub fn with_export(mut self, path: &Path, rows: Vec<RawRow>) -> Self {
        self.exports.insert(path.to_path_buf(), rows);
        self
    }
}

impl RowSource for TestBook {
    fn read_sheet(&self, path: &Path, index: usize) -> Result<Vec<RawRow>, SheetError> {
        match self.exports.get(path) {
            Some(rows) if index == 0 => Ok(rows.clone()),
            Some(_) => Err(SheetError::MissingSheet {
                path: path.to_path_buf(),
                index,
            }),
            None => self.disk.read_sheet(path, index),
        }
    }
}

impl ArtifactSink for TestBook {
    fn write_error_artifact(
        &self,
        path: &Path,
        failed: &[AnnotationRecord],
        descriptor: &SubmitData,
    ) -> Result<(), SheetError> {
        self.disk.write_error_artifact(path, failed, descriptor)
    }
}

/// Image saver that writes placeholder files and fails on request
#[derive(Debug, Clone, Default)]
pub struct MockImages {
    calls: Arc<Mutex<Vec<String>>>,
    failing: HashSet<String>,
    cancel_after: Option<(usize, CancelSwitch)>,
}

impl MockImages {
    pub fn failing(mut self, media: &str) -> Self {
        self.failing.insert(media.to_string());
        self
    }

    /// Cancel `switch` while serving the `n`-th request
    pub fn cancel_after(mut self, n: usize, switch: CancelSwitch) -> Self {
        self.cancel_after = Some((n, switch));
        self
    }

    /// Media asset ids requested so far, in order
    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl ImageSaver for MockImages {
    async fn save_crop(
        &self,
        image_url: &str,
        _bbox: BoundingBox,
        dest: &Path,
    ) -> Result<(), FetchError> {
        let media = image_url.trim_start_matches(IMAGE_HOST).to_string();
        let count = {
            let mut calls = self.calls.lock().unwrap();
            calls.push(media.clone());
            calls.len()
        };
        if let Some((n, switch)) = &self.cancel_after {
            if count == *n {
                switch.cancel();
            }
        }
        if self.failing.contains(&media) {
            return Err(FetchError::HttpStatus(404));
        }
        std::fs::write(dest, b"crop").unwrap();
        Ok(())
    }
}

pub fn read_artifact(path: &Path) -> (Vec<RawRow>, Vec<RawRow>) {
    let disk = XlsxWorkbook::new();
    (
        disk.read_sheet(path, 0).unwrap(),
        disk.read_sheet(path, 1).unwrap(),
    )
}
