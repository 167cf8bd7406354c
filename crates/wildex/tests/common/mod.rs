#![allow(dead_code)]

use std::path::Path;
use wildex_core::{AnnotationRecord, SubmitData};
use wildex_sheets::{ArtifactSink, XlsxWorkbook};

pub fn record(identity: &str, media: &str, viewpoint: &str) -> AnnotationRecord {
    AnnotationRecord {
        identity: identity.to_string(),
        media_asset_id: media.to_string(),
        image_url: format!("https://img.test/{}", media),
        bbox: "[0, 0, 16, 16]".to_string(),
        viewpoint: viewpoint.to_string(),
        error_message: None,
    }
}

/// Write `records` as a one-annotation-per-row export at `path`
pub fn write_export(path: &Path, records: &[AnnotationRecord]) {
    let descriptor = SubmitData::new(path.parent().unwrap(), path);
    XlsxWorkbook::new()
        .write_error_artifact(path, records, &descriptor)
        .unwrap();
}
