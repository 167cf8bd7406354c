//! Reading export sheets and writing resume files

use crate::io::atomic_write;
use calamine::{open_workbook_auto, Data, Range, Reader};
use rust_xlsxwriter::{Workbook, XlsxError};
use std::path::{Path, PathBuf};
use wildex_core::{columns, AnnotationRecord, RawRow, SubmitData};

#[derive(Debug, thiserror::Error)]
pub enum SheetError {
    #[error("Failed to open workbook {}: {source}", .path.display())]
    Open {
        path: PathBuf,
        #[source]
        source: calamine::Error,
    },

    #[error("Workbook {} has no sheet at index {index}", .path.display())]
    MissingSheet { path: PathBuf, index: usize },

    #[error("Failed to read sheet {index} of {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        index: usize,
        #[source]
        source: calamine::Error,
    },

    #[error("Failed to build workbook: {0}")]
    Write(#[from] XlsxError),

    #[error("Failed to save workbook: {0}")]
    Io(#[from] std::io::Error),
}

/// Source of export rows, one sheet at a time
pub trait RowSource: Send + Sync {
    /// Rows of sheet `index`, keyed by the sheet's header row
    fn read_sheet(&self, path: &Path, index: usize) -> Result<Vec<RawRow>, SheetError>;
}

/// Sink for the two-sheet resume file of a run with failures
pub trait ArtifactSink: Send + Sync {
    fn write_error_artifact(
        &self,
        path: &Path,
        failed: &[AnnotationRecord],
        descriptor: &SubmitData,
    ) -> Result<(), SheetError>;
}

/// Spreadsheet files on disk (xlsx, xls and ods for reading; xlsx for writing)
#[derive(Debug, Clone, Copy, Default)]
pub struct XlsxWorkbook;

impl XlsxWorkbook {
    pub fn new() -> Self {
        Self
    }
}

fn cell_text(cell: &Data) -> String {
    match cell {
        Data::Empty => String::new(),
        Data::String(s) => s.clone(),
        Data::Bool(b) => b.to_string(),
        Data::Int(i) => i.to_string(),
        // 3.0 -> "3", so numeric ids and counts read back as typed
        Data::Float(f) => f.to_string(),
        other => other.to_string(),
    }
}

/// Header row becomes the keys; blank rows and unnamed columns are dropped
fn rows_from_range(range: &Range<Data>) -> Vec<RawRow> {
    let mut rows = range.rows();
    let Some(header) = rows.next() else {
        return Vec::new();
    };
    let header: Vec<String> = header.iter().map(cell_text).collect();

    rows.filter(|cells| cells.iter().any(|c| !cell_text(c).is_empty()))
        .map(|cells| {
            header
                .iter()
                .enumerate()
                .filter(|(_, name)| !name.is_empty())
                .map(|(i, name)| {
                    let value = cells.get(i).map(cell_text).unwrap_or_default();
                    (name.clone(), value)
                })
                .collect()
        })
        .collect()
}

fn failed_record_cells(record: &AnnotationRecord) -> [&str; 7] {
    [
        record.identity.as_str(),
        record.media_asset_id.as_str(),
        record.image_url.as_str(),
        record.bbox.as_str(),
        record.viewpoint.as_str(),
        columns::MATCH_AGAINST_TRUE,
        record.error_message.as_deref().unwrap_or(""),
    ]
}

impl RowSource for XlsxWorkbook {
    fn read_sheet(&self, path: &Path, index: usize) -> Result<Vec<RawRow>, SheetError> {
        let mut workbook = open_workbook_auto(path).map_err(|source| SheetError::Open {
            path: path.to_path_buf(),
            source,
        })?;

        let range = workbook
            .worksheet_range_at(index)
            .ok_or_else(|| SheetError::MissingSheet {
                path: path.to_path_buf(),
                index,
            })?
            .map_err(|source| SheetError::Read {
                path: path.to_path_buf(),
                index,
                source,
            })?;

        let rows = rows_from_range(&range);
        tracing::debug!(path = %path.display(), index, rows = rows.len(), "Read sheet");
        Ok(rows)
    }
}

impl ArtifactSink for XlsxWorkbook {
    fn write_error_artifact(
        &self,
        path: &Path,
        failed: &[AnnotationRecord],
        descriptor: &SubmitData,
    ) -> Result<(), SheetError> {
        let mut workbook = Workbook::new();

        let results = workbook.add_worksheet();
        results.set_name(columns::SEARCH_RESULTS_SHEET)?;
        for (col, name) in columns::search_results_header().into_iter().enumerate() {
            results.write_string(0, col as u16, name)?;
        }
        for (i, record) in failed.iter().enumerate() {
            let row = i as u32 + 1;
            for (col, value) in failed_record_cells(record).into_iter().enumerate() {
                results.write_string(row, col as u16, value)?;
            }
        }

        let info = workbook.add_worksheet();
        info.set_name(columns::RESUME_INFORMATION_SHEET)?;
        for (col, name) in columns::RESUME_INFORMATION_HEADER.into_iter().enumerate() {
            info.write_string(0, col as u16, name)?;
        }
        info.write_string(1, 0, descriptor.download_root.to_string_lossy())?;
        info.write_string(1, 1, descriptor.input_xlsx.to_string_lossy())?;
        info.write_boolean(1, 2, descriptor.unidentified_encounters)?;
        info.write_string(1, 3, descriptor.num_annotations_per_id.to_string())?;

        let buffer = workbook.save_to_buffer()?;
        atomic_write(path, &buffer)?;
        tracing::info!(path = %path.display(), failed = failed.len(), "Wrote resume file");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wildex_core::AnnotationCount;

    fn failed(identity: &str, media: &str, error: &str) -> AnnotationRecord {
        AnnotationRecord {
            identity: identity.to_string(),
            media_asset_id: media.to_string(),
            image_url: format!("https://x/{}", media),
            bbox: "[1, 2, 30, 40]".to_string(),
            viewpoint: "left".to_string(),
            error_message: Some(error.to_string()),
        }
    }

    #[test]
    fn test_rows_from_range_uses_header() {
        let mut range: Range<Data> = Range::new((0, 0), (3, 2));
        range.set_value((0, 0), Data::String("Name0.value".to_string()));
        range.set_value((0, 1), Data::String("count".to_string()));
        range.set_value((0, 2), Data::Empty);
        range.set_value((1, 0), Data::String("Zara".to_string()));
        range.set_value((1, 1), Data::Float(3.0));
        range.set_value((1, 2), Data::String("ignored".to_string()));
        // row 2 left blank
        range.set_value((3, 1), Data::Bool(true));

        let rows = rows_from_range(&range);
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0]["Name0.value"], "Zara");
        assert_eq!(rows[0]["count"], "3");
        assert_eq!(rows[0].len(), 2);
        assert_eq!(rows[1]["Name0.value"], "");
        assert_eq!(rows[1]["count"], "true");
    }

    #[test]
    fn test_error_artifact_roundtrip() {
        let temp = tempfile::TempDir::new().unwrap();
        let path = temp.path().join("run").join("export.resume.xlsx");
        let descriptor = SubmitData {
            download_root: temp.path().to_path_buf(),
            input_xlsx: PathBuf::from("/exports/export.xlsx"),
            unidentified_encounters: true,
            num_annotations_per_id: AnnotationCount::All,
        };
        let records = vec![
            failed("Zara", "a.jpg", "Failed to download image, status 404"),
            failed("Unidentified_annotations", "b.jpg", "Canceled by user"),
        ];

        let book = XlsxWorkbook::new();
        book.write_error_artifact(&path, &records, &descriptor)
            .unwrap();

        let rows = book.read_sheet(&path, 0).unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0][columns::IDENTITY], "Zara");
        assert_eq!(rows[0]["Annotation0.bbox"], "[1, 2, 30, 40]");
        assert_eq!(rows[0]["Annotation0.MatchAgainst"], "true");
        assert_eq!(
            rows[0][columns::ERROR_MESSAGE],
            "Failed to download image, status 404"
        );
        assert_eq!(rows[1][columns::ERROR_MESSAGE], "Canceled by user");

        let info = book.read_sheet(&path, 1).unwrap();
        assert_eq!(info.len(), 1);
        assert_eq!(info[0][columns::INPUT_XLSX], "/exports/export.xlsx");
        assert_eq!(info[0][columns::UNIDENTIFIED_ENCOUNTERS], "true");
        assert_eq!(info[0][columns::NUM_ANNOTATIONS_PER_ID], "all");
    }

    #[test]
    fn test_missing_sheet_and_missing_file() {
        let temp = tempfile::TempDir::new().unwrap();
        let book = XlsxWorkbook::new();

        let missing = book.read_sheet(&temp.path().join("nope.xlsx"), 0);
        assert!(matches!(missing, Err(SheetError::Open { .. })));

        let path = temp.path().join("empty.resume.xlsx");
        let descriptor = SubmitData::new(temp.path(), "/exports/x.xlsx");
        book.write_error_artifact(&path, &[], &descriptor).unwrap();
        assert!(matches!(
            book.read_sheet(&path, 2),
            Err(SheetError::MissingSheet { index: 2, .. })
        ));
    }
}
