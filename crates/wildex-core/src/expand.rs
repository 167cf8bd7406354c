//! Expansion of wide encounter rows into per-annotation records

use crate::columns;
use crate::types::{AnnotationRecord, UNIDENTIFIED_ANNOTATIONS};
use regex::Regex;
use std::collections::HashMap;
use std::sync::LazyLock;

/// One export row: column name -> cell text (empty cells are `""`)
pub type RawRow = HashMap<String, String>;

static MATCH_AGAINST_COLUMN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^Annotation(\d+)\.MatchAgainst$").expect("valid match-against regex")
});

/// Trimmed identity, or the unidentified sentinel when absent or blank
pub fn normalize_identity(value: Option<&str>) -> String {
    match value.map(str::trim) {
        Some(trimmed) if !trimmed.is_empty() => trimmed.to_string(),
        _ => UNIDENTIFIED_ANNOTATIONS.to_string(),
    }
}

/// Highest annotation slot present in the row (0 when there is none)
fn max_slot_index(row: &RawRow) -> usize {
    row.keys()
        .filter_map(|key| MATCH_AGAINST_COLUMN.captures(key))
        .filter_map(|caps| caps[1].parse::<usize>().ok())
        .max()
        .unwrap_or(0)
}

fn field<'a>(row: &'a RawRow, column: &str) -> &'a str {
    row.get(column).map(String::as_str).unwrap_or("")
}

/// A slot is usable when it is flagged for matching and has a viewpoint and an image
fn slot_is_usable(row: &RawRow, slot: usize) -> bool {
    field(row, &columns::match_against(slot)) == columns::MATCH_AGAINST_TRUE
        && !field(row, &columns::viewpoint(slot)).is_empty()
        && !field(row, &columns::image_url(slot)).is_empty()
}

/// Lazily yield one record per usable annotation slot of `row`
pub fn expand_row(row: &RawRow) -> impl Iterator<Item = AnnotationRecord> + '_ {
    let identity = normalize_identity(row.get(columns::IDENTITY).map(String::as_str));

    (0..=max_slot_index(row))
        .filter(move |&slot| slot_is_usable(row, slot))
        .map(move |slot| AnnotationRecord {
            identity: identity.clone(),
            media_asset_id: field(row, &columns::media_asset(slot)).to_string(),
            image_url: field(row, &columns::image_url(slot)).to_string(),
            bbox: field(row, &columns::bbox(slot)).to_string(),
            viewpoint: field(row, &columns::viewpoint(slot)).to_string(),
            error_message: None,
        })
}

/// Expand every row of a sheet, in row order
pub fn expand_rows(rows: &[RawRow]) -> impl Iterator<Item = AnnotationRecord> + '_ {
    rows.iter().flat_map(expand_row)
}
