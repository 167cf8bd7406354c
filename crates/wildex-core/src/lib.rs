//! Annotation expansion, identity grouping and viewpoint shortlisting

pub mod columns;
mod config;
mod error;
mod expand;
mod group;
mod shortlist;
mod types;

pub use config::{parse_bool, AnnotationCount, SubmitData, DEFAULT_ANNOTATIONS_PER_ID};
pub use error::ValidationError;
pub use expand::{expand_row, expand_rows, normalize_identity, RawRow};
pub use group::{group_by_identity, Group};
pub use shortlist::{shortlist, shortlist_groups, PREFERRED_VIEWPOINTS};
pub use types::{AnnotationRecord, BoundingBox, Viewpoint, UNIDENTIFIED_ANNOTATIONS};

/// Expand, group and shortlist the rows of one export sheet
pub fn prepare_groups(
    rows: &[RawRow],
    include_unidentified: bool,
    count: AnnotationCount,
) -> Vec<Group> {
    let groups = group_by_identity(expand_rows(rows), include_unidentified);
    shortlist_groups(groups, count)
}
