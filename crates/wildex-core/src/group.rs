//! Partitioning of annotation records by individual identity

use crate::types::{AnnotationRecord, UNIDENTIFIED_ANNOTATIONS};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Annotations of one individual, in encounter order
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Group {
    pub identity: String,
    pub records: Vec<AnnotationRecord>,
}

impl Group {
    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn is_unidentified(&self) -> bool {
        self.identity == UNIDENTIFIED_ANNOTATIONS
    }
}

/// Group records by identity, ordered by first appearance.
///
/// The unidentified group is dropped after grouping unless
/// `include_unidentified` is set.
pub fn group_by_identity<I>(records: I, include_unidentified: bool) -> Vec<Group>
where
    I: IntoIterator<Item = AnnotationRecord>,
{
    let mut by_identity: IndexMap<String, Vec<AnnotationRecord>> = IndexMap::new();
    for record in records {
        by_identity
            .entry(record.identity.clone())
            .or_default()
            .push(record);
    }

    by_identity
        .into_iter()
        .map(|(identity, records)| Group { identity, records })
        .filter(|group| include_unidentified || !group.is_unidentified())
        .collect()
}
