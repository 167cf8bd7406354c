//! Viewpoint-diverse shortlisting of an individual's annotations

use crate::config::AnnotationCount;
use crate::group::Group;
use crate::types::{AnnotationRecord, Viewpoint};
use std::iter;

/// Viewpoints filled first, in this order, when more than one annotation is kept
pub const PREFERRED_VIEWPOINTS: [Viewpoint; 5] = [
    Viewpoint::Left,
    Viewpoint::Right,
    Viewpoint::Front,
    Viewpoint::Back,
    Viewpoint::Up,
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Match {
    Exact(Viewpoint),
    /// Compound tags containing the viewpoint, e.g. "frontleft" for LEFT
    Similar(Viewpoint),
    Any,
}

impl Match {
    fn accepts(&self, record: &AnnotationRecord) -> bool {
        match self {
            Match::Exact(v) => record.viewpoint == v.as_str(),
            Match::Similar(v) => record.viewpoint.contains(v.as_str()),
            Match::Any => true,
        }
    }
}

/// Records not yet selected during one shortlist call
struct WorkingSet<'a> {
    remaining: Vec<&'a AnnotationRecord>,
}

impl<'a> WorkingSet<'a> {
    fn new(records: &'a [AnnotationRecord]) -> Self {
        Self {
            remaining: records.iter().collect(),
        }
    }

    /// Remove and return the first remaining record accepted by `m`
    fn pull(&mut self, m: Match) -> Option<&'a AnnotationRecord> {
        let index = self.remaining.iter().position(|r| m.accepts(r))?;
        Some(self.remaining.remove(index))
    }

    /// Try each match in order until one pulls a record
    fn pull_first(&mut self, order: &[Match]) -> Option<&'a AnnotationRecord> {
        order.iter().find_map(|&m| self.pull(m))
    }
}

/// Preferred viewpoint per output slot; `None` slots take any record
fn preference_slots(count: usize) -> Vec<Option<Viewpoint>> {
    PREFERRED_VIEWPOINTS
        .iter()
        .copied()
        .map(Some)
        .chain(iter::repeat(None))
        .take(count)
        .collect()
}

/// Select up to `count` records of a group, favouring viewpoint coverage.
///
/// Each record is selected at most once; ties go to the earliest record.
pub fn shortlist(records: &[AnnotationRecord], count: AnnotationCount) -> Vec<AnnotationRecord> {
    if count.keeps_all_of(records.len()) {
        return records.to_vec();
    }
    let n = match count {
        AnnotationCount::Count(n) => n.get(),
        AnnotationCount::All => records.len(),
    };

    let mut working = WorkingSet::new(records);

    if n == 1 {
        return working
            .pull_first(&[
                Match::Exact(Viewpoint::Left),
                Match::Exact(Viewpoint::Right),
                Match::Similar(Viewpoint::Left),
                Match::Similar(Viewpoint::Right),
                Match::Any,
            ])
            .into_iter()
            .cloned()
            .collect();
    }

    preference_slots(n)
        .into_iter()
        .filter_map(|slot| match slot {
            Some(v) => working.pull_first(&[Match::Exact(v), Match::Similar(v), Match::Any]),
            None => working.pull(Match::Any),
        })
        .cloned()
        .collect()
}

/// Shortlist every group
pub fn shortlist_groups(groups: Vec<Group>, count: AnnotationCount) -> Vec<Group> {
    groups
        .into_iter()
        .map(|group| {
            let records = shortlist(&group.records, count);
            tracing::debug!(
                identity = %group.identity,
                available = group.records.len(),
                kept = records.len(),
                "Shortlisted annotations"
            );
            Group {
                identity: group.identity,
                records,
            }
        })
        .collect()
}
