use crate::cli::Selection;
use std::path::Path;
use wildex_core::{prepare_groups, Group};
use wildex_sheets::{RowSource, XlsxWorkbook};

fn plan_groups<S: RowSource>(
    source: &S,
    input: &Path,
    selection: &Selection,
) -> anyhow::Result<Vec<Group>> {
    let rows = source.read_sheet(input, 0)?;
    let groups = prepare_groups(&rows, selection.include_unidentified, selection.per_id);
    tracing::info!(
        rows = rows.len(),
        groups = groups.len(),
        annotations = groups.iter().map(Group::len).sum::<usize>(),
        "Planned download"
    );
    Ok(groups)
}

pub fn run(input: &Path, selection: &Selection) -> anyhow::Result<()> {
    let groups = plan_groups(&XlsxWorkbook::new(), input, selection)?;
    println!("{}", serde_json::to_string_pretty(&groups)?);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use wildex_core::{AnnotationCount, AnnotationRecord, SubmitData};
    use wildex_sheets::ArtifactSink;

    fn record(identity: &str, media: &str, viewpoint: &str) -> AnnotationRecord {
        AnnotationRecord {
            identity: identity.to_string(),
            media_asset_id: media.to_string(),
            image_url: format!("https://img.test/{}", media),
            bbox: "[0, 0, 5, 5]".to_string(),
            viewpoint: viewpoint.to_string(),
            error_message: None,
        }
    }

    #[test]
    fn test_plan_reads_and_shortlists() {
        let temp = tempfile::TempDir::new().unwrap();
        let input = temp.path().join("export.xlsx");
        let book = XlsxWorkbook::new();
        let records = vec![
            record("Zara", "a1.jpg", "front"),
            record("Zara", "a2.jpg", "right"),
            record("Zara", "a3.jpg", "frontleft"),
            record("Unidentified_annotations", "u1.jpg", "left"),
        ];
        book.write_error_artifact(&input, &records, &SubmitData::new(temp.path(), &input))
            .unwrap();

        let selection = Selection {
            per_id: "1".parse::<AnnotationCount>().unwrap(),
            include_unidentified: false,
        };
        let groups = plan_groups(&book, &input, &selection).unwrap();

        assert_eq!(groups.len(), 1);
        assert_eq!(groups[0].identity, "Zara");
        assert_eq!(groups[0].records.len(), 1);
        assert_eq!(groups[0].records[0].media_asset_id, "a2.jpg");
    }

    #[test]
    fn test_plan_missing_input() {
        let temp = tempfile::TempDir::new().unwrap();
        let selection = Selection {
            per_id: AnnotationCount::All,
            include_unidentified: true,
        };
        let missing = temp.path().join("x.xlsx");
        assert!(plan_groups(&XlsxWorkbook::new(), &missing, &selection).is_err());
    }
}
