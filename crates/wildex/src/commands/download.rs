use crate::cli::DownloadArgs;
use std::path::PathBuf;
use wildex_batch::{BatchResult, BatchSaver};
use wildex_core::SubmitData;
use wildex_fetch::{FetchConfig, HttpImageSaver};
use wildex_sheets::{default_download_root, is_resume_file, ResumePlan, RowSource, XlsxWorkbook};

/// Submission for `args`, plus the original export when resuming
fn resolve_submission<S: RowSource>(
    source: &S,
    args: &DownloadArgs,
) -> anyhow::Result<(SubmitData, Option<PathBuf>)> {
    if is_resume_file(&args.input) {
        let plan = ResumePlan::from_resume_file(source, &args.input)
            .map_err(|e| anyhow::anyhow!("{}: {}", e, args.input.display()))?;
        tracing::info!(
            original = %plan.original_xlsx.display(),
            "Resuming earlier run, parameters taken from the resume file"
        );
        return Ok((plan.submit, Some(plan.original_xlsx)));
    }

    let submit = SubmitData {
        download_root: args.output.clone().unwrap_or_else(default_download_root),
        input_xlsx: args.input.clone(),
        unidentified_encounters: args.selection.include_unidentified,
        num_annotations_per_id: args.selection.per_id,
    };
    Ok((submit, None))
}

fn print_result(result: &BatchResult, json: bool) -> anyhow::Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(result)?);
    } else {
        println!("{}", result.message);
    }
    Ok(())
}

pub async fn run(args: DownloadArgs) -> anyhow::Result<()> {
    let book = XlsxWorkbook::new();
    let (submit, original_xlsx) = resolve_submission(&book, &args)?;

    let images = HttpImageSaver::new(&FetchConfig::with_timeout_secs(args.timeout_secs))?;
    let saver = BatchSaver::new(book, images);

    let cancel = saver.cancel_switch();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            tracing::warn!("Cancel requested, remaining annotations go to the resume file");
            cancel.cancel();
        }
    });

    let result = saver
        .perform_final_save(&submit, original_xlsx.as_deref())
        .await;
    print_result(&result, args.json)?;

    if !result.success {
        anyhow::bail!("download finished with failures");
    }
    Ok(())
}
