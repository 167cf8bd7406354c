use std::path::Path;
use wildex_sheets::{read_resume_descriptor, XlsxWorkbook};

pub fn run(input: &Path) -> anyhow::Result<()> {
    let descriptor = read_resume_descriptor(&XlsxWorkbook::new(), input)
        .map_err(|e| anyhow::anyhow!("{}: {}", e, input.display()))?;
    println!("{}", serde_json::to_string_pretty(&descriptor)?);
    Ok(())
}
