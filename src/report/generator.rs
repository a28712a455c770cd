//! Plain-text finance report generation.
//!
//! Each member becomes a two-line block followed by a blank line:
//!
//! ```text
//! Name: Jane Doe
//! Financial Contributions: $500
//! ```

use crate::models::{Chamber, MemberSummary};
use anyhow::{Context, Result};
use std::path::{Path, PathBuf};
use tracing::debug;

/// Render summaries as report text.
///
/// Totals are printed with their plain numeric display, without
/// separators or fixed decimals.
pub fn render(summaries: &[MemberSummary]) -> String {
    let mut output = String::new();

    for summary in summaries {
        output.push_str(&generate_member_block(summary));
    }

    output
}

fn generate_member_block(summary: &MemberSummary) -> String {
    format!(
        "Name: {}\nFinancial Contributions: ${}\n\n",
        summary.name, summary.financial_contributions
    )
}

/// Path of the report file for `chamber` inside `data_dir`.
pub fn report_path(data_dir: &Path, chamber: Chamber) -> PathBuf {
    data_dir.join(chamber.report_file_name())
}

/// Write the rendered report, replacing any existing file.
pub fn write_report(path: &Path, summaries: &[MemberSummary]) -> Result<()> {
    let content = render(summaries);
    std::fs::write(path, content)
        .with_context(|| format!("Failed to write report to {}", path.display()))?;

    debug!("Wrote {} summaries to {}", summaries.len(), path.display());
    Ok(())
}
