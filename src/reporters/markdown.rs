//! Markdown reporter
//!
//! GitHub-flavored Markdown suitable for pasting into a PR comment or
//! writing to a CI artifact.

use crate::models::RepositoryReport;
use anyhow::Result;
use std::fmt::Write;

pub fn render(report: &RepositoryReport) -> Result<String> {
    let mut out = String::new();

    writeln!(out, "# Vibescan Analysis\n")?;
    writeln!(
        out,
        "**Score:** {:.0}/100 | **Verdict:** {} | **Confidence:** {:.0}%\n",
        report.score,
        report.verdict.label(),
        report.confidence
    )?;

    writeln!(out, "## Files\n")?;
    writeln!(out, "| Band | Count |")?;
    writeln!(out, "|------|-------|")?;
    writeln!(out, "| Suspicious | {} |", report.distribution.suspicious)?;
    writeln!(out, "| Questionable | {} |", report.distribution.questionable)?;
    writeln!(out, "| Clean | {} |", report.distribution.clean)?;
    writeln!(out)?;

    if !report.files.suspicious.is_empty() {
        writeln!(out, "### Suspicious files\n")?;
        writeln!(out, "| File | Score | Confidence | Evidence |")?;
        writeln!(out, "|------|-------|------------|----------|")?;
        for file in report.files.suspicious.iter().take(20) {
            writeln!(
                out,
                "| `{}` | {:.0} | {:.0}% | {} |",
                file.path,
                file.score,
                file.confidence,
                file.reasons.join("; ")
            )?;
        }
        writeln!(out)?;
    }

    writeln!(out, "## History\n")?;
    match &report.temporal.reason {
        Some(reason) => writeln!(out, "_{reason}_\n")?,
        None => {
            let t = &report.temporal;
            writeln!(
                out,
                "Temporal score {:.0} (messages {:.0}, timing {:.0}, drift {:.0})\n",
                t.score,
                t.breakdown.message_style,
                t.breakdown.timing_regularity,
                t.breakdown.style_drift
            )?;
        }
    }
    writeln!(
        out,
        "Cross-file uniformity: {:.0} ({})\n",
        report.cross_file.score, report.cross_file.consistency
    )?;

    if !report.top_patterns.is_empty() {
        writeln!(out, "## Top evidence\n")?;
        writeln!(out, "| Pattern | Files | Share |")?;
        writeln!(out, "|---------|-------|-------|")?;
        for row in &report.top_patterns {
            writeln!(
                out,
                "| {} | {} | {}% |",
                row.pattern, row.occurrences, row.percentage
            )?;
        }
    }

    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reporters::tests::test_report;

    #[test]
    fn renders_tables() {
        let out = render(&test_report()).expect("render markdown");
        assert!(out.starts_with("# Vibescan Analysis"));
        assert!(out.contains("| Band | Count |"));
        assert!(out.contains("## History"));
    }
}
