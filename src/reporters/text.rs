//! Text (terminal) reporter with colors and formatting

use crate::models::{ConfidenceLevel, RepositoryReport, Verdict};
use anyhow::Result;

/// Reset ANSI color
const RESET: &str = "\x1b[0m";
const BOLD: &str = "\x1b[1m";
const DIM: &str = "\x1b[2m";

/// Verdict colors (ANSI escape codes)
fn verdict_color(verdict: Verdict) -> &'static str {
    match verdict {
        Verdict::AiCertain | Verdict::AiLikely => "\x1b[31m", // Red
        Verdict::Mixed => "\x1b[33m",                         // Yellow
        Verdict::HumanLikely | Verdict::Human => "\x1b[32m",  // Green
        Verdict::Uncertain | Verdict::Excluded => "\x1b[90m", // Gray
    }
}

fn score_color(score: f64) -> &'static str {
    if score >= 65.0 {
        "\x1b[31m"
    } else if score >= 30.0 {
        "\x1b[33m"
    } else {
        "\x1b[32m"
    }
}

fn confidence_label(level: ConfidenceLevel) -> &'static str {
    match level {
        ConfidenceLevel::Low => "low",
        ConfidenceLevel::Medium => "medium",
        ConfidenceLevel::High => "high",
    }
}

/// Render report as formatted terminal output
pub fn render(report: &RepositoryReport) -> Result<String> {
    let mut out = String::new();

    let v_color = verdict_color(report.verdict);
    out.push_str(&format!("\n{BOLD}Vibescan Analysis{RESET}\n"));
    out.push_str(&format!(
        "{DIM}──────────────────────────────────────{RESET}\n"
    ));
    out.push_str(&format!(
        "Score: {BOLD}{:.0}/100{RESET}  Verdict: {v_color}{BOLD}{}{RESET}  Confidence: {:.0}%\n",
        report.score,
        report.verdict.label(),
        report.confidence
    ));
    out.push_str(&format!(
        "Files: {}  {}\n\n",
        report.total_files,
        format_duration(report.scan_duration_ms)
    ));

    // Band distribution
    let d = &report.distribution;
    out.push_str(&format!("{BOLD}FILES{RESET}\n"));
    out.push_str(&format!(
        "  \x1b[31m{} suspicious{RESET} | \x1b[33m{} questionable{RESET} | \x1b[32m{} clean{RESET}\n\n",
        d.suspicious, d.questionable, d.clean
    ));

    // Worst offenders
    if !report.files.suspicious.is_empty() {
        out.push_str(&format!(
            "{DIM}  SCORE  CONF  FILE{RESET}\n"
        ));
        for file in report.files.suspicious.iter().take(10) {
            out.push_str(&format!(
                "  {}{:>5.0}{RESET}  {:>3.0}%  {}\n",
                score_color(file.score),
                file.score,
                file.confidence,
                shorten(&file.path, 50)
            ));
            if let Some(reason) = file.reasons.first() {
                out.push_str(&format!("         {DIM}{reason}{RESET}\n"));
            }
        }
        let remaining = report.files.suspicious.len().saturating_sub(10);
        if remaining > 0 {
            out.push_str(&format!(
                "  {DIM}...and {} more (use --format json for the full list){RESET}\n",
                remaining
            ));
        }
        out.push('\n');
    }

    // History
    out.push_str(&format!("{BOLD}HISTORY{RESET}\n"));
    match &report.temporal.reason {
        Some(reason) => out.push_str(&format!("  {DIM}{reason}{RESET}\n")),
        None => {
            let t = &report.temporal;
            out.push_str(&format!(
                "  Score: {}{:.0}{RESET} ({} confidence)  messages {:.0} | timing {:.0} | drift {:.0}\n",
                score_color(t.score),
                t.score,
                confidence_label(t.confidence),
                t.breakdown.message_style,
                t.breakdown.timing_regularity,
                t.breakdown.style_drift
            ));
            if let Some(stats) = &t.stats {
                out.push_str(&format!(
                    "  {DIM}{} commits over {:.0} days ({:.1}/day){RESET}\n",
                    stats.total_commits, stats.span_days, stats.commits_per_day
                ));
            }
        }
    }
    out.push_str(&format!(
        "  Cross-file uniformity: {}{:.0}{RESET} ({})\n\n",
        score_color(report.cross_file.score),
        report.cross_file.score,
        report.cross_file.consistency
    ));

    // Evidence table
    if !report.top_patterns.is_empty() {
        out.push_str(&format!("{BOLD}TOP EVIDENCE{RESET}\n"));
        out.push_str(&format!("{DIM}  FILES  SHARE  PATTERN{RESET}\n"));
        for row in &report.top_patterns {
            out.push_str(&format!(
                "  {:>5}  {:>4}%  {}\n",
                row.occurrences, row.percentage, row.pattern
            ));
        }
        out.push('\n');
    }

    match report.verdict {
        Verdict::Human | Verdict::HumanLikely => {
            out.push_str(&format!("{DIM}Reads like human work.{RESET}\n"));
        }
        Verdict::Mixed => {
            out.push_str(&format!(
                "{DIM}Mixed signals. Review the suspicious files above.{RESET}\n"
            ));
        }
        Verdict::AiLikely | Verdict::AiCertain => {
            out.push_str(&format!(
                "{DIM}Strong machine-authorship signals across the set.{RESET}\n"
            ));
        }
        Verdict::Uncertain | Verdict::Excluded => {
            out.push_str(&format!("{DIM}Not enough evidence either way.{RESET}\n"));
        }
    }

    Ok(out)
}

fn format_duration(ms: u64) -> String {
    if ms >= 1000 {
        format!("{:.1}s", ms as f64 / 1000.0)
    } else {
        format!("{ms}ms")
    }
}

/// Keep the tail of long paths - use chars() to avoid UTF-8 panics
fn shorten(path: &str, max: usize) -> String {
    let count = path.chars().count();
    if count <= max {
        return path.to_string();
    }
    let skip = count - (max - 3);
    format!("...{}", path.chars().skip(skip).collect::<String>())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reporters::tests::test_report;

    #[test]
    fn renders_header_and_bands() {
        let out = render(&test_report()).expect("render text");
        assert!(out.contains("Vibescan Analysis"));
        assert!(out.contains("suspicious"));
        assert!(out.contains("clean"));
    }

    #[test]
    fn shows_degradation_reason_without_history() {
        let out = render(&test_report()).expect("render text");
        assert!(out.contains("commits"));
    }

    #[test]
    fn shorten_keeps_the_tail() {
        let long = "src/very/deep/directory/structure/with/many/levels/file.js";
        let short = shorten(long, 20);
        assert!(short.starts_with("..."));
        assert!(short.ends_with("file.js"));
        assert!(short.chars().count() <= 20);
    }
}
