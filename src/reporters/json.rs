//! JSON reporter
//!
//! Outputs the full RepositoryReport as pretty-printed JSON, for
//! machine consumption or piping to jq.

use crate::models::RepositoryReport;
use anyhow::Result;

/// Render report as JSON
pub fn render(report: &RepositoryReport) -> Result<String> {
    Ok(serde_json::to_string_pretty(report)?)
}

/// Render report as compact JSON (single line)
#[allow(dead_code)] // Public API helper
pub fn render_compact(report: &RepositoryReport) -> Result<String> {
    Ok(serde_json::to_string(report)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reporters::tests::test_report;

    #[test]
    fn json_round_trips() {
        let report = test_report();
        let json_str = render(&report).expect("render JSON");
        let parsed: RepositoryReport = serde_json::from_str(&json_str).expect("parse JSON");
        assert_eq!(parsed.total_files, report.total_files);
        assert_eq!(parsed.score, report.score);
    }

    #[test]
    fn compact_is_single_line() {
        let json_str = render_compact(&test_report()).expect("render compact JSON");
        assert!(!json_str.contains('\n'));
    }

    #[test]
    fn fields_use_stable_names() {
        let json_str = render(&test_report()).expect("render JSON");
        let parsed: serde_json::Value = serde_json::from_str(&json_str).expect("parse JSON");
        assert!(parsed["distribution"]["clean"].is_u64());
        assert!(parsed["temporal"]["confidence"].is_string());
        assert!(parsed["cross_file"]["consistency"].is_string());
    }
}
