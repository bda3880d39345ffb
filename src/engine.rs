//! Scan orchestration
//!
//! Pure computation layer between retrieval (file walking, git) and
//! presentation (reporters). Per-file analysis is embarrassingly
//! parallel and runs on the rayon pool; the two repository-level
//! analyzers run once on the calling thread. All inputs arrive fully
//! materialized; nothing here touches the filesystem or network.

use std::time::Instant;

use rayon::prelude::*;
use tracing::{debug, info};

use crate::aggregate::aggregate;
use crate::config::AnalyzerConfig;
use crate::crossfile::analyze_coherence;
use crate::formatter::FormatterInfo;
use crate::models::{FileAnalysis, RepositoryReport, SourceFile};
use crate::scoring::{is_generated, score_file};
use crate::temporal::{analyze_history, CommitInfo, CommitSource};

/// Analyze one repository's worth of material.
///
/// `commits` may be empty (no history access); the temporal analysis
/// then degrades to neutral. `formatter` comes from
/// [`detect_auto_formatting`] over the full walked path list -
/// formatter configs are dotfiles that never survive source-extension
/// filtering, so detection cannot be derived from `files` alone.
///
/// [`detect_auto_formatting`]: crate::formatter::detect_auto_formatting
pub fn analyze_repository(
    files: &[SourceFile],
    commits: &[CommitInfo],
    source: &dyn CommitSource,
    formatter: &FormatterInfo,
    config: &AnalyzerConfig,
) -> RepositoryReport {
    let started = Instant::now();

    let analyses = analyze_files(files, formatter, config);

    // Generated files are pinned to zero and would read as perfectly
    // uniform, so they stay out of the coherence sample.
    let organic: Vec<SourceFile> = files
        .iter()
        .filter(|f| !is_generated(&f.content, config))
        .cloned()
        .collect();
    let cross_file = analyze_coherence(&organic, config);

    let temporal = analyze_history(commits, source, config);

    let mut report = aggregate(analyses, temporal, cross_file, config);
    report.scan_duration_ms = started.elapsed().as_millis() as u64;
    info!(
        files = report.total_files,
        score = report.score,
        verdict = report.verdict.label(),
        elapsed_ms = report.scan_duration_ms,
        "scan complete"
    );
    report
}

/// Score every file on the rayon pool, preserving input order.
pub fn analyze_files(
    files: &[SourceFile],
    formatter: &FormatterInfo,
    config: &AnalyzerConfig,
) -> Vec<FileAnalysis> {
    files
        .par_iter()
        .map(|file| {
            let analysis = score_file(file, formatter, config);
            debug!(path = %analysis.path, score = analysis.score, "file scored");
            analysis
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Consistency, Verdict};
    use crate::temporal::NoDetails;

    #[test]
    fn single_file_scan_produces_a_full_report() {
        let config = AnalyzerConfig::default();
        let files = [SourceFile::new(
            "src/main.js",
            "// TODO: fix this ugly hack\nconsole.log('here');\nfunction foo(x) { return x; }\n",
        )];
        let report = analyze_repository(&files, &[], &NoDetails, &FormatterInfo::none(), &config);
        assert_eq!(report.total_files, 1);
        assert_eq!(report.cross_file.consistency, Consistency::NotApplicable);
        assert!(report.temporal.reason.is_some());
        assert!(report.score < 30.0);
    }

    #[test]
    fn generated_files_are_excluded_from_coherence() {
        let config = AnalyzerConfig::default();
        let mut files = vec![
            SourceFile::new("src/a.js", "const a = compute(input);\n"),
            SourceFile::new("src/b.js", "let total = 0;\nif (x) { total += 1; }\n"),
        ];
        for i in 0..6 {
            files.push(SourceFile::new(
                format!("dist/chunk{i}.js"),
                "// @generated\nexport default {};\n",
            ));
        }
        let report = analyze_repository(&files, &[], &NoDetails, &FormatterInfo::none(), &config);
        let excluded = report
            .files
            .clean
            .iter()
            .filter(|f| f.verdict == Verdict::Excluded)
            .count();
        assert_eq!(excluded, 6);
        // Coherence ran over the two organic files only
        assert_ne!(report.cross_file.consistency, Consistency::NotApplicable);
    }

    #[test]
    fn repeated_scans_are_identical() {
        let config = AnalyzerConfig::default();
        let files = [
            SourceFile::new("a.js", "// Helper function to a\nconst x = f();\nuse(x);\n"),
            SourceFile::new("b.js", "if (a) { b(); } else { c(); }\n"),
        ];
        let first = analyze_repository(&files, &[], &NoDetails, &FormatterInfo::none(), &config);
        let second = analyze_repository(&files, &[], &NoDetails, &FormatterInfo::none(), &config);
        assert_eq!(first.score, second.score);
        assert_eq!(first.confidence, second.confidence);
        assert_eq!(first.distribution.clean, second.distribution.clean);
    }
}
