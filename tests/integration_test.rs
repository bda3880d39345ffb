//! End-to-end scenarios through the public library API
//!
//! Each test feeds fully materialized inputs through the same engine
//! entry point the CLI uses and checks the repository-level report.

use chrono::{DateTime, FixedOffset, TimeZone};
use vibescan::config::AnalyzerConfig;
use vibescan::engine::analyze_repository;
use vibescan::formatter::FormatterInfo;
use vibescan::models::{Consistency, SourceFile, Verdict};
use vibescan::reporters;
use vibescan::temporal::{
    analyze_history, CommitDetail, CommitFilePatch, CommitInfo, CommitSource, NoDetails,
};

fn scan(files: &[SourceFile]) -> vibescan::models::RepositoryReport {
    let config = AnalyzerConfig::default();
    analyze_repository(files, &[], &NoDetails, &FormatterInfo::none(), &config)
}

fn at(epoch_secs: i64) -> DateTime<FixedOffset> {
    FixedOffset::east_opt(0)
        .unwrap()
        .timestamp_opt(epoch_secs, 0)
        .unwrap()
}

#[test]
fn messy_human_file_lands_in_the_human_band() {
    let files = [SourceFile::new(
        "src/util.js",
        "// TODO: fix this ugly hack\nconsole.log(\"here\");\nfunction foo(x) { return x; }\n",
    )];
    let report = scan(&files);
    let file = &report.files.clean[0];

    assert!(file.score < 30.0, "score was {}", file.score);
    assert!(matches!(file.verdict, Verdict::Human | Verdict::HumanLikely));
    assert!(!file.human_signs.is_empty());
    // Too short for the entropy dimension to say anything
    assert_eq!(file.dimensions["entropy"].score, 0.0);
}

#[test]
fn assistant_boilerplate_lands_in_the_ai_band() {
    let mut code = String::from("import { settings } from './settings';\n\n");
    code.push_str("const registry = Object.freeze(new Map());\n\n");
    for i in 0..10 {
        code.push_str(&format!(
            "/**\n\
             \x20* Handles the aggregation of incoming records.\n\
             \x20* Validates the payload before accumulating totals.\n\
             \x20* @param {{Array}} records - The records to process.\n\
             \x20* @param {{Object}} options - The processing options.\n\
             \x20* @returns {{number}} The accumulated total.\n\
             \x20* @throws {{Error}} When the payload is invalid.\n\
             \x20*/\n\
             function aggregateRecords{i}(records, options) {{\n\
             \x20\x20try {{\n\
             \x20\x20\x20\x20return records.reduce((acc, record) => acc + record.value, 0);\n\
             \x20\x20}} catch (error) {{\n\
             \x20\x20\x20\x20console.error('Error:', error);\n\
             \x20\x20}}\n\
             }}\n\n"
        ));
    }

    let report = scan(&[SourceFile::new("src/aggregate.js", code)]);
    let file = &report.files.suspicious[0];

    assert!(file.score > 65.0, "score was {}", file.score);
    assert!(matches!(
        file.verdict,
        Verdict::AiLikely | Verdict::AiCertain
    ));
    assert_eq!(file.dimensions["chaos"].score, 0.0);
    assert!(file.dimensions["stylistic"].score > 0.0);
    assert!(!file.patterns.is_empty());
}

#[test]
fn disciplined_commit_log_reads_as_machine_cadence() {
    struct ConstantStyle;
    impl CommitSource for ConstantStyle {
        fn commit_detail(&self, sha: &str) -> Option<CommitDetail> {
            Some(CommitDetail {
                sha: sha.to_string(),
                files: vec![CommitFilePatch {
                    path: "src/service.js".to_string(),
                    patch: "+const total = records.length;\n+// running count\n".to_string(),
                }],
                additions: 2,
                deletions: 0,
            })
        }
    }

    let config = AnalyzerConfig::default();
    // 09:00 UTC start, alternating 200s/800s gaps, subject + blank + body
    let base = 1_700_038_800;
    let mut when = base;
    let commits: Vec<CommitInfo> = (0..100)
        .map(|i| {
            when += if i % 2 == 0 { 200 } else { 800 };
            CommitInfo {
                sha: format!("sha{i}"),
                message: format!(
                    "Add record aggregation step {i}\n\nExtends the pipeline with a new stage."
                ),
                author_date: at(when),
            }
        })
        .collect();

    let analysis = analyze_history(&commits, &ConstantStyle, &config);
    assert_eq!(
        analysis.confidence,
        vibescan::models::ConfidenceLevel::High
    );
    assert!(analysis.breakdown.message_style > 60.0);
    assert!(analysis.breakdown.timing_regularity >= 50.0);
    assert!(analysis.breakdown.style_drift >= 40.0);
    assert!(analysis.score > 45.0, "score was {}", analysis.score);
}

#[test]
fn uniform_line_lengths_trip_the_crossfile_check() {
    // Ten files, every line padded to the same width
    let files: Vec<SourceFile> = (0..10)
        .map(|i| {
            let line = format!("const recordValue{i:02} = transformRecordsForDisplay(input{i:02});");
            assert_eq!(line.len(), 58);
            SourceFile::new(
                format!("src/step{i}.js"),
                format!("{line}\n{line}\n{line}\n"),
            )
        })
        .collect();
    let report = scan(&files);
    assert!(report.cross_file.score >= 25.0);
}

#[test]
fn generated_marker_short_circuits_regardless_of_content() {
    let files = [SourceFile::new(
        "dist/app.min.js",
        "// DO NOT EDIT - built output\n".to_string()
            + &"// Helper function to x\n".repeat(20)
            + "// HACK: wtf\n",
    )];
    let report = scan(&files);
    let file = &report.files.clean[0];
    assert_eq!(file.verdict, Verdict::Excluded);
    assert_eq!(file.score, 0.0);
    assert_eq!(file.confidence, 100.0);
}

#[test]
fn single_file_repo_degrades_both_global_analyzers() {
    let report = scan(&[SourceFile::new("a.js", "let a = 1;\n")]);
    assert_eq!(report.cross_file.consistency, Consistency::NotApplicable);
    assert_eq!(report.cross_file.score, 0.0);
    assert!(report.temporal.reason.is_some());
    assert_eq!(report.temporal.score, 0.0);
}

#[test]
fn every_report_format_renders_from_one_scan() {
    let files = [
        SourceFile::new("src/a.js", "// Helper function to a\nvar x = 1;\n"),
        SourceFile::new("src/b.js", "const calc = (a, b) => a + b;\n"),
    ];
    let report = scan(&files);
    for format in ["text", "json", "markdown"] {
        let out = reporters::report(&report, format).expect("render");
        assert!(!out.is_empty(), "{format} produced nothing");
    }
    let parsed: serde_json::Value =
        serde_json::from_str(&reporters::report(&report, "json").expect("json")).expect("parse");
    assert_eq!(parsed["total_files"], 2);
}

#[test]
fn scores_stay_clamped_on_adversarial_input() {
    let hostile = [
        SourceFile::new("empty.js", ""),
        SourceFile::new("one.js", "x"),
        SourceFile::new(
            "loud.js",
            "// HACK: wtf\n// Helper function to x\n".repeat(200),
        ),
        SourceFile::new("unicode.js", "const héllo = 'wörld'; // ✅ done\n"),
    ];
    let report = scan(&hostile);
    assert!((0.0..=100.0).contains(&report.score));
    assert!((0.0..=100.0).contains(&report.confidence));
    for band in [
        &report.files.suspicious,
        &report.files.questionable,
        &report.files.clean,
    ] {
        for file in band {
            assert!((0.0..=100.0).contains(&file.score), "{}", file.path);
            assert!((0.0..=100.0).contains(&file.confidence), "{}", file.path);
        }
    }
}
