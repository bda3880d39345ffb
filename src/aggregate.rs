//! Repository-level aggregation
//!
//! Folds every per-file analysis plus the two global analyzers into
//! one `RepositoryReport`: a weighted global score (temporal 0.30,
//! cross-file 0.15, mean file score 0.55 by default), three fixed
//! score bands, and a ranked table of the most frequent evidence.

use std::collections::BTreeMap;

use crate::config::AnalyzerConfig;
use crate::models::{
    clamp_score, CrossFileAnalysis, Distribution, FileAnalysis, FileBands, PatternFrequency,
    RepositoryReport, TemporalAnalysis, Verdict,
};

pub fn aggregate(
    files: Vec<FileAnalysis>,
    temporal: TemporalAnalysis,
    cross_file: CrossFileAnalysis,
    config: &AnalyzerConfig,
) -> RepositoryReport {
    let a = &config.aggregate;
    let total_files = files.len();

    // Generated files carry a pinned zero and would dilute the mean.
    let scored: Vec<&FileAnalysis> = files
        .iter()
        .filter(|f| f.verdict != Verdict::Excluded)
        .collect();

    let mean_file_score = if scored.is_empty() {
        0.0
    } else {
        scored.iter().map(|f| f.score).sum::<f64>() / scored.len() as f64
    };
    let mean_confidence = if scored.is_empty() {
        50.0
    } else {
        scored.iter().map(|f| f.confidence).sum::<f64>() / scored.len() as f64
    };

    let score = clamp_score(
        temporal.score * a.temporal_weight
            + cross_file.score * a.crossfile_weight
            + mean_file_score * a.files_weight,
    );
    let confidence = clamp_score(mean_confidence);

    let top_patterns = pattern_table(&files, &temporal, total_files, a.top_patterns);

    let mut bands = FileBands::default();
    for file in files {
        if file.score >= a.suspicious_min {
            bands.suspicious.push(file);
        } else if file.score >= a.questionable_min {
            bands.questionable.push(file);
        } else {
            bands.clean.push(file);
        }
    }
    // Worst first within each band
    for band in [
        &mut bands.suspicious,
        &mut bands.questionable,
        &mut bands.clean,
    ] {
        band.sort_by(|x, y| y.score.total_cmp(&x.score));
    }

    let distribution = Distribution {
        suspicious: bands.suspicious.len(),
        questionable: bands.questionable.len(),
        clean: bands.clean.len(),
    };

    RepositoryReport {
        score,
        verdict: Verdict::from_score(score, confidence),
        confidence,
        distribution,
        files: bands,
        temporal,
        cross_file,
        top_patterns,
        total_files,
        scan_duration_ms: 0,
    }
}

/// How many files each piece of evidence appeared in, ranked.
fn pattern_table(
    files: &[FileAnalysis],
    temporal: &TemporalAnalysis,
    total_files: usize,
    top_n: usize,
) -> Vec<PatternFrequency> {
    let mut counts: BTreeMap<String, usize> = BTreeMap::new();
    let mut bump = |key: &str| *counts.entry(key.to_string()).or_insert(0) += 1;

    for file in files {
        if dimension_score(file, "cognitive") > 60.0 {
            bump("cognitive complexity anomaly");
        }
        if dimension_score(file, "stylistic") > 60.0 {
            bump("dense stylistic patterns");
        }
        if dimension_score(file, "chaos") > 30.0 {
            bump("human traces");
        }
        // Each triggered pattern counts once per file
        let mut seen: Vec<&str> = Vec::new();
        for hit in &file.patterns {
            if !seen.contains(&hit.id.as_str()) {
                seen.push(&hit.id);
                bump(&hit.id);
            }
        }
    }

    if temporal.breakdown.timing_regularity > 60.0 {
        bump("suspicious commit timing");
    }
    if temporal.breakdown.style_drift > 60.0 {
        bump("static style across history");
    }

    let mut rows: Vec<PatternFrequency> = counts
        .into_iter()
        .map(|(pattern, occurrences)| PatternFrequency {
            pattern,
            occurrences,
            percentage: ((occurrences as f64 / total_files.max(1) as f64) * 100.0).round() as u32,
        })
        .collect();
    rows.sort_by(|x, y| y.occurrences.cmp(&x.occurrences).then(x.pattern.cmp(&y.pattern)));
    rows.truncate(top_n);
    rows
}

fn dimension_score(file: &FileAnalysis, name: &str) -> f64 {
    file.dimensions.get(name).map(|d| d.score).unwrap_or(0.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{ConfidenceLevel, PatternHit, ScoreBreakdown, TemporalBreakdown};
    use std::collections::BTreeMap;

    fn analysis(path: &str, score: f64) -> FileAnalysis {
        FileAnalysis {
            path: path.to_string(),
            score,
            confidence: 70.0,
            verdict: Verdict::from_score(score, 70.0),
            dimensions: BTreeMap::new(),
            breakdown: ScoreBreakdown::default(),
            patterns: Vec::new(),
            reasons: Vec::new(),
            human_signs: Vec::new(),
            line_count: 10,
        }
    }

    fn quiet_temporal() -> TemporalAnalysis {
        TemporalAnalysis::neutral("no history")
    }

    #[test]
    fn weighted_global_score() {
        let config = AnalyzerConfig::default();
        let files = vec![analysis("a.js", 80.0), analysis("b.js", 40.0)];
        let temporal = TemporalAnalysis {
            score: 50.0,
            confidence: ConfidenceLevel::High,
            breakdown: TemporalBreakdown::default(),
            suspicious: false,
            reason: None,
            stats: None,
        };
        let cross_file = CrossFileAnalysis {
            score: 20.0,
            consistency: crate::models::Consistency::Normal,
        };
        let report = aggregate(files, temporal, cross_file, &config);
        // 50*0.30 + 20*0.15 + 60*0.55
        assert!((report.score - 51.0).abs() < 1e-9);
    }

    #[test]
    fn files_land_in_the_right_bands() {
        let config = AnalyzerConfig::default();
        let files = vec![
            analysis("hot.js", 70.0),
            analysis("warm.js", 45.0),
            analysis("edge.js", 30.0),
            analysis("cold.js", 10.0),
        ];
        let report = aggregate(
            files,
            quiet_temporal(),
            CrossFileAnalysis::not_applicable(),
            &config,
        );
        assert_eq!(report.distribution.suspicious, 1);
        assert_eq!(report.distribution.questionable, 2);
        assert_eq!(report.distribution.clean, 1);
        assert_eq!(report.files.questionable[0].path, "warm.js");
    }

    #[test]
    fn excluded_files_do_not_dilute_the_mean() {
        let config = AnalyzerConfig::default();
        let mut generated = analysis("dist/bundle.js", 0.0);
        generated.verdict = Verdict::Excluded;
        generated.confidence = 100.0;
        let files = vec![analysis("a.js", 60.0), generated];
        let report = aggregate(
            files,
            quiet_temporal(),
            CrossFileAnalysis::not_applicable(),
            &config,
        );
        // Mean over scored files only: 60 * 0.55
        assert!((report.score - 33.0).abs() < 1e-9);
        assert_eq!(report.total_files, 2);
    }

    #[test]
    fn pattern_table_ranks_by_file_presence() {
        let config = AnalyzerConfig::default();
        let hit = |id: &str| PatternHit {
            id: id.to_string(),
            name: id.to_string(),
            count: 3,
            weight: 5.0,
            contribution: 15.0,
        };
        let mut a = analysis("a.js", 50.0);
        a.patterns = vec![hit("vocab-utilize"), hit("emoji-checkmarks")];
        let mut b = analysis("b.js", 50.0);
        b.patterns = vec![hit("vocab-utilize")];
        let report = aggregate(
            vec![a, b],
            quiet_temporal(),
            CrossFileAnalysis::not_applicable(),
            &config,
        );
        assert_eq!(report.top_patterns[0].pattern, "vocab-utilize");
        assert_eq!(report.top_patterns[0].occurrences, 2);
        assert_eq!(report.top_patterns[0].percentage, 100);
        assert_eq!(report.top_patterns[1].occurrences, 1);
    }

    #[test]
    fn temporal_evidence_reaches_the_table() {
        let config = AnalyzerConfig::default();
        let temporal = TemporalAnalysis {
            score: 70.0,
            confidence: ConfidenceLevel::High,
            breakdown: TemporalBreakdown {
                message_style: 50.0,
                timing_regularity: 65.0,
                change_pattern: 0.0,
                style_drift: 80.0,
            },
            suspicious: true,
            reason: None,
            stats: None,
        };
        let report = aggregate(
            vec![analysis("a.js", 10.0)],
            temporal,
            CrossFileAnalysis::not_applicable(),
            &config,
        );
        let names: Vec<&str> = report
            .top_patterns
            .iter()
            .map(|p| p.pattern.as_str())
            .collect();
        assert!(names.contains(&"suspicious commit timing"));
        assert!(names.contains(&"static style across history"));
    }
}
