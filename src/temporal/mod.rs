//! Commit-history (temporal) analysis
//!
//! Code can be laundered through a formatter; history cannot. Four
//! sub-scores, combined under fixed weights, read the repository's
//! commit log for machine cadence:
//!
//! ```text
//!   message-style      0.25   conventional-perfect messages
//!   timing-regularity  0.20   metronomic intervals, rapid-fire runs
//!   change-pattern     0.25   reserved; zero without per-commit stats
//!   style-drift        0.30   author style that never evolves
//! ```
//!
//! Fewer than five commits degrades to a neutral zero with low
//! confidence and skips drift sampling entirely. Per-commit detail
//! retrieval goes through the [`CommitSource`] trait and returns
//! `Option`; a source that cannot deliver simply yields `None` and
//! the affected sub-score contributes zero.

use chrono::{DateTime, FixedOffset, Timelike};
use tracing::debug;

use crate::config::AnalyzerConfig;
use crate::models::{
    clamp_score, ConfidenceLevel, TemporalAnalysis, TemporalBreakdown, TemporalStats,
};
use crate::patterns::static_regex;

/// One commit from the ordered history, newest first.
#[derive(Debug, Clone)]
pub struct CommitInfo {
    pub sha: String,
    pub message: String,
    /// Author timestamp with the author's UTC offset preserved, so
    /// night-activity detection sees their local clock.
    pub author_date: DateTime<FixedOffset>,
}

/// One changed file within a sampled commit.
#[derive(Debug, Clone)]
pub struct CommitFilePatch {
    pub path: String,
    /// Unified-diff hunk text for this file.
    pub patch: String,
}

/// Full detail of one sampled commit.
#[derive(Debug, Clone)]
pub struct CommitDetail {
    pub sha: String,
    pub files: Vec<CommitFilePatch>,
    pub additions: usize,
    pub deletions: usize,
}

/// Retrieval collaborator for per-commit detail. `None` means the
/// detail is unavailable; callers degrade, they do not fail.
pub trait CommitSource {
    fn commit_detail(&self, sha: &str) -> Option<CommitDetail>;
}

/// Source for scans without history access.
pub struct NoDetails;

impl CommitSource for NoDetails {
    fn commit_detail(&self, _sha: &str) -> Option<CommitDetail> {
        None
    }
}

/// Run the full temporal analysis over an ordered commit list.
pub fn analyze_history(
    commits: &[CommitInfo],
    source: &dyn CommitSource,
    config: &AnalyzerConfig,
) -> TemporalAnalysis {
    let t = &config.temporal;
    if commits.len() < t.min_commits {
        debug!(commits = commits.len(), "history too short, skipping");
        return TemporalAnalysis::neutral(format!(
            "only {} commits; need {}",
            commits.len(),
            t.min_commits
        ));
    }

    let breakdown = TemporalBreakdown {
        message_style: message_style_score(commits),
        timing_regularity: timing_score(commits, config),
        change_pattern: 0.0,
        style_drift: style_drift_score(commits, source, config),
    };

    let score = clamp_score(
        breakdown.message_style * t.message_weight
            + breakdown.timing_regularity * t.timing_weight
            + breakdown.change_pattern * t.change_weight
            + breakdown.style_drift * t.drift_weight,
    );

    TemporalAnalysis {
        score,
        confidence: ConfidenceLevel::from_commit_count(commits.len()),
        suspicious: score > 60.0,
        breakdown,
        reason: None,
        stats: Some(stats_for(commits)),
    }
}

/// Conventional-commit perfection reads as machine discipline; vague,
/// profane, or lowercase one-worders read as a person in a hurry.
fn message_style_score(commits: &[CommitInfo]) -> f64 {
    let ai_patterns = [
        static_regex!(r"^(feat|fix|docs|style|refactor|test|chore|perf)(\(.+\))?:\s+[A-Z]"),
        static_regex!(r"^(Add|Update|Fix|Remove|Implement|Create|Delete)\s+[a-z]"),
        static_regex!(r"^(Added|Updated|Fixed|Removed|Implemented|Created|Deleted)\s+"),
        static_regex!(r"(?i)\b(functionality|implementation|enhancement|optimization)\b"),
    ];
    let human_patterns = [
        static_regex!(r"(?i)^(wip|work in progress)"),
        static_regex!(r"(?i)^(fix|fixes|fixed)$"),
        static_regex!(r"(?i)^(update|updates)$"),
        static_regex!(r"^[a-z]"),
        static_regex!(r"(?i)\b(fuck|shit|damn|crap|wtf|lol|oops|ugh)\b"),
        static_regex!(r"^\.+$"),
        static_regex!(r"^[0-9]+$"),
        static_regex!(r"\?\?\?"),
        static_regex!(r"!!!+"),
        static_regex!(r"(?i)asdf|test|tmp|temp"),
        static_regex!(r"(?i)^[a-z\s]{1,10}$"),
    ];

    let mut ai = 0.0;
    let mut human = 0.0;

    for commit in commits {
        let subject = commit.message.lines().next().unwrap_or("");

        ai += ai_patterns
            .iter()
            .flatten()
            .filter(|re| re.is_match(subject))
            .count() as f64
            * 8.0;
        human += human_patterns
            .iter()
            .flatten()
            .filter(|re| re.is_match(subject))
            .count() as f64
            * 12.0;

        let len = subject.chars().count();
        if (51..72).contains(&len) {
            ai += 5.0;
        }
        if len < 10 || len > 100 {
            human += 5.0;
        }

        // Subject, blank line, then a tidy body paragraph
        let lines: Vec<&str> = commit.message.split('\n').collect();
        if lines.len() > 2 && lines[1].is_empty() {
            ai += 10.0;
        }
    }

    // Near-identical message lengths across the whole log
    if message_length_cv(commits) < 0.3 {
        ai += 20.0;
    }

    let raw = (ai - human).max(0.0);
    clamp_score(raw / commits.len() as f64 * 10.0)
}

/// Coefficient of variation of full-message lengths.
fn message_length_cv(commits: &[CommitInfo]) -> f64 {
    let lengths: Vec<f64> = commits
        .iter()
        .map(|c| c.message.chars().count() as f64)
        .collect();
    let mean = lengths.iter().sum::<f64>() / lengths.len() as f64;
    if mean <= 0.0 {
        return 0.0;
    }
    let variance = lengths.iter().map(|l| (l - mean).powi(2)).sum::<f64>() / lengths.len() as f64;
    variance.sqrt() / mean
}

fn timing_score(commits: &[CommitInfo], config: &AnalyzerConfig) -> f64 {
    let t = &config.temporal;
    let mut timestamps: Vec<i64> = commits.iter().map(|c| c.author_date.timestamp()).collect();
    timestamps.sort_unstable();

    let intervals: Vec<i64> = timestamps.windows(2).map(|w| w[1] - w[0]).collect();
    if intervals.is_empty() {
        return 0.0;
    }

    let mut score = 0.0;

    // A person pauses for coffee, sleep, and weekends. A machine
    // commits on a metronome.
    let mean = intervals.iter().sum::<i64>() as f64 / intervals.len() as f64;
    let variance = intervals
        .iter()
        .map(|i| (*i as f64 - mean).powi(2))
        .sum::<f64>()
        / intervals.len() as f64;
    let cv = if mean > 0.0 { variance.sqrt() / mean } else { 0.0 };
    if cv < t.low_interval_cv {
        score += 30.0;
    }

    let quick = intervals
        .iter()
        .filter(|i| **i < t.quick_interval_secs)
        .count();
    if quick as f64 > intervals.len() as f64 * 0.3 {
        score += 20.0;
    }

    let (night_start, night_end) = t.night_hours;
    let night = commits
        .iter()
        .filter(|c| {
            let hour = c.author_date.hour();
            hour >= night_start && hour <= night_end
        })
        .count();
    if night as f64 > commits.len() as f64 * 0.4 {
        score += 15.0;
    }

    clamp_score(score)
}

/// Per-commit style fingerprint used for drift detection.
#[derive(Debug, Clone, Copy)]
struct StyleSignature {
    avg_line_length: f64,
    comment_ratio: f64,
    naming_length: f64,
}

fn style_drift_score(
    commits: &[CommitInfo],
    source: &dyn CommitSource,
    config: &AnalyzerConfig,
) -> f64 {
    let t = &config.temporal;
    let mut signatures = Vec::new();
    let mut atomic = 0usize;
    let mut sampled = 0usize;

    for commit in sample_evenly(commits, t.drift_sample_size) {
        let Some(detail) = source.commit_detail(&commit.sha) else {
            continue;
        };
        if detail.files.is_empty() {
            continue;
        }
        sampled += 1;
        if detail.files.len() == 1 && detail.additions < 100 {
            atomic += 1;
        }
        signatures.push(style_signature(&detail));
    }

    if signatures.len() < t.min_drift_samples {
        return 0.0;
    }

    let mut score = 0.0;
    if style_variance(&signatures) < t.low_drift_variance {
        score += 40.0;
    }
    // Uniformly tiny single-file commits across the sample point to a
    // scripted commit loop.
    if atomic * 2 > sampled {
        score += 20.0;
    }
    clamp_score(score)
}

/// Every `len / count`-th commit, at most `count` of them.
fn sample_evenly(commits: &[CommitInfo], count: usize) -> Vec<&CommitInfo> {
    if commits.len() <= count {
        return commits.iter().collect();
    }
    let step = commits.len() / count;
    commits.iter().step_by(step.max(1)).take(count).collect()
}

fn style_signature(detail: &CommitDetail) -> StyleSignature {
    let mut line_total = 0usize;
    let mut line_count = 0usize;
    let mut code_lines = 0usize;
    let mut comment_lines = 0usize;
    let mut name_total = 0usize;
    let mut name_count = 0usize;

    let identifier = static_regex!(r"\b[a-z][a-zA-Z0-9]*\b");

    for file in &detail.files {
        for line in file.patch.lines() {
            line_total += line.chars().count();
            line_count += 1;

            let trimmed = line.trim();
            if trimmed.starts_with('+') && !trimmed.starts_with("+++") {
                let content = trimmed[1..].trim();
                if content.starts_with("//") || content.starts_with("/*") {
                    comment_lines += 1;
                } else if !content.is_empty() {
                    code_lines += 1;
                }
                if let Some(re) = identifier {
                    for word in re.find_iter(content) {
                        name_total += word.as_str().chars().count();
                        name_count += 1;
                    }
                }
            }
        }
    }

    StyleSignature {
        avg_line_length: ratio(line_total, line_count),
        comment_ratio: ratio(comment_lines, code_lines),
        naming_length: ratio(name_total, name_count),
    }
}

fn ratio(numerator: usize, denominator: usize) -> f64 {
    if denominator > 0 {
        numerator as f64 / denominator as f64
    } else {
        0.0
    }
}

/// Mean of per-metric population variances across the sample.
fn style_variance(signatures: &[StyleSignature]) -> f64 {
    let metrics: [fn(&StyleSignature) -> f64; 3] = [
        |s| s.avg_line_length,
        |s| s.comment_ratio,
        |s| s.naming_length,
    ];
    let mut total = 0.0;
    for metric in metrics {
        let values: Vec<f64> = signatures.iter().map(|s| metric(s)).collect();
        let mean = values.iter().sum::<f64>() / values.len() as f64;
        total += values.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / values.len() as f64;
    }
    total / metrics.len() as f64
}

fn stats_for(commits: &[CommitInfo]) -> TemporalStats {
    let times: Vec<i64> = commits.iter().map(|c| c.author_date.timestamp()).collect();
    let span_secs = match (times.iter().max(), times.iter().min()) {
        (Some(max), Some(min)) => (max - min) as f64,
        _ => 0.0,
    };
    let span_days = span_secs / 86_400.0;
    TemporalStats {
        total_commits: commits.len(),
        span_days,
        commits_per_day: if span_days > 0.0 {
            commits.len() as f64 / span_days
        } else {
            0.0
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use std::cell::Cell;

    fn commit(sha: &str, message: &str, epoch_secs: i64) -> CommitInfo {
        CommitInfo {
            sha: sha.to_string(),
            message: message.to_string(),
            author_date: FixedOffset::east_opt(0)
                .unwrap()
                .timestamp_opt(epoch_secs, 0)
                .unwrap(),
        }
    }

    struct CountingSource {
        calls: Cell<usize>,
    }

    impl CommitSource for CountingSource {
        fn commit_detail(&self, _sha: &str) -> Option<CommitDetail> {
            self.calls.set(self.calls.get() + 1);
            None
        }
    }

    #[test]
    fn short_history_is_neutral_and_skips_sampling() {
        let config = AnalyzerConfig::default();
        let commits: Vec<CommitInfo> = (0..4)
            .map(|i| commit(&format!("s{i}"), "wip", i * 3600))
            .collect();
        let source = CountingSource {
            calls: Cell::new(0),
        };
        let analysis = analyze_history(&commits, &source, &config);
        assert_eq!(analysis.score, 0.0);
        assert_eq!(analysis.confidence, ConfidenceLevel::Low);
        assert!(analysis.reason.is_some());
        assert!(!analysis.suspicious);
        assert_eq!(source.calls.get(), 0);
    }

    #[test]
    fn metronomic_commits_raise_timing_score() {
        let config = AnalyzerConfig::default();
        // Every 10 minutes exactly, all at 03:00-04:00 UTC
        let base = 1_700_000_000 + 3 * 3600;
        let commits: Vec<CommitInfo> = (0..10)
            .map(|i| {
                commit(
                    &format!("s{i}"),
                    "feat(core): Add module scaffolding",
                    base + i * 600,
                )
            })
            .collect();
        let analysis = analyze_history(&commits, &NoDetails, &config);
        // CV ~0 (+30) and >40% night commits (+15)
        assert!(analysis.breakdown.timing_regularity >= 45.0);
        assert!(analysis.score > 0.0);
    }

    #[test]
    fn sloppy_human_log_scores_near_zero() {
        let config = AnalyzerConfig::default();
        let messages = ["wip", "fix", "asdf", "more stuff damn", "oops", "."];
        // Irregular gaps: 1h, 26h, 10m, 70h, 5m
        let offsets = [0, 3_600, 97_200, 97_800, 349_800, 350_100];
        let commits: Vec<CommitInfo> = messages
            .iter()
            .zip(offsets)
            .map(|(m, o)| commit(m, m, 1_700_000_000 + o))
            .collect();
        let analysis = analyze_history(&commits, &NoDetails, &config);
        assert_eq!(analysis.breakdown.message_style, 0.0);
        assert!(analysis.score < 30.0);
    }

    #[test]
    fn constant_style_across_samples_is_drift_evidence() {
        let config = AnalyzerConfig::default();

        struct ConstantSource;
        impl CommitSource for ConstantSource {
            fn commit_detail(&self, sha: &str) -> Option<CommitDetail> {
                Some(CommitDetail {
                    sha: sha.to_string(),
                    files: vec![CommitFilePatch {
                        path: "src/app.js".to_string(),
                        patch: "+const value = compute();\n+// result cache\n".to_string(),
                    }],
                    additions: 2,
                    deletions: 0,
                })
            }
        }

        let commits: Vec<CommitInfo> = (0..20)
            .map(|i| commit(&format!("s{i}"), "update stuff", 1_700_000_000 + i * 7200))
            .collect();
        let analysis = analyze_history(&commits, &ConstantSource, &config);
        // Identical signatures (+40) and all-atomic sample (+20)
        assert_eq!(analysis.breakdown.style_drift, 60.0);
    }

    #[test]
    fn unavailable_details_zero_the_drift_score() {
        let config = AnalyzerConfig::default();
        let commits: Vec<CommitInfo> = (0..20)
            .map(|i| commit(&format!("s{i}"), "update stuff", 1_700_000_000 + i * 7200))
            .collect();
        let analysis = analyze_history(&commits, &NoDetails, &config);
        assert_eq!(analysis.breakdown.style_drift, 0.0);
    }

    #[test]
    fn sampling_is_evenly_spaced_and_bounded() {
        let commits: Vec<CommitInfo> = (0..23)
            .map(|i| commit(&format!("s{i}"), "m", i * 60))
            .collect();
        let sample = sample_evenly(&commits, 5);
        assert_eq!(sample.len(), 5);
        assert_eq!(sample[0].sha, "s0");
        assert_eq!(sample[1].sha, "s4");
    }

    #[test]
    fn stats_cover_the_whole_span() {
        let config = AnalyzerConfig::default();
        let commits: Vec<CommitInfo> = (0..5)
            .map(|i| commit(&format!("s{i}"), "work on parser", i * 86_400))
            .collect();
        let analysis = analyze_history(&commits, &NoDetails, &config);
        let stats = analysis.stats.expect("stats present");
        assert_eq!(stats.total_commits, 5);
        assert!((stats.span_days - 4.0).abs() < 1e-9);
    }
}
