//! Core data models for Vibescan
//!
//! These models are shared across the analysis pipeline: dimension
//! sub-scores, per-file analyses, the two repository-level analyses,
//! and the final report handed to reporters. Everything here is plain
//! serializable data; no component holds handles or shared state.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Clamp a score to [0, 100]. NaN folds to 0 so a degenerate
/// computation can never leak an unusable value upward.
pub fn clamp_score(value: f64) -> f64 {
    if value.is_nan() {
        return 0.0;
    }
    value.clamp(0.0, 100.0)
}

/// Discrete confidence levels for analyses whose certainty is driven
/// by sample size rather than evidence strength.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ConfidenceLevel {
    Low,
    Medium,
    High,
}

impl ConfidenceLevel {
    /// Derive confidence from commit count: fewer than 5 commits is
    /// too sparse to trust, 20+ is a solid sample.
    pub fn from_commit_count(count: usize) -> Self {
        if count < 5 {
            ConfidenceLevel::Low
        } else if count < 20 {
            ConfidenceLevel::Medium
        } else {
            ConfidenceLevel::High
        }
    }

    /// One-way mapping to the numeric confidence scale.
    pub fn as_numeric(self) -> f64 {
        match self {
            ConfidenceLevel::Low => 25.0,
            ConfidenceLevel::Medium => 60.0,
            ConfidenceLevel::High => 90.0,
        }
    }
}

impl std::fmt::Display for ConfidenceLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfidenceLevel::Low => write!(f, "low"),
            ConfidenceLevel::Medium => write!(f, "medium"),
            ConfidenceLevel::High => write!(f, "high"),
        }
    }
}

/// Verdict bands derived from score plus confidence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Verdict {
    /// Generated file (build artifact, codegen output) - not scored.
    Excluded,
    /// Analysis produced too little evidence to call either way.
    Uncertain,
    Human,
    HumanLikely,
    Mixed,
    AiLikely,
    AiCertain,
}

impl Verdict {
    /// Band a score into a verdict. Low confidence overrides the
    /// score: a weak signal is reported as uncertain, not as a call.
    pub fn from_score(score: f64, confidence: f64) -> Self {
        if confidence < 40.0 {
            return Verdict::Uncertain;
        }
        if score > 85.0 {
            Verdict::AiCertain
        } else if score > 65.0 {
            Verdict::AiLikely
        } else if score > 40.0 {
            Verdict::Mixed
        } else if score < 20.0 {
            Verdict::Human
        } else {
            Verdict::HumanLikely
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Verdict::Excluded => "auto-generated (excluded)",
            Verdict::Uncertain => "uncertain",
            Verdict::Human => "human",
            Verdict::HumanLikely => "probably human",
            Verdict::Mixed => "mixed / assisted",
            Verdict::AiLikely => "probably AI",
            Verdict::AiCertain => "AI near-certain",
        }
    }
}

impl std::fmt::Display for Verdict {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// One input file, fully materialized before analysis begins.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SourceFile {
    pub path: String,
    pub content: String,
}

impl SourceFile {
    pub fn new(path: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            content: content.into(),
        }
    }

    /// Lowercased extension, if any.
    pub fn extension(&self) -> Option<String> {
        std::path::Path::new(&self.path)
            .extension()
            .map(|e| e.to_string_lossy().to_lowercase())
    }
}

/// Output of a single dimension detector for a single file.
///
/// `details` is free-form supporting evidence (counts, flags,
/// extracted fragments), serialized from the dimension's own typed
/// detail struct.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DimensionResult {
    pub score: f64,
    pub details: serde_json::Value,
}

impl DimensionResult {
    pub fn new<T: Serialize>(score: f64, details: &T) -> Self {
        Self {
            score: clamp_score(score),
            details: serde_json::to_value(details).unwrap_or(serde_json::Value::Null),
        }
    }

    /// A zero-score result carrying no evidence.
    pub fn neutral() -> Self {
        Self {
            score: 0.0,
            details: serde_json::Value::Null,
        }
    }
}

/// One triggered pattern with its per-match contribution.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PatternHit {
    pub id: String,
    pub name: String,
    pub count: i64,
    /// Effective weight after any formatting discount.
    pub weight: f64,
    /// count x effective weight.
    pub contribution: f64,
}

/// Coarse regrouping of the six dimension scores for reporting.
///
/// Fixed many-to-one mapping: entropy + cognitive feed `structure`,
/// stylistic + fingerprint feed `lexical`, hallucination feeds
/// `behavior`, and chaos (negated, since it is human evidence) feeds
/// `context`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ScoreBreakdown {
    pub structure: f64,
    pub lexical: f64,
    pub behavior: f64,
    pub context: f64,
}

/// Full analysis of one file. Immutable once returned by the fusion
/// engine; the aggregator only reads it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FileAnalysis {
    pub path: String,
    /// 0-100, higher = more AI-like.
    pub score: f64,
    /// 0-100 certainty in the score.
    pub confidence: f64,
    pub verdict: Verdict,
    /// Dimension name -> sub-score and evidence.
    pub dimensions: BTreeMap<String, DimensionResult>,
    pub breakdown: ScoreBreakdown,
    /// Patterns that fired during the stylistic replay.
    pub patterns: Vec<PatternHit>,
    /// One human-readable line per triggered fusion rule.
    pub reasons: Vec<String>,
    /// Human-evidence traces (chaos markers) found in the file.
    pub human_signs: Vec<String>,
    pub line_count: usize,
}

/// Named sub-scores of the temporal analysis.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TemporalBreakdown {
    pub message_style: f64,
    pub timing_regularity: f64,
    pub change_pattern: f64,
    pub style_drift: f64,
}

/// Summary statistics attached to a successful temporal analysis.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TemporalStats {
    pub total_commits: usize,
    pub span_days: f64,
    pub commits_per_day: f64,
}

/// Repository-level commit-history analysis.
///
/// When history is unavailable or too short this degrades to a
/// neutral zero score with low confidence - never an error.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TemporalAnalysis {
    pub score: f64,
    pub confidence: ConfidenceLevel,
    pub breakdown: TemporalBreakdown,
    pub suspicious: bool,
    /// Why the analysis degraded, when it did.
    pub reason: Option<String>,
    pub stats: Option<TemporalStats>,
}

impl TemporalAnalysis {
    /// Neutral result for missing or insufficient history.
    pub fn neutral(reason: impl Into<String>) -> Self {
        Self {
            score: 0.0,
            confidence: ConfidenceLevel::Low,
            breakdown: TemporalBreakdown::default(),
            suspicious: false,
            reason: Some(reason.into()),
            stats: None,
        }
    }
}

/// Cross-file consistency label.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Consistency {
    /// Fewer than 2 files - coherence is undefined.
    NotApplicable,
    Normal,
    /// Suspiciously uniform across the file set.
    Suspicious,
}

impl std::fmt::Display for Consistency {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Consistency::NotApplicable => write!(f, "N/A"),
            Consistency::Normal => write!(f, "normal"),
            Consistency::Suspicious => write!(f, "high (suspicious)"),
        }
    }
}

/// Repository-level uniformity analysis across all files.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CrossFileAnalysis {
    pub score: f64,
    pub consistency: Consistency,
}

impl CrossFileAnalysis {
    /// Zero-score result for singleton or empty file sets.
    pub fn not_applicable() -> Self {
        Self {
            score: 0.0,
            consistency: Consistency::NotApplicable,
        }
    }
}

/// One row of the ranked pattern-frequency table.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PatternFrequency {
    pub pattern: String,
    pub occurrences: usize,
    /// Share of analyzed files the pattern fired in, 0-100.
    pub percentage: u32,
}

/// Counts of files per score band.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Distribution {
    pub suspicious: usize,
    pub questionable: usize,
    pub clean: usize,
}

/// Per-file results partitioned into the three fixed score bands.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FileBands {
    pub suspicious: Vec<FileAnalysis>,
    pub questionable: Vec<FileAnalysis>,
    pub clean: Vec<FileAnalysis>,
}

/// Top-level scan output. The sole artifact exposed to presentation
/// layers; serializable as plain nested key-value data.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RepositoryReport {
    pub score: f64,
    pub verdict: Verdict,
    pub confidence: f64,
    pub distribution: Distribution,
    pub files: FileBands,
    pub temporal: TemporalAnalysis,
    pub cross_file: CrossFileAnalysis,
    pub top_patterns: Vec<PatternFrequency>,
    pub total_files: usize,
    pub scan_duration_ms: u64,
}
