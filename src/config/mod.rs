//! Configuration for the analysis engine
//!
//! All thresholds and weights live in one `AnalyzerConfig` value,
//! constructed once at process start and passed by reference into
//! every component. There is no ambient or global mutable state.
//!
//! An optional `vibescan.toml` can override individual fields; unset
//! fields keep their defaults.

use anyhow::{Context, Result};
use serde::Deserialize;
use std::collections::BTreeMap;
use std::path::Path;
use tracing::debug;

/// Entropy/regularity dimension thresholds.
#[derive(Debug, Clone)]
pub struct EntropyConfig {
    /// Minimum non-blank lines for a non-neutral result.
    pub min_lines: usize,
    /// Minimum blank-line gap samples for the spacing check.
    pub min_gap_samples: usize,
    /// Line-length variance below this is robotic.
    pub low_variance: f64,
    /// Share of identical blank-line gaps above this is robotic.
    pub spacing_uniformity: f64,
    /// Parentheses per line above this adds mild suspicion.
    pub paren_ratio: f64,
}

/// Model-fingerprint score steps: match-count thresholds mapped to
/// escalating scores.
#[derive(Debug, Clone)]
pub struct FingerprintConfig {
    pub steps: [(usize, f64); 3],
}

/// Temporal analyzer weights and floors.
#[derive(Debug, Clone)]
pub struct TemporalConfig {
    pub message_weight: f64,
    pub timing_weight: f64,
    pub change_weight: f64,
    pub drift_weight: f64,
    /// Below this commit count the analysis is skipped entirely.
    pub min_commits: usize,
    /// Commits sampled for style-drift patch inspection.
    pub drift_sample_size: usize,
    /// Minimum successfully sampled commits for a drift score.
    pub min_drift_samples: usize,
    /// Inter-commit coefficient of variation below this is machine-paced.
    pub low_interval_cv: f64,
    /// Intervals shorter than this count as rapid-fire commits.
    pub quick_interval_secs: i64,
    /// Late-night window, inclusive hours in author-local time.
    pub night_hours: (u32, u32),
    /// Style-signature variance below this means the author never drifts.
    pub low_drift_variance: f64,
}

/// Cross-file coherence thresholds.
#[derive(Debug, Clone)]
pub struct CrossFileConfig {
    pub line_length_stddev: f64,
    pub comment_ratio_stddev: f64,
    pub naming_stddev: f64,
    /// Points added per uniform metric.
    pub metric_increment: f64,
    /// Points added for a single indentation style across the set.
    pub indent_increment: f64,
    /// Indentation check only applies above this many files.
    pub indent_min_files: usize,
}

/// Repository-level aggregation weights and score bands.
#[derive(Debug, Clone)]
pub struct AggregateConfig {
    pub temporal_weight: f64,
    pub crossfile_weight: f64,
    pub files_weight: f64,
    /// Score at or above this lands in the suspicious band.
    pub suspicious_min: f64,
    /// Score at or above this (and below suspicious) is questionable.
    pub questionable_min: f64,
    /// Rows kept in the pattern-frequency table.
    pub top_patterns: usize,
}

/// Fusion-engine constants.
#[derive(Debug, Clone)]
pub struct FusionConfig {
    /// Raw stylistic totals are divided by this before capping.
    pub stylistic_normalizer: f64,
    /// Maximum stylistic contribution to the fused score.
    pub stylistic_cap: f64,
    /// Lines inspected for generated-file markers.
    pub generated_marker_window: usize,
}

/// Static configuration for the whole analysis engine.
#[derive(Debug, Clone)]
pub struct AnalyzerConfig {
    pub entropy: EntropyConfig,
    pub fingerprint: FingerprintConfig,
    pub temporal: TemporalConfig,
    pub crossfile: CrossFileConfig,
    pub aggregate: AggregateConfig,
    pub fusion: FusionConfig,
    /// Multiplier applied to formatting-sensitive pattern weights when
    /// an auto-formatter config is present in the repository.
    pub formatting_discount: f64,
    /// First-lines markers that exclude a file as machine-generated.
    pub generated_markers: Vec<String>,
    /// Formatter config filenames that trigger the discount.
    pub formatter_configs: Vec<String>,
    /// Extension -> language tag, used for file filtering and
    /// language-pack selection.
    pub languages: BTreeMap<String, &'static str>,
}

impl Default for AnalyzerConfig {
    fn default() -> Self {
        Self {
            entropy: EntropyConfig {
                min_lines: 20,
                min_gap_samples: 3,
                low_variance: 150.0,
                spacing_uniformity: 0.8,
                paren_ratio: 1.5,
            },
            fingerprint: FingerprintConfig {
                steps: [(3, 40.0), (5, 80.0), (8, 100.0)],
            },
            temporal: TemporalConfig {
                message_weight: 0.25,
                timing_weight: 0.20,
                change_weight: 0.25,
                drift_weight: 0.30,
                min_commits: 5,
                drift_sample_size: 5,
                min_drift_samples: 3,
                low_interval_cv: 0.8,
                quick_interval_secs: 5 * 60,
                night_hours: (2, 6),
                low_drift_variance: 0.2,
            },
            crossfile: CrossFileConfig {
                line_length_stddev: 5.0,
                comment_ratio_stddev: 0.02,
                naming_stddev: 1.5,
                metric_increment: 25.0,
                indent_increment: 10.0,
                indent_min_files: 5,
            },
            aggregate: AggregateConfig {
                temporal_weight: 0.30,
                crossfile_weight: 0.15,
                files_weight: 0.55,
                suspicious_min: 65.0,
                questionable_min: 30.0,
                top_patterns: 10,
            },
            fusion: FusionConfig {
                stylistic_normalizer: 5.0,
                stylistic_cap: 40.0,
                generated_marker_window: 20,
            },
            formatting_discount: 0.3,
            generated_markers: vec![
                "auto-generated".into(),
                "Auto-generated".into(),
                "DO NOT EDIT".into(),
                "@generated".into(),
                "GENERATED CODE".into(),
                "Code generated by".into(),
            ],
            formatter_configs: vec![
                ".prettierrc".into(),
                ".prettierrc.json".into(),
                ".prettierrc.yaml".into(),
                ".prettierrc.yml".into(),
                ".prettierrc.js".into(),
                "prettier.config.js".into(),
                ".eslintrc".into(),
                ".eslintrc.json".into(),
                ".eslintrc.js".into(),
                ".eslintrc.yml".into(),
                "eslint.config.js".into(),
                ".editorconfig".into(),
                "rustfmt.toml".into(),
                ".rustfmt.toml".into(),
                "biome.json".into(),
                ".clang-format".into(),
                "pyproject.toml".into(),
            ],
            languages: default_languages(),
        }
    }
}

impl AnalyzerConfig {
    /// Language tag for a file path, if the extension is supported.
    pub fn language_for(&self, path: &str) -> Option<&'static str> {
        let ext = Path::new(path)
            .extension()
            .map(|e| e.to_string_lossy().to_lowercase())?;
        self.languages.get(&ext).copied()
    }

    /// Load config, applying overrides from an explicit file or, when
    /// none is given, from a `vibescan.toml` next to the scanned
    /// repository. An explicit file that does not exist is an error; a
    /// missing implicit one just keeps the defaults.
    pub fn load(repo_root: &Path, override_file: Option<&Path>) -> Result<Self> {
        let mut config = Self::default();
        let override_path = match override_file {
            Some(p) => {
                if !p.exists() {
                    anyhow::bail!("config file {} not found", p.display());
                }
                p.to_path_buf()
            }
            None => repo_root.join("vibescan.toml"),
        };
        if override_path.exists() {
            let raw = std::fs::read_to_string(&override_path)
                .with_context(|| format!("failed to read {}", override_path.display()))?;
            let overrides: ConfigOverride = toml::from_str(&raw)
                .with_context(|| format!("invalid config in {}", override_path.display()))?;
            debug!(path = %override_path.display(), "applying config overrides");
            overrides.apply(&mut config);
        }
        Ok(config)
    }
}

fn default_languages() -> BTreeMap<String, &'static str> {
    let entries: &[(&str, &'static str)] = &[
        ("js", "javascript"),
        ("jsx", "javascript"),
        ("mjs", "javascript"),
        ("cjs", "javascript"),
        ("ts", "typescript"),
        ("tsx", "typescript"),
        ("py", "python"),
        ("pyw", "python"),
        ("rb", "ruby"),
        ("php", "php"),
        ("java", "java"),
        ("c", "c"),
        ("h", "c"),
        ("cc", "cpp"),
        ("cpp", "cpp"),
        ("hpp", "cpp"),
        ("cs", "csharp"),
        ("go", "go"),
        ("rs", "rust"),
        ("swift", "swift"),
        ("kt", "kotlin"),
        ("scala", "scala"),
        ("sh", "shell"),
        ("bash", "shell"),
        ("zsh", "shell"),
        ("ps1", "powershell"),
        ("psm1", "powershell"),
        ("bat", "batch"),
        ("cmd", "batch"),
        ("lua", "lua"),
        ("pl", "perl"),
        ("r", "r"),
        ("jl", "julia"),
        ("dart", "dart"),
        ("ex", "elixir"),
        ("exs", "elixir"),
        ("hs", "haskell"),
        ("sql", "sql"),
        ("vue", "javascript"),
        ("svelte", "javascript"),
    ];
    entries
        .iter()
        .map(|(ext, lang)| (ext.to_string(), *lang))
        .collect()
}

/// Partial override file. Every field optional; unset fields keep the
/// compiled-in defaults.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct ConfigOverride {
    formatting_discount: Option<f64>,
    suspicious_min: Option<f64>,
    questionable_min: Option<f64>,
    top_patterns: Option<usize>,
    temporal_weight: Option<f64>,
    crossfile_weight: Option<f64>,
    files_weight: Option<f64>,
    min_commits: Option<usize>,
    generated_markers: Option<Vec<String>>,
    formatter_configs: Option<Vec<String>>,
}

impl ConfigOverride {
    fn apply(self, config: &mut AnalyzerConfig) {
        if let Some(v) = self.formatting_discount {
            config.formatting_discount = v;
        }
        if let Some(v) = self.suspicious_min {
            config.aggregate.suspicious_min = v;
        }
        if let Some(v) = self.questionable_min {
            config.aggregate.questionable_min = v;
        }
        if let Some(v) = self.top_patterns {
            config.aggregate.top_patterns = v;
        }
        if let Some(v) = self.temporal_weight {
            config.aggregate.temporal_weight = v;
        }
        if let Some(v) = self.crossfile_weight {
            config.aggregate.crossfile_weight = v;
        }
        if let Some(v) = self.files_weight {
            config.aggregate.files_weight = v;
        }
        if let Some(v) = self.min_commits {
            config.temporal.min_commits = v;
        }
        if let Some(v) = self.generated_markers {
            config.generated_markers = v;
        }
        if let Some(v) = self.formatter_configs {
            config.formatter_configs = v;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_consistent() {
        let config = AnalyzerConfig::default();
        let w = &config.aggregate;
        assert!((w.temporal_weight + w.crossfile_weight + w.files_weight - 1.0).abs() < 1e-9);
        let t = &config.temporal;
        assert!(
            (t.message_weight + t.timing_weight + t.change_weight + t.drift_weight - 1.0).abs()
                < 1e-9
        );
        // Fingerprint steps must escalate
        assert!(config.fingerprint.steps.windows(2).all(|w| w[0].1 < w[1].1));
    }

    #[test]
    fn language_lookup() {
        let config = AnalyzerConfig::default();
        assert_eq!(config.language_for("src/app.ts"), Some("typescript"));
        assert_eq!(config.language_for("deploy.sh"), Some("shell"));
        assert_eq!(config.language_for("README.md"), None);
    }

    #[test]
    fn override_applies_partial_fields() {
        let raw = r#"
            formatting_discount = 0.5
            suspicious_min = 70.0
        "#;
        let overrides: ConfigOverride = toml::from_str(raw).unwrap();
        let mut config = AnalyzerConfig::default();
        overrides.apply(&mut config);
        assert_eq!(config.formatting_discount, 0.5);
        assert_eq!(config.aggregate.suspicious_min, 70.0);
        // Untouched fields keep defaults
        assert_eq!(config.aggregate.questionable_min, 30.0);
    }

    #[test]
    fn explicit_config_path_must_exist() {
        let dir = tempfile::TempDir::new().expect("tempdir");
        let missing = dir.path().join("nope.toml");
        assert!(AnalyzerConfig::load(dir.path(), Some(&missing)).is_err());
        // Implicit lookup just falls back to defaults
        assert!(AnalyzerConfig::load(dir.path(), None).is_ok());
    }

    #[test]
    fn unknown_override_key_is_rejected() {
        let raw = "no_such_key = 1";
        assert!(toml::from_str::<ConfigOverride>(raw).is_err());
    }
}
