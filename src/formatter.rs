//! Auto-formatter detection
//!
//! A repository that runs Prettier, Black, or rustfmt erases
//! whitespace-level authorship signals. When a formatter config is
//! present, patterns marked as formatting-sensitive have their weight
//! discounted - those signals are artifacts of tooling, not of
//! whoever wrote the code.

use crate::config::AnalyzerConfig;
use std::path::Path;
use tracing::debug;

/// Formatter presence plus the resulting weight multiplier.
#[derive(Debug, Clone)]
pub struct FormatterInfo {
    pub has_formatter: bool,
    /// Config filenames that triggered detection.
    pub configs_found: Vec<String>,
    /// Multiplier for formatting-sensitive pattern weights.
    pub weight_multiplier: f64,
}

impl FormatterInfo {
    /// No formatter detected; full pattern weights apply.
    pub fn none() -> Self {
        Self {
            has_formatter: false,
            configs_found: Vec::new(),
            weight_multiplier: 1.0,
        }
    }
}

/// Scan repository paths for known formatter config filenames.
pub fn detect_auto_formatting(paths: &[String], config: &AnalyzerConfig) -> FormatterInfo {
    let mut found = Vec::new();
    for path in paths {
        let basename = Path::new(path)
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_default();
        if config.formatter_configs.iter().any(|c| c == &basename) {
            found.push(basename);
        }
    }
    found.sort();
    found.dedup();

    if found.is_empty() {
        FormatterInfo::none()
    } else {
        debug!(configs = ?found, "formatter detected, discounting whitespace signals");
        FormatterInfo {
            has_formatter: true,
            configs_found: found,
            weight_multiplier: config.formatting_discount,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn detects_prettier_config() {
        let config = AnalyzerConfig::default();
        let paths = vec!["src/index.js".to_string(), ".prettierrc".to_string()];
        let info = detect_auto_formatting(&paths, &config);
        assert!(info.has_formatter);
        assert_eq!(info.weight_multiplier, config.formatting_discount);
        assert_eq!(info.configs_found, vec![".prettierrc"]);
    }

    #[test]
    fn no_formatter_means_full_weight() {
        let config = AnalyzerConfig::default();
        let info = detect_auto_formatting(&["src/main.rs".to_string()], &config);
        assert!(!info.has_formatter);
        assert_eq!(info.weight_multiplier, 1.0);
    }

    #[test]
    fn nested_config_paths_count() {
        let config = AnalyzerConfig::default();
        let info =
            detect_auto_formatting(&["packages/app/.eslintrc.json".to_string()], &config);
        assert!(info.has_formatter);
    }
}
