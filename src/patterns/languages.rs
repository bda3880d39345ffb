//! Per-language pattern packs
//!
//! Optional extension sets selected by detected file language and
//! role. Each pack follows the same `Pattern` contract as the core
//! catalog; hits feed the stylistic replay and the pattern-frequency
//! table exactly like general patterns do.

use super::{count_matches, is_match, static_regex, Pattern, PatternCategory};
use std::sync::OnceLock;

/// Packs applicable to a file, chosen by language tag and filename.
/// Test-file patterns stack on top of the language pack.
pub fn packs_for(language: Option<&str>, path: &str) -> Vec<&'static [Pattern]> {
    let mut packs: Vec<&'static [Pattern]> = Vec::new();
    match language {
        Some("javascript") | Some("typescript") => packs.push(javascript_pack()),
        Some("python") => packs.push(python_pack()),
        Some("shell") => packs.push(shell_pack()),
        Some("powershell") => packs.push(powershell_pack()),
        Some("batch") => packs.push(batch_pack()),
        _ => {}
    }
    let lower = path.to_lowercase();
    if lower.contains("test") || lower.contains("spec") {
        packs.push(testing_pack());
    }
    if matches!(language, Some("shell") | Some("python") | Some("batch") | Some("powershell")) {
        packs.push(script_automation_pack());
    }
    packs
}

fn javascript_pack() -> &'static [Pattern] {
    static PACK: OnceLock<Vec<Pattern>> = OnceLock::new();
    PACK.get_or_init(|| {
        vec![
            Pattern {
                id: "js-async-await-only",
                name: "async/await without a single .then()",
                weight: 7.0,
                category: PatternCategory::Language,
                immune_to_formatting: true,
                detect: |code| {
                    let async_await = count_matches(static_regex!(r"\b(async|await)\b"), code);
                    let then = count_matches(static_regex!(r"\.then\("), code);
                    if async_await > 5 && then == 0 {
                        1
                    } else {
                        0
                    }
                },
            },
            Pattern {
                id: "js-const-excessive",
                name: "const for more than 95% of bindings",
                weight: 6.0,
                category: PatternCategory::Language,
                immune_to_formatting: true,
                detect: |code| {
                    let consts = count_matches(static_regex!(r"\bconst\s+"), code);
                    let lets = count_matches(static_regex!(r"\blet\s+"), code);
                    let total = consts + lets;
                    if total == 0 {
                        return 0;
                    }
                    if consts as f64 / total as f64 > 0.95 {
                        1
                    } else {
                        0
                    }
                },
            },
            Pattern {
                id: "js-arrow-functions-only",
                name: "Arrow functions exclusively",
                weight: 5.0,
                category: PatternCategory::Language,
                immune_to_formatting: true,
                detect: |code| {
                    let arrows = count_matches(static_regex!(r"=>\s*\{"), code);
                    let classic = count_matches(static_regex!(r"\bfunction\s+\w+"), code);
                    if arrows > 5 && classic == 0 {
                        1
                    } else {
                        0
                    }
                },
            },
            Pattern {
                id: "ts-perfect-typing",
                name: "Type annotations on every function",
                weight: 7.0,
                category: PatternCategory::Language,
                immune_to_formatting: true,
                detect: |code| {
                    if !is_match(static_regex!(r":\s*(string|number|boolean|any)"), code) {
                        return 0;
                    }
                    let typed =
                        count_matches(static_regex!(r"function\s+\w+\([^)]*\):\s*\w+"), code);
                    let all = count_matches(static_regex!(r"function\s+\w+"), code);
                    if all > 3 && typed == all {
                        1
                    } else {
                        0
                    }
                },
            },
            Pattern {
                id: "react-usecallback-excessive",
                name: "useCallback/useMemo on everything",
                weight: 6.0,
                category: PatternCategory::Language,
                immune_to_formatting: true,
                detect: |code| {
                    if !code.contains("React") && !code.contains("useState") {
                        return 0;
                    }
                    let memoized = count_matches(static_regex!(r"useCallback\(|useMemo\("), code);
                    let components =
                        count_matches(static_regex!(r"const\s+\w+\s*=\s*\([^)]*\)\s*=>"), code);
                    if components > 0 && memoized as f64 / components as f64 > 0.8 {
                        1
                    } else {
                        0
                    }
                },
            },
            Pattern {
                id: "react-cleanup-always",
                name: "Cleanup returned from every useEffect",
                weight: 5.0,
                category: PatternCategory::Language,
                immune_to_formatting: true,
                detect: |code| {
                    let with_cleanup = count_matches(
                        static_regex!(r"(?s)useEffect\(\(\)\s*=>\s*\{.*?return\s*\(\)\s*=>"),
                        code,
                    );
                    let total = count_matches(static_regex!(r"useEffect\("), code);
                    if total > 2 && with_cleanup == total {
                        1
                    } else {
                        0
                    }
                },
            },
        ]
    })
}

fn python_pack() -> &'static [Pattern] {
    static PACK: OnceLock<Vec<Pattern>> = OnceLock::new();
    PACK.get_or_init(|| {
        vec![
            Pattern {
                id: "py-type-hints-perfect",
                name: "Type hints on every def",
                weight: 8.0,
                category: PatternCategory::Language,
                immune_to_formatting: true,
                detect: |code| {
                    let defs = count_matches(static_regex!(r"def\s+\w+\("), code);
                    let typed = count_matches(static_regex!(r"def\s+\w+\([^)]*:\s*\w+"), code);
                    if defs > 3 && typed as f64 / defs as f64 > 0.95 {
                        1
                    } else {
                        0
                    }
                },
            },
            Pattern {
                id: "py-docstring-google-style",
                name: "Structured docstrings on nearly every function",
                weight: 7.0,
                category: PatternCategory::Language,
                immune_to_formatting: true,
                detect: |code| {
                    let structured = count_matches(
                        static_regex!(r#""""\s*(Args:|Returns:|Raises:|Examples?:)"#),
                        code,
                    );
                    let defs = count_matches(static_regex!(r"def\s+\w+"), code);
                    if defs == 0 {
                        return 0;
                    }
                    if structured as f64 / defs as f64 > 0.7 {
                        1
                    } else {
                        0
                    }
                },
            },
            Pattern {
                id: "py-pep8-perfect",
                name: "Zero PEP8 violations in a long file",
                weight: 5.0,
                category: PatternCategory::Language,
                immune_to_formatting: false,
                detect: |code| {
                    let lines: Vec<&str> = code.lines().collect();
                    if lines.len() <= 50 {
                        return 0;
                    }
                    let violations = lines
                        .iter()
                        .filter(|l| {
                            l.len() > 79
                                || is_match(static_regex!(r"\w+[+\-*/]=\w+"), l)
                        })
                        .count();
                    if violations == 0 {
                        1
                    } else {
                        0
                    }
                },
            },
            Pattern {
                id: "py-comprehension-only",
                name: "List comprehensions but never plain loops",
                weight: 6.0,
                category: PatternCategory::Language,
                immune_to_formatting: true,
                detect: |code| {
                    let comprehensions =
                        count_matches(static_regex!(r"\[.+\s+for\s+.+\s+in\s+.+\]"), code);
                    let for_loops =
                        count_matches(static_regex!(r"\bfor\s+\w+\s+in\s+"), code) - comprehensions;
                    if comprehensions > 5 && for_loops <= 0 {
                        1
                    } else {
                        0
                    }
                },
            },
            Pattern {
                id: "py-f-strings-perfect",
                name: "f-strings with no .format() or % anywhere",
                weight: 5.0,
                category: PatternCategory::Language,
                immune_to_formatting: true,
                detect: |code| {
                    let f_strings = count_matches(static_regex!(r#"f["']"#), code);
                    let format_calls = count_matches(static_regex!(r"\.format\("), code);
                    let percent = count_matches(static_regex!(r#""%"#), code);
                    if f_strings > 3 && format_calls == 0 && percent == 0 {
                        1
                    } else {
                        0
                    }
                },
            },
        ]
    })
}

fn shell_pack() -> &'static [Pattern] {
    static PACK: OnceLock<Vec<Pattern>> = OnceLock::new();
    PACK.get_or_init(|| {
        vec![
            Pattern {
                id: "sh-echo-headers",
                name: "Decorative echo banners",
                weight: 6.0,
                category: PatternCategory::Language,
                immune_to_formatting: true,
                detect: |code| {
                    count_matches(static_regex!(r#"echo\s+['"][-=#*]{10,}['"]"#), code)
                },
            },
            Pattern {
                id: "sh-pipefail-comment",
                name: "Explanatory comment on set -euo pipefail",
                weight: 7.0,
                category: PatternCategory::Language,
                immune_to_formatting: true,
                detect: |code| {
                    if is_match(
                        static_regex!(r"(?si)set\s+-euo\s+pipefail.{0,100}#.*(exit|stop|fail)"),
                        code,
                    ) {
                        1
                    } else {
                        0
                    }
                },
            },
            Pattern {
                id: "sh-paranoid-guards",
                name: "Emptiness check on every variable",
                weight: 5.0,
                category: PatternCategory::Language,
                immune_to_formatting: true,
                detect: |code| {
                    let checks =
                        count_matches(static_regex!(r#"if\s*\[\s*-z\s+"\$\w+"\s*\];\s*then"#), code);
                    if checks > 3 {
                        1
                    } else {
                        0
                    }
                },
            },
        ]
    })
}

fn powershell_pack() -> &'static [Pattern] {
    static PACK: OnceLock<Vec<Pattern>> = OnceLock::new();
    PACK.get_or_init(|| {
        vec![
            Pattern {
                id: "ps-write-host-colors",
                name: "Write-Host with status colors",
                weight: 6.0,
                category: PatternCategory::Language,
                immune_to_formatting: true,
                detect: |code| {
                    let colored = count_matches(
                        static_regex!(r"(?i)Write-Host\s+.*-ForegroundColor\s+(Green|Cyan|Yellow)"),
                        code,
                    );
                    if colored > 2 {
                        1
                    } else {
                        0
                    }
                },
            },
            Pattern {
                id: "ps-param-blocks",
                name: "Mandatory Param() blocks on simple scripts",
                weight: 7.0,
                category: PatternCategory::Language,
                immune_to_formatting: true,
                detect: |code| {
                    let mandatory = count_matches(
                        static_regex!(r"(?i)\[Parameter\(Mandatory\s*=\s*\$true\)\]"),
                        code,
                    );
                    if mandatory > 2 {
                        1
                    } else {
                        0
                    }
                },
            },
            Pattern {
                id: "ps-try-catch-everything",
                name: "Try-Catch around trivial commands",
                weight: 5.0,
                category: PatternCategory::Language,
                immune_to_formatting: true,
                detect: |code| {
                    let tries = count_matches(static_regex!(r"(?i)try\s*\{"), code);
                    let lines = code.lines().count();
                    if (tries > 0 && lines < 20) || tries > 5 {
                        1
                    } else {
                        0
                    }
                },
            },
        ]
    })
}

fn batch_pack() -> &'static [Pattern] {
    static PACK: OnceLock<Vec<Pattern>> = OnceLock::new();
    PACK.get_or_init(|| {
        vec![
            Pattern {
                id: "bat-goto-eof",
                name: "Systematic GOTO :EOF",
                weight: 6.0,
                category: PatternCategory::Language,
                immune_to_formatting: true,
                detect: |code| {
                    if count_matches(static_regex!(r"(?i)GOTO\s+:EOF"), code) > 2 {
                        1
                    } else {
                        0
                    }
                },
            },
            Pattern {
                id: "bat-echo-off-comment",
                name: "Commented @echo off",
                weight: 4.0,
                category: PatternCategory::Language,
                immune_to_formatting: true,
                detect: |code| {
                    if is_match(static_regex!(r"(?i)@echo off\s*rem\s+"), code) {
                        1
                    } else {
                        0
                    }
                },
            },
            Pattern {
                id: "bat-pause-nul",
                name: "pause >nul waits",
                weight: 5.0,
                category: PatternCategory::Language,
                immune_to_formatting: true,
                detect: |code| {
                    if is_match(static_regex!(r"(?i)pause\s*>\s*nul"), code) {
                        1
                    } else {
                        0
                    }
                },
            },
        ]
    })
}

fn testing_pack() -> &'static [Pattern] {
    static PACK: OnceLock<Vec<Pattern>> = OnceLock::new();
    PACK.get_or_init(|| {
        vec![
            Pattern {
                id: "test-should-when-names",
                name: "should...when... test names",
                weight: 8.0,
                category: PatternCategory::Testing,
                immune_to_formatting: true,
                detect: |code| {
                    let count = count_matches(
                        static_regex!(r#"(?i)['"]should\s+[a-z\s]+when\s+[a-z\s]+['"]"#),
                        code,
                    );
                    if count > 2 {
                        1
                    } else {
                        0
                    }
                },
            },
            Pattern {
                id: "test-aaa-comments",
                name: "Explicit Arrange/Act/Assert comments",
                weight: 7.0,
                category: PatternCategory::Testing,
                immune_to_formatting: true,
                detect: |code| {
                    let arrange = is_match(static_regex!(r"(?im)^\s*//\s*Arrange"), code);
                    let act = is_match(static_regex!(r"(?im)^\s*//\s*Act"), code);
                    let assert = is_match(static_regex!(r"(?im)^\s*//\s*Assert"), code);
                    if arrange && act && assert {
                        1
                    } else {
                        0
                    }
                },
            },
            Pattern {
                id: "test-trivial-getters",
                name: "Getter round-trip tests",
                weight: 9.0,
                category: PatternCategory::Testing,
                immune_to_formatting: true,
                detect: |code| {
                    let count =
                        count_matches(static_regex!(r"expect\(\w+\.get\w+\(\)\)\.toBe\("), code);
                    if count > 3 {
                        1
                    } else {
                        0
                    }
                },
            },
            Pattern {
                id: "test-mock-everything",
                name: "Mock saturation with beforeEach setup",
                weight: 6.0,
                category: PatternCategory::Testing,
                immune_to_formatting: true,
                detect: |code| {
                    let mocks = count_matches(
                        static_regex!(r"jest\.fn\(\)|mockReturnValue|spyOn"),
                        code,
                    );
                    let has_before_each =
                        is_match(static_regex!(r"(?s)beforeEach\(\(\)\s*=>\s*\{.*?\}\)"), code);
                    if mocks > 5 && has_before_each {
                        1
                    } else {
                        0
                    }
                },
            },
            Pattern {
                id: "test-given-when-then",
                name: "Rigid Gherkin comments",
                weight: 6.0,
                category: PatternCategory::Testing,
                immune_to_formatting: true,
                detect: |code| {
                    if count_matches(static_regex!(r"//\s*(Given|When|Then):"), code) > 3 {
                        1
                    } else {
                        0
                    }
                },
            },
        ]
    })
}

fn script_automation_pack() -> &'static [Pattern] {
    static PACK: OnceLock<Vec<Pattern>> = OnceLock::new();
    PACK.get_or_init(|| {
        vec![
            Pattern {
                id: "script-echo-steps",
                name: "Step-by-step echo narration",
                weight: 7.0,
                category: PatternCategory::Testing,
                immune_to_formatting: true,
                detect: |code| {
                    if count_matches(static_regex!(r#"(?i)echo\s+['"]Step\s+\d+:"#), code) > 2 {
                        1
                    } else {
                        0
                    }
                },
            },
            Pattern {
                id: "script-hardcoded-sleep",
                name: "Arbitrary short sleeps",
                weight: 5.0,
                category: PatternCategory::Testing,
                immune_to_formatting: true,
                detect: |code| {
                    if count_matches(static_regex!(r"sleep\s+[1-5]\b"), code) > 2 {
                        1
                    } else {
                        0
                    }
                },
            },
            Pattern {
                id: "script-paranoid-cleanup",
                name: "Guarded rm -rf cleanup",
                weight: 6.0,
                category: PatternCategory::Testing,
                immune_to_formatting: true,
                detect: |code| {
                    if count_matches(static_regex!(r#"rm\s+-rf\s+"\$\w+""#), code) > 1 {
                        1
                    } else {
                        0
                    }
                },
            },
        ]
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pack_selection_by_language_and_role() {
        assert_eq!(packs_for(Some("javascript"), "src/app.js").len(), 1);
        assert_eq!(packs_for(Some("python"), "lib/util.py").len(), 1);
        // Shell gets both the shell pack and the automation pack
        assert_eq!(packs_for(Some("shell"), "deploy.sh").len(), 2);
        // Test files stack the testing pack on top
        assert_eq!(packs_for(Some("javascript"), "src/app.test.js").len(), 2);
        assert!(packs_for(None, "README.md").is_empty());
    }

    #[test]
    fn const_excess_requires_near_total_dominance() {
        let pack = javascript_pack();
        let p = pack.iter().find(|p| p.id == "js-const-excessive").unwrap();
        let dominant = "const a=1;\n".repeat(30) + "let b=2;\n";
        assert_eq!((p.detect)(&dominant), 1);
        let balanced = "const a=1;\nlet b=2;\n".repeat(10);
        assert_eq!((p.detect)(&balanced), 0);
    }

    #[test]
    fn aaa_comments_need_all_three() {
        let pack = testing_pack();
        let p = pack.iter().find(|p| p.id == "test-aaa-comments").unwrap();
        let full = "// Arrange\nlet x;\n// Act\nrun();\n// Assert\ncheck();\n";
        assert_eq!((p.detect)(full), 1);
        let partial = "// Arrange\nlet x;\n// Act\nrun();\n";
        assert_eq!((p.detect)(partial), 0);
    }

    #[test]
    fn shell_banner_counts_occurrences() {
        let pack = shell_pack();
        let p = pack.iter().find(|p| p.id == "sh-echo-headers").unwrap();
        let code = "echo \"==============================\"\necho \"done\"\n";
        assert_eq!((p.detect)(code), 1);
    }
}
