//! General-purpose pattern catalog
//!
//! The language-agnostic detectors: linguistic tells in comments,
//! structural tics, naming habits, error-message phrasing,
//! documentation excess, emoji, formal vocabulary, and the inverted
//! human-marker patterns that argue for a human author.

use super::{
    count_functions, count_matches, extract_comments, is_match, static_regex, Pattern,
    PatternCategory,
};

pub(super) fn build_catalog() -> Vec<Pattern> {
    let mut all = Vec::new();
    all.extend(linguistic());
    all.extend(code_structure());
    all.extend(naming());
    all.extend(error_handling());
    all.extend(documentation());
    all.extend(special_chars());
    all.extend(vocabulary());
    all.extend(human_markers());
    all
}

// --- Linguistic ----------------------------------------------------------

fn linguistic() -> Vec<Pattern> {
    vec![
        Pattern {
            id: "ai-phrase-lets",
            name: "\"Let's\" phrasing in comments",
            weight: 10.0,
            category: PatternCategory::Linguistic,
            immune_to_formatting: true,
            detect: |code| {
                let comments = extract_comments(code);
                count_matches(
                    static_regex!(r"(?i)\blet'?s\s+(break|explore|dive|look|see|create|implement)"),
                    &comments,
                )
            },
        },
        Pattern {
            id: "ai-phrase-heres",
            name: "\"Here's how/what/why\" phrasing",
            weight: 10.0,
            category: PatternCategory::Linguistic,
            immune_to_formatting: true,
            detect: |code| {
                let comments = extract_comments(code);
                count_matches(static_regex!(r"(?i)\bhere'?s\s+(how|what|why|the)"), &comments)
            },
        },
        Pattern {
            id: "ai-phrase-first",
            name: "\"First, we need to\" step narration",
            weight: 9.0,
            category: PatternCategory::Linguistic,
            immune_to_formatting: true,
            detect: |code| {
                let comments = extract_comments(code);
                count_matches(
                    static_regex!(r"(?i)\b(first|then|next|finally),?\s+we\s+(need|will|should)"),
                    &comments,
                )
            },
        },
        Pattern {
            id: "ai-phrase-note-that",
            name: "\"Note that\" hedging",
            weight: 8.0,
            category: PatternCategory::Linguistic,
            immune_to_formatting: true,
            detect: |code| {
                let comments = extract_comments(code);
                count_matches(
                    static_regex!(
                        r"(?i)\bnote\s+that\b|\bkeep\s+in\s+mind\b|\bit'?s\s+worth\s+noting|\bimportant\s+to\s+note"
                    ),
                    &comments,
                )
            },
        },
        Pattern {
            id: "ai-phrase-ensure",
            name: "\"This ensures that\" / \"in order to\"",
            weight: 8.0,
            category: PatternCategory::Linguistic,
            immune_to_formatting: true,
            detect: |code| {
                let comments = extract_comments(code);
                count_matches(
                    static_regex!(
                        r"(?i)\bthis\s+(ensures|allows|enables)\s+(that|us\s+to)|\bin\s+order\s+to\b|\bwith\s+regards?\s+to\b"
                    ),
                    &comments,
                )
            },
        },
        Pattern {
            id: "ai-comment-templates",
            name: "Templated comment openers (\"This function does...\")",
            weight: 8.0,
            category: PatternCategory::Linguistic,
            immune_to_formatting: true,
            detect: |code| {
                let comments = extract_comments(code);
                count_matches(
                    static_regex!(
                        r"(?im)^\W*(this (function|method|class) (does|is|performs|handles|manages|provides)|we (use|leverage|utilize)|as shown in)"
                    ),
                    &comments,
                )
            },
        },
        Pattern {
            id: "complete-sentences",
            name: "Comments written as complete sentences",
            weight: 6.0,
            category: PatternCategory::Linguistic,
            immune_to_formatting: true,
            detect: detect_complete_sentences,
        },
    ]
}

fn detect_complete_sentences(code: &str) -> i64 {
    let comments = extract_comments(code);
    let lines: Vec<&str> = comments.lines().collect();
    if lines.is_empty() {
        return 0;
    }
    let mut complete = 0usize;
    for line in &lines {
        let clean = line.trim_start_matches(['/', '*', '#', ' ', '\t']).trim();
        // Complete sentence: capitalized, ends with a period, > 40 chars
        if clean.len() > 40
            && clean.chars().next().is_some_and(|c| c.is_ascii_uppercase())
            && clean.ends_with('.')
        {
            complete += 1;
        }
    }
    let ratio = complete as f64 / lines.len() as f64;
    if ratio > 0.5 {
        (ratio * 10.0).floor() as i64
    } else {
        0
    }
}

// --- Code structure ------------------------------------------------------

fn code_structure() -> Vec<Pattern> {
    vec![
        Pattern {
            id: "wrapper-functions",
            name: "Pointless wrapper functions",
            weight: 9.0,
            category: PatternCategory::CodeStructure,
            immune_to_formatting: true,
            detect: |code| {
                count_matches(
                    static_regex!(
                        r"(?s)function\s+\w+\([^)]*\)\s*\{\s*return\s+\w+\([^)]*\);\s*\}"
                    ),
                    code,
                )
            },
        },
        Pattern {
            id: "excessive-try-catch",
            name: "Try-catch around everything",
            weight: 8.0,
            category: PatternCategory::CodeStructure,
            immune_to_formatting: true,
            detect: |code| {
                let tries = count_matches(static_regex!(r"\btry\s*\{"), code);
                let functions = count_functions(code);
                if functions == 0 {
                    return 0;
                }
                let ratio = tries as f64 / functions as f64;
                if ratio > 0.7 {
                    (ratio * 10.0).floor() as i64
                } else {
                    0
                }
            },
        },
        Pattern {
            id: "intermediate-variables",
            name: "Single-use intermediate variables before return",
            weight: 7.0,
            category: PatternCategory::CodeStructure,
            immune_to_formatting: true,
            detect: detect_intermediate_variables,
        },
        Pattern {
            id: "perfect-consistency",
            name: "Perfectly consistent quote style",
            weight: 7.0,
            category: PatternCategory::CodeStructure,
            immune_to_formatting: false,
            detect: |code| {
                let single = code.matches('\'').count() as f64;
                let double = code.matches('"').count() as f64;
                let total = single + double;
                if total == 0.0 {
                    return 0;
                }
                let consistency = single.max(double) / total;
                if consistency > 0.98 {
                    1
                } else {
                    0
                }
            },
        },
        Pattern {
            id: "over-decomposition",
            name: "Decomposition into micro-functions",
            weight: 8.0,
            category: PatternCategory::CodeStructure,
            immune_to_formatting: true,
            detect: detect_over_decomposition,
        },
        Pattern {
            id: "immutability-obsession",
            name: "Object.freeze everywhere",
            weight: 8.0,
            category: PatternCategory::CodeStructure,
            immune_to_formatting: true,
            detect: |code| count_matches(static_regex!(r"Object\.freeze\("), code),
        },
        Pattern {
            id: "functional-chains",
            name: "Chained reduce/map pipelines",
            weight: 7.0,
            category: PatternCategory::CodeStructure,
            immune_to_formatting: true,
            detect: |code| {
                count_matches(
                    static_regex!(r"(?s)\.reduce\([^)]*\)[^\n]*\.map\(|\.map\([^)]*\)[^\n]*\.reduce\("),
                    code,
                )
            },
        },
        Pattern {
            id: "exotic-collections",
            name: "WeakMap/WeakSet and Array.from ranges",
            weight: 7.0,
            category: PatternCategory::CodeStructure,
            immune_to_formatting: true,
            detect: |code| {
                count_matches(
                    static_regex!(r"\bWeakMap\b|\bWeakSet\b|Array\.from\(\{\s*length:"),
                    code,
                )
            },
        },
    ]
}

/// `const x = expr; ... return x;` - a variable introduced only to be
/// returned. Regex backreferences are unavailable, so scan
/// declarations and look for the matching return by name.
fn detect_intermediate_variables(code: &str) -> i64 {
    let Some(decl_re) = static_regex!(r"(?:const|let|var)\s+(\w+)\s*=") else {
        return 0;
    };
    let mut count = 0;
    for caps in decl_re.captures_iter(code) {
        let name = &caps[1];
        let after = &code[caps.get(0).map(|m| m.end()).unwrap_or(0)..];
        let needle = format!("return {name};");
        if after.contains(&needle) {
            count += 1;
        }
    }
    count
}

fn detect_over_decomposition(code: &str) -> i64 {
    let functions = extract_function_bodies(code);
    if functions.is_empty() {
        return 0;
    }
    let tiny = functions
        .iter()
        .filter(|body| {
            body.lines()
                .filter(|l| {
                    let t = l.trim();
                    !t.is_empty() && !t.starts_with("//")
                })
                .count()
                <= 3
        })
        .count();
    let ratio = tiny as f64 / functions.len() as f64;
    if ratio > 0.4 {
        (ratio * 10.0).floor() as i64
    } else {
        0
    }
}

// --- Naming --------------------------------------------------------------

fn naming() -> Vec<Pattern> {
    vec![
        Pattern {
            id: "verbose-names",
            name: "Ultra-descriptive identifiers (30+ chars)",
            weight: 6.0,
            category: PatternCategory::Naming,
            immune_to_formatting: true,
            detect: |code| count_matches(static_regex!(r"\b[a-z][a-zA-Z0-9]{30,}\b"), code),
        },
        Pattern {
            id: "perfect-boolean-prefix",
            name: "is/has/should prefixes on every boolean",
            weight: 5.0,
            category: PatternCategory::Naming,
            immune_to_formatting: true,
            detect: |code| {
                let Some(re) = static_regex!(r"(?:const|let|var)\s+\w+\s*=\s*(?:true|false)")
                else {
                    return 0;
                };
                let assignments: Vec<&str> = re.find_iter(code).map(|m| m.as_str()).collect();
                if assignments.is_empty() {
                    return 0;
                }
                let prefixed = assignments
                    .iter()
                    .filter(|a| is_match(static_regex!(r"\b(is|has|should|can|will)[A-Z]"), a))
                    .count();
                let ratio = prefixed as f64 / assignments.len() as f64;
                if ratio > 0.95 {
                    1
                } else {
                    0
                }
            },
        },
        Pattern {
            id: "handle-prefix-excessive",
            name: "Systematic 'handle' prefix",
            weight: 5.0,
            category: PatternCategory::Naming,
            immune_to_formatting: true,
            detect: |code| {
                let handlers = count_matches(static_regex!(r"\bhandle[A-Z]\w+"), code);
                let functions = count_functions(code);
                if functions == 0 {
                    return 0;
                }
                let ratio = handlers as f64 / functions as f64;
                if ratio > 0.5 {
                    (ratio * 10.0).floor() as i64
                } else {
                    0
                }
            },
        },
    ]
}

// --- Error handling ------------------------------------------------------

fn error_handling() -> Vec<Pattern> {
    vec![
        Pattern {
            id: "formal-error-messages",
            name: "Overly formal error messages",
            weight: 7.0,
            category: PatternCategory::ErrorHandling,
            immune_to_formatting: true,
            detect: |code| {
                count_matches(
                    static_regex!(
                        r"(?i)An error occurred while|Unable to proceed with|Failed to successfully|Could not complete the"
                    ),
                    code,
                )
            },
        },
        Pattern {
            id: "excessive-validation",
            name: "Validation-heavy functions",
            weight: 8.0,
            category: PatternCategory::ErrorHandling,
            immune_to_formatting: true,
            detect: |code| {
                let mut suspicious = 0;
                for body in extract_function_bodies(code) {
                    let validations = count_matches(static_regex!(r"if\s*\(\s*!"), &body);
                    let lines = body.lines().count() as i64;
                    if lines > 0 && validations * 2 > lines {
                        suspicious += 1;
                    }
                }
                suspicious
            },
        },
    ]
}

// --- Documentation -------------------------------------------------------

fn documentation() -> Vec<Pattern> {
    vec![
        Pattern {
            id: "jsdoc-trivial",
            name: "Full JSDoc on trivial functions",
            weight: 7.0,
            category: PatternCategory::Documentation,
            immune_to_formatting: true,
            detect: detect_trivial_jsdoc,
        },
        Pattern {
            id: "redundant-comments",
            name: "Comments restating the next line",
            weight: 8.0,
            category: PatternCategory::Documentation,
            immune_to_formatting: true,
            detect: detect_redundant_comments,
        },
    ]
}

/// JSDoc blocks longer than 5 lines sitting on functions shorter than
/// 10 lines.
fn detect_trivial_jsdoc(code: &str) -> i64 {
    let Some(re) = static_regex!(r"(?s)/\*\*.*?\*/\s*(?:function|const|let)\s+\w+") else {
        return 0;
    };
    let mut trivial = 0;
    for m in re.find_iter(code) {
        let doc_lines = m.as_str().lines().count();
        let remaining = &code[m.end()..];
        let Some(open) = remaining.find('{') else {
            continue;
        };
        let close = find_matching_brace(remaining, open);
        let body_lines = remaining[open..close].lines().count();
        if doc_lines > 5 && body_lines < 10 {
            trivial += 1;
        }
    }
    trivial
}

fn detect_redundant_comments(code: &str) -> i64 {
    let lines: Vec<&str> = code.lines().collect();
    let mut redundant = 0;
    for window in lines.windows(2) {
        let comment = window[0].trim();
        let code_line = window[1].trim();
        if !comment.starts_with("//") {
            continue;
        }
        let comment_text = comment.trim_start_matches('/').trim().to_lowercase();
        if word_similarity(&comment_text, &code_line.to_lowercase()) > 0.6 {
            redundant += 1;
        }
    }
    redundant
}

// --- Special characters --------------------------------------------------

fn special_chars() -> Vec<Pattern> {
    vec![
        Pattern {
            id: "emoji-checkmarks",
            name: "Checkmark emoji in comments",
            weight: 10.0,
            category: PatternCategory::SpecialChars,
            immune_to_formatting: true,
            detect: |code| count_matches(static_regex!(r"[✅❌⚠✓✔✗✘]"), code),
        },
        Pattern {
            id: "emoji-common",
            name: "Common assistant emoji (🔧💡🚀📝🎯)",
            weight: 8.0,
            category: PatternCategory::SpecialChars,
            immune_to_formatting: true,
            detect: |code| count_matches(static_regex!(r"[🔧💡🚀📝🎯⭐✨📊🎨⚡🌟]"), code),
        },
        Pattern {
            id: "emoji-suspicious",
            name: "Conversational emoji (🤔💪🎉👍🔥)",
            weight: 12.0,
            category: PatternCategory::SpecialChars,
            immune_to_formatting: true,
            detect: |code| count_matches(static_regex!(r"[🤔💪🎉👍🔥💯]"), code),
        },
        Pattern {
            id: "unicode-decorative",
            name: "Decorative box-drawing characters",
            weight: 7.0,
            category: PatternCategory::SpecialChars,
            immune_to_formatting: true,
            detect: |code| count_matches(static_regex!(r"[│┃║┤┌┐└┘├┬┴┼═→←↑↓⇒⇐•·]"), code),
        },
    ]
}

// --- Vocabulary ----------------------------------------------------------

fn vocabulary() -> Vec<Pattern> {
    vec![
        Pattern {
            id: "vocab-utilize",
            name: "\"Utilize\" instead of \"use\"",
            weight: 6.0,
            category: PatternCategory::Vocabulary,
            immune_to_formatting: true,
            detect: |code| {
                count_matches(static_regex!(r"(?i)\butilize\b"), &extract_comments(code))
            },
        },
        Pattern {
            id: "vocab-leverage",
            name: "\"Leverage\" in comments",
            weight: 7.0,
            category: PatternCategory::Vocabulary,
            immune_to_formatting: true,
            detect: |code| {
                count_matches(static_regex!(r"(?i)\bleverage\b"), &extract_comments(code))
            },
        },
        Pattern {
            id: "vocab-ensure",
            name: "\"Ensure\" overuse",
            weight: 6.0,
            category: PatternCategory::Vocabulary,
            immune_to_formatting: true,
            detect: |code| {
                let count =
                    count_matches(static_regex!(r"(?i)\bensure\b"), &extract_comments(code));
                if count > 3 {
                    count
                } else {
                    0
                }
            },
        },
        Pattern {
            id: "vocab-adverbs",
            name: "Formal adverbs (simply, essentially, basically)",
            weight: 5.0,
            category: PatternCategory::Vocabulary,
            immune_to_formatting: true,
            detect: |code| {
                count_matches(
                    static_regex!(
                        r"(?i)\b(simply|essentially|basically|fundamentally|effectively|appropriately)\b"
                    ),
                    &extract_comments(code),
                )
            },
        },
    ]
}

// --- Human markers (negative weights) ------------------------------------

fn human_markers() -> Vec<Pattern> {
    vec![
        Pattern {
            id: "debug-prints",
            name: "Informal debug prints",
            weight: -15.0,
            category: PatternCategory::HumanMarkers,
            immune_to_formatting: true,
            detect: |code| {
                count_matches(
                    static_regex!(
                        r#"(?i)console\.log\(['"](here|debug|wtf|test)['"]\)|print\(['"](debug|here)['"]\)"#
                    ),
                    code,
                )
            },
        },
        Pattern {
            id: "informal-comments",
            name: "Informal comments (wtf, hack, todo fix)",
            weight: -12.0,
            category: PatternCategory::HumanMarkers,
            immune_to_formatting: true,
            detect: |code| {
                count_matches(
                    static_regex!(r"(?i)\bwtf\b|\bhack\b|todo.*(fix|mess|later)|temporary|dirty"),
                    &extract_comments(code),
                )
            },
        },
        Pattern {
            id: "temp-vars",
            name: "Throwaway variable names (temp, foo, bar)",
            weight: -10.0,
            category: PatternCategory::HumanMarkers,
            immune_to_formatting: true,
            detect: |code| {
                count_matches(static_regex!(r"\b(temp|tmp|foo|bar|baz|dummy)\b"), code)
            },
        },
        Pattern {
            id: "commented-code",
            name: "Commented-out code left behind",
            weight: -8.0,
            category: PatternCategory::HumanMarkers,
            immune_to_formatting: true,
            detect: |code| {
                let commented_code_lines = code
                    .lines()
                    .filter(|l| {
                        let t = l.trim();
                        (t.starts_with("//") || t.starts_with('#'))
                            && t.chars().any(|c| "{};=()".contains(c))
                    })
                    .count();
                if commented_code_lines > 5 {
                    1
                } else {
                    0
                }
            },
        },
        Pattern {
            id: "typos-in-comments",
            name: "Typos in comments",
            weight: -10.0,
            category: PatternCategory::HumanMarkers,
            immune_to_formatting: true,
            detect: |code| {
                count_matches(
                    static_regex!(r"(?i)\bteh\b|\bfunciton\b|\bretrun\b|\brecieve\b|\bseperator\b"),
                    &extract_comments(code),
                )
            },
        },
        Pattern {
            id: "mixed-quotes",
            name: "Mixed quote styles",
            weight: -8.0,
            category: PatternCategory::HumanMarkers,
            immune_to_formatting: false,
            detect: |code| {
                let single = code.matches('\'').count() as f64;
                let double = code.matches('"').count() as f64;
                if single == 0.0 || double == 0.0 {
                    return 0;
                }
                let ratio = single.min(double) / single.max(double);
                if ratio > 0.2 {
                    1
                } else {
                    0
                }
            },
        },
        Pattern {
            id: "inconsistent-spacing",
            name: "Mixed indentation widths",
            weight: -7.0,
            category: PatternCategory::HumanMarkers,
            immune_to_formatting: false,
            detect: |code| {
                let mut twos = 0;
                let mut fours = 0;
                for line in code.lines() {
                    let leading = line.len() - line.trim_start_matches(' ').len();
                    if leading == 0 {
                        continue;
                    }
                    if leading % 4 == 0 {
                        fours += 1;
                    } else if leading % 2 == 0 {
                        twos += 1;
                    }
                }
                if twos > 5 && fours > 5 {
                    1
                } else {
                    0
                }
            },
        },
        Pattern {
            id: "aggressive-swearing",
            name: "Profanity and frustration",
            weight: -20.0,
            category: PatternCategory::HumanMarkers,
            immune_to_formatting: true,
            detect: |code| {
                count_matches(
                    static_regex!(
                        r"(?i)\b(fuck|shit|damn|crap|sucks|stupid|idiot|bastard|useless)\b"
                    ),
                    code,
                )
            },
        },
        Pattern {
            id: "weird-variable-names",
            name: "Arbitrary short names (x, data2, tmp)",
            weight: -5.0,
            category: PatternCategory::HumanMarkers,
            immune_to_formatting: true,
            detect: |code| {
                count_matches(static_regex!(r"\b(val|obj|data2|str2|res)\b"), code)
            },
        },
    ]
}

// --- Local helpers -------------------------------------------------------

/// Approximate function-body extraction for JS-family code.
fn extract_function_bodies(code: &str) -> Vec<String> {
    let Some(re) =
        static_regex!(r"(?s)function\s+\w+[^{]*\{.*?\}|\w+\s*=\s*\([^)]*\)\s*=>\s*\{.*?\}")
    else {
        return Vec::new();
    };
    re.find_iter(code).map(|m| m.as_str().to_string()).collect()
}

/// Index of the brace matching the one at `open`, or the text length
/// when unbalanced.
fn find_matching_brace(text: &str, open: usize) -> usize {
    let bytes = text.as_bytes();
    let mut depth = 0usize;
    for (i, &b) in bytes.iter().enumerate().skip(open) {
        match b {
            b'{' => depth += 1,
            b'}' => {
                depth = depth.saturating_sub(1);
                if depth == 0 {
                    return i;
                }
            }
            _ => {}
        }
    }
    text.len()
}

/// Share of long words the two strings have in common.
fn word_similarity(a: &str, b: &str) -> f64 {
    let words_a: Vec<&str> = a.split_whitespace().filter(|w| w.len() > 3).collect();
    let words_b: Vec<&str> = b.split_whitespace().filter(|w| w.len() > 3).collect();
    let max_len = words_a.len().max(words_b.len());
    if max_len == 0 {
        return 0.0;
    }
    let common = words_a.iter().filter(|w| words_b.contains(w)).count();
    common as f64 / max_len as f64
}

#[cfg(test)]
mod tests {
    use super::*;

    fn by_id(id: &str) -> &'static Pattern {
        crate::patterns::catalog()
            .iter()
            .find(|p| p.id == id)
            .unwrap_or_else(|| panic!("missing pattern {id}"))
    }

    #[test]
    fn lets_phrase_fires_in_comments_only() {
        let p = by_id("ai-phrase-lets");
        assert_eq!((p.detect)("// Let's break this down into steps\n"), 1);
        assert_eq!((p.detect)("const msg = \"Let's break this\";\n"), 0);
    }

    #[test]
    fn wrapper_function_detection() {
        let p = by_id("wrapper-functions");
        let code = "function fetchUser(id) { return getUser(id); }";
        assert_eq!((p.detect)(code), 1);
        assert_eq!((p.detect)("function real(x) { let y = x + 1; return y * 2; }"), 0);
    }

    #[test]
    fn perfect_quote_consistency() {
        let p = by_id("perfect-consistency");
        let uniform = "\"a\" \"b\" \"c\" \"d\" \"e\" \"f\"";
        assert_eq!((p.detect)(uniform), 1);
        let mixed = "\"a\" 'b' \"c\" 'd'";
        assert_eq!((p.detect)(mixed), 0);
    }

    #[test]
    fn debug_prints_are_negative_evidence() {
        let p = by_id("debug-prints");
        assert!(p.weight < 0.0);
        assert_eq!((p.detect)("console.log(\"here\");"), 1);
        assert_eq!((p.detect)("console.log(userCount);"), 0);
    }

    #[test]
    fn swearing_counts_every_occurrence() {
        let p = by_id("aggressive-swearing");
        assert_eq!((p.detect)("// damn this stupid cache\n// it sucks"), 3);
    }

    #[test]
    fn redundant_comment_restating_code() {
        let code = "// increment the user counter value\nincrement the_user_counter_value();\n";
        assert!(detect_redundant_comments(code) >= 0);
        let exact = "// return user name here today\nreturn user name here today;\n";
        assert_eq!(detect_redundant_comments(exact), 1);
    }

    #[test]
    fn matching_brace() {
        assert_eq!(find_matching_brace("{ab{c}d}", 0), 7);
        assert_eq!(find_matching_brace("{never closed", 0), 13);
    }

    #[test]
    fn emoji_detection() {
        let p = by_id("emoji-suspicious");
        assert_eq!((p.detect)("// works now 🎉🔥"), 2);
    }
}
