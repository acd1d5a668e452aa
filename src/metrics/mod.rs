//! Heuristic source metrics
//!
//! Structural counts derived from raw text by lexical pattern matching.
//! No parsing happens here: a declaration is whatever the patterns in
//! [`patterns`] recognise, so languages that declare functions without the
//! `function` keyword will undercount. That is a known limitation of the
//! heuristic, not something to paper over.
//!
//! ```text
//! lines_of_code  = segments after splitting on '\n' (trailing one included)
//! function_count = matches of  function\s+\w+
//! class_count    = matches of  class\s+\w+
//! complexity     = conditionals + loops + `function` keywords
//! overall_score  = scoring::score(..)
//! ```

mod patterns;

use crate::scoring;
use serde::{Deserialize, Serialize};

/// Metrics for one piece of source text
///
/// Produced fresh for every analysis and never mutated afterwards; model
/// reported values are overlaid by building a new snapshot
/// (see `analyzer::merge`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MetricsSnapshot {
    pub lines_of_code: usize,
    pub function_count: usize,
    pub class_count: usize,
    pub complexity: usize,
    pub overall_score: u32,
}

impl MetricsSnapshot {
    /// The all-zero snapshot used when analysis could not be produced
    pub fn zeroed() -> Self {
        Self::default()
    }
}

/// Extract metrics from source text. Never fails.
pub fn extract(text: &str) -> MetricsSnapshot {
    let lines_of_code = count_lines(text);
    let function_count = patterns::function_declaration().find_iter(text).count();
    let class_count = patterns::class_declaration().find_iter(text).count();
    let complexity = complexity(text);

    MetricsSnapshot {
        lines_of_code,
        function_count,
        class_count,
        complexity,
        overall_score: scoring::score(complexity, lines_of_code, function_count, class_count),
    }
}

/// Number of '\n'-delimited segments, so "" is one line and "a\n" is two.
pub fn count_lines(text: &str) -> usize {
    text.split('\n').count()
}

/// Conditionals + loops + `function` keywords.
///
/// The three counts use separate patterns and are summed without
/// deduplication. `function` is therefore counted here as well as in
/// `function_count`.
pub fn complexity(text: &str) -> usize {
    let conditionals = patterns::conditional_keyword().find_iter(text).count();
    let loops = patterns::loop_keyword().find_iter(text).count();
    let functions = patterns::function_keyword().find_iter(text).count();

    conditionals + loops + functions
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_empty_text() {
        let m = extract("");
        assert_eq!(m.lines_of_code, 1);
        assert_eq!(m.function_count, 0);
        assert_eq!(m.class_count, 0);
        assert_eq!(m.complexity, 0);
    }

    #[test]
    fn test_single_line_function() {
        let m = extract("function foo() { if (x) { for (;;) {} } }");
        assert_eq!(m.function_count, 1);
        assert_eq!(m.complexity, 3);
        assert_eq!(m.lines_of_code, 1);
    }

    #[test]
    fn test_trailing_newline_counts_empty_segment() {
        assert_eq!(count_lines("a\nb\n"), 3);
        assert_eq!(count_lines("\n"), 2);
    }

    #[test]
    fn test_word_boundaries() {
        // ifDone / format / doThing / classy must not count as keywords
        let m = extract("ifDone(); format(x); doThing(); var classy = 1;");
        assert_eq!(m.complexity, 0);
        assert_eq!(m.class_count, 0);
    }

    #[test]
    fn test_ascii_word_boundaries() {
        // Non-ASCII letters are not word characters for keyword matching
        assert_eq!(complexity("éif (x) {} ñfor (;;) {}"), 2);
        assert_eq!(complexity("ifé"), 1);
    }

    #[test]
    fn test_else_if_counts_once() {
        assert_eq!(complexity("if (a) {} else if (b) {} else {}"), 3);
    }

    #[test]
    fn test_switch_and_loops() {
        let code = "switch (x) { case 1: break; case 2: break; }\nwhile (y) {}\ndo {} while (z)";
        // switch + 2 case, while + do + while
        assert_eq!(complexity(code), 6);
    }

    #[test]
    fn test_function_keyword_counted_in_complexity_only_when_undeclared() {
        // Anonymous function: keyword counts for complexity, not as a declaration
        let m = extract("const f = function () {};");
        assert_eq!(m.function_count, 0);
        assert_eq!(m.complexity, 1);
    }

    #[test]
    fn test_classes_and_functions() {
        let code = "class User {}\nclass Admin extends User {}\nfunction greet(name) {}\nfunction   sum(a, b) {}";
        let m = extract(code);
        assert_eq!(m.class_count, 2);
        assert_eq!(m.function_count, 2);
        assert_eq!(m.lines_of_code, 4);
    }

    #[test]
    fn test_non_code_text_is_zero_structure() {
        let m = extract("Just some prose.\nNothing to see here.");
        assert_eq!(m.function_count, 0);
        assert_eq!(m.class_count, 0);
        assert_eq!(m.complexity, 0);
        assert_eq!(m.lines_of_code, 2);
    }

    #[test]
    fn test_overall_score_matches_scoring_model() {
        let code = "function a() {}\nclass B {}";
        let m = extract(code);
        assert_eq!(
            m.overall_score,
            scoring::score(m.complexity, m.lines_of_code, m.function_count, m.class_count)
        );
    }

    proptest! {
        #[test]
        fn prop_lines_are_newlines_plus_one(text in ".*") {
            prop_assert_eq!(extract(&text).lines_of_code, text.matches('\n').count() + 1);
        }

        #[test]
        fn prop_function_declarations_counted(n in 0usize..40) {
            let code: String = (0..n).map(|i| format!("function f{i}() {{}}\n")).collect();
            prop_assert_eq!(extract(&code).function_count, n);
        }

        #[test]
        fn prop_extract_is_pure(text in "[a-z (){};\n]{0,200}") {
            prop_assert_eq!(extract(&text), extract(&text));
        }

        #[test]
        fn prop_score_in_range(text in "\\PC{0,300}") {
            prop_assert!(extract(&text).overall_score <= 100);
        }
    }
}
