//! Compiled keyword and declaration patterns

use regex::Regex;
use std::sync::OnceLock;

fn compile(cell: &'static OnceLock<Regex>, pattern: &str) -> &'static Regex {
    cell.get_or_init(|| Regex::new(pattern).expect("valid regex"))
}

/// `function` followed by whitespace and an identifier
pub(super) fn function_declaration() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    compile(&RE, r"function\s+[A-Za-z0-9_]+")
}

/// `class` followed by whitespace and an identifier
pub(super) fn class_declaration() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    compile(&RE, r"class\s+[A-Za-z0-9_]+")
}

// Keyword boundaries are ASCII-only: "éif" still counts as `if`.
// Alternation order matters: `else if` must be tried before `else`.
pub(super) fn conditional_keyword() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    compile(&RE, r"(?-u:\b)(if|else if|else|switch|case)(?-u:\b)")
}

pub(super) fn loop_keyword() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    compile(&RE, r"(?-u:\b)(for|while|do)(?-u:\b)")
}

pub(super) fn function_keyword() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    compile(&RE, r"(?-u:\b)function(?-u:\b)")
}
