//! Overlay of model-reported values on heuristic ones
//!
//! Every field is merged on its own: `final = model ?? fallback`.
//!
//! Numeric fields keep a quirk of the original tool: a model value of `0` is
//! treated exactly like a missing value and the heuristic wins. A model that
//! genuinely scores the code 0/100 is therefore indistinguishable from one
//! that reported nothing. List fields do not have this quirk; an empty list
//! from the model is kept.

use crate::metrics::MetricsSnapshot;
use crate::models::{PatternList, PatternReport};
use regex::Regex;
use serde_json::Value;
use std::sync::OnceLock;

/// Structured values a model response may carry. All optional.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ModelReport {
    pub complexity: Option<u64>,
    pub lines_of_code: Option<u64>,
    pub function_count: Option<u64>,
    pub class_count: Option<u64>,
    pub overall_score: Option<u64>,
    pub design_patterns: Option<Vec<String>>,
    pub anti_patterns: Option<Vec<String>>,
    pub best_practices: Option<Vec<String>>,
    pub suggestions: Option<Vec<String>>,
}

/// Fallback lists for the four pattern fields
pub struct Placeholders {
    pub design_patterns: &'static [&'static str],
    pub anti_patterns: &'static [&'static str],
    pub best_practices: &'static [&'static str],
    pub suggestions: &'static [&'static str],
}

pub const ANALYSIS_PLACEHOLDERS: Placeholders = Placeholders {
    design_patterns: &["Factory", "Singleton"],
    anti_patterns: &["God Object"],
    best_practices: &["Encapsulation", "Separation of Concerns"],
    suggestions: &["Use dependency injection", "Refactor large methods"],
};

pub const REPORT_PLACEHOLDERS: Placeholders = Placeholders {
    design_patterns: &["Factory", "Observer"],
    anti_patterns: &["Spaghetti Code"],
    best_practices: &["Modularization", "Immutability"],
    suggestions: &[
        "Use more functional programming",
        "Simplify nested conditions",
    ],
};

fn fenced_json() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    // (?s) so the object may span lines
    RE.get_or_init(|| Regex::new(r"(?s)```json\s*(\{.*?\})\s*```").expect("valid regex"))
}

impl ModelReport {
    /// Pull structured fields out of a free-text response.
    ///
    /// Looks for a ```json fenced object first, then tries the whole
    /// response as JSON. Anything unparseable yields an empty report.
    pub fn parse(response: &str) -> Self {
        let candidate = fenced_json()
            .captures_iter(response)
            .filter_map(|c| c.get(1))
            .last()
            .map(|m| m.as_str())
            .unwrap_or_else(|| response.trim());

        match serde_json::from_str::<Value>(candidate) {
            Ok(value @ Value::Object(_)) => Self::from_value(&value),
            Ok(_) => Self::default(),
            Err(e) => {
                tracing::debug!("No structured block in model response: {}", e);
                Self::default()
            }
        }
    }

    fn from_value(data: &Value) -> Self {
        Self {
            complexity: field_u64(data, &["complexity"]),
            lines_of_code: field_u64(data, &["linesOfCode", "lines_of_code"]),
            function_count: field_u64(data, &["functionCount", "function_count"]),
            class_count: field_u64(data, &["classCount", "class_count"]),
            overall_score: field_u64(data, &["overallScore", "overall_score"]),
            design_patterns: field_strings(data, &["designPatterns", "design_patterns"]),
            anti_patterns: field_strings(data, &["antiPatterns", "anti_patterns"]),
            best_practices: field_strings(data, &["bestPractices", "best_practices"]),
            suggestions: field_strings(data, &["suggestions"]),
        }
    }
}

fn lookup<'a>(data: &'a Value, keys: &[&str]) -> Option<&'a Value> {
    keys.iter()
        .filter_map(|k| data.get(*k))
        .find(|v| !v.is_null())
}

/// Non-negative integer field; whole-valued floats are accepted
fn field_u64(data: &Value, keys: &[&str]) -> Option<u64> {
    let value = lookup(data, keys)?;
    value.as_u64().or_else(|| {
        value
            .as_f64()
            .filter(|f| *f >= 0.0 && f.fract() == 0.0)
            .map(|f| f as u64)
    })
}

fn field_strings(data: &Value, keys: &[&str]) -> Option<Vec<String>> {
    lookup(data, keys)?.as_array().map(|arr| {
        arr.iter()
            .filter_map(|v| v.as_str().map(|s| s.to_string()))
            .collect()
    })
}

/// `model ?? heuristic`, where a model `0` counts as absent
fn merge_count(model: Option<u64>, heuristic: usize) -> usize {
    model
        .filter(|&v| v != 0)
        .map(|v| usize::try_from(v).unwrap_or(usize::MAX))
        .unwrap_or(heuristic)
}

fn merge_list(model: Option<&Vec<String>>, fallback: &[&str]) -> PatternList {
    match model {
        Some(items) => PatternList::reported(items.clone()),
        None => PatternList::placeholder(fallback),
    }
}

/// Field-by-field overlay of model metrics on the heuristic snapshot
pub fn merge_metrics(heuristic: MetricsSnapshot, model: &ModelReport) -> MetricsSnapshot {
    let overall_score = model
        .overall_score
        .filter(|&v| v != 0)
        .map(|v| v.min(100) as u32)
        .unwrap_or(heuristic.overall_score);

    MetricsSnapshot {
        complexity: merge_count(model.complexity, heuristic.complexity),
        lines_of_code: merge_count(model.lines_of_code, heuristic.lines_of_code),
        function_count: merge_count(model.function_count, heuristic.function_count),
        class_count: merge_count(model.class_count, heuristic.class_count),
        overall_score,
    }
}

/// Pattern lists from the model, or the given placeholders
pub fn merge_patterns(model: &ModelReport, fallback: &Placeholders) -> PatternReport {
    PatternReport {
        design_patterns: merge_list(model.design_patterns.as_ref(), fallback.design_patterns),
        anti_patterns: merge_list(model.anti_patterns.as_ref(), fallback.anti_patterns),
        best_practices: merge_list(model.best_practices.as_ref(), fallback.best_practices),
        suggestions: merge_list(model.suggestions.as_ref(), fallback.suggestions),
    }
}
