//! Result records handed from the analyzer to the reporters

use crate::metrics::MetricsSnapshot;
use serde::{Deserialize, Serialize};

/// A list of pattern names or suggestions.
///
/// `placeholder` marks the fixed fallback lists used when the model did not
/// report anything. Those lists stand for "no data" and are not findings.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct PatternList {
    pub items: Vec<String>,
    #[serde(default)]
    pub placeholder: bool,
}

impl PatternList {
    pub fn reported(items: Vec<String>) -> Self {
        Self {
            items,
            placeholder: false,
        }
    }

    pub fn placeholder(items: &[&str]) -> Self {
        Self {
            items: items.iter().map(|s| s.to_string()).collect(),
            placeholder: true,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PatternReport {
    pub design_patterns: PatternList,
    pub anti_patterns: PatternList,
    pub best_practices: PatternList,
    pub suggestions: PatternList,
}

/// Result of a code review
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CodeAnalysis {
    pub metrics: MetricsSnapshot,
    pub patterns: PatternReport,
    pub detailed_text: String,
    /// True when the completion service gave no answer
    #[serde(default)]
    pub failed: bool,
}

impl CodeAnalysis {
    pub const FAILURE_TEXT: &'static str = "Error in generating analysis. Please check the logs.";

    /// Fixed record substituted when the completion service fails
    pub fn failed() -> Self {
        Self {
            metrics: MetricsSnapshot::zeroed(),
            patterns: PatternReport::default(),
            detailed_text: Self::FAILURE_TEXT.to_string(),
            failed: true,
        }
    }

    /// Plain-text digest fed back into the refactoring prompt
    pub fn summary(&self) -> String {
        let m = &self.metrics;
        let mut out = format!(
            "Complexity: {}\nLines of code: {}\nFunctions: {}\nClasses: {}\nOverall score: {}/100\n",
            m.complexity, m.lines_of_code, m.function_count, m.class_count, m.overall_score
        );
        for (label, list) in [
            ("Anti-patterns", &self.patterns.anti_patterns),
            ("Suggestions", &self.patterns.suggestions),
        ] {
            if !list.placeholder && !list.is_empty() {
                out.push_str(&format!("{}: {}\n", label, list.items.join(", ")));
            }
        }
        out.push('\n');
        out.push_str(&self.detailed_text);
        out
    }
}

/// Result of a full analysis report request
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisReport {
    pub patterns: PatternReport,
    pub detailed_text: String,
    #[serde(default)]
    pub failed: bool,
}

impl AnalysisReport {
    pub const FAILURE_TEXT: &'static str = "Error in generating report. Please check the logs.";

    pub fn failed() -> Self {
        Self {
            patterns: PatternReport::default(),
            detailed_text: Self::FAILURE_TEXT.to_string(),
            failed: true,
        }
    }
}

/// Output of the two-stage requirements pipeline
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GeneratedCode {
    pub code: String,
    pub analysis: String,
    pub language: String,
}
