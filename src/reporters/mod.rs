//! Output reporters for analysis results
//!
//! - `terminal` - Styled terminal sections (metrics table, pattern lists, code)
//! - `markdown` - Markdown report saved under the reports directory
//! - `json` - Machine-readable metrics for the offline `metrics` command

pub mod markdown;
pub mod terminal;

use crate::metrics::MetricsSnapshot;
use crate::scoring::ScoreBreakdown;
use anyhow::{anyhow, Result};
use serde::Serialize;
use std::str::FromStr;

/// Formats supported by the `metrics` command
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Text,
    Json,
}

impl FromStr for OutputFormat {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "text" | "txt" | "terminal" => Ok(OutputFormat::Text),
            "json" => Ok(OutputFormat::Json),
            _ => Err(anyhow!("Unknown format '{}'. Valid formats: text, json", s)),
        }
    }
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OutputFormat::Text => write!(f, "text"),
            OutputFormat::Json => write!(f, "json"),
        }
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct MetricsDocument<'a> {
    file: &'a str,
    language: &'a str,
    metrics: &'a MetricsSnapshot,
    #[serde(skip_serializing_if = "Option::is_none")]
    breakdown: Option<&'a ScoreBreakdown>,
}

/// Render heuristic metrics for one file
pub fn render_metrics_report(
    file: &str,
    language: &str,
    metrics: &MetricsSnapshot,
    breakdown: Option<&ScoreBreakdown>,
    format: OutputFormat,
) -> Result<String> {
    match format {
        OutputFormat::Text => {
            let mut out = terminal::render_metrics(metrics);
            if let Some(b) = breakdown {
                out.push_str(&terminal::render_breakdown(b));
            }
            Ok(out)
        }
        OutputFormat::Json => {
            let doc = MetricsDocument {
                file,
                language,
                metrics,
                breakdown,
            };
            Ok(serde_json::to_string_pretty(&doc)?)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_parsing() {
        assert_eq!(OutputFormat::from_str("text").unwrap(), OutputFormat::Text);
        assert_eq!(OutputFormat::from_str("JSON").unwrap(), OutputFormat::Json);
        assert!(OutputFormat::from_str("sarif").is_err());
        assert_eq!(OutputFormat::Json.to_string(), "json");
    }

    #[test]
    fn test_json_metrics_report() {
        let m = crate::metrics::extract("function a() {}\nclass B {}");
        let b = ScoreBreakdown::compute(m.complexity, m.lines_of_code, m.function_count, m.class_count);

        let out = render_metrics_report("a.js", "javascript", &m, Some(&b), OutputFormat::Json).unwrap();
        let value: serde_json::Value = serde_json::from_str(&out).unwrap();
        assert_eq!(value["file"], "a.js");
        assert_eq!(value["metrics"]["functionCount"], 1);
        assert_eq!(value["metrics"]["classCount"], 1);
        assert_eq!(value["breakdown"]["overall"], m.overall_score);

        let out = render_metrics_report("a.js", "javascript", &m, None, OutputFormat::Json).unwrap();
        assert!(!out.contains("breakdown"));
    }
}
