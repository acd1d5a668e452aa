//! Markdown analysis report
//!
//! The report is built from the free-text model answer. Each section keeps
//! the answer lines that mention one of its keywords, or a fixed sentence
//! when none do.

use crate::metrics::MetricsSnapshot;
use anyhow::{Context, Result};
use chrono::{Local, Utc};
use std::fs;
use std::path::{Path, PathBuf};

pub struct ReportInput<'a> {
    pub file_path: &'a Path,
    pub file_type: &'a str,
    pub analysis: &'a str,
    pub metrics: Option<&'a MetricsSnapshot>,
}

/// Keyword filter for one report section
struct Extract {
    title: &'static str,
    keywords: &'static [&'static str],
    case_insensitive: bool,
    bullet: &'static str,
    empty: &'static str,
}

const EXTRACTS: &[Extract] = &[
    Extract {
        title: "Key Findings",
        keywords: &["!", "critical", "important"],
        case_insensitive: false,
        bullet: "- ",
        empty: "_No critical findings identified_",
    },
    Extract {
        title: "Recommendations",
        keywords: &["recommend", "should", "could", "consider"],
        case_insensitive: false,
        bullet: "- ",
        empty: "_No specific recommendations_",
    },
    Extract {
        title: "Action Items",
        keywords: &["Fix", "Update", "Add", "Remove", "Refactor"],
        case_insensitive: false,
        bullet: "- [ ] ",
        empty: "_No immediate action items_",
    },
    Extract {
        title: "Security Considerations",
        keywords: &["security", "vulnerability", "risk"],
        case_insensitive: true,
        bullet: "- ",
        empty: "_No security concerns identified_",
    },
    Extract {
        title: "Performance Insights",
        keywords: &["performance", "optimization", "speed", "memory"],
        case_insensitive: true,
        bullet: "- ",
        empty: "_No performance issues identified_",
    },
    Extract {
        title: "Best Practices",
        keywords: &["practice", "convention", "standard"],
        case_insensitive: true,
        bullet: "- ",
        empty: "_No best practice violations identified_",
    },
];

impl Extract {
    fn matches(&self, line: &str) -> bool {
        if self.case_insensitive {
            let lower = line.to_lowercase();
            self.keywords.iter().any(|k| lower.contains(k))
        } else {
            self.keywords.iter().any(|k| line.contains(k))
        }
    }

    fn render(&self, analysis: &str) -> String {
        let lines: Vec<String> = analysis
            .lines()
            .filter(|line| self.matches(line))
            .map(|line| format!("{}{}", self.bullet, line.trim()))
            .collect();

        if lines.is_empty() {
            self.empty.to_string()
        } else {
            lines.join("\n")
        }
    }
}

fn render_metrics(metrics: Option<&MetricsSnapshot>) -> String {
    let Some(m) = metrics else {
        return "_No metrics available_".to_string();
    };
    format!(
        "- **Complexity:** {}\n- **Lines of code:** {}\n- **Functions:** {}\n- **Classes:** {}\n- **Overall score:** {}/100",
        m.complexity, m.lines_of_code, m.function_count, m.class_count, m.overall_score
    )
}

/// Non-blank analysis lines, one paragraph each
fn render_summary(analysis: &str) -> String {
    analysis
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .collect::<Vec<_>>()
        .join("\n\n")
}

pub fn render(input: &ReportInput<'_>) -> String {
    let file_name = input
        .file_path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| input.file_path.display().to_string());
    let timestamp = Local::now().format("%Y-%m-%d %H:%M:%S");

    let mut md = format!(
        r#"# Code Analysis Report

## Overview
- **File:** `{}`
- **Type:** {}
- **Date:** {}

## Metrics
{}

## Analysis Summary
{}
"#,
        file_name,
        input.file_type.to_uppercase(),
        timestamp,
        render_metrics(input.metrics),
        render_summary(input.analysis)
    );

    for extract in EXTRACTS {
        md.push_str(&format!("\n## {}\n{}\n", extract.title, extract.render(input.analysis)));
    }

    md.push_str("\n---\nGenerated by codecritic\n");
    md
}

/// Write the report as `analysis_<unix_millis>.md` under `dir`
pub fn save(dir: &Path, content: &str) -> Result<PathBuf> {
    fs::create_dir_all(dir)
        .with_context(|| format!("Failed to create reports directory {}", dir.display()))?;

    let path = dir.join(format!("analysis_{}.md", Utc::now().timestamp_millis()));
    fs::write(&path, content)
        .with_context(|| format!("Failed to write report {}", path.display()))?;

    tracing::info!("Report saved to {}", path.display());
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;

    const ANALYSIS: &str = "Overall the structure is fine.\n\n\
        This is important: the parser leaks!\n\
        You should consider splitting main().\n\
        Refactor the config loader.\n\
        A SECURITY risk exists in eval usage.\n\
        Memory use grows with input size.\n\
        Follow the naming convention.";

    fn input<'a>(analysis: &'a str, metrics: Option<&'a MetricsSnapshot>) -> ReportInput<'a> {
        ReportInput {
            file_path: Path::new("src/app/main.js"),
            file_type: "javascript",
            analysis,
            metrics,
        }
    }

    #[test]
    fn test_sections_filter_lines() {
        let md = render(&input(ANALYSIS, None));

        assert!(md.contains("- **File:** `main.js`"));
        assert!(md.contains("- **Type:** JAVASCRIPT"));
        assert!(md.contains("_No metrics available_"));
        assert!(md.contains("## Key Findings\n- This is important: the parser leaks!"));
        assert!(md.contains("## Recommendations\n- You should consider splitting main()."));
        assert!(md.contains("## Action Items\n- [ ] Refactor the config loader."));
        assert!(md.contains("## Security Considerations\n- A SECURITY risk exists in eval usage."));
        assert!(md.contains("## Performance Insights\n- Memory use grows with input size."));
        assert!(md.contains("## Best Practices\n- Follow the naming convention."));
    }

    #[test]
    fn test_empty_sections_use_fixed_sentences() {
        let m = crate::metrics::extract("function a() {}");
        let md = render(&input("Nothing notable.", Some(&m)));

        assert!(md.contains("- **Functions:** 1"));
        assert!(md.contains("_No critical findings identified_"));
        assert!(md.contains("_No specific recommendations_"));
        assert!(md.contains("_No immediate action items_"));
        assert!(md.contains("_No security concerns identified_"));
        assert!(md.contains("_No performance issues identified_"));
        assert!(md.contains("_No best practice violations identified_"));
    }

    #[test]
    fn test_summary_drops_blank_lines() {
        assert_eq!(render_summary("  a  \n\n\n b\n"), "a\n\nb");
    }

    #[test]
    fn test_save_creates_directory() {
        let dir = tempfile::tempdir().unwrap();
        let reports = dir.path().join("reports");
        let path = save(&reports, "# Report").unwrap();

        assert!(path.starts_with(&reports));
        let name = path.file_name().unwrap().to_string_lossy().into_owned();
        assert!(name.starts_with("analysis_") && name.ends_with(".md"));
        assert_eq!(std::fs::read_to_string(path).unwrap(), "# Report");
    }
}
