//! Terminal sections with colors
//!
//! Every function returns the rendered text; the CLI decides where it goes.

use crate::metrics::MetricsSnapshot;
use crate::models::{PatternList, PatternReport};
use crate::scoring::{complexity_rating, score_rating, Rating, ScoreBreakdown};
use console::{style, StyledObject};

const RULE_WIDTH: usize = 48;
const METRIC_COL: usize = 16;
const VALUE_COL: usize = 10;

fn rating_label(rating: Rating) -> StyledObject<String> {
    let text = rating.to_string();
    match rating {
        Rating::Good => style(text).green(),
        Rating::Medium => style(text).yellow(),
        Rating::High | Rating::Poor => style(text).red(),
    }
}

fn row(metric: &str, value: &str, rating: Option<Rating>) -> String {
    let rating = rating
        .map(|r| rating_label(r).to_string())
        .unwrap_or_else(|| style("-").dim().to_string());
    format!("  {:<METRIC_COL$}{:<VALUE_COL$}{}\n", metric, value, rating)
}

/// Heading with a rule underneath
pub fn section(title: &str) -> String {
    format!(
        "\n{}\n{}\n",
        style(title).bold().cyan(),
        style("─".repeat(RULE_WIDTH)).dim()
    )
}

/// Application banner
pub fn render_title(text: &str) -> String {
    let bar = "═".repeat(RULE_WIDTH);
    format!(
        "{}\n  {}\n{}\n",
        style(&bar).magenta(),
        style(text).bold().magenta(),
        style(&bar).magenta()
    )
}

/// Metric / Value / Rating table
pub fn render_metrics(metrics: &MetricsSnapshot) -> String {
    let mut out = section("Code Metrics Dashboard");
    out.push_str(&format!(
        "  {}\n",
        style(format!(
            "{:<METRIC_COL$}{:<VALUE_COL$}{}",
            "Metric", "Value", "Rating"
        ))
        .cyan()
    ));
    out.push_str(&row(
        "Complexity",
        &metrics.complexity.to_string(),
        Some(complexity_rating(metrics.complexity)),
    ));
    out.push_str(&row("Lines of Code", &metrics.lines_of_code.to_string(), None));
    out.push_str(&row("Functions", &metrics.function_count.to_string(), None));
    out.push_str(&row("Classes", &metrics.class_count.to_string(), None));
    out.push_str(&row(
        "Overall Score",
        &format!("{}/100", metrics.overall_score),
        Some(score_rating(metrics.overall_score)),
    ));
    out
}

/// Sub-scores behind the overall heuristic score
pub fn render_breakdown(b: &ScoreBreakdown) -> String {
    let mut out = section("Score Breakdown");
    for (label, value, weight) in [
        ("Complexity", b.complexity_score, "30%"),
        ("Lines", b.line_score, "20%"),
        ("Functions", b.function_score, "25%"),
        ("Classes", b.class_score, "25%"),
    ] {
        out.push_str(&format!(
            "  {:<METRIC_COL$}{:>6.1}  {}\n",
            label,
            value,
            style(format!("x {}", weight)).dim()
        ));
    }
    out.push_str(&format!(
        "  {}{:>6}\n",
        style(format!("{:<METRIC_COL$}", "Overall")).bold(),
        b.overall
    ));
    out
}

type Paint = fn(StyledObject<String>) -> StyledObject<String>;

fn render_list(out: &mut String, heading: &str, list: &PatternList, mark: &str, paint: Paint) {
    if list.is_empty() {
        return;
    }
    let heading = if list.placeholder {
        format!("{} {}", heading, style("(placeholder)").dim())
    } else {
        heading.to_string()
    };
    out.push_str(&format!("\n{}\n", paint(style(heading))));
    for item in &list.items {
        out.push_str(&format!("  {}\n", paint(style(format!("{} {}", mark, item)))));
    }
}

/// The four pattern lists; empty lists are skipped
pub fn render_patterns(patterns: &PatternReport) -> String {
    let mut out = section("Design Patterns Analysis");
    let p = patterns;
    render_list(&mut out, "Design Patterns Detected:", &p.design_patterns, "✓", |s| s.green());
    render_list(&mut out, "Anti-Patterns Detected:", &p.anti_patterns, "✗", |s| s.red());
    render_list(&mut out, "Best Practice Suggestions:", &p.best_practices, "•", |s| s.yellow());
    render_list(&mut out, "Improvement Suggestions:", &p.suggestions, "•", |s| s.blue());
    out
}

pub fn render_detailed(text: &str) -> String {
    let mut out = section("Detailed Analysis Report");
    out.push_str(text);
    out.push('\n');
    out
}

/// Code listing under a titled section
pub fn render_code(title: &str, code: &str, language: &str) -> String {
    let mut out = section(title);
    out.push_str(&format!("{}\n", style(format!("[{}]", language)).dim()));
    for line in code.lines() {
        out.push_str(&format!("{} {}\n", style("│").dim(), line));
    }
    out
}
