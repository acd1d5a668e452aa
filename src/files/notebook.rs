//! Jupyter notebook reader
//!
//! Only code cells are kept. Markdown and raw cells are dropped.

use serde::Deserialize;
use serde_json::Value;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum NotebookError {
    #[error("Invalid notebook JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Notebook has no 'cells' array")]
    MissingCells,
}

/// Cell source is either one string or a list of lines
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
enum CellSource {
    Text(String),
    Lines(Vec<String>),
}

impl CellSource {
    fn joined(self) -> String {
        match self {
            CellSource::Text(s) => s,
            CellSource::Lines(lines) => lines.concat(),
        }
    }
}

#[derive(Debug, Deserialize)]
struct RawCell {
    #[serde(default)]
    cell_type: String,
    #[serde(default)]
    source: Option<CellSource>,
    #[serde(default)]
    outputs: Vec<Value>,
}

#[derive(Debug, Deserialize)]
struct RawNotebook {
    cells: Option<Vec<RawCell>>,
    #[serde(default)]
    metadata: Value,
}

#[derive(Debug, Clone, PartialEq)]
pub struct CodeCell {
    pub source: String,
    pub outputs: Vec<Value>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Notebook {
    pub cells: Vec<CodeCell>,
    kernel_language: Option<String>,
}

impl Notebook {
    /// Kernel language, `unknown` when absent or unrecognised
    pub fn language(&self) -> &'static str {
        match self.kernel_language.as_deref().map(str::to_lowercase).as_deref() {
            Some("python") => "python",
            Some("ir") => "R",
            Some("javascript") => "javascript",
            Some("scala") => "scala",
            _ => "unknown",
        }
    }

    /// Code cells joined by a blank line
    pub fn code(&self) -> String {
        self.cells
            .iter()
            .map(|c| c.source.as_str())
            .collect::<Vec<_>>()
            .join("\n\n")
    }
}

pub fn parse_notebook(json: &str) -> Result<Notebook, NotebookError> {
    let raw: RawNotebook = serde_json::from_str(json)?;
    let cells = raw.cells.ok_or(NotebookError::MissingCells)?;

    let kernel_language = raw
        .metadata
        .pointer("/kernelspec/language")
        .or_else(|| raw.metadata.pointer("/language_info/name"))
        .and_then(Value::as_str)
        .map(str::to_string);

    let cells = cells
        .into_iter()
        .filter(|c| c.cell_type == "code")
        .map(|c| CodeCell {
            source: c.source.map(CellSource::joined).unwrap_or_default(),
            outputs: c.outputs,
        })
        .collect();

    Ok(Notebook {
        cells,
        kernel_language,
    })
}
