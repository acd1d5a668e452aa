//! Reading inputs and writing generated code
//!
//! Every read failure (missing, directory, unreadable, blank) is reported
//! as `None` after logging the reason; the caller aborts the current action
//! and the session carries on.

pub mod notebook;

use std::fs;
use std::path::{Path, PathBuf};
use tracing::{error, info};

pub const DEFAULT_OUTPUT_DIR: &str = "output";
pub const DEFAULT_REPORTS_DIR: &str = "reports";
const DEFAULT_EXTENSION: &str = "js";

const EXAMPLE_CODE: &str = r#"// Example JavaScript code
function greet(name) {
  if (!name) {
    throw new Error('Name is required');
  }
  return `Hello, ${name}!`;
}

// TODO: Add input validation
function calculateSum(numbers) {
  return numbers.reduce((sum, num) => sum + num, 0);
}

class User {
  constructor(name, age) {
    this.name = name;
    this.age = age;
  }

  isAdult() {
    return this.age >= 18;
  }
}

module.exports = {
  greet,
  calculateSum,
  User
};"#;

/// Text to analyze plus the language it is written in
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceInput {
    pub text: String,
    pub language: String,
}

/// File access rooted at a working directory
#[derive(Debug, Clone)]
pub struct FileStore {
    root: PathBuf,
    output_dir: PathBuf,
    reports_dir: PathBuf,
}

impl FileStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            output_dir: PathBuf::from(DEFAULT_OUTPUT_DIR),
            reports_dir: PathBuf::from(DEFAULT_REPORTS_DIR),
        }
    }

    pub fn with_dirs(mut self, output_dir: impl Into<PathBuf>, reports_dir: impl Into<PathBuf>) -> Self {
        self.output_dir = output_dir.into();
        self.reports_dir = reports_dir.into();
        self
    }

    /// Rooted at the process working directory
    pub fn current_dir() -> std::io::Result<Self> {
        Ok(Self::new(std::env::current_dir()?))
    }

    pub fn resolve(&self, path: impl AsRef<Path>) -> PathBuf {
        self.root.join(path)
    }

    pub fn output_dir(&self) -> PathBuf {
        self.root.join(&self.output_dir)
    }

    pub fn reports_dir(&self) -> PathBuf {
        self.root.join(&self.reports_dir)
    }

    /// Read a text file, `None` when missing, a directory, unreadable or blank
    pub fn read_source(&self, path: impl AsRef<Path>) -> Option<String> {
        let path = path.as_ref();
        let full = self.resolve(path);

        let meta = match fs::metadata(&full) {
            Ok(meta) => meta,
            Err(_) => {
                error!("File not found: {}", path.display());
                return None;
            }
        };
        if !meta.is_file() {
            error!("Not a file: {}", path.display());
            return None;
        }

        // Invalid UTF-8 (Latin-1 sources, stray bytes) becomes U+FFFD
        match fs::read(&full).map(|bytes| String::from_utf8_lossy(&bytes).into_owned()) {
            Ok(content) if content.trim().is_empty() => {
                error!("File is empty: {}", path.display());
                None
            }
            Ok(content) => Some(content),
            Err(e) => {
                error!("Failed to read file {}: {}", path.display(), e);
                None
            }
        }
    }

    /// Write code under the output directory; a bare name gets `.js`
    pub fn save_code(&self, code: &str, filename: &str) -> bool {
        let target = self.output_dir().join(ensure_extension(filename));
        let result = target
            .parent()
            .map(fs::create_dir_all)
            .transpose()
            .and_then(|_| fs::write(&target, code));

        match result {
            Ok(()) => {
                info!("Code saved to {}", target.display());
                true
            }
            Err(e) => {
                error!("Failed to save file {}: {}", target.display(), e);
                false
            }
        }
    }

    /// Write the bundled JavaScript example and return its file name
    pub fn create_example_file(&self) -> Option<String> {
        const NAME: &str = "example.js";
        if self.save_code(EXAMPLE_CODE, NAME) {
            Some(NAME.to_string())
        } else {
            error!("Failed to create example file");
            None
        }
    }
}

/// Read a path for analysis; notebooks are reduced to their code cells
pub fn load_source(store: &FileStore, path: impl AsRef<Path>) -> Option<SourceInput> {
    let path = path.as_ref();
    let text = store.read_source(path)?;
    let file_type = file_type(path);

    if file_type != "ipynb" {
        return Some(SourceInput {
            text,
            language: file_type.to_string(),
        });
    }

    match notebook::parse_notebook(&text) {
        Ok(nb) => {
            let code = nb.code();
            if code.trim().is_empty() {
                error!("Notebook has no code cells: {}", path.display());
                return None;
            }
            Some(SourceInput {
                text: code,
                language: nb.language().to_string(),
            })
        }
        Err(e) => {
            error!("{}: {}", path.display(), e);
            None
        }
    }
}

/// Language name for a file extension, `text` when unknown
pub fn file_type(path: impl AsRef<Path>) -> &'static str {
    let ext = path
        .as_ref()
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_lowercase())
        .unwrap_or_default();

    match ext.as_str() {
        "py" => "python",
        "js" | "jsx" => "javascript",
        "ts" | "tsx" => "typescript",
        "java" => "java",
        "cpp" => "cpp",
        "cs" => "csharp",
        "rb" => "ruby",
        "go" => "go",
        "rs" => "rust",
        "php" => "php",
        "swift" => "swift",
        "kt" => "kotlin",
        "r" => "r",
        "scala" => "scala",
        "ipynb" => "ipynb",
        "html" => "html",
        "css" => "css",
        "sql" => "sql",
        "sh" => "shell",
        _ => "text",
    }
}

fn ensure_extension(filename: &str) -> PathBuf {
    let path = PathBuf::from(filename);
    if path.extension().is_none() {
        path.with_extension(DEFAULT_EXTENSION)
    } else {
        path
    }
}
