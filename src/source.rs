//! Source file loading and per-line highlighting

use std::borrow::Cow;
use std::fs;
use std::path::{Path, PathBuf};

use tracing::{info, warn};

use crate::config::{Config, OverflowPolicy};
use crate::error::{Result, ViewerError};
use crate::syntax::{Token, Tokenizer};

/// A single line of the source with its classified tokens
#[derive(Debug, Clone)]
pub struct HighlightedLine {
    /// The text content (without trailing newline)
    text: String,
    /// Classified tokens; concatenated they equal `text`
    tokens: Vec<Token>,
}

impl HighlightedLine {
    /// Tokenize and classify a line
    pub fn new(text: String, tokenizer: &Tokenizer) -> Self {
        let tokens = tokenizer.highlight_line(&text);
        Self { text, tokens }
    }

    /// Get the text content
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Get the classified tokens
    pub fn tokens(&self) -> &[Token] {
        &self.tokens
    }
}

/// A loaded, highlighted source file
#[derive(Debug)]
pub struct SourceFile {
    /// Display name (file name component)
    name: String,
    /// Path the file was read from
    path: PathBuf,
    /// Lines of text, in file order
    lines: Vec<HighlightedLine>,
}

impl SourceFile {
    /// Read and highlight a file, enforcing the configured limits
    pub fn load(path: &Path, config: &Config) -> Result<Self> {
        let bytes = fs::read(path).map_err(|source| ViewerError::InputUnavailable {
            path: path.to_path_buf(),
            source,
        })?;
        let content = String::from_utf8_lossy(&bytes);
        if let Cow::Owned(_) = content {
            warn!(path = %path.display(), "file is not valid UTF-8, invalid bytes replaced");
        }
        let name = path
            .file_name()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_else(|| "unnamed".to_string());

        let source = Self::from_text(name, path.to_path_buf(), &content, config)?;
        info!(
            path = %path.display(),
            lines = source.line_count(),
            merge = config.delimiter_merge.name(),
            "loaded source"
        );
        Ok(source)
    }

    /// Highlight already-read text
    pub fn from_text(name: String, path: PathBuf, content: &str, config: &Config) -> Result<Self> {
        let tokenizer = Tokenizer::new(config.delimiter_merge);
        let mut raw: Vec<&str> = content.lines().collect();

        if config.max_lines > 0 && raw.len() > config.max_lines {
            match config.overflow {
                OverflowPolicy::Reject => {
                    return Err(ViewerError::TooManyLines {
                        count: raw.len(),
                        max: config.max_lines,
                    });
                }
                OverflowPolicy::Truncate => {
                    warn!(
                        count = raw.len(),
                        max = config.max_lines,
                        "file has too many lines, showing the first {}",
                        config.max_lines
                    );
                    raw.truncate(config.max_lines);
                }
            }
        }

        let mut lines = Vec::with_capacity(raw.len());
        for (idx, text) in raw.into_iter().enumerate() {
            let text = limit_line(text, idx + 1, config)?;
            lines.push(HighlightedLine::new(text, &tokenizer));
        }

        Ok(Self { name, path, lines })
    }

    /// Get display name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Get the source path
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Get number of lines
    pub fn line_count(&self) -> usize {
        self.lines.len()
    }

    /// Get a line by index
    pub fn line(&self, idx: usize) -> Option<&HighlightedLine> {
        self.lines.get(idx)
    }
}

/// Apply the line length limit to one line (`line_no` is 1-based)
fn limit_line(text: &str, line_no: usize, config: &Config) -> Result<String> {
    let max = config.max_line_length;
    if max == 0 {
        return Ok(text.to_string());
    }

    let length = text.chars().count();
    if length <= max {
        return Ok(text.to_string());
    }

    match config.overflow {
        OverflowPolicy::Reject => Err(ViewerError::LineTooLong {
            line: line_no,
            length,
            max,
        }),
        OverflowPolicy::Truncate => {
            warn!(line = line_no, length, max, "line too long, truncating");
            Ok(text.chars().take(max).collect())
        }
    }
}
