//! Configuration file support
//!
//! Loads settings from ~/.montage.toml (or %USERPROFILE%\.montage.toml on Windows)
//!
//! Example:
//! ```text
//! # montage configuration
//! line-numbers = true
//! max-line-length = 200
//! max-lines = 1024
//! overflow = "truncate"      # or "reject"
//! delimiter-merge = "class"  # or "char"
//! scroll-duration-ms = 150
//! scroll-step = 6
//!
//! [colors]
//! Keyword = "magenta"
//! StringLiteral = "#a2dc50"
//! ```

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use toml::{Table, Value};
use tracing::debug;

use crate::error::{Result, ViewerError};
use crate::syntax::{Color, ColorCategory, DelimiterMerge, Palette, Style};

/// What to do when the source exceeds a configured limit
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OverflowPolicy {
    /// Cut the line (or the file) at the limit and log a warning
    #[default]
    Truncate,
    /// Refuse to load the file
    Reject,
}

impl OverflowPolicy {
    fn from_name(name: &str) -> Option<Self> {
        match name.trim().to_lowercase().as_str() {
            "truncate" => Some(OverflowPolicy::Truncate),
            "reject" => Some(OverflowPolicy::Reject),
            _ => None,
        }
    }
}

/// Configuration settings
#[derive(Debug, Clone)]
pub struct Config {
    /// Whether to show line numbers
    pub show_line_numbers: bool,
    /// Longest line in characters (0 = unlimited)
    pub max_line_length: usize,
    /// Most lines loaded from a file (0 = unlimited)
    pub max_lines: usize,
    /// Handling of lines/files over the limits
    pub overflow: OverflowPolicy,
    /// Grouping of consecutive delimiter characters
    pub delimiter_merge: DelimiterMerge,
    /// Duration of one smooth-scroll animation in milliseconds
    pub scroll_duration_ms: u64,
    /// Rows moved per mouse wheel notch
    pub scroll_step: usize,
    /// Token colours
    pub palette: Palette,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            show_line_numbers: true,
            max_line_length: 200,
            max_lines: 1024,
            overflow: OverflowPolicy::Truncate,
            delimiter_merge: DelimiterMerge::Class,
            scroll_duration_ms: 150,
            scroll_step: 6,
            palette: Palette::default(),
        }
    }
}

impl Config {
    /// Get the config file path
    pub fn config_path() -> Option<PathBuf> {
        #[cfg(windows)]
        {
            std::env::var("USERPROFILE")
                .ok()
                .map(|home| PathBuf::from(home).join(".montage.toml"))
        }

        #[cfg(not(windows))]
        {
            std::env::var("HOME")
                .ok()
                .map(|home| PathBuf::from(home).join(".montage.toml"))
        }
    }

    /// Load configuration from the default location
    ///
    /// A missing file yields the defaults; a malformed one is an error.
    pub fn load() -> Result<Self> {
        match Self::config_path() {
            Some(path) => Self::load_from(&path),
            None => Ok(Config::default()),
        }
    }

    /// Load configuration from a specific file
    pub fn load_from(path: &Path) -> Result<Self> {
        let mut config = Config::default();

        let contents = match fs::read_to_string(path) {
            Ok(contents) => contents,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                debug!(path = %path.display(), "no config file, using defaults");
                return Ok(config);
            }
            Err(e) => return Err(e.into()),
        };

        let settings = Self::parse(&contents)?;
        config.apply(&settings)?;
        debug!(path = %path.display(), "loaded config");
        Ok(config)
    }

    /// Parse config file contents into a TOML table
    fn parse(contents: &str) -> Result<Table> {
        contents
            .parse::<Table>()
            .map_err(|e| ViewerError::Config(e.to_string()))
    }

    /// Apply settings from a parsed config
    fn apply(&mut self, settings: &Table) -> Result<()> {
        if let Some(value) = settings.get("line-numbers") {
            self.show_line_numbers = value_bool("line-numbers", value)?;
        }

        if let Some(value) = settings.get("max-line-length") {
            self.max_line_length = value_int("max-line-length", value)? as usize;
        }

        if let Some(value) = settings.get("max-lines") {
            self.max_lines = value_int("max-lines", value)? as usize;
        }

        if let Some(value) = settings.get("overflow") {
            let name = value_str("overflow", value)?;
            self.overflow = OverflowPolicy::from_name(name)
                .ok_or_else(|| invalid("overflow", value))?;
        }

        if let Some(value) = settings.get("delimiter-merge") {
            let name = value_str("delimiter-merge", value)?;
            self.delimiter_merge = DelimiterMerge::from_name(name)
                .ok_or_else(|| invalid("delimiter-merge", value))?;
        }

        if let Some(value) = settings.get("scroll-duration-ms") {
            let n = value_int("scroll-duration-ms", value)?;
            self.scroll_duration_ms = n.min(2000); // At most 2 seconds
        }

        if let Some(value) = settings.get("scroll-step") {
            let n = value_int("scroll-step", value)?;
            self.scroll_step = n.clamp(1, 100) as usize;
        }

        if let Some(value) = settings.get("colors") {
            let colors = value
                .as_table()
                .ok_or_else(|| invalid("colors", value))?;
            for (name, value) in colors {
                let category = ColorCategory::from_name(name).ok_or_else(|| {
                    let known: Vec<_> = ColorCategory::ALL.iter().map(|c| c.name()).collect();
                    ViewerError::Config(format!(
                        "unknown color category '{}' (expected one of {})",
                        name,
                        known.join(", ")
                    ))
                })?;
                let color = value
                    .as_str()
                    .and_then(Color::from_name)
                    .ok_or_else(|| invalid(name, value))?;
                self.palette.set(category, Style::fg(color));
            }
        }

        Ok(())
    }
}

fn invalid(key: &str, value: &Value) -> ViewerError {
    ViewerError::Config(format!("invalid value for '{}': {}", key, value))
}

fn value_bool(key: &str, value: &Value) -> Result<bool> {
    match value {
        Value::Boolean(b) => Ok(*b),
        Value::String(s) => Ok(parse_bool(s)),
        _ => Err(invalid(key, value)),
    }
}

/// Non-negative integer setting
fn value_int(key: &str, value: &Value) -> Result<u64> {
    value
        .as_integer()
        .and_then(|n| u64::try_from(n).ok())
        .ok_or_else(|| invalid(key, value))
}

fn value_str<'a>(key: &str, value: &'a Value) -> Result<&'a str> {
    value.as_str().ok_or_else(|| invalid(key, value))
}

/// Parse a boolean value from string
fn parse_bool(s: &str) -> bool {
    let s = s.to_lowercase();
    matches!(s.as_str(), "true" | "yes" | "on" | "1")
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_parse_config() {
        let contents = r#"
# Comment
line-numbers = false
max-line-length = 120
overflow = "reject"
delimiter-merge = "char"
        "#;

        let settings = Config::parse(contents).unwrap();
        assert_eq!(settings.get("line-numbers"), Some(&Value::Boolean(false)));
        assert_eq!(settings.get("max-line-length"), Some(&Value::Integer(120)));
        assert_eq!(settings.get("overflow").and_then(|v| v.as_str()), Some("reject"));
    }

    #[test]
    fn test_parse_malformed() {
        assert!(matches!(
            Config::parse("line-numbers = "),
            Err(ViewerError::Config(_))
        ));
    }

    #[test]
    fn test_apply_settings() {
        let mut config = Config::default();
        let settings = Config::parse(
            r##"
line-numbers = "no"
max-line-length = 80
max-lines = 0
overflow = "reject"
delimiter-merge = "char"
scroll-duration-ms = 5000
scroll-step = 0

[colors]
Keyword = "red"
Type = "#102030"
"##,
        )
        .unwrap();

        config.apply(&settings).unwrap();

        assert!(!config.show_line_numbers);
        assert_eq!(config.max_line_length, 80);
        assert_eq!(config.max_lines, 0);
        assert_eq!(config.overflow, OverflowPolicy::Reject);
        assert_eq!(config.delimiter_merge, DelimiterMerge::Char);
        assert_eq!(config.scroll_duration_ms, 2000);
        assert_eq!(config.scroll_step, 1);
        assert_eq!(config.palette.style(ColorCategory::Keyword), Style::fg(Color::Red));
        assert_eq!(
            config.palette.style(ColorCategory::Type),
            Style::fg(Color::Rgb(0x10, 0x20, 0x30))
        );
        assert_eq!(
            config.palette.style(ColorCategory::PlainText),
            ColorCategory::PlainText.default_style()
        );
    }

    #[test]
    fn test_apply_rejects_bad_values() {
        let cases = [
            "overflow = \"wrap\"",
            "delimiter-merge = 3",
            "max-lines = -1",
            "line-numbers = 1.5",
            "[colors]\nComment = \"red\"",
            "[colors]\nKeyword = \"mauve\"",
            "colors = \"red\"",
        ];
        for case in cases {
            let mut config = Config::default();
            let settings = Config::parse(case).unwrap();
            assert!(config.apply(&settings).is_err(), "accepted: {}", case);
        }
    }

    #[test]
    fn test_load_missing_file_uses_defaults() {
        let dir = TempDir::new().expect("Failed to create temp directory");
        let config = Config::load_from(&dir.path().join("absent.toml")).unwrap();
        assert!(config.show_line_numbers);
        assert_eq!(config.max_line_length, 200);
        assert_eq!(config.max_lines, 1024);
    }

    #[test]
    fn test_load_from_file() {
        let dir = TempDir::new().expect("Failed to create temp directory");
        let path = dir.path().join("montage.toml");
        fs::write(&path, "scroll-step = 12\n").expect("Failed to write config");

        let config = Config::load_from(&path).unwrap();
        assert_eq!(config.scroll_step, 12);
    }

    #[test]
    fn test_parse_bool() {
        assert!(parse_bool("true"));
        assert!(parse_bool("True"));
        assert!(parse_bool("yes"));
        assert!(parse_bool("on"));
        assert!(parse_bool("1"));

        assert!(!parse_bool("false"));
        assert!(!parse_bool("no"));
        assert!(!parse_bool("off"));
        assert!(!parse_bool("anything"));
    }
}
