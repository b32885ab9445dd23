//! Token types for syntax highlighting
//!
//! This module defines the tokens produced by the tokenizer, the colour
//! categories the classifier assigns to them, and their default styles.

use super::style::{Color, Style};

/// Coarse token kind, decided by the tokenizer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenKind {
    /// A run of non-delimiter, non-quote characters
    PlainText,
    /// A run of delimiter characters (` {}(),.[];`)
    Delimiter,
    /// A single- or double-quoted span, quotes included
    QuotedLiteral,
}

/// Display colour category, decided by the classifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ColorCategory {
    /// Primitive type names (int, size_t, ...)
    Type,
    /// Control and storage keywords (return, static, ...)
    Keyword,
    /// Quoted literals ("..." or '...')
    StringLiteral,
    /// Delimiter runs
    Delimiter,
    /// Everything else
    PlainText,
}

impl ColorCategory {
    /// All categories, in classification precedence order
    pub const ALL: [ColorCategory; 5] = [
        ColorCategory::StringLiteral,
        ColorCategory::Delimiter,
        ColorCategory::Type,
        ColorCategory::Keyword,
        ColorCategory::PlainText,
    ];

    /// Get the default style for this category
    pub fn default_style(&self) -> Style {
        match self {
            ColorCategory::Type => Style::fg(Color::Rgb(45, 188, 215)),
            ColorCategory::Keyword => Style::fg(Color::Rgb(130, 95, 195)),
            ColorCategory::StringLiteral => Style::fg(Color::Rgb(162, 220, 80)),
            ColorCategory::Delimiter => Style::fg(Color::Rgb(170, 185, 255)),
            ColorCategory::PlainText => Style::fg(Color::Rgb(170, 185, 255)),
        }
    }

    /// Get a human-readable name for this category
    pub fn name(&self) -> &'static str {
        match self {
            ColorCategory::Type => "Type",
            ColorCategory::Keyword => "Keyword",
            ColorCategory::StringLiteral => "StringLiteral",
            ColorCategory::Delimiter => "Delimiter",
            ColorCategory::PlainText => "PlainText",
        }
    }

    /// Parse a category from its name (for config loading)
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "Type" => Some(ColorCategory::Type),
            "Keyword" => Some(ColorCategory::Keyword),
            "StringLiteral" => Some(ColorCategory::StringLiteral),
            "Delimiter" => Some(ColorCategory::Delimiter),
            "PlainText" => Some(ColorCategory::PlainText),
            _ => None,
        }
    }
}

/// A token of a single source line
///
/// `text` is an owned copy of a contiguous slice of the line. The tokens
/// of a line, concatenated in order, reproduce the line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub text: String,
    pub kind: TokenKind,
    pub color: ColorCategory,
}

impl Token {
    /// Create an unclassified token
    pub fn new(text: impl Into<String>, kind: TokenKind) -> Self {
        Self {
            text: text.into(),
            kind,
            color: ColorCategory::PlainText,
        }
    }
}

/// Mapping from colour category to style
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Palette {
    styles: [Style; 5],
}

impl Palette {
    /// Style used to draw a category
    pub fn style(&self, category: ColorCategory) -> Style {
        self.styles[Self::index(category)]
    }

    /// Override the style of a category
    pub fn set(&mut self, category: ColorCategory, style: Style) {
        self.styles[Self::index(category)] = style;
    }

    fn index(category: ColorCategory) -> usize {
        match category {
            ColorCategory::Type => 0,
            ColorCategory::Keyword => 1,
            ColorCategory::StringLiteral => 2,
            ColorCategory::Delimiter => 3,
            ColorCategory::PlainText => 4,
        }
    }
}

impl Default for Palette {
    fn default() -> Self {
        let mut palette = Self {
            styles: [Style::default(); 5],
        };
        for category in ColorCategory::ALL {
            palette.set(category, category.default_style());
        }
        palette
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_styles_not_empty() {
        for category in ColorCategory::ALL {
            assert!(!category.default_style().is_default(), "{}", category.name());
        }
        // Delimiters and plain text share a colour
        assert_eq!(
            ColorCategory::Delimiter.default_style(),
            ColorCategory::PlainText.default_style()
        );
    }

    #[test]
    fn test_from_name_roundtrip() {
        for category in ColorCategory::ALL {
            assert_eq!(ColorCategory::from_name(category.name()), Some(category));
        }
    }

    #[test]
    fn test_from_name_invalid() {
        assert_eq!(ColorCategory::from_name("String"), None);
        assert_eq!(ColorCategory::from_name("keyword"), None);
        assert_eq!(ColorCategory::from_name(""), None);
    }

    #[test]
    fn test_palette_override() {
        let mut palette = Palette::default();
        assert_eq!(
            palette.style(ColorCategory::Keyword),
            ColorCategory::Keyword.default_style()
        );

        palette.set(ColorCategory::Keyword, Style::fg(Color::Red));
        assert_eq!(palette.style(ColorCategory::Keyword), Style::fg(Color::Red));
        assert_eq!(
            palette.style(ColorCategory::Type),
            ColorCategory::Type.default_style()
        );
    }

    #[test]
    fn test_new_token_is_plain() {
        let token = Token::new("main", TokenKind::PlainText);
        assert_eq!(token.color, ColorCategory::PlainText);
        assert_eq!(token.kind, TokenKind::PlainText);
        assert_eq!(token.text, "main");
    }
}
