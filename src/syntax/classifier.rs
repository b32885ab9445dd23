//! Token classifier
//!
//! Assigns a colour category to a token. Rules are checked in order and
//! the first match wins: quoted, delimiter, type name, keyword, plain.

use std::collections::HashSet;

use once_cell::sync::Lazy;

use super::tokens::{ColorCategory, Token, TokenKind};

/// Primitive C type names
///
/// `void` is listed here so it is drawn as a type rather than a keyword.
pub static TYPES: Lazy<HashSet<&'static str>> = Lazy::new(|| {
    [
        "double", "int", "long", "char", "float", "short", "unsigned", "signed", "void",
        "int8_t", "uint8_t", "int16_t", "uint16_t", "int32_t", "uint32_t", "int64_t",
        "uint64_t", "size_t", "ssize_t", "off_t",
    ]
    .into_iter()
    .collect()
});

/// C control and storage keywords
pub static KEYWORDS: Lazy<HashSet<&'static str>> = Lazy::new(|| {
    [
        "NULL", "auto", "struct", "break", "else", "switch", "case", "enum", "register",
        "typedef", "extern", "return", "union", "const", "continue", "for", "void", "default",
        "goto", "sizeof", "volatile", "do", "if", "static", "inline", "while",
    ]
    .into_iter()
    .collect()
});

/// Pick the colour category for a token
pub fn classify(token: &Token) -> ColorCategory {
    if token.text.starts_with(|c: char| c == '"' || c == '\'') {
        return ColorCategory::StringLiteral;
    }
    if token.kind == TokenKind::Delimiter {
        return ColorCategory::Delimiter;
    }
    let text = token.text.as_str();
    if TYPES.contains(text) {
        ColorCategory::Type
    } else if KEYWORDS.contains(text) {
        ColorCategory::Keyword
    } else {
        ColorCategory::PlainText
    }
}

/// Classify a token in place
pub fn colorize(token: &mut Token) {
    token.color = classify(token);
}
