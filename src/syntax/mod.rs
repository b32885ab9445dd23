//! Syntax and styling module
//!
//! This module provides the highlighting pipeline:
//! - Line tokenizer (text runs, delimiter runs, quoted literals)
//! - Token classifier (type names, keywords, strings)
//! - Styles and the category palette

mod classifier;
mod style;
mod tokenizer;
mod tokens;

pub use style::{Color, Style, BACKGROUND, LINE_NUMBER};
pub use tokenizer::{DelimiterMerge, Tokenizer};
pub use tokens::{ColorCategory, Palette, Token};
