//! Line tokenizer
//!
//! Splits one line of source into runs of plain text, runs of delimiter
//! characters, and quoted literals. A quoted literal runs from an opening
//! `'` or `"` to the next matching quote (inclusive) and is never split;
//! an unterminated quote takes the rest of the line.

use super::classifier;
use super::tokens::{Token, TokenKind};

/// Characters that end a text run
pub const DELIMITERS: &str = " {}(),.[];";

/// Per-character classification driving token boundaries
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum CharClass {
    Quote,
    DoubleQuote,
    Delimiter,
    Other,
}

impl CharClass {
    fn of(ch: char) -> Self {
        match ch {
            '\'' => CharClass::Quote,
            '"' => CharClass::DoubleQuote,
            c if DELIMITERS.contains(c) => CharClass::Delimiter,
            _ => CharClass::Other,
        }
    }
}

/// Kind of span currently being scanned
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum SpanState {
    None,
    Text,
    Delimiter,
    SingleQuoted,
    DoubleQuoted,
}

impl SpanState {
    /// Span started by a character of this class (outside quotes)
    fn opened_by(class: CharClass) -> Self {
        match class {
            CharClass::Quote => SpanState::SingleQuoted,
            CharClass::DoubleQuote => SpanState::DoubleQuoted,
            CharClass::Delimiter => SpanState::Delimiter,
            CharClass::Other => SpanState::Text,
        }
    }

    /// Whether a character of this class closes the span
    fn closed_by(&self, class: CharClass) -> bool {
        matches!(
            (self, class),
            (SpanState::SingleQuoted, CharClass::Quote)
                | (SpanState::DoubleQuoted, CharClass::DoubleQuote)
        )
    }

    fn is_quoted(&self) -> bool {
        matches!(self, SpanState::SingleQuoted | SpanState::DoubleQuoted)
    }

    fn token_kind(&self) -> TokenKind {
        match self {
            SpanState::Delimiter => TokenKind::Delimiter,
            SpanState::SingleQuoted | SpanState::DoubleQuoted => TokenKind::QuotedLiteral,
            SpanState::None | SpanState::Text => TokenKind::PlainText,
        }
    }
}

/// How consecutive delimiter characters are grouped
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DelimiterMerge {
    /// Any run of delimiter characters is one token (`") {"` stays whole)
    #[default]
    Class,
    /// A run continues only while the same character repeats (`"  "` stays
    /// whole, `")"` and `" "` split)
    Char,
}

impl DelimiterMerge {
    /// Parse from a config value (`"class"` or `"char"`)
    pub fn from_name(name: &str) -> Option<Self> {
        match name.trim().to_lowercase().as_str() {
            "class" => Some(DelimiterMerge::Class),
            "char" => Some(DelimiterMerge::Char),
            _ => None,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            DelimiterMerge::Class => "class",
            DelimiterMerge::Char => "char",
        }
    }
}

/// Line tokenizer
#[derive(Debug, Clone, Copy, Default)]
pub struct Tokenizer {
    merge: DelimiterMerge,
}

impl Tokenizer {
    /// Create a tokenizer with the given delimiter grouping
    pub fn new(merge: DelimiterMerge) -> Self {
        Self { merge }
    }

    /// Split a line into unclassified tokens
    ///
    /// A single trailing `\n` (or `\r\n`) is ignored. Every other byte of
    /// the line ends up in exactly one token, in order.
    pub fn tokenize(&self, line: &str) -> Vec<Token> {
        let line = trim_newline(line);
        let mut tokens = Vec::new();
        let mut state = SpanState::None;
        let mut start = 0;
        let mut prev: Option<char> = None;

        for (pos, ch) in line.char_indices() {
            let class = CharClass::of(ch);

            if state.is_quoted() {
                if state.closed_by(class) {
                    let end = pos + ch.len_utf8();
                    tokens.push(Token::new(&line[start..end], TokenKind::QuotedLiteral));
                    start = end;
                    state = SpanState::None;
                }
                prev = Some(ch);
                continue;
            }

            let next = SpanState::opened_by(class);
            if self.breaks_run(state, next, prev, ch) {
                if start < pos {
                    tokens.push(Token::new(&line[start..pos], state.token_kind()));
                }
                start = pos;
            }
            state = next;
            prev = Some(ch);
        }

        // Remainder, including an unterminated quote
        if start < line.len() {
            tokens.push(Token::new(&line[start..], state.token_kind()));
        }

        tokens
    }

    /// Split and classify a line
    pub fn highlight_line(&self, line: &str) -> Vec<Token> {
        let mut tokens = self.tokenize(line);
        for token in &mut tokens {
            classifier::colorize(token);
        }
        tokens
    }

    /// Whether `ch` (opening `next`) starts a new token after `state`
    fn breaks_run(&self, state: SpanState, next: SpanState, prev: Option<char>, ch: char) -> bool {
        if state != next || next.is_quoted() {
            return true;
        }
        match (next, self.merge) {
            (SpanState::Delimiter, DelimiterMerge::Char) => prev != Some(ch),
            _ => false,
        }
    }
}

fn trim_newline(line: &str) -> &str {
    match line.strip_suffix('\n') {
        Some(line) => line.strip_suffix('\r').unwrap_or(line),
        None => line,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn tokenize(line: &str) -> Vec<Token> {
        Tokenizer::default().tokenize(line)
    }

    fn texts(tokens: &[Token]) -> Vec<&str> {
        tokens.iter().map(|t| t.text.as_str()).collect()
    }

    fn kinds(tokens: &[Token]) -> Vec<TokenKind> {
        tokens.iter().map(|t| t.kind).collect()
    }

    #[test]
    fn test_empty_line() {
        assert!(tokenize("").is_empty());
        assert!(tokenize("\n").is_empty());
        assert!(tokenize("\r\n").is_empty());
    }

    #[test]
    fn test_trailing_newline_ignored() {
        assert_eq!(texts(&tokenize("a b\n")), vec!["a", " ", "b"]);
    }

    #[test]
    fn test_delimiter_run_merges() {
        let tokens = tokenize("a  b");
        assert_eq!(texts(&tokens), vec!["a", "  ", "b"]);
        assert_eq!(
            kinds(&tokens),
            vec![TokenKind::PlainText, TokenKind::Delimiter, TokenKind::PlainText]
        );
    }

    #[test]
    fn test_mixed_delimiters_merge_by_class() {
        assert_eq!(texts(&tokenize("f();")), vec!["f", "();"]);
        assert_eq!(texts(&tokenize("x;;")), vec!["x", ";;"]);
    }

    #[test]
    fn test_char_merge_splits_distinct_delimiters() {
        let tokenizer = Tokenizer::new(DelimiterMerge::Char);
        assert_eq!(texts(&tokenizer.tokenize("f();")), vec!["f", "(", ")", ";"]);
        assert_eq!(texts(&tokenizer.tokenize("a  b")), vec!["a", "  ", "b"]);
        assert_eq!(texts(&tokenizer.tokenize("x;;")), vec!["x", ";;"]);
    }

    #[test]
    fn test_operators_are_text() {
        // `=`, `+`, `*` are not delimiters
        assert_eq!(texts(&tokenize("a=b+c")), vec!["a=b+c"]);
    }

    #[test]
    fn test_quoted_literal_is_atomic() {
        let tokens = tokenize(r#"x = "a b" + 1"#);
        assert_eq!(texts(&tokens), vec!["x", " ", "=", " ", r#""a b""#, " ", "+", " ", "1"]);
        assert_eq!(tokens[4].kind, TokenKind::QuotedLiteral);
    }

    #[test]
    fn test_quote_contains_other_quote_and_delimiters() {
        let tokens = tokenize(r#"s = "it's (fine)";"#);
        assert_eq!(texts(&tokens), vec!["s", " ", "=", " ", r#""it's (fine)""#, ";"]);

        let tokens = tokenize(r#"c = '"';"#);
        assert_eq!(texts(&tokens), vec!["c", " ", "=", " ", r#"'"'"#, ";"]);
    }

    #[test]
    fn test_quote_splits_adjacent_text() {
        // The opening quote starts a token and the closing quote ends one
        assert_eq!(texts(&tokenize(r#"abc"def"ghi"#)), vec!["abc", r#""def""#, "ghi"]);
    }

    #[test]
    fn test_adjacent_quotes() {
        assert_eq!(texts(&tokenize("'a''b'")), vec!["'a'", "'b'"]);
        assert_eq!(texts(&tokenize(r#""""#)), vec![r#""""#]);
    }

    #[test]
    fn test_unterminated_quote_takes_rest_of_line() {
        let tokens = tokenize(r#"x = "abc"#);
        assert_eq!(texts(&tokens), vec!["x", " ", "=", " ", r#""abc"#]);
        assert_eq!(tokens.last().map(|t| t.kind), Some(TokenKind::QuotedLiteral));

        let tokens = tokenize("c = 'x; y");
        assert_eq!(tokens.last().map(|t| t.text.as_str()), Some("'x; y"));
    }

    #[test]
    fn test_leading_delimiter_kind() {
        let tokens = tokenize("    return x;");
        assert_eq!(texts(&tokens), vec!["    ", "return", " ", "x", ";"]);
        assert_eq!(tokens[0].kind, TokenKind::Delimiter);
    }

    #[test]
    fn test_function_signature() {
        let tokens = tokenize("int main(void) { return 0; }");
        assert_eq!(
            texts(&tokens),
            vec!["int", " ", "main", "(", "void", ") { ", "return", " ", "0", "; }"]
        );

        let tokens = Tokenizer::new(DelimiterMerge::Char).tokenize("int main(void) { return 0; }");
        assert_eq!(
            texts(&tokens),
            vec!["int", " ", "main", "(", "void", ")", " ", "{", " ", "return", " ", "0", ";", " ", "}"]
        );
    }

    #[test]
    fn test_non_ascii_text() {
        assert_eq!(texts(&tokenize("é = \"ü\";")), vec!["é", " ", "=", " ", "\"ü\"", ";"]);
    }

    #[test]
    fn test_merge_from_name() {
        assert_eq!(DelimiterMerge::from_name("class"), Some(DelimiterMerge::Class));
        assert_eq!(DelimiterMerge::from_name(" Char "), Some(DelimiterMerge::Char));
        assert_eq!(DelimiterMerge::from_name("word"), None);
        assert_eq!(DelimiterMerge::Char.name(), "char");
    }

    fn line_strategy() -> impl Strategy<Value = String> {
        // Mostly syntax-ish characters so quotes and delimiters show up often
        prop::collection::vec(
            prop_oneof![
                Just('\''),
                Just('"'),
                Just(' '),
                prop::sample::select(vec!['(', ')', ';', '{', '.']),
                prop::char::range('a', 'z'),
                Just('='),
                Just('é'),
            ],
            0..64,
        )
        .prop_map(|chars: Vec<char>| chars.into_iter().collect::<String>())
    }

    proptest! {
        #[test]
        fn prop_lossless_partition(line in line_strategy()) {
            for merge in [DelimiterMerge::Class, DelimiterMerge::Char] {
                let tokens = Tokenizer::new(merge).tokenize(&line);
                let joined: String = tokens.iter().map(|t| t.text.as_str()).collect();
                prop_assert_eq!(joined, line.clone());
            }
        }

        #[test]
        fn prop_no_empty_tokens(line in line_strategy()) {
            for merge in [DelimiterMerge::Class, DelimiterMerge::Char] {
                let tokens = Tokenizer::new(merge).tokenize(&line);
                prop_assert!(tokens.iter().all(|t| !t.text.is_empty()));
            }
        }

        #[test]
        fn prop_delimiter_tokens_start_with_delimiter(line in line_strategy()) {
            for token in tokenize(&line) {
                let first = token.text.chars().next().unwrap();
                prop_assert_eq!(
                    token.kind == TokenKind::Delimiter,
                    DELIMITERS.contains(first)
                );
                prop_assert_eq!(
                    token.kind == TokenKind::QuotedLiteral,
                    first == '"' || first == '\''
                );
            }
        }

        #[test]
        fn prop_balanced_quote_is_one_token(
            prefix in "[a-z ;()]{0,8}",
            inner in "[a-z ;(){}.,]{0,12}",
        ) {
            let quoted = format!("\"{}\"", inner);
            let line = format!("{}{} x", prefix, quoted);
            let tokens = tokenize(&line);
            prop_assert!(tokens.iter().any(|t| t.text == quoted));
        }
    }
}
