//! A lossless Python tokenizer.
//!
//! This module turns Python source into a flat token stream that follows the
//! conventions of CPython's pure-Python `tokenize` module: 1-based rows,
//! 0-based byte columns, explicit `NEWLINE`/`NL`/`INDENT`/`DEDENT` tokens and
//! an `ENDMARKER`. Every token also carries the physical line(s) it came from,
//! which is what lets [`untokenize`] rebuild the source exactly.
//!
//! ## Round trip
//!
//! ```rust
//! use pydocfmt::tokenize::{tokenize, untokenize, TokenKind};
//!
//! let source = "def f(a,  b):\n    return a \\\n        + b  # sum\n";
//! let tokens = tokenize(source).unwrap();
//! assert_eq!(tokens[0].kind, TokenKind::Name);
//! assert_eq!(untokenize(&tokens), source);
//! ```
//!
//! Tokens borrow from the source; a rewritten token owns its new text.

use crate::{Error, Result};
use std::borrow::Cow;
use std::fmt;

/// Columns per tab stop when measuring indentation.
const TAB_SIZE: usize = 8;

const OPERATORS_3: &[&str] = &["**=", "//=", ">>=", "<<=", "..."];
const OPERATORS_2: &[&str] = &[
    "**", "//", ">>", "<<", "<=", ">=", "==", "!=", "->", "+=", "-=", "*=", "/=", "%=", "&=",
    "|=", "^=", "@=", ":=",
];
const OPERATORS_1: &str = "+-*/%@&|^~<>()[]{},:;.=";

/// String prefixes that may precede a quote.
const STRING_PREFIXES: &[&str] = &[
    "br", "bR", "Br", "BR", "rb", "rB", "Rb", "RB", "fr", "fR", "Fr", "FR", "rf", "rF", "Rf",
    "RF", "r", "R", "u", "U", "b", "B", "f", "F",
];

/// Lexical category of a token.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum TokenKind {
    Encoding,
    Name,
    Number,
    String,
    Op,
    Comment,
    /// End of a logical line.
    Newline,
    /// A line break that does not end a logical line.
    Nl,
    Indent,
    Dedent,
    ErrorToken,
    EndMarker,
}

impl TokenKind {
    pub const fn as_str(&self) -> &'static str {
        match self {
            TokenKind::Encoding => "ENCODING",
            TokenKind::Name => "NAME",
            TokenKind::Number => "NUMBER",
            TokenKind::String => "STRING",
            TokenKind::Op => "OP",
            TokenKind::Comment => "COMMENT",
            TokenKind::Newline => "NEWLINE",
            TokenKind::Nl => "NL",
            TokenKind::Indent => "INDENT",
            TokenKind::Dedent => "DEDENT",
            TokenKind::ErrorToken => "ERRORTOKEN",
            TokenKind::EndMarker => "ENDMARKER",
        }
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A lexical token.
///
/// `start` and `end` are `(row, column)` pairs. `line` holds every physical
/// line the token spans, terminators included.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Token<'src> {
    pub kind: TokenKind,
    pub text: Cow<'src, str>,
    pub start: (usize, usize),
    pub end: (usize, usize),
    pub line: &'src str,
}

impl<'src> Token<'src> {
    /// Whitespace that precedes the first physical line's content.
    #[must_use]
    pub fn line_indent(&self) -> &'src str {
        let first = self.line.split('\n').next().unwrap_or_default();
        &first[..first.len() - first.trim_start().len()]
    }

    /// Whether this is a `NL` token on an otherwise empty line.
    #[must_use]
    pub fn is_blank_line(&self) -> bool {
        self.kind == TokenKind::Nl && self.line.trim().is_empty()
    }

    /// Whether this is an `OP` token with the given text.
    #[must_use]
    pub fn is_op(&self, op: &str) -> bool {
        self.kind == TokenKind::Op && self.text == op
    }

    /// Whether this is a `NAME` token with the given text.
    #[must_use]
    pub fn is_name(&self, name: &str) -> bool {
        self.kind == TokenKind::Name && self.text == name
    }
}

/// A string literal still open at the end of a physical line.
struct PendingString {
    start: (usize, usize),
    /// Byte offset of the literal in the source.
    offset: usize,
    /// Byte offset of the literal's first physical line.
    line_offset: usize,
    quote: &'static str,
}

/// Line-oriented tokenizer state.
pub struct Tokenizer<'src> {
    source: &'src str,
    tokens: Vec<Token<'src>>,
    indent_stack: Vec<usize>,
    paren_depth: usize,
    continued: bool,
    pending: Option<PendingString>,
}

fn is_identifier_start(c: char) -> bool {
    c == '_' || c.is_alphabetic()
}

fn is_identifier_char(c: char) -> bool {
    c == '_' || c.is_alphanumeric()
}

fn ends_with_newline(line: &str) -> bool {
    line.ends_with('\n') || line.ends_with('\r')
}

/// Returns the byte index just past the closing `quote`, scanning from `from`.
fn find_string_end(line: &str, from: usize, quote: &str) -> Option<usize> {
    let bytes = line.as_bytes();
    let mut idx = from;
    while idx < bytes.len() {
        if bytes[idx] == b'\\' {
            idx += 2;
            continue;
        }
        if bytes[idx..].starts_with(quote.as_bytes()) {
            return Some(idx + quote.len());
        }
        idx += 1;
    }
    None
}

/// Length of a string prefix plus its opening quote, and the closing quote.
fn string_opening(rest: &str) -> Option<(usize, &'static str)> {
    let prefix_len = STRING_PREFIXES
        .iter()
        .find(|prefix| rest.starts_with(*prefix) && rest[prefix.len()..].starts_with(&['"', '\''][..]))
        .map_or(0, |prefix| prefix.len());
    let quoted = &rest[prefix_len..];
    let quote = if quoted.starts_with("\"\"\"") {
        "\"\"\""
    } else if quoted.starts_with("'''") {
        "'''"
    } else if quoted.starts_with('"') {
        "\""
    } else if quoted.starts_with('\'') {
        "'"
    } else {
        return None;
    };
    Some((prefix_len + quote.len(), quote))
}

fn number_len(rest: &str) -> usize {
    let hex = rest.starts_with("0x") || rest.starts_with("0X");
    let mut previous = '\0';
    let mut len = 0;
    for c in rest.chars() {
        let exponent_sign = (c == '+' || c == '-') && !hex && (previous == 'e' || previous == 'E');
        if c.is_ascii_alphanumeric() || c == '_' || c == '.' || exponent_sign {
            len += c.len_utf8();
            previous = c;
        } else {
            break;
        }
    }
    len
}

fn operator_len(rest: &str) -> usize {
    if OPERATORS_3.iter().any(|op| rest.starts_with(op)) {
        3
    } else if OPERATORS_2.iter().any(|op| rest.starts_with(op)) {
        2
    } else if rest.chars().next().is_some_and(|c| OPERATORS_1.contains(c)) {
        1
    } else {
        0
    }
}

impl<'src> Tokenizer<'src> {
    pub fn new(source: &'src str) -> Self {
        Tokenizer {
            source,
            tokens: Vec::new(),
            indent_stack: vec![0],
            paren_depth: 0,
            continued: false,
            pending: None,
        }
    }

    fn push(
        &mut self,
        kind: TokenKind,
        text: &'src str,
        start: (usize, usize),
        end: (usize, usize),
        line: &'src str,
    ) {
        self.tokens.push(Token {
            kind,
            text: Cow::Borrowed(text),
            start,
            end,
            line,
        });
    }

    /// Tokenizes the whole source.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Tokenize`] for unterminated triple-quoted strings and
    /// unclosed brackets or continuations at end of input, and
    /// [`Error::Indentation`] for a dedent that matches no outer level.
    pub fn run(mut self) -> Result<Vec<Token<'src>>> {
        let source = self.source;
        let mut row = 0;
        let mut offset = 0;
        let mut last_line = "";

        for line in source.split_inclusive('\n') {
            row += 1;
            self.tokenize_line(line, row, offset)?;
            offset += line.len();
            last_line = line;
        }

        if let Some(pending) = &self.pending {
            return Err(Error::tokenize(
                pending.start.0,
                pending.start.1,
                "EOF in multi-line string",
            ));
        }
        if self.paren_depth > 0 || self.continued {
            return Err(Error::tokenize(row, last_line.len(), "EOF in multi-line statement"));
        }

        let ends_logical_line = self
            .tokens
            .last()
            .map_or(true, |token| matches!(token.kind, TokenKind::Newline | TokenKind::Nl));
        if !last_line.is_empty() && !ends_with_newline(last_line) && !ends_logical_line {
            let col = last_line.len();
            self.push(TokenKind::Newline, "", (row, col), (row, col + 1), "");
        }

        let eof = (row + 1, 0);
        for _ in 1..self.indent_stack.len() {
            self.push(TokenKind::Dedent, "", eof, eof, "");
        }
        self.push(TokenKind::EndMarker, "", eof, eof, "");
        Ok(self.tokens)
    }

    fn tokenize_line(&mut self, line: &'src str, row: usize, offset: usize) -> Result<()> {
        let source = self.source;
        let mut pos = 0;

        if let Some(pending) = self.pending.take() {
            match find_string_end(line, 0, pending.quote) {
                Some(end) => {
                    let text = &source[pending.offset..offset + end];
                    let spanned = &source[pending.line_offset..offset + line.len()];
                    self.push(TokenKind::String, text, pending.start, (row, end), spanned);
                    pos = end;
                }
                None if pending.quote.len() == 1 && !line.trim_end_matches(&['\r', '\n'][..]).ends_with('\\') => {
                    let text = &source[pending.offset..offset + line.len()];
                    let spanned = &source[pending.line_offset..offset + line.len()];
                    self.push(TokenKind::ErrorToken, text, pending.start, (row, line.len()), spanned);
                    return Ok(());
                }
                None => {
                    self.pending = Some(pending);
                    return Ok(());
                }
            }
        } else if self.paren_depth == 0 && !self.continued {
            let bytes = line.as_bytes();
            let mut column = 0;
            while pos < bytes.len() {
                match bytes[pos] {
                    b' ' => column += 1,
                    b'\t' => column = (column / TAB_SIZE + 1) * TAB_SIZE,
                    b'\x0c' => column = 0,
                    _ => break,
                }
                pos += 1;
            }

            if pos == line.len() {
                // whitespace-only final line without a terminator
                self.push(TokenKind::Nl, "", (row, pos), (row, pos), line);
                return Ok(());
            }

            let rest = &line[pos..];
            if rest.starts_with('#') || rest.starts_with('\n') || rest.starts_with('\r') {
                if rest.starts_with('#') {
                    let comment = rest.trim_end_matches(&['\r', '\n'][..]);
                    self.push(TokenKind::Comment, comment, (row, pos), (row, pos + comment.len()), line);
                    pos += comment.len();
                }
                self.push(TokenKind::Nl, &line[pos..], (row, pos), (row, line.len()), line);
                return Ok(());
            }

            let current = self.indent_stack.last().copied().unwrap_or(0);
            if column > current {
                self.indent_stack.push(column);
                self.push(TokenKind::Indent, &line[..pos], (row, 0), (row, pos), line);
            }
            while column < self.indent_stack.last().copied().unwrap_or(0) {
                if !self.indent_stack.contains(&column) {
                    return Err(Error::indentation(
                        row,
                        "unindent does not match any outer indentation level",
                    ));
                }
                self.indent_stack.pop();
                self.push(TokenKind::Dedent, "", (row, pos), (row, pos), line);
            }
        } else {
            self.continued = false;
        }

        while pos < line.len() {
            let rest = &line[pos..];
            let skipped = rest.len() - rest.trim_start_matches(&[' ', '\t', '\x0c'][..]).len();
            pos += skipped;
            if pos >= line.len() {
                break;
            }
            let start = pos;
            let rest = &line[start..];
            let Some(c) = rest.chars().next() else {
                break;
            };

            if c == '\n' || c == '\r' {
                let kind = if self.paren_depth > 0 {
                    TokenKind::Nl
                } else {
                    TokenKind::Newline
                };
                self.push(kind, rest, (row, start), (row, line.len()), line);
                pos = line.len();
            } else if c == '#' {
                let comment = rest.trim_end_matches(&['\r', '\n'][..]);
                pos += comment.len();
                self.push(TokenKind::Comment, comment, (row, start), (row, pos), line);
            } else if c == '\\' && (rest[1..].starts_with('\n') || rest[1..].starts_with("\r\n")) {
                self.continued = true;
                pos = line.len();
            } else if c.is_ascii_digit()
                || (c == '.' && rest[1..].starts_with(|next: char| next.is_ascii_digit()))
            {
                pos += number_len(rest);
                self.push(TokenKind::Number, &line[start..pos], (row, start), (row, pos), line);
            } else if let Some((opening, quote)) = string_opening(rest) {
                match find_string_end(line, start + opening, quote) {
                    Some(end) => {
                        pos = end;
                        self.push(TokenKind::String, &line[start..end], (row, start), (row, end), line);
                    }
                    None if quote.len() == 3 || rest.trim_end_matches(&['\r', '\n'][..]).ends_with('\\') => {
                        self.pending = Some(PendingString {
                            start: (row, start),
                            offset: offset + start,
                            line_offset: offset,
                            quote,
                        });
                        return Ok(());
                    }
                    None => {
                        pos += opening;
                        self.push(TokenKind::ErrorToken, &line[start..pos], (row, start), (row, pos), line);
                    }
                }
            } else if is_identifier_start(c) {
                let len = rest
                    .char_indices()
                    .find(|(_, c)| !is_identifier_char(*c))
                    .map_or(rest.len(), |(idx, _)| idx);
                pos += len;
                self.push(TokenKind::Name, &line[start..pos], (row, start), (row, pos), line);
            } else {
                let len = operator_len(rest);
                if len > 0 {
                    match c {
                        '(' | '[' | '{' => self.paren_depth += 1,
                        ')' | ']' | '}' => self.paren_depth = self.paren_depth.saturating_sub(1),
                        _ => {}
                    }
                    pos += len;
                    self.push(TokenKind::Op, &line[start..pos], (row, start), (row, pos), line);
                } else {
                    pos += c.len_utf8();
                    self.push(TokenKind::ErrorToken, &line[start..pos], (row, start), (row, pos), line);
                }
            }
        }

        Ok(())
    }
}

/// Tokenizes Python source.
///
/// # Errors
///
/// See [`Tokenizer::run`].
pub fn tokenize(source: &str) -> Result<Vec<Token<'_>>> {
    Tokenizer::new(source).run()
}

/// Rebuilds source text from tokens.
///
/// Whitespace between tokens is recovered from each token's physical line,
/// and backslash continuations from the line that precedes a row change. For
/// an unmodified token stream the output equals the tokenized source.
#[must_use]
pub fn untokenize(tokens: &[Token<'_>]) -> String {
    let mut text = String::new();
    let mut previous_line = "";
    let mut last_row = 0;
    let mut last_col = 0;
    let mut last_significant = None;

    for token in tokens {
        if token.kind == TokenKind::Encoding {
            continue;
        }
        let (row, col) = token.start;

        if row > last_row {
            let continued = previous_line.ends_with("\\\n") || previous_line.ends_with("\\\r\n");
            if continued && last_significant != Some(TokenKind::Comment) {
                let kept = previous_line.trim_end_matches(&[' ', '\t', '\r', '\n', '\\'][..]);
                text.push_str(&previous_line[kept.len()..]);
            }
            last_col = 0;
        }
        if col > last_col {
            text.push_str(token.line.get(last_col..col).unwrap_or_default());
        }

        text.push_str(&token.text);
        if !token.line.is_empty() {
            previous_line = token.line;
        }
        (last_row, last_col) = token.end;
        if !matches!(
            token.kind,
            TokenKind::Newline | TokenKind::Nl | TokenKind::Indent | TokenKind::Dedent
        ) {
            last_significant = Some(token.kind);
        }
    }

    text
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kinds(source: &str) -> Vec<TokenKind> {
        tokenize(source).unwrap().iter().map(|t| t.kind).collect()
    }

    #[test]
    fn test_simple_statement() {
        use TokenKind::*;
        assert_eq!(kinds("x = 1\n"), vec![Name, Op, Number, Newline, EndMarker]);
    }

    #[test]
    fn test_indent_and_dedent() {
        use TokenKind::*;
        assert_eq!(
            kinds("if x:\n    y\nz\n"),
            vec![Name, Name, Op, Newline, Indent, Name, Newline, Dedent, Name, Newline, EndMarker]
        );
    }

    #[test]
    fn test_trailing_dedents_at_eof() {
        let tokens = tokenize("def f():\n    pass\n").unwrap();
        let tail: Vec<TokenKind> = tokens.iter().rev().take(2).map(|t| t.kind).collect();
        assert_eq!(tail, vec![TokenKind::EndMarker, TokenKind::Dedent]);
        assert_eq!(tokens.last().unwrap().start, (3, 0));
    }

    #[test]
    fn test_multi_line_string_positions() {
        let source = "x = '''a\nb'''\n";
        let tokens = tokenize(source).unwrap();
        let string = &tokens[2];
        assert_eq!(string.kind, TokenKind::String);
        assert_eq!(string.text, "'''a\nb'''");
        assert_eq!(string.start, (1, 4));
        assert_eq!(string.end, (2, 4));
        assert_eq!(string.line, "x = '''a\nb'''\n");
    }

    #[test]
    fn test_string_prefixes() {
        let tokens = tokenize("rb'x' f\"y\" u'''z'''\n").unwrap();
        let strings: Vec<&str> = tokens
            .iter()
            .filter(|t| t.kind == TokenKind::String)
            .map(|t| t.text.as_ref())
            .collect();
        assert_eq!(strings, vec!["rb'x'", "f\"y\"", "u'''z'''"]);
    }

    #[test]
    fn test_brackets_emit_nl() {
        use TokenKind::*;
        assert_eq!(
            kinds("f(a,\n  b)\n"),
            vec![Name, Op, Name, Op, Nl, Name, Op, Newline, EndMarker]
        );
    }

    #[test]
    fn test_comments_and_blank_lines() {
        use TokenKind::*;
        assert_eq!(kinds("# hi\n\nx\n"), vec![Comment, Nl, Nl, Name, Newline, EndMarker]);
    }

    #[test]
    fn test_missing_final_newline() {
        let tokens = tokenize("x = 1").unwrap();
        let newline = &tokens[3];
        assert_eq!(newline.kind, TokenKind::Newline);
        assert_eq!(newline.text, "");
    }

    #[test]
    fn test_operators() {
        let tokens = tokenize("a **= b -> c := d ...\n").unwrap();
        let ops: Vec<&str> = tokens
            .iter()
            .filter(|t| t.kind == TokenKind::Op)
            .map(|t| t.text.as_ref())
            .collect();
        assert_eq!(ops, vec!["**=", "->", ":=", "..."]);
    }

    #[test]
    fn test_numbers() {
        let tokens = tokenize("1e-5 + 0x1e+5 + .5j\n").unwrap();
        let numbers: Vec<&str> = tokens
            .iter()
            .filter(|t| t.kind == TokenKind::Number)
            .map(|t| t.text.as_ref())
            .collect();
        assert_eq!(numbers, vec!["1e-5", "0x1e", "5", ".5j"]);
    }

    #[test]
    fn test_unterminated_triple_string_is_error() {
        let err = tokenize("x = '''never closed\n").unwrap_err();
        assert_eq!(err, Error::tokenize(1, 4, "EOF in multi-line string"));
    }

    #[test]
    fn test_unclosed_bracket_is_error() {
        assert!(matches!(tokenize("f(a,\n"), Err(Error::Tokenize { .. })));
    }

    #[test]
    fn test_bad_dedent_is_error() {
        let err = tokenize("if x:\n        y\n    z\n").unwrap_err();
        assert!(matches!(err, Error::Indentation { line: 3, .. }));
    }

    #[test]
    fn test_round_trip() {
        for source in [
            "",
            "x = 1",
            "x = 1\n",
            "def f(a, b):\n    '''Doc.'''\n\n    return a  +  b\n",
            "value = 1 + \\\n    2\n",
            "if x:\n\tpass\n",
            "class A:\n    # comment\n    x = [\n        1,\n\n        2,\n    ]\n",
            "s = '''line one\n   line two'''  # trailing\n",
            "x = 1\r\ny = 2\r\n",
            "   \n\n",
            "t = 'a\\\nb'\n",
            "名前 = 'ü'\n",
        ] {
            let tokens = tokenize(source).unwrap();
            assert_eq!(untokenize(&tokens), source, "{source:?}");
        }
    }

    #[test]
    fn test_untokenize_without_blank_lines() {
        let source = "def f():\n\n    '''Doc.'''\n";
        let tokens: Vec<Token> = tokenize(source)
            .unwrap()
            .into_iter()
            .filter(|t| !t.is_blank_line())
            .collect();
        assert_eq!(untokenize(&tokens), "def f():\n    '''Doc.'''\n");
    }

    #[test]
    fn test_line_indent() {
        let tokens = tokenize("def f():\n    '''Doc.\n    more'''\n").unwrap();
        let string = tokens.iter().find(|t| t.kind == TokenKind::String).unwrap();
        assert_eq!(string.line_indent(), "    ");
    }
}
