//! Finds which string tokens are docstrings, and of what.
//!
//! A docstring is a triple-quoted string standing alone as a statement. What
//! it documents is read off the logical line before it: nothing at all for a
//! module, a `class`/`def` header (decorators included) for classes and
//! functions, or an assignment for an attribute.

use crate::strings::is_docstring_literal;
use crate::tokenize::{Token, TokenKind};
use std::fmt;
use tracing::trace;

/// Keywords that may be followed directly by `:`.
const BARE_COLON_KEYWORDS: &[&str] = &["else", "try", "finally", "except", "lambda"];

/// What a docstring documents.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum DocstringKind {
    Module,
    Class,
    Function,
    Attribute,
}

impl fmt::Display for DocstringKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            DocstringKind::Module => "module",
            DocstringKind::Class => "class",
            DocstringKind::Function => "function",
            DocstringKind::Attribute => "attribute",
        };
        f.write_str(name)
    }
}

/// A docstring together with the construct it documents.
///
/// Both indices point into the token slice given to
/// [`find_docstring_blocks`]. `anchor` is the first token of the documented
/// construct: the docstring itself for modules, the first decorator or the
/// `class`/`def`/`async` keyword for definitions, and the target name for
/// attributes.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DocstringBlock {
    pub kind: DocstringKind,
    pub anchor: usize,
    pub docstring: usize,
}

fn is_trivia(kind: TokenKind) -> bool {
    matches!(
        kind,
        TokenKind::Indent | TokenKind::Dedent | TokenKind::Nl | TokenKind::Comment | TokenKind::Encoding
    )
}

/// Index of the nearest token before `idx` that is not layout or a comment.
///
/// A `DEDENT` closes the block before it, so it is returned as is.
fn previous_significant(tokens: &[Token<'_>], idx: usize) -> Option<usize> {
    (0..idx)
        .rev()
        .find(|&i| tokens[i].kind == TokenKind::Dedent || !is_trivia(tokens[i].kind))
}

/// First significant token of the logical line that ends at `newline`.
fn statement_start(tokens: &[Token<'_>], newline: usize) -> usize {
    let after_previous = (0..newline)
        .rev()
        .find(|&i| tokens[i].kind == TokenKind::Newline)
        .map_or(0, |i| i + 1);
    (after_previous..newline)
        .find(|&i| !is_trivia(tokens[i].kind))
        .unwrap_or(newline)
}

/// Whether the string at `idx` is followed by the end of its logical line.
fn ends_statement(tokens: &[Token<'_>], idx: usize) -> bool {
    tokens[idx + 1..]
        .iter()
        .find(|token| token.kind != TokenKind::Comment)
        .map_or(true, |token| {
            matches!(token.kind, TokenKind::Newline | TokenKind::EndMarker)
        })
}

fn significant<'a, 'src>(statement: &'a [Token<'src>]) -> impl DoubleEndedIterator<Item = &'a Token<'src>> {
    statement.iter().filter(|token| !is_trivia(token.kind))
}

fn definition_kind(statement: &[Token<'_>]) -> Option<DocstringKind> {
    let mut tokens = significant(statement);
    let first = tokens.next()?;
    let kind = if first.is_name("class") {
        DocstringKind::Class
    } else if first.is_name("def")
        || (first.is_name("async") && tokens.next().is_some_and(|t| t.is_name("def")))
    {
        DocstringKind::Function
    } else {
        return None;
    };
    significant(statement)
        .next_back()
        .is_some_and(|last| last.is_op(":"))
        .then_some(kind)
}

fn is_assignment(statement: &[Token<'_>]) -> bool {
    if statement.iter().any(|token| token.line.contains("\"\"\"")) {
        return false;
    }

    let mut depth = 0usize;
    let mut has_equals = false;
    for token in significant(statement) {
        if token.kind != TokenKind::Op {
            continue;
        }
        match token.text.as_ref() {
            "(" | "[" | "{" => depth += 1,
            ")" | "]" | "}" => depth = depth.saturating_sub(1),
            "=" if depth == 0 => has_equals = true,
            _ => {}
        }
    }
    if has_equals {
        return true;
    }

    // annotated declaration without a value
    let mut tokens = significant(statement);
    matches!(
        (tokens.next(), tokens.next()),
        (Some(name), Some(colon))
            if name.kind == TokenKind::Name
                && !BARE_COLON_KEYWORDS.contains(&name.text.as_ref())
                && colon.is_op(":")
    ) && !significant(statement).next_back().is_some_and(|last| last.is_op(":"))
}

/// Walks back over decorator lines that precede the definition at `start`.
fn decorated_start(tokens: &[Token<'_>], mut start: usize) -> usize {
    while let Some(previous) = previous_significant(tokens, start) {
        if tokens[previous].kind != TokenKind::Newline {
            break;
        }
        let decorator = statement_start(tokens, previous);
        if !tokens[decorator].is_op("@") {
            break;
        }
        start = decorator;
    }
    start
}

fn classify(tokens: &[Token<'_>], idx: usize) -> Option<DocstringBlock> {
    let Some(previous) = previous_significant(tokens, idx) else {
        return Some(DocstringBlock {
            kind: DocstringKind::Module,
            anchor: idx,
            docstring: idx,
        });
    };
    if tokens[previous].kind != TokenKind::Newline {
        return None;
    }

    let start = statement_start(tokens, previous);
    let statement = &tokens[start..previous];
    if let Some(kind) = definition_kind(statement) {
        return Some(DocstringBlock {
            kind,
            anchor: decorated_start(tokens, start),
            docstring: idx,
        });
    }
    if is_assignment(statement) {
        let anchor = (start..previous)
            .find(|&i| tokens[i].kind == TokenKind::Name)
            .unwrap_or(start);
        return Some(DocstringBlock {
            kind: DocstringKind::Attribute,
            anchor,
            docstring: idx,
        });
    }
    None
}

/// Whether the token at `idx` could be a docstring at all.
///
/// It must be a triple-quoted string that forms a statement of its own, on a
/// line that is not an assignment.
#[must_use]
pub fn is_docstring_candidate(tokens: &[Token<'_>], idx: usize) -> bool {
    let token = &tokens[idx];
    let first_line = token.line.split('\n').next().unwrap_or_default();
    token.kind == TokenKind::String
        && is_docstring_literal(&token.text)
        && !first_line.contains(" = ")
        && ends_statement(tokens, idx)
}

/// Finds every docstring in a token stream.
///
/// Blocks come out in source order. When two neighbouring blocks share an
/// anchor only the first is kept.
///
/// # Examples
///
/// ```rust
/// use pydocfmt::classify::{find_docstring_blocks, DocstringKind};
/// use pydocfmt::tokenize::tokenize;
///
/// let source = "'''Module.'''\n\n@cache\ndef f():\n    '''Function.'''\n";
/// let tokens = tokenize(source).unwrap();
/// let kinds: Vec<DocstringKind> = find_docstring_blocks(&tokens).iter().map(|b| b.kind).collect();
/// assert_eq!(kinds, vec![DocstringKind::Module, DocstringKind::Function]);
/// ```
#[must_use]
pub fn find_docstring_blocks(tokens: &[Token<'_>]) -> Vec<DocstringBlock> {
    let mut blocks: Vec<DocstringBlock> = (0..tokens.len())
        .filter(|&idx| is_docstring_candidate(tokens, idx))
        .filter_map(|idx| classify(tokens, idx))
        .inspect(|block| {
            trace!(
                kind = %block.kind,
                row = tokens[block.docstring].start.0,
                "found docstring"
            );
        })
        .collect();
    blocks.dedup_by_key(|block| block.anchor);
    blocks
}
