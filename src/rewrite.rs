//! Source-level rewriting: finds docstrings in a token stream, formats them,
//! tidies the blank lines around them and reassembles the source.

use crate::classify::{find_docstring_blocks, is_docstring_candidate, DocstringBlock, DocstringKind};
use crate::docstring::DocstringFormatter;
use crate::options::{FormatOptions, LineRange};
use crate::strings::{find_newline, normalize_line_endings, split_lines_keep_ends};
use crate::tokenize::{tokenize, untokenize, Token, TokenKind};
use crate::Result;
use std::borrow::Cow;
use std::collections::HashSet;
use tracing::debug;

/// Whether any row of `start..=end` lies inside `range`.
///
/// No range means every row is in range.
#[must_use]
pub fn is_in_range(range: Option<LineRange>, start: usize, end: usize) -> bool {
    range.map_or(true, |range| range.start <= end && start <= range.end)
}

/// Whether a docstring spanning rows `start..=end` has a length inside `range`.
#[must_use]
pub fn has_correct_length(range: Option<LineRange>, start: usize, end: usize) -> bool {
    range.map_or(true, |range| range.contains(end + 1 - start))
}

/// Rewrites every docstring in a Python module.
///
/// # Examples
///
/// ```rust
/// use pydocfmt::{FormatOptions, Rewriter};
///
/// let options = FormatOptions::new();
/// let rewriter = Rewriter::new(&options);
/// let source = "def f():\n\n    '''  do it  '''\n    return 1\n";
/// assert_eq!(
///     rewriter.format_source(source),
///     "def f():\n    \"\"\"Do it.\"\"\"\n    return 1\n"
/// );
/// ```
#[derive(Clone, Copy, Debug)]
pub struct Rewriter<'a> {
    options: &'a FormatOptions,
}

impl<'a> Rewriter<'a> {
    pub fn new(options: &'a FormatOptions) -> Self {
        Rewriter { options }
    }

    /// Formats `source`, returning it unchanged when it cannot be tokenized.
    #[must_use]
    pub fn format_source(&self, source: &str) -> String {
        match self.try_format_source(source) {
            Ok(formatted) => formatted,
            Err(err) => {
                debug!(%err, "leaving source unchanged");
                source.to_string()
            }
        }
    }

    /// Formats `source`.
    ///
    /// Line endings are normalized to the dominant terminator of the input.
    ///
    /// # Errors
    ///
    /// Returns the tokenizer's error when `source` is not valid enough Python
    /// to tokenize.
    pub fn try_format_source(&self, source: &str) -> Result<String> {
        if source.is_empty() {
            return Ok(String::new());
        }
        let lines = split_lines_keep_ends(source);
        let newline = find_newline(&lines);
        let formatted = self.format_code(&normalize_line_endings(&lines, "\n"))?;
        if newline == "\n" {
            return Ok(formatted);
        }
        Ok(normalize_line_endings(&split_lines_keep_ends(&formatted), newline))
    }

    fn in_scope(&self, token: &Token<'_>) -> bool {
        let (start, end) = (token.start.0, token.end.0);
        is_in_range(self.options.line_range, start, end)
            && has_correct_length(self.options.length_range, start, end)
    }

    fn format_code(&self, source: &str) -> Result<String> {
        let mut tokens = tokenize(source)?;
        let blocks = find_docstring_blocks(&tokens);
        let documented: HashSet<usize> = blocks.iter().map(|block| block.docstring).collect();
        let formatter = DocstringFormatter::new(self.options);

        let mut eligible = vec![false; tokens.len()];
        let mut previous_kind = None;
        let mut only_comments_so_far = true;
        for idx in 0..tokens.len() {
            let kind = tokens[idx].kind;
            let opens_block = matches!(previous_kind, Some(TokenKind::Indent | TokenKind::Newline))
                || only_comments_so_far;

            if is_docstring_candidate(&tokens, idx)
                && (opens_block || documented.contains(&idx))
                && self.in_scope(&tokens[idx])
            {
                eligible[idx] = true;
                let formatted = formatter.format(tokens[idx].line_indent(), &tokens[idx].text);
                if formatted != tokens[idx].text {
                    debug!(row = tokens[idx].start.0, "rewrote docstring");
                    tokens[idx].text = Cow::Owned(formatted);
                }
            }

            if !matches!(
                kind,
                TokenKind::Comment | TokenKind::Nl | TokenKind::Newline | TokenKind::Encoding
            ) {
                only_comments_so_far = false;
            }
            previous_kind = Some(kind);
        }

        let remove = blank_lines_to_remove(&tokens, &blocks, &eligible);
        let kept: Vec<Token<'_>> = tokens
            .into_iter()
            .zip(remove)
            .filter_map(|(token, remove)| (!remove).then_some(token))
            .collect();
        Ok(untokenize(&kept))
    }
}

/// Marks the blank-line tokens that the docstring layout rules drop.
///
/// Blank lines between a class, function or attribute and its docstring are
/// always dropped. Blank lines after a class or function docstring are dropped
/// too, except that a docstring making up the whole body keeps exactly one.
fn blank_lines_to_remove(tokens: &[Token<'_>], blocks: &[DocstringBlock], eligible: &[bool]) -> Vec<bool> {
    let mut remove = vec![false; tokens.len()];

    for block in blocks.iter().filter(|block| eligible[block.docstring]) {
        if block.kind == DocstringKind::Module {
            continue;
        }

        for idx in (0..block.docstring).rev() {
            let token = &tokens[idx];
            if token.is_blank_line() {
                remove[idx] = true;
            } else if !matches!(token.kind, TokenKind::Indent | TokenKind::Nl | TokenKind::Comment) {
                break;
            }
        }

        if block.kind == DocstringKind::Attribute {
            continue;
        }

        let mut idx = block.docstring + 1;
        while tokens.get(idx).is_some_and(|token| token.kind == TokenKind::Comment) {
            idx += 1;
        }
        if tokens.get(idx).map(|token| token.kind) != Some(TokenKind::Newline) {
            continue;
        }
        idx += 1;
        let blank_start = idx;
        while tokens.get(idx).is_some_and(Token::is_blank_line) {
            idx += 1;
        }
        if idx == blank_start {
            continue;
        }

        let next = tokens[idx..]
            .iter()
            .find(|token| !matches!(token.kind, TokenKind::Nl | TokenKind::Comment));
        let ends_stub = next.map_or(true, |token| {
            matches!(token.kind, TokenKind::Dedent | TokenKind::EndMarker)
        });
        let first_removed = if ends_stub { blank_start + 1 } else { blank_start };
        remove[first_removed..idx].iter_mut().for_each(|flag| *flag = true);
    }

    remove
}

#[cfg(test)]
mod tests {
    use super::*;

    fn format(source: &str) -> String {
        Rewriter::new(&FormatOptions::new()).format_source(source)
    }

    #[test]
    fn test_range_helpers() {
        assert!(is_in_range(None, 5, 9));
        assert!(is_in_range(Some(LineRange::new(1, 5)), 5, 9));
        assert!(!is_in_range(Some(LineRange::new(1, 4)), 5, 9));
        assert!(has_correct_length(Some(LineRange::new(1, 1)), 3, 3));
        assert!(!has_correct_length(Some(LineRange::new(2, 5)), 3, 3));
    }

    #[test]
    fn test_blank_line_after_function_docstring_is_removed() {
        let source = "def f():\n    '''Doc.'''\n\n    return 1\n";
        assert_eq!(format(source), "def f():\n    \"\"\"Doc.\"\"\"\n    return 1\n");
    }

    #[test]
    fn test_blank_line_before_nested_def_is_removed() {
        let source = "class A:\n    '''Doc.'''\n\n    def f(self):\n        pass\n";
        assert_eq!(
            format(source),
            "class A:\n    \"\"\"Doc.\"\"\"\n    def f(self):\n        pass\n"
        );

        let nested = "def f():\n    '''Doc.'''\n\n    def g():\n        pass\n";
        assert_eq!(
            format(nested),
            "def f():\n    \"\"\"Doc.\"\"\"\n    def g():\n        pass\n"
        );
    }

    #[test]
    fn test_single_blank_line_kept_after_stub() {
        let source = "class A:\n    '''Doc.'''\n\n\nx = 1\n";
        assert_eq!(format(source), "class A:\n    \"\"\"Doc.\"\"\"\n\nx = 1\n");

        let function = "def f():\n    '''Doc.'''\n\n\n\nx = 1\n";
        assert_eq!(format(function), "def f():\n    \"\"\"Doc.\"\"\"\n\nx = 1\n");

        let at_end = "def f():\n    '''Doc.'''\n\n\n";
        assert_eq!(format(at_end), "def f():\n    \"\"\"Doc.\"\"\"\n\n");
    }

    #[test]
    fn test_outer_string_after_nested_assignment_is_untouched() {
        let source = "class A:\n    x = 1\n\n'''Module level string.'''\n";
        assert_eq!(format(source), source);
    }

    #[test]
    fn test_attribute_docstring_is_pulled_up() {
        let source = "x = 1\n\n'''doc for x'''\n";
        assert_eq!(format(source), "x = 1\n\"\"\"Doc for x.\"\"\"\n");
    }

    #[test]
    fn test_module_docstring_spacing_is_untouched() {
        let source = "# header\n\n'''module doc'''\n\n\nimport os\n";
        assert_eq!(format(source), "# header\n\n\"\"\"Module doc.\"\"\"\n\n\nimport os\n");
    }

    #[test]
    fn test_crlf_is_preserved() {
        let source = "def f():\r\n    '''doc'''\r\n    pass\r\n";
        assert_eq!(format(source), "def f():\r\n    \"\"\"Doc.\"\"\"\r\n    pass\r\n");
    }

    #[test]
    fn test_untokenizable_source_is_returned_unchanged() {
        let source = "def f(:\n    '''doc'''\n";
        assert_eq!(format(source), source);
        assert!(Rewriter::new(&FormatOptions::new()).try_format_source(source).is_err());
    }

    #[test]
    fn test_line_range_limits_rewrites() {
        let source = "def f():\n    '''one'''\n\n\ndef g():\n    '''two'''\n";
        let options = FormatOptions::new().with_line_range(LineRange::new(5, 6));
        assert_eq!(
            Rewriter::new(&options).format_source(source),
            "def f():\n    '''one'''\n\n\ndef g():\n    \"\"\"Two.\"\"\"\n"
        );
    }
}
