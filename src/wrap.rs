//! Greedy line filling for summaries and description paragraphs.
//!
//! Filling is first-fit: a word goes on the current line when it fits and
//! starts a new line otherwise. Words are never split, neither at hyphens nor
//! when a single word is longer than the width, so URLs and identifiers stay
//! intact.

use crate::strings::expand_tabs;
use textwrap::{Options, WordSeparator, WordSplitter, WrapAlgorithm};

/// Fills `text` to `width` columns and returns the lines.
///
/// Every whitespace character counts as a space and tabs are expanded first.
/// The first line is prefixed with `initial_indent`, the rest with
/// `subsequent_indent`. Blank input yields no lines.
#[must_use]
pub fn fill_lines(
    text: &str,
    width: usize,
    initial_indent: &str,
    subsequent_indent: &str,
) -> Vec<String> {
    let flattened: String = expand_tabs(text, 8)
        .chars()
        .map(|c| if c.is_whitespace() { ' ' } else { c })
        .collect();
    let flattened = flattened.trim();
    if flattened.is_empty() {
        return Vec::new();
    }

    let options = Options::new(width.max(1))
        .initial_indent(initial_indent)
        .subsequent_indent(subsequent_indent)
        .wrap_algorithm(WrapAlgorithm::FirstFit)
        .word_separator(WordSeparator::AsciiSpace)
        .word_splitter(WordSplitter::NoHyphenation)
        .break_words(false);
    textwrap::wrap(flattened, options)
        .into_iter()
        .map(|line| line.trim_end().to_string())
        .collect()
}

/// Same as [`fill_lines`] joined with newlines.
#[must_use]
pub fn fill(text: &str, width: usize, initial_indent: &str, subsequent_indent: &str) -> String {
    fill_lines(text, width, initial_indent, subsequent_indent).join("\n")
}

/// Collapses every whitespace run, newlines included, to a single space.
///
/// ```rust
/// use pydocfmt::wrap::unwrap_summary;
///
/// assert_eq!(unwrap_summary("Hello\n    world,  again."), "Hello world, again.");
/// ```
#[must_use]
pub fn unwrap_summary(summary: &str) -> String {
    let mut unwrapped = String::with_capacity(summary.len());
    for word in summary.split_whitespace() {
        if !unwrapped.is_empty() {
            unwrapped.push(' ');
        }
        unwrapped.push_str(word);
    }
    unwrapped
}

/// Unwraps and refills a summary.
///
/// A `width` of zero disables wrapping and returns the summary untouched.
/// Otherwise the result carries no leading or trailing whitespace.
///
/// ```rust
/// use pydocfmt::wrap::wrap_summary;
///
/// let wrapped = wrap_summary("one two three four", "", "    ", 10);
/// assert_eq!(wrapped, "one two\n    three\n    four");
/// assert_eq!(wrap_summary("keep\n  as is", "", "", 0), "keep\n  as is");
/// ```
#[must_use]
pub fn wrap_summary(
    summary: &str,
    initial_indent: &str,
    subsequent_indent: &str,
    width: usize,
) -> String {
    if width == 0 {
        return summary.to_string();
    }
    fill(&unwrap_summary(summary), width, initial_indent, subsequent_indent)
        .trim()
        .to_string()
}
