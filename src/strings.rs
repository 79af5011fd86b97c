//! String utilities shared by the docstring pipeline.
//!
//! These helpers know nothing about tokens; they operate on the contents of a
//! single docstring (or on whole source text for the line-ending helpers).
//!
//! ```rust
//! use pydocfmt::strings::{normalize_summary, split_summary_and_description, strip_docstring};
//!
//! let (contents, quote) = strip_docstring("'''\n    hello world\n    '''").unwrap();
//! assert_eq!(contents, "hello world");
//! assert_eq!(quote, "\"\"\"");
//!
//! let (summary, description) = split_summary_and_description("Hello. World.", &[] as &[&str]);
//! assert_eq!((summary.as_str(), description.as_str()), ("Hello.", "World."));
//!
//! assert_eq!(normalize_summary("return the value", &[] as &[&str]), "Return the value.");
//! ```

use crate::patterns::is_probable_sentence_start;
use crate::{Error, Result};

/// Opening quotes accepted for docstrings, prefixed forms first.
const QUOTE_FORMS: &[&str] = &[
    "r\"\"\"", "R\"\"\"", "r'''", "R'''", "u\"\"\"", "U\"\"\"", "u'''", "U'''", "\"\"\"", "'''",
];

/// Canonical closing (and unprefixed opening) quote.
pub const TRIPLE_DOUBLE: &str = "\"\"\"";

/// Whether a string token opens with one of the supported triple quotes.
#[must_use]
pub fn is_docstring_literal(text: &str) -> bool {
    QUOTE_FORMS.iter().any(|quote| text.starts_with(quote))
}

/// Strips the quotes from a docstring literal.
///
/// Returns the trimmed contents and the canonical opening quote: `"""`,
/// `r"""` or `u"""`, with the prefix lowercased and single quotes replaced.
///
/// # Errors
///
/// Returns [`Error::UnsupportedLiteral`] when the literal does not open and
/// close with one of the supported triple quotes.
pub fn strip_docstring(raw: &str) -> Result<(String, String)> {
    let docstring = raw.trim();
    for opener in QUOTE_FORMS {
        let closer = &opener[opener.len() - 3..];
        if docstring.starts_with(opener)
            && docstring.len() >= opener.len() + closer.len()
            && docstring.ends_with(closer)
        {
            let inner = &docstring[opener.len()..docstring.len() - closer.len()];
            let prefix = opener[..opener.len() - 3].to_ascii_lowercase();
            return Ok((inner.trim().to_string(), format!("{prefix}{TRIPLE_DOUBLE}")));
        }
    }
    Err(Error::unsupported_literal(raw))
}

/// Splits off the first sentence of `text`.
///
/// A sentence ends at `.`, `?` or `!`, or at a colon that ends a line. Words
/// ending in one of `abbreviations` (e.g. `e.g.`) never end a sentence. The
/// whitespace that followed the sentence stays at the front of the rest.
#[must_use]
pub fn split_first_sentence<S: AsRef<str>>(text: &str, abbreviations: &[S]) -> (String, String) {
    let mut sentence = String::new();
    let mut rest = text;
    let mut previous_delimiter = "";
    let mut delimiter = "";

    while !rest.is_empty() {
        let (word, delim, remainder) = match rest.char_indices().find(|(_, c)| c.is_whitespace()) {
            Some((idx, c)) => {
                let after = idx + c.len_utf8();
                (&rest[..idx], &rest[idx..after], &rest[after..])
            }
            None => (rest, "", ""),
        };
        delimiter = delim;
        rest = remainder;

        sentence.push_str(previous_delimiter);
        sentence.push_str(word);

        if abbreviations
            .iter()
            .any(|abbreviation| sentence.ends_with(abbreviation.as_ref()))
        {
            // false end of sentence
        } else if sentence.ends_with(&['.', '?', '!'][..]) {
            break;
        } else if sentence.ends_with(':') && delimiter == "\n" {
            break;
        }

        previous_delimiter = delimiter;
        delimiter = "";
    }

    (sentence, format!("{delimiter}{rest}"))
}

/// Splits docstring contents into a summary and a description.
///
/// The split happens at the first blank line, or before the first line that
/// looks like the start of a list entry. Failing that the first sentence is
/// the summary. When no split is possible the description is empty.
///
/// # Examples
///
/// ```rust
/// use pydocfmt::strings::split_summary_and_description;
///
/// let (summary, description) =
///     split_summary_and_description("Summary line.\n\n    More text here.", &[] as &[&str]);
/// assert_eq!(summary, "Summary line.");
/// assert_eq!(description, "\n    More text here.");
/// ```
#[must_use]
pub fn split_summary_and_description<S: AsRef<str>>(
    contents: &str,
    abbreviations: &[S],
) -> (String, String) {
    let split_lines: Vec<&str> = contents.trim_end().lines().collect();
    for index in 1..split_lines.len() {
        let line = split_lines[index];
        if line.trim().is_empty() || is_probable_sentence_start(line) {
            return (
                split_lines[..index].join("\n").trim().to_string(),
                split_lines[index..].join("\n").trim_end().to_string(),
            );
        }
    }

    let (sentence, rest) = split_first_sentence(contents, abbreviations);
    if !sentence.trim().is_empty() && !rest.trim().is_empty() {
        let tail: Vec<&str> = rest.lines().skip(1).collect();
        return (
            sentence.trim().to_string(),
            format!("{}{}", find_shortest_indentation(&tail), rest.trim()),
        );
    }

    (contents.to_string(), String::new())
}

/// Adds a terminal period and capitalizes the first word of a summary.
///
/// A period is added when the summary ends in an alphanumeric character or a
/// quote and does not start with `#`. The first letter is uppercased unless the
/// first word looks like an identifier or file name (contains `_` or `.`) or is
/// listed in `non_cap`.
#[must_use]
pub fn normalize_summary<S: AsRef<str>>(summary: &str, non_cap: &[S]) -> String {
    let mut summary = summary.trim_end().to_string();

    if let Some(last) = summary.chars().last() {
        if (last.is_alphanumeric() || last == '"' || last == '\'') && !summary.starts_with('#') {
            summary.push('.');
        }
    }

    let first_word = summary.split(' ').next().unwrap_or_default();
    let bare = first_word.trim_end_matches(&['.', ',', ';', ':', '!', '?'][..]);
    let is_identifier = bare.contains(&['_', '.'][..]);
    let is_non_cap = non_cap
        .iter()
        .any(|word| word.as_ref() == bare || word.as_ref() == first_word);
    if !is_identifier && !is_non_cap {
        let mut chars = summary.chars();
        if let Some(first) = chars.next() {
            summary = first.to_uppercase().chain(chars).collect();
        }
    }

    summary
}

/// Returns the shortest leading-whitespace prefix over the non-blank lines.
#[must_use]
pub fn find_shortest_indentation<S: AsRef<str>>(lines: &[S]) -> String {
    let mut shortest: Option<&str> = None;
    for line in lines {
        let line = line.as_ref();
        if line.trim().is_empty() {
            continue;
        }
        let indentation = &line[..line.len() - line.trim_start().len()];
        if shortest.map_or(true, |current| indentation.len() < current.len()) {
            shortest = Some(indentation);
        }
    }
    shortest.unwrap_or_default().to_string()
}

/// Expands tabs to the next multiple of `tab_size` columns.
#[must_use]
pub fn expand_tabs(text: &str, tab_size: usize) -> String {
    let mut expanded = String::with_capacity(text.len());
    let mut column = 0;
    for c in text.chars() {
        match c {
            '\t' => {
                let spaces = tab_size - column % tab_size;
                expanded.extend(std::iter::repeat(' ').take(spaces));
                column += spaces;
            }
            '\n' | '\r' => {
                expanded.push(c);
                column = 0;
            }
            _ => {
                expanded.push(c);
                column += 1;
            }
        }
    }
    expanded
}

/// Dedents `text` and re-indents every line with `indentation`.
///
/// Tabs are expanded first unless the target indentation itself uses tabs.
/// Trailing whitespace is removed from every line and the result ends with a
/// single newline.
#[must_use]
pub fn reindent(text: &str, indentation: &str) -> String {
    let text = if indentation.contains('\t') {
        text.to_string()
    } else {
        expand_tabs(text, 8)
    };
    let dedented = textwrap::dedent(&text);
    let lines: Vec<String> = dedented
        .lines()
        .map(|line| format!("{indentation}{line}").trim_end().to_string())
        .collect();
    format!("{}\n", lines.join("\n").trim_end())
}

/// Drops blank lines from the start of `text`.
#[must_use]
pub fn strip_leading_blank_lines(text: &str) -> String {
    let lines: Vec<&str> = text.lines().collect();
    let found = lines
        .iter()
        .position(|line| !line.trim().is_empty())
        .unwrap_or(0);
    lines[found..].join("\n")
}

/// Removes a leading reST adornment line from `text`.
///
/// When the first non-blank line consists of a single repeated
/// non-alphanumeric character, that adornment is removed. Otherwise the text
/// is returned untouched.
///
/// ```rust
/// use pydocfmt::strings::remove_section_header;
///
/// assert_eq!(remove_section_header("----\nfoo\nbar\n"), "\nfoo\nbar\n");
/// assert_eq!(remove_section_header("foo\nbar\n"), "foo\nbar\n");
/// ```
#[must_use]
pub fn remove_section_header(text: &str) -> String {
    let stripped = text.trim_start();
    let Some(first) = stripped.chars().next() else {
        return text.to_string();
    };
    let first_line = stripped.lines().next().unwrap_or_default();
    if first.is_alphanumeric()
        || first.is_whitespace()
        || !first_line.trim_matches(first).trim().is_empty()
    {
        text.to_string()
    } else {
        stripped.trim_start_matches(first).to_string()
    }
}

/// Splits text into lines, keeping each line's terminator.
///
/// `\r\n`, `\r` and `\n` all end a line.
#[must_use]
pub fn split_lines_keep_ends(text: &str) -> Vec<&str> {
    let bytes = text.as_bytes();
    let mut lines = Vec::new();
    let mut start = 0;
    let mut idx = 0;
    while idx < bytes.len() {
        match bytes[idx] {
            b'\n' => {
                lines.push(&text[start..=idx]);
                start = idx + 1;
            }
            b'\r' => {
                let end = if bytes.get(idx + 1) == Some(&b'\n') {
                    idx + 1
                } else {
                    idx
                };
                lines.push(&text[start..=end]);
                idx = end;
                start = end + 1;
            }
            _ => {}
        }
        idx += 1;
    }
    if start < text.len() {
        lines.push(&text[start..]);
    }
    lines
}

/// Returns the dominant line terminator among `lines`, `"\n"` when there is none.
#[must_use]
pub fn find_newline<S: AsRef<str>>(lines: &[S]) -> &'static str {
    let (mut crlf, mut cr, mut lf) = (0usize, 0usize, 0usize);
    for line in lines {
        let line = line.as_ref();
        if line.ends_with("\r\n") {
            crlf += 1;
        } else if line.ends_with('\r') {
            cr += 1;
        } else if line.ends_with('\n') {
            lf += 1;
        }
    }
    if crlf > lf && crlf >= cr {
        "\r\n"
    } else if cr > lf && cr > crlf {
        "\r"
    } else {
        "\n"
    }
}

/// Replaces the terminator of every line with `newline`.
///
/// ```rust
/// use pydocfmt::strings::normalize_line_endings;
///
/// let fixed = normalize_line_endings(&["a\r\n", "b\r", "c"], "\n");
/// assert_eq!(fixed, "a\nb\nc");
/// ```
#[must_use]
pub fn normalize_line_endings<S: AsRef<str>>(lines: &[S], newline: &str) -> String {
    let mut normalized = String::new();
    for line in lines {
        let line = line.as_ref();
        let stripped = line.trim_end_matches(&['\r', '\n'][..]);
        normalized.push_str(stripped);
        if stripped.len() != line.len() {
            normalized.push_str(newline);
        }
    }
    normalized
}
