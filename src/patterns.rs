//! Pattern recognizers for docstring markup.
//!
//! Every recognizer is a pure predicate over a line or a block of text.
//! Whether a segment matches decides whether the wrapper may touch it: lists,
//! field lists, section headers, literal blocks and directives are preserved,
//! while prose paragraphs are re-filled.
//!
//! Line-level recognition is exposed through [`classify_line`], which returns
//! one [`LineKind`] per line so callers can match on the variant instead of
//! re-running individual regexes.
//!
//! ```rust
//! use pydocfmt::patterns::{classify_line, LineKind};
//!
//! assert_eq!(classify_line("    - first item"), LineKind::Bullet);
//! assert_eq!(classify_line("    1. first step"), LineKind::Enumerated);
//! assert_eq!(classify_line(":param x: the x value"), LineKind::Sphinx);
//! assert_eq!(classify_line("Just some words."), LineKind::Prose);
//! ```

use crate::options::DocstringStyle;
use once_cell::sync::Lazy;
use regex::Regex;
use std::ops::Range;

/// Aspect ratio (lines / longest line) above which a block is treated as a list.
pub const HEURISTIC_MIN_LIST_ASPECT_RATIO: f64 = 0.4;

/// Words longer than this that are not URLs mark a block as code.
pub const CODE_WORD_MIN_LENGTH: usize = 50;

/// URL schemes recognized inside descriptions.
pub const URL_SCHEMES: &[&str] = &[
    "afp", "apt", "bitcoin", "chrome", "cvs", "dav", "dns", "file", "finger", "fish", "ftp",
    "ftps", "git", "http", "https", "imap", "ipp", "ipps", "irc", "irc6", "ircs", "jar", "ldap",
    "ldaps", "mailto", "news", "nfs", "nntp", "pop", "rsync", "s3", "sftp", "shttp", "sip",
    "sips", "smb", "sms", "snmp", "ssh", "svn", "telnet", "vnc", "xmpp", "xri",
];

/// Field names that open a Sphinx field list entry.
pub const SPHINX_FIELDS: &[&str] = &[
    "arg", "cvar", "except", "ivar", "key", "meta", "param", "raise", "return", "rtype", "type",
    "var", "yield",
];

/// Section names that NumPy-style docstrings underline.
pub const NUMPY_SECTIONS: &[&str] = &[
    "Parameters",
    "Returns",
    "Raises",
    "Yields",
    "Warns",
    "Warnings",
    "Receives",
    "Other Parameters",
    "See Also",
    "Notes",
    "Examples",
    "References",
];

/// Adornment characters allowed in reST section over- and underlines.
pub const REST_ADORNMENTS: &[char] = &[
    '#', '*', '=', '-', '^', '\'', '"', '+', '_', '~', '`', '.', ':',
];

fn compile(pattern: &str) -> Regex {
    Regex::new(pattern).unwrap_or_else(|err| panic!("invalid regex literal {pattern}: {err}"))
}

fn alternation(words: &[&str]) -> String {
    words.join("|")
}

static BULLET_RE: Lazy<Regex> = Lazy::new(|| compile(r"^\s*[*\-+] [\S ]+"));
static ENUM_RE: Lazy<Regex> = Lazy::new(|| compile(r"^\s*\d+\."));
static OPTION_RE: Lazy<Regex> = Lazy::new(|| compile(r"^\s*-{1,2}[\w\-]+(?:[= ][\w\-<>\[\]]+)? {2,}\S"));
static LITERAL_RE: Lazy<Regex> = Lazy::new(|| compile(r"^[\S ]*::\s*$"));
static ALEMBIC_RE: Lazy<Regex> = Lazy::new(|| compile(r"^\s*(?:Revision ID|Revises|Create Date):"));
static GOOGLE_RE: Lazy<Regex> = Lazy::new(|| compile(r"^ *[A-Za-z0-9_\- ]+:$"));
static NUMPY_FIELD_RE: Lazy<Regex> = Lazy::new(|| compile(r"^\s[A-Za-z0-9_\- ]+ ?: \S"));
static EPYTEXT_LINE_RE: Lazy<Regex> = Lazy::new(|| compile(r"^\s*@[A-Za-z0-9_\- ]*:"));
static EPYTEXT_FIELD_RE: Lazy<Regex> = Lazy::new(|| compile(r"(?m)^[ \t]*(@[A-Za-z0-9_\- ]*:)"));
static SPHINX_LINE_RE: Lazy<Regex> = Lazy::new(|| {
    compile(&format!(
        r"^\s*:(?:{})[A-Za-z0-9_\-*().,\[\] ]*:",
        alternation(SPHINX_FIELDS)
    ))
});
static SPHINX_FIELD_RE: Lazy<Regex> = Lazy::new(|| {
    compile(&format!(
        r"(?m)^[ \t]*(:(?:{})[A-Za-z0-9_\-*().,\[\] ]*:)",
        alternation(SPHINX_FIELDS)
    ))
});
static SPHINX_XREF_RE: Lazy<Regex> = Lazy::new(|| compile(r"^:\w+:"));
static USER_DASH_RE: Lazy<Regex> = Lazy::new(|| compile(r"^[\S ]+ - \S+"));
static USER_DOUBLE_DASH_RE: Lazy<Regex> = Lazy::new(|| compile(r"^\s*\S+\s+--\s+"));
static USER_AT_RE: Lazy<Regex> = Lazy::new(|| compile(r"^ *@[A-Za-z0-9_\- ]*[^:\n]*$"));
static INLINE_MATH_RE: Lazy<Regex> = Lazy::new(|| compile(r"^ *\w *:[A-Za-z0-9_\- ]*:"));
static DIRECTIVE_RE: Lazy<Regex> =
    Lazy::new(|| compile(r"(?:\.{2}|`{2}) ?[\w.~\-]+(?::{2}|`{2})?[\w ]*?|`[\w.~]+`"));
static SECTION_ADORNMENT_RE: Lazy<Regex> = Lazy::new(|| {
    let runs: Vec<String> = REST_ADORNMENTS
        .iter()
        .map(|c| format!("{}{{4,}}", regex::escape(&c.to_string())))
        .collect();
    compile(&format!(r"^\s*(?:{})\s*$", runs.join("|")))
});
static URL_RE: Lazy<Regex> = Lazy::new(|| {
    compile(&format!(
        concat!(
            r"(?:__ |``|`\w[\w :#\n]*[\w.|\\ _?\[:]+|\.\. _[\w. :\-]+|')?",
            r"<?(?:{}):(?://)?\S*>?"
        ),
        alternation(URL_SCHEMES)
    ))
});
static URL_SKIP_RE: Lazy<Regex> = Lazy::new(|| {
    compile(&format!(r"(?:{}):/{{0,3}}(?: |>|$)", alternation(URL_SCHEMES)))
});

/// Classification of a single description line.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LineKind {
    /// `* item`, `- item` or `+ item`.
    Bullet,
    /// `1. item`.
    Enumerated,
    /// `-a  description` or `--flag  description`.
    Option,
    /// A paragraph ending in `::`.
    LiteralBlock,
    /// `:param x: body`.
    Sphinx,
    /// `@param x: body`.
    Epytext,
    /// ` name : type`.
    NumpyField,
    /// `Args:`.
    GoogleHeader,
    /// A row of reST adornment characters.
    SectionAdornment,
    /// `Revision ID: ...` and friends.
    Alembic,
    /// `term - body`, `term -- body` or `@term body`.
    UserField,
    /// `c :math:...`.
    InlineMath,
    /// A line that starts with a URL.
    Url,
    /// Prose that may be re-wrapped.
    Prose,
}

impl LineKind {
    /// Whether lines of this kind make the surrounding block list-like.
    #[must_use]
    pub const fn is_list_like(&self) -> bool {
        !matches!(self, LineKind::Url | LineKind::Prose)
    }
}

/// Classifies one line of description text.
///
/// The first matching recognizer wins; a line that matches nothing is
/// [`LineKind::Prose`].
#[must_use]
pub fn classify_line(line: &str) -> LineKind {
    if is_section_adornment(line) {
        LineKind::SectionAdornment
    } else if is_sphinx_field(line) {
        LineKind::Sphinx
    } else if is_epytext_field(line) {
        LineKind::Epytext
    } else if is_alembic_header(line) {
        LineKind::Alembic
    } else if is_option(line) {
        LineKind::Option
    } else if is_bullet(line) {
        LineKind::Bullet
    } else if is_enumerated(line) {
        LineKind::Enumerated
    } else if is_literal_block(line) {
        LineKind::LiteralBlock
    } else if is_google_header(line) {
        LineKind::GoogleHeader
    } else if is_numpy_field(line) {
        LineKind::NumpyField
    } else if starts_with_url(line) {
        LineKind::Url
    } else if is_inline_math(line) {
        LineKind::InlineMath
    } else if is_user_field(line) {
        LineKind::UserField
    } else {
        LineKind::Prose
    }
}

#[must_use]
pub fn is_bullet(line: &str) -> bool {
    BULLET_RE.is_match(line)
}

#[must_use]
pub fn is_enumerated(line: &str) -> bool {
    ENUM_RE.is_match(line)
}

#[must_use]
pub fn is_option(line: &str) -> bool {
    OPTION_RE.is_match(line)
}

#[must_use]
pub fn is_literal_block(line: &str) -> bool {
    LITERAL_RE.is_match(line)
}

#[must_use]
pub fn is_alembic_header(line: &str) -> bool {
    ALEMBIC_RE.is_match(line)
}

#[must_use]
pub fn is_google_header(line: &str) -> bool {
    GOOGLE_RE.is_match(line)
}

#[must_use]
pub fn is_numpy_field(line: &str) -> bool {
    NUMPY_FIELD_RE.is_match(line)
}

#[must_use]
pub fn is_sphinx_field(line: &str) -> bool {
    SPHINX_LINE_RE.is_match(line)
}

#[must_use]
pub fn is_epytext_field(line: &str) -> bool {
    EPYTEXT_LINE_RE.is_match(line)
}

/// `term - body`, `term -- body` and `@term body` forms.
#[must_use]
pub fn is_user_field(line: &str) -> bool {
    USER_DASH_RE.is_match(line) || USER_DOUBLE_DASH_RE.is_match(line) || USER_AT_RE.is_match(line)
}

#[must_use]
pub fn is_inline_math(line: &str) -> bool {
    INLINE_MATH_RE.is_match(line)
}

/// A whole line of one repeated reST adornment character, at least four long.
#[must_use]
pub fn is_section_adornment(line: &str) -> bool {
    SECTION_ADORNMENT_RE.is_match(line)
}

/// A NumPy section name followed by a `-` or `=` rule at least as long.
///
/// # Examples
///
/// ```rust
/// use pydocfmt::patterns::is_numpy_section_header;
///
/// assert!(is_numpy_section_header("Parameters", "----------"));
/// assert!(!is_numpy_section_header("Parameters", "---"));
/// assert!(!is_numpy_section_header("Arguments", "---------"));
/// ```
#[must_use]
pub fn is_numpy_section_header(line: &str, next: &str) -> bool {
    let title = line.trim();
    let rule = next.trim();
    NUMPY_SECTIONS.contains(&title)
        && !rule.is_empty()
        && rule.len() >= title.len()
        && (rule.chars().all(|c| c == '-') || rule.chars().all(|c| c == '='))
}

/// Whether any line of `text` is a reST section header (over- or underline).
#[must_use]
pub fn has_section_header(text: &str) -> bool {
    text.lines().any(is_section_adornment)
}

/// Whether any consecutive pair of lines forms a NumPy section header.
#[must_use]
pub fn has_numpy_section_header(text: &str) -> bool {
    let lines: Vec<&str> = text.lines().collect();
    lines
        .windows(2)
        .any(|pair| is_numpy_section_header(pair[0], pair[1]))
}

/// Whether the text contains a reST directive, role or inline literal.
#[must_use]
pub fn has_directive(text: &str) -> bool {
    DIRECTIVE_RE.is_match(text)
}

/// Whether `line` starts a new sentence or a parameter-like entry.
///
/// Sphinx cross references such as `:class:` are not sentence starts.
#[must_use]
pub fn is_probable_sentence_start(line: &str) -> bool {
    let stripped = line.trim();
    stripped.starts_with(&['-', '@', ')'][..]) && !SPHINX_XREF_RE.is_match(stripped)
}

/// Whether the text contains a long, non-URL token that is most likely code.
#[must_use]
pub fn is_code_like(text: &str) -> bool {
    text.split_whitespace().any(|word| {
        word.chars().count() > CODE_WORD_MIN_LENGTH
            && !URL_RE.find(word).is_some_and(|m| m.start() == 0)
    })
}

/// Whether the block looks like a list by shape alone.
///
/// Many short lines relative to the longest one usually means a list of
/// items rather than a paragraph.
#[must_use]
pub fn is_heuristic_list(text: &str) -> bool {
    let lines: Vec<&str> = text.trim_end().lines().collect();
    let longest = lines
        .iter()
        .map(|line| line.trim().chars().count())
        .max()
        .unwrap_or(0)
        .max(1);
    lines.len() as f64 / longest as f64 > HEURISTIC_MIN_LIST_ASPECT_RATIO
}

/// Whether the text holds field lists that `style` knows how to wrap.
#[must_use]
pub fn is_field_list(text: &str, style: DocstringStyle) -> bool {
    let lines = text.trim_end().lines();
    match style {
        DocstringStyle::Sphinx => lines.into_iter().any(is_sphinx_field),
        DocstringStyle::Epytext => lines.into_iter().any(is_epytext_field),
        DocstringStyle::Numpy | DocstringStyle::Google => false,
    }
}

/// Whether the text is some sort of list that must not be re-wrapped.
///
/// Field lists of the selected `style` are wrappable and therefore do not
/// count, unless the shape heuristic already fired. When such a field list is
/// present only the text ahead of the first field is inspected.
#[must_use]
pub fn is_type_of_list(text: &str, non_strict: bool, style: DocstringStyle) -> bool {
    if !non_strict && is_heuristic_list(text) {
        return true;
    }
    if is_field_list(text, style) {
        let (fields, _) = find_fields(text, style);
        let intro = fields.first().map_or(text, |field| &text[..field.start]);
        return intro
            .trim_end()
            .lines()
            .any(|line| classify_line(line).is_list_like());
    }
    has_numpy_section_header(text)
        || text
            .trim_end()
            .lines()
            .any(|line| classify_line(line).is_list_like())
}

/// A URL occurrence in a description.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct UrlSpan {
    /// Byte range including any enclosing markup.
    pub range: Range<usize>,
    /// Only scheme and separator, no host: treat as plain text.
    pub skippable: bool,
}

/// Finds every URL in `text`, including enclosing `<>`, backticks, quotes,
/// trailing `__` and leading link-target markup.
///
/// # Examples
///
/// ```rust
/// use pydocfmt::patterns::find_urls;
///
/// let text = "See <https://example.com/a> or http: for details.";
/// let urls = find_urls(text);
/// assert_eq!(&text[urls[0].range.clone()], "<https://example.com/a>");
/// assert!(!urls[0].skippable);
/// assert!(urls[1].skippable);
/// ```
#[must_use]
pub fn find_urls(text: &str) -> Vec<UrlSpan> {
    URL_RE
        .find_iter(text)
        .map(|m| UrlSpan {
            range: m.range(),
            skippable: URL_SKIP_RE.is_match(m.as_str()),
        })
        .collect()
}

/// Whether the line begins (after indentation) with a URL.
#[must_use]
pub fn starts_with_url(line: &str) -> bool {
    let trimmed = line.trim_start();
    URL_RE
        .find(trimmed)
        .is_some_and(|m| m.start() == 0 && !URL_SKIP_RE.is_match(m.as_str()))
}

/// Finds field-list names for `style`.
///
/// Returns the byte range of each field name (for example `:param x:`) and
/// whether the style allows wrapping field bodies. Section-based styles return
/// no spans.
#[must_use]
pub fn find_fields(text: &str, style: DocstringStyle) -> (Vec<Range<usize>>, bool) {
    let regex = match style {
        DocstringStyle::Sphinx => &*SPHINX_FIELD_RE,
        DocstringStyle::Epytext => &*EPYTEXT_FIELD_RE,
        DocstringStyle::Numpy | DocstringStyle::Google => return (Vec::new(), false),
    };
    let spans = regex
        .captures_iter(text)
        .filter_map(|caps| caps.get(1).map(|m| m.range()))
        .collect();
    (spans, true)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bullets_and_enumerations() {
        assert!(is_bullet("* item"));
        assert!(is_bullet("    + item"));
        assert!(!is_bullet("-item"));
        assert!(is_enumerated("  12. twelfth"));
        assert!(!is_enumerated("version 1.2"));
    }

    #[test]
    fn test_option_list() {
        assert!(is_option("-a  all the things"));
        assert!(is_option("    --verbose  be chatty"));
        assert!(is_option("--output=FILE   write here"));
        assert!(!is_option("-a single space"));
    }

    #[test]
    fn test_literal_block_and_alembic() {
        assert!(is_literal_block("Example::"));
        assert!(is_literal_block("    Run the following::  "));
        assert!(!is_literal_block("a :: in the middle"));
        assert!(is_alembic_header("Revision ID: 1234abcd"));
        assert!(is_alembic_header("Create Date: 2020-01-01"));
        assert!(!is_alembic_header("Note: something"));
    }

    #[test]
    fn test_section_headers() {
        assert!(is_section_adornment("======"));
        assert!(is_section_adornment("    ~~~~"));
        assert!(!is_section_adornment("==="));
        assert!(!is_section_adornment("=-=-"));
        assert!(has_numpy_section_header("Returns\n-------\nint"));
        assert!(has_numpy_section_header("See Also\n========"));
    }

    #[test]
    fn test_field_list_recognizers() {
        assert!(is_sphinx_field(":param x: the x"));
        assert!(is_sphinx_field("    :returns: nothing"));
        assert!(is_sphinx_field(":raises ValueError: when bad"));
        assert!(!is_sphinx_field(":class:`Foo` is used"));
        assert!(is_epytext_field("@param x: the x"));
        assert!(is_google_header("Args:"));
        assert!(is_google_header("    Other Parameters:"));
        assert!(is_numpy_field(" x : int"));
        assert!(is_user_field("term - body"));
        assert!(is_user_field("term -- body"));
        assert!(is_user_field("@term body"));
        assert!(is_inline_math("   c :math:`[0, 1]`"));
    }

    #[test]
    fn test_classify_line_order() {
        assert_eq!(classify_line("----"), LineKind::SectionAdornment);
        assert_eq!(classify_line("- item"), LineKind::Bullet);
        assert_eq!(classify_line("https://example.com"), LineKind::Url);
        assert_eq!(classify_line("Revision ID: abc"), LineKind::Alembic);
        assert_eq!(classify_line("Args:"), LineKind::GoogleHeader);
    }

    #[test]
    fn test_directives() {
        assert!(has_directive(".. note:: something"));
        assert!(has_directive("use ``foo()`` here"));
        assert!(has_directive("the `bar` role"));
        assert!(!has_directive("plain text only"));
    }

    #[test]
    fn test_probable_sentence_start() {
        assert!(is_probable_sentence_start("   - item"));
        assert!(is_probable_sentence_start("@param x"));
        assert!(is_probable_sentence_start(") closing"));
        assert!(!is_probable_sentence_start("plain"));
        assert!(!is_probable_sentence_start(":class: ref"));
    }

    #[test]
    fn test_code_like() {
        let long = "a".repeat(51);
        assert!(is_code_like(&format!("call {long} now")));
        let url = format!("https://example.com/{long}");
        assert!(!is_code_like(&format!("see {url}")));
        assert!(!is_code_like("short words only"));
    }

    #[test]
    fn test_heuristic_list() {
        assert!(is_heuristic_list("a\nb\nc"));
        assert!(!is_heuristic_list(
            "This is a long line of regular prose text.\nAnd another one."
        ));
        assert!(!is_heuristic_list(""));
    }

    #[test]
    fn test_type_of_list_respects_style() {
        let text = "    :param x: the first value of the function.\n    :return: the result value of it.";
        assert!(!is_type_of_list(text, false, DocstringStyle::Sphinx));
        assert!(is_type_of_list(text, false, DocstringStyle::Google));

        let google = "    Args:\n        x: the first value of the function, which matters.";
        assert!(is_type_of_list(google, false, DocstringStyle::Sphinx));

        let bullets_then_fields = "    Options here are the following ones:\n    - first choice of many\n    - second choice of many\n    :param x: the first value of the function.";
        assert!(is_type_of_list(bullets_then_fields, true, DocstringStyle::Sphinx));
    }

    #[test]
    fn test_find_urls_with_enclosures() {
        let text = "Read `the docs <https://docs.example.com/>`_ please.";
        let urls = find_urls(text);
        assert_eq!(urls.len(), 1);
        assert_eq!(
            &text[urls[0].range.clone()],
            "`the docs <https://docs.example.com/>`_"
        );

        let text = ".. _target: http://example.com/x";
        let urls = find_urls(text);
        assert_eq!(&text[urls[0].range.clone()], text);

        let text = "a digit: 5";
        let urls = find_urls(text);
        assert!(urls.iter().all(|u| u.skippable));
    }

    #[test]
    fn test_find_fields() {
        let text = "Intro.\n    :param x: first\n    :return: second";
        let (spans, wrap) = find_fields(text, DocstringStyle::Sphinx);
        assert!(wrap);
        let names: Vec<&str> = spans.iter().map(|r| &text[r.clone()]).collect();
        assert_eq!(names, vec![":param x:", ":return:"]);

        let (spans, wrap) = find_fields(text, DocstringStyle::Numpy);
        assert!(spans.is_empty());
        assert!(!wrap);
    }
}
