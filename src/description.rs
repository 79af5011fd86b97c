//! Description wrapping.
//!
//! A description is re-wrapped paragraph by paragraph unless it contains
//! something that re-flowing would damage: doctests, directives, lists, or
//! long code-like tokens. URLs and field lists get their own treatment in
//! [`crate::urls`] and [`crate::fields`].

use crate::fields::wrap_field_lists;
use crate::options::DocstringStyle;
use crate::patterns::{find_fields, find_urls, has_directive, is_code_like, is_type_of_list};
use crate::strings::{reindent, strip_leading_blank_lines};
use crate::urls::wrap_urls;
use crate::wrap::fill_lines;
use std::ops::Range;
use tracing::trace;

/// Settings for [`wrap_description`].
#[derive(Clone, Copy, Debug)]
pub struct DescriptionOptions {
    pub width: usize,
    pub force_wrap: bool,
    pub non_strict: bool,
    pub style: DocstringStyle,
}

/// Wraps each blank-line separated paragraph of `text`.
///
/// Paragraphs are dedented, filled to `width` and indented with `indent`. A
/// blank line follows every non-empty paragraph; the one after the final
/// paragraph is kept only when `text` itself ends in a paragraph break.
///
/// ```rust
/// use pydocfmt::description::description_to_list;
///
/// let lines = description_to_list("one two\n\nthree", "  ", 72);
/// assert_eq!(lines, vec!["  one two", "", "  three"]);
/// ```
#[must_use]
pub fn description_to_list(text: &str, indent: &str, width: usize) -> Vec<String> {
    if !text.contains("\n\n") {
        return fill_lines(&textwrap::dedent(text), width, indent, indent);
    }

    let mut lines = Vec::new();
    for paragraph in text.split("\n\n") {
        let wrapped = fill_lines(&textwrap::dedent(paragraph), width, indent, indent);
        if !wrapped.is_empty() {
            lines.extend(wrapped);
            lines.push(String::new());
        } else if paragraph.is_empty() {
            lines.push(String::new());
        }
    }

    let ends_with_break = text.trim_end_matches(&[' ', '\t'][..]).ends_with("\n\n");
    if !ends_with_break && lines.last().is_some_and(String::is_empty) {
        lines.pop();
    }
    lines
}

/// Re-indents whatever follows the last URL or field.
///
/// Non-blank lines become `indent` plus the stripped line; blank lines stay
/// blank. The text is not re-filled.
#[must_use]
pub fn close_description(text: &str, text_idx: usize, indent: &str) -> Vec<String> {
    let rest = text.get(text_idx..).unwrap_or_default();
    let rest = rest.strip_prefix('\n').unwrap_or(rest);
    rest.lines()
        .map(|line| {
            if line.trim().is_empty() {
                String::new()
            } else {
                format!("{indent}{}", line.trim())
            }
        })
        .collect()
}

fn overlaps(a: &Range<usize>, b: &Range<usize>) -> bool {
    a.start < b.end && b.start < a.end
}

/// Splits a reindented description into output lines.
///
/// Plain prose goes through [`description_to_list`]. When the text holds URLs
/// or wrappable field lists, the text up to each overlong URL is filled and the
/// URL placed on its own line, then field lists are wrapped one field at a
/// time. URLs inside a field entry are left to the field wrapper.
#[must_use]
pub fn split_description(text: &str, indent: &str, width: usize, style: DocstringStyle) -> Vec<String> {
    let (fields, wraps_fields) = find_fields(text, style);
    let fields = if wraps_fields { fields } else { Vec::new() };
    let entries: Vec<Range<usize>> = fields
        .iter()
        .enumerate()
        .map(|(idx, field)| field.start..fields.get(idx + 1).map_or(text.len(), |next| next.start))
        .collect();

    let urls: Vec<_> = find_urls(text)
        .into_iter()
        .filter(|url| !url.skippable)
        .filter(|url| !entries.iter().any(|entry| overlaps(&url.range, entry)))
        .collect();

    if urls.is_empty() && fields.is_empty() {
        return description_to_list(text, indent, width);
    }

    trace!(urls = urls.len(), fields = fields.len(), "splitting description");
    let (mut lines, text_idx) = if urls.is_empty() {
        (Vec::new(), 0)
    } else {
        wrap_urls(text, &urls, 0, indent, width)
    };

    if fields.is_empty() {
        lines.extend(close_description(text, text_idx, indent));
    } else {
        lines = wrap_field_lists(text, &fields, lines, text_idx, indent, width);
    }
    lines
}

/// Wraps a docstring description.
///
/// Descriptions with doctests are returned as they are. Otherwise the text is
/// reindented, and re-flowed unless it holds lists, directives or code (all of
/// which `force_wrap` overrides). A `width` of zero only reindents.
#[must_use]
pub fn wrap_description(text: &str, indent: &str, options: DescriptionOptions) -> String {
    let text = strip_leading_blank_lines(text);
    if text.contains(">>>") {
        return text;
    }

    let text = reindent(&text, indent).trim_end().to_string();
    if options.width == 0
        || (!options.force_wrap
            && (is_code_like(&text)
                || has_directive(&text)
                || is_type_of_list(&text, options.non_strict, options.style)))
    {
        return text;
    }

    let lines = split_description(&text, indent, options.width, options.style);
    format!("{indent}{}", lines.join("\n").trim())
}
