//! Formatting of a single docstring literal.
//!
//! [`DocstringFormatter::format`] is total: anything it cannot rewrite safely
//! comes back byte-for-byte, with the reason logged at debug level.

use crate::description::{wrap_description, DescriptionOptions};
use crate::options::FormatOptions;
use crate::patterns::{find_urls, has_directive, is_type_of_list};
use crate::strings::{
    normalize_summary, remove_section_header, split_summary_and_description, strip_docstring,
    TRIPLE_DOUBLE,
};
use crate::wrap::wrap_summary;
use tracing::debug;

/// Formats docstring literals according to a set of [`FormatOptions`].
///
/// # Examples
///
/// ```rust
/// use pydocfmt::{DocstringFormatter, FormatOptions};
///
/// let options = FormatOptions::new();
/// let formatter = DocstringFormatter::new(&options);
/// assert_eq!(formatter.format("    ", "'''  hello world  '''"), "\"\"\"Hello world.\"\"\"");
/// ```
#[derive(Clone, Copy, Debug)]
pub struct DocstringFormatter<'a> {
    options: &'a FormatOptions,
}

/// Whether the summary line is underlined like a reST section title.
fn is_underlined_summary(contents: &str) -> bool {
    let mut lines = contents.lines();
    let (Some(title), Some(underline)) = (lines.next(), lines.next()) else {
        return false;
    };
    let title = title.trim();
    let underline = underline.trim();
    !title.is_empty()
        && underline.chars().count() >= title.chars().count()
        && (underline.chars().all(|c| c == '-') || underline.chars().all(|c| c == '='))
}

impl<'a> DocstringFormatter<'a> {
    pub fn new(options: &'a FormatOptions) -> Self {
        DocstringFormatter { options }
    }

    fn description_options(&self, width: usize) -> DescriptionOptions {
        DescriptionOptions {
            width,
            force_wrap: self.options.force_wrap,
            non_strict: self.options.non_strict,
            style: self.options.style,
        }
    }

    /// Formats `docstring`, a complete literal including its quotes.
    ///
    /// `indent` is the whitespace that precedes the literal on its line. The
    /// returned literal carries no leading indentation and no trailing newline.
    #[must_use]
    pub fn format(&self, indent: &str, docstring: &str) -> String {
        let options = self.options;
        let (contents, quote) = match strip_docstring(docstring) {
            Ok(stripped) => stripped,
            Err(err) => {
                debug!(%err, "leaving literal unchanged");
                return docstring.to_string();
            }
        };

        if contents.is_empty() {
            return format!("{quote}{TRIPLE_DOUBLE}");
        }
        if contents.contains(TRIPLE_DOUBLE) {
            debug!("docstring contains nested triple quotes");
            return docstring.to_string();
        }
        if contents.trim_start().starts_with(">>>") {
            debug!("docstring starts with a doctest");
            return docstring.to_string();
        }
        if find_urls(&contents)
            .first()
            .is_some_and(|url| url.range == (0..contents.len()))
        {
            debug!("docstring is a lone link");
            return docstring.to_string();
        }
        if is_underlined_summary(&contents) {
            debug!("summary is a section title");
            return docstring.to_string();
        }

        let (summary, description) = split_summary_and_description(&contents, &options.abbreviations);

        if remove_section_header(&description).trim() != description.trim() {
            debug!("description starts with a section adornment");
            return docstring.to_string();
        }
        if !options.force_wrap
            && (is_type_of_list(&summary, options.non_strict, options.style) || has_directive(&summary))
        {
            debug!("summary is list-like or holds a directive");
            return docstring.to_string();
        }

        let open_quote = if options.pre_summary_space && !options.pre_summary_newline {
            format!("{quote} ")
        } else {
            quote
        };

        let compensation = indent.matches('\t').count() * options.tab_width.saturating_sub(1);
        let summary_width = if options.wrap_summaries == 0 {
            0
        } else {
            options.wrap_summaries.saturating_sub(compensation)
        };
        let description_width = if options.wrap_descriptions == 0 {
            0
        } else {
            options.wrap_descriptions.saturating_sub(compensation)
        };

        let summary = normalize_summary(&summary, &options.non_cap);

        if !description.is_empty() {
            let (initial_indent, pre_summary) = if options.pre_summary_newline {
                (indent.to_string(), format!("\n{indent}"))
            } else {
                (format!("{indent}   "), String::new())
            };
            let summary = wrap_summary(&summary, &initial_indent, indent, summary_width);
            let description = wrap_description(&description, indent, self.description_options(description_width));
            let post_description = if options.post_description_blank { "\n" } else { "" };
            return format!(
                "{open_quote}{pre_summary}{summary}\n\n{description}{post_description}\n{indent}{TRIPLE_DOUBLE}"
            );
        }

        if options.make_summary_multi_line {
            let summary = wrap_summary(&summary, indent, indent, summary_width);
            return format!("{open_quote}\n{indent}{summary}\n{indent}{TRIPLE_DOUBLE}");
        }

        let one_line = wrap_summary(
            &format!("{open_quote}{summary}{TRIPLE_DOUBLE}"),
            indent,
            indent,
            summary_width,
        );
        if options.close_quotes_on_newline && one_line.contains('\n') {
            let body = one_line.strip_suffix(TRIPLE_DOUBLE).unwrap_or(&one_line);
            return format!("{body}\n{indent}{TRIPLE_DOUBLE}");
        }
        one_line
    }
}
