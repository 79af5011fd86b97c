//! Configuration options for docstring formatting.
//!
//! This module provides types to customize how docstrings are rewritten:
//!
//! - [`FormatOptions`]: Main configuration struct
//! - [`DocstringStyle`]: Which field-list convention is wrapped (sphinx, epytext, numpy, google)
//! - [`LineRange`]: Inclusive, 1-indexed row ranges for `--range` and `--docstring-length`
//!
//! ## Examples
//!
//! ```rust
//! use pydocfmt::{format_str_with_options, DocstringStyle, FormatOptions};
//!
//! let source = "def foo():\n    '''\n    hello foo\n    '''\n";
//!
//! // Black-compatible widths with a space after the opening quotes
//! let options = FormatOptions::black();
//! let formatted = format_str_with_options(source, &options);
//! assert_eq!(formatted, "def foo():\n    \"\"\" Hello foo.\"\"\"\n");
//!
//! // Wrap Epytext field lists instead of Sphinx ones
//! let options = FormatOptions::new().with_style(DocstringStyle::Epytext);
//! assert_eq!(options.style, DocstringStyle::Epytext);
//! ```

use crate::{Error, Result};
use std::fmt;
use std::str::FromStr;

/// Default column limit for summaries.
pub const DEFAULT_WRAP_SUMMARIES: usize = 79;
/// Default column limit for descriptions.
pub const DEFAULT_WRAP_DESCRIPTIONS: usize = 72;
/// Column limit for both summaries and descriptions in black mode.
pub const BLACK_WRAP_LENGTH: usize = 88;

/// Abbreviations that never end the first sentence of a docstring.
pub const DEFAULT_ABBREVIATIONS: &[&str] = &["e.g.", "i.e.", "Dr.", "Mr.", "Mrs.", "Ms.", "et. al.", "etc."];

/// Field-list convention used inside descriptions.
///
/// Only the field lists of the selected style are wrapped. The section-based
/// styles (NumPy and Google) are still recognized as list-like text, but their
/// bodies are never re-wrapped.
///
/// # Examples
///
/// ```rust
/// use pydocfmt::DocstringStyle;
///
/// assert_eq!("numpy".parse::<DocstringStyle>().unwrap(), DocstringStyle::Numpy);
/// assert!(DocstringStyle::Sphinx.wraps_fields());
/// assert!(!DocstringStyle::Google.wraps_fields());
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum DocstringStyle {
    #[default]
    Sphinx,
    Epytext,
    Numpy,
    Google,
}

impl DocstringStyle {
    /// Returns the configuration name of this style.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            DocstringStyle::Sphinx => "sphinx",
            DocstringStyle::Epytext => "epytext",
            DocstringStyle::Numpy => "numpy",
            DocstringStyle::Google => "google",
        }
    }

    /// Whether field bodies of this style may be re-wrapped.
    #[must_use]
    pub const fn wraps_fields(&self) -> bool {
        matches!(self, DocstringStyle::Sphinx | DocstringStyle::Epytext)
    }
}

impl fmt::Display for DocstringStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DocstringStyle {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "sphinx" => Ok(DocstringStyle::Sphinx),
            "epytext" => Ok(DocstringStyle::Epytext),
            "numpy" => Ok(DocstringStyle::Numpy),
            "google" => Ok(DocstringStyle::Google),
            other => Err(Error::invalid_option(format!(
                "unknown docstring style '{other}' (expected sphinx, epytext, numpy or google)"
            ))),
        }
    }
}

/// An inclusive range of 1-indexed rows (or row counts).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct LineRange {
    pub start: usize,
    pub end: usize,
}

impl LineRange {
    #[must_use]
    pub const fn new(start: usize, end: usize) -> Self {
        LineRange { start, end }
    }

    /// Whether `value` falls inside the range.
    #[must_use]
    pub const fn contains(&self, value: usize) -> bool {
        self.start <= value && value <= self.end
    }

    fn validate(&self, name: &str) -> Result<()> {
        if self.start == 0 {
            return Err(Error::invalid_option(format!(
                "{name} values must be positive integers"
            )));
        }
        if self.start > self.end {
            return Err(Error::invalid_option(format!(
                "first value of {name} ({}) must be less than or equal to the second ({})",
                self.start, self.end
            )));
        }
        Ok(())
    }
}

/// Configuration options for docstring formatting.
///
/// Controls wrap widths, quote placement, field-list style and which
/// docstrings are touched at all.
///
/// # Examples
///
/// ```rust
/// use pydocfmt::{FormatOptions, LineRange};
///
/// // Default options
/// let options = FormatOptions::new();
/// assert_eq!(options.wrap_summaries, 79);
///
/// // Custom configuration
/// let options = FormatOptions::new()
///     .with_wrap_summaries(100)
///     .with_pre_summary_newline(true)
///     .with_line_range(LineRange::new(10, 20));
/// assert!(options.validate().is_ok());
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct FormatOptions {
    /// Summary column limit; `0` disables summary wrapping.
    pub wrap_summaries: usize,
    /// Description column limit; `0` disables description wrapping.
    pub wrap_descriptions: usize,
    /// Width of a tab in the indentation, used to compensate the limits.
    pub tab_width: usize,
    pub pre_summary_newline: bool,
    pub pre_summary_space: bool,
    pub post_description_blank: bool,
    pub make_summary_multi_line: bool,
    pub close_quotes_on_newline: bool,
    pub force_wrap: bool,
    pub non_strict: bool,
    pub style: DocstringStyle,
    /// Words whose first letter is never capitalized in a summary.
    pub non_cap: Vec<String>,
    /// Abbreviations that do not terminate the first sentence.
    pub abbreviations: Vec<String>,
    pub black: bool,
    pub line_range: Option<LineRange>,
    pub length_range: Option<LineRange>,
}

impl Default for FormatOptions {
    fn default() -> Self {
        FormatOptions {
            wrap_summaries: DEFAULT_WRAP_SUMMARIES,
            wrap_descriptions: DEFAULT_WRAP_DESCRIPTIONS,
            tab_width: 1,
            pre_summary_newline: false,
            pre_summary_space: false,
            post_description_blank: false,
            make_summary_multi_line: false,
            close_quotes_on_newline: false,
            force_wrap: false,
            non_strict: false,
            style: DocstringStyle::default(),
            non_cap: Vec::new(),
            abbreviations: DEFAULT_ABBREVIATIONS.iter().map(|s| (*s).to_string()).collect(),
            black: false,
            line_range: None,
            length_range: None,
        }
    }
}

impl FormatOptions {
    /// Creates default options (79/72 columns, Sphinx field lists).
    ///
    /// # Examples
    ///
    /// ```rust
    /// use pydocfmt::FormatOptions;
    ///
    /// let options = FormatOptions::new();
    /// assert_eq!(options.wrap_descriptions, 72);
    /// assert!(!options.black);
    /// ```
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates options compatible with the `black` code formatter.
    ///
    /// Both wrap widths become 88 and a space is inserted after the opening
    /// quotes so that a summary starting with a quote does not merge with them.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use pydocfmt::FormatOptions;
    ///
    /// let options = FormatOptions::black();
    /// assert_eq!(options.wrap_summaries, 88);
    /// assert!(options.pre_summary_space);
    /// ```
    #[must_use]
    pub fn black() -> Self {
        Self::default().with_black(true)
    }

    /// Turns black mode on or off.
    ///
    /// Turning it on resets both widths to 88 only when they still hold the
    /// non-black defaults, so explicit widths set earlier survive.
    #[must_use]
    pub fn with_black(mut self, black: bool) -> Self {
        self.black = black;
        if black {
            if self.wrap_summaries == DEFAULT_WRAP_SUMMARIES {
                self.wrap_summaries = BLACK_WRAP_LENGTH;
            }
            if self.wrap_descriptions == DEFAULT_WRAP_DESCRIPTIONS {
                self.wrap_descriptions = BLACK_WRAP_LENGTH;
            }
            self.pre_summary_space = true;
        }
        self
    }

    #[must_use]
    pub fn with_wrap_summaries(mut self, width: usize) -> Self {
        self.wrap_summaries = width;
        self
    }

    #[must_use]
    pub fn with_wrap_descriptions(mut self, width: usize) -> Self {
        self.wrap_descriptions = width;
        self
    }

    #[must_use]
    pub fn with_tab_width(mut self, width: usize) -> Self {
        self.tab_width = width;
        self
    }

    /// Puts the summary on the line after the opening quotes.
    #[must_use]
    pub fn with_pre_summary_newline(mut self, on: bool) -> Self {
        self.pre_summary_newline = on;
        self
    }

    #[must_use]
    pub fn with_pre_summary_space(mut self, on: bool) -> Self {
        self.pre_summary_space = on;
        self
    }

    /// Adds a blank line between the description and the closing quotes.
    #[must_use]
    pub fn with_post_description_blank(mut self, on: bool) -> Self {
        self.post_description_blank = on;
        self
    }

    #[must_use]
    pub fn with_make_summary_multi_line(mut self, on: bool) -> Self {
        self.make_summary_multi_line = on;
        self
    }

    #[must_use]
    pub fn with_close_quotes_on_newline(mut self, on: bool) -> Self {
        self.close_quotes_on_newline = on;
        self
    }

    /// Wraps descriptions even when they look like lists or code.
    #[must_use]
    pub fn with_force_wrap(mut self, on: bool) -> Self {
        self.force_wrap = on;
        self
    }

    /// Disables the aspect-ratio list heuristic.
    #[must_use]
    pub fn with_non_strict(mut self, on: bool) -> Self {
        self.non_strict = on;
        self
    }

    #[must_use]
    pub fn with_style(mut self, style: DocstringStyle) -> Self {
        self.style = style;
        self
    }

    /// Sets the words that must not be capitalized at the start of a summary.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use pydocfmt::{format_str_with_options, FormatOptions};
    ///
    /// let options = FormatOptions::new().with_non_cap(["eBay"]);
    /// let out = format_str_with_options("def f():\n    \"\"\"eBay items\"\"\"\n", &options);
    /// assert_eq!(out, "def f():\n    \"\"\"eBay items.\"\"\"\n");
    /// ```
    #[must_use]
    pub fn with_non_cap<I, S>(mut self, words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.non_cap = words.into_iter().map(Into::into).collect();
        self
    }

    /// Adds abbreviations that must not end the first sentence.
    #[must_use]
    pub fn with_abbreviations<I, S>(mut self, words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.abbreviations.extend(words.into_iter().map(Into::into));
        self
    }

    /// Restricts formatting to docstrings touching rows `range.start..=range.end`.
    #[must_use]
    pub fn with_line_range(mut self, range: LineRange) -> Self {
        self.line_range = Some(range);
        self
    }

    /// Restricts formatting to docstrings spanning between `start` and `end` rows.
    #[must_use]
    pub fn with_length_range(mut self, range: LineRange) -> Self {
        self.length_range = Some(range);
        self
    }

    /// Checks the options for contradictions.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidOption`] when a range starts at zero or its start
    /// exceeds its end, or when the tab width is zero.
    pub fn validate(&self) -> Result<()> {
        if let Some(range) = &self.line_range {
            range.validate("--range")?;
        }
        if let Some(range) = &self.length_range {
            range.validate("--docstring-length")?;
        }
        if self.tab_width == 0 {
            return Err(Error::invalid_option("--tab-width must be at least 1"));
        }
        Ok(())
    }
}
