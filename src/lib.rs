//! # pydocfmt
//!
//! A formatter for the docstrings of Python source files.
//!
//! ## What does it do?
//!
//! `pydocfmt` rewrites module, class, function and attribute docstrings so they
//! follow [PEP 257](https://peps.python.org/pep-0257/): triple double quotes, a
//! capitalized summary ending in a period, one blank line before the
//! description, and the closing quotes on their own line when there is a
//! description. Everything outside the docstrings is left byte-for-byte
//! untouched, apart from blank lines directly around a docstring.
//!
//! ## Key Features
//!
//! - **Conservative**: doctests, nested triple quotes, section titles, lists,
//!   code and reST directives are left alone rather than guessed at
//! - **Field lists**: Sphinx and Epytext parameter lists are wrapped field by
//!   field; Google and NumPy sections are recognized and kept as written
//! - **Links stay whole**: URLs are never split across lines
//! - **Idempotent**: formatting formatted source changes nothing
//!
//! ## Quick Start
//!
//! ```rust
//! use pydocfmt::format_str;
//!
//! let source = "def foo():\n    '''\n    Hello foo\n    '''\n";
//! assert_eq!(format_str(source), "def foo():\n    \"\"\"Hello foo.\"\"\"\n");
//! ```
//!
//! ### Options
//!
//! ```rust
//! use pydocfmt::{format_str_with_options, FormatOptions};
//!
//! let options = FormatOptions::new().with_pre_summary_newline(true);
//! let source = "def f():\n    '''Do it.\n\n    In detail.\n    '''\n";
//! assert_eq!(
//!     format_str_with_options(source, &options),
//!     "def f():\n    \"\"\"\n    Do it.\n\n    In detail.\n    \"\"\"\n"
//! );
//! ```
//!
//! ### A Single Literal
//!
//! ```rust
//! use pydocfmt::{format_docstring, FormatOptions};
//!
//! let literal = format_docstring("    ", "r'''  raw text  '''", &FormatOptions::new());
//! assert_eq!(literal, "r\"\"\"Raw text.\"\"\"");
//! ```
//!
//! ## Failure Handling
//!
//! Formatting never fails outright. Source that does not tokenize comes back
//! unchanged, and so does any docstring that cannot be rewritten safely; the
//! reason is logged through [`tracing`] at debug level.
//! [`Rewriter::try_format_source`] exposes the tokenizer error for callers
//! that want it.
//!
//! See [`conventions`] for the full set of layout rules.

pub mod classify;
pub mod config;
pub mod conventions;
pub mod description;
pub mod docstring;
pub mod driver;
pub mod error;
pub mod fields;
pub mod options;
pub mod patterns;
pub mod rewrite;
pub mod strings;
pub mod tokenize;
pub mod urls;
pub mod wrap;

pub use docstring::DocstringFormatter;
pub use error::{Error, Result};
pub use options::{DocstringStyle, FormatOptions, LineRange};
pub use rewrite::Rewriter;

/// Formats every docstring in `source` with the default options.
///
/// # Examples
///
/// ```rust
/// use pydocfmt::format_str;
///
/// let source = "class A:\n    '''a class'''\n";
/// assert_eq!(format_str(source), "class A:\n    \"\"\"A class.\"\"\"\n");
/// ```
#[must_use]
pub fn format_str(source: &str) -> String {
    format_str_with_options(source, &FormatOptions::default())
}

/// Formats every docstring in `source` with custom options.
///
/// # Examples
///
/// ```rust
/// use pydocfmt::{format_str_with_options, FormatOptions};
///
/// let options = FormatOptions::new().with_make_summary_multi_line(true);
/// let source = "def f():\n    '''Do it.'''\n";
/// assert_eq!(
///     format_str_with_options(source, &options),
///     "def f():\n    \"\"\"\n    Do it.\n    \"\"\"\n"
/// );
/// ```
#[must_use]
pub fn format_str_with_options(source: &str, options: &FormatOptions) -> String {
    Rewriter::new(options).format_source(source)
}

/// Formats one docstring literal, quotes included.
///
/// `indent` is the whitespace that precedes the literal on its line; it is
/// used for continuation lines and the closing quotes.
#[must_use]
pub fn format_docstring(indent: &str, literal: &str, options: &FormatOptions) -> String {
    DocstringFormatter::new(options).format(indent, literal)
}
