//! Docstring Layout Conventions
//!
//! This module documents the layout that `pydocfmt` produces and the inputs it
//! deliberately leaves alone.
//!
//! # Overview
//!
//! The target layout is the one described by PEP 257, with a handful of
//! switches for common house styles. Only string literals in documenting
//! positions are touched: the first statement of a module, class or function,
//! and a bare string directly after an assignment.
//!
//! # Quotes
//!
//! | Input | Output |
//! |-------|--------|
//! | `'''text'''` | `"""Text."""` |
//! | `R'''text'''` | `r"""Text."""` |
//! | `U"""text"""` | `u"""Text."""` |
//! | `''''''` | `""""""` |
//!
//! Single-quoted strings (`'text'`, `"text"`) are never docstring candidates.
//!
//! # One-line Docstrings
//!
//! Contents without a description collapse onto the line of the opening
//! quotes:
//!
//! ```text
//! def foo():
//!     """Hello foo."""
//! ```
//!
//! - The summary is capitalized unless its first word contains `_` or `.`, or
//!   is listed in `non-cap`
//! - A period is appended when the summary ends in a letter, digit or quote
//! - Summaries starting with `#` are left without a period
//! - A summary longer than `wrap-summaries` is wrapped; with
//!   `close-quotes-on-newline` the closing quotes then move to their own line
//! - `make-summary-multi-line` always gives the three-line form
//!
//! # Multi-line Docstrings
//!
//! ```text
//! def f(x):
//!     """Summary line.
//!
//!     Description wrapped at `wrap-descriptions` columns, indented like the
//!     opening quotes.
//!     """
//! ```
//!
//! **Rules**:
//! - Exactly one blank line separates summary and description
//! - The closing quotes sit on their own line at the docstring's indentation
//! - `pre-summary-newline` puts the summary on the line after the quotes
//! - `pre-summary-space` puts a space between the quotes and the summary
//! - `post-description-blank` adds a blank line before the closing quotes
//!
//! The summary ends at the first blank line, at a line starting with `-`, `@`
//! or `)`, or at the end of the first sentence. Abbreviations such as `e.g.`
//! and `i.e.` do not end a sentence.
//!
//! # Descriptions That Are Not Rewrapped
//!
//! A description is reindented but keeps its line breaks when it contains any
//! of:
//!
//! - Bullet (`-`, `*`, `+`) or enumerated (`1.`) lists
//! - Option lists (`--flag  help`)
//! - Literal blocks introduced by `::`
//! - reST directives (`.. note::`) and section headers
//! - Google or NumPy sections (`Args:`, `Parameters\n----------`)
//! - Alembic revision headers
//! - Words longer than 50 characters that are not links
//! - Lines so short relative to their count that the text reads as a list
//!   (disabled by `non-strict`)
//!
//! `force-wrap` wraps anyway.
//!
//! # Field Lists
//!
//! With `style = "sphinx"` (the default) or `style = "epytext"`, field lists
//! are wrapped one field at a time:
//!
//! ```text
//! :param name: The name of the thing, which may run well past the
//!     configured width and so continues on an indented line.
//! :return: Nothing.
//! ```
//!
//! A field that fits stays on one line. Otherwise the name stands alone and the
//! body continues at the docstring indentation plus half of it again (for
//! indents wider than four columns) or twice it. Text before the first field
//! is wrapped as prose. Blank lines between fields are kept.
//!
//! With `style = "google"` or `style = "numpy"` field sections are recognized
//! but never rewrapped.
//!
//! # Links
//!
//! A URL is never split. When a line holding a URL would run past the width,
//! the prose before it is wrapped on its own, the URL goes on a line by itself
//! and the text after it continues below. Recognized enclosures (`<...>`,
//! backticks, reST hyperlink targets) travel with the URL.
//!
//! # Left Unchanged
//!
//! | Condition | Reason |
//! |-----------|--------|
//! | Contents start with `>>>` | Doctest |
//! | Contents contain `"""` | Nested triple quotes |
//! | Contents are a single URL | Link-only docstring |
//! | Summary underlined with `-` or `=` | Section title |
//! | Summary is a list item or directive | Not prose |
//! | File does not tokenize | No partial rewrite |
//! | Outside `range` or `docstring-length` | Filtered |
//!
//! # Blank Lines
//!
//! - Blank lines between a `class`/`def` header (or an assignment) and its
//!   docstring are removed
//! - Blank lines after a class or function docstring are removed; when the
//!   docstring is the whole body, exactly one blank line is kept
//! - Spacing around the module docstring is not changed
//!
//! # Line Endings
//!
//! Input is read with any mix of `\n`, `\r\n` and `\r`; output uses whichever
//! was most common in the input.
