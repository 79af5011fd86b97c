//! Error types for docstring formatting.
//!
//! Most problems the formatter meets are not surfaced as errors at all: a
//! docstring it cannot safely rewrite is passed through unchanged, and a file
//! that fails to tokenize is emitted byte-for-byte. The variants here exist for
//! the fallible inner passes and for the outer surfaces (configuration loading,
//! file I/O) where a caller does want the reason.
//!
//! ## Error Categories
//!
//! - **Literal Errors**: A string token is not a triple-quoted literal
//! - **Tokenize Errors**: Unterminated strings or brackets, with line/column
//! - **Indentation Errors**: A dedent that matches no enclosing block
//! - **Configuration Errors**: Unreadable config files or contradictory options
//! - **I/O Errors**: File reading/writing failures
//!
//! ## Examples
//!
//! ```rust
//! use pydocfmt::strings::strip_docstring;
//! use pydocfmt::Error;
//!
//! let result = strip_docstring("'not a docstring'");
//! assert!(matches!(result, Err(Error::UnsupportedLiteral { .. })));
//! ```

use std::fmt;
use std::path::Path;
use thiserror::Error;

/// Represents all possible errors raised by the formatter's fallible passes.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum Error {
    /// The literal does not open and close with a supported triple quote.
    #[error("Unsupported literal: only triple-quoted (single or double) strings are handled: {literal}")]
    UnsupportedLiteral { literal: String },

    /// The tokenizer could not finish a string or bracketed statement.
    #[error("Tokenize error at line {line}, column {col}: {msg}")]
    Tokenize { line: usize, col: usize, msg: String },

    /// Dedent to a column that matches no enclosing indentation level.
    #[error("Indentation error at line {line}: {msg}")]
    Indentation { line: usize, msg: String },

    /// A configuration file could not be read or parsed.
    #[error("Configuration error in {path}: {msg}")]
    Config { path: String, msg: String },

    /// Option values contradict each other.
    #[error("Invalid option: {0}")]
    InvalidOption(String),

    /// IO error during reading or writing
    #[error("IO error on {path}: {msg}")]
    Io { path: String, msg: String },
}

impl Error {
    /// Creates an unsupported-literal error, keeping a short prefix of the literal.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use pydocfmt::Error;
    ///
    /// let err = Error::unsupported_literal("'x'");
    /// assert!(err.to_string().contains("'x'"));
    /// ```
    pub fn unsupported_literal(literal: &str) -> Self {
        let literal: String = literal.chars().take(40).collect();
        Error::UnsupportedLiteral { literal }
    }

    /// Creates a tokenize error with line and column information.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use pydocfmt::Error;
    ///
    /// let err = Error::tokenize(3, 4, "EOF in multi-line string");
    /// assert!(err.to_string().contains("line 3"));
    /// ```
    pub fn tokenize(line: usize, col: usize, msg: &str) -> Self {
        Error::Tokenize {
            line,
            col,
            msg: msg.to_string(),
        }
    }

    pub fn indentation(line: usize, msg: &str) -> Self {
        Error::Indentation {
            line,
            msg: msg.to_string(),
        }
    }

    /// Creates a configuration error for the file at `path`.
    pub fn config<T: fmt::Display>(path: &Path, msg: T) -> Self {
        Error::Config {
            path: path.display().to_string(),
            msg: msg.to_string(),
        }
    }

    pub fn invalid_option<T: fmt::Display>(msg: T) -> Self {
        Error::InvalidOption(msg.to_string())
    }

    /// Creates an I/O error for file reading/writing failures.
    pub fn io<T: fmt::Display>(path: &Path, msg: T) -> Self {
        Error::Io {
            path: path.display().to_string(),
            msg: msg.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
