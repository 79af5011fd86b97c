//! `pyproject.toml` configuration.
//!
//! Settings live in the `[tool.docformatter]` table with kebab-case keys, the
//! same ones the command line accepts:
//!
//! ```toml
//! [tool.docformatter]
//! wrap-summaries = 88
//! pre-summary-newline = true
//! style = "epytext"
//! non-cap = ["iPhone"]
//! exclude = ["build"]
//! ```
//!
//! Precedence is defaults, then the black preset, then file values, then
//! command-line flags.

use crate::options::{DocstringStyle, FormatOptions, LineRange};
use crate::{Error, Result};
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

pub const PYPROJECT: &str = "pyproject.toml";

/// Values read from `[tool.docformatter]`. Unset keys are `None`.
#[derive(Clone, Debug, Default, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "kebab-case", default, deny_unknown_fields)]
pub struct FileConfig {
    pub wrap_summaries: Option<usize>,
    pub wrap_descriptions: Option<usize>,
    pub tab_width: Option<usize>,
    pub pre_summary_newline: Option<bool>,
    pub pre_summary_space: Option<bool>,
    pub post_description_blank: Option<bool>,
    pub make_summary_multi_line: Option<bool>,
    pub close_quotes_on_newline: Option<bool>,
    pub force_wrap: Option<bool>,
    pub non_strict: Option<bool>,
    pub style: Option<String>,
    pub non_cap: Option<Vec<String>>,
    pub black: Option<bool>,
    pub range: Option<[usize; 2]>,
    pub docstring_length: Option<[usize; 2]>,
    pub exclude: Option<Vec<String>>,
    pub recursive: Option<bool>,
    pub in_place: Option<bool>,
    pub check: Option<bool>,
    pub diff: Option<bool>,
}

#[derive(Debug, Default, Deserialize)]
struct PyProject {
    #[serde(default)]
    tool: Tool,
}

#[derive(Debug, Default, Deserialize)]
struct Tool {
    docformatter: Option<FileConfig>,
}

impl FileConfig {
    /// Parses the `[tool.docformatter]` table out of a `pyproject.toml` body.
    ///
    /// A document without the table yields the empty configuration.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Config`] for malformed TOML or unknown keys.
    pub fn from_toml(contents: &str, path: &Path) -> Result<Self> {
        let project: PyProject = toml::from_str(contents).map_err(|err| Error::config(path, err))?;
        Ok(project.tool.docformatter.unwrap_or_default())
    }

    /// Layers these values over `options`.
    ///
    /// `black` is applied before the individual widths so an explicit width
    /// wins over the preset.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidOption`] for an unknown style name.
    pub fn apply(&self, mut options: FormatOptions) -> Result<FormatOptions> {
        if let Some(black) = self.black {
            options = options.with_black(black);
        }
        if let Some(width) = self.wrap_summaries {
            options = options.with_wrap_summaries(width);
        }
        if let Some(width) = self.wrap_descriptions {
            options = options.with_wrap_descriptions(width);
        }
        if let Some(width) = self.tab_width {
            options = options.with_tab_width(width);
        }
        if let Some(on) = self.pre_summary_newline {
            options = options.with_pre_summary_newline(on);
        }
        if let Some(on) = self.pre_summary_space {
            options = options.with_pre_summary_space(on);
        }
        if let Some(on) = self.post_description_blank {
            options = options.with_post_description_blank(on);
        }
        if let Some(on) = self.make_summary_multi_line {
            options = options.with_make_summary_multi_line(on);
        }
        if let Some(on) = self.close_quotes_on_newline {
            options = options.with_close_quotes_on_newline(on);
        }
        if let Some(on) = self.force_wrap {
            options = options.with_force_wrap(on);
        }
        if let Some(on) = self.non_strict {
            options = options.with_non_strict(on);
        }
        if let Some(style) = &self.style {
            options = options.with_style(style.parse::<DocstringStyle>()?);
        }
        if let Some(words) = &self.non_cap {
            options = options.with_non_cap(words.iter());
        }
        if let Some([start, end]) = self.range {
            options = options.with_line_range(LineRange::new(start, end));
        }
        if let Some([start, end]) = self.docstring_length {
            options = options.with_length_range(LineRange::new(start, end));
        }
        Ok(options)
    }
}

/// Reads `[tool.docformatter]` from the file at `path`.
///
/// # Errors
///
/// Returns [`Error::Io`] when the file cannot be read and [`Error::Config`]
/// when it cannot be parsed.
pub fn load_pyproject(path: &Path) -> Result<FileConfig> {
    let contents = fs::read_to_string(path).map_err(|err| Error::io(path, err))?;
    let config = FileConfig::from_toml(&contents, path)?;
    debug!(path = %path.display(), "loaded configuration");
    Ok(config)
}

/// Finds the nearest `pyproject.toml` in `start` or one of its ancestors.
#[must_use]
pub fn discover(start: &Path) -> Option<PathBuf> {
    start
        .ancestors()
        .map(|dir| dir.join(PYPROJECT))
        .find(|candidate| candidate.is_file())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::options::{BLACK_WRAP_LENGTH, DEFAULT_WRAP_DESCRIPTIONS};

    fn parse(contents: &str) -> Result<FileConfig> {
        FileConfig::from_toml(contents, Path::new(PYPROJECT))
    }

    #[test]
    fn test_missing_table_is_empty() {
        let config = parse("[project]\nname = \"demo\"\n").unwrap();
        assert_eq!(config, FileConfig::default());
    }

    #[test]
    fn test_kebab_case_keys() {
        let config = parse(
            "[tool.docformatter]\nwrap-summaries = 100\npre-summary-newline = true\nnon-cap = [\"iPhone\"]\nrange = [1, 20]\n",
        )
        .unwrap();
        assert_eq!(config.wrap_summaries, Some(100));
        assert_eq!(config.pre_summary_newline, Some(true));
        assert_eq!(config.non_cap, Some(vec!["iPhone".to_string()]));
        assert_eq!(config.range, Some([1, 20]));
    }

    #[test]
    fn test_unknown_key_is_rejected() {
        let err = parse("[tool.docformatter]\nwrap-everything = true\n").unwrap_err();
        assert!(matches!(err, Error::Config { .. }));
    }

    #[test]
    fn test_apply_black_then_widths() {
        let config = parse("[tool.docformatter]\nblack = true\nwrap-descriptions = 72\n").unwrap();
        let options = config.apply(FormatOptions::new()).unwrap();
        assert_eq!(options.wrap_summaries, BLACK_WRAP_LENGTH);
        assert_eq!(options.wrap_descriptions, DEFAULT_WRAP_DESCRIPTIONS);
        assert!(options.pre_summary_space);
    }

    #[test]
    fn test_apply_rejects_unknown_style() {
        let config = parse("[tool.docformatter]\nstyle = \"javadoc\"\n").unwrap();
        assert!(matches!(
            config.apply(FormatOptions::new()),
            Err(Error::InvalidOption(_))
        ));
    }

    #[test]
    fn test_discover_walks_up() {
        let dir = tempfile::tempdir().unwrap();
        let nested = dir.path().join("pkg").join("sub");
        fs::create_dir_all(&nested).unwrap();
        fs::write(dir.path().join(PYPROJECT), "[tool.docformatter]\nstyle = \"sphinx\"\n").unwrap();

        let found = discover(&nested).unwrap();
        assert_eq!(found, dir.path().join(PYPROJECT));
        let config = load_pyproject(&found).unwrap();
        assert_eq!(config.style.as_deref(), Some("sphinx"));
    }
}
