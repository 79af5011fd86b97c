//! File handling for the command-line tool: discovery, reading, writing and
//! reporting.

use crate::options::FormatOptions;
use crate::rewrite::Rewriter;
use crate::{Error, Result};
use similar::TextDiff;
use std::fs;
use std::io::{self, Read, Write};
use std::path::{Path, PathBuf};
use tracing::{debug, error, info, warn};
use walkdir::WalkDir;

/// Nothing failed and, under `--check`, nothing would change.
pub const EXIT_SUCCESS: i32 = 0;
/// A file or the configuration could not be read or written.
pub const EXIT_ERROR: i32 = 1;
/// `--check` found files that would be reformatted.
pub const EXIT_CHECK_FAILED: i32 = 3;

const STDIN: &str = "-";

/// What to do with each file.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RunOptions {
    pub in_place: bool,
    pub check: bool,
    pub diff: bool,
    pub recursive: bool,
    /// Paths containing any of these fragments are skipped.
    pub exclude: Vec<String>,
}

/// Tally of a run.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Summary {
    pub changed: Vec<PathBuf>,
    pub errors: usize,
}

impl Summary {
    /// Exit status for this run.
    #[must_use]
    pub fn exit_code(&self, run: &RunOptions) -> i32 {
        if self.errors > 0 {
            EXIT_ERROR
        } else if run.check && !self.changed.is_empty() {
            EXIT_CHECK_FAILED
        } else {
            EXIT_SUCCESS
        }
    }
}

fn is_excluded(path: &Path, exclude: &[String]) -> bool {
    let display = path.to_string_lossy();
    exclude.iter().any(|fragment| display.contains(fragment.as_str()))
}

fn is_python_file(path: &Path) -> bool {
    path.extension().is_some_and(|ext| ext == "py")
}

/// Expands the command-line paths into the files to format.
///
/// Directories are walked for `*.py` files when `recursive` is set and skipped
/// otherwise. `-` stands for standard input and is passed through.
#[must_use]
pub fn collect_files(paths: &[PathBuf], recursive: bool, exclude: &[String]) -> Vec<PathBuf> {
    let mut files = Vec::new();
    for path in paths {
        if path.as_os_str() == STDIN {
            files.push(path.clone());
        } else if path.is_dir() {
            if !recursive {
                warn!(path = %path.display(), "skipping directory, pass --recursive to descend");
                continue;
            }
            let found = WalkDir::new(path)
                .sort_by_file_name()
                .into_iter()
                .filter_map(std::result::Result::ok)
                .filter(|entry| entry.file_type().is_file() && is_python_file(entry.path()))
                .map(walkdir::DirEntry::into_path)
                .filter(|file| !is_excluded(file, exclude));
            files.extend(found);
        } else if !is_excluded(path, exclude) {
            files.push(path.clone());
        }
    }
    files
}

/// Renders a unified diff between two versions of `path`.
#[must_use]
pub fn unified_diff(original: &str, formatted: &str, path: &Path) -> String {
    let name = path.display().to_string();
    TextDiff::from_lines(original, formatted)
        .unified_diff()
        .context_radius(3)
        .header(&format!("before/{name}"), &format!("after/{name}"))
        .to_string()
}

fn read_source(path: &Path) -> Result<String> {
    if path.as_os_str() == STDIN {
        let mut source = String::new();
        io::stdin()
            .read_to_string(&mut source)
            .map_err(|err| Error::io(path, err))?;
        return Ok(source);
    }
    fs::read_to_string(path).map_err(|err| Error::io(path, err))
}

/// Formats one file and reports or writes the result.
///
/// Returns whether the file's docstrings changed.
///
/// # Errors
///
/// Returns [`Error::Io`] when reading or writing fails.
pub fn process_file<W: Write>(
    path: &Path,
    rewriter: &Rewriter<'_>,
    run: &RunOptions,
    out: &mut W,
) -> Result<bool> {
    let source = read_source(path)?;
    let formatted = rewriter.format_source(&source);
    let changed = formatted != source;
    let to_stdout = path.as_os_str() == STDIN;
    let write_err = |err: io::Error| Error::io(path, err);

    if run.check {
        if changed {
            writeln!(out, "{}", path.display()).map_err(write_err)?;
        }
        if !run.in_place {
            return Ok(changed);
        }
    }

    if run.diff && changed {
        write!(out, "{}", unified_diff(&source, &formatted, path)).map_err(write_err)?;
    }

    if run.in_place && !to_stdout {
        if changed {
            fs::write(path, &formatted).map_err(write_err)?;
            info!(path = %path.display(), "reformatted");
        }
    } else if !run.diff {
        write!(out, "{formatted}").map_err(write_err)?;
    }

    debug!(path = %path.display(), changed, "processed");
    Ok(changed)
}

/// Formats every file in `paths`, writing reports to `out`.
///
/// `out` is flushed before returning. A failed flush is logged and does not
/// count as an error.
pub fn run<W: Write>(
    paths: &[PathBuf],
    options: &FormatOptions,
    run: &RunOptions,
    out: &mut W,
) -> Summary {
    let rewriter = Rewriter::new(options);
    let mut summary = Summary::default();

    for path in collect_files(paths, run.recursive, &run.exclude) {
        match process_file(&path, &rewriter, run, out) {
            Ok(true) => summary.changed.push(path),
            Ok(false) => {}
            Err(err) => {
                error!(%err, "failed to format");
                summary.errors += 1;
            }
        }
    }

    if let Err(err) = out.flush() {
        debug!(%err, "failed to flush output");
    }
    summary
}
