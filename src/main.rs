use clap::Parser;
use pydocfmt::config::{discover, load_pyproject, FileConfig};
use pydocfmt::driver::{self, RunOptions, EXIT_ERROR};
use pydocfmt::{DocstringStyle, FormatOptions, LineRange, Result};
use std::io;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::error;
use tracing_subscriber::EnvFilter;

/// Formats docstrings in Python source files to follow PEP 257.
#[derive(Debug, Parser)]
#[command(name = "pydocfmt", version, about)]
struct Cli {
    /// Files to format; `-` reads standard input
    #[arg(required = true, value_name = "FILES")]
    files: Vec<PathBuf>,

    /// Rewrite files in place
    #[arg(short, long)]
    in_place: bool,

    /// Only report files that would change; exits with status 3 if any would
    #[arg(short, long)]
    check: bool,

    /// Print a unified diff instead of the formatted source
    #[arg(short, long)]
    diff: bool,

    /// Descend into directories
    #[arg(short, long)]
    recursive: bool,

    /// Skip paths containing this fragment (repeatable)
    #[arg(long, value_name = "FRAGMENT")]
    exclude: Vec<String>,

    /// Wrap summaries at this column; 0 disables wrapping
    #[arg(long, value_name = "LENGTH")]
    wrap_summaries: Option<usize>,

    /// Wrap descriptions at this column; 0 disables wrapping
    #[arg(long, value_name = "LENGTH")]
    wrap_descriptions: Option<usize>,

    /// Width of a tab in indentation
    #[arg(long, value_name = "WIDTH")]
    tab_width: Option<usize>,

    /// Put the summary on the line after the opening quotes
    #[arg(long)]
    pre_summary_newline: bool,

    /// Put a space between the opening quotes and the summary
    #[arg(long)]
    pre_summary_space: bool,

    /// Add a blank line after the description
    #[arg(long)]
    post_description_blank: bool,

    /// Put one-line docstrings on three lines
    #[arg(long)]
    make_summary_multi_line: bool,

    /// Put closing quotes on their own line when a summary wraps
    #[arg(long)]
    close_quotes_on_newline: bool,

    /// Wrap descriptions even when they look like lists or code
    #[arg(long)]
    force_wrap: bool,

    /// Do not treat short-lined text as a list
    #[arg(long)]
    non_strict: bool,

    /// Field-list style: sphinx, epytext, numpy or google
    #[arg(long, value_name = "STYLE")]
    style: Option<DocstringStyle>,

    /// Never capitalize this word at the start of a summary (repeatable)
    #[arg(long, value_name = "WORD")]
    non_cap: Vec<String>,

    /// Use black-compatible widths and spacing
    #[arg(long)]
    black: bool,

    /// Only format docstrings touching rows START..=END
    #[arg(long, num_args = 2, value_names = ["START", "END"])]
    range: Option<Vec<usize>>,

    /// Only format docstrings spanning MIN..=MAX rows
    #[arg(long, num_args = 2, value_names = ["MIN", "MAX"])]
    docstring_length: Option<Vec<usize>>,

    /// Read settings from this pyproject.toml instead of searching for one
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Log progress to stderr
    #[arg(short, long)]
    verbose: bool,
}

fn init_tracing(verbose: bool) {
    let default_level = if verbose { "info" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .init();
}

fn pair(values: &Option<Vec<usize>>) -> Option<LineRange> {
    match values.as_deref() {
        Some(&[start, end]) => Some(LineRange::new(start, end)),
        _ => None,
    }
}

fn file_config(cli: &Cli) -> Result<FileConfig> {
    let path = cli
        .config
        .clone()
        .or_else(|| std::env::current_dir().ok().and_then(|dir| discover(&dir)));
    match path {
        Some(path) => load_pyproject(&path),
        None => Ok(FileConfig::default()),
    }
}

fn build_options(cli: &Cli, file: &FileConfig) -> Result<FormatOptions> {
    let mut options = file.apply(FormatOptions::new())?;
    if cli.black {
        options = options.with_black(true);
    }
    if let Some(width) = cli.wrap_summaries {
        options = options.with_wrap_summaries(width);
    }
    if let Some(width) = cli.wrap_descriptions {
        options = options.with_wrap_descriptions(width);
    }
    if let Some(width) = cli.tab_width {
        options = options.with_tab_width(width);
    }
    if cli.pre_summary_newline {
        options = options.with_pre_summary_newline(true);
    }
    if cli.pre_summary_space {
        options = options.with_pre_summary_space(true);
    }
    if cli.post_description_blank {
        options = options.with_post_description_blank(true);
    }
    if cli.make_summary_multi_line {
        options = options.with_make_summary_multi_line(true);
    }
    if cli.close_quotes_on_newline {
        options = options.with_close_quotes_on_newline(true);
    }
    if cli.force_wrap {
        options = options.with_force_wrap(true);
    }
    if cli.non_strict {
        options = options.with_non_strict(true);
    }
    if let Some(style) = cli.style {
        options = options.with_style(style);
    }
    if !cli.non_cap.is_empty() {
        options = options.with_non_cap(cli.non_cap.iter());
    }
    if let Some(range) = pair(&cli.range) {
        options = options.with_line_range(range);
    }
    if let Some(range) = pair(&cli.docstring_length) {
        options = options.with_length_range(range);
    }
    options.validate()?;
    Ok(options)
}

fn build_run_options(cli: &Cli, file: &FileConfig) -> RunOptions {
    let mut exclude = file.exclude.clone().unwrap_or_default();
    exclude.extend(cli.exclude.iter().cloned());
    RunOptions {
        in_place: cli.in_place || file.in_place.unwrap_or(false),
        check: cli.check || file.check.unwrap_or(false),
        diff: cli.diff || file.diff.unwrap_or(false),
        recursive: cli.recursive || file.recursive.unwrap_or(false),
        exclude,
    }
}

fn run(cli: &Cli) -> Result<i32> {
    let file = file_config(cli)?;
    let options = build_options(cli, &file)?;
    let run_options = build_run_options(cli, &file);

    let stdout = io::stdout();
    let mut out = stdout.lock();
    let summary = driver::run(&cli.files, &options, &run_options, &mut out);
    Ok(summary.exit_code(&run_options))
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let code = match run(&cli) {
        Ok(code) => code,
        Err(err) => {
            error!(%err, "aborting");
            EXIT_ERROR
        }
    };
    ExitCode::from(u8::try_from(code).unwrap_or(1))
}
