//! Customizing the layout with FormatOptions.
//!
//! Run with: cargo run --example custom_options

use pydocfmt::{format_str_with_options, DocstringStyle, FormatOptions, LineRange};
use std::error::Error;

const SOURCE: &str = r#"def connect(host, port):
    '''open a connection to the server

    @param host: name or address of the server to connect to, resolved through the system resolver.
    @param port: port number.
    '''
    return (host, port)
"#;

fn main() -> Result<(), Box<dyn Error>> {
    // Default (sphinx fields, 79/72 columns)
    println!("Default:");
    println!("{}", format_str_with_options(SOURCE, &FormatOptions::new()));

    // Epytext fields are wrapped when that style is selected
    println!("Epytext:");
    let epytext = FormatOptions::new().with_style(DocstringStyle::Epytext);
    println!("{}", format_str_with_options(SOURCE, &epytext));

    // Summary on its own line, blank line before the closing quotes
    println!("Pre-summary newline and post-description blank:");
    let spaced = FormatOptions::new()
        .with_style(DocstringStyle::Epytext)
        .with_pre_summary_newline(true)
        .with_post_description_blank(true);
    println!("{}", format_str_with_options(SOURCE, &spaced));

    // Black-compatible widths
    println!("Black:");
    let black = FormatOptions::black().with_style(DocstringStyle::Epytext);
    println!("{}", format_str_with_options(SOURCE, &black));

    // Only touch docstrings on the given rows
    println!("Rows 10-20 only (nothing changes):");
    let ranged = FormatOptions::new().with_line_range(LineRange::new(10, 20));
    ranged.validate()?;
    println!("{}", format_str_with_options(SOURCE, &ranged));

    Ok(())
}
