//! Formatting the docstrings of a whole module.
//!
//! Run with: cargo run --example format_source

use pydocfmt::{format_str, FormatOptions, Rewriter};
use std::error::Error;

const SOURCE: &str = r#"'''tools for working with widgets'''

import os


class Widget:

    '''a widget

    Widgets are built from parts and can be resized at any time, even while they are being displayed on screen.
    '''

    size = 3
    '''default size'''

    def grow(self, by):
        '''
        grow the widget.

        :param by: how much to grow the widget by, in widget units, which may be negative to shrink it.
        '''

        self.size += by
"#;

fn main() -> Result<(), Box<dyn Error>> {
    println!("Before:\n{SOURCE}");

    let formatted = format_str(SOURCE);
    println!("After:\n{formatted}");

    // the fallible pass reports why a file was left alone
    let options = FormatOptions::new();
    let broken = "def f(:\n    '''doc'''\n";
    if let Err(err) = Rewriter::new(&options).try_format_source(broken) {
        println!("Left unchanged: {err}");
    }

    Ok(())
}
