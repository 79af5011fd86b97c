use pretty_assertions::assert_eq;
use pydocfmt::{format_docstring, DocstringStyle, FormatOptions};

fn format(docstring: &str) -> String {
    format_docstring("    ", docstring, &FormatOptions::new())
}

fn format_with(options: &FormatOptions, docstring: &str) -> String {
    format_docstring("    ", docstring, options)
}

#[test]
fn test_quote_prefixes_are_lowercased() {
    assert_eq!(format("U'''hello'''"), "u\"\"\"Hello.\"\"\"");
    assert_eq!(format("R\"\"\"hello\"\"\""), "r\"\"\"Hello.\"\"\"");
}

#[test]
fn test_identifier_summary_is_not_capitalized() {
    assert_eq!(format("\"\"\"my_func does things\"\"\""), "\"\"\"my_func does things.\"\"\"");
    assert_eq!(format("\"\"\"setup.py helpers\"\"\""), "\"\"\"setup.py helpers.\"\"\"");
}

#[test]
fn test_hash_summary_gets_no_period() {
    assert_eq!(format("\"\"\"#: comment style\"\"\""), "\"\"\"#: comment style\"\"\"");
}

#[test]
fn test_abbreviation_does_not_end_summary() {
    assert_eq!(
        format("\"\"\"Use e.g. this one. Then more.\"\"\""),
        "\"\"\"Use e.g. this one.\n\n    Then more.\n    \"\"\""
    );
}

#[test]
fn test_summary_lines_are_joined() {
    assert_eq!(
        format("\"\"\"\n    This is a summary\n    that spans lines.\n    \"\"\""),
        "\"\"\"This is a summary that spans lines.\"\"\""
    );
}

#[test]
fn test_google_sections_are_kept() {
    let options = FormatOptions::new().with_style(DocstringStyle::Google);
    let docstring = "\"\"\"Summary.\n\n    Args:\n        x: the value.\n    \"\"\"";
    assert_eq!(format_with(&options, docstring), docstring);
}

#[test]
fn test_numpy_sections_are_kept() {
    let options = FormatOptions::new().with_style(DocstringStyle::Numpy);
    let docstring = "\"\"\"Summary.\n\n    Parameters\n    ----------\n    x : int\n        The value.\n    \"\"\"";
    assert_eq!(format_with(&options, docstring), docstring);
}

#[test]
fn test_epytext_fields_follow_style() {
    let docstring = "\"\"\"Summary.\n\n    @param x: the\n        value.\n    \"\"\"";

    let epytext = FormatOptions::new().with_style(DocstringStyle::Epytext);
    assert_eq!(
        format_with(&epytext, docstring),
        "\"\"\"Summary.\n\n    @param x: the value.\n    \"\"\""
    );

    // not a field list under sphinx, so left as written
    assert_eq!(format(docstring), docstring);
}

#[test]
fn test_short_lines_read_as_list_unless_non_strict() {
    let docstring = "\"\"\"Summary.\n\n    Short\n    lines\n    here\n    \"\"\"";
    assert_eq!(format(docstring), docstring);

    let options = FormatOptions::new().with_non_strict(true);
    assert_eq!(
        format_with(&options, docstring),
        "\"\"\"Summary.\n\n    Short lines here\n    \"\"\""
    );
}

#[test]
fn test_directive_is_kept() {
    let docstring = "\"\"\"Summary.\n\n    .. note:: Keep this\n       exactly as written.\n    \"\"\"";
    assert_eq!(format(docstring), docstring);
}

#[test]
fn test_pre_summary_space_ignored_with_newline() {
    let options = FormatOptions::new()
        .with_pre_summary_space(true)
        .with_pre_summary_newline(true);
    assert_eq!(
        format_with(&options, "\"\"\"Summary.\n\n    Body.\n    \"\"\""),
        "\"\"\"\n    Summary.\n\n    Body.\n    \"\"\""
    );
}

#[test]
fn test_wrap_descriptions_zero_only_reindents() {
    let options = FormatOptions::new().with_wrap_descriptions(0);
    let docstring = "\"\"\"Summary.\n\n      A line that would otherwise be joined\n      with this one.\n    \"\"\"";
    assert_eq!(
        format_with(&options, docstring),
        "\"\"\"Summary.\n\n    A line that would otherwise be joined\n    with this one.\n    \"\"\""
    );
}
