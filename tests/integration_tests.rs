use pretty_assertions::assert_eq;
use pydocfmt::classify::{find_docstring_blocks, DocstringKind};
use pydocfmt::tokenize::tokenize;
use pydocfmt::{format_str, format_str_with_options, FormatOptions, LineRange};

#[test]
fn test_one_liner_is_collapsed() {
    let source = "def foo():\n    \"\"\"\n    Hello foo.\n    \"\"\"\n";
    assert_eq!(format_str(source), "def foo():\n    \"\"\"Hello foo.\"\"\"\n");
}

#[test]
fn test_summary_and_description_are_split() {
    let source = "def f():\n    \"\"\"\n    Hello. World.\n    \"\"\"\n";
    assert_eq!(
        format_str(source),
        "def f():\n    \"\"\"Hello.\n\n    World.\n    \"\"\"\n"
    );
}

#[test]
fn test_bullet_list_is_preserved() {
    let source = "def f():\n    \"\"\"Hello.\n\n    - one\n    - two\n    \"\"\"\n";
    assert_eq!(format_str(source), source);
}

#[test]
fn test_long_url_gets_its_own_line() {
    let source = concat!(
        "def f():\n",
        "    \"\"\"Summary line.\n",
        "\n",
        "    This paragraph has enough words in front of the link that it will not fit so see http://www.example.com/very/long/path for details.\n",
        "    \"\"\"\n",
    );
    let expected = concat!(
        "def f():\n",
        "    \"\"\"Summary line.\n",
        "\n",
        "    This paragraph has enough words in front of the link that it will\n",
        "    not fit so see\n",
        "    http://www.example.com/very/long/path\n",
        "    for details.\n",
        "    \"\"\"\n",
    );
    assert_eq!(format_str(source), expected);
}

#[test]
fn test_sphinx_field_is_wrapped() {
    let source = concat!(
        "def build(name):\n",
        "    \"\"\"Build a widget.\n",
        "\n",
        "    :param name: The name of the widget to build, which is looked up in the registry before anything else happens and must therefore exist.\n",
        "    :return: The widget.\n",
        "    \"\"\"\n",
    );
    let expected = concat!(
        "def build(name):\n",
        "    \"\"\"Build a widget.\n",
        "\n",
        "    :param name: The name of the widget to build, which is looked up in the registry\n",
        "        before anything else happens and must therefore exist.\n",
        "    :return: The widget.\n",
        "    \"\"\"\n",
    );
    let options = FormatOptions::new().with_wrap_descriptions(88);
    assert_eq!(format_str_with_options(source, &options), expected);
}

#[test]
fn test_attribute_docstring_is_classified() {
    let source = "class C:\n    x = 1\n    \"\"\"Doc for x.\"\"\"\n";
    let tokens = tokenize(source).unwrap();
    let blocks = find_docstring_blocks(&tokens);
    assert_eq!(blocks.len(), 1);
    assert_eq!(blocks[0].kind, DocstringKind::Attribute);
    assert_eq!(tokens[blocks[0].anchor].text, "x");
    assert_eq!(format_str(source), source);
}

#[test]
fn test_description_is_rewrapped() {
    let source = concat!(
        "def f():\n",
        "    '''Summary.\n",
        "\n",
        "    This is a longer description of the function that goes on for quite a while so that it needs wrapping.\n",
        "    '''\n",
    );
    let expected = concat!(
        "def f():\n",
        "    \"\"\"Summary.\n",
        "\n",
        "    This is a longer description of the function that goes on for quite\n",
        "    a while so that it needs wrapping.\n",
        "    \"\"\"\n",
    );
    assert_eq!(format_str(source), expected);
}

#[test]
fn test_code_outside_docstrings_is_untouched() {
    let source = concat!(
        "import os\n",
        "\n",
        "\n",
        "def f(a,   b):  # odd spacing\n",
        "    '''do things'''\n",
        "    return [a,\n",
        "            b]  \\\n",
        "        if a else None\n",
    );
    let expected = concat!(
        "import os\n",
        "\n",
        "\n",
        "def f(a,   b):  # odd spacing\n",
        "    \"\"\"Do things.\"\"\"\n",
        "    return [a,\n",
        "            b]  \\\n",
        "        if a else None\n",
    );
    assert_eq!(format_str(source), expected);
}

#[test]
fn test_doctest_and_nested_quotes_are_identity() {
    let doctest = "def f():\n    '''>>> f()\n    1\n    '''\n";
    assert_eq!(format_str(doctest), doctest);

    let nested = "def f():\n    r'''Use \"\"\" inside.'''\n";
    assert_eq!(format_str(nested), nested);
}

#[test]
fn test_underlined_summary_is_identity() {
    let source = "'''\nTitle\n=====\n\nBody text.\n'''\n";
    assert_eq!(format_str(source), source);
}

#[test]
fn test_lone_url_is_identity() {
    let source = "def f():\n    '''https://example.com/docs'''\n";
    assert_eq!(format_str(source), source);
}

#[test]
fn test_wrap_summaries_zero_keeps_long_summary() {
    let summary = "word ".repeat(30);
    let source = format!("def f():\n    '''{}'''\n", summary.trim());
    let options = FormatOptions::new().with_wrap_summaries(0);
    let formatted = format_str_with_options(&source, &options);
    assert_eq!(formatted.lines().count(), 2);
    assert!(formatted.contains(&format!("\"\"\"Word {}.\"\"\"", "word ".repeat(29).trim())));
}

#[test]
fn test_single_row_range() {
    let source = "def f():\n    '''one'''\n\n\ndef g():\n    '''two'''\n";
    let options = FormatOptions::new().with_line_range(LineRange::new(2, 2));
    assert_eq!(
        format_str_with_options(source, &options),
        "def f():\n    \"\"\"One.\"\"\"\n\ndef g():\n    '''two'''\n"
    );
}

#[test]
fn test_docstring_length_filter() {
    let source = "def f():\n    '''one'''\n\n\ndef g():\n    '''two\n\n    more\n    '''\n";
    let options = FormatOptions::new().with_length_range(LineRange::new(1, 1));
    assert_eq!(
        format_str_with_options(source, &options),
        "def f():\n    \"\"\"One.\"\"\"\n\ndef g():\n    '''two\n\n    more\n    '''\n"
    );
}

#[test]
fn test_blank_lines_after_docstring() {
    let stub = "def f():\n    '''Doc.'''\n\n\n\nx = 1\n";
    assert_eq!(format_str(stub), "def f():\n    \"\"\"Doc.\"\"\"\n\nx = 1\n");

    let nested = "def f():\n    '''Doc.'''\n\n    def g():\n        pass\n";
    assert_eq!(
        format_str(nested),
        "def f():\n    \"\"\"Doc.\"\"\"\n    def g():\n        pass\n"
    );
}

#[test]
fn test_string_after_nested_block_is_identity() {
    let source = "class A:\n    x = 1\n\n'''Module level string.'''\n";
    assert_eq!(format_str(source), source);
}

#[test]
fn test_formatting_is_idempotent() {
    let source = concat!(
        "'''module docs'''\n",
        "\n",
        "\n",
        "class Widget:\n",
        "\n",
        "    '''a widget.\n",
        "\n",
        "    It does widget things, which are numerous and varied and deserve a long explanation here.\n",
        "    '''\n",
        "\n",
        "    size = 3\n",
        "    '''how big it is'''\n",
        "\n",
        "    def grow(self, by):\n",
        "        '''grow the widget\n",
        "\n",
        "        :param by: how much to grow the widget by, measured in widget units of course.\n",
        "        '''\n",
        "\n",
        "        self.size += by\n",
    );
    let once = format_str(source);
    let twice = format_str(&once);
    assert_eq!(once, twice);
    assert!(once.contains("class Widget:\n    \"\"\"A widget.\n"));
    assert!(once.contains("        \"\"\"\n        self.size += by\n"));
}

#[test]
fn test_black_preset() {
    let source = "def f():\n    '''Do it.'''\n";
    assert_eq!(
        format_str_with_options(source, &FormatOptions::black()),
        "def f():\n    \"\"\" Do it.\"\"\"\n"
    );
}
