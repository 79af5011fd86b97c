//! Field list wrapping for Sphinx (`:param x:`) and Epytext (`@param x:`).

use crate::description::description_to_list;
use crate::wrap::fill_lines;
use std::ops::Range;

/// Indentation at or below which continuation lines get double indentation.
const DEFAULT_INDENT: usize = 4;

/// The body of one field, split from whatever trails it.
struct FieldBody<'a> {
    body: String,
    /// Text after a blank line inside the field's segment.
    trailing: &'a str,
    /// A blank line separated this field from the next.
    blank_after: bool,
}

/// Joins the body of field `idx` into a single line.
///
/// The body runs from the end of the field name to the next field name, or up
/// to the first blank line. Inner newlines become single spaces and a leading
/// space is added unless the body starts with a backtick. A blank line right
/// after the name makes the body a bare newline.
fn join_field_body<'a>(text: &'a str, fields: &[Range<usize>], idx: usize) -> FieldBody<'a> {
    let start = fields[idx].end;
    let end = fields.get(idx + 1).map_or(text.len(), |next| next.start);
    let segment = &text[start..end];

    if segment.starts_with("\n\n") {
        return FieldBody {
            body: "\n".to_string(),
            trailing: segment,
            blank_after: false,
        };
    }

    let (head, trailing, blank_after) = match segment.find("\n\n") {
        Some(pos) => (&segment[..pos], &segment[pos..], true),
        None => (segment, "", false),
    };
    let mut body = head.split_whitespace().collect::<Vec<_>>().join(" ");
    if !body.is_empty() && !body.starts_with('`') {
        body.insert(0, ' ');
    }
    FieldBody {
        body,
        trailing,
        blank_after,
    }
}

/// Wraps a field whose one-line form is too wide.
///
/// Continuation lines get the field's indentation doubled, or half again when
/// the indentation is already deep.
#[must_use]
pub fn wrap_field(name: &str, body: &str, indent: &str, width: usize) -> Vec<String> {
    let subsequent = if indent.len() > DEFAULT_INDENT {
        format!("{indent}{}", " ".repeat(indent.len() / 2))
    } else {
        indent.repeat(2)
    };

    fill_lines(&format!("{name}{body}"), width, indent, &subsequent)
        .iter()
        .enumerate()
        .map(|(idx, line)| {
            let lead = if idx == 0 { indent } else { subsequent.as_str() };
            let words: Vec<&str> = line.split_whitespace().collect();
            format!("{lead}{}", words.join(" "))
        })
        .collect()
}

/// Wraps text containing field lists, one field at a time.
///
/// `lines` holds output already produced by URL wrapping and `text_idx` where
/// that stopped. Text ahead of the first field is filled as prose. Each field
/// stays on one line when it fits, otherwise it is wrapped with
/// [`wrap_field`]. Paragraphs that follow a field after a blank line are
/// filled as prose.
#[must_use]
pub fn wrap_field_lists(
    text: &str,
    fields: &[Range<usize>],
    mut lines: Vec<String>,
    text_idx: usize,
    indent: &str,
    width: usize,
) -> Vec<String> {
    let Some(first) = fields.first() else {
        return lines;
    };
    let intro = text.get(text_idx.min(first.start)..first.start).unwrap_or_default();
    lines.extend(description_to_list(intro, indent, width));

    for idx in 0..fields.len() {
        let name = &text[fields[idx].clone()];
        let field = join_field_body(text, fields, idx);

        if indent.len() + name.len() + field.body.len() <= width || field.body == "\n" {
            lines.push(format!("{indent}{name}{}", field.body));
        } else {
            lines.extend(wrap_field(name, &field.body, indent, width));
        }

        if !field.trailing.trim().is_empty() {
            if field.body != "\n" {
                lines.push(String::new());
            }
            let mut paragraphs = description_to_list(field.trailing.trim_start_matches('\n'), indent, width);
            if paragraphs.last().is_some_and(String::is_empty) {
                paragraphs.pop();
            }
            lines.extend(paragraphs);
            if idx + 1 < fields.len() {
                lines.push(String::new());
            }
        } else if field.blank_after && idx + 1 < fields.len() {
            lines.push(String::new());
        }
    }

    lines
}
