//! Keeps URLs on lines of their own when they would overflow.

use crate::description::description_to_list;
use crate::patterns::UrlSpan;

/// Joins the lines of a URL span into a single indented line.
fn clean_url(url: &str, indent: &str) -> String {
    let joined: Vec<&str> = url.lines().map(str::trim).collect();
    format!("{indent}{}", joined.join(" "))
}

/// Places each overlong URL on its own line.
///
/// For every URL, when the text from `start_idx` (or the previous URL) up to
/// the URL's end is wider than the available room, the preceding text is
/// filled and the URL emitted whole on a line of its own. Returns the lines
/// and the byte index where the unprocessed text starts.
///
/// ```rust
/// use pydocfmt::patterns::find_urls;
/// use pydocfmt::urls::wrap_urls;
///
/// let text = "Read more at http://example.com/some/really/long/path/to/a/page here.";
/// let (lines, idx) = wrap_urls(text, &find_urls(text), 0, "", 40);
/// assert_eq!(lines, vec!["Read more at", "http://example.com/some/really/long/path/to/a/page"]);
/// assert_eq!(&text[idx..], " here.");
/// ```
#[must_use]
pub fn wrap_urls(
    text: &str,
    urls: &[UrlSpan],
    start_idx: usize,
    indent: &str,
    width: usize,
) -> (Vec<String>, usize) {
    let mut lines: Vec<String> = Vec::new();
    let mut text_idx = start_idx;
    let room = width.saturating_sub(indent.len());

    for url in urls {
        if url.skippable || url.range.start < text_idx {
            continue;
        }
        if text[text_idx..url.range.end].chars().count() <= room {
            continue;
        }

        lines.extend(description_to_list(
            &text[text_idx..url.range.start],
            indent,
            width,
        ));

        let before = text[..url.range.start].trim_end_matches(&[' ', '\t'][..]);
        if !before.ends_with("\n\n") && lines.last().is_some_and(String::is_empty) {
            lines.pop();
        }

        let mut url_line = clean_url(&text[url.range.clone()], indent);
        if let Some(last) = lines.last_mut() {
            if let Some(stripped) = last.strip_suffix('"') {
                url_line = format!("{indent}\"{}", url_line.trim_start());
                *last = stripped.trim_end().to_string();
                if last.trim().is_empty() {
                    lines.pop();
                }
            }
        }
        lines.push(url_line);
        text_idx = url.range.end;
    }

    (lines, text_idx)
}
