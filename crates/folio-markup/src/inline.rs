//! Inline pass: the second phase of transpilation.
//!
//! Parses a single line of inline markup into a small tree. Code spans are
//! opaque, bold is matched before italic, and nothing spans line breaks.
//! Unmatched or empty markers stay literal.

use std::fmt::Write;

use crate::html::escape_html;

/// Inline markup node.
#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) enum Inline<'a> {
    Text(&'a str),
    Code(&'a str),
    Strong(Vec<Inline<'a>>),
    Emphasis(Vec<Inline<'a>>),
}

/// Parse one line of inline markup.
pub(crate) fn parse_inline(text: &str) -> Vec<Inline<'_>> {
    let bytes = text.as_bytes();
    let mut nodes = Vec::new();
    let mut literal_start = 0;
    let mut i = 0;

    while i < bytes.len() {
        let matched = match bytes[i] {
            b'`' => code_span(text, i).map(|end| (Inline::Code(&text[i + 1..end]), end + 1)),
            b'*' if bytes.get(i + 1) == Some(&b'*') => strong_span(text, i)
                .map(|end| (Inline::Strong(parse_inline(&text[i + 2..end])), end + 2)),
            b'*' => emphasis_span(text, i)
                .map(|end| (Inline::Emphasis(parse_inline(&text[i + 1..end])), end + 1)),
            _ => None,
        };

        if let Some((node, next)) = matched {
            if literal_start < i {
                nodes.push(Inline::Text(&text[literal_start..i]));
            }
            nodes.push(node);
            i = next;
            literal_start = next;
        } else {
            i += 1;
        }
    }

    if literal_start < bytes.len() {
        nodes.push(Inline::Text(&text[literal_start..]));
    }
    nodes
}

/// Find the closing backtick of a code span opened at `start`.
fn code_span(text: &str, start: usize) -> Option<usize> {
    let offset = text[start + 1..].find('`')?;
    // `` is not a code span
    (offset > 0).then_some(start + 1 + offset)
}

/// Find the closing `**` of a bold span opened at `start`.
fn strong_span(text: &str, start: usize) -> Option<usize> {
    let bytes = text.as_bytes();
    let from = start + 2;
    let mut j = from;
    while j < bytes.len() {
        match bytes[j] {
            b'`' => j = code_span(text, j).map_or(j + 1, |end| end + 1),
            b'*' if bytes.get(j + 1) == Some(&b'*') => {
                let end = closing_pair(text, from, j);
                return is_span_content(&text[from..end]).then_some(end);
            }
            _ => j += 1,
        }
    }
    None
}

/// Pick the `**` that closes bold within the marker run starting at `run`.
///
/// In a run of three or more markers the last two close the bold when the
/// content still has an italic open, so `***x***` is bold around italic.
fn closing_pair(text: &str, from: usize, run: usize) -> usize {
    let bytes = text.as_bytes();
    let len = bytes[run..].iter().take_while(|&&b| b == b'*').count();
    let open_italic = text[from..run].bytes().filter(|&b| b == b'*').count() % 2 == 1;
    if len >= 3 && open_italic {
        run + len - 2
    } else {
        run
    }
}

/// Find the closing `*` of an italic span opened at `start`.
///
/// Double markers inside the span belong to nested bold and are skipped.
fn emphasis_span(text: &str, start: usize) -> Option<usize> {
    let bytes = text.as_bytes();
    let from = start + 1;
    let mut j = from;
    while j < bytes.len() {
        match bytes[j] {
            b'`' => j = code_span(text, j).map_or(j + 1, |end| end + 1),
            b'*' if bytes.get(j + 1) == Some(&b'*') => j += 2,
            b'*' => return is_span_content(&text[from..j]).then_some(j),
            _ => j += 1,
        }
    }
    None
}

/// Span content must be non-empty and must not start or end with whitespace.
fn is_span_content(content: &str) -> bool {
    !content.is_empty()
        && !content.starts_with(char::is_whitespace)
        && !content.ends_with(char::is_whitespace)
}

/// Render inline nodes as HTML.
pub(crate) fn write_html(nodes: &[Inline<'_>], out: &mut String) {
    for node in nodes {
        match node {
            Inline::Text(text) => out.push_str(&escape_html(text)),
            Inline::Code(code) => {
                let _ = write!(out, "<code>{}</code>", escape_html(code));
            }
            Inline::Strong(children) => {
                out.push_str("<strong>");
                write_html(children, out);
                out.push_str("</strong>");
            }
            Inline::Emphasis(children) => {
                out.push_str("<em>");
                write_html(children, out);
                out.push_str("</em>");
            }
        }
    }
}

/// Collect the plain text of inline nodes (markers stripped, not escaped).
pub(crate) fn write_plain(nodes: &[Inline<'_>], out: &mut String) {
    for node in nodes {
        match node {
            Inline::Text(text) | Inline::Code(text) => out.push_str(text),
            Inline::Strong(children) | Inline::Emphasis(children) => write_plain(children, out),
        }
    }
}

/// Render one line of inline markup to HTML.
pub(crate) fn render_inline(text: &str, out: &mut String) {
    write_html(&parse_inline(text), out);
}
