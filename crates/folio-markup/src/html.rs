//! HTML output for transpiled blocks.
//!
//! Produces the display fragment markup:
//! - `<div class="code-block"><pre><code>` for fenced code
//! - `<table class="docs-table-wrapper"><tbody>` for tables
//! - `<ul><li>` for lists
//! - `<p>` with `<br>` line breaks for paragraphs

use std::borrow::Cow;
use std::fmt::Write;

use crate::block::TableRow;
use crate::inline::render_inline;

/// Escape HTML special characters.
///
/// Returns the input unchanged (borrowed) when nothing needs escaping.
///
/// # Examples
///
/// ```
/// use folio_markup::escape_html;
///
/// assert_eq!(escape_html("a < b & c"), "a &lt; b &amp; c");
/// assert_eq!(escape_html("plain"), "plain");
/// ```
pub fn escape_html(text: &str) -> Cow<'_, str> {
    if !text.contains(['&', '<', '>', '"']) {
        return Cow::Borrowed(text);
    }

    let mut escaped = String::with_capacity(text.len() + 8);
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            _ => escaped.push(c),
        }
    }
    Cow::Owned(escaped)
}

pub(crate) fn code_block(lang: Option<&str>, content: &str, out: &mut String) {
    out.push_str(r#"<div class="code-block"><pre>"#);
    if let Some(lang) = lang {
        let _ = write!(
            out,
            r#"<code class="language-{}">{}</code>"#,
            escape_html(lang),
            escape_html(content)
        );
    } else {
        let _ = write!(out, "<code>{}</code>", escape_html(content));
    }
    out.push_str("</pre></div>");
}

/// Write a heading. `inner_html` is already rendered inline markup.
pub(crate) fn heading(level: u8, id: Option<&str>, inner_html: &str, out: &mut String) {
    match id {
        Some(id) => {
            let _ = write!(out, r#"<h{level} id="{id}">{inner_html}</h{level}>"#);
        }
        None => {
            let _ = write!(out, "<h{level}>{inner_html}</h{level}>");
        }
    }
}

pub(crate) fn table(rows: &[TableRow], out: &mut String) {
    out.push_str(r#"<table class="docs-table-wrapper"><tbody>"#);
    for row in rows {
        out.push_str("<tr>");
        for cell in &row.cells {
            out.push_str("<td>");
            render_inline(cell, out);
            out.push_str("</td>");
        }
        out.push_str("</tr>");
    }
    out.push_str("</tbody></table>");
}

pub(crate) fn list(items: &[String], out: &mut String) {
    out.push_str("<ul>");
    for item in items {
        out.push_str("<li>");
        render_inline(item, out);
        out.push_str("</li>");
    }
    out.push_str("</ul>");
}

pub(crate) fn paragraph(lines: &[String], out: &mut String) {
    out.push_str("<p>");
    for (idx, line) in lines.iter().enumerate() {
        if idx > 0 {
            out.push_str("<br>");
        }
        render_inline(line, out);
    }
    out.push_str("</p>");
}
