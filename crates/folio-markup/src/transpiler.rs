//! Two-phase transpiler: block splitter, then inline pass.

use crate::block::{Block, BlockSplitter};
use crate::html;
use crate::inline::{parse_inline, write_html, write_plain};
use crate::toc::{HeadingIds, TocEntry};

/// Result of transpiling a document.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TranspileResult {
    /// Display fragment markup.
    pub html: String,
    /// Plain text of the first H1 heading (if title extraction was enabled).
    pub title: Option<String>,
    /// Table of contents entries, one per heading in source order.
    pub toc: Vec<TocEntry>,
    /// Best-effort warnings (e.g., unclosed code fences).
    pub warnings: Vec<String>,
}

/// Markup transpiler.
///
/// Transpilation is pure: the same input always produces the same output,
/// and malformed input degrades to literal (escaped) text instead of failing.
///
/// # Example
///
/// ```
/// use folio_markup::Transpiler;
///
/// let result = Transpiler::new()
///     .with_heading_ids()
///     .with_title_extraction()
///     .transpile("# Guide\n\n## Setup\n\nRun it.");
///
/// assert_eq!(result.title.as_deref(), Some("Guide"));
/// assert!(result.html.contains(r#"<h2 id="setup">Setup</h2>"#));
/// ```
#[derive(Clone, Copy, Debug, Default)]
pub struct Transpiler {
    heading_ids: bool,
    extract_title: bool,
}

impl Transpiler {
    /// Create a transpiler that emits bare headings and extracts no title.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Emit `id` attributes on headings.
    ///
    /// Ids are slugs of the heading text; duplicates get `-1`, `-2`, ... suffixes.
    #[must_use]
    pub fn with_heading_ids(mut self) -> Self {
        self.heading_ids = true;
        self
    }

    /// Extract the first H1 heading as the document title.
    ///
    /// The heading is still rendered.
    #[must_use]
    pub fn with_title_extraction(mut self) -> Self {
        self.extract_title = true;
        self
    }

    /// Transpile raw markup.
    #[must_use]
    pub fn transpile(&self, raw: &str) -> TranspileResult {
        let (blocks, warnings) = BlockSplitter::new().split(raw);

        let mut out = String::with_capacity(raw.len() + raw.len() / 2);
        let mut ids = HeadingIds::default();
        let mut toc = Vec::new();
        let mut title = None;

        for block in &blocks {
            match block {
                Block::Code { lang, content } => html::code_block(lang.as_deref(), content, &mut out),
                Block::Heading { level, text } => {
                    let nodes = parse_inline(text);
                    let mut plain = String::new();
                    write_plain(&nodes, &mut plain);
                    let mut inner = String::new();
                    write_html(&nodes, &mut inner);

                    let id = ids.allocate(&plain);
                    let attr = self.heading_ids.then_some(id.as_str());
                    html::heading(*level, attr, &inner, &mut out);

                    if self.extract_title && title.is_none() && *level == 1 {
                        title = Some(plain.clone());
                    }
                    toc.push(TocEntry {
                        level: *level,
                        title: plain,
                        id,
                    });
                }
                Block::Table(rows) => html::table(rows, &mut out),
                Block::List(items) => html::list(items, &mut out),
                Block::Paragraph(lines) => html::paragraph(lines, &mut out),
            }
        }

        // Non-empty input never yields an empty fragment
        if out.is_empty() && !raw.is_empty() {
            out.push_str("<p></p>");
        }

        TranspileResult {
            html: out,
            title,
            toc,
            warnings,
        }
    }
}

/// Transpile raw markup into a display fragment.
///
/// Equivalent to `Transpiler::new().transpile(raw).html`.
///
/// # Example
///
/// ```
/// use folio_markup::transpile;
///
/// assert_eq!(
///     transpile("**bold *and* more**"),
///     "<p><strong>bold <em>and</em> more</strong></p>"
/// );
/// ```
#[must_use]
pub fn transpile(raw: &str) -> String {
    Transpiler::new().transpile(raw).html
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_transpile_is_deterministic() {
        let raw = "# Title\n\nSome *text* with `code`.\n\n| a | b |\n|---|---|\n| 1 | 2 |";
        assert_eq!(transpile(raw), transpile(raw));
    }

    #[test]
    fn test_table_example() {
        let html = transpile("| a | b |\n|---|---|\n| 1 | 2 |");
        assert_eq!(
            html,
            r#"<table class="docs-table-wrapper"><tbody><tr><td>a</td><td>b</td></tr><tr><td>1</td><td>2</td></tr></tbody></table>"#
        );
        assert_eq!(html.matches("docs-table-wrapper").count(), 1);
    }

    #[test]
    fn test_bold_nests_italic() {
        assert_eq!(
            transpile("**bold *and* more**"),
            "<p><strong>bold <em>and</em> more</strong></p>"
        );
    }

    #[test]
    fn test_fence_keeps_markers_literal() {
        let html = transpile("```\n**not bold**\n```");
        assert_eq!(
            html,
            "<div class=\"code-block\"><pre><code>**not bold**\n</code></pre></div>"
        );
        assert!(!html.contains("<strong>"));
    }

    #[test]
    fn test_whitespace_only_input() {
        assert_eq!(transpile("   \n\n  "), "<p></p>");
    }

    #[test]
    fn test_empty_input() {
        assert_eq!(transpile(""), "");
    }

    #[test]
    fn test_non_empty_input_never_empty_output() {
        for raw in ["\n", "|", "- ", "#", "```", "**", "|---|", " \t "] {
            assert!(!transpile(raw).is_empty(), "empty output for {raw:?}");
        }
    }

    #[test]
    fn test_malformed_input_degrades() {
        assert_eq!(transpile("**unclosed *mixed"), "<p>**unclosed *mixed</p>");
    }

    #[test]
    fn test_raw_html_is_escaped() {
        assert_eq!(
            transpile("<script>alert(1)</script>"),
            "<p>&lt;script&gt;alert(1)&lt;/script&gt;</p>"
        );
    }

    #[test]
    fn test_blocks_concatenate_without_separators() {
        assert_eq!(
            transpile("## Install\nRun this:\n- one\n- two"),
            "<h2>Install</h2><p>Run this:</p><ul><li>one</li><li>two</li></ul>"
        );
    }

    #[test]
    fn test_heading_ids_and_toc() {
        let result = Transpiler::new()
            .with_heading_ids()
            .transpile("## FAQ\n\n## FAQ\n\n### Why `async`?");
        assert_eq!(
            result.html,
            r#"<h2 id="faq">FAQ</h2><h2 id="faq-1">FAQ</h2><h3 id="why-async">Why <code>async</code>?</h3>"#
        );
        let ids: Vec<&str> = result.toc.iter().map(|e| e.id.as_str()).collect();
        assert_eq!(ids, vec!["faq", "faq-1", "why-async"]);
        assert_eq!(result.toc[2].title, "Why async?");
        assert_eq!(result.title, None);
    }

    #[test]
    fn test_heading_ids_unique_when_slug_matches_suffix() {
        let result = Transpiler::new()
            .with_heading_ids()
            .transpile("## FAQ\n\n## FAQ\n\n## FAQ 1");
        assert_eq!(
            result.html,
            r#"<h2 id="faq">FAQ</h2><h2 id="faq-1">FAQ</h2><h2 id="faq-1-1">FAQ 1</h2>"#
        );
        let mut ids: Vec<&str> = result.toc.iter().map(|e| e.id.as_str()).collect();
        ids.sort_unstable();
        ids.dedup();
        assert_eq!(ids.len(), result.toc.len());
    }

    #[test]
    fn test_title_extraction_uses_first_h1() {
        let result = Transpiler::new()
            .with_title_extraction()
            .transpile("## Intro\n\n# **Main** Title\n\n# Second");
        assert_eq!(result.title.as_deref(), Some("Main Title"));
        assert!(result.html.contains("<h1><strong>Main</strong> Title</h1>"));
    }

    #[test]
    fn test_unclosed_fence_warning() {
        let result = Transpiler::new().transpile("text\n\n```rust\nfn main() {}");
        assert_eq!(result.warnings.len(), 1);
        assert!(
            result
                .html
                .ends_with("<code class=\"language-rust\">fn main() {}\n</code></pre></div>")
        );
    }
}
