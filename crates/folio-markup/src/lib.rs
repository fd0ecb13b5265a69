//! Markup transpiler for documentation pages.
//!
//! Converts a constrained authoring dialect into display markup:
//!
//! - `#` to `####` headings
//! - fenced code blocks with an optional language token
//! - `**bold**`, `*italic*` and `` `code` `` spans
//! - `| a | b |` tables with optional separator lines
//! - `- ` list items
//! - paragraphs, with single newlines rendered as `<br>`
//!
//! # Architecture
//!
//! Transpilation runs in two phases. The block splitter walks the document
//! line by line and produces typed [`Block`]s; code fence interiors are
//! captured verbatim there. The inline pass then renders heading text, table
//! cells, list items and paragraph lines. Code blocks never reach it.
//!
//! # Example
//!
//! ```
//! use folio_markup::transpile;
//!
//! let html = transpile("## Setup\n\n- install\n- run");
//! assert_eq!(html, "<h2>Setup</h2><ul><li>install</li><li>run</li></ul>");
//! ```

mod block;
mod fence;
mod html;
mod inline;
mod toc;
mod transpiler;

pub use block::{Block, TableRow, parse_blocks};
pub use html::escape_html;
pub use toc::{TocEntry, slugify};
pub use transpiler::{TranspileResult, Transpiler, transpile};
