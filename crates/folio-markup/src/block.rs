//! Block splitter: the first phase of transpilation.
//!
//! Splits raw markup into typed blocks line by line. Fenced code blocks are
//! captured verbatim and never reach the inline pass, so markers inside them
//! stay literal no matter what rules run afterwards.

use crate::fence::FenceTracker;

/// A single table row: ordered, trimmed cell texts.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TableRow {
    /// Cell contents, still in raw (inline) markup.
    pub cells: Vec<String>,
}

impl TableRow {
    fn parse(trimmed: &str) -> Self {
        let inner = &trimmed[1..trimmed.len() - 1];
        Self {
            cells: inner.split('|').map(|c| c.trim().to_owned()).collect(),
        }
    }
}

/// A block-level element of a document.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Block {
    /// Fenced code block. The content is opaque.
    Code {
        /// Language token from the opening fence.
        lang: Option<String>,
        /// Verbatim interior, one `\n` after each line.
        content: String,
    },
    /// Heading of level 1-4.
    Heading {
        /// Heading level.
        level: u8,
        /// Heading text in raw inline markup.
        text: String,
    },
    /// Table made of consecutive row lines (separator lines removed).
    Table(Vec<TableRow>),
    /// Unordered list made of consecutive `- ` lines.
    List(Vec<String>),
    /// Paragraph: consecutive text lines up to a blank line or another block.
    Paragraph(Vec<String>),
}

/// Classification of a single line outside code fences.
enum Line<'a> {
    Blank,
    Heading(u8, &'a str),
    Row(&'a str),
    Separator(&'a str),
    Item(&'a str),
    Text(&'a str),
}

fn classify(line: &str) -> Line<'_> {
    if line.trim().is_empty() {
        return Line::Blank;
    }

    let hashes = line.bytes().take_while(|&b| b == b'#').count();
    if (1..=4).contains(&hashes)
        && let Some(text) = line[hashes..].strip_prefix(' ')
        && let Ok(level) = u8::try_from(hashes)
    {
        return Line::Heading(level, text.trim());
    }

    let trimmed = line.trim();
    if trimmed.len() >= 2 && trimmed.starts_with('|') && trimmed.ends_with('|') {
        if is_separator(trimmed) {
            return Line::Separator(trimmed);
        }
        return Line::Row(trimmed);
    }

    if let Some(item) = line.strip_prefix("- ") {
        return Line::Item(item.trim());
    }

    Line::Text(line.trim_end())
}

/// A separator row contains only dashes, pipes and whitespace, with at least one dash.
fn is_separator(trimmed: &str) -> bool {
    trimmed.contains('-')
        && trimmed
            .chars()
            .all(|c| c == '-' || c == '|' || c.is_whitespace())
}

/// Block under construction.
enum Pending {
    Paragraph(Vec<String>),
    Table {
        rows: Vec<TableRow>,
        raw: Vec<String>,
    },
    List(Vec<String>),
}

impl Pending {
    fn finish(self) -> Block {
        match self {
            Self::Paragraph(lines) => Block::Paragraph(lines),
            // Separator lines alone are not a table
            Self::Table { rows, raw } if rows.is_empty() => Block::Paragraph(raw),
            Self::Table { rows, .. } => Block::Table(rows),
            Self::List(items) => Block::List(items),
        }
    }
}

/// Line-oriented block splitter.
///
/// Collects blocks and warnings for a single document.
#[derive(Default)]
pub(crate) struct BlockSplitter {
    blocks: Vec<Block>,
    pending: Option<Pending>,
    fence: FenceTracker,
    code: Option<(Option<String>, String, usize)>,
    warnings: Vec<String>,
}

impl BlockSplitter {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Split the whole document, returning blocks and warnings.
    pub(crate) fn split(mut self, raw: &str) -> (Vec<Block>, Vec<String>) {
        for (idx, line) in raw.lines().enumerate() {
            self.process_line(line, idx + 1);
        }
        self.finish();
        (self.blocks, self.warnings)
    }

    fn process_line(&mut self, line: &str, line_num: usize) {
        if self.fence.in_fence() {
            if self.fence.close(line) {
                if let Some((lang, content, _)) = self.code.take() {
                    self.blocks.push(Block::Code { lang, content });
                }
            } else if let Some((_, content, _)) = self.code.as_mut() {
                content.push_str(line);
                content.push('\n');
            }
            return;
        }

        if let Some(open) = self.fence.open(line) {
            self.flush();
            self.code = Some((open.lang, String::new(), line_num));
            return;
        }

        match classify(line) {
            Line::Blank => self.flush(),
            Line::Heading(level, text) => {
                self.flush();
                self.blocks.push(Block::Heading {
                    level,
                    text: text.to_owned(),
                });
            }
            Line::Row(trimmed) => self.push_table_line(Some(TableRow::parse(trimmed)), trimmed),
            Line::Separator(trimmed) => self.push_table_line(None, trimmed),
            Line::Item(text) => {
                if let Some(Pending::List(items)) = self.pending.as_mut() {
                    items.push(text.to_owned());
                    return;
                }
                self.flush();
                self.pending = Some(Pending::List(vec![text.to_owned()]));
            }
            Line::Text(text) => {
                if let Some(Pending::Paragraph(lines)) = self.pending.as_mut() {
                    lines.push(text.to_owned());
                    return;
                }
                self.flush();
                self.pending = Some(Pending::Paragraph(vec![text.to_owned()]));
            }
        }
    }

    /// Append a table line, starting a new table if needed.
    ///
    /// Separator lines pass `None` and only land in the raw fallback.
    fn push_table_line(&mut self, row: Option<TableRow>, line: &str) {
        if let Some(Pending::Table { rows, raw }) = self.pending.as_mut() {
            rows.extend(row);
            raw.push(line.to_owned());
            return;
        }
        self.flush();
        self.pending = Some(Pending::Table {
            rows: row.into_iter().collect(),
            raw: vec![line.to_owned()],
        });
    }

    fn flush(&mut self) {
        if let Some(pending) = self.pending.take() {
            self.blocks.push(pending.finish());
        }
    }

    fn finish(&mut self) {
        if let Some((lang, content, line_num)) = self.code.take() {
            self.warnings.push(format!(
                "line {line_num}: unclosed code fence, rendered to end of document"
            ));
            self.blocks.push(Block::Code { lang, content });
        }
        self.flush();
    }
}

/// Split raw markup into blocks.
///
/// This is the first phase of [`transpile`](crate::transpile), exposed for
/// callers that want the typed structure instead of markup.
///
/// # Example
///
/// ```
/// use folio_markup::{Block, parse_blocks};
///
/// let blocks = parse_blocks("## Setup\n\n- one\n- two");
/// assert_eq!(blocks.len(), 2);
/// assert!(matches!(blocks[1], Block::List(ref items) if items.len() == 2));
/// ```
pub fn parse_blocks(raw: &str) -> Vec<Block> {
    BlockSplitter::new().split(raw).0
}
