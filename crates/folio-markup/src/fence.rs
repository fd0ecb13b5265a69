//! Code fence detection for the block splitter.
//!
//! The dialect only knows backtick fences. An opening fence may carry a
//! language token; the closing fence must be at least as long as the opening
//! one and contain nothing but backticks and whitespace.

/// An opened fence: its length and optional language token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct FenceOpen {
    /// Number of backticks in the opening fence.
    pub len: usize,
    /// Language token following the opening fence, if any.
    pub lang: Option<String>,
}

/// Tracks code fence state during line-by-line processing.
#[derive(Debug, Default)]
pub(crate) struct FenceTracker {
    open: Option<usize>,
}

impl FenceTracker {
    /// Create a new fence tracker.
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Check if currently inside a fenced code block.
    pub(crate) fn in_fence(&self) -> bool {
        self.open.is_some()
    }

    /// Try to open a fence on this line.
    ///
    /// Returns the fence details when the line opens one. Does nothing while
    /// already inside a fence.
    pub(crate) fn open(&mut self, line: &str) -> Option<FenceOpen> {
        if self.open.is_some() {
            return None;
        }
        let fence = detect_fence(line.trim_start())?;
        self.open = Some(fence.len);
        Some(fence)
    }

    /// Try to close the current fence on this line.
    ///
    /// Returns `true` if the line closed the fence.
    pub(crate) fn close(&mut self, line: &str) -> bool {
        match self.open {
            Some(min_len) if is_closing_fence(line.trim_start(), min_len) => {
                self.open = None;
                true
            }
            _ => false,
        }
    }
}

/// Detect if a line starts a code fence.
fn detect_fence(trimmed: &str) -> Option<FenceOpen> {
    let len = trimmed.chars().take_while(|&c| c == '`').count();
    if len < 3 {
        return None;
    }

    let info = trimmed[len..].trim();
    // A backtick in the info string means this is inline code, not a fence.
    if info.contains('`') {
        return None;
    }
    let lang = info.split_whitespace().next().map(ToOwned::to_owned);

    Some(FenceOpen { len, lang })
}

/// Check if a line is a valid closing fence.
fn is_closing_fence(trimmed: &str, min_len: usize) -> bool {
    let count = trimmed.chars().take_while(|&c| c == '`').count();
    count >= min_len && trimmed[count..].chars().all(char::is_whitespace)
}
