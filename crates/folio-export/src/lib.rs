//! Copy-source action for documentation pages.
//!
//! [`ExportAction`] writes a page's raw markup to a [`Clipboard`] and shows a
//! short confirmation. Time comes from an injectable [`Clock`], so the
//! confirmation window is testable without sleeping.
//!
//! # Backends
//!
//! - [`MemoryClipboard`]: records writes, optionally denies them
//! - [`CommandClipboard`]: pipes text to `pbcopy`, `wl-copy`, `xclip` or `clip`
//!
//! # Example
//!
//! ```
//! use std::sync::Arc;
//! use folio_export::{ExportAction, ExportStatus, MemoryClipboard, SystemClock};
//!
//! # tokio::runtime::Builder::new_current_thread().build().unwrap().block_on(async {
//! let clipboard = MemoryClipboard::new();
//! let mut action = ExportAction::new(Arc::new(SystemClock));
//!
//! action.copy(&clipboard, "# Getting Started").await;
//! assert_eq!(action.status(), ExportStatus::Confirmed);
//! assert_eq!(action.label(), "Copied!");
//! # });
//! ```

mod action;
mod clipboard;
mod clock;

pub use action::{CONFIRMED_LABEL, CopyOutcome, DEFAULT_WINDOW, ExportAction, ExportStatus, IDLE_LABEL};
pub use clipboard::{Clipboard, ClipboardError, CommandClipboard, MemoryClipboard};
pub use clock::{Clock, ManualClock, SystemClock};
