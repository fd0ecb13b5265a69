//! Documentation page controller for Folio.
//!
//! Ties the markup transpiler, section tracker, display preference and copy
//! action together for one page at a time. A [`DocsContext`] holds the
//! session state; [`PageController::mount`] turns a [`Page`] into a
//! [`MountedPage`] that the host drives until it is unmounted or dropped.
//!
//! # Example
//!
//! ```
//! use std::sync::Arc;
//! use folio_export::SystemClock;
//! use folio_page::{DocsContext, Page, PageController};
//! use folio_prefs::{FixedSignal, MemoryStore, PreferenceStore, Theme};
//!
//! let prefs = PreferenceStore::new(
//!     Arc::new(MemoryStore::new()),
//!     Box::new(FixedSignal::new(Some(Theme::Light))),
//! );
//! let mut ctx = DocsContext::new(prefs, Arc::new(SystemClock));
//!
//! let page = Page::new("docs", "intro", "Introduction", "# Intro\n\n## Setup\n\nRun it.");
//! let mounted = PageController::mount(&mut ctx, page);
//!
//! assert_eq!(mounted.active_section(), Some("setup"));
//! assert_eq!(mounted.view().toggle_label, "Switch to dark");
//! ```

mod context;
mod controller;
mod error;
mod page;
mod site;
mod template;
mod view;

pub use context::DocsContext;
pub use controller::{MountedPage, PageController};
pub use error::PageError;
pub use page::Page;
pub use site::{NavGroup, NavLink, Route, SiteMap};
pub use view::{PageView, SectionLink, toggle_label};
