//! Display preference for documentation pages.
//!
//! [`PreferenceStore`] resolves the light/dark [`Theme`] once per session:
//! a persisted value wins, then the platform's ambient signal, then dark.
//! Whatever it resolves is written back, so later sessions are deterministic.
//!
//! Two traits keep it testable:
//!
//! - [`KeyValueStore`]: origin-scoped persistence ([`MemoryStore`], [`FileStore`])
//! - [`AmbientSignal`]: platform light/dark preference ([`FixedSignal`], [`SystemSignal`])
//!
//! Storage failures never reach the caller. They are logged and the session
//! continues with the in-memory theme.
//!
//! # Example
//!
//! ```
//! use std::sync::Arc;
//! use folio_prefs::{DisplayRoot, FixedSignal, MemoryStore, PreferenceStore, Theme};
//!
//! let backend = Arc::new(MemoryStore::new());
//! let mut prefs = PreferenceStore::new(backend, Box::new(FixedSignal::new(Some(Theme::Light))));
//! let mut root = DisplayRoot::new();
//!
//! assert_eq!(prefs.resolve(), Theme::Light);
//! assert_eq!(prefs.toggle(&mut root), Theme::Dark);
//! assert_eq!(root.class_attr(), "docs-view docs-view-dark");
//! ```

mod ambient;
mod preference;
mod root;
mod store;
mod theme;

pub use ambient::{AmbientSignal, COLOR_SCHEME_ENV, FixedSignal, SystemSignal};
pub use preference::{DEFAULT_KEY, PreferenceStore};
pub use root::{DisplayRoot, VIEW_CLASS};
pub use store::{FileStore, KeyValueStore, MemoryStore, StoreError};
pub use theme::Theme;
