//! Theme resolution and persistence.

use std::sync::Arc;

use tracing::{debug, warn};

use crate::ambient::AmbientSignal;
use crate::root::DisplayRoot;
use crate::store::KeyValueStore;
use crate::theme::Theme;

/// Storage key used when none is configured.
pub const DEFAULT_KEY: &str = "puffin-docs-theme";

/// Session-level owner of the display theme.
///
/// The theme is resolved once, on first use, and cached for the session.
/// Every method is infallible: storage errors are logged and recorded in
/// [`persistence_failed`](Self::persistence_failed).
pub struct PreferenceStore {
    store: Arc<dyn KeyValueStore>,
    ambient: Box<dyn AmbientSignal>,
    key: String,
    current: Option<Theme>,
    persistence_failed: bool,
}

impl PreferenceStore {
    /// Create a preference store over a persistence backend and an ambient signal.
    pub fn new(store: Arc<dyn KeyValueStore>, ambient: Box<dyn AmbientSignal>) -> Self {
        Self {
            store,
            ambient,
            key: DEFAULT_KEY.to_owned(),
            current: None,
            persistence_failed: false,
        }
    }

    /// Use a custom storage key.
    #[must_use]
    pub fn with_key(mut self, key: impl Into<String>) -> Self {
        self.key = key.into();
        self
    }

    /// Storage key.
    #[must_use]
    pub fn key(&self) -> &str {
        &self.key
    }

    /// Theme resolved so far in this session, without resolving.
    #[must_use]
    pub fn current(&self) -> Option<Theme> {
        self.current
    }

    /// Whether the most recent write to storage failed.
    #[must_use]
    pub fn persistence_failed(&self) -> bool {
        self.persistence_failed
    }

    /// Resolve the session theme: persisted value, then ambient signal, then dark.
    ///
    /// A theme that did not come from storage is written back.
    pub fn resolve(&mut self) -> Theme {
        if let Some(theme) = self.current {
            return theme;
        }

        let stored = self.read_stored();
        let (theme, source) = match (stored, self.ambient.preferred_theme()) {
            (Some(theme), _) => (theme, "stored"),
            (None, Some(theme)) => (theme, "ambient"),
            (None, None) => (Theme::default(), "default"),
        };
        debug!(theme = %theme, source, "Resolved display theme");

        self.current = Some(theme);
        if stored.is_none() {
            self.persist(theme);
        }
        theme
    }

    /// Mark the display root with `theme` and persist it.
    pub fn apply(&mut self, root: &mut DisplayRoot, theme: Theme) {
        root.apply_theme(theme);
        self.current = Some(theme);
        self.persist(theme);
    }

    /// Flip the theme, apply it and persist it.
    pub fn toggle(&mut self, root: &mut DisplayRoot) -> Theme {
        let next = self.resolve().toggled();
        self.apply(root, next);
        next
    }

    fn read_stored(&self) -> Option<Theme> {
        match self.store.get(&self.key) {
            Ok(Some(value)) => {
                let theme = Theme::from_stored(&value);
                if theme.is_none() {
                    warn!(key = %self.key, value = %value, "Ignoring invalid stored theme");
                }
                theme
            }
            Ok(None) => None,
            Err(e) => {
                warn!(error = %e, key = %self.key, "Preference store unavailable, using ambient signal");
                None
            }
        }
    }

    fn persist(&mut self, theme: Theme) {
        match self.store.set(&self.key, theme.as_str()) {
            Ok(()) => self.persistence_failed = false,
            Err(e) => {
                warn!(error = %e, key = %self.key, "Failed to persist display theme");
                self.persistence_failed = true;
            }
        }
    }
}

impl std::fmt::Debug for PreferenceStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PreferenceStore")
            .field("key", &self.key)
            .field("current", &self.current)
            .field("persistence_failed", &self.persistence_failed)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ambient::FixedSignal;
    use crate::store::{FileStore, MemoryStore};
    use pretty_assertions::assert_eq;

    fn prefs(store: &Arc<MemoryStore>, ambient: Option<Theme>) -> PreferenceStore {
        PreferenceStore::new(Arc::<MemoryStore>::clone(store), Box::new(FixedSignal::new(ambient)))
    }

    #[test]
    fn test_ambient_light_then_toggle_persists_dark() {
        let backend = Arc::new(MemoryStore::new());
        let mut root = DisplayRoot::new();

        let mut session = prefs(&backend, Some(Theme::Light));
        assert_eq!(session.resolve(), Theme::Light);
        assert_eq!(session.toggle(&mut root), Theme::Dark);

        let mut fresh = prefs(&backend, Some(Theme::Light));
        assert_eq!(fresh.resolve(), Theme::Dark);
        assert_eq!(backend.get(DEFAULT_KEY).unwrap().as_deref(), Some("dark"));
    }

    #[test]
    fn test_resolved_theme_is_written_back() {
        let backend = Arc::new(MemoryStore::new());
        prefs(&backend, Some(Theme::Light)).resolve();
        assert_eq!(backend.get(DEFAULT_KEY).unwrap().as_deref(), Some("light"));
    }

    #[test]
    fn test_stored_value_wins_over_ambient() {
        let backend = Arc::new(MemoryStore::new().with_value(DEFAULT_KEY, "light"));
        assert_eq!(prefs(&backend, Some(Theme::Dark)).resolve(), Theme::Light);
    }

    #[test]
    fn test_default_is_dark() {
        let backend = Arc::new(MemoryStore::new());
        assert_eq!(prefs(&backend, None).resolve(), Theme::Dark);
        assert_eq!(backend.get(DEFAULT_KEY).unwrap().as_deref(), Some("dark"));
    }

    #[test]
    fn test_invalid_stored_value_treated_as_absent() {
        let backend = Arc::new(MemoryStore::new().with_value(DEFAULT_KEY, "sepia"));
        assert_eq!(prefs(&backend, Some(Theme::Light)).resolve(), Theme::Light);
        assert_eq!(backend.get(DEFAULT_KEY).unwrap().as_deref(), Some("light"));
    }

    #[test]
    fn test_resolve_is_cached() {
        let backend = Arc::new(MemoryStore::new());
        let mut session = prefs(&backend, Some(Theme::Light));
        session.resolve();
        backend.set(DEFAULT_KEY, "dark").unwrap();
        assert_eq!(session.resolve(), Theme::Light);
    }

    #[test]
    fn test_unavailable_store_falls_back_to_ambient() {
        let backend = Arc::new(MemoryStore::unavailable());
        let mut root = DisplayRoot::new();
        let mut session = prefs(&backend, Some(Theme::Light));

        assert_eq!(session.resolve(), Theme::Light);
        assert!(session.persistence_failed());

        // Toggling still works for the session
        assert_eq!(session.toggle(&mut root), Theme::Dark);
        assert_eq!(session.toggle(&mut root), Theme::Light);
        assert_eq!(root.theme(), Some(Theme::Light));
    }

    #[test]
    fn test_apply_marks_root() {
        let backend = Arc::new(MemoryStore::new());
        let mut root = DisplayRoot::new();
        let mut session = prefs(&backend, None);

        session.apply(&mut root, Theme::Light);
        assert_eq!(root.class_attr(), "docs-view docs-view-light");
        assert_eq!(session.current(), Some(Theme::Light));
        assert_eq!(backend.get(DEFAULT_KEY).unwrap().as_deref(), Some("light"));
    }

    #[test]
    fn test_custom_key() {
        let backend = Arc::new(MemoryStore::new());
        let mut session = prefs(&backend, None).with_key("site-theme");
        session.resolve();
        assert_eq!(backend.get("site-theme").unwrap().as_deref(), Some("dark"));
        assert_eq!(backend.get(DEFAULT_KEY).unwrap(), None);
    }

    #[test]
    fn test_file_store_across_sessions() {
        let tmp = tempfile::TempDir::new().unwrap();
        let open = || {
            PreferenceStore::new(
                Arc::new(FileStore::new(tmp.path(), "puffin-docs")),
                Box::new(FixedSignal::new(Some(Theme::Light))),
            )
        };
        let mut root = DisplayRoot::new();

        let mut first = open();
        first.resolve();
        first.toggle(&mut root);

        assert_eq!(open().resolve(), Theme::Dark);
    }
}
