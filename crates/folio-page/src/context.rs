//! Shared state for every page mounted in a session.

use std::sync::Arc;
use std::time::Duration;

use folio_config::{AmbientSetting, Config};
use folio_export::{Clock, DEFAULT_WINDOW};
use folio_prefs::{
    AmbientSignal, DisplayRoot, FileStore, FixedSignal, KeyValueStore, PreferenceStore,
    SystemSignal, Theme,
};
use folio_sections::{TieBreak, ViewportBand};

/// Session context passed into [`PageController::mount`](crate::PageController::mount).
///
/// Owns the display preference and the display root, so the theme survives
/// navigation between pages while per-page state does not.
pub struct DocsContext {
    /// Theme preference for the session.
    pub preferences: PreferenceStore,
    /// Element carrying the theme classes.
    pub root: DisplayRoot,
    /// Time source for the copy confirmation.
    pub clock: Arc<dyn Clock>,
    /// Copy confirmation window.
    pub export_window: Duration,
    /// Viewport band for section tracking.
    pub band: ViewportBand,
    /// Section tie-break policy.
    pub tie_break: TieBreak,
}

impl DocsContext {
    /// Create a context with default window, band and tie-break.
    pub fn new(preferences: PreferenceStore, clock: Arc<dyn Clock>) -> Self {
        Self {
            preferences,
            root: DisplayRoot::new(),
            clock,
            export_window: DEFAULT_WINDOW,
            band: ViewportBand::default(),
            tie_break: TieBreak::default(),
        }
    }

    /// Build a context from the site configuration.
    ///
    /// Preferences persist in a [`FileStore`] under the configured store
    /// directory, scoped by the site origin.
    pub fn from_config(config: &Config, clock: Arc<dyn Clock>) -> Self {
        let store: Arc<dyn KeyValueStore> =
            Arc::new(FileStore::new(&config.store_dir, &config.site.origin));
        let preferences = PreferenceStore::new(store, ambient_signal(config.preferences.ambient))
            .with_key(&config.preferences.key);

        Self {
            export_window: config.export.window(),
            band: config.tracker.band(),
            tie_break: config.tracker.tie_break,
            ..Self::new(preferences, clock)
        }
    }

    /// Use a custom copy confirmation window.
    #[must_use]
    pub fn with_export_window(mut self, window: Duration) -> Self {
        self.export_window = window;
        self
    }

    /// Use a custom viewport band.
    #[must_use]
    pub fn with_band(mut self, band: ViewportBand) -> Self {
        self.band = band;
        self
    }

    /// Use a custom tie-break policy.
    #[must_use]
    pub fn with_tie_break(mut self, tie_break: TieBreak) -> Self {
        self.tie_break = tie_break;
        self
    }
}

fn ambient_signal(setting: AmbientSetting) -> Box<dyn AmbientSignal> {
    match setting {
        AmbientSetting::System => Box::new(SystemSignal::new()),
        AmbientSetting::Light => Box::new(FixedSignal::new(Some(Theme::Light))),
        AmbientSetting::Dark => Box::new(FixedSignal::new(Some(Theme::Dark))),
        AmbientSetting::Disabled => Box::new(FixedSignal::new(None)),
    }
}

impl std::fmt::Debug for DocsContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DocsContext")
            .field("preferences", &self.preferences)
            .field("root", &self.root)
            .field("export_window", &self.export_window)
            .field("band", &self.band)
            .field("tie_break", &self.tie_break)
            .finish_non_exhaustive()
    }
}
