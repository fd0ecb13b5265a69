//! Renderable snapshot of a mounted page's controls.

use folio_prefs::Theme;

/// Theme toggle label for the current theme.
#[must_use]
pub fn toggle_label(theme: Theme) -> &'static str {
    match theme {
        Theme::Light => "Switch to dark",
        Theme::Dark => "Switch to light",
    }
}

/// "On this page" entry.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SectionLink {
    /// Anchor id.
    pub id: String,
    /// Sidebar label.
    pub label: String,
    /// Link target: `#<page-key>#<id>`.
    pub href: String,
    /// Whether this is the active section.
    pub active: bool,
}

/// Control and sidebar state of a mounted page.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PageView {
    /// Applied theme.
    pub theme: Theme,
    /// Theme toggle label.
    pub toggle_label: &'static str,
    /// Copy button label.
    pub copy_label: &'static str,
    /// Whether the copy confirmation is showing.
    pub copy_confirmed: bool,
    /// "On this page" entries in order.
    pub sections: Vec<SectionLink>,
}

impl PageView {
    /// The active section entry.
    #[must_use]
    pub fn active_section(&self) -> Option<&SectionLink> {
        self.sections.iter().find(|s| s.active)
    }
}
