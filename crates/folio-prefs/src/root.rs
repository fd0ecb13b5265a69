//! Display root class set.

use crate::theme::Theme;

/// Class every themed documentation view carries.
pub const VIEW_CLASS: &str = "docs-view";

/// The element that carries the theme classes (the page body).
///
/// Classes keep insertion order so the rendered `class` attribute is stable.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct DisplayRoot {
    classes: Vec<String>,
}

impl DisplayRoot {
    /// Create a root with no classes.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a class if not already present.
    pub fn add_class(&mut self, class: &str) {
        if !self.has_class(class) {
            self.classes.push(class.to_owned());
        }
    }

    /// Remove a class if present.
    pub fn remove_class(&mut self, class: &str) {
        self.classes.retain(|c| c != class);
    }

    /// Check for a class.
    #[must_use]
    pub fn has_class(&self, class: &str) -> bool {
        self.classes.iter().any(|c| c == class)
    }

    /// Classes in insertion order.
    pub fn classes(&self) -> impl Iterator<Item = &str> {
        self.classes.iter().map(String::as_str)
    }

    /// Space-separated `class` attribute value.
    #[must_use]
    pub fn class_attr(&self) -> String {
        self.classes.join(" ")
    }

    /// The theme the root is marked with, if any.
    #[must_use]
    pub fn theme(&self) -> Option<Theme> {
        [Theme::Light, Theme::Dark]
            .into_iter()
            .find(|theme| self.has_class(theme.class()))
    }

    /// Mark the root with a theme, replacing the other theme's class.
    pub fn apply_theme(&mut self, theme: Theme) {
        self.add_class(VIEW_CLASS);
        self.remove_class(theme.toggled().class());
        self.add_class(theme.class());
    }

    /// Remove every class a documentation page put on the root.
    pub fn release(&mut self) {
        self.remove_class(VIEW_CLASS);
        self.remove_class(Theme::Light.class());
        self.remove_class(Theme::Dark.class());
    }
}
