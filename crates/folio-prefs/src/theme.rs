//! Light/dark theme value.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Display theme.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    /// Light theme.
    Light,
    /// Dark theme. Used when nothing else decides.
    #[default]
    Dark,
}

impl Theme {
    /// Persisted form: `"light"` or `"dark"`.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Light => "light",
            Self::Dark => "dark",
        }
    }

    /// Parse a persisted value. Anything but `"light"`/`"dark"` is rejected.
    #[must_use]
    pub fn from_stored(value: &str) -> Option<Self> {
        match value {
            "light" => Some(Self::Light),
            "dark" => Some(Self::Dark),
            _ => None,
        }
    }

    /// The other theme.
    #[must_use]
    pub fn toggled(self) -> Self {
        match self {
            Self::Light => Self::Dark,
            Self::Dark => Self::Light,
        }
    }

    /// Display root class for this theme.
    #[must_use]
    pub fn class(self) -> &'static str {
        match self {
            Self::Light => "docs-view-light",
            Self::Dark => "docs-view-dark",
        }
    }
}

impl fmt::Display for Theme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
