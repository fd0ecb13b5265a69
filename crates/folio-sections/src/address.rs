//! Section descriptors and navigation addresses.
//!
//! Addresses have the form `<page-key>#<section-id>`. Hosts usually carry them
//! in a URL fragment, so a leading `#` is accepted when parsing.

use std::fmt;

/// A labeled section of a page.
///
/// The id must match an `id` attribute in the rendered fragment; the label is
/// what the sidebar shows.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SectionDescriptor {
    /// Anchor id of the section.
    pub id: String,
    /// Sidebar label.
    pub label: String,
}

impl SectionDescriptor {
    /// Create a descriptor.
    pub fn new(id: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            label: label.into(),
        }
    }

    /// Sidebar link to this section on the given page: `#<page-key>#<id>`.
    ///
    /// # Example
    ///
    /// ```
    /// use folio_sections::SectionDescriptor;
    ///
    /// let section = SectionDescriptor::new("installation", "Installation");
    /// assert_eq!(section.href("docs/getting-started"), "#docs/getting-started#installation");
    /// ```
    #[must_use]
    pub fn href(&self, page_key: &str) -> String {
        format!("#{page_key}#{}", self.id)
    }
}

/// Navigation address: a page key plus an optional section id.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct Address {
    /// Page key (e.g., `docs/getting-started`). Empty for the landing page.
    pub page: String,
    /// Section id within the page.
    pub section: Option<String>,
}

impl Address {
    /// Create an address for a page, without a section.
    pub fn page(page: impl Into<String>) -> Self {
        Self {
            page: page.into(),
            section: None,
        }
    }

    /// Attach a section id.
    #[must_use]
    pub fn with_section(mut self, section: impl Into<String>) -> Self {
        self.section = Some(section.into());
        self
    }

    /// Parse a fragment such as `#docs/getting-started#installation`.
    ///
    /// Parsing is total: surrounding whitespace and one leading `#` are
    /// ignored, and an empty section part counts as no section.
    ///
    /// # Example
    ///
    /// ```
    /// use folio_sections::Address;
    ///
    /// let address = Address::parse("#docs/getting-started#installation");
    /// assert_eq!(address.page, "docs/getting-started");
    /// assert_eq!(address.section.as_deref(), Some("installation"));
    ///
    /// assert_eq!(Address::parse(""), Address::default());
    /// ```
    #[must_use]
    pub fn parse(fragment: &str) -> Self {
        let trimmed = fragment.trim();
        let trimmed = trimmed.strip_prefix('#').unwrap_or(trimmed);

        match trimmed.split_once('#') {
            Some((page, section)) => Self {
                page: page.to_owned(),
                section: (!section.is_empty()).then(|| section.to_owned()),
            },
            None => Self::page(trimmed),
        }
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.section {
            Some(section) => write!(f, "{}#{section}", self.page),
            None => f.write_str(&self.page),
        }
    }
}
