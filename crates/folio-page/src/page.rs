//! Page data supplied by the host.

use std::path::Path;

use folio_config::{Config, PageConfig};
use folio_sections::SectionDescriptor;

use crate::error::PageError;

/// A documentation page: navigation identity plus raw markup.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Page {
    /// Navigation key (e.g., `docs/getting-started`).
    pub key: String,
    /// Stable page id.
    pub id: String,
    /// Navigation label.
    pub label: String,
    /// Raw source in the markup dialect.
    pub markdown: String,
    /// "On this page" sections. When empty, level-2 headings are used.
    pub sections: Vec<SectionDescriptor>,
}

impl Page {
    /// Create a page without declared sections.
    pub fn new(
        key: impl Into<String>,
        id: impl Into<String>,
        label: impl Into<String>,
        markdown: impl Into<String>,
    ) -> Self {
        Self {
            key: key.into(),
            id: id.into(),
            label: label.into(),
            markdown: markdown.into(),
            sections: Vec::new(),
        }
    }

    /// Declare the "On this page" sections.
    #[must_use]
    pub fn with_sections(mut self, sections: Vec<SectionDescriptor>) -> Self {
        self.sections = sections;
        self
    }

    /// Load a configured page, reading its source from the content directory.
    ///
    /// # Errors
    ///
    /// Returns [`PageError::NotFound`] for an unknown key and
    /// [`PageError::Io`] when the source cannot be read.
    pub fn load(config: &Config, key: &str) -> Result<Self, PageError> {
        let entry = config
            .page(key)
            .ok_or_else(|| PageError::NotFound(key.to_owned()))?;
        let path = config.page_source(entry);
        let markdown = read_source(&path)?;
        tracing::debug!(key, path = %path.display(), "Loaded page source");
        Ok(Self::from_config(entry, markdown))
    }

    fn from_config(entry: &PageConfig, markdown: String) -> Self {
        Self::new(&entry.key, &entry.id, &entry.label, markdown)
            .with_sections(entry.sections.clone())
    }
}

fn read_source(path: &Path) -> Result<String, PageError> {
    std::fs::read_to_string(path).map_err(|source| PageError::Io {
        path: path.to_path_buf(),
        source,
    })
}
