//! Page loading errors.

use std::path::PathBuf;

/// Error loading a page from the site configuration.
#[derive(Debug, thiserror::Error)]
pub enum PageError {
    /// No page is registered under the navigation key.
    #[error("Page not found: {0}")]
    NotFound(String),
    /// The page source could not be read.
    #[error("Failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}
