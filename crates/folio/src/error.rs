//! CLI error types.

use folio_config::ConfigError;
use folio_export::ClipboardError;
use folio_page::PageError;

/// CLI error type.
#[derive(Debug, thiserror::Error)]
pub(crate) enum CliError {
    #[error("{0}")]
    Config(#[from] ConfigError),

    #[error("{0}")]
    Io(#[from] std::io::Error),

    #[error("{0}")]
    Page(#[from] PageError),

    #[error("{0}")]
    Clipboard(#[from] ClipboardError),

    #[error("No page matches {0:?}")]
    Route(String),

    #[error("Failed to copy {0} to the clipboard")]
    Copy(String),
}
