//! `folio render` command implementation.

use std::path::PathBuf;

use clap::Args;
use folio_page::PageController;

use super::Session;
use crate::error::CliError;
use crate::output::Output;

/// Arguments for the render command.
#[derive(Args)]
pub(crate) struct RenderArgs {
    /// Navigation fragment (e.g., `#docs/getting-started#installation`). Empty renders the first page.
    #[arg(default_value = "")]
    fragment: String,

    /// Render a complete HTML document instead of the bare fragment.
    #[arg(long)]
    document: bool,

    /// Write to a file instead of stdout.
    #[arg(short, long)]
    output: Option<PathBuf>,
}

impl RenderArgs {
    pub(crate) fn execute(self, session: &mut Session) -> Result<(), CliError> {
        let output = Output::new();
        let (page, section) = session.page(&self.fragment)?;

        let mounted = PageController::mount(&mut session.ctx, page);
        if let Some(section) = &section
            && !mounted.sections().iter().any(|s| &s.id == section)
        {
            output.warning(&format!("Page has no section {section:?}"));
        }

        let html = if self.document {
            mounted.render_document(&session.site)
        } else {
            mounted.fragment().to_owned()
        };

        match self.output {
            Some(path) => {
                std::fs::write(&path, &html)?;
                output.success(&format!("Wrote {} ({} bytes)", path.display(), html.len()));
            }
            None => output.print(&html)?,
        }
        Ok(())
    }
}
