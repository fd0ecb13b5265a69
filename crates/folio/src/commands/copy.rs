//! `folio copy` command implementation.

use clap::Args;
use folio_export::{CommandClipboard, CopyOutcome};
use folio_page::PageController;

use super::Session;
use crate::error::CliError;
use crate::output::Output;

/// Arguments for the copy command.
#[derive(Args)]
pub(crate) struct CopyArgs {
    /// Navigation fragment. Empty copies the first page.
    #[arg(default_value = "")]
    fragment: String,

    /// Clipboard program reading text on stdin (default: detect per platform).
    #[arg(long, env = "FOLIO_CLIPBOARD")]
    clipboard: Option<String>,
}

impl CopyArgs {
    pub(crate) fn execute(self, session: &mut Session) -> Result<(), CliError> {
        let output = Output::new();
        let clipboard = match self.clipboard {
            Some(program) => CommandClipboard::new(program, &[]),
            None => CommandClipboard::detect()?,
        };
        let (page, _) = session.page(&self.fragment)?;
        let key = page.key.clone();
        let bytes = page.markdown.len();

        let rt = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()?;
        let mut mounted = PageController::mount(&mut session.ctx, page);

        match rt.block_on(mounted.copy_source(&clipboard)) {
            CopyOutcome::Copied => {
                let view = mounted.view();
                output.success(&format!("{} {key} ({bytes} bytes)", view.copy_label));
                Ok(())
            }
            CopyOutcome::Failed => Err(CliError::Copy(key)),
        }
    }
}
