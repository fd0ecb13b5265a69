//! `folio theme` command implementation.

use clap::{Args, ValueEnum};
use folio_prefs::Theme;

use super::Session;
use crate::error::CliError;
use crate::output::Output;

/// What to do with the stored theme.
#[derive(Clone, Copy, Debug, Default, ValueEnum)]
pub(crate) enum ThemeAction {
    /// Print the resolved theme.
    #[default]
    Show,
    /// Flip between light and dark.
    Toggle,
    /// Switch to light.
    Light,
    /// Switch to dark.
    Dark,
}

/// Arguments for the theme command.
#[derive(Args)]
pub(crate) struct ThemeArgs {
    #[arg(value_enum, default_value_t)]
    action: ThemeAction,
}

impl ThemeAction {
    /// Theme to switch to explicitly.
    fn target(self) -> Option<Theme> {
        match self {
            Self::Light => Some(Theme::Light),
            Self::Dark => Some(Theme::Dark),
            Self::Show | Self::Toggle => None,
        }
    }
}

impl ThemeArgs {
    pub(crate) fn execute(self, session: &mut Session) -> Result<(), CliError> {
        let output = Output::new();
        let ctx = &mut session.ctx;

        let theme = match (self.action, self.action.target()) {
            (_, Some(theme)) => {
                ctx.preferences.apply(&mut ctx.root, theme);
                theme
            }
            (ThemeAction::Toggle, None) => ctx.preferences.toggle(&mut ctx.root),
            (_, None) => ctx.preferences.resolve(),
        };

        output.print(theme.as_str())?;
        if ctx.preferences.persistence_failed() {
            output.warning("Theme preference could not be saved; it applies to this session only");
        }
        Ok(())
    }
}
