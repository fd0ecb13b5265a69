//! CLI command implementations.

pub(crate) mod copy;
pub(crate) mod render;
pub(crate) mod sections;
pub(crate) mod theme;

use std::path::{Path, PathBuf};
use std::sync::Arc;

use clap::{Args, ValueEnum};
use folio_config::{AmbientSetting, CliSettings, Config};
use folio_export::SystemClock;
use folio_page::{DocsContext, Page, SiteMap};
use folio_sections::TieBreak;

use crate::error::CliError;

pub(crate) use copy::CopyArgs;
pub(crate) use render::RenderArgs;
pub(crate) use sections::SectionsArgs;
pub(crate) use theme::ThemeArgs;

/// Ambient theme signal source.
#[derive(Clone, Copy, Debug, ValueEnum)]
pub(crate) enum AmbientArg {
    System,
    Light,
    Dark,
    #[value(name = "none")]
    Disabled,
}

impl From<AmbientArg> for AmbientSetting {
    fn from(arg: AmbientArg) -> Self {
        match arg {
            AmbientArg::System => Self::System,
            AmbientArg::Light => Self::Light,
            AmbientArg::Dark => Self::Dark,
            AmbientArg::Disabled => Self::Disabled,
        }
    }
}

/// Section tie-break policy.
#[derive(Clone, Copy, Debug, ValueEnum)]
pub(crate) enum TieBreakArg {
    Latest,
    Earliest,
}

impl From<TieBreakArg> for TieBreak {
    fn from(arg: TieBreakArg) -> Self {
        match arg {
            TieBreakArg::Latest => Self::Latest,
            TieBreakArg::Earliest => Self::Earliest,
        }
    }
}

/// Options shared by every command that loads the site.
#[derive(Args, Debug, Default)]
pub(crate) struct SiteArgs {
    /// Page source directory (overrides config).
    #[arg(long, global = true)]
    content_dir: Option<PathBuf>,

    /// Preference store directory (overrides config).
    #[arg(long, global = true, env = "FOLIO_STORE_DIR")]
    store_dir: Option<PathBuf>,

    /// Ambient theme signal (overrides config).
    #[arg(long, global = true, value_enum)]
    ambient: Option<AmbientArg>,

    /// Section tie-break policy (overrides config).
    #[arg(long, global = true, value_enum)]
    tie_break: Option<TieBreakArg>,
}

impl SiteArgs {
    fn cli_settings(&self) -> CliSettings {
        CliSettings {
            content_dir: self.content_dir.clone(),
            store_dir: self.store_dir.clone(),
            ambient: self.ambient.map(Into::into),
            tie_break: self.tie_break.map(Into::into),
        }
    }
}

/// Loaded configuration plus everything derived from it.
pub(crate) struct Session {
    pub(crate) config: Config,
    pub(crate) site: SiteMap,
    pub(crate) ctx: DocsContext,
}

impl Session {
    /// Load configuration and build the site map and session context.
    pub(crate) fn load(config_path: Option<&Path>, args: &SiteArgs) -> Result<Self, CliError> {
        let config = Config::load(config_path, Some(&args.cli_settings()))?;
        let site = SiteMap::from_config(&config);
        let ctx = DocsContext::from_config(&config, Arc::new(SystemClock));
        tracing::debug!(
            content_dir = %config.content_dir.display(),
            pages = config.pages.len(),
            "Loaded site"
        );
        Ok(Self { config, site, ctx })
    }

    /// Resolve a navigation fragment and read the page it names.
    pub(crate) fn page(&self, fragment: &str) -> Result<(Page, Option<String>), CliError> {
        let route = self
            .site
            .route(fragment)
            .ok_or_else(|| CliError::Route(fragment.to_owned()))?;
        let page = Page::load(&self.config, &route.link.key)?;
        Ok((page, route.section))
    }
}
