//! Folio CLI - Documentation page viewer.
//!
//! Provides commands for:
//! - `render`: Render a page fragment or a complete HTML document
//! - `sections`: List a page's "On this page" sections
//! - `theme`: Show or change the persisted display theme
//! - `copy`: Copy a page's raw source to the clipboard

mod commands;
mod error;
mod output;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use commands::{CopyArgs, RenderArgs, SectionsArgs, Session, SiteArgs, ThemeArgs};
use error::CliError;
use output::Output;

/// Folio - Documentation page viewer.
#[derive(Parser)]
#[command(name = "folio", version, about)]
struct Cli {
    /// Path to configuration file (default: auto-discover folio.toml).
    #[arg(short, long, global = true, env = "FOLIO_CONFIG")]
    config: Option<PathBuf>,

    /// Enable verbose output.
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(flatten)]
    site: SiteArgs,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Render a page.
    Render(RenderArgs),
    /// List a page's sections.
    Sections(SectionsArgs),
    /// Show or change the display theme.
    Theme(ThemeArgs),
    /// Copy a page's raw source to the clipboard.
    Copy(CopyArgs),
}

fn main() {
    let cli = Cli::parse();
    let output = Output::new();

    // --verbose enables INFO level, otherwise use RUST_LOG or default to WARN
    let filter = if cli.verbose {
        EnvFilter::new("info")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    if let Err(err) = run(cli) {
        output.error(&format!("Error: {err}"));
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<(), CliError> {
    let mut session = Session::load(cli.config.as_deref(), &cli.site)?;
    match cli.command {
        Commands::Render(args) => args.execute(&mut session),
        Commands::Sections(args) => args.execute(&mut session),
        Commands::Theme(args) => args.execute(&mut session),
        Commands::Copy(args) => args.execute(&mut session),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_render_with_globals() {
        let cli = Cli::try_parse_from([
            "folio",
            "render",
            "#docs#quick-start",
            "--document",
            "--config",
            "site/folio.toml",
        ])
        .unwrap();
        assert_eq!(cli.config, Some(PathBuf::from("site/folio.toml")));
        assert!(matches!(cli.command, Commands::Render(_)));
    }

    #[test]
    fn test_parse_theme_default_action() {
        let cli = Cli::try_parse_from(["folio", "theme"]).unwrap();
        assert!(matches!(cli.command, Commands::Theme(_)));
    }

    #[test]
    fn test_parse_theme_rejects_unknown_action() {
        assert!(Cli::try_parse_from(["folio", "theme", "sepia"]).is_err());
    }
}
