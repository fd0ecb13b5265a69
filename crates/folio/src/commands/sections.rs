//! `folio sections` command implementation.

use clap::Args;
use folio_page::PageController;
use folio_sections::RegionRect;

use super::Session;
use crate::error::CliError;
use crate::output::Output;

/// Arguments for the sections command.
#[derive(Args)]
pub(crate) struct SectionsArgs {
    /// Navigation fragment. Empty lists the first page.
    #[arg(default_value = "")]
    fragment: String,

    /// Region geometry to observe, as `ID:TOP:BOTTOM` in viewport coordinates.
    #[arg(long = "region", value_parser = parse_region)]
    regions: Vec<RegionRect>,

    /// Viewport height used with `--region`.
    #[arg(long, default_value_t = 800.0)]
    viewport_height: f64,
}

impl SectionsArgs {
    pub(crate) fn execute(self, session: &mut Session) -> Result<(), CliError> {
        let output = Output::new();
        let (page, _) = session.page(&self.fragment)?;

        let mut mounted = PageController::mount(&mut session.ctx, page);
        if !self.regions.is_empty() {
            for transition in mounted.observe(&self.regions, self.viewport_height) {
                tracing::info!(id = %transition.id, in_band = transition.in_band, "Region transition");
            }
        }

        output.highlight(mounted.title());
        let view = mounted.view();
        if view.sections.is_empty() {
            output.info("No sections");
            return Ok(());
        }
        for section in &view.sections {
            let marker = if section.active { '*' } else { ' ' };
            output.print(&format!("{marker} {}\t{}", section.label, section.href))?;
        }
        Ok(())
    }
}

/// Parse `ID:TOP:BOTTOM`. The id may itself contain colons.
fn parse_region(value: &str) -> Result<RegionRect, String> {
    let mut parts = value.rsplitn(3, ':');
    let (Some(bottom), Some(top), Some(id)) = (parts.next(), parts.next(), parts.next()) else {
        return Err(format!("expected ID:TOP:BOTTOM, got {value:?}"));
    };
    let number = |s: &str| {
        s.trim()
            .parse::<f64>()
            .map_err(|e| format!("invalid coordinate {s:?}: {e}"))
    };
    Ok(RegionRect::new(id, number(top)?, number(bottom)?))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_parse_region() {
        assert_eq!(
            parse_region("quick-start:120:480").unwrap(),
            RegionRect::new("quick-start", 120.0, 480.0)
        );
    }

    #[test]
    fn test_parse_region_negative_and_colon_id() {
        assert_eq!(
            parse_region("a:b:-40.5:10").unwrap(),
            RegionRect::new("a:b", -40.5, 10.0)
        );
    }

    #[test]
    fn test_parse_region_invalid() {
        assert!(parse_region("intro:10").is_err());
        assert!(parse_region("intro:x:10").is_err());
    }
}
