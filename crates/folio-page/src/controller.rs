//! Page lifecycle: mount, interact, unmount.

use std::sync::Arc;

use folio_export::{Clipboard, CopyOutcome, ExportAction};
use folio_markup::{TocEntry, TranspileResult, Transpiler};
use folio_prefs::Theme;
use folio_sections::{RegionRect, SectionDescriptor, SectionTracker, Transition};

use crate::context::DocsContext;
use crate::page::Page;
use crate::site::SiteMap;
use crate::template::{self, DocumentData};
use crate::view::{PageView, SectionLink, toggle_label};

/// Mounts pages into a [`DocsContext`].
#[derive(Debug, Clone, Copy, Default)]
pub struct PageController;

impl PageController {
    /// Mount a page.
    ///
    /// Steps run in order: transpile with heading ids, resolve and apply the
    /// theme, create an idle copy action, then start section tracking. The
    /// tracker only ever observes a fragment that already exists.
    pub fn mount(ctx: &mut DocsContext, page: Page) -> MountedPage<'_> {
        let rendered = Transpiler::new()
            .with_heading_ids()
            .with_title_extraction()
            .transpile(&page.markdown);
        for warning in &rendered.warnings {
            tracing::warn!(page = %page.key, warning = %warning, "Markup warning");
        }

        let theme = ctx.preferences.resolve();
        ctx.preferences.apply(&mut ctx.root, theme);

        let export = ExportAction::new(Arc::clone(&ctx.clock)).with_window(ctx.export_window);

        let sections = section_list(&page, &rendered.toc);
        for section in &sections {
            if !rendered.toc.iter().any(|entry| entry.id == section.id) {
                tracing::warn!(page = %page.key, section = %section.id, "Section has no matching heading");
            }
        }
        let tracker = SectionTracker::new(sections.iter().map(|s| s.id.clone()))
            .with_band(ctx.band)
            .with_tie_break(ctx.tie_break);

        tracing::debug!(page = %page.key, theme = %theme, sections = sections.len(), "Mounted page");

        MountedPage {
            ctx,
            page,
            rendered,
            sections,
            tracker,
            export,
        }
    }
}

/// Declared sections, or the level-2 headings when none are declared.
fn section_list(page: &Page, toc: &[TocEntry]) -> Vec<SectionDescriptor> {
    if !page.sections.is_empty() {
        return page.sections.clone();
    }
    toc.iter()
        .filter(|entry| entry.level == 2)
        .map(|entry| SectionDescriptor::new(&entry.id, &entry.title))
        .collect()
}

/// A page mounted into a session.
///
/// Dropping it stops section tracking, disarms the copy confirmation and
/// removes the page's classes from the display root.
pub struct MountedPage<'a> {
    ctx: &'a mut DocsContext,
    page: Page,
    rendered: TranspileResult,
    sections: Vec<SectionDescriptor>,
    tracker: SectionTracker,
    export: ExportAction,
}

impl MountedPage<'_> {
    /// The mounted page.
    #[must_use]
    pub fn page(&self) -> &Page {
        &self.page
    }

    /// Display fragment markup.
    #[must_use]
    pub fn fragment(&self) -> &str {
        &self.rendered.html
    }

    /// Title from the first H1, falling back to the navigation label.
    #[must_use]
    pub fn title(&self) -> &str {
        self.rendered.title.as_deref().unwrap_or(&self.page.label)
    }

    /// Headings in source order.
    #[must_use]
    pub fn toc(&self) -> &[TocEntry] {
        &self.rendered.toc
    }

    /// Tracked sections in order.
    #[must_use]
    pub fn sections(&self) -> &[SectionDescriptor] {
        &self.sections
    }

    /// Feed region geometry to the section tracker.
    pub fn observe(&mut self, rects: &[RegionRect], viewport_height: f64) -> Vec<Transition> {
        self.tracker.observe(rects, viewport_height)
    }

    /// Id of the active section.
    #[must_use]
    pub fn active_section(&self) -> Option<&str> {
        self.tracker.active_id()
    }

    /// Applied theme.
    #[must_use]
    pub fn theme(&self) -> Theme {
        self.ctx.preferences.current().unwrap_or_default()
    }

    /// Flip the theme, apply it to the display root and persist it.
    pub fn toggle_theme(&mut self) -> Theme {
        let ctx = &mut *self.ctx;
        ctx.preferences.toggle(&mut ctx.root)
    }

    /// Copy the page's raw source to the clipboard.
    pub async fn copy_source(&mut self, clipboard: &dyn Clipboard) -> CopyOutcome {
        self.export.copy(clipboard, &self.page.markdown).await
    }

    /// Snapshot of the page controls and "On this page" entries.
    #[must_use]
    pub fn view(&self) -> PageView {
        let theme = self.theme();
        let active = self.active_section();
        PageView {
            theme,
            toggle_label: toggle_label(theme),
            copy_label: self.export.label(),
            copy_confirmed: self.export.is_confirmed(),
            sections: self
                .sections
                .iter()
                .map(|section| SectionLink {
                    id: section.id.clone(),
                    label: section.label.clone(),
                    href: section.href(&self.page.key),
                    active: active == Some(section.id.as_str()),
                })
                .collect(),
        }
    }

    /// Render the page as a complete HTML document.
    #[must_use]
    pub fn render_document(&self, site: &SiteMap) -> String {
        template::render_document(&DocumentData {
            site,
            page_key: &self.page.key,
            title: self.title(),
            body_class: self.ctx.root.class_attr(),
            fragment: self.fragment(),
            view: self.view(),
        })
    }

    /// Unmount the page, releasing everything it set up.
    pub fn unmount(self) {
        drop(self);
    }
}

impl Drop for MountedPage<'_> {
    fn drop(&mut self) {
        self.tracker.teardown();
        self.export.teardown();
        self.ctx.root.release();
        tracing::debug!(page = %self.page.key, "Unmounted page");
    }
}

impl std::fmt::Debug for MountedPage<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MountedPage")
            .field("page", &self.page.key)
            .field("tracker", &self.tracker)
            .field("export", &self.export)
            .finish_non_exhaustive()
    }
}
