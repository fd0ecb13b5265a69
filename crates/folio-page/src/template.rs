//! HTML document template for a mounted page.
//!
//! The layout is a sidebar (site navigation, then "On this page") next to a
//! main column holding the control bar and the rendered fragment.

use std::fmt::Write;

use folio_markup::escape_html as escape;

use crate::site::{NavGroup, SiteMap};
use crate::view::{PageView, SectionLink};

/// Everything the document template needs.
pub(crate) struct DocumentData<'a> {
    pub site: &'a SiteMap,
    pub page_key: &'a str,
    pub title: &'a str,
    pub body_class: String,
    pub fragment: &'a str,
    pub view: PageView,
}

/// Render a complete HTML document.
pub(crate) fn render_document(doc: &DocumentData<'_>) -> String {
    let mut html = String::with_capacity(4096 + doc.fragment.len());

    html.push_str("<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n");
    html.push_str("<meta charset=\"utf-8\">\n");
    html.push_str("<meta name=\"viewport\" content=\"width=device-width, initial-scale=1\">\n");
    if doc.site.title.is_empty() || doc.site.title == doc.title {
        let _ = writeln!(html, "<title>{}</title>", escape(doc.title));
    } else {
        let _ = writeln!(
            html,
            "<title>{} - {}</title>",
            escape(doc.title),
            escape(&doc.site.title)
        );
    }
    html.push_str("</head>\n");
    let _ = writeln!(html, "<body class=\"{}\">", escape(&doc.body_class));

    html.push_str("<div class=\"docs-layout\">\n");
    render_sidebar(&mut html, doc);

    html.push_str("<main class=\"docs-main\">\n");
    render_controls(&mut html, &doc.view);
    html.push_str("<article class=\"prose-docs\">\n");
    html.push_str(doc.fragment);
    html.push_str("\n</article>\n</main>\n");

    html.push_str("</div>\n</body>\n</html>\n");
    html
}

fn render_sidebar(html: &mut String, doc: &DocumentData<'_>) {
    html.push_str("<aside class=\"docs-sidebar\">\n");
    let _ = writeln!(
        html,
        "<a href=\"#\" class=\"docs-site-title\">{}</a>",
        escape(&doc.site.title)
    );

    html.push_str("<nav class=\"docs-nav\">\n");
    for group in &doc.site.groups {
        render_nav_group(html, group, doc.page_key);
    }
    html.push_str("</nav>\n");

    render_on_this_page(html, &doc.view.sections);
    html.push_str("</aside>\n");
}

fn render_nav_group(html: &mut String, group: &NavGroup, page_key: &str) {
    if group.links.is_empty() {
        return;
    }
    html.push_str("<div class=\"nav-group\">\n");
    let _ = writeln!(html, "<h3 class=\"nav-group-title\">{}</h3>", escape(&group.title));
    html.push_str("<ul>\n");
    for link in &group.links {
        let class = if link.key == page_key {
            "nav-link active"
        } else {
            "nav-link"
        };
        let _ = writeln!(
            html,
            "<li><a href=\"{}\" class=\"{}\" data-page=\"{}\">{}</a></li>",
            escape(&link.href),
            class,
            escape(&link.page_id),
            escape(&link.label),
        );
    }
    html.push_str("</ul>\n</div>\n");
}

fn render_on_this_page(html: &mut String, sections: &[SectionLink]) {
    if sections.is_empty() {
        return;
    }
    html.push_str("<div class=\"docs-toc\">\n");
    html.push_str("<h3 class=\"nav-group-title\">On this page</h3>\n<ul>\n");
    for section in sections {
        let class = if section.active {
            "toc-link active"
        } else {
            "toc-link"
        };
        let _ = writeln!(
            html,
            "<li><a href=\"{}\" class=\"{}\">{}</a></li>",
            escape(&section.href),
            class,
            escape(&section.label),
        );
    }
    html.push_str("</ul>\n</div>\n");
}

fn render_controls(html: &mut String, view: &PageView) {
    html.push_str("<div class=\"docs-controls\">\n");
    let state = if view.copy_confirmed { "confirmed" } else { "idle" };
    let _ = writeln!(
        html,
        "<button type=\"button\" class=\"copy-source\" data-state=\"{state}\">{}</button>",
        escape(view.copy_label),
    );
    let _ = writeln!(
        html,
        "<button type=\"button\" class=\"theme-toggle\" data-theme=\"{}\">{}</button>",
        view.theme,
        escape(view.toggle_label),
    );
    html.push_str("</div>\n");
}

#[cfg(test)]
mod tests {
    use super::*;
    use folio_prefs::Theme;

    fn view(active: Option<&str>) -> PageView {
        let section = |id: &str, label: &str| SectionLink {
            id: id.to_owned(),
            label: label.to_owned(),
            href: format!("#docs/getting-started#{id}"),
            active: active == Some(id),
        };
        PageView {
            theme: Theme::Dark,
            toggle_label: "Switch to light",
            copy_label: "Copy as Markdown",
            copy_confirmed: false,
            sections: vec![section("installation", "Installation"), section("usage", "Usage")],
        }
    }

    fn site() -> SiteMap {
        SiteMap::new("Puffinflow Docs")
            .with_link("Documentation", "docs", "Introduction", "introduction")
            .with_link("Documentation", "docs/getting-started", "Getting Started", "getting-started")
            .with_link("Recipes", "docs/recipes/retries", "Retries", "retries")
    }

    fn render(view: PageView) -> String {
        let site = site();
        render_document(&DocumentData {
            site: &site,
            page_key: "docs/getting-started",
            title: "Getting Started",
            body_class: "docs-view docs-view-dark".to_owned(),
            fragment: "<h2 id=\"installation\">Installation</h2>",
            view,
        })
    }

    #[test]
    fn test_document_structure() {
        let html = render(view(None));
        assert!(html.starts_with("<!DOCTYPE html>"));
        assert!(html.contains("<title>Getting Started - Puffinflow Docs</title>"));
        assert!(html.contains("<body class=\"docs-view docs-view-dark\">"));
        assert!(html.contains(
            "<article class=\"prose-docs\">\n<h2 id=\"installation\">Installation</h2>\n</article>"
        ));
        assert!(html.ends_with("</html>\n"));
    }

    #[test]
    fn test_nav_groups_and_active_page() {
        let html = render(view(None));
        assert!(html.contains("<h3 class=\"nav-group-title\">Documentation</h3>"));
        assert!(html.contains("<h3 class=\"nav-group-title\">Recipes</h3>"));
        assert!(html.contains(
            "<a href=\"#docs/getting-started\" class=\"nav-link active\" data-page=\"getting-started\">"
        ));
        assert!(html.contains("<a href=\"#docs\" class=\"nav-link\" data-page=\"introduction\">"));
    }

    #[test]
    fn test_on_this_page_marks_active_section() {
        let html = render(view(Some("usage")));
        assert!(html.contains("On this page"));
        assert!(html.contains(
            "<a href=\"#docs/getting-started#usage\" class=\"toc-link active\">Usage</a>"
        ));
        assert!(html.contains(
            "<a href=\"#docs/getting-started#installation\" class=\"toc-link\">Installation</a>"
        ));
    }

    #[test]
    fn test_controls() {
        let mut confirmed = view(None);
        confirmed.copy_label = "Copied!";
        confirmed.copy_confirmed = true;
        let html = render(confirmed);
        assert!(html.contains("data-state=\"confirmed\">Copied!</button>"));
        assert!(html.contains("data-theme=\"dark\">Switch to light</button>"));
    }

    #[test]
    fn test_escapes_labels() {
        let site = SiteMap::new("A & B").with_link("<Group>", "docs", "x<y", "docs");
        let html = render_document(&DocumentData {
            site: &site,
            page_key: "docs",
            title: "T",
            body_class: String::new(),
            fragment: "",
            view: PageView {
                sections: Vec::new(),
                ..view(None)
            },
        });
        assert!(html.contains("A &amp; B"));
        assert!(html.contains("&lt;Group&gt;"));
        assert!(html.contains(">x&lt;y</a>"));
        assert!(!html.contains("On this page"));
    }
}
