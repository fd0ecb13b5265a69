//! Site navigation.

use folio_config::Config;
use folio_sections::Address;

/// Sidebar link to a page.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NavLink {
    /// Navigation key of the target page.
    pub key: String,
    /// Link target: `#<page-key>`.
    pub href: String,
    /// Link label.
    pub label: String,
    /// Stable id of the target page.
    pub page_id: String,
}

/// Titled group of sidebar links.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NavGroup {
    /// Group heading.
    pub title: String,
    /// Links in sidebar order.
    pub links: Vec<NavLink>,
}

/// A resolved navigation address.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Route<'a> {
    /// Target page.
    pub link: &'a NavLink,
    /// Target section, if the address named one.
    pub section: Option<String>,
}

/// Ordered site navigation.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SiteMap {
    /// Site title.
    pub title: String,
    /// Navigation groups in sidebar order.
    pub groups: Vec<NavGroup>,
}

impl SiteMap {
    /// Create an empty site map.
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            groups: Vec::new(),
        }
    }

    /// Append a page link to a group, creating the group on first use.
    #[must_use]
    pub fn with_link(mut self, group: &str, key: &str, label: &str, page_id: &str) -> Self {
        let link = NavLink {
            key: key.to_owned(),
            href: format!("#{key}"),
            label: label.to_owned(),
            page_id: page_id.to_owned(),
        };
        match self.groups.iter_mut().find(|g| g.title == group) {
            Some(existing) => existing.links.push(link),
            None => self.groups.push(NavGroup {
                title: group.to_owned(),
                links: vec![link],
            }),
        }
        self
    }

    /// Build navigation from configured groups and pages.
    ///
    /// Groups keep their declared order, even when empty; pages keep theirs
    /// within each group.
    #[must_use]
    pub fn from_config(config: &Config) -> Self {
        let mut site = Self::new(&config.site.title);
        site.groups = config
            .groups
            .iter()
            .map(|g| NavGroup {
                title: g.title.clone(),
                links: Vec::new(),
            })
            .collect();
        config.pages.iter().fold(site, |site, page| {
            site.with_link(&page.group, &page.key, &page.label, &page.id)
        })
    }

    /// All links in sidebar order.
    pub fn links(&self) -> impl Iterator<Item = &NavLink> {
        self.groups.iter().flat_map(|g| g.links.iter())
    }

    /// Find the link for a page key.
    #[must_use]
    pub fn find(&self, key: &str) -> Option<&NavLink> {
        self.links().find(|link| link.key == key)
    }

    /// Resolve a navigation fragment such as `#docs/getting-started#installation`.
    ///
    /// An empty page key resolves to the first page. Returns `None` when the
    /// key matches no page.
    #[must_use]
    pub fn route(&self, fragment: &str) -> Option<Route<'_>> {
        let address = Address::parse(fragment);
        let link = if address.page.is_empty() {
            self.links().next()
        } else {
            self.find(&address.page)
        }?;

        Some(Route {
            link,
            section: address.section,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn site() -> SiteMap {
        SiteMap::new("Puffinflow Docs")
            .with_link("Documentation", "docs", "Introduction", "introduction")
            .with_link("Documentation", "docs/getting-started", "Getting Started", "getting-started")
            .with_link("Recipes", "docs/recipes/retries", "Retries", "retries")
    }

    #[test]
    fn test_groups_keep_order() {
        let site = site();
        let titles: Vec<_> = site.groups.iter().map(|g| g.title.as_str()).collect();
        assert_eq!(titles, vec!["Documentation", "Recipes"]);
        assert_eq!(site.groups[0].links.len(), 2);
        assert_eq!(site.groups[0].links[1].href, "#docs/getting-started");
    }

    #[test]
    fn test_route_page_and_section() {
        let site = site();
        let route = site.route("#docs/getting-started#installation").unwrap();
        assert_eq!(route.link.page_id, "getting-started");
        assert_eq!(route.section.as_deref(), Some("installation"));
    }

    #[test]
    fn test_route_without_hash() {
        let site = site();
        let route = site.route("docs/recipes/retries").unwrap();
        assert_eq!(route.link.label, "Retries");
        assert_eq!(route.section, None);
    }

    #[test]
    fn test_route_empty_fragment_is_first_page() {
        let site = site();
        assert_eq!(site.route("").unwrap().link.key, "docs");
        assert_eq!(site.route("#").unwrap().link.key, "docs");
    }

    #[test]
    fn test_route_unknown_page() {
        assert_eq!(site().route("#docs/nope"), None);
    }

    #[test]
    fn test_route_empty_site() {
        assert_eq!(SiteMap::new("Empty").route(""), None);
    }

    #[test]
    fn test_from_config() {
        let tmp = tempfile::TempDir::new().unwrap();
        let config = config_fixture(tmp.path());
        let site = SiteMap::from_config(&config);

        assert_eq!(site.title, "Puffinflow Docs");
        assert_eq!(site.groups.len(), 2);
        assert_eq!(site.groups[1].title, "Recipes");
        assert!(site.groups[1].links.is_empty());
        assert_eq!(site.find("docs").unwrap().label, "Introduction");
    }

    fn config_fixture(dir: &std::path::Path) -> Config {
        let path = dir.join("folio.toml");
        std::fs::write(
            &path,
            r#"
[site]
title = "Puffinflow Docs"

[[groups]]
title = "Documentation"

[[groups]]
title = "Recipes"

[[pages]]
key = "docs"
id = "introduction"
label = "Introduction"
group = "Documentation"
"#,
        )
        .unwrap();
        Config::load(Some(&path), None).unwrap()
    }
}
