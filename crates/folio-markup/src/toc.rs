//! Heading ids and table of contents.

use std::collections::HashMap;

/// Table of contents entry.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TocEntry {
    /// Heading level (1-4).
    pub level: u8,
    /// Heading text with inline markers stripped.
    pub title: String,
    /// Anchor id.
    pub id: String,
}

/// Generates unique heading ids within one document.
#[derive(Debug, Default)]
pub(crate) struct HeadingIds {
    used: HashMap<String, usize>,
}

impl HeadingIds {
    /// Allocate an id for a heading title, suffixing duplicates with `-1`, `-2`, ...
    ///
    /// Every id handed out is recorded, so a later heading whose own slug
    /// equals an earlier suffixed id is suffixed in turn.
    pub(crate) fn allocate(&mut self, title: &str) -> String {
        let base = slugify(title);
        let Some(&last) = self.used.get(&base) else {
            self.used.insert(base.clone(), 0);
            return base;
        };

        let mut n = last;
        let id = loop {
            n += 1;
            let candidate = format!("{base}-{n}");
            if !self.used.contains_key(&candidate) {
                break candidate;
            }
        };
        self.used.insert(base, n);
        self.used.insert(id.clone(), 0);
        id
    }
}

/// Convert heading text to a URL-safe anchor.
///
/// Alphanumeric characters are lowercased and kept; runs of anything else
/// collapse into a single `-`. Titles with no alphanumerics yield `section`.
///
/// # Examples
///
/// ```
/// use folio_markup::slugify;
///
/// assert_eq!(slugify("Your First Workflow: Hello World"), "your-first-workflow-hello-world");
/// assert_eq!(slugify("⚡ Simple Yet Powerful"), "simple-yet-powerful");
/// ```
pub fn slugify(title: &str) -> String {
    let mut slug = String::with_capacity(title.len());
    let mut pending_dash = false;

    for c in title.chars() {
        if c.is_alphanumeric() {
            if pending_dash && !slug.is_empty() {
                slug.push('-');
            }
            pending_dash = false;
            slug.extend(c.to_lowercase());
        } else {
            pending_dash = true;
        }
    }

    if slug.is_empty() {
        "section".to_owned()
    } else {
        slug
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_slugify_basic() {
        assert_eq!(slugify("Quick Reference"), "quick-reference");
    }

    #[test]
    fn test_slugify_punctuation_collapses() {
        assert_eq!(slugify("What is Puffinflow?"), "what-is-puffinflow");
        assert_eq!(slugify("CI/CD -- Pipeline"), "ci-cd-pipeline");
    }

    #[test]
    fn test_slugify_empty() {
        assert_eq!(slugify("🎉"), "section");
        assert_eq!(slugify(""), "section");
    }

    #[test]
    fn test_duplicate_ids_suffixed() {
        let mut ids = HeadingIds::default();
        assert_eq!(ids.allocate("FAQ"), "faq");
        assert_eq!(ids.allocate("FAQ"), "faq-1");
        assert_eq!(ids.allocate("faq"), "faq-2");
        assert_eq!(ids.allocate("Other"), "other");
    }

    #[test]
    fn test_suffixed_id_not_reused_by_later_slug() {
        let mut ids = HeadingIds::default();
        assert_eq!(ids.allocate("FAQ"), "faq");
        assert_eq!(ids.allocate("FAQ"), "faq-1");
        assert_eq!(ids.allocate("FAQ 1"), "faq-1-1");
        assert_eq!(ids.allocate("FAQ"), "faq-2");
    }

    #[test]
    fn test_suffix_skips_ids_taken_by_earlier_slugs() {
        let mut ids = HeadingIds::default();
        assert_eq!(ids.allocate("FAQ 1"), "faq-1");
        assert_eq!(ids.allocate("FAQ"), "faq");
        assert_eq!(ids.allocate("FAQ"), "faq-2");
    }
}
