//! The page store: where pages come from, and how link terms and aliases
//! resolve to them.

use std::collections::HashMap;

use super::Page;

/// Access to the pages of a wiki during an export.
pub trait PageStore {
    /// Retrieve a page by its word or by one of its aliases.
    fn page(&self, term: &str) -> Option<&Page>;

    /// Normalize a link term to the canonical word of the page it refers
    /// to, or None if nothing in the wiki answers to that term.
    fn resolve_link(&self, term: &str) -> Option<&str>;

    /// Whether a page is to appear in exported output. Pages opt out by
    /// setting the `export` attribute to something false.
    fn should_export(&self, term: &str) -> bool {
        match self.page(term) {
            Some(page) => page
                .attribute("export")
                .map(is_truthy)
                .unwrap_or(true),
            None => false,
        }
    }
}

/// Interpret an attribute value as a boolean. Integers are true when
/// non-zero; otherwise "true", "yes", and "on" in any case.
pub fn is_truthy(value: &str) -> bool {
    let value = value.trim();
    if let Ok(number) = value.parse::<i64>() {
        return number != 0;
    }
    matches!(
        value
            .to_ascii_lowercase()
            .as_str(),
        "true" | "yes" | "on"
    )
}

/// An in-memory wiki, holding pages in the order they were added.
#[derive(Debug, Default)]
pub struct Wiki {
    pages: Vec<Page>,
    index: HashMap<String, usize>,
}

impl Wiki {
    pub fn new() -> Wiki {
        Wiki::default()
    }

    /// Whether the given term is already taken, either as a word or alias.
    pub fn contains(&self, term: &str) -> bool {
        self.index
            .contains_key(term)
    }

    /// Add a page. Its word and aliases replace any earlier claim on those
    /// terms; checking for such conflicts is up to the caller.
    pub fn insert(&mut self, page: Page) {
        let position = self
            .pages
            .len();

        self.index
            .insert(page.word.clone(), position);
        for alias in &page.aliases {
            self.index
                .insert(alias.clone(), position);
        }

        self.pages
            .push(page);
    }

    /// Words of every page, in the order the pages were added.
    pub fn words(&self) -> impl Iterator<Item = &str> {
        self.pages
            .iter()
            .map(|page| page.word.as_str())
    }

    pub fn len(&self) -> usize {
        self.pages
            .len()
    }

    pub fn is_empty(&self) -> bool {
        self.pages
            .is_empty()
    }
}

impl PageStore for Wiki {
    fn page(&self, term: &str) -> Option<&Page> {
        self.index
            .get(term)
            .map(|&i| &self.pages[i])
    }

    fn resolve_link(&self, term: &str) -> Option<&str> {
        self.page(term)
            .map(|page| page.word.as_str())
    }
}

#[cfg(test)]
mod check {
    use super::*;

    fn sample() -> Wiki {
        let mut wiki = Wiki::new();

        let mut page = Page::new("FrontPage", vec![]);
        page.aliases = vec!["Home".to_string()];
        wiki.insert(page);

        let mut page = Page::new("Drafts", vec![]);
        page.attributes
            .insert("export".to_string(), vec!["false".to_string()]);
        wiki.insert(page);

        wiki
    }

    #[test]
    fn aliases_resolve_to_word() {
        let wiki = sample();

        assert_eq!(wiki.resolve_link("FrontPage"), Some("FrontPage"));
        assert_eq!(wiki.resolve_link("Home"), Some("FrontPage"));
        assert_eq!(wiki.resolve_link("Nowhere"), None);

        let page = wiki
            .page("Home")
            .unwrap();
        assert_eq!(page.word, "FrontPage");
    }

    #[test]
    fn words_in_insertion_order() {
        let wiki = sample();
        let words: Vec<_> = wiki
            .words()
            .collect();
        assert_eq!(words, vec!["FrontPage", "Drafts"]);
        assert_eq!(wiki.len(), 2);
        assert!(wiki.contains("Home"));
    }

    #[test]
    fn export_attribute() {
        let wiki = sample();

        assert!(wiki.should_export("FrontPage"));
        assert!(wiki.should_export("Home"));
        assert!(!wiki.should_export("Drafts"));
        assert!(!wiki.should_export("Nowhere"));
    }

    #[test]
    fn truthiness() {
        assert!(is_truthy("True"));
        assert!(is_truthy("yes"));
        assert!(is_truthy("ON"));
        assert!(is_truthy("1"));
        assert!(is_truthy("-2"));

        assert!(!is_truthy("False"));
        assert!(!is_truthy("0"));
        assert!(!is_truthy("no"));
        assert!(!is_truthy(""));
    }
}
