//! Work out the display title of each page before anything is rendered, so
//! that links to pages later in the export can show the target's title.

use std::collections::HashMap;

use tracing::debug;

use crate::language::{flatten, Node, Page};

/// Mapping from page word to resolved title.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Titles {
    map: HashMap<String, String>,
}

impl Titles {
    pub fn new() -> Titles {
        Titles::default()
    }

    pub fn get(&self, word: &str) -> Option<&str> {
        self.map
            .get(word)
            .map(String::as_str)
    }

    pub fn insert(&mut self, word: &str, title: String) {
        self.map
            .insert(word.to_string(), title);
    }

    /// Scan a page and record its title under the word on the page object,
    /// which differs from the term used to look the page up when that term
    /// was an alias.
    pub fn record(&mut self, page: &Page) {
        let title = scan(page);
        debug!("Title for {}: {}", page.word, title);
        self.insert(&page.word, title);
    }

    pub fn len(&self) -> usize {
        self.map
            .len()
    }

    pub fn is_empty(&self) -> bool {
        self.map
            .is_empty()
    }
}

/// The title of a page is the text of its heading, if the page opens with a
/// heading whose content starts with plain text. Otherwise it is the page's
/// word.
pub fn scan(page: &Page) -> String {
    if let Some(Node::Heading { content, .. }) = first_named(&page.ast) {
        if let Some(Node::PlainText(text)) = first_named(content) {
            return text.clone();
        }
    }
    page.word
        .clone()
}

fn first_named(nodes: &[Node]) -> Option<&Node> {
    flatten(nodes).find(|node| {
        node.name()
            .is_some()
    })
}
