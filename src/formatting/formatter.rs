//! Render the syntax tree of a wiki page into the body of an org-mode
//! section.

use tracing::{debug, warn};

use crate::formatting::{LineBuffer, Titles};
use crate::language::{flatten, Fragment, Node, Page, PageStore, Table, UrlLink, WikiWord};

/// Render one page, resolving links against the store and labelling them
/// with the titles collected beforehand.
pub fn render_page<'a>(
    store: &'a dyn PageStore,
    titles: &'a Titles,
    page: &Page,
    anchor: Option<&'a str>,
) -> Vec<Fragment> {
    debug!("Rendering {}", page.word);

    let mut formatter = Formatter::new(store, titles);
    if let Some(prefix) = anchor {
        formatter = formatter.with_anchor_prefix(prefix);
    }
    formatter.render(&page.ast)
}

/// State for rendering a single page. Not reused across pages.
pub struct Formatter<'a> {
    store: &'a dyn PageStore,
    titles: &'a Titles,
    anchor: Option<&'a str>,
    buffer: LineBuffer,
    processed: usize,
}

impl<'a> Formatter<'a> {
    pub fn new(store: &'a dyn PageStore, titles: &'a Titles) -> Formatter<'a> {
        Formatter {
            store,
            titles,
            anchor: None,
            buffer: LineBuffer::new(),
            processed: 0,
        }
    }

    /// Scope anchor names to the given word.
    pub fn with_anchor_prefix(mut self, prefix: &'a str) -> Formatter<'a> {
        self.anchor = Some(prefix);
        self
    }

    pub fn render(mut self, nodes: &[Node]) -> Vec<Fragment> {
        self.format_block(nodes, false);
        self.buffer
            .into_fragments()
    }

    /// Format a sequence of nodes, committing whatever partial line remains
    /// at the end. This holds at every level of nesting, emphasis and link
    /// labels included. When `quiet` is set plain text is dropped; this is
    /// how the heading that became the page title is kept out of the body.
    fn format_block(&mut self, nodes: &[Node], quiet: bool) {
        for node in flatten(nodes) {
            // unnamed terminals are neither rendered nor counted
            if node
                .name()
                .is_none()
            {
                continue;
            }
            self.format_node(node, quiet);
            self.processed += 1;
        }
        self.buffer
            .commit(false);
    }

    fn format_node(&mut self, node: &Node, quiet: bool) {
        match node {
            // never reached; groups are spliced and unnamed terminals skipped
            Node::Group(_) | Node::Anonymous(_) => {}
            Node::PlainText(text) => {
                if !quiet {
                    self.buffer
                        .append(text);
                }
            }
            Node::LineBreak => {
                self.buffer
                    .commit(true);
            }
            Node::NewParagraph => {
                self.buffer
                    .commit(false);
                self.buffer
                    .commit(true);
            }
            Node::Whitespace => {
                self.buffer
                    .append(" ");
            }
            Node::IndentedText(children) => {
                self.buffer
                    .commit(false);
                let saved = self
                    .buffer
                    .indent;
                self.buffer
                    .indent += 2;
                self.format_block(children, quiet);
                self.buffer
                    .indent = saved;
            }
            Node::List(_, children) => {
                // lists contain items, they are not an indentation scope
                self.buffer
                    .commit(false);
                self.format_block(children, quiet);
            }
            Node::Marker(_, _) => {}
            Node::Italics(children) => {
                self.buffer
                    .append("/");
                self.format_block(children, quiet);
                self.buffer
                    .append("/");
            }
            Node::Bold(children) => {
                self.buffer
                    .append("*");
                self.format_block(children, quiet);
                self.buffer
                    .append("*");
            }
            Node::HtmlTag(source) | Node::HtmlEntity(source) => {
                self.buffer
                    .append(source);
            }
            Node::Heading { content, .. } => {
                self.buffer
                    .commit(false);
                let first = self.processed == 0;
                self.format_block(content, quiet || first);
            }
            Node::HorizontalLine => {
                self.buffer
                    .commit(false);
                self.buffer
                    .append("-----");
                self.buffer
                    .commit(false);
            }
            Node::PreBlock(text) => self.format_preformatted(text),
            Node::TodoEntry {
                key,
                delimiter,
                value,
            } => {
                self.buffer
                    .commit(false);
                self.buffer
                    .append(&format!("TODO: {}{}", key, delimiter));
                self.format_block(value, quiet);
                self.buffer
                    .commit(false);
            }
            Node::Script(_) => {}
            Node::NoExport(_) => {}
            Node::AnchorDef(anchor) => self.format_anchor(anchor),
            Node::WikiWord(link) => self.format_wiki_word(link, quiet),
            Node::Table(rows) => self.format_table(rows),
            Node::Footnote(_) => {
                self.buffer
                    .commit(false);
                self.buffer
                    .append("[ERROR: We can't process footnotes]");
                self.buffer
                    .commit(false);
            }
            Node::UrlLink(link) => self.format_url_link(link, quiet),
            Node::StringEnd => {}
            Node::Unknown(name) => {
                warn!("Unknown parser node {} found", name);
                self.buffer
                    .commit(false);
                self.buffer
                    .append(&format!("[Unknown parser node with name \"{}\" found]", name));
                self.buffer
                    .commit(false);
            }
        }
    }

    // The end marker is left pending; whatever follows the block commits it.
    fn format_preformatted(&mut self, text: &str) {
        self.buffer
            .commit(false);
        self.buffer
            .append("#+BEGIN_EXAMPLE");
        self.buffer
            .commit(false);

        for line in text.split('\n') {
            self.buffer
                .append(line);
            self.buffer
                .commit(false);
        }

        self.buffer
            .append("#+END_EXAMPLE");
    }

    fn format_anchor(&mut self, anchor: &str) {
        let name = match self.anchor {
            Some(prefix) => format!("{}#{}", prefix, anchor),
            None => anchor.to_string(),
        };
        self.buffer
            .append(&format!("<a name=\"{}\" class=\"wikidpad\"></a>", name));
    }

    /// Normalize a link term to the word of an exported page. Pages that
    /// exist but have opted out of export are not linkable.
    fn resolve(&self, term: &str) -> Option<&'a str> {
        let target = self
            .store
            .resolve_link(term)?;

        if self
            .store
            .should_export(target)
        {
            Some(target)
        } else {
            None
        }
    }

    /// A link to another page. A bare identifier is handled by passing a
    /// link built with `WikiWord::bare()`, whose source text is the word.
    fn format_wiki_word(&mut self, link: &WikiWord, quiet: bool) {
        match (self.resolve(&link.word), &link.title) {
            (Some(target), Some(title)) => {
                self.buffer
                    .append(&format!("[[#{}][", target));
                self.format_block(title, quiet);
                self.buffer
                    .append("]]");
            }
            (Some(target), None) => {
                let text = match self
                    .titles
                    .get(target)
                {
                    Some(label) => format!("[[#{}][{}]]", target, label),
                    None => format!("[[#{}]]", target),
                };
                self.buffer
                    .append(&text);
            }
            (None, Some(title)) => {
                self.format_block(title, quiet);
            }
            (None, None) => {
                debug!("Link to {} not exported", link.word);
                self.buffer
                    .append(&link.source);
            }
        }
    }

    fn format_url_link(&mut self, link: &UrlLink, quiet: bool) {
        self.buffer
            .append(&format!("[[{}][", link.url));
        match &link.title {
            Some(title) => self.format_block(title, quiet),
            None => self
                .buffer
                .append(&link.source),
        }
        self.buffer
            .append("]]");
    }

    fn format_table(&mut self, rows: &[Vec<String>]) {
        self.buffer
            .commit(false);
        self.buffer
            .append_table(Table {
                rows: rows.to_vec(),
            });
    }
}

#[cfg(test)]
#[path = "checks/formatter.rs"]
mod check;
