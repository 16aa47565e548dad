//! Types representing the syntax tree of a wiki page, as handed to us by the
//! wiki engine's parser.

use std::collections::BTreeMap;

/// A node in a parsed wiki page. Each variant corresponds to one kind of
/// node the wiki parser names; anything we don't know about is carried along
/// as Unknown so it can be flagged in the output rather than lost.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Node {
    /// An unnamed non-terminal. Its children are spliced into the enclosing
    /// sequence when iterating; see [`flatten()`].
    Group(Vec<Node>),
    /// An unnamed terminal. Skipped.
    Anonymous(String),
    PlainText(String),
    LineBreak,
    NewParagraph,
    Whitespace,
    IndentedText(Vec<Node>),
    List(ListKind, Vec<Node>),
    Marker(MarkerKind, String),
    Italics(Vec<Node>),
    Bold(Vec<Node>),
    HtmlTag(String),
    HtmlEntity(String),
    Heading {
        level: u8,
        content: Vec<Node>,
    },
    HorizontalLine,
    PreBlock(String),
    TodoEntry {
        key: String,
        delimiter: String,
        value: Vec<Node>,
    },
    Script(String),
    NoExport(Vec<Node>),
    AnchorDef(String),
    WikiWord(WikiWord),
    /// Rows of cells, each cell being the literal source text.
    Table(Vec<Vec<String>>),
    Footnote(String),
    UrlLink(UrlLink),
    StringEnd,
    Unknown(String),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ListKind {
    Ordered,
    Unordered,
    Roman,
    Alpha,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MarkerKind {
    Bullet,
    Number,
    Roman,
    Alpha,
}

/// A reference to another page in the wiki, optionally with a title that
/// replaces the target word when displayed.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct WikiWord {
    pub word: String,
    pub title: Option<Vec<Node>>,
    pub source: String,
}

impl WikiWord {
    /// A link given only as a target word, as written in running text.
    pub fn bare(word: &str) -> WikiWord {
        WikiWord {
            word: word.to_string(),
            title: None,
            source: word.to_string(),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct UrlLink {
    pub url: String,
    pub title: Option<Vec<Node>>,
    pub source: String,
}

impl Node {
    /// The name the wiki parser uses for this kind of node, or None for
    /// unnamed ones.
    pub fn name(&self) -> Option<&str> {
        let name = match self {
            Node::Group(_) | Node::Anonymous(_) => return None,
            Node::PlainText(_) => "plainText",
            Node::LineBreak => "lineBreak",
            Node::NewParagraph => "newParagraph",
            Node::Whitespace => "whitespace",
            Node::IndentedText(_) => "indentedText",
            Node::List(ListKind::Ordered, _) => "orderedList",
            Node::List(ListKind::Unordered, _) => "unorderedList",
            Node::List(ListKind::Roman, _) => "romanList",
            Node::List(ListKind::Alpha, _) => "alphaList",
            Node::Marker(MarkerKind::Bullet, _) => "bullet",
            Node::Marker(MarkerKind::Number, _) => "number",
            Node::Marker(MarkerKind::Roman, _) => "roman",
            Node::Marker(MarkerKind::Alpha, _) => "alpha",
            Node::Italics(_) => "italics",
            Node::Bold(_) => "bold",
            Node::HtmlTag(_) => "htmlTag",
            Node::HtmlEntity(_) => "htmlEntity",
            Node::Heading { .. } => "heading",
            Node::HorizontalLine => "horizontalLine",
            Node::PreBlock(_) => "preBlock",
            Node::TodoEntry { .. } => "todoEntry",
            Node::Script(_) => "script",
            Node::NoExport(_) => "noExport",
            Node::AnchorDef(_) => "anchorDef",
            Node::WikiWord(_) => "wikiWord",
            Node::Table(_) => "table",
            Node::Footnote(_) => "footnote",
            Node::UrlLink(_) => "urlLink",
            Node::StringEnd => "stringEnd",
            Node::Unknown(name) => name,
        };
        Some(name)
    }
}

/// Iterate over a sequence of nodes in document order, descending into
/// unnamed groups so that their children appear in place of them.
pub fn flatten(nodes: &[Node]) -> Flatten<'_> {
    Flatten {
        stack: vec![nodes.iter()],
    }
}

pub struct Flatten<'a> {
    stack: Vec<std::slice::Iter<'a, Node>>,
}

impl<'a> Iterator for Flatten<'a> {
    type Item = &'a Node;

    fn next(&mut self) -> Option<&'a Node> {
        while let Some(top) = self
            .stack
            .last_mut()
        {
            match top.next() {
                Some(Node::Group(children)) => {
                    self.stack
                        .push(children.iter());
                }
                Some(node) => return Some(node),
                None => {
                    self.stack
                        .pop();
                }
            }
        }
        None
    }
}

/// One page of the wiki. The word is the page's canonical identifier;
/// aliases are other words that resolve to it.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Page {
    pub word: String,
    pub aliases: Vec<String>,
    pub attributes: BTreeMap<String, Vec<String>>,
    pub text: String,
    pub ast: Vec<Node>,
}

impl Page {
    pub fn new(word: &str, ast: Vec<Node>) -> Page {
        Page {
            word: word.to_string(),
            ast,
            ..Default::default()
        }
    }

    /// Attributes can be given more than once on a page; the last value set
    /// is the one that counts.
    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes
            .get(name)
            .and_then(|values| values.last())
            .map(String::as_str)
    }
}

#[cfg(test)]
mod check {
    use super::*;

    #[test]
    fn flatten_splices_groups() {
        let nodes = vec![
            Node::PlainText("a".to_string()),
            Node::Group(vec![
                Node::Whitespace,
                Node::Group(vec![Node::PlainText("b".to_string())]),
            ]),
            Node::Bold(vec![Node::PlainText("c".to_string())]),
        ];

        let names: Vec<_> = flatten(&nodes)
            .map(|node| node.name())
            .collect();

        assert_eq!(
            names,
            vec![
                Some("plainText"),
                Some("whitespace"),
                Some("plainText"),
                Some("bold")
            ]
        );
    }

    #[test]
    fn flatten_yields_unnamed_terminals() {
        let nodes = vec![Node::Anonymous("x".to_string()), Node::StringEnd];

        let names: Vec<_> = flatten(&nodes)
            .map(|node| node.name())
            .collect();

        assert_eq!(names, vec![None, Some("stringEnd")]);
    }

    #[test]
    fn flatten_empty_groups() {
        let nodes = vec![Node::Group(vec![]), Node::Group(vec![Node::Group(vec![])])];
        assert_eq!(flatten(&nodes).count(), 0);
    }

    #[test]
    fn unknown_keeps_its_name() {
        let node = Node::Unknown("weirdThing".to_string());
        assert_eq!(node.name(), Some("weirdThing"));
    }

    #[test]
    fn last_attribute_wins() {
        let mut page = Page::new("Plan", vec![]);
        page.attributes
            .insert(
                "export".to_string(),
                vec!["True".to_string(), "False".to_string()],
            );

        assert_eq!(page.attribute("export"), Some("False"));
        assert_eq!(page.attribute("icon"), None);
    }
}
