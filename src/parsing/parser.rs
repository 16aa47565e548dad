//! Reader for wiki dumps: JSON documents holding every page of a wiki along
//! with the syntax tree the wiki engine parsed from it.

use std::collections::BTreeMap;
use std::fmt;

use serde::Deserialize;
use serde_json::{Map, Value};

use crate::language::{ListKind, MarkerKind, Node, Page, UrlLink, Wiki, WikiWord};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParsingError {
    InvalidJson {
        line: usize,
        column: usize,
        details: String,
    },
    Expected {
        page: String,
        field: &'static str,
        what: &'static str,
    },
    DuplicateWord(String),
}

impl fmt::Display for ParsingError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParsingError::InvalidJson {
                line,
                column,
                details,
            } => write!(f, "invalid wiki dump at {}:{}: {}", line, column, details),
            ParsingError::Expected { page, field, what } => write!(
                f,
                "page \"{}\": expected {} for \"{}\"",
                page, what, field
            ),
            ParsingError::DuplicateWord(word) => {
                write!(f, "\"{}\" names more than one page", word)
            }
        }
    }
}

impl std::error::Error for ParsingError {}

#[derive(Deserialize)]
struct Dump {
    pages: Vec<Entry>,
}

#[derive(Deserialize)]
struct Entry {
    word: String,
    #[serde(default)]
    aliases: Vec<String>,
    #[serde(default)]
    attributes: BTreeMap<String, Values>,
    #[serde(default)]
    text: String,
    ast: Value,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum Values {
    One(String),
    Many(Vec<String>),
}

impl From<Values> for Vec<String> {
    fn from(values: Values) -> Vec<String> {
        match values {
            Values::One(value) => vec![value],
            Values::Many(values) => values,
        }
    }
}

/// Read an entire wiki dump. Pages keep the order they have in the dump.
pub fn read_wiki(content: &str) -> Result<Wiki, ParsingError> {
    let dump: Dump = serde_json::from_str(content).map_err(|error| ParsingError::InvalidJson {
        line: error.line(),
        column: error.column(),
        details: error.to_string(),
    })?;

    let mut wiki = Wiki::new();

    for entry in dump.pages {
        let page = read_page(entry)?;

        if wiki.contains(&page.word) {
            return Err(ParsingError::DuplicateWord(page.word));
        }
        for alias in &page.aliases {
            if wiki.contains(alias) || *alias == page.word {
                return Err(ParsingError::DuplicateWord(alias.clone()));
            }
        }

        wiki.insert(page);
    }

    Ok(wiki)
}

fn read_page(entry: Entry) -> Result<Page, ParsingError> {
    let reader = Reader { page: &entry.word };

    let ast = match &entry.ast {
        Value::Array(_) => reader.read_nodes(&entry.ast, "ast")?,
        _ => vec![reader.read_node(&entry.ast)?],
    };

    let attributes = entry
        .attributes
        .into_iter()
        .map(|(name, values)| (name, values.into()))
        .collect();

    Ok(Page {
        word: entry.word,
        aliases: entry.aliases,
        attributes,
        text: entry.text,
        ast,
    })
}

/// Converts the JSON form of a syntax tree into Nodes. Carries the page word
/// along so problems can be reported against the page they occur in.
struct Reader<'p> {
    page: &'p str,
}

impl<'p> Reader<'p> {
    fn expected(&self, field: &'static str, what: &'static str) -> ParsingError {
        ParsingError::Expected {
            page: self
                .page
                .to_string(),
            field,
            what,
        }
    }

    fn read_nodes(
        &self,
        value: &Value,
        field: &'static str,
    ) -> Result<Vec<Node>, ParsingError> {
        let array = value
            .as_array()
            .ok_or_else(|| self.expected(field, "an array of nodes"))?;

        array
            .iter()
            .map(|child| self.read_node(child))
            .collect()
    }

    fn read_node(&self, value: &Value) -> Result<Node, ParsingError> {
        let object = value
            .as_object()
            .ok_or_else(|| self.expected("name", "a node object"))?;

        let name = match object.get("name") {
            None | Some(Value::Null) => None,
            Some(Value::String(name)) => Some(name.as_str()),
            Some(_) => return Err(self.expected("name", "a string or null")),
        };

        let node = match name {
            None => {
                if object.contains_key("children") {
                    Node::Group(self.children(object)?)
                } else {
                    Node::Anonymous(
                        self.optional_text(object, "text")?
                            .unwrap_or_default(),
                    )
                }
            }
            Some("plainText") => Node::PlainText(self.text(object, "text")?),
            Some("lineBreak") => Node::LineBreak,
            Some("newParagraph") => Node::NewParagraph,
            Some("whitespace") => Node::Whitespace,
            Some("indentedText") => Node::IndentedText(self.children(object)?),
            Some("orderedList") => Node::List(ListKind::Ordered, self.children(object)?),
            Some("unorderedList") => Node::List(ListKind::Unordered, self.children(object)?),
            Some("romanList") => Node::List(ListKind::Roman, self.children(object)?),
            Some("alphaList") => Node::List(ListKind::Alpha, self.children(object)?),
            Some("bullet") => Node::Marker(MarkerKind::Bullet, self.marker(object)?),
            Some("number") => Node::Marker(MarkerKind::Number, self.marker(object)?),
            Some("roman") => Node::Marker(MarkerKind::Roman, self.marker(object)?),
            Some("alpha") => Node::Marker(MarkerKind::Alpha, self.marker(object)?),
            Some("italics") => Node::Italics(self.children(object)?),
            Some("bold") => Node::Bold(self.children(object)?),
            Some("htmlTag") => Node::HtmlTag(self.text(object, "text")?),
            Some("htmlEntity") => Node::HtmlEntity(self.text(object, "text")?),
            Some("heading") => Node::Heading {
                level: self.level(object)?,
                content: self.nodes(object, "content")?,
            },
            Some("horizontalLine") => Node::HorizontalLine,
            Some("preBlock") => Node::PreBlock(self.text(object, "text")?),
            Some("todoEntry") => Node::TodoEntry {
                key: self.text(object, "key")?,
                delimiter: self.text(object, "delimiter")?,
                value: self.nodes(object, "value")?,
            },
            Some("script") => Node::Script(
                self.optional_text(object, "text")?
                    .unwrap_or_default(),
            ),
            Some("noExport") => Node::NoExport(self.children(object)?),
            Some("anchorDef") => Node::AnchorDef(self.text(object, "anchor")?),
            Some("wikiWord") => Node::WikiWord(WikiWord {
                word: self.text(object, "word")?,
                title: self.optional_nodes(object, "title")?,
                source: self.text(object, "text")?,
            }),
            Some("table") => Node::Table(self.rows(object)?),
            Some("footnote") => Node::Footnote(
                self.optional_text(object, "text")?
                    .unwrap_or_default(),
            ),
            Some("urlLink") => Node::UrlLink(UrlLink {
                url: self.text(object, "url")?,
                title: self.optional_nodes(object, "title")?,
                source: self.text(object, "text")?,
            }),
            Some("stringEnd") => Node::StringEnd,
            Some(other) => Node::Unknown(other.to_string()),
        };

        Ok(node)
    }

    fn text(
        &self,
        object: &Map<String, Value>,
        field: &'static str,
    ) -> Result<String, ParsingError> {
        self.optional_text(object, field)?
            .ok_or_else(|| self.expected(field, "a string"))
    }

    fn optional_text(
        &self,
        object: &Map<String, Value>,
        field: &'static str,
    ) -> Result<Option<String>, ParsingError> {
        match object.get(field) {
            None | Some(Value::Null) => Ok(None),
            Some(Value::String(text)) => Ok(Some(text.clone())),
            Some(_) => Err(self.expected(field, "a string")),
        }
    }

    // list markers are usually emitted with their source text but nothing
    // downstream needs it, so tolerate its absence.
    fn marker(&self, object: &Map<String, Value>) -> Result<String, ParsingError> {
        Ok(self
            .optional_text(object, "text")?
            .unwrap_or_default())
    }

    fn children(&self, object: &Map<String, Value>) -> Result<Vec<Node>, ParsingError> {
        Ok(self
            .optional_nodes(object, "children")?
            .unwrap_or_default())
    }

    fn nodes(
        &self,
        object: &Map<String, Value>,
        field: &'static str,
    ) -> Result<Vec<Node>, ParsingError> {
        self.optional_nodes(object, field)?
            .ok_or_else(|| self.expected(field, "an array of nodes"))
    }

    fn optional_nodes(
        &self,
        object: &Map<String, Value>,
        field: &'static str,
    ) -> Result<Option<Vec<Node>>, ParsingError> {
        match object.get(field) {
            None | Some(Value::Null) => Ok(None),
            Some(value) => Ok(Some(self.read_nodes(value, field)?)),
        }
    }

    fn level(&self, object: &Map<String, Value>) -> Result<u8, ParsingError> {
        match object.get("level") {
            None | Some(Value::Null) => Ok(1),
            Some(value) => value
                .as_u64()
                .and_then(|level| u8::try_from(level).ok())
                .ok_or_else(|| self.expected("level", "a small positive integer")),
        }
    }

    fn rows(&self, object: &Map<String, Value>) -> Result<Vec<Vec<String>>, ParsingError> {
        let rows = object
            .get("rows")
            .and_then(Value::as_array)
            .ok_or_else(|| self.expected("rows", "an array of rows"))?;

        rows.iter()
            .map(|row| -> Result<Vec<String>, ParsingError> {
                let cells = row
                    .as_array()
                    .ok_or_else(|| self.expected("rows", "an array of cells in each row"))?;
                cells
                    .iter()
                    .map(|cell| {
                        cell.as_str()
                            .map(str::to_string)
                            .ok_or_else(|| self.expected("rows", "a string for each cell"))
                    })
                    .collect()
            })
            .collect()
    }
}

#[cfg(test)]
#[path = "checks/parser.rs"]
mod check;
