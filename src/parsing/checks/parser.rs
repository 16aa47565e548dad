use serde_json::json;

use super::*;
use crate::language::PageStore;

fn reader() -> Reader<'static> {
    Reader { page: "Sample" }
}

#[test]
fn plain_nodes() {
    let input = reader();

    let result = input.read_node(&json!({"name": "plainText", "text": "Hello"}));
    assert_eq!(result, Ok(Node::PlainText("Hello".to_string())));

    let result = input.read_node(&json!({"name": "lineBreak"}));
    assert_eq!(result, Ok(Node::LineBreak));

    let result = input.read_node(&json!({"name": "whitespace", "text": "  "}));
    assert_eq!(result, Ok(Node::Whitespace));

    let result = input.read_node(&json!({"name": "htmlEntity", "text": "&amp;"}));
    assert_eq!(result, Ok(Node::HtmlEntity("&amp;".to_string())));
}

#[test]
fn unnamed_nodes() {
    let input = reader();

    let result = input.read_node(&json!({"name": null, "text": "="}));
    assert_eq!(result, Ok(Node::Anonymous("=".to_string())));

    let result = input.read_node(&json!({"text": ""}));
    assert_eq!(result, Ok(Node::Anonymous(String::new())));

    let result = input.read_node(&json!({
        "children": [{"name": "plainText", "text": "inside"}]
    }));
    assert_eq!(
        result,
        Ok(Node::Group(vec![Node::PlainText("inside".to_string())]))
    );
}

#[test]
fn nested_nodes() {
    let input = reader();

    let result = input.read_node(&json!({
        "name": "heading",
        "level": 2,
        "content": [
            {"name": "plainText", "text": "Ingredients"}
        ]
    }));
    assert_eq!(
        result,
        Ok(Node::Heading {
            level: 2,
            content: vec![Node::PlainText("Ingredients".to_string())]
        })
    );

    let result = input.read_node(&json!({
        "name": "unorderedList",
        "children": [
            {"name": "bullet", "text": "* "},
            {"name": "bold", "children": [{"name": "plainText", "text": "flour"}]}
        ]
    }));
    assert_eq!(
        result,
        Ok(Node::List(
            ListKind::Unordered,
            vec![
                Node::Marker(MarkerKind::Bullet, "* ".to_string()),
                Node::Bold(vec![Node::PlainText("flour".to_string())])
            ]
        ))
    );

    let result = input.read_node(&json!({
        "name": "todoEntry",
        "key": "todo",
        "delimiter": ":",
        "value": [{"name": "plainText", "text": " buy eggs"}]
    }));
    assert_eq!(
        result,
        Ok(Node::TodoEntry {
            key: "todo".to_string(),
            delimiter: ":".to_string(),
            value: vec![Node::PlainText(" buy eggs".to_string())]
        })
    );
}

#[test]
fn heading_level_defaults() {
    let input = reader();

    let result = input.read_node(&json!({"name": "heading", "content": []}));
    assert_eq!(
        result,
        Ok(Node::Heading {
            level: 1,
            content: vec![]
        })
    );

    let result = input.read_node(&json!({"name": "heading", "level": 300, "content": []}));
    assert!(result.is_err());
}

#[test]
fn links() {
    let input = reader();

    let result = input.read_node(&json!({
        "name": "wikiWord",
        "word": "RecipeBook",
        "text": "RecipeBook"
    }));
    assert_eq!(
        result,
        Ok(Node::WikiWord(WikiWord {
            word: "RecipeBook".to_string(),
            title: None,
            source: "RecipeBook".to_string()
        }))
    );

    let result = input.read_node(&json!({
        "name": "urlLink",
        "url": "https://example.com",
        "title": [{"name": "plainText", "text": "Example"}],
        "text": "[https://example.com|Example]"
    }));
    assert_eq!(
        result,
        Ok(Node::UrlLink(UrlLink {
            url: "https://example.com".to_string(),
            title: Some(vec![Node::PlainText("Example".to_string())]),
            source: "[https://example.com|Example]".to_string()
        }))
    );
}

#[test]
fn tables() {
    let input = reader();

    let result = input.read_node(&json!({
        "name": "table",
        "rows": [["a", "b"], ["c", "d"]]
    }));
    assert_eq!(
        result,
        Ok(Node::Table(vec![
            vec!["a".to_string(), "b".to_string()],
            vec!["c".to_string(), "d".to_string()]
        ]))
    );

    let result = input.read_node(&json!({"name": "table", "rows": [["a", 1]]}));
    assert_eq!(
        result,
        Err(ParsingError::Expected {
            page: "Sample".to_string(),
            field: "rows",
            what: "a string for each cell"
        })
    );
}

#[test]
fn unknown_kinds_are_kept() {
    let input = reader();

    let result = input.read_node(&json!({"name": "weirdThing", "text": "?"}));
    assert_eq!(result, Ok(Node::Unknown("weirdThing".to_string())));
}

#[test]
fn malformed_nodes() {
    let input = reader();

    let result = input.read_node(&json!("plainText"));
    assert!(result.is_err());

    let result = input.read_node(&json!({"name": 42}));
    assert_eq!(
        result,
        Err(ParsingError::Expected {
            page: "Sample".to_string(),
            field: "name",
            what: "a string or null"
        })
    );

    let result = input.read_node(&json!({"name": "plainText"}));
    assert_eq!(
        result,
        Err(ParsingError::Expected {
            page: "Sample".to_string(),
            field: "text",
            what: "a string"
        })
    );

    let result = input.read_node(&json!({"name": "bold", "children": "nope"}));
    assert!(result.is_err());
}

#[test]
fn whole_wiki() {
    let content = r#"
{
    "pages": [
        {
            "word": "FrontPage",
            "aliases": ["Home"],
            "attributes": {"export": "True", "tags": ["a", "b"]},
            "text": "+ Welcome",
            "ast": [
                {"name": "heading", "level": 1, "content": [{"name": "plainText", "text": "Welcome"}]}
            ]
        },
        {
            "word": "Drafts",
            "ast": {"name": null, "children": []}
        }
    ]
}
    "#;

    let wiki = read_wiki(content).unwrap();
    assert_eq!(wiki.len(), 2);

    let page = wiki
        .page("Home")
        .unwrap();
    assert_eq!(page.word, "FrontPage");
    assert_eq!(page.text, "+ Welcome");
    assert_eq!(page.attribute("export"), Some("True"));
    assert_eq!(page.attribute("tags"), Some("b"));

    let page = wiki
        .page("Drafts")
        .unwrap();
    assert_eq!(page.ast, vec![Node::Group(vec![])]);
}

#[test]
fn duplicate_words() {
    let content = r#"
{"pages": [
    {"word": "One", "ast": []},
    {"word": "One", "ast": []}
]}
    "#;
    assert_eq!(
        read_wiki(content).err(),
        Some(ParsingError::DuplicateWord("One".to_string()))
    );

    let content = r#"
{"pages": [
    {"word": "One", "ast": []},
    {"word": "Two", "aliases": ["One"], "ast": []}
]}
    "#;
    assert_eq!(
        read_wiki(content).err(),
        Some(ParsingError::DuplicateWord("One".to_string()))
    );
}

#[test]
fn invalid_json() {
    let result = read_wiki("{\"pages\": [");
    assert!(matches!(result, Err(ParsingError::InvalidJson { .. })));

    let result = read_wiki("{\"pages\": [{\"ast\": []}]}");
    assert!(matches!(result, Err(ParsingError::InvalidJson { .. })));
}
