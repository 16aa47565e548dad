use super::*;
use crate::language::{ListKind, MarkerKind, Wiki};

fn text(text: &str) -> Node {
    Node::PlainText(text.to_string())
}

fn heading(content: Vec<Node>) -> Node {
    Node::Heading { level: 1, content }
}

fn link(word: &str, title: Option<Vec<Node>>, source: &str) -> Node {
    Node::WikiWord(WikiWord {
        word: word.to_string(),
        title,
        source: source.to_string(),
    })
}

/// Concatenate the text lines of rendered output, ignoring anything else.
fn lines(fragments: &[Fragment]) -> String {
    let mut result = String::new();
    for fragment in fragments {
        if let Fragment::Line(line) = fragment {
            result.push_str(line);
        }
    }
    result
}

fn render(nodes: Vec<Node>) -> String {
    let wiki = Wiki::new();
    let titles = Titles::new();
    let fragments = Formatter::new(&wiki, &titles).render(&nodes);
    lines(&fragments)
}

/// A small wiki for exercising link resolution: a page with a title, one
/// without, one that has opted out of export.
fn linked() -> (Wiki, Titles) {
    let mut wiki = Wiki::new();

    let mut page = Page::new("Target", vec![]);
    page.aliases = vec!["T".to_string()];
    wiki.insert(page);

    wiki.insert(Page::new("Untitled", vec![]));

    let mut page = Page::new("Hidden", vec![]);
    page.attributes
        .insert("export".to_string(), vec!["False".to_string()]);
    wiki.insert(page);

    let mut titles = Titles::new();
    titles.insert("Target", "Target Title".to_string());

    (wiki, titles)
}

fn render_linked(nodes: Vec<Node>) -> String {
    let (wiki, titles) = linked();
    let fragments = Formatter::new(&wiki, &titles).render(&nodes);
    lines(&fragments)
}

#[test]
fn plain_text_and_breaks() {
    let result = render(vec![text("Hello"), Node::LineBreak, text("World")]);
    assert_eq!(result, "  Hello\n  World\n");

    let result = render(vec![Node::LineBreak, Node::LineBreak]);
    assert_eq!(result, "  \n  \n");

    let result = render(vec![text("one"), Node::NewParagraph, text("two")]);
    assert_eq!(result, "  one\n  \n  two\n");

    let result = render(vec![text("a"), Node::Whitespace, text("b")]);
    assert_eq!(result, "  a b\n");
}

#[test]
fn empty_page() {
    assert_eq!(render(vec![]), "");
    assert_eq!(render(vec![Node::StringEnd]), "");
}

#[test]
fn indented_text() {
    let result = render(vec![Node::IndentedText(vec![text("inside")])]);
    assert_eq!(result, "    inside\n");

    let result = render(vec![Node::IndentedText(vec![Node::IndentedText(vec![
        text("deeper"),
    ])])]);
    assert_eq!(result, "      deeper\n");
}

#[test]
fn indentation_restored_for_siblings() {
    let result = render(vec![
        text("outer"),
        Node::IndentedText(vec![text("inner"), Node::LineBreak, text("more")]),
        text("after"),
        Node::LineBreak,
        Node::IndentedText(vec![text("again")]),
    ]);
    assert_eq!(
        result,
        "  outer\n    inner\n    more\n  after\n    again\n"
    );
}

#[test]
fn lists_do_not_indent() {
    let result = render(vec![
        text("Need:"),
        Node::List(
            ListKind::Unordered,
            vec![
                Node::Marker(MarkerKind::Bullet, "* ".to_string()),
                text("eggs"),
                Node::LineBreak,
                Node::Marker(MarkerKind::Bullet, "* ".to_string()),
                text("milk"),
            ],
        ),
    ]);
    assert_eq!(result, "  Need:\n  eggs\n  milk\n");
}

#[test]
fn emphasis_commits_its_content() {
    let result = render(vec![
        text("a "),
        Node::Italics(vec![text("b")]),
        Node::Whitespace,
        Node::Bold(vec![text("c")]),
    ]);
    assert_eq!(result, "  a /b\n  / *c\n  *\n");

    let result = render(vec![Node::Bold(vec![text("c")]), text("d")]);
    assert_eq!(result, "  *c\n  *d\n");

    // the opening marker alone is still a pending line
    let result = render(vec![Node::Italics(vec![]), text("e")]);
    assert_eq!(result, "  /\n  /e\n");
}

#[test]
fn html_passes_through() {
    let result = render(vec![
        Node::HtmlTag("<br/>".to_string()),
        Node::HtmlEntity("&nbsp;".to_string()),
    ]);
    assert_eq!(result, "  <br/>&nbsp;\n");
}

#[test]
fn first_heading_is_not_repeated() {
    let result = render(vec![heading(vec![text("Title")]), text("Body")]);
    assert_eq!(result, "  Body\n");
}

#[test]
fn unnamed_terminals_before_first_heading() {
    let result = render(vec![
        Node::Anonymous(String::new()),
        heading(vec![text("Foo")]),
        text("body"),
    ]);
    assert_eq!(result, "  body\n");

    let result = render(vec![
        Node::Group(vec![Node::Anonymous("\n".to_string())]),
        Node::Anonymous(String::new()),
        heading(vec![Node::Anonymous(String::new()), text("Foo")]),
        text("body"),
    ]);
    assert_eq!(result, "  body\n");
}

#[test]
fn later_headings_are_rendered() {
    let result = render(vec![
        text("intro"),
        Node::LineBreak,
        heading(vec![text("Second")]),
        text("more"),
    ]);
    assert_eq!(result, "  intro\n  Second\n  more\n");

    let result = render(vec![
        heading(vec![text("First")]),
        heading(vec![text("Second")]),
    ]);
    assert_eq!(result, "  Second\n");
}

#[test]
fn horizontal_line() {
    let result = render(vec![text("a"), Node::HorizontalLine, text("b")]);
    assert_eq!(result, "  a\n  -----\n  b\n");
}

#[test]
fn preformatted_block() {
    let result = render(vec![
        text("code:"),
        Node::PreBlock("x = 1\ny = 2".to_string()),
        Node::LineBreak,
        text("done"),
    ]);
    assert_eq!(
        result,
        "  code:\n  #+BEGIN_EXAMPLE\n  x = 1\n  y = 2\n  #+END_EXAMPLE\n  done\n"
    );

    let result = render(vec![Node::PreBlock("only".to_string())]);
    assert_eq!(result, "  #+BEGIN_EXAMPLE\n  only\n  #+END_EXAMPLE\n");
}

#[test]
fn todo_entry() {
    let result = render(vec![
        text("first"),
        Node::TodoEntry {
            key: "todo".to_string(),
            delimiter: ":".to_string(),
            value: vec![text(" buy eggs")],
        },
        text("last"),
    ]);
    assert_eq!(result, "  first\n  TODO: todo: buy eggs\n  last\n");
}

#[test]
fn hidden_content() {
    let result = render(vec![
        Node::Script("print('hi')".to_string()),
        Node::NoExport(vec![text("secret")]),
        Node::Anonymous("=".to_string()),
        Node::Marker(MarkerKind::Number, "1. ".to_string()),
        text("kept"),
        Node::StringEnd,
    ]);
    assert_eq!(result, "  kept\n");
}

#[test]
fn anchors() {
    let result = render(vec![text("x"), Node::AnchorDef("top".to_string())]);
    assert_eq!(result, "  x<a name=\"top\" class=\"wikidpad\"></a>\n");

    let wiki = Wiki::new();
    let titles = Titles::new();
    let fragments = Formatter::new(&wiki, &titles)
        .with_anchor_prefix("RecipeBook")
        .render(&[Node::AnchorDef("top".to_string())]);
    assert_eq!(
        lines(&fragments),
        "  <a name=\"RecipeBook#top\" class=\"wikidpad\"></a>\n"
    );
}

#[test]
fn footnotes_are_flagged() {
    let result = render(vec![text("x"), Node::Footnote("[1]".to_string()), text("y")]);
    assert_eq!(
        result,
        "  x\n  [ERROR: We can't process footnotes]\n  y\n"
    );
}

#[test]
fn unknown_nodes_are_flagged() {
    let result = render(vec![
        text("before"),
        Node::Unknown("weirdThing".to_string()),
        text("after"),
    ]);
    assert!(result.contains("Unknown parser node with name \"weirdThing\" found"));
    assert_eq!(
        result,
        "  before\n  [Unknown parser node with name \"weirdThing\" found]\n  after\n"
    );
}

#[test]
fn url_links() {
    let result = render(vec![Node::UrlLink(UrlLink {
        url: "https://orgmode.org".to_string(),
        title: None,
        source: "https://orgmode.org".to_string(),
    })]);
    assert_eq!(result, "  [[https://orgmode.org][https://orgmode.org]]\n");

    let result = render(vec![Node::UrlLink(UrlLink {
        url: "https://orgmode.org".to_string(),
        title: Some(vec![text("Org "), Node::Bold(vec![text("mode")])]),
        source: "[https://orgmode.org|Org mode]".to_string(),
    })]);
    assert_eq!(
        result,
        "  [[https://orgmode.org][Org *mode\n  *\n  ]]\n"
    );
}

#[test]
fn tables_are_structured() {
    let rows = vec![
        vec!["a".to_string(), "b".to_string()],
        vec!["c".to_string(), "d".to_string()],
    ];

    let wiki = Wiki::new();
    let titles = Titles::new();
    let fragments = Formatter::new(&wiki, &titles).render(&[
        text("before"),
        Node::Table(rows.clone()),
        text("after"),
    ]);

    assert_eq!(
        fragments,
        vec![
            Fragment::Line("  before\n".to_string()),
            Fragment::Table(Table { rows }),
            Fragment::Line("  after\n".to_string()),
        ]
    );
}

#[test]
fn link_to_titled_page() {
    let result = render_linked(vec![link("Target", None, "Target")]);
    assert_eq!(result, "  [[#Target][Target Title]]\n");

    // aliases resolve to the page's own word
    let result = render_linked(vec![link("T", None, "T")]);
    assert_eq!(result, "  [[#Target][Target Title]]\n");
}

#[test]
fn link_to_untitled_page() {
    let result = render_linked(vec![link("Untitled", None, "Untitled")]);
    assert_eq!(result, "  [[#Untitled]]\n");
}

#[test]
fn link_with_explicit_title() {
    let result = render_linked(vec![link(
        "Target",
        Some(vec![text("over "), Node::Italics(vec![text("there")])]),
        "[Target|over there]",
    )]);
    assert_eq!(result, "  [[#Target][over /there\n  /\n  ]]\n");
}

#[test]
fn link_to_bare_word() {
    let result = render_linked(vec![Node::WikiWord(WikiWord::bare("T"))]);
    assert_eq!(result, "  [[#Target][Target Title]]\n");

    let result = render_linked(vec![Node::WikiWord(WikiWord::bare("Missing"))]);
    assert_eq!(result, "  Missing\n");
}

#[test]
fn link_to_missing_page() {
    let result = render_linked(vec![text("see "), link("Missing", None, "Missing")]);
    assert_eq!(result, "  see Missing\n");

    let result = render_linked(vec![link(
        "Missing",
        Some(vec![text("elsewhere")]),
        "[Missing|elsewhere]",
    )]);
    assert_eq!(result, "  elsewhere\n");
}

#[test]
fn link_to_unexported_page() {
    let result = render_linked(vec![link("Hidden", None, "[Hidden]")]);
    assert_eq!(result, "  [Hidden]\n");

    let result = render_linked(vec![link("Hidden", Some(vec![text("secret")]), "[Hidden|secret]")]);
    assert_eq!(result, "  secret\n");
}

#[test]
fn render_page_uses_ast() {
    let (wiki, titles) = linked();
    let page = Page::new(
        "Index",
        vec![heading(vec![text("Index")]), text("go "), link("Target", None, "Target")],
    );

    let fragments = render_page(&wiki, &titles, &page, None);
    assert_eq!(lines(&fragments), "  go [[#Target][Target Title]]\n");
}
