//! Exporting a set of wiki pages as a single org-mode file.
//!
//! The export runs in two passes over the pages: first collecting the title
//! of every page, then rendering each one. Titles have to be known up front
//! because a page can link to any other page in the export, including ones
//! not yet rendered, and the link shows the target's title.

use std::path::Path;

use tracing::{debug, error, info};

use crate::formatting::{render_page, Titles};
use crate::language::{ExportError, Outline, PageStore, Section};
use crate::output;

/// Name of the one export type we provide.
pub const ORG_MODE: &str = "org_mode";

/// An export type, with a description suitable for showing to a user.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExportType {
    pub name: &'static str,
    pub description: &'static str,
}

static EXPORT_TYPES: [ExportType; 1] = [ExportType {
    name: ORG_MODE,
    description: "Org mode file",
}];

static WILDCARDS: [(&str, &str); 1] = [("Org mode file (*.org)", "*.org")];

/// Additional options chosen by the user for an export. There aren't any;
/// this carries a constant so hosts that persist options have something to
/// hold onto.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AdditionalOptions(pub u8);

/// The interface a host uses to drive an exporter.
pub trait Exporter {
    /// Export types this exporter provides. When `continuous` is set, only
    /// those capable of continuous export are listed.
    fn export_types(&self, continuous: bool) -> &'static [ExportType];

    /// File patterns for the destination of the given export type, or None
    /// if that type is exported to a directory.
    fn destination_wildcards(
        &self,
        export_type: &str,
    ) -> Option<&'static [(&'static str, &'static str)]>;

    /// Version of the additional options, or -1 if they cannot be stored
    /// between sessions.
    fn additional_options_version(&self) -> i32 {
        -1
    }

    fn additional_options(&self) -> AdditionalOptions;

    /// Run the export of the given pages to the destination. Failures are
    /// logged here; the return value only says whether it worked.
    fn export(
        &self,
        store: &dyn PageStore,
        words: &[&str],
        export_type: &str,
        destination: &Path,
    ) -> bool;
}

/// Exports pages into one org-mode file, each page becoming a top-level
/// heading.
#[derive(Debug, Default, Clone)]
pub struct OrgExporter {
    anchor: Option<String>,
}

impl OrgExporter {
    pub fn new() -> OrgExporter {
        OrgExporter::default()
    }

    /// Scope anchors defined on pages to the given word.
    pub fn with_anchor_prefix(mut self, prefix: &str) -> OrgExporter {
        self.anchor = Some(prefix.to_string());
        self
    }

    /// Convert the given pages into an outline, in the order given.
    pub fn convert(&self, store: &dyn PageStore, words: &[&str]) -> Result<Outline, ExportError> {
        let titles = collect_titles(store, words)?;
        self.assemble(store, words, &titles)
    }

    /// Render each page and gather them, in order, as top-level sections.
    pub fn assemble(
        &self,
        store: &dyn PageStore,
        words: &[&str],
        titles: &Titles,
    ) -> Result<Outline, ExportError> {
        let mut outline = Outline::new();

        for word in words {
            let page = store
                .page(word)
                .ok_or_else(|| ExportError::PageNotFound(word.to_string()))?;

            let fragments = render_page(store, titles, page, self.anchor.as_deref());

            let title = titles
                .get(&page.word)
                .unwrap_or(page.word.as_str());

            outline.append(Section::new(title, &page.word, fragments));
        }

        Ok(outline)
    }

    fn try_export(
        &self,
        store: &dyn PageStore,
        words: &[&str],
        export_type: &str,
        destination: &Path,
    ) -> Result<(), ExportError> {
        if export_type != ORG_MODE {
            return Err(ExportError::UnsupportedType(export_type.to_string()));
        }

        info!(
            "Exporting {} page{}",
            words.len(),
            if words.len() == 1 { "" } else { "s" }
        );

        let outline = self.convert(store, words)?;
        output::save(&outline, destination)
    }
}

/// Scan every page for its title. This has to be complete before any page
/// is rendered.
pub fn collect_titles(store: &dyn PageStore, words: &[&str]) -> Result<Titles, ExportError> {
    let mut titles = Titles::new();

    for word in words {
        let page = store
            .page(word)
            .ok_or_else(|| ExportError::PageNotFound(word.to_string()))?;
        titles.record(page);
    }

    debug!("Collected {} titles", titles.len());
    Ok(titles)
}

impl Exporter for OrgExporter {
    fn export_types(&self, continuous: bool) -> &'static [ExportType] {
        if continuous {
            return &[];
        }
        &EXPORT_TYPES[..]
    }

    fn destination_wildcards(
        &self,
        export_type: &str,
    ) -> Option<&'static [(&'static str, &'static str)]> {
        if export_type == ORG_MODE {
            Some(&WILDCARDS[..])
        } else {
            None
        }
    }

    fn additional_options(&self) -> AdditionalOptions {
        AdditionalOptions(1)
    }

    fn export(
        &self,
        store: &dyn PageStore,
        words: &[&str],
        export_type: &str,
        destination: &Path,
    ) -> bool {
        match self.try_export(store, words, export_type, destination) {
            Ok(()) => true,
            Err(problem) => {
                error!("Export failed: {}", problem);
                false
            }
        }
    }
}

#[cfg(test)]
mod check {
    use super::*;
    use crate::language::{Fragment, Node, Page, Wiki, WikiWord};

    fn text(text: &str) -> Node {
        Node::PlainText(text.to_string())
    }

    fn heading(title: &str) -> Node {
        Node::Heading {
            level: 1,
            content: vec![text(title)],
        }
    }

    fn link(word: &str) -> Node {
        Node::WikiWord(WikiWord {
            word: word.to_string(),
            title: None,
            source: word.to_string(),
        })
    }

    #[test]
    fn export_types() {
        let exporter = OrgExporter::new();

        let types = exporter.export_types(false);
        assert_eq!(types.len(), 1);
        assert_eq!(types[0].name, "org_mode");
        assert_eq!(types[0].description, "Org mode file");

        assert!(exporter
            .export_types(true)
            .is_empty());
    }

    #[test]
    fn destination_wildcards() {
        let exporter = OrgExporter::new();

        assert_eq!(
            exporter.destination_wildcards("org_mode"),
            Some(&[("Org mode file (*.org)", "*.org")][..])
        );
        assert_eq!(exporter.destination_wildcards("html_multiple"), None);
    }

    #[test]
    fn additional_options() {
        let exporter = OrgExporter::new();
        assert_eq!(exporter.additional_options_version(), -1);
        assert_eq!(exporter.additional_options(), AdditionalOptions(1));
    }

    #[test]
    fn titles_collected_before_rendering() {
        // A links forward to B; B's title must already be known.
        let mut wiki = Wiki::new();
        wiki.insert(Page::new("A", vec![heading("Alpha"), text("see "), link("B")]));
        wiki.insert(Page::new("B", vec![heading("Beta"), text("nothing")]));

        let outline = OrgExporter::new()
            .convert(&wiki, &["A", "B"])
            .unwrap();

        assert_eq!(outline.sections.len(), 2);

        let first = &outline.sections[0];
        assert_eq!(first.title, "Alpha");
        assert_eq!(first.level, 1);
        assert_eq!(first.custom_id(), Some("A"));
        assert_eq!(
            first.fragments,
            vec![Fragment::Line("  see [[#B][Beta]]\n".to_string())]
        );

        let second = &outline.sections[1];
        assert_eq!(second.title, "Beta");
        assert_eq!(second.custom_id(), Some("B"));
    }

    #[test]
    fn sections_follow_requested_order() {
        let mut wiki = Wiki::new();
        wiki.insert(Page::new("One", vec![]));
        wiki.insert(Page::new("Two", vec![]));

        let outline = OrgExporter::new()
            .convert(&wiki, &["Two", "One"])
            .unwrap();

        let ids: Vec<_> = outline
            .sections
            .iter()
            .map(|section| section.custom_id())
            .collect();
        assert_eq!(ids, vec![Some("Two"), Some("One")]);
        assert_eq!(outline.sections[0].title, "Two");
    }

    #[test]
    fn aliases_use_page_word() {
        let mut wiki = Wiki::new();
        let mut page = Page::new("FrontPage", vec![heading("Welcome")]);
        page.aliases = vec!["Home".to_string()];
        wiki.insert(page);

        let outline = OrgExporter::new()
            .convert(&wiki, &["Home"])
            .unwrap();

        assert_eq!(outline.sections[0].title, "Welcome");
        assert_eq!(outline.sections[0].custom_id(), Some("FrontPage"));
    }

    #[test]
    fn anchor_prefix() {
        let mut wiki = Wiki::new();
        wiki.insert(Page::new("Notes", vec![Node::AnchorDef("here".to_string())]));

        let outline = OrgExporter::new()
            .with_anchor_prefix("Notes")
            .convert(&wiki, &["Notes"])
            .unwrap();

        assert_eq!(
            outline.sections[0].fragments,
            vec![Fragment::Line(
                "  <a name=\"Notes#here\" class=\"wikidpad\"></a>\n".to_string()
            )]
        );
    }

    #[test]
    fn missing_page() {
        let wiki = Wiki::new();

        let result = OrgExporter::new().convert(&wiki, &["Nowhere"]);
        assert_eq!(result, Err(ExportError::PageNotFound("Nowhere".to_string())));
    }

    #[test]
    fn failures_are_contained() {
        let mut wiki = Wiki::new();
        wiki.insert(Page::new("One", vec![]));
        let destination = Path::new("unused.org");

        let exporter = OrgExporter::new();
        assert!(!exporter.export(&wiki, &["One"], "html_single", destination));
        assert!(!exporter.export(&wiki, &["Two"], ORG_MODE, destination));
        assert!(!destination.exists());
    }
}
