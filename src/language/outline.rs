//! Types representing the exported org-mode outline.

/// The output document: one top-level section per exported page.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Outline {
    pub sections: Vec<Section>,
}

impl Outline {
    pub fn new() -> Outline {
        Outline::default()
    }

    pub fn append(&mut self, section: Section) {
        self.sections
            .push(section);
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Section {
    pub level: u8,
    pub title: String,
    pub properties: Vec<(String, String)>,
    pub fragments: Vec<Fragment>,
}

impl Section {
    /// A top-level section for a page, carrying the page's word as its
    /// CUSTOM_ID so internal links can address it.
    pub fn new(title: &str, id: &str, fragments: Vec<Fragment>) -> Section {
        Section {
            level: 1,
            title: title.to_string(),
            properties: vec![("CUSTOM_ID".to_string(), id.to_string())],
            fragments,
        }
    }

    pub fn custom_id(&self) -> Option<&str> {
        self.properties
            .iter()
            .find(|(key, _)| key == "CUSTOM_ID")
            .map(|(_, value)| value.as_str())
    }
}

/// A piece of section body. Lines include their indentation and trailing
/// newline; tables are kept structured until written out.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Fragment {
    Line(String),
    Table(Table),
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Table {
    pub rows: Vec<Vec<String>>,
}
