//! Export the pages of a wiki into a single Emacs org-mode outline.
//!
//! Pages arrive already parsed, as syntax trees from the wiki engine. Each
//! page becomes a top-level heading in the output, carrying the page's word
//! as its `CUSTOM_ID` so that links between pages survive as internal links.

pub mod exporting;
pub mod formatting;
pub mod language;
pub mod output;
pub mod parsing;
