//! Conversion of wiki page syntax trees into org-mode section bodies

mod buffer;
pub mod formatter;
mod titles;

pub use buffer::{LineBuffer, BASE_INDENT};
pub use formatter::{render_page, Formatter};
pub use titles::{scan, Titles};
