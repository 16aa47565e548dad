//! Loading wiki dumps

use std::path::Path;
use tracing::debug;

use crate::language::{LoadingError, Wiki};

pub mod parser;

pub use parser::ParsingError;

/// Read a file and return an owned String.
pub fn load(filename: &Path) -> Result<String, LoadingError<'_>> {
    match std::fs::read_to_string(filename) {
        Ok(content) => Ok(content),
        Err(error) => {
            debug!(?error);
            match error.kind() {
                std::io::ErrorKind::NotFound => Err(LoadingError {
                    problem: "File not found".to_string(),
                    details: String::new(),
                    filename,
                }),
                _ => Err(LoadingError {
                    problem: "Failed reading".to_string(),
                    details: error
                        .kind()
                        .to_string(),
                    filename,
                }),
            }
        }
    }
}

/// Parse the content of a wiki dump into a Wiki, or return the problem that
/// stopped us.
pub fn parse(content: &str) -> Result<Wiki, ParsingError> {
    match parser::read_wiki(content) {
        Ok(wiki) => {
            debug!(
                "Found {} page{}",
                wiki.len(),
                if wiki.len() == 1 { "" } else { "s" }
            );
            Ok(wiki)
        }
        Err(error) => {
            debug!("error: {}", error);
            Err(error)
        }
    }
}
