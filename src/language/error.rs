use std::{fmt, path::Path, path::PathBuf};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadingError<'i> {
    pub problem: String,
    pub details: String,
    pub filename: &'i Path,
}

impl<'i> fmt::Display for LoadingError<'i> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self
            .details
            .is_empty()
        {
            write!(f, "{}", self.problem)
        } else {
            write!(f, "{}: {}", self.problem, self.details)
        }
    }
}

/// Failures that abandon an export.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExportError {
    UnsupportedType(String),
    PageNotFound(String),
    Writing { path: PathBuf, details: String },
}

impl fmt::Display for ExportError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExportError::UnsupportedType(name) => write!(f, "unsupported export type \"{}\"", name),
            ExportError::PageNotFound(word) => write!(f, "page \"{}\" not found", word),
            ExportError::Writing { path, details } => {
                write!(f, "failed writing {}: {}", path.display(), details)
            }
        }
    }
}

impl std::error::Error for ExportError {}
