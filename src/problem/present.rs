use owo_colors::OwoColorize;
use std::path::Path;
use wikiorg::{language::LoadingError, parsing::ParsingError};

/// Format a LoadingError with concise single-line output
pub fn concise_loading_error(error: &LoadingError<'_>) -> String {
    format!(
        "{}: {}: {}",
        "error".bright_red(),
        error
            .filename
            .display(),
        error
            .to_string()
            .bold()
    )
}

/// Format a parsing error, showing the offending line of the dump if the
/// problem is with the JSON itself.
pub fn full_parsing_error(error: &ParsingError, filename: &Path, source: &str) -> String {
    match error {
        ParsingError::InvalidJson {
            line,
            column,
            details,
        } => {
            let code = source
                .lines()
                .nth(line.saturating_sub(1))
                .unwrap_or("?");
            let width = 3.max(
                line.to_string()
                    .len(),
            );
            let column = (*column).max(1);

            format!(
                r#"
{}: {}:{}:{} {}

{:width$} {}
{:width$} {} {}
{:width$} {} {:>column$}

{}
                "#,
                "error".bright_red(),
                filename.to_string_lossy(),
                line,
                column,
                "Invalid wiki dump".bold(),
                ' ',
                '|'.bright_blue(),
                line.bright_blue(),
                '|'.bright_blue(),
                code,
                ' ',
                '|'.bright_blue(),
                '^'.bright_red(),
                details
            )
            .trim_ascii()
            .to_string()
        }
        _ => format!(
            "{}: {}: {}",
            "error".bright_red(),
            filename.to_string_lossy(),
            error
                .to_string()
                .bold()
        ),
    }
}
