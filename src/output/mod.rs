//! Serialization of the exported outline as an org-mode file

use std::path::Path;

use tracing::info;

use crate::formatting::BASE_INDENT;
use crate::language::{ExportError, Fragment, Outline, Section, Table};

/// Write the outline out as org-mode text.
pub fn write(outline: &Outline) -> String {
    let mut output = String::new();

    for section in &outline.sections {
        write_section(&mut output, section);
    }

    output
}

/// Write the outline to the given file, replacing anything already there.
pub fn save(outline: &Outline, path: &Path) -> Result<(), ExportError> {
    info!("Writing {}", path.display());

    let content = write(outline);

    std::fs::write(path, content).map_err(|error| ExportError::Writing {
        path: path.to_path_buf(),
        details: error.to_string(),
    })
}

fn write_section(output: &mut String, section: &Section) {
    let margin = " ".repeat(BASE_INDENT);

    output.push_str(&"*".repeat(section.level as usize));
    output.push(' ');
    output.push_str(&section.title);
    output.push('\n');

    if !section
        .properties
        .is_empty()
    {
        output.push_str(&margin);
        output.push_str(":PROPERTIES:\n");
        for (key, value) in &section.properties {
            output.push_str(&margin);
            output.push_str(&format!(":{}: {}\n", key, value));
        }
        output.push_str(&margin);
        output.push_str(":END:\n");
    }

    for fragment in &section.fragments {
        match fragment {
            Fragment::Line(line) => output.push_str(line),
            Fragment::Table(table) => write_table(output, table, &margin),
        }
    }
}

/// Tables always sit at the section's base margin, whatever the indent of
/// the text around them.
fn write_table(output: &mut String, table: &Table, margin: &str) {
    for row in &table.rows {
        output.push_str(margin);
        output.push('|');
        for cell in row {
            output.push(' ');
            output.push_str(&escape_cell(cell));
            output.push_str(" |");
        }
        output.push('\n');
    }
}

// a literal bar would start a new column
fn escape_cell(cell: &str) -> String {
    cell.replace('|', "\\vert{}")
}
