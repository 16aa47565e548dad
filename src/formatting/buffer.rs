//! Accumulate text a line at a time.

use crate::language::{Fragment, Table};

/// Indentation of body text within a section.
pub const BASE_INDENT: usize = 2;

/// Holds the line currently being assembled along with the fragments
/// already committed for the page being rendered.
#[derive(Debug)]
pub struct LineBuffer {
    /// Number of spaces prefixed to each line as it is committed. Callers
    /// adjust this around nested blocks and are responsible for restoring it.
    pub indent: usize,
    current: String,
    fragments: Vec<Fragment>,
}

impl Default for LineBuffer {
    fn default() -> Self {
        LineBuffer::new()
    }
}

impl LineBuffer {
    pub fn new() -> LineBuffer {
        LineBuffer {
            indent: BASE_INDENT,
            current: String::new(),
            fragments: Vec::new(),
        }
    }

    pub fn append(&mut self, text: &str) {
        self.current
            .push_str(text);
    }

    /// Commit the current line. An empty line is only emitted if forced;
    /// otherwise this does nothing, so that structural boundaries don't pad
    /// the output with blank lines.
    pub fn commit(&mut self, force: bool) {
        if !force
            && self
                .current
                .is_empty()
        {
            return;
        }

        let mut line = " ".repeat(self.indent);
        line.push_str(&self.current);
        line.push('\n');

        self.fragments
            .push(Fragment::Line(line));
        self.current
            .clear();
    }

    /// Add a structured fragment directly, independent of the current line.
    pub fn append_fragment(&mut self, fragment: Fragment) {
        self.fragments
            .push(fragment);
    }

    pub fn append_table(&mut self, table: Table) {
        self.append_fragment(Fragment::Table(table));
    }

    pub fn current(&self) -> &str {
        &self.current
    }

    pub fn fragments(&self) -> &[Fragment] {
        &self.fragments
    }

    pub fn into_fragments(self) -> Vec<Fragment> {
        self.fragments
    }
}

#[cfg(test)]
mod check {
    use super::*;

    fn line(text: &str) -> Fragment {
        Fragment::Line(text.to_string())
    }

    #[test]
    fn unforced_commit_of_empty_line() {
        let mut output = LineBuffer::new();

        output.commit(false);
        assert_eq!(
            output
                .fragments()
                .len(),
            0
        );
    }

    #[test]
    fn forced_commit_of_empty_line() {
        let mut output = LineBuffer::new();

        output.commit(true);
        assert_eq!(output.fragments(), &[line("  \n")]);

        output.commit(true);
        assert_eq!(
            output
                .fragments()
                .len(),
            2
        );
    }

    #[test]
    fn commit_prefixes_indent() {
        let mut output = LineBuffer::new();

        output.append("Luke");
        output.append(", ");
        output.append("Leia");
        assert_eq!(output.current(), "Luke, Leia");

        output.commit(false);
        assert_eq!(output.current(), "");

        output.indent = 6;
        output.append("Han");
        output.commit(true);

        assert_eq!(output.fragments(), &[line("  Luke, Leia\n"), line("      Han\n")]);
    }

    #[test]
    fn fragments_bypass_current_line() {
        let mut output = LineBuffer::new();

        output.append("pending");
        output.append_table(Table {
            rows: vec![vec!["a".to_string()]],
        });
        output.commit(false);

        assert_eq!(
            output.into_fragments(),
            vec![
                Fragment::Table(Table {
                    rows: vec![vec!["a".to_string()]]
                }),
                line("  pending\n")
            ]
        );
    }
}
