#[cfg(test)]
mod examples {
    use std::fs;
    use std::path::Path;

    use wikiorg::exporting::{collect_titles, Exporter, OrgExporter, ORG_MODE};
    use wikiorg::language::{Fragment, Wiki};
    use wikiorg::{output, parsing};

    /// Golden test for the export command
    ///
    /// Every .json dump in tests/samples/ that has an .org file alongside it
    /// is exported in full and compared with that file. If they differ,
    /// either the exporter is wrong or the expected output needs updating
    /// after a deliberate change.

    /// Simple diff function to show line-by-line differences
    fn show_diff(expected: &str, exported: &str, file_path: &Path) {
        let expected_lines: Vec<&str> = expected
            .lines()
            .collect();
        let exported_lines: Vec<&str> = exported
            .lines()
            .collect();

        let max_lines = expected_lines
            .len()
            .max(exported_lines.len());

        println!("\nDifferences found in file: {:?}", file_path);
        println!("--- Expected");
        println!("+++ Exported");

        for i in 0..max_lines {
            let want = expected_lines
                .get(i)
                .unwrap_or(&"");
            let got = exported_lines
                .get(i)
                .unwrap_or(&"");

            if want != got {
                println!("@@ Line {} @@", i + 1);
                println!("- {:?}", want);
                println!("+ {:?}", got);
            }
        }
    }

    fn open(file: &Path) -> Wiki {
        let content = parsing::load(file)
            .unwrap_or_else(|e| panic!("Failed to load file {:?}: {:?}", file, e));
        parsing::parse(&content)
            .unwrap_or_else(|e| panic!("Failed to parse file {:?}: {}", file, e))
    }

    #[test]
    fn ensure_identical_output() {
        let dir = Path::new("tests/samples");

        assert!(dir.exists(), "samples directory missing");

        let entries = fs::read_dir(dir).expect("Failed to read samples directory");

        let mut files = Vec::new();
        for entry in entries {
            let entry = entry.expect("Failed to read directory entry");
            let path = entry.path();

            if path
                .extension()
                .and_then(|s| s.to_str())
                == Some("json")
                && path
                    .with_extension("org")
                    .exists()
            {
                files.push(path);
            }
        }

        assert!(!files.is_empty(), "No golden samples found");

        let mut failures = Vec::new();

        for file in &files {
            let wiki = open(file);
            let words: Vec<&str> = wiki
                .words()
                .collect();

            let outline = OrgExporter::new()
                .convert(&wiki, &words)
                .unwrap_or_else(|e| panic!("Failed to export {:?}: {}", file, e));
            let result = output::write(&outline);

            let expected = fs::read_to_string(file.with_extension("org")).unwrap();

            if result != expected {
                show_diff(&expected, &result, file);
                failures.push(file.clone());
            }
        }

        if !failures.is_empty() {
            panic!("{} samples did not export as expected", failures.len());
        }
    }

    #[test]
    fn export_writes_file() {
        let wiki = open(Path::new("tests/samples/garden.json"));
        let dir = tempfile::tempdir().unwrap();
        let destination = dir
            .path()
            .join("garden.org");

        let exporter = OrgExporter::new();
        assert!(exporter.export(&wiki, &["Plan", "Compost"], ORG_MODE, &destination));

        let written = fs::read_to_string(&destination).unwrap();
        assert!(written.starts_with("* Garden Plan\n  :PROPERTIES:\n  :CUSTOM_ID: GardenPlan\n"));
        assert!(written.contains("* Compost\n"));
        assert!(!written.contains("* Tomatoes"));

        // titles are only scanned from exported pages
        assert!(written.contains("[[#Tomatoes]] and"));
    }

    #[test]
    fn export_to_unwritable_destination() {
        let wiki = open(Path::new("tests/samples/garden.json"));
        let dir = tempfile::tempdir().unwrap();
        let destination = dir
            .path()
            .join("missing")
            .join("garden.org");

        let exporter = OrgExporter::new();
        assert!(!exporter.export(&wiki, &["Plan"], ORG_MODE, &destination));
        assert!(!destination.exists());
    }

    #[test]
    fn sections_carry_ids() {
        let wiki = open(Path::new("tests/samples/garden.json"));
        let words: Vec<&str> = wiki
            .words()
            .collect();

        let titles = collect_titles(&wiki, &words).unwrap();
        assert_eq!(titles.get("GardenPlan"), Some("Garden Plan"));
        assert_eq!(titles.get("Herbs"), Some("Herbs"));

        let outline = OrgExporter::new()
            .assemble(&wiki, &words, &titles)
            .unwrap();

        let ids: Vec<_> = outline
            .sections
            .iter()
            .map(|section| section.custom_id())
            .collect();
        assert_eq!(
            ids,
            vec![
                Some("GardenPlan"),
                Some("Tomatoes"),
                Some("Herbs"),
                Some("Compost")
            ]
        );

        let tables: usize = outline
            .sections
            .iter()
            .flat_map(|section| section.fragments.iter())
            .filter(|fragment| matches!(fragment, Fragment::Table(_)))
            .count();
        assert_eq!(tables, 1);
    }
}
