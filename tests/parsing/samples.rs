#[cfg(test)]
mod samples {
    use std::fs;
    use std::path::{Path, PathBuf};

    use wikiorg::parsing;

    fn dumps(dir: &Path) -> Vec<PathBuf> {
        let entries = fs::read_dir(dir).expect("Failed to read directory");

        let mut files = Vec::new();
        for entry in entries {
            let entry = entry.expect("Failed to read directory entry");
            let path = entry.path();

            if path
                .extension()
                .and_then(|s| s.to_str())
                == Some("json")
            {
                files.push(path);
            }
        }
        files
    }

    #[test]
    fn ensure_samples_parse() {
        let dir = Path::new("tests/samples/");

        assert!(dir.exists(), "samples directory missing");

        let files = dumps(dir);
        assert!(!files.is_empty(), "No .json files found in samples directory");

        let mut failures = Vec::new();

        for file in &files {
            let content = parsing::load(&file)
                .unwrap_or_else(|e| panic!("Failed to load file {:?}: {:?}", file, e));

            match parsing::parse(&content) {
                Ok(_) => {}
                Err(e) => {
                    println!("File {:?} failed to parse: {}", file, e);
                    failures.push(file.clone());
                }
            }
        }

        if !failures.is_empty() {
            panic!(
                "Sample files should parse successfully, but {} files failed",
                failures.len()
            );
        }
    }

    #[test]
    fn ensure_broken_fail() {
        let dir = Path::new("tests/broken/");

        assert!(dir.exists(), "broken directory missing");

        let files = dumps(dir);
        assert!(!files.is_empty(), "No .json files found in broken directory");

        let mut unexpected_successes = Vec::new();

        for file in &files {
            let content = parsing::load(&file)
                .unwrap_or_else(|e| panic!("Failed to load file {:?}: {:?}", file, e));

            if parsing::parse(&content).is_ok() {
                println!("File {:?} unexpectedly parsed", file);
                unexpected_successes.push(file.clone());
            }
        }

        if !unexpected_successes.is_empty() {
            panic!(
                "Broken files should fail to parse, but {} files succeeded",
                unexpected_successes.len()
            );
        }
    }

    #[test]
    fn missing_file() {
        let result = parsing::load(Path::new("tests/samples/nonexistent.json"));

        let error = result.unwrap_err();
        assert_eq!(error.problem, "File not found");
    }
}
