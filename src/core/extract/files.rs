//! Expansion of extraction inputs into an ordered list of source files.

use std::{
    collections::HashSet,
    path::{Path, PathBuf},
};

use colored::Colorize;
use glob::{Pattern, glob};
use walkdir::WalkDir;

/// Check if a pattern contains glob wildcards (* or ?).
/// Patterns without wildcards are treated as literal paths.
pub fn is_glob_pattern(pattern: &str) -> bool {
    pattern.contains('*') || pattern.contains('?')
}

/// Result of expanding the inputs.
#[derive(Debug, Default)]
pub struct InputFiles {
    /// Files in the order they were named; directories expand sorted by name.
    pub files: Vec<PathBuf>,
    pub skipped_count: usize,
}

/// Paths excluded from extraction, either by prefix or by glob.
#[derive(Debug, Default)]
pub struct IgnoreSet {
    literal: Vec<PathBuf>,
    globs: Vec<Pattern>,
}

impl IgnoreSet {
    /// Build from config patterns. Literal patterns are resolved against
    /// `base_dir`; invalid globs are reported in verbose mode and skipped.
    pub fn new(base_dir: &Path, patterns: &[String], verbose: bool) -> Self {
        let mut set = Self::default();
        for p in patterns {
            if is_glob_pattern(p) {
                match Pattern::new(p) {
                    Ok(pattern) => set.globs.push(pattern),
                    Err(e) => {
                        if verbose {
                            eprintln!(
                                "{} Invalid ignore pattern '{}': {}",
                                "warning:".bold().yellow(),
                                p,
                                e
                            );
                        }
                    }
                }
            } else {
                set.literal.push(base_dir.join(p));
            }
        }
        set
    }

    pub fn is_ignored(&self, path: &Path) -> bool {
        let path_str = path.to_string_lossy();
        self.literal.iter().any(|ignore| path.starts_with(ignore))
            || self.globs.iter().any(|p| p.matches(&path_str))
    }
}

/// Expand files, directories and glob patterns into source files.
///
/// Duplicates keep their first position. Literal file paths are passed
/// through even if they do not exist, so that reading them reports the error.
pub fn collect_input_files(inputs: &[String], ignores: &IgnoreSet, verbose: bool) -> InputFiles {
    let mut result = InputFiles::default();
    let mut seen: HashSet<PathBuf> = HashSet::new();

    let mut push = |path: PathBuf, result: &mut InputFiles| {
        if ignores.is_ignored(&path) {
            return;
        }
        if seen.insert(path.clone()) {
            result.files.push(path);
        }
    };

    for input in inputs {
        let roots: Vec<PathBuf> = if is_glob_pattern(input) {
            match glob(input) {
                Ok(entries) => entries.flatten().collect(),
                Err(e) => {
                    if verbose {
                        eprintln!(
                            "{} Invalid glob pattern '{}': {}",
                            "warning:".bold().yellow(),
                            input,
                            e
                        );
                    }
                    continue;
                }
            }
        } else {
            vec![PathBuf::from(input)]
        };

        for root in roots {
            if !root.is_dir() {
                push(root, &mut result);
                continue;
            }
            for entry in WalkDir::new(&root).sort_by_file_name() {
                let entry = match entry {
                    Ok(e) => e,
                    Err(e) => {
                        result.skipped_count += 1;
                        if verbose {
                            eprintln!("{} Cannot access path: {}", "warning:".bold().yellow(), e);
                        }
                        continue;
                    }
                };
                if entry.file_type().is_file() {
                    push(entry.into_path(), &mut result);
                }
            }
        }
    }

    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::fs;
    use tempfile::TempDir;

    fn touch(dir: &Path, rel: &str) -> PathBuf {
        let path = dir.join(rel);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(&path, "").unwrap();
        path
    }

    fn names(files: &[PathBuf], base: &Path) -> Vec<String> {
        files
            .iter()
            .map(|f| f.strip_prefix(base).unwrap().to_string_lossy().replace('\\', "/"))
            .collect()
    }

    #[test]
    fn expands_directories_sorted_by_name() {
        let dir = TempDir::new().unwrap();
        touch(dir.path(), "lib/b.rb");
        touch(dir.path(), "lib/a.rb");
        touch(dir.path(), "lib/sub/c.rb");

        let input = vec![dir.path().join("lib").to_string_lossy().into_owned()];
        let result = collect_input_files(&input, &IgnoreSet::default(), false);

        assert_eq!(
            names(&result.files, dir.path()),
            ["lib/a.rb", "lib/b.rb", "lib/sub/c.rb"]
        );
    }

    #[test]
    fn keeps_argument_order_and_drops_duplicates() {
        let dir = TempDir::new().unwrap();
        let b = touch(dir.path(), "b.rb");
        let a = touch(dir.path(), "a.rb");

        let input = vec![
            b.to_string_lossy().into_owned(),
            a.to_string_lossy().into_owned(),
            b.to_string_lossy().into_owned(),
        ];
        let result = collect_input_files(&input, &IgnoreSet::default(), false);

        assert_eq!(result.files, vec![b, a]);
    }

    #[test]
    fn expands_glob_inputs() {
        let dir = TempDir::new().unwrap();
        touch(dir.path(), "app/x.rb");
        touch(dir.path(), "app/y.js");

        let pattern = format!("{}/app/*.rb", dir.path().display());
        let result = collect_input_files(&[pattern], &IgnoreSet::default(), false);

        assert_eq!(names(&result.files, dir.path()), ["app/x.rb"]);
    }

    #[test]
    fn applies_ignores() {
        let dir = TempDir::new().unwrap();
        touch(dir.path(), "lib/keep.rb");
        touch(dir.path(), "lib/vendor/skip.rb");
        touch(dir.path(), "lib/skip_test.rb");

        let ignores = IgnoreSet::new(
            dir.path(),
            &["lib/vendor".to_string(), "**/*_test.rb".to_string()],
            false,
        );
        let input = vec![dir.path().join("lib").to_string_lossy().into_owned()];
        let result = collect_input_files(&input, &ignores, false);

        assert_eq!(names(&result.files, dir.path()), ["lib/keep.rb"]);
    }

    #[test]
    fn passes_missing_literal_files_through() {
        let result = collect_input_files(
            &["does/not/exist.rb".to_string()],
            &IgnoreSet::default(),
            false,
        );
        assert_eq!(result.files, vec![PathBuf::from("does/not/exist.rb")]);
    }
}
