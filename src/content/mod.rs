//! Content scan set for the utility-class generator.
//!
//! The scan set is build-time configuration: it names which source files
//! a CSS utility generator would inspect. It is compiled at startup so
//! broken patterns fail fast, and it is reported in the startup log, but
//! it plays no part in request routing.

use std::path::{Path, PathBuf};

use globset::{Glob, GlobSet, GlobSetBuilder};

/// Compiled set of scan globs.
#[derive(Debug)]
pub struct ScanSet {
    set: GlobSet,
    patterns: Vec<String>,
}

impl ScanSet {
    /// Compile patterns into a single matcher. Leading `./` segments are
    /// normalized away so config can use either spelling.
    pub fn from_patterns(patterns: &[String]) -> Result<Self, globset::Error> {
        let mut builder = GlobSetBuilder::new();
        for pattern in patterns {
            builder.add(Glob::new(pattern.trim_start_matches("./"))?);
        }
        Ok(Self {
            set: builder.build()?,
            patterns: patterns.to_vec(),
        })
    }

    /// Whether a path (relative to the scan root) is covered by the set.
    pub fn matches(&self, path: impl AsRef<Path>) -> bool {
        self.set.is_match(path.as_ref())
    }

    /// Enumerate files under `root` covered by the set, sorted for
    /// deterministic reporting. Unreadable directories are skipped.
    pub fn walk(&self, root: &Path) -> Vec<PathBuf> {
        let mut found = Vec::new();
        let mut stack = vec![root.to_path_buf()];
        while let Some(dir) = stack.pop() {
            let entries = match std::fs::read_dir(&dir) {
                Ok(entries) => entries,
                Err(_) => continue,
            };
            for entry in entries.flatten() {
                let path = entry.path();
                if path.is_dir() {
                    stack.push(path);
                } else if let Ok(relative) = path.strip_prefix(root) {
                    if self.set.is_match(relative) {
                        found.push(path);
                    }
                }
            }
        }
        found.sort();
        found
    }

    pub fn patterns(&self) -> &[String] {
        &self.patterns
    }

    pub fn is_empty(&self) -> bool {
        self.patterns.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scan_set(patterns: &[&str]) -> ScanSet {
        let owned: Vec<String> = patterns.iter().map(|p| p.to_string()).collect();
        ScanSet::from_patterns(&owned).unwrap()
    }

    #[test]
    fn matches_brace_alternation_and_globstar() {
        let set = scan_set(&["index.html", "src/**/*.{vue,js,ts}"]);
        assert!(set.matches("index.html"));
        assert!(set.matches("src/App.vue"));
        assert!(set.matches("src/components/nav/Bar.ts"));
        assert!(!set.matches("src/styles/main.css"));
        assert!(!set.matches("pages/about.html"));
    }

    #[test]
    fn leading_dot_slash_is_normalized() {
        let set = scan_set(&["./src/**/*.js"]);
        assert!(set.matches("src/main.js"));
    }

    #[test]
    fn unclosed_brace_fails_to_compile() {
        let owned = vec!["src/**/*.{vue,js".to_string()];
        assert!(ScanSet::from_patterns(&owned).is_err());
    }

    #[test]
    fn walk_only_reports_covered_files() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::create_dir_all(dir.path().join("src/components")).unwrap();
        std::fs::write(dir.path().join("index.html"), "<div id=\"app\"></div>").unwrap();
        std::fs::write(dir.path().join("src/main.js"), "").unwrap();
        std::fs::write(dir.path().join("src/components/Nav.vue"), "").unwrap();
        std::fs::write(dir.path().join("src/readme.md"), "").unwrap();

        let set = scan_set(&["index.html", "src/**/*.{vue,js}"]);
        let files = set.walk(dir.path());
        let names: Vec<_> = files
            .iter()
            .map(|p| p.strip_prefix(dir.path()).unwrap().to_string_lossy().into_owned())
            .collect();
        assert_eq!(names, vec!["index.html", "src/components/Nav.vue", "src/main.js"]);
    }
}
