//! Cross-document structural consistency within a category.
//!
//! A soft, informational check: documents in the same category directory
//! should all carry a main title and reach similar heading depth. Nothing
//! here is an error except an unreadable file.

use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

use crate::checker::{Checker, Findings};
use crate::config::Config;
use crate::error::Error;
use crate::markdown::MarkdownDoc;

/// Compares the heading shape of sibling documents per category.
pub struct StructureChecker {
    config: Config,
    findings: Findings,
    root: PathBuf,
}

/// The heading shape of one document, as compared across a category.
struct DocShape {
    has_title: bool,
    max_level: usize,
    name: String,
}

impl StructureChecker {
    /// Build a checker for the given project root and expectation tables.
    pub fn new(root: &Path, config: &Config) -> Self {
        Self {
            config: config.clone(),
            findings: Findings::new(),
            root: root.to_path_buf(),
        }
    }
}

impl Checker for StructureChecker {
    fn name(&self) -> &'static str {
        "structure"
    }

    fn check(&mut self) -> Result<bool, Error> {
        for category in &self.config.categories {
            let dir = self.root.join(&self.config.docs_dir).join(category);
            if !dir.is_dir() {
                continue;
            }
            check_category(category, &dir, &mut self.findings);
        }
        Ok(self.findings.passed())
    }

    fn findings(&self) -> &Findings {
        &self.findings
    }
}

fn check_category(category: &str, dir: &Path, findings: &mut Findings) {
    let paths = category_documents(dir);
    // Fewer than two documents leaves nothing to compare.
    if paths.len() < 2 {
        return;
    }

    let mut shapes: Vec<DocShape> = Vec::new();
    for path in &paths {
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        match std::fs::read_to_string(path) {
            Ok(content) => shapes.push(document_shape(&name, &content)),
            Err(e) => findings.error(format!("failed to read {}: {e}", path.display())),
        }
    }

    let untitled: Vec<&str> = shapes
        .iter()
        .filter(|s| !s.has_title)
        .map(|s| s.name.as_str())
        .collect();
    if !untitled.is_empty() {
        findings.warning(format!(
            "category [{category}]: documents missing a main title: {}",
            untitled.join(", ")
        ));
    }

    let depths: BTreeSet<usize> = shapes.iter().map(|s| s.max_level).collect();
    if depths.len() > 1 {
        let listing: Vec<String> = shapes
            .iter()
            .map(|s| format!("{}={}", s.name, s.max_level))
            .collect();
        findings.warning(format!(
            "category [{category}]: inconsistent heading depth: {}",
            listing.join(", ")
        ));
    }
}

/// Markdown files directly inside the category directory, sorted by name.
/// Subdirectories are not descended into; they are not part of the category.
fn category_documents(dir: &Path) -> Vec<PathBuf> {
    let mut paths: Vec<PathBuf> = std::fs::read_dir(dir)
        .map(|entries| {
            entries
                .filter_map(Result::ok)
                .map(|e| e.path())
                .filter(|p| p.is_file())
                .filter(|p| p.extension().is_some_and(|ext| ext == "md"))
                .collect()
        })
        .unwrap_or_default();
    paths.sort();
    paths
}

fn document_shape(name: &str, content: &str) -> DocShape {
    let doc = MarkdownDoc::parse(content);
    DocShape {
        has_title: doc.headings.first().is_some_and(|h| h.level == 1),
        max_level: doc.headings.iter().map(|h| h.level).max().unwrap_or(0),
        name: name.to_string(),
    }
}
