//! Markdown format checks: heading spacing and depth, list-marker spacing,
//! and code-fence pairing.

use std::path::{Path, PathBuf};

use crate::checker::{Checker, Findings};
use crate::config::Config;
use crate::corpus;
use crate::error::Error;
use crate::markdown::MarkdownDoc;

/// Line-level style checks over every document in the docs tree. Spacing
/// problems are warnings; a heading nested past level six and an unclosed
/// code fence are errors.
pub struct FormatChecker {
    config: Config,
    findings: Findings,
    root: PathBuf,
}

impl FormatChecker {
    /// Build a checker for the given project root and expectation tables.
    pub fn new(root: &Path, config: &Config) -> Self {
        Self {
            config: config.clone(),
            findings: Findings::new(),
            root: root.to_path_buf(),
        }
    }
}

impl Checker for FormatChecker {
    fn name(&self) -> &'static str {
        "format"
    }

    fn check(&mut self) -> Result<bool, Error> {
        corpus::visit_markdown(
            &self.root,
            &self.config.docs_dir,
            &mut self.findings,
            |rel, content, findings| check_format(rel, content, findings),
        );
        Ok(self.findings.passed())
    }

    fn findings(&self) -> &Findings {
        &self.findings
    }
}

fn check_format(rel: &Path, content: &str, findings: &mut Findings) {
    let doc = MarkdownDoc::parse(content);

    for marker in &doc.heading_markers {
        if !marker.spaced {
            findings.warning(format!(
                "{}: line {}: heading missing space after '#'",
                rel.display(),
                marker.line
            ));
        }
        if marker.level > 6 {
            findings.error(format!(
                "{}: line {}: heading nested deeper than six levels",
                rel.display(),
                marker.line
            ));
        }
    }

    for marker in &doc.list_markers {
        if !marker.spaced {
            findings.warning(format!(
                "{}: line {}: list marker missing space",
                rel.display(),
                marker.line
            ));
        }
    }

    if doc.has_unclosed_fence() {
        findings.error(format!(
            "{}: unclosed code block (unbalanced ``` fences)",
            rel.display()
        ));
    }
}

#[cfg(test)]
#[allow(clippy::missing_panics_doc)]
mod tests {
    use super::*;

    fn run_on(content: &str) -> Findings {
        let mut findings = Findings::new();
        check_format(Path::new("docs/d.md"), content, &mut findings);
        findings
    }

    #[test]
    fn well_formed_document_has_no_findings() {
        let findings = run_on("# Title\n\n- item one\n- item two\n\n```python\nx = 1\n```\n");
        assert!(findings.errors().is_empty());
        assert!(findings.warnings().is_empty());
    }

    #[test]
    fn heading_without_space_is_exactly_one_warning_citing_the_line() {
        let findings = run_on("# Title\n\n#Subtitle\n");
        assert!(findings.errors().is_empty());
        assert_eq!(findings.warnings().len(), 1);
        assert!(findings.warnings()[0].message.contains("line 3"));
    }

    #[test]
    fn heading_past_level_six_is_an_error() {
        let findings = run_on("####### Too Deep\n");
        assert_eq!(findings.errors().len(), 1);
        assert!(findings.errors()[0].message.contains("deeper than six"));
    }

    #[test]
    fn list_marker_without_content_is_a_warning() {
        let findings = run_on("- item\n- \n");
        assert_eq!(findings.warnings().len(), 1);
        assert!(findings.warnings()[0].message.contains("line 2"));
    }

    #[test]
    fn odd_fence_count_is_exactly_one_unclosed_block_error() {
        let findings = run_on("# Doc\n\n```python\nx = 1\n");
        assert_eq!(findings.errors().len(), 1);
        assert!(findings.errors()[0].message.contains("unclosed code block"));
    }

    #[test]
    fn balanced_fences_are_not_reported() {
        let findings = run_on("```\na\n```\n\n```\nb\n```\n");
        assert!(findings.errors().is_empty());
    }

    #[test]
    fn rerun_yields_identical_findings() {
        let content = "#Bad\n\n####### Deep\n";
        let first = run_on(content);
        let second = run_on(content);
        assert_eq!(first.errors(), second.errors());
        assert_eq!(first.warnings(), second.warnings());
    }
}
