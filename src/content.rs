//! Required-section and minimum-content checks.

use std::path::{Path, PathBuf};

use crate::checker::{Checker, Findings};
use crate::config::{Config, SectionRule};
use crate::error::Error;
use crate::markdown::MarkdownDoc;

/// Verifies that each mapped document contains its required sections
/// (keyword substring match against heading text, case-insensitive), starts
/// with a heading, and is not trivially short. Everything here is a warning;
/// only an unreadable file produces an error.
pub struct ContentChecker {
    config: Config,
    findings: Findings,
    root: PathBuf,
}

impl ContentChecker {
    /// Build a checker for the given project root and expectation tables.
    pub fn new(root: &Path, config: &Config) -> Self {
        Self {
            config: config.clone(),
            findings: Findings::new(),
            root: root.to_path_buf(),
        }
    }
}

impl Checker for ContentChecker {
    fn name(&self) -> &'static str {
        "content"
    }

    fn check(&mut self) -> Result<bool, Error> {
        for rule in &self.config.required_sections {
            let rel = format!("{}/{}/{}", self.config.docs_dir, rule.category, rule.doc);
            let path = self.root.join(&rel);
            if !path.exists() {
                // The existence checker owns missing-file errors.
                continue;
            }
            match std::fs::read_to_string(&path) {
                Ok(content) => check_document(
                    &rel,
                    &content,
                    rule,
                    self.config.min_doc_chars,
                    &mut self.findings,
                ),
                Err(e) => self.findings.error(format!("failed to read {rel}: {e}")),
            }
        }
        Ok(self.findings.passed())
    }

    fn findings(&self) -> &Findings {
        &self.findings
    }
}

fn check_document(
    rel: &str,
    content: &str,
    rule: &SectionRule,
    min_chars: usize,
    findings: &mut Findings,
) {
    let doc = MarkdownDoc::parse(content);
    let headings_lower: Vec<String> = doc.headings.iter().map(|h| h.text.to_lowercase()).collect();

    for section in &rule.sections {
        let needle = section.to_lowercase();
        if !headings_lower.iter().any(|h| h.contains(&needle)) {
            findings.warning(format!("{rel}: possibly missing section: {section}"));
        }
    }

    if content.trim().is_empty() {
        return;
    }
    if let Some(first) = content.lines().find(|l| !l.trim().is_empty())
        && !first.starts_with('#')
    {
        findings.warning(format!("{rel}: missing main title"));
    }

    let chars = content.chars().count();
    if chars < min_chars {
        findings.warning(format!("{rel}: content too short ({chars} chars)"));
    }
}

#[cfg(test)]
#[allow(clippy::missing_panics_doc)]
mod tests {
    use super::*;

    fn rule(sections: &[&str]) -> SectionRule {
        SectionRule {
            category: "guide".to_string(),
            doc: "intro.md".to_string(),
            sections: sections.iter().map(|s| (*s).to_string()).collect(),
        }
    }

    #[test]
    fn missing_section_keyword_is_a_warning() {
        let mut findings = Findings::new();
        check_document(
            "docs/guide/intro.md",
            "# Intro\n\n## Overview\n",
            &rule(&["Overview", "Prerequisites"]),
            0,
            &mut findings,
        );
        assert!(findings.passed());
        assert_eq!(findings.warnings().len(), 1);
        assert!(findings.warnings()[0].message.contains("Prerequisites"));
    }

    #[test]
    fn section_match_is_case_insensitive_substring() {
        let mut findings = Findings::new();
        check_document(
            "d.md",
            "# Doc\n\n## Project OVERVIEW and Goals\n",
            &rule(&["overview"]),
            0,
            &mut findings,
        );
        assert!(findings.warnings().is_empty());
    }

    #[test]
    fn first_non_blank_line_must_be_a_heading() {
        let mut findings = Findings::new();
        check_document("d.md", "\nplain text first\n\n# Late Title\n", &rule(&[]), 0, &mut findings);
        assert_eq!(findings.warnings().len(), 1);
        assert!(findings.warnings()[0].message.contains("missing main title"));
    }

    #[test]
    fn short_content_is_a_warning() {
        let mut findings = Findings::new();
        check_document("d.md", "# T\n", &rule(&[]), 100, &mut findings);
        assert!(findings.warnings().iter().any(|w| w.message.contains("too short")));
    }

    #[test]
    fn checker_skips_documents_that_do_not_exist() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config {
            docs_dir: "docs".to_string(),
            required_sections: vec![rule(&["Overview"])],
            ..Config::default()
        };
        let mut checker = ContentChecker::new(dir.path(), &config);
        assert!(checker.check().unwrap());
        assert!(checker.warnings().is_empty());
    }

    #[test]
    fn checker_reads_documents_from_the_tree() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::create_dir_all(dir.path().join("docs/guide")).unwrap();
        std::fs::write(dir.path().join("docs/guide/intro.md"), "# Intro\n").unwrap();

        let config = Config {
            docs_dir: "docs".to_string(),
            min_doc_chars: 0,
            required_sections: vec![rule(&["Setup"])],
            ..Config::default()
        };
        let mut checker = ContentChecker::new(dir.path(), &config);
        assert!(checker.check().unwrap());
        assert_eq!(checker.warnings().len(), 1);
        assert!(checker.warnings()[0].message.contains("docs/guide/intro.md"));
    }
}
