//! Fenced code example validation.

use std::path::{Path, PathBuf};

use crate::checker::{Checker, Findings};
use crate::config::Config;
use crate::corpus;
use crate::error::Error;
use crate::markdown::MarkdownDoc;
use crate::python::{self, SnippetIssue};

/// Validates every fenced code block in the docs tree: language tags must
/// be present, blocks must not be empty, and Python bodies (tagged or
/// untagged) must parse as complete programs unless they are recognizable
/// fragments.
pub struct CodeExampleChecker {
    config: Config,
    findings: Findings,
    root: PathBuf,
}

impl CodeExampleChecker {
    /// Build a checker for the given project root and expectation tables.
    pub fn new(root: &Path, config: &Config) -> Self {
        Self {
            config: config.clone(),
            findings: Findings::new(),
            root: root.to_path_buf(),
        }
    }
}

impl Checker for CodeExampleChecker {
    fn name(&self) -> &'static str {
        "code-examples"
    }

    fn check(&mut self) -> Result<bool, Error> {
        corpus::visit_markdown(
            &self.root,
            &self.config.docs_dir,
            &mut self.findings,
            |rel, content, findings| check_code_blocks(rel, content, findings),
        );
        Ok(self.findings.passed())
    }

    fn findings(&self) -> &Findings {
        &self.findings
    }
}

/// Aliases accepted as "this block is Python".
fn is_python_tag(language: &str) -> bool {
    matches!(language.to_lowercase().as_str(), "python" | "py" | "python3")
}

fn check_code_blocks(rel: &Path, content: &str, findings: &mut Findings) {
    let doc = MarkdownDoc::parse(content);
    for (idx, block) in doc.code_blocks.iter().enumerate() {
        let number = idx.saturating_add(1);
        if block.language.is_empty() {
            findings.warning(format!(
                "{}: code block #{number} has no language tag",
                rel.display()
            ));
        }
        if block.body.trim().is_empty() {
            findings.warning(format!("{}: code block #{number} is empty", rel.display()));
            continue;
        }
        if is_python_tag(&block.language) || block.language.is_empty() {
            check_python_block(rel, number, &block.body, findings);
        }
    }
}

fn check_python_block(rel: &Path, number: usize, body: &str, findings: &mut Findings) {
    match python::check_snippet(body) {
        Some(SnippetIssue::Syntax { detail, line }) => findings.error(format!(
            "{}: code block #{number} has a Python syntax error: {detail} (line {line})",
            rel.display()
        )),
        Some(SnippetIssue::Suspect { detail }) => findings.warning(format!(
            "{}: code block #{number} may have a problem: {detail}",
            rel.display()
        )),
        None => {},
    }
}
