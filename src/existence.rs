//! Required file and directory presence checks.

use std::path::{Path, PathBuf};

use crate::checker::{Checker, Findings};
use crate::config::Config;
use crate::error::Error;

/// Verifies the conventional documentation layout: every required directory
/// exists and is a directory, every required document exists and is a file.
/// A present-but-empty document is only a warning.
pub struct ExistenceChecker {
    config: Config,
    findings: Findings,
    root: PathBuf,
}

impl ExistenceChecker {
    /// Build a checker for the given project root and expectation tables.
    pub fn new(root: &Path, config: &Config) -> Self {
        Self {
            config: config.clone(),
            findings: Findings::new(),
            root: root.to_path_buf(),
        }
    }
}

impl Checker for ExistenceChecker {
    fn name(&self) -> &'static str {
        "existence"
    }

    fn check(&mut self) -> Result<bool, Error> {
        check_directories(&self.root, &self.config, &mut self.findings);
        check_documents(&self.root, &self.config, &mut self.findings);
        Ok(self.findings.passed())
    }

    fn findings(&self) -> &Findings {
        &self.findings
    }
}

fn check_directories(root: &Path, config: &Config, findings: &mut Findings) {
    for dir in &config.required_dirs {
        let full = root.join(dir);
        if !full.exists() {
            findings.error(format!("missing directory: {dir}"));
        } else if !full.is_dir() {
            findings.error(format!("not a directory: {dir}"));
        }
    }
}

fn check_documents(root: &Path, config: &Config, findings: &mut Findings) {
    for (category, docs) in &config.required_docs {
        for doc in docs {
            let full = root.join(doc);
            if !full.exists() {
                findings.error(format!("missing document [{category}]: {doc}"));
            } else if !full.is_file() {
                findings.error(format!("not a file [{category}]: {doc}"));
            } else if std::fs::metadata(&full).is_ok_and(|m| m.len() == 0) {
                findings.warning(format!("empty document [{category}]: {doc}"));
            }
        }
    }
}
