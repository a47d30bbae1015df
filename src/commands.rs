//! Command implementations behind the CLI surface.

use std::path::Path;
use std::process::ExitCode;

use crate::checker::Checker;
use crate::code::CodeExampleChecker;
use crate::config::Config;
use crate::content::ContentChecker;
use crate::error::Error;
use crate::existence::ExistenceChecker;
use crate::format::FormatChecker;
use crate::links::LinkChecker;
use crate::report::{self, RunReport};
use crate::structure::StructureChecker;
use crate::terminology::TerminologyChecker;

/// Which checks to run. All-false means "run everything".
#[allow(clippy::struct_excessive_bools, reason = "one independent flag per check")]
#[derive(Clone, Copy, Default)]
pub struct Selection {
    /// Fenced code example validation.
    pub code: bool,
    /// Required-section and length checks.
    pub content: bool,
    /// Required directories and documents.
    pub existence: bool,
    /// Heading, list, and fence formatting.
    pub format: bool,
    /// Internal, anchor, and external link integrity.
    pub links: bool,
    /// Cross-document structural consistency.
    pub structure: bool,
    /// Glossary term usage.
    pub terminology: bool,
}

impl Selection {
    fn any(self) -> bool {
        self.code
            || self.content
            || self.existence
            || self.format
            || self.links
            || self.structure
            || self.terminology
    }

    /// Resolve the flags into an effective selection: no flags selects all.
    fn effective(self) -> Self {
        if self.any() {
            return self;
        }
        Self {
            code: true,
            content: true,
            existence: true,
            format: true,
            links: true,
            structure: true,
            terminology: true,
        }
    }
}

/// Run the selected checks and print per-check output plus a summary.
///
/// # Errors
///
/// Returns an error if the root is not a directory or the config file is
/// present but malformed.
fn run(root: &Path, selection: Selection) -> Result<RunReport, Error> {
    if !root.is_dir() {
        return Err(Error::RootNotFound { path: root.to_path_buf() });
    }
    let config = Config::load(root)?;
    let selection = selection.effective();

    // Fixed execution order keeps output and reports stable across runs.
    let mut checkers: Vec<Box<dyn Checker>> = Vec::new();
    if selection.existence {
        checkers.push(Box::new(ExistenceChecker::new(root, &config)));
    }
    if selection.content {
        checkers.push(Box::new(ContentChecker::new(root, &config)));
    }
    if selection.code {
        checkers.push(Box::new(CodeExampleChecker::new(root, &config)));
    }
    if selection.format {
        checkers.push(Box::new(FormatChecker::new(root, &config)));
    }
    if selection.structure {
        checkers.push(Box::new(StructureChecker::new(root, &config)));
    }
    if selection.terminology {
        checkers.push(Box::new(TerminologyChecker::new(root, &config)));
    }
    if selection.links {
        checkers.push(Box::new(LinkChecker::new(root, &config)));
    }

    let mut checks = Vec::with_capacity(checkers.len());
    let mut all_passed = true;
    for checker in &mut checkers {
        let passed = checker.check()?;
        all_passed &= passed;
        let check = report::report_from(checker.as_ref(), passed);
        report::print_check(&check);
        checks.push(check);
    }

    let run = RunReport { checks, passed: all_passed };
    report::print_summary(&run);
    Ok(run)
}

/// `doclint check`: run checks and exit nonzero on any error finding.
///
/// # Errors
///
/// Propagates setup failures from [`run`].
pub fn check(root: &Path, selection: Selection) -> Result<ExitCode, Error> {
    let run = run(root, selection)?;
    if run.passed {
        Ok(ExitCode::SUCCESS)
    } else {
        Ok(ExitCode::FAILURE)
    }
}

/// `doclint report`: run all checks and write markdown + JSON artifacts.
///
/// # Errors
///
/// Propagates setup failures from [`run`] and I/O failures writing the
/// report files.
pub fn report(root: &Path, out: &Path) -> Result<ExitCode, Error> {
    let result = run(root, Selection::default())?;
    report::write_reports(&result, out)?;
    println!("reports written to {}", out.display());
    if result.passed {
        Ok(ExitCode::SUCCESS)
    } else {
        Ok(ExitCode::FAILURE)
    }
}
