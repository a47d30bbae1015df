//! Run reporting: per-check console output, an aggregate summary, and
//! markdown/JSON report files for CI artifacts.

use std::fmt::Write as _;
use std::path::Path;

use serde::Serialize;

use crate::checker::{Checker, Finding};
use crate::error::Error;

const BOLD: &str = "\x1b[1m";
const RESET: &str = "\x1b[0m";

/// How many findings a single check may list in the markdown report before
/// the remainder is elided.
const REPORT_LIST_LIMIT: usize = 20;

/// The outcome of one checker, detached from the checker itself so it can
/// be serialized.
#[derive(Debug, Serialize)]
pub struct CheckReport {
    /// Error findings, in emission order.
    pub errors: Vec<Finding>,
    /// The checker's stable name.
    pub name: String,
    /// Whether the check produced zero errors.
    pub passed: bool,
    /// Warning findings, in emission order.
    pub warnings: Vec<Finding>,
}

/// The outcome of a full run across all selected checks.
#[derive(Debug, Serialize)]
pub struct RunReport {
    /// Per-check outcomes, in execution order.
    pub checks: Vec<CheckReport>,
    /// Whether every check passed.
    pub passed: bool,
}

/// Snapshot a finished checker into a serializable report entry.
pub fn report_from(checker: &dyn Checker, passed: bool) -> CheckReport {
    CheckReport {
        errors: checker.errors().to_vec(),
        name: checker.name().to_string(),
        passed,
        warnings: checker.warnings().to_vec(),
    }
}

/// Print one check's outcome to stdout: a bold header, then numbered
/// findings, or `ok` when the check is clean.
pub fn print_check(report: &CheckReport) {
    let status = if report.passed { "pass" } else { "FAIL" };
    println!("{BOLD}== {} ({status}) =={RESET}", report.name);
    if report.errors.is_empty() && report.warnings.is_empty() {
        println!("  ok");
        return;
    }
    for (idx, finding) in report.errors.iter().enumerate() {
        println!("  error {}: {}", idx.saturating_add(1), finding.message);
    }
    for (idx, finding) in report.warnings.iter().enumerate() {
        println!("  warning {}: {}", idx.saturating_add(1), finding.message);
    }
}

/// Print the aggregate pass/fail line after all checks have run.
pub fn print_summary(run: &RunReport) {
    let passed = run.checks.iter().filter(|c| c.passed).count();
    let verdict = if run.passed { "PASS" } else { "FAIL" };
    println!("{BOLD}{verdict}{RESET}: {passed}/{} checks passed", run.checks.len());
}

/// Render the run as a standalone markdown document.
pub fn render_markdown(run: &RunReport) -> String {
    let mut out = String::from("# Documentation Quality Report\n\n");
    let verdict = if run.passed { "PASS" } else { "FAIL" };
    let passed = run.checks.iter().filter(|c| c.passed).count();
    let _ = writeln!(out, "Result: **{verdict}** ({passed}/{} checks passed)", run.checks.len());

    for check in &run.checks {
        let status = if check.passed { "pass" } else { "fail" };
        let _ = write!(out, "\n## {} — {status}\n\n", check.name);
        if check.errors.is_empty() && check.warnings.is_empty() {
            out.push_str("No findings.\n");
            continue;
        }
        render_finding_list(&mut out, "Errors", &check.errors);
        render_finding_list(&mut out, "Warnings", &check.warnings);
    }
    out
}

fn render_finding_list(out: &mut String, label: &str, findings: &[Finding]) {
    if findings.is_empty() {
        return;
    }
    let _ = writeln!(out, "{label} ({}):", findings.len());
    for finding in findings.iter().take(REPORT_LIST_LIMIT) {
        let _ = writeln!(out, "- {}", finding.message);
    }
    if findings.len() > REPORT_LIST_LIMIT {
        let _ = writeln!(out, "- ... {} more", findings.len().saturating_sub(REPORT_LIST_LIMIT));
    }
    out.push('\n');
}

/// Write `quality-report.md` and `quality-report.json` into `out_dir`,
/// creating the directory if needed.
pub fn write_reports(run: &RunReport, out_dir: &Path) -> Result<(), Error> {
    std::fs::create_dir_all(out_dir)?;
    std::fs::write(out_dir.join("quality-report.md"), render_markdown(run))?;
    let json = serde_json::to_string_pretty(run)?;
    std::fs::write(out_dir.join("quality-report.json"), json)?;
    Ok(())
}

/// Render an error as markdown with bold headings and print to stderr.
pub fn print_error(e: &Error) {
    let md = render_error(e);
    for line in md.lines() {
        if line.starts_with('#') {
            eprintln!("{BOLD}{line}{RESET}");
        } else {
            eprintln!("{line}");
        }
    }
}

/// Render an error as a structured markdown diagnostic.
fn render_error(e: &Error) -> String {
    match e {
        Error::RootNotFound { path } => format!("\
# Error: Root Not Found

`{}` is not a directory.

## Fix

Pass the project root with `--root`.
", path.display()),

        Error::TomlDe(e) => format!("\
# Error: Invalid Config

`.doclint.toml` could not be parsed:

{e}
"),

        Error::Io(e) => format!("\
# Error: I/O

{e}
"),

        Error::Json(e) => format!("\
# Error: JSON Serialization

{e}
"),
    }
}
