//! The shared checker contract and finding accumulation.

use serde::Serialize;

use crate::error::Error;

/// How serious a finding is. A checker fails iff it produced at least one
/// `Error`; warnings never affect success.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    /// A violated hard invariant (missing file, broken link, bad syntax).
    Error,
    /// A soft or stylistic deviation.
    Warning,
}

/// One reported problem. Findings are plain messages; they never point back
/// into the document they came from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Finding {
    /// Human-readable description, prefixed with the offending path.
    pub message: String,
    /// Error or warning.
    pub severity: Severity,
}

/// Ordered accumulator for one checker run. Errors and warnings keep their
/// insertion order so repeated runs over an unchanged tree produce identical
/// lists.
#[derive(Debug, Default)]
pub struct Findings {
    errors: Vec<Finding>,
    warnings: Vec<Finding>,
}

impl Findings {
    /// Empty accumulator.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record an error finding.
    pub fn error(&mut self, message: impl Into<String>) {
        self.errors.push(Finding {
            message: message.into(),
            severity: Severity::Error,
        });
    }

    /// Record a warning finding.
    pub fn warning(&mut self, message: impl Into<String>) {
        self.warnings.push(Finding {
            message: message.into(),
            severity: Severity::Warning,
        });
    }

    /// Accumulated errors, in the order they were found.
    pub fn errors(&self) -> &[Finding] {
        &self.errors
    }

    /// Accumulated warnings, in the order they were found.
    pub fn warnings(&self) -> &[Finding] {
        &self.warnings
    }

    /// True iff no errors were recorded. Warnings do not count.
    pub fn passed(&self) -> bool {
        self.errors.is_empty()
    }
}

/// Implemented by every rule evaluator. The aggregate runner depends only on
/// this trait, never on the concrete checkers.
pub trait Checker {
    /// Short stable identifier, used in reports.
    fn name(&self) -> &'static str;

    /// Run the scan once. Returns `Ok(true)` iff zero errors accumulated.
    ///
    /// # Errors
    ///
    /// Returns `Error` only for failures outside the scan itself (none of
    /// the shipped checkers have such a path today); per-file read problems
    /// become error findings instead.
    fn check(&mut self) -> Result<bool, Error>;

    /// The findings accumulated by the last `check` call.
    fn findings(&self) -> &Findings;

    /// Convenience accessor for accumulated errors.
    fn errors(&self) -> &[Finding] {
        self.findings().errors()
    }

    /// Convenience accessor for accumulated warnings.
    fn warnings(&self) -> &[Finding] {
        self.findings().warnings()
    }
}

#[cfg(test)]
#[allow(clippy::missing_panics_doc)]
mod tests {
    use super::*;

    #[test]
    fn findings_keep_insertion_order() {
        let mut findings = Findings::new();
        findings.error("first");
        findings.warning("soft");
        findings.error("second");

        let messages: Vec<&str> = findings.errors().iter().map(|f| f.message.as_str()).collect();
        assert_eq!(messages, vec!["first", "second"]);
        assert_eq!(findings.warnings().len(), 1);
    }

    #[test]
    fn warnings_do_not_fail_a_run() {
        let mut findings = Findings::new();
        findings.warning("only a warning");
        assert!(findings.passed());

        findings.error("now an error");
        assert!(!findings.passed());
    }
}
