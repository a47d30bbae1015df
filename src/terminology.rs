//! Glossary-driven terminology consistency.
//!
//! The glossary lives in a `## 术语表` section of the project's
//! specification document, one `- **canonical（counterpart）**` bullet per
//! term. Every canonical term should occur somewhere in the documentation;
//! a term nobody uses is only a warning, never an error.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::sync::LazyLock;

use regex::Regex;

use crate::checker::{Checker, Findings};
use crate::config::Config;
use crate::corpus;
use crate::error::Error;

/// The glossary section, up to the next `##` heading or end of input.
static GLOSSARY_SECTION_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)## 术语表\n\n(.*?)(?:\n##|\z)").expect("valid regex"));

/// One glossary bullet: `- **canonical（counterpart）**`.
static TERM_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"-\s+\*\*(.+?)（(.+?)）\*\*").expect("valid regex"));

/// Counts literal occurrences of each glossary term across the docs tree
/// and reports terms that never appear.
pub struct TerminologyChecker {
    config: Config,
    findings: Findings,
    root: PathBuf,
}

impl TerminologyChecker {
    /// Build a checker for the given project root and expectation tables.
    pub fn new(root: &Path, config: &Config) -> Self {
        Self {
            config: config.clone(),
            findings: Findings::new(),
            root: root.to_path_buf(),
        }
    }
}

impl Checker for TerminologyChecker {
    fn name(&self) -> &'static str {
        "terminology"
    }

    fn check(&mut self) -> Result<bool, Error> {
        let glossary = load_glossary(&self.root, &self.config, &mut self.findings);
        if glossary.is_empty() {
            self.findings
                .warning("glossary not found, skipping terminology check");
            return Ok(self.findings.passed());
        }

        let glossary_rel = PathBuf::from(&self.config.glossary_doc);
        let mut used: BTreeMap<&String, bool> =
            glossary.keys().map(|term| (term, false)).collect();

        corpus::visit_markdown(
            &self.root,
            &self.config.docs_dir,
            &mut self.findings,
            |rel, content, _| {
                // The glossary source defines the terms; it doesn't count as usage.
                if rel == glossary_rel {
                    return;
                }
                for (term, seen) in &mut used {
                    if !*seen && content.contains(term.as_str()) {
                        *seen = true;
                    }
                }
            },
        );

        for (term, seen) in &used {
            if !*seen {
                self.findings
                    .warning(format!("term '{term}' is never used in the documentation"));
            }
        }
        Ok(self.findings.passed())
    }

    fn findings(&self) -> &Findings {
        &self.findings
    }
}

/// Parse the glossary out of the specification document. A missing file
/// yields an empty glossary; an unreadable file additionally warns.
fn load_glossary(root: &Path, config: &Config, findings: &mut Findings) -> BTreeMap<String, String> {
    let path = root.join(&config.glossary_doc);
    let content = match std::fs::read_to_string(&path) {
        Ok(c) => c,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return BTreeMap::new(),
        Err(e) => {
            findings.warning(format!("failed to load glossary: {e}"));
            return BTreeMap::new();
        },
    };

    let Some(section) = GLOSSARY_SECTION_RE
        .captures(&content)
        .and_then(|cap| cap.get(1))
    else {
        return BTreeMap::new();
    };

    TERM_RE
        .captures_iter(section.as_str())
        .filter_map(|cap| {
            let canonical = cap.get(1)?.as_str().to_string();
            let counterpart = cap.get(2)?.as_str().to_string();
            Some((canonical, counterpart))
        })
        .collect()
}

#[cfg(test)]
#[allow(clippy::missing_panics_doc)]
mod tests {
    use super::*;

    const GLOSSARY: &str = "\
# 需求文档

## 术语表

- **提示词（Prompt）**: 发送给模型的输入文本
- **工具调用（Tool Use）**: 模型调用外部工具的机制

## 其他章节

不属于术语表。
";

    // The TempDir rides along so the fixture outlives the checker run.
    fn setup(docs: &[(&str, &str)]) -> (tempfile::TempDir, TerminologyChecker) {
        let dir = tempfile::tempdir().unwrap();
        std::fs::create_dir_all(dir.path().join("spec")).unwrap();
        std::fs::create_dir_all(dir.path().join("docs")).unwrap();
        std::fs::write(dir.path().join("spec/requirements.md"), GLOSSARY).unwrap();
        for (name, content) in docs {
            std::fs::write(dir.path().join("docs").join(name), content).unwrap();
        }
        let config = Config {
            docs_dir: "docs".to_string(),
            glossary_doc: "spec/requirements.md".to_string(),
            ..Config::default()
        };
        let checker = TerminologyChecker::new(dir.path(), &config);
        (dir, checker)
    }

    #[test]
    fn glossary_parsing_stops_at_the_next_section() {
        let mut findings = Findings::new();
        let dir = tempfile::tempdir().unwrap();
        std::fs::create_dir_all(dir.path().join("spec")).unwrap();
        std::fs::write(dir.path().join("spec/requirements.md"), GLOSSARY).unwrap();
        let config = Config {
            glossary_doc: "spec/requirements.md".to_string(),
            ..Config::default()
        };

        let glossary = load_glossary(dir.path(), &config, &mut findings);
        assert_eq!(glossary.len(), 2);
        assert_eq!(glossary.get("提示词").map(String::as_str), Some("Prompt"));
    }

    #[test]
    fn used_terms_produce_no_warnings() {
        let (_dir, mut checker) = setup(&[("a.md", "# A\n\n提示词和工具调用都在这里出现。\n")]);
        assert!(checker.check().unwrap());
        assert!(checker.warnings().is_empty());
    }

    #[test]
    fn unused_term_is_a_warning_and_the_run_still_passes() {
        let (_dir, mut checker) = setup(&[("a.md", "# A\n\n只提到提示词。\n")]);
        assert!(checker.check().unwrap());
        assert_eq!(checker.warnings().len(), 1);
        assert!(checker.warnings()[0].message.contains("工具调用"));
    }

    #[test]
    fn missing_glossary_warns_and_succeeds_trivially() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::create_dir_all(dir.path().join("docs")).unwrap();
        let config = Config {
            docs_dir: "docs".to_string(),
            glossary_doc: "spec/requirements.md".to_string(),
            ..Config::default()
        };
        let mut checker = TerminologyChecker::new(dir.path(), &config);
        assert!(checker.check().unwrap());
        assert_eq!(checker.warnings().len(), 1);
        assert!(checker.warnings()[0].message.contains("glossary not found"));
    }

    #[test]
    fn glossary_source_inside_docs_does_not_count_as_usage() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::create_dir_all(dir.path().join("docs")).unwrap();
        std::fs::write(dir.path().join("docs/glossary.md"), GLOSSARY).unwrap();
        std::fs::write(dir.path().join("docs/a.md"), "# A\n\n无关内容。\n").unwrap();
        let config = Config {
            docs_dir: "docs".to_string(),
            glossary_doc: "docs/glossary.md".to_string(),
            ..Config::default()
        };

        let mut checker = TerminologyChecker::new(dir.path(), &config);
        assert!(checker.check().unwrap());
        // Both terms only appear in the glossary itself, so both are unused.
        assert_eq!(checker.warnings().len(), 2);
    }
}
