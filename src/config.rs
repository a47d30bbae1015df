//! Expectation tables and scan configuration.
//!
//! The tables describing which documents must exist and which sections they
//! must contain are data, not code: checkers receive a `Config` in their
//! constructors, and tests hand in small synthetic tables. The defaults
//! mirror the documentation tree this tool was built for; a `.doclint.toml`
//! at the project root overrides any field.

use std::collections::BTreeMap;
use std::path::Path;

use crate::error::Error;

/// Required-section rule for one document within a category.
#[derive(Debug, Clone, serde::Deserialize)]
pub struct SectionRule {
    /// Category directory name under the docs tree.
    pub category: String,
    /// Document file name within the category directory.
    pub doc: String,
    /// Keywords that must appear (case-insensitively) in some heading.
    pub sections: Vec<String>,
}

/// All expectation tables for one project, plus the scan roots.
#[derive(Debug, Clone)]
pub struct Config {
    /// Category directory names checked for structural consistency.
    pub categories: Vec<String>,
    /// Documentation tree root, relative to the project root.
    pub docs_dir: String,
    /// Extra markdown files outside the docs tree scanned for links.
    pub extra_link_roots: Vec<String>,
    /// Specification document supplying the glossary, relative to the root.
    pub glossary_doc: String,
    /// Minimum content length (in characters) below which a doc is flagged.
    pub min_doc_chars: usize,
    /// Directories that must exist, relative to the project root.
    pub required_dirs: Vec<String>,
    /// Category name to required document paths, relative to the root.
    pub required_docs: BTreeMap<String, Vec<String>>,
    /// Required-section rules, evaluated in listed order.
    pub required_sections: Vec<SectionRule>,
}

/// Raw TOML structure for `.doclint.toml`. Every field is optional; absent
/// fields keep their defaults.
#[derive(serde::Deserialize)]
struct DoclintTomlConfig {
    categories: Option<Vec<String>>,
    docs_dir: Option<String>,
    extra_link_roots: Option<Vec<String>>,
    glossary_doc: Option<String>,
    min_doc_chars: Option<usize>,
    required_dirs: Option<Vec<String>>,
    required_docs: Option<BTreeMap<String, Vec<String>>>,
    required_sections: Option<Vec<SectionRule>>,
}

impl Config {
    /// Load config from `.doclint.toml` in the given root directory,
    /// layered over the built-in defaults. Returns the defaults unchanged if
    /// the file doesn't exist. Returns an error if the file exists but is
    /// malformed — never silently falls back when the user wrote a config.
    ///
    /// # Errors
    ///
    /// Returns `Error::Io` if reading fails (other than not-found),
    /// or `Error::TomlDe` if the TOML is malformed.
    pub fn load(root: &Path) -> Result<Self, Error> {
        let path = root.join(".doclint.toml");
        let content = match std::fs::read_to_string(&path) {
            Ok(c) => c,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Self::default()),
            Err(e) => return Err(Error::Io(e)),
        };

        let raw: DoclintTomlConfig = toml::from_str(&content)?;
        let mut config = Self::default();
        if let Some(categories) = raw.categories {
            config.categories = categories;
        }
        if let Some(docs_dir) = raw.docs_dir {
            config.docs_dir = docs_dir;
        }
        if let Some(extra) = raw.extra_link_roots {
            config.extra_link_roots = extra;
        }
        if let Some(glossary_doc) = raw.glossary_doc {
            config.glossary_doc = glossary_doc;
        }
        if let Some(min_doc_chars) = raw.min_doc_chars {
            config.min_doc_chars = min_doc_chars;
        }
        if let Some(required_dirs) = raw.required_dirs {
            config.required_dirs = required_dirs;
        }
        if let Some(required_docs) = raw.required_docs {
            config.required_docs = required_docs;
        }
        if let Some(required_sections) = raw.required_sections {
            config.required_sections = required_sections;
        }
        Ok(config)
    }
}

impl Default for Config {
    /// The expectation tables for the Chinese documentation tree this tool
    /// was originally written against.
    fn default() -> Self {
        let required_docs = BTreeMap::from([
            (
                "getting-started".to_string(),
                strings(&[
                    "docs/zh/getting-started/installation.md",
                    "docs/zh/getting-started/quickstart.md",
                ]),
            ),
            (
                "user-guide".to_string(),
                strings(&[
                    "docs/zh/user-guide/user-guide.md",
                    "docs/zh/user-guide/api-reference.md",
                    "docs/zh/user-guide/configuration.md",
                    "docs/zh/user-guide/examples.md",
                ]),
            ),
            (
                "development".to_string(),
                strings(&[
                    "docs/zh/development/architecture.md",
                    "docs/zh/development/development-guide.md",
                    "docs/zh/development/contributing.md",
                    "docs/zh/development/code-style.md",
                ]),
            ),
            (
                "advanced".to_string(),
                strings(&[
                    "docs/zh/advanced/design-principles.md",
                    "docs/zh/advanced/performance.md",
                    "docs/zh/advanced/troubleshooting.md",
                    "docs/zh/advanced/faq.md",
                ]),
            ),
            (
                "versions".to_string(),
                strings(&[
                    "docs/zh/versions/comparison.md",
                    "docs/zh/versions/anthropic-1p.md",
                    "docs/zh/versions/bedrock-anthropic.md",
                    "docs/zh/versions/bedrock-boto3.md",
                ]),
            ),
            ("root".to_string(), strings(&["README.md", "README_EN.md"])),
        ]);

        let required_sections = vec![
            rule("getting-started", "installation.md", &["概述", "前置条件", "安装步骤"]),
            rule("getting-started", "quickstart.md", &["概述", "快速开始"]),
            rule("user-guide", "user-guide.md", &["概述", "章节"]),
            rule("user-guide", "api-reference.md", &["概述"]),
            rule("user-guide", "configuration.md", &["概述", "配置"]),
            rule("user-guide", "examples.md", &["概述", "示例"]),
            rule("development", "architecture.md", &["概述", "架构"]),
            rule("development", "development-guide.md", &["概述", "开发环境"]),
            rule("development", "contributing.md", &["概述", "贡献"]),
            rule("development", "code-style.md", &["概述", "代码规范"]),
            rule("advanced", "design-principles.md", &["概述", "设计原理"]),
            rule("advanced", "performance.md", &["概述", "性能"]),
            rule("advanced", "troubleshooting.md", &["概述", "问题"]),
            rule("advanced", "faq.md", &["概述", "问题"]),
            rule("versions", "comparison.md", &["概述", "版本对比"]),
            rule("versions", "anthropic-1p.md", &["概述", "特点"]),
            rule("versions", "bedrock-anthropic.md", &["概述", "特点"]),
            rule("versions", "bedrock-boto3.md", &["概述", "特点"]),
        ];

        Self {
            categories: strings(&[
                "getting-started",
                "user-guide",
                "development",
                "advanced",
                "versions",
            ]),
            docs_dir: "docs/zh".to_string(),
            extra_link_roots: strings(&["README.md"]),
            glossary_doc: ".kiro/specs/comprehensive-chinese-documentation/requirements.md"
                .to_string(),
            min_doc_chars: 100,
            required_dirs: strings(&[
                "docs/zh",
                "docs/zh/getting-started",
                "docs/zh/user-guide",
                "docs/zh/development",
                "docs/zh/advanced",
                "docs/zh/versions",
            ]),
            required_docs,
            required_sections,
        }
    }
}

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| (*s).to_string()).collect()
}

fn rule(category: &str, doc: &str, sections: &[&str]) -> SectionRule {
    SectionRule {
        category: category.to_string(),
        doc: doc.to_string(),
        sections: strings(sections),
    }
}

#[cfg(test)]
#[allow(clippy::missing_panics_doc)]
mod tests {
    use super::*;

    #[test]
    fn defaults_cover_all_categories() {
        let config = Config::default();
        for category in &config.categories {
            assert!(
                config.required_docs.contains_key(category),
                "no required docs for {category}"
            );
        }
        assert_eq!(config.min_doc_chars, 100);
    }

    #[test]
    fn missing_override_file_yields_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::load(dir.path()).unwrap();
        assert_eq!(config.docs_dir, "docs/zh");
    }

    #[test]
    fn override_file_replaces_listed_fields_only() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(
            dir.path().join(".doclint.toml"),
            "docs_dir = \"docs\"\nmin_doc_chars = 10\n",
        )
        .unwrap();

        let config = Config::load(dir.path()).unwrap();
        assert_eq!(config.docs_dir, "docs");
        assert_eq!(config.min_doc_chars, 10);
        // Untouched fields keep their defaults.
        assert!(!config.required_dirs.is_empty());
    }

    #[test]
    fn malformed_override_is_a_hard_error() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join(".doclint.toml"), "docs_dir = [not toml").unwrap();
        assert!(Config::load(dir.path()).is_err());
    }
}
