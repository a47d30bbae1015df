//! Link integrity: internal targets, cross-document anchors, and external
//! URL well-formedness.
//!
//! No network traffic: external links are checked for a sound scheme and
//! host only. Every failure message carries the source document, the link's
//! display text and raw URL, and the resolved target, so a finding is
//! actionable without re-deriving the resolution.

use std::path::{Component, Path, PathBuf};

use url::Url;

use crate::checker::{Checker, Findings};
use crate::config::Config;
use crate::corpus;
use crate::error::Error;
use crate::markdown::{Link, LinkKind, MarkdownDoc};

/// Validates every link in the docs tree plus the configured extra roots
/// (conventionally the repository README).
pub struct LinkChecker {
    config: Config,
    findings: Findings,
    root: PathBuf,
}

impl LinkChecker {
    /// Build a checker for the given project root and expectation tables.
    pub fn new(root: &Path, config: &Config) -> Self {
        Self {
            config: config.clone(),
            findings: Findings::new(),
            root: root.to_path_buf(),
        }
    }
}

impl Checker for LinkChecker {
    fn name(&self) -> &'static str {
        "links"
    }

    fn check(&mut self) -> Result<bool, Error> {
        let docs_dir = self.root.join(&self.config.docs_dir);
        let mut paths = if docs_dir.exists() {
            corpus::markdown_files(&docs_dir)
        } else {
            Vec::new()
        };
        for extra in &self.config.extra_link_roots {
            let path = self.root.join(extra);
            if path.is_file() {
                paths.push(path);
            }
        }

        for path in paths {
            if is_template(&path) {
                continue;
            }
            let rel = path.strip_prefix(&self.root).unwrap_or(&path).to_path_buf();
            match std::fs::read_to_string(&path) {
                Ok(content) => check_links(&self.root, &rel, &content, &mut self.findings),
                Err(e) => self
                    .findings
                    .error(format!("failed to read {}: {e}", rel.display())),
            }
        }
        Ok(self.findings.passed())
    }

    fn findings(&self) -> &Findings {
        &self.findings
    }
}

/// Template documents intentionally contain placeholder links; skip them.
fn is_template(path: &Path) -> bool {
    let name = path
        .file_name()
        .and_then(|n| n.to_str())
        .unwrap_or("")
        .to_lowercase();
    name.contains("template") || path.components().any(|c| c.as_os_str() == "templates")
}

fn check_links(root: &Path, rel: &Path, content: &str, findings: &mut Findings) {
    let doc = MarkdownDoc::parse(content);
    for link in &doc.links {
        match link.kind() {
            // Same-document anchors, mailto, and ftp are accepted as-is.
            LinkKind::Anchor | LinkKind::Exempt => {},
            LinkKind::External => check_external(rel, link, findings),
            LinkKind::Internal => check_internal(root, rel, link, findings),
        }
    }
}

/// External links must carry an http(s) scheme and a non-empty host, and
/// must not contain whitespace. Nothing is fetched.
fn check_external(rel: &Path, link: &Link, findings: &mut Findings) {
    let well_formed = !link.url.contains(char::is_whitespace)
        && Url::parse(&link.url).is_ok_and(|u| {
            matches!(u.scheme(), "http" | "https") && u.host_str().is_some_and(|h| !h.is_empty())
        });
    if !well_formed {
        findings.error(format!(
            "{}: malformed external link `[{}]({})`",
            rel.display(),
            link.text,
            link.url
        ));
    }
}

fn check_internal(root: &Path, rel: &Path, link: &Link, findings: &mut Findings) {
    let (path_part, fragment) = match link.url.split_once('#') {
        Some((p, f)) => (p, Some(f)),
        None => (link.url.as_str(), None),
    };
    if path_part.is_empty() {
        return;
    }

    let resolved = if let Some(stripped) = path_part.strip_prefix('/') {
        // Leading slash means repository-root relative.
        root.join(stripped)
    } else {
        let parent = rel.parent().unwrap_or(Path::new(""));
        normalize_path(&root.join(parent).join(path_part))
    };

    if !resolved.exists() {
        findings.error(format!(
            "{}: broken internal link `[{}]({})` (target does not exist: {})",
            rel.display(),
            link.text,
            link.url,
            resolved.display()
        ));
        return;
    }

    if let Some(fragment) = fragment {
        check_cross_document_anchor(rel, link, &resolved, fragment, findings);
    }
}

/// A `file.md#anchor` link must point at a heading-derived anchor in the
/// target document. Non-markdown targets have no anchors to check.
fn check_cross_document_anchor(
    rel: &Path,
    link: &Link,
    target: &Path,
    fragment: &str,
    findings: &mut Findings,
) {
    if target.extension().is_none_or(|ext| ext != "md") {
        return;
    }
    let content = match std::fs::read_to_string(target) {
        Ok(c) => c,
        Err(e) => {
            findings.error(format!(
                "{}: failed to read link target {}: {e}",
                rel.display(),
                target.display()
            ));
            return;
        },
    };

    let anchors = MarkdownDoc::parse(&content).anchor_set();
    if !anchors.contains(fragment) {
        let available: Vec<&str> = anchors.iter().take(10).map(String::as_str).collect();
        findings.error(format!(
            "{}: anchor `#{fragment}` in link `[{}]({})` not found in {} (available: {})",
            rel.display(),
            link.text,
            link.url,
            target.display(),
            available.join(", ")
        ));
    }
}

/// Collapse `.` and `..` components in a path without touching the
/// filesystem. Preserves leading `..` when there is nothing left to pop.
fn normalize_path(path: &Path) -> PathBuf {
    let mut components: Vec<Component<'_>> = Vec::new();
    for component in path.components() {
        match component {
            Component::CurDir => {},
            Component::ParentDir => match components.last() {
                Some(Component::Normal(_)) => {
                    components.pop();
                },
                // "/.." stays "/".
                Some(Component::RootDir | Component::Prefix(_)) => {},
                _ => components.push(component),
            },
            other => components.push(other),
        }
    }
    components.iter().collect()
}
