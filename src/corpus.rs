//! Shared traversal of the markdown corpus.

use std::path::{Path, PathBuf};

use walkdir::WalkDir;

use crate::checker::Findings;

/// All markdown files under `dir`, recursively, in sorted order so that
/// repeated runs yield findings in the same order.
pub fn markdown_files(dir: &Path) -> Vec<PathBuf> {
    WalkDir::new(dir)
        .sort_by_file_name()
        .into_iter()
        .filter_map(Result::ok)
        .filter(|e| e.file_type().is_file())
        .filter(|e| e.path().extension().is_some_and(|ext| ext == "md"))
        .map(walkdir::DirEntry::into_path)
        .collect()
}

/// Visit every markdown file under `root/docs_dir` with its root-relative
/// path and decoded content. A read or UTF-8 decode failure becomes a single
/// error finding for that file and the scan continues; nothing here aborts.
pub fn visit_markdown<F>(root: &Path, docs_dir: &str, findings: &mut Findings, mut visit: F)
where
    F: FnMut(&Path, &str, &mut Findings),
{
    let dir = root.join(docs_dir);
    if !dir.exists() {
        return;
    }
    for path in markdown_files(&dir) {
        let rel = path.strip_prefix(root).unwrap_or(&path).to_path_buf();
        match std::fs::read_to_string(&path) {
            Ok(content) => visit(&rel, &content, findings),
            Err(e) => findings.error(format!("failed to read {}: {e}", rel.display())),
        }
    }
}

#[cfg(test)]
#[allow(clippy::missing_panics_doc)]
mod tests {
    use super::*;

    #[test]
    fn walks_sorted_and_skips_non_markdown() {
        let dir = tempfile::tempdir().unwrap();
        let docs = dir.path().join("docs");
        std::fs::create_dir_all(docs.join("sub")).unwrap();
        std::fs::write(docs.join("b.md"), "# B\n").unwrap();
        std::fs::write(docs.join("a.md"), "# A\n").unwrap();
        std::fs::write(docs.join("notes.txt"), "plain\n").unwrap();
        std::fs::write(docs.join("sub/c.md"), "# C\n").unwrap();

        let mut findings = Findings::new();
        let mut seen = Vec::new();
        visit_markdown(dir.path(), "docs", &mut findings, |rel, _, _| {
            seen.push(rel.to_path_buf());
        });

        assert_eq!(
            seen,
            vec![
                PathBuf::from("docs/a.md"),
                PathBuf::from("docs/b.md"),
                PathBuf::from("docs/sub/c.md"),
            ]
        );
        assert!(findings.passed());
    }

    #[test]
    fn undecodable_file_becomes_one_error_and_scan_continues() {
        let dir = tempfile::tempdir().unwrap();
        let docs = dir.path().join("docs");
        std::fs::create_dir_all(&docs).unwrap();
        std::fs::write(docs.join("bad.md"), [0xff, 0xfe, 0x00]).unwrap();
        std::fs::write(docs.join("good.md"), "# Fine\n").unwrap();

        let mut findings = Findings::new();
        let mut visited = 0;
        visit_markdown(dir.path(), "docs", &mut findings, |_, _, _| {
            visited += 1;
        });

        assert_eq!(visited, 1);
        assert_eq!(findings.errors().len(), 1);
        assert!(findings.errors()[0].message.contains("bad.md"));
    }
}
