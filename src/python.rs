//! Python snippet validation through the tree-sitter grammar.
//!
//! Documentation snippets are frequently fragments rather than complete
//! programs, so a handful of shapes are recognized and skipped outright
//! before parsing; only snippets that claim to be real code get findings.

use std::sync::LazyLock;

use regex::Regex;
use tree_sitter::{Language, Node, Parser};

/// Obvious fill-in-yourself tokens such as `<your-api-key>`.
static PLACEHOLDER_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"<[A-Za-z][A-Za-z0-9 _-]*>").expect("valid regex"));

/// Outcome of validating one snippet. Hard syntax damage is an error for
/// the caller; only failures of the tooling itself warrant a warning.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SnippetIssue {
    /// The grammar could not be loaded or the parser produced no tree, so
    /// the snippet could not be judged either way.
    Suspect {
        /// Description of what went wrong.
        detail: String,
    },
    /// The snippet is not valid Python.
    Syntax {
        /// Description of the failure.
        detail: String,
        /// 1-based line within the snippet where parsing broke.
        line: usize,
    },
}

/// Validate a Python snippet. Returns `None` for valid code and for
/// recognizable non-executable fragments.
pub fn check_snippet(code: &str) -> Option<SnippetIssue> {
    if is_non_executable_fragment(code) {
        return None;
    }

    let mut parser = Parser::new();
    let language: Language = tree_sitter_python::LANGUAGE.into();
    if parser.set_language(&language).is_err() {
        return Some(SnippetIssue::Suspect {
            detail: "python grammar unavailable".to_string(),
        });
    }

    let Some(tree) = parser.parse(code, None) else {
        return Some(SnippetIssue::Suspect {
            detail: "parser produced no tree".to_string(),
        });
    };

    // Missing nodes count as hard damage alongside ERROR nodes: a dropped
    // delimiter is a SyntaxError to CPython, not a recoverable wobble.
    let root = tree.root_node();
    if root.has_error() {
        let node = first_matching_node(root, &|n| n.is_error() || n.is_missing());
        let line = node.map_or(1, |n| n.start_position().row.saturating_add(1));
        return Some(SnippetIssue::Syntax {
            detail: "invalid syntax".to_string(),
            line,
        });
    }
    None
}

/// Fragments that must never produce findings: interactive-shell magic or
/// shell lines, `<placeholder>` tokens, single-line signatures shown
/// without their body, and top-level `await` outside any enclosing async
/// context.
fn is_non_executable_fragment(code: &str) -> bool {
    let trimmed = code.trim();
    // Only a lone signature line gets the trailing-colon exemption; in a
    // multi-line snippet a trailing colon must not mask damage above it.
    if !trimmed.contains('\n') && trimmed.ends_with(':') {
        return true;
    }
    if trimmed.starts_with("await ") {
        return true;
    }
    for line in trimmed.lines() {
        let stripped = line.trim_start();
        if stripped.starts_with('%') || stripped.starts_with('!') {
            return true;
        }
    }
    PLACEHOLDER_RE.is_match(trimmed)
}

/// Depth-first search for the first node satisfying the predicate.
fn first_matching_node<'a>(node: Node<'a>, pred: &dyn Fn(Node<'a>) -> bool) -> Option<Node<'a>> {
    if pred(node) {
        return Some(node);
    }
    let mut cursor = node.walk();
    for child in node.children(&mut cursor) {
        if let Some(found) = first_matching_node(child, pred) {
            return Some(found);
        }
    }
    None
}

#[cfg(test)]
#[allow(clippy::missing_panics_doc)]
mod tests {
    use super::*;

    #[test]
    fn valid_program_has_no_issue() {
        let code = "import os\n\ndef main():\n    print(os.getcwd())\n\nmain()\n";
        assert_eq!(check_snippet(code), None);
    }

    #[test]
    fn broken_def_reports_a_syntax_error_with_its_line() {
        let issue = check_snippet("def f(:\n    pass\n");
        let Some(SnippetIssue::Syntax { line, .. }) = issue else {
            panic!("expected a syntax issue, got {issue:?}");
        };
        assert_eq!(line, 1);
    }

    #[test]
    fn error_line_tracks_position_within_the_snippet() {
        let issue = check_snippet("x = 1\ny = 2\ndef f(:\n    pass\n");
        let Some(SnippetIssue::Syntax { line, .. }) = issue else {
            panic!("expected a syntax issue, got {issue:?}");
        };
        assert!(line >= 3, "expected failure at or after line 3, got {line}");
    }

    #[test]
    fn missing_delimiter_is_a_syntax_error() {
        // tree-sitter models a dropped delimiter as a MISSING node rather
        // than an ERROR node; both must surface as hard syntax damage.
        let issue = check_snippet("x = (1\n");
        assert!(
            matches!(issue, Some(SnippetIssue::Syntax { .. })),
            "expected a syntax issue, got {issue:?}"
        );
    }

    #[test]
    fn trailing_colon_line_does_not_mask_earlier_errors() {
        let issue = check_snippet("def f(:\n    pass\n\nfor x in range(3):");
        assert!(
            matches!(issue, Some(SnippetIssue::Syntax { .. })),
            "expected a syntax issue, got {issue:?}"
        );
    }

    #[test]
    fn shell_magic_lines_are_skipped() {
        assert_eq!(check_snippet("%pip install requests\n"), None);
        assert_eq!(check_snippet("!ls -la\n"), None);
    }

    #[test]
    fn placeholder_tokens_are_skipped() {
        assert_eq!(check_snippet("api_key = <your-api-key>\n"), None);
    }

    #[test]
    fn bare_signature_without_body_is_skipped() {
        assert_eq!(check_snippet("def handler(event, context):"), None);
        assert_eq!(check_snippet("class Client:"), None);
    }

    #[test]
    fn top_level_await_fragment_is_skipped() {
        assert_eq!(check_snippet("await client.close()\n"), None);
    }

    #[test]
    fn determinism_same_snippet_same_result() {
        let code = "def f(:\n    pass\n";
        assert_eq!(check_snippet(code), check_snippet(code));
    }
}
