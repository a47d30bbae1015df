//! Markdown structural extraction.
//!
//! A single linear pass over document text, tracking one "inside fenced code
//! block" flag toggled on every line whose trimmed content starts with a
//! triple-backtick marker. Rule evaluators consume the extracted tokens and
//! never inspect raw text themselves.

use std::collections::BTreeSet;
use std::sync::LazyLock;

use regex::Regex;

/// A well-formed ATX heading: one to six `#`, whitespace, then content.
static HEADING_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^#{1,6}\s+\S").expect("valid regex"));

/// An inline `[text](url)` link.
static LINK_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\[([^\]]+)\]\(([^)]+)\)").expect("valid regex"));

/// A line that opens a list item: unordered or ordered marker plus whitespace.
static LIST_GATE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\s*(?:[-*+]|\d+\.)\s").expect("valid regex"));

/// A list marker correctly followed by whitespace-then-content.
static LIST_SPACED_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\s*(?:[-*+]|\d+\.)\s+\S").expect("valid regex"));

static BOLD_MARKUP_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\*\*(.+?)\*\*").expect("valid regex"));
static CODE_MARKUP_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"`(.+?)`").expect("valid regex"));
static LINK_MARKUP_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\[(.+?)\]\(.+?\)").expect("valid regex"));

/// A well-formed heading with its 1-based position.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Heading {
    /// Heading depth, 1 through 6.
    pub level: usize,
    /// 1-based line number in the document.
    pub line: usize,
    /// Heading text with the marker and surrounding whitespace stripped.
    pub text: String,
}

/// Every `#`-prefixed line outside code blocks, well-formed or not.
/// The format checker reports malformed markers; they are tokens here so
/// evaluators never re-scan raw text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeadingMarker {
    /// Number of leading `#` characters (may exceed 6).
    pub level: usize,
    /// 1-based line number in the document.
    pub line: usize,
    /// Whether the line satisfies `^#{1,6}\s+\S`.
    pub spaced: bool,
}

/// A fenced code block. Only closed blocks are emitted; a dangling open
/// fence is signalled by an odd `fence_lines` count instead.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CodeBlock {
    /// Block body, without the fence lines.
    pub body: String,
    /// Declared language tag, possibly empty.
    pub language: String,
    /// 1-based line number of the opening fence.
    pub line: usize,
}

/// An inline link extracted from non-code text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Link {
    /// 1-based line number in the document.
    pub line: usize,
    /// Display text between the brackets.
    pub text: String,
    /// Raw target between the parentheses.
    pub url: String,
}

/// Classification of a link target, driving which validation applies.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LinkKind {
    /// Same-document anchor (`#intro`). Accepted without validation.
    Anchor,
    /// `mailto:` or `ftp://`. Accepted without validation.
    Exempt,
    /// `http://` or `https://`. Format-checked only.
    External,
    /// Repository- or document-relative path, optionally with `#anchor`.
    Internal,
}

impl Link {
    /// Classify this link's target.
    pub fn kind(&self) -> LinkKind {
        if self.url.starts_with('#') {
            LinkKind::Anchor
        } else if self.url.starts_with("http://") || self.url.starts_with("https://") {
            LinkKind::External
        } else if self.url.starts_with("mailto:") || self.url.starts_with("ftp://") {
            LinkKind::Exempt
        } else {
            LinkKind::Internal
        }
    }
}

/// A list-marker line outside code blocks.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListMarker {
    /// 1-based line number in the document.
    pub line: usize,
    /// Whether the marker is followed by whitespace-then-content.
    pub spaced: bool,
}

/// The token streams extracted from one document.
#[derive(Debug, Default)]
pub struct MarkdownDoc {
    /// Closed fenced code blocks, in document order.
    pub code_blocks: Vec<CodeBlock>,
    /// Total count of fence-marker lines. Odd means an unclosed block.
    pub fence_lines: usize,
    /// All `#`-prefixed lines outside code blocks, in document order.
    pub heading_markers: Vec<HeadingMarker>,
    /// Well-formed headings, in document order.
    pub headings: Vec<Heading>,
    /// Inline links outside code blocks, in document order.
    pub links: Vec<Link>,
    /// List-marker lines outside code blocks, in document order.
    pub list_markers: Vec<ListMarker>,
}

impl MarkdownDoc {
    /// Extract all token streams from document text in one pass.
    pub fn parse(text: &str) -> Self {
        let mut doc = Self::default();
        let mut in_block = false;
        let mut block_language = String::new();
        let mut block_line = 0;
        let mut block_body: Vec<&str> = Vec::new();

        for (idx, raw) in text.lines().enumerate() {
            let line = idx.saturating_add(1);
            let trimmed = raw.trim_start();

            if trimmed.starts_with("```") {
                doc.fence_lines = doc.fence_lines.saturating_add(1);
                if in_block {
                    doc.code_blocks.push(CodeBlock {
                        body: block_body.join("\n"),
                        language: std::mem::take(&mut block_language),
                        line: block_line,
                    });
                    block_body.clear();
                } else {
                    block_language = trimmed.get(3..).unwrap_or("").trim().to_string();
                    block_line = line;
                }
                in_block = !in_block;
                continue;
            }

            if in_block {
                block_body.push(raw);
                continue;
            }

            if raw.starts_with('#') {
                doc.push_heading(raw, line);
            }
            if LIST_GATE_RE.is_match(raw) {
                doc.list_markers.push(ListMarker {
                    line,
                    spaced: LIST_SPACED_RE.is_match(raw),
                });
            }
            for cap in LINK_RE.captures_iter(raw) {
                if let (Some(text), Some(url)) = (cap.get(1), cap.get(2)) {
                    doc.links.push(Link {
                        line,
                        text: text.as_str().to_string(),
                        url: url.as_str().to_string(),
                    });
                }
            }
        }
        // A still-open block at EOF is dangling: not emitted, and the odd
        // fence count is left for the format checker to report.
        doc
    }

    /// True iff the document has an unmatched fence marker.
    pub fn has_unclosed_fence(&self) -> bool {
        self.fence_lines % 2 == 1
    }

    /// Derived anchor IDs for every heading. Duplicate headings collide
    /// into one entry, matching the platform's naive behavior.
    pub fn anchor_set(&self) -> BTreeSet<String> {
        self.headings.iter().map(|h| anchor_id(&h.text)).collect()
    }

    fn push_heading(&mut self, raw: &str, line: usize) {
        let level = raw.chars().take_while(|c| *c == '#').count();
        let spaced = HEADING_RE.is_match(raw);
        self.heading_markers.push(HeadingMarker { level, line, spaced });

        // The spacing regex only matches for levels 1-6, so every token
        // pushed here is a well-formed heading.
        if spaced {
            let text = raw.trim_start_matches('#').trim().to_string();
            self.headings.push(Heading { level, line, text });
        }
    }
}

/// Derive the anchor ID for a heading, mimicking the rendering platform's
/// slug algorithm: strip bold/code/link markup, lowercase (CJK unaffected),
/// keep alphanumerics, hyphens, underscores, and CJK characters, convert
/// whitespace to hyphens, collapse runs, trim edges.
pub fn anchor_id(heading: &str) -> String {
    let text = BOLD_MARKUP_RE.replace_all(heading, "$1");
    let text = CODE_MARKUP_RE.replace_all(&text, "$1");
    let text = LINK_MARKUP_RE.replace_all(&text, "$1");
    let lowered = text.to_lowercase();

    let mut kept = String::with_capacity(lowered.len());
    for ch in lowered.chars() {
        if ('\u{4e00}'..='\u{9fff}').contains(&ch) {
            kept.push(ch);
        } else if ch.is_alphanumeric() || ch == '-' || ch == '_' {
            kept.push(ch);
        } else if ch.is_whitespace() {
            kept.push('-');
        }
        // Everything else (punctuation) is dropped.
    }

    let mut anchor = String::with_capacity(kept.len());
    let mut prev_hyphen = false;
    for ch in kept.chars() {
        if ch == '-' {
            if !prev_hyphen {
                anchor.push('-');
            }
            prev_hyphen = true;
        } else {
            anchor.push(ch);
            prev_hyphen = false;
        }
    }
    anchor.trim_matches('-').to_string()
}
