//! Display formatter: turns prose replies into typed display blocks and strips
//! inline markdown for contexts that render plain text.
//!
//! This is deliberately not a markdown parser: each line is classified on its
//! own, and only the restricted subset the coach prompt asks for is recognised.

use std::borrow::Cow;
use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

/// One rendering unit derived from a reply line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum DisplayBlock {
    Header { text: String, level: u8 },
    Bullet { text: String },
    /// `index` is assigned in display order; the number the model wrote is ignored.
    Numbered { text: String, index: usize },
    Paragraph { text: String },
}

impl DisplayBlock {
    pub fn text(&self) -> &str {
        match self {
            DisplayBlock::Header { text, .. }
            | DisplayBlock::Bullet { text }
            | DisplayBlock::Numbered { text, .. }
            | DisplayBlock::Paragraph { text } => text,
        }
    }
}

fn pattern(re: &str) -> Regex {
    Regex::new(re).expect("formatter pattern is valid")
}

static HEADER: LazyLock<Regex> = LazyLock::new(|| pattern(r"^(#{1,3})(?:\s+(.*))?$"));
static BULLET: LazyLock<Regex> = LazyLock::new(|| pattern(r"^[-*+•](?:\s+(.*))?$"));
static NUMBERED: LazyLock<Regex> = LazyLock::new(|| pattern(r"^\d+\.\s+(.*)$"));
static TABLE_SEPARATOR: LazyLock<Regex> = LazyLock::new(|| pattern(r"^[|:\-\s]+$"));
static RULE: LazyLock<Regex> = LazyLock::new(|| pattern(r"^(?:(?:-\s*){3,}|(?:\*\s*){3,})$"));

static FENCED_CODE: LazyLock<Regex> = LazyLock::new(|| pattern(r"(?s)```.*?```"));
static BOLD: LazyLock<Regex> = LazyLock::new(|| pattern(r"\*\*(.+?)\*\*"));
static ITALIC: LazyLock<Regex> = LazyLock::new(|| pattern(r"\*([^*\s](?:[^*\n]*[^*\s])?)\*"));
static INLINE_CODE: LazyLock<Regex> = LazyLock::new(|| pattern(r"`([^`\n]+)`"));
static LINK: LazyLock<Regex> = LazyLock::new(|| pattern(r"!?\[([^\]\n]*)\]\([^)\n]*\)"));
static BLANK_RUN: LazyLock<Regex> = LazyLock::new(|| pattern(r"\n(?:[ \t\r]*\n)+"));

enum LineKind {
    Header(u8),
    Bullet,
    Numbered,
    Paragraph,
}

/// Converts reply text into display blocks. Total over all inputs; empty text
/// yields no blocks.
pub fn format_blocks(text: &str) -> Vec<DisplayBlock> {
    let mut blocks = Vec::new();
    let mut next_index = 1;

    for line in text.lines() {
        let line = line.trim();
        if is_skipped(line) {
            continue;
        }

        let (kind, raw) = classify(line);
        let text = strip_inline_markup(&raw);
        if text.is_empty() {
            continue;
        }

        blocks.push(match kind {
            LineKind::Header(level) => DisplayBlock::Header { text, level },
            LineKind::Bullet => DisplayBlock::Bullet { text },
            LineKind::Numbered => {
                let index = next_index;
                next_index += 1;
                DisplayBlock::Numbered { text, index }
            }
            LineKind::Paragraph => DisplayBlock::Paragraph { text },
        });
    }

    blocks
}

fn is_skipped(line: &str) -> bool {
    line.is_empty()
        || line.starts_with("```")
        || RULE.is_match(line)
        || TABLE_SEPARATOR.is_match(line)
}

fn classify(line: &str) -> (LineKind, Cow<'_, str>) {
    if let Some(caps) = HEADER.captures(line) {
        let level = caps[1].len() as u8;
        let text = caps.get(2).map_or("", |m| m.as_str());
        return (LineKind::Header(level), Cow::Borrowed(text));
    }
    if let Some(caps) = BULLET.captures(line) {
        let text = caps.get(1).map_or("", |m| m.as_str());
        return (LineKind::Bullet, Cow::Borrowed(text));
    }
    if let Some(caps) = NUMBERED.captures(line) {
        let text = caps.get(1).map_or("", |m| m.as_str());
        return (LineKind::Numbered, Cow::Borrowed(text));
    }
    if line.starts_with('|') {
        return (LineKind::Paragraph, Cow::Owned(table_row_text(line)));
    }
    (LineKind::Paragraph, Cow::Borrowed(line))
}

fn table_row_text(line: &str) -> String {
    line.trim_matches('|')
        .split('|')
        .map(str::trim)
        .filter(|cell| !cell.is_empty())
        .collect::<Vec<_>>()
        .join(" | ")
}

/// Strips inline markdown: fenced code, bold, italic, inline code and links.
/// Blank-line runs collapse to one line break and the result is trimmed.
///
/// Passes repeat until the text stops changing, so the function is idempotent.
pub fn strip_inline_markup(text: &str) -> String {
    let mut current = strip_pass(text);
    loop {
        let next = strip_pass(&current);
        if next == current {
            return current;
        }
        current = next;
    }
}

/// One pass over every rule. Bold must run before italic since both use `*`.
fn strip_pass(text: &str) -> String {
    let text = FENCED_CODE.replace_all(text, "");
    let text = BOLD.replace_all(&text, "$1");
    let text = ITALIC.replace_all(&text, "$1");
    let text = INLINE_CODE.replace_all(&text, "$1");
    let text = LINK.replace_all(&text, "$1");
    let text = BLANK_RUN.replace_all(&text, "\n");
    text.trim().to_string()
}
