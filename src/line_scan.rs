//! Line-oriented block scanning.
//!
//! Measures how much of the raw page text sits inside `<script>` and
//! `<style>` blocks by counting open and close tags per line, without
//! consulting the parsed tree. Obfuscated phishing kits tend to be mostly
//! inline script, which this picks up even when the markup is broken.

use crate::patterns::{CHAINED_COMMENT_LINE, SINGLE_COMMENT_LINE};

/// Line and byte counts of the normalized page text.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LineStats {
    /// Number of normalized lines.
    pub total_rows: usize,
    /// UTF-8 length of the normalized text.
    pub bytes: usize,
    /// Lines covered by `<script>` blocks.
    pub script_block_rows: usize,
    /// Lines covered by `<style>` blocks.
    pub style_block_rows: usize,
}

impl LineStats {
    /// Scan page text.
    ///
    /// Block rows are only counted when `count_blocks` is set; a page that
    /// failed to parse keeps its line and byte totals but reports no blocks.
    #[must_use]
    pub fn scan(html: &str, count_blocks: bool) -> Self {
        let text = strip_comment_lines(html);
        let (script_block_rows, style_block_rows) = if count_blocks {
            (block_rows(&text, "script"), block_rows(&text, "style"))
        } else {
            (0, 0)
        };

        Self {
            total_rows: text.split('\n').count(),
            bytes: text.len(),
            script_block_rows,
            style_block_rows,
        }
    }

    /// Share of lines inside `<script>` blocks, 0.0 for an empty page.
    #[must_use]
    pub fn script_block_rate(&self) -> f64 {
        rate(self.script_block_rows, self.total_rows)
    }

    /// Share of lines inside `<style>` blocks, 0.0 for an empty page.
    #[must_use]
    pub fn style_block_rate(&self) -> f64 {
        rate(self.style_block_rows, self.total_rows)
    }

    /// Page size in kilobytes.
    #[must_use]
    pub fn kbytes(&self) -> f64 {
        self.bytes as f64 / 1024.0
    }

    /// Field-wise sum.
    #[must_use]
    pub fn sum(&self, other: &Self) -> Self {
        Self {
            total_rows: self.total_rows + other.total_rows,
            bytes: self.bytes + other.bytes,
            script_block_rows: self.script_block_rows + other.script_block_rows,
            style_block_rows: self.style_block_rows + other.style_block_rows,
        }
    }
}

fn rate(part: usize, total: usize) -> f64 {
    if total == 0 {
        return 0.0;
    }
    part as f64 / total as f64
}

/// Drop lines that hold a single self-contained comment.
///
/// Trailing whitespace is trimmed from the text and from every line. Lines
/// chaining several comments with content in between are kept.
#[must_use]
pub fn strip_comment_lines(html: &str) -> String {
    html.trim_end()
        .split('\n')
        .map(str::trim_end)
        .filter(|row| CHAINED_COMMENT_LINE.is_match(row) || !SINGLE_COMMENT_LINE.is_match(row))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Number of lines covered by blocks of `tag`.
///
/// A line is only considered when the bare tag name first occurs past its
/// first column. Text like `script>` at the start of a line is therefore
/// skipped, and so is a line that opens with `script` as plain text.
#[must_use]
pub fn block_rows(text: &str, tag: &str) -> usize {
    let open = format!("<{tag}");
    let close = format!("</{tag}>");

    let mut covered = 0;
    let mut block_begin: Option<usize> = None;
    // Self-contained lines seen while a block is open.
    let mut pending = 0;

    for (i, row) in text.split('\n').enumerate() {
        if !matches!(row.find(tag), Some(col) if col > 0) {
            continue;
        }

        let opens = row.matches(open.as_str()).count();
        let closes = row.matches(close.as_str()).count();

        if opens > closes {
            block_begin.get_or_insert(i);
        } else if closes > opens {
            if let Some(begin) = block_begin.take() {
                covered += i - begin + 1;
                pending = 0;
            }
        } else if opens > 0 {
            if block_begin.is_some() {
                pending += 1;
            } else {
                covered += 1;
            }
        }
    }

    // A block that never closes covers nothing, but its inner lines still count.
    covered + pending
}
