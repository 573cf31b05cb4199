//! Compiled regex patterns and fixed character sets.
//!
//! All patterns are compiled once at first use using `LazyLock`.

#![allow(clippy::expect_used)]

use std::sync::LazyLock;

use regex::Regex;

// =============================================================================
// Line Normalization Patterns
// =============================================================================

/// A line made of several comments chained together, e.g.
/// `<!-- a --> text <!-- b -->`. Such lines are kept.
pub static CHAINED_COMMENT_LINE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^<!--.*(-->.*<!--)+.*-->$").expect("CHAINED_COMMENT_LINE regex")
});

/// A line holding exactly one self-contained comment. Such lines are dropped.
pub static SINGLE_COMMENT_LINE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^<!--.*-->$").expect("SINGLE_COMMENT_LINE regex"));

// =============================================================================
// Redirect Patterns
// =============================================================================

/// `content` of a refresh `<meta>` that carries an inline base64 payload.
pub static BASE64_REDIRECT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)base64").expect("BASE64_REDIRECT regex"));

// =============================================================================
// Charset Detection Patterns
// =============================================================================

/// Match `<meta charset="...">`.
pub static CHARSET_META: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?i)<meta[^>]+charset\s*=\s*["']?([^"'\s>]+)"#).expect("CHARSET_META regex")
});

/// Match `<meta http-equiv="Content-Type" content="...; charset=...">`.
pub static CONTENT_TYPE_CHARSET: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r#"(?i)<meta[^>]+http-equiv\s*=\s*["']?content-type["']?[^>]+content\s*=\s*["']?[^"'>]*;\s*charset\s*=\s*([^"'\s>]+)"#,
    )
    .expect("CONTENT_TYPE_CHARSET regex")
});

// =============================================================================
// Title Tokenization
// =============================================================================

/// Characters replaced by a space before a title is split into terms.
pub const TITLE_DELIMITERS: &[char] = &[
    '/', '?', '.', '=', '-', '_', '!', ':', ';', '|', '(', ')', ',', '@', '"', '\'', '[', ']',
    '，', '、', '！', '【', '】', '“', '”', '・', '『', '』', '｜', '‹', '›', '丨', '¥',
];
