//! Page document model.
//!
//! A [`Document`] is built once from page text and its source URL. Every
//! derived structure (line stats, tag sets, byte distribution) is computed
//! at construction and never changes afterwards. Pages without markup are
//! kept as [`Markup::Unparsed`], and every tree-based accessor matches on it
//! instead of null-checking.

use tracing::warn;

use crate::dom::{self, Element};
use crate::line_scan::LineStats;
use crate::tags::TagSets;
use crate::url_utils::{resolve_domain, RegistrableDomain};

/// Parse outcome of the page markup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Markup {
    /// The page parsed; its element collections.
    Parsed(TagSets),
    /// Nothing to parse. Tree-based features take their empty defaults.
    Unparsed,
}

impl Markup {
    /// Concatenate with another page's markup.
    ///
    /// Parsed when either side is.
    #[must_use]
    pub fn concat(&self, other: &Self) -> Self {
        match (self, other) {
            (Self::Parsed(a), Self::Parsed(b)) => Self::Parsed(a.concat(b)),
            (Self::Parsed(t), Self::Unparsed) | (Self::Unparsed, Self::Parsed(t)) => {
                Self::Parsed(t.clone())
            }
            (Self::Unparsed, Self::Unparsed) => Self::Unparsed,
        }
    }
}

/// Count of every byte value in the raw page text, newlines excluded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ByteDistribution {
    counts: [u64; 256],
}

impl Default for ByteDistribution {
    fn default() -> Self {
        Self { counts: [0; 256] }
    }
}

impl ByteDistribution {
    /// Count the bytes of `text`.
    #[must_use]
    pub fn from_text(text: &str) -> Self {
        let mut dist = Self::default();
        for b in text.bytes().filter(|&b| b != b'\n') {
            dist.counts[usize::from(b)] += 1;
        }
        dist
    }

    /// Bucket counts indexed by byte value.
    #[must_use]
    pub fn counts(&self) -> &[u64; 256] {
        &self.counts
    }

    /// Count for one byte value.
    #[must_use]
    pub fn get(&self, byte: u8) -> u64 {
        self.counts[usize::from(byte)]
    }

    /// Element-wise sum.
    #[must_use]
    pub fn sum(&self, other: &Self) -> Self {
        let mut out = self.clone();
        for (a, b) in out.counts.iter_mut().zip(other.counts.iter()) {
            *a += b;
        }
        out
    }
}

/// A captured page and everything derived from it.
#[derive(Debug, Clone, PartialEq)]
pub struct Document {
    url: String,
    domain: RegistrableDomain,
    markup: Markup,
    lines: LineStats,
    bytes: ByteDistribution,
}

impl Document {
    /// Build a document from page text and its source URL.
    #[must_use]
    pub fn parse(html: &str, url: &str) -> Self {
        let url = url.trim_end().to_string();
        let domain = resolve_domain(&url);

        let markup = match dom::parse(html) {
            Some(doc) => Markup::Parsed(TagSets::collect(&doc)),
            None => {
                warn!(url = %url, "page has no markup; tree features default to zero");
                Markup::Unparsed
            }
        };
        let lines = LineStats::scan(html, matches!(markup, Markup::Parsed(_)));

        Self {
            url,
            domain,
            markup,
            lines,
            bytes: ByteDistribution::from_text(html),
        }
    }

    /// Merge two captures of one logical page.
    ///
    /// Node sets are concatenated and counters summed; the URL and domain
    /// come from `self`.
    #[must_use]
    pub fn combine(&self, other: &Self) -> Self {
        Self {
            url: self.url.clone(),
            domain: self.domain.clone(),
            markup: self.markup.concat(&other.markup),
            lines: self.lines.sum(&other.lines),
            bytes: self.bytes.sum(&other.bytes),
        }
    }

    /// Copy of this document attributed to another source URL.
    #[must_use]
    pub fn with_url(&self, url: &str) -> Self {
        let url = url.trim_end().to_string();
        Self {
            domain: resolve_domain(&url),
            url,
            ..self.clone()
        }
    }

    /// Source URL.
    #[must_use]
    pub fn url(&self) -> &str {
        &self.url
    }

    /// Registrable domain of the source URL.
    #[must_use]
    pub fn domain(&self) -> &RegistrableDomain {
        &self.domain
    }

    /// Parse outcome.
    #[must_use]
    pub fn markup(&self) -> &Markup {
        &self.markup
    }

    /// Whether the page parsed.
    #[must_use]
    pub fn is_parsed(&self) -> bool {
        matches!(self.markup, Markup::Parsed(_))
    }

    /// Line and byte counts.
    #[must_use]
    pub fn line_stats(&self) -> &LineStats {
        &self.lines
    }

    /// Byte distribution of the raw text. Empty when the page has no markup.
    #[must_use]
    pub fn byte_distribution(&self) -> &[u64] {
        match self.markup {
            Markup::Parsed(_) => self.bytes.counts(),
            Markup::Unparsed => &[],
        }
    }

    fn node_set(&self, pick: impl FnOnce(&TagSets) -> &[Element]) -> &[Element] {
        match &self.markup {
            Markup::Parsed(tags) => pick(tags),
            Markup::Unparsed => &[],
        }
    }

    /// `<a>` elements.
    #[must_use]
    pub fn anchors(&self) -> &[Element] {
        self.node_set(|t| &t.anchors)
    }

    /// `<link>` elements.
    #[must_use]
    pub fn links(&self) -> &[Element] {
        self.node_set(|t| &t.links)
    }

    /// `<img>` elements.
    #[must_use]
    pub fn images(&self) -> &[Element] {
        self.node_set(|t| &t.images)
    }

    /// `<script>` elements.
    #[must_use]
    pub fn scripts(&self) -> &[Element] {
        self.node_set(|t| &t.scripts)
    }

    /// `<iframe>` then `<frame>` elements.
    #[must_use]
    pub fn frames(&self) -> &[Element] {
        self.node_set(|t| &t.frames)
    }

    /// Refresh `<meta>` elements.
    #[must_use]
    pub fn redirects(&self) -> &[Element] {
        self.node_set(|t| &t.redirects)
    }

    /// Elements with `type="submit"`.
    #[must_use]
    pub fn submits(&self) -> &[Element] {
        self.node_set(|t| &t.submits)
    }

    /// `<form>` elements.
    #[must_use]
    pub fn forms(&self) -> &[Element] {
        self.node_set(|t| &t.forms)
    }

    /// Title texts.
    #[must_use]
    pub fn titles(&self) -> &[String] {
        match &self.markup {
            Markup::Parsed(tags) => &tags.titles,
            Markup::Unparsed => &[],
        }
    }
}
