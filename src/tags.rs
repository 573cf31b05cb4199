//! Tag collection.
//!
//! Pulls the element kinds the structural features look at out of a parsed
//! page. Apart from the refresh and submit sets, collection filters by tag
//! name only.

use crate::dom::{self, Element, HtmlDocument};

/// Ordered elements of one kind. Empty, never absent, when nothing matched.
pub type NodeSet = Vec<Element>;

/// Every element collection used by the feature set.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TagSets {
    /// `<a>` elements.
    pub anchors: NodeSet,
    /// `<link>` elements.
    pub links: NodeSet,
    /// `<img>` elements.
    pub images: NodeSet,
    /// `<script>` elements.
    pub scripts: NodeSet,
    /// `<iframe>` elements followed by `<frame>` elements.
    pub frames: NodeSet,
    /// `<meta http-equiv="refresh">` elements.
    pub redirects: NodeSet,
    /// Elements of any kind with `type="submit"`.
    pub submits: NodeSet,
    /// `<form>` elements.
    pub forms: NodeSet,
    /// Text of each non-empty `<title>`.
    pub titles: Vec<String>,
}

impl TagSets {
    /// Collect every set from a parsed document.
    #[must_use]
    pub fn collect(doc: &HtmlDocument) -> Self {
        let mut frames = dom::snapshot(&doc.select("iframe"));
        frames.extend(dom::snapshot(&doc.select("frame")));

        Self {
            anchors: dom::snapshot(&doc.select("a")),
            links: dom::snapshot(&doc.select("link")),
            images: dom::snapshot(&doc.select("img")),
            scripts: dom::snapshot(&doc.select("script")),
            frames,
            redirects: collect_refresh_meta(doc),
            submits: collect_submit(doc),
            forms: dom::snapshot(&doc.select("form")),
            titles: collect_titles(doc),
        }
    }

    /// Concatenate every set of `self` with the matching set of `other`.
    #[must_use]
    pub fn concat(&self, other: &Self) -> Self {
        fn join<T: Clone>(a: &[T], b: &[T]) -> Vec<T> {
            a.iter().chain(b).cloned().collect()
        }

        Self {
            anchors: join(&self.anchors, &other.anchors),
            links: join(&self.links, &other.links),
            images: join(&self.images, &other.images),
            scripts: join(&self.scripts, &other.scripts),
            frames: join(&self.frames, &other.frames),
            redirects: join(&self.redirects, &other.redirects),
            submits: join(&self.submits, &other.submits),
            forms: join(&self.forms, &other.forms),
            titles: join(&self.titles, &other.titles),
        }
    }
}

/// `<meta>` whose `http-equiv` is `refresh` in any letter case.
fn collect_refresh_meta(doc: &HtmlDocument) -> NodeSet {
    dom::snapshot(&doc.select("meta"))
        .into_iter()
        .filter(|meta| {
            meta.attr("http-equiv")
                .is_some_and(|v| v.eq_ignore_ascii_case("refresh"))
        })
        .collect()
}

/// Elements whose `type` is exactly `submit`.
///
/// Filtered by hand: CSS matching of `type` values is case-insensitive in
/// HTML documents.
fn collect_submit(doc: &HtmlDocument) -> NodeSet {
    dom::snapshot(&doc.select("[type]"))
        .into_iter()
        .filter(|el| el.attr("type") == Some("submit"))
        .collect()
}

fn collect_titles(doc: &HtmlDocument) -> Vec<String> {
    doc.select("title")
        .iter()
        .map(|title| title.text().to_string())
        .filter(|text| !text.is_empty())
        .collect()
}
