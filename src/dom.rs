//! DOM Operations Adapter
//!
//! Thin layer over `dom_query`. Parsing goes through [`parse`], which reports
//! an unparseable page as `None`, and selections are copied out into owned
//! [`Element`] snapshots so that node sets outlive the tree they came from.

pub use dom_query::{Document as HtmlDocument, Selection};

/// Owned copy of one element: its tag name and attributes.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Element {
    tag: String,
    attrs: Vec<(String, String)>,
}

impl Element {
    /// Build an element by hand. Mostly useful in tests.
    #[must_use]
    pub fn new(tag: &str, attrs: &[(&str, &str)]) -> Self {
        Self {
            tag: tag.to_ascii_lowercase(),
            attrs: attrs
                .iter()
                .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
                .collect(),
        }
    }

    /// Lower-case tag name.
    #[must_use]
    pub fn tag(&self) -> &str {
        &self.tag
    }

    /// Attribute value, `None` when the attribute is absent.
    #[must_use]
    pub fn attr(&self, name: &str) -> Option<&str> {
        self.attrs
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }

    /// Whether the attribute is present (even if empty).
    #[must_use]
    pub fn has_attr(&self, name: &str) -> bool {
        self.attr(name).is_some()
    }
}

// === Parsing ===

/// Parse HTML into a document.
///
/// html5ever recovers from any markup, so the only unparseable input is a
/// page with no content at all (empty or whitespace only).
#[must_use]
pub fn parse(html: &str) -> Option<HtmlDocument> {
    if html.trim().is_empty() {
        return None;
    }
    Some(HtmlDocument::from(html))
}

// === Tag/Node Information ===

/// Get tag name (lowercase)
#[must_use]
pub fn tag_name(sel: &Selection) -> Option<String> {
    sel.nodes()
        .first()
        .and_then(dom_query::NodeRef::node_name)
        .map(|t| t.to_ascii_lowercase())
}

/// Get all attributes as key-value pairs
#[must_use]
pub fn get_all_attributes(sel: &Selection) -> Vec<(String, String)> {
    sel.nodes()
        .first()
        .map(|node| {
            node.attrs()
                .iter()
                .map(|attr| (attr.name.local.to_string(), attr.value.to_string()))
                .collect()
        })
        .unwrap_or_default()
}

/// Snapshot every matched node, in document order.
#[must_use]
pub fn snapshot(sel: &Selection) -> Vec<Element> {
    sel.iter()
        .map(|node| Element {
            tag: tag_name(&node).unwrap_or_default(),
            attrs: get_all_attributes(&node),
        })
        .collect()
}
