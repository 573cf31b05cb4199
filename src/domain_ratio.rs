//! Domain concentration over element references.
//!
//! Phishing pages often pull most of their links, images or scripts from a
//! single third-party host. For a node set and the attribute holding its
//! target (`href` or `src`), this module tallies registrable domains and
//! reports how dominant the most-referenced external one is, along with how
//! many references go nowhere at all.

use std::collections::HashMap;

use crate::dom::Element;
use crate::url_utils::{resolve_domain, RegistrableDomain};

/// What counts as a reference that goes nowhere.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NullPolicy {
    /// Only a missing attribute.
    Absent,
    /// Missing, empty, or exactly `#`.
    Bare,
    /// `Bare`, plus anything starting with `#` or containing `void(`.
    Void,
}

impl NullPolicy {
    /// Whether an attribute value counts as null under this policy.
    #[must_use]
    pub fn is_null(self, value: Option<&str>) -> bool {
        let Some(value) = value else {
            return true;
        };

        match self {
            Self::Absent => false,
            Self::Bare => value.is_empty() || value == "#",
            Self::Void => value.is_empty() || value.starts_with('#') || value.contains("void("),
        }
    }
}

/// Domain occurrence counts for one node set.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DomainTally {
    counts: HashMap<RegistrableDomain, usize>,
    null: usize,
    total: usize,
}

impl DomainTally {
    /// Tally the `attr` values of `nodes`.
    #[must_use]
    pub fn build(nodes: &[Element], attr: &str, policy: NullPolicy) -> Self {
        let mut tally = Self::default();

        for node in nodes {
            tally.total += 1;
            let value = node.attr(attr);

            if policy.is_null(value) {
                tally.null += 1;
                continue;
            }

            let domain = value.map_or(RegistrableDomain::Invalid, resolve_domain);
            *tally.counts.entry(domain).or_insert(0) += 1;
        }

        tally
    }

    /// Nodes considered.
    #[must_use]
    pub fn total(&self) -> usize {
        self.total
    }

    /// Nodes classified as null references.
    #[must_use]
    pub fn null_count(&self) -> usize {
        self.null
    }

    /// References resolved to `domain`.
    #[must_use]
    pub fn count(&self, domain: &RegistrableDomain) -> usize {
        self.counts.get(domain).copied().unwrap_or(0)
    }

    /// Largest count among domains other than `own` and the invalid sentinel.
    #[must_use]
    pub fn max_external(&self, own: &RegistrableDomain) -> usize {
        self.counts
            .iter()
            .filter(|(domain, _)| domain.is_valid() && *domain != own)
            .map(|(_, &n)| n)
            .max()
            .unwrap_or(0)
    }

    /// Share of nodes pointing at the most-referenced external domain.
    #[must_use]
    pub fn concentration_rate(&self, own: &RegistrableDomain) -> f64 {
        ratio(self.max_external(own), self.total)
    }

    /// Share of nodes that are null references.
    #[must_use]
    pub fn null_rate(&self) -> f64 {
        ratio(self.null, self.total)
    }
}

fn ratio(part: usize, total: usize) -> f64 {
    if total == 0 {
        return 0.0;
    }
    part as f64 / total as f64
}

/// Concentration of `attr` targets on a single external domain.
#[must_use]
pub fn concentration_rate(
    nodes: &[Element],
    attr: &str,
    policy: NullPolicy,
    own: &RegistrableDomain,
) -> f64 {
    DomainTally::build(nodes, attr, policy).concentration_rate(own)
}

/// Share of `attr` values that go nowhere.
#[must_use]
pub fn null_rate(nodes: &[Element], attr: &str, policy: NullPolicy) -> f64 {
    DomainTally::build(nodes, attr, policy).null_rate()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn anchors(hrefs: &[Option<&str>]) -> Vec<Element> {
        hrefs
            .iter()
            .map(|h| match h {
                Some(v) => Element::new("a", &[("href", *v)]),
                None => Element::new("a", &[]),
            })
            .collect()
    }

    fn own(d: &str) -> RegistrableDomain {
        RegistrableDomain::Domain(d.to_string())
    }

    #[test]
    fn test_policy_absent() {
        assert!(NullPolicy::Absent.is_null(None));
        assert!(!NullPolicy::Absent.is_null(Some("")));
        assert!(!NullPolicy::Absent.is_null(Some("#")));
    }

    #[test]
    fn test_policy_bare() {
        assert!(NullPolicy::Bare.is_null(None));
        assert!(NullPolicy::Bare.is_null(Some("")));
        assert!(NullPolicy::Bare.is_null(Some("#")));
        assert!(!NullPolicy::Bare.is_null(Some("#top")));
        assert!(!NullPolicy::Bare.is_null(Some("javascript:void(0)")));
    }

    #[test]
    fn test_policy_void() {
        for v in [None, Some(""), Some("#"), Some("#top"), Some("javascript:void(0)")] {
            assert!(NullPolicy::Void.is_null(v), "{v:?}");
        }
        assert!(!NullPolicy::Void.is_null(Some("http://other.com/x")));
    }

    #[test]
    fn test_half_external_half_null() {
        let nodes = anchors(&[Some("#"), Some("http://x.com")]);
        let own = own("y.com");

        assert!((concentration_rate(&nodes, "href", NullPolicy::Bare, &own) - 0.5).abs() < f64::EPSILON);
        assert!((null_rate(&nodes, "href", NullPolicy::Void) - 0.5).abs() < f64::EPSILON);
    }

    #[test]
    fn test_own_domain_excluded() {
        let nodes = anchors(&[
            Some("https://www.y.com/a"),
            Some("https://y.com/b"),
            Some("http://login.y.com/"),
        ]);
        assert_eq!(concentration_rate(&nodes, "href", NullPolicy::Bare, &own("y.com")), 0.0);
    }

    #[test]
    fn test_invalid_excluded_from_max() {
        let nodes = anchors(&[Some("/a"), Some("/b"), Some("page.html"), Some("https://x.com/")]);
        let tally = DomainTally::build(&nodes, "href", NullPolicy::Bare);

        assert_eq!(tally.count(&RegistrableDomain::Invalid), 3);
        assert_eq!(tally.max_external(&own("y.com")), 1);
        assert!((tally.concentration_rate(&own("y.com")) - 0.25).abs() < f64::EPSILON);
    }

    #[test]
    fn test_invalid_own_domain_does_not_match_invalid_refs() {
        let nodes = anchors(&[Some("/a"), Some("https://x.com/")]);
        let tally = DomainTally::build(&nodes, "href", NullPolicy::Bare);
        assert_eq!(tally.max_external(&RegistrableDomain::Invalid), 1);
    }

    #[test]
    fn test_picks_most_referenced_external_domain() {
        let nodes = anchors(&[
            Some("https://a.evil.com/1"),
            Some("https://b.evil.com/2"),
            Some("https://evil.com/3"),
            Some("https://other.net/"),
            Some("https://y.com/"),
            Some("https://y.com/"),
            Some("https://y.com/"),
            Some("https://y.com/"),
        ]);
        let rate = concentration_rate(&nodes, "href", NullPolicy::Bare, &own("y.com"));
        assert!((rate - 3.0 / 8.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_empty_set_rates_are_zero() {
        let tally = DomainTally::build(&[], "src", NullPolicy::Absent);
        assert_eq!(tally.total(), 0);
        assert_eq!(tally.concentration_rate(&own("y.com")), 0.0);
        assert_eq!(tally.null_rate(), 0.0);
    }

    #[test]
    fn test_image_empty_src_is_tallied_not_null() {
        let imgs = vec![
            Element::new("img", &[("src", "")]),
            Element::new("img", &[]),
            Element::new("img", &[("src", "https://cdn.x.com/a.png")]),
        ];
        let tally = DomainTally::build(&imgs, "src", NullPolicy::Absent);
        assert_eq!(tally.null_count(), 1);
        assert_eq!(tally.count(&RegistrableDomain::Invalid), 1);
        assert!((tally.concentration_rate(&own("y.com")) - 1.0 / 3.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_null_a_tag_never_counts_real_links() {
        let nodes = anchors(&[Some("http://other.com/x"), Some("https://a.com")]);
        assert_eq!(null_rate(&nodes, "href", NullPolicy::Void), 0.0);
    }
}
