//! URL Utility Functions
//!
//! Resolves page URLs and element `href`/`src` values to their registrable
//! domain. Anything that cannot be resolved maps to
//! [`RegistrableDomain::Invalid`] instead of failing, so a single bad link
//! never aborts extraction.

use url::{Host, Url};

/// Registrable domain of a URL, or the sentinel for values without one.
///
/// `Invalid` never compares equal to a real domain, including the document's
/// own.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum RegistrableDomain {
    /// Lower-cased registrable domain, e.g. `example.co.uk`.
    Domain(String),
    /// Relative, empty, malformed or host-less reference.
    Invalid,
}

impl RegistrableDomain {
    /// Returns the domain text, or `None` for `Invalid`.
    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Domain(d) => Some(d),
            Self::Invalid => None,
        }
    }

    /// Whether this is a real domain.
    #[must_use]
    pub fn is_valid(&self) -> bool {
        matches!(self, Self::Domain(_))
    }
}

impl std::fmt::Display for RegistrableDomain {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Domain(d) => f.write_str(d),
            Self::Invalid => f.write_str("."),
        }
    }
}

/// Parse a reference that carries its own host.
///
/// Scheme-relative references (`//cdn.example.com/a.js`) are read as https.
/// Relative paths and fragments yield `None`.
#[must_use]
pub fn parse_absolute(s: &str) -> Option<Url> {
    let s = s.trim();

    if s.is_empty() {
        return None;
    }

    let url = if let Some(rest) = s.strip_prefix("//") {
        Url::parse(&format!("https://{rest}")).ok()?
    } else {
        Url::parse(s).ok()?
    };

    url.host().is_some().then_some(url)
}

/// Resolve a URL or href to its registrable domain.
///
/// # Examples
/// ```
/// use rs_http_features::url_utils::{resolve_domain, RegistrableDomain};
///
/// assert_eq!(
///     resolve_domain("https://www.example.co.uk/login?x=1#top"),
///     RegistrableDomain::Domain("example.co.uk".to_string())
/// );
/// assert_eq!(resolve_domain("/relative/path"), RegistrableDomain::Invalid);
/// ```
#[must_use]
pub fn resolve_domain(url_or_href: &str) -> RegistrableDomain {
    let Some(url) = parse_absolute(url_or_href) else {
        return RegistrableDomain::Invalid;
    };

    match url.host() {
        Some(Host::Domain(host)) => registrable_part(host),
        Some(Host::Ipv4(addr)) => RegistrableDomain::Domain(addr.to_string()),
        Some(Host::Ipv6(addr)) => RegistrableDomain::Domain(addr.to_string()),
        None => RegistrableDomain::Invalid,
    }
}

/// Reduce a host name to its registrable part using the public suffix list.
fn registrable_part(host: &str) -> RegistrableDomain {
    let host = host.trim_end_matches('.').to_ascii_lowercase();

    if host.is_empty() {
        return RegistrableDomain::Invalid;
    }

    match psl::domain_str(&host) {
        Some(domain) => RegistrableDomain::Domain(domain.to_string()),
        None => RegistrableDomain::Invalid,
    }
}
