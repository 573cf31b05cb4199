//! # rs-http-features
//!
//! Structural and title features from raw HTML pages, for phishing and
//! malicious-page classifiers.
//!
//! A page is parsed once; fifteen numeric features are then read off it in
//! a fixed order: page size, frame/redirect/form/submit flags, how heavily
//! scripts, links, images and anchors lean on one external domain, how much
//! of the text is inline script or style, and a title score from a
//! pretrained classifier.
//!
//! ## Quick Start
//!
//! ```rust
//! use std::sync::Arc;
//! use rs_http_features::{extract_features, StaticArtifacts, Vocabulary, Result};
//!
//! let loader = Arc::new(StaticArtifacts::new(
//!     Vocabulary::from_terms(["verify", "account"]),
//!     |batch: &[Vec<f64>]| -> Result<Vec<f64>> {
//!         Ok(batch.iter().map(|v| v.iter().sum::<f64>() / 2.0).collect())
//!     },
//! ));
//!
//! let html = r##"<html><head><title>Verify your account</title></head>
//! <body><a href="https://evil.example.net/x">go</a><a href="#">x</a></body></html>"##;
//!
//! let features = extract_features(html, "https://bank.example.com/", loader)?;
//! assert_eq!(features.get("external_a_tag_same_domain"), Some(0.5));
//! assert_eq!(features.get("null_a_tag"), Some(0.5));
//! assert_eq!(features.get("title_feature"), Some(1.0));
//! # Ok::<(), rs_http_features::Error>(())
//! ```
//!
//! ## Artifacts
//!
//! The title feature needs a vocabulary and a classifier keyed by the
//! integer TF-IDF percentage (see [`Options::tfidf_percent`]). They are
//! supplied through an [`ArtifactLoader`]: [`StaticArtifacts`] for
//! in-memory pairs, [`FsArtifactLoader`] for files on disk, and
//! [`CachedArtifactLoader`] to load each pair once per process. Pages
//! without a title never touch the loader.

mod error;
mod options;
mod patterns;
mod result;

/// DOM parsing and owned element snapshots.
pub mod dom;

/// URL parsing and registrable-domain resolution.
pub mod url_utils;

/// Character encoding detection and transcoding.
pub mod encoding;

/// Line-oriented `<script>`/`<style>` block scanning.
pub mod line_scan;

/// Per-kind element collections of a parsed page.
pub mod tags;

/// Domain concentration and null-reference rates.
pub mod domain_ratio;

/// Title tokenization, vocabulary and classifier artifacts.
pub mod title;

/// Page document model.
pub mod document;

/// Feature extraction.
pub mod features;

// Public API - re-exports
pub use document::{ByteDistribution, Document, Markup};
pub use error::{ArtifactKind, Error, Result};
pub use features::FeatureExtractor;
pub use options::{Options, DEFAULT_TFIDF_PERCENT};
pub use result::{flag, Feature, FeatureVector, FEATURE_COUNT, FEATURE_NAMES};
pub use title::{
    ArtifactLoader, CachedArtifactLoader, Classifier, FsArtifactLoader, StaticArtifacts,
    TitleClassifier, Vocabulary,
};
pub use url_utils::RegistrableDomain;

use std::sync::Arc;

/// Extracts the feature vector of a page using default options.
///
/// # Arguments
///
/// * `html` - The page text
/// * `url` - The URL the page was fetched from
/// * `loader` - Source of the title vocabulary and classifier
///
/// # Errors
///
/// Fails only when the page has a title and the title classifier cannot
/// be loaded or run.
pub fn extract_features(
    html: &str,
    url: &str,
    loader: Arc<dyn ArtifactLoader>,
) -> Result<FeatureVector> {
    extract_features_with_options(html, url, &Options::default(), loader)
}

/// Extracts the feature vector of a page with custom options.
///
/// # Example
///
/// ```rust
/// use std::sync::Arc;
/// use rs_http_features::{extract_features_with_options, Options, StaticArtifacts, Vocabulary, Result};
///
/// let loader = Arc::new(StaticArtifacts::new(
///     Vocabulary::from_terms(["login"]),
///     |batch: &[Vec<f64>]| -> Result<Vec<f64>> { Ok(vec![0.0; batch.len()]) },
/// ));
/// let options = Options {
///     tfidf_percent: 0.7,
///     ..Options::default()
/// };
///
/// let features = extract_features_with_options("<p>no title</p>", "https://a.com", &options, loader)?;
/// assert_eq!(features.len(), 15);
/// # Ok::<(), rs_http_features::Error>(())
/// ```
pub fn extract_features_with_options(
    html: &str,
    url: &str,
    options: &Options,
    loader: Arc<dyn ArtifactLoader>,
) -> Result<FeatureVector> {
    FeatureExtractor::with_options(html, url, options, loader).feature_vector()
}

/// Extracts the feature vector of a page given as raw bytes.
///
/// The character encoding is detected from `<meta charset>` or a
/// `Content-Type` meta declaration and defaults to UTF-8. Invalid sequences
/// become U+FFFD rather than errors.
///
/// # Example
///
/// ```rust
/// use std::sync::Arc;
/// use rs_http_features::{extract_features_bytes, Options, StaticArtifacts, Vocabulary, Result};
///
/// let loader = Arc::new(StaticArtifacts::new(
///     Vocabulary::from_terms(["caf\u{e9}"]),
///     |batch: &[Vec<f64>]| -> Result<Vec<f64>> { Ok(batch.iter().map(|v| v[0]).collect()) },
/// ));
/// let html = b"<meta charset=\"ISO-8859-1\"><title>Caf\xE9</title>";
///
/// let features = extract_features_bytes(html, "https://a.com", &Options::default(), loader)?;
/// assert_eq!(features.get("title_feature"), Some(1.0));
/// # Ok::<(), rs_http_features::Error>(())
/// ```
pub fn extract_features_bytes(
    html: &[u8],
    url: &str,
    options: &Options,
    loader: Arc<dyn ArtifactLoader>,
) -> Result<FeatureVector> {
    FeatureExtractor::from_bytes(html, url, options, loader).feature_vector()
}
