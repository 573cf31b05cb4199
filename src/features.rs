//! Feature extraction over a captured page.
//!
//! [`FeatureExtractor`] wraps a [`Document`] with the options and artifact
//! loader the title feature needs. Each feature is a method; the fixed
//! order of the output vector is defined in [`crate::result`].

use std::fs;
use std::path::Path;
use std::sync::Arc;

use tracing::{debug, trace};

use crate::document::Document;
use crate::domain_ratio::{concentration_rate, null_rate, NullPolicy};
use crate::encoding::transcode_to_utf8;
use crate::error::Result;
use crate::options::Options;
use crate::patterns::BASE64_REDIRECT;
use crate::result::{flag, FeatureVector, FEATURE_COUNT};
use crate::title::{ArtifactLoader, TitleClassifier};
use crate::url_utils::RegistrableDomain;

/// Number of features that need no artifacts.
pub const STRUCTURAL_FEATURE_COUNT: usize = FEATURE_COUNT - 1;

/// Computes classifier features for one page.
///
/// Construction does all parsing and scanning up front; feature methods
/// only read. The title feature loads artifacts lazily through the loader.
///
/// # Example
///
/// ```rust
/// use std::sync::Arc;
/// use rs_http_features::{FeatureExtractor, StaticArtifacts, Vocabulary, Result};
///
/// let loader = StaticArtifacts::new(
///     Vocabulary::from_terms(["login"]),
///     |batch: &[Vec<f64>]| -> Result<Vec<f64>> { Ok(batch.iter().map(|v| v[0]).collect()) },
/// );
/// let html = "<title>Login</title><form><input type=submit></form>";
/// let page = FeatureExtractor::new(html, "https://example.com/", Arc::new(loader));
///
/// assert_eq!(page.is_form(), 1.0);
/// assert_eq!(page.is_input_submit(), 1.0);
/// assert_eq!(page.title_feature()?, 1.0);
/// # Ok::<(), rs_http_features::Error>(())
/// ```
#[derive(Debug, Clone)]
pub struct FeatureExtractor {
    document: Document,
    options: Options,
    title: TitleClassifier,
}

impl FeatureExtractor {
    /// Extract from page text with default options.
    #[must_use]
    pub fn new(html: &str, url: &str, loader: Arc<dyn ArtifactLoader>) -> Self {
        Self::with_options(html, url, &Options::default(), loader)
    }

    /// Extract from page text.
    #[must_use]
    pub fn with_options(
        html: &str,
        url: &str,
        options: &Options,
        loader: Arc<dyn ArtifactLoader>,
    ) -> Self {
        let document = Document::parse(html, url);
        debug!(
            url = document.url(),
            bytes = html.len(),
            parsed = document.is_parsed(),
            percent = options.percent_key(),
            "extracting page features"
        );

        Self {
            document,
            options: options.clone(),
            title: TitleClassifier::new(loader, options.percent_key()),
        }
    }

    /// Extract from raw response bytes, transcoding by the declared charset.
    #[must_use]
    pub fn from_bytes(
        bytes: &[u8],
        url: &str,
        options: &Options,
        loader: Arc<dyn ArtifactLoader>,
    ) -> Self {
        let html = transcode_to_utf8(bytes);
        Self::with_options(&html, url, options, loader)
    }

    /// Extract from a saved capture on disk.
    pub fn from_file(
        path: impl AsRef<Path>,
        url: &str,
        options: &Options,
        loader: Arc<dyn ArtifactLoader>,
    ) -> Result<Self> {
        let bytes = fs::read(path)?;
        Ok(Self::from_bytes(&bytes, url, options, loader))
    }

    /// Merge with another capture of the same logical page.
    ///
    /// Neither input changes. Node sets are concatenated and counters
    /// summed; the URL, domain, options and loader come from `self`.
    #[must_use]
    pub fn combine(&self, other: &Self) -> Self {
        Self {
            document: self.document.combine(&other.document),
            options: self.options.clone(),
            title: self.title.clone(),
        }
    }

    /// Copy attributed to another source URL.
    #[must_use]
    pub fn with_url(&self, url: &str) -> Self {
        Self {
            document: self.document.with_url(url),
            ..self.clone()
        }
    }

    /// Underlying document.
    #[must_use]
    pub fn document(&self) -> &Document {
        &self.document
    }

    /// Options in effect.
    #[must_use]
    pub fn options(&self) -> &Options {
        &self.options
    }

    /// Source URL.
    #[must_use]
    pub fn url(&self) -> &str {
        self.document.url()
    }

    /// Registrable domain of the source URL.
    #[must_use]
    pub fn domain(&self) -> &RegistrableDomain {
        self.document.domain()
    }

    /// Byte-value counts of the raw text; empty when the page has no markup.
    #[must_use]
    pub fn byte_distribution(&self) -> &[u64] {
        self.document.byte_distribution()
    }

    // === Counts ===

    /// Number of `<iframe>` and `<frame>` elements.
    #[must_use]
    pub fn frame_count(&self) -> usize {
        self.document.frames().len()
    }

    /// Number of refresh `<meta>` elements.
    #[must_use]
    pub fn redirect_count(&self) -> usize {
        self.document.redirects().len()
    }

    /// Number of elements with `type="submit"`.
    #[must_use]
    pub fn submit_count(&self) -> usize {
        self.document.submits().len()
    }

    /// Whether any element declares `type="submit"`.
    #[must_use]
    pub fn is_submit(&self) -> bool {
        self.submit_count() > 0
    }

    /// Whether any refresh `<meta>` is present, base64 or not.
    #[must_use]
    pub fn is_redirect(&self) -> bool {
        self.redirect_count() > 0
    }

    // === Features ===

    /// Page size in kilobytes.
    #[must_use]
    pub fn kbytes(&self) -> f64 {
        self.document.line_stats().kbytes()
    }

    /// 1.0 when the page embeds any frame.
    #[must_use]
    pub fn is_frame(&self) -> f64 {
        flag(self.frame_count() > 0)
    }

    /// Refresh redirect present, and none of them base64.
    #[must_use]
    pub fn is_meta_redirect(&self) -> f64 {
        flag(self.is_redirect() && !self.has_base64_redirect())
    }

    /// 1.0 when any refresh `content` mentions base64, in any case.
    #[must_use]
    pub fn is_meta_base64_redirect(&self) -> f64 {
        flag(self.has_base64_redirect())
    }

    fn has_base64_redirect(&self) -> bool {
        self.document
            .redirects()
            .iter()
            .any(|m| m.attr("content").is_some_and(|c| BASE64_REDIRECT.is_match(c)))
    }

    /// 1.0 when the page has a `<form>`.
    #[must_use]
    pub fn is_form(&self) -> f64 {
        flag(!self.document.forms().is_empty())
    }

    /// 1.0 when a submit control is an `<input>`.
    #[must_use]
    pub fn is_input_submit(&self) -> f64 {
        flag(self.has_submit_tag("input"))
    }

    /// 1.0 when a submit control is a `<button>`.
    #[must_use]
    pub fn is_button_submit(&self) -> f64 {
        flag(self.has_submit_tag("button"))
    }

    fn has_submit_tag(&self, tag: &str) -> bool {
        self.document.submits().iter().any(|e| e.tag() == tag)
    }

    /// Share of scripts loaded from the most-used external domain.
    #[must_use]
    pub fn same_extern_domain_script_rate(&self) -> f64 {
        concentration_rate(
            self.document.scripts(),
            "src",
            NullPolicy::Bare,
            self.domain(),
        )
    }

    /// Share of lines inside `<script>` blocks.
    #[must_use]
    pub fn script_block_rate(&self) -> f64 {
        self.document.line_stats().script_block_rate()
    }

    /// Share of lines inside `<style>` blocks.
    #[must_use]
    pub fn style_block_rate(&self) -> f64 {
        self.document.line_stats().style_block_rate()
    }

    /// Share of anchors pointing at the most-linked external domain.
    #[must_use]
    pub fn external_a_tag_same_domain(&self) -> f64 {
        concentration_rate(
            self.document.anchors(),
            "href",
            NullPolicy::Bare,
            self.domain(),
        )
    }

    /// Share of anchors that go nowhere: no `href`, empty, a fragment, or a
    /// `javascript:void(...)` target.
    #[must_use]
    pub fn null_a_tag(&self) -> f64 {
        null_rate(self.document.anchors(), "href", NullPolicy::Void)
    }

    /// Share of `<link>` elements pointing at the most-used external domain.
    #[must_use]
    pub fn same_external_domain_link_rate(&self) -> f64 {
        concentration_rate(
            self.document.links(),
            "href",
            NullPolicy::Bare,
            self.domain(),
        )
    }

    /// Images count as null only when `src` is missing.
    #[must_use]
    pub fn same_external_domain_img_rate(&self) -> f64 {
        concentration_rate(
            self.document.images(),
            "src",
            NullPolicy::Absent,
            self.domain(),
        )
    }

    /// Title classifier score; 0 without a title.
    ///
    /// # Errors
    ///
    /// Returns an error when the page has a title and the vocabulary or
    /// classifier cannot be loaded, or the classifier fails.
    pub fn title_feature(&self) -> Result<f64> {
        self.title.score(self.document.titles())
    }

    /// Term frequencies of the title over the vocabulary, case preserved.
    ///
    /// # Errors
    ///
    /// Returns an error when the vocabulary cannot be loaded.
    pub fn title_term_counts(&self) -> Result<Vec<u32>> {
        self.title.term_counts(self.document.titles())
    }

    /// Every feature except the title score, in vector order.
    #[must_use]
    pub fn structural_features(&self) -> [f64; STRUCTURAL_FEATURE_COUNT] {
        let values = [
            self.kbytes(),
            self.is_frame(),
            self.is_meta_redirect(),
            self.is_meta_base64_redirect(),
            self.is_form(),
            self.is_input_submit(),
            self.is_button_submit(),
            self.same_extern_domain_script_rate(),
            self.script_block_rate(),
            self.style_block_rate(),
            self.external_a_tag_same_domain(),
            self.null_a_tag(),
            self.same_external_domain_link_rate(),
            self.same_external_domain_img_rate(),
        ];
        trace!(?values, "structural features");
        values
    }

    /// The full feature vector.
    ///
    /// # Errors
    ///
    /// Fails only through [`title_feature`](Self::title_feature).
    pub fn feature_vector(&self) -> Result<FeatureVector> {
        let mut values = [0.0; FEATURE_COUNT];
        values[..STRUCTURAL_FEATURE_COUNT].copy_from_slice(&self.structural_features());
        values[STRUCTURAL_FEATURE_COUNT] = self.title_feature()?;
        Ok(FeatureVector::new(values))
    }
}
