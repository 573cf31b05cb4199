//! Configuration options for feature extraction.

/// Default share of the TF-IDF vocabulary the title classifier was trained on.
pub const DEFAULT_TFIDF_PERCENT: f64 = 0.9;

/// Configuration options for feature extraction.
///
/// All fields are public for easy configuration. Use `Default::default()`
/// for standard settings.
///
/// # Example
///
/// ```rust
/// use rs_http_features::Options;
///
/// let options = Options {
///     tfidf_percent: 0.8,
///     ..Options::default()
/// };
/// assert_eq!(options.percent_key(), 80);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Options {
    /// Fraction of the TF-IDF vocabulary kept when the title classifier was
    /// trained. Selects which vocabulary/classifier pair is loaded.
    ///
    /// Values that are not finite or lie outside `(0, 1]` fall back to the
    /// default.
    ///
    /// Default: `0.9`
    pub tfidf_percent: f64,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            tfidf_percent: DEFAULT_TFIDF_PERCENT,
        }
    }
}

impl Options {
    /// Integer percentage used to key artifacts, e.g. `90` for `0.9`.
    #[must_use]
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    pub fn percent_key(&self) -> u8 {
        let pct = if self.tfidf_percent.is_finite()
            && self.tfidf_percent > 0.0
            && self.tfidf_percent <= 1.0
        {
            self.tfidf_percent
        } else {
            DEFAULT_TFIDF_PERCENT
        };
        // Truncating: 0.29 keys as 28, matching the artifact file names.
        (pct * 100.0).floor() as u8
    }
}
