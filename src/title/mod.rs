//! Title classifier feature.
//!
//! The page title is split into terms, mapped onto a binary bag-of-terms
//! vector over a fixed vocabulary, and scored by a pretrained classifier.
//! A page without a title scores exactly 0 and never touches the artifacts.

mod artifacts;
mod tokenize;

use std::collections::HashSet;
use std::fmt;
use std::sync::Arc;

use tracing::trace;

use crate::error::{Error, Result};

pub use artifacts::{
    ArtifactLoader, CachedArtifactLoader, Classifier, ClassifierDecoder, FsArtifactLoader,
    StaticArtifacts, Vocabulary,
};
pub use tokenize::tokenize;

/// Scores page titles with the classifier selected by `percent`.
#[derive(Clone)]
pub struct TitleClassifier {
    loader: Arc<dyn ArtifactLoader>,
    percent: u8,
}

impl TitleClassifier {
    pub fn new(loader: Arc<dyn ArtifactLoader>, percent: u8) -> Self {
        Self { loader, percent }
    }

    /// Artifact percentage key.
    #[must_use]
    pub fn percent(&self) -> u8 {
        self.percent
    }

    /// Classifier input vector for `titles`.
    pub fn vectorize(&self, titles: &[String]) -> Result<Vec<f64>> {
        let vocabulary = self.loader.load_vocabulary(self.percent)?;
        let tokens: HashSet<String> = tokenize(titles).into_iter().collect();
        Ok(vocabulary.binary_vector(&tokens))
    }

    /// Title feature: 0 without a title, otherwise the classifier score.
    ///
    /// A title with no vocabulary hit is still scored on an all-zero vector.
    pub fn score(&self, titles: &[String]) -> Result<f64> {
        if titles.is_empty() {
            return Ok(0.0);
        }

        let vector = self.vectorize(titles)?;
        let classifier = self.loader.load_classifier(self.percent)?;
        let scores = classifier.predict(&[vector])?;

        let score = scores
            .first()
            .copied()
            .ok_or_else(|| Error::Classifier("no score returned".to_string()))?;
        trace!(score, percent = self.percent, "title scored");
        Ok(score)
    }

    /// Raw term frequencies of `titles` over the vocabulary.
    ///
    /// Terms are matched with their original letter case. All zeros when
    /// there is no title.
    pub fn term_counts(&self, titles: &[String]) -> Result<Vec<u32>> {
        let vocabulary = self.loader.load_vocabulary(self.percent)?;
        Ok(vocabulary.term_counts(tokenize::raw_terms(titles)))
    }
}

impl fmt::Debug for TitleClassifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TitleClassifier")
            .field("percent", &self.percent)
            .finish_non_exhaustive()
    }
}
