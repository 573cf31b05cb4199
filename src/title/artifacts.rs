//! Title classifier artifacts.
//!
//! The vocabulary and the pretrained classifier are selected by the integer
//! TF-IDF percentage and reach the title feature through an
//! [`ArtifactLoader`], so tests and callers decide where they come from.
//! Both are immutable once loaded and shared behind `Arc`.

use std::collections::{HashMap, HashSet};
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, PoisonError, RwLock};

use tracing::debug;

use crate::error::{ArtifactKind, Error, Result};

// =============================================================================
// Vocabulary
// =============================================================================

/// Ordered TF-IDF term list.
///
/// Term positions are the classifier's input layout and must not be
/// reordered.
#[derive(Debug, Clone, PartialEq)]
pub struct Vocabulary {
    index: serde_json::Value,
    terms: Vec<String>,
}

impl Vocabulary {
    /// Vocabulary from terms, in classifier input order.
    #[must_use]
    pub fn from_terms<I, S>(terms: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            index: serde_json::Value::Null,
            terms: terms.into_iter().map(Into::into).collect(),
        }
    }

    /// Parse the two-line vocabulary file.
    ///
    /// The first line is a JSON positional index, kept as-is. The second is
    /// the term list separated by single spaces; runs of spaces produce empty
    /// terms that still hold a position.
    pub fn parse(text: &str) -> Result<Self> {
        let mut lines = text.lines();

        let index_line = lines
            .next()
            .ok_or_else(|| Error::InvalidVocabulary("missing index line".to_string()))?;
        let index = serde_json::from_str(index_line.trim_end())
            .map_err(|e| Error::InvalidVocabulary(format!("index line: {e}")))?;

        let term_line = lines
            .next()
            .ok_or_else(|| Error::InvalidVocabulary("missing term line".to_string()))?;
        let terms = term_line.trim_end().split(' ').map(str::to_string).collect();

        Ok(Self { index, terms })
    }

    /// Terms in classifier input order.
    #[must_use]
    pub fn terms(&self) -> &[String] {
        &self.terms
    }

    /// Positional index from the first line of the vocabulary file.
    #[must_use]
    pub fn index(&self) -> &serde_json::Value {
        &self.index
    }

    /// Number of terms, i.e. the classifier input width.
    #[must_use]
    pub fn len(&self) -> usize {
        self.terms.len()
    }

    /// Whether the vocabulary has no terms.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }

    /// 1.0 at every position whose term (lower-cased) is among `tokens`.
    #[must_use]
    pub fn binary_vector(&self, tokens: &HashSet<String>) -> Vec<f64> {
        self.terms
            .iter()
            .map(|term| {
                if tokens.contains(&term.to_lowercase()) {
                    1.0
                } else {
                    0.0
                }
            })
            .collect()
    }

    /// Occurrence count per term, matching terms exactly.
    ///
    /// Each occurrence increments the first position holding that term.
    #[must_use]
    pub fn term_counts<I>(&self, terms: I) -> Vec<u32>
    where
        I: IntoIterator<Item = String>,
    {
        let mut position: HashMap<&str, usize> = HashMap::with_capacity(self.terms.len());
        for (i, term) in self.terms.iter().enumerate() {
            position.entry(term.as_str()).or_insert(i);
        }

        let mut counts = vec![0; self.terms.len()];
        for term in terms {
            if let Some(&i) = position.get(term.as_str()) {
                counts[i] += 1;
            }
        }
        counts
    }
}

// =============================================================================
// Classifier
// =============================================================================

/// Pretrained title classifier.
///
/// Takes a batch of input vectors and returns one score per vector.
pub trait Classifier: Send + Sync {
    fn predict(&self, batch: &[Vec<f64>]) -> Result<Vec<f64>>;
}

impl<F> Classifier for F
where
    F: Fn(&[Vec<f64>]) -> Result<Vec<f64>> + Send + Sync,
{
    fn predict(&self, batch: &[Vec<f64>]) -> Result<Vec<f64>> {
        self(batch)
    }
}

// =============================================================================
// Loaders
// =============================================================================

/// Source of title classifier artifacts, keyed by integer percentage.
pub trait ArtifactLoader: Send + Sync {
    fn load_vocabulary(&self, percent: u8) -> Result<Arc<Vocabulary>>;
    fn load_classifier(&self, percent: u8) -> Result<Arc<dyn Classifier>>;
}

/// The same vocabulary and classifier for every percentage.
#[derive(Clone)]
pub struct StaticArtifacts {
    vocabulary: Arc<Vocabulary>,
    classifier: Arc<dyn Classifier>,
}

impl StaticArtifacts {
    pub fn new(vocabulary: Vocabulary, classifier: impl Classifier + 'static) -> Self {
        Self {
            vocabulary: Arc::new(vocabulary),
            classifier: Arc::new(classifier),
        }
    }
}

impl fmt::Debug for StaticArtifacts {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StaticArtifacts")
            .field("terms", &self.vocabulary.len())
            .finish_non_exhaustive()
    }
}

impl ArtifactLoader for StaticArtifacts {
    fn load_vocabulary(&self, _percent: u8) -> Result<Arc<Vocabulary>> {
        Ok(Arc::clone(&self.vocabulary))
    }

    fn load_classifier(&self, _percent: u8) -> Result<Arc<dyn Classifier>> {
        Ok(Arc::clone(&self.classifier))
    }
}

/// Decodes classifier artifact bytes.
pub type ClassifierDecoder = dyn Fn(&[u8]) -> Result<Arc<dyn Classifier>> + Send + Sync;

/// Loads artifacts from a directory using the training pipeline's names:
/// `tfidf2 {pct}% term` for the vocabulary and `tfidf-{pct}%-elm.model` for
/// the classifier.
///
/// The classifier file format is opaque here; its bytes go to the decoder
/// supplied at construction.
pub struct FsArtifactLoader {
    dir: PathBuf,
    decode: Box<ClassifierDecoder>,
}

impl FsArtifactLoader {
    pub fn new<F>(dir: impl Into<PathBuf>, decode: F) -> Self
    where
        F: Fn(&[u8]) -> Result<Arc<dyn Classifier>> + Send + Sync + 'static,
    {
        Self {
            dir: dir.into(),
            decode: Box::new(decode),
        }
    }

    /// Path of the vocabulary file for `percent`.
    #[must_use]
    pub fn vocabulary_path(&self, percent: u8) -> PathBuf {
        self.dir.join(format!("tfidf2 {percent}% term"))
    }

    /// Path of the classifier file for `percent`.
    #[must_use]
    pub fn classifier_path(&self, percent: u8) -> PathBuf {
        self.dir.join(format!("tfidf-{percent}%-elm.model"))
    }
}

impl fmt::Debug for FsArtifactLoader {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FsArtifactLoader")
            .field("dir", &self.dir)
            .finish_non_exhaustive()
    }
}

fn read(path: &Path, kind: ArtifactKind, percent: u8) -> Result<Vec<u8>> {
    fs::read(path).map_err(|e| Error::artifact(kind, percent, format!("{}: {e}", path.display())))
}

impl ArtifactLoader for FsArtifactLoader {
    fn load_vocabulary(&self, percent: u8) -> Result<Arc<Vocabulary>> {
        let path = self.vocabulary_path(percent);
        debug!(path = %path.display(), percent, "loading title vocabulary");

        let bytes = read(&path, ArtifactKind::Vocabulary, percent)?;
        let text = String::from_utf8(bytes)
            .map_err(|e| Error::artifact(ArtifactKind::Vocabulary, percent, e))?;
        let vocabulary = Vocabulary::parse(&text)
            .map_err(|e| Error::artifact(ArtifactKind::Vocabulary, percent, e))?;

        Ok(Arc::new(vocabulary))
    }

    fn load_classifier(&self, percent: u8) -> Result<Arc<dyn Classifier>> {
        let path = self.classifier_path(percent);
        debug!(path = %path.display(), percent, "loading title classifier");

        let bytes = read(&path, ArtifactKind::Classifier, percent)?;
        (self.decode)(&bytes).map_err(|e| Error::artifact(ArtifactKind::Classifier, percent, e))
    }
}

/// Loads each percentage at most once and shares the result.
///
/// Failures are not cached; the next call retries.
pub struct CachedArtifactLoader<L> {
    inner: L,
    vocabularies: SlotMap<Vocabulary>,
    classifiers: SlotMap<dyn Classifier>,
}

/// One slot per percentage. A slot's mutex is held while it loads, so
/// concurrent misses on the same key wait for a single load.
type Slot<T> = Arc<Mutex<Option<Arc<T>>>>;
type SlotMap<T> = RwLock<HashMap<u8, Slot<T>>>;

impl<L: ArtifactLoader> CachedArtifactLoader<L> {
    pub fn new(inner: L) -> Self {
        Self {
            inner,
            vocabularies: RwLock::new(HashMap::new()),
            classifiers: RwLock::new(HashMap::new()),
        }
    }

    /// The wrapped loader.
    pub fn inner(&self) -> &L {
        &self.inner
    }
}

fn slot<T: ?Sized>(cache: &SlotMap<T>, percent: u8) -> Slot<T> {
    if let Some(slot) = cache
        .read()
        .unwrap_or_else(PoisonError::into_inner)
        .get(&percent)
    {
        return Arc::clone(slot);
    }

    let mut cache = cache.write().unwrap_or_else(PoisonError::into_inner);
    Arc::clone(cache.entry(percent).or_default())
}

fn cached<T: ?Sized>(
    cache: &SlotMap<T>,
    percent: u8,
    load: impl FnOnce() -> Result<Arc<T>>,
) -> Result<Arc<T>> {
    let slot = slot(cache, percent);
    let mut entry = slot.lock().unwrap_or_else(PoisonError::into_inner);

    if let Some(hit) = entry.as_ref() {
        return Ok(Arc::clone(hit));
    }

    let loaded = load()?;
    *entry = Some(Arc::clone(&loaded));
    Ok(loaded)
}

impl<L: ArtifactLoader> ArtifactLoader for CachedArtifactLoader<L> {
    fn load_vocabulary(&self, percent: u8) -> Result<Arc<Vocabulary>> {
        cached(&self.vocabularies, percent, || self.inner.load_vocabulary(percent))
    }

    fn load_classifier(&self, percent: u8) -> Result<Arc<dyn Classifier>> {
        cached(&self.classifiers, percent, || self.inner.load_classifier(percent))
    }
}

impl<L: fmt::Debug> fmt::Debug for CachedArtifactLoader<L> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CachedArtifactLoader")
            .field("inner", &self.inner)
            .finish_non_exhaustive()
    }
}
