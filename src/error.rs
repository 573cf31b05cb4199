//! Error types for rs-http-features.
//!
//! Structural problems in the HTML never surface here: they degrade to
//! default feature values. Only the title classifier's artifacts can fail.

/// Which title-classifier artifact failed to load.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArtifactKind {
    /// Ordered TF-IDF term list.
    Vocabulary,
    /// Pretrained title classifier.
    Classifier,
}

impl std::fmt::Display for ArtifactKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Vocabulary => f.write_str("vocabulary"),
            Self::Classifier => f.write_str("classifier"),
        }
    }
}

/// Error type for feature extraction.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// A vocabulary or classifier artifact is missing or unreadable.
    #[error("failed to load {kind} artifact for {percent}%: {reason}")]
    ArtifactLoad {
        kind: ArtifactKind,
        percent: u8,
        reason: String,
    },

    /// The vocabulary file does not follow the two-line layout.
    #[error("invalid vocabulary: {0}")]
    InvalidVocabulary(String),

    /// The classifier rejected its input or produced no score.
    #[error("classifier failed: {0}")]
    Classifier(String),

    /// Underlying I/O failure.
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl Error {
    pub(crate) fn artifact(kind: ArtifactKind, percent: u8, reason: impl ToString) -> Self {
        Self::ArtifactLoad {
            kind,
            percent,
            reason: reason.to_string(),
        }
    }
}

/// Result type alias for extraction operations.
pub type Result<T> = std::result::Result<T, Error>;
