use crate::document::DocId;

pub type Result<T> = std::result::Result<T, SearchError>;

/// Broad failure classes callers can branch on without matching every variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    InvalidArgument,
    OutOfRange,
    NotFound,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SearchError {
    #[error("invalid document id {0}: ids must be non-negative")]
    NegativeDocumentId(DocId),

    #[error("document {0} is already indexed")]
    DuplicateDocument(DocId),

    #[error("word {0:?} contains control characters")]
    InvalidWord(String),

    #[error("stop word {0:?} contains control characters")]
    InvalidStopWord(String),

    /// Empty after stripping `-`, a double minus, or control characters.
    #[error("query word {0:?} is malformed")]
    MalformedQueryWord(String),

    #[error("position {index} is out of range for {count} documents")]
    PositionOutOfRange { index: usize, count: usize },

    #[error("document {0} not found")]
    DocumentNotFound(DocId),
}

impl SearchError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            SearchError::NegativeDocumentId(_)
            | SearchError::DuplicateDocument(_)
            | SearchError::InvalidWord(_)
            | SearchError::InvalidStopWord(_)
            | SearchError::MalformedQueryWord(_) => ErrorKind::InvalidArgument,
            SearchError::PositionOutOfRange { .. } => ErrorKind::OutOfRange,
            SearchError::DocumentNotFound(_) => ErrorKind::NotFound,
        }
    }
}
