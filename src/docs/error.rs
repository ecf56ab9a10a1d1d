use std::path::PathBuf;

/// Errors raised while reading search data or building an index from it.
#[derive(Debug, thiserror::Error)]
pub enum SearchDataError {
    /// An entry is structurally invalid: no name, no anchors, or the wrong
    /// shape. `position` is the zero-based index of the entry in its input.
    #[error("malformed record #{position}: {reason}")]
    MalformedRecord { position: usize, reason: String },

    #[error("syntax error at byte {offset}: {message}")]
    Syntax { offset: usize, message: String },

    #[error("failed to read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error(transparent)]
    Json(#[from] serde_json::Error),

    /// Any of the above, raised while reading the named file.
    #[error("{}: {source}", .path.display())]
    InFile {
        path: PathBuf,
        #[source]
        source: Box<SearchDataError>,
    },
}

impl SearchDataError {
    pub(crate) fn malformed(position: usize, reason: impl Into<String>) -> Self {
        SearchDataError::MalformedRecord {
            position,
            reason: reason.into(),
        }
    }

    pub(crate) fn in_file(self, path: impl Into<PathBuf>) -> Self {
        SearchDataError::InFile {
            path: path.into(),
            source: Box::new(self),
        }
    }

    pub fn is_malformed_record(&self) -> bool {
        match self {
            SearchDataError::MalformedRecord { .. } => true,
            SearchDataError::InFile { source, .. } => source.is_malformed_record(),
            _ => false,
        }
    }
}

pub type Result<T> = std::result::Result<T, SearchDataError>;
