use std::io;
use std::path::PathBuf;

/// Failures surfaced by the note store. None of them terminate the process;
/// callers decide how to report them.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("could not load configuration file {}: {source}", path.display())]
    ConfigParse {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },

    #[error("could not serialize configuration: {0}")]
    ConfigSerialize(#[source] serde_yaml::Error),

    #[error("no target file selected")]
    MissingTarget,

    #[error("no such file {}, cannot display it", path.display())]
    TargetNotFound { path: PathBuf },

    #[error("no file matches {pattern}")]
    NoMatch { pattern: String },

    #[error("invalid pattern {pattern}: {source}")]
    InvalidPattern {
        pattern: String,
        #[source]
        source: regex::Error,
    },

    #[error("no previous daily in the last {days} days")]
    NoPreviousDaily { days: u32 },

    /// The note existed a moment ago but could not be read. Concurrent edits
    /// to the store are not guarded against.
    #[error("cannot read {}: {source}", path.display())]
    FileUnreadable {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("{}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("walking note store: {0}")]
    Walk(#[from] walkdir::Error),

    #[error("invalid date format {format:?}")]
    InvalidDateFormat { format: String },

    #[error("date offset {offset} days is out of range")]
    DateOutOfRange { offset: i64 },

    #[error("cannot determine home directory")]
    NoHomeDir,
}

impl StoreError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: io::Error) -> Self {
        StoreError::Io {
            path: path.into(),
            source,
        }
    }
}

pub type Result<T> = std::result::Result<T, StoreError>;
