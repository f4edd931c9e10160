//! Error types for the test262 parser harness
//!
//! Only failures that abort a whole run live here. A subject rejecting or
//! crashing on a single test is an ordinary value (see [`crate::subject`]),
//! never an [`Error`].

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for the harness
#[derive(Error, Debug)]
pub enum Error {
    /// Reading or writing a corpus file, allowlist or config failed
    #[error("IOError: {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A corpus entry could not be turned into a test record
    #[error("CorpusError: {}: {message}", path.display())]
    Corpus { path: PathBuf, message: String },

    /// The harness configuration file is invalid
    #[error("ConfigError: {0}")]
    Config(String),

    /// The subject under test could not be set up
    #[error("SubjectError: {0}")]
    Subject(String),
}

impl Error {
    /// Wrap an I/O error with the path it happened on
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Error::Io {
            path: path.into(),
            source,
        }
    }

    /// Create a corpus error for a malformed test file
    pub fn corpus(path: impl Into<PathBuf>, message: impl Into<String>) -> Self {
        Error::Corpus {
            path: path.into(),
            message: message.into(),
        }
    }

    /// Create a configuration error
    pub fn config(message: impl Into<String>) -> Self {
        Error::Config(message.into())
    }
}

/// Result type alias for the harness
pub type Result<T> = std::result::Result<T, Error>;
