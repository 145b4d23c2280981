use std::io;
use std::path::Path as StdPath;

use serde::Deserialize;
use serde::Serialize;
use thiserror::Error;

/// Represents all possible errors in the describe-subtree crate.
///
/// Any of these aborts a description run. Output produced before the error
/// must be discarded by the caller.
#[derive(Error, Debug, Clone, Serialize, Deserialize, PartialEq, Hash, Eq)]
pub enum Error {
    /// A path could not be read, listed, or stat-ed during traversal or
    /// hashing.
    #[error("Failed to access {what}: {how}")]
    Access {
        /// The path that failed to be accessed.
        what: String,
        /// The reason for the failure.
        how: String,
    },

    /// A symbolic link could not be followed because its target is missing,
    /// the chain loops, or the chain is too long.
    #[error("Failed to follow symlink {what}: {how}")]
    Symlink {
        /// The link that failed to resolve.
        what: String,
        /// The reason for the failure.
        how: String,
    },

    /// A path cannot be represented in the output without escaping.
    #[error("Cannot represent path without escaping: {what}")]
    Encoding {
        /// Lossy rendering of the offending path.
        what: String,
    },

    /// Error indicating a failure to parse data.
    #[error("Failed to parse {what}: {how}")]
    Parse {
        /// The item that failed to be parse.
        what: String,
        /// The reason for the failure.
        how: String,
    },

    /// Error indicating an invalid argument was provided.
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// Error indicating a failure to write the description.
    #[error("Failed to write {what}: {how}")]
    Write {
        /// The sink that failed to be written.
        what: String,
        /// The reason for the failure.
        how: String,
    },

    /// Error indicating a failure to create a file or directory.
    #[error("Failed to create {what}: {how}")]
    Create {
        /// The item that failed to be created.
        what: String,
        /// The reason for the failure.
        how: String,
    },
}

impl Error {
    pub(crate) fn access(path: &StdPath, error: &io::Error) -> Self {
        Error::Access {
            what: path.display().to_string(),
            how: error.to_string(),
        }
    }

    pub(crate) fn symlink(path: &StdPath, how: impl Into<String>) -> Self {
        Error::Symlink {
            what: path.display().to_string(),
            how: how.into(),
        }
    }
}
