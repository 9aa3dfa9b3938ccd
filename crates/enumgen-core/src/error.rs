//! Error types for the enumgen-core library.
//!
//! This module provides error handling using the `thiserror` crate, with one
//! variant per failure mode a generator invocation can hit.

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for enumgen operations
pub type Result<T> = std::result::Result<T, Error>;

/// Error type for all enumgen operations
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum Error {
    /// Failed to read input file
    #[error("failed to read file '{path}': {source}")]
    FileRead {
        /// Path to the file that failed to read
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// Failed to write output file
    #[error("failed to write file '{path}': {source}")]
    FileWrite {
        /// Path to the file that failed to write
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// Failed to create output directory
    #[error("failed to create directory '{path}': {source}")]
    DirectoryCreate {
        /// Path to the directory that failed to create
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// The enumeration spec document could not be parsed
    #[error("invalid enumeration spec '{path}': {source}")]
    SpecParse {
        /// Path of the spec document
        path: PathBuf,
        /// Underlying YAML error (includes missing required keys)
        #[source]
        source: serde_yaml::Error,
    },

    /// Input path has no final segment to derive artifact names from
    #[error("cannot derive artifact names from '{path}'")]
    InvalidInputPath {
        /// The offending path
        path: PathBuf,
    },
}

impl Error {
    /// Creates a new file read error
    pub fn file_read(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::FileRead {
            path: path.into(),
            source,
        }
    }

    /// Creates a new file write error
    pub fn file_write(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::FileWrite {
            path: path.into(),
            source,
        }
    }

    /// Creates a new directory creation error
    pub fn directory_create(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::DirectoryCreate {
            path: path.into(),
            source,
        }
    }

    /// Creates a new spec parse error
    pub fn spec_parse(path: impl Into<PathBuf>, source: serde_yaml::Error) -> Self {
        Self::SpecParse {
            path: path.into(),
            source,
        }
    }

    /// Creates a new invalid input path error
    pub fn invalid_input_path(path: impl Into<PathBuf>) -> Self {
        Self::InvalidInputPath { path: path.into() }
    }

    /// Returns true if the failure happened before any artifact was touched
    pub fn is_input_error(&self) -> bool {
        matches!(
            self,
            Self::FileRead { .. } | Self::SpecParse { .. } | Self::InvalidInputPath { .. }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = Error::invalid_input_path("/");
        assert!(err.to_string().contains("cannot derive artifact names"));

        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "gone");
        let err = Error::file_read("colors.yaml", io);
        assert!(err.to_string().contains("colors.yaml"));
        assert!(err.to_string().contains("gone"));
    }

    #[test]
    fn test_is_input_error() {
        let io = std::io::Error::new(std::io::ErrorKind::Other, "x");
        assert!(Error::file_read("a", io).is_input_error());

        let io = std::io::Error::new(std::io::ErrorKind::Other, "x");
        assert!(!Error::file_write("a", io).is_input_error());
    }
}
