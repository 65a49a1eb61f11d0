//! Error types for the kbshelf application.
//!
//! This module defines custom error types that categorize the failures
//! that can occur while managing notes and bookmarks.

use std::{io, path::PathBuf};

use thiserror::Error;

/// The main error type for the kbshelf application.
#[derive(Error, Debug)]
pub enum ShelfError {
    /// A required form field was left blank.
    #[error("Missing required field: {field}")]
    MissingRequiredField { field: &'static str },

    /// The URL does not parse as an absolute URL with a host.
    #[error("Invalid URL: {url}")]
    InvalidUrl { url: String },

    /// No record with the given id exists in the collection.
    #[error("{kind} not found: {id}")]
    NotFound { kind: &'static str, id: String },

    /// Errors related to file I/O operations.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// Errors related to serialization/deserialization operations.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Errors related to configuration.
    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    /// Directory creation or access failed.
    #[error("Failed to create or access directory: {path}")]
    DirectoryError { path: PathBuf },

    /// file not found
    #[error("File not found: {file_path}")]
    FileNotFound { file_path: String },

    #[error("{message}")]
    EditorError { message: String },

    /// Generic application error with a custom message.
    #[error("{message}")]
    ApplicationError { message: String },
}

impl ShelfError {
    /// True for the errors produced by record validation.
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            ShelfError::MissingRequiredField { .. } | ShelfError::InvalidUrl { .. }
        )
    }
}
