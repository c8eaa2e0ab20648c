/*!
 * Error types for the docxlate library.
 *
 * This module contains custom error types for different parts of the application,
 * using the thiserror crate for ergonomic error definitions.
 */

use thiserror::Error;

/// Errors that can occur when talking to a translation provider
#[derive(Error, Debug)]
pub enum ProviderError {
    /// Error when making an API request fails
    #[error("API request failed: {0}")]
    RequestFailed(String),

    /// Error when parsing an API response fails
    #[error("Failed to parse API response: {0}")]
    ParseError(String),

    /// Error returned by the API itself
    #[error("API responded with error: {status_code} - {message}")]
    ApiError {
        /// HTTP status code
        status_code: u16,
        /// Error message from the API
        message: String,
    },

    /// Error establishing or maintaining a connection
    #[error("Connection error: {0}")]
    ConnectionError(String),

    /// Error related to rate limiting
    #[error("Rate limit exceeded: {0}")]
    RateLimitExceeded(String),

    /// Error with authentication
    #[error("Authentication error: {0}")]
    AuthenticationError(String),
}

/// Errors raised while loading, traversing or saving a document
#[derive(Error, Debug)]
pub enum DocumentError {
    /// The document file could not be read or written
    #[error("Document I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The document container is not valid JSON for the model
    #[error("Malformed document: {0}")]
    Malformed(#[from] serde_json::Error),

    /// The document changed shape between extraction and write-back
    #[error("Document structure changed: extracted {extracted} items, found {found} on write-back")]
    StructureChanged {
        /// Items seen at extraction time
        extracted: usize,
        /// Items seen when applying results
        found: usize,
    },
}

/// Errors raised while loading a glossary
#[derive(Error, Debug)]
pub enum GlossaryError {
    /// The glossary file could not be read
    #[error("Glossary I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The glossary is not readable CSV
    #[error("Glossary CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// A row carries a source term without a target term or vice versa
    #[error("Malformed glossary row at line {line}: both source and target terms are required")]
    MalformedRow {
        /// 1-based line of the offending row
        line: u64,
    },
}

/// Errors that abort a translation pipeline run
#[derive(Error, Debug)]
pub enum TranslationError {
    /// Error from the provider API
    #[error("Provider error: {0}")]
    Provider(#[from] ProviderError),

    /// Error with the document structure
    #[error("Document error: {0}")]
    Document(#[from] DocumentError),

    /// The provider returned a different number of texts than it was given
    #[error("Batch {batch} returned {actual} texts, expected {expected}")]
    BatchLengthMismatch {
        /// 1-based batch number
        batch: usize,
        /// Texts submitted
        expected: usize,
        /// Texts returned
        actual: usize,
    },
}

/// Main application error type that wraps all other errors
#[derive(Error, Debug)]
pub enum AppError {
    /// Error from a file operation
    #[error("File error: {0}")]
    File(String),

    /// Error from a provider
    #[error("Provider error: {0}")]
    Provider(#[from] ProviderError),

    /// Error from document handling
    #[error("Document error: {0}")]
    Document(#[from] DocumentError),

    /// Error from glossary loading
    #[error("Glossary error: {0}")]
    Glossary(#[from] GlossaryError),

    /// Error from translation
    #[error("Translation error: {0}")]
    Translation(#[from] TranslationError),

    /// Any other error
    #[error("Unknown error: {0}")]
    Unknown(String),
}

// Utility functions for error conversion
impl From<anyhow::Error> for AppError {
    fn from(error: anyhow::Error) -> Self {
        Self::Unknown(error.to_string())
    }
}

impl From<std::io::Error> for AppError {
    fn from(error: std::io::Error) -> Self {
        Self::File(error.to_string())
    }
}
