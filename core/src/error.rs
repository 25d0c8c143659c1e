//! # Error Handling
//!
//! Provides the unified `AppError` enum returned by document builds.

use crate::model::Kind;
use derive_more::{Display, From};

/// The Global Error Enum.
///
/// We use `derive_more` for boilerplate.
/// Only `std::io::Error` converts implicitly; every other variant is built explicitly.
#[derive(Debug, Display, From)]
pub enum AppError {
    /// `materialize` was called on an object that does not carry the root marker.
    #[from(ignore)]
    #[display("Invalid root: a {_0} object cannot be materialized as a document")]
    InvalidRoot(Kind),

    /// The requested OpenAPI version is not one the factory can build.
    #[from(ignore)]
    #[display("Unsupported OpenAPI version: {_0}")]
    UnsupportedVersion(String),

    /// Rendering the document to JSON or YAML failed.
    #[from(ignore)]
    #[display("Serialization Error: {_0}")]
    Serialization(String),

    /// Wrapper for standard IO errors.
    #[display("IO Error: {_0}")]
    Io(std::io::Error),
}

/// Manual implementation of the standard Error trait.
impl std::error::Error for AppError {}

/// Helper type alias for Result using AppError.
pub type AppResult<T> = Result<T, AppError>;
