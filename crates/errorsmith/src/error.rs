//! Error types for errorsmith operations.
//!
//! - [`DefinitionError`] rejects a single error type description.
//! - [`CatalogError`](crate::catalog::CatalogError) rejects a catalog of descriptions.
//! - [`ErrorsmithError`] is the top-level error used by applications that
//!   load catalogs from disk.
//!
//! Every definition and catalog failure carries an [`ErrorCode`].

mod definition;
mod error_code;

pub use definition::{ArgumentNameIssue, DefinitionError};
pub use error_code::ErrorCode;

use std::io;

use thiserror::Error;

use crate::catalog::CatalogError;

/// The main error type for errorsmith operations that touch the outside world.
#[derive(Debug, Error)]
pub enum ErrorsmithError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("{err}")]
    Catalog { err: CatalogError, src: String },
}

impl ErrorsmithError {
    /// Create a new `Catalog` error with the associated catalog source.
    pub fn new_catalog_error(err: CatalogError, src: impl Into<String>) -> Self {
        Self::Catalog {
            err,
            src: src.into(),
        }
    }
}
