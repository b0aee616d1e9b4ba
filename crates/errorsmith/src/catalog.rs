//! Catalogs of error type descriptions.
//!
//! A catalog declares a whole error taxonomy in one TOML document, so that
//! every type can be built, and every malformed description rejected, at
//! startup:
//!
//! ```toml
//! [[error]]
//! name = "AuthenticationError"
//! arguments = ["timestamp"]
//!
//! [error.attributes]
//! status = 403
//! ```

use std::ops::Range;

use indexmap::IndexMap;
use serde::Deserialize;
use thiserror::Error;

use crate::{
    description::ErrorTypeDescription,
    error::{DefinitionError, ErrorCode},
    synthesize::ErrorType,
};

/// Failures while reading or building a catalog.
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("Failed to parse error catalog: {message}")]
    Parse {
        message: String,
        span: Option<Range<usize>>,
    },

    #[error("Error type '{name}' is defined more than once (entry #{index})")]
    DuplicateType { name: String, index: usize },

    #[error("Invalid definition for entry #{index}")]
    Definition {
        index: usize,
        #[source]
        source: DefinitionError,
    },
}

impl CatalogError {
    /// Returns the error code for this failure.
    pub fn code(&self) -> ErrorCode {
        match self {
            CatalogError::Parse { .. } => ErrorCode::E100,
            CatalogError::DuplicateType { .. } => ErrorCode::E101,
            CatalogError::Definition { source, .. } => source.code(),
        }
    }

    /// Returns the zero-based position of the offending entry, if any.
    pub fn index(&self) -> Option<usize> {
        match self {
            CatalogError::Parse { .. } => None,
            CatalogError::DuplicateType { index, .. } | CatalogError::Definition { index, .. } => {
                Some(*index)
            }
        }
    }
}

/// An ordered list of error type descriptions.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Catalog {
    #[serde(default, rename = "error")]
    descriptions: Vec<ErrorTypeDescription>,
}

impl Catalog {
    /// Creates a catalog from descriptions.
    pub fn new(descriptions: Vec<ErrorTypeDescription>) -> Self {
        Self { descriptions }
    }

    /// Parses a catalog from TOML source.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::Parse`] if the source is not valid TOML or
    /// does not have the catalog shape. Descriptions are not validated here.
    pub fn from_toml_str(source: &str) -> Result<Self, CatalogError> {
        toml::from_str(source).map_err(|err: toml::de::Error| CatalogError::Parse {
            message: err.message().to_string(),
            span: err.span(),
        })
    }

    /// Returns the descriptions, in file order.
    pub fn descriptions(&self) -> &[ErrorTypeDescription] {
        &self.descriptions
    }

    /// Appends a description.
    pub fn push(&mut self, description: ErrorTypeDescription) {
        self.descriptions.push(description);
    }

    /// Returns the number of descriptions.
    pub fn len(&self) -> usize {
        self.descriptions.len()
    }

    /// Returns `true` if the catalog has no descriptions.
    pub fn is_empty(&self) -> bool {
        self.descriptions.is_empty()
    }
}

/// Error types built from a catalog, indexed by name.
///
/// A registry is the result of one build; there is no global registry.
#[derive(Debug, Clone, Default)]
pub struct ErrorRegistry {
    types: IndexMap<String, ErrorType>,
}

impl ErrorRegistry {
    /// Adds `error_type` unless a type with the same name is present.
    ///
    /// Returns `false` if the name is already taken.
    pub(crate) fn insert(&mut self, error_type: ErrorType) -> bool {
        if self.types.contains_key(error_type.name()) {
            return false;
        }
        self.types.insert(error_type.name().to_string(), error_type);
        true
    }

    /// Returns the type named `name`.
    pub fn get(&self, name: &str) -> Option<&ErrorType> {
        self.types.get(name)
    }

    /// Returns all types, in catalog order.
    pub fn iter(&self) -> impl Iterator<Item = &ErrorType> {
        self.types.values()
    }

    /// Returns the number of types.
    pub fn len(&self) -> usize {
        self.types.len()
    }

    /// Returns `true` if the registry holds no types.
    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }
}

impl<'a> IntoIterator for &'a ErrorRegistry {
    type Item = &'a ErrorType;
    type IntoIter = indexmap::map::Values<'a, String, ErrorType>;

    fn into_iter(self) -> Self::IntoIter {
        self.types.values()
    }
}
