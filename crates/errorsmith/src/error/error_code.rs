//! Error codes for errorsmith failures.
//!
//! Error codes are organized by phase:
//! - `E0xx` - Definition errors (a single error type description)
//! - `E1xx` - Catalog errors (a file of descriptions)

use std::fmt;

/// Error codes for categorizing definition and catalog failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    // =========================================================================
    // Definition Errors (E0xx)
    // =========================================================================
    /// Invalid error name.
    ///
    /// The name of the error type is not an identifier, or is one of the
    /// reserved field names `message` and `data`.
    E001,

    /// Invalid attribute name.
    ///
    /// A fixed attribute key is not an identifier, or is reserved.
    E002,

    /// Invalid attribute value.
    ///
    /// A fixed attribute value is not a string, number or boolean, or is a
    /// string that is not itself an identifier.
    E003,

    /// Invalid argument name.
    ///
    /// An argument name is not an identifier, is reserved, is declared twice,
    /// or is already used by a fixed attribute.
    E004,

    // =========================================================================
    // Catalog Errors (E1xx)
    // =========================================================================
    /// Malformed catalog.
    ///
    /// The catalog file is not valid TOML or does not have the expected shape.
    E100,

    /// Duplicate error type.
    ///
    /// Two entries of the same catalog declare the same error name.
    E101,
}

impl ErrorCode {
    /// Returns the numeric code as a string (e.g., "E001").
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorCode::E001 => "E001",
            ErrorCode::E002 => "E002",
            ErrorCode::E003 => "E003",
            ErrorCode::E004 => "E004",
            ErrorCode::E100 => "E100",
            ErrorCode::E101 => "E101",
        }
    }

    /// Returns a short description of what this error code means.
    pub fn description(&self) -> &'static str {
        match self {
            ErrorCode::E001 => "invalid error name",
            ErrorCode::E002 => "invalid attribute name",
            ErrorCode::E003 => "invalid attribute value",
            ErrorCode::E004 => "invalid argument name",
            ErrorCode::E100 => "malformed catalog",
            ErrorCode::E101 => "duplicate error type",
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
