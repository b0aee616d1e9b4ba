//! The [`DefinitionError`] taxonomy returned when a description is rejected.

use std::fmt;

use thiserror::Error;

use errorsmith_core::{identifier::check_identifier, value::Value};

use crate::error::ErrorCode;

/// Why an argument name was rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArgumentNameIssue {
    /// The name is not an identifier or is reserved.
    NotIdentifier,
    /// An earlier argument has the same name.
    DuplicateArgument,
    /// A fixed attribute has the same name.
    AttributeCollision,
}

impl fmt::Display for ArgumentNameIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ArgumentNameIssue::NotIdentifier => Ok(()),
            ArgumentNameIssue::DuplicateArgument => f.write_str(" already used as argument"),
            ArgumentNameIssue::AttributeCollision => f.write_str(" already used as attribute"),
        }
    }
}

/// A rejected error type description.
///
/// Validation stops at the first problem, so a `DefinitionError` always
/// describes exactly one offending name or value.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum DefinitionError {
    #[error("Invalid error name '{name}'")]
    InvalidName { name: Value },

    #[error("Invalid attribute name '{name}'")]
    InvalidAttributeName { name: String },

    #[error("Invalid attribute value '{value}'")]
    InvalidAttributeValue { attribute: String, value: Value },

    #[error("Invalid argument name '{name}'{issue}")]
    InvalidArgumentName {
        name: Value,
        issue: ArgumentNameIssue,
    },
}

impl DefinitionError {
    /// Returns the error code for this failure.
    pub fn code(&self) -> ErrorCode {
        match self {
            DefinitionError::InvalidName { .. } => ErrorCode::E001,
            DefinitionError::InvalidAttributeName { .. } => ErrorCode::E002,
            DefinitionError::InvalidAttributeValue { .. } => ErrorCode::E003,
            DefinitionError::InvalidArgumentName { .. } => ErrorCode::E004,
        }
    }

    /// Returns a suggestion for fixing the offending name or value.
    pub fn help(&self) -> String {
        match self {
            DefinitionError::InvalidName { name } => identifier_help(name),
            DefinitionError::InvalidAttributeName { name } => {
                identifier_help(&Value::String(name.clone()))
            }
            DefinitionError::InvalidAttributeValue { value, .. } => match value {
                Value::String(_) => format!(
                    "string attribute values must be identifiers: {}",
                    identifier_help(value)
                ),
                other => format!(
                    "attribute values must be strings, numbers or booleans, found {}",
                    other.type_name()
                ),
            },
            DefinitionError::InvalidArgumentName { name, issue } => match issue {
                ArgumentNameIssue::NotIdentifier => identifier_help(name),
                ArgumentNameIssue::DuplicateArgument => {
                    "each argument name may be declared only once".to_string()
                }
                ArgumentNameIssue::AttributeCollision => {
                    "rename either the argument or the attribute".to_string()
                }
            },
        }
    }
}

fn identifier_help(value: &Value) -> String {
    match value {
        Value::String(name) => match check_identifier(name) {
            Err(err) => format!("{err}; {}", err.help()),
            Ok(()) => "expected an identifier".to_string(),
        },
        other => format!("expected a string, found {}", other.type_name()),
    }
}
