//! Validation of error type descriptions.
//!
//! The validator checks a description in a fixed order and stops at the
//! first problem:
//!
//! 1. the error name,
//! 2. each attribute key and value, in insertion order,
//! 3. each argument name, in declaration order, including duplicate and
//!    attribute collision checks.
//!
//! A successful pass produces a [`ValidatedDescription`], the only input the
//! synthesizer accepts.

use std::collections::HashSet;

use indexmap::IndexMap;
use log::{debug, trace};

use errorsmith_core::{
    identifier::{Identifier, is_identifier},
    value::{AttributeValue, Value},
};

use crate::{
    description::ErrorTypeDescription,
    error::{ArgumentNameIssue, DefinitionError},
};

/// Returns `true` if `value` is a string usable as a name.
///
/// The string must follow the identifier grammar, carry no surrounding
/// whitespace, and must not be one of the reserved field names `message`
/// and `data`.
///
/// # Examples
///
/// ```
/// use errorsmith::validate::is_valid_identifier;
/// use errorsmith::value::Value;
///
/// assert!(is_valid_identifier(&Value::from("TestError")));
/// assert!(!is_valid_identifier(&Value::from("Test-Error")));
/// assert!(!is_valid_identifier(&Value::from(123)));
/// ```
pub fn is_valid_identifier(value: &Value) -> bool {
    value.as_str().is_some_and(is_identifier)
}

/// Returns `true` if `value` may be used as a fixed attribute value.
///
/// Strings, numbers and booleans are accepted. Non-empty strings must
/// themselves be valid identifiers.
///
/// # Examples
///
/// ```
/// use errorsmith::validate::is_valid_attribute_value;
/// use errorsmith::value::Value;
///
/// assert!(is_valid_attribute_value(&Value::from(403)));
/// assert!(is_valid_attribute_value(&Value::from("AUTH")));
/// assert!(!is_valid_attribute_value(&Value::from("hello world")));
/// assert!(!is_valid_attribute_value(&Value::from(vec![])));
/// ```
pub fn is_valid_attribute_value(value: &Value) -> bool {
    match value {
        Value::String(s) => s.is_empty() || is_identifier(s),
        Value::Number(_) | Value::Bool(_) => true,
        Value::Null | Value::List(_) | Value::Map(_) => false,
    }
}

/// A description that passed validation.
///
/// Fields hold validated identifiers and primitives; attribute order and
/// argument order are preserved from the description.
#[derive(Debug, Clone)]
pub(crate) struct ValidatedDescription {
    pub(crate) name: Identifier,
    pub(crate) attributes: IndexMap<Identifier, AttributeValue>,
    pub(crate) arguments: Vec<Identifier>,
}

/// Validates `description`, returning the first problem found.
///
/// # Errors
///
/// Returns a [`DefinitionError`] describing the first offending name or value.
pub(crate) fn validate(
    description: &ErrorTypeDescription,
) -> Result<ValidatedDescription, DefinitionError> {
    debug!(
        name:% = description.name(),
        attributes = description.attributes().len(),
        arguments = description.argument_names().len();
        "Validating error type description"
    );

    let name = as_identifier(description.name()).ok_or_else(|| DefinitionError::InvalidName {
        name: description.name().clone(),
    })?;

    let attributes = validate_attributes(description)?;
    let arguments = validate_arguments(description, &attributes)?;

    trace!(name:% = name; "Description is valid");

    Ok(ValidatedDescription {
        name,
        attributes,
        arguments,
    })
}

fn as_identifier(value: &Value) -> Option<Identifier> {
    value.as_str().and_then(|s| Identifier::new(s).ok())
}

fn validate_attributes(
    description: &ErrorTypeDescription,
) -> Result<IndexMap<Identifier, AttributeValue>, DefinitionError> {
    let mut attributes = IndexMap::with_capacity(description.attributes().len());

    for (key, value) in description.attributes() {
        let Ok(identifier) = Identifier::new(key) else {
            return Err(DefinitionError::InvalidAttributeName { name: key.clone() });
        };

        let attribute = AttributeValue::from_primitive(value)
            .filter(|_| is_valid_attribute_value(value))
            .ok_or_else(|| DefinitionError::InvalidAttributeValue {
                attribute: key.clone(),
                value: value.clone(),
            })?;

        trace!(key = key.as_str(), kind = attribute.type_name(); "Attribute accepted");
        attributes.insert(identifier, attribute);
    }

    Ok(attributes)
}

fn validate_arguments(
    description: &ErrorTypeDescription,
    attributes: &IndexMap<Identifier, AttributeValue>,
) -> Result<Vec<Identifier>, DefinitionError> {
    let mut seen: HashSet<Identifier> = HashSet::new();
    let mut arguments = Vec::with_capacity(description.argument_names().len());

    for name in description.argument_names() {
        let reject = |issue| DefinitionError::InvalidArgumentName {
            name: name.clone(),
            issue,
        };

        let identifier = as_identifier(name).ok_or_else(|| reject(ArgumentNameIssue::NotIdentifier))?;

        if seen.contains(&identifier) {
            return Err(reject(ArgumentNameIssue::DuplicateArgument));
        }
        if attributes.contains_key(identifier.as_str()) {
            return Err(reject(ArgumentNameIssue::AttributeCollision));
        }

        seen.insert(identifier.clone());
        arguments.push(identifier);
    }

    Ok(arguments)
}
