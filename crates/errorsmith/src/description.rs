//! Declarative descriptions of error types.
//!
//! An [`ErrorTypeDescription`] is the unvalidated input of the factory. Its
//! fields are loosely typed so that descriptions read from configuration
//! files go through exactly the same validation as ones built in code.

use serde::Deserialize;

use errorsmith_core::value::{Map, Value};

/// Description of an error type: a name, fixed attributes and argument names.
///
/// # Examples
///
/// ```
/// use errorsmith::ErrorTypeDescription;
///
/// let description = ErrorTypeDescription::new("AuthenticationError")
///     .with_attribute("status", 403)
///     .with_argument("timestamp");
///
/// assert_eq!(description.attributes().len(), 1);
/// assert_eq!(description.argument_names().len(), 1);
/// ```
#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ErrorTypeDescription {
    /// Name of the error type.
    #[serde(default)]
    name: Value,

    /// Fixed attributes, in declaration order.
    #[serde(default)]
    attributes: Map,

    /// Names of the positional construction arguments, in order.
    #[serde(default, rename = "arguments")]
    argument_names: Vec<Value>,
}

impl ErrorTypeDescription {
    /// Creates a description with the given name, no attributes and no arguments.
    pub fn new(name: impl Into<Value>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    /// Adds a fixed attribute.
    ///
    /// Adding the same key twice replaces the earlier value but keeps its
    /// position.
    pub fn with_attribute(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.attributes.insert(key.into(), value.into());
        self
    }

    /// Appends a positional argument name.
    pub fn with_argument(mut self, name: impl Into<Value>) -> Self {
        self.argument_names.push(name.into());
        self
    }

    /// Appends several positional argument names, preserving their order.
    pub fn with_arguments<I>(mut self, names: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<Value>,
    {
        self.argument_names
            .extend(names.into_iter().map(Into::into));
        self
    }

    /// Returns the name of the error type.
    pub fn name(&self) -> &Value {
        &self.name
    }

    /// Returns the fixed attributes.
    pub fn attributes(&self) -> &Map {
        &self.attributes
    }

    /// Returns the argument names.
    pub fn argument_names(&self) -> &[Value] {
        &self.argument_names
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder_preserves_order() {
        let description = ErrorTypeDescription::new("TestError")
            .with_attribute("attr2", 2)
            .with_attribute("attr1", "one")
            .with_arguments(["arg1", "arg2"])
            .with_argument("arg3");

        assert_eq!(description.name(), &Value::from("TestError"));

        let keys: Vec<&str> = description.attributes().keys().map(String::as_str).collect();
        assert_eq!(keys, ["attr2", "attr1"]);

        let args: Vec<&str> = description
            .argument_names()
            .iter()
            .filter_map(Value::as_str)
            .collect();
        assert_eq!(args, ["arg1", "arg2", "arg3"]);
    }

    #[test]
    fn test_deserialize() {
        let description: ErrorTypeDescription = toml::from_str(
            r#"
            name = "AuthenticationError"
            arguments = ["timestamp"]

            [attributes]
            status = 403
            "#,
        )
        .expect("valid description");

        assert_eq!(description.name(), &Value::from("AuthenticationError"));
        assert_eq!(description.attributes()["status"], Value::from(403));
        assert_eq!(description.argument_names(), [Value::from("timestamp")]);
    }

    #[test]
    fn test_deserialize_defaults() {
        let description: ErrorTypeDescription = toml::from_str("").expect("empty description");

        assert_eq!(description.name(), &Value::Null);
        assert!(description.attributes().is_empty());
        assert!(description.argument_names().is_empty());
    }

    #[test]
    fn test_deserialize_rejects_unknown_fields() {
        let result: Result<ErrorTypeDescription, _> = toml::from_str("name = \"E\"\nargs = []");
        assert!(result.is_err());
    }
}
