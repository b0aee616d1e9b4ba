//! Synthesis of error types from validated descriptions.
//!
//! A generated [`ErrorType`] is a shared, read-only table holding the error
//! name, the fixed attributes and the ordered argument names. Instances are
//! built by a single generic initializer, [`ErrorType::construct`], that
//! binds positional arguments against that table.

use std::{fmt, sync::Arc};

use indexmap::IndexMap;
use log::{debug, trace};

use errorsmith_core::{
    identifier::Identifier,
    value::{AttributeValue, Map, Value},
};

use crate::{
    config::BacktracePolicy,
    instance::{ErrorInstance, InstanceBuilder},
    validate::ValidatedDescription,
};

/// The table captured by a generated error type.
pub(crate) struct TypeTable {
    pub(crate) name: Identifier,
    pub(crate) attributes: IndexMap<Identifier, AttributeValue>,
    pub(crate) arguments: Vec<Identifier>,
    pub(crate) backtrace: BacktracePolicy,
}

/// Builds a new error type from a validated description.
///
/// Every call returns a distinct type, even for identical descriptions.
pub(crate) fn synthesize(description: ValidatedDescription, backtrace: BacktracePolicy) -> ErrorType {
    let ValidatedDescription {
        name,
        attributes,
        arguments,
    } = description;

    debug!(
        name:% = name,
        attributes = attributes.len(),
        arguments = arguments.len(),
        backtrace:? = backtrace;
        "Synthesizing error type"
    );

    ErrorType {
        table: Arc::new(TypeTable {
            name,
            attributes,
            arguments,
            backtrace,
        }),
    }
}

/// A generated error type.
///
/// Cloning an `ErrorType` is cheap and yields a handle to the same type.
/// Equality is identity: two types generated from equal descriptions are
/// not equal.
///
/// # Examples
///
/// ```
/// use errorsmith::create_error_type;
///
/// let auth_error = create_error_type("AuthenticationError", [("status", 403)], ["timestamp"])
///     .expect("valid description");
///
/// assert_eq!(auth_error.name(), "AuthenticationError");
/// assert_eq!(auth_error.signature(), "AuthenticationError(message, timestamp, data)");
///
/// let err = auth_error.builder().message("token expired").arg(1_700_000_000).finish();
/// assert!(err.is_instance_of(&auth_error));
/// assert_eq!(err.to_string(), "AuthenticationError: token expired");
/// ```
#[derive(Clone)]
pub struct ErrorType {
    table: Arc<TypeTable>,
}

impl ErrorType {
    /// Returns the name of the error type.
    pub fn name(&self) -> &str {
        self.table.name.as_str()
    }

    /// Returns the fixed attributes, in declaration order.
    pub fn attributes(&self) -> impl Iterator<Item = (&str, &AttributeValue)> {
        self.table
            .attributes
            .iter()
            .map(|(key, value)| (key.as_str(), value))
    }

    /// Returns the fixed attribute `name`, if declared.
    pub fn attribute(&self, name: &str) -> Option<&AttributeValue> {
        self.table.attributes.get(name)
    }

    /// Returns the argument names, in positional order.
    pub fn argument_names(&self) -> impl Iterator<Item = &str> {
        self.table.arguments.iter().map(Identifier::as_str)
    }

    /// Returns the number of declared positional arguments.
    pub fn arity(&self) -> usize {
        self.table.arguments.len()
    }

    /// Returns the construction signature, e.g. `E(message, arg1, data)`.
    pub fn signature(&self) -> String {
        let mut params = vec!["message"];
        params.extend(self.argument_names());
        params.push("data");
        format!("{}({})", self.name(), params.join(", "))
    }

    /// Returns the backtrace policy of instances of this type.
    pub fn backtrace_policy(&self) -> BacktracePolicy {
        self.table.backtrace
    }

    /// Constructs an instance.
    ///
    /// `args` are bound by position to the declared argument names. Missing
    /// positions leave their field unset; surplus positions are ignored.
    /// A missing `data` payload defaults to an empty map; a given one is
    /// stored as is, without copying.
    pub fn construct<I>(&self, message: Option<String>, args: I, data: Option<Arc<Map>>) -> ErrorInstance
    where
        I: IntoIterator<Item = Value>,
    {
        let arity = self.arity();
        let mut args = args.into_iter();

        let mut bound: Vec<Option<Value>> = args.by_ref().take(arity).map(Some).collect();
        let supplied = bound.len();
        bound.resize(arity, None);

        let surplus = args.count();
        if surplus > 0 {
            debug!(name = self.name(), arity = arity, surplus = surplus; "Ignoring surplus positional arguments");
        }

        let data = data.unwrap_or_default();
        let backtrace = self.table.backtrace.capture();

        trace!(
            name = self.name(),
            supplied = supplied,
            has_message = message.is_some(),
            has_backtrace = backtrace.is_some();
            "Constructing error instance"
        );

        ErrorInstance::new(self.clone(), message, bound, data, backtrace)
    }

    /// Constructs an instance with only a message.
    pub fn new_error(&self, message: impl Into<String>) -> ErrorInstance {
        self.construct(Some(message.into()), std::iter::empty(), None)
    }

    /// Starts building an instance argument by argument.
    pub fn builder(&self) -> InstanceBuilder {
        InstanceBuilder::new(self.clone())
    }

    /// Returns `true` if `error` is an instance of this type.
    ///
    /// # Examples
    ///
    /// ```
    /// use std::error::Error;
    ///
    /// use errorsmith::ErrorTypeDescription;
    ///
    /// let factory = errorsmith::ErrorTypeFactory::default();
    /// let not_found = factory.create(&ErrorTypeDescription::new("NotFound")).unwrap();
    ///
    /// let boxed: Box<dyn Error + Send + Sync> = Box::new(not_found.new_error("missing"));
    /// assert!(not_found.matches(boxed.as_ref()));
    /// ```
    pub fn matches(&self, error: &(dyn std::error::Error + 'static)) -> bool {
        error
            .downcast_ref::<ErrorInstance>()
            .is_some_and(|instance| instance.is_instance_of(self))
    }

    /// Returns the argument index bound to `name`.
    pub(crate) fn argument_index(&self, name: &str) -> Option<usize> {
        self.table.arguments.iter().position(|arg| arg == name)
    }

    pub(crate) fn attribute_table(&self) -> &IndexMap<Identifier, AttributeValue> {
        &self.table.attributes
    }
}

impl PartialEq for ErrorType {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.table, &other.table)
    }
}

impl Eq for ErrorType {}

impl fmt::Debug for ErrorType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ErrorType")
            .field("name", &self.table.name)
            .field("attributes", &self.table.attributes)
            .field("arguments", &self.table.arguments)
            .finish()
    }
}

impl fmt::Display for ErrorType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{description::ErrorTypeDescription, validate::validate};

    fn make(description: ErrorTypeDescription) -> ErrorType {
        let validated = validate(&description).expect("valid description");
        synthesize(validated, BacktracePolicy::Disabled)
    }

    #[test]
    fn test_signature() {
        let error_type = make(ErrorTypeDescription::new("TestError"));
        assert_eq!(error_type.signature(), "TestError(message, data)");

        let error_type = make(ErrorTypeDescription::new("TestError").with_arguments(["a", "b"]));
        assert_eq!(error_type.signature(), "TestError(message, a, b, data)");
        assert_eq!(error_type.arity(), 2);
    }

    #[test]
    fn test_distinct_types_for_same_name() {
        let first = make(ErrorTypeDescription::new("TestError"));
        let second = make(ErrorTypeDescription::new("TestError"));

        assert_ne!(first, second);
        assert_eq!(first, first.clone());
    }

    #[test]
    fn test_attributes_preserve_order() {
        let error_type = make(
            ErrorTypeDescription::new("TestError")
                .with_attribute("z", 1)
                .with_attribute("a", 2),
        );

        let keys: Vec<&str> = error_type.attributes().map(|(key, _)| key).collect();
        assert_eq!(keys, ["z", "a"]);
        assert_eq!(error_type.attribute("a"), Some(&AttributeValue::Number(2.0)));
        assert_eq!(error_type.attribute("missing"), None);
    }

    #[test]
    fn test_construct_binds_by_position() {
        let error_type = make(ErrorTypeDescription::new("TestError").with_arguments(["a", "b", "c"]));
        let instance = error_type.construct(
            Some("msg".to_string()),
            [Value::from(1), Value::from("two")],
            None,
        );

        assert_eq!(instance.argument("a"), Some(&Value::from(1)));
        assert_eq!(instance.argument("b"), Some(&Value::from("two")));
        assert_eq!(instance.argument("c"), None);
        assert!(instance.has_field("c"));
    }

    #[test]
    fn test_construct_ignores_surplus() {
        let error_type = make(ErrorTypeDescription::new("TestError").with_argument("a"));
        let instance = error_type.construct(None, [Value::from(1), Value::from(2)], None);

        assert_eq!(instance.argument("a"), Some(&Value::from(1)));
        assert_eq!(instance.arguments().count(), 1);
    }

    #[test]
    fn test_argument_index() {
        let error_type = make(ErrorTypeDescription::new("TestError").with_arguments(["a", "b"]));
        assert_eq!(error_type.argument_index("b"), Some(1));
        assert_eq!(error_type.argument_index("z"), None);
    }
}
