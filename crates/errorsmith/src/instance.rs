//! Instances of generated error types.

use std::{backtrace::Backtrace, error::Error, fmt, sync::Arc};

use errorsmith_core::{
    identifier::RESERVED_FIELDS,
    value::{AttributeValue, Map, Value},
};

use crate::synthesize::ErrorType;

/// An error raised from a generated [`ErrorType`].
///
/// Implements [`std::error::Error`], so instances can be returned through
/// `Box<dyn Error + Send + Sync>` and recovered with `downcast_ref`.
pub struct ErrorInstance {
    kind: ErrorType,
    message: Option<String>,
    arguments: Vec<Option<Value>>,
    data: Arc<Map>,
    backtrace: Option<Backtrace>,
}

impl ErrorInstance {
    pub(crate) fn new(
        kind: ErrorType,
        message: Option<String>,
        arguments: Vec<Option<Value>>,
        data: Arc<Map>,
        backtrace: Option<Backtrace>,
    ) -> Self {
        Self {
            kind,
            message,
            arguments,
            data,
            backtrace,
        }
    }

    /// Returns the name of the error type.
    ///
    /// An attribute or argument called `name` is read through
    /// [`attribute`](Self::attribute) or [`argument`](Self::argument) and
    /// does not change this.
    pub fn name(&self) -> &str {
        self.kind.name()
    }

    /// Returns the message, if one was given.
    pub fn message(&self) -> Option<&str> {
        self.message.as_deref()
    }

    /// Returns the type this instance was constructed from.
    pub fn error_type(&self) -> &ErrorType {
        &self.kind
    }

    /// Returns `true` if this instance was constructed from `error_type`.
    pub fn is_instance_of(&self, error_type: &ErrorType) -> bool {
        self.kind == *error_type
    }

    /// Returns `true` if the name of this instance's type is `name`.
    ///
    /// Unlike [`is_instance_of`](Self::is_instance_of), this also matches
    /// instances of other types generated with the same name.
    pub fn is_kind(&self, name: &str) -> bool {
        self.name() == name
    }

    /// Returns the fixed attribute `name`.
    ///
    /// Fixed attributes are shared by all instances of a type.
    pub fn attribute(&self, name: &str) -> Option<&AttributeValue> {
        self.kind.attribute(name)
    }

    /// Returns the argument `name`, or `None` if it was not declared or not supplied.
    pub fn argument(&self, name: &str) -> Option<&Value> {
        let index = self.kind.argument_index(name)?;
        self.arguments.get(index).and_then(Option::as_ref)
    }

    /// Returns every declared argument with its value, in positional order.
    pub fn arguments(&self) -> impl Iterator<Item = (&str, Option<&Value>)> {
        self.kind
            .argument_names()
            .zip(self.arguments.iter().map(Option::as_ref))
    }

    /// Returns the auxiliary data payload.
    pub fn data(&self) -> &Map {
        &self.data
    }

    /// Returns the shared handle to the auxiliary data payload.
    pub fn shared_data(&self) -> &Arc<Map> {
        &self.data
    }

    /// Returns `true` if `name` is a field of this instance.
    ///
    /// Every instance has `name`, `message`, `data`, each fixed attribute and
    /// each declared argument, whether or not a value was supplied for it.
    pub fn has_field(&self, name: &str) -> bool {
        name == "name"
            || RESERVED_FIELDS.contains(&name)
            || self.kind.attribute_table().contains_key(name)
            || self.kind.argument_index(name).is_some()
    }

    /// Returns the backtrace captured at construction, if any.
    pub fn backtrace(&self) -> Option<&Backtrace> {
        self.backtrace.as_ref()
    }
}

impl fmt::Display for ErrorInstance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.message {
            Some(message) => write!(f, "{}: {}", self.name(), message),
            None => f.write_str(self.name()),
        }
    }
}

impl fmt::Debug for ErrorInstance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ErrorInstance")
            .field("name", &self.name())
            .field("message", &self.message)
            .field("attributes", self.kind.attribute_table())
            .field("arguments", &self.arguments().collect::<Vec<_>>())
            .field("data", &self.data)
            .finish_non_exhaustive()
    }
}

impl Error for ErrorInstance {}

/// Builder for [`ErrorInstance`]s.
///
/// Arguments are bound in the order [`arg`](Self::arg) is called.
///
/// # Examples
///
/// ```
/// use errorsmith::create_error_type;
/// use errorsmith::value::{Map, Value};
///
/// let rate_limited = create_error_type("RateLimited", [("status", 429)], ["retry_after"]).unwrap();
///
/// let mut data = Map::new();
/// data.insert("endpoint".to_string(), Value::from("/login"));
///
/// let err = rate_limited
///     .builder()
///     .message("slow down")
///     .arg(30)
///     .data(data)
///     .finish();
///
/// assert_eq!(err.argument("retry_after"), Some(&Value::from(30)));
/// assert_eq!(err.data()["endpoint"], Value::from("/login"));
/// ```
#[derive(Debug)]
pub struct InstanceBuilder {
    kind: ErrorType,
    message: Option<String>,
    args: Vec<Value>,
    data: Option<Arc<Map>>,
}

impl InstanceBuilder {
    pub(crate) fn new(kind: ErrorType) -> Self {
        Self {
            kind,
            message: None,
            args: Vec::new(),
            data: None,
        }
    }

    /// Sets the message.
    pub fn message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }

    /// Supplies the next positional argument.
    pub fn arg(mut self, value: impl Into<Value>) -> Self {
        self.args.push(value.into());
        self
    }

    /// Supplies several positional arguments, in order.
    pub fn args<I>(mut self, values: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<Value>,
    {
        self.args.extend(values.into_iter().map(Into::into));
        self
    }

    /// Sets the auxiliary data payload.
    ///
    /// Passing an `Arc<Map>` stores that exact allocation.
    pub fn data(mut self, data: impl Into<Arc<Map>>) -> Self {
        self.data = Some(data.into());
        self
    }

    /// Constructs the instance.
    pub fn finish(self) -> ErrorInstance {
        self.kind.construct(self.message, self.args, self.data)
    }
}
