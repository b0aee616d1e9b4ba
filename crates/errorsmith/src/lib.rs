//! errorsmith - Named error types built at runtime from declarative descriptions.
//!
//! A description names an error type, gives it fixed attributes that every
//! instance carries, and declares the positional arguments supplied when an
//! error is raised. The factory validates the description and returns a new
//! [`ErrorType`] whose instances implement [`std::error::Error`].
//!
//! Invalid descriptions are rejected when the type is defined, never when an
//! error is raised.
//!
//! # Examples
//!
//! ```
//! use errorsmith::create_error_type;
//! use errorsmith::value::{AttributeValue, Value};
//!
//! let error_type = create_error_type("E", [("a", 1)], ["b"]).unwrap();
//! let err = error_type.builder().message("msg").arg(2).finish();
//!
//! assert_eq!(err.name(), "E");
//! assert_eq!(err.message(), Some("msg"));
//! assert_eq!(err.attribute("a"), Some(&AttributeValue::Number(1.0)));
//! assert_eq!(err.argument("b"), Some(&Value::from(2)));
//! assert!(err.data().is_empty());
//! ```

pub mod catalog;
pub mod config;
pub mod validate;

mod description;
mod error;
mod instance;
mod synthesize;

pub use errorsmith_core::{identifier, value};

pub use catalog::{Catalog, CatalogError, ErrorRegistry};
pub use description::ErrorTypeDescription;
pub use error::{ArgumentNameIssue, DefinitionError, ErrorCode, ErrorsmithError};
pub use instance::{ErrorInstance, InstanceBuilder};
pub use synthesize::ErrorType;

use log::{debug, info};

use config::FactoryConfig;
use errorsmith_core::value::Value;

/// Factory for error types.
///
/// The factory holds no state besides its configuration: every call to
/// [`create`](Self::create) returns a brand-new type.
///
/// # Examples
///
/// ```
/// use errorsmith::{ErrorTypeDescription, ErrorTypeFactory, config::FactoryConfig};
///
/// let factory = ErrorTypeFactory::new(FactoryConfig::default());
///
/// let auth_error = factory
///     .create(
///         &ErrorTypeDescription::new("AuthenticationError")
///             .with_attribute("status", 403)
///             .with_argument("timestamp"),
///     )
///     .expect("valid description");
///
/// assert_eq!(auth_error.arity(), 1);
/// ```
#[derive(Debug, Clone, Default)]
pub struct ErrorTypeFactory {
    config: FactoryConfig,
}

impl ErrorTypeFactory {
    /// Create a new factory with the given configuration.
    ///
    /// # Arguments
    ///
    /// * `config` - Settings applied to every generated type
    pub fn new(config: FactoryConfig) -> Self {
        Self { config }
    }

    /// Returns the factory configuration.
    pub fn config(&self) -> &FactoryConfig {
        &self.config
    }

    /// Validates `description` and builds a new error type from it.
    ///
    /// # Errors
    ///
    /// Returns the first [`DefinitionError`] found in the description. No
    /// type is produced on failure.
    pub fn create(&self, description: &ErrorTypeDescription) -> Result<ErrorType, DefinitionError> {
        let validated = validate::validate(description)?;
        Ok(synthesize::synthesize(validated, self.config.backtrace()))
    }

    /// Builds every type of `catalog`, in order.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::Definition`] for the first invalid
    /// description, or [`CatalogError::DuplicateType`] when two descriptions
    /// share a name.
    pub fn create_catalog(&self, catalog: &Catalog) -> Result<ErrorRegistry, CatalogError> {
        info!(entries = catalog.len(); "Building error catalog");

        let mut registry = ErrorRegistry::default();
        for (index, description) in catalog.descriptions().iter().enumerate() {
            let error_type = self
                .create(description)
                .map_err(|source| CatalogError::Definition { index, source })?;

            let name = error_type.name().to_string();
            if !registry.insert(error_type) {
                return Err(CatalogError::DuplicateType { name, index });
            }

            debug!(index = index, name = name.as_str(); "Registered error type");
        }

        info!(types = registry.len(); "Error catalog built");
        Ok(registry)
    }
}

/// Creates a new error type with the default factory configuration.
///
/// # Arguments
///
/// * `name` - Name of the error type
/// * `attributes` - Fixed attributes, as key/value pairs
/// * `argument_names` - Names of the positional construction arguments
///
/// # Errors
///
/// Returns [`DefinitionError`] if the name, an attribute or an argument
/// name is invalid.
///
/// # Examples
///
/// ```
/// use errorsmith::create_error_type;
///
/// let err = create_error_type("Test-Error", Vec::<(&str, i32)>::new(), Vec::<&str>::new())
///     .unwrap_err();
/// assert_eq!(err.to_string(), "Invalid error name 'Test-Error'");
/// ```
pub fn create_error_type<A, K, V, N>(
    name: impl Into<Value>,
    attributes: A,
    argument_names: N,
) -> Result<ErrorType, DefinitionError>
where
    A: IntoIterator<Item = (K, V)>,
    K: Into<String>,
    V: Into<Value>,
    N: IntoIterator,
    N::Item: Into<Value>,
{
    let description = attributes
        .into_iter()
        .fold(ErrorTypeDescription::new(name), |description, (key, value)| {
            description.with_attribute(key, value)
        })
        .with_arguments(argument_names);

    ErrorTypeFactory::default().create(&description)
}
