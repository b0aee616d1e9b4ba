//! Configuration for the error type factory.
//!
//! All types implement [`serde::Deserialize`] so they can be embedded in an
//! application's own configuration file.
//!
//! # Example
//!
//! ```
//! # use errorsmith::config::{BacktracePolicy, FactoryConfig};
//! let config = FactoryConfig::default();
//! assert_eq!(config.backtrace(), BacktracePolicy::Capture);
//! ```

use std::backtrace::{Backtrace, BacktraceStatus};

use serde::Deserialize;

/// When generated errors capture a backtrace at construction.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BacktracePolicy {
    /// Capture when enabled through `RUST_BACKTRACE` / `RUST_LIB_BACKTRACE`.
    #[default]
    Capture,
    /// Always capture, regardless of environment variables.
    Force,
    /// Never capture.
    Disabled,
}

impl BacktracePolicy {
    /// Captures a backtrace according to this policy.
    ///
    /// Returns `None` when the policy or the environment disables capture.
    pub fn capture(self) -> Option<Backtrace> {
        match self {
            BacktracePolicy::Capture => {
                let backtrace = Backtrace::capture();
                (backtrace.status() == BacktraceStatus::Captured).then_some(backtrace)
            }
            BacktracePolicy::Force => Some(Backtrace::force_capture()),
            BacktracePolicy::Disabled => None,
        }
    }
}

/// Settings applied to every error type built by a factory.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FactoryConfig {
    /// Backtrace capture for instances of generated types.
    #[serde(default)]
    backtrace: BacktracePolicy,
}

impl FactoryConfig {
    /// Creates a new [`FactoryConfig`].
    ///
    /// # Arguments
    ///
    /// * `backtrace` - Backtrace capture policy for generated error instances.
    pub fn new(backtrace: BacktracePolicy) -> Self {
        Self { backtrace }
    }

    /// Returns the backtrace capture policy.
    pub fn backtrace(&self) -> BacktracePolicy {
        self.backtrace
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_policy() {
        let config: FactoryConfig = toml::from_str(r#"backtrace = "force""#).unwrap();
        assert_eq!(config.backtrace(), BacktracePolicy::Force);

        let config: FactoryConfig = toml::from_str(r#"backtrace = "disabled""#).unwrap();
        assert_eq!(config.backtrace(), BacktracePolicy::Disabled);

        let config: FactoryConfig = toml::from_str("").unwrap();
        assert_eq!(config.backtrace(), BacktracePolicy::Capture);
    }

    #[test]
    fn test_deserialize_rejects_unknown_policy() {
        let result: Result<FactoryConfig, _> = toml::from_str(r#"backtrace = "sometimes""#);
        assert!(result.is_err());
    }

    #[test]
    fn test_capture() {
        assert!(BacktracePolicy::Disabled.capture().is_none());
        assert!(BacktracePolicy::Force.capture().is_some());
    }
}
