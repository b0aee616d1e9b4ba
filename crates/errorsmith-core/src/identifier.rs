//! Identifier rules for error type names, attribute keys and argument names.
//!
//! This module provides the [`Identifier`] type, a string that has been checked
//! against the bare identifier grammar used for every name that ends up as a
//! field on a generated error:
//!
//! ```text
//! identifier = [A-Za-z_$] [A-Za-z0-9_$]*
//! ```
//!
//! On top of the grammar, the names in [`RESERVED_FIELDS`] are rejected since
//! every generated error already carries fields with those names.

use std::{fmt, ops::Deref, str::FromStr, sync::Arc};

use thiserror::Error;

/// Field names present on every generated error instance.
pub const RESERVED_FIELDS: [&str; 2] = ["message", "data"];

/// The reason a string was rejected as an identifier.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum IdentifierError {
    #[error("identifier is empty")]
    Empty,

    #[error("identifier has leading or trailing whitespace")]
    SurroundingWhitespace,

    #[error("`{0}` is a reserved field name")]
    Reserved(String),

    #[error("identifier cannot start with `{0}`")]
    InvalidStart(char),

    #[error("unexpected character `{ch}` at position {position}")]
    InvalidCharacter { ch: char, position: usize },
}

impl IdentifierError {
    /// Returns a short hint on how to fix the identifier.
    pub fn help(&self) -> &'static str {
        match self {
            IdentifierError::Empty => "provide a non-empty name",
            IdentifierError::SurroundingWhitespace => "remove the surrounding whitespace",
            IdentifierError::Reserved(_) => "`message` and `data` are set on every error instance",
            IdentifierError::InvalidStart(_) => "identifiers start with a letter, `_` or `$`",
            IdentifierError::InvalidCharacter { .. } => {
                "identifiers contain only letters, digits, `_` and `$`"
            }
        }
    }
}

fn is_identifier_start(ch: char) -> bool {
    ch.is_ascii_alphabetic() || ch == '_' || ch == '$'
}

fn is_identifier_continue(ch: char) -> bool {
    ch.is_ascii_alphanumeric() || ch == '_' || ch == '$'
}

/// Checks `name` against the identifier grammar and the reserved field names.
///
/// # Examples
///
/// ```
/// use errorsmith_core::identifier::{IdentifierError, check_identifier};
///
/// assert!(check_identifier("AuthenticationError").is_ok());
/// assert_eq!(check_identifier("message"), Err(IdentifierError::Reserved("message".into())));
/// assert_eq!(check_identifier("1st"), Err(IdentifierError::InvalidStart('1')));
/// ```
pub fn check_identifier(name: &str) -> Result<(), IdentifierError> {
    if name.is_empty() {
        return Err(IdentifierError::Empty);
    }

    if name.trim() != name {
        return Err(IdentifierError::SurroundingWhitespace);
    }

    if RESERVED_FIELDS.contains(&name) {
        return Err(IdentifierError::Reserved(name.to_string()));
    }

    let mut chars = name.chars().enumerate();
    match chars.next() {
        Some((_, first)) if !is_identifier_start(first) => {
            return Err(IdentifierError::InvalidStart(first));
        }
        _ => {}
    }

    match chars.find(|(_, ch)| !is_identifier_continue(*ch)) {
        Some((position, ch)) => Err(IdentifierError::InvalidCharacter { ch, position }),
        None => Ok(()),
    }
}

/// Returns `true` if `name` is usable as an error name, attribute key or argument name.
pub fn is_identifier(name: &str) -> bool {
    check_identifier(name).is_ok()
}

/// A validated identifier.
///
/// The underlying string is reference counted, so cloning an `Identifier`
/// does not copy the name.
///
/// # Examples
///
/// ```
/// use errorsmith_core::identifier::Identifier;
///
/// let id: Identifier = "timestamp".parse().unwrap();
/// assert_eq!(id, "timestamp");
/// assert!("bad-name".parse::<Identifier>().is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Identifier(Arc<str>);

impl Identifier {
    /// Validates `name` and wraps it into an `Identifier`.
    ///
    /// # Errors
    ///
    /// Returns the first [`IdentifierError`] found in `name`.
    pub fn new(name: &str) -> Result<Self, IdentifierError> {
        check_identifier(name)?;
        Ok(Self(Arc::from(name)))
    }

    /// Returns the identifier as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Deref for Identifier {
    type Target = str;

    fn deref(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for Identifier {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl std::borrow::Borrow<str> for Identifier {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Identifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for Identifier {
    type Err = IdentifierError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl TryFrom<&str> for Identifier {
    type Error = IdentifierError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl PartialEq<str> for Identifier {
    fn eq(&self, other: &str) -> bool {
        &*self.0 == other
    }
}

impl PartialEq<&str> for Identifier {
    fn eq(&self, other: &&str) -> bool {
        &*self.0 == *other
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_identifiers() {
        for name in ["TestError", "_private", "$dollar", "a", "snake_case_1", "A$b_9"] {
            assert!(is_identifier(name), "`{name}` should be valid");
        }
    }

    #[test]
    fn test_empty() {
        assert_eq!(check_identifier(""), Err(IdentifierError::Empty));
    }

    #[test]
    fn test_surrounding_whitespace() {
        assert_eq!(
            check_identifier(" TestError"),
            Err(IdentifierError::SurroundingWhitespace)
        );
        assert_eq!(
            check_identifier("TestError\n"),
            Err(IdentifierError::SurroundingWhitespace)
        );
        // Whitespace-only strings trim to something different too
        assert_eq!(
            check_identifier("   "),
            Err(IdentifierError::SurroundingWhitespace)
        );
    }

    #[test]
    fn test_reserved_fields() {
        assert_eq!(
            check_identifier("message"),
            Err(IdentifierError::Reserved("message".to_string()))
        );
        assert_eq!(
            check_identifier("data"),
            Err(IdentifierError::Reserved("data".to_string()))
        );
        // Only exact matches are reserved
        assert!(is_identifier("messages"));
        assert!(is_identifier("Data"));
    }

    #[test]
    fn test_invalid_start() {
        assert_eq!(check_identifier("123"), Err(IdentifierError::InvalidStart('1')));
        assert_eq!(
            check_identifier("1TestError"),
            Err(IdentifierError::InvalidStart('1'))
        );
        assert_eq!(check_identifier("-x"), Err(IdentifierError::InvalidStart('-')));
    }

    #[test]
    fn test_invalid_character() {
        assert_eq!(
            check_identifier("Test-Error"),
            Err(IdentifierError::InvalidCharacter { ch: '-', position: 4 })
        );
        assert_eq!(
            check_identifier("a = 1; let bad"),
            Err(IdentifierError::InvalidCharacter { ch: ' ', position: 1 })
        );
        assert_eq!(
            check_identifier("TestError () { console.log(\"bad things\"); } function"),
            Err(IdentifierError::InvalidCharacter { ch: ' ', position: 9 })
        );
        assert!(!is_identifier("caf\u{e9}"));
    }

    #[test]
    fn test_identifier_new() {
        let id = Identifier::new("status").unwrap();
        assert_eq!(id, "status");
        assert_eq!(id.as_str(), "status");
        assert_eq!(id.to_string(), "status");

        assert!(Identifier::new("data").is_err());
    }

    #[test]
    fn test_identifier_clone_shares_storage() {
        let id = Identifier::new("timestamp").unwrap();
        let cloned = id.clone();

        assert!(Arc::ptr_eq(&id.0, &cloned.0));
    }

    #[test]
    fn test_identifier_borrow_lookup() {
        use std::collections::HashSet;

        let mut set = HashSet::new();
        set.insert(Identifier::new("arg1").unwrap());

        assert!(set.contains("arg1"));
        assert!(!set.contains("arg2"));
    }

    #[test]
    fn test_help_is_specific() {
        assert!(IdentifierError::InvalidStart('1').help().contains("start"));
        assert!(IdentifierError::Reserved("data".into()).help().contains("`data`"));
    }
}

#[cfg(test)]
mod proptest_tests {
    use proptest::prelude::*;

    use super::*;

    fn valid_identifier_strategy() -> impl Strategy<Value = String> {
        "[A-Za-z_$][A-Za-z0-9_$]{0,24}"
            .prop_filter("avoid reserved fields", |s| !RESERVED_FIELDS.contains(&s.as_str()))
    }

    proptest! {
        #[test]
        fn grammar_conforming_names_are_identifiers(name in valid_identifier_strategy()) {
            prop_assert!(is_identifier(&name));
        }

        #[test]
        fn digit_leading_names_are_rejected(name in "[0-9][A-Za-z0-9_$]{0,12}") {
            prop_assert!(!is_identifier(&name));
        }

        #[test]
        fn padded_names_are_rejected(name in valid_identifier_strategy(), pad in "[ \t\n]{1,3}") {
            let leading = format!("{pad}{name}");
            let trailing = format!("{name}{pad}");
            prop_assert_eq!(check_identifier(&leading), Err(IdentifierError::SurroundingWhitespace));
            prop_assert_eq!(check_identifier(&trailing), Err(IdentifierError::SurroundingWhitespace));
        }

        #[test]
        fn hyphenated_names_are_rejected(left in valid_identifier_strategy(), right in "[A-Za-z0-9_]{1,8}") {
            let name = format!("{left}-{right}");
            prop_assert!(!is_identifier(&name));
        }
    }
}
