//! Integration tests for the error type factory API
//!
//! These tests exercise generated types the way an application would:
//! defining them once, raising instances and catching them again.

use std::{error::Error, sync::Arc};

use errorsmith::{
    DefinitionError, ErrorInstance, ErrorTypeDescription, ErrorTypeFactory, create_error_type,
    value::{AttributeValue, Map, Value},
};

fn no_attributes() -> Vec<(&'static str, Value)> {
    Vec::new()
}

fn no_arguments() -> Vec<&'static str> {
    Vec::new()
}

#[test]
fn test_create_without_attributes_or_arguments() {
    let test_error = create_error_type("TestError", no_attributes(), no_arguments())
        .expect("Failed to create error type");

    assert_eq!(test_error.name(), "TestError");
    assert_eq!(test_error.arity(), 0);

    let instance = test_error.builder().finish();
    assert_eq!(instance.name(), "TestError");
    assert!(instance.is_instance_of(&test_error));
    assert_eq!(instance.message(), None);
    assert!(instance.data().is_empty());
}

#[test]
fn test_invalid_name_prefixes() {
    for name in ["", "  padded  ", "123", "1TestError", "Test-Error", "message", "data"] {
        let err = create_error_type(name, no_attributes(), no_arguments()).unwrap_err();
        assert!(
            err.to_string().starts_with("Invalid error name '"),
            "unexpected message for `{name}`: {err}"
        );
    }
}

#[test]
fn test_invalid_attribute_prefixes() {
    let err = create_error_type("BadError", [("bad-attr", 123)], no_arguments()).unwrap_err();
    assert!(err.to_string().starts_with("Invalid attribute name '"));

    let err = create_error_type("BadError", [("a", Value::from(vec![]))], no_arguments())
        .unwrap_err();
    assert!(err.to_string().starts_with("Invalid attribute value '"));
}

#[test]
fn test_invalid_argument_prefix() {
    let err = create_error_type("BadError", no_attributes(), ["a = 1; let bad"]).unwrap_err();
    assert_eq!(err.to_string(), "Invalid argument name 'a = 1; let bad'");
}

#[test]
fn test_round_trip() {
    let error_type = create_error_type("E", [("a", 1)], ["b"]).expect("valid description");
    let instance = error_type.builder().message("msg").arg(2).finish();

    assert_eq!(instance.name(), "E");
    assert_eq!(instance.message(), Some("msg"));
    assert_eq!(instance.attribute("a"), Some(&AttributeValue::Number(1.0)));
    assert_eq!(instance.argument("b"), Some(&Value::from(2)));
    assert_eq!(instance.data(), &Map::new());
}

#[test]
fn test_attributes_and_arguments() {
    let test_error = create_error_type(
        "TestError",
        [
            ("attr1", Value::from("test")),
            ("attr2", Value::from(123)),
            ("attr3", Value::from(true)),
        ],
        ["arg1", "arg2", "arg3", "arg4", "arg5"],
    )
    .expect("valid description");

    let mut nested = Map::new();
    nested.insert(
        "test".to_string(),
        Value::from(vec![Value::from(1), Value::from(2), Value::from(3)]),
    );

    let instance = test_error
        .builder()
        .message("message")
        .args([
            Value::from("test"),
            Value::from(123),
            Value::from(vec![Value::from(1), Value::from(2), Value::from(3)]),
            Value::from(nested.clone()),
            Value::Null,
        ])
        .finish();

    assert_eq!(instance.attribute("attr1"), Some(&AttributeValue::String("test".into())));
    assert_eq!(instance.attribute("attr2"), Some(&AttributeValue::Number(123.0)));
    assert_eq!(instance.attribute("attr3"), Some(&AttributeValue::Boolean(true)));
    assert_eq!(instance.argument("arg1"), Some(&Value::from("test")));
    assert_eq!(instance.argument("arg2"), Some(&Value::from(123)));
    assert_eq!(
        instance.argument("arg3").and_then(Value::as_list).map(<[_]>::len),
        Some(3)
    );
    assert_eq!(instance.argument("arg4"), Some(&Value::from(nested)));
    // An explicit null is a supplied value, unlike a missing position
    assert_eq!(instance.argument("arg5"), Some(&Value::Null));
    assert!(instance.data().is_empty());
}

#[test]
fn test_missing_arguments_are_unset() {
    let test_error = create_error_type("TestError", no_attributes(), ["arg1", "arg2", "arg3"])
        .expect("valid description");

    let instance = test_error.new_error("message");

    for arg in ["arg1", "arg2", "arg3"] {
        assert_eq!(instance.argument(arg), None);
        assert!(instance.has_field(arg));
    }
    assert_eq!(instance.message(), Some("message"));
    assert!(instance.data().is_empty());
}

#[test]
fn test_explicit_data_is_stored_by_reference() {
    let test_error =
        create_error_type("TestError", no_attributes(), ["arg1"]).expect("valid description");

    let mut payload = Map::new();
    payload.insert("test".to_string(), Value::from("test"));
    let payload = Arc::new(payload);

    let instance = test_error
        .builder()
        .message("message")
        .arg("value")
        .data(Arc::clone(&payload))
        .finish();

    assert!(Arc::ptr_eq(instance.shared_data(), &payload));
    assert_eq!(instance.data()["test"], Value::from("test"));
}

#[test]
fn test_instances_do_not_alias_arguments() {
    let test_error =
        create_error_type("TestError", [("status", 500)], ["arg"]).expect("valid description");

    let first = test_error.builder().arg(1).finish();
    let second = test_error.builder().arg(2).finish();

    assert_eq!(first.argument("arg"), Some(&Value::from(1)));
    assert_eq!(second.argument("arg"), Some(&Value::from(2)));

    // Fixed attributes are the same allocation for every instance
    let first_status = first.attribute("status").expect("declared attribute");
    let second_status = second.attribute("status").expect("declared attribute");
    assert!(std::ptr::eq(first_status, second_status));

    // Default data payloads are independent
    assert!(!Arc::ptr_eq(first.shared_data(), second.shared_data()));
}

#[test]
fn test_same_name_yields_distinct_types() {
    let first = create_error_type("TestError", no_attributes(), no_arguments()).unwrap();
    let second = create_error_type("TestError", no_attributes(), no_arguments()).unwrap();

    assert_ne!(first, second);

    let instance = first.new_error("x");
    assert!(instance.is_instance_of(&first));
    assert!(!instance.is_instance_of(&second));
    assert!(instance.is_kind("TestError"));
}

fn authenticate(token: &str) -> Result<(), Box<dyn Error + Send + Sync>> {
    let auth_error = create_error_type("AuthenticationError", [("status", 403)], ["token"])?;
    Err(auth_error
        .builder()
        .message("token rejected")
        .arg(token)
        .finish()
        .into())
}

#[test]
fn test_instances_are_catchable_generically_and_by_type() {
    let err = authenticate("abc").unwrap_err();

    assert_eq!(err.to_string(), "AuthenticationError: token rejected");

    let instance = err
        .downcast_ref::<ErrorInstance>()
        .expect("should downcast to ErrorInstance");
    assert!(instance.is_kind("AuthenticationError"));
    assert_eq!(instance.argument("token"), Some(&Value::from("abc")));
    assert!(instance.error_type().matches(err.as_ref()));
}

#[test]
fn test_definition_errors_propagate_with_question_mark() {
    fn define() -> Result<(), DefinitionError> {
        create_error_type("ok", no_attributes(), ["x", "x"])?;
        Ok(())
    }

    let err = define().unwrap_err();
    assert_eq!(err.to_string(), "Invalid argument name 'x' already used as argument");
}

#[test]
fn test_factory_reusability() {
    let factory = ErrorTypeFactory::default();

    let first = factory
        .create(&ErrorTypeDescription::new("FirstError"))
        .expect("valid description");
    let second = factory
        .create(&ErrorTypeDescription::new("SecondError").with_argument("cause"))
        .expect("valid description");

    assert_eq!(first.signature(), "FirstError(message, data)");
    assert_eq!(second.signature(), "SecondError(message, cause, data)");
}

#[test]
fn test_types_are_shareable_across_threads() {
    let test_error =
        create_error_type("TestError", [("code", 7)], ["worker"]).expect("valid description");

    let handles: Vec<_> = (0..4)
        .map(|worker| {
            let test_error = test_error.clone();
            std::thread::spawn(move || test_error.builder().arg(worker).finish())
        })
        .collect();

    for (worker, handle) in handles.into_iter().enumerate() {
        let instance = handle.join().expect("thread panicked");
        assert!(instance.is_instance_of(&test_error));
        assert_eq!(instance.argument("worker"), Some(&Value::from(worker as i64)));
    }
}
