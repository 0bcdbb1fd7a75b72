use pretty_assertions::assert_eq;

use super::prelude::{Environment, Object, ObjectKind, FALSE, NULL, TRUE};

#[test]
fn test_lookup_walks_enclosing_scopes() {
    let root = Environment::new();
    root.borrow_mut().set("a", Object::Integer(1));

    let inner = Environment::enclosed(&root);
    let innermost = Environment::enclosed(&inner);

    assert_eq!(innermost.borrow().get("a"), Some(Object::Integer(1)));
    assert_eq!(innermost.borrow().get("b"), None);
}

#[test]
fn test_shadowing_leaves_outer_binding() {
    let root = Environment::new();
    root.borrow_mut().set("a", Object::Integer(1));

    let inner = Environment::enclosed(&root);
    inner.borrow_mut().set("a", Object::String("inner".into()));

    assert_eq!(inner.borrow().get("a"), Some(Object::String("inner".into())));
    assert_eq!(root.borrow().get("a"), Some(Object::Integer(1)));
}

#[test]
fn test_display_forms() {
    let cases = [
        (Object::Integer(-42), "-42"),
        (Object::Float(6.1), "6.100000"),
        (TRUE, "true"),
        (NULL, "null"),
        (Object::String("raw text".into()), "raw text"),
        (
            Object::Array(vec![Object::Integer(1), Object::String("b".into()), NULL]),
            "[1, b, null]"
        ),
        (Object::error("boom"), "ERROR: boom"),
        (Object::Return(Box::new(Object::Integer(3))), "3"),
    ];

    for (object, expected) in cases {
        assert_eq!(object.to_string(), expected);
    }
}

#[test]
fn test_kind_names() {
    assert_eq!(Object::Integer(1).kind().to_string(), "INTEGER");
    assert_eq!(FALSE.kind(), ObjectKind::Boolean);
    assert_eq!(Object::Return(Box::new(NULL)).kind().to_string(), "RETURN_VALUE");
    assert_eq!(Object::Array(vec![]).kind().to_string(), "ARRAY");
}

#[test]
fn test_truthiness() {
    assert!(TRUE.is_truthy());
    assert!(!FALSE.is_truthy());
    assert!(!NULL.is_truthy());
    assert!(!Object::Integer(1).is_truthy());
    assert!(!Object::String("true".into()).is_truthy());
}
