use super::*;
use rpal_ir::StringInterner;

#[test]
fn test_scope_define_get() {
    let interner = StringInterner::new();
    let x = interner.intern("x");

    let mut scope = Scope::new();
    scope.define(x, Value::Int(42));
    assert_eq!(scope.get(x), Some(&Value::Int(42)));
    assert_eq!(scope.len(), 1);
}

#[test]
fn test_primitive_is_empty() {
    let interner = StringInterner::new();
    let env = Env::primitive();
    assert_eq!(env.lookup(interner.intern("Print")), None);
    assert_eq!(env.depth(), 1);
    assert!(env.parent().is_none());
}

#[test]
fn test_lookup_walks_parents() {
    let interner = StringInterner::new();
    let x = interner.intern("x");
    let y = interner.intern("y");

    let outer = Env::primitive().extend([(x, Value::Int(1))]);
    let inner = outer.extend([(y, Value::Int(2))]);

    assert_eq!(inner.lookup(x), Some(Value::Int(1)));
    assert_eq!(inner.lookup(y), Some(Value::Int(2)));
    assert_eq!(outer.lookup(y), None);
    assert_eq!(inner.depth(), 3);
}

#[test]
fn test_shadowing() {
    let interner = StringInterner::new();
    let x = interner.intern("x");

    let outer = Env::primitive().extend([(x, Value::Int(1))]);
    let inner = outer.extend([(x, Value::Int(2))]);

    // The child binding wins; the parent is untouched.
    assert_eq!(inner.lookup(x), Some(Value::Int(2)));
    assert_eq!(outer.lookup(x), Some(Value::Int(1)));
}

#[test]
fn test_siblings_share_parent() {
    let interner = StringInterner::new();
    let x = interner.intern("x");
    let n = interner.intern("n");

    let parent = Env::primitive().extend([(n, Value::Int(10))]);
    let a = parent.extend([(x, Value::Int(1))]);
    let b = parent.extend([(x, Value::Int(2))]);

    assert_eq!(a.lookup(x), Some(Value::Int(1)));
    assert_eq!(b.lookup(x), Some(Value::Int(2)));
    assert!(a.parent().is_some_and(|p| p.ptr_eq(&parent)));
    assert!(b.parent().is_some_and(|p| p.ptr_eq(&parent)));
}

#[test]
fn test_deep_chain_lookup() {
    let interner = StringInterner::new();
    let root = interner.intern("root");

    let mut env = Env::primitive().extend([(root, Value::Int(0))]);
    let step = interner.intern("i");
    for i in 0..50_000 {
        env = env.extend([(step, Value::Int(i))]);
    }
    assert_eq!(env.lookup(root), Some(Value::Int(0)));
    assert_eq!(env.lookup(step), Some(Value::Int(49_999)));
    assert_eq!(env.depth(), 50_002);
}
