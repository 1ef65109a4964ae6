//! Tests for the runtime dispatcher: specificity ranking, failure modes,
//! self-referential signatures, and safe concurrent reads of a frozen
//! signature table.

use std::sync::Arc;

use numat::{NumatError, Signature, TypedFn, Value};

fn constant(result: f64) -> impl Fn(&TypedFn, &[Value]) -> numat::Result<Value> + Send + Sync {
    move |_, _| Ok(Value::number(result))
}

/// A numeric-specific signature must win over an `any` fallback for
/// numeric arguments, and the fallback must still catch the rest.
#[test]
fn specific_signature_beats_any_fallback() {
    let f = TypedFn::new(
        "f",
        vec![
            Signature::new("any, any", constant(1.0)).unwrap(),
            Signature::new("Number, Number", constant(2.0)).unwrap(),
        ],
    );
    assert_eq!(f.call(&[Value::number(1.0), Value::number(2.0)]).unwrap(), Value::number(2.0));
    assert_eq!(f.call(&[Value::boolean(true), Value::number(2.0)]).unwrap(), Value::number(1.0));
}

/// Union constraints rank between exact names and `any`.
#[test]
fn union_ranks_between_exact_and_any() {
    let f = TypedFn::new(
        "f",
        vec![
            Signature::new("any, any", constant(1.0)).unwrap(),
            Signature::new("Number | BigInt, Number", constant(2.0)).unwrap(),
            Signature::new("Number, Number", constant(3.0)).unwrap(),
        ],
    );
    assert_eq!(f.call(&[Value::number(0.0), Value::number(0.0)]).unwrap(), Value::number(3.0));
    assert_eq!(f.call(&[Value::big(1), Value::number(0.0)]).unwrap(), Value::number(2.0));
    assert_eq!(f.call(&[Value::boolean(true), Value::boolean(true)]).unwrap(), Value::number(1.0));
}

/// A failed dispatch must name the function and the actual argument
/// types.
#[test]
fn no_match_error_is_descriptive() {
    let f = TypedFn::new("gcd", vec![Signature::new("Number, Number", constant(0.0)).unwrap()]);
    let err = f.call(&[Value::number(1.0), Value::boolean(true)]).unwrap_err();
    let msg = err.to_string();
    assert!(msg.contains("gcd"), "{}", msg);
    assert!(msg.contains("Number"), "{}", msg);
    assert!(msg.contains("Bool"), "{}", msg);
}

/// Two equally specific overlapping signatures are a registration bug
/// and must surface as an ambiguity error, never a silent pick.
#[test]
fn overlapping_unions_are_ambiguous() {
    let f = TypedFn::new(
        "f",
        vec![
            Signature::new("Number | Bool, any", constant(1.0)).unwrap(),
            Signature::new("Number | BigInt, any", constant(2.0)).unwrap(),
        ],
    );
    let err = f.call(&[Value::number(0.0), Value::number(0.0)]).unwrap_err();
    assert!(matches!(err, NumatError::AmbiguousSignature { .. }));
    // outside the overlap both still work
    assert!(f.call(&[Value::boolean(true), Value::number(0.0)]).is_ok());
    assert!(f.call(&[Value::big(2), Value::number(0.0)]).is_ok());
}

/// Rest signatures reduce through the explicit self handle; the chain
/// re-enters dispatch without re-ranking anything.
#[test]
fn rest_signature_folds_through_self_handle() {
    let f = TypedFn::new(
        "max",
        vec![
            Signature::new("Number, Number", |_, a| {
                Ok(Value::number(a[0].as_number()?.max(a[1].as_number()?)))
            })
            .unwrap(),
            Signature::new("any, any, ...any", |me, a| {
                let mut acc = me.call(&a[..2])?;
                for v in &a[2..] {
                    acc = me.call(&[acc, v.clone()])?;
                }
                Ok(acc)
            })
            .unwrap(),
        ],
    );
    let r = f
        .call(&[Value::number(3.0), Value::number(7.0), Value::number(5.0), Value::number(6.0)])
        .unwrap();
    assert_eq!(r, Value::number(7.0));
}

/// A frozen signature table is safe to share across threads; dispatch
/// holds no interior mutability.
#[test]
fn concurrent_dispatch_against_shared_table() {
    let f = Arc::new(TypedFn::new(
        "add",
        vec![
            Signature::new("Number, Number", |_, a| {
                Ok(Value::number(a[0].as_number()? + a[1].as_number()?))
            })
            .unwrap(),
        ],
    ));
    let handles: Vec<_> = (0..8)
        .map(|i| {
            let f = f.clone();
            std::thread::spawn(move || {
                let r = f.call(&[Value::number(i as f64), Value::number(1.0)]).unwrap();
                assert_eq!(r, Value::number(i as f64 + 1.0));
            })
        })
        .collect();
    for h in handles {
        h.join().unwrap();
    }
}
