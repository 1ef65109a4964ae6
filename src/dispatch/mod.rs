//! Runtime multiple dispatch.
//!
//! A [`TypedFn`] owns a table of signatures ranked by specificity at
//! construction time. Calling walks the ranked table, picks the most
//! specific matching pattern, and fails loudly when none or several
//! equally specific ones match. No implicit conversion happens here — a
//! kernel either declared a signature for the argument kinds or the call
//! is an error.
//!
//! Implementations receive the owning `TypedFn` as an explicit handle, so
//! recursive signatures (n-ary reduction, Array fallbacks) re-enter
//! dispatch through the already-resolved function object instead of any
//! late self-lookup.

pub mod pattern;
pub use pattern::{Constraint, Pattern};

use std::sync::Arc;

use crate::error::{NumatError, Result};
use crate::value::{Value, ValueKind};

/// Implementation body: explicit self-handle plus the argument slice.
pub type ImplFn = Arc<dyn Fn(&TypedFn, &[Value]) -> Result<Value> + Send + Sync>;

/// One registered implementation: a parsed pattern plus its body.
#[derive(Clone)]
pub struct Signature {
    pattern: Pattern,
    imp: ImplFn,
}

impl std::fmt::Debug for Signature {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Signature").field("pattern", &self.pattern).finish_non_exhaustive()
    }
}

impl Signature {
    pub fn new(
        pattern: &str,
        imp: impl Fn(&TypedFn, &[Value]) -> Result<Value> + Send + Sync + 'static,
    ) -> Result<Signature> {
        Ok(Signature { pattern: Pattern::parse(pattern)?, imp: Arc::new(imp) })
    }

    pub fn pattern(&self) -> &Pattern {
        &self.pattern
    }
}

/// A dispatching function: name plus ranked signature table.
///
/// The table is immutable after construction; concurrent calls against a
/// shared `TypedFn` are safe.
pub struct TypedFn {
    name: &'static str,
    sigs: Vec<Signature>,
}

impl TypedFn {
    /// Rank the signatures most-specific-first and freeze the table.
    pub fn new(name: &'static str, mut sigs: Vec<Signature>) -> TypedFn {
        sigs.sort_by_key(|s| s.pattern.specificity());
        TypedFn { name, sigs }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    /// The ranked table; the suite builder merges kernel tables with this.
    pub fn signatures(&self) -> &[Signature] {
        &self.sigs
    }

    /// Whether some signature's pattern reads exactly `pattern`.
    pub fn has_pattern(&self, pattern: &Pattern) -> bool {
        self.sigs.iter().any(|s| &s.pattern == pattern)
    }

    /// Dispatch on the runtime kinds of `args`.
    pub fn call(&self, args: &[Value]) -> Result<Value> {
        let kinds: Vec<ValueKind> = args.iter().map(Value::kind).collect();
        let mut matching = self.sigs.iter().filter(|s| s.pattern.matches(&kinds));
        let Some(first) = matching.next() else {
            return Err(NumatError::NoMatchingSignature {
                name: self.name.to_string(),
                found: type_list(&kinds),
            });
        };
        if let Some(second) = matching.next() {
            if second.pattern.specificity() == first.pattern.specificity() {
                return Err(NumatError::AmbiguousSignature {
                    name: self.name.to_string(),
                    found: type_list(&kinds),
                    left: first.pattern.describe(),
                    right: second.pattern.describe(),
                });
            }
        }
        (first.imp)(self, args)
    }

    /// Binary call, the common case for elementwise kernels.
    pub fn call2(&self, a: Value, b: Value) -> Result<Value> {
        self.call(&[a, b])
    }
}

fn type_list(kinds: &[ValueKind]) -> String {
    kinds.iter().map(|k| k.name()).collect::<Vec<_>>().join(", ")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fixed(result: f64) -> impl Fn(&TypedFn, &[Value]) -> Result<Value> + Send + Sync {
        move |_, _| Ok(Value::number(result))
    }

    #[test]
    fn most_specific_signature_wins() {
        let f = TypedFn::new(
            "f",
            vec![
                Signature::new("any, any", fixed(1.0)).unwrap(),
                Signature::new("Number, Number", fixed(2.0)).unwrap(),
            ],
        );
        let r = f.call(&[Value::number(0.0), Value::number(0.0)]).unwrap();
        assert_eq!(r, Value::number(2.0));
        let r = f.call(&[Value::boolean(true), Value::number(0.0)]).unwrap();
        assert_eq!(r, Value::number(1.0));
    }

    #[test]
    fn no_match_names_argument_types() {
        let f = TypedFn::new("f", vec![Signature::new("Number", fixed(1.0)).unwrap()]);
        let err = f.call(&[Value::boolean(true)]).unwrap_err();
        let msg = err.to_string();
        assert!(msg.contains("f"), "{}", msg);
        assert!(msg.contains("Bool"), "{}", msg);
    }

    #[test]
    fn equally_specific_overlap_is_ambiguous() {
        let f = TypedFn::new(
            "f",
            vec![
                Signature::new("Number | BigInt, Number", fixed(1.0)).unwrap(),
                Signature::new("Number | Fraction, Number", fixed(2.0)).unwrap(),
            ],
        );
        let err = f.call(&[Value::number(0.0), Value::number(0.0)]).unwrap_err();
        assert!(matches!(err, NumatError::AmbiguousSignature { .. }));
        // non-overlapping kinds still resolve fine
        assert!(f.call(&[Value::big(1), Value::number(0.0)]).is_ok());
    }

    #[test]
    fn self_handle_supports_recursion() {
        let pair = Signature::new("Number, Number", |_, args| {
            Ok(Value::number(args[0].as_number()? + args[1].as_number()?))
        })
        .unwrap();
        let rest = Signature::new("any, any, ...any", |me, args| {
            let mut acc = me.call(&args[..2])?;
            for extra in &args[2..] {
                acc = me.call(&[acc, extra.clone()])?;
            }
            Ok(acc)
        })
        .unwrap();
        let f = TypedFn::new("sum", vec![pair, rest]);
        let r = f
            .call(&[Value::number(1.0), Value::number(2.0), Value::number(3.0), Value::number(4.0)])
            .unwrap();
        assert_eq!(r, Value::number(10.0));
    }
}
