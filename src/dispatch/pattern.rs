//! Signature patterns: one type constraint per argument position.
//!
//! Patterns are written as strings at registration time — `"Number, Number"`,
//! `"Number | BigInt, SparseMatrix"`, `"any, any, ...any"` — and parsed once
//! into constraint vectors. Call-time matching never touches the text again.

use crate::error::{NumatError, Result};
use crate::value::ValueKind;

/// Constraint on a single argument position.
#[derive(Clone, Debug, PartialEq)]
pub enum Constraint {
    /// Matches any kind.
    Any,
    /// Matches exactly one kind.
    Exact(ValueKind),
    /// Matches any kind in the set.
    Union(Vec<ValueKind>),
}

impl Constraint {
    pub fn parse(text: &str) -> Result<Constraint> {
        let text = text.trim();
        if text == "any" {
            return Ok(Constraint::Any);
        }
        let kinds = text
            .split('|')
            .map(|part| {
                ValueKind::parse(part.trim()).ok_or_else(|| {
                    NumatError::InvalidSuite("pattern", format!("unknown type {:?}", part.trim()))
                })
            })
            .collect::<Result<Vec<_>>>()?;
        match kinds.as_slice() {
            [] => Err(NumatError::InvalidSuite("pattern", "empty constraint".into())),
            [one] => Ok(Constraint::Exact(*one)),
            _ => Ok(Constraint::Union(kinds)),
        }
    }

    pub fn matches(&self, kind: ValueKind) -> bool {
        match self {
            Constraint::Any => true,
            Constraint::Exact(k) => *k == kind,
            Constraint::Union(ks) => ks.contains(&kind),
        }
    }

    pub fn is_exact(&self) -> bool {
        matches!(self, Constraint::Exact(_))
    }

    pub fn describe(&self) -> String {
        match self {
            Constraint::Any => "any".into(),
            Constraint::Exact(k) => k.name().into(),
            Constraint::Union(ks) => ks
                .iter()
                .map(|k| k.name())
                .collect::<Vec<_>>()
                .join(" | "),
        }
    }
}

/// Specificity key, ascending order = most specific first: fewest
/// wildcard positions, then most exact positions, then fixed arity
/// before trailing-rest.
pub type Specificity = (usize, std::cmp::Reverse<usize>, bool);

/// A full parameter pattern: fixed positions plus an optional trailing
/// rest constraint covering the remaining arguments.
#[derive(Clone, Debug, PartialEq)]
pub struct Pattern {
    params: Vec<Constraint>,
    rest: Option<Constraint>,
}

impl Pattern {
    /// Parse a comma-separated pattern; a final `...X` segment makes the
    /// pattern variadic over `X`.
    pub fn parse(text: &str) -> Result<Pattern> {
        let mut params = Vec::new();
        let mut rest = None;
        let segments: Vec<&str> = text.split(',').collect();
        for (i, segment) in segments.iter().enumerate() {
            let segment = segment.trim();
            if let Some(inner) = segment.strip_prefix("...") {
                if i + 1 != segments.len() {
                    return Err(NumatError::InvalidSuite(
                        "pattern",
                        format!("rest parameter must be last in {:?}", text),
                    ));
                }
                rest = Some(Constraint::parse(inner)?);
            } else {
                params.push(Constraint::parse(segment)?);
            }
        }
        if params.is_empty() && rest.is_none() {
            return Err(NumatError::InvalidSuite("pattern", "empty pattern".into()));
        }
        Ok(Pattern { params, rest })
    }

    pub fn matches(&self, kinds: &[ValueKind]) -> bool {
        match &self.rest {
            None => {
                kinds.len() == self.params.len()
                    && self.params.iter().zip(kinds).all(|(c, &k)| c.matches(k))
            }
            // a rest parameter stands for one or more arguments
            Some(rest) => {
                kinds.len() > self.params.len()
                    && self.params.iter().zip(kinds).all(|(c, &k)| c.matches(k))
                    && kinds[self.params.len()..].iter().all(|&k| rest.matches(k))
            }
        }
    }

    pub fn specificity(&self) -> Specificity {
        let wildcards = self.params.iter().filter(|c| !c.is_exact()).count();
        let exacts = self.params.iter().filter(|c| c.is_exact()).count();
        (wildcards, std::cmp::Reverse(exacts), self.rest.is_some())
    }

    pub fn describe(&self) -> String {
        let mut parts: Vec<String> = self.params.iter().map(Constraint::describe).collect();
        if let Some(rest) = &self.rest {
            parts.push(format!("...{}", rest.describe()));
        }
        parts.join(", ")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_and_match() {
        let p = Pattern::parse("Number | BigInt, SparseMatrix").unwrap();
        assert!(p.matches(&[ValueKind::Number, ValueKind::Sparse]));
        assert!(p.matches(&[ValueKind::BigInt, ValueKind::Sparse]));
        assert!(!p.matches(&[ValueKind::Fraction, ValueKind::Sparse]));
        assert!(!p.matches(&[ValueKind::Number]));
    }

    #[test]
    fn rest_requires_at_least_one_extra_argument() {
        let p = Pattern::parse("any, any, ...any").unwrap();
        assert!(!p.matches(&[ValueKind::Number]));
        assert!(!p.matches(&[ValueKind::Number, ValueKind::Number]));
        assert!(p.matches(&[ValueKind::Number, ValueKind::Number, ValueKind::Array]));
        assert!(p.matches(&[ValueKind::Number; 5]));
    }

    #[test]
    fn exact_outranks_union_outranks_any() {
        let exact = Pattern::parse("Number, Number").unwrap();
        let union = Pattern::parse("Number | BigInt, Number").unwrap();
        let any = Pattern::parse("any, any").unwrap();
        assert!(exact.specificity() < union.specificity());
        assert!(union.specificity() < any.specificity());
    }

    #[test]
    fn rest_loses_to_fixed_arity() {
        let fixed = Pattern::parse("any, any").unwrap();
        let variadic = Pattern::parse("any, any, ...any").unwrap();
        assert!(fixed.specificity() < variadic.specificity());
    }

    #[test]
    fn unknown_type_rejected() {
        assert!(Pattern::parse("Matrix, Matrix").is_err());
    }
}
