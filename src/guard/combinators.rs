//! Builder helpers for composite guards.
//!
//! Free functions meant to be read at the registration site:
//! `either(..)`, `exact(..)`, `having(..)`, `full_match(..)`,
//! `supporting(..)`.

use crate::value::Value;

use super::guard::Guard;

/// Matches when any child guard matches. Emulates sum-type unions, e.g.
/// `either([Guard::from(ValueType::Int), Guard::from(ValueType::List)])`.
pub fn either(guards: impl IntoIterator<Item = Guard>) -> Guard {
    Guard::AnyOf(guards.into_iter().collect())
}

/// Matches only the given value itself.
///
/// `exact(Value::Type(ValueType::Int))` matches the type reference `Int`,
/// where a bare `ValueType::Int` guard matches integer *instances*.
pub fn exact(value: impl Into<Value>) -> Guard {
    Guard::Equal(value.into())
}

/// Matches when, for every listed capability, the candidate exposes it and
/// invoking it yields the expected result.
///
/// `having([("length", 0)])` matches the empty list, the empty string, and
/// the empty map.
pub fn having<S, V>(properties: impl IntoIterator<Item = (S, V)>) -> Guard
where
    S: Into<String>,
    V: Into<Value>,
{
    Guard::Having(
        properties
            .into_iter()
            .map(|(name, expected)| (name.into(), expected.into()))
            .collect(),
    )
}

/// Matches when every child guard matches the same value.
///
/// Unlike a sequence guard, which pairs each child with one element of a
/// list, all children here apply to the whole candidate.
pub fn full_match(guards: impl IntoIterator<Item = Guard>) -> Guard {
    Guard::AllOf(guards.into_iter().collect())
}

/// Matches when the candidate exposes every named capability. Presence
/// only; nothing is invoked.
pub fn supporting(names: impl IntoIterator<Item = impl Into<String>>) -> Guard {
    Guard::Supporting(names.into_iter().map(Into::into).collect())
}

#[cfg(test)]
mod tests {
    use crate::value::ValueType;

    use super::*;

    #[test]
    fn test_either_is_logical_or() {
        let a = Guard::instance_of(ValueType::Int);
        let b = Guard::instance_of(ValueType::Str);
        let union = either([a.clone(), b.clone()]);
        for value in [Value::Int(1), Value::Str("x".into()), Value::Float(1.0)] {
            let expected = a.matches(&value, &()).unwrap() || b.matches(&value, &()).unwrap();
            assert_eq!(union.matches(&value, &()).unwrap(), expected);
        }
    }

    #[test]
    fn test_full_match_is_logical_and() {
        let a = Guard::instance_of(ValueType::List);
        let b = having([("length", 2)]);
        let both = full_match([a.clone(), b.clone()]);
        for value in [
            Value::list([1, 2]),
            Value::list([1]),
            Value::Str("ab".into()),
        ] {
            let expected = a.matches(&value, &()).unwrap() && b.matches(&value, &()).unwrap();
            assert_eq!(both.matches(&value, &()).unwrap(), expected);
        }
    }

    #[test]
    fn test_exact_distinguishes_reference_from_instance() {
        let reference = exact(Value::Type(ValueType::Int));
        assert!(reference
            .matches(&Value::Type(ValueType::Int), &())
            .unwrap());
        assert!(!reference.matches(&Value::Int(2), &()).unwrap());
    }

    #[test]
    fn test_supporting_requires_all_capabilities() {
        let guard = supporting(["each", "length"]);
        assert!(guard.matches(&Value::list([1]), &()).unwrap());
        // Strings have `length` but not `each`.
        assert!(!guard.matches(&Value::Str("ab".into()), &()).unwrap());
    }

    #[test]
    fn test_having_on_string_rendering() {
        let guard = having([("to_s", "[]")]);
        assert!(guard.matches(&Value::list(Vec::<i64>::new()), &()).unwrap());
        assert!(!guard.matches(&Value::list([1]), &()).unwrap());
    }
}
