//! Guard shapes and constructors.

use std::fmt;
use std::sync::Arc;

use regex::Regex;

use crate::receiver::Receiver;
use crate::value::{Value, ValueType};

/// A predicate closure guard.
///
/// Receives the receiver as explicit context alongside the candidate value,
/// so a predicate body can consult receiver state.
pub type PredicateFn = Arc<dyn Fn(&dyn Receiver, &Value) -> bool + Send + Sync>;

/// A predicate-like condition tested against one call argument.
///
/// Guards are plain data; evaluation lives in [`Guard::matches`]. The
/// shapes mirror the kinds of questions dispatch can ask of an argument:
/// what it is, what it equals, what it looks like, what it can do.
#[derive(Clone)]
pub enum Guard {
    /// Instance-of test against a type, subtyping included.
    Type(ValueType),
    /// Equality against a specific value (also the exact-value guard).
    Equal(Value),
    /// A symbolic name. With a trailing `?` it names a predicate resolved
    /// on the receiver; without one it is equality against the name as a
    /// string.
    Named(String),
    /// An arbitrary predicate closure.
    Callable(PredicateFn),
    /// A regular expression; matches string values only.
    Pattern(Regex),
    /// Element-wise guards over a list of exactly the same length.
    Sequence(Vec<Guard>),
    /// Capability presence probe; never invokes the capability.
    Capability(String),
    /// Matches when any child guard matches (logical OR).
    AnyOf(Vec<Guard>),
    /// Matches when every child guard matches the same value (logical AND).
    AllOf(Vec<Guard>),
    /// Per capability name: present, and invoking it yields the expected
    /// value.
    Having(Vec<(String, Value)>),
    /// Every named capability present; presence only.
    Supporting(Vec<String>),
}

impl Guard {
    /// Instance-of guard: matches values of the given type.
    pub fn instance_of(ty: ValueType) -> Guard {
        Guard::Type(ty)
    }

    /// Named-predicate guard (trailing `?`) or symbolic-equality guard.
    pub fn predicate(name: impl Into<String>) -> Guard {
        Guard::Named(name.into())
    }

    /// Closure guard.
    pub fn callable(f: impl Fn(&dyn Receiver, &Value) -> bool + Send + Sync + 'static) -> Guard {
        Guard::Callable(Arc::new(f))
    }

    /// Pattern guard over a pre-compiled regex.
    pub fn pattern(re: Regex) -> Guard {
        Guard::Pattern(re)
    }

    /// Sequence guard: element-wise children, exact length.
    pub fn sequence(guards: impl IntoIterator<Item = Guard>) -> Guard {
        Guard::Sequence(guards.into_iter().collect())
    }

    /// Capability-presence guard.
    pub fn capability(name: impl Into<String>) -> Guard {
        Guard::Capability(name.into())
    }

    /// Matches every value.
    pub fn any() -> Guard {
        Guard::Callable(Arc::new(|_, _| true))
    }

    /// Matches no value.
    pub fn none() -> Guard {
        Guard::Callable(Arc::new(|_, _| false))
    }
}

impl fmt::Debug for Guard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Guard::Type(ty) => f.debug_tuple("Type").field(ty).finish(),
            Guard::Equal(value) => f.debug_tuple("Equal").field(value).finish(),
            Guard::Named(name) => f.debug_tuple("Named").field(name).finish(),
            Guard::Callable(_) => f.write_str("Callable(..)"),
            Guard::Pattern(re) => f.debug_tuple("Pattern").field(&re.as_str()).finish(),
            Guard::Sequence(guards) => f.debug_tuple("Sequence").field(guards).finish(),
            Guard::Capability(name) => f.debug_tuple("Capability").field(name).finish(),
            Guard::AnyOf(guards) => f.debug_tuple("AnyOf").field(guards).finish(),
            Guard::AllOf(guards) => f.debug_tuple("AllOf").field(guards).finish(),
            Guard::Having(pairs) => f.debug_tuple("Having").field(pairs).finish(),
            Guard::Supporting(names) => f.debug_tuple("Supporting").field(names).finish(),
        }
    }
}

impl From<ValueType> for Guard {
    fn from(ty: ValueType) -> Self {
        Guard::Type(ty)
    }
}

impl From<Value> for Guard {
    fn from(value: Value) -> Self {
        Guard::Equal(value)
    }
}

/// `"#name"` is a capability probe; any other string is literal equality.
/// Named predicates need the explicit [`Guard::predicate`] constructor.
impl From<&str> for Guard {
    fn from(s: &str) -> Self {
        match s.strip_prefix('#') {
            Some(name) => Guard::Capability(name.to_string()),
            None => Guard::Equal(Value::Str(s.to_string())),
        }
    }
}

impl From<i64> for Guard {
    fn from(i: i64) -> Self {
        Guard::Equal(Value::Int(i))
    }
}

impl From<Vec<Guard>> for Guard {
    fn from(guards: Vec<Guard>) -> Self {
        Guard::Sequence(guards)
    }
}

impl From<Regex> for Guard {
    fn from(re: Regex) -> Self {
        Guard::Pattern(re)
    }
}
