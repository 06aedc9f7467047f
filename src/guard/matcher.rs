//! Guard evaluation.
//!
//! One rule per guard shape, total over well-formed guards. The single
//! synthesized failure is a named-predicate guard whose predicate the
//! receiver does not define; every other mismatch is a plain `false`.

use crate::errors::DispatchError;
use crate::receiver::Receiver;
use crate::value::{invoke_capability, respond_to, Value};

use super::guard::Guard;

impl Guard {
    /// Test this guard against a candidate value.
    ///
    /// `ctx` is the receiver of the call being dispatched; it is consulted
    /// by named-predicate guards and passed through to callable guards.
    ///
    /// # Errors
    ///
    /// [`DispatchError::MissingPredicate`] when a named-predicate guard
    /// references a predicate absent from the receiver. An absent
    /// *capability* on the candidate is a non-match, not an error.
    pub fn matches(&self, value: &Value, ctx: &dyn Receiver) -> Result<bool, DispatchError> {
        match self {
            Guard::Type(ty) => Ok(ty.matches(value)),
            Guard::Equal(expected) => Ok(expected == value),
            Guard::Named(name) => {
                if name.ends_with('?') {
                    ctx.call_predicate(name, value)
                        .ok_or_else(|| DispatchError::MissingPredicate { name: name.clone() })
                } else {
                    Ok(matches!(value, Value::Str(s) if s == name))
                }
            }
            Guard::Callable(predicate) => Ok(predicate(ctx, value)),
            Guard::Pattern(re) => Ok(matches!(value, Value::Str(s) if re.is_match(s))),
            Guard::Sequence(guards) => {
                let Value::List(items) = value else {
                    return Ok(false);
                };
                if items.len() != guards.len() {
                    return Ok(false);
                }
                for (guard, item) in guards.iter().zip(items) {
                    if !guard.matches(item, ctx)? {
                        return Ok(false);
                    }
                }
                Ok(true)
            }
            Guard::Capability(name) => Ok(respond_to(value, name)),
            Guard::AnyOf(guards) => {
                for guard in guards {
                    if guard.matches(value, ctx)? {
                        return Ok(true);
                    }
                }
                Ok(false)
            }
            Guard::AllOf(guards) => {
                for guard in guards {
                    if !guard.matches(value, ctx)? {
                        return Ok(false);
                    }
                }
                Ok(true)
            }
            Guard::Having(properties) => {
                for (name, expected) in properties {
                    match invoke_capability(value, name) {
                        Some(actual) if &actual == expected => {}
                        _ => return Ok(false),
                    }
                }
                Ok(true)
            }
            Guard::Supporting(names) => Ok(names.iter().all(|name| respond_to(value, name))),
        }
    }
}
