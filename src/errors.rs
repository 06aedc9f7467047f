//! Error types for guard evaluation and clause resolution.

use std::collections::BTreeMap;

use thiserror::Error;

use crate::value::Value;

/// Errors surfaced by dispatch.
///
/// Resolution synthesizes exactly one error of its own: [`NotResolved`].
/// Everything else is propagated: a named-predicate guard naming a method
/// the receiver does not define raises [`MissingPredicate`], and failures
/// returned by user handlers pass through [`Handler`] untranslated.
///
/// [`NotResolved`]: DispatchError::NotResolved
/// [`MissingPredicate`]: DispatchError::MissingPredicate
/// [`Handler`]: DispatchError::Handler
#[derive(Debug, Error)]
pub enum DispatchError {
    /// No clause matched the call and the operation has no default handler.
    ///
    /// Carries a snapshot of the attempted call for diagnosis.
    #[error("no matching `{operation}` clause for arguments {positional:?} {named:?}")]
    NotResolved {
        /// The operation that failed to resolve.
        operation: String,
        /// Positional arguments of the attempted call.
        positional: Vec<Value>,
        /// Named arguments of the attempted call.
        named: BTreeMap<String, Value>,
    },

    /// A named-predicate guard referenced a predicate the receiver does not
    /// define. A predicate that exists but returns `false` is an ordinary
    /// non-match, never this error.
    #[error("receiver does not define predicate `{name}`")]
    MissingPredicate {
        /// The predicate name, marker included.
        name: String,
    },

    /// A resolved handler returned an error.
    #[error(transparent)]
    Handler(#[from] anyhow::Error),
}
