//! Per-operation clause registry and the resolution engine.

use std::fmt;

use crate::errors::DispatchError;
use crate::receiver::Receiver;

use super::call::CallArgs;
use super::clause::{Clause, Handler};

/// The ordered clauses of one operation, plus an optional default handler.
///
/// Clauses are append-only and kept in registration order; resolution is a
/// linear first-match-wins scan. Specificity is whatever order the clauses
/// were registered in; the registry never reorders.
#[derive(Clone)]
pub struct Registry {
    operation: String,
    clauses: Vec<Clause>,
    default: Option<Handler>,
}

impl Registry {
    /// An empty registry for the named operation.
    pub fn new(operation: impl Into<String>) -> Self {
        Self {
            operation: operation.into(),
            clauses: Vec::new(),
            default: None,
        }
    }

    /// The operation this registry belongs to.
    pub fn operation(&self) -> &str {
        &self.operation
    }

    /// Append a clause. Registration order is resolution order.
    pub fn push_clause(&mut self, clause: Clause) {
        log::debug!(
            "[Registry] `{}` clause {} registered (arity {})",
            self.operation,
            self.clauses.len(),
            clause.arity()
        );
        self.clauses.push(clause);
    }

    /// Set the default handler, replacing any earlier one.
    pub fn set_default(&mut self, handler: Handler) {
        if self.default.is_some() {
            log::debug!("[Registry] `{}` default handler replaced", self.operation);
        }
        self.default = Some(handler);
    }

    /// Registered clauses, in order.
    pub fn clauses(&self) -> &[Clause] {
        &self.clauses
    }

    /// Whether a default handler is registered.
    pub fn has_default(&self) -> bool {
        self.default.is_some()
    }

    /// Select the handler for a call.
    ///
    /// Scans clauses in registration order and returns the first whose
    /// guards fully match; falls back to the default handler.
    ///
    /// # Errors
    ///
    /// [`DispatchError::NotResolved`] when no clause matches and no default
    /// exists. Guard-evaluation errors propagate unmodified.
    pub fn resolve(
        &self,
        args: &CallArgs,
        ctx: &dyn Receiver,
    ) -> Result<&Handler, DispatchError> {
        for (index, clause) in self.clauses.iter().enumerate() {
            log::trace!(
                "[Registry] `{}` testing clause {index}: {clause:?}",
                self.operation
            );
            if clause.matches(args, ctx)? {
                log::debug!("[Registry] `{}` resolved to clause {index}", self.operation);
                return Ok(clause.handler());
            }
        }
        if let Some(handler) = &self.default {
            log::debug!("[Registry] `{}` fell back to default", self.operation);
            return Ok(handler);
        }
        Err(DispatchError::NotResolved {
            operation: self.operation.clone(),
            positional: args.positional.clone(),
            named: args.named.clone(),
        })
    }
}

impl fmt::Debug for Registry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Registry")
            .field("operation", &self.operation)
            .field("clauses", &self.clauses)
            .field("default", &self.default.as_ref().map(|_| ".."))
            .finish()
    }
}
