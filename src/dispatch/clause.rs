//! One guarded implementation of an operation.

use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

use crate::errors::DispatchError;
use crate::guard::Guard;
use crate::receiver::Receiver;
use crate::value::Value;

use super::call::CallArgs;

/// A handler body: invoked with the receiver and the original call
/// arguments once its clause is selected.
pub type Handler =
    Arc<dyn Fn(&dyn Receiver, &CallArgs) -> Result<Value, anyhow::Error> + Send + Sync>;

/// Guards plus the handler they protect.
#[derive(Clone)]
pub struct Clause {
    guards: Vec<Guard>,
    named_guards: BTreeMap<String, Guard>,
    handler: Handler,
}

impl Clause {
    pub fn new(
        guards: Vec<Guard>,
        named_guards: BTreeMap<String, Guard>,
        handler: Handler,
    ) -> Self {
        Self {
            guards,
            named_guards,
            handler,
        }
    }

    /// Positional guards, in declaration order.
    pub fn guards(&self) -> &[Guard] {
        &self.guards
    }

    /// Named guards.
    pub fn named_guards(&self) -> &BTreeMap<String, Guard> {
        &self.named_guards
    }

    /// The guarded handler.
    pub fn handler(&self) -> &Handler {
        &self.handler
    }

    /// Number of positional guards; a clause only ever matches calls of
    /// exactly this arity.
    pub fn arity(&self) -> usize {
        self.guards.len()
    }

    /// Full-match test against a call.
    ///
    /// The positional count must equal the guard count and the named key
    /// sets must be exactly equal (no subset tolerance in either
    /// direction) before any guard is evaluated. Guard evaluation errors
    /// propagate.
    pub fn matches(&self, args: &CallArgs, ctx: &dyn Receiver) -> Result<bool, DispatchError> {
        if self.guards.len() != args.positional.len() {
            return Ok(false);
        }
        if !self.named_guards.keys().eq(args.named.keys()) {
            return Ok(false);
        }
        for (guard, arg) in self.guards.iter().zip(&args.positional) {
            if !guard.matches(arg, ctx)? {
                return Ok(false);
            }
        }
        for (name, guard) in &self.named_guards {
            // Key-set equality above guarantees the argument exists.
            if !guard.matches(&args.named[name], ctx)? {
                return Ok(false);
            }
        }
        Ok(true)
    }
}

impl fmt::Debug for Clause {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Clause")
            .field("guards", &self.guards)
            .field("named_guards", &self.named_guards)
            .field("handler", &"..")
            .finish()
    }
}
