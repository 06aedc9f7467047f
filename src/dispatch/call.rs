//! Call shape: the arguments a dispatch is resolved against.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::value::Value;

/// Positional and named arguments of one call.
///
/// The named map is always present; a call with no named arguments and a
/// call with an explicitly empty named set are the same value, so nothing
/// downstream has to tell them apart.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CallArgs {
    /// Positional arguments, in call order.
    pub positional: Vec<Value>,
    /// Named arguments.
    pub named: BTreeMap<String, Value>,
}

impl CallArgs {
    /// A call with only positional arguments.
    pub fn new(positional: Vec<Value>) -> Self {
        Self {
            positional,
            named: BTreeMap::new(),
        }
    }

    /// A call built from anything convertible to values.
    pub fn positional(args: impl IntoIterator<Item = impl Into<Value>>) -> Self {
        Self::new(args.into_iter().map(Into::into).collect())
    }

    /// Builder-style named argument.
    pub fn named(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.named.insert(name.into(), value.into());
        self
    }

    /// Positional argument by index.
    pub fn arg(&self, index: usize) -> Option<&Value> {
        self.positional.get(index)
    }

    /// Named argument by name.
    pub fn named_arg(&self, name: &str) -> Option<&Value> {
        self.named.get(name)
    }

    /// Number of positional arguments.
    pub fn arity(&self) -> usize {
        self.positional.len()
    }
}

impl From<Vec<Value>> for CallArgs {
    fn from(positional: Vec<Value>) -> Self {
        Self::new(positional)
    }
}
