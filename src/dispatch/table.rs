//! Operation-keyed dispatch table and the call entry point.

use std::collections::{BTreeMap, HashMap};
use std::fmt;
use std::sync::Arc;

use crate::errors::DispatchError;
use crate::guard::Guard;
use crate::receiver::Receiver;
use crate::value::Value;

use super::call::CallArgs;
use super::clause::{Clause, Handler};
use super::registry::Registry;

/// Guarded implementations for a set of operations, owned by the host type.
///
/// Build the table while defining the host (each `on` appends a clause, in
/// order), then treat it as read-only and route calls through
/// [`dispatch`](DispatchTable::dispatch). There is no interception magic
/// and no shared global state: the table is an ordinary value.
///
/// ```
/// use multidispatch::{DispatchTable, Guard, Value, ValueType};
///
/// let mut table = DispatchTable::new();
/// table.on("describe", [Guard::instance_of(ValueType::Int)], |_, _| {
///     Ok(Value::Str("int".into()))
/// });
/// table.set_default("describe", |_, _| Ok(Value::Str("other".into())));
///
/// let result = table.call(&(), "describe", vec![Value::Int(5)]).unwrap();
/// assert_eq!(result, Value::Str("int".into()));
/// ```
#[derive(Default)]
pub struct DispatchTable {
    registries: HashMap<String, Registry>,
}

impl DispatchTable {
    /// An empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Declare a clause: positional guards only.
    pub fn on<H>(
        &mut self,
        operation: impl Into<String>,
        guards: impl IntoIterator<Item = Guard>,
        handler: H,
    ) where
        H: Fn(&dyn Receiver, &CallArgs) -> Result<Value, anyhow::Error> + Send + Sync + 'static,
    {
        self.on_named(
            operation,
            guards,
            std::iter::empty::<(String, Guard)>(),
            handler,
        );
    }

    /// Declare a clause with positional and named guards.
    pub fn on_named<S, H>(
        &mut self,
        operation: impl Into<String>,
        guards: impl IntoIterator<Item = Guard>,
        named: impl IntoIterator<Item = (S, Guard)>,
        handler: H,
    ) where
        S: Into<String>,
        H: Fn(&dyn Receiver, &CallArgs) -> Result<Value, anyhow::Error> + Send + Sync + 'static,
    {
        let clause = Clause::new(
            guards.into_iter().collect(),
            named
                .into_iter()
                .map(|(name, guard)| (name.into(), guard))
                .collect::<BTreeMap<_, _>>(),
            Arc::new(handler) as Handler,
        );
        self.registry_mut(operation.into()).push_clause(clause);
    }

    /// Set or replace the operation's default handler.
    pub fn set_default<H>(&mut self, operation: impl Into<String>, handler: H)
    where
        H: Fn(&dyn Receiver, &CallArgs) -> Result<Value, anyhow::Error> + Send + Sync + 'static,
    {
        self.registry_mut(operation.into())
            .set_default(Arc::new(handler) as Handler);
    }

    /// Dispatch a call: resolve the operation's registry against the
    /// arguments, then invoke the selected handler with the receiver and
    /// the original arguments.
    ///
    /// # Errors
    ///
    /// [`DispatchError::NotResolved`] when nothing matches (an operation
    /// with no declarations at all resolves like an empty registry);
    /// guard-evaluation and handler errors propagate.
    pub fn dispatch(
        &self,
        receiver: &dyn Receiver,
        operation: &str,
        args: &CallArgs,
    ) -> Result<Value, DispatchError> {
        let Some(registry) = self.registries.get(operation) else {
            return Err(DispatchError::NotResolved {
                operation: operation.to_string(),
                positional: args.positional.clone(),
                named: args.named.clone(),
            });
        };
        let handler = registry.resolve(args, receiver)?;
        handler(receiver, args).map_err(DispatchError::from)
    }

    /// Positional-only shorthand for [`dispatch`](DispatchTable::dispatch).
    pub fn call(
        &self,
        receiver: &dyn Receiver,
        operation: &str,
        positional: Vec<Value>,
    ) -> Result<Value, DispatchError> {
        self.dispatch(receiver, operation, &CallArgs::new(positional))
    }

    /// Names of all declared operations, sorted.
    pub fn operations(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.registries.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    /// The registry of one operation, if declared.
    pub fn registry(&self, operation: &str) -> Option<&Registry> {
        self.registries.get(operation)
    }

    /// Number of declared operations.
    pub fn len(&self) -> usize {
        self.registries.len()
    }

    /// Whether no operation has been declared.
    pub fn is_empty(&self) -> bool {
        self.registries.is_empty()
    }

    // Registries come into existence on first declaration.
    fn registry_mut(&mut self, operation: String) -> &mut Registry {
        self.registries
            .entry(operation)
            .or_insert_with_key(|name| Registry::new(name.clone()))
    }
}

impl fmt::Debug for DispatchTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DispatchTable")
            .field("operations", &self.operations())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use regex::Regex;

    use crate::guard::{either, exact, having, supporting};
    use crate::value::ValueType;

    use super::*;

    fn str_result(s: &'static str) -> Result<Value, anyhow::Error> {
        Ok(Value::Str(s.to_string()))
    }

    #[test]
    fn test_dispatch_by_argument_type() {
        let mut table = DispatchTable::new();
        table.on("describe", [Guard::instance_of(ValueType::Int)], |_, _| {
            str_result("int")
        });
        table.on("describe", [Guard::instance_of(ValueType::Str)], |_, _| {
            str_result("str")
        });
        table.set_default("describe", |_, _| str_result("other"));

        let call = |v: Value| table.call(&(), "describe", vec![v]).unwrap();
        assert_eq!(call(Value::Int(5)), Value::Str("int".into()));
        assert_eq!(call(Value::Str("x".into())), Value::Str("str".into()));
        assert_eq!(call(Value::Float(3.14)), Value::Str("other".into()));
    }

    #[test]
    fn test_dispatch_on_property_results() {
        let mut table = DispatchTable::new();
        table.on("classify", [having([("length", 0)])], |_, _| {
            str_result("empty")
        });
        table.set_default("classify", |_, _| str_result("nonempty"));

        let empty = table
            .call(&(), "classify", vec![Value::list(Vec::<i64>::new())])
            .unwrap();
        let full = table
            .call(&(), "classify", vec![Value::list([1, 2, 3])])
            .unwrap();
        assert_eq!(empty, Value::Str("empty".into()));
        assert_eq!(full, Value::Str("nonempty".into()));
    }

    #[test]
    fn test_dispatch_on_union_guard() {
        let mut table = DispatchTable::new();
        table.on(
            "accept",
            [either([
                Guard::instance_of(ValueType::Int),
                Guard::instance_of(ValueType::List),
            ])],
            |_, _| str_result("num_or_seq"),
        );

        assert!(table.call(&(), "accept", vec![Value::Int(2)]).is_ok());
        assert!(table.call(&(), "accept", vec![Value::list([1, 2])]).is_ok());
        let err = table
            .call(&(), "accept", vec![Value::Str("s".into())])
            .unwrap_err();
        assert!(matches!(err, DispatchError::NotResolved { .. }));
    }

    #[test]
    fn test_dispatch_on_sequence_shape() {
        let mut table = DispatchTable::new();
        table.on(
            "pair",
            [Guard::sequence([
                Guard::instance_of(ValueType::Int),
                Guard::instance_of(ValueType::Str),
            ])],
            |_, _| str_result("pair"),
        );

        let good = Value::List(vec![Value::Int(1), Value::Str("a".into())]);
        assert!(table.call(&(), "pair", vec![good]).is_ok());
        // Second element fails its guard.
        let bad = Value::list([1, 2]);
        assert!(table.call(&(), "pair", vec![bad]).is_err());
        // Length mismatch.
        let short = Value::list([1]);
        assert!(table.call(&(), "pair", vec![short]).is_err());
    }

    #[test]
    fn test_dispatch_on_capability() {
        let mut table = DispatchTable::new();
        table.on("iterate", [supporting(["each"])], |_, _| {
            str_result("iterable")
        });

        assert!(table.call(&(), "iterate", vec![Value::list([1])]).is_ok());
        let err = table
            .call(&(), "iterate", vec![Value::Int(3)])
            .unwrap_err();
        assert!(matches!(err, DispatchError::NotResolved { .. }));
    }

    #[test]
    fn test_named_guards_require_exact_keys() {
        let mut table = DispatchTable::new();
        table.on_named(
            "scale",
            [Guard::instance_of(ValueType::Number)],
            [("factor", Guard::instance_of(ValueType::Int))],
            |_, args| {
                let factor = args.named_arg("factor").cloned();
                match (args.arg(0), factor) {
                    (Some(Value::Int(x)), Some(Value::Int(f))) => Ok(Value::Int(x * f)),
                    _ => Ok(Value::Nil),
                }
            },
        );

        let with_factor = CallArgs::positional([3]).named("factor", 4);
        assert_eq!(
            table.dispatch(&(), "scale", &with_factor).unwrap(),
            Value::Int(12)
        );
        // Same positional shape, no named args: no clause.
        let without = CallArgs::positional([3]);
        assert!(table.dispatch(&(), "scale", &without).is_err());
        // Extra named arg: no clause.
        let extra = CallArgs::positional([3]).named("factor", 4).named("pad", 0);
        assert!(table.dispatch(&(), "scale", &extra).is_err());
    }

    #[test]
    fn test_pattern_and_exact_guards_in_one_operation() {
        let mut table = DispatchTable::new();
        table.on("route", [exact("help")], |_, _| str_result("usage"));
        table.on(
            "route",
            [Guard::pattern(Regex::new(r"^--\w+$").unwrap())],
            |_, _| str_result("flag"),
        );
        table.set_default("route", |_, _| str_result("positional"));

        let call = |s: &str| table.call(&(), "route", vec![Value::Str(s.into())]).unwrap();
        assert_eq!(call("help"), Value::Str("usage".into()));
        assert_eq!(call("--verbose"), Value::Str("flag".into()));
        assert_eq!(call("input.txt"), Value::Str("positional".into()));
    }

    #[test]
    fn test_undeclared_operation_fails_to_resolve() {
        let table = DispatchTable::new();
        let err = table.call(&(), "ghost", vec![Value::Int(1)]).unwrap_err();
        assert!(matches!(
            err,
            DispatchError::NotResolved { operation, .. } if operation == "ghost"
        ));
    }

    #[test]
    fn test_handler_errors_pass_through() {
        let mut table = DispatchTable::new();
        table.on("explode", [Guard::any()], |_, _| {
            Err(anyhow::anyhow!("handler failed"))
        });
        let err = table.call(&(), "explode", vec![Value::Nil]).unwrap_err();
        assert!(matches!(err, DispatchError::Handler(_)));
        assert_eq!(err.to_string(), "handler failed");
    }

    #[test]
    fn test_introspection() {
        let mut table = DispatchTable::new();
        assert!(table.is_empty());
        table.on("b", [Guard::any()], |_, _| Ok(Value::Nil));
        table.on("a", [Guard::any()], |_, _| Ok(Value::Nil));
        table.on("a", [Guard::none()], |_, _| Ok(Value::Nil));
        assert_eq!(table.len(), 2);
        assert_eq!(table.operations(), ["a", "b"]);
        assert_eq!(table.registry("a").unwrap().clauses().len(), 2);
        assert!(!table.registry("a").unwrap().has_default());
        assert!(table.registry("missing").is_none());
    }
}
