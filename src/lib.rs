//! # multidispatch
//!
//! Guarded multiple dispatch: declare several implementations of one named
//! operation, each qualified by guards over its arguments, and route every
//! call to the first implementation whose guards all hold, with an
//! optional default when none do.
//!
//! Guards go well beyond types: exact values, regex patterns, structural
//! sequence shapes, capability probes, receiver predicates, arbitrary
//! closures, and OR/AND combinations of all of these.
//!
//! ```
//! use multidispatch::{DispatchTable, Guard, Value, ValueType, either};
//!
//! let mut table = DispatchTable::new();
//! table.on("describe", [Guard::instance_of(ValueType::Int)], |_, _| {
//!     Ok(Value::Str("an integer".into()))
//! });
//! table.on(
//!     "describe",
//!     [either([
//!         Guard::instance_of(ValueType::List),
//!         Guard::instance_of(ValueType::Map),
//!     ])],
//!     |_, _| Ok(Value::Str("a collection".into())),
//! );
//! table.set_default("describe", |_, _| Ok(Value::Str("something else".into())));
//!
//! assert_eq!(
//!     table.call(&(), "describe", vec![Value::Int(7)]).unwrap(),
//!     Value::Str("an integer".into())
//! );
//! assert_eq!(
//!     table.call(&(), "describe", vec![Value::list([1, 2])]).unwrap(),
//!     Value::Str("a collection".into())
//! );
//! assert_eq!(
//!     table.call(&(), "describe", vec![Value::Float(1.5)]).unwrap(),
//!     Value::Str("something else".into())
//! );
//! ```
//!
//! Clauses are scanned in registration order and the first full match wins;
//! there is no specificity inference. Register narrow clauses before broad
//! ones.

pub mod dispatch;
pub mod errors;
pub mod guard;
pub mod receiver;
pub mod value;

pub use dispatch::{CallArgs, Clause, DispatchTable, Handler, Registry};
pub use errors::DispatchError;
pub use guard::{either, exact, full_match, having, supporting, Guard, PredicateFn};
pub use receiver::Receiver;
pub use value::{Object, Value, ValueType};

/// Library version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
