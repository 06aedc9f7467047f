//! Clause registration and resolution.
//!
//! One [`Registry`] per operation holds guarded [`Clause`]s in registration
//! order plus an optional default handler; a [`DispatchTable`] keys the
//! registries by operation name and exposes the call entry point. First
//! full match wins; specificity is the registration order.

pub mod call;
pub mod clause;
pub mod registry;
pub mod table;

pub use self::call::CallArgs;
pub use self::clause::{Clause, Handler};
pub use self::registry::Registry;
pub use self::table::DispatchTable;
