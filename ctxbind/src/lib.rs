//! Variable bindings for the `ctxi` script host.
//!
//! A binding sits between a script evaluator and a [`VariableStore`] shared with the
//! surrounding execution context. Two policies are provided:
//!
//! - [`ContextBinding`]: permissive. Reading an unknown name yields [`Value::Nil`] and every
//!   name is reported as existing, so scripts may assign without declaring first.
//! - [`StrictBinding`]: reading an unknown name fails with [`BindingError::MissingVariable`]
//!   and existence checks reflect the store.

pub mod binding;
pub mod store;
pub mod value;

mod test;

pub use binding::{BindingError, BindingKind, ContextBinding, StrictBinding, VariableBinding};
pub use store::VariableStore;
pub use value::{InvalidOp, Value};
