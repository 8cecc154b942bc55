//! Runtime type checking: descriptors, matching and validated calls.
//!
//! A [`TypeDescriptor`] is a closed tree (`Any`, plain types, unions, `list`/`tuple`/`dict`/`set`, callables) that
//! [`matches`] evaluates against a dynamic [`Value`]. A [`ValidatedCall`] binds a [`NativeFn`] to a [`Signature`],
//! rejecting mismatched declarations when it is built and mismatched arguments or return values when it is called.
//!
//! ```rust
//! use newtonian_core::typecheck::{matches, TypeDescriptor, Value};
//!
//! let d: TypeDescriptor = "tuple[int, float, str]".parse().unwrap();
//! let v = Value::Tuple(vec![Value::Int(3), Value::Float(3.5), Value::from("a")]);
//! assert!(matches(&v, &d).unwrap());
//! assert!(!matches(&Value::Tuple(vec![Value::Int(1), Value::Int(2)]), &d).unwrap());
//! ```

mod builtins;
mod convert;
mod descriptor;
mod matcher;
mod parse;
mod signature;
mod validated;
mod value;

pub use builtins::CallTable;
pub use convert::{bound_arg, Describe, FromValue, IntoValue};
pub use descriptor::{PlainType, TypeDescriptor};
pub use matcher::matches;
pub use signature::{Param, Signature};
pub use validated::{NativeFn, ValidatedCall};
pub use value::{Class, Function, FunctionBody, Object, Value};

pub use crate::error::{TypeCheckError, TypeCheckResult};
