//! Unit-checked physical quantities and runtime-validated calls.
//!
//! `newtonian` is the user-facing crate in this workspace. It re-exports the full API from `newtonian-core` and the
//! `#[validated]` attribute from `newtonian-derive`.
//!
//! A value is a [`Quantity`]: a scalar or vector payload paired with a [`Unit`]. Units carry their [`Dimension`]
//! and a scale to the canonical unit, so `1 km + 500 m` is `1500 m` and `1 m + 1 s` is an error, decided at run time.
//!
//! # What this crate solves
//!
//! - Dimensional safety for quantities whose units are only known at run time (parsed, configured, user supplied).
//! - Scalar/vector discipline: a vector is never silently broadcast onto a scalar sum.
//! - Declarative runtime signatures: a function's parameter and return types are checked on every call.
//!
//! # What this crate does not try to solve
//!
//! - Compile-time units. For that, a zero-sized marker type per unit is the better design.
//! - Affine temperature scales or logarithmic units.
//! - Arbitrary-precision arithmetic: payloads are `f64`.
//!
//! # Quick start
//!
//! ```rust
//! use newtonian::units::{KM, M, S};
//!
//! let d = (1.0 * KM).add(&(500.0 * M)).unwrap();
//! assert_eq!(d, 1500.0 * M);
//!
//! let v = d.div(&(10.0 * S)).unwrap();
//! assert_eq!(v.to(&(M / S)).unwrap().as_scalar(), Some(150.0));
//!
//! assert!((1.0 * M).add(&(1.0 * S)).is_err());
//! ```
//!
//! Validated calls:
//!
//! ```rust
//! use newtonian::typecheck::Value;
//! use newtonian::validated;
//!
//! #[validated]
//! fn scale(x: f64, k: i64) -> f64 {
//!     x * k as f64
//! }
//!
//! let call = scale_validated().unwrap();
//! assert_eq!(call.call_positional(&[Value::Float(1.5), Value::Int(2)]).unwrap(), Value::Float(3.0));
//! assert!(call.call_positional(&[Value::Int(1), Value::Int(2)]).is_err());
//! ```
//!
//! # Modules
//!
//! - [`units`]: predefined units by dimension (`length`, `mass`, `time`, `angular`, `velocity`, …).
//! - [`typecheck`]: type descriptors, the structural matcher and [`ValidatedCall`](typecheck::ValidatedCall).
//!
//! # Feature flags
//!
//! - `config` (default): [`UnitConfig`] loads extra unit definitions from TOML.
//! - `serde`: `Serialize`/`Deserialize` for dimensions, units and quantities.
//!
//! # Errors
//!
//! Quantity operations return [`UnitResult`]; validated calls return [`TypeCheckResult`], which wraps unit errors
//! raised inside a call body. Nothing in the public API panics on bad input.
//!
//! # SemVer and stability
//!
//! This workspace is currently `0.x`. Expect breaking changes between minor versions until `1.0`.
#![forbid(unsafe_code)]

pub use newtonian_core::*;

/// Generates a `<fn>_validated()` constructor returning a [`typecheck::ValidatedCall`] for a free function.
///
/// Parameter and return types must implement [`typecheck::Describe`]; parameters also implement
/// [`typecheck::FromValue`] and the return type [`typecheck::IntoValue`]. Use `#[validated(fallible)]` for functions
/// returning `Result<T, E>` where `E: Into<TypeCheckError>`.
pub use newtonian_derive::validated;

pub use newtonian_core::units::angular;
pub use newtonian_core::units::frequency;
pub use newtonian_core::units::length;
pub use newtonian_core::units::mass;
pub use newtonian_core::units::mechanics;
pub use newtonian_core::units::time;
pub use newtonian_core::units::velocity;
