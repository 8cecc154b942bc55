//! Core types for dimensionally checked physical quantities and runtime call validation.
//!
//! `newtonian-core` provides two cooperating pieces:
//!
//! - A *quantity engine*: a [`Dimension`] is an exponent vector over eight base dimensions, a [`Unit`] is a symbol,
//!   a dimension and a scale to the canonical unit, and a [`Quantity`] pairs a scalar or vector payload with a unit.
//!   Every operation that could mix dimensions or shapes returns a [`UnitResult`].
//! - A *runtime type checker* ([`typecheck`]): a closed [`TypeDescriptor`](typecheck::TypeDescriptor) tree matched
//!   against dynamic [`Value`](typecheck::Value)s, and a [`ValidatedCall`](typecheck::ValidatedCall) wrapper that
//!   checks every argument and the return value of a function against its declared signature.
//!
//! Most users should depend on `newtonian` (the facade crate), which also provides the `#[validated]` attribute.
//!
//! # What this crate solves
//!
//! - Runtime separation of dimensions (length vs time vs angle, …) including derived ones (`kg·m/s^2`).
//! - Explicit scalar/vector discrimination: adding a scalar to a vector is an error, never a broadcast.
//! - Readable composite unit symbols built by factor algebra (`m/s` × `s` = `m`).
//!
//! # What this crate does not try to solve
//!
//! - Compile-time dimension checking; validation is a runtime contract.
//! - Affine units (temperature scales with a zero-point offset). Only ratio units are modeled.
//! - Symbolic simplification beyond exponent arithmetic on symbol atoms.
//!
//! # Quick start
//!
//! ```rust
//! use newtonian_core::units::{KM, M, S};
//!
//! let d = 1.5 * KM;
//! let t = 60.0 * S;
//! let v = d.div(&t).unwrap();
//! assert!(v.is_scalar(&(M / S)));
//! assert_eq!(v.to(&(M / S)).unwrap().as_scalar(), Some(25.0));
//! ```
//!
//! Euler integration over vector quantities:
//!
//! ```rust
//! use newtonian_core::units::{M, S};
//!
//! let dt = (1.0 / 12.0) * S;
//! let vel = [3.0, 30.0] * (M / S);
//! let acc = [0.0, -9.80665] * (M / (S * S));
//! let vel = vel.add(&acc.mul(&dt).unwrap()).unwrap();
//! assert!(vel.is_vector(&(M / S)));
//! ```
//!
//! # Feature flags
//!
//! - `serde`: `Serialize`/`Deserialize` for [`Dimension`], [`Unit`], [`Magnitude`] and [`Quantity`].
//! - `config` (default): TOML unit definitions via [`UnitConfig`]; implies `serde`.
//!
//! # Logging
//!
//! The crate logs through the [`log`] facade and never installs a logger.

#![deny(missing_docs)]
#![forbid(unsafe_code)]

mod dimension;
mod error;
mod quantity;
mod registry;
mod symbol;
mod unit;

#[cfg(feature = "config")]
mod config;

pub mod typecheck;
pub mod units;

pub use dimension::{BaseDimension, Dimension, Op, BASE_COUNT};
pub use error::{TypeCheckError, TypeCheckResult, UnitError, UnitResult};
pub use quantity::{Magnitude, Quantity, Shape};
pub use registry::{UnitRegistry, DEFAULT_TOLERANCE};
pub use unit::Unit;

#[cfg(feature = "config")]
pub use config::{UnitConfig, UnitDefinition};
