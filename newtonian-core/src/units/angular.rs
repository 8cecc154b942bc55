//! Angle units.
//!
//! Angle is a base dimension here; the canonical unit is [`RAD`].
//!
//! ```rust
//! use newtonian_core::units::{DEG, RAD};
//!
//! let right = 90.0 * DEG;
//! let r = right.to(&RAD).unwrap().as_scalar().unwrap();
//! assert!((r - core::f64::consts::FRAC_PI_2).abs() < 1e-12);
//! ```

use super::unit;
use crate::Dimension;
use core::f64::consts::{PI, TAU};

unit!(
    /// Revolution (`2π rad`).
    REV, "rev", Dimension::ANGLE, TAU
);
unit!(
    /// Radian (canonical).
    RAD, "rad", Dimension::ANGLE, 1.0
);
unit!(
    /// Degree (`π/180 rad`).
    DEG, "deg", Dimension::ANGLE, PI / 180.0
);
unit!(
    /// Milliradian (`1e-3 rad`).
    MRAD, "mrad", Dimension::ANGLE, 1e-3
);
