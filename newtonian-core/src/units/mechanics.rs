//! Named mechanical units.
//!
//! These carry their own symbol, so `N * M` prints as `N·m` rather than being re-spelled in base units.

use super::unit;
use crate::Dimension;

unit!(
    /// Newton (`kg·m/s^2`).
    N, "N", Dimension::FORCE, 1.0
);
unit!(
    /// Joule (`N·m`).
    J, "J", Dimension::ENERGY, 1.0
);
unit!(
    /// Watt (`J/s`).
    W, "W", Dimension::POWER, 1.0
);
