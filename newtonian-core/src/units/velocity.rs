//! Velocity and acceleration units.
//!
//! Spelled-out composites such as `M / S` work too; these constants exist so they can be used in `const` contexts.

use super::unit;
use crate::Dimension;

/// Standard gravity in m/s², `g₀ = 9.80665` (exact).
pub const STANDARD_GRAVITY: f64 = 9.806_65;

unit!(
    /// Metres per second.
    M_PER_S, "m/s", Dimension::VELOCITY, 1.0
);
unit!(
    /// Kilometres per hour.
    KM_PER_H, "km/h", Dimension::VELOCITY, 1_000.0 / 3_600.0
);
unit!(
    /// Metres per second squared.
    M_PER_S2, "m/s^2", Dimension::ACCELERATION, 1.0
);
unit!(
    /// Radians per second.
    RAD_PER_S, "rad/s", Dimension::ANGULAR_VELOCITY, 1.0
);
unit!(
    /// Radians per second squared.
    RAD_PER_S2, "rad/s^2", Dimension::ANGULAR_ACCELERATION, 1.0
);
