//! Time units.
//!
//! The canonical unit for this dimension is [`S`]. Civil units use `1 d = 86_400 s` (leap seconds ignored).

use super::unit;
use crate::Dimension;

/// Seconds per mean solar day.
pub const SECONDS_PER_DAY: f64 = 86_400.0;

unit!(
    /// Day (`86 400 s`).
    D, "d", Dimension::TIME, SECONDS_PER_DAY
);
unit!(
    /// Hour (`3600 s`).
    H, "h", Dimension::TIME, 3_600.0
);
unit!(
    /// Minute (`60 s`).
    MIN, "min", Dimension::TIME, 60.0
);
unit!(
    /// Second (SI base unit).
    S, "s", Dimension::TIME, 1.0
);
unit!(
    /// Millisecond (`1e-3 s`).
    MS, "ms", Dimension::TIME, 1e-3
);
unit!(
    /// Microsecond (`1e-6 s`).
    US, "µs", Dimension::TIME, 1e-6
);
