//! Frequency units.

use super::unit;
use crate::Dimension;

unit!(
    /// Hertz (`1/s`).
    HZ, "Hz", Dimension::FREQUENCY, 1.0
);
