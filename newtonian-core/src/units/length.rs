//! Length units.
//!
//! The canonical unit for this dimension is [`M`] (`scale == 1.0`).
//!
//! ```rust
//! use newtonian_core::units::{KM, M};
//!
//! let d = 1.25 * KM;
//! assert!((d.to(&M).unwrap().as_scalar().unwrap() - 1250.0).abs() < 1e-12);
//! ```

use super::unit;
use crate::Dimension;

unit!(
    /// Kilometre (`1000 m`).
    KM, "km", Dimension::LENGTH, 1_000.0
);
unit!(
    /// Metre (SI base unit).
    M, "m", Dimension::LENGTH, 1.0
);
unit!(
    /// Centimetre (`1e-2 m`).
    CM, "cm", Dimension::LENGTH, 1e-2
);
unit!(
    /// Millimetre (`1e-3 m`).
    MM, "mm", Dimension::LENGTH, 1e-3
);
unit!(
    /// Micrometre (`1e-6 m`).
    UM, "µm", Dimension::LENGTH, 1e-6
);
unit!(
    /// Nanometre (`1e-9 m`).
    NM, "nm", Dimension::LENGTH, 1e-9
);
