//! Mass units.
//!
//! The canonical unit for this dimension is [`KG`], so `G.scale() == 0.001`.

use super::unit;
use crate::Dimension;

unit!(
    /// Tonne (`1000 kg`).
    T, "t", Dimension::MASS, 1_000.0
);
unit!(
    /// Kilogram (SI base unit).
    KG, "kg", Dimension::MASS, 1.0
);
unit!(
    /// Gram (`1e-3 kg`).
    G, "g", Dimension::MASS, 1e-3
);
unit!(
    /// Milligram (`1e-6 kg`).
    MG, "mg", Dimension::MASS, 1e-6
);
