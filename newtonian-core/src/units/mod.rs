//! Predefined units grouped by dimension.
//!
//! Every unit is a `const` [`Unit`](crate::Unit), so literals read like the physics they describe:
//!
//! ```rust
//! use newtonian_core::units::{M, S};
//!
//! let v = [3.0, 30.0] * (M / S);
//! assert!(v.is_vector(&(M / S)));
//! ```
//!
//! ## Modules
//!
//! - [`length`]: metre (canonical) and common SI prefixes.
//! - [`mass`]: kilogram (canonical), gram, tonne.
//! - [`time`]: second (canonical), minute, hour, day.
//! - [`angular`]: radian (canonical), degree, revolution.
//! - [`velocity`]: linear/angular velocity and acceleration units.
//! - [`frequency`]: hertz.
//! - [`mechanics`]: newton, joule, watt.

/// Declares a `const` [`Unit`] with a doc line.
macro_rules! unit {
    ($(#[$meta:meta])* $name:ident, $sym:literal, $dim:expr, $scale:expr) => {
        $(#[$meta])*
        #[doc = concat!("\n\nSymbol `", $sym, "`.")]
        pub const $name: $crate::Unit = $crate::Unit::from_static($sym, $dim, $scale);
    };
}
pub(crate) use unit;

pub mod angular;
pub mod frequency;
pub mod length;
pub mod mass;
pub mod mechanics;
pub mod time;
pub mod velocity;

pub use angular::*;
pub use frequency::*;
pub use length::*;
pub use mass::*;
pub use mechanics::*;
pub use time::*;
pub use velocity::*;

use crate::Unit;

/// Every predefined unit, used to seed [`UnitRegistry::si`](crate::UnitRegistry::si).
pub fn all() -> Vec<Unit> {
    vec![
        // length
        KM, M, CM, MM, UM, NM,
        // mass
        T, KG, G, MG,
        // time
        D, H, MIN, S, MS, US,
        // angle
        REV, RAD, DEG, MRAD,
        // derived
        HZ, N, J, W,
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn symbols_are_unique() {
        let units = all();
        let symbols: HashSet<&str> = units.iter().map(|u| u.symbol()).collect();
        assert_eq!(symbols.len(), units.len());
    }

    #[test]
    fn canonical_units_have_unit_scale() {
        for u in [M, KG, S, RAD] {
            assert_eq!(u.scale(), 1.0);
        }
    }
}
