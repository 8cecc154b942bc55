//! Symbol lookup for units and parsing of unit expressions.

use crate::error::{UnitError, UnitResult};
use crate::quantity::Quantity;
use crate::symbol::Factors;
use crate::unit::Unit;
use crate::units;
use std::collections::HashMap;

/// Relative tolerance used by [`UnitRegistry::approx_eq`] unless configured otherwise.
pub const DEFAULT_TOLERANCE: f64 = 1e-9;

/// Units indexed by symbol.
///
/// [`UnitRegistry::si`] (also the [`Default`]) knows every constant in [`units`]; further units are added with
/// [`define`](UnitRegistry::define) or loaded from TOML with `UnitConfig`.
///
/// ```rust
/// use newtonian_core::{Dimension, UnitRegistry};
///
/// let reg = UnitRegistry::si();
/// let force = reg.parse("kg·m/s^2").unwrap();
/// assert_eq!(force.dimension(), Dimension::FORCE);
/// assert_eq!(force.symbol(), "kg·m/s^2");
/// ```
#[derive(Clone, Debug)]
pub struct UnitRegistry {
    units: HashMap<String, Unit>,
    tolerance: f64,
}

impl UnitRegistry {
    /// An empty registry.
    pub fn new() -> Self {
        UnitRegistry {
            units: HashMap::new(),
            tolerance: DEFAULT_TOLERANCE,
        }
    }

    /// A registry seeded with the predefined units.
    pub fn si() -> Self {
        let mut reg = Self::new();
        for unit in units::all() {
            reg.units.insert(unit.symbol().to_owned(), unit);
        }
        log::debug!("unit registry seeded with {} predefined units", reg.len());
        reg
    }

    /// Adds `unit` under its own symbol, returning the unit it replaced.
    pub fn define(&mut self, unit: Unit) -> Option<Unit> {
        let previous = self.units.insert(unit.symbol().to_owned(), unit);
        if let Some(prev) = &previous {
            log::warn!("unit `{}` redefined (previous scale {})", prev.symbol(), prev.scale());
        }
        previous
    }

    /// Looks a unit up by its exact symbol.
    pub fn get(&self, symbol: &str) -> Option<&Unit> {
        self.units.get(symbol)
    }

    /// Check if a symbol is registered.
    pub fn contains(&self, symbol: &str) -> bool {
        self.units.contains_key(symbol)
    }

    /// Number of registered units.
    pub fn len(&self) -> usize {
        self.units.len()
    }

    /// Check if no units are registered.
    pub fn is_empty(&self) -> bool {
        self.units.is_empty()
    }

    /// Registered symbols, sorted.
    pub fn symbols(&self) -> Vec<&str> {
        let mut out: Vec<&str> = self.units.keys().map(String::as_str).collect();
        out.sort_unstable();
        out
    }

    /// Relative tolerance for [`approx_eq`](UnitRegistry::approx_eq).
    pub fn tolerance(&self) -> f64 {
        self.tolerance
    }

    /// Sets the comparison tolerance; negative or non-finite values are rejected.
    pub fn set_tolerance(&mut self, tolerance: f64) -> UnitResult<()> {
        self.tolerance = checked_tolerance(tolerance)?;
        Ok(())
    }

    /// [`Quantity::approx_eq`] at this registry's tolerance.
    pub fn approx_eq(&self, a: &Quantity, b: &Quantity) -> bool {
        a.approx_eq(b, self.tolerance)
    }

    /// Resolves a unit expression such as `km/h`, `kg*m/s^2` or `1/(m·s)`.
    ///
    /// A bare registered symbol returns that unit unchanged. Otherwise each atom is looked up and combined; the
    /// result carries the canonical composite symbol.
    pub fn parse(&self, expr: &str) -> UnitResult<Unit> {
        if let Some(unit) = self.get(expr.trim()) {
            return Ok(unit.clone());
        }
        let factors = Factors::parse(expr)?;
        let mut unit = Unit::DIMENSIONLESS;
        for (atom, e) in factors.iter() {
            let base = self
                .get(atom)
                .ok_or_else(|| UnitError::UnknownUnit(atom.to_owned()))?;
            unit = unit * base.powi(e);
        }
        Ok(unit)
    }
}

pub(crate) fn checked_tolerance(tolerance: f64) -> UnitResult<f64> {
    if tolerance.is_finite() && tolerance >= 0.0 {
        Ok(tolerance)
    } else {
        Err(UnitError::Config(format!(
            "tolerance must be a non-negative number, got {tolerance}"
        )))
    }
}

impl Default for UnitRegistry {
    fn default() -> Self {
        Self::si()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dimension::Dimension;
    use crate::units::{H, KM, M, N};
    use approx::assert_relative_eq;

    #[test]
    fn si_knows_predefined_symbols() {
        let reg = UnitRegistry::si();
        assert!(reg.contains("km"));
        assert!(reg.contains("deg"));
        assert!(reg.get("N").unwrap().is_identical(&N));
        assert!(!UnitRegistry::new().contains("m"));
    }

    #[test]
    fn approx_eq_uses_the_registry_tolerance() {
        let mut reg = UnitRegistry::si();
        assert_eq!(reg.tolerance(), DEFAULT_TOLERANCE);

        let a = 1.0 * KM;
        let b = 1000.001 * M;
        assert!(!reg.approx_eq(&a, &b));
        reg.set_tolerance(1e-5).unwrap();
        assert!(reg.approx_eq(&a, &b));
        assert!(reg.set_tolerance(-1.0).is_err());
        assert!(reg.set_tolerance(f64::NAN).is_err());
    }

    #[test]
    fn parse_builds_composite_units() {
        let reg = UnitRegistry::si();
        let kmh = reg.parse("km/h").unwrap();
        assert_eq!(kmh.symbol(), "km/h");
        assert_relative_eq!(kmh.scale(), (KM / H).scale(), max_relative = 1e-12);

        let inv = reg.parse("1/(m·s)").unwrap();
        assert_eq!(inv.symbol(), "1/(m·s)");
        assert_eq!(inv.dimension(), Dimension::LENGTH.mul(&Dimension::TIME).recip());

        let area = reg.parse("km^2").unwrap();
        assert_relative_eq!(area.scale(), 1e6);
    }

    #[test]
    fn parse_rejects_unknown_atoms() {
        let reg = UnitRegistry::si();
        assert_eq!(
            reg.parse("furlong/s").unwrap_err(),
            UnitError::UnknownUnit("furlong".to_owned())
        );
        assert!(matches!(
            reg.parse("m/"),
            Err(UnitError::InvalidExpression(_))
        ));
    }

    #[test]
    fn define_overrides_and_returns_previous() {
        let mut reg = UnitRegistry::si();
        let px = Unit::new("px", M.dimension(), 1.0 / 40.0);
        assert!(reg.define(px.clone()).is_none());
        let prev = reg.define(Unit::new("px", M.dimension(), 0.05)).unwrap();
        assert!(prev.is_identical(&px));
        assert_relative_eq!(reg.parse("px/s").unwrap().scale(), 0.05);
    }

    #[test]
    fn symbols_are_sorted() {
        let reg = UnitRegistry::si();
        let syms = reg.symbols();
        assert!(syms.windows(2).all(|w| w[0] <= w[1]));
        assert_eq!(syms.len(), reg.len());
    }
}
