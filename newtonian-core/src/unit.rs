//! Runtime units: a symbol, a [`Dimension`] and a scale to the canonical unit.

use crate::dimension::{Dimension, Op};
use crate::error::{UnitError, UnitResult};
use crate::quantity::{Magnitude, Quantity};
use crate::symbol::Factors;
use std::borrow::Cow;
use std::fmt::{Display, Formatter, Result as FmtResult};
use std::hash::{Hash, Hasher};
use std::ops::{Div, Mul};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A named, scaled instance of a [`Dimension`].
///
/// * `scale` is the conversion factor from this unit to the *canonical unit* of the same dimension (the unit built
///   from `m`, `kg`, `s`, `rad`, ... with scale `1.0`). Example: `g` has `scale == 0.001` because `1 g = 0.001 kg`.
/// * `symbol` is the printable string (`"m"`, `"km/h"`).
///
/// Units compare **by dimension**: `g == kg` holds, since both measure mass and are inter-convertible. Use
/// [`Unit::is_identical`] when the scale and symbol must match as well.
///
/// Only linear (ratio) units are modeled. Affine units such as °C with a zero-point offset are not supported.
///
/// ```rust
/// use newtonian_core::units::{M, S};
///
/// let accel = M / (S * S);
/// assert_eq!(accel.symbol(), "m/s^2");
/// assert_eq!(accel.scale(), 1.0);
/// ```
#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Unit {
    symbol: Cow<'static, str>,
    dimension: Dimension,
    scale: f64,
}

impl Unit {
    /// The unit of pure numbers (empty symbol, scale `1.0`).
    pub const DIMENSIONLESS: Unit = Unit::from_static("", Dimension::DIMENSIONLESS, 1.0);

    /// Constructs a unit with a `'static` symbol; usable in `const` items.
    pub const fn from_static(symbol: &'static str, dimension: Dimension, scale: f64) -> Self {
        Unit {
            symbol: Cow::Borrowed(symbol),
            dimension,
            scale,
        }
    }

    /// Constructs a unit from any symbol.
    pub fn new(symbol: impl Into<Cow<'static, str>>, dimension: Dimension, scale: f64) -> Self {
        Unit {
            symbol: symbol.into(),
            dimension,
            scale,
        }
    }

    /// The canonical unit of `dimension`: scale `1.0`, symbol spelled from base-unit symbols.
    ///
    /// ```rust
    /// use newtonian_core::{Dimension, Unit};
    /// assert_eq!(Unit::base(Dimension::FORCE).symbol(), "m·kg/s^2");
    /// ```
    pub fn base(dimension: Dimension) -> Self {
        let mut factors = Factors::default();
        for (base, e) in dimension.iter() {
            factors = factors.mul(&Factors::atom(base.base_symbol()).pow(i32::from(e)));
        }
        Unit::new(factors.format(), dimension, 1.0)
    }

    /// Printable symbol.
    #[inline]
    pub fn symbol(&self) -> &str {
        &self.symbol
    }

    /// Dimension measured by this unit.
    #[inline]
    pub const fn dimension(&self) -> Dimension {
        self.dimension
    }

    /// Factor converting a value in this unit to the canonical unit.
    #[inline]
    pub const fn scale(&self) -> f64 {
        self.scale
    }

    /// Returns this unit under another symbol (e.g. naming `kg·m/s^2` as `N`).
    pub fn with_symbol(self, symbol: impl Into<Cow<'static, str>>) -> Self {
        Unit {
            symbol: symbol.into(),
            ..self
        }
    }

    /// Whether both units measure the same dimension.
    #[inline]
    pub fn is_compatible(&self, other: &Unit) -> bool {
        self.dimension == other.dimension
    }

    /// Whether symbol, dimension and scale all match exactly.
    pub fn is_identical(&self, other: &Unit) -> bool {
        self.symbol == other.symbol && self.dimension == other.dimension && self.scale == other.scale
    }

    /// Check if the unit measures a pure number.
    pub fn is_dimensionless(&self) -> bool {
        self.dimension.is_dimensionless()
    }

    /// Combines two units: dimensions compose, scales multiply (or divide), symbols merge factor-wise.
    pub fn combine(&self, other: &Unit, op: Op) -> Unit {
        let lhs = Factors::of_symbol(&self.symbol);
        let rhs = Factors::of_symbol(&other.symbol);
        let (factors, scale) = match op {
            Op::Multiply => (lhs.mul(&rhs), self.scale * other.scale),
            Op::Divide => (lhs.div(&rhs), self.scale / other.scale),
        };
        Unit::new(
            factors.format(),
            self.dimension.combine(&other.dimension, op),
            scale,
        )
    }

    /// Integer power: exponents and scale are raised to `n`.
    pub fn powi(&self, n: i32) -> Unit {
        Unit::new(
            Factors::of_symbol(&self.symbol).pow(n).format(),
            self.dimension.pow(n),
            self.scale.powi(n),
        )
    }

    /// `1 / self`.
    pub fn recip(&self) -> Unit {
        Unit::DIMENSIONLESS.combine(self, Op::Divide)
    }

    /// `n`-th root; fails unless every dimension exponent is divisible by `n`.
    pub fn root(&self, n: i32) -> UnitResult<Unit> {
        let dimension = self.dimension.root(n).ok_or_else(|| {
            UnitError::UnsupportedOperation(format!(
                "root {n} of unit `{}` with dimension {}",
                self.symbol, self.dimension
            ))
        })?;
        let scale = self.scale.powf(1.0 / f64::from(n));
        let symbol = match Factors::of_symbol(&self.symbol).root(n) {
            Some(factors) => factors.format(),
            None if scale == 1.0 => Unit::base(dimension).symbol.into_owned(),
            None => format!("({})^(1/{n})", self.symbol),
        };
        Ok(Unit::new(symbol, dimension, scale))
    }

    /// Factor `k` such that `v [self] == v * k [target]`.
    pub fn conversion_factor(&self, target: &Unit) -> UnitResult<f64> {
        if self.dimension != target.dimension {
            return Err(UnitError::DimensionMismatch {
                op: format!("conversion from `{}` to `{}`", self.symbol, target.symbol),
                left: self.dimension,
                right: target.dimension,
            });
        }
        Ok(self.scale / target.scale)
    }

    /// LaTeX rendering of the symbol.
    pub fn to_latex(&self) -> String {
        Factors::of_symbol(&self.symbol).latex()
    }
}

impl PartialEq for Unit {
    fn eq(&self, other: &Self) -> bool {
        self.dimension == other.dimension
    }
}

impl Eq for Unit {}

impl Hash for Unit {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.dimension.hash(state);
    }
}

impl Display for Unit {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.write_str(&self.symbol)
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Unit algebra operators (total, so they never fail)
// ─────────────────────────────────────────────────────────────────────────────

macro_rules! unit_ops {
    ($lhs:ty, $rhs:ty) => {
        impl Mul<$rhs> for $lhs {
            type Output = Unit;
            #[inline]
            fn mul(self, rhs: $rhs) -> Unit {
                self.combine(&rhs, Op::Multiply)
            }
        }

        impl Div<$rhs> for $lhs {
            type Output = Unit;
            #[inline]
            fn div(self, rhs: $rhs) -> Unit {
                self.combine(&rhs, Op::Divide)
            }
        }
    };
}

unit_ops!(Unit, Unit);
unit_ops!(Unit, &Unit);
unit_ops!(&Unit, Unit);
unit_ops!(&Unit, &Unit);

// ─────────────────────────────────────────────────────────────────────────────
// Literal construction: number × unit
// ─────────────────────────────────────────────────────────────────────────────

impl Mul<Unit> for f64 {
    type Output = Quantity;
    #[inline]
    fn mul(self, unit: Unit) -> Quantity {
        Quantity::new(Magnitude::Scalar(self), unit)
    }
}

impl Mul<&Unit> for f64 {
    type Output = Quantity;
    #[inline]
    fn mul(self, unit: &Unit) -> Quantity {
        self * unit.clone()
    }
}

impl<const N: usize> Mul<Unit> for [f64; N] {
    type Output = Quantity;
    #[inline]
    fn mul(self, unit: Unit) -> Quantity {
        Quantity::new(Magnitude::Vector(self.to_vec()), unit)
    }
}

impl<const N: usize> Mul<&Unit> for [f64; N] {
    type Output = Quantity;
    #[inline]
    fn mul(self, unit: &Unit) -> Quantity {
        self * unit.clone()
    }
}

impl Mul<Unit> for Vec<f64> {
    type Output = Quantity;
    #[inline]
    fn mul(self, unit: Unit) -> Quantity {
        Quantity::new(Magnitude::Vector(self), unit)
    }
}
