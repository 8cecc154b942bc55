//! Quantity type and its arithmetic.

use crate::dimension::{Dimension, Op};
use crate::error::{UnitError, UnitResult};
use crate::unit::Unit;
use core::fmt;
use core::ops::{Div, Mul, Neg};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Whether a quantity holds one number or a fixed-length vector.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Shape {
    /// A single number.
    Scalar,
    /// A vector with the given number of components.
    Vector(usize),
}

impl Shape {
    /// Check if this is [`Shape::Scalar`].
    #[inline]
    pub const fn is_scalar(self) -> bool {
        matches!(self, Shape::Scalar)
    }

    /// Check if this is any [`Shape::Vector`].
    #[inline]
    pub const fn is_vector(self) -> bool {
        matches!(self, Shape::Vector(_))
    }
}

impl fmt::Display for Shape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Shape::Scalar => f.write_str("scalar"),
            Shape::Vector(n) => write!(f, "vector[{n}]"),
        }
    }
}

/// Numeric payload of a [`Quantity`].
///
/// The two shapes never convert into each other implicitly; a one-component vector is not a scalar.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize), serde(untagged))]
pub enum Magnitude {
    /// A single number.
    Scalar(f64),
    /// Fixed-length components.
    Vector(Vec<f64>),
}

impl Magnitude {
    /// Shape of the payload.
    pub fn shape(&self) -> Shape {
        match self {
            Magnitude::Scalar(_) => Shape::Scalar,
            Magnitude::Vector(v) => Shape::Vector(v.len()),
        }
    }

    /// The number, if scalar.
    pub fn as_scalar(&self) -> Option<f64> {
        match self {
            Magnitude::Scalar(v) => Some(*v),
            Magnitude::Vector(_) => None,
        }
    }

    /// The components, if vector.
    pub fn as_vector(&self) -> Option<&[f64]> {
        match self {
            Magnitude::Scalar(_) => None,
            Magnitude::Vector(v) => Some(v),
        }
    }

    /// All numbers in the payload (one for a scalar).
    pub fn components(&self) -> &[f64] {
        match self {
            Magnitude::Scalar(v) => core::slice::from_ref(v),
            Magnitude::Vector(v) => v,
        }
    }

    /// Applies `f` to every number, keeping the shape.
    pub fn map(&self, f: impl Fn(f64) -> f64) -> Magnitude {
        match self {
            Magnitude::Scalar(v) => Magnitude::Scalar(f(*v)),
            Magnitude::Vector(v) => Magnitude::Vector(v.iter().map(|&x| f(x)).collect()),
        }
    }
}

impl From<f64> for Magnitude {
    fn from(v: f64) -> Self {
        Magnitude::Scalar(v)
    }
}

impl From<Vec<f64>> for Magnitude {
    fn from(v: Vec<f64>) -> Self {
        Magnitude::Vector(v)
    }
}

impl<const N: usize> From<[f64; N]> for Magnitude {
    fn from(v: [f64; N]) -> Self {
        Magnitude::Vector(v.to_vec())
    }
}

impl fmt::Display for Magnitude {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Magnitude::Scalar(v) => write!(f, "{v}"),
            Magnitude::Vector(v) => {
                f.write_str("(")?;
                for (i, x) in v.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{x}")?;
                }
                f.write_str(")")
            }
        }
    }
}

/// A scalar or vector value tagged with a [`Unit`].
///
/// Every operation that can violate dimensional or shape consistency returns a [`UnitResult`]; the infallible ones
/// (scaling by a plain number, negation) also have operator forms.
///
/// # Examples
///
/// ```rust
/// use newtonian_core::units::{M, S};
///
/// let d = 100.0 * M;
/// let t = 20.0 * S;
/// let v = d.div(&t).unwrap();
/// assert!(v.is_scalar(&(M / S)));
/// assert_eq!(v.to(&(M / S)).unwrap().as_scalar(), Some(5.0));
/// ```
///
/// Mixing dimensions fails:
///
/// ```rust
/// use newtonian_core::units::{M, S};
/// use newtonian_core::UnitError;
///
/// let err = (1.0 * M).add(&(1.0 * S)).unwrap_err();
/// assert!(matches!(err, UnitError::DimensionMismatch { .. }));
/// ```
#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Quantity {
    value: Magnitude,
    unit: Unit,
}

impl Quantity {
    /// Creates a quantity from a payload and a unit.
    #[inline]
    pub fn new(value: impl Into<Magnitude>, unit: Unit) -> Self {
        Quantity {
            value: value.into(),
            unit,
        }
    }

    /// Creates a scalar quantity.
    #[inline]
    pub fn scalar(value: f64, unit: Unit) -> Self {
        Self::new(Magnitude::Scalar(value), unit)
    }

    /// Creates a vector quantity.
    #[inline]
    pub fn vector(components: impl Into<Vec<f64>>, unit: Unit) -> Self {
        Self::new(Magnitude::Vector(components.into()), unit)
    }

    /// A pure number.
    #[inline]
    pub fn dimensionless(value: f64) -> Self {
        Self::scalar(value, Unit::DIMENSIONLESS)
    }

    /// Builds a 2-vector from two scalar quantities of the same dimension, expressed in `x`'s unit.
    pub fn xy(x: &Quantity, y: &Quantity) -> UnitResult<Quantity> {
        Self::from_components(&[x.clone(), y.clone()])
    }

    /// Builds a vector from scalar quantities of one dimension, expressed in the first component's unit.
    pub fn from_components(parts: &[Quantity]) -> UnitResult<Quantity> {
        let first = parts.first().ok_or_else(|| {
            UnitError::UnsupportedOperation("vector from zero components".to_owned())
        })?;
        let mut components = Vec::with_capacity(parts.len());
        for part in parts {
            let v = part.value.as_scalar().ok_or_else(|| UnitError::ShapeMismatch {
                op: "vector construction".to_owned(),
                left: part.shape().to_string(),
                right: Shape::Scalar.to_string(),
            })?;
            components.push(v * part.unit.conversion_factor(&first.unit)?);
        }
        Ok(Quantity::vector(components, first.unit.clone()))
    }

    /// 2-vector from polar coordinates; `theta` is in radians.
    pub fn polar(r: f64, theta: f64, unit: Unit) -> Quantity {
        let (sin, cos) = theta.sin_cos();
        Quantity::vector([r * cos, r * sin], unit)
    }

    /// Numeric payload in this quantity's own unit.
    #[inline]
    pub fn value(&self) -> &Magnitude {
        &self.value
    }

    /// Consumes the quantity, returning its payload.
    #[inline]
    pub fn into_value(self) -> Magnitude {
        self.value
    }

    /// Unit the payload is expressed in.
    #[inline]
    pub fn unit(&self) -> &Unit {
        &self.unit
    }

    /// Dimension of the unit.
    #[inline]
    pub fn dimension(&self) -> Dimension {
        self.unit.dimension()
    }

    /// Shape of the payload.
    #[inline]
    pub fn shape(&self) -> Shape {
        self.value.shape()
    }

    /// True iff this is a scalar measured in `expected`'s dimension.
    ///
    /// ```rust
    /// use newtonian_core::units::{G, KG, M};
    /// assert!((3.0 * G).is_scalar(&KG));
    /// assert!(!([1.0, 2.0] * KG).is_scalar(&KG));
    /// assert!(!(3.0 * M).is_scalar(&KG));
    /// ```
    pub fn is_scalar(&self, expected: &Unit) -> bool {
        self.shape().is_scalar() && self.unit.is_compatible(expected)
    }

    /// True iff this is a vector measured in `expected`'s dimension.
    pub fn is_vector(&self, expected: &Unit) -> bool {
        self.shape().is_vector() && self.unit.is_compatible(expected)
    }

    /// Like [`is_scalar`](Self::is_scalar), but reports what is wrong. `what` names the value being checked.
    pub fn require_scalar(&self, expected: &Unit, what: &str) -> UnitResult<()> {
        self.require(expected, what, Shape::Scalar)
    }

    /// Like [`is_vector`](Self::is_vector), but reports what is wrong.
    pub fn require_vector(&self, expected: &Unit, what: &str) -> UnitResult<()> {
        if self.shape().is_vector() {
            return self.require(expected, what, self.shape());
        }
        self.require_dimension(expected, what)?;
        Err(UnitError::ShapeMismatch {
            op: format!("{what} must be a vector"),
            left: self.shape().to_string(),
            right: "vector".to_owned(),
        })
    }

    fn require(&self, expected: &Unit, what: &str, shape: Shape) -> UnitResult<()> {
        self.require_dimension(expected, what)?;
        if self.shape() != shape {
            return Err(UnitError::ShapeMismatch {
                op: format!("{what} must be a {shape}"),
                left: self.shape().to_string(),
                right: shape.to_string(),
            });
        }
        Ok(())
    }

    fn require_dimension(&self, expected: &Unit, what: &str) -> UnitResult<()> {
        if !self.unit.is_compatible(expected) {
            return Err(UnitError::DimensionMismatch {
                op: format!("{what} must be in {expected}"),
                left: self.dimension(),
                right: expected.dimension(),
            });
        }
        Ok(())
    }

    /// Component `index` of a vector, as a scalar quantity in the same unit.
    pub fn component(&self, index: usize) -> UnitResult<Quantity> {
        let components = self.value.as_vector().ok_or_else(|| {
            UnitError::UnsupportedOperation("component access on a scalar quantity".to_owned())
        })?;
        let v = components
            .get(index)
            .copied()
            .ok_or(UnitError::IndexOutOfRange {
                index,
                len: components.len(),
            })?;
        Ok(Quantity::scalar(v, self.unit.clone()))
    }

    /// First component.
    #[inline]
    pub fn x(&self) -> UnitResult<Quantity> {
        self.component(0)
    }

    /// Second component.
    #[inline]
    pub fn y(&self) -> UnitResult<Quantity> {
        self.component(1)
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Additive operations
    // ─────────────────────────────────────────────────────────────────────────

    /// Sum of two quantities of the same dimension and shape, expressed in the canonical unit.
    pub fn add(&self, other: &Quantity) -> UnitResult<Quantity> {
        self.additive(other, "add", |a, b| a + b)
    }

    /// Difference of two quantities of the same dimension and shape, expressed in the canonical unit.
    pub fn sub(&self, other: &Quantity) -> UnitResult<Quantity> {
        self.additive(other, "sub", |a, b| a - b)
    }

    fn additive(&self, other: &Quantity, op: &str, f: fn(f64, f64) -> f64) -> UnitResult<Quantity> {
        if self.dimension() != other.dimension() {
            return Err(UnitError::DimensionMismatch {
                op: op.to_owned(),
                left: self.dimension(),
                right: other.dimension(),
            });
        }
        let (sa, sb) = (self.unit.scale(), other.unit.scale());
        let value = match (&self.value, &other.value) {
            (Magnitude::Scalar(a), Magnitude::Scalar(b)) => Magnitude::Scalar(f(a * sa, b * sb)),
            (Magnitude::Vector(a), Magnitude::Vector(b)) if a.len() == b.len() => {
                Magnitude::Vector(a.iter().zip(b).map(|(x, y)| f(x * sa, y * sb)).collect())
            }
            _ => return Err(self.shape_mismatch(op, other)),
        };
        Ok(Quantity::new(value, Unit::base(self.dimension())))
    }

    /// Sum of a non-empty slice of quantities.
    pub fn sum(items: &[Quantity]) -> UnitResult<Quantity> {
        let (first, rest) = items.split_first().ok_or_else(|| {
            UnitError::UnsupportedOperation("sum of an empty sequence".to_owned())
        })?;
        rest.iter().try_fold(first.normalized(), |acc, q| acc.add(q))
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Multiplicative operations
    // ─────────────────────────────────────────────────────────────────────────

    /// Product; dimensions and scales compose.
    ///
    /// Scalar × vector scales every component; vector × vector is component-wise and needs equal lengths.
    pub fn mul(&self, other: &Quantity) -> UnitResult<Quantity> {
        self.checked_dimension(other, Op::Multiply, "mul")?;
        let value = self.broadcast(other, "mul", true, |a, b| a * b)?;
        Ok(Quantity::new(value, self.unit.combine(&other.unit, Op::Multiply)))
    }

    /// Quotient; dimensions and scales compose.
    ///
    /// Vector ÷ scalar and component-wise vector ÷ vector are defined; scalar ÷ vector is not.
    pub fn div(&self, other: &Quantity) -> UnitResult<Quantity> {
        self.checked_dimension(other, Op::Divide, "div")?;
        let value = self.broadcast(other, "div", false, |a, b| a / b)?;
        Ok(Quantity::new(value, self.unit.combine(&other.unit, Op::Divide)))
    }

    fn checked_dimension(&self, other: &Quantity, op: Op, name: &str) -> UnitResult<Dimension> {
        self.dimension()
            .checked_combine(&other.dimension(), op)
            .ok_or_else(|| exponent_overflow(name))
    }

    fn broadcast(
        &self,
        other: &Quantity,
        op: &str,
        scalar_lhs: bool,
        f: fn(f64, f64) -> f64,
    ) -> UnitResult<Magnitude> {
        Ok(match (&self.value, &other.value) {
            (Magnitude::Scalar(a), Magnitude::Scalar(b)) => Magnitude::Scalar(f(*a, *b)),
            (Magnitude::Vector(a), Magnitude::Scalar(b)) => {
                Magnitude::Vector(a.iter().map(|x| f(*x, *b)).collect())
            }
            (Magnitude::Scalar(a), Magnitude::Vector(b)) if scalar_lhs => {
                Magnitude::Vector(b.iter().map(|y| f(*a, *y)).collect())
            }
            (Magnitude::Scalar(_), Magnitude::Vector(_)) => {
                return Err(UnitError::UnsupportedOperation(format!(
                    "{op} of a scalar by a vector"
                )))
            }
            (Magnitude::Vector(a), Magnitude::Vector(b)) if a.len() == b.len() => {
                Magnitude::Vector(a.iter().zip(b).map(|(x, y)| f(*x, *y)).collect())
            }
            _ => return Err(self.shape_mismatch(op, other)),
        })
    }

    /// Multiplies the payload by a plain number; the unit is unchanged.
    pub fn scale(&self, k: f64) -> Quantity {
        Quantity::new(self.value.map(|x| x * k), self.unit.clone())
    }

    /// `1 / self`; scalars only.
    pub fn recip(&self) -> UnitResult<Quantity> {
        let v = self.scalar_only("reciprocal")?;
        Dimension::DIMENSIONLESS
            .checked_combine(&self.dimension(), Op::Divide)
            .ok_or_else(|| exponent_overflow("reciprocal"))?;
        Ok(Quantity::scalar(1.0 / v, self.unit.recip()))
    }

    /// Integer power; scalars only. `q.pow(0)` is the dimensionless `1`.
    pub fn pow(&self, n: i32) -> UnitResult<Quantity> {
        let v = self.scalar_only("power")?;
        self.dimension()
            .checked_pow(n)
            .ok_or_else(|| exponent_overflow("power"))?;
        Ok(Quantity::scalar(v.powi(n), self.unit.powi(n)))
    }

    /// `n`-th root; scalars only, and every dimension exponent must be divisible by `n`.
    pub fn root(&self, n: i32) -> UnitResult<Quantity> {
        let v = self.scalar_only("root")?;
        let unit = self.unit.root(n)?;
        Ok(Quantity::scalar(v.powf(1.0 / f64::from(n)), unit))
    }

    /// Square root, e.g. for `√(m/k)`.
    #[inline]
    pub fn sqrt(&self) -> UnitResult<Quantity> {
        self.root(2)
    }

    /// Real power of a dimensionless scalar.
    pub fn powf(&self, p: f64) -> UnitResult<Quantity> {
        let v = self.scalar_only("real power")?;
        if !self.unit.is_dimensionless() {
            return Err(UnitError::UnsupportedOperation(format!(
                "real power of a quantity in `{}`",
                self.unit
            )));
        }
        Ok(Quantity::dimensionless((v * self.unit.scale()).powf(p)))
    }

    /// Euclidean length of a vector (absolute value of a scalar), in the same unit.
    pub fn norm(&self) -> Quantity {
        let n = match &self.value {
            Magnitude::Scalar(v) => v.abs(),
            Magnitude::Vector(v) => v.iter().map(|x| x * x).sum::<f64>().sqrt(),
        };
        Quantity::scalar(n, self.unit.clone())
    }

    fn scalar_only(&self, op: &str) -> UnitResult<f64> {
        self.value.as_scalar().ok_or_else(|| {
            UnitError::UnsupportedOperation(format!("{op} of a {} quantity", self.shape()))
        })
    }

    fn shape_mismatch(&self, op: &str, other: &Quantity) -> UnitError {
        UnitError::ShapeMismatch {
            op: op.to_owned(),
            left: self.shape().to_string(),
            right: other.shape().to_string(),
        }
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Conversion
    // ─────────────────────────────────────────────────────────────────────────

    /// The bare payload expressed in `unit`; fails unless dimensions match.
    ///
    /// ```rust
    /// use newtonian_core::units::{KM, M};
    /// let d = 1500.0 * M;
    /// assert_eq!(d.to(&KM).unwrap().as_scalar(), Some(1.5));
    /// ```
    pub fn to(&self, unit: &Unit) -> UnitResult<Magnitude> {
        let k = self.unit.conversion_factor(unit)?;
        Ok(self.value.map(|x| x * k))
    }

    /// This quantity re-expressed in `unit`.
    pub fn convert(&self, unit: &Unit) -> UnitResult<Quantity> {
        Ok(Quantity::new(self.to(unit)?, unit.clone()))
    }

    /// This quantity expressed in the canonical unit of its dimension.
    pub fn normalized(&self) -> Quantity {
        self.scale(self.unit.scale())
            .with_unit(Unit::base(self.dimension()))
    }

    fn with_unit(self, unit: Unit) -> Quantity {
        Quantity { unit, ..self }
    }

    /// Approximate equality after normalization.
    ///
    /// Components compare relative to the larger magnitude, with an absolute floor of `rel` near zero.
    pub fn approx_eq(&self, other: &Quantity, rel: f64) -> bool {
        if self.dimension() != other.dimension() || self.shape() != other.shape() {
            return false;
        }
        let (sa, sb) = (self.unit.scale(), other.unit.scale());
        self.value
            .components()
            .iter()
            .zip(other.value.components())
            .all(|(a, b)| {
                let (a, b) = (a * sa, b * sb);
                (a - b).abs() <= rel * a.abs().max(b.abs()).max(1.0)
            })
    }
}

fn exponent_overflow(op: &str) -> UnitError {
    UnitError::UnsupportedOperation(format!("{op} overflows a dimension exponent"))
}

/// Equal iff same dimension, same shape, and equal payloads after normalizing to the canonical unit.
impl PartialEq for Quantity {
    fn eq(&self, other: &Self) -> bool {
        if self.dimension() != other.dimension() || self.shape() != other.shape() {
            return false;
        }
        let (sa, sb) = (self.unit.scale(), other.unit.scale());
        self.value
            .components()
            .iter()
            .zip(other.value.components())
            .all(|(a, b)| a * sa == b * sb)
    }
}

impl fmt::Display for Quantity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.unit.symbol().is_empty() {
            write!(f, "{}", self.value)
        } else {
            write!(f, "{} {}", self.value, self.unit)
        }
    }
}

impl From<f64> for Quantity {
    #[inline]
    fn from(value: f64) -> Self {
        Quantity::dimensionless(value)
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Infallible operators: scaling by a plain number and negation.
// `Quantity` itself carries no `Mul`/`Div` impls so `q.mul(&r)` resolves to the checked method.
// ─────────────────────────────────────────────────────────────────────────────

impl Mul<f64> for &Quantity {
    type Output = Quantity;
    #[inline]
    fn mul(self, rhs: f64) -> Quantity {
        self.scale(rhs)
    }
}

impl Mul<Quantity> for f64 {
    type Output = Quantity;
    #[inline]
    fn mul(self, rhs: Quantity) -> Quantity {
        rhs.scale(self)
    }
}

impl Mul<&Quantity> for f64 {
    type Output = Quantity;
    #[inline]
    fn mul(self, rhs: &Quantity) -> Quantity {
        rhs.scale(self)
    }
}

impl Div<f64> for &Quantity {
    type Output = Quantity;
    #[inline]
    fn div(self, rhs: f64) -> Quantity {
        self.scale(1.0 / rhs)
    }
}

impl Neg for Quantity {
    type Output = Quantity;
    #[inline]
    fn neg(self) -> Quantity {
        self.scale(-1.0)
    }
}

impl Neg for &Quantity {
    type Output = Quantity;
    #[inline]
    fn neg(self) -> Quantity {
        self.scale(-1.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::units::{DEG, G, H, KG, KM, M, RAD, S};
    use approx::{assert_abs_diff_eq, assert_relative_eq};
    use proptest::prelude::*;

    fn scalar_of(q: &Quantity) -> f64 {
        q.value().as_scalar().unwrap()
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Construction and predicates
    // ─────────────────────────────────────────────────────────────────────────

    #[test]
    fn literal_construction() {
        let q = 3.0 * M;
        assert_eq!(q.shape(), Shape::Scalar);
        let v = [200.0, 500.0] * M;
        assert_eq!(v.shape(), Shape::Vector(2));
        assert_eq!(v.value().as_vector(), Some(&[200.0, 500.0][..]));
    }

    #[test]
    fn predicates_check_shape_and_dimension() {
        let v = [3.0, 30.0] * (M / S);
        assert!(v.is_vector(&(M / S)));
        assert!(!v.is_scalar(&(M / S)));
        assert!(!v.is_vector(&M));
        assert!((1.0 * (RAD / S)).is_scalar(&(RAD / S)));
    }

    #[test]
    fn require_reports_the_failing_property() {
        let mass = 3.0 * M;
        assert!(matches!(
            mass.require_scalar(&KG, "mass"),
            Err(UnitError::DimensionMismatch { .. })
        ));
        let pos = 3.0 * M;
        let err = pos.require_vector(&M, "position").unwrap_err();
        assert!(matches!(err, UnitError::ShapeMismatch { .. }));
        assert!(err.to_string().contains("position must be a vector"));
        assert!(([1.0, 2.0] * KM).require_vector(&M, "position").is_ok());
    }

    #[test]
    fn xy_converts_into_first_unit() {
        let q = Quantity::xy(&(1.0 * KM), &(500.0 * M)).unwrap();
        assert_eq!(q.unit().symbol(), "km");
        assert_eq!(q.value().as_vector(), Some(&[1.0, 0.5][..]));
        assert!(Quantity::xy(&(1.0 * M), &(1.0 * S)).is_err());
        assert!(Quantity::xy(&([1.0, 2.0] * M), &(1.0 * M)).is_err());
    }

    #[test]
    fn polar_builds_unit_circle_points() {
        let p = Quantity::polar(2.0, core::f64::consts::FRAC_PI_2, M);
        let c = p.value().as_vector().unwrap();
        assert_abs_diff_eq!(c[0], 0.0, epsilon = 1e-12);
        assert_abs_diff_eq!(c[1], 2.0, epsilon = 1e-12);
    }

    #[test]
    fn components() {
        let v = [3.0, 4.0] * M;
        assert_eq!(v.x().unwrap(), 3.0 * M);
        assert_eq!(v.y().unwrap(), 4.0 * M);
        assert!(matches!(
            v.component(2),
            Err(UnitError::IndexOutOfRange { index: 2, len: 2 })
        ));
        assert!((1.0 * M).x().is_err());
        assert_eq!(v.norm(), 5.0 * M);
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Addition and subtraction
    // ─────────────────────────────────────────────────────────────────────────

    #[test]
    fn add_normalizes_to_canonical_unit() {
        let sum = (1.0 * KM).add(&(500.0 * M)).unwrap();
        assert_eq!(sum.unit().symbol(), "m");
        assert_relative_eq!(scalar_of(&sum), 1500.0);

        let mass = (500.0 * G).add(&(1.0 * KG)).unwrap();
        assert_eq!(mass.unit().symbol(), "kg");
        assert_relative_eq!(scalar_of(&mass), 1.5, max_relative = 1e-12);
    }

    #[test]
    fn sub_of_vectors() {
        let d = ([5.0, 7.0] * M).sub(&([1.0, 2.0] * M)).unwrap();
        assert_eq!(d, [4.0, 5.0] * M);
    }

    #[test]
    fn add_rejects_different_dimensions() {
        let err = (1.0 * M).add(&(1.0 * S)).unwrap_err();
        assert!(matches!(err, UnitError::DimensionMismatch { .. }));
    }

    #[test]
    fn add_rejects_scalar_plus_vector() {
        let err = (1.0 * M).add(&([1.0, 2.0] * M)).unwrap_err();
        assert!(matches!(err, UnitError::ShapeMismatch { .. }));
        let err = ([1.0, 2.0, 3.0] * M).sub(&([1.0, 2.0] * M)).unwrap_err();
        assert!(matches!(err, UnitError::ShapeMismatch { .. }));
    }

    #[test]
    fn sum_of_points() {
        let pts = [
            [100.0, 400.0] * M,
            [200.0, 300.0] * M,
            [150.0, 280.0] * M,
        ];
        let centroid = &Quantity::sum(&pts).unwrap() / 3.0;
        assert!(centroid.approx_eq(&([150.0, 326.666_666_666_666_7] * M), 1e-12));
        assert!(Quantity::sum(&[]).is_err());
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Multiplication, division and powers
    // ─────────────────────────────────────────────────────────────────────────

    #[test]
    fn mul_composes_units() {
        let f = (2.0 * KG).mul(&(3.0 * (M / (S * S)))).unwrap();
        assert_eq!(f.dimension(), Dimension::FORCE);
        assert_eq!(f.unit().symbol(), "kg·m/s^2");
        assert_eq!(scalar_of(&f), 6.0);
    }

    #[test]
    fn vector_times_scalar_keeps_length() {
        let dt = (1.0 / 12.0) * S;
        let v = [3.0, 30.0] * (M / S);
        let d = v.mul(&dt).unwrap();
        assert_eq!(d.shape(), Shape::Vector(2));
        assert_eq!(d.unit().symbol(), "m");
        let d2 = dt.mul(&v).unwrap();
        assert_eq!(d, d2);
    }

    #[test]
    fn vector_times_vector_is_componentwise() {
        let p = ([1.0, 2.0] * M).mul(&([3.0, 4.0] * M)).unwrap();
        assert_eq!(p.value().as_vector(), Some(&[3.0, 8.0][..]));
        assert!(([1.0, 2.0] * M).mul(&([1.0] * M)).is_err());
    }

    #[test]
    fn div_rules() {
        let v = ([3.0, 30.0] * M).div(&(2.0 * S)).unwrap();
        assert_eq!(v, [1.5, 15.0] * (M / S));
        assert!(matches!(
            (1.0 * M).div(&([1.0, 2.0] * S)),
            Err(UnitError::UnsupportedOperation(_))
        ));
    }

    #[test]
    fn pow_scales_dimension_and_value() {
        let a = (3.0 * KM).pow(2).unwrap();
        assert_eq!(a.dimension(), Dimension::LENGTH.pow(2));
        assert_eq!(scalar_of(&a), 9.0);
        assert_relative_eq!(a.to(&M.powi(2)).unwrap().as_scalar().unwrap(), 9e6);
    }

    #[test]
    fn pow_zero_is_dimensionless_one() {
        for q in [5.0 * KG, 0.25 * (M / S), 7.0 * DEG] {
            let one = q.pow(0).unwrap();
            assert!(one.unit().is_dimensionless());
            assert_eq!(one, Quantity::dimensionless(1.0));
        }
    }

    #[test]
    fn pow_of_vector_is_unsupported() {
        assert!(matches!(
            ([1.0, 2.0] * M).pow(2),
            Err(UnitError::UnsupportedOperation(_))
        ));
    }

    #[test]
    fn exponent_overflow_is_an_error() {
        use crate::dimension::BaseDimension;

        let huge = Unit::base(Dimension::LENGTH.with_exponent(BaseDimension::Length, i8::MAX));
        let q = Quantity::scalar(2.0, huge);
        assert!(matches!(q.mul(&(1.0 * M)), Err(UnitError::UnsupportedOperation(_))));
        assert!(matches!(q.pow(2), Err(UnitError::UnsupportedOperation(_))));
        assert_eq!(
            q.div(&(1.0 * M)).unwrap().dimension().exponent(BaseDimension::Length),
            i8::MAX - 1
        );

        let tiny = Unit::base(Dimension::LENGTH.with_exponent(BaseDimension::Length, i8::MIN));
        assert!(Quantity::scalar(2.0, tiny).recip().is_err());
    }

    #[test]
    fn sqrt_of_mass_over_stiffness() {
        let mass = 251.03 * G;
        let k = 1.433 * (KG / (S * S));
        let period = mass.div(&k).unwrap().sqrt().unwrap();
        assert_eq!(period.dimension(), Dimension::TIME);
        let seconds = period.to(&S).unwrap().as_scalar().unwrap();
        assert_relative_eq!(seconds, (0.251_03_f64 / 1.433).sqrt(), max_relative = 1e-12);
        assert!((1.0 * (M / S)).sqrt().is_err());
    }

    #[test]
    fn recip_and_powf() {
        let rate = Quantity::scalar(120.0, S.recip());
        let dt = rate.scale(0.1).recip().unwrap();
        assert_eq!(dt.dimension(), Dimension::TIME);
        assert_relative_eq!(scalar_of(&dt), 1.0 / 12.0, max_relative = 1e-12);

        let ratio = (2.0 * KM).div(&(1.0 * M)).unwrap();
        assert_relative_eq!(
            scalar_of(&ratio.powf(0.5).unwrap()),
            2000f64.sqrt(),
            max_relative = 1e-12
        );
        assert!((1.0 * M).powf(0.5).is_err());
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Conversion, equality, display
    // ─────────────────────────────────────────────────────────────────────────

    #[test]
    fn to_requires_matching_dimension() {
        let v = 36.0 * (KM / H);
        assert_relative_eq!(
            v.to(&(M / S)).unwrap().as_scalar().unwrap(),
            10.0,
            max_relative = 1e-12
        );
        assert!(matches!(
            v.to(&M),
            Err(UnitError::DimensionMismatch { .. })
        ));
    }

    #[test]
    fn equality_normalizes_scale() {
        assert_eq!(1.0 * KM, 1000.0 * M);
        assert_ne!(1.0 * M, 1.0 * S);
        assert_ne!(1.0 * M, [1.0] * M);
    }

    #[test]
    fn display() {
        assert_eq!((9.81 * (M / (S * S))).to_string(), "9.81 m/s^2");
        assert_eq!(([3.0, 30.0] * (M / S)).to_string(), "(3, 30) m/s");
        assert_eq!(Quantity::dimensionless(0.5).to_string(), "0.5");
    }

    #[test]
    fn operators_scale_and_negate() {
        let a = [0.0, -9.806_65] * (M / (S * S));
        let half = 0.5 * &a;
        assert_eq!(half, [0.0, -4.903_325] * (M / (S * S)));
        assert_eq!(-(2.0 * M), -2.0 * M);
        assert_eq!(&(4.0 * M) / 2.0, 2.0 * M);
    }

    #[cfg(feature = "serde")]
    #[test]
    fn serde_roundtrip_keeps_unit() {
        let q = [3.0, 30.0] * (M / S);
        let json = serde_json::to_string(&q).unwrap();
        let back: Quantity = serde_json::from_str(&json).unwrap();
        assert!(back.unit().is_identical(q.unit()));
        assert_eq!(back, q);
    }

    proptest! {
        #[test]
        fn prop_conversion_roundtrip(v in -1e6..1e6f64) {
            let q = v * KM;
            let n = q.to(&M).unwrap().as_scalar().unwrap();
            let back = Quantity::scalar(n, M);
            prop_assert!(back.approx_eq(&q, 1e-12));
        }

        #[test]
        fn prop_add_is_commutative(a in -1e6..1e6f64, b in -1e6..1e6f64) {
            let x = a * KM;
            let y = b * M;
            prop_assert!(x.add(&y).unwrap().approx_eq(&y.add(&x).unwrap(), 1e-12));
        }
    }
}
