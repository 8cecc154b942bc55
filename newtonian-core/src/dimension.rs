//! Dimension exponent vectors.

use core::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Number of base dimensions tracked by [`Dimension`].
pub const BASE_COUNT: usize = 8;

/// The base physical dimensions every derived dimension is composed from.
///
/// Angle is treated as a base dimension so that `rad/s` and `1/s` stay distinct.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum BaseDimension {
    /// Length, canonical unit metre.
    Length,
    /// Mass, canonical unit kilogram.
    Mass,
    /// Time, canonical unit second.
    Time,
    /// Plane angle, canonical unit radian.
    Angle,
    /// Electric current, canonical unit ampere.
    Current,
    /// Thermodynamic temperature, canonical unit kelvin.
    Temperature,
    /// Amount of substance, canonical unit mole.
    Amount,
    /// Luminous intensity, canonical unit candela.
    Luminosity,
}

impl BaseDimension {
    /// All base dimensions in exponent-vector order.
    pub const ALL: [BaseDimension; BASE_COUNT] = [
        BaseDimension::Length,
        BaseDimension::Mass,
        BaseDimension::Time,
        BaseDimension::Angle,
        BaseDimension::Current,
        BaseDimension::Temperature,
        BaseDimension::Amount,
        BaseDimension::Luminosity,
    ];

    /// Position of this base dimension inside a [`Dimension`] exponent vector.
    #[inline]
    pub const fn index(self) -> usize {
        self as usize
    }

    /// Lowercase name, as used in configuration tables.
    pub const fn name(self) -> &'static str {
        match self {
            BaseDimension::Length => "length",
            BaseDimension::Mass => "mass",
            BaseDimension::Time => "time",
            BaseDimension::Angle => "angle",
            BaseDimension::Current => "current",
            BaseDimension::Temperature => "temperature",
            BaseDimension::Amount => "amount",
            BaseDimension::Luminosity => "luminosity",
        }
    }

    /// Short code used when printing a dimension (`L`, `M`, `T`, ...).
    pub const fn code(self) -> &'static str {
        match self {
            BaseDimension::Length => "L",
            BaseDimension::Mass => "M",
            BaseDimension::Time => "T",
            BaseDimension::Angle => "A",
            BaseDimension::Current => "I",
            BaseDimension::Temperature => "Θ",
            BaseDimension::Amount => "N",
            BaseDimension::Luminosity => "J",
        }
    }

    /// Symbol of the canonical (scale `1.0`) unit of this base dimension.
    pub const fn base_symbol(self) -> &'static str {
        match self {
            BaseDimension::Length => "m",
            BaseDimension::Mass => "kg",
            BaseDimension::Time => "s",
            BaseDimension::Angle => "rad",
            BaseDimension::Current => "A",
            BaseDimension::Temperature => "K",
            BaseDimension::Amount => "mol",
            BaseDimension::Luminosity => "cd",
        }
    }
}

/// How two dimensions (or units) are combined.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Op {
    /// Exponents are added.
    Multiply,
    /// Exponents are subtracted.
    Divide,
}

/// Exponent vector over the [`BaseDimension`]s.
///
/// Two dimensions are equal iff every exponent is equal. Composition is total: products add exponents, quotients
/// subtract them and powers scale them. Exponents saturate at the `i8` range instead of overflowing; the `checked_*`
/// variants report that case, and quantity arithmetic uses them.
///
/// ```rust
/// use newtonian_core::Dimension;
///
/// let accel = Dimension::LENGTH.div(&Dimension::TIME.pow(2));
/// assert_eq!(accel, Dimension::ACCELERATION);
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(
    feature = "serde",
    serde(from = "DimensionTable", into = "DimensionTable")
)]
pub struct Dimension([i8; BASE_COUNT]);

impl Dimension {
    /// Pure number.
    pub const DIMENSIONLESS: Self = Self([0; BASE_COUNT]);
    /// `[L]`
    pub const LENGTH: Self = Self::base(BaseDimension::Length);
    /// `[M]`
    pub const MASS: Self = Self::base(BaseDimension::Mass);
    /// `[T]`
    pub const TIME: Self = Self::base(BaseDimension::Time);
    /// `[A]`
    pub const ANGLE: Self = Self::base(BaseDimension::Angle);
    /// `[I]`
    pub const CURRENT: Self = Self::base(BaseDimension::Current);
    /// `[Θ]`
    pub const TEMPERATURE: Self = Self::base(BaseDimension::Temperature);
    /// `[N]`
    pub const AMOUNT: Self = Self::base(BaseDimension::Amount);
    /// `[J]`
    pub const LUMINOSITY: Self = Self::base(BaseDimension::Luminosity);

    /// `[L T⁻¹]`
    pub const VELOCITY: Self = Self::new([1, 0, -1, 0, 0, 0, 0, 0]);
    /// `[L T⁻²]`
    pub const ACCELERATION: Self = Self::new([1, 0, -2, 0, 0, 0, 0, 0]);
    /// `[A T⁻¹]`
    pub const ANGULAR_VELOCITY: Self = Self::new([0, 0, -1, 1, 0, 0, 0, 0]);
    /// `[A T⁻²]`
    pub const ANGULAR_ACCELERATION: Self = Self::new([0, 0, -2, 1, 0, 0, 0, 0]);
    /// `[T⁻¹]`
    pub const FREQUENCY: Self = Self::new([0, 0, -1, 0, 0, 0, 0, 0]);
    /// `[M L T⁻²]`
    pub const FORCE: Self = Self::new([1, 1, -2, 0, 0, 0, 0, 0]);
    /// `[M L² T⁻²]`
    pub const ENERGY: Self = Self::new([2, 1, -2, 0, 0, 0, 0, 0]);
    /// `[M L² T⁻³]`
    pub const POWER: Self = Self::new([2, 1, -3, 0, 0, 0, 0, 0]);

    /// Builds a dimension from raw exponents in [`BaseDimension::ALL`] order.
    #[inline]
    pub const fn new(exponents: [i8; BASE_COUNT]) -> Self {
        Self(exponents)
    }

    /// The dimension of a single base quantity, e.g. `[L]`.
    pub const fn base(base: BaseDimension) -> Self {
        let mut exponents = [0; BASE_COUNT];
        exponents[base.index()] = 1;
        Self(exponents)
    }

    /// Exponent of one base dimension.
    #[inline]
    pub const fn exponent(&self, base: BaseDimension) -> i8 {
        self.0[base.index()]
    }

    /// All exponents in [`BaseDimension::ALL`] order.
    #[inline]
    pub const fn exponents(&self) -> [i8; BASE_COUNT] {
        self.0
    }

    /// Returns a copy with one exponent replaced.
    pub const fn with_exponent(mut self, base: BaseDimension, exponent: i8) -> Self {
        self.0[base.index()] = exponent;
        self
    }

    /// Check if every exponent is zero.
    pub fn is_dimensionless(&self) -> bool {
        self.0.iter().all(|&e| e == 0)
    }

    /// Combine two dimensions; see [`Op`].
    pub fn combine(&self, other: &Dimension, op: Op) -> Dimension {
        match op {
            Op::Multiply => self.zip(other, i16::saturating_add),
            Op::Divide => self.zip(other, i16::saturating_sub),
        }
    }

    /// Like [`combine`](Self::combine), but `None` when an exponent leaves the `i8` range.
    pub fn checked_combine(&self, other: &Dimension, op: Op) -> Option<Dimension> {
        let mut out = [0; BASE_COUNT];
        for (i, slot) in out.iter_mut().enumerate() {
            *slot = match op {
                Op::Multiply => self.0[i].checked_add(other.0[i]),
                Op::Divide => self.0[i].checked_sub(other.0[i]),
            }?;
        }
        Some(Dimension(out))
    }

    /// Multiply dimensions (add exponents).
    #[inline]
    pub fn mul(&self, other: &Dimension) -> Dimension {
        self.combine(other, Op::Multiply)
    }

    /// Divide dimensions (subtract exponents).
    #[inline]
    pub fn div(&self, other: &Dimension) -> Dimension {
        self.combine(other, Op::Divide)
    }

    /// Negate all exponents.
    pub fn recip(&self) -> Dimension {
        Dimension::DIMENSIONLESS.div(self)
    }

    /// Raise to an integer power (multiply all exponents).
    pub fn pow(&self, n: i32) -> Dimension {
        let mut out = [0; BASE_COUNT];
        for (slot, &e) in out.iter_mut().zip(self.0.iter()) {
            *slot = saturate(i32::from(e).saturating_mul(n));
        }
        Dimension(out)
    }

    /// Like [`pow`](Self::pow), but `None` when an exponent leaves the `i8` range.
    pub fn checked_pow(&self, n: i32) -> Option<Dimension> {
        let mut out = [0; BASE_COUNT];
        for (slot, &e) in out.iter_mut().zip(self.0.iter()) {
            *slot = i8::try_from(i32::from(e).checked_mul(n)?).ok()?;
        }
        Some(Dimension(out))
    }

    /// `n`-th root (divide all exponents by `n`).
    ///
    /// Returns `None` if `n` is zero or any exponent is not divisible by `n`.
    pub fn root(&self, n: i32) -> Option<Dimension> {
        if n == 0 {
            return None;
        }
        let mut out = [0; BASE_COUNT];
        for (slot, &e) in out.iter_mut().zip(self.0.iter()) {
            let e = i32::from(e);
            if e % n != 0 {
                return None;
            }
            *slot = saturate(e / n);
        }
        Some(Dimension(out))
    }

    /// Nonzero `(base, exponent)` pairs in base order.
    pub fn iter(&self) -> impl Iterator<Item = (BaseDimension, i8)> + '_ {
        BaseDimension::ALL
            .iter()
            .map(move |&b| (b, self.exponent(b)))
            .filter(|&(_, e)| e != 0)
    }

    fn zip(&self, other: &Dimension, f: fn(i16, i16) -> i16) -> Dimension {
        let mut out = [0; BASE_COUNT];
        for (i, slot) in out.iter_mut().enumerate() {
            *slot = saturate(i32::from(f(i16::from(self.0[i]), i16::from(other.0[i]))));
        }
        Dimension(out)
    }
}

fn saturate(e: i32) -> i8 {
    e.clamp(i32::from(i8::MIN), i32::from(i8::MAX)) as i8
}

impl fmt::Display for Dimension {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_dimensionless() {
            return f.write_str("1");
        }
        let mut first = true;
        for (base, e) in self.iter() {
            if !first {
                f.write_str("·")?;
            }
            first = false;
            if e == 1 {
                f.write_str(base.code())?;
            } else {
                write!(f, "{}^{}", base.code(), e)?;
            }
        }
        Ok(())
    }
}

/// Named-exponent form of a [`Dimension`], used for (de)serialization.
///
/// Missing entries are zero, so `{ length = 1, time = -2 }` is an acceleration.
#[cfg(feature = "serde")]
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub(crate) struct DimensionTable {
    #[serde(skip_serializing_if = "is_zero")]
    length: i8,
    #[serde(skip_serializing_if = "is_zero")]
    mass: i8,
    #[serde(skip_serializing_if = "is_zero")]
    time: i8,
    #[serde(skip_serializing_if = "is_zero")]
    angle: i8,
    #[serde(skip_serializing_if = "is_zero")]
    current: i8,
    #[serde(skip_serializing_if = "is_zero")]
    temperature: i8,
    #[serde(skip_serializing_if = "is_zero")]
    amount: i8,
    #[serde(skip_serializing_if = "is_zero")]
    luminosity: i8,
}

#[cfg(feature = "serde")]
fn is_zero(e: &i8) -> bool {
    *e == 0
}

#[cfg(feature = "serde")]
impl From<DimensionTable> for Dimension {
    fn from(t: DimensionTable) -> Self {
        Dimension::new([
            t.length,
            t.mass,
            t.time,
            t.angle,
            t.current,
            t.temperature,
            t.amount,
            t.luminosity,
        ])
    }
}

#[cfg(feature = "serde")]
impl From<Dimension> for DimensionTable {
    fn from(d: Dimension) -> Self {
        let [length, mass, time, angle, current, temperature, amount, luminosity] = d.exponents();
        DimensionTable {
            length,
            mass,
            time,
            angle,
            current,
            temperature,
            amount,
            luminosity,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn base_dimensions_are_distinct() {
        for (i, a) in BaseDimension::ALL.iter().enumerate() {
            for b in &BaseDimension::ALL[i + 1..] {
                assert_ne!(Dimension::base(*a), Dimension::base(*b));
            }
        }
    }

    #[test]
    fn derived_constants_match_composition() {
        assert_eq!(Dimension::LENGTH.div(&Dimension::TIME), Dimension::VELOCITY);
        assert_eq!(
            Dimension::VELOCITY.div(&Dimension::TIME),
            Dimension::ACCELERATION
        );
        assert_eq!(
            Dimension::MASS.mul(&Dimension::ACCELERATION),
            Dimension::FORCE
        );
        assert_eq!(
            Dimension::FORCE.mul(&Dimension::LENGTH),
            Dimension::ENERGY
        );
        assert_eq!(Dimension::ENERGY.div(&Dimension::TIME), Dimension::POWER);
        assert_eq!(Dimension::TIME.recip(), Dimension::FREQUENCY);
    }

    #[test]
    fn pow_zero_is_dimensionless() {
        assert!(Dimension::FORCE.pow(0).is_dimensionless());
    }

    #[test]
    fn root_requires_divisible_exponents() {
        let area = Dimension::LENGTH.pow(2);
        assert_eq!(area.root(2), Some(Dimension::LENGTH));
        assert_eq!(Dimension::VELOCITY.root(2), None);
        assert_eq!(Dimension::LENGTH.root(0), None);
    }

    #[test]
    fn exponents_saturate() {
        let big = Dimension::LENGTH.with_exponent(BaseDimension::Length, i8::MAX);
        assert_eq!(
            big.mul(&Dimension::LENGTH).exponent(BaseDimension::Length),
            i8::MAX
        );
        assert_eq!(big.pow(3).exponent(BaseDimension::Length), i8::MAX);
    }

    #[test]
    fn checked_ops_report_overflow() {
        let big = Dimension::LENGTH.with_exponent(BaseDimension::Length, i8::MAX);
        assert_eq!(big.checked_combine(&Dimension::LENGTH, Op::Multiply), None);
        assert_eq!(
            big.checked_combine(&Dimension::LENGTH, Op::Divide),
            Some(Dimension::LENGTH.with_exponent(BaseDimension::Length, i8::MAX - 1))
        );
        assert_eq!(big.checked_pow(2), None);
        assert_eq!(Dimension::VELOCITY.checked_pow(3), Some(Dimension::VELOCITY.pow(3)));
    }

    #[cfg(feature = "serde")]
    #[test]
    fn table_fills_missing_exponents_with_zero() {
        let d: Dimension = serde_json::from_str(r#"{"mass":1}"#).unwrap();
        assert_eq!(d, Dimension::MASS);
        assert!(serde_json::from_str::<Dimension>(r#"{"charge":1}"#).is_err());
    }

    #[test]
    fn display_lists_nonzero_exponents() {
        assert_eq!(Dimension::ACCELERATION.to_string(), "L·T^-2");
        assert_eq!(Dimension::DIMENSIONLESS.to_string(), "1");
        assert_eq!(Dimension::ANGULAR_VELOCITY.to_string(), "T^-1·A");
    }

    #[cfg(feature = "serde")]
    #[test]
    fn serde_uses_named_exponents() {
        let json = serde_json::to_string(&Dimension::ACCELERATION).unwrap();
        assert_eq!(json, r#"{"length":1,"time":-2}"#);
        let back: Dimension = serde_json::from_str(&json).unwrap();
        assert_eq!(back, Dimension::ACCELERATION);
    }

    fn small_dimension() -> impl Strategy<Value = Dimension> {
        proptest::array::uniform8(-4i8..=4).prop_map(Dimension::new)
    }

    proptest! {
        #[test]
        fn prop_mul_is_commutative(a in small_dimension(), b in small_dimension()) {
            prop_assert_eq!(a.mul(&b), b.mul(&a));
        }

        #[test]
        fn prop_mul_is_associative(a in small_dimension(), b in small_dimension(), c in small_dimension()) {
            prop_assert_eq!(
                a.combine(&b, Op::Multiply).combine(&c, Op::Multiply),
                a.combine(&b.combine(&c, Op::Multiply), Op::Multiply)
            );
        }

        #[test]
        fn prop_div_inverts_mul(a in small_dimension(), b in small_dimension()) {
            prop_assert_eq!(a.mul(&b).div(&b), a);
        }
    }
}
