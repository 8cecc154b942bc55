//! Mapping between Rust types, descriptors and runtime values.
//!
//! [`Describe`] gives the descriptor a Rust type stands for, [`FromValue`] extracts it from a checked [`Value`], and
//! [`IntoValue`] wraps a result back up. The `#[validated]` attribute generates code against these three traits.

use super::descriptor::TypeDescriptor;
use super::value::Value;
use crate::error::{TypeCheckError, TypeCheckResult};
use crate::quantity::Quantity;
use crate::unit::Unit;
use std::collections::{BTreeMap, BTreeSet, HashMap, HashSet};
use std::hash::Hash;

/// Rust types with a runtime descriptor.
pub trait Describe {
    /// Descriptor values of this type match.
    fn describe() -> TypeDescriptor;
}

/// Rust types that can be read out of a [`Value`].
pub trait FromValue: Sized {
    /// Converts, failing with [`TypeCheckError::Conversion`] on a shape or range mismatch.
    fn from_value(value: &Value) -> TypeCheckResult<Self>;
}

/// Rust types that can be turned into a [`Value`].
pub trait IntoValue {
    /// Converts.
    fn into_value(self) -> Value;
}

fn mismatch<T: Describe>(value: &Value) -> TypeCheckError {
    TypeCheckError::Conversion {
        expected: T::describe().to_string(),
        found: value.type_name().to_owned(),
    }
}

/// `int` payload of a value; `bool` counts as `0`/`1`, as it matches `int`.
fn int_of(value: &Value) -> Option<i64> {
    match value {
        Value::Int(v) => Some(*v),
        Value::Bool(b) => Some(i64::from(*b)),
        _ => None,
    }
}

/// Reads argument `index` of `callable` as a `T`.
pub fn bound_arg<T: FromValue>(
    callable: &str,
    args: &[Value],
    index: usize,
    parameter: &str,
) -> TypeCheckResult<T> {
    let value = args.get(index).ok_or_else(|| TypeCheckError::MissingArgument {
        callable: callable.to_owned(),
        parameter: parameter.to_owned(),
    })?;
    T::from_value(value)
}

impl Describe for Value {
    fn describe() -> TypeDescriptor {
        TypeDescriptor::Any
    }
}

impl FromValue for Value {
    fn from_value(value: &Value) -> TypeCheckResult<Self> {
        Ok(value.clone())
    }
}

impl IntoValue for Value {
    fn into_value(self) -> Value {
        self
    }
}

impl Describe for () {
    fn describe() -> TypeDescriptor {
        TypeDescriptor::none()
    }
}

impl FromValue for () {
    fn from_value(value: &Value) -> TypeCheckResult<Self> {
        match value {
            Value::None => Ok(()),
            other => Err(mismatch::<()>(other)),
        }
    }
}

impl IntoValue for () {
    fn into_value(self) -> Value {
        Value::None
    }
}

macro_rules! scalar_value {
    ($ty:ty, $descriptor:expr, $variant:ident) => {
        impl Describe for $ty {
            fn describe() -> TypeDescriptor {
                $descriptor
            }
        }

        impl FromValue for $ty {
            fn from_value(value: &Value) -> TypeCheckResult<Self> {
                match value {
                    Value::$variant(v) => Ok(v.clone()),
                    other => Err(mismatch::<$ty>(other)),
                }
            }
        }

        impl IntoValue for $ty {
            fn into_value(self) -> Value {
                Value::$variant(self)
            }
        }
    };
}

scalar_value!(bool, TypeDescriptor::bool(), Bool);
scalar_value!(f64, TypeDescriptor::float(), Float);
scalar_value!(String, TypeDescriptor::str(), Str);
scalar_value!(Quantity, TypeDescriptor::quantity(), Quantity);
scalar_value!(Unit, TypeDescriptor::unit(), Unit);

macro_rules! int_value {
    ($($ty:ty),*) => {$(
        impl Describe for $ty {
            fn describe() -> TypeDescriptor {
                TypeDescriptor::int()
            }
        }

        impl FromValue for $ty {
            fn from_value(value: &Value) -> TypeCheckResult<Self> {
                match int_of(value) {
                    Some(v) => <$ty>::try_from(v).map_err(|_| TypeCheckError::Conversion {
                        expected: stringify!($ty).to_owned(),
                        found: format!("int {v}"),
                    }),
                    None => Err(mismatch::<$ty>(value)),
                }
            }
        }

        impl IntoValue for $ty {
            fn into_value(self) -> Value {
                Value::Int(i64::from(self))
            }
        }
    )*};
}

int_value!(i8, i16, i32, u8, u16, u32);

impl Describe for i64 {
    fn describe() -> TypeDescriptor {
        TypeDescriptor::int()
    }
}

impl FromValue for i64 {
    fn from_value(value: &Value) -> TypeCheckResult<Self> {
        int_of(value).ok_or_else(|| mismatch::<i64>(value))
    }
}

impl IntoValue for i64 {
    fn into_value(self) -> Value {
        Value::Int(self)
    }
}

impl Describe for usize {
    fn describe() -> TypeDescriptor {
        TypeDescriptor::int()
    }
}

impl FromValue for usize {
    fn from_value(value: &Value) -> TypeCheckResult<Self> {
        match int_of(value) {
            Some(v) => usize::try_from(v).map_err(|_| TypeCheckError::Conversion {
                expected: "usize".to_owned(),
                found: format!("int {v}"),
            }),
            None => Err(mismatch::<usize>(value)),
        }
    }
}

impl IntoValue for usize {
    /// Saturates at `i64::MAX`.
    fn into_value(self) -> Value {
        Value::Int(i64::try_from(self).unwrap_or(i64::MAX))
    }
}

impl Describe for f32 {
    fn describe() -> TypeDescriptor {
        TypeDescriptor::float()
    }
}

impl FromValue for f32 {
    fn from_value(value: &Value) -> TypeCheckResult<Self> {
        match value {
            Value::Float(v) if !v.is_finite() || v.abs() <= f64::from(f32::MAX) => Ok(*v as f32),
            Value::Float(v) => Err(TypeCheckError::Conversion {
                expected: "f32".to_owned(),
                found: format!("float {v}"),
            }),
            other => Err(mismatch::<f32>(other)),
        }
    }
}

impl IntoValue for f32 {
    fn into_value(self) -> Value {
        Value::Float(f64::from(self))
    }
}

impl IntoValue for &str {
    fn into_value(self) -> Value {
        Value::Str(self.to_owned())
    }
}

impl<T: Describe> Describe for Option<T> {
    fn describe() -> TypeDescriptor {
        TypeDescriptor::optional(T::describe())
    }
}

impl<T: FromValue> FromValue for Option<T> {
    fn from_value(value: &Value) -> TypeCheckResult<Self> {
        match value {
            Value::None => Ok(None),
            other => T::from_value(other).map(Some),
        }
    }
}

impl<T: IntoValue> IntoValue for Option<T> {
    fn into_value(self) -> Value {
        self.map_or(Value::None, IntoValue::into_value)
    }
}

impl<T: Describe> Describe for Vec<T> {
    fn describe() -> TypeDescriptor {
        TypeDescriptor::list(T::describe())
    }
}

impl<T: Describe + FromValue> FromValue for Vec<T> {
    fn from_value(value: &Value) -> TypeCheckResult<Self> {
        match value {
            Value::List(items) => items.iter().map(T::from_value).collect(),
            other => Err(mismatch::<Vec<T>>(other)),
        }
    }
}

impl<T: IntoValue> IntoValue for Vec<T> {
    fn into_value(self) -> Value {
        Value::List(self.into_iter().map(IntoValue::into_value).collect())
    }
}

macro_rules! set_value {
    ($set:ident, $($bound:path),+) => {
        impl<T: Describe> Describe for $set<T> {
            fn describe() -> TypeDescriptor {
                TypeDescriptor::set(T::describe())
            }
        }

        impl<T: Describe + FromValue $(+ $bound)+> FromValue for $set<T> {
            fn from_value(value: &Value) -> TypeCheckResult<Self> {
                match value {
                    Value::Set(items) => items.iter().map(T::from_value).collect(),
                    other => Err(mismatch::<$set<T>>(other)),
                }
            }
        }

        impl<T: IntoValue> IntoValue for $set<T> {
            fn into_value(self) -> Value {
                Value::set(self.into_iter().map(IntoValue::into_value))
            }
        }
    };
}

set_value!(HashSet, Eq, Hash);
set_value!(BTreeSet, Ord);

macro_rules! map_value {
    ($map:ident, $($bound:path),+) => {
        impl<K: Describe, V: Describe> Describe for $map<K, V> {
            fn describe() -> TypeDescriptor {
                TypeDescriptor::dict(K::describe(), V::describe())
            }
        }

        impl<K, V> FromValue for $map<K, V>
        where
            K: Describe + FromValue $(+ $bound)+,
            V: Describe + FromValue,
        {
            fn from_value(value: &Value) -> TypeCheckResult<Self> {
                match value {
                    Value::Dict(pairs) => pairs
                        .iter()
                        .map(|(k, v)| Ok((K::from_value(k)?, V::from_value(v)?)))
                        .collect(),
                    other => Err(mismatch::<$map<K, V>>(other)),
                }
            }
        }

        impl<K: IntoValue, V: IntoValue> IntoValue for $map<K, V> {
            fn into_value(self) -> Value {
                Value::dict(
                    self.into_iter()
                        .map(|(k, v)| (k.into_value(), v.into_value())),
                )
            }
        }
    };
}

map_value!(HashMap, Eq, Hash);
map_value!(BTreeMap, Ord);

macro_rules! tuple_value {
    ($len:literal; $($name:ident $idx:tt),+) => {
        impl<$($name: Describe),+> Describe for ($($name,)+) {
            fn describe() -> TypeDescriptor {
                TypeDescriptor::tuple(vec![$($name::describe()),+])
            }
        }

        impl<$($name: Describe + FromValue),+> FromValue for ($($name,)+) {
            fn from_value(value: &Value) -> TypeCheckResult<Self> {
                match value {
                    Value::Tuple(items) if items.len() == $len => {
                        Ok(($($name::from_value(&items[$idx])?,)+))
                    }
                    other => Err(mismatch::<Self>(other)),
                }
            }
        }

        impl<$($name: IntoValue),+> IntoValue for ($($name,)+) {
            fn into_value(self) -> Value {
                Value::Tuple(vec![$(self.$idx.into_value()),+])
            }
        }
    };
}

tuple_value!(1; A 0);
tuple_value!(2; A 0, B 1);
tuple_value!(3; A 0, B 1, C 2);
tuple_value!(4; A 0, B 1, C 2, D 3);
