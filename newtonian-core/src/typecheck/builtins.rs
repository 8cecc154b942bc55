//! Quantity operations exposed as validated calls over runtime values.

use super::convert::bound_arg;
use super::descriptor::TypeDescriptor as T;
use super::signature::Signature;
use super::validated::{NativeFn, ValidatedCall};
use super::value::Value;
use crate::error::{TypeCheckError, TypeCheckResult, UnitResult};
use crate::quantity::{Magnitude, Quantity};
use crate::unit::Unit;
use std::collections::BTreeMap;

/// Validated calls indexed by name.
///
/// ```rust
/// use newtonian_core::typecheck::{CallTable, Value};
/// use newtonian_core::units::{KM, M};
///
/// let table = CallTable::quantity_ops().unwrap();
/// let sum = table
///     .call("add", &[Value::from(1.0 * KM), Value::from(500.0 * M)], &[])
///     .unwrap();
/// assert_eq!(sum, Value::from(1500.0 * M));
/// ```
#[derive(Clone, Debug, Default)]
pub struct CallTable {
    calls: BTreeMap<String, ValidatedCall>,
}

impl CallTable {
    /// An empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// `add`, `sub`, `mul`, `div`, `pow`, `to`, `is_scalar` and `is_vector` over quantities.
    pub fn quantity_ops() -> TypeCheckResult<Self> {
        let mut table = Self::new();
        table.register(binary("add", Quantity::add)?);
        table.register(binary("sub", Quantity::sub)?);
        table.register(binary("mul", Quantity::mul)?);
        table.register(binary("div", Quantity::div)?);
        table.register(pow()?);
        table.register(to()?);
        table.register(predicate("is_scalar", Quantity::is_scalar)?);
        table.register(predicate("is_vector", Quantity::is_vector)?);
        Ok(table)
    }

    /// Adds `call` under its own name, returning the call it replaced.
    pub fn register(&mut self, call: ValidatedCall) -> Option<ValidatedCall> {
        let previous = self.calls.insert(call.name().to_owned(), call);
        if let Some(prev) = &previous {
            log::warn!("validated call `{}` re-registered", prev.name());
        }
        previous
    }

    /// Looks a call up by name.
    pub fn get(&self, name: &str) -> Option<&ValidatedCall> {
        self.calls.get(name)
    }

    /// Registered names, sorted.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.calls.keys().map(String::as_str)
    }

    /// Invokes the call registered as `name`.
    pub fn call(&self, name: &str, args: &[Value], kwargs: &[(&str, Value)]) -> TypeCheckResult<Value> {
        self.get(name)
            .ok_or_else(|| TypeCheckError::UnknownCallable(name.to_owned()))?
            .call(args, kwargs)
    }
}

fn binary(
    name: &'static str,
    op: fn(&Quantity, &Quantity) -> UnitResult<Quantity>,
) -> TypeCheckResult<ValidatedCall> {
    let body = NativeFn::new(name, ["a", "b"], move |args| {
        let a: Quantity = bound_arg(name, args, 0, "a")?;
        let b: Quantity = bound_arg(name, args, 1, "b")?;
        Ok(Value::Quantity(op(&a, &b)?))
    });
    let signature = Signature::new()
        .param("a", T::quantity())
        .param("b", T::quantity())
        .returns(T::quantity());
    ValidatedCall::wrap(body, signature)
}

fn pow() -> TypeCheckResult<ValidatedCall> {
    let body = NativeFn::new("pow", ["q", "n"], |args| {
        let q: Quantity = bound_arg("pow", args, 0, "q")?;
        let n: i32 = bound_arg("pow", args, 1, "n")?;
        Ok(Value::Quantity(q.pow(n)?))
    });
    let signature = Signature::new()
        .param("q", T::quantity())
        .param("n", T::int())
        .returns(T::quantity());
    ValidatedCall::wrap(body, signature)
}

fn to() -> TypeCheckResult<ValidatedCall> {
    let body = NativeFn::new("to", ["q", "unit"], |args| {
        let q: Quantity = bound_arg("to", args, 0, "q")?;
        let unit: Unit = bound_arg("to", args, 1, "unit")?;
        Ok(match q.to(&unit)? {
            Magnitude::Scalar(v) => Value::Float(v),
            Magnitude::Vector(v) => Value::List(v.into_iter().map(Value::Float).collect()),
        })
    });
    let signature = Signature::new()
        .param("q", T::quantity())
        .param("unit", T::unit())
        .returns(T::float() | T::list(T::float()));
    ValidatedCall::wrap(body, signature)
}

fn predicate(name: &'static str, test: fn(&Quantity, &Unit) -> bool) -> TypeCheckResult<ValidatedCall> {
    let body = NativeFn::new(name, ["q", "unit"], move |args| {
        let q: Quantity = bound_arg(name, args, 0, "q")?;
        let unit: Unit = bound_arg(name, args, 1, "unit")?;
        Ok(Value::Bool(test(&q, &unit)))
    });
    let signature = Signature::new()
        .param("q", T::quantity())
        .param("unit", T::unit())
        .returns(T::bool());
    ValidatedCall::wrap(body, signature)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::UnitError;
    use crate::units::{M, S};

    fn q(v: Quantity) -> Value {
        Value::Quantity(v)
    }

    #[test]
    fn table_lists_quantity_ops() {
        let table = CallTable::quantity_ops().unwrap();
        let names: Vec<&str> = table.names().collect();
        assert_eq!(
            names,
            ["add", "div", "is_scalar", "is_vector", "mul", "pow", "sub", "to"]
        );
    }

    #[test]
    fn unit_errors_surface_through_calls() {
        let table = CallTable::quantity_ops().unwrap();
        let err = table
            .call("add", &[q(1.0 * M), q(1.0 * S)], &[])
            .unwrap_err();
        assert!(matches!(
            err,
            TypeCheckError::Unit(UnitError::DimensionMismatch { .. })
        ));
    }

    #[test]
    fn arguments_are_type_checked() {
        let table = CallTable::quantity_ops().unwrap();
        let err = table
            .call("pow", &[q(2.0 * M)], &[("n", Value::Float(2.0))])
            .unwrap_err();
        assert!(matches!(
            err,
            TypeCheckError::ArgumentTypeMismatch { ref parameter, .. } if parameter == "n"
        ));
        assert_eq!(
            table.call("pow", &[q(2.0 * M), Value::Int(2)], &[]).unwrap(),
            q(4.0 * M.powi(2))
        );
    }

    #[test]
    fn to_and_predicates() {
        let table = CallTable::quantity_ops().unwrap();
        let v = q([3.0, 4.0] * (M / S));
        assert_eq!(
            table.call("to", &[v.clone(), Value::Unit(M / S)], &[]).unwrap(),
            Value::List(vec![Value::Float(3.0), Value::Float(4.0)])
        );
        assert_eq!(
            table.call("is_vector", &[v.clone(), Value::Unit(M / S)], &[]).unwrap(),
            Value::Bool(true)
        );
        assert_eq!(
            table.call("is_scalar", &[v], &[("unit", Value::Unit(M / S))]).unwrap(),
            Value::Bool(false)
        );
    }

    #[test]
    fn unknown_names() {
        let table = CallTable::new();
        assert_eq!(
            table.call("nope", &[], &[]).unwrap_err(),
            TypeCheckError::UnknownCallable("nope".to_owned())
        );
    }
}
