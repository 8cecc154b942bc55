//! Structural matching of values against descriptors.

use super::descriptor::{PlainType, TypeDescriptor};
use super::parse::MAX_DEPTH;
use super::value::Value;
use crate::error::{TypeCheckError, TypeCheckResult};

/// Decides whether `value` conforms to `descriptor`.
///
/// Containers match element-wise (an empty container matches any element type), tuples also require equal arity,
/// and `Callable[[...], R]` requires a function whose declared signature is exactly that. A
/// [`TypeDescriptor::Generic`] has no rule and fails with [`TypeCheckError::UnsupportedDescriptor`] instead of
/// returning `false`. Descriptors nested deeper than the parser accepts fail with
/// [`TypeCheckError::InvalidDescriptor`].
///
/// ```rust
/// use newtonian_core::typecheck::{matches, TypeDescriptor as T, Value};
///
/// let v = Value::List(vec![Value::Int(3), Value::Float(3.5), Value::Int(7)]);
/// assert!(matches(&v, &T::list(T::int() | T::float())).unwrap());
/// assert!(!matches(&Value::from("a"), &T::int()).unwrap());
/// ```
pub fn matches(value: &Value, descriptor: &TypeDescriptor) -> TypeCheckResult<bool> {
    matches_at(value, descriptor, 0)
}

fn matches_at(value: &Value, descriptor: &TypeDescriptor, depth: usize) -> TypeCheckResult<bool> {
    if depth > MAX_DEPTH {
        return Err(TypeCheckError::InvalidDescriptor(format!(
            "nesting too deep (more than {MAX_DEPTH} levels)"
        )));
    }
    let depth = depth + 1;
    match descriptor {
        TypeDescriptor::Any => Ok(true),
        TypeDescriptor::Plain(plain) => Ok(matches_plain(value, plain)),
        TypeDescriptor::Union(alternatives) => {
            for alt in alternatives {
                if matches_at(value, alt, depth)? {
                    return Ok(true);
                }
            }
            Ok(false)
        }
        TypeDescriptor::List(element) => match value {
            Value::List(items) => all(items, element, depth),
            _ => Ok(false),
        },
        TypeDescriptor::Set(element) => match value {
            Value::Set(items) => all(items, element, depth),
            _ => Ok(false),
        },
        TypeDescriptor::Tuple(elements) => match value {
            Value::Tuple(items) if items.len() == elements.len() => {
                for (item, element) in items.iter().zip(elements) {
                    if !matches_at(item, element, depth)? {
                        return Ok(false);
                    }
                }
                Ok(true)
            }
            _ => Ok(false),
        },
        TypeDescriptor::Dict(key, val) => match value {
            Value::Dict(pairs) => {
                for (k, v) in pairs {
                    if !(matches_at(k, key, depth)? && matches_at(v, val, depth)?) {
                        return Ok(false);
                    }
                }
                Ok(true)
            }
            _ => Ok(false),
        },
        TypeDescriptor::Callable { params, ret } => Ok(match value {
            Value::Function(f) => f
                .signature()
                .is_some_and(|sig| sig.matches_callable(params, ret)),
            _ => false,
        }),
        TypeDescriptor::Generic { .. } => {
            Err(TypeCheckError::UnsupportedDescriptor(descriptor.to_string()))
        }
    }
}

fn all(items: &[Value], element: &TypeDescriptor, depth: usize) -> TypeCheckResult<bool> {
    for item in items {
        if !matches_at(item, element, depth)? {
            return Ok(false);
        }
    }
    Ok(true)
}

fn matches_plain(value: &Value, plain: &PlainType) -> bool {
    match (plain, value) {
        (PlainType::NoneType, Value::None)
        | (PlainType::Bool, Value::Bool(_))
        | (PlainType::Int, Value::Int(_) | Value::Bool(_))
        | (PlainType::Float, Value::Float(_))
        | (PlainType::Str, Value::Str(_))
        | (PlainType::Quantity, Value::Quantity(_))
        | (PlainType::Unit, Value::Unit(_))
        | (PlainType::Function, Value::Function(_)) => true,
        (PlainType::Class(name), Value::Object(obj)) => obj.is_instance_of(name),
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::typecheck::value::{Class, Function, Object};
    use crate::typecheck::{Signature, TypeDescriptor as T};
    use crate::units::M;
    use proptest::prelude::*;

    fn m(v: Value, d: &T) -> bool {
        matches(&v, d).unwrap()
    }

    fn identity() -> Value {
        Value::Function(
            Function::new("identity", |args| Ok(args[0].clone()))
                .with_signature(Signature::new().param("x", T::int()).returns(T::int())),
        )
    }

    #[test]
    fn plain_types() {
        assert!(m(Value::Int(3), &T::int()));
        assert!(m(Value::Float(3.5), &(T::int() | T::float())));
        assert!(!m(Value::Int(3), &T::float()));
        assert!(m(Value::Bool(true), &T::int()));
        assert!(!m(Value::Int(1), &T::bool()));
        assert!(!m(Value::Bool(false), &T::float()));
        assert!(m(Value::None, &T::optional(T::int())));
        assert!(m(Value::Quantity(3.0 * M), &T::quantity()));
        assert!(m(Value::Unit(M), &T::unit()));
        assert!(!m(Value::Unit(M), &T::quantity()));
    }

    #[test]
    fn containers() {
        let list = Value::List(vec![Value::Int(3), Value::Float(3.5), Value::Int(7)]);
        assert!(m(list.clone(), &T::list(T::int() | T::float())));
        assert!(!m(list.clone(), &T::list(T::int())));
        assert!(!m(list, &T::set(T::Any)));

        let dict = Value::dict([
            (Value::from("a"), Value::Int(3)),
            (Value::from("b"), Value::Float(3.5)),
        ]);
        assert!(m(dict.clone(), &T::dict(T::str(), T::int() | T::float())));
        assert!(!m(dict, &T::dict(T::int(), T::Any)));

        let set = Value::set([Value::Int(3), Value::Float(3.5)]);
        assert!(m(set, &T::set(T::int() | T::float())));
    }

    #[test]
    fn empty_containers_match_any_element_type() {
        assert!(m(Value::List(vec![]), &T::list(T::int())));
        assert!(m(Value::Dict(vec![]), &T::dict(T::str(), T::int())));
        assert!(m(Value::Set(vec![]), &T::set(T::str())));
    }

    #[test]
    fn tuples_check_arity() {
        let pair = Value::Tuple(vec![Value::Int(1), Value::Int(2)]);
        assert!(m(pair.clone(), &T::tuple([T::int(), T::int()])));
        assert!(!m(pair.clone(), &T::tuple([T::int(), T::int(), T::int()])));
        assert!(!m(pair, &T::tuple([T::int()])));
        let mixed = Value::Tuple(vec![Value::Int(3), Value::Float(3.5), Value::from("a")]);
        assert!(m(mixed, &T::tuple([T::int(), T::float(), T::str()])));
        assert!(m(Value::Tuple(vec![]), &T::tuple(Vec::new())));
    }

    #[test]
    fn callables_need_exact_signature() {
        assert!(m(identity(), &T::callable([T::int()], T::int())));
        assert!(!m(identity(), &T::callable([T::int()], T::float())));
        assert!(!m(identity(), &T::callable([T::int(), T::int()], T::int())));
        assert!(m(identity(), &T::Plain(PlainType::Function)));

        let untyped = Value::Function(Function::new("f", |_| Ok(Value::None)));
        assert!(!m(untyped, &T::callable(Vec::new(), T::none())));
    }

    #[test]
    fn objects_match_their_classes() {
        let body = Class::new("Body");
        let ball = Class::with_bases("Ball", vec![body]);
        let obj = Value::Object(Object::new(ball));
        assert!(m(obj.clone(), &T::class("Ball")));
        assert!(m(obj.clone(), &T::class("Body")));
        assert!(!m(obj, &T::class("Space")));
    }

    #[test]
    fn generic_descriptors_fail_fast() {
        let g = T::Generic {
            name: "frozenset".to_owned(),
            args: vec![T::int()],
        };
        assert!(matches!(
            matches(&Value::Int(1), &g),
            Err(TypeCheckError::UnsupportedDescriptor(_))
        ));
        // Nested generics only surface when reached.
        let nested = T::list(g);
        assert!(m(Value::List(vec![]), &nested));
        assert!(matches(&Value::List(vec![Value::Int(1)]), &nested).is_err());
    }

    #[test]
    fn deep_descriptors_are_rejected() {
        let mut d = T::int();
        let mut v = Value::Int(1);
        for _ in 0..300 {
            d = T::list(d);
            v = Value::List(vec![v]);
        }
        assert!(matches!(
            matches(&v, &d),
            Err(TypeCheckError::InvalidDescriptor(ref msg)) if msg.contains("nesting too deep")
        ));

        let mut d = T::int();
        let mut v = Value::Int(1);
        for _ in 0..MAX_DEPTH {
            d = T::list(d);
            v = Value::List(vec![v]);
        }
        assert!(m(v, &d));
    }

    fn leaf() -> impl Strategy<Value = Value> {
        prop_oneof![
            Just(Value::None),
            any::<bool>().prop_map(Value::Bool),
            any::<i64>().prop_map(Value::Int),
            (-1e9..1e9f64).prop_map(Value::Float),
            "[a-z]{0,6}".prop_map(Value::Str),
        ]
    }

    fn value() -> impl Strategy<Value = Value> {
        leaf().prop_recursive(3, 24, 4, |inner| {
            prop_oneof![
                prop::collection::vec(inner.clone(), 0..4).prop_map(Value::List),
                prop::collection::vec(inner.clone(), 0..4).prop_map(Value::Tuple),
                prop::collection::vec(inner, 0..4).prop_map(|items| Value::set(items)),
            ]
        })
    }

    proptest! {
        #[test]
        fn prop_any_matches_everything(v in value()) {
            prop_assert!(matches(&v, &T::Any).unwrap());
            prop_assert!(matches(&Value::List(vec![v.clone()]), &T::list(T::Any)).unwrap());
        }

        #[test]
        fn prop_empty_list_matches_list_of_anything(v in value()) {
            let d: T = T::list(match v {
                Value::Int(_) => T::int(),
                Value::Str(_) => T::str(),
                _ => T::float(),
            });
            prop_assert!(matches(&Value::List(vec![]), &d).unwrap());
        }
    }
}
