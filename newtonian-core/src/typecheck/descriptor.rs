//! Type descriptor trees.

use std::borrow::Cow;
use std::fmt;
use std::ops::BitOr;

/// A nominal (non-parameterised) type.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum PlainType {
    /// `None`.
    NoneType,
    /// `bool`.
    Bool,
    /// `int`.
    Int,
    /// `float`.
    Float,
    /// `str`.
    Str,
    /// A [`Quantity`](crate::Quantity).
    Quantity,
    /// A [`Unit`](crate::Unit).
    Unit,
    /// Any function value, regardless of signature.
    Function,
    /// A class name; matches objects of that class or a subclass.
    Class(Cow<'static, str>),
}

impl PlainType {
    /// Annotation spelling.
    pub fn name(&self) -> &str {
        match self {
            PlainType::NoneType => "None",
            PlainType::Bool => "bool",
            PlainType::Int => "int",
            PlainType::Float => "float",
            PlainType::Str => "str",
            PlainType::Quantity => "Quantity",
            PlainType::Unit => "Unit",
            PlainType::Function => "Callable",
            PlainType::Class(name) => name,
        }
    }
}

/// Structural description of an expected value.
///
/// The tree is closed: [`matches`](super::matches) handles every variant except [`TypeDescriptor::Generic`], which
/// stands for a parameterised type the matcher does not know and always fails with
/// [`UnsupportedDescriptor`](crate::TypeCheckError::UnsupportedDescriptor).
///
/// ```rust
/// use newtonian_core::typecheck::TypeDescriptor as T;
///
/// let d = T::dict(T::str(), T::int() | T::float());
/// assert_eq!(d.to_string(), "dict[str, int | float]");
/// assert_eq!(d, "dict[str, float | int]".parse::<T>().unwrap());
/// ```
#[derive(Clone, Debug)]
pub enum TypeDescriptor {
    /// Matches anything.
    Any,
    /// A nominal type.
    Plain(PlainType),
    /// Matches if any alternative matches. Equality ignores order.
    Union(Vec<TypeDescriptor>),
    /// `list[T]`.
    List(Box<TypeDescriptor>),
    /// `tuple[T1, ..., Tn]`, fixed arity.
    Tuple(Vec<TypeDescriptor>),
    /// `dict[K, V]`.
    Dict(Box<TypeDescriptor>, Box<TypeDescriptor>),
    /// `set[T]`.
    Set(Box<TypeDescriptor>),
    /// `Callable[[P1, ..., Pn], R]`.
    Callable {
        /// Parameter descriptors, in order.
        params: Vec<TypeDescriptor>,
        /// Return descriptor.
        ret: Box<TypeDescriptor>,
    },
    /// A parameterised type with no matching rule.
    Generic {
        /// Origin name, e.g. `frozenset`.
        name: String,
        /// Type arguments.
        args: Vec<TypeDescriptor>,
    },
}

impl TypeDescriptor {
    /// `int`.
    pub fn int() -> Self {
        TypeDescriptor::Plain(PlainType::Int)
    }

    /// `float`.
    pub fn float() -> Self {
        TypeDescriptor::Plain(PlainType::Float)
    }

    /// `str`.
    pub fn str() -> Self {
        TypeDescriptor::Plain(PlainType::Str)
    }

    /// `bool`.
    pub fn bool() -> Self {
        TypeDescriptor::Plain(PlainType::Bool)
    }

    /// `None`.
    pub fn none() -> Self {
        TypeDescriptor::Plain(PlainType::NoneType)
    }

    /// `Quantity`.
    pub fn quantity() -> Self {
        TypeDescriptor::Plain(PlainType::Quantity)
    }

    /// `Unit`.
    pub fn unit() -> Self {
        TypeDescriptor::Plain(PlainType::Unit)
    }

    /// Objects of class `name` or a subclass.
    pub fn class(name: impl Into<Cow<'static, str>>) -> Self {
        TypeDescriptor::Plain(PlainType::Class(name.into()))
    }

    /// `list[T]`.
    pub fn list(element: TypeDescriptor) -> Self {
        TypeDescriptor::List(Box::new(element))
    }

    /// `tuple[...]`.
    pub fn tuple(elements: impl Into<Vec<TypeDescriptor>>) -> Self {
        TypeDescriptor::Tuple(elements.into())
    }

    /// `dict[K, V]`.
    pub fn dict(key: TypeDescriptor, value: TypeDescriptor) -> Self {
        TypeDescriptor::Dict(Box::new(key), Box::new(value))
    }

    /// `set[T]`.
    pub fn set(element: TypeDescriptor) -> Self {
        TypeDescriptor::Set(Box::new(element))
    }

    /// `Callable[[params...], ret]`.
    pub fn callable(params: impl Into<Vec<TypeDescriptor>>, ret: TypeDescriptor) -> Self {
        TypeDescriptor::Callable {
            params: params.into(),
            ret: Box::new(ret),
        }
    }

    /// A union; nested unions are flattened and repeats dropped. A single alternative is returned as-is.
    pub fn union(alternatives: impl IntoIterator<Item = TypeDescriptor>) -> Self {
        let mut flat: Vec<TypeDescriptor> = Vec::new();
        for alt in alternatives {
            let parts = match alt {
                TypeDescriptor::Union(inner) => inner,
                other => vec![other],
            };
            for part in parts {
                if !flat.contains(&part) {
                    flat.push(part);
                }
            }
        }
        if flat.len() == 1 {
            flat.remove(0)
        } else {
            TypeDescriptor::Union(flat)
        }
    }

    /// `T | None`.
    pub fn optional(inner: TypeDescriptor) -> Self {
        Self::union([inner, Self::none()])
    }
}

impl PartialEq for TypeDescriptor {
    fn eq(&self, other: &Self) -> bool {
        use TypeDescriptor as T;
        match (self, other) {
            (T::Any, T::Any) => true,
            (T::Plain(a), T::Plain(b)) => a == b,
            (T::Union(a), T::Union(b)) => {
                a.len() == b.len() && a.iter().all(|x| b.contains(x)) && b.iter().all(|y| a.contains(y))
            }
            (T::List(a), T::List(b)) | (T::Set(a), T::Set(b)) => a == b,
            (T::Tuple(a), T::Tuple(b)) => a == b,
            (T::Dict(ka, va), T::Dict(kb, vb)) => ka == kb && va == vb,
            (
                T::Callable { params: pa, ret: ra },
                T::Callable { params: pb, ret: rb },
            ) => pa == pb && ra == rb,
            (T::Generic { name: na, args: aa }, T::Generic { name: nb, args: ab }) => {
                na == nb && aa == ab
            }
            _ => false,
        }
    }
}

impl Eq for TypeDescriptor {}

impl BitOr for TypeDescriptor {
    type Output = TypeDescriptor;

    fn bitor(self, rhs: TypeDescriptor) -> TypeDescriptor {
        TypeDescriptor::union([self, rhs])
    }
}

impl From<PlainType> for TypeDescriptor {
    fn from(p: PlainType) -> Self {
        TypeDescriptor::Plain(p)
    }
}

fn join(f: &mut fmt::Formatter<'_>, items: &[TypeDescriptor], sep: &str) -> fmt::Result {
    for (i, item) in items.iter().enumerate() {
        if i > 0 {
            f.write_str(sep)?;
        }
        write!(f, "{item}")?;
    }
    Ok(())
}

impl fmt::Display for TypeDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TypeDescriptor::Any => f.write_str("Any"),
            TypeDescriptor::Plain(p) => f.write_str(p.name()),
            TypeDescriptor::Union(alts) => join(f, alts, " | "),
            TypeDescriptor::List(t) => write!(f, "list[{t}]"),
            TypeDescriptor::Tuple(ts) if ts.is_empty() => f.write_str("tuple[()]"),
            TypeDescriptor::Tuple(ts) => {
                f.write_str("tuple[")?;
                join(f, ts, ", ")?;
                f.write_str("]")
            }
            TypeDescriptor::Dict(k, v) => write!(f, "dict[{k}, {v}]"),
            TypeDescriptor::Set(t) => write!(f, "set[{t}]"),
            TypeDescriptor::Callable { params, ret } => {
                f.write_str("Callable[[")?;
                join(f, params, ", ")?;
                write!(f, "], {ret}]")
            }
            TypeDescriptor::Generic { name, args } => {
                write!(f, "{name}[")?;
                join(f, args, ", ")?;
                f.write_str("]")
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::TypeDescriptor as T;

    #[test]
    fn union_flattens_and_dedups() {
        let u = T::int() | T::float() | T::int();
        assert_eq!(u, T::Union(vec![T::int(), T::float()]));
        assert_eq!(T::union([T::str()]), T::str());
    }

    #[test]
    fn union_equality_ignores_order() {
        assert_eq!(T::int() | T::float(), T::float() | T::int());
        assert_ne!(T::int() | T::float(), T::int() | T::str());
        assert_ne!(T::tuple([T::int(), T::float()]), T::tuple([T::float(), T::int()]));
    }

    #[test]
    fn display_uses_annotation_syntax() {
        assert_eq!(T::list(T::int() | T::float()).to_string(), "list[int | float]");
        assert_eq!(
            T::tuple([T::int(), T::float(), T::str()]).to_string(),
            "tuple[int, float, str]"
        );
        assert_eq!(T::tuple(Vec::new()).to_string(), "tuple[()]");
        assert_eq!(T::callable([T::int()], T::int()).to_string(), "Callable[[int], int]");
        assert_eq!(T::optional(T::class("Body")).to_string(), "Body | None");
        assert_eq!(T::set(T::Any).to_string(), "set[Any]");
    }
}
