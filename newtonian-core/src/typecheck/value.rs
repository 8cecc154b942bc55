//! Dynamic values checked by the descriptor matcher.

use super::signature::Signature;
use crate::error::TypeCheckResult;
use crate::quantity::Quantity;
use crate::unit::Unit;
use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

/// Body of a [`Function`] value: positional arguments in, one value out.
pub type FunctionBody = dyn Fn(&[Value]) -> TypeCheckResult<Value> + Send + Sync;

/// A runtime value.
///
/// `Dict` keeps insertion order and unique keys; `Set` keeps unique elements. Use [`Value::dict`] and [`Value::set`]
/// to build them from arbitrary input.
#[derive(Clone, Debug, PartialEq)]
pub enum Value {
    /// Absence of a value.
    None,
    /// Boolean. Matches both `bool` and `int`, the way `bool` subclasses `int` in annotation semantics.
    Bool(bool),
    /// Signed integer.
    Int(i64),
    /// Floating-point number.
    Float(f64),
    /// Text.
    Str(String),
    /// Variable-length sequence.
    List(Vec<Value>),
    /// Fixed-length sequence.
    Tuple(Vec<Value>),
    /// Key/value mapping.
    Dict(Vec<(Value, Value)>),
    /// Unordered unique elements.
    Set(Vec<Value>),
    /// Physical quantity.
    Quantity(Quantity),
    /// Physical unit.
    Unit(Unit),
    /// Something callable.
    Function(Function),
    /// Instance of a nominal class.
    Object(Object),
}

impl Value {
    /// Builds a dict; a repeated key keeps its first position and its last value.
    ///
    /// Keys compare with `==`, except that a `Float(NaN)` key repeats an earlier `Float(NaN)` key. NaN nested inside
    /// a tuple key still never compares equal.
    pub fn dict(pairs: impl IntoIterator<Item = (Value, Value)>) -> Value {
        let mut out: Vec<(Value, Value)> = Vec::new();
        for (k, v) in pairs {
            match out.iter_mut().find(|(existing, _)| existing.same_entry(&k)) {
                Some(slot) => slot.1 = v,
                None => out.push((k, v)),
            }
        }
        Value::Dict(out)
    }

    /// Builds a set, dropping repeated elements. Elements compare the way [`Value::dict`] keys do.
    pub fn set(items: impl IntoIterator<Item = Value>) -> Value {
        let mut out: Vec<Value> = Vec::new();
        for item in items {
            if !out.iter().any(|existing| existing.same_entry(&item)) {
                out.push(item);
            }
        }
        Value::Set(out)
    }

    fn same_entry(&self, other: &Value) -> bool {
        match (self, other) {
            (Value::Float(a), Value::Float(b)) if a.is_nan() && b.is_nan() => true,
            _ => self == other,
        }
    }

    /// Runtime type name, as reported in mismatch errors.
    pub fn type_name(&self) -> &str {
        match self {
            Value::None => "NoneType",
            Value::Bool(_) => "bool",
            Value::Int(_) => "int",
            Value::Float(_) => "float",
            Value::Str(_) => "str",
            Value::List(_) => "list",
            Value::Tuple(_) => "tuple",
            Value::Dict(_) => "dict",
            Value::Set(_) => "set",
            Value::Quantity(_) => "Quantity",
            Value::Unit(_) => "Unit",
            Value::Function(_) => "function",
            Value::Object(o) => o.class().name(),
        }
    }
}

impl From<i64> for Value {
    fn from(v: i64) -> Self {
        Value::Int(v)
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Value::Float(v)
    }
}

impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Value::Bool(v)
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Value::Str(v.to_owned())
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Value::Str(v)
    }
}

impl From<Quantity> for Value {
    fn from(v: Quantity) -> Self {
        Value::Quantity(v)
    }
}

impl From<Unit> for Value {
    fn from(v: Unit) -> Self {
        Value::Unit(v)
    }
}

impl From<Function> for Value {
    fn from(v: Function) -> Self {
        Value::Function(v)
    }
}

impl From<Object> for Value {
    fn from(v: Object) -> Self {
        Value::Object(v)
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fn seq(f: &mut fmt::Formatter<'_>, items: &[Value]) -> fmt::Result {
            for (i, item) in items.iter().enumerate() {
                if i > 0 {
                    f.write_str(", ")?;
                }
                write!(f, "{item}")?;
            }
            Ok(())
        }

        match self {
            Value::None => f.write_str("None"),
            Value::Bool(true) => f.write_str("True"),
            Value::Bool(false) => f.write_str("False"),
            Value::Int(v) => write!(f, "{v}"),
            Value::Float(v) => write!(f, "{v:?}"),
            Value::Str(s) => write!(f, "{s:?}"),
            Value::List(items) => {
                f.write_str("[")?;
                seq(f, items)?;
                f.write_str("]")
            }
            Value::Tuple(items) => {
                f.write_str("(")?;
                seq(f, items)?;
                if items.len() == 1 {
                    f.write_str(",")?;
                }
                f.write_str(")")
            }
            Value::Dict(pairs) => {
                f.write_str("{")?;
                for (i, (k, v)) in pairs.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{k}: {v}")?;
                }
                f.write_str("}")
            }
            Value::Set(items) if items.is_empty() => f.write_str("set()"),
            Value::Set(items) => {
                f.write_str("{")?;
                seq(f, items)?;
                f.write_str("}")
            }
            Value::Quantity(q) => write!(f, "{q}"),
            Value::Unit(u) => write!(f, "{u}"),
            Value::Function(func) => write!(f, "<function {}>", func.name()),
            Value::Object(o) => write!(f, "<{} object>", o.class().name()),
        }
    }
}

/// A callable value, optionally carrying its declared [`Signature`].
///
/// Only functions with a signature can match a `Callable[...]` descriptor.
#[derive(Clone)]
pub struct Function {
    name: String,
    signature: Option<Arc<Signature>>,
    body: Arc<FunctionBody>,
}

impl Function {
    /// A function without a declared signature.
    pub fn new(
        name: impl Into<String>,
        body: impl Fn(&[Value]) -> TypeCheckResult<Value> + Send + Sync + 'static,
    ) -> Self {
        Function {
            name: name.into(),
            signature: None,
            body: Arc::new(body),
        }
    }

    /// Attaches a declared signature.
    pub fn with_signature(mut self, signature: impl Into<Arc<Signature>>) -> Self {
        self.signature = Some(signature.into());
        self
    }

    /// Function name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Declared signature, if any.
    pub fn signature(&self) -> Option<&Signature> {
        self.signature.as_deref()
    }

    /// Invokes the body.
    pub fn call(&self, args: &[Value]) -> TypeCheckResult<Value> {
        (self.body)(args)
    }
}

impl fmt::Debug for Function {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Function")
            .field("name", &self.name)
            .field("signature", &self.signature)
            .finish_non_exhaustive()
    }
}

/// Two function values are equal only when they share one body.
impl PartialEq for Function {
    fn eq(&self, other: &Self) -> bool {
        Arc::as_ptr(&self.body).cast::<()>() == Arc::as_ptr(&other.body).cast::<()>()
    }
}

/// A nominal class with single or multiple inheritance.
#[derive(Debug, PartialEq, Eq, Hash)]
pub struct Class {
    name: String,
    bases: Vec<Arc<Class>>,
}

impl Class {
    /// A class with no bases.
    pub fn new(name: impl Into<String>) -> Arc<Class> {
        Self::with_bases(name, Vec::new())
    }

    /// A class deriving from `bases`.
    pub fn with_bases(name: impl Into<String>, bases: Vec<Arc<Class>>) -> Arc<Class> {
        Arc::new(Class {
            name: name.into(),
            bases,
        })
    }

    /// Class name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Direct bases.
    pub fn bases(&self) -> &[Arc<Class>] {
        &self.bases
    }

    /// True if this class is `name` or inherits from it.
    pub fn is_subclass_of(&self, name: &str) -> bool {
        self.name == name || self.bases.iter().any(|b| b.is_subclass_of(name))
    }
}

/// An instance of a [`Class`] with named fields.
#[derive(Clone, Debug, PartialEq)]
pub struct Object {
    class: Arc<Class>,
    fields: BTreeMap<String, Value>,
}

impl Object {
    /// An instance with no fields.
    pub fn new(class: Arc<Class>) -> Self {
        Object {
            class,
            fields: BTreeMap::new(),
        }
    }

    /// Sets a field, builder-style.
    pub fn with_field(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.fields.insert(name.into(), value.into());
        self
    }

    /// The instance's class.
    pub fn class(&self) -> &Class {
        &self.class
    }

    /// Field value.
    pub fn field(&self, name: &str) -> Option<&Value> {
        self.fields.get(name)
    }

    /// True if the instance's class is `name` or a subclass of it.
    pub fn is_instance_of(&self, name: &str) -> bool {
        self.class.is_subclass_of(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dict_and_set_deduplicate() {
        let d = Value::dict([
            (Value::from("a"), Value::Int(1)),
            (Value::from("b"), Value::Int(2)),
            (Value::from("a"), Value::Int(3)),
        ]);
        assert_eq!(
            d,
            Value::Dict(vec![
                (Value::from("a"), Value::Int(3)),
                (Value::from("b"), Value::Int(2)),
            ])
        );
        let s = Value::set([Value::Int(3), Value::Float(3.5), Value::Int(3)]);
        assert_eq!(s, Value::Set(vec![Value::Int(3), Value::Float(3.5)]));
    }

    #[test]
    fn nan_entries_collapse() {
        let s = Value::set([Value::Float(f64::NAN), Value::Int(1), Value::Float(f64::NAN)]);
        match s {
            Value::Set(items) => assert_eq!(items.len(), 2),
            other => panic!("expected a set, got {other}"),
        }

        let d = Value::dict([
            (Value::Float(f64::NAN), Value::Int(1)),
            (Value::Float(f64::NAN), Value::Int(2)),
        ]);
        match d {
            Value::Dict(pairs) => {
                assert_eq!(pairs.len(), 1);
                assert_eq!(pairs[0].1, Value::Int(2));
            }
            other => panic!("expected a dict, got {other}"),
        }
    }

    #[test]
    fn type_names() {
        assert_eq!(Value::Int(1).type_name(), "int");
        assert_eq!(Value::None.type_name(), "NoneType");
        let a = Object::new(Class::new("A"));
        assert_eq!(Value::from(a).type_name(), "A");
    }

    #[test]
    fn display() {
        let v = Value::Tuple(vec![Value::Int(3), Value::Float(3.5), Value::from("a")]);
        assert_eq!(v.to_string(), "(3, 3.5, \"a\")");
        assert_eq!(Value::Tuple(vec![Value::Int(1)]).to_string(), "(1,)");
        assert_eq!(Value::set([]).to_string(), "set()");
    }

    #[test]
    fn inheritance_is_transitive() {
        let body = Class::new("Body");
        let ball = Class::with_bases("Ball", vec![body.clone()]);
        let tennis = Class::with_bases("TennisBall", vec![ball]);
        let obj = Object::new(tennis).with_field("radius", 0.033);
        assert!(obj.is_instance_of("Body"));
        assert!(obj.is_instance_of("TennisBall"));
        assert!(!obj.is_instance_of("Space"));
        assert_eq!(obj.field("radius"), Some(&Value::Float(0.033)));
        assert!(!Object::new(body).is_instance_of("Ball"));
    }

    #[test]
    fn functions_compare_by_body() {
        let f = Function::new("f", |args| Ok(args[0].clone()));
        let g = f.clone();
        let h = Function::new("f", |args| Ok(args[0].clone()));
        assert_eq!(f, g);
        assert_ne!(f, h);
        assert_eq!(f.call(&[Value::Int(4)]).unwrap(), Value::Int(4));
    }
}
