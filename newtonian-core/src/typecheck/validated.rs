//! Call wrappers that check arguments and return values against a declared signature.

use super::descriptor::TypeDescriptor;
use super::matcher::matches;
use super::signature::Signature;
use super::value::{Function, FunctionBody, Value};
use crate::error::{TypeCheckError, TypeCheckResult};
use std::fmt;
use std::sync::Arc;

/// Name used for the implicit receiver in errors.
const RECEIVER: &str = "self";

/// Name used for the return descriptor in errors.
const RETURN: &str = "return";

/// A native callable: a name, its parameter names, optional defaults, and a body over bound arguments.
///
/// The body receives arguments in parameter order with every slot filled. For a [method](NativeFn::method) the
/// receiver comes first and is not a declared parameter.
#[derive(Clone)]
pub struct NativeFn {
    name: String,
    params: Vec<String>,
    receiver: bool,
    defaults: Vec<(String, Value)>,
    body: Arc<FunctionBody>,
}

impl NativeFn {
    /// A free function.
    pub fn new<I, S>(
        name: impl Into<String>,
        params: I,
        body: impl Fn(&[Value]) -> TypeCheckResult<Value> + Send + Sync + 'static,
    ) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        NativeFn {
            name: name.into(),
            params: params.into_iter().map(Into::into).collect(),
            receiver: false,
            defaults: Vec::new(),
            body: Arc::new(body),
        }
    }

    /// A method; `params` excludes the receiver.
    pub fn method<I, S>(
        name: impl Into<String>,
        params: I,
        body: impl Fn(&[Value]) -> TypeCheckResult<Value> + Send + Sync + 'static,
    ) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        NativeFn {
            receiver: true,
            ..Self::new(name, params, body)
        }
    }

    /// Default used when `param` is not supplied by the caller.
    pub fn with_default(mut self, param: impl Into<String>, value: impl Into<Value>) -> Self {
        self.defaults.push((param.into(), value.into()));
        self
    }

    /// Callable name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Declared parameter names, receiver excluded.
    pub fn params(&self) -> &[String] {
        &self.params
    }

    /// Check if the callable takes a receiver.
    pub fn is_method(&self) -> bool {
        self.receiver
    }

    fn default_for(&self, param: &str) -> Option<&Value> {
        self.defaults
            .iter()
            .rev()
            .find(|(name, _)| name == param)
            .map(|(_, value)| value)
    }
}

impl fmt::Debug for NativeFn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NativeFn")
            .field("name", &self.name)
            .field("params", &self.params)
            .field("receiver", &self.receiver)
            .field("defaults", &self.defaults)
            .finish_non_exhaustive()
    }
}

/// A [`NativeFn`] bound to its [`Signature`].
///
/// Construction fails unless the signature declares exactly one descriptor per parameter plus a return descriptor.
/// A call checks each supplied argument, binds keywords and defaults, runs the body, then checks the return value.
/// The wrapper is immutable after construction and can be shared across threads.
///
/// ```rust
/// use newtonian_core::typecheck::{NativeFn, Signature, TypeDescriptor as T, ValidatedCall, Value};
/// use newtonian_core::TypeCheckError;
///
/// let f = NativeFn::new("f", ["x", "y"], |args| match args {
///     [Value::Int(x), Value::Float(y)] => Ok(Value::Float(*x as f64 + y)),
///     _ => unreachable!("arguments are checked before the body runs"),
/// });
/// let sig = Signature::new()
///     .param("x", T::int())
///     .param("y", T::float())
///     .returns(T::float());
/// let f = ValidatedCall::wrap(f, sig).unwrap();
///
/// assert_eq!(f.call_positional(&[Value::Int(3), Value::Float(4.5)]).unwrap(), Value::Float(7.5));
/// let err = f.call_positional(&[Value::Int(3), Value::from("a")]).unwrap_err();
/// assert!(matches!(err, TypeCheckError::ArgumentTypeMismatch { ref parameter, .. } if parameter == "y"));
/// ```
#[derive(Clone, Debug)]
pub struct ValidatedCall {
    callee: NativeFn,
    signature: Arc<Signature>,
    descriptors: Vec<TypeDescriptor>,
    ret: TypeDescriptor,
}

impl ValidatedCall {
    /// Binds `callee` to `signature`, failing eagerly on any mismatch between the two.
    pub fn wrap(callee: NativeFn, signature: Signature) -> TypeCheckResult<Self> {
        let callable = callee.name.clone();
        let params = callee.params.len();
        let declared = signature.descriptor_count();
        if declared != params + 1 {
            return Err(TypeCheckError::DescriptorCountMismatch {
                callable,
                declared,
                params,
            });
        }

        let mut descriptors = Vec::with_capacity(params);
        for (i, param) in callee.params.iter().enumerate() {
            if callee.params[..i].contains(param) {
                return Err(TypeCheckError::DuplicateArgument {
                    callable,
                    parameter: param.clone(),
                });
            }
            let descriptor = signature
                .get(param)
                .ok_or_else(|| TypeCheckError::MissingDescriptor {
                    callable: callable.clone(),
                    parameter: param.clone(),
                })?;
            descriptors.push(descriptor.clone());
        }
        let ret = signature
            .ret()
            .cloned()
            .ok_or_else(|| TypeCheckError::MissingDescriptor {
                callable: callable.clone(),
                parameter: RETURN.to_owned(),
            })?;

        for (param, value) in &callee.defaults {
            let position = callee
                .params
                .iter()
                .position(|p| p == param)
                .ok_or_else(|| TypeCheckError::UndeclaredArgument {
                    callable: callable.clone(),
                    parameter: param.clone(),
                })?;
            check_argument(&callable, param, position, &descriptors[position], value)?;
        }

        // Re-declare in parameter order so the exposed signature lines up with positional binding.
        let ordered = callee
            .params
            .iter()
            .zip(&descriptors)
            .fold(Signature::new(), |sig, (p, d)| sig.param(p.clone(), d.clone()))
            .returns(ret.clone());
        log::debug!("validated call `{callable}{ordered}` constructed");

        Ok(ValidatedCall {
            callee,
            signature: Arc::new(ordered),
            descriptors,
            ret,
        })
    }

    /// Callable name.
    pub fn name(&self) -> &str {
        &self.callee.name
    }

    /// Signature in parameter order.
    pub fn signature(&self) -> &Signature {
        &self.signature
    }

    /// Calls with positional arguments only.
    pub fn call_positional(&self, args: &[Value]) -> TypeCheckResult<Value> {
        self.call(args, &[])
    }

    /// Calls with positional and keyword arguments. For a method, `args[0]` is the receiver.
    pub fn call(&self, args: &[Value], kwargs: &[(&str, Value)]) -> TypeCheckResult<Value> {
        let callable = self.name();
        let (receiver, positional) = if self.callee.receiver {
            let (receiver, rest) =
                args.split_first()
                    .ok_or_else(|| TypeCheckError::MissingArgument {
                        callable: callable.to_owned(),
                        parameter: RECEIVER.to_owned(),
                    })?;
            (Some(receiver), rest)
        } else {
            (None, args)
        };

        let params = &self.callee.params;
        if positional.len() > params.len() {
            return Err(TypeCheckError::TooManyArguments {
                callable: callable.to_owned(),
                expected: params.len(),
                given: positional.len(),
            });
        }

        let mut slots: Vec<Option<&Value>> = vec![None; params.len()];
        for (i, value) in positional.iter().enumerate() {
            check_argument(callable, &params[i], i, &self.descriptors[i], value)?;
            slots[i] = Some(value);
        }
        for (keyword, value) in kwargs {
            let i = params.iter().position(|p| p == keyword).ok_or_else(|| {
                TypeCheckError::UndeclaredArgument {
                    callable: callable.to_owned(),
                    parameter: (*keyword).to_owned(),
                }
            })?;
            if slots[i].is_some() {
                return Err(TypeCheckError::DuplicateArgument {
                    callable: callable.to_owned(),
                    parameter: (*keyword).to_owned(),
                });
            }
            check_argument(callable, &params[i], i, &self.descriptors[i], value)?;
            slots[i] = Some(value);
        }

        let mut bound = Vec::with_capacity(params.len() + usize::from(receiver.is_some()));
        bound.extend(receiver.cloned());
        for (param, slot) in params.iter().zip(slots) {
            let value = slot
                .or_else(|| self.callee.default_for(param))
                .ok_or_else(|| TypeCheckError::MissingArgument {
                    callable: callable.to_owned(),
                    parameter: param.clone(),
                })?;
            bound.push(value.clone());
        }

        log::trace!("calling `{callable}` with {} bound arguments", bound.len());
        let out = (self.callee.body)(&bound)?;
        if !matches(&out, &self.ret)? {
            return Err(TypeCheckError::ReturnTypeMismatch {
                callable: callable.to_owned(),
                expected: self.ret.to_string(),
                found: out.type_name().to_owned(),
            });
        }
        Ok(out)
    }

    /// A function value that validates on every call and matches `Callable[...]` descriptors of its signature.
    pub fn into_function(self) -> Function {
        let name = self.callee.name.clone();
        let signature = Arc::clone(&self.signature);
        Function::new(name, move |args| self.call_positional(args)).with_signature(signature)
    }
}

fn check_argument(
    callable: &str,
    parameter: &str,
    position: usize,
    descriptor: &TypeDescriptor,
    value: &Value,
) -> TypeCheckResult<()> {
    if matches(value, descriptor)? {
        Ok(())
    } else {
        Err(TypeCheckError::ArgumentTypeMismatch {
            callable: callable.to_owned(),
            parameter: parameter.to_owned(),
            position,
            expected: descriptor.to_string(),
            found: value.type_name().to_owned(),
        })
    }
}
