//! Declared parameter and return descriptors of a callable.

use super::descriptor::TypeDescriptor;
use std::fmt;

/// One declared parameter.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Param {
    /// Parameter name.
    pub name: String,
    /// Expected descriptor.
    pub descriptor: TypeDescriptor,
}

/// Per-parameter descriptors plus an optional return descriptor.
///
/// A signature records only what was declared; it is checked against a callable's actual parameter list when the
/// two are combined into a [`ValidatedCall`](super::ValidatedCall).
///
/// ```rust
/// use newtonian_core::typecheck::{Signature, TypeDescriptor as T};
///
/// let sig = Signature::new()
///     .param("x", T::int())
///     .param("y", T::float())
///     .returns(T::float());
/// assert_eq!(sig.descriptor_count(), 3);
/// assert_eq!(sig.to_string(), "(x: int, y: float) -> float");
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Signature {
    params: Vec<Param>,
    ret: Option<TypeDescriptor>,
}

impl Signature {
    /// No parameters, no return descriptor.
    pub fn new() -> Self {
        Self::default()
    }

    /// Declares (or re-declares) a parameter.
    pub fn param(mut self, name: impl Into<String>, descriptor: TypeDescriptor) -> Self {
        let name = name.into();
        match self.params.iter_mut().find(|p| p.name == name) {
            Some(p) => p.descriptor = descriptor,
            None => self.params.push(Param { name, descriptor }),
        }
        self
    }

    /// Declares the return descriptor.
    pub fn returns(mut self, descriptor: TypeDescriptor) -> Self {
        self.ret = Some(descriptor);
        self
    }

    /// Declared parameters, in declaration order.
    pub fn params(&self) -> &[Param] {
        &self.params
    }

    /// Declared return descriptor.
    pub fn ret(&self) -> Option<&TypeDescriptor> {
        self.ret.as_ref()
    }

    /// Descriptor declared for `name`.
    pub fn get(&self, name: &str) -> Option<&TypeDescriptor> {
        self.params
            .iter()
            .find(|p| p.name == name)
            .map(|p| &p.descriptor)
    }

    /// Number of declared descriptors, the return descriptor included.
    pub fn descriptor_count(&self) -> usize {
        self.params.len() + usize::from(self.ret.is_some())
    }

    /// Check if `params` lists exactly `descriptors`, in order, and the return is `ret`.
    pub fn matches_callable(&self, descriptors: &[TypeDescriptor], ret: &TypeDescriptor) -> bool {
        self.params.len() == descriptors.len()
            && self
                .params
                .iter()
                .zip(descriptors)
                .all(|(p, d)| p.descriptor == *d)
            && self.ret.as_ref() == Some(ret)
    }

    /// The `Callable[...]` descriptor this signature satisfies, if a return was declared.
    pub fn to_descriptor(&self) -> Option<TypeDescriptor> {
        let ret = self.ret.clone()?;
        Some(TypeDescriptor::callable(
            self.params
                .iter()
                .map(|p| p.descriptor.clone())
                .collect::<Vec<_>>(),
            ret,
        ))
    }
}

impl fmt::Display for Signature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("(")?;
        for (i, p) in self.params.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{}: {}", p.name, p.descriptor)?;
        }
        f.write_str(")")?;
        if let Some(ret) = &self.ret {
            write!(f, " -> {ret}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::typecheck::TypeDescriptor as T;

    #[test]
    fn redeclaring_replaces() {
        let sig = Signature::new().param("x", T::int()).param("x", T::float());
        assert_eq!(sig.params().len(), 1);
        assert_eq!(sig.get("x"), Some(&T::float()));
        assert_eq!(sig.descriptor_count(), 1);
    }

    #[test]
    fn callable_descriptor_needs_return() {
        let sig = Signature::new().param("x", T::int());
        assert!(sig.to_descriptor().is_none());
        let sig = sig.returns(T::int());
        assert_eq!(sig.to_descriptor(), Some(T::callable([T::int()], T::int())));
        assert!(sig.matches_callable(&[T::int()], &T::int()));
        assert!(!sig.matches_callable(&[T::int()], &T::float()));
    }
}
