//! Error types for quantity arithmetic and runtime type checking.

use crate::dimension::Dimension;

/// Result type for quantity and unit operations.
pub type UnitResult<T> = Result<T, UnitError>;

/// Result type for descriptor matching and validated calls.
pub type TypeCheckResult<T> = Result<T, TypeCheckError>;

/// Errors raised by the quantity engine.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum UnitError {
    /// Operands (or a quantity and an expected unit) measure different dimensions.
    #[error("dimension mismatch in {op}: {left} vs {right}")]
    DimensionMismatch {
        /// Operation or precondition that failed.
        op: String,
        /// Dimension of the left operand (or of the checked quantity).
        left: Dimension,
        /// Dimension of the right operand (or the expected one).
        right: Dimension,
    },

    /// Scalar/vector (or vector length) disagreement; shapes are rendered as `scalar` or `vector[n]`.
    #[error("shape mismatch in {op}: {left} vs {right}")]
    ShapeMismatch {
        /// Operation or precondition that failed.
        op: String,
        /// Shape of the left operand.
        left: String,
        /// Shape of the right operand (or the expected one).
        right: String,
    },

    /// Operation undefined for these operands, e.g. a power of a vector or exponent overflow.
    #[error("unsupported operation: {0}")]
    UnsupportedOperation(String),

    /// Vector component access past the end.
    #[error("component {index} out of range for vector of length {len}")]
    IndexOutOfRange {
        /// Requested component.
        index: usize,
        /// Vector length.
        len: usize,
    },

    /// Symbol not known to the registry.
    #[error("unknown unit `{0}`")]
    UnknownUnit(String),

    /// Unit expression that does not parse.
    #[error("invalid unit expression: {0}")]
    InvalidExpression(String),

    /// Unreadable or invalid unit configuration.
    #[error("configuration error: {0}")]
    Config(String),
}

/// Errors raised by the descriptor matcher and the validated-call wrapper.
///
/// Call-site variants name the callable and the offending parameter so a failure is readable from the message alone.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum TypeCheckError {
    /// The matcher has no rule for this descriptor (a generic it does not know).
    #[error("descriptor kind not implemented: {0}")]
    UnsupportedDescriptor(String),

    /// Wrapping failed: descriptors given do not equal parameters plus one return.
    #[error("`{callable}` declares {params} parameters plus a return, but {declared} descriptors were given")]
    DescriptorCountMismatch {
        /// Callable being wrapped.
        callable: String,
        /// Descriptors supplied, return included.
        declared: usize,
        /// Parameters of the callable, receiver excluded.
        params: usize,
    },

    /// A parameter (or `return`) has no descriptor.
    #[error("`{callable}` has no descriptor for `{parameter}`")]
    MissingDescriptor {
        /// Callable being wrapped.
        callable: String,
        /// Parameter name, or `return`.
        parameter: String,
    },

    /// An argument does not match its parameter's descriptor.
    #[error("expected {expected} for `{parameter}` (position {position}) of `{callable}`, but got {found}")]
    ArgumentTypeMismatch {
        /// Callable being invoked.
        callable: String,
        /// Parameter name.
        parameter: String,
        /// 0-based index among the declared parameters.
        position: usize,
        /// Descriptor, as written.
        expected: String,
        /// Runtime type name of the argument.
        found: String,
    },

    /// The callable returned a value that does not match the return descriptor.
    #[error("expected {expected} for return type of `{callable}`, but got {found}")]
    ReturnTypeMismatch {
        /// Callable being invoked.
        callable: String,
        /// Return descriptor, as written.
        expected: String,
        /// Runtime type name of the returned value.
        found: String,
    },

    /// A keyword argument names no declared parameter.
    #[error("no type-hinted argument `{parameter}` in `{callable}`")]
    UndeclaredArgument {
        /// Callable being invoked.
        callable: String,
        /// Keyword given.
        parameter: String,
    },

    /// A parameter was bound twice (positionally and by keyword, or declared twice).
    #[error("`{callable}` got multiple values for argument `{parameter}`")]
    DuplicateArgument {
        /// Callable being invoked or wrapped.
        callable: String,
        /// Parameter bound twice.
        parameter: String,
    },

    /// A parameter without a default was not bound.
    #[error("`{callable}` is missing required argument `{parameter}`")]
    MissingArgument {
        /// Callable being invoked.
        callable: String,
        /// Unbound parameter.
        parameter: String,
    },

    /// More positional arguments than parameters.
    #[error("`{callable}` takes {expected} positional arguments but {given} were given")]
    TooManyArguments {
        /// Callable being invoked.
        callable: String,
        /// Declared parameters.
        expected: usize,
        /// Positional arguments given.
        given: usize,
    },

    /// A checked value could not be read as the Rust type a body asked for.
    #[error("cannot convert {found} into {expected}")]
    Conversion {
        /// Target type.
        expected: String,
        /// Value type (and value, for out-of-range numbers).
        found: String,
    },

    /// Lookup of a name missing from a `CallTable`.
    #[error("no callable named `{0}` is registered")]
    UnknownCallable(String),

    /// Descriptor text that does not parse, or a descriptor nested too deeply.
    #[error("invalid type descriptor: {0}")]
    InvalidDescriptor(String),

    /// Failure reported by the wrapped callable itself.
    #[error("`{callable}` failed: {message}")]
    Failed {
        /// Callable that failed.
        callable: String,
        /// Its message.
        message: String,
    },

    /// Quantity error raised inside a call body.
    #[error(transparent)]
    Unit(#[from] UnitError),
}
