/*!
Errors raised while declaring sum types, constructing variants and calling field methods
*/
use thiserror::Error;

/// A declaration, construction or invocation error
#[derive(Debug, Clone, Eq, PartialEq, Error)]
pub enum Error {
    /// A field's type specification is not an ordered sequence of types
    #[error("{field:?} is a badly declared field of {adt:?}: should use a tuple of types")]
    MalformedField {
        /// The sum type being declared
        adt: String,
        /// The offending field
        field: String,
    },
    /// A field or field method name was declared twice
    #[error("{name:?} is declared more than once in {adt:?}")]
    DuplicateMember {
        /// The sum type being declared
        adt: String,
        /// The repeated name
        name: String,
    },
    /// Wrong number of positional arguments
    #[error("expected {expected} arg(s) for {callee}, got {got}")]
    Arity {
        /// The variant or method being called
        callee: String,
        /// The declared number of arguments
        expected: usize,
        /// The number of arguments received
        got: usize,
    },
    /// A positional argument is not an instance of its expected type
    #[error("expected instance of type {expected} at position {position} of {callee}, got {got}")]
    TypeMismatch {
        /// The variant or method being called
        callee: String,
        /// The position of the offending argument
        position: usize,
        /// The expected type
        expected: String,
        /// The type of the value received
        got: String,
    },
    /// Attempted to instantiate a sum type, a field base, or another non-variant type
    #[error("cannot instantiate {0}: only variant types may be constructed")]
    IllegalInstantiation(String),
    /// A sum type has no field with the given name
    #[error("{adt} has no field {name:?}")]
    UnknownField {
        /// The sum type queried
        adt: String,
        /// The missing field
        name: String,
    },
    /// A sum type declares no field method with the given name
    #[error("{adt} has no field method {name:?}")]
    UnknownMethod {
        /// The sum type queried
        adt: String,
        /// The missing method
        name: String,
    },
    /// Attempted to call a value which is neither a function nor a type
    #[error("{0} is not callable")]
    NotCallable(String),
    /// A user-supplied function or field method failed
    #[error("{0}")]
    Message(String),
}

impl Error {
    /// Create an error carrying a custom message, for use in user-supplied functions
    pub fn msg<S: Into<String>>(message: S) -> Error {
        Error::Message(message.into())
    }
}
