//! Type library errors.

use thiserror::Error;

/// Errors produced when constructing or parsing data types.
#[derive(Debug, Error)]
pub enum TypeError {
    /// The type name does not match any known constructor.
    #[error("unknown type name: {0}")]
    UnknownType(String),

    /// The call string is not of the form `NAME(args)`.
    #[error("malformed type call: {0}")]
    MalformedCall(String),

    /// An argument value is not valid for the named constructor.
    #[error("invalid argument for {kind}: {message}")]
    InvalidArgument {
        /// The constructor the argument was passed to.
        kind: &'static str,
        /// Description of the problem.
        message: String,
    },
}
