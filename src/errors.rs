// src/errors.rs

//! Defines the primary error type for the sorted set module.

use thiserror::Error;

/// All failure modes a sorted set command can surface to the caller.
///
/// Handlers never retry; every error is returned to the external dispatcher
/// after all acquired key locks have been released. The dispatcher owns the
/// wire encoding of errors, so this enum carries plain messages only.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ZSetError {
    #[error("wrong number of arguments for '{0}' command")]
    WrongArgumentCount(String),

    #[error("syntax error")]
    SyntaxError,

    #[error("value is not a valid float")]
    NotAFloat,

    #[error("value is not an integer or out of range")]
    NotAnInteger,

    #[error("count must be a positive integer")]
    InvalidCount,

    #[error("resulting score is not a number (NaN)")]
    NanScore,

    #[error("value at key '{0}' is not a sorted set")]
    WrongType(String),

    #[error("{0}")]
    IncompatibleOptions(&'static str),

    #[error("indices out of bounds")]
    IndexOutOfBounds,

    #[error("{0}")]
    EmptyInput(&'static str),

    #[error("operation cancelled while waiting for a key lock")]
    Cancelled,

    #[error("{0} not implemented")]
    NotImplemented(&'static str),

    #[error("unknown command '{0}'")]
    UnknownCommand(String),
}
