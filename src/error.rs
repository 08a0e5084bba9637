use thiserror::Error;

/// Errors produced when configuring an [`Environment`](crate::Environment) from external input.
///
/// Numeric exceptions are never reported through this type; they are accumulated as
/// [`ExceptionFlags`](crate::ExceptionFlags) instead.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    #[error("unknown rounding mode `{0}`")]
    UnknownRoundingMode(String),

    #[error("rounding mode encoding {0:#05b} is reserved")]
    InvalidRoundingMode(u32),

    #[error("unknown exception flag `{0}`")]
    UnknownExceptionFlag(String),
}
