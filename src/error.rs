//! Crate-level error type.
//!
//! Every pipeline stage reports failure to its immediate caller; this enum
//! is what crosses the crate boundary. Its `Display` output is the single
//! diagnostic line the CLI prints.

use crate::jit::JitError;
use crate::reader::ReadError;
use std::fmt;

#[derive(Debug, Clone, PartialEq)]
pub enum Error {
    /// The expression text did not parse.
    Read(ReadError),
    /// The parsed DAG has no root; there is nothing to evaluate.
    EmptyExpression,
    /// No callback is registered under the requested name.
    UnknownCallback { name: String },
    /// Writing an intermediate file failed.
    Io { path: String, message: String },
    /// Compilation or loading failed.
    Jit(JitError),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Read(e) => write!(f, "{}", e),
            Error::EmptyExpression => write!(f, "empty expression: nothing to evaluate"),
            Error::UnknownCallback { name } => write!(f, "unknown callback '{}'", name),
            Error::Io { path, message } => write!(f, "file error for {}: {}", path, message),
            Error::Jit(e) => write!(f, "{}", e),
        }
    }
}

impl std::error::Error for Error {}

impl From<ReadError> for Error {
    fn from(e: ReadError) -> Self {
        Error::Read(e)
    }
}

impl From<JitError> for Error {
    fn from(e: JitError) -> Self {
        Error::Jit(e)
    }
}
