//! JIT compilation and dynamic loading.
//!
//! This module turns generated C source into a running function by driving
//! an external toolchain and the platform's dynamic-loading facility:
//!
//! ```text
//! generated .c -> compile_module (cc child process) -> .so
//!              -> LoadedModule::open -> entry symbol -> invocation
//! ```
//!
//! The whole path is synchronous: `compile_module` waits for its single
//! child unconditionally, and loaded code runs on the caller's thread in the
//! caller's address space. Failures here are environment or toolchain
//! problems; nothing is retried.

pub mod compile;
pub mod loader;

pub use compile::{compile_module, COMPILER};
pub use loader::{EntryFn, LoadedModule};

use std::fmt;

/// Compilation or loading error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum JitError {
    /// The compiler child process could not be started or waited on.
    CompilerSpawn { message: String },
    /// The compiler ran and reported failure (non-zero exit or signal).
    CompilerFailed { status: String },
    /// The module could not be mapped into the process.
    LoadFailed { path: String, message: String },
    /// The module loaded but does not export the requested symbol.
    SymbolNotFound { module: String, symbol: String },
}

impl fmt::Display for JitError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            JitError::CompilerSpawn { message } => {
                write!(f, "failed to run {}: {}", COMPILER, message)
            }
            JitError::CompilerFailed { status } => {
                write!(f, "compiler failed: {}", status)
            }
            JitError::LoadFailed { path, message } => {
                write!(f, "failed to load module '{}': {}", path, message)
            }
            JitError::SymbolNotFound { module, symbol } => {
                write!(f, "symbol '{}' not found in module '{}'", symbol, module)
            }
        }
    }
}

impl std::error::Error for JitError {}
