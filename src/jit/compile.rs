//! External compiler driver.
//!
//! Compiles one generated C source file into a position-independent shared
//! object by spawning the system C compiler as a child process. The argument
//! vector is fixed; the driver blocks until the child terminates and maps
//! its exit status to success or failure. Compiler diagnostics pass through
//! on the inherited stderr, nothing is parsed or retried.

use super::JitError;
use std::path::Path;
use std::process::Command;

/// The external compiler executable, resolved through PATH.
pub const COMPILER: &str = "cc";

/// Compile `source` into a dynamically loadable module at `output`.
///
/// Runs `cc -shared -o <output> -fPIC <source>` and waits for it. Success
/// iff the child exited normally with code 0. On any failure the contents
/// of `output` are unspecified and must be treated as invalid.
///
/// A compiler that never terminates blocks this call indefinitely; there is
/// no timeout.
pub fn compile_module(source: &Path, output: &Path) -> Result<(), JitError> {
    let status = Command::new(COMPILER)
        .arg("-shared")
        .arg("-o")
        .arg(output)
        .arg("-fPIC")
        .arg(source)
        .status()
        .map_err(|e| JitError::CompilerSpawn {
            message: e.to_string(),
        })?;

    if status.success() {
        Ok(())
    } else {
        Err(JitError::CompilerFailed {
            status: status.to_string(),
        })
    }
}
