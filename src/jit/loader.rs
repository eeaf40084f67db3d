//! Dynamic loading of compiled modules.
//!
//! Wraps the platform dynamic-loading facility behind an owning handle. The
//! mapping is released exactly once, when the handle is dropped, on every
//! exit path; symbol lookups borrow the handle, so code cannot use a symbol
//! after the module is unloaded.

use super::JitError;
use crate::callbacks::NativeCallback;
use std::ffi::c_void;
use std::fmt;
use std::path::Path;

/// Signature of the entry function every generated module exports.
pub type EntryFn = unsafe extern "C" fn(NativeCallback) -> f64;

/// Handle to a loaded module. Unloaded → Loaded on `open`, Loaded →
/// Unloaded on drop.
pub struct LoadedModule {
    path: String,
    library: libloading::Library,
}

impl LoadedModule {
    /// Map the compiled module at `path` into the process.
    ///
    /// # Arguments
    /// * `path` - Path to the module file (.so on Linux)
    ///
    /// # Returns
    /// * `Ok(module)` - Loaded module handle
    /// * `Err(JitError::LoadFailed)` - If the file is missing, malformed,
    ///   or has unresolved dependencies; the platform error text is kept
    ///   verbatim
    pub fn open(path: &Path) -> Result<Self, JitError> {
        let display = path.display().to_string();
        if !path.exists() {
            return Err(JitError::LoadFailed {
                path: display,
                message: "file not found".to_string(),
            });
        }

        // Safety: loading a module runs its initialization routines. The
        // modules opened here are the toolchain's output for generated
        // source, which defines no initializers beyond the entry function.
        match unsafe { libloading::Library::new(path) } {
            Ok(library) => Ok(LoadedModule {
                path: display,
                library,
            }),
            Err(e) => Err(JitError::LoadFailed {
                path: display,
                message: e.to_string(),
            }),
        }
    }

    /// Path the module was loaded from.
    pub fn path(&self) -> &str {
        &self.path
    }

    /// Resolve the typed entry function.
    ///
    /// Valid only while the module is loaded; the returned symbol borrows
    /// this handle. An absent symbol is a distinguished error, never a
    /// wrong address.
    pub fn entry(&self, symbol: &str) -> Result<libloading::Symbol<'_, EntryFn>, JitError> {
        // Safety: the caller matches `symbol` with a function compiled from
        // generated source whose signature is exactly `EntryFn`.
        unsafe { self.library.get::<EntryFn>(symbol.as_bytes()) }.map_err(|_| {
            JitError::SymbolNotFound {
                module: self.path.clone(),
                symbol: symbol.to_string(),
            }
        })
    }

    /// Resolve any exported symbol to its raw address.
    pub fn symbol_address(&self, symbol: &str) -> Result<*const c_void, JitError> {
        // Safety: a raw pointer target type makes libloading return the
        // symbol's address without interpreting what it points at.
        unsafe { self.library.get::<*const c_void>(symbol.as_bytes()) }
            .map(|sym| *sym)
            .map_err(|_| JitError::SymbolNotFound {
                module: self.path.clone(),
                symbol: symbol.to_string(),
            })
    }
}

impl fmt::Debug for LoadedModule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LoadedModule")
            .field("path", &self.path)
            .finish()
    }
}
