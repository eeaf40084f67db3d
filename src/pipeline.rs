//! End-to-end evaluation pipeline: expression text → DAG → generated C →
//! compiled module → loaded handle → invocation.
//!
//! The pipeline is fully synchronous and stops at the first failing stage.
//! Intermediate files are deleted best-effort on every path: the source
//! file after compilation regardless of outcome, the module file after
//! invocation or on any post-compile failure. Deletion failures are logged,
//! never propagated.

use crate::callbacks::{CallbackRegistry, NativeCallback};
use crate::codegen::{generate, ENTRY_SYMBOL};
use crate::error::Error;
use crate::jit::{compile_module, LoadedModule};
use crate::reader::read_expression;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// Where the pipeline writes its intermediate files. The defaults are fixed
/// names in the working directory; concurrent invocations sharing them will
/// race, so callers requiring concurrency supply distinct paths.
#[derive(Debug, Clone)]
pub struct PipelineConfig {
    pub source_path: PathBuf,
    pub module_path: PathBuf,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        PipelineConfig {
            source_path: PathBuf::from("out.c"),
            module_path: PathBuf::from("out.so"),
        }
    }
}

impl PipelineConfig {
    /// Place both intermediate files inside `dir`.
    pub fn in_dir(dir: &Path) -> Self {
        PipelineConfig {
            source_path: dir.join("out.c"),
            module_path: dir.join("out.so"),
        }
    }
}

/// Evaluate `expression`, applying the callback registered under `callback`
/// to the result inside the compiled module.
pub fn evaluate_expression(
    expression: &str,
    callback: &str,
    registry: &CallbackRegistry,
    config: &PipelineConfig,
) -> Result<f64, Error> {
    let dag = read_expression(expression)?;
    let root = dag.root().ok_or(Error::EmptyExpression)?;
    let func = registry
        .resolve(callback)
        .ok_or_else(|| Error::UnknownCallback {
            name: callback.to_string(),
        })?;

    let source = generate(&dag, root);
    fs::write(&config.source_path, source).map_err(|e| Error::Io {
        path: config.source_path.display().to_string(),
        message: e.to_string(),
    })?;

    // The source file is deleted whether or not the compiler succeeded.
    let compiled = compile_module(&config.source_path, &config.module_path);
    remove_intermediate(&config.source_path);
    if let Err(e) = compiled {
        remove_intermediate(&config.module_path);
        return Err(e.into());
    }

    let outcome = invoke_module(&config.module_path, func);
    remove_intermediate(&config.module_path);
    outcome
}

/// Load the module, resolve the entry function, and run it. The handle is
/// dropped, and the mapping released, before this returns on every path.
fn invoke_module(module_path: &Path, func: NativeCallback) -> Result<f64, Error> {
    let module = LoadedModule::open(module_path)?;
    let entry = module.entry(ENTRY_SYMBOL)?;
    // Safety: the entry symbol was compiled from generated source whose
    // signature is exactly `EntryFn`, and the module stays loaded for the
    // duration of the call.
    let value = unsafe { entry(func) };
    Ok(value)
}

fn remove_intermediate(path: &Path) {
    if let Err(e) = fs::remove_file(path) {
        if e.kind() != io::ErrorKind::NotFound {
            eprintln!("warning: failed to remove {}: {}", path.display(), e);
        }
    }
}
