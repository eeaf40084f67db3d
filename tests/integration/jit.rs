// Compilation driver and dynamic loader tests.

use crate::common::cc_available;
use jitcalc::jit::{compile_module, JitError, LoadedModule};
use jitcalc::{generate, read_expression, CallbackRegistry, ENTRY_SYMBOL};
use std::path::Path;

macro_rules! require_cc {
    () => {
        if !cc_available() {
            eprintln!("warning: cc not found, skipping jit test");
            return;
        }
    };
}

/// Compile the given expression into a module at `dir/out.so`.
#[cfg(unix)]
fn compile_expression(dir: &Path, expression: &str) -> std::path::PathBuf {
    let dag = read_expression(expression).unwrap();
    let source = generate(&dag, dag.root().unwrap());
    let source_path = dir.join("out.c");
    let module_path = dir.join("out.so");
    std::fs::write(&source_path, source).unwrap();
    compile_module(&source_path, &module_path).unwrap();
    module_path
}

#[test]
#[cfg(unix)]
fn malformed_source_reports_compiler_failure() {
    require_cc!();
    let dir = tempfile::tempdir().unwrap();
    let source_path = dir.path().join("bad.c");
    let module_path = dir.path().join("bad.so");
    std::fs::write(&source_path, "double evaluate( {\n").unwrap();

    let err = compile_module(&source_path, &module_path).unwrap_err();
    assert!(matches!(err, JitError::CompilerFailed { .. }));

    // Whatever the failed compile left behind must not be loadable.
    assert!(LoadedModule::open(&module_path).is_err());
}

#[test]
#[cfg(unix)]
fn missing_source_reports_compiler_failure() {
    require_cc!();
    let dir = tempfile::tempdir().unwrap();
    let err = compile_module(
        &dir.path().join("does-not-exist.c"),
        &dir.path().join("out.so"),
    )
    .unwrap_err();
    assert!(matches!(err, JitError::CompilerFailed { .. }));
}

#[test]
#[cfg(unix)]
fn compiled_module_exports_entry_symbol() {
    require_cc!();
    let dir = tempfile::tempdir().unwrap();
    let module_path = compile_expression(dir.path(), "2+2");

    let module = LoadedModule::open(&module_path).unwrap();
    assert!(!module.symbol_address(ENTRY_SYMBOL).unwrap().is_null());
}

#[test]
#[cfg(unix)]
fn missing_symbol_is_distinguished() {
    require_cc!();
    let dir = tempfile::tempdir().unwrap();
    let module_path = compile_expression(dir.path(), "2+2");

    let module = LoadedModule::open(&module_path).unwrap();
    let err = module.entry("not_the_entry_symbol").unwrap_err();
    assert!(matches!(err, JitError::SymbolNotFound { .. }));
    let err = module.symbol_address("not_the_entry_symbol").unwrap_err();
    assert!(matches!(err, JitError::SymbolNotFound { .. }));
}

#[test]
#[cfg(unix)]
fn module_can_be_reopened_after_drop() {
    require_cc!();
    let dir = tempfile::tempdir().unwrap();
    let module_path = compile_expression(dir.path(), "5*5");
    let registry = CallbackRegistry::with_builtins();
    let func = registry.resolve("identity").unwrap();

    let module = LoadedModule::open(&module_path).unwrap();
    let entry = module.entry(ENTRY_SYMBOL).unwrap();
    let value = unsafe { entry(func) };
    assert_eq!(value, 25.0);
    drop(module); // releases the mapping exactly once

    let module = LoadedModule::open(&module_path).unwrap();
    let entry = module.entry(ENTRY_SYMBOL).unwrap();
    let value = unsafe { entry(func) };
    assert_eq!(value, 25.0);
}

#[test]
fn open_missing_module_fails() {
    let result = LoadedModule::open(Path::new("/nonexistent/module.so"));
    assert!(matches!(result, Err(JitError::LoadFailed { .. })));
}
