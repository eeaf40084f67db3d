//! # jitcalc - A JIT Arithmetic Expression Evaluator
//!
//! jitcalc evaluates arithmetic expressions by compiling them to native code
//! at runtime: the parsed expression DAG is lowered to a small C program,
//! the system C compiler turns that program into a shared object, and the
//! object is loaded back into the process and invoked.
//!
//! ## Quick Start
//!
//! ```no_run
//! use jitcalc::{evaluate_expression, CallbackRegistry, PipelineConfig};
//!
//! let registry = CallbackRegistry::with_builtins();
//! let config = PipelineConfig::default();
//! let value = evaluate_expression("2+3*4", "identity", &registry, &config).unwrap();
//! assert_eq!(value, 14.0);
//! ```
//!
//! ## Architecture
//!
//! Expressions flow through several stages:
//!
//! 1. **Reader** - Parse expression text into an operation DAG
//! 2. **Code Generator** - Lower the DAG to a C translation unit with one
//!    exported entry function
//! 3. **Compilation Driver** - Run the external C compiler to produce a
//!    loadable module
//! 4. **Dynamic Loader** - Map the module into the process and resolve the
//!    entry symbol
//! 5. **Invocation** - Call the entry function with a host callback resolved
//!    by name from the callback registry
//!
//! The generated code calls back into the host through an explicit callback
//! parameter; callbacks are registered under stable names and resolved at
//! invocation time, so no function address is ever embedded in generated
//! text. Division is protected throughout: a divisor of exactly 0.0 yields
//! 0.0 instead of faulting.

pub mod callbacks;
pub mod codegen;
pub mod dag;
pub mod error;
pub mod eval;
pub mod jit;
pub mod pipeline;
pub mod reader;

pub use callbacks::{CallbackRegistry, NativeCallback, CALLBACKS};
pub use codegen::{generate, ENTRY_SYMBOL};
pub use dag::{Dag, DagExpr, NodeId};
pub use error::Error;
pub use eval::{evaluate, evaluate_root};
pub use jit::{compile_module, JitError, LoadedModule};
pub use pipeline::{evaluate_expression, PipelineConfig};
pub use reader::{read_expression, ReadError};
