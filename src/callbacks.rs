//! Native callback registry.
//!
//! The generated entry function receives exactly one host callback as an
//! explicit parameter. Host functions are registered under stable names and
//! resolved through this table when the module is invoked; no function
//! address ever appears in generated source, so generated text stays valid
//! across process instances even though addresses do not.

use rustc_hash::FxHashMap;

/// Signature every host callback must have. The pointer crosses the C
/// boundary, so the ABI is fixed to `extern "C"`.
pub type NativeCallback = extern "C" fn(f64) -> f64;

/// Declarative definition of a builtin callback.
///
/// All metadata for a builtin lives here; `CALLBACKS` is the single table
/// the registry and the CLI listing are built from.
pub struct CallbackDef {
    /// Stable name used to resolve the callback at invocation time.
    pub name: &'static str,
    /// The host implementation handed to the generated entry function.
    pub func: NativeCallback,
    /// One-line description for listing output.
    pub doc: &'static str,
}

extern "C" fn identity(x: f64) -> f64 {
    x
}

extern "C" fn sigmoid(x: f64) -> f64 {
    1.0 / (1.0 + (-x).exp())
}

/// Builtin callback table.
pub const CALLBACKS: &[CallbackDef] = &[
    CallbackDef {
        name: "identity",
        func: identity,
        doc: "return the computed value unchanged",
    },
    CallbackDef {
        name: "sigmoid",
        func: sigmoid,
        doc: "logistic function 1/(1+exp(-x)) of the computed value",
    },
];

/// Runtime table mapping stable names to host callbacks.
pub struct CallbackRegistry {
    table: FxHashMap<String, NativeCallback>,
}

impl CallbackRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        CallbackRegistry {
            table: FxHashMap::default(),
        }
    }

    /// Create a registry pre-populated with the builtin table.
    pub fn with_builtins() -> Self {
        let mut registry = CallbackRegistry::new();
        for def in CALLBACKS {
            registry.register(def.name, def.func);
        }
        registry
    }

    /// Register a callback under a stable name. Re-registering a name
    /// replaces the previous entry.
    pub fn register(&mut self, name: impl Into<String>, func: NativeCallback) {
        self.table.insert(name.into(), func);
    }

    /// Resolve a name to its callback, or `None` if nothing is registered
    /// under it.
    pub fn resolve(&self, name: &str) -> Option<NativeCallback> {
        self.table.get(name).copied()
    }

    /// Registered names, sorted for stable listing output.
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.table.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    pub fn len(&self) -> usize {
        self.table.len()
    }

    pub fn is_empty(&self) -> bool {
        self.table.is_empty()
    }
}

impl Default for CallbackRegistry {
    fn default() -> Self {
        Self::new()
    }
}
