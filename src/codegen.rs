//! C source generation from an expression DAG.
//!
//! Lowers the DAG into a single translation unit defining one exported entry
//! function. Each node becomes one `double tN = ...;` statement named after
//! its id; the entry function runs the statements in dependency order and
//! returns the host callback applied to the root's slot.
//!
//! Emission is post-order and memoized by node id: when several parents
//! share a subnode, its definition is emitted exactly once, so the C
//! compiler never sees a redefinition.
//!
//! For `"2+3*4"` the generated unit reads:
//!
//! ```c
//! typedef double (*host_callback_t)(double);
//!
//! double evaluate(host_callback_t callback) {
//!     double t0 = 2.0;
//!     double t1 = 3.0;
//!     double t2 = 4.0;
//!     double t3 = t1 * t2;
//!     double t4 = t0 + t3;
//!     return callback(t4);
//! }
//! ```

use crate::dag::{Dag, DagExpr, NodeId};
use rustc_hash::FxHashSet;

/// Name of the entry function exported by every generated module.
pub const ENTRY_SYMBOL: &str = "evaluate";

/// Generate the C translation unit for the expression rooted at `root`.
///
/// The caller guarantees the root exists; a rootless DAG must be rejected
/// before generation is attempted. Dangling operand ids abort, no partial
/// output is produced for a malformed DAG.
pub fn generate(dag: &Dag, root: NodeId) -> String {
    let mut source = String::new();
    source.push_str("typedef double (*host_callback_t)(double);\n");
    source.push('\n');
    source.push_str(&format!(
        "double {}(host_callback_t callback) {{\n",
        ENTRY_SYMBOL
    ));

    let mut emitted = FxHashSet::default();
    emit(dag, root, &mut emitted, &mut source);

    source.push_str(&format!("    return callback(t{});\n", root));
    source.push_str("}\n");
    source
}

fn emit(dag: &Dag, id: NodeId, emitted: &mut FxHashSet<NodeId>, out: &mut String) {
    if !emitted.insert(id) {
        return;
    }
    match dag.node(id).expr {
        DagExpr::Value(value) => {
            out.push_str(&format!("    double t{} = {:?};\n", id, value));
        }
        DagExpr::Negate(operand) => {
            emit(dag, operand, emitted, out);
            out.push_str(&format!("    double t{} = - t{};\n", id, operand));
        }
        DagExpr::Add(left, right) => {
            emit(dag, left, emitted, out);
            emit(dag, right, emitted, out);
            out.push_str(&format!("    double t{} = t{} + t{};\n", id, left, right));
        }
        DagExpr::Subtract(left, right) => {
            emit(dag, left, emitted, out);
            emit(dag, right, emitted, out);
            out.push_str(&format!("    double t{} = t{} - t{};\n", id, left, right));
        }
        DagExpr::Multiply(left, right) => {
            emit(dag, left, emitted, out);
            emit(dag, right, emitted, out);
            out.push_str(&format!("    double t{} = t{} * t{};\n", id, left, right));
        }
        DagExpr::Divide(left, right) => {
            emit(dag, left, emitted, out);
            emit(dag, right, emitted, out);
            // Protected division: a right slot equal to exactly 0.0 yields 0.0.
            out.push_str(&format!(
                "    double t{} = (t{} == 0.0) ? 0.0 : (t{} / t{});\n",
                id, right, left, right
            ));
        }
    }
}
