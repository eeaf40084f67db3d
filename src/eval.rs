//! Direct DAG evaluation.
//!
//! Single source of truth for the arithmetic semantics the generated code
//! must match, protected division included. Used as the oracle in tests and
//! as the baseline side of the benchmark.

use crate::dag::{Dag, DagExpr, NodeId};

/// Evaluate one node of the DAG.
///
/// Division by a right operand equal to exactly 0.0 yields 0.0 rather than
/// faulting or producing a non-finite value. A dangling id panics, same
/// contract as the code generator.
pub fn evaluate(dag: &Dag, id: NodeId) -> f64 {
    match dag.node(id).expr {
        DagExpr::Value(value) => value,
        DagExpr::Negate(operand) => -evaluate(dag, operand),
        DagExpr::Add(left, right) => evaluate(dag, left) + evaluate(dag, right),
        DagExpr::Subtract(left, right) => evaluate(dag, left) - evaluate(dag, right),
        DagExpr::Multiply(left, right) => evaluate(dag, left) * evaluate(dag, right),
        DagExpr::Divide(left, right) => {
            let numerator = evaluate(dag, left);
            let denominator = evaluate(dag, right);
            if denominator == 0.0 {
                0.0
            } else {
                numerator / denominator
            }
        }
    }
}

/// Evaluate the whole expression, or `None` for a rootless DAG.
pub fn evaluate_root(dag: &Dag) -> Option<f64> {
    dag.root().map(|root| evaluate(dag, root))
}
