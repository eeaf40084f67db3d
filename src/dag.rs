//! Expression DAG model.
//!
//! Nodes live in an arena owned by the `Dag`; operands refer to other nodes
//! by id. Ids are assigned in creation order and are stable for the DAG's
//! lifetime. Sharing is allowed: one node may be the operand of several
//! parents, and downstream consumers must handle a node being reachable
//! through more than one path.

use std::fmt;

/// Arena index of a DAG node. Unique within one DAG.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId(pub u32);

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// An operation with normalized operand slots. Unary operators carry a
/// single dedicated operand rather than reusing a binary slot.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DagExpr {
    Value(f64),
    Negate(NodeId),
    Add(NodeId, NodeId),
    Subtract(NodeId, NodeId),
    Multiply(NodeId, NodeId),
    Divide(NodeId, NodeId),
}

/// One immutable node of the expression DAG.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DagNode {
    pub id: NodeId,
    pub expr: DagExpr,
}

/// Arena of expression nodes plus an optional root.
///
/// An empty expression has no root; callers must reject a rootless DAG
/// before handing it to the code generator.
#[derive(Debug, Clone, Default)]
pub struct Dag {
    nodes: Vec<DagNode>,
    root: Option<NodeId>,
}

impl Dag {
    pub fn new() -> Self {
        Dag {
            nodes: Vec::new(),
            root: None,
        }
    }

    /// Append a node and return its id. Ids are assigned in creation order.
    pub fn push(&mut self, expr: DagExpr) -> NodeId {
        let id = NodeId(self.nodes.len() as u32);
        self.nodes.push(DagNode { id, expr });
        id
    }

    /// Look up a node. A dangling id is a producer contract breach and
    /// aborts rather than being reported as a recoverable error.
    pub fn node(&self, id: NodeId) -> &DagNode {
        match self.nodes.get(id.0 as usize) {
            Some(node) => node,
            None => panic!(
                "dangling node id {} in DAG of {} nodes",
                id,
                self.nodes.len()
            ),
        }
    }

    pub fn get(&self, id: NodeId) -> Option<&DagNode> {
        self.nodes.get(id.0 as usize)
    }

    pub fn root(&self) -> Option<NodeId> {
        self.root
    }

    /// Mark the node representing the whole expression.
    pub fn set_root(&mut self, root: NodeId) {
        assert!(
            (root.0 as usize) < self.nodes.len(),
            "root id {} out of bounds for DAG of {} nodes",
            root,
            self.nodes.len()
        );
        self.root = Some(root);
    }

    pub fn nodes(&self) -> &[DagNode] {
        &self.nodes
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}
