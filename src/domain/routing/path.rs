use serde::Serialize;
use std::collections::BTreeSet;

use crate::domain::network::edge::{EdgeKey, EdgeKind};
use crate::domain::network::id::NodeId;

/// One directed traversal of an undirected edge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct PathSegment {
    pub from: NodeId,
    pub to: NodeId,
    pub kind: EdgeKind,
}

impl PathSegment {
    pub fn key(&self) -> EdgeKey {
        EdgeKey::new(self.from, self.to, self.kind)
    }
}

/// Least-cost route between two nodes, segments in travel order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Path {
    pub segments: Vec<PathSegment>,
    /// Accumulated penalised cost.
    pub cost: f64,
}

impl Path {
    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    pub fn len(&self) -> usize {
        self.segments.len()
    }

    /// Ordered edge keys; two paths with equal signatures use the same edges
    /// in the same order.
    pub fn signature(&self) -> Vec<EdgeKey> {
        self.segments.iter().map(PathSegment::key).collect()
    }

    pub fn original_keys(&self) -> BTreeSet<EdgeKey> {
        self.segments.iter().filter(|s| s.kind == EdgeKind::Original).map(PathSegment::key).collect()
    }

    pub fn uses_any(&self, keys: &BTreeSet<EdgeKey>) -> bool {
        self.segments.iter().any(|s| keys.contains(&s.key()))
    }

    pub fn nodes(&self) -> Vec<NodeId> {
        let mut nodes: Vec<NodeId> = Vec::with_capacity(self.segments.len() + 1);
        if let Some(first) = self.segments.first() {
            nodes.push(first.from);
        }
        nodes.extend(self.segments.iter().map(|s| s.to));
        nodes
    }
}
