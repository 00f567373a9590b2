use serde::Serialize;
use std::collections::BTreeSet;

use crate::domain::network::edge::{Edge, EdgeKey, EdgeKind, EdgeRole};
use crate::domain::network::id::NodeId;

/// Read-only view of one edge after a cycle.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EdgeSnapshot {
    pub key: EdgeKey,
    pub from: NodeId,
    pub to: NodeId,
    pub kind: EdgeKind,
    pub role: EdgeRole,
    pub transport_type: String,
    pub length_km: f64,
    pub flow: f64,
    pub blocked: bool,
    pub overloaded: bool,
    /// Logical capacity; only original edges have one.
    pub capacity: Option<f64>,
    pub rerouted: bool,
    /// Whether a renderer should draw the edge: main edges always,
    /// predefined alternatives in alternative mode, dynamic edges in
    /// alternative mode while they carry flow.
    pub visible: bool,
}

/// Everything rendering and reporting collaborators may read after a cycle.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NetworkSnapshot {
    /// Original edges in load order followed by dynamic edges.
    pub edges: Vec<EdgeSnapshot>,
    pub rerouted_edges: Vec<EdgeKey>,
    pub dynamic_edges: Vec<Edge>,
    pub alternative_mode: bool,
    pub flow_scale: f64,
}

impl NetworkSnapshot {
    /// First snapshot entry for `key`.
    pub fn edge(&self, key: &EdgeKey) -> Option<&EdgeSnapshot> {
        self.edges.iter().find(|e| e.key == *key)
    }

    pub fn flow(&self, key: &EdgeKey) -> f64 {
        self.edge(key).map_or(0.0, |e| e.flow)
    }

    pub fn original_edges(&self) -> impl Iterator<Item = &EdgeSnapshot> {
        self.edges.iter().filter(|e| e.kind == EdgeKind::Original)
    }

    pub fn dynamic_edge_snapshots(&self) -> impl Iterator<Item = &EdgeSnapshot> {
        self.edges.iter().filter(|e| e.kind == EdgeKind::Dynamic)
    }

    pub fn overloaded_edges(&self) -> BTreeSet<EdgeKey> {
        self.original_edges().filter(|e| e.overloaded).map(|e| e.key).collect()
    }
}
