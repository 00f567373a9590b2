use std::cmp::Ordering;
use std::collections::{BinaryHeap, HashMap};

use crate::domain::network::edge::{EdgeKind, EdgeRole};
use crate::domain::network::id::NodeId;
use crate::domain::network::network_model::NetworkModel;
use crate::domain::routing::path::{Path, PathSegment};

/// Which edges a routing graph is built from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RoutingMode {
    /// Original edges with role main.
    MainOnly,
    /// Every original edge plus the current dynamic edges.
    WithAlternatives,
}

/// Cost multipliers on top of the physical length. Keeping alternatives more
/// expensive makes a plain least-cost search stay on main routes whenever
/// they are usable.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EdgePenalties {
    pub dynamic: f64,
    pub alt_predefined: f64,
}

impl Default for EdgePenalties {
    fn default() -> Self {
        EdgePenalties { dynamic: 1.35, alt_predefined: 1.12 }
    }
}

impl EdgePenalties {
    pub fn factor(&self, kind: EdgeKind, role: EdgeRole) -> f64 {
        match (kind, role) {
            (EdgeKind::Dynamic, _) => self.dynamic,
            (EdgeKind::Original, EdgeRole::AltPredefined) => self.alt_predefined,
            _ => 1.0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Neighbor {
    pub to: NodeId,
    pub cost: f64,
    pub kind: EdgeKind,
}

/// Weighted undirected adjacency over a selectable edge subset.
#[derive(Debug, Clone, Default)]
pub struct RoutingGraph {
    adjacency: HashMap<NodeId, Vec<Neighbor>>,
    edge_count: usize,
}

impl RoutingGraph {
    /// Builds the adjacency for `mode`. Blocked edges are left out unless
    /// `ignore_blocks` is set. Neighbor lists keep edge load order, which
    /// keeps tie-breaking in `shortest_path` reproducible.
    pub fn build(model: &NetworkModel, mode: RoutingMode, ignore_blocks: bool, penalties: &EdgePenalties) -> Self {
        let mut graph = RoutingGraph::default();

        let edges: Vec<_> = match mode {
            RoutingMode::MainOnly => model.original_edges().iter().filter(|e| e.role == EdgeRole::Main).collect(),
            RoutingMode::WithAlternatives => model.all_edges().collect(),
        };

        for edge in edges {
            if !ignore_blocks && model.is_blocked(&edge.key()) {
                continue;
            }

            let cost = edge.length_km * penalties.factor(edge.kind, edge.role);

            graph.add_arc(edge.from, edge.to, cost, edge.kind);
            graph.add_arc(edge.to, edge.from, cost, edge.kind);
            graph.edge_count += 1;
        }

        log::debug!("RoutingGraph built ({:?}, ignore_blocks={}): {} edges, {} nodes.", mode, ignore_blocks, graph.edge_count, graph.adjacency.len());

        graph
    }

    fn add_arc(&mut self, from: NodeId, to: NodeId, cost: f64, kind: EdgeKind) {
        self.adjacency.entry(from).or_default().push(Neighbor { to, cost, kind });
    }

    pub fn neighbors(&self, node: NodeId) -> &[Neighbor] {
        self.adjacency.get(&node).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Number of undirected edges in the graph.
    pub fn edge_count(&self) -> usize {
        self.edge_count
    }

    /// Dijkstra from `start` to `goal`.
    ///
    /// Equal-cost frontier entries pop in discovery order and a label is only
    /// replaced by a strictly cheaper one, so the first path found at a given
    /// cost wins and repeated calls return the same path. Returns `None` when
    /// `goal` is unreachable; `start == goal` yields an empty path.
    pub fn shortest_path(&self, start: NodeId, goal: NodeId) -> Option<Path> {
        let mut dist: HashMap<NodeId, f64> = HashMap::new();
        let mut prev: HashMap<NodeId, (NodeId, EdgeKind)> = HashMap::new();
        let mut frontier: BinaryHeap<FrontierEntry> = BinaryHeap::new();
        let mut sequence: u64 = 0;

        dist.insert(start, 0.0);
        frontier.push(FrontierEntry { cost: 0.0, sequence, node: start });

        while let Some(FrontierEntry { cost, node, .. }) = frontier.pop() {
            if node == goal {
                break;
            }
            if dist.get(&node).is_some_and(|&best| cost > best) {
                continue;
            }

            for neighbor in self.neighbors(node) {
                let next_cost = cost + neighbor.cost;
                if next_cost < dist.get(&neighbor.to).copied().unwrap_or(f64::INFINITY) {
                    dist.insert(neighbor.to, next_cost);
                    prev.insert(neighbor.to, (node, neighbor.kind));
                    sequence += 1;
                    frontier.push(FrontierEntry { cost: next_cost, sequence, node: neighbor.to });
                }
            }
        }

        let total_cost = *dist.get(&goal)?;

        let mut segments: Vec<PathSegment> = Vec::new();
        let mut current = goal;
        while current != start {
            let Some(&(previous, kind)) = prev.get(&current) else {
                break;
            };
            segments.push(PathSegment { from: previous, to: current, kind });
            current = previous;
        }
        segments.reverse();

        Some(Path { segments, cost: total_cost })
    }
}

/// Min-heap entry: lowest cost first, earliest discovery first among equals.
#[derive(Debug, Clone, Copy)]
struct FrontierEntry {
    cost: f64,
    sequence: u64,
    node: NodeId,
}

impl PartialEq for FrontierEntry {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for FrontierEntry {}

impl PartialOrd for FrontierEntry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for FrontierEntry {
    fn cmp(&self, other: &Self) -> Ordering {
        other.cost.total_cmp(&self.cost).then_with(|| other.sequence.cmp(&self.sequence))
    }
}
