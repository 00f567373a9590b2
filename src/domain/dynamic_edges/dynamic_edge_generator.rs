use std::collections::HashSet;
use std::sync::Arc;

use crate::domain::network::edge::{DynamicEdgeOrigin, Edge, EdgeKey, EdgeKind};
use crate::domain::network::geo::{DistanceMetric, Haversine};
use crate::domain::network::id::NodeId;
use crate::domain::network::node::Node;

/// Synthesises alternative links while the network is disrupted.
///
/// Two rules are applied over all node pairs:
/// * proximity: any two nodes at most `near_radius_km` apart,
/// * hub: each of the `hub_count` most populated nodes to every node at most
///   `hub_radius_km` away.
///
/// Scaling limit: both rules are O(n^2) in the number of nodes. This is fine
/// for the tens to low hundreds of nodes of a corridor network and runs only
/// in alternative mode, but it is not meant for city-scale graphs.
#[derive(Debug, Clone)]
pub struct DynamicEdgeGenerator {
    pub near_radius_km: f64,
    pub hub_count: usize,
    pub hub_radius_km: f64,
    metric: Arc<dyn DistanceMetric>,
}

impl Default for DynamicEdgeGenerator {
    fn default() -> Self {
        DynamicEdgeGenerator::new(350.0, 8, 600.0)
    }
}

impl DynamicEdgeGenerator {
    pub fn new(near_radius_km: f64, hub_count: usize, hub_radius_km: f64) -> Self {
        DynamicEdgeGenerator { near_radius_km, hub_count, hub_radius_km, metric: Arc::new(Haversine) }
    }

    pub fn with_metric(mut self, metric: Arc<dyn DistanceMetric>) -> Self {
        self.metric = metric;
        self
    }

    /// The `hub_count` most populated nodes; ties keep node order.
    pub fn hubs(&self, nodes: &[Node]) -> HashSet<NodeId> {
        let mut by_population: Vec<&Node> = nodes.iter().collect();
        by_population.sort_by(|a, b| b.population.total_cmp(&a.population));

        by_population.into_iter().take(self.hub_count).map(|n| n.id).collect()
    }

    /// Proximity candidates first, hub candidates second. Pairs already
    /// connected by an original edge are skipped, the remaining ones are
    /// deduplicated by endpoint pair keeping the first candidate.
    pub fn build(&self, nodes: &[Node], original_edges: &[Edge]) -> Vec<Edge> {
        let mut candidates: Vec<Edge> = Vec::new();

        for (i, a) in nodes.iter().enumerate() {
            for b in nodes.iter().skip(i + 1) {
                let km = self.metric.distance_km(a, b);
                if km <= self.near_radius_km {
                    candidates.push(Edge::synthesized(a.id, b.id, km, DynamicEdgeOrigin::Near));
                }
            }
        }

        let hubs = self.hubs(nodes);
        for hub in nodes.iter().filter(|n| hubs.contains(&n.id)) {
            for other in nodes.iter() {
                if hub.id == other.id {
                    continue;
                }
                let km = self.metric.distance_km(hub, other);
                if km <= self.hub_radius_km {
                    candidates.push(Edge::synthesized(hub.id, other.id, km, DynamicEdgeOrigin::Hub));
                }
            }
        }

        let original_pairs: HashSet<EdgeKey> = original_edges.iter().map(|e| e.key().with_kind(EdgeKind::Original)).collect();
        let mut seen: HashSet<EdgeKey> = HashSet::new();

        let total_candidates = candidates.len();
        let dynamic_edges: Vec<Edge> = candidates
            .into_iter()
            .filter(|e| !original_pairs.contains(&e.key().with_kind(EdgeKind::Original)))
            .filter(|e| seen.insert(e.key()))
            .collect();

        log::debug!(
            "DynamicEdgeGenerator: {} candidates over {} nodes ({} hubs), {} dynamic edges kept.",
            total_candidates,
            nodes.len(),
            hubs.len(),
            dynamic_edges.len()
        );

        dynamic_edges
    }
}
