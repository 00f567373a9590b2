use serde::Serialize;
use std::fmt;

use crate::domain::network::edge::EdgeRole;
use crate::domain::simulation::snapshot::NetworkSnapshot;

/// Alternative volume above this counts as "alternatives in use".
const ALTERNATIVE_USE_THRESHOLD: f64 = 1e-4;

/// Aggregate figures for the sidebar / CLI summary.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NetworkStatistics {
    /// Flow summed over original and dynamic edges (units per cycle).
    pub total_flow: f64,
    pub visible_edges: usize,
    pub blocked_edges: usize,
    pub overloaded_main_edges: usize,
    /// Flow carried by reroute-marked edges, predefined alternatives in
    /// alternative mode and visible dynamic edges.
    pub alternative_volume: f64,
    pub alternative_used: bool,
    pub flow_scale_percent: i64,
}

impl From<&NetworkSnapshot> for NetworkStatistics {
    fn from(snapshot: &NetworkSnapshot) -> Self {
        let alt_mode = snapshot.alternative_mode;

        let mut total_flow = 0.0;
        let mut visible_edges = 0;
        let mut blocked_edges = 0;
        let mut overloaded_main_edges = 0;
        let mut alternative_volume = 0.0;

        for edge in snapshot.original_edges() {
            total_flow += edge.flow;

            if edge.blocked {
                blocked_edges += 1;
            }
            if edge.overloaded && edge.role == EdgeRole::Main {
                overloaded_main_edges += 1;
            }

            match edge.role {
                EdgeRole::Main => visible_edges += 1,
                EdgeRole::AltPredefined if alt_mode => {
                    visible_edges += 1;
                    alternative_volume += edge.flow;
                }
                _ => {}
            }

            if edge.rerouted {
                alternative_volume += edge.flow;
            }
        }

        for edge in snapshot.dynamic_edge_snapshots() {
            total_flow += edge.flow;

            if alt_mode && edge.flow > 0.0 {
                visible_edges += 1;
                alternative_volume += edge.flow;
            }
        }

        NetworkStatistics {
            total_flow,
            visible_edges,
            blocked_edges,
            overloaded_main_edges,
            alternative_volume,
            alternative_used: alternative_volume > ALTERNATIVE_USE_THRESHOLD,
            flow_scale_percent: (snapshot.flow_scale * 100.0).round() as i64,
        }
    }
}

impl fmt::Display for NetworkStatistics {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Total volume:      ~{} units / cycle", self.total_flow.round())?;
        writeln!(f, "Active edges:      {} (blocked: {})", self.visible_edges, self.blocked_edges)?;
        writeln!(f, "Overloaded:        {}", self.overloaded_main_edges)?;
        writeln!(
            f,
            "Alternatives used: {} (volume: {})",
            if self.alternative_used { "yes" } else { "no" },
            self.alternative_volume.round()
        )?;
        write!(f, "Flow scale:        {}%", self.flow_scale_percent)
    }
}
