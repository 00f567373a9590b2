use serde::Serialize;

use crate::domain::network::id::{DemandId, NodeId};
use crate::domain::network::node::Node;

/// Volume that has to travel from `source` to `sink` within one cycle.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct DemandUnit {
    pub id: DemandId,
    pub source: NodeId,
    pub sink: NodeId,
    pub amount: f64,
}

/// Gravity model: every source ships its outbound volume to all sinks in
/// proportion to their share of the total inbound volume.
#[derive(Debug, Clone, Copy)]
pub struct DemandGenerator {
    /// Demands at or below this amount are dropped.
    pub epsilon: f64,
}

impl DemandGenerator {
    pub fn new(epsilon: f64) -> Self {
        DemandGenerator { epsilon }
    }

    /// Derives the OD demand list for `flow_scale`.
    ///
    /// Sources are visited in node order, sinks in node order within each
    /// source; demand ids are assigned in that order. A node never ships to
    /// itself.
    pub fn build_demands(&self, nodes: &[Node], flow_scale: f64) -> Vec<DemandUnit> {
        let sources: Vec<&Node> = nodes.iter().filter(|n| n.outbound > 0.0).collect();
        let sinks: Vec<&Node> = nodes.iter().filter(|n| n.inbound > 0.0).collect();

        let total_inbound: f64 = sinks.iter().map(|n| n.inbound).sum();
        let total_inbound = if total_inbound > 0.0 { total_inbound } else { 1.0 };

        let mut demands: Vec<DemandUnit> = Vec::with_capacity(sources.len() * sinks.len());

        for source in sources.iter() {
            let shipped = source.outbound * flow_scale;

            for sink in sinks.iter() {
                if source.id == sink.id {
                    continue;
                }

                let amount = shipped * (sink.inbound / total_inbound);
                if amount > self.epsilon {
                    demands.push(DemandUnit { id: DemandId::new(demands.len() as i64), source: source.id, sink: sink.id, amount });
                }
            }
        }

        log::debug!("DemandGenerator: {} sources, {} sinks, {} demands at scale {:.2}.", sources.len(), sinks.len(), demands.len(), flow_scale);

        demands
    }
}
