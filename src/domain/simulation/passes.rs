//! The routing passes of one recalculation cycle.
//!
//! The baseline and current-state passes return immutable path sets tagged
//! by demand id. The reroute pass decides which demands may change route by diffing the baseline and
//! current-state results instead of inspecting shared state mid-flight.

use std::collections::{BTreeMap, BTreeSet};

use crate::domain::capacity::capacity_model::{BaselineFlow, CapacityModel, CapacityTable};
use crate::domain::demand::demand_generator::DemandUnit;
use crate::domain::dynamic_edges::dynamic_edge_generator::DynamicEdgeGenerator;
use crate::domain::network::edge::{EdgeKey, EdgeKind, EdgeRole};
use crate::domain::network::id::DemandId;
use crate::domain::network::network_model::NetworkModel;
use crate::domain::routing::path::Path;
use crate::domain::routing::routing_graph::{EdgePenalties, RoutingGraph, RoutingMode};

/// Relative tolerance under which two path costs count as tied.
const COST_TIE_TOLERANCE: f64 = 1e-9;

pub type PathSet = BTreeMap<DemandId, Path>;

/// Reference assignment: main edges only, blocks ignored.
#[derive(Debug, Clone)]
pub struct BaselinePass {
    pub flows: BaselineFlow,
    pub paths: PathSet,
    pub unreachable: usize,
}

/// Assignment over the currently usable main edges.
#[derive(Debug, Clone)]
pub struct CurrentPass {
    pub graph: RoutingGraph,
    pub paths: PathSet,
    /// Original edges that are blocked, or overloaded with role main.
    pub disrupted: BTreeSet<EdgeKey>,
    pub alternative_mode: bool,
    pub unreachable: usize,
}

/// Final assignment of the cycle.
#[derive(Debug, Clone)]
pub struct ReroutePass {
    pub rerouted_edges: BTreeSet<EdgeKey>,
    /// Demands whose baseline path touched a disrupted edge (or had none).
    pub affected: usize,
    pub unreachable: usize,
    pub disrupted: BTreeSet<EdgeKey>,
    pub alternative_mode: bool,
}

pub fn run_baseline_pass(model: &NetworkModel, demands: &[DemandUnit], penalties: &EdgePenalties) -> BaselinePass {
    let graph = RoutingGraph::build(model, RoutingMode::MainOnly, true, penalties);

    let mut flows = BaselineFlow::new();
    let mut paths = PathSet::new();
    let mut unreachable = 0;

    for demand in demands {
        let Some(path) = graph.shortest_path(demand.source, demand.sink) else {
            unreachable += 1;
            continue;
        };

        for segment in path.segments.iter().filter(|s| s.kind == EdgeKind::Original) {
            flows.add(segment.key(), demand.amount);
        }
        paths.insert(demand.id, path);
    }

    BaselinePass { flows, paths, unreachable }
}

pub fn run_current_pass(model: &mut NetworkModel, demands: &[DemandUnit], penalties: &EdgePenalties, capacity: &CapacityTable<'_>) -> CurrentPass {
    model.reset_flows();
    model.clear_overloads();
    model.clear_dynamic_edges();

    let graph = RoutingGraph::build(model, RoutingMode::MainOnly, false, penalties);
    let (paths, unreachable) = assign(model, demands, |demand| graph.shortest_path(demand.source, demand.sink));

    mark_overloads(model, capacity);
    let disrupted = disrupted_edges(model);
    let alternative_mode = !disrupted.is_empty();

    CurrentPass { graph, paths, disrupted, alternative_mode, unreachable }
}

pub fn run_reroute_pass(
    model: &mut NetworkModel,
    demands: &[DemandUnit],
    baseline: &BaselinePass,
    current: &CurrentPass,
    generator: &DynamicEdgeGenerator,
    penalties: &EdgePenalties,
    capacity: &CapacityTable<'_>,
) -> ReroutePass {
    let alternative_graph;
    let graph = if current.alternative_mode {
        let dynamic_edges = generator.build(model.nodes(), model.original_edges());
        model.set_dynamic_edges(dynamic_edges);
        alternative_graph = RoutingGraph::build(model, RoutingMode::WithAlternatives, false, penalties);
        &alternative_graph
    } else {
        &current.graph
    };

    model.reset_flows();
    model.clear_overloads();

    let mut rerouted_edges: BTreeSet<EdgeKey> = BTreeSet::new();
    let mut affected = 0;
    let mut unreachable = 0;

    for demand in demands {
        let baseline_path = baseline.paths.get(&demand.id);
        let is_affected = baseline_path.is_none_or(|p| p.uses_any(&current.disrupted));

        let final_path = if is_affected {
            affected += 1;
            graph.shortest_path(demand.source, demand.sink)
        } else {
            current.paths.get(&demand.id).cloned()
        };

        let Some(path) = final_path else {
            unreachable += 1;
            continue;
        };

        for segment in path.segments.iter() {
            model.add_flow(&segment.key(), demand.amount);
        }

        if let (true, true, Some(baseline_path)) = (current.alternative_mode, is_affected, baseline_path) {
            if path.signature() != baseline_path.signature() && !is_cost_tied_alternate(model, baseline_path, &path) {
                let baseline_keys = baseline_path.original_keys();
                rerouted_edges.extend(path.original_keys().into_iter().filter(|k| !baseline_keys.contains(k)));
            }
        }
    }

    mark_overloads(model, capacity);
    let disrupted = disrupted_edges(model);
    let alternative_mode = !disrupted.is_empty();

    ReroutePass { rerouted_edges, affected, unreachable, disrupted, alternative_mode }
}

/// Routes every demand with `route` and accumulates flow on the chosen paths.
fn assign<F>(model: &mut NetworkModel, demands: &[DemandUnit], route: F) -> (PathSet, usize)
where
    F: Fn(&DemandUnit) -> Option<Path>,
{
    let mut paths = PathSet::new();
    let mut unreachable = 0;

    for demand in demands {
        match route(demand) {
            Some(path) => {
                for segment in path.segments.iter() {
                    model.add_flow(&segment.key(), demand.amount);
                }
                paths.insert(demand.id, path);
            }
            None => unreachable += 1,
        }
    }

    (paths, unreachable)
}

/// Sets `overloaded = flow > capacity` on every original edge.
/// Dynamic edges are never overloaded.
pub fn mark_overloads(model: &mut NetworkModel, capacity: &CapacityTable<'_>) {
    for key in model.original_keys() {
        let overloaded = CapacityModel::is_overloaded(model.flow(&key), capacity.capacity_of(&key));
        if let Some(state) = model.edge_state_mut(&key) {
            state.overloaded = overloaded;
        }
    }

    let dynamic_keys: Vec<EdgeKey> = model.dynamic_edges().iter().map(|e| e.key()).collect();
    for key in dynamic_keys {
        if let Some(state) = model.edge_state_mut(&key) {
            state.overloaded = false;
        }
    }
}

pub fn disrupted_edges(model: &NetworkModel) -> BTreeSet<EdgeKey> {
    model
        .original_edges()
        .iter()
        .filter(|edge| {
            model.edge_state(&edge.key()).is_some_and(|st| st.blocked || (st.overloaded && edge.role == EdgeRole::Main))
        })
        .map(|edge| edge.key())
        .collect()
}

/// A different path at the same cost while the baseline path is still fully
/// usable is a tie-break artefact, not a detour.
fn is_cost_tied_alternate(model: &NetworkModel, baseline_path: &Path, path: &Path) -> bool {
    let baseline_usable = baseline_path.signature().iter().all(|key| !model.is_blocked(key));
    let tolerance = COST_TIE_TOLERANCE * baseline_path.cost.abs().max(1.0);

    baseline_usable && (path.cost - baseline_path.cost).abs() <= tolerance
}
