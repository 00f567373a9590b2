use serde::Serialize;
use std::collections::BTreeSet;
use std::sync::Arc;

use crate::api::network_dto::NetworkDto;
use crate::domain::capacity::capacity_model::{BaselineFlow, CapacityModel};
use crate::domain::demand::demand_generator::{DemandGenerator, DemandUnit};
use crate::domain::dynamic_edges::dynamic_edge_generator::DynamicEdgeGenerator;
use crate::domain::network::edge::{EdgeKey, EdgeKind, EdgeRole};
use crate::domain::network::geo::DistanceMetric;
use crate::domain::network::network_model::NetworkModel;
use crate::domain::routing::routing_graph::EdgePenalties;
use crate::domain::simulation::config::SimulationConfig;
use crate::domain::simulation::passes::{run_baseline_pass, run_current_pass, run_reroute_pass};
use crate::domain::simulation::snapshot::{EdgeSnapshot, NetworkSnapshot};
use crate::error::Result;

/// Summary of one recalculation cycle.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct CycleReport {
    pub demands: usize,
    pub baseline_unreachable: usize,
    pub current_unreachable: usize,
    pub final_unreachable: usize,
    /// Demands that were allowed to change route in the reroute pass.
    pub affected_demands: usize,
    pub disrupted_edges: usize,
    pub dynamic_edges: usize,
    pub rerouted_edges: usize,
    pub alternative_mode: bool,
}

/// Owns one simulated network and keeps its edge flows current.
///
/// Every command that changes the network (`toggle_block`, `set_flow_scale`,
/// `reset`, `reload`) runs exactly one `recalculate()` before returning. A
/// cycle runs its phases in a fixed order:
///
/// 1. derive demands from node volumes and the flow scale,
/// 2. baseline pass: main edges, blocks ignored; sizes capacities,
/// 3. current-state pass: main edges that are not blocked; marks overloads
///    and decides whether alternative mode is active,
/// 4. reroute pass: demands whose baseline path touched a disrupted edge are
///    routed again over main, predefined and dynamic edges; everyone else
///    keeps the current-state path.
///
/// All commands take `&mut self`, so cycles cannot interleave. Share an
/// engine across threads behind a `Mutex`.
#[derive(Debug)]
pub struct FlowAssignmentEngine {
    model: NetworkModel,
    config: SimulationConfig,
    demand_generator: DemandGenerator,
    capacity_model: CapacityModel,
    dynamic_edge_generator: DynamicEdgeGenerator,
    penalties: EdgePenalties,
    flow_scale: f64,
    baseline: BaselineFlow,
    rerouted_edges: BTreeSet<EdgeKey>,
    alternative_mode: bool,
    last_report: CycleReport,
}

impl FlowAssignmentEngine {
    /// Creates the engine and runs the first cycle.
    pub fn new(model: NetworkModel, config: SimulationConfig) -> Result<Self> {
        config.validate()?;

        let mut engine = FlowAssignmentEngine {
            demand_generator: config.demand_generator(),
            capacity_model: config.capacity_model(),
            dynamic_edge_generator: config.dynamic_edge_generator(),
            penalties: config.edge_penalties(),
            flow_scale: config.clamp_flow_scale(config.initial_flow_scale),
            model,
            config,
            baseline: BaselineFlow::new(),
            rerouted_edges: BTreeSet::new(),
            alternative_mode: false,
            last_report: CycleReport::default(),
        };

        engine.recalculate();

        Ok(engine)
    }

    /// Swaps the distance service used for dynamic edges and recalculates.
    pub fn with_distance_metric(mut self, metric: Arc<dyn DistanceMetric>) -> Self {
        self.dynamic_edge_generator = self.dynamic_edge_generator.with_metric(metric);
        self.recalculate();
        self
    }

    pub fn recalculate(&mut self) -> CycleReport {
        let demands: Vec<DemandUnit> = self.demand_generator.build_demands(self.model.nodes(), self.flow_scale);

        let baseline = run_baseline_pass(&self.model, &demands, &self.penalties);
        let capacity = self.capacity_model.evaluate(&baseline.flows);

        let current = run_current_pass(&mut self.model, &demands, &self.penalties, &capacity);

        if current.alternative_mode {
            log::debug!("{} disrupted edges, activating alternative routing.", current.disrupted.len());
        }

        let reroute = run_reroute_pass(
            &mut self.model,
            &demands,
            &baseline,
            &current,
            &self.dynamic_edge_generator,
            &self.penalties,
            &capacity,
        );

        let report = CycleReport {
            demands: demands.len(),
            baseline_unreachable: baseline.unreachable,
            current_unreachable: current.unreachable,
            final_unreachable: reroute.unreachable,
            affected_demands: reroute.affected,
            disrupted_edges: reroute.disrupted.len(),
            dynamic_edges: self.model.dynamic_edges().len(),
            rerouted_edges: reroute.rerouted_edges.len(),
            alternative_mode: reroute.alternative_mode,
        };

        self.baseline = baseline.flows;
        self.rerouted_edges = reroute.rerouted_edges;
        self.alternative_mode = reroute.alternative_mode;
        self.last_report = report.clone();

        tracing::info!(
            demands = report.demands,
            unreachable = report.final_unreachable,
            affected = report.affected_demands,
            disrupted = report.disrupted_edges,
            dynamic_edges = report.dynamic_edges,
            alternative_mode = report.alternative_mode,
            "Flow assignment cycle finished"
        );

        report
    }

    /// Flips the blocked flag of an original main edge and recalculates.
    ///
    /// Any other key is an invalid command: it is logged and ignored, and
    /// `false` is returned without a recalculation.
    pub fn toggle_block(&mut self, key: EdgeKey) -> bool {
        let is_main = key.kind == EdgeKind::Original
            && self.model.original_edges().iter().any(|e| e.key() == key && e.role == EdgeRole::Main);

        if !is_main {
            log::debug!("Ignoring block toggle for {}: only original main edges can be blocked.", key);
            return false;
        }

        let Some(state) = self.model.edge_state_mut(&key) else {
            log::debug!("Ignoring block toggle for {}: no edge state.", key);
            return false;
        };
        state.blocked = !state.blocked;
        log::info!("Edge {} is now {}.", key, if state.blocked { "blocked" } else { "open" });

        self.recalculate();
        true
    }

    /// Sets the flow multiplier, clamped to the configured range, and
    /// recalculates. Non-finite values are ignored. Returns the scale in use.
    pub fn set_flow_scale(&mut self, value: f64) -> f64 {
        if !value.is_finite() {
            log::debug!("Ignoring non-finite flow scale {}.", value);
            return self.flow_scale;
        }

        self.flow_scale = self.config.clamp_flow_scale(value);
        self.recalculate();
        self.flow_scale
    }

    /// Clears all blocks, flows and overloads, drops dynamic edges and
    /// recalculates from a clean state.
    pub fn reset(&mut self) {
        self.model.reset();
        self.rerouted_edges.clear();
        self.alternative_mode = false;
        self.recalculate();
    }

    /// Replaces the network. On a load error the current network stays active.
    pub fn reload(&mut self, definition: NetworkDto) -> Result<()> {
        let model = NetworkModel::try_from(definition)?;
        self.reload_model(model);
        Ok(())
    }

    pub fn reload_model(&mut self, model: NetworkModel) {
        self.model = model;
        self.baseline = BaselineFlow::new();
        self.rerouted_edges.clear();
        self.alternative_mode = false;
        self.recalculate();
    }

    pub fn model(&self) -> &NetworkModel {
        &self.model
    }

    pub fn config(&self) -> &SimulationConfig {
        &self.config
    }

    pub fn flow_scale(&self) -> f64 {
        self.flow_scale
    }

    pub fn baseline(&self) -> &BaselineFlow {
        &self.baseline
    }

    /// Capacity of an original edge against the last cycle's baseline.
    pub fn capacity_of(&self, key: &EdgeKey) -> f64 {
        self.capacity_model.capacity_of(key, &self.baseline)
    }

    pub fn is_alternative_mode_active(&self) -> bool {
        self.alternative_mode
    }

    pub fn rerouted_edges(&self) -> &BTreeSet<EdgeKey> {
        &self.rerouted_edges
    }

    pub fn last_report(&self) -> &CycleReport {
        &self.last_report
    }

    pub fn snapshot(&self) -> NetworkSnapshot {
        let capacity = self.capacity_model.evaluate(&self.baseline);

        let edges: Vec<EdgeSnapshot> = self
            .model
            .all_edges()
            .map(|edge| {
                let key = edge.key();
                let state = self.model.edge_state(&key).copied().unwrap_or_default();

                let visible = match edge.role {
                    EdgeRole::Main => true,
                    EdgeRole::AltPredefined => self.alternative_mode,
                    EdgeRole::Dynamic => self.alternative_mode && state.flow > 0.0,
                };

                EdgeSnapshot {
                    key,
                    from: edge.from,
                    to: edge.to,
                    kind: edge.kind,
                    role: edge.role,
                    transport_type: edge.transport_type.clone(),
                    length_km: edge.length_km,
                    flow: state.flow,
                    blocked: state.blocked,
                    overloaded: state.overloaded,
                    capacity: (edge.kind == EdgeKind::Original).then(|| capacity.capacity_of(&key)),
                    rerouted: self.rerouted_edges.contains(&key),
                    visible,
                }
            })
            .collect();

        NetworkSnapshot {
            edges,
            rerouted_edges: self.rerouted_edges.iter().copied().collect(),
            dynamic_edges: self.model.dynamic_edges().to_vec(),
            alternative_mode: self.alternative_mode,
            flow_scale: self.flow_scale,
        }
    }
}
