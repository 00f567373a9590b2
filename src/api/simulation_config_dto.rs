use serde::Deserialize;

/// Optional overrides for the simulation constants.
/// Any field left out falls back to the built-in default.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SimulationConfigDto {
    pub capacity_factor: Option<f64>,
    pub minimum_capacity: Option<f64>,
    pub idle_capacity_share: Option<f64>,
    pub dynamic_edge_penalty: Option<f64>,
    pub predefined_edge_penalty: Option<f64>,
    pub near_radius_km: Option<f64>,
    pub hub_count: Option<usize>,
    pub hub_radius_km: Option<f64>,
    pub demand_epsilon: Option<f64>,
    pub min_flow_scale: Option<f64>,
    pub max_flow_scale: Option<f64>,
    pub initial_flow_scale: Option<f64>,
}
