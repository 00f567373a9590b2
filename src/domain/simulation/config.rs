use crate::api::simulation_config_dto::SimulationConfigDto;
use crate::domain::capacity::capacity_model::CapacityModel;
use crate::domain::demand::demand_generator::DemandGenerator;
use crate::domain::dynamic_edges::dynamic_edge_generator::DynamicEdgeGenerator;
use crate::domain::routing::routing_graph::EdgePenalties;
use crate::error::{Error, Result};
use crate::loader::parser::parse_json_file;

/// Tuning constants of the flow simulation.
#[derive(Debug, Clone, PartialEq)]
pub struct SimulationConfig {
    pub capacity_factor: f64,
    pub minimum_capacity: f64,
    pub idle_capacity_share: f64,
    pub dynamic_edge_penalty: f64,
    pub predefined_edge_penalty: f64,
    pub near_radius_km: f64,
    pub hub_count: usize,
    pub hub_radius_km: f64,
    pub demand_epsilon: f64,
    pub min_flow_scale: f64,
    pub max_flow_scale: f64,
    pub initial_flow_scale: f64,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        SimulationConfig {
            capacity_factor: 1.35,
            minimum_capacity: 8.0,
            idle_capacity_share: 0.6,
            dynamic_edge_penalty: 1.35,
            predefined_edge_penalty: 1.12,
            near_radius_km: 350.0,
            hub_count: 8,
            hub_radius_km: 600.0,
            demand_epsilon: 1e-3,
            min_flow_scale: 0.3,
            max_flow_scale: 2.5,
            initial_flow_scale: 1.0,
        }
    }
}

impl SimulationConfig {
    pub fn from_file(file_path: &str) -> Result<Self> {
        let dto: SimulationConfigDto = parse_json_file(file_path)?;
        let config = SimulationConfig::try_from(dto)?;

        log::info!("Simulation configuration loaded from '{}'.", file_path);

        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if !(1.2..=1.6).contains(&self.capacity_factor) {
            return Err(Error::InvalidConfiguration(format!("capacity factor {} outside 1.2..=1.6", self.capacity_factor)));
        }

        let positive = [
            ("minimum capacity", self.minimum_capacity),
            ("idle capacity share", self.idle_capacity_share),
            ("dynamic edge penalty", self.dynamic_edge_penalty),
            ("predefined edge penalty", self.predefined_edge_penalty),
            ("near radius", self.near_radius_km),
            ("hub radius", self.hub_radius_km),
            ("minimum flow scale", self.min_flow_scale),
        ];
        for (name, value) in positive {
            if !(value.is_finite() && value > 0.0) {
                return Err(Error::InvalidConfiguration(format!("{} must be positive, got {}", name, value)));
            }
        }

        if !(self.demand_epsilon.is_finite() && self.demand_epsilon >= 0.0) {
            return Err(Error::InvalidConfiguration(format!("demand epsilon must not be negative, got {}", self.demand_epsilon)));
        }

        if !(self.max_flow_scale.is_finite() && self.max_flow_scale >= self.min_flow_scale) {
            return Err(Error::InvalidConfiguration(format!(
                "flow scale range {}..={} is empty",
                self.min_flow_scale, self.max_flow_scale
            )));
        }

        if !self.initial_flow_scale.is_finite() {
            return Err(Error::InvalidConfiguration("initial flow scale must be finite".to_string()));
        }

        Ok(())
    }

    /// Clamps a requested flow scale into the configured range.
    pub fn clamp_flow_scale(&self, value: f64) -> f64 {
        value.clamp(self.min_flow_scale, self.max_flow_scale)
    }

    pub fn capacity_model(&self) -> CapacityModel {
        CapacityModel {
            capacity_factor: self.capacity_factor,
            minimum_capacity: self.minimum_capacity,
            idle_share: self.idle_capacity_share,
        }
    }

    pub fn edge_penalties(&self) -> EdgePenalties {
        EdgePenalties { dynamic: self.dynamic_edge_penalty, alt_predefined: self.predefined_edge_penalty }
    }

    pub fn demand_generator(&self) -> DemandGenerator {
        DemandGenerator::new(self.demand_epsilon)
    }

    pub fn dynamic_edge_generator(&self) -> DynamicEdgeGenerator {
        DynamicEdgeGenerator::new(self.near_radius_km, self.hub_count, self.hub_radius_km)
    }
}

impl TryFrom<SimulationConfigDto> for SimulationConfig {
    type Error = Error;

    fn try_from(dto: SimulationConfigDto) -> Result<Self> {
        let defaults = SimulationConfig::default();

        let config = SimulationConfig {
            capacity_factor: dto.capacity_factor.unwrap_or(defaults.capacity_factor),
            minimum_capacity: dto.minimum_capacity.unwrap_or(defaults.minimum_capacity),
            idle_capacity_share: dto.idle_capacity_share.unwrap_or(defaults.idle_capacity_share),
            dynamic_edge_penalty: dto.dynamic_edge_penalty.unwrap_or(defaults.dynamic_edge_penalty),
            predefined_edge_penalty: dto.predefined_edge_penalty.unwrap_or(defaults.predefined_edge_penalty),
            near_radius_km: dto.near_radius_km.unwrap_or(defaults.near_radius_km),
            hub_count: dto.hub_count.unwrap_or(defaults.hub_count),
            hub_radius_km: dto.hub_radius_km.unwrap_or(defaults.hub_radius_km),
            demand_epsilon: dto.demand_epsilon.unwrap_or(defaults.demand_epsilon),
            min_flow_scale: dto.min_flow_scale.unwrap_or(defaults.min_flow_scale),
            max_flow_scale: dto.max_flow_scale.unwrap_or(defaults.max_flow_scale),
            initial_flow_scale: dto.initial_flow_scale.unwrap_or(defaults.initial_flow_scale),
        };

        config.validate()?;

        Ok(config)
    }
}
