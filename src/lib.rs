use crate::api::network_dto::NetworkDto;
use crate::domain::network::network_model::NetworkModel;
use crate::domain::simulation::config::SimulationConfig;
use crate::domain::simulation::flow_assignment_engine::FlowAssignmentEngine;
use crate::error::Result;
use crate::loader::parser::parse_json_file;

pub mod api;
pub mod domain;
pub mod error;
pub mod loader;
pub mod logger;
pub mod report;

/// Loads `network.json` (and an optional configuration file) and returns an
/// engine that has already run its first cycle.
pub fn generate_flow_simulation(network_path: &str, config_path: Option<&str>) -> Result<FlowAssignmentEngine> {
    let config = match config_path {
        Some(path) => SimulationConfig::from_file(path)?,
        None => SimulationConfig::default(),
    };

    let network_dto: NetworkDto = parse_json_file::<NetworkDto>(network_path)?;
    log::info!("Network file '{}' parsed successfully.", network_path);

    let model = NetworkModel::try_from(network_dto)?;

    let engine = FlowAssignmentEngine::new(model, config)?;
    log::info!("Flow simulation constructed successfully.");

    Ok(engine)
}
