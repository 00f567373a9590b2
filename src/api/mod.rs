pub mod network_dto;
pub mod simulation_config_dto;
