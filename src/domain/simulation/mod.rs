pub mod config;
pub mod flow_assignment_engine;
pub mod passes;
pub mod snapshot;
pub mod statistics;
