pub mod edge;
pub mod edge_state;
pub mod geo;
pub mod id;
pub mod network_model;
pub mod node;
