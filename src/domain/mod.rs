pub mod capacity;
pub mod demand;
pub mod dynamic_edges;
pub mod network;
pub mod routing;
pub mod simulation;
