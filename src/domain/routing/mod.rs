pub mod path;
pub mod routing_graph;
