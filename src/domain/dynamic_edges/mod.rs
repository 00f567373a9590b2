pub mod dynamic_edge_generator;
