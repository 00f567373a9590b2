pub mod demand_generator;
