mod common;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use freight_flow::domain::network::edge::{Edge, EdgeKey};
use freight_flow::domain::simulation::flow_assignment_engine::FlowAssignmentEngine;

fn main_keys(engine: &FlowAssignmentEngine) -> Vec<EdgeKey> {
    let mut keys: Vec<EdgeKey> = engine.model().original_edges().iter().filter(|e| e.is_main()).map(Edge::key).collect();
    keys.dedup();
    keys
}

#[test]
fn test_identical_command_sequences_give_identical_snapshots() {
    for seed in 100..108 {
        let mut left = common::engine(common::random_network(seed, 18));
        let mut right = common::engine(common::random_network(seed, 18));
        assert_eq!(left.snapshot(), right.snapshot());

        let keys = main_keys(&left);
        let mut rng = StdRng::seed_from_u64(seed);

        for _ in 0..6 {
            let key = keys[rng.random_range(0..keys.len())];
            assert_eq!(left.toggle_block(key), right.toggle_block(key));

            if rng.random_bool(0.3) {
                let scale = rng.random_range(0.3..2.5);
                left.set_flow_scale(scale);
                right.set_flow_scale(scale);
            }

            assert_eq!(left.snapshot(), right.snapshot(), "seed {}", seed);
            assert_eq!(left.last_report(), right.last_report());
        }
    }
}

#[test]
fn test_recalculate_is_idempotent() {
    for seed in 200..205 {
        let mut engine = common::engine(common::random_network(seed, 16));
        let keys = main_keys(&engine);
        engine.toggle_block(keys[0]);
        engine.toggle_block(keys[keys.len() - 1]);

        let first = engine.snapshot();
        let report = engine.recalculate();

        assert_eq!(engine.snapshot(), first, "seed {}", seed);
        assert_eq!(&report, engine.last_report());
    }
}

#[test]
fn test_no_blocks_means_no_alternatives() {
    for seed in 300..310 {
        let engine = common::engine(common::random_network(seed, 20));

        assert!(!engine.is_alternative_mode_active(), "seed {}", seed);
        assert!(engine.model().dynamic_edges().is_empty());
        assert!(engine.rerouted_edges().is_empty());
        assert!(engine.snapshot().overloaded_edges().is_empty());
        assert_eq!(engine.last_report().final_unreachable, 0);
    }
}

#[test]
fn test_rerouted_edges_only_in_alternative_mode() {
    for seed in 400..410 {
        let mut engine = common::engine(common::random_network(seed, 14));
        let keys = main_keys(&engine);
        engine.toggle_block(keys[keys.len() / 3]);

        if !engine.is_alternative_mode_active() {
            assert!(engine.rerouted_edges().is_empty());
        }
        for key in engine.rerouted_edges() {
            assert!(engine.model().original_edge(key).is_some(), "seed {} key {}", seed, key);
        }
    }
}

#[test]
fn test_demands_never_ship_to_their_source() {
    use freight_flow::domain::demand::demand_generator::DemandGenerator;

    for seed in 500..505 {
        let model = common::random_network(seed, 25);
        let demands = DemandGenerator::new(1e-3).build_demands(model.nodes(), 1.0);

        assert!(!demands.is_empty());
        assert!(demands.iter().all(|d| d.source != d.sink && d.amount > 1e-3));
    }
}
