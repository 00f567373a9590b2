#![allow(dead_code)]

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use freight_flow::domain::network::edge::Edge;
use freight_flow::domain::network::network_model::NetworkModel;
use freight_flow::domain::network::node::Node;
use freight_flow::domain::simulation::config::SimulationConfig;
use freight_flow::domain::simulation::flow_assignment_engine::FlowAssignmentEngine;

/// Nodes on the equator, ten degrees (~1100 km) apart, so that neither
/// proximity nor hub links are ever synthesised between them.
pub fn far_node(id: i64, index: usize) -> Node {
    Node::new(id, 0.0, 10.0 * index as f64)
}

/// A (out 100), B (in 60), C (in 40), mutually connected by equal main edges.
pub fn triangle() -> NetworkModel {
    let nodes = vec![
        far_node(1, 0).with_name("A").with_goods(0.0, 100.0),
        far_node(2, 1).with_name("B").with_goods(60.0, 0.0),
        far_node(3, 2).with_name("C").with_goods(40.0, 0.0),
    ];
    let edges = vec![Edge::main(1, 2, 100.0), Edge::main(1, 3, 100.0), Edge::main(2, 3, 100.0)];

    NetworkModel::new(nodes, edges).unwrap()
}

/// Same volumes, but B hangs off A alone on main edges; B-C is a predefined
/// alternative.
pub fn triangle_with_predefined_alternative() -> NetworkModel {
    let nodes = vec![
        far_node(1, 0).with_goods(0.0, 100.0),
        far_node(2, 1).with_goods(60.0, 0.0),
        far_node(3, 2).with_goods(40.0, 0.0),
    ];
    let edges = vec![Edge::main(1, 2, 100.0), Edge::main(1, 3, 100.0), Edge::alt_predefined(2, 3, 100.0)];

    NetworkModel::new(nodes, edges).unwrap()
}

/// B hangs off A alone and there is no predefined alternative; B and C are
/// ~111 km apart, so a proximity link between them can be synthesised.
pub fn spur_with_close_neighbors() -> NetworkModel {
    let nodes = vec![
        Node::new(1, 0.0, 0.0).with_goods(0.0, 100.0),
        Node::new(2, 0.0, 2.0).with_goods(60.0, 0.0),
        Node::new(3, 0.0, 1.0).with_goods(40.0, 0.0),
    ];
    let edges = vec![Edge::main(1, 2, 100.0), Edge::main(1, 3, 100.0)];

    NetworkModel::new(nodes, edges).unwrap()
}

pub fn engine(model: NetworkModel) -> FlowAssignmentEngine {
    FlowAssignmentEngine::new(model, SimulationConfig::default()).unwrap()
}

/// Connected random corridor network in a Germany-sized bounding box.
/// A chain guarantees connectivity, extra edges add parallel routes.
pub fn random_network(seed: u64, node_count: usize) -> NetworkModel {
    let mut rng = StdRng::seed_from_u64(seed);

    let nodes: Vec<Node> = (0..node_count)
        .map(|i| {
            let inbound = if rng.random_bool(0.7) { rng.random_range(5.0..150.0) } else { 0.0 };
            let outbound = if rng.random_bool(0.6) { rng.random_range(5.0..200.0) } else { 0.0 };
            Node::new(i as i64 + 1, rng.random_range(47.0..55.0), rng.random_range(6.0..15.0))
                .with_population(rng.random_range(50_000.0..3_000_000.0))
                .with_goods(inbound, outbound)
        })
        .collect();

    let mut edges: Vec<Edge> = (1..node_count as i64).map(|i| Edge::main(i, i + 1, rng.random_range(50.0..400.0))).collect();

    for _ in 0..node_count {
        let a = rng.random_range(1..=node_count as i64);
        let b = rng.random_range(1..=node_count as i64);
        if a == b {
            continue;
        }
        let length = rng.random_range(50.0..400.0);
        if rng.random_bool(0.2) {
            edges.push(Edge::alt_predefined(a, b, length));
        } else {
            edges.push(Edge::main(a, b, length));
        }
    }

    NetworkModel::new(nodes, edges).unwrap()
}

pub fn assert_close(actual: f64, expected: f64) {
    assert!((actual - expected).abs() < 1e-9, "expected {}, got {}", expected, actual);
}
