mod common;

use common::assert_close;
use freight_flow::domain::network::edge::EdgeKey;
use freight_flow::domain::simulation::statistics::NetworkStatistics;
use freight_flow::report::edge_report::write_edge_report;

#[test]
fn test_statistics_without_disruption() {
    let engine = common::engine(common::triangle_with_predefined_alternative());

    let stats = NetworkStatistics::from(&engine.snapshot());

    assert_close(stats.total_flow, 100.0);
    // The predefined alternative is hidden outside alternative mode.
    assert_eq!(stats.visible_edges, 2);
    assert_eq!(stats.blocked_edges, 0);
    assert_eq!(stats.overloaded_main_edges, 0);
    assert_eq!(stats.alternative_volume, 0.0);
    assert!(!stats.alternative_used);
    assert_eq!(stats.flow_scale_percent, 100);
}

#[test]
fn test_statistics_after_block() {
    let mut engine = common::engine(common::triangle());
    engine.toggle_block(EdgeKey::original(1, 2));

    let stats = NetworkStatistics::from(&engine.snapshot());

    assert_close(stats.total_flow, 160.0);
    assert_eq!(stats.visible_edges, 3);
    assert_eq!(stats.blocked_edges, 1);
    assert_eq!(stats.overloaded_main_edges, 2);
    assert_close(stats.alternative_volume, 160.0);
    assert!(stats.alternative_used);
}

#[test]
fn test_statistics_count_used_dynamic_edges() {
    let mut engine = common::engine(common::spur_with_close_neighbors());
    engine.toggle_block(EdgeKey::original(1, 2));
    engine.set_flow_scale(0.5);

    let stats = NetworkStatistics::from(&engine.snapshot());

    // Main A-B (blocked) and A-C, plus the dynamic B-C link carrying 30.
    assert_eq!(stats.visible_edges, 3);
    assert_close(stats.total_flow, 80.0);
    assert_eq!(stats.flow_scale_percent, 50);
    assert!(stats.alternative_used);

    let summary = stats.to_string();
    assert!(summary.contains("blocked: 1"));
    assert!(summary.contains("50%"));
}

#[test]
fn test_edge_report_has_one_row_per_edge() {
    let mut engine = common::engine(common::spur_with_close_neighbors());
    engine.toggle_block(EdgeKey::original(1, 2));
    let snapshot = engine.snapshot();

    let mut buffer: Vec<u8> = Vec::new();
    write_edge_report(&mut buffer, &snapshot).unwrap();
    let text = String::from_utf8(buffer).unwrap();
    let lines: Vec<&str> = text.lines().collect();

    assert_eq!(lines.len(), snapshot.edges.len() + 1);
    assert_eq!(lines[0], "key;from;to;kind;role;transport_type;length_km;flow;capacity;blocked;overloaded;rerouted;visible");
    assert!(lines[1].starts_with("1-2-orig;1;2;original;main;"));
    assert!(lines.iter().any(|l| l.starts_with("2-3-dyn;2;3;dynamic;dyn;alt_near;")));
}
