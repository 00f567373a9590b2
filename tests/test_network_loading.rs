mod common;

use freight_flow::api::network_dto::NetworkDto;
use freight_flow::domain::network::edge::{EdgeKey, EdgeRole};
use freight_flow::domain::network::id::NodeId;
use freight_flow::domain::network::network_model::NetworkModel;
use freight_flow::error::Error;
use freight_flow::generate_flow_simulation;
use freight_flow::loader::parser::parse_json_str;

fn load(json: &str) -> Result<NetworkModel, Error> {
    let dto: NetworkDto = parse_json_str(json)?;
    NetworkModel::try_from(dto)
}

#[test]
fn test_load_minimal_network() {
    let model = load(
        r#"{
            "nodes": [
                { "id": 1, "name": "Hamburg", "land": "DE", "lat": 53.55, "lon": 9.99, "einwohner": 1850000, "gueter_out": 120 },
                { "id": "2", "name": "Bremen", "lat": 53.08, "lon": 8.80, "gueter_in": 80 }
            ],
            "edges": [
                { "von_id": 1, "zu_id": "2", "typ": "autobahn", "distanz_km": 120 }
            ]
        }"#,
    )
    .unwrap();

    assert_eq!(model.nodes().len(), 2);
    assert_eq!(model.original_edges().len(), 1);

    let hamburg = model.node(NodeId::new(1)).unwrap();
    assert_eq!(hamburg.name, "Hamburg");
    assert_eq!(hamburg.outbound, 120.0);
    assert_eq!(hamburg.inbound, 0.0);

    let edge = &model.original_edges()[0];
    assert_eq!(edge.key(), EdgeKey::original(2, 1));
    assert_eq!(edge.length_km, 120.0);
    assert_eq!(edge.role, EdgeRole::Main);
    assert!(model.edge_state(&edge.key()).is_some());
}

#[test]
fn test_missing_length_defaults_to_one_km() {
    let model = load(
        r#"{
            "nodes": [ { "id": 1, "lat": 50.0, "lon": 8.0 }, { "id": 2, "lat": 51.0, "lon": 8.0 }, { "id": 3, "lat": 52.0, "lon": 8.0 } ],
            "edges": [ { "von_id": 1, "zu_id": 2 }, { "von_id": 2, "zu_id": 3, "distanz_km": 0 } ]
        }"#,
    )
    .unwrap();

    assert!(model.original_edges().iter().all(|e| e.length_km == 1.0));
}

#[test]
fn test_alt_pre_role_is_parsed() {
    let model = load(
        r#"{
            "nodes": [ { "id": 1, "lat": 50.0, "lon": 8.0 }, { "id": 2, "lat": 51.0, "lon": 8.0 } ],
            "edges": [ { "von_id": 1, "zu_id": 2, "distanz_km": 90, "role": "alt_pre" } ]
        }"#,
    )
    .unwrap();

    assert_eq!(model.original_edges()[0].role, EdgeRole::AltPredefined);
}

#[test]
fn test_unknown_endpoint_rejected() {
    let result = load(
        r#"{
            "nodes": [ { "id": 1, "lat": 50.0, "lon": 8.0 } ],
            "edges": [ { "von_id": 1, "zu_id": 7, "distanz_km": 10 } ]
        }"#,
    );

    assert!(matches!(result, Err(Error::UnknownEdgeEndpoint { missing: 7, .. })));
}

#[test]
fn test_duplicate_node_id_rejected() {
    let result = load(
        r#"{
            "nodes": [ { "id": 1, "lat": 50.0, "lon": 8.0 }, { "id": "1", "lat": 51.0, "lon": 8.0 } ],
            "edges": []
        }"#,
    );

    assert!(matches!(result, Err(Error::DuplicateNodeId(1))));
}

#[test]
fn test_non_numeric_id_rejected() {
    let result = load(
        r#"{
            "nodes": [ { "id": "north", "lat": 50.0, "lon": 8.0 } ],
            "edges": []
        }"#,
    );

    assert!(matches!(result, Err(Error::NonNumericId(_))));
}

#[test]
fn test_negative_length_rejected() {
    let result = load(
        r#"{
            "nodes": [ { "id": 1, "lat": 50.0, "lon": 8.0 }, { "id": 2, "lat": 51.0, "lon": 8.0 } ],
            "edges": [ { "von_id": 1, "zu_id": 2, "distanz_km": -5 } ]
        }"#,
    );

    assert!(matches!(result, Err(Error::InvalidEdgeLength { .. })));
}

#[test]
fn test_malformed_json_is_a_load_error() {
    let result = load(r#"{ "nodes": [ { "id": 1, "lon": 8.0 } ], "edges": [] }"#);

    let err = result.unwrap_err();
    assert!(matches!(err, Error::DeserializationError(_)));
    assert!(err.is_load_error());
}

#[test]
fn test_failed_reload_keeps_previous_network() {
    let mut engine = common::engine(common::triangle());
    let before = engine.snapshot();

    let bad: NetworkDto = parse_json_str(
        r#"{
            "nodes": [ { "id": 1, "lat": 50.0, "lon": 8.0 } ],
            "edges": [ { "von_id": 1, "zu_id": 2 } ]
        }"#,
    )
    .unwrap();

    assert!(engine.reload(bad).is_err());
    assert_eq!(engine.model().nodes().len(), 3);
    assert_eq!(engine.snapshot(), before);
}

#[test]
fn test_reload_replaces_network_and_state() {
    let mut engine = common::engine(common::triangle());
    assert!(engine.toggle_block(EdgeKey::original(1, 2)));
    assert!(engine.is_alternative_mode_active());

    let replacement: NetworkDto = parse_json_str(
        r#"{
            "nodes": [
                { "id": 10, "lat": 0.0, "lon": 0.0, "gueter_out": 50 },
                { "id": 11, "lat": 0.0, "lon": 10.0, "gueter_in": 50 }
            ],
            "edges": [ { "von_id": 10, "zu_id": 11, "distanz_km": 300 } ]
        }"#,
    )
    .unwrap();

    engine.reload(replacement).unwrap();

    assert!(!engine.is_alternative_mode_active());
    assert!(engine.rerouted_edges().is_empty());
    assert_eq!(engine.model().nodes().len(), 2);
    common::assert_close(engine.snapshot().flow(&EdgeKey::original(10, 11)), 50.0);
}

#[test]
fn test_sample_network_file() {
    let path = concat!(env!("CARGO_MANIFEST_DIR"), "/data/network.json");

    let engine = generate_flow_simulation(path, None).unwrap();

    assert_eq!(engine.model().nodes().len(), 12);
    assert!(!engine.is_alternative_mode_active());
    assert!(engine.model().dynamic_edges().is_empty());
    assert!(engine.snapshot().overloaded_edges().is_empty());
    assert_eq!(engine.last_report().final_unreachable, 0);
}

#[test]
fn test_missing_file_is_io_error() {
    let result = generate_flow_simulation("does/not/exist.json", None);

    assert!(matches!(result, Err(Error::IoError(_))));
}

#[test]
fn test_sample_configuration_file() {
    let network = concat!(env!("CARGO_MANIFEST_DIR"), "/data/network.json");
    let config = concat!(env!("CARGO_MANIFEST_DIR"), "/data/simulation_config.json");

    let engine = generate_flow_simulation(network, Some(config)).unwrap();

    assert!(engine.config().validate().is_ok());
    assert_eq!(engine.flow_scale(), engine.config().clamp_flow_scale(engine.config().initial_flow_scale));
}
