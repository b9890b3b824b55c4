mod common;

use common::*;
use keiro::document::{parse, serialize};
use keiro::prelude::*;

#[test]
fn round_trip_preserves_every_field() {
    let workflow = linear_workflow();
    let document = serialize(&workflow);
    let reparsed = parse(&document).unwrap();
    assert_eq!(reparsed, workflow);
}

#[test]
fn serialization_is_idempotent() {
    let workflow = branching_workflow();
    let first = serialize(&workflow);
    let second = serialize(&parse(&first).unwrap());
    assert_eq!(first, second);
}

#[test]
fn connection_order_does_not_leak_into_the_document() {
    // Same graph, groups inserted in opposite order.
    let nodes = || {
        vec![
            WorkflowNode::new("1", "T1", "manualTrigger", 1),
            WorkflowNode::new("2", "T2", "scheduleTrigger", 1),
            WorkflowNode::new("3", "Join", "merge", 1),
        ]
    };
    let first = nodes()
        .into_iter()
        .fold(Workflow::builder("order"), |b, n| b.add_node(n))
        .connect("T1", PortKind::Main, 0, "Join", 0)
        .connect("T2", PortKind::Main, 0, "Join", 1)
        .build();
    let second = nodes()
        .into_iter()
        .fold(Workflow::builder("order"), |b, n| b.add_node(n))
        .connect("T2", PortKind::Main, 0, "Join", 1)
        .connect("T1", PortKind::Main, 0, "Join", 0)
        .build();

    assert_eq!(serialize(&first), serialize(&second));
}

#[test]
fn minimal_document_parses_with_defaults() {
    let document = r#"{ "name": "minimal", "nodes": [], "connections": {} }"#;
    let workflow = parse(document).unwrap();

    assert_eq!(workflow.name, "minimal");
    assert!(workflow.nodes.is_empty());
    assert!(workflow.connections.is_empty());
    assert_eq!(workflow.settings.execution_order, ExecutionOrder::V1);
    assert_eq!(workflow.settings.timezone, None);
    assert_eq!(workflow.pin_data, None);
}

#[test]
fn optional_node_fields_default_when_absent() {
    let document = r#"{
        "name": "sparse",
        "nodes": [{
            "id": "1",
            "name": "Start",
            "type": "manualTrigger",
            "typeVersion": 1,
            "position": [0, 0],
            "parameters": {}
        }],
        "connections": {}
    }"#;
    let workflow = parse(document).unwrap();
    let node = workflow.get_node("Start").unwrap();

    assert_eq!(node.credentials_ref, None);
    assert!(!node.disabled);
    assert_eq!(node.on_error, None);
}

#[test]
fn port_kinds_use_camel_case_keys() {
    let workflow = Workflow::builder("kinds")
        .add_node(WorkflowNode::new("1", "Model", "chatModel", 1))
        .add_node(WorkflowNode::new("2", "Agent", "agent", 1))
        .connect("Model", PortKind::Model, 0, "Agent", 0)
        .build();

    let document = serialize(&workflow);
    assert!(document.contains("\"model\""));
    assert_eq!(parse(&document).unwrap(), workflow);
}

#[test]
fn malformed_json_is_a_parse_error() {
    let result = parse("{ not json");
    assert!(matches!(result, Err(ParseError::Json(_))));
}

#[test]
fn missing_required_node_field_is_a_parse_error() {
    // The node lacks its type identifier.
    let document = r#"{
        "name": "broken",
        "nodes": [{
            "id": "1",
            "name": "Start",
            "typeVersion": 1,
            "position": [0, 0],
            "parameters": {}
        }],
        "connections": {}
    }"#;
    assert!(matches!(parse(document), Err(ParseError::Json(_))));
}

#[test]
fn from_file_reports_unreadable_paths() {
    let result = Workflow::from_file("/nonexistent/workflow.json");
    assert!(matches!(result, Err(ParseError::Io { .. })));
}

#[test]
fn disabled_flag_survives_the_round_trip() {
    let workflow = Workflow::builder("disabled")
        .add_node(WorkflowNode::new("1", "Start", "manualTrigger", 1))
        .add_node(WorkflowNode::new("2", "A", "set", 1).disabled())
        .connect_main("Start", "A")
        .build();

    let reparsed = parse(&serialize(&workflow)).unwrap();
    assert!(reparsed.get_node("A").unwrap().disabled);
    assert_eq!(reparsed, workflow);
}
