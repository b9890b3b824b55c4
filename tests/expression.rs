mod common;

use common::*;
use keiro::prelude::*;
use serde_json::json;

fn pipeline(parameters: serde_json::Value) -> Workflow {
    Workflow::builder("expr")
        .add_node(WorkflowNode::new("1", "t1", "manualTrigger", 1))
        .add_node(WorkflowNode::new("2", "A", "set", 1).with_parameters(parameters))
        .connect_main("t1", "A")
        .build()
}

#[test]
fn plain_literal_is_not_an_expression() {
    let workflow = pipeline(json!({ "value": "hello world" }));
    let report = Validator::new(&registry()).validate(&workflow);
    assert!(report.is_empty(), "findings: {:?}", report.issues());
}

#[test]
fn well_formed_interpolation_passes() {
    let workflow = pipeline(json!({ "value": "={{ $json.value }}" }));
    let report = Validator::new(&registry()).validate(&workflow);
    assert!(report.is_empty(), "findings: {:?}", report.issues());
}

#[test]
fn unbalanced_expression_is_exactly_one_finding() {
    let workflow = pipeline(json!({ "value": "=((unbalanced" }));
    let report = Validator::new(&registry()).validate(&workflow);

    assert_eq!(report.len(), 1, "findings: {:?}", report.issues());
    assert_eq!(
        report.issues()[0].kind,
        IssueKind::MalformedExpression {
            node: "A".to_string(),
            path: "value".to_string(),
            value: "=((unbalanced".to_string(),
        }
    );
}

#[test]
fn interpolation_without_prefix_is_malformed() {
    let workflow = pipeline(json!({ "value": "{{ $json.value }}" }));
    let report = Validator::new(&registry()).validate(&workflow);
    assert_eq!(report.len(), 1, "findings: {:?}", report.issues());
    assert!(matches!(
        report.issues()[0].kind,
        IssueKind::MalformedExpression { .. }
    ));
}

#[test]
fn unclosed_interpolation_block_is_malformed() {
    let workflow = pipeline(json!({ "value": "={{ $json.value" }));
    let report = Validator::new(&registry()).validate(&workflow);
    assert_eq!(report.len(), 1, "findings: {:?}", report.issues());
    assert!(matches!(
        report.issues()[0].kind,
        IssueKind::MalformedExpression { .. }
    ));
}

#[test]
fn malformed_expression_reports_its_nested_parameter_path() {
    let workflow = pipeline(json!({
        "options": { "headers": [ { "name": "X-Id", "value": "=((" } ] }
    }));
    let report = Validator::new(&registry()).validate(&workflow);

    assert_eq!(report.len(), 1, "findings: {:?}", report.issues());
    match &report.issues()[0].kind {
        IssueKind::MalformedExpression { path, .. } => {
            assert_eq!(path, "options.headers[0].value");
        }
        other => panic!("expected a malformed expression, got {:?}", other),
    }
}

#[test]
fn upstream_node_reference_passes() {
    let workflow = pipeline(json!({ "value": "={{ $node[\"t1\"].json.value }}" }));
    let report = Validator::new(&registry()).validate(&workflow);
    assert!(report.is_empty(), "findings: {:?}", report.issues());
}

#[test]
fn reference_to_unknown_node_warns() {
    let workflow = pipeline(json!({ "value": "={{ $node[\"Nope\"].json.value }}" }));
    let report = Validator::new(&registry()).validate(&workflow);

    assert_eq!(report.len(), 1, "findings: {:?}", report.issues());
    let issue = &report.issues()[0];
    assert_eq!(issue.severity, Severity::Warning);
    match &issue.kind {
        IssueKind::ExpressionContext { message, .. } => {
            assert!(message.contains("unknown node 'Nope'"));
        }
        other => panic!("expected an expression context finding, got {:?}", other),
    }
    assert!(report.is_valid());
}

#[test]
fn reference_to_sibling_branch_warns() {
    // A and B both hang off the trigger; B's output never reaches A.
    let workflow = Workflow::builder("siblings")
        .add_node(WorkflowNode::new("1", "t1", "manualTrigger", 1))
        .add_node(
            WorkflowNode::new("2", "A", "set", 1)
                .with_parameters(json!({ "value": "={{ $node[\"B\"].json.value }}" })),
        )
        .add_node(WorkflowNode::new("3", "B", "set", 1))
        .connect_main("t1", "A")
        .connect_main("t1", "B")
        .build();

    let report = Validator::new(&registry()).validate(&workflow);
    assert_eq!(report.len(), 1, "findings: {:?}", report.issues());
    let issue = &report.issues()[0];
    assert_eq!(issue.severity, Severity::Warning);
    match &issue.kind {
        IssueKind::ExpressionContext { node, message, .. } => {
            assert_eq!(node, "A");
            assert!(message.contains("not upstream"));
        }
        other => panic!("expected an expression context finding, got {:?}", other),
    }
}

#[test]
fn transitive_upstream_reference_passes() {
    let workflow = Workflow::builder("chain")
        .add_node(WorkflowNode::new("1", "t1", "manualTrigger", 1))
        .add_node(WorkflowNode::new("2", "Mid", "set", 1))
        .add_node(
            WorkflowNode::new("3", "End", "set", 1)
                .with_parameters(json!({ "value": "={{ $node[\"t1\"].json.value }}" })),
        )
        .connect_main("t1", "Mid")
        .connect_main("Mid", "End")
        .build();

    let report = Validator::new(&registry()).validate(&workflow);
    assert!(report.is_empty(), "findings: {:?}", report.issues());
}

#[test]
fn request_accessor_without_webhook_upstream_warns() {
    let workflow = pipeline(json!({ "value": "={{ $request.body.customer }}" }));
    let report = Validator::new(&registry()).validate(&workflow);

    assert_eq!(report.len(), 1, "findings: {:?}", report.issues());
    let issue = &report.issues()[0];
    assert_eq!(issue.severity, Severity::Warning);
    match &issue.kind {
        IssueKind::ExpressionContext { message, .. } => {
            assert!(message.contains("$request"));
        }
        other => panic!("expected an expression context finding, got {:?}", other),
    }
}

#[test]
fn request_accessor_behind_a_webhook_passes() {
    let workflow = Workflow::builder("webhook-chain")
        .add_node(WorkflowNode::new("1", "Hook", "webhook", 1))
        .add_node(
            WorkflowNode::new("2", "A", "set", 1)
                .with_parameters(json!({ "value": "={{ $request.body.customer }}" })),
        )
        .connect_main("Hook", "A")
        .build();

    let report = Validator::new(&registry()).validate(&workflow);
    assert!(report.is_empty(), "findings: {:?}", report.issues());
}

#[test]
fn unregistered_upstream_type_gets_the_benefit_of_the_doubt() {
    // The custom type might provide the request payload; only its unknown
    // type warning is reported.
    let workflow = Workflow::builder("custom-hook")
        .add_node(WorkflowNode::new("1", "Hook", "acmeWebhook", 1))
        .add_node(
            WorkflowNode::new("2", "A", "set", 1)
                .with_parameters(json!({ "value": "={{ $request.body }}" })),
        )
        .connect_main("Hook", "A")
        .build();

    let report = Validator::new(&registry()).validate(&workflow);
    assert_eq!(report.len(), 1, "findings: {:?}", report.issues());
    assert!(matches!(
        report.issues()[0].kind,
        IssueKind::UnknownNodeType { .. }
    ));
}

#[test]
fn expression_checker_runs_standalone() {
    let workflow = pipeline(json!({ "value": "=((" }));
    let reg = registry();
    let report = ExpressionChecker::new(&workflow, &reg).check();
    assert_eq!(report.len(), 1);
}

#[test]
fn linear_workflow_with_expressions_is_clean() {
    let report = Validator::new(&registry()).validate(&linear_workflow());
    assert!(report.is_empty(), "findings: {:?}", report.issues());
}
