//! Common test utilities for building workflow definitions.
use keiro::prelude::*;
use serde_json::json;

/// Registry with the full built-in catalog.
#[allow(dead_code)]
pub fn registry() -> NodeTypeRegistry {
    NodeTypeRegistry::builder().build()
}

/// Trigger -> binary conditional -> two handlers, fully wired.
///
/// `t1 -> b1`, `b1[0] -> h1`, `b1[1] -> h2`.
#[allow(dead_code)]
pub fn branching_workflow() -> Workflow {
    Workflow::builder("branching")
        .add_node(WorkflowNode::new("1", "t1", "manualTrigger", 1))
        .add_node(WorkflowNode::new("2", "b1", "if", 1).with_position(200.0, 0.0))
        .add_node(WorkflowNode::new("3", "h1", "set", 1).with_position(400.0, -100.0))
        .add_node(WorkflowNode::new("4", "h2", "set", 1).with_position(400.0, 100.0))
        .connect_main("t1", "b1")
        .connect("b1", PortKind::Main, 0, "h1", 0)
        .connect("b1", PortKind::Main, 1, "h2", 0)
        .build()
}

/// Same shape as [`branching_workflow`], but the second branch targets the
/// non-existent node `h3`.
#[allow(dead_code)]
pub fn branching_workflow_with_dangling_target() -> Workflow {
    Workflow::builder("branching-dangling")
        .add_node(WorkflowNode::new("1", "t1", "manualTrigger", 1))
        .add_node(WorkflowNode::new("2", "b1", "if", 1))
        .add_node(WorkflowNode::new("3", "h1", "set", 1))
        .add_node(WorkflowNode::new("4", "h2", "set", 1))
        .connect_main("t1", "b1")
        .connect("b1", PortKind::Main, 0, "h1", 0)
        .connect("b1", PortKind::Main, 1, "h3", 0)
        .build()
}

/// Webhook -> transform -> HTTP request, with expressions, credentials, and
/// non-default settings to exercise every optional document field.
#[allow(dead_code)]
pub fn linear_workflow() -> Workflow {
    Workflow::builder("linear")
        .add_node(WorkflowNode::new("1", "Webhook", "webhook", 1))
        .add_node(
            WorkflowNode::new("2", "Transform", "set", 1)
                .with_position(250.0, 0.0)
                .with_parameters(json!({
                    "fields": [
                        { "name": "customer", "value": "={{ $request.body.customer }}" },
                        { "name": "checked_at", "value": "={{ $now }}" }
                    ]
                }))
                .with_on_error(OnErrorPolicy::ContinueRegularOutput),
        )
        .add_node(
            WorkflowNode::new("3", "Deliver", "httpRequest", 1)
                .with_position(500.0, 0.0)
                .with_parameters(json!({
                    "url": "={{ $node[\"Transform\"].json.customer }}",
                    "method": "POST"
                }))
                .with_credentials_ref("crm-api"),
        )
        .connect_main("Webhook", "Transform")
        .connect_main("Transform", "Deliver")
        .with_settings(WorkflowSettings {
            execution_order: ExecutionOrder::V1,
            timezone: Some("Europe/Berlin".to_string()),
        })
        .with_pin_data(json!({ "Webhook": [{ "body": { "customer": "acme" } }] }))
        .build()
}

/// Agent with model, tool, and memory capability wiring.
#[allow(dead_code)]
pub fn agent_workflow() -> Workflow {
    Workflow::builder("agent")
        .add_node(WorkflowNode::new("1", "Trigger", "manualTrigger", 1))
        .add_node(WorkflowNode::new("2", "Agent", "agent", 1))
        .add_node(WorkflowNode::new("3", "Model", "chatModel", 1))
        .add_node(WorkflowNode::new("4", "Lookup", "httpTool", 1))
        .add_node(WorkflowNode::new("5", "Memory", "bufferMemory", 1))
        .connect_main("Trigger", "Agent")
        .connect("Model", PortKind::Model, 0, "Agent", 0)
        .connect("Lookup", PortKind::Tool, 0, "Agent", 0)
        .connect("Memory", PortKind::Memory, 0, "Agent", 0)
        .build()
}
