//! Structural checks over the connection map: duplicates, dangling
//! references, port-kind compatibility, branch arity, self-loops, and the
//! entry point requirement.

use super::{ValidationOptions, ValidationReport};
use crate::error::{Issue, IssueKind};
use crate::registry::NodeTypeRegistry;
use crate::workflow::{ConnectionTarget, PortKind, Workflow, WorkflowNode};
use ahash::AHashMap;

/// Name-keyed view of the node set, de-duplicated by first occurrence so
/// later checks can keep running even when the workflow carries collisions.
pub(crate) struct NodeIndex<'a> {
    pub by_name: AHashMap<&'a str, &'a WorkflowNode>,
}

pub(crate) fn build_index<'a>(
    workflow: &'a Workflow,
    report: &mut ValidationReport,
) -> NodeIndex<'a> {
    let mut by_name: AHashMap<&str, &WorkflowNode> = AHashMap::new();
    let mut by_id: AHashMap<&str, &str> = AHashMap::new();

    for node in &workflow.nodes {
        if by_name.contains_key(node.name.as_str()) {
            report.push(Issue::error(IssueKind::DuplicateNodeName {
                name: node.name.clone(),
            }));
        } else {
            by_name.insert(&node.name, node);
        }

        if let Some(first) = by_id.get(node.id.as_str()) {
            report.push(Issue::error(IssueKind::DuplicateNodeId {
                id: node.id.clone(),
                first: first.to_string(),
                second: node.name.clone(),
            }));
        } else {
            by_id.insert(&node.id, &node.name);
        }
    }

    NodeIndex { by_name }
}

pub(crate) fn check_connections(
    workflow: &Workflow,
    index: &NodeIndex<'_>,
    registry: &NodeTypeRegistry,
    options: &ValidationOptions,
    report: &mut ValidationReport,
) {
    for node in &workflow.nodes {
        if registry.resolve(node).is_none() {
            report.push(Issue::new(
                options.unknown_node_types,
                IssueKind::UnknownNodeType {
                    node: node.name.clone(),
                    type_id: node.type_id.clone(),
                    version: node.type_version,
                },
            ));
        }
    }

    for (source_name, by_kind) in &workflow.connections {
        let source = index.by_name.get(source_name.as_str()).copied();
        if source.is_none() {
            report.push(Issue::error(IssueKind::DanglingReference {
                missing: source_name.clone(),
            }));
        }
        let source_type = source.and_then(|n| registry.resolve(n));

        for (&kind, slots) in by_kind {
            // Arity is only checkable when the source node and its type are
            // both known; the branch count depends on that node's parameters.
            if let (Some(source_node), Some(source_type)) = (source, source_type) {
                let outputs = source_type.output_ports(&source_node.parameters);
                let expected = outputs.iter().filter(|o| o.kind == kind).count();
                if expected == 0 {
                    report.push(Issue::error(IssueKind::TypeMismatch {
                        node: source_name.clone(),
                        kind,
                        message: format!(
                            "node type '{}' declares no {} output",
                            source_node.type_id, kind
                        ),
                    }));
                } else if slots.len() != expected {
                    report.push(Issue::error(IssueKind::ArityMismatch {
                        node: source_name.clone(),
                        kind,
                        expected,
                        actual: slots.len(),
                    }));
                }
            }

            for (slot, targets) in slots.iter().enumerate() {
                for target in targets {
                    check_edge(source_name, kind, slot, target, index, registry, report);
                }
            }
        }
    }
}

fn check_edge(
    source_name: &str,
    kind: PortKind,
    slot: usize,
    target: &ConnectionTarget,
    index: &NodeIndex<'_>,
    registry: &NodeTypeRegistry,
    report: &mut ValidationReport,
) {
    let connection = connection_label(source_name, kind, slot, target);

    if !kind.accepts(target.kind) {
        report.push(
            Issue::error(IssueKind::TypeMismatch {
                node: target.node.clone(),
                kind,
                message: format!("a {} output cannot feed a {} input", kind, target.kind),
            })
            .with_connection(connection.clone()),
        );
    }

    if target.node == source_name && target.kind == kind {
        report.push(
            Issue::error(IssueKind::SelfLoop {
                node: source_name.to_string(),
                kind,
            })
            .with_connection(connection),
        );
        return;
    }

    let Some(target_node) = index.by_name.get(target.node.as_str()).copied() else {
        report.push(
            Issue::error(IssueKind::DanglingReference {
                missing: target.node.clone(),
            })
            .with_connection(connection),
        );
        return;
    };

    if let Some(target_type) = registry.resolve(target_node) {
        let input_slots = target_type
            .input_ports()
            .iter()
            .filter(|p| target.kind.accepts(p.kind))
            .count();
        if input_slots == 0 {
            report.push(
                Issue::error(IssueKind::TypeMismatch {
                    node: target.node.clone(),
                    kind: target.kind,
                    message: format!(
                        "node type '{}' declares no {} input",
                        target_node.type_id, target.kind
                    ),
                })
                .with_connection(connection),
            );
        } else if (target.index as usize) >= input_slots {
            report.push(
                Issue::error(IssueKind::TypeMismatch {
                    node: target.node.clone(),
                    kind: target.kind,
                    message: format!(
                        "node type '{}' has no {} input at index {} ({} declared)",
                        target_node.type_id, target.kind, target.index, input_slots
                    ),
                })
                .with_connection(connection),
            );
        }
        // Several edges landing on the same input slot are legal (merge
        // semantics), so fan-in is never flagged here.
    }
}

/// At least one node must get by without an inbound main-data connection,
/// otherwise nothing can ever start the workflow.
pub(crate) fn check_entry_point(
    workflow: &Workflow,
    registry: &NodeTypeRegistry,
    report: &mut ValidationReport,
) {
    let mut unknown_present = false;
    for node in &workflow.nodes {
        match registry.resolve(node) {
            None => unknown_present = true,
            Some(node_type) => {
                let requires_main = node_type
                    .input_ports()
                    .iter()
                    .any(|p| p.required && p.kind.is_main());
                if node_type.is_trigger() || !requires_main {
                    return;
                }
            }
        }
    }
    // A node of unregistered type may well be a trigger; give it the
    // benefit of the doubt instead of stacking a second finding on top of
    // its UnknownNodeType one.
    if !unknown_present {
        report.push(Issue::error(IssueKind::MissingEntryPoint));
    }
}

fn connection_label(source: &str, kind: PortKind, slot: usize, target: &ConnectionTarget) -> String {
    format!(
        "{}[{}][{}] -> {}[{}][{}]",
        source, kind, slot, target.node, target.kind, target.index
    )
}
