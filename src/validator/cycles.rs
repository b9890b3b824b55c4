//! Cycle detection over the main-data sub-graph.
//!
//! Only `main` ports participate: auxiliary capability wiring (model, tool,
//! memory, ...) may legally form cycles and is excluded from the traversal.

use super::connections::NodeIndex;
use super::ValidationReport;
use crate::error::{Issue, IssueKind};
use crate::workflow::{PortKind, Workflow};
use ahash::AHashMap;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Color {
    Unvisited,
    InProgress,
    Done,
}

pub(crate) fn check_main_data_cycles(
    workflow: &Workflow,
    index: &NodeIndex<'_>,
    report: &mut ValidationReport,
) {
    // Adjacency restricted to main-data edges between existing nodes.
    // Direct self-edges are skipped: they are already reported as SelfLoop
    // and would otherwise show up again as one-node cycles.
    let mut adjacency: AHashMap<&str, Vec<&str>> = AHashMap::new();
    for (source, by_kind) in &workflow.connections {
        if !index.by_name.contains_key(source.as_str()) {
            continue;
        }
        let Some(slots) = by_kind.get(&PortKind::Main) else {
            continue;
        };
        for target in slots.iter().flatten() {
            if target.kind != PortKind::Main
                || target.node == *source
                || !index.by_name.contains_key(target.node.as_str())
            {
                continue;
            }
            adjacency
                .entry(source.as_str())
                .or_default()
                .push(target.node.as_str());
        }
    }

    let mut colors: AHashMap<&str, Color> = AHashMap::new();
    let mut stack: Vec<&str> = Vec::new();

    // Roots in node order keeps the reported cycle paths deterministic.
    for node in &workflow.nodes {
        if color(&colors, &node.name) == Color::Unvisited {
            visit(&node.name, &adjacency, &mut colors, &mut stack, report);
        }
    }
}

fn color(colors: &AHashMap<&str, Color>, node: &str) -> Color {
    colors.get(node).copied().unwrap_or(Color::Unvisited)
}

fn visit<'a>(
    node: &'a str,
    adjacency: &AHashMap<&'a str, Vec<&'a str>>,
    colors: &mut AHashMap<&'a str, Color>,
    stack: &mut Vec<&'a str>,
    report: &mut ValidationReport,
) {
    colors.insert(node, Color::InProgress);
    stack.push(node);

    if let Some(successors) = adjacency.get(node) {
        for &next in successors {
            match color(colors, next) {
                Color::InProgress => {
                    // Back edge: everything from `next` to the stack top
                    // closes the cycle.
                    let start = stack.iter().position(|&n| n == next).unwrap_or(0);
                    let path = format!("{} -> {}", stack[start..].join(" -> "), next);
                    report.push(Issue::error(IssueKind::MainDataCycle { path }));
                }
                Color::Unvisited => visit(next, adjacency, colors, stack, report),
                Color::Done => {}
            }
        }
    }

    stack.pop();
    colors.insert(node, Color::Done);
}
