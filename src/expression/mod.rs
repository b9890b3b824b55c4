//! Lexical checking of embedded expressions in node parameter trees.
//!
//! A string leaf whose value starts with `=` is an expression; inside it,
//! `{{ ... }}` blocks interpolate runtime data accessors (`$json`,
//! `$node["Name"]`, `$env`, `$itemIndex`, `$now`, `$request`). This module
//! never evaluates anything and sees no runtime data: it only checks that
//! delimiters are balanced and correctly prefixed, plus a best-effort
//! heuristic that flags accessors whose upstream context cannot exist.

use crate::error::{Issue, IssueKind};
use crate::registry::NodeTypeRegistry;
use crate::validator::ValidationReport;
use crate::workflow::{PortKind, Workflow, WorkflowNode};
use ahash::{AHashMap, AHashSet};

/// Recursively scans every parameter value on every node of a workflow.
///
/// Independent of the connection validator: it can run on its own, and the
/// [`Validator`](crate::validator::Validator) merges its findings into the
/// shared report.
pub struct ExpressionChecker<'a> {
    workflow: &'a Workflow,
    registry: &'a NodeTypeRegistry,
}

impl<'a> ExpressionChecker<'a> {
    pub fn new(workflow: &'a Workflow, registry: &'a NodeTypeRegistry) -> Self {
        Self { workflow, registry }
    }

    pub fn check(&self) -> ValidationReport {
        let mut report = ValidationReport::default();
        let upstream = UpstreamIndex::build(self.workflow);
        for node in &self.workflow.nodes {
            self.walk_value(node, &node.parameters, "", &upstream, &mut report);
        }
        report
    }

    fn walk_value(
        &self,
        node: &WorkflowNode,
        value: &serde_json::Value,
        path: &str,
        upstream: &UpstreamIndex<'_>,
        report: &mut ValidationReport,
    ) {
        match value {
            serde_json::Value::Object(map) => {
                for (key, child) in map {
                    let child_path = if path.is_empty() {
                        key.clone()
                    } else {
                        format!("{}.{}", path, key)
                    };
                    self.walk_value(node, child, &child_path, upstream, report);
                }
            }
            serde_json::Value::Array(items) => {
                for (i, child) in items.iter().enumerate() {
                    self.walk_value(node, child, &format!("{}[{}]", path, i), upstream, report);
                }
            }
            serde_json::Value::String(raw) => {
                self.scan_leaf(node, raw, path, upstream, report);
            }
            _ => {}
        }
    }

    fn scan_leaf(
        &self,
        node: &WorkflowNode,
        raw: &str,
        path: &str,
        upstream: &UpstreamIndex<'_>,
        report: &mut ValidationReport,
    ) {
        let Some(body) = raw.strip_prefix('=') else {
            // Interpolation delimiters only mean anything behind the `=`
            // prefix; finding them on a plain literal is a lost prefix.
            if raw.contains("{{") || raw.contains("}}") {
                report.push(Issue::error(IssueKind::MalformedExpression {
                    node: node.name.clone(),
                    path: path.to_string(),
                    value: raw.to_string(),
                }));
            }
            return;
        };

        if !delimiters_balanced(body) {
            report.push(Issue::error(IssueKind::MalformedExpression {
                node: node.name.clone(),
                path: path.to_string(),
                value: raw.to_string(),
            }));
            return;
        }

        for block in interpolation_blocks(body) {
            self.check_context(node, path, block, upstream, report);
        }
    }

    /// Best-effort reachability heuristic; not guaranteed sound or complete,
    /// hence always warning-severity.
    fn check_context(
        &self,
        node: &WorkflowNode,
        path: &str,
        block: &str,
        upstream: &UpstreamIndex<'_>,
        report: &mut ValidationReport,
    ) {
        for name in node_references(block) {
            if !upstream.exists(&name) {
                report.push(Issue::warning(IssueKind::ExpressionContext {
                    node: node.name.clone(),
                    path: path.to_string(),
                    message: format!("references the unknown node '{}'", name),
                }));
            } else if !upstream.is_upstream(&node.name, &name) {
                report.push(Issue::warning(IssueKind::ExpressionContext {
                    node: node.name.clone(),
                    path: path.to_string(),
                    message: format!(
                        "references node '{}', which is not upstream of this node",
                        name
                    ),
                }));
            }
        }

        if block.contains("$request") && !self.request_context_available(&node.name, upstream) {
            report.push(Issue::warning(IssueKind::ExpressionContext {
                node: node.name.clone(),
                path: path.to_string(),
                message: "uses $request, but no upstream node provides the incoming request payload"
                    .to_string(),
            }));
        }
    }

    fn request_context_available(&self, node_name: &str, upstream: &UpstreamIndex<'_>) -> bool {
        let Some(ancestors) = upstream.ancestors(node_name) else {
            return false;
        };
        for &ancestor in ancestors {
            let Some(ancestor_node) = upstream.node(ancestor) else {
                continue;
            };
            match self.registry.resolve(ancestor_node) {
                // Unregistered ancestor types get the benefit of the doubt.
                None => return true,
                Some(t) if t.provides_context() == Some("request") => return true,
                Some(_) => {}
            }
        }
        false
    }
}

/// Per-node transitive upstream sets over main-data edges.
struct UpstreamIndex<'a> {
    nodes: AHashMap<&'a str, &'a WorkflowNode>,
    upstream: AHashMap<&'a str, AHashSet<&'a str>>,
}

impl<'a> UpstreamIndex<'a> {
    fn build(workflow: &'a Workflow) -> Self {
        let mut nodes: AHashMap<&str, &WorkflowNode> = AHashMap::new();
        for node in &workflow.nodes {
            nodes.entry(node.name.as_str()).or_insert(node);
        }

        let mut reverse: AHashMap<&str, Vec<&str>> = AHashMap::new();
        for (source, by_kind) in &workflow.connections {
            let Some(slots) = by_kind.get(&PortKind::Main) else {
                continue;
            };
            for target in slots.iter().flatten() {
                if target.kind == PortKind::Main {
                    reverse
                        .entry(target.node.as_str())
                        .or_default()
                        .push(source.as_str());
                }
            }
        }

        let mut upstream: AHashMap<&str, AHashSet<&str>> = AHashMap::new();
        for node in &workflow.nodes {
            let mut seen: AHashSet<&str> = AHashSet::new();
            let mut queue: Vec<&str> = reverse
                .get(node.name.as_str())
                .map(|v| v.clone())
                .unwrap_or_default();
            while let Some(current) = queue.pop() {
                if seen.insert(current) {
                    if let Some(parents) = reverse.get(current) {
                        queue.extend(parents.iter().copied());
                    }
                }
            }
            upstream.insert(node.name.as_str(), seen);
        }

        Self { nodes, upstream }
    }

    fn exists(&self, name: &str) -> bool {
        self.nodes.contains_key(name)
    }

    fn node(&self, name: &str) -> Option<&'a WorkflowNode> {
        self.nodes.get(name).copied()
    }

    fn is_upstream(&self, of: &str, candidate: &str) -> bool {
        self.upstream
            .get(of)
            .is_some_and(|set| set.contains(candidate))
    }

    fn ancestors(&self, of: &str) -> Option<&AHashSet<&'a str>> {
        self.upstream.get(of)
    }
}

/// Checks `{{ }}` interpolation blocks plus `()` and `[]` pairs inside an
/// expression body (the part after the `=` prefix).
fn delimiters_balanced(body: &str) -> bool {
    let bytes = body.as_bytes();
    let mut blocks = 0i32;
    let mut parens = 0i32;
    let mut brackets = 0i32;
    let mut i = 0;
    while i < bytes.len() {
        match bytes[i] {
            b'{' if i + 1 < bytes.len() && bytes[i + 1] == b'{' => {
                blocks += 1;
                i += 2;
                continue;
            }
            b'}' if i + 1 < bytes.len() && bytes[i + 1] == b'}' => {
                blocks -= 1;
                if blocks < 0 {
                    return false;
                }
                i += 2;
                continue;
            }
            b'(' => parens += 1,
            b')' => {
                parens -= 1;
                if parens < 0 {
                    return false;
                }
            }
            b'[' => brackets += 1,
            b']' => {
                brackets -= 1;
                if brackets < 0 {
                    return false;
                }
            }
            _ => {}
        }
        i += 1;
    }
    blocks == 0 && parens == 0 && brackets == 0
}

/// Yields the contents of each complete `{{ ... }}` block, in order.
fn interpolation_blocks(body: &str) -> Vec<&str> {
    let mut blocks = Vec::new();
    let mut rest = body;
    while let Some(open) = rest.find("{{") {
        let after = &rest[open + 2..];
        match after.find("}}") {
            Some(close) => {
                blocks.push(&after[..close]);
                rest = &after[close + 2..];
            }
            None => break,
        }
    }
    blocks
}

/// Extracts the quoted names of `$node["..."]` / `$node['...']` accessors.
fn node_references(block: &str) -> Vec<String> {
    let mut refs = Vec::new();
    let mut rest = block;
    while let Some(pos) = rest.find("$node[") {
        let after = &rest[pos + "$node[".len()..];
        rest = after;
        let Some(quote) = after.chars().next().filter(|c| *c == '"' || *c == '\'') else {
            continue;
        };
        let name_and_rest = &after[1..];
        if let Some(end) = name_and_rest.find(quote) {
            refs.push(name_and_rest[..end].to_string());
            rest = &name_and_rest[end + 1..];
        }
    }
    refs
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn balanced_delimiters() {
        assert!(delimiters_balanced("{{ $json.value }}"));
        assert!(delimiters_balanced("plain tail after = prefix"));
        assert!(delimiters_balanced("{{ $node[\"A\"].field }} and {{ $env.HOME }}"));
        assert!(!delimiters_balanced("((unbalanced"));
        assert!(!delimiters_balanced("{{ open only"));
        assert!(!delimiters_balanced("closed only }}"));
        assert!(!delimiters_balanced("{{ $json.items[0 }}"));
        assert!(!delimiters_balanced(")("));
    }

    #[test]
    fn interpolation_block_extraction() {
        assert_eq!(
            interpolation_blocks("a {{ one }} b {{ two }}"),
            vec![" one ", " two "]
        );
        assert!(interpolation_blocks("no blocks here").is_empty());
        assert!(interpolation_blocks("{{ never closed").is_empty());
    }

    #[test]
    fn node_reference_extraction() {
        assert_eq!(
            node_references(" $node[\"Webhook\"].json.body "),
            vec!["Webhook".to_string()]
        );
        assert_eq!(
            node_references("$node['A'].x + $node[\"B\"].y"),
            vec!["A".to_string(), "B".to_string()]
        );
        assert!(node_references("$json.value").is_empty());
    }
}
