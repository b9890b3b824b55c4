use super::connection::{ConnectionMap, ConnectionTarget, PortKind};
use super::definition::{Workflow, WorkflowNode, WorkflowSettings};

/// Fluent construction of an immutable [`Workflow`] snapshot.
///
/// The builder performs no validation; it only assembles the graph. Run the
/// result through [`Validator`](crate::validator::Validator) before
/// persisting it or handing it to a runtime.
pub struct WorkflowBuilder {
    name: String,
    nodes: Vec<WorkflowNode>,
    connections: ConnectionMap,
    settings: WorkflowSettings,
    pin_data: Option<serde_json::Value>,
}

impl WorkflowBuilder {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            nodes: Vec::new(),
            connections: ConnectionMap::new(),
            settings: WorkflowSettings::default(),
            pin_data: None,
        }
    }

    pub fn add_node(mut self, node: WorkflowNode) -> Self {
        self.nodes.push(node);
        self
    }

    /// Adds an edge from branch `slot` of the `kind` output on `source` to
    /// input slot `index` of the same kind on `target`. Missing intermediate
    /// branch slots are created empty.
    pub fn connect(
        mut self,
        source: impl Into<String>,
        kind: PortKind,
        slot: usize,
        target: impl Into<String>,
        index: u32,
    ) -> Self {
        let slots = self
            .connections
            .entry(source.into())
            .or_default()
            .entry(kind)
            .or_default();
        if slots.len() <= slot {
            slots.resize_with(slot + 1, Vec::new);
        }
        slots[slot].push(ConnectionTarget::new(target, kind, index));
        self
    }

    /// Shorthand for the common single-branch main-data edge.
    pub fn connect_main(self, source: impl Into<String>, target: impl Into<String>) -> Self {
        self.connect(source, PortKind::Main, 0, target, 0)
    }

    /// Pre-sizes the branch slot array of a `(source, kind)` group so that
    /// configured-but-unconnected branches serialize as empty slots.
    pub fn reserve_branches(
        mut self,
        source: impl Into<String>,
        kind: PortKind,
        count: usize,
    ) -> Self {
        let slots = self
            .connections
            .entry(source.into())
            .or_default()
            .entry(kind)
            .or_default();
        if slots.len() < count {
            slots.resize_with(count, Vec::new);
        }
        self
    }

    pub fn with_settings(mut self, settings: WorkflowSettings) -> Self {
        self.settings = settings;
        self
    }

    pub fn with_pin_data(mut self, pin_data: serde_json::Value) -> Self {
        self.pin_data = Some(pin_data);
        self
    }

    pub fn build(self) -> Workflow {
        Workflow {
            name: self.name,
            nodes: self.nodes,
            connections: self.connections,
            settings: self.settings,
            pin_data: self.pin_data,
        }
    }
}
