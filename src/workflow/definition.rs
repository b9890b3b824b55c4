use super::connection::ConnectionMap;
use serde::{Deserialize, Serialize};

/// The complete, canonical definition of a workflow graph.
///
/// A `Workflow` is an immutable snapshot: edits produce a new instance
/// rather than mutating one in place, so concurrent validation of the same
/// snapshot needs no coordination. The serde representation of this type
/// *is* the canonical document form (`name`, `nodes`, `connections`,
/// `settings`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Workflow {
    pub name: String,
    /// Ordered node set. Names and ids must be workflow-unique; the
    /// validator reports duplicates rather than this type rejecting them,
    /// so drafts can always be represented.
    pub nodes: Vec<WorkflowNode>,
    pub connections: ConnectionMap,
    #[serde(default)]
    pub settings: WorkflowSettings,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pin_data: Option<serde_json::Value>,
}

impl Workflow {
    /// Starts a fluent builder for programmatic authoring.
    pub fn builder(name: impl Into<String>) -> super::builder::WorkflowBuilder {
        super::builder::WorkflowBuilder::new(name)
    }

    /// Finds a node by its workflow-unique name (the connection addressing key).
    pub fn get_node(&self, name: &str) -> Option<&WorkflowNode> {
        self.nodes.iter().find(|n| n.name == name)
    }

    pub fn node_names(&self) -> impl Iterator<Item = &str> {
        self.nodes.iter().map(|n| n.name.as_str())
    }
}

/// A single typed processing unit in the workflow graph.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkflowNode {
    /// Stable workflow-unique identifier.
    pub id: String,
    /// Workflow-unique display name; connections address nodes by name.
    pub name: String,
    /// Type identifier, resolved against the node type registry.
    #[serde(rename = "type")]
    pub type_id: String,
    pub type_version: u32,
    /// Canvas layout only; carries no graph semantics.
    pub position: [f64; 2],
    /// Arbitrary nested parameter tree. String leaves may be literals or
    /// `=`-prefixed expressions.
    pub parameters: serde_json::Value,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub credentials_ref: Option<String>,
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub disabled: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub on_error: Option<OnErrorPolicy>,
}

impl WorkflowNode {
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        type_id: impl Into<String>,
        type_version: u32,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            type_id: type_id.into(),
            type_version,
            position: [0.0, 0.0],
            parameters: serde_json::Value::Object(serde_json::Map::new()),
            credentials_ref: None,
            disabled: false,
            on_error: None,
        }
    }

    pub fn with_position(mut self, x: f64, y: f64) -> Self {
        self.position = [x, y];
        self
    }

    pub fn with_parameters(mut self, parameters: serde_json::Value) -> Self {
        self.parameters = parameters;
        self
    }

    pub fn with_credentials_ref(mut self, credentials_ref: impl Into<String>) -> Self {
        self.credentials_ref = Some(credentials_ref.into());
        self
    }

    pub fn with_on_error(mut self, on_error: OnErrorPolicy) -> Self {
        self.on_error = Some(on_error);
        self
    }

    pub fn disabled(mut self) -> Self {
        self.disabled = true;
        self
    }
}

/// What the execution runtime should do when a node fails.
///
/// Carried through the document untouched; only the runtime interprets it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum OnErrorPolicy {
    StopWorkflow,
    ContinueRegularOutput,
    ContinueErrorOutput,
}

/// Workflow-level execution settings.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkflowSettings {
    #[serde(default)]
    pub execution_order: ExecutionOrder,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timezone: Option<String>,
}

/// Which scheduling discipline the runtime uses for multi-branch graphs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ExecutionOrder {
    #[serde(rename = "v0")]
    V0,
    #[default]
    #[serde(rename = "v1")]
    V1,
}
