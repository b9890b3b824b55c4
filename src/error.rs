use crate::workflow::PortKind;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors that can occur while reading a canonical workflow document.
///
/// A `ParseError` is the only failure that stops validation entirely: no
/// partial graph is produced, so there is nothing left to check.
#[derive(Error, Debug, Clone)]
pub enum ParseError {
    #[error("Failed to parse workflow document: {0}")]
    Json(String),

    #[error("Could not read workflow document '{path}': {message}")]
    Io { path: String, message: String },
}

/// Errors that can occur when persisting or loading a validated workflow artifact.
#[derive(Error, Debug)]
pub enum ArtifactError {
    #[error("Workflow has {errors} error-severity findings and cannot be persisted")]
    Rejected { errors: usize },

    #[error("Artifact serialization failed: {0}")]
    Encode(String),

    #[error("Artifact deserialization failed: {0}")]
    Decode(String),

    #[error("Could not access artifact file '{path}': {message}")]
    Io { path: String, message: String },
}

/// Errors that can occur when converting a custom authoring format into a
/// keiro [`Workflow`](crate::workflow::Workflow).
#[derive(Error, Debug, Clone)]
pub enum WorkflowConversionError {
    #[error("Invalid workflow source data: {0}")]
    ValidationError(String),
}

/// How strongly a validation finding counts against a workflow.
///
/// Error-severity findings block persistence and handoff to an execution
/// runtime; warnings are surfaced but do not block by default.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Severity {
    Warning,
    Error,
}

/// Every structural or lexical problem the validators can report.
///
/// Validation never stops at the first finding: all variants below are
/// collected exhaustively from a single pass so an authoring surface can
/// show the complete picture per attempt.
#[derive(Error, Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum IssueKind {
    #[error("Duplicate node name '{name}'")]
    DuplicateNodeName { name: String },

    #[error("Duplicate node id '{id}' (used by '{first}' and '{second}')")]
    DuplicateNodeId {
        id: String,
        first: String,
        second: String,
    },

    #[error("Connection references the missing node '{missing}'")]
    DanglingReference { missing: String },

    #[error(
        "Node '{node}' supplies {actual} {kind} branch slot(s), but its configuration implies {expected}"
    )]
    ArityMismatch {
        node: String,
        kind: PortKind,
        expected: usize,
        actual: usize,
    },

    #[error("Port kind conflict at node '{node}' ({kind}): {message}")]
    TypeMismatch {
        node: String,
        kind: PortKind,
        message: String,
    },

    #[error("Node '{node}' connects its {kind} output directly back to itself")]
    SelfLoop { node: String, kind: PortKind },

    #[error("Main data flow contains a cycle: {path}")]
    MainDataCycle { path: String },

    #[error("Node '{node}' has an unregistered type '{type_id}' (version {version})")]
    UnknownNodeType {
        node: String,
        type_id: String,
        version: u32,
    },

    #[error("Parameter '{path}' on node '{node}' holds a malformed expression: {value}")]
    MalformedExpression {
        node: String,
        path: String,
        value: String,
    },

    #[error("Expression at '{path}' on node '{node}' {message}")]
    ExpressionContext {
        node: String,
        path: String,
        message: String,
    },

    #[error("Workflow has no entry point: every node requires an inbound main connection")]
    MissingEntryPoint,
}

/// One validation finding: a taxonomy kind plus its severity and, where the
/// finding concerns a specific edge, a printable connection reference.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Issue {
    pub kind: IssueKind,
    pub severity: Severity,
    pub connection: Option<String>,
}

impl Issue {
    pub fn new(severity: Severity, kind: IssueKind) -> Self {
        Self {
            kind,
            severity,
            connection: None,
        }
    }

    pub fn error(kind: IssueKind) -> Self {
        Self::new(Severity::Error, kind)
    }

    pub fn warning(kind: IssueKind) -> Self {
        Self::new(Severity::Warning, kind)
    }

    pub fn with_connection(mut self, connection: impl Into<String>) -> Self {
        self.connection = Some(connection.into());
        self
    }

    /// The node a finding is attached to, when one applies.
    pub fn node_name(&self) -> Option<&str> {
        match &self.kind {
            IssueKind::DuplicateNodeName { name } => Some(name),
            IssueKind::DuplicateNodeId { second, .. } => Some(second),
            IssueKind::DanglingReference { missing } => Some(missing),
            IssueKind::ArityMismatch { node, .. }
            | IssueKind::TypeMismatch { node, .. }
            | IssueKind::SelfLoop { node, .. }
            | IssueKind::UnknownNodeType { node, .. }
            | IssueKind::MalformedExpression { node, .. }
            | IssueKind::ExpressionContext { node, .. } => Some(node),
            IssueKind::MainDataCycle { .. } | IssueKind::MissingEntryPoint => None,
        }
    }

    /// The human-readable message for this finding.
    pub fn message(&self) -> String {
        self.kind.to_string()
    }
}
