//! Structural validation over a parsed workflow snapshot.
//!
//! The validator produces the complete list of problems in one pass: no
//! finding suppresses discovery of another, so an authoring surface gets the
//! full picture per attempt. Only a parse failure short-circuits, and that
//! happens before this module is ever reached.

use crate::error::{Issue, Severity};
use crate::expression::ExpressionChecker;
use crate::registry::NodeTypeRegistry;
use crate::workflow::Workflow;
use itertools::Itertools;
use serde::{Deserialize, Serialize};

mod connections;
mod cycles;

/// Caller-supplied validation policy.
#[derive(Debug, Clone, Copy)]
pub struct ValidationOptions {
    /// Severity assigned to nodes whose `(type, typeVersion)` is not
    /// registered. The catalog is open, so the default is a warning.
    pub unknown_node_types: Severity,
}

impl Default for ValidationOptions {
    fn default() -> Self {
        Self {
            unknown_node_types: Severity::Warning,
        }
    }
}

impl ValidationOptions {
    /// Escalates unregistered node types from warnings to errors.
    pub fn strict_unknown_types(mut self, strict: bool) -> Self {
        self.unknown_node_types = if strict {
            Severity::Error
        } else {
            Severity::Warning
        };
        self
    }
}

/// The merged outcome of all validation passes over one workflow snapshot.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ValidationReport {
    issues: Vec<Issue>,
}

impl ValidationReport {
    pub fn push(&mut self, issue: Issue) {
        self.issues.push(issue);
    }

    pub fn extend(&mut self, other: ValidationReport) {
        self.issues.extend(other.issues);
    }

    pub fn issues(&self) -> &[Issue] {
        &self.issues
    }

    pub fn errors(&self) -> impl Iterator<Item = &Issue> {
        self.issues
            .iter()
            .filter(|i| i.severity == Severity::Error)
    }

    pub fn warnings(&self) -> impl Iterator<Item = &Issue> {
        self.issues
            .iter()
            .filter(|i| i.severity == Severity::Warning)
    }

    /// Whether the workflow may be persisted or handed to a runtime.
    /// Warnings do not block; any error-severity finding does.
    pub fn is_valid(&self) -> bool {
        self.errors().next().is_none()
    }

    pub fn len(&self) -> usize {
        self.issues.len()
    }

    pub fn is_empty(&self) -> bool {
        self.issues.is_empty()
    }

    /// Drops repeated findings while preserving first-seen order.
    pub(crate) fn dedup(&mut self) {
        self.issues = std::mem::take(&mut self.issues)
            .into_iter()
            .unique()
            .collect();
    }
}

/// Runs every structural and lexical check against an immutable workflow
/// snapshot and merges the findings into one [`ValidationReport`].
///
/// Validation is deterministic, read-only, and free of I/O; concurrent
/// validation of the same snapshot from multiple threads needs no
/// coordination.
pub struct Validator<'a> {
    registry: &'a NodeTypeRegistry,
    options: ValidationOptions,
}

impl<'a> Validator<'a> {
    pub fn new(registry: &'a NodeTypeRegistry) -> Self {
        Self {
            registry,
            options: ValidationOptions::default(),
        }
    }

    pub fn with_options(mut self, options: ValidationOptions) -> Self {
        self.options = options;
        self
    }

    pub fn validate(&self, workflow: &Workflow) -> ValidationReport {
        tracing::debug!(
            workflow = %workflow.name,
            nodes = workflow.nodes.len(),
            "validating workflow"
        );
        let mut report = ValidationReport::default();

        let index = connections::build_index(workflow, &mut report);
        connections::check_connections(workflow, &index, self.registry, &self.options, &mut report);
        connections::check_entry_point(workflow, self.registry, &mut report);
        cycles::check_main_data_cycles(workflow, &index, &mut report);

        report.extend(ExpressionChecker::new(workflow, self.registry).check());

        report.dedup();
        tracing::debug!(
            findings = report.len(),
            valid = report.is_valid(),
            "validation finished"
        );
        report
    }
}
