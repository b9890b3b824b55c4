//! Prelude module for convenient imports
//!
//! Re-exports the most commonly used types and traits from the keiro crate.
//!
//! # Example
//!
//! ```rust,no_run
//! use keiro::prelude::*;
//!
//! # fn run_example() -> Result<()> {
//! let workflow = Workflow::from_file("path/to/workflow.json")?;
//! let registry = NodeTypeRegistry::builder().build();
//! let report = Validator::new(&registry).validate(&workflow);
//!
//! for issue in report.issues() {
//!     println!("[{:?}] {}", issue.severity, issue.message());
//! }
//! # Ok(())
//! # }
//! ```

// Data model
pub use crate::workflow::{
    ConnectionMap, ConnectionTarget, ExecutionOrder, IntoWorkflow, OnErrorPolicy, PortKind,
    Workflow, WorkflowBuilder, WorkflowNode, WorkflowSettings,
};

// Node type catalog
pub use crate::registry::{NodeType, NodeTypeRegistry, OutputPort, PortDecl};

// Validation
pub use crate::expression::ExpressionChecker;
pub use crate::validator::{ValidationOptions, ValidationReport, Validator};

// Document and artifact handling
pub use crate::document::ValidatedWorkflow;

// Error types
pub use crate::error::{Issue, IssueKind, ParseError, Severity};

// Result type alias for convenience
pub type Result<T> = std::result::Result<T, Box<dyn std::error::Error>>;
