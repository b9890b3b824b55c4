//! # Keiro - Workflow Graph Model and Validation Engine
//!
//! **Keiro** models node-based automation workflows (triggers, processing,
//! action, and AI-capability nodes wired together through typed ports) and
//! validates them exhaustively before they are persisted or handed to an
//! execution runtime. The core is synchronous and side-effect-free: parse,
//! validate, serialize. It never executes workflows, never resolves
//! expressions against live data, and never touches credentials.
//!
//! ## Core Workflow
//!
//! 1.  **Obtain a `Workflow`**: parse a canonical JSON document with
//!     [`document::parse`], convert your own format through the
//!     [`IntoWorkflow`](workflow::IntoWorkflow) trait, or assemble one with
//!     [`Workflow::builder`](workflow::Workflow::builder).
//! 2.  **Resolve node types**: build a [`NodeTypeRegistry`](registry::NodeTypeRegistry)
//!     from the built-in catalog, plugin types, and aliases. The catalog is
//!     open; unregistered types downgrade to warnings unless strict mode is on.
//! 3.  **Validate**: run a [`Validator`](validator::Validator) to get one
//!     merged [`ValidationReport`](validator::ValidationReport) covering graph
//!     structure, branch arity, cycles, and embedded expressions.
//! 4.  **Persist**: serialize the workflow back with [`document::serialize`],
//!     or seal a clean snapshot into a binary
//!     [`ValidatedWorkflow`](document::ValidatedWorkflow) artifact.
//!
//! ## Quick Start
//!
//! ```rust
//! use keiro::prelude::*;
//!
//! let workflow = Workflow::builder("demo")
//!     .add_node(WorkflowNode::new("1", "Start", "manualTrigger", 1))
//!     .add_node(WorkflowNode::new("2", "Fetch", "httpRequest", 1))
//!     .connect_main("Start", "Fetch")
//!     .build();
//!
//! let registry = NodeTypeRegistry::builder().build();
//! let report = Validator::new(&registry).validate(&workflow);
//! assert!(report.is_valid());
//!
//! // Round-trip through the canonical document form.
//! let document = keiro::document::serialize(&workflow);
//! let reparsed = keiro::document::parse(&document).unwrap();
//! assert_eq!(reparsed, workflow);
//! ```

pub mod document;
pub mod error;
pub mod expression;
pub mod prelude;
pub mod registry;
pub mod validator;
pub mod workflow;
