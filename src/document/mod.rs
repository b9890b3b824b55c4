//! Deterministic conversion between in-memory workflows and their canonical
//! document form, plus the binary artifact used for validated snapshots.

pub mod artifact;
pub mod canonical;

pub use artifact::ValidatedWorkflow;
pub use canonical::{parse, serialize};
