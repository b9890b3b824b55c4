use super::definition::Workflow;
use crate::error::WorkflowConversionError;

/// A trait for custom authoring formats that can be converted into a keiro
/// [`Workflow`].
///
/// This is the extension point for making keiro format-agnostic: parse your
/// own editor or export format into your own structs, then implement
/// `IntoWorkflow` to translate them into the canonical model. The converted
/// workflow goes through exactly the same validation as one parsed from a
/// canonical document.
///
/// # Example
///
/// ```rust
/// use keiro::error::WorkflowConversionError;
/// use keiro::workflow::{IntoWorkflow, Workflow, WorkflowNode};
///
/// struct MyStep { id: String, name: String, kind: String }
/// struct MyPipeline { steps: Vec<MyStep> }
///
/// impl IntoWorkflow for MyPipeline {
///     fn into_workflow(self) -> Result<Workflow, WorkflowConversionError> {
///         let mut builder = Workflow::builder("imported");
///         for step in self.steps {
///             builder = builder.add_node(WorkflowNode::new(step.id, step.name, step.kind, 1));
///         }
///         Ok(builder.build())
///     }
/// }
/// ```
pub trait IntoWorkflow {
    /// Consumes the object and converts it into a keiro workflow snapshot.
    fn into_workflow(self) -> Result<Workflow, WorkflowConversionError>;
}
