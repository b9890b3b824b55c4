use crate::error::ParseError;
use crate::workflow::Workflow;
use std::fs;

/// Parses a canonical workflow document into an in-memory [`Workflow`].
///
/// Fails only on malformed JSON or missing required fields (`id`, `name`,
/// `type`, `typeVersion`, `position`, `parameters` per node; `name`,
/// `nodes`, `connections` at the workflow level). Parsing success does not
/// imply validity: structural and expression checks are a separate step run
/// by [`Validator`](crate::validator::Validator).
pub fn parse(input: &str) -> Result<Workflow, ParseError> {
    tracing::debug!(bytes = input.len(), "parsing workflow document");
    let workflow: Workflow =
        serde_json::from_str(input).map_err(|e| ParseError::Json(e.to_string()))?;
    tracing::debug!(
        workflow = %workflow.name,
        nodes = workflow.nodes.len(),
        "parsed workflow document"
    );
    Ok(workflow)
}

/// Serializes a workflow into its canonical document form.
///
/// Always succeeds for any internally well-typed workflow, valid or not, so
/// drafts can be saved mid-edit. Key ordering and connection-array nesting
/// are stable: serializing the same workflow twice produces byte-identical
/// output, and `parse(serialize(w)) == w` for any `w` that itself came from
/// a successful parse.
pub fn serialize(workflow: &Workflow) -> String {
    // Infallible for well-typed workflows: every map key serializes to a
    // string and parameter trees are already `serde_json::Value`.
    serde_json::to_string_pretty(workflow).expect("canonical workflow serialization cannot fail")
}

impl Workflow {
    /// Reads and parses a canonical document from a file.
    pub fn from_file(path: &str) -> Result<Self, ParseError> {
        let content = fs::read_to_string(path).map_err(|e| ParseError::Io {
            path: path.to_string(),
            message: e.to_string(),
        })?;
        parse(&content)
    }
}
