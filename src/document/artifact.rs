use crate::error::ArtifactError;
use crate::validator::ValidationReport;
use crate::workflow::Workflow;
use bincode::config::standard;
use bincode::serde::{decode_from_slice, encode_to_vec};
use serde::{Deserialize, Serialize};
use std::fs;
use std::io::{Read, Write};

/// A workflow snapshot that passed validation, bundled with the report that
/// cleared it, in a compact binary form for handoff to downstream consumers.
///
/// Sealing is the persistence gate: a workflow with any error-severity
/// finding cannot become an artifact. Warnings travel along for the consumer
/// to surface.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidatedWorkflow {
    pub workflow: Workflow,
    pub report: ValidationReport,
}

/// On-disk layout. The workflow travels as canonical JSON bytes inside the
/// bincode envelope: node parameter trees are arbitrary `serde_json::Value`s,
/// which need a self-describing format and cannot go through `bincode::serde`
/// directly. The report is plain derived data and stays native bincode.
#[derive(Serialize, Deserialize)]
struct ArtifactEnvelope {
    workflow: Vec<u8>,
    report: ValidationReport,
}

impl ValidatedWorkflow {
    /// Bundles a workflow with its report, rejecting any error-severity findings.
    pub fn seal(workflow: Workflow, report: ValidationReport) -> Result<Self, ArtifactError> {
        let errors = report.errors().count();
        if errors > 0 {
            return Err(ArtifactError::Rejected { errors });
        }
        Ok(Self { workflow, report })
    }

    /// Saves the artifact to a file using the bincode format.
    pub fn save(&self, path: &str) -> Result<(), ArtifactError> {
        let bytes = self.to_bytes()?;
        let mut file = fs::File::create(path).map_err(|e| ArtifactError::Io {
            path: path.to_string(),
            message: e.to_string(),
        })?;
        file.write_all(&bytes).map_err(|e| ArtifactError::Io {
            path: path.to_string(),
            message: e.to_string(),
        })?;
        Ok(())
    }

    /// Loads an artifact from a file.
    pub fn from_file(path: &str) -> Result<Self, ArtifactError> {
        let mut file = fs::File::open(path).map_err(|e| ArtifactError::Io {
            path: path.to_string(),
            message: e.to_string(),
        })?;
        let mut bytes = Vec::new();
        file.read_to_end(&mut bytes).map_err(|e| ArtifactError::Io {
            path: path.to_string(),
            message: e.to_string(),
        })?;
        Self::from_bytes(&bytes)
    }

    pub fn to_bytes(&self) -> Result<Vec<u8>, ArtifactError> {
        let envelope = ArtifactEnvelope {
            workflow: crate::document::serialize(&self.workflow).into_bytes(),
            report: self.report.clone(),
        };
        encode_to_vec(&envelope, standard()).map_err(|e| ArtifactError::Encode(e.to_string()))
    }

    pub fn from_bytes(bytes: &[u8]) -> Result<Self, ArtifactError> {
        let (envelope, _): (ArtifactEnvelope, usize) = decode_from_slice(bytes, standard())
            .map_err(|e| ArtifactError::Decode(e.to_string()))?; // bincode 2 returns a tuple (data, bytes_read)
        let workflow = serde_json::from_slice(&envelope.workflow)
            .map_err(|e| ArtifactError::Decode(e.to_string()))?;
        Ok(Self {
            workflow,
            report: envelope.report,
        })
    }
}
