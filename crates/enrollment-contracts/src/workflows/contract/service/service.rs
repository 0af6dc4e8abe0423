use std::sync::Arc;

use serde::Serialize;
use serde_json::Value;
use tracing::debug;

use super::source::{EnrollmentSource, SourceError};
use crate::workflows::contract::assembler::{AssemblyError, DocumentAssembler};
use crate::workflows::contract::layout::{ContractDocument, DocumentSummary};
use crate::workflows::contract::record::EnrollmentId;

/// Service pairing an enrollment source with a shared assembler.
pub struct ContractService<S> {
    source: Arc<S>,
    assembler: Arc<DocumentAssembler>,
}

/// API payload: the document plus its summary.
#[derive(Debug, Clone, Serialize)]
pub struct ContractResponse {
    pub summary: DocumentSummary,
    pub document: ContractDocument,
}

impl From<ContractDocument> for ContractResponse {
    fn from(document: ContractDocument) -> Self {
        Self {
            summary: document.summary(),
            document,
        }
    }
}

impl<S> ContractService<S>
where
    S: EnrollmentSource + 'static,
{
    pub fn new(source: Arc<S>, assembler: Arc<DocumentAssembler>) -> Self {
        Self { source, assembler }
    }

    pub fn assembler(&self) -> &DocumentAssembler {
        &self.assembler
    }

    /// Fetch a stored enrollment and assemble its contract.
    pub fn document_for(&self, id: &EnrollmentId) -> Result<ContractDocument, ContractServiceError> {
        let record = self
            .source
            .fetch(id)?
            .ok_or_else(|| ContractServiceError::NotFound(id.clone()))?;
        debug!(enrollment_id = %id, "assembling stored enrollment");
        Ok(self.assembler.assemble(&record))
    }

    /// Assemble a record supplied by the caller.
    pub fn assemble_payload(&self, payload: Value) -> Result<ContractDocument, ContractServiceError> {
        Ok(self.assembler.assemble_value(payload)?)
    }
}

/// Error raised by the contract service.
#[derive(Debug, thiserror::Error)]
pub enum ContractServiceError {
    #[error("enrollment {0} not found")]
    NotFound(EnrollmentId),
    #[error(transparent)]
    Source(#[from] SourceError),
    #[error(transparent)]
    Assembly(#[from] AssemblyError),
}
