use crate::workflows::contract::record::{EnrollmentId, EnrollmentRecord};

/// Read-only access to stored enrollment snapshots.
pub trait EnrollmentSource: Send + Sync {
    fn fetch(&self, id: &EnrollmentId) -> Result<Option<EnrollmentRecord>, SourceError>;
}

#[derive(Debug, thiserror::Error)]
pub enum SourceError {
    #[error("enrollment source unavailable: {0}")]
    Unavailable(String),
    #[error("stored enrollment {id} is malformed: {reason}")]
    Malformed { id: String, reason: String },
}
