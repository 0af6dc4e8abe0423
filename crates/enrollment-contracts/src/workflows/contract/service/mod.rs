//! Contract retrieval and assembly over HTTP. Enrollment storage stays behind
//! [`EnrollmentSource`] so the service can be exercised with in-memory fixtures.

pub mod router;
pub mod service;
pub mod source;

#[cfg(test)]
mod tests;

pub use router::contract_router;
pub use service::{ContractResponse, ContractService, ContractServiceError};
pub use source::{EnrollmentSource, SourceError};
