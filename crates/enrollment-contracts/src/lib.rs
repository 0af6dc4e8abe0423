//! Enrollment contract assembly: payment grouping, bonus checklists, clause
//! segmentation and pagination into a printable page list.

pub mod config;
pub mod error;
pub mod telemetry;
pub mod workflows;

pub use workflows::contract::{
    ContractDocument, DocumentAssembler, DocumentSummary, EnrollmentRecord,
};
