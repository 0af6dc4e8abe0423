//! Enrollment contract workflow: from an enrollment snapshot to an ordered page list
//! (cover, clause pages, signature placement) ready for an external renderer.

pub mod assembler;
pub mod bonus;
pub mod clauses;
pub mod layout;
pub mod lookup;
pub mod payments;
pub mod record;
pub mod render;
pub mod service;

pub use assembler::{AssemblyConfig, AssemblyError, DocumentAssembler, SignaturePlacement};
pub use bonus::{BonusDisplay, BonusResolver, BonusSelection, BonusSupplement, KnownBonus};
pub use clauses::{ClauseBlock, ClauseSegmentation, HeadingSegmenter};
pub use layout::{
    ContractDocument, DocumentInvariantError, DocumentSummary, Page, PageBlock, PageKind,
    Pagination, PaginationLimits, Paginator, SignatureSlot,
};
pub use payments::ledger::{LedgerImportError, PaymentLedgerImporter};
pub use payments::{
    BillingType, PaymentAggregator, PaymentEntry, PaymentGroup, PaymentMethod, PaymentSummary,
    RawAmount, RawPaymentEntry,
};
pub use record::{EnrollmentId, EnrollmentRecord};
pub use render::{DocumentRenderer, RenderError, RenderedDocument, TextPreviewRenderer};
pub use service::{
    contract_router, ContractService, ContractServiceError, EnrollmentSource, SourceError,
};
