mod document;
mod page;
mod paginator;

pub use document::{ContractDocument, DocumentInvariantError, DocumentSummary};
pub use page::{
    FieldRow, Page, PageBlock, PageKind, Signatory, SignatoryRole, SignatureBlock,
};
pub use paginator::{
    Pagination, PaginationLimits, Paginator, SignatureSlot, DEFAULT_FOOTER_SHARE_THRESHOLD,
    DEFAULT_MAX_PAGE_SIZE,
};
