mod cover;
mod signature;

use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{info, warn};

use super::clauses::{ClauseSegmentation, HeadingSegmenter};
use super::layout::{
    ContractDocument, Page, PageBlock, PageKind, PaginationLimits, Paginator, SignatureSlot,
};
use super::record::EnrollmentRecord;

pub(crate) const CLAUSES_MISSING_MESSAGE: &str =
    "Contract clauses were not provided for this enrollment.";

#[derive(Debug, thiserror::Error)]
pub enum AssemblyError {
    #[error("invalid enrollment record: {reason}")]
    InvalidInput { reason: String },
}

impl AssemblyError {
    fn invalid(reason: impl Into<String>) -> Self {
        Self::InvalidInput {
            reason: reason.into(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SignaturePlacement {
    /// Repeat the student/contractor signature lines on the cover page.
    pub cover_signature: bool,
}

impl Default for SignaturePlacement {
    fn default() -> Self {
        Self {
            cover_signature: true,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssemblyConfig {
    pub limits: PaginationLimits,
    pub placement: SignaturePlacement,
}

/// Builds the ordered page list of an enrollment contract. Holds only immutable
/// configuration, so one instance can be shared across tasks.
pub struct DocumentAssembler {
    config: AssemblyConfig,
    segmenter: Box<dyn ClauseSegmentation>,
}

impl Default for DocumentAssembler {
    fn default() -> Self {
        Self::new(AssemblyConfig::default())
    }
}

impl std::fmt::Debug for DocumentAssembler {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DocumentAssembler")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

impl DocumentAssembler {
    pub fn new(config: AssemblyConfig) -> Self {
        Self::with_segmenter(config, HeadingSegmenter)
    }

    pub fn with_segmenter<G>(config: AssemblyConfig, segmenter: G) -> Self
    where
        G: ClauseSegmentation + 'static,
    {
        Self {
            config,
            segmenter: Box::new(segmenter),
        }
    }

    pub fn config(&self) -> AssemblyConfig {
        self.config
    }

    pub fn assemble(&self, record: &EnrollmentRecord) -> ContractDocument {
        let mut pages = vec![cover::cover_page(
            record,
            self.config.placement.cover_signature,
        )];

        let blocks = self.segmenter.segment(&record.clauses);
        if blocks.is_empty() {
            warn!(
                enrollment_id = %record.enrollment_id,
                "enrollment has no contract clauses; emitting placeholder page"
            );
            pages.push(Page::new(
                PageKind::ClauseContent,
                vec![PageBlock::ClausesMissing {
                    message: CLAUSES_MISSING_MESSAGE.to_string(),
                }],
                true,
            ));
            pages.push(signature_only_page(record));
        } else {
            let pagination = Paginator::new(self.config.limits).paginate(blocks, true);
            let shares_last_page = pagination.signature == SignatureSlot::SharesLastPage;
            let last = pagination.pages.len().saturating_sub(1);

            for (index, page_blocks) in pagination.pages.into_iter().enumerate() {
                let mut content: Vec<PageBlock> =
                    page_blocks.into_iter().map(PageBlock::Clause).collect();
                if index == last && shares_last_page {
                    content.push(PageBlock::Signature(signature::closing_signatures(record)));
                }
                pages.push(Page::new(PageKind::ClauseContent, content, true));
            }
            if !shares_last_page {
                pages.push(signature_only_page(record));
            }
        }

        let document = ContractDocument::new(pages);
        let summary = document.summary();
        info!(
            enrollment_id = %record.enrollment_id,
            pages = summary.page_count,
            clause_pages = summary.clause_page_count,
            clause_size = summary.total_clause_size,
            signature_shares_last_page = summary.signature_shares_last_page,
            "assembled enrollment contract"
        );
        document
    }

    /// Assembles from an untyped JSON payload. `null` means no record was supplied.
    pub fn assemble_value(&self, value: Value) -> Result<ContractDocument, AssemblyError> {
        if value.is_null() {
            return Err(AssemblyError::invalid("enrollment record is missing"));
        }
        let record: EnrollmentRecord = serde_json::from_value(value)
            .map_err(|err| AssemblyError::invalid(err.to_string()))?;
        Ok(self.assemble(&record))
    }

    pub fn assemble_json(&self, payload: &str) -> Result<ContractDocument, AssemblyError> {
        if payload.trim().is_empty() {
            return Err(AssemblyError::invalid("enrollment record is missing"));
        }
        let value: Value =
            serde_json::from_str(payload).map_err(|err| AssemblyError::invalid(err.to_string()))?;
        self.assemble_value(value)
    }
}

fn signature_only_page(record: &EnrollmentRecord) -> Page {
    Page::new(
        PageKind::SignatureOnly,
        vec![PageBlock::Signature(signature::closing_signatures(record))],
        false,
    )
}
