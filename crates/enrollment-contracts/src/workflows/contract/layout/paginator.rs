use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::workflows::contract::clauses::ClauseBlock;

pub const DEFAULT_MAX_PAGE_SIZE: usize = 6200;
pub const DEFAULT_FOOTER_SHARE_THRESHOLD: usize = 5000;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaginationLimits {
    /// Size budget of a single clause page.
    pub max_page_size: usize,
    /// Total clause volume below which the signature block fits on the last page.
    pub footer_share_threshold: usize,
}

impl Default for PaginationLimits {
    fn default() -> Self {
        Self {
            max_page_size: DEFAULT_MAX_PAGE_SIZE,
            footer_share_threshold: DEFAULT_FOOTER_SHARE_THRESHOLD,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SignatureSlot {
    SharesLastPage,
    SeparatePage,
    NotRequired,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Pagination {
    pub pages: Vec<Vec<ClauseBlock>>,
    pub total_size: usize,
    pub signature: SignatureSlot,
}

impl Pagination {
    pub fn signature_shares_last_page(&self) -> bool {
        self.signature == SignatureSlot::SharesLastPage
    }
}

/// Greedy packer for clause blocks.
#[derive(Debug, Clone, Copy, Default)]
pub struct Paginator {
    limits: PaginationLimits,
}

impl Paginator {
    pub fn new(limits: PaginationLimits) -> Self {
        Self { limits }
    }

    pub fn limits(&self) -> PaginationLimits {
        self.limits
    }

    /// Packs blocks in order, opening a new page whenever the next block would push a
    /// non-empty page past the budget. A block larger than the budget sits alone.
    pub fn paginate(&self, blocks: Vec<ClauseBlock>, signature_required: bool) -> Pagination {
        let mut pages: Vec<Vec<ClauseBlock>> = Vec::new();
        let mut current: Vec<ClauseBlock> = Vec::new();
        let mut current_size = 0usize;
        let mut total_size = 0usize;

        for block in blocks {
            let size = block.estimated_size();
            if !current.is_empty() && current_size + size > self.limits.max_page_size {
                pages.push(std::mem::take(&mut current));
                current_size = 0;
            }
            if size > self.limits.max_page_size {
                debug!(size, max = self.limits.max_page_size, "clause block exceeds page budget");
            }
            current_size += size;
            total_size += size;
            current.push(block);
        }
        if !current.is_empty() {
            pages.push(current);
        }

        let signature = if !signature_required {
            SignatureSlot::NotRequired
        } else if !pages.is_empty() && total_size < self.limits.footer_share_threshold {
            SignatureSlot::SharesLastPage
        } else {
            SignatureSlot::SeparatePage
        };

        Pagination {
            pages,
            total_size,
            signature,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn block(size: usize) -> ClauseBlock {
        ClauseBlock::new("x".repeat(size))
    }

    fn page_sizes(pagination: &Pagination) -> Vec<usize> {
        pagination
            .pages
            .iter()
            .map(|page| page.iter().map(ClauseBlock::estimated_size).sum())
            .collect()
    }

    #[test]
    fn small_content_shares_last_page() {
        let pagination = Paginator::default().paginate(vec![block(4000)], true);

        assert_eq!(pagination.pages.len(), 1);
        assert_eq!(pagination.total_size, 4000);
        assert!(pagination.signature_shares_last_page());
    }

    #[test]
    fn large_blocks_get_separate_pages_and_signature_page() {
        let pagination = Paginator::default().paginate(vec![block(6000), block(6000)], true);

        assert_eq!(page_sizes(&pagination), vec![6000, 6000]);
        assert_eq!(pagination.signature, SignatureSlot::SeparatePage);
    }

    #[test]
    fn threshold_is_exclusive() {
        let paginator = Paginator::default();
        assert!(paginator.paginate(vec![block(4999)], true).signature_shares_last_page());
        assert!(!paginator.paginate(vec![block(5000)], true).signature_shares_last_page());
    }

    #[test]
    fn oversized_block_sits_alone() {
        let pagination =
            Paginator::default().paginate(vec![block(100), block(9000), block(100)], true);

        assert_eq!(page_sizes(&pagination), vec![100, 9000, 100]);
    }

    #[test]
    fn fills_pages_up_to_exact_budget() {
        let pagination = Paginator::default()
            .paginate(vec![block(3100), block(3100), block(1)], true);

        assert_eq!(page_sizes(&pagination), vec![6200, 1]);
    }

    #[test]
    fn no_blocks_means_no_pages() {
        let pagination = Paginator::default().paginate(Vec::new(), true);

        assert!(pagination.pages.is_empty());
        assert_eq!(pagination.signature, SignatureSlot::SeparatePage);
        assert!(!pagination.signature_shares_last_page());
    }

    #[test]
    fn signature_not_required_is_reported() {
        let pagination = Paginator::default().paginate(vec![block(10)], false);
        assert_eq!(pagination.signature, SignatureSlot::NotRequired);
    }

    #[test]
    fn packing_keeps_every_block_in_order_and_within_budget() {
        let limits = PaginationLimits {
            max_page_size: 500,
            footer_share_threshold: 400,
        };
        let sizes = [120, 380, 1, 499, 77, 600, 250, 250, 0, 13, 488];
        let blocks: Vec<ClauseBlock> = sizes
            .iter()
            .enumerate()
            .map(|(index, size)| ClauseBlock::new(format!("{index}|{}", "y".repeat(*size))))
            .collect();

        let pagination = Paginator::new(limits).paginate(blocks.clone(), true);
        let flattened: Vec<ClauseBlock> = pagination.pages.iter().flatten().cloned().collect();
        assert_eq!(flattened, blocks);

        for (index, page) in pagination.pages.iter().enumerate() {
            let size: usize = page.iter().map(ClauseBlock::estimated_size).sum();
            assert!(!page.is_empty());
            assert!(size <= limits.max_page_size || page.len() == 1);
            if let Some(next) = pagination.pages.get(index + 1) {
                // The next page's first block would not have fit here.
                assert!(size + next[0].estimated_size() > limits.max_page_size);
            }
        }
    }
}
