use serde::{Deserialize, Serialize};

use super::page::{Page, PageKind};
use crate::workflows::contract::clauses::ClauseBlock;

/// Structural rules every assembled contract must satisfy.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DocumentInvariantError {
    #[error("expected exactly one cover page as the first page, found {found} cover page(s)")]
    Cover { found: usize },
    #[error("expected at most one signature-only page, found {found}")]
    SignatureOnlyPages { found: usize },
    #[error("expected exactly one closing signature block after the cover, found {found}")]
    ClosingSignatures { found: usize },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContractDocument {
    pages: Vec<Page>,
}

impl ContractDocument {
    pub fn new(pages: Vec<Page>) -> Self {
        Self { pages }
    }

    pub fn pages(&self) -> &[Page] {
        &self.pages
    }

    pub fn into_pages(self) -> Vec<Page> {
        self.pages
    }

    pub fn clause_pages(&self) -> impl Iterator<Item = &Page> {
        self.pages
            .iter()
            .filter(|page| page.kind() == PageKind::ClauseContent)
    }

    /// Every clause block across all pages, in print order.
    pub fn clause_blocks(&self) -> impl Iterator<Item = &ClauseBlock> {
        self.pages.iter().flat_map(|page| page.clause_blocks())
    }

    pub fn check_invariants(&self) -> Result<(), DocumentInvariantError> {
        let covers = self
            .pages
            .iter()
            .filter(|page| page.kind() == PageKind::Cover)
            .count();
        let cover_first = self
            .pages
            .first()
            .map(|page| page.kind() == PageKind::Cover)
            .unwrap_or(false);
        if covers != 1 || !cover_first {
            return Err(DocumentInvariantError::Cover { found: covers });
        }

        let signature_only = self
            .pages
            .iter()
            .filter(|page| page.kind() == PageKind::SignatureOnly)
            .count();
        if signature_only > 1 {
            return Err(DocumentInvariantError::SignatureOnlyPages {
                found: signature_only,
            });
        }

        let closing = self
            .pages
            .iter()
            .filter(|page| page.kind() != PageKind::Cover && page.has_signature_block())
            .count();
        if closing != 1 {
            return Err(DocumentInvariantError::ClosingSignatures { found: closing });
        }

        Ok(())
    }

    pub fn summary(&self) -> DocumentSummary {
        let signature_page = self
            .pages
            .iter()
            .enumerate()
            .skip(1)
            .find(|(_, page)| page.has_signature_block())
            .map(|(index, _)| index + 1);

        let signature_shares_last_page = self
            .pages
            .last()
            .map(|page| page.kind() == PageKind::ClauseContent && page.has_signature_block())
            .unwrap_or(false);

        DocumentSummary {
            page_count: self.pages.len(),
            clause_page_count: self.clause_pages().count(),
            signature_page,
            signature_shares_last_page,
            clauses_missing: self.pages.iter().any(Page::is_placeholder),
            total_clause_size: self.pages.iter().map(Page::clause_size).sum(),
        }
    }
}

/// Compact description of an assembled document for logs and API responses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentSummary {
    pub page_count: usize,
    pub clause_page_count: usize,
    /// 1-based page number carrying the closing signature block.
    pub signature_page: Option<usize>,
    pub signature_shares_last_page: bool,
    pub clauses_missing: bool,
    pub total_clause_size: usize,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::workflows::contract::layout::page::{PageBlock, SignatureBlock};

    fn signature() -> PageBlock {
        PageBlock::Signature(SignatureBlock {
            place_and_date: "____".to_string(),
            signatories: Vec::new(),
        })
    }

    fn clause_page(with_signature: bool) -> Page {
        let mut blocks = vec![PageBlock::Clause(ClauseBlock::new("<p>texto</p>"))];
        if with_signature {
            blocks.push(signature());
        }
        Page::new(PageKind::ClauseContent, blocks, true)
    }

    #[test]
    fn valid_document_passes_and_summarizes() {
        let document = ContractDocument::new(vec![
            Page::new(PageKind::Cover, vec![signature()], true),
            clause_page(false),
            clause_page(true),
        ]);

        assert_eq!(document.check_invariants(), Ok(()));
        let summary = document.summary();
        assert_eq!(summary.page_count, 3);
        assert_eq!(summary.clause_page_count, 2);
        assert_eq!(summary.signature_page, Some(3));
        assert!(summary.signature_shares_last_page);
        assert!(!summary.clauses_missing);
        assert_eq!(summary.total_clause_size, 10);
    }

    #[test]
    fn missing_closing_signature_is_reported() {
        let document = ContractDocument::new(vec![
            Page::new(PageKind::Cover, vec![signature()], true),
            clause_page(false),
        ]);

        assert_eq!(
            document.check_invariants(),
            Err(DocumentInvariantError::ClosingSignatures { found: 0 })
        );
    }

    #[test]
    fn duplicate_closing_signatures_are_reported() {
        let document = ContractDocument::new(vec![
            Page::new(PageKind::Cover, Vec::new(), true),
            clause_page(true),
            Page::new(PageKind::SignatureOnly, vec![signature()], false),
        ]);

        assert_eq!(
            document.check_invariants(),
            Err(DocumentInvariantError::ClosingSignatures { found: 2 })
        );
    }

    #[test]
    fn cover_must_lead_the_document() {
        let document = ContractDocument::new(vec![
            clause_page(true),
            Page::new(PageKind::Cover, Vec::new(), true),
        ]);

        assert_eq!(
            document.check_invariants(),
            Err(DocumentInvariantError::Cover { found: 1 })
        );
    }

    #[test]
    fn page_flag_follows_blocks() {
        assert!(clause_page(true).has_signature_block());
        assert!(!clause_page(false).has_signature_block());
    }
}
