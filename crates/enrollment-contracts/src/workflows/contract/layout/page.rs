use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::workflows::contract::bonus::BonusDisplay;
use crate::workflows::contract::clauses::ClauseBlock;
use crate::workflows::contract::payments::PaymentGroup;
use crate::workflows::contract::record::ImageRef;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PageKind {
    Cover,
    ClauseContent,
    SignatureOnly,
}

impl PageKind {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Cover => "Cover",
            Self::ClauseContent => "Clauses",
            Self::SignatureOnly => "Signatures",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldRow {
    pub label: String,
    pub value: String,
}

impl FieldRow {
    pub fn new(label: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            value: value.into(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SignatoryRole {
    Student,
    Contractor,
    Witness,
}

impl SignatoryRole {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Student => "Student",
            Self::Contractor => "Contractor",
            Self::Witness => "Witness",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Signatory {
    pub role: SignatoryRole,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub document: Option<String>,
    /// Captured signature image, passed through untouched.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<ImageRef>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SignatureBlock {
    pub place_and_date: String,
    pub signatories: Vec<Signatory>,
}

/// Content fragment laid out by the external renderer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum PageBlock {
    Heading {
        text: String,
    },
    Fields {
        title: String,
        rows: Vec<FieldRow>,
    },
    Payments {
        groups: Vec<PaymentGroup>,
        grand_total: Decimal,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        bank_slip_due_date: Option<String>,
    },
    Bonuses {
        entries: Vec<BonusDisplay>,
    },
    Clause(ClauseBlock),
    ClausesMissing {
        message: String,
    },
    Signature(SignatureBlock),
}

impl PageBlock {
    pub fn is_signature(&self) -> bool {
        matches!(self, PageBlock::Signature(_))
    }
}

/// A terminal output unit. The signature flag is derived from the blocks so the two
/// can never disagree; deserialization recomputes it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "PageParts")]
pub struct Page {
    kind: PageKind,
    blocks: Vec<PageBlock>,
    has_footer_logo: bool,
    has_signature_block: bool,
}

#[derive(Deserialize)]
struct PageParts {
    kind: PageKind,
    blocks: Vec<PageBlock>,
    has_footer_logo: bool,
}

impl From<PageParts> for Page {
    fn from(parts: PageParts) -> Self {
        Page::new(parts.kind, parts.blocks, parts.has_footer_logo)
    }
}

impl Page {
    pub fn new(kind: PageKind, blocks: Vec<PageBlock>, has_footer_logo: bool) -> Self {
        let has_signature_block = blocks.iter().any(PageBlock::is_signature);
        Self {
            kind,
            blocks,
            has_footer_logo,
            has_signature_block,
        }
    }

    pub fn kind(&self) -> PageKind {
        self.kind
    }

    pub fn blocks(&self) -> &[PageBlock] {
        &self.blocks
    }

    pub fn has_footer_logo(&self) -> bool {
        self.has_footer_logo
    }

    pub fn has_signature_block(&self) -> bool {
        self.has_signature_block
    }

    pub fn clause_blocks(&self) -> impl Iterator<Item = &ClauseBlock> {
        self.blocks.iter().filter_map(|block| match block {
            PageBlock::Clause(clause) => Some(clause),
            _ => None,
        })
    }

    pub fn clause_size(&self) -> usize {
        self.clause_blocks().map(ClauseBlock::estimated_size).sum()
    }

    pub fn is_placeholder(&self) -> bool {
        self.blocks
            .iter()
            .any(|block| matches!(block, PageBlock::ClausesMissing { .. }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn signature_flag_is_recomputed_on_deserialize() {
        let page: Page = serde_json::from_value(json!({
            "kind": "signature_only",
            "blocks": [{
                "type": "signature",
                "place_and_date": "____, ____",
                "signatories": [],
            }],
            "has_footer_logo": false,
            "has_signature_block": false,
        }))
        .expect("page parses");

        assert!(page.has_signature_block());
    }

    #[test]
    fn serialized_page_round_trips() {
        let page = Page::new(
            PageKind::ClauseContent,
            vec![PageBlock::Clause(ClauseBlock::new("<p>CLÁUSULA 1</p>"))],
            true,
        );
        let value = serde_json::to_value(&page).expect("page serializes");

        assert_eq!(value["has_signature_block"], json!(false));
        assert_eq!(serde_json::from_value::<Page>(value).expect("page parses"), page);
    }
}
