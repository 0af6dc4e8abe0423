//! Seam toward the output generator. The core only produces a [`ContractDocument`];
//! anything that lays it out on paper implements [`DocumentRenderer`].

use rust_decimal::Decimal;
use serde::Serialize;

use super::bonus::BonusDisplay;
use super::clauses::strip_markup;
use super::layout::{ContractDocument, Page, PageBlock, PageKind, SignatureBlock};
use super::payments::PaymentGroup;

#[derive(Debug, thiserror::Error)]
pub enum RenderError {
    #[error("document has no pages to render")]
    EmptyDocument,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RenderedPage {
    pub number: usize,
    pub kind: PageKind,
    pub body: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RenderedDocument {
    pub pages: Vec<RenderedPage>,
}

impl RenderedDocument {
    pub fn to_text(&self) -> String {
        self.pages
            .iter()
            .map(|page| {
                format!(
                    "=== Page {} ({}) ===\n{}",
                    page.number,
                    page.kind.label(),
                    page.body
                )
            })
            .collect::<Vec<_>>()
            .join("\n")
    }
}

pub trait DocumentRenderer: Send + Sync {
    fn render(&self, document: &ContractDocument) -> Result<RenderedDocument, RenderError>;
}

/// Plain-text rendition used for previews.
#[derive(Debug, Default, Clone, Copy)]
pub struct TextPreviewRenderer;

impl DocumentRenderer for TextPreviewRenderer {
    fn render(&self, document: &ContractDocument) -> Result<RenderedDocument, RenderError> {
        if document.pages().is_empty() {
            return Err(RenderError::EmptyDocument);
        }

        let pages = document
            .pages()
            .iter()
            .enumerate()
            .map(|(index, page)| RenderedPage {
                number: index + 1,
                kind: page.kind(),
                body: render_page(page),
            })
            .collect();

        Ok(RenderedDocument { pages })
    }
}

fn render_page(page: &Page) -> String {
    let mut out = String::new();
    for block in page.blocks() {
        match block {
            PageBlock::Heading { text } => push_line(&mut out, &text.to_uppercase()),
            PageBlock::Fields { title, rows } => {
                push_line(&mut out, &format!("[{title}]"));
                for row in rows {
                    push_line(&mut out, &format!("{}: {}", row.label, row.value));
                }
            }
            PageBlock::Payments {
                groups,
                grand_total,
                bank_slip_due_date,
            } => render_payments(&mut out, groups, *grand_total, bank_slip_due_date.as_deref()),
            PageBlock::Bonuses { entries } => render_bonuses(&mut out, entries),
            PageBlock::Clause(clause) => {
                for line in strip_markup(clause.raw_markup()).lines() {
                    let line = line.trim();
                    if !line.is_empty() {
                        push_line(&mut out, line);
                    }
                }
            }
            PageBlock::ClausesMissing { message } => push_line(&mut out, &format!("!! {message}")),
            PageBlock::Signature(signature) => render_signature(&mut out, signature),
        }
    }
    if page.has_footer_logo() {
        push_line(&mut out, "[logo]");
    }
    out
}

fn render_payments(
    out: &mut String,
    groups: &[PaymentGroup],
    grand_total: Decimal,
    bank_slip_due_date: Option<&str>,
) {
    push_line(out, "[Payment]");
    for group in groups {
        push_line(out, &format!("- {}", group.describe()));
    }
    push_line(out, &format!("Total: {grand_total:.2}"));
    if let Some(due) = bank_slip_due_date {
        push_line(out, &format!("First bank slip due: {due}"));
    }
}

fn render_bonuses(out: &mut String, entries: &[BonusDisplay]) {
    push_line(out, "[Bonuses]");
    for entry in entries {
        let mark = if entry.checked { "x" } else { " " };
        match &entry.detail_text {
            Some(detail) => push_line(out, &format!("({mark}) {}: {detail}", entry.label)),
            None => push_line(out, &format!("({mark}) {}", entry.label)),
        }
    }
}

fn render_signature(out: &mut String, signature: &SignatureBlock) {
    push_line(out, &signature.place_and_date);
    for signatory in &signature.signatories {
        let document = signatory
            .document
            .as_deref()
            .map(|document| format!(" ({document})"))
            .unwrap_or_default();
        push_line(
            out,
            &format!(
                "________________ {}: {}{document}",
                signatory.role.label(),
                signatory.name
            ),
        );
    }
}

fn push_line(out: &mut String, line: &str) {
    out.push_str(line);
    out.push('\n');
}
