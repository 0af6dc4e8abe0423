use crate::infra::{demo_record, load_record, parse_date};
use chrono::NaiveDate;
use clap::Args;
use enrollment_contracts::config::LayoutConfig;
use enrollment_contracts::error::AppError;
use enrollment_contracts::workflows::contract::layout::PageBlock;
use enrollment_contracts::workflows::contract::{
    ContractDocument, DocumentAssembler, DocumentRenderer, EnrollmentRecord, TextPreviewRenderer,
};
use std::path::PathBuf;

#[derive(Args, Debug)]
pub(crate) struct AssembleArgs {
    /// Enrollment record JSON file
    #[arg(long)]
    pub(crate) record: PathBuf,
    /// Optional payment ledger CSV replacing the record's payments
    #[arg(long)]
    pub(crate) ledger: Option<PathBuf>,
    /// Override the issue date printed next to the signatures (YYYY-MM-DD)
    #[arg(long, value_parser = parse_date)]
    pub(crate) issued_on: Option<NaiveDate>,
    /// Pretty-print the JSON output
    #[arg(long)]
    pub(crate) pretty: bool,
}

#[derive(Args, Debug)]
pub(crate) struct PreviewArgs {
    /// Enrollment record JSON file
    #[arg(long)]
    pub(crate) record: PathBuf,
    /// Optional payment ledger CSV replacing the record's payments
    #[arg(long)]
    pub(crate) ledger: Option<PathBuf>,
    /// Override the issue date printed next to the signatures (YYYY-MM-DD)
    #[arg(long, value_parser = parse_date)]
    pub(crate) issued_on: Option<NaiveDate>,
}

#[derive(Args, Debug, Default)]
pub(crate) struct DemoArgs {
    /// Include the plain-text page preview in the demo output.
    #[arg(long)]
    pub(crate) preview: bool,
}

pub(crate) fn run_assemble(args: AssembleArgs) -> Result<(), AppError> {
    let AssembleArgs {
        record,
        ledger,
        issued_on,
        pretty,
    } = args;

    let mut record = load_record(&record, ledger.as_deref())?;
    if issued_on.is_some() {
        record.fields.issued_on = issued_on;
    }

    let document = configured_assembler()?.assemble(&record);
    let json = if pretty {
        serde_json::to_string_pretty(&document)?
    } else {
        serde_json::to_string(&document)?
    };
    println!("{json}");
    Ok(())
}

pub(crate) fn run_preview(args: PreviewArgs) -> Result<(), AppError> {
    let PreviewArgs {
        record,
        ledger,
        issued_on,
    } = args;

    let mut record = load_record(&record, ledger.as_deref())?;
    if issued_on.is_some() {
        record.fields.issued_on = issued_on;
    }

    let document = configured_assembler()?.assemble(&record);
    println!("{}", preview_text(&document)?);
    Ok(())
}

pub(crate) fn run_demo(args: DemoArgs) -> Result<(), AppError> {
    let record = demo_record()?;
    let document = configured_assembler()?.assemble(&record);

    println!("Enrollment contract demo");
    for line in walkthrough(&record, &document) {
        println!("{line}");
    }

    if args.preview {
        println!("\n{}", preview_text(&document)?);
    }
    Ok(())
}

fn configured_assembler() -> Result<DocumentAssembler, AppError> {
    let layout = LayoutConfig::from_env()?;
    Ok(DocumentAssembler::new(layout.assembly()))
}

fn preview_text(document: &ContractDocument) -> Result<String, AppError> {
    Ok(TextPreviewRenderer.render(document)?.to_text())
}

fn walkthrough(record: &EnrollmentRecord, document: &ContractDocument) -> Vec<String> {
    let summary = document.summary();
    let mut lines = vec![
        format!(
            "- Enrollment {} for {} ({})",
            record.enrollment_id, record.student.name, record.program.name
        ),
        format!(
            "- {} page(s): 1 cover, {} clause page(s), {} clause characters",
            summary.page_count, summary.clause_page_count, summary.total_clause_size
        ),
        match (summary.signature_page, summary.signature_shares_last_page) {
            (Some(page), true) => format!("- Signatures share the last clause page (page {page})"),
            (Some(page), false) => format!("- Signatures on a dedicated page (page {page})"),
            (None, _) => "- Signature page missing".to_string(),
        },
    ];
    if summary.clauses_missing {
        lines.push("- Clauses missing: placeholder page emitted".to_string());
    }

    let cover_blocks = document
        .pages()
        .first()
        .map(|page| page.blocks())
        .unwrap_or_default();
    for block in cover_blocks {
        match block {
            PageBlock::Payments {
                groups,
                grand_total,
                bank_slip_due_date,
            } => {
                lines.push(format!("Payment plan (total {grand_total:.2}):"));
                lines.extend(groups.iter().map(|group| format!("  - {}", group.describe())));
                if let Some(due) = bank_slip_due_date {
                    lines.push(format!("  First bank slip due {due}"));
                }
            }
            PageBlock::Bonuses { entries } => {
                lines.push("Bonuses:".to_string());
                lines.extend(entries.iter().filter(|entry| entry.checked).map(|entry| {
                    match &entry.detail_text {
                        Some(detail) => format!("  - {}: {detail}", entry.label),
                        None => format!("  - {}", entry.label),
                    }
                }));
            }
            _ => {}
        }
    }

    lines
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn walkthrough_describes_the_demo_contract() {
        let record = demo_record().expect("demo record parses");
        let document = DocumentAssembler::default().assemble(&record);
        let lines = walkthrough(&record, &document);

        assert!(lines[0].contains("enr-demo-001"));
        assert_eq!(lines[2], "- Signatures share the last clause page (page 2)");
        assert!(lines.iter().any(|line| line == "Payment plan (total 2400.00):"));
        assert!(lines
            .iter()
            .any(|line| line == "  - Credit card - 4 x 412.50 (total 1650.00)"));
        assert!(lines.iter().any(|line| line == "  First bank slip due 10/03/2026"));
        assert!(lines.iter().any(|line| line.starts_with("  - Immersion event: 2 enrollment(s)")));
    }

    #[test]
    fn preview_text_starts_with_cover() {
        let document = DocumentAssembler::default().assemble(&demo_record().expect("demo record"));
        let text = preview_text(&document).expect("preview renders");
        assert!(text.starts_with("=== Page 1 (Cover) ==="));
    }
}
