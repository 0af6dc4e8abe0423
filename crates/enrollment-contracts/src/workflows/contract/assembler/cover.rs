use chrono::NaiveDate;

use super::signature::{or_blank, primary_signatures};
use crate::workflows::contract::bonus::BonusResolver;
use crate::workflows::contract::layout::{FieldRow, Page, PageBlock, PageKind};
use crate::workflows::contract::lookup::BANK_SLIP_DUE_DATE;
use crate::workflows::contract::payments::{PaymentAggregator, PaymentMethod};
use crate::workflows::contract::record::{EnrollmentRecord, Witness};

pub(super) const CONTRACT_TITLE: &str = "Educational Services Enrollment Contract";

pub(super) fn cover_page(record: &EnrollmentRecord, with_signature: bool) -> Page {
    let mut blocks = vec![
        PageBlock::Heading {
            text: CONTRACT_TITLE.to_string(),
        },
        identification(record),
        training(record),
        payments(record),
        PageBlock::Bonuses {
            entries: BonusResolver.resolve(&record.bonus, immersion_start(record)),
        },
        witnesses(record),
    ];
    if with_signature {
        blocks.push(PageBlock::Signature(primary_signatures(record)));
    }

    Page::new(PageKind::Cover, blocks, true)
}

fn identification(record: &EnrollmentRecord) -> PageBlock {
    let student = &record.student;
    PageBlock::Fields {
        title: "Student identification".to_string(),
        rows: vec![
            FieldRow::new("Name", or_blank(Some(student.name.as_str()))),
            FieldRow::new("Document", or_blank(student.document.as_deref())),
            FieldRow::new("Birth date", date_or_blank(student.birth_date)),
            FieldRow::new("Email", or_blank(student.email.as_deref())),
            FieldRow::new("Phone", or_blank(student.phone.as_deref())),
            FieldRow::new("Address", or_blank(student.address.as_deref())),
        ],
    }
}

fn training(record: &EnrollmentRecord) -> PageBlock {
    let program = &record.program;
    let workload = program
        .workload_hours
        .map(|hours| format!("{hours} h"))
        .unwrap_or_else(|| or_blank(None));
    let immersion = program
        .immersion_event
        .as_ref()
        .map(|event| match event.start_date {
            Some(date) => format!("{} ({})", event.name.trim(), date.format("%d/%m/%Y")),
            None => event.name.trim().to_string(),
        });

    PageBlock::Fields {
        title: "Training".to_string(),
        rows: vec![
            FieldRow::new("Program", or_blank(Some(program.name.as_str()))),
            FieldRow::new("Modality", or_blank(program.modality.as_deref())),
            FieldRow::new("Start date", date_or_blank(program.start_date)),
            FieldRow::new("Workload", workload),
            FieldRow::new("Immersion event", or_blank(immersion.as_deref())),
        ],
    }
}

fn payments(record: &EnrollmentRecord) -> PageBlock {
    let summary = PaymentAggregator.summarize(&record.payments);
    let bank_slip_due_date = summary
        .groups
        .iter()
        .any(|group| group.method == PaymentMethod::BankSlip)
        .then(|| BANK_SLIP_DUE_DATE.resolve(&record.fields))
        .flatten()
        .map(|resolved| resolved.value);

    PageBlock::Payments {
        groups: summary.groups,
        grand_total: summary.grand_total,
        bank_slip_due_date,
    }
}

fn witnesses(record: &EnrollmentRecord) -> PageBlock {
    let row = |label: &str, witness: Option<&Witness>| {
        let name = or_blank(witness.and_then(|witness| witness.name.as_deref()));
        let document = or_blank(witness.and_then(|witness| witness.document.as_deref()));
        FieldRow::new(label, format!("{name} / {document}"))
    };
    let [first, second] = record.witnesses.pair();

    PageBlock::Fields {
        title: "Witnesses".to_string(),
        rows: vec![row("Witness 1", first), row("Witness 2", second)],
    }
}

fn immersion_start(record: &EnrollmentRecord) -> Option<NaiveDate> {
    record
        .program
        .immersion_event
        .as_ref()
        .and_then(|event| event.start_date)
}

fn date_or_blank(date: Option<NaiveDate>) -> String {
    date.map(|date| date.format("%d/%m/%Y").to_string())
        .unwrap_or_else(|| or_blank(None))
}
