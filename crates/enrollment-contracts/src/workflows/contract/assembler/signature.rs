use crate::workflows::contract::layout::{Signatory, SignatoryRole, SignatureBlock};
use crate::workflows::contract::record::{EnrollmentRecord, ImageRef, Witness};

const BLANK: &str = "____";

/// Student and contractor lines printed on the cover.
pub(super) fn primary_signatures(record: &EnrollmentRecord) -> SignatureBlock {
    SignatureBlock {
        place_and_date: place_and_date(record),
        signatories: vec![student(record), contractor(record)],
    }
}

/// Closing block: both parties plus the two witness lines, blank when unnamed.
pub(super) fn closing_signatures(record: &EnrollmentRecord) -> SignatureBlock {
    let images = &record.signatures;
    let [first, second] = record.witnesses.pair();

    SignatureBlock {
        place_and_date: place_and_date(record),
        signatories: vec![
            student(record),
            contractor(record),
            witness(first, images.first_witness.as_ref()),
            witness(second, images.second_witness.as_ref()),
        ],
    }
}

fn student(record: &EnrollmentRecord) -> Signatory {
    Signatory {
        role: SignatoryRole::Student,
        name: or_blank(Some(record.student.name.as_str())),
        document: record.student.document.clone(),
        image: record.signatures.student.clone(),
    }
}

fn contractor(record: &EnrollmentRecord) -> Signatory {
    Signatory {
        role: SignatoryRole::Contractor,
        name: or_blank(Some(record.contractor.name.as_str())),
        document: record.contractor.document.clone(),
        image: record.signatures.contractor.clone(),
    }
}

fn witness(witness: Option<&Witness>, image: Option<&ImageRef>) -> Signatory {
    Signatory {
        role: SignatoryRole::Witness,
        name: or_blank(witness.and_then(|witness| witness.name.as_deref())),
        document: witness.and_then(|witness| witness.document.clone()),
        image: image.cloned(),
    }
}

fn place_and_date(record: &EnrollmentRecord) -> String {
    let city = or_blank(record.fields.contract_city.as_deref());
    let date = record
        .fields
        .issued_on
        .map(|date| date.format("%d/%m/%Y").to_string())
        .unwrap_or_else(|| BLANK.to_string());
    format!("{city}, {date}")
}

pub(super) fn or_blank(value: Option<&str>) -> String {
    value
        .map(str::trim)
        .filter(|value| !value.is_empty())
        .unwrap_or(BLANK)
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn record(value: serde_json::Value) -> EnrollmentRecord {
        serde_json::from_value(value).expect("record parses")
    }

    #[test]
    fn closing_block_always_lists_two_witness_lines() {
        let record = record(json!({
            "student": { "name": "Ana Souza", "document": "123.456.789-00" },
            "program": { "name": "Formação" },
            "witnesses": { "first": { "name": "Carlos Lima" } },
            "signatures": { "student": "s3://signatures/ana.png" },
        }));

        let block = closing_signatures(&record);
        let roles: Vec<SignatoryRole> = block.signatories.iter().map(|line| line.role).collect();
        assert_eq!(
            roles,
            vec![
                SignatoryRole::Student,
                SignatoryRole::Contractor,
                SignatoryRole::Witness,
                SignatoryRole::Witness,
            ]
        );
        assert_eq!(block.signatories[0].image, Some(ImageRef("s3://signatures/ana.png".into())));
        assert_eq!(block.signatories[1].name, "____");
        assert_eq!(block.signatories[2].name, "Carlos Lima");
        assert_eq!(block.signatories[3].name, "____");
    }

    #[test]
    fn place_and_date_uses_city_and_issue_date() {
        let record = record(json!({
            "student": { "name": "Ana" },
            "program": { "name": "Formação" },
            "fields": { "contract_city": "Curitiba", "issued_on": "2026-02-01" },
        }));

        assert_eq!(primary_signatures(&record).place_and_date, "Curitiba, 01/02/2026");
    }

    #[test]
    fn missing_place_and_date_render_blank() {
        let record = record(json!({
            "student": { "name": "Ana" },
            "program": { "name": "Formação" },
        }));

        let block = primary_signatures(&record);
        assert_eq!(block.place_and_date, "____, ____");
        assert_eq!(block.signatories.len(), 2);
    }
}
