use std::sync::Arc;

use rust_decimal::Decimal;
use serde_json::Value;

use super::common::*;
use crate::workflows::contract::assembler::DocumentAssembler;
use crate::workflows::contract::layout::{PageBlock, PageKind};
use crate::workflows::contract::record::EnrollmentId;
use crate::workflows::contract::service::{ContractService, ContractServiceError};

#[test]
fn document_for_assembles_stored_enrollment() {
    let service = build_service();
    let document = service
        .document_for(&EnrollmentId("enr-0042".to_string()))
        .expect("document assembled");

    assert_eq!(document.check_invariants(), Ok(()));
    assert_eq!(document.pages()[0].kind(), PageKind::Cover);

    let (groups, grand_total) = document.pages()[0]
        .blocks()
        .iter()
        .find_map(|block| match block {
            PageBlock::Payments {
                groups,
                grand_total,
                ..
            } => Some((groups.clone(), *grand_total)),
            _ => None,
        })
        .expect("payments on cover");
    assert_eq!(groups.len(), 2);
    assert_eq!(groups[0].total_amount, Decimal::new(500, 0));
    assert_eq!(groups[0].per_installment_amount, Some(Decimal::new(250, 0)));
    assert_eq!(grand_total, Decimal::new(1000, 0));
}

#[test]
fn unknown_enrollment_is_not_found() {
    let service = build_service();
    let result = service.document_for(&EnrollmentId("missing".to_string()));

    assert!(matches!(result, Err(ContractServiceError::NotFound(id)) if id.0 == "missing"));
}

#[test]
fn source_failures_surface_as_source_errors() {
    let service = ContractService::new(
        Arc::new(UnavailableSource),
        Arc::new(DocumentAssembler::default()),
    );
    let result = service.document_for(&EnrollmentId("enr-0042".to_string()));

    assert!(matches!(result, Err(ContractServiceError::Source(_))));
}

#[test]
fn null_payload_is_an_assembly_error() {
    let service = build_service();
    assert!(matches!(
        service.assemble_payload(Value::Null),
        Err(ContractServiceError::Assembly(_))
    ));
}
