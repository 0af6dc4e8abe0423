use enrollment_contracts::workflows::contract::{
    BillingType, LedgerImportError, PaymentAggregator, PaymentLedgerImporter, PaymentMethod,
};
use rust_decimal::Decimal;

#[test]
fn fixture_ledger_feeds_the_aggregator() {
    let data = include_bytes!("../fixtures/payment_ledger.csv");
    let entries = PaymentLedgerImporter::from_reader(&data[..]).expect("ledger imports");
    assert_eq!(entries.len(), 9);

    let summary = PaymentAggregator.summarize(&entries);
    assert_eq!(summary.skipped_entries, 2);
    assert_eq!(summary.grand_total, Decimal::new(2400, 0));

    let keys: Vec<(PaymentMethod, BillingType, u32)> = summary
        .groups
        .iter()
        .map(|group| (group.method, group.billing, group.installment_count))
        .collect();
    assert_eq!(
        keys,
        vec![
            (PaymentMethod::CreditCard, BillingType::Installment, 4),
            (PaymentMethod::Pix, BillingType::Upfront, 1),
            (PaymentMethod::BankSlip, BillingType::Installment, 2),
        ]
    );
    assert_eq!(
        summary.groups[0].per_installment_amount,
        Some(Decimal::new(41250, 2))
    );
}

#[test]
fn from_path_reads_files_and_reports_missing_ones() {
    let path = concat!(env!("CARGO_MANIFEST_DIR"), "/fixtures/payment_ledger.csv");
    assert_eq!(
        PaymentLedgerImporter::from_path(path)
            .expect("ledger imports")
            .len(),
        9
    );

    let missing = PaymentLedgerImporter::from_path("fixtures/does-not-exist.csv");
    assert!(matches!(missing, Err(LedgerImportError::Io(_))));
}

#[test]
fn unknown_labels_point_at_the_offending_row() {
    let csv = "Method,Billing,Amount\npix,upfront,10\ncheque,upfront,20\n";
    let error = PaymentLedgerImporter::from_reader(csv.as_bytes()).expect_err("import fails");

    match error {
        LedgerImportError::UnknownMethod { row, value } => {
            assert_eq!(row, 3);
            assert_eq!(value, "cheque");
        }
        other => panic!("unexpected error {other:?}"),
    }
}
