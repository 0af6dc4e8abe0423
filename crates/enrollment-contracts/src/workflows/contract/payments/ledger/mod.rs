//! Payment ledger CSV import.
//!
//! Finance exports the payment plan as a spreadsheet with one row per installment. The
//! importer maps the free-text method/billing columns onto typed enums and leaves the
//! amount untouched so the aggregator's permissive amount rules still apply.

mod mapping;
mod parser;

use std::io::Read;
use std::path::Path;

use super::{RawAmount, RawPaymentEntry};

#[derive(Debug, thiserror::Error)]
pub enum LedgerImportError {
    #[error("failed to read payment ledger: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid payment ledger CSV data: {0}")]
    Csv(#[from] csv::Error),
    #[error("row {row}: unknown payment method '{value}'")]
    UnknownMethod { row: usize, value: String },
    #[error("row {row}: unknown billing type '{value}'")]
    UnknownBilling { row: usize, value: String },
}

pub struct PaymentLedgerImporter;

impl PaymentLedgerImporter {
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Vec<RawPaymentEntry>, LedgerImportError> {
        let file = std::fs::File::open(path)?;
        Self::from_reader(file)
    }

    pub fn from_reader<R: Read>(reader: R) -> Result<Vec<RawPaymentEntry>, LedgerImportError> {
        let mut entries = Vec::new();

        for (index, row) in parser::parse_rows(reader)?.into_iter().enumerate() {
            // Header is line 1.
            let line = index + 2;
            let method = mapping::method_for_label(&row.method).ok_or_else(|| {
                LedgerImportError::UnknownMethod {
                    row: line,
                    value: row.method.clone(),
                }
            })?;
            let billing = mapping::billing_for_label(&row.billing).ok_or_else(|| {
                LedgerImportError::UnknownBilling {
                    row: line,
                    value: row.billing.clone(),
                }
            })?;

            entries.push(RawPaymentEntry {
                method,
                billing,
                amount: row
                    .amount
                    .map(RawAmount::Text)
                    .unwrap_or_default(),
            });
        }

        Ok(entries)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::workflows::contract::payments::{
        BillingType, PaymentAggregator, PaymentMethod,
    };
    use rust_decimal::Decimal;
    use std::io::Cursor;

    #[test]
    fn imports_rows_with_portuguese_headers_and_labels() {
        let csv = "Forma de Pagamento,Tipo,Valor\n\
Cartão de Crédito,Parcelado,\"1.000,00\"\n\
Cartão de Crédito,Parcelado,\"1.000,00\"\n\
PIX,À vista,500\n";
        let entries = PaymentLedgerImporter::from_reader(Cursor::new(csv)).expect("ledger imports");

        assert_eq!(entries.len(), 3);
        assert_eq!(entries[0].method, PaymentMethod::CreditCard);
        assert_eq!(entries[0].billing, BillingType::Installment);
        assert_eq!(entries[2].method, PaymentMethod::Pix);
        assert_eq!(entries[2].billing, BillingType::Upfront);

        let summary = PaymentAggregator.summarize(&entries);
        assert_eq!(summary.grand_total, Decimal::from(2500));
    }

    #[test]
    fn blank_amounts_survive_import_and_are_skipped_later() {
        let csv = "Method,Billing,Amount\nboleto,installment,\nboleto,installment,300\n";
        let entries = PaymentLedgerImporter::from_reader(Cursor::new(csv)).expect("ledger imports");

        assert_eq!(entries.len(), 2);
        let summary = PaymentAggregator.summarize(&entries);
        assert_eq!(summary.groups[0].installment_count, 1);
        assert_eq!(summary.skipped_entries, 1);
    }

    #[test]
    fn unknown_method_reports_row_number() {
        let csv = "Method,Billing,Amount\npix,upfront,10\ncheque,upfront,10\n";
        let error = PaymentLedgerImporter::from_reader(Cursor::new(csv))
            .expect_err("unknown method rejected");

        match error {
            LedgerImportError::UnknownMethod { row, value } => {
                assert_eq!(row, 3);
                assert_eq!(value, "cheque");
            }
            other => panic!("expected unknown method, got {other:?}"),
        }
    }

    #[test]
    fn from_path_propagates_io_errors() {
        let error = PaymentLedgerImporter::from_path("./does-not-exist.csv")
            .expect_err("expected io error");
        assert!(matches!(error, LedgerImportError::Io(_)));
    }
}
