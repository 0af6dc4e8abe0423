use chrono::NaiveDate;
use enrollment_contracts::error::AppError;
use enrollment_contracts::workflows::contract::payments::ledger::PaymentLedgerImporter;
use enrollment_contracts::workflows::contract::{
    AssemblyError, EnrollmentId, EnrollmentRecord, EnrollmentSource, SourceError,
};
use metrics_exporter_prometheus::PrometheusHandle;
use std::collections::HashMap;
use std::path::Path;
use std::sync::atomic::AtomicBool;
use std::sync::{Arc, Mutex};

const DEMO_ENROLLMENT: &str =
    include_str!("../../../crates/enrollment-contracts/fixtures/demo_enrollment.json");

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

#[derive(Default, Clone)]
pub(crate) struct InMemoryEnrollmentSource {
    records: Arc<Mutex<HashMap<EnrollmentId, EnrollmentRecord>>>,
}

impl InMemoryEnrollmentSource {
    pub(crate) fn seeded(records: impl IntoIterator<Item = EnrollmentRecord>) -> Self {
        let source = Self::default();
        for record in records {
            source.insert(record);
        }
        source
    }

    pub(crate) fn insert(&self, record: EnrollmentRecord) {
        let mut guard = match self.records.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };
        guard.insert(record.enrollment_id.clone(), record);
    }
}

impl EnrollmentSource for InMemoryEnrollmentSource {
    fn fetch(&self, id: &EnrollmentId) -> Result<Option<EnrollmentRecord>, SourceError> {
        let guard = self
            .records
            .lock()
            .map_err(|_| SourceError::Unavailable("enrollment store lock poisoned".to_string()))?;
        Ok(guard.get(id).cloned())
    }
}

/// Enrollment bundled with the service for demos and smoke tests.
pub(crate) fn demo_record() -> Result<EnrollmentRecord, AppError> {
    serde_json::from_str(DEMO_ENROLLMENT).map_err(AppError::from)
}

/// Reads an enrollment record from disk, optionally replacing its payments with a CSV
/// ledger export.
pub(crate) fn load_record(
    record_path: &Path,
    ledger_path: Option<&Path>,
) -> Result<EnrollmentRecord, AppError> {
    let payload = std::fs::read_to_string(record_path)?;
    if payload.trim().is_empty() || payload.trim() == "null" {
        return Err(AssemblyError::InvalidInput {
            reason: format!("{} does not contain an enrollment record", record_path.display()),
        }
        .into());
    }

    let mut record: EnrollmentRecord =
        serde_json::from_str(&payload).map_err(|err| AssemblyError::InvalidInput {
            reason: err.to_string(),
        })?;

    if let Some(ledger_path) = ledger_path {
        record.payments = PaymentLedgerImporter::from_path(ledger_path)?;
    }

    Ok(record)
}

pub(crate) fn parse_date(raw: &str) -> Result<NaiveDate, String> {
    NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d")
        .map_err(|err| format!("failed to parse '{raw}' as YYYY-MM-DD ({err})"))
}
