use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use axum::response::Response;
use serde_json::{json, Value};

use crate::workflows::contract::assembler::DocumentAssembler;
use crate::workflows::contract::record::{EnrollmentId, EnrollmentRecord};
use crate::workflows::contract::service::{
    contract_router, ContractService, EnrollmentSource, SourceError,
};

pub(super) fn record_json() -> Value {
    json!({
        "enrollment_id": "enr-0042",
        "student": {
            "name": "Mariana Alves",
            "document": "987.654.321-00",
            "email": "mariana@example.com",
        },
        "program": {
            "name": "Formação em Coaching Integral",
            "modality": "Online",
            "start_date": "2026-03-02",
            "immersion_event": { "name": "Imersão Presencial", "start_date": "2026-05-16" },
        },
        "contractor": { "name": "Instituto Horizonte", "document": "12.345.678/0001-90" },
        "payments": [
            { "method": "credit_card", "billing": "installment", "amount": 250 },
            { "method": "credit_card", "billing": "installment", "amount": 250 },
            { "method": "pix", "billing": "upfront", "amount": "500,00" },
        ],
        "bonus": { "selected_codes": ["immersion"], "supplemental": { "enrollment_count": 1 } },
        "clauses": "<p>CLÁUSULA 1 - Do objeto</p><p>Prestação de serviços educacionais.</p>\
<p>CLÁUSULA 2 - Do pagamento</p><p>Conforme quadro da capa.</p>",
        "fields": { "contract_city": "Florianópolis", "issued_on": "2026-02-10" },
    })
}

pub(super) fn record() -> EnrollmentRecord {
    serde_json::from_value(record_json()).expect("fixture record parses")
}

#[derive(Default)]
pub(super) struct MemorySource {
    records: Mutex<HashMap<EnrollmentId, EnrollmentRecord>>,
}

impl MemorySource {
    pub(super) fn with(record: EnrollmentRecord) -> Self {
        let source = Self::default();
        source
            .records
            .lock()
            .expect("lock")
            .insert(record.enrollment_id.clone(), record);
        source
    }
}

impl EnrollmentSource for MemorySource {
    fn fetch(&self, id: &EnrollmentId) -> Result<Option<EnrollmentRecord>, SourceError> {
        Ok(self.records.lock().expect("lock").get(id).cloned())
    }
}

pub(super) struct UnavailableSource;

impl EnrollmentSource for UnavailableSource {
    fn fetch(&self, _id: &EnrollmentId) -> Result<Option<EnrollmentRecord>, SourceError> {
        Err(SourceError::Unavailable("database offline".to_string()))
    }
}

pub(super) fn build_service() -> Arc<ContractService<MemorySource>> {
    Arc::new(ContractService::new(
        Arc::new(MemorySource::with(record())),
        Arc::new(DocumentAssembler::default()),
    ))
}

pub(super) fn router_with_service<S>(service: Arc<ContractService<S>>) -> axum::Router
where
    S: EnrollmentSource + 'static,
{
    contract_router(service)
}

pub(super) async fn read_json_body(response: Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), 1024 * 1024)
        .await
        .expect("read body");
    serde_json::from_slice(&body).expect("json payload")
}
