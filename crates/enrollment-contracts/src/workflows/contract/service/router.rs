use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Router,
};
use serde_json::{json, Value};

use super::service::{ContractResponse, ContractService, ContractServiceError};
use super::source::EnrollmentSource;
use crate::workflows::contract::record::EnrollmentId;

/// Router builder exposing contract retrieval and ad-hoc assembly.
pub fn contract_router<S>(service: Arc<ContractService<S>>) -> Router
where
    S: EnrollmentSource + 'static,
{
    Router::new()
        .route(
            "/api/v1/enrollments/:enrollment_id/contract",
            get(contract_handler::<S>),
        )
        .route("/api/v1/contracts/assemble", post(assemble_handler::<S>))
        .with_state(service)
}

pub(crate) async fn contract_handler<S>(
    State(service): State<Arc<ContractService<S>>>,
    Path(enrollment_id): Path<String>,
) -> Response
where
    S: EnrollmentSource + 'static,
{
    let id = EnrollmentId(enrollment_id);
    match service.document_for(&id) {
        Ok(document) => {
            (StatusCode::OK, axum::Json(ContractResponse::from(document))).into_response()
        }
        Err(error) => error_response(error),
    }
}

pub(crate) async fn assemble_handler<S>(
    State(service): State<Arc<ContractService<S>>>,
    axum::Json(payload): axum::Json<Value>,
) -> Response
where
    S: EnrollmentSource + 'static,
{
    match service.assemble_payload(payload) {
        Ok(document) => {
            (StatusCode::OK, axum::Json(ContractResponse::from(document))).into_response()
        }
        Err(error) => error_response(error),
    }
}

fn error_response(error: ContractServiceError) -> Response {
    let status = match &error {
        ContractServiceError::NotFound(_) => StatusCode::NOT_FOUND,
        ContractServiceError::Assembly(_) => StatusCode::BAD_REQUEST,
        ContractServiceError::Source(_) => StatusCode::INTERNAL_SERVER_ERROR,
    };
    let payload = json!({
        "error": error.to_string(),
    });
    (status, axum::Json(payload)).into_response()
}
