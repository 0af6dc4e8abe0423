use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;

use crate::config::ConfigError;
use crate::telemetry::TelemetryError;
use crate::workflows::contract::assembler::AssemblyError;
use crate::workflows::contract::payments::ledger::LedgerImportError;
use crate::workflows::contract::render::RenderError;
use crate::workflows::contract::service::ContractServiceError;

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),
    #[error("telemetry error: {0}")]
    Telemetry(#[from] TelemetryError),
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("server error: {0}")]
    Server(#[from] axum::Error),
    #[error("invalid enrollment: {0}")]
    Assembly(#[from] AssemblyError),
    #[error("payment ledger error: {0}")]
    Ledger(#[from] LedgerImportError),
    #[error("render error: {0}")]
    Render(#[from] RenderError),
    #[error("contract error: {0}")]
    Contract(#[from] ContractServiceError),
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl AppError {
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::Assembly(_) | AppError::Ledger(_) => StatusCode::BAD_REQUEST,
            AppError::Contract(ContractServiceError::Assembly(_)) => StatusCode::BAD_REQUEST,
            AppError::Contract(ContractServiceError::NotFound(_)) => StatusCode::NOT_FOUND,
            AppError::Config(_)
            | AppError::Telemetry(_)
            | AppError::Io(_)
            | AppError::Server(_)
            | AppError::Render(_)
            | AppError::Contract(ContractServiceError::Source(_))
            | AppError::Serialization(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        let body = Json(json!({ "error": self.to_string() }));
        (status, body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::workflows::contract::record::EnrollmentId;

    #[tokio::test]
    async fn maps_errors_to_status_codes() {
        let not_found = AppError::from(ContractServiceError::NotFound(EnrollmentId(
            "enr-9".to_string(),
        )));
        assert_eq!(not_found.status(), StatusCode::NOT_FOUND);

        let invalid = AppError::from(AssemblyError::InvalidInput {
            reason: "enrollment record is missing".to_string(),
        });
        let response = invalid.into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body = axum::body::to_bytes(response.into_body(), 1024)
            .await
            .expect("read body");
        let payload: serde_json::Value = serde_json::from_slice(&body).expect("json payload");
        assert_eq!(
            payload["error"],
            "invalid enrollment: invalid enrollment record: enrollment record is missing"
        );

        assert_eq!(
            AppError::from(ConfigError::InvalidPort).status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }
}
