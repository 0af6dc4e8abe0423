use crate::cli::ServeArgs;
use crate::infra::{demo_record, AppState, InMemoryEnrollmentSource};
use crate::routes::with_contract_routes;
use axum::Extension;
use axum_prometheus::PrometheusMetricLayer;
use enrollment_contracts::config::AppConfig;
use enrollment_contracts::error::AppError;
use enrollment_contracts::telemetry;
use enrollment_contracts::workflows::contract::{ContractService, DocumentAssembler};
use std::sync::atomic::Ordering;
use std::sync::Arc;
use tracing::info;

pub(crate) async fn run(mut args: ServeArgs) -> Result<(), AppError> {
    let mut config = AppConfig::load()?;

    if let Some(host) = args.host.take() {
        config.server.host = host;
    }
    if let Some(port) = args.port.take() {
        config.server.port = port;
    }

    telemetry::init(&config.telemetry)?;

    let (prometheus_layer, prometheus_handle) = PrometheusMetricLayer::pair();
    let readiness_flag = Arc::new(std::sync::atomic::AtomicBool::new(false));
    let app_state = AppState {
        readiness: readiness_flag.clone(),
        metrics: Arc::new(prometheus_handle),
    };

    let source = Arc::new(InMemoryEnrollmentSource::seeded([demo_record()?]));
    let assembler = Arc::new(DocumentAssembler::new(config.layout.assembly()));
    let contract_service = Arc::new(ContractService::new(source, assembler));

    let app = with_contract_routes(contract_service)
        .layer(Extension(app_state))
        .layer(prometheus_layer);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    readiness_flag.store(true, Ordering::Release);

    info!(
        environment = config.environment.label(),
        %addr,
        max_page_size = config.layout.max_page_size,
        footer_share_threshold = config.layout.footer_share_threshold,
        "enrollment contract service ready"
    );

    axum::serve(listener, app).await?;
    Ok(())
}
