use crate::cli::ServeArgs;
use crate::infra::{load_repository, AppState};
use crate::routes::with_valuation_routes;
use axum::Extension;
use axum_prometheus::PrometheusMetricLayer;
use listing_value::config::AppConfig;
use listing_value::error::AppError;
use listing_value::telemetry;
use listing_value::valuation::ValuationService;
use std::sync::atomic::{AtomicBool, Ordering};
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
    if let Some(listings) = args.listings.take() {
        config.data.listings_csv = Some(listings);
    }

    telemetry::init(&config.telemetry)?;

    let repository = Arc::new(load_repository(config.data.listings_csv.as_deref())?);

    let (prometheus_layer, prometheus_handle) = PrometheusMetricLayer::pair();
    let readiness_flag = Arc::new(AtomicBool::new(false));
    let app_state = AppState {
        readiness: readiness_flag.clone(),
        metrics: Arc::new(prometheus_handle),
        listings: repository.len(),
    };

    let valuation_service = Arc::new(ValuationService::new(
        repository,
        config.valuation.clone(),
    ));

    let app = with_valuation_routes(valuation_service)
        .layer(Extension(app_state))
        .layer(prometheus_layer);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    readiness_flag.store(true, Ordering::Release);

    info!(
        ?config.environment,
        %addr,
        locale = ?config.valuation.locale,
        "listing valuation service ready"
    );

    axum::serve(listener, app).await?;
    Ok(())
}
