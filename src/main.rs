use std::sync::Arc;
use std::time::Duration;

use tracing_subscriber::EnvFilter;

use transport_requests::api;
use transport_requests::cache::{BanRegistry, LocationCache};
use transport_requests::clients::http::{
    HttpIdentityClient, HttpPaymentGateway, HttpRideClient, OsmGeocoder,
};
use transport_requests::clients::smtp::SmtpMailer;
use transport_requests::config::Config;
use transport_requests::error::AppError;
use transport_requests::lifecycle::sweeper::run_sweeper;
use transport_requests::lifecycle::{Collaborators, Lifecycle};
use transport_requests::notify::Notifier;
use transport_requests::observability::metrics::Metrics;
use transport_requests::state::AppState;
use transport_requests::store::RequestStore;
use transport_requests::token::TokenSigner;

#[tokio::main]
async fn main() -> Result<(), AppError> {
    let config = Config::from_env()?;

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(config.log_level.clone()))
        .with_target(false)
        .compact()
        .init();

    let identity = Arc::new(HttpIdentityClient::new(config.identity_url.clone()));
    let mailer = Arc::new(SmtpMailer::new(&config.smtp_relay, config.smtp_from.clone())?);

    let metrics = Metrics::new();
    let notifier = Arc::new(Notifier::new(
        identity.clone(),
        mailer,
        config.event_buffer_size,
    ));
    let lifecycle = Arc::new(Lifecycle::new(
        Arc::new(RequestStore::new()),
        Arc::new(BanRegistry::new()),
        Arc::new(LocationCache::new()),
        notifier.clone(),
        Collaborators {
            identity,
            rides: Arc::new(HttpRideClient::new(config.ride_service_url.clone())),
            geocoder: Arc::new(OsmGeocoder::new(config.geocoder_url.clone())),
            gateway: Arc::new(HttpPaymentGateway::new(config.payment_url.clone())),
        },
        TokenSigner::new(&config.token_secret),
        metrics.clone(),
        config.public_base_url.clone(),
    ));

    tokio::spawn(run_sweeper(
        lifecycle.clone(),
        Duration::from_secs(config.sweep_interval_secs),
    ));

    let state = Arc::new(AppState::new(lifecycle, notifier, metrics));
    let app = api::rest::router(state);

    let bind_addr = format!("0.0.0.0:{}", config.http_port);
    let listener = tokio::net::TcpListener::bind(&bind_addr)
        .await
        .map_err(|err| AppError::Internal(format!("failed to bind {bind_addr}: {err}")))?;

    tracing::info!(http_port = config.http_port, "http server started");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|err| AppError::Internal(format!("server error: {err}")))?;

    Ok(())
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %err, "failed to listen for shutdown signal");
    }
}
