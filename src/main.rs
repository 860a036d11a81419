mod api;
mod config;
mod routes;
mod services;
mod state;

use std::sync::Arc;

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt::init();

    let config = config::ConsoleConfig::from_env().expect("invalid console configuration");
    let port = config.port;
    let transport = api::http::HttpRecordsApi::new(config.records_api_url.clone());
    let records = api::Records::new(Arc::new(transport));
    tracing::info!(records_api = %config.records_api_url, "records api configured");
    let state = state::AppState::new(records, config);

    let app = routes::app(state);
    let listener = tokio::net::TcpListener::bind(format!("0.0.0.0:{port}"))
        .await
        .expect("failed to bind");

    tracing::info!(%port, "radiograph console listening");
    axum::serve(listener, app).await.expect("server failed");
}
