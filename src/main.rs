use actix_web::{HttpServer, web};
use stargazer_api::{
    AppMetrics, ServerConfig, StargazerConfig, TelemetryConfig, create_app, init_tracing,
};
use std::io;
use tracing::{info, warn};

#[actix_web::main]
async fn main() -> io::Result<()> {
    // A missing .env file is normal outside local development
    let dotenv = dotenvy::dotenv();

    let telemetry = TelemetryConfig::from_env();
    init_tracing(&telemetry).map_err(|e| io::Error::other(e.to_string()))?;

    if let Err(e) = dotenv {
        info!(reason = %e, "No .env file loaded");
    }

    let server_config = ServerConfig::from_env();
    let config = StargazerConfig::from_env();

    if config.openweather_api_key.is_none() {
        warn!("OPENWEATHER_API_KEY is not set; /api/weather will return 500 and reports will omit weather");
    }

    // One registry for the whole process; every worker shares it
    let metrics = web::Data::new(
        AppMetrics::new().map_err(|e| io::Error::other(format!("Failed to create metrics: {e}")))?,
    );

    let (host, port) = server_config.bind_address();
    info!(%host, port, "Starting stargazer API");

    HttpServer::new(move || create_app(config.clone(), metrics.clone()))
        .bind((host.as_str(), port))?
        .run()
        .await
}
