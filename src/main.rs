use std::sync::Arc;

use stylesync_api::api::{create_router, AppState};
use stylesync_api::config::Config;
use stylesync_api::services::WeatherApiProvider;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::from_env()?;

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("stylesync_api=info,tower_http=info")),
        )
        .init();

    // Without an API key, location-based requests are rejected and callers
    // must pass explicit conditions.
    let state = match &config.weather_api_key {
        Some(key) => AppState::new().with_weather(Arc::new(WeatherApiProvider::new(
            key.clone(),
            config.weather_api_url.clone(),
        ))),
        None => {
            tracing::warn!("WEATHER_API_KEY not set; location-based recommendations disabled");
            AppState::new()
        }
    };

    let app = create_router(state);

    let listener = tokio::net::TcpListener::bind((config.host.as_str(), config.port)).await?;
    tracing::info!(host = %config.host, port = config.port, "Server running");
    axum::serve(listener, app).await?;

    Ok(())
}
