use axum::Router;
use tokio::net::TcpListener;
use tower_http::cors::{Any, CorsLayer};
use tracing::info;

use crate::Result;
use crate::WeatherAlertError;
use crate::api::{self, AppState};
use crate::config::ServerConfig;

/// Build the full application router. Split out from [`run`] so tests
/// can drive it with `tower::ServiceExt::oneshot`.
pub fn app(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .nest("/weather", api::router())
        .layer(cors)
        .with_state(state)
}

pub async fn run(server: &ServerConfig, state: AppState) -> Result<()> {
    let addr = format!("{}:{}", server.host, server.port);
    let listener = TcpListener::bind(&addr)
        .await
        .map_err(|e| WeatherAlertError::Io { source: e })?;
    info!(%addr, "weather alert server listening");
    axum::serve(listener, app(state))
        .await
        .map_err(|e| WeatherAlertError::Io { source: e })
}
