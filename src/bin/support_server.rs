//! Serves the tool gateway over HTTP: probes at the root, tools under /api/v1.

use support_tools::{app, AppError, AppState, GatewayConfig, ToolGateway};
use tokio::net::TcpListener;

#[tokio::main]
async fn main() -> Result<(), AppError> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("support_tools=info,tower_http=info")),
        )
        .init();

    let config = GatewayConfig::from_env()?;
    let gateway = ToolGateway::open(&config).await?;
    let state = AppState { gateway };

    let listener = TcpListener::bind(&config.bind_addr).await?;
    tracing::info!("listening on {}", listener.local_addr()?);
    axum::serve(listener, app(state, config.body_limit)).await?;
    Ok(())
}
