/**
 * Server Entry Point
 *
 * Starts the cowrite document server: initializes tracing, loads the
 * environment configuration, and serves the WebSocket endpoint.
 */
use cowrite::backend::server::config::ServerConfig;
use cowrite::backend::server::init::create_app;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let env_filter = std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string());

    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::new(&env_filter))
        .init();

    tracing::info!("[Startup] Server initialization started");

    let config = ServerConfig::from_env();
    let app = create_app(&config);

    let addr = config.addr();
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!("[Startup] Listening on {}", addr);
    tracing::info!(
        "[Startup] Clients should connect to ws://127.0.0.1:{}/document",
        config.port
    );

    axum::serve(listener, app).await?;

    Ok(())
}
