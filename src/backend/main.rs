/**
 * Chat Relay Server Entry Point
 *
 * Loads configuration, builds the server, starts the change relay and
 * serves HTTP until Ctrl-C or until a relay subscription fails. A relay
 * failure shuts the server down and exits with an error so a supervisor
 * can restart the process.
 */

#[cfg(feature = "ssr")]
#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    use chatrelay::backend::server::{build_server, ServerConfig};
    use tracing_subscriber::EnvFilter;

    // Load environment variables from .env file if present
    dotenv::dotenv().ok();

    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(env_filter).init();

    let config = ServerConfig::from_env()?;
    tracing::info!("Loaded configuration: {:?}", config);

    let server = build_server(&config).await?;
    let mut relay = server.relay.start().await?;

    let addr = std::net::SocketAddr::from(([0, 0, 0, 0], config.port));
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!("Listening on {}", addr);

    let (failure_tx, failure_rx) = tokio::sync::oneshot::channel();
    let shutdown_token = server.shutdown.clone();

    let shutdown = async move {
        tokio::select! {
            result = tokio::signal::ctrl_c() => {
                if let Err(e) = result {
                    tracing::error!("Failed to listen for Ctrl-C: {}", e);
                }
                tracing::info!("Shutdown requested");
            }
            Some(error) = relay.failed() => {
                tracing::error!("Change relay failed, shutting down: {}", error);
                let _ = failure_tx.send(error);
            }
        }
        // Open `/realtime` streams would otherwise hold graceful shutdown forever
        shutdown_token.cancel();
        relay.stop().await;
    };

    axum::serve(listener, server.router)
        .with_graceful_shutdown(shutdown)
        .await?;

    if let Ok(error) = failure_rx.await {
        return Err(error.into());
    }

    tracing::info!("Server stopped");
    Ok(())
}

#[cfg(not(feature = "ssr"))]
fn main() {
    eprintln!("Server requires the 'ssr' feature to be enabled.");
    eprintln!("Run with: cargo run --bin chatrelay-server --features ssr");
    std::process::exit(1);
}
