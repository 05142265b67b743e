use bm_server::{AppState, Backends, Pages, build_router, logger, sweeper};

use bm_config::Config;
use bm_live::ShutdownCoordinator;
use bm_supabase::{AuthClient, BackendClient, RealtimeClient, RestClient};

use std::error::Error;
use std::sync::Arc;

use log::{error, info};
use tokio::net::TcpListener;

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    // .env is optional
    dotenvy::dotenv().ok();

    // Load and validate configuration
    let config = Config::load()?;
    config.validate()?;

    // Initialize logger (before any other logging)
    let log_file_path = config.log_file_path()?;
    logger::initialize(config.logging.level, log_file_path, config.logging.colored)?;

    info!("Starting bm-server v{}", env!("CARGO_PKG_VERSION"));
    config.log_summary();

    // Hosted backend clients
    let client = BackendClient::from_config(&config.supabase)?;
    let realtime = RealtimeClient::new(&client, &config.realtime, &config.supabase.table)?;
    let backends = Backends {
        auth: Arc::new(AuthClient::new(client.clone())),
        store: Arc::new(RestClient::new(client.clone(), &config.supabase.table)),
        live: Arc::new(realtime),
    };
    info!("Backend clients ready for {}", client.base_url());

    let pages = Pages::new()?;

    // Create shutdown coordinator
    let shutdown = ShutdownCoordinator::new();

    // Build application state and router
    let app_state = AppState::new(backends, pages, &config, shutdown.clone());
    sweeper::spawn(app_state.clone());
    let app = build_router(app_state);

    // Create TCP listener
    let bind_addr = config.bind_addr();
    let listener = TcpListener::bind(&bind_addr).await?;
    let actual_addr = listener.local_addr()?;
    info!("Server listening on {}", actual_addr);

    // Spawn signal handler for graceful shutdown
    let shutdown_for_signal = shutdown.clone();
    tokio::spawn(async move {
        match tokio::signal::ctrl_c().await {
            Ok(()) => {
                info!("Received SIGINT (Ctrl+C), initiating graceful shutdown");
                shutdown_for_signal.shutdown();
            }
            Err(e) => {
                error!("Failed to listen for SIGINT: {}", e);
            }
        }
    });

    // Start server with graceful shutdown
    info!("Server ready to accept connections");
    axum::serve(listener, app)
        .with_graceful_shutdown(async move {
            shutdown.subscribe_guard().wait().await;
            info!("Graceful shutdown complete");
        })
        .await?;

    Ok(())
}
