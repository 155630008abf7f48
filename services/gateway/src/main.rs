use gateway::config::Config;
use gateway::router::create_router;
use gateway::state::AppState;
use std::net::SocketAddr;
use tokio::net::TcpListener;

#[tokio::main]
async fn main() -> Result<(), anyhow::Error> {
    // Initialize tracing
    tracing_subscriber::fmt::init();

    tracing::info!("Starting voting gateway service");

    let config = Config::from_env();
    let port = config.port;

    // Initialize application state
    let state = AppState::new(config);

    // Create router
    let app = create_router(state);

    // Bind and serve; ConnectInfo feeds the identity resolver's
    // origin-address signal.
    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    let listener = TcpListener::bind(addr).await?;

    tracing::info!("Listening on {}", addr);
    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .await?;

    Ok(())
}
