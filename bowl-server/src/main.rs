use bowl_server::{Config, Server, ServerState, init_logger};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // 1. .env is optional
    dotenv::dotenv().ok();

    // 2. Configuration
    let config = Config::from_env().map_err(|e| anyhow::anyhow!("Invalid configuration: {e}"))?;

    // 3. Logging
    let log_dir = config.log_dir();
    init_logger(&config.log_level, config.log_json, Some(&log_dir))?;

    tracing::info!(
        version = env!("CARGO_PKG_VERSION"),
        environment = %config.environment,
        work_dir = %config.work_dir.display(),
        "Bowl server starting"
    );

    // 4. Database, bootstrap admin, services
    let state = ServerState::initialize(&config).await?;

    // 5. HTTP
    let server = Server::with_state(config, state);
    if let Err(e) = server.run().await {
        tracing::error!(error = %e, "Server error");
        return Err(e);
    }

    Ok(())
}
