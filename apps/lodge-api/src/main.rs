//! Lodge Management API server binary.

use tracing::info;
use tracing_subscriber::EnvFilter;

use lodge_api::config::ApiConfig;
use lodge_api::error::set_dev_mode;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_target(true)
        .init();

    let config = ApiConfig::load()?;
    set_dev_mode(config.dev_mode);
    info!(
        port = config.http_port,
        db = %config.database_path,
        dev_mode = config.dev_mode,
        "Starting lodge-api"
    );

    lodge_api::run(config).await
}
