//! Forum API server entry point
//!
//! Run with:
//! ```bash
//! cargo run -p forum-api
//! ```
//!
//! Configuration comes from the TOML file named by `FORUM_CONFIG` when set,
//! otherwise from environment variables (a `.env` file is honoured).

use forum_common::{try_init_tracing_with_config, AppConfig, ConfigError, TracingConfig};
use tracing::{error, info};

#[tokio::main]
async fn main() {
    let config = match load_config() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Failed to load configuration: {e}");
            std::process::exit(1);
        }
    };

    if let Err(e) = try_init_tracing_with_config(TracingConfig::for_environment(config.app.env)) {
        eprintln!("Warning: Failed to initialize tracing: {e}");
    }

    info!(
        name = %config.app.name,
        env = ?config.app.env,
        address = %config.api.address(),
        "Starting forum API server"
    );

    if let Err(e) = forum_api::run(config).await {
        error!(error = %e, "Server failed");
        std::process::exit(1);
    }
}

fn load_config() -> Result<AppConfig, ConfigError> {
    let _ = dotenvy::dotenv();
    match std::env::var("FORUM_CONFIG") {
        Ok(path) => AppConfig::from_file(&path),
        Err(_) => AppConfig::from_env(),
    }
}
