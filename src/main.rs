// focusflow/src/main.rs
use std::sync::Arc;

use focusflow::api::start_api_server;
use focusflow::build_state;
use focusflow::config::AppConfig;
use focusflow::monitoring::{init_tracing, LoggingConfig};

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    dotenvy::dotenv().ok();

    let logging = LoggingConfig::from_env();
    // keep the file writer alive until shutdown
    let _log_guard = init_tracing(&logging)?;
    tracing::info!(
        log_format = logging.log_format.as_str(),
        file_logging = logging.enable_file_logging,
        "Logging initialized"
    );

    let config = AppConfig::from_env();
    let state = Arc::new(build_state(&config));

    if !config.inference_enabled() {
        tracing::warn!("Running in fallback-only mode: simplifications are rule-based and lossy");
    }

    start_api_server(&config, state)?.await
}
