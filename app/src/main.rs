mod config;
mod constants;

use std::sync::Arc;

use config::AppConfig;
use inference::{GatewayError, InferenceGateway, SharedGateway};
use mirage_frontend_http_adapter::{router, AppState};
use mirage_workflow_service::{DesignRequester, LogEventSink, PromptSynthesizer, WorkflowController};

/// Failures that stop the process before or while serving
#[derive(Debug, thiserror::Error)]
enum StartupError {
    #[error("Failed to create inference gateway: {0}")]
    Gateway(#[from] GatewayError),
    #[error("Server error: {0}")]
    Io(#[from] std::io::Error),
}

#[tokio::main]
async fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .format_timestamp_millis()
        .init();

    log::info!("Mirage starting...");

    let mut config = load_config().await;
    config.apply_overrides(|key| std::env::var(key).ok());

    if !config.has_api_key() {
        log::warn!(
            "No API key found in {} or {}; model requests will fail and fall back",
            constants::env::API_KEY,
            constants::env::GEMINI_API_KEY
        );
    }

    if let Err(e) = run(config).await {
        log::error!("{}", e);
        std::process::exit(1);
    }
}

/// Load the stored configuration, writing defaults on first run
async fn load_config() -> AppConfig {
    let Some(config_dir) = AppConfig::default_dir() else {
        log::warn!("No platform config directory; using default configuration");
        return AppConfig::default();
    };

    match AppConfig::load(&config_dir).await {
        Ok(config) => {
            log::info!("Loaded app configuration from {:?}", config_dir);
            if !config_dir.join(constants::paths::CONFIG_FILE_NAME).exists() {
                if let Err(e) = config.save(&config_dir).await {
                    log::warn!("Failed to write default configuration: {}", e);
                }
            }
            config
        }
        Err(e) => {
            log::warn!("Failed to load config, using defaults: {}", e);
            AppConfig::default()
        }
    }
}

async fn run(config: AppConfig) -> Result<(), StartupError> {
    // Single entry point for all model requests
    let gateway: SharedGateway = Arc::new(InferenceGateway::from_config(
        &config.backend,
        &config.backend_config(),
    )?);

    let requester = DesignRequester::new(Arc::clone(&gateway))
        .with_thinking_budget(config.thinking_budget);
    let synthesizer = PromptSynthesizer::new(Arc::clone(&gateway));
    let controller = Arc::new(WorkflowController::new(
        requester,
        synthesizer,
        Arc::new(LogEventSink),
    ));

    let app = router(AppState::new(controller, gateway));

    let listener = tokio::net::TcpListener::bind(&config.bind_address).await?;
    log::info!("Mirage listening on http://{}", listener.local_addr()?);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    log::info!("Mirage stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        log::error!("Failed to listen for shutdown signal: {}", e);
        // Keep serving; the process can still be killed
        std::future::pending::<()>().await;
    }
    log::info!("Shutdown requested");
}
