use prontuario_api::api::types::ApiContext;
use prontuario_api::api::build_router;
use prontuario_api::config::AppConfig;
use prontuario_api::db::open_database;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(AppConfig::default_log_filter())),
        )
        .init();

    let config = AppConfig::from_env();
    tracing::info!(
        version = prontuario_api::config::APP_VERSION,
        host = %config.ai_host,
        model = %config.ai_model,
        "Starting {}",
        prontuario_api::config::APP_NAME
    );

    // Apply pending migrations before accepting requests
    open_database(&config.database_path)?;

    std::fs::create_dir_all(&config.uploads_dir)?;

    let bind_addr = config.bind_addr.clone();
    let ctx = ApiContext::new(config);
    let app = build_router(ctx);

    let listener = tokio::net::TcpListener::bind(&bind_addr).await?;
    tracing::info!(addr = %bind_addr, "HTTP server listening");
    axum::serve(listener, app).await?;

    Ok(())
}
