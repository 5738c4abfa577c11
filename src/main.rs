use study_ingest::infrastructure::{AppConfig, container::AppContainer};
use study_ingest::presentation::http::HttpServer;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenv::dotenv().ok();
    env_logger::init();

    let config = AppConfig::from_env()?;
    let container = AppContainer::new(&config).await?;

    tracing::info!(port = config.port, "Starting study ingest service");

    HttpServer::new(
        container.ingest_handler.clone(),
        container.document_handler.clone(),
        container.health_handler.clone(),
        Some(config.port),
    )
    .run()
    .await
}
