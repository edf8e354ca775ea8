use tracing::warn;

use crate::{
    domain::common::{DishLensConfig, services::Service},
    infrastructure::{
        db::sqlite::{Sqlite, SqliteConfig},
        food_analysis::repositories::food_analysis_repository::SqliteFoodAnalysisRepository,
        health::repository::SqliteHealthCheckRepository,
        llm::gemini_client::{GeminiConfig, GeminiLLMClient},
    },
};

pub type DishLensService =
    Service<SqliteFoodAnalysisRepository, GeminiLLMClient, SqliteHealthCheckRepository>;

/// Opens the store, runs migrations and wires the Gemini client.
pub async fn create_service(config: DishLensConfig) -> Result<DishLensService, anyhow::Error> {
    let sqlite = Sqlite::new(SqliteConfig {
        url: config.database.url.clone(),
        max_connections: config.database.max_connections,
    })
    .await?;

    if config.llm.gemini_api_key.trim().is_empty() {
        warn!("GEMINI_API_KEY is not set, model-backed endpoints will fail");
    }

    let llm_client = GeminiLLMClient::new(GeminiConfig {
        api_key: config.llm.gemini_api_key,
        model_name: config.llm.gemini_model,
        base_url: config.llm.gemini_base_url,
        timeout: config.llm.request_timeout,
    })?;

    Ok(Service::new(
        SqliteFoodAnalysisRepository::new(sqlite.get_db()),
        llm_client,
        SqliteHealthCheckRepository::new(sqlite.get_db()),
    ))
}
