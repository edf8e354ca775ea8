use std::time::Duration;

use chrono::{DateTime, Utc};

pub mod entities;
pub mod services;

#[derive(Clone, Debug)]
pub struct DishLensConfig {
    pub database: DatabaseConfig,
    pub llm: LLMConfig,
}

#[derive(Clone, Debug)]
pub struct DatabaseConfig {
    /// sqlx connection string, e.g. `sqlite://food_analyzer.db`
    pub url: String,
    pub max_connections: u32,
}

#[derive(Clone, Debug)]
pub struct LLMConfig {
    pub gemini_api_key: String,
    pub gemini_model: String,
    pub gemini_base_url: String,
    pub request_timeout: Duration,
}

pub fn generate_timestamp() -> DateTime<Utc> {
    Utc::now()
}
