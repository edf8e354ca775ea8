use crate::domain::{
    common::{entities::app_errors::CoreError, services::Service},
    food_analysis::ports::{FoodAnalysisRepository, LLMClient},
    health::ports::{HealthCheckRepository, HealthCheckService},
};

impl<FA, LLM, HC> HealthCheckService for Service<FA, LLM, HC>
where
    FA: FoodAnalysisRepository,
    LLM: LLMClient,
    HC: HealthCheckRepository,
{
    async fn health(&self) -> Result<u64, CoreError> {
        self.health_check_repository.health().await
    }
}
