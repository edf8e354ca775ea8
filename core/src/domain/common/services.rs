use crate::domain::{
    food_analysis::ports::{FoodAnalysisRepository, LLMClient},
    health::ports::HealthCheckRepository,
};

/// Application service wiring every port the domain services depend on.
#[derive(Clone)]
pub struct Service<FA, LLM, HC>
where
    FA: FoodAnalysisRepository,
    LLM: LLMClient,
    HC: HealthCheckRepository,
{
    pub(crate) food_analysis_repository: FA,
    pub(crate) llm_client: LLM,
    pub(crate) health_check_repository: HC,
}

impl<FA, LLM, HC> Service<FA, LLM, HC>
where
    FA: FoodAnalysisRepository,
    LLM: LLMClient,
    HC: HealthCheckRepository,
{
    pub fn new(food_analysis_repository: FA, llm_client: LLM, health_check_repository: HC) -> Self {
        Self {
            food_analysis_repository,
            llm_client,
            health_check_repository,
        }
    }
}
