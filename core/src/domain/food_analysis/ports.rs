use std::future::Future;

use crate::domain::{
    common::entities::app_errors::CoreError,
    food_analysis::{
        entities::{AgentOutcome, AnalysisRecord, NewAnalysisRecord},
        value_objects::{
            AnalyzeFoodInput, CompareDishesInput, ComparisonReport, EstimateNutritionInput,
            GetAnalysisHistoryInput, NutritionReport,
        },
    },
};

/// Repository trait for persisted dish analyses
#[cfg_attr(test, mockall::automock)]
pub trait FoodAnalysisRepository: Send + Sync {
    /// Stores the record; the store assigns `id` and `created_at`.
    fn create_analysis(
        &self,
        record: NewAnalysisRecord,
    ) -> impl Future<Output = Result<AnalysisRecord, CoreError>> + Send;

    fn get_by_id(
        &self,
        id: i64,
    ) -> impl Future<Output = Result<Option<AnalysisRecord>, CoreError>> + Send;

    /// Most recent first, at most `limit` rows.
    fn list_recent(
        &self,
        limit: u64,
    ) -> impl Future<Output = Result<Vec<AnalysisRecord>, CoreError>> + Send;
}

/// LLM Client trait for calling AI models
#[cfg_attr(test, mockall::automock)]
pub trait LLMClient: Send + Sync {
    fn generate_with_image(
        &self,
        prompt: String,
        image_data: Vec<u8>,
        mime_type: String,
        response_schema: serde_json::Value,
    ) -> impl Future<Output = Result<String, CoreError>> + Send;

    fn generate_with_text(
        &self,
        prompt: String,
        response_schema: serde_json::Value,
    ) -> impl Future<Output = Result<String, CoreError>> + Send;
}

/// Service trait for food analysis business logic
pub trait FoodAnalysisService: Send + Sync {
    fn analyze_food(
        &self,
        input: AnalyzeFoodInput,
    ) -> impl Future<Output = Result<AgentOutcome<AnalysisRecord>, CoreError>> + Send;

    fn estimate_nutrition(
        &self,
        input: EstimateNutritionInput,
    ) -> impl Future<Output = Result<AgentOutcome<NutritionReport>, CoreError>> + Send;

    fn compare_dishes(
        &self,
        input: CompareDishesInput,
    ) -> impl Future<Output = Result<AgentOutcome<ComparisonReport>, CoreError>> + Send;

    fn get_analysis(
        &self,
        id: i64,
    ) -> impl Future<Output = Result<AnalysisRecord, CoreError>> + Send;

    fn get_analysis_history(
        &self,
        input: GetAnalysisHistoryInput,
    ) -> impl Future<Output = Result<Vec<AnalysisRecord>, CoreError>> + Send;
}
