use sha2::{Digest, Sha256};
use tracing::{info, instrument};

use crate::domain::{
    common::{entities::app_errors::CoreError, services::Service},
    food_analysis::{
        entities::{AgentOutcome, AnalysisRecord, NewAnalysisRecord},
        helpers::{IngredientOverlap, self_comparison},
        normalizer::{Normalized, normalize_comparison, normalize_dish_analysis, normalize_nutrition},
        ports::{FoodAnalysisRepository, FoodAnalysisService, LLMClient},
        prompts::{comparison_prompt, dish_analysis_prompt, nutrition_prompt},
        schema::{get_comparison_schema, get_dish_analysis_schema, get_nutrition_schema},
        value_objects::{
            AnalyzeFoodInput, CompareDishesInput, ComparisonReport, DEFAULT_HISTORY_LIMIT,
            EstimateNutritionInput, GetAnalysisHistoryInput, ImageMimeType, MAX_HISTORY_LIMIT,
            NutritionReport,
        },
    },
    health::ports::HealthCheckRepository,
};

const FALLBACK_REASONING: &str =
    "The model reply could not be parsed, so default values were used";

impl<FA, LLM, HC> FoodAnalysisService for Service<FA, LLM, HC>
where
    FA: FoodAnalysisRepository,
    LLM: LLMClient,
    HC: HealthCheckRepository,
{
    #[instrument(skip(self, input), fields(mime_type = %input.mime_type, image_bytes = input.image_data.len()))]
    async fn analyze_food(
        &self,
        input: AnalyzeFoodInput,
    ) -> Result<AgentOutcome<AnalysisRecord>, CoreError> {
        // 1. Validate the image
        if input.image_data.is_empty() {
            return Err(CoreError::Invalid("image is empty".to_string()));
        }
        let mime_type = ImageMimeType::parse(&input.mime_type).ok_or_else(|| {
            CoreError::Invalid(format!("unsupported image type: {}", input.mime_type))
        })?;
        let image_hash = hex::encode(Sha256::digest(&input.image_data));

        // 2. Call LLM
        let raw_response = self
            .llm_client
            .generate_with_image(
                dish_analysis_prompt(),
                input.image_data,
                mime_type.as_str().to_string(),
                get_dish_analysis_schema(),
            )
            .await?;

        // 3. Normalize the reply
        let normalized = normalize_dish_analysis(&raw_response);
        let fallback = normalized.is_fallback();
        let reasoning = explain(&normalized, |dish| {
            format!(
                "Identified the dish as {} from {} visible ingredients.",
                dish.dish_name,
                dish.ingredients.len()
            )
        });

        // 4. Persist, even when defaults were substituted
        let record = self
            .food_analysis_repository
            .create_analysis(NewAnalysisRecord::new(
                normalized.into_value(),
                Some(image_hash),
            ))
            .await?;

        info!(
            analysis_id = record.id,
            dish_name = %record.dish_name,
            fallback,
            "food analysis stored"
        );

        Ok(AgentOutcome::new(record, reasoning, fallback))
    }

    #[instrument(skip(self, input), fields(dish_name = %input.dish_name))]
    async fn estimate_nutrition(
        &self,
        input: EstimateNutritionInput,
    ) -> Result<AgentOutcome<NutritionReport>, CoreError> {
        let dish_name = input.dish_name.trim().to_string();
        if dish_name.is_empty() {
            return Err(CoreError::Invalid("dish_name cannot be empty".to_string()));
        }

        let ingredients: Option<Vec<String>> = input
            .ingredients
            .map(|items| {
                items
                    .into_iter()
                    .map(|item| item.trim().to_string())
                    .filter(|item| !item.is_empty())
                    .collect::<Vec<String>>()
            })
            .filter(|items| !items.is_empty());

        let raw_response = self
            .llm_client
            .generate_with_text(
                nutrition_prompt(&dish_name, ingredients.as_deref()),
                get_nutrition_schema(),
            )
            .await?;

        let normalized = normalize_nutrition(&raw_response);
        let fallback = normalized.is_fallback();
        let reasoning = explain(&normalized, |nutrition| {
            let source = match &ingredients {
                Some(items) => format!("{} listed ingredients", items.len()),
                None => "the typical ingredients of the dish".to_string(),
            };
            format!(
                "Estimated {} of {} from {}: about {:.0} kcal.",
                nutrition.serving_size, dish_name, source, nutrition.calories
            )
        });

        info!(fallback, "nutrition estimated");

        Ok(AgentOutcome::new(
            NutritionReport {
                dish_name,
                nutrition: normalized.into_value(),
            },
            reasoning,
            fallback,
        ))
    }

    #[instrument(skip(self))]
    async fn compare_dishes(
        &self,
        input: CompareDishesInput,
    ) -> Result<AgentOutcome<ComparisonReport>, CoreError> {
        let dish1 = self.load_analysis(input.first_id).await?;
        let dish2 = self.load_analysis(input.second_id).await?;

        if dish1.id == dish2.id {
            let comparison = self_comparison(&dish1);
            let reasoning = format!(
                "Both identifiers refer to the same analysis of {}, so the dishes are identical.",
                dish1.dish_name
            );
            return Ok(AgentOutcome::new(
                ComparisonReport {
                    dish1,
                    dish2,
                    comparison,
                },
                reasoning,
                false,
            ));
        }

        let raw_response = self
            .llm_client
            .generate_with_text(comparison_prompt(&dish1, &dish2), get_comparison_schema())
            .await?;

        let normalized = normalize_comparison(&raw_response);
        let fallback = normalized.is_fallback();
        let mut reasoning = explain(&normalized, |comparison| {
            format!(
                "{} and {} share {} ingredients, similarity {:.0}/100.",
                dish1.dish_name,
                dish2.dish_name,
                comparison.common_ingredients.len(),
                comparison.similarity_score
            )
        });

        let mut comparison = normalized.into_value();
        if fallback {
            let overlap = IngredientOverlap::between(&dish1.ingredients, &dish2.ingredients);
            comparison.similarity_score = overlap.similarity_score();
            comparison.common_ingredients = overlap.common;
            comparison.unique_to_dish1 = overlap.only_first;
            comparison.unique_to_dish2 = overlap.only_second;
            reasoning = format!(
                "The model reply could not be parsed, so the shared ingredients and similarity {:.0}/100 were computed locally from the stored ingredient lists.",
                comparison.similarity_score
            );
        }

        info!(fallback, similarity = comparison.similarity_score, "dishes compared");

        Ok(AgentOutcome::new(
            ComparisonReport {
                dish1,
                dish2,
                comparison,
            },
            reasoning,
            fallback,
        ))
    }

    async fn get_analysis(&self, id: i64) -> Result<AnalysisRecord, CoreError> {
        self.load_analysis(id).await
    }

    async fn get_analysis_history(
        &self,
        input: GetAnalysisHistoryInput,
    ) -> Result<Vec<AnalysisRecord>, CoreError> {
        let limit = input.limit.unwrap_or(DEFAULT_HISTORY_LIMIT);
        if limit == 0 {
            return Err(CoreError::Invalid(
                "limit must be a positive integer".to_string(),
            ));
        }

        self.food_analysis_repository
            .list_recent(limit.min(MAX_HISTORY_LIMIT))
            .await
    }
}

impl<FA, LLM, HC> Service<FA, LLM, HC>
where
    FA: FoodAnalysisRepository,
    LLM: LLMClient,
    HC: HealthCheckRepository,
{
    async fn load_analysis(&self, id: i64) -> Result<AnalysisRecord, CoreError> {
        self.food_analysis_repository
            .get_by_id(id)
            .await?
            .ok_or(CoreError::AnalysisNotFound(id))
    }
}

/// The model's own explanation when present, a synthesized one otherwise.
fn explain<T>(normalized: &Normalized<T>, synthesize: impl FnOnce(&T) -> String) -> String {
    match normalized {
        Normalized::Parsed {
            reasoning: Some(reasoning),
            ..
        } => reasoning.clone(),
        Normalized::Parsed { value, .. } => synthesize(value),
        Normalized::Fallback { reason, .. } => format!("{FALLBACK_REASONING}: {reason}."),
    }
}
