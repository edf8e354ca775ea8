use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

pub const MAX_SIMILARITY_SCORE: f64 = 100.0;

/// How two stored dishes relate to each other. Never persisted.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize, ToSchema)]
pub struct DishComparison {
    /// 0 (unrelated) to 100 (same dish)
    pub similarity_score: f64,
    pub common_ingredients: Vec<String>,
    pub unique_to_dish1: Vec<String>,
    pub unique_to_dish2: Vec<String>,
    pub culinary_relationship: String,
    pub cultural_context: String,
    pub key_differences: Vec<String>,
}
