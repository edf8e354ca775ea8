use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

pub const DEFAULT_SERVING_SIZE: &str = "1 serving";

/// Per-serving nutrition estimate. Never persisted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct NutritionEstimate {
    pub serving_size: String,
    pub calories: f64,
    pub proteins: f64,
    pub carbs: f64,
    pub fats: f64,
    pub fiber: f64,
    pub notes: String,
}

impl Default for NutritionEstimate {
    fn default() -> Self {
        Self {
            serving_size: DEFAULT_SERVING_SIZE.to_string(),
            calories: 0.0,
            proteins: 0.0,
            carbs: 0.0,
            fats: 0.0,
            fiber: 0.0,
            notes: String::new(),
        }
    }
}
