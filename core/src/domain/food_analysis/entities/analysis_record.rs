use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

pub const UNKNOWN_DISH_NAME: &str = "Unknown dish";

/// A persisted dish analysis. Write-once: no operation updates or deletes it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct AnalysisRecord {
    pub id: i64,
    pub dish_name: String,
    pub ingredients: Vec<String>,
    #[serde(rename = "recipe_steps")]
    pub steps: Vec<String>,
    #[serde(rename = "fun_facts")]
    pub trivia: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_hash: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// What the model told us about a dish, already coerced into shape.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize, ToSchema)]
pub struct DishAnalysis {
    pub dish_name: String,
    pub ingredients: Vec<String>,
    pub steps: Vec<String>,
    pub trivia: Vec<String>,
}

impl DishAnalysis {
    pub fn placeholder() -> Self {
        Self {
            dish_name: UNKNOWN_DISH_NAME.to_string(),
            ..Default::default()
        }
    }
}

/// A record waiting for the store to assign its id and timestamp.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewAnalysisRecord {
    pub dish_name: String,
    pub ingredients: Vec<String>,
    pub steps: Vec<String>,
    pub trivia: Vec<String>,
    pub image_hash: Option<String>,
}

impl NewAnalysisRecord {
    pub fn new(analysis: DishAnalysis, image_hash: Option<String>) -> Self {
        let dish_name = match analysis.dish_name.trim() {
            "" => UNKNOWN_DISH_NAME.to_string(),
            name => name.to_string(),
        };

        Self {
            dish_name,
            ingredients: analysis.ingredients,
            steps: analysis.steps,
            trivia: analysis.trivia,
            image_hash,
        }
    }
}
