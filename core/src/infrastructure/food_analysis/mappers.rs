use crate::{domain::food_analysis::entities::AnalysisRecord, entity::food_analyses};

/// Decodes a JSON-encoded list column. Unreadable values become empty lists.
pub fn decode_list(raw: &str) -> Vec<String> {
    serde_json::from_str(raw).unwrap_or_default()
}

pub fn encode_list(items: &[String]) -> Result<String, serde_json::Error> {
    serde_json::to_string(items)
}

impl From<&food_analyses::Model> for AnalysisRecord {
    fn from(model: &food_analyses::Model) -> Self {
        Self {
            id: model.id,
            dish_name: model.dish_name.clone(),
            ingredients: decode_list(&model.ingredients),
            steps: decode_list(&model.recipe_steps),
            trivia: decode_list(&model.fun_facts),
            image_hash: model.image_hash.clone(),
            created_at: model.created_at,
        }
    }
}

impl From<food_analyses::Model> for AnalysisRecord {
    fn from(model: food_analyses::Model) -> Self {
        Self::from(&model)
    }
}
