use serde_json::json;

/// Returns the JSON schema for dish identification LLM responses
pub fn get_dish_analysis_schema() -> serde_json::Value {
    json!({
        "type": "object",
        "properties": {
            "dish_name": { "type": "string" },
            "ingredients": {
                "type": "array",
                "items": { "type": "string" }
            },
            "recipe_steps": {
                "type": "array",
                "items": { "type": "string" }
            },
            "fun_facts": {
                "type": "array",
                "items": { "type": "string" }
            },
            "reasoning": { "type": "string" }
        },
        "required": ["dish_name", "ingredients", "recipe_steps", "fun_facts"]
    })
}

/// Returns the JSON schema for nutrition estimate LLM responses
pub fn get_nutrition_schema() -> serde_json::Value {
    json!({
        "type": "object",
        "properties": {
            "serving_size": { "type": "string" },
            "calories": { "type": "number" },
            "proteins": { "type": "number" },
            "carbs": { "type": "number" },
            "fats": { "type": "number" },
            "fiber": { "type": "number" },
            "notes": { "type": "string" },
            "reasoning": { "type": "string" }
        },
        "required": [
            "serving_size", "calories", "proteins", "carbs", "fats", "fiber", "notes"
        ]
    })
}

/// Returns the JSON schema for dish comparison LLM responses
pub fn get_comparison_schema() -> serde_json::Value {
    json!({
        "type": "object",
        "properties": {
            "similarity_score": { "type": "number" },
            "common_ingredients": {
                "type": "array",
                "items": { "type": "string" }
            },
            "unique_to_dish1": {
                "type": "array",
                "items": { "type": "string" }
            },
            "unique_to_dish2": {
                "type": "array",
                "items": { "type": "string" }
            },
            "culinary_relationship": { "type": "string" },
            "cultural_context": { "type": "string" },
            "key_differences": {
                "type": "array",
                "items": { "type": "string" }
            },
            "reasoning": { "type": "string" }
        },
        "required": [
            "similarity_score", "common_ingredients", "unique_to_dish1", "unique_to_dish2",
            "culinary_relationship", "cultural_context", "key_differences"
        ]
    })
}
