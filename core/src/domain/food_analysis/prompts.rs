//! Instruction prompts sent to the vision model. Each one asks for a JSON
//! object shaped like the matching schema in [`super::schema`], plus a short
//! `reasoning` field that is surfaced to API clients.

use crate::domain::food_analysis::entities::AnalysisRecord;

const FALLBACK_INGREDIENTS_HINT: &str =
    "not provided; infer the typical ingredients of this dish from its name";

pub fn dish_analysis_prompt() -> String {
    r#"Analyze this food photo. Many photos show traditional dishes from different cultures.
Provide:
1. The name of the dish
2. Its main ingredients (list of strings)
3. The recipe steps (list of strings)
4. 3 to 5 fun facts about the dish (list of strings)
5. One or two sentences explaining how you identified it

Reply with a JSON object with exactly this structure:
{
    "dish_name": "dish name",
    "ingredients": ["ingredient 1", "ingredient 2"],
    "recipe_steps": ["step 1", "step 2"],
    "fun_facts": ["fact 1", "fact 2"],
    "reasoning": "how the dish was identified"
}"#
    .to_string()
}

pub fn nutrition_prompt(dish_name: &str, ingredients: Option<&[String]>) -> String {
    let ingredients_line = match ingredients {
        Some(items) if !items.is_empty() => items.join(", "),
        _ => FALLBACK_INGREDIENTS_HINT.to_string(),
    };

    format!(
        r#"You are an expert nutritionist. Give precise, realistic nutrition estimates.
Estimate the nutrition facts for one standard serving of:

Dish: {dish_name}
Ingredients: {ingredients_line}

Reply with a JSON object with this structure (numbers in grams, calories in kcal):
{{
    "serving_size": "serving size, e.g. 1 plate, 200g",
    "calories": number,
    "proteins": number,
    "carbs": number,
    "fats": number,
    "fiber": number,
    "notes": "other relevant notes",
    "reasoning": "how the estimate was derived"
}}"#
    )
}

pub fn comparison_prompt(dish1: &AnalysisRecord, dish2: &AnalysisRecord) -> String {
    format!(
        r#"You are an expert in comparative gastronomy and cross-cultural culinary analysis.
Compare these two dishes in detail:

Dish 1: {}
Ingredients: {}

Dish 2: {}
Ingredients: {}

Reply with a JSON object:
{{
    "similarity_score": number from 0 to 100,
    "common_ingredients": ["ingredient"],
    "unique_to_dish1": ["ingredient only in dish 1"],
    "unique_to_dish2": ["ingredient only in dish 2"],
    "culinary_relationship": "how the two dishes relate",
    "cultural_context": "cultural context and origin of each dish",
    "key_differences": ["difference 1", "difference 2", "difference 3"],
    "reasoning": "summary of the comparison"
}}"#,
        dish1.dish_name,
        dish1.ingredients.join(", "),
        dish2.dish_name,
        dish2.ingredients.join(", "),
    )
}

#[cfg(test)]
mod tests {
    use chrono::Utc;

    use super::*;

    fn record(name: &str, ingredients: &[&str]) -> AnalysisRecord {
        AnalysisRecord {
            id: 1,
            dish_name: name.to_string(),
            ingredients: ingredients.iter().map(|s| s.to_string()).collect(),
            steps: vec![],
            trivia: vec![],
            image_hash: None,
            created_at: Utc::now(),
        }
    }

    #[test]
    fn test_nutrition_prompt_lists_ingredients() {
        let ingredients = vec!["quinua".to_string(), "papa".to_string()];
        let prompt = nutrition_prompt("Sopa de quinua", Some(&ingredients));
        assert!(prompt.contains("Dish: Sopa de quinua"));
        assert!(prompt.contains("Ingredients: quinua, papa"));
    }

    #[test]
    fn test_nutrition_prompt_asks_to_infer_missing_ingredients() {
        let prompt = nutrition_prompt("Pique macho", None);
        assert!(prompt.contains(FALLBACK_INGREDIENTS_HINT));

        let prompt = nutrition_prompt("Pique macho", Some(&[]));
        assert!(prompt.contains(FALLBACK_INGREDIENTS_HINT));
    }

    #[test]
    fn test_comparison_prompt_embeds_both_dishes() {
        let prompt = comparison_prompt(
            &record("Salteña", &["carne", "papa"]),
            &record("Empanada", &["carne", "cebolla"]),
        );
        assert!(prompt.contains("Dish 1: Salteña"));
        assert!(prompt.contains("Ingredients: carne, papa"));
        assert!(prompt.contains("Dish 2: Empanada"));
    }
}
