use crate::domain::food_analysis::entities::{AnalysisRecord, DishComparison, MAX_SIMILARITY_SCORE};

/// Case-insensitive set comparison of two ingredient lists.
///
/// Entries keep the spelling and order of the list they were taken from;
/// `common` follows the first list.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct IngredientOverlap {
    pub common: Vec<String>,
    pub only_first: Vec<String>,
    pub only_second: Vec<String>,
}

impl IngredientOverlap {
    pub fn between(first: &[String], second: &[String]) -> Self {
        let first = distinct(first);
        let second = distinct(second);

        let contains = |list: &[(String, String)], key: &str| list.iter().any(|(k, _)| k == key);

        let mut overlap = IngredientOverlap::default();
        for (key, name) in &first {
            if contains(&second, key) {
                overlap.common.push(name.clone());
            } else {
                overlap.only_first.push(name.clone());
            }
        }
        overlap.only_second = second
            .iter()
            .filter(|(key, _)| !contains(&first, key))
            .map(|(_, name)| name.clone())
            .collect();

        overlap
    }

    /// Jaccard index scaled to 0..=100. Two empty lists score 0.
    pub fn similarity_score(&self) -> f64 {
        let union = self.common.len() + self.only_first.len() + self.only_second.len();
        if union == 0 {
            return 0.0;
        }
        let score = self.common.len() as f64 / union as f64 * MAX_SIMILARITY_SCORE;
        (score * 10.0).round() / 10.0
    }
}

/// Comparing an analysis with itself needs no model call.
pub fn self_comparison(record: &AnalysisRecord) -> DishComparison {
    DishComparison {
        similarity_score: MAX_SIMILARITY_SCORE,
        common_ingredients: distinct(&record.ingredients)
            .into_iter()
            .map(|(_, name)| name)
            .collect(),
        unique_to_dish1: Vec::new(),
        unique_to_dish2: Vec::new(),
        culinary_relationship: format!("Both entries are the same analysis of {}.", record.dish_name),
        cultural_context: String::new(),
        key_differences: Vec::new(),
    }
}

fn distinct(items: &[String]) -> Vec<(String, String)> {
    let mut seen: Vec<(String, String)> = Vec::with_capacity(items.len());
    for item in items {
        let name = item.trim();
        if name.is_empty() {
            continue;
        }
        let key = name.to_lowercase();
        if !seen.iter().any(|(k, _)| *k == key) {
            seen.push((key, name.to_string()));
        }
    }
    seen
}
