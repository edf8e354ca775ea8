//! Turns free-form model replies into the fixed result shapes.
//!
//! The model is asked for JSON but may wrap it in prose or markdown fences,
//! drop fields, or use the wrong value types. Nothing in here returns an
//! error: callers always get a well-shaped value, tagged with whether it was
//! parsed from the reply or substituted wholesale.

use std::sync::LazyLock;

use regex::Regex;
use serde_json::{Map, Value};
use tracing::warn;

use crate::domain::food_analysis::entities::{
    DEFAULT_SERVING_SIZE, DishAnalysis, DishComparison, MAX_SIMILARITY_SCORE, NutritionEstimate,
    UNKNOWN_DISH_NAME,
};

const DISH_NAME_KEYS: &[&str] = &["dish_name", "nombre_plato", "name", "dish"];
const INGREDIENT_KEYS: &[&str] = &["ingredients", "ingredientes", "receta.ingredientes", "recipe.ingredients"];
const STEP_KEYS: &[&str] = &["recipe_steps", "steps", "pasos", "receta.pasos", "recipe.steps"];
const TRIVIA_KEYS: &[&str] = &["fun_facts", "trivia", "datos_curiosos"];
const REASONING_KEYS: &[&str] = &["reasoning", "agent_reasoning", "razonamiento"];

const CALORIE_KEYS: &[&str] = &["calories", "calorias", "kcal"];
const SIMILARITY_KEYS: &[&str] = &["similarity_score", "similarity"];

const REPLY_PREVIEW_CHARS: usize = 200;

static NUMBER_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"-?\d+(?:[.,]\d+)?").expect("number pattern is valid"));
static THOUSANDS_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(\d),(\d{3})\b").expect("thousands pattern is valid"));
static BULLET_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(?:[-*•·]+\s*|\d+[.)]\s+)").expect("bullet pattern is valid"));

/// A normalized model reply.
#[derive(Debug, Clone, PartialEq)]
pub enum Normalized<T> {
    /// A JSON object was found; missing fields were coerced to defaults.
    Parsed { value: T, reasoning: Option<String> },
    /// No JSON object could be recovered; `value` holds placeholder defaults.
    Fallback { value: T, reason: String },
}

impl<T> Normalized<T> {
    pub fn value(&self) -> &T {
        match self {
            Normalized::Parsed { value, .. } | Normalized::Fallback { value, .. } => value,
        }
    }

    pub fn into_value(self) -> T {
        match self {
            Normalized::Parsed { value, .. } | Normalized::Fallback { value, .. } => value,
        }
    }

    pub fn is_fallback(&self) -> bool {
        matches!(self, Normalized::Fallback { .. })
    }

    /// Explanation the model attached to its answer, if any.
    pub fn reasoning(&self) -> Option<&str> {
        match self {
            Normalized::Parsed { reasoning, .. } => reasoning.as_deref(),
            Normalized::Fallback { .. } => None,
        }
    }
}

pub fn normalize_dish_analysis(raw: &str) -> Normalized<DishAnalysis> {
    let Some(object) = extract_json_object(raw) else {
        return fallback(DishAnalysis::placeholder(), "dish analysis", raw);
    };
    let object = unwrap_payload(object, &["analysis", "result"], DISH_NAME_KEYS);

    let value = DishAnalysis {
        dish_name: lookup(&object, DISH_NAME_KEYS)
            .and_then(coerce_text)
            .unwrap_or_else(|| UNKNOWN_DISH_NAME.to_string()),
        ingredients: coerce_text_list(lookup(&object, INGREDIENT_KEYS), ListStyle::Items),
        steps: coerce_text_list(lookup(&object, STEP_KEYS), ListStyle::Sentences),
        trivia: coerce_text_list(lookup(&object, TRIVIA_KEYS), ListStyle::Sentences),
    };

    Normalized::Parsed {
        value,
        reasoning: reasoning(&object),
    }
}

pub fn normalize_nutrition(raw: &str) -> Normalized<NutritionEstimate> {
    let Some(object) = extract_json_object(raw) else {
        return fallback(NutritionEstimate::default(), "nutrition", raw);
    };
    let object = unwrap_payload(object, &["nutrition", "nutricion", "nutrition_facts"], CALORIE_KEYS);

    let amount = |keys: &[&str]| coerce_number(lookup(&object, keys)).max(0.0);

    let value = NutritionEstimate {
        serving_size: lookup(&object, &["serving_size", "porcion", "portion"])
            .and_then(coerce_paragraph)
            .unwrap_or_else(|| DEFAULT_SERVING_SIZE.to_string()),
        calories: amount(CALORIE_KEYS),
        proteins: amount(&["proteins", "protein", "proteinas"]),
        carbs: amount(&["carbs", "carbohydrates", "carbohidratos"]),
        fats: amount(&["fats", "fat", "grasas"]),
        fiber: amount(&["fiber", "fibre", "fibra"]),
        notes: lookup(&object, &["notes", "notas"])
            .and_then(coerce_paragraph)
            .unwrap_or_default(),
    };

    Normalized::Parsed {
        value,
        reasoning: reasoning(&object),
    }
}

pub fn normalize_comparison(raw: &str) -> Normalized<DishComparison> {
    let Some(object) = extract_json_object(raw) else {
        return fallback(DishComparison::default(), "comparison", raw);
    };
    let object = unwrap_payload(object, &["comparison", "comparacion"], SIMILARITY_KEYS);

    let text = |keys: &[&str]| lookup(&object, keys).and_then(coerce_paragraph).unwrap_or_default();

    let value = DishComparison {
        similarity_score: coerce_number(lookup(&object, SIMILARITY_KEYS))
            .clamp(0.0, MAX_SIMILARITY_SCORE),
        common_ingredients: coerce_text_list(lookup(&object, &["common_ingredients"]), ListStyle::Items),
        unique_to_dish1: coerce_text_list(lookup(&object, &["unique_to_dish1"]), ListStyle::Items),
        unique_to_dish2: coerce_text_list(lookup(&object, &["unique_to_dish2"]), ListStyle::Items),
        culinary_relationship: text(&["culinary_relationship"]),
        cultural_context: text(&["cultural_context"]),
        key_differences: coerce_text_list(lookup(&object, &["key_differences"]), ListStyle::Sentences),
    };

    Normalized::Parsed {
        value,
        reasoning: reasoning(&object),
    }
}

/// Upper bound on `{` positions tried by the balanced scan.
const MAX_OBJECT_STARTS: usize = 64;

/// Recovers the first JSON object from a model reply.
///
/// Tried in order: the whole reply, the body of the first markdown fence,
/// every balanced `{...}` span, and finally first `{` to last `}`.
pub fn extract_json_object(text: &str) -> Option<Map<String, Value>> {
    let raw = text.trim();
    if raw.is_empty() {
        return None;
    }

    if let Some(object) = parse_object(raw) {
        return Some(object);
    }

    if let Some(object) = fenced_block(raw).and_then(parse_object) {
        return Some(object);
    }

    let balanced = raw
        .match_indices('{')
        .take(MAX_OBJECT_STARTS)
        .filter_map(|(start, _)| balanced_object_at(raw, start))
        .find_map(parse_object);
    if balanced.is_some() {
        return balanced;
    }

    match (raw.find('{'), raw.rfind('}')) {
        (Some(start), Some(end)) if end > start => parse_object(&raw[start..=end]),
        _ => None,
    }
}

fn parse_object(candidate: &str) -> Option<Map<String, Value>> {
    match serde_json::from_str::<Value>(candidate.trim()) {
        Ok(Value::Object(object)) => Some(object),
        _ => None,
    }
}

fn fenced_block(text: &str) -> Option<&str> {
    let start = text.find("```")?;
    let after = &text[start + 3..];
    // info string such as `json`
    let info_len = after
        .find(|c: char| !c.is_ascii_alphanumeric())
        .unwrap_or(after.len());
    let body = &after[info_len..];
    let end = body.find("```")?;
    Some(body[..end].trim())
}

fn balanced_object_at(text: &str, start: usize) -> Option<&str> {
    let mut depth = 0usize;
    let mut in_string = false;
    let mut escaped = false;

    for (offset, ch) in text[start..].char_indices() {
        if in_string {
            match ch {
                _ if escaped => escaped = false,
                '\\' => escaped = true,
                '"' => in_string = false,
                _ => {}
            }
            continue;
        }

        match ch {
            '"' => in_string = true,
            '{' => depth += 1,
            '}' => {
                depth = depth.checked_sub(1)?;
                if depth == 0 {
                    return Some(&text[start..start + offset + ch.len_utf8()]);
                }
            }
            _ => {}
        }
    }

    None
}

/// Uses the object nested under a wrapper key when the expected top-level
/// keys are absent, e.g. `{"nutrition": {...}}`.
fn unwrap_payload(
    object: Map<String, Value>,
    wrappers: &[&str],
    primary_keys: &[&str],
) -> Map<String, Value> {
    if lookup(&object, primary_keys).is_some() {
        return object;
    }

    let inner = wrappers
        .iter()
        .find_map(|key| object.get(*key).and_then(Value::as_object).cloned());

    match inner {
        Some(mut inner) => {
            if lookup(&inner, REASONING_KEYS).is_none() {
                if let Some(reasoning) = lookup(&object, REASONING_KEYS) {
                    inner.insert("reasoning".to_string(), reasoning.clone());
                }
            }
            inner
        }
        None => object,
    }
}

/// First non-null value under any of `keys`; dotted keys descend into objects.
fn lookup<'a>(object: &'a Map<String, Value>, keys: &[&str]) -> Option<&'a Value> {
    keys.iter().find_map(|key| {
        let mut parts = key.split('.');
        let first = object.get(parts.next()?)?;
        parts
            .try_fold(first, |value, part| value.get(part))
            .filter(|value| !value.is_null())
    })
}

fn reasoning(object: &Map<String, Value>) -> Option<String> {
    lookup(object, REASONING_KEYS).and_then(coerce_paragraph)
}

fn coerce_text(value: &Value) -> Option<String> {
    match value {
        Value::String(text) => {
            let text = text.trim();
            (!text.is_empty()).then(|| text.to_string())
        }
        Value::Number(number) => Some(number.to_string()),
        _ => None,
    }
}

/// Like [`coerce_text`], but an array of strings is joined into one line.
fn coerce_paragraph(value: &Value) -> Option<String> {
    match value {
        Value::Array(_) => {
            let lines = coerce_text_list(Some(value), ListStyle::Sentences);
            (!lines.is_empty()).then(|| lines.join("; "))
        }
        _ => coerce_text(value),
    }
}

fn coerce_number(value: Option<&Value>) -> f64 {
    match value {
        Some(Value::Number(number)) => number.as_f64().unwrap_or(0.0),
        Some(Value::String(text)) => {
            let text = THOUSANDS_RE.replace_all(text, "$1$2");
            NUMBER_RE
                .find(&text)
                .and_then(|token| token.as_str().replace(',', ".").parse::<f64>().ok())
                .unwrap_or(0.0)
        }
        _ => 0.0,
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ListStyle {
    /// Short entries: a plain string is split on commas, de-duplicated.
    Items,
    /// Sentences: a plain string is split on line breaks only.
    Sentences,
}

fn coerce_text_list(value: Option<&Value>, style: ListStyle) -> Vec<String> {
    let Some(value) = value else {
        return Vec::new();
    };

    let raw_items: Vec<String> = match value {
        Value::Array(rows) => rows
            .iter()
            .filter_map(|row| match row {
                Value::Object(entry) => {
                    lookup(entry, &["name", "ingredient", "text", "step"]).and_then(coerce_text)
                }
                other => coerce_text(other),
            })
            .collect(),
        Value::String(text) => match style {
            ListStyle::Items => text.split([',', ';', '\n']).map(str::to_string).collect(),
            ListStyle::Sentences => text.lines().map(str::to_string).collect(),
        },
        _ => Vec::new(),
    };

    let mut cleaned: Vec<String> = Vec::new();
    let mut seen: Vec<String> = Vec::new();
    for row in raw_items {
        let stripped = BULLET_RE.replace(row.trim(), "");
        let text = stripped.split_whitespace().collect::<Vec<&str>>().join(" ");
        if text.is_empty() {
            continue;
        }
        if style == ListStyle::Items {
            let key = text.to_lowercase();
            if seen.contains(&key) {
                continue;
            }
            seen.push(key);
        }
        cleaned.push(text);
    }
    cleaned
}

fn fallback<T>(value: T, kind: &str, raw: &str) -> Normalized<T> {
    let preview: String = raw.chars().take(REPLY_PREVIEW_CHARS).collect();
    warn!(kind, reply = %preview, "model reply contained no JSON object, using defaults");

    Normalized::Fallback {
        value,
        reason: format!("the {kind} reply did not contain a JSON object"),
    }
}
