use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{require_fields, RelayError};

fn has_text(v: &Option<String>) -> bool {
    v.as_deref().is_some_and(|s| !s.is_empty())
}

/// Truthiness of a loosely typed body field: null, `false`, `0` and `""` are absent.
pub fn is_truthy(v: &Option<Value>) -> bool {
    match v {
        None | Some(Value::Null) => false,
        Some(Value::Bool(b)) => *b,
        Some(Value::Number(n)) => n.as_f64().is_some_and(|f| f != 0.0 && !f.is_nan()),
        Some(Value::String(s)) => !s.is_empty(),
        Some(Value::Array(_)) | Some(Value::Object(_)) => true,
    }
}

/// Renders a loosely typed field as prompt text. Strings go in unquoted.
pub fn field_text(v: &Option<Value>) -> Option<String> {
    match v {
        None | Some(Value::Null) => None,
        Some(Value::String(s)) => Some(s.clone()),
        Some(other) => Some(other.to_string()),
    }
}

/// Macro-nutrient targets in grams. Members are taken as sent.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Macros {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub protein: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fats: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub carbs: Option<Value>,
}

/// Body of `POST /api/generate-plan`. Only `targetCalories` and `macros` are checked;
/// everything else is interpolated into the prompt whatever its JSON type.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlanRequest {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub age: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub weight: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub height: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gender: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub activity: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub goal: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub budget: Option<Value>,
    /// "daily" or "batch".
    #[serde(rename = "cooking_time", default, skip_serializing_if = "Option::is_none")]
    pub cooking_time: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub likes: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dislikes: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target_calories: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub macros: Option<Macros>,
}

impl PlanRequest {
    pub fn validate(&self) -> Result<(), RelayError> {
        require_fields(&[
            ("targetCalories", is_truthy(&self.target_calories)),
            ("macros", self.macros.is_some()),
        ])
    }

    pub fn is_batch_cooking(&self) -> bool {
        self.cooking_time.as_ref().and_then(Value::as_str) == Some("batch")
    }
}

/// Body of `POST /api/regenerate-meal`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MealSwapRequest {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub day: Option<String>,
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub meal_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub current_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub likes: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dislikes: Option<String>,
}

impl MealSwapRequest {
    pub fn validate(&self) -> Result<(), RelayError> {
        require_fields(&[
            ("day", has_text(&self.day)),
            ("type", has_text(&self.meal_type)),
            ("currentName", has_text(&self.current_name)),
        ])
    }
}

/// Body of `POST /api/recipe`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecipeRequest {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dish_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,
}

impl RecipeRequest {
    pub fn validate(&self) -> Result<(), RelayError> {
        require_fields(&[
            ("dishName", has_text(&self.dish_name)),
            ("summary", has_text(&self.summary)),
        ])
    }
}

// Typed views of what the prompts ask the provider for. The relay itself passes
// provider JSON through untouched; these are for callers of the relay.

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Meal {
    pub name: String,
    #[serde(default)]
    pub cal: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rec: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DayPlan {
    pub breakfast: Meal,
    pub lunch: Meal,
    pub dinner: Meal,
    pub snack: Meal,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeeklyPlan {
    pub weekly_plan: BTreeMap<String, DayPlan>,
    #[serde(default)]
    pub shopping_list: BTreeMap<String, Vec<String>>,
    #[serde(default)]
    pub notes: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Recipe {
    pub time: String,
    pub ingredients: Vec<String>,
    pub steps: Vec<String>,
}
