use serde_json::Value;
use tracing::debug;

use super::dto::{MealSwapRequest, PlanRequest, RecipeRequest};
use super::prompts::{meal_swap_prompt, plan_prompt, recipe_prompt};
use crate::error::RelayError;
use crate::gemini::{TextProvider, JSON_MIME};

/// Sends the prompt and parses the reply as JSON. No shape checks.
async fn ask_json(provider: &dyn TextProvider, prompt: &str) -> Result<Value, RelayError> {
    let text = provider.generate(prompt, JSON_MIME).await?;
    let value = serde_json::from_str(&text)?;
    debug!(reply_len = text.len(), "provider reply parsed");
    Ok(value)
}

pub async fn generate_plan(
    provider: &dyn TextProvider,
    req: &PlanRequest,
) -> Result<Value, RelayError> {
    req.validate()?;
    ask_json(provider, &plan_prompt(req)).await
}

pub async fn regenerate_meal(
    provider: &dyn TextProvider,
    req: &MealSwapRequest,
) -> Result<Value, RelayError> {
    req.validate()?;
    ask_json(provider, &meal_swap_prompt(req)).await
}

pub async fn fetch_recipe(
    provider: &dyn TextProvider,
    req: &RecipeRequest,
) -> Result<Value, RelayError> {
    req.validate()?;
    ask_json(provider, &recipe_prompt(req)).await
}
