use axum::{
    extract::{rejection::JsonRejection, State},
    routing::post,
    Json, Router,
};
use serde_json::Value;
use tracing::{info, instrument};

use super::dto::{MealSwapRequest, PlanRequest, RecipeRequest};
use super::services;
use crate::{error::ApiFailure, state::AppState};

const PLAN_FAILED: &str = "Failed to generate plan";
const MEAL_FAILED: &str = "Failed to regenerate meal";
const RECIPE_FAILED: &str = "Failed to fetch recipe";

pub fn planner_routes() -> Router<AppState> {
    Router::new()
        .route("/generate-plan", post(generate_plan))
        .route("/regenerate-meal", post(regenerate_meal))
        .route("/recipe", post(fetch_recipe))
}

#[instrument(skip(state, body))]
pub async fn generate_plan(
    State(state): State<AppState>,
    body: Result<Json<PlanRequest>, JsonRejection>,
) -> Result<Json<Value>, ApiFailure> {
    let Json(req) = body.map_err(|e| state.fail(PLAN_FAILED, e.into()))?;
    let plan = services::generate_plan(state.provider.as_ref(), &req)
        .await
        .map_err(|e| state.fail(PLAN_FAILED, e))?;
    info!(batch = req.is_batch_cooking(), "plan generated");
    Ok(Json(plan))
}

#[instrument(skip(state, body))]
pub async fn regenerate_meal(
    State(state): State<AppState>,
    body: Result<Json<MealSwapRequest>, JsonRejection>,
) -> Result<Json<Value>, ApiFailure> {
    let Json(req) = body.map_err(|e| state.fail(MEAL_FAILED, e.into()))?;
    let meal = services::regenerate_meal(state.provider.as_ref(), &req)
        .await
        .map_err(|e| state.fail(MEAL_FAILED, e))?;
    info!(day = ?req.day, slot = ?req.meal_type, "meal regenerated");
    Ok(Json(meal))
}

#[instrument(skip(state, body))]
pub async fn fetch_recipe(
    State(state): State<AppState>,
    body: Result<Json<RecipeRequest>, JsonRejection>,
) -> Result<Json<Value>, ApiFailure> {
    let Json(req) = body.map_err(|e| state.fail(RECIPE_FAILED, e.into()))?;
    let recipe = services::fetch_recipe(state.provider.as_ref(), &req)
        .await
        .map_err(|e| state.fail(RECIPE_FAILED, e))?;
    info!(dish = ?req.dish_name, "recipe fetched");
    Ok(Json(recipe))
}
