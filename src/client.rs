//! Typed caller for the relay, for apps that talk to it instead of Gemini.
//!
//! Every call resolves to a [`CallOutcome`]; nothing is retried and no timeout is set.

use reqwest::{Client, StatusCode};
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use tracing::{debug, warn};

use crate::planner::dto::{Meal, MealSwapRequest, PlanRequest, Recipe, RecipeRequest, WeeklyPlan};

#[derive(Debug, Clone, PartialEq)]
pub enum CallOutcome<T> {
    Data(T),
    /// The relay refused the request body (400).
    Rejected(String),
    /// Any other non-success status.
    Failed { status: u16, message: String },
    /// Transport error or an undecodable body.
    Unreachable(String),
}

impl<T> CallOutcome<T> {
    /// Collapses to `Option`, logging whatever went wrong.
    pub fn ok(self) -> Option<T> {
        match self {
            CallOutcome::Data(v) => Some(v),
            CallOutcome::Rejected(message) => {
                warn!(%message, "relay rejected request");
                None
            }
            CallOutcome::Failed { status, message } => {
                warn!(status, %message, "relay call failed");
                None
            }
            CallOutcome::Unreachable(reason) => {
                warn!(%reason, "relay unreachable");
                None
            }
        }
    }

    pub fn is_data(&self) -> bool {
        matches!(self, CallOutcome::Data(_))
    }
}

#[derive(Debug, Deserialize)]
struct RelayErrorBody {
    error: String,
    #[serde(default)]
    message: Option<String>,
}

#[derive(Clone)]
pub struct RelayClient {
    http: Client,
    base_url: String,
}

impl RelayClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self::with_client(Client::new(), base_url)
    }

    pub fn with_client(http: Client, base_url: impl Into<String>) -> Self {
        Self {
            http,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    pub async fn fetch_recipe(&self, dish_name: &str, summary: &str) -> CallOutcome<Recipe> {
        let body = RecipeRequest {
            dish_name: Some(dish_name.to_string()),
            summary: Some(summary.to_string()),
        };
        self.post("/api/recipe", &body).await
    }

    pub async fn generate_meal_plan(&self, metrics: &PlanRequest) -> CallOutcome<WeeklyPlan> {
        self.post("/api/generate-plan", metrics).await
    }

    pub async fn regenerate_meal(&self, req: &MealSwapRequest) -> CallOutcome<Meal> {
        self.post("/api/regenerate-meal", req).await
    }

    async fn post<B, T>(&self, path: &str, body: &B) -> CallOutcome<T>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let url = format!("{}{}", self.base_url, path);
        let response = match self.http.post(&url).json(body).send().await {
            Ok(r) => r,
            Err(e) => return CallOutcome::Unreachable(e.to_string()),
        };

        let status = response.status();
        if status.is_success() {
            debug!(%url, %status, "relay call succeeded");
            return match response.json::<T>().await {
                Ok(v) => CallOutcome::Data(v),
                Err(e) => CallOutcome::Unreachable(format!("undecodable body: {e}")),
            };
        }

        let message = match response.json::<RelayErrorBody>().await {
            Ok(b) => match b.message {
                Some(detail) => format!("{}: {}", b.error, detail),
                None => b.error,
            },
            Err(_) => format!("Server error: {}", status.as_u16()),
        };
        if status == StatusCode::BAD_REQUEST {
            CallOutcome::Rejected(message)
        } else {
            CallOutcome::Failed {
                status: status.as_u16(),
                message,
            }
        }
    }
}
