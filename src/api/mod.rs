//! Backend gateway.
//!
//! Every piece of intelligence in the app (recipe writing, optimisation,
//! ingredient recognition, dish images, intent classification) lives behind the
//! HTTP service. This module describes that service as the [`RecipeBackend`]
//! trait so the orchestration layer can be driven by any implementation; the
//! production one is [`HttpBackend`].
//!
//! All five calls are single request/response exchanges with no retries.
mod http;

pub use http::HttpBackend;

use crate::error::ApiResult;
use crate::types::{HistoryEntry, ImageUpload, Recipe};
use async_trait::async_trait;
use serde::Deserialize;
use serde_json::Value;

pub const GENERATE_PATH: &str = "/api/v1/recipes/generate";
pub const OPTIMIZE_PATH: &str = "/api/v1/recipes/optimize";
pub const GENERATE_IMAGE_PATH: &str = "/api/v1/recipes/generate-image";
pub const ANALYZE_INGREDIENTS_PATH: &str = "/api/v1/ingredients/analyze";
pub const INTENT_PATH: &str = "/api/v1/intent/analyze";

const OFF_TOPIC_REMINDER: &str = "off_topic_reminder";

#[async_trait]
pub trait RecipeBackend: Send + Sync {
    async fn generate_recipe(&self, description: &str) -> ApiResult<Recipe>;

    async fn optimize_recipe(
        &self,
        current: &Recipe,
        request: &str,
        history: &[HistoryEntry],
    ) -> ApiResult<OptimizeOutcome>;

    async fn analyze_ingredients(&self, image: &ImageUpload) -> ApiResult<IngredientAnalysis>;

    async fn generate_dish_image(&self, recipe: &Recipe) -> ApiResult<String>;

    async fn classify_intent(&self, message: &str) -> ApiResult<bool>;
}

/// Result of an optimize call.
#[derive(Clone, Debug, PartialEq)]
pub enum OptimizeOutcome {
    /// Replacement recipe.
    Revised(Recipe),
    /// The request had nothing to do with the recipe; show the message and keep
    /// the current recipe.
    OffTopic { message: String },
}

impl OptimizeOutcome {
    /// Discriminate on the `type` field before reading the body as a recipe.
    pub fn from_value(value: Value) -> serde_json::Result<Self> {
        if value.get("type").and_then(Value::as_str) == Some(OFF_TOPIC_REMINDER) {
            let message = value
                .get("message")
                .and_then(Value::as_str)
                .unwrap_or_default()
                .to_string();
            return Ok(OptimizeOutcome::OffTopic { message });
        }
        serde_json::from_value(value).map(OptimizeOutcome::Revised)
    }
}

/// Body of the ingredient analysis endpoint.
#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
pub struct IngredientAnalysis {
    pub success: bool,
    #[serde(default)]
    pub ingredients: Vec<String>,
    #[serde(default)]
    pub confidence: Option<String>,
    #[serde(default)]
    pub error: Option<String>,
}
