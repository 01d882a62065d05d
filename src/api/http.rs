use super::{
    ANALYZE_INGREDIENTS_PATH, GENERATE_IMAGE_PATH, GENERATE_PATH, INTENT_PATH,
    IngredientAnalysis, OPTIMIZE_PATH, OptimizeOutcome, RecipeBackend,
};
use crate::config::AppConfig;
use crate::error::{ApiError, ApiResult};
use crate::types::{HistoryEntry, ImageUpload, Recipe};
use async_trait::async_trait;
use reqwest::multipart::{Form, Part};
use reqwest::{Client, RequestBuilder};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// reqwest-backed client for the recipe service.
#[derive(Clone)]
pub struct HttpBackend {
    client: Client,
    base_url: String,
}

#[derive(Serialize)]
struct GenerateRequest<'a> {
    description: &'a str,
}

#[derive(Serialize)]
struct OptimizeRequest<'a> {
    current_recipe: &'a Recipe,
    user_request: &'a str,
    conversation_history: &'a [HistoryEntry],
}

#[derive(Serialize)]
struct ImageRequest<'a> {
    recipe_json: &'a Recipe,
}

#[derive(Deserialize)]
struct ImageResponse {
    image_url: String,
}

#[derive(Serialize)]
struct IntentRequest<'a> {
    message: &'a str,
}

#[derive(Deserialize)]
struct IntentResponse {
    #[serde(default)]
    is_recipe_request: bool,
}

impl HttpBackend {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            base_url: normalize_base(base_url.into()),
        }
    }

    pub fn from_config(config: &AppConfig) -> ApiResult<Self> {
        let mut builder = Client::builder();
        if let Some(timeout) = config.http_timeout {
            builder = builder.timeout(timeout);
        }
        Ok(Self {
            client: builder.build()?,
            base_url: normalize_base(config.api_base_url.clone()),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn endpoint(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    async fn send<T: DeserializeOwned>(&self, path: &str, request: RequestBuilder) -> ApiResult<T> {
        tracing::debug!(path, "calling recipe backend");
        let response = request.send().await?;
        let status = response.status();
        let body = response.text().await?;
        if !status.is_success() {
            tracing::warn!(path, %status, "recipe backend returned an error status");
            return Err(ApiError::Status { status, body });
        }
        Ok(serde_json::from_str(&body)?)
    }

    async fn post_json<B: Serialize + ?Sized, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> ApiResult<T> {
        let request = self.client.post(self.endpoint(path)).json(body);
        self.send(path, request).await
    }
}

fn normalize_base(raw: String) -> String {
    raw.trim().trim_end_matches('/').to_string()
}

#[async_trait]
impl RecipeBackend for HttpBackend {
    async fn generate_recipe(&self, description: &str) -> ApiResult<Recipe> {
        self.post_json(GENERATE_PATH, &GenerateRequest { description })
            .await
    }

    async fn optimize_recipe(
        &self,
        current: &Recipe,
        request: &str,
        history: &[HistoryEntry],
    ) -> ApiResult<OptimizeOutcome> {
        let body: Value = self
            .post_json(
                OPTIMIZE_PATH,
                &OptimizeRequest {
                    current_recipe: current,
                    user_request: request,
                    conversation_history: history,
                },
            )
            .await?;
        Ok(OptimizeOutcome::from_value(body)?)
    }

    async fn analyze_ingredients(&self, image: &ImageUpload) -> ApiResult<IngredientAnalysis> {
        let part = Part::bytes(image.bytes.clone())
            .file_name(image.file_name.clone())
            .mime_str(&image.mime)?;
        let form = Form::new().part("file", part);
        let request = self
            .client
            .post(self.endpoint(ANALYZE_INGREDIENTS_PATH))
            .multipart(form);
        self.send(ANALYZE_INGREDIENTS_PATH, request).await
    }

    async fn generate_dish_image(&self, recipe: &Recipe) -> ApiResult<String> {
        let response: ImageResponse = self
            .post_json(GENERATE_IMAGE_PATH, &ImageRequest {
                recipe_json: recipe,
            })
            .await?;
        Ok(response.image_url)
    }

    async fn classify_intent(&self, message: &str) -> ApiResult<bool> {
        let response: IntentResponse = self
            .post_json(INTENT_PATH, &IntentRequest { message })
            .await?;
        Ok(response.is_recipe_request)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn endpoints_join_without_double_slash() {
        let backend = HttpBackend::new("http://127.0.0.1:8000/");
        assert_eq!(backend.base_url(), "http://127.0.0.1:8000");
        assert_eq!(
            backend.endpoint(GENERATE_PATH),
            "http://127.0.0.1:8000/api/v1/recipes/generate"
        );
        assert_eq!(
            backend.endpoint(INTENT_PATH),
            "http://127.0.0.1:8000/api/v1/intent/analyze"
        );
    }

    #[test]
    fn from_config_uses_configured_base() {
        let config = AppConfig {
            api_base_url: "https://api.example.com".to_string(),
            ..AppConfig::default()
        };
        let backend = HttpBackend::from_config(&config).unwrap();
        assert_eq!(
            backend.endpoint(ANALYZE_INGREDIENTS_PATH),
            "https://api.example.com/api/v1/ingredients/analyze"
        );
    }

    #[test]
    fn intent_response_defaults_to_false() {
        let parsed: IntentResponse = serde_json::from_str("{}").unwrap();
        assert!(!parsed.is_recipe_request);
    }
}
